use rusqlite::Connection;

/// Table names in the order they are declared in [`SCHEMA`].
pub const TABLES: [&str; 10] = [
    "content",
    "flickr",
    "flickrdetails",
    "history",
    "lophoto",
    "node",
    "taxonomy",
    "term",
    "vocabulary",
    "users",
];

// No foreign keys: node.parent_id and the taxonomy/term/vocabulary links are
// loaded in arbitrary order, so references are only checked by the loader.
pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS content (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        node_id INTEGER UNIQUE,
        title TEXT NOT NULL,
        body TEXT
    );

    CREATE TABLE IF NOT EXISTS flickr (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        node_id INTEGER UNIQUE,
        photo_id INTEGER
    );

    CREATE TABLE IF NOT EXISTS flickrdetails (
        photo_id INTEGER PRIMARY KEY,
        datetaken INTEGER NOT NULL,
        title TEXT NOT NULL,
        url_c TEXT NOT NULL,
        url_l TEXT NOT NULL,
        url_m TEXT NOT NULL,
        url_n TEXT NOT NULL,
        url_o TEXT NOT NULL,
        url_q TEXT NOT NULL,
        url_s TEXT NOT NULL,
        url_sq TEXT NOT NULL,
        url_t TEXT NOT NULL,
        url_z TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        node_id INTEGER NOT NULL,
        timestamp INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS lophoto (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        node_id INTEGER NOT NULL,
        filename TEXT NOT NULL,
        uri TEXT NOT NULL,
        created INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS node (
        id INTEGER PRIMARY KEY,
        parent_id INTEGER NOT NULL,
        created INTEGER NOT NULL,
        modified INTEGER NOT NULL,
        revcnt INTEGER,
        type TEXT
    );

    CREATE TABLE IF NOT EXISTS taxonomy (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        node_id INTEGER NOT NULL,
        term_id INTEGER NOT NULL,
        created INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS term (
        id INTEGER PRIMARY KEY,
        vocabulary_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        description TEXT
    );

    CREATE TABLE IF NOT EXISTS vocabulary (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT,
        weight INTEGER
    );

    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL,
        password_hash TEXT
    );

    CREATE UNIQUE INDEX IF NOT EXISTS ix_users_username ON users (username);
";

/// Creates every table in one batch, skipping tables that already exist.
pub fn create_all(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(conn: &Connection, table: &str) -> Vec<(String, bool, bool)> {
        // (name, notnull, pk)
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({})", table))
            .unwrap();
        stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(1)?,
                row.get::<_, i64>(3)? == 1,
                row.get::<_, i64>(5)? > 0,
            ))
        })
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
    }

    #[test]
    fn test_create_all_declares_every_table() {
        let conn = Connection::open_in_memory().unwrap();
        create_all(&conn).unwrap();

        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        let names: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        let mut expected: Vec<String> = TABLES.iter().map(|t| t.to_string()).collect();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_flickrdetails_urls_are_required() {
        let conn = Connection::open_in_memory().unwrap();
        create_all(&conn).unwrap();

        let cols = columns(&conn, "flickrdetails");
        assert_eq!(cols.len(), 13);
        let urls: Vec<_> = cols.iter().filter(|(name, _, _)| name.starts_with("url_")).collect();
        assert_eq!(urls.len(), 10);
        assert!(urls.iter().all(|(_, notnull, _)| *notnull));
        assert!(cols.iter().any(|(name, _, pk)| name == "photo_id" && *pk));
    }

    #[test]
    fn test_node_optional_columns() {
        let conn = Connection::open_in_memory().unwrap();
        create_all(&conn).unwrap();

        let cols = columns(&conn, "node");
        let nullable: Vec<&str> = cols
            .iter()
            .filter(|(_, notnull, pk)| !notnull && !pk)
            .map(|(name, _, _)| name.as_str())
            .collect();
        assert_eq!(nullable, vec!["revcnt", "type"]);
    }

    #[test]
    fn test_create_all_keeps_existing_tables() {
        let conn = Connection::open_in_memory().unwrap();
        create_all(&conn).unwrap();
        conn.execute(
            "INSERT INTO vocabulary (name) VALUES ('Planten')",
            [],
        )
        .unwrap();
        conn.execute_batch("DROP TABLE history").unwrap();

        create_all(&conn).unwrap();

        let kept: i64 = conn
            .query_row("SELECT COUNT(*) FROM vocabulary", [], |row| row.get(0))
            .unwrap();
        assert_eq!(kept, 1);
        let history: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'history'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(history, 1);
    }
}
