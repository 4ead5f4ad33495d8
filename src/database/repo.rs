use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info};

use crate::database::records::{Content, Record};
use crate::database::schema;
use crate::error::Result;
use crate::utils::config::Config;

/// Target used for echoed SQL statements.
pub const SQL_LOG_TARGET: &str = "tuin_store::sql";

/// Direct handle on the database file, used to drop and recreate it.
pub struct DirectConn {
    db: PathBuf,
}

impl DirectConn {
    pub fn new(config: &Config) -> Self {
        Self {
            db: config.main.db.clone(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db
    }

    /// Drops the database and recreates every table, empty.
    ///
    /// Dropping an SQLite database means deleting its file, so this fails with
    /// an IO error (`NotFound`) when there is no file yet. `echo` is passed on
    /// to [`init_session`] for the new database.
    pub fn rebuild(&self, echo: bool) -> Result<Session> {
        info!("Removing database {:?}", self.db);
        fs::remove_file(&self.db)?;

        let session = init_session(&self.db, echo)?;
        schema::create_all(&session.conn)?;
        info!("Created {} tables in {:?}", schema::TABLES.len(), self.db);
        Ok(session)
    }
}

/// Opens the SQLite file at `db` and returns a session on it.
///
/// A missing file is not an error: SQLite creates it and the session sees an
/// empty database. With `echo` every statement is logged on [`SQL_LOG_TARGET`].
pub fn init_session(db: impl AsRef<Path>, echo: bool) -> Result<Session> {
    let path = db.as_ref().to_path_buf();
    debug!("Opening database {:?}", path);
    let mut conn = Connection::open(&path)?;
    if echo {
        conn.trace(Some(log_statement));
    }
    debug!("Database session ready");
    Ok(Session { conn, path })
}

fn log_statement(sql: &str) {
    info!(target: SQL_LOG_TARGET, "{}", sql);
}

pub struct Session {
    conn: Connection,
    path: PathBuf,
}

impl Session {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn insert<R: Record>(&self, record: &R) -> Result<i64> {
        Ok(record.insert(&self.conn)?)
    }

    pub fn count<R: Record>(&self) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    pub fn all<R: Record>(&self) -> Result<Vec<R>> {
        let sql = format!("SELECT {} FROM {}", R::COLUMNS, R::TABLE);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], R::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// User tables currently in the database, sorted by name.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let names = stmt.query_map([], |row| row.get(0))?;
        Ok(names.collect::<rusqlite::Result<Vec<String>>>()?)
    }

    /// All content rows whose body contains `needle`, in id order.
    ///
    /// The match is SQLite `LIKE`, so ASCII letters compare case-insensitively.
    /// Rows without a body never match.
    pub fn contents_with_body_like(&self, needle: &str) -> Result<Vec<Content>> {
        let sql = format!(
            "SELECT {} FROM content WHERE body LIKE ?1 ESCAPE '\\' ORDER BY id",
            Content::COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([like_pattern(needle)], Content::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

/// Wraps `needle` in `%` for a substring `LIKE`, escaping `%`, `_` and `\`.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
