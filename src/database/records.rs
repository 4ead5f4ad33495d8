//! Row types for the ten tables of the tuin database.
//!
//! Every struct mirrors its table column for column. Nullable columns are
//! `Option`s; autoincrement keys are `Option<i64>` so a fresh record can be
//! inserted with `id: None` and receive its rowid from SQLite.

use std::fmt;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

/// A row type that knows its table and how to move itself in and out of SQLite.
pub trait Record: Sized {
    const TABLE: &'static str;
    /// Column list used for `SELECT`, in the order `from_row` reads them.
    const COLUMNS: &'static str;

    /// Inserts the record and returns the rowid SQLite assigned (or kept).
    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Kind of legacy node. Books carry the parent/child hierarchy.
///
/// `type` is free text in the export; anything that is not one of the known
/// kinds is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Book,
    Picture,
    Message,
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Book => "Book",
            NodeType::Picture => "Picture",
            NodeType::Message => "Message",
            NodeType::Other(s) => s,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NodeType {
    fn from(s: &str) -> Self {
        match s {
            "Book" => NodeType::Book,
            "Picture" => NodeType::Picture,
            "Message" => NodeType::Message,
            _ => NodeType::Other(s.to_string()),
        }
    }
}

impl From<String> for NodeType {
    fn from(s: String) -> Self {
        NodeType::from(s.as_str())
    }
}

impl From<NodeType> for String {
    fn from(t: NodeType) -> Self {
        match t {
            NodeType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl ToSql for NodeType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for NodeType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(NodeType::from(value.as_str()?))
    }
}

/// Node title and body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: Option<i64>,
    pub node_id: Option<i64>,
    pub title: String,
    pub body: Option<String>,
}

impl Record for Content {
    const TABLE: &'static str = "content";
    const COLUMNS: &'static str = "id, node_id, title, body";

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO content (id, node_id, title, body) VALUES (?1, ?2, ?3, ?4)",
            params![self.id, self.node_id, self.title, self.body],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            node_id: row.get(1)?,
            title: row.get(2)?,
            body: row.get(3)?,
        })
    }
}

/// Link from a node to its Flickr photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flickr {
    pub id: Option<i64>,
    pub node_id: Option<i64>,
    pub photo_id: Option<i64>,
}

impl Record for Flickr {
    const TABLE: &'static str = "flickr";
    const COLUMNS: &'static str = "id, node_id, photo_id";

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO flickr (id, node_id, photo_id) VALUES (?1, ?2, ?3)",
            params![self.id, self.node_id, self.photo_id],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            node_id: row.get(1)?,
            photo_id: row.get(2)?,
        })
    }
}

/// Where a Flickr picture lives, one URL per size variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlickrDetails {
    pub photo_id: i64,
    pub datetaken: i64,
    pub title: String,
    pub url_c: String,
    pub url_l: String,
    pub url_m: String,
    pub url_n: String,
    pub url_o: String,
    pub url_q: String,
    pub url_s: String,
    pub url_sq: String,
    pub url_t: String,
    pub url_z: String,
}

impl Record for FlickrDetails {
    const TABLE: &'static str = "flickrdetails";
    const COLUMNS: &'static str =
        "photo_id, datetaken, title, url_c, url_l, url_m, url_n, url_o, url_q, url_s, url_sq, url_t, url_z";

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO flickrdetails (photo_id, datetaken, title, url_c, url_l, url_m, url_n, url_o, url_q, url_s, url_sq, url_t, url_z)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                self.photo_id,
                self.datetaken,
                self.title,
                self.url_c,
                self.url_l,
                self.url_m,
                self.url_n,
                self.url_o,
                self.url_q,
                self.url_s,
                self.url_sq,
                self.url_t,
                self.url_z
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            photo_id: row.get(0)?,
            datetaken: row.get(1)?,
            title: row.get(2)?,
            url_c: row.get(3)?,
            url_l: row.get(4)?,
            url_m: row.get(5)?,
            url_n: row.get(6)?,
            url_o: row.get(7)?,
            url_q: row.get(8)?,
            url_s: row.get(9)?,
            url_sq: row.get(10)?,
            url_t: row.get(11)?,
            url_z: row.get(12)?,
        })
    }
}

/// Which node was selected when. Append only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub id: Option<i64>,
    pub node_id: i64,
    pub timestamp: i64,
}

impl Record for History {
    const TABLE: &'static str = "history";
    const COLUMNS: &'static str = "id, node_id, timestamp";

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO history (id, node_id, timestamp) VALUES (?1, ?2, ?3)",
            params![self.id, self.node_id, self.timestamp],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            node_id: row.get(1)?,
            timestamp: row.get(2)?,
        })
    }
}

/// A locally stored picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lophoto {
    pub id: Option<i64>,
    pub node_id: i64,
    pub filename: String,
    pub uri: String,
    pub created: i64,
}

impl Record for Lophoto {
    const TABLE: &'static str = "lophoto";
    const COLUMNS: &'static str = "id, node_id, filename, uri, created";

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO lophoto (id, node_id, filename, uri, created) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![self.id, self.node_id, self.filename, self.uri, self.created],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            node_id: row.get(1)?,
            filename: row.get(2)?,
            uri: row.get(3)?,
            created: row.get(4)?,
        })
    }
}

/// A node of the legacy site.
///
/// `parent_id` points at another node for books but is not a foreign key:
/// nodes are loaded in whatever order the export delivers them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub parent_id: i64,
    pub created: i64,
    pub modified: i64,
    pub revcnt: Option<i64>,
    #[serde(rename = "type")]
    pub node_type: Option<NodeType>,
}

impl Record for Node {
    const TABLE: &'static str = "node";
    const COLUMNS: &'static str = "id, parent_id, created, modified, revcnt, type";

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO node (id, parent_id, created, modified, revcnt, type) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                self.id,
                self.parent_id,
                self.created,
                self.modified,
                self.revcnt,
                self.node_type
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            parent_id: row.get(1)?,
            created: row.get(2)?,
            modified: row.get(3)?,
            revcnt: row.get(4)?,
            node_type: row.get(5)?,
        })
    }
}

/// Assignment of a term to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub id: Option<i64>,
    pub node_id: i64,
    pub term_id: i64,
    pub created: i64,
}

impl Record for Taxonomy {
    const TABLE: &'static str = "taxonomy";
    const COLUMNS: &'static str = "id, node_id, term_id, created";

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO taxonomy (id, node_id, term_id, created) VALUES (?1, ?2, ?3, ?4)",
            params![self.id, self.node_id, self.term_id, self.created],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            node_id: row.get(1)?,
            term_id: row.get(2)?,
            created: row.get(3)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: i64,
    pub vocabulary_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Record for Term {
    const TABLE: &'static str = "term";
    const COLUMNS: &'static str = "id, vocabulary_id, name, description";

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO term (id, vocabulary_id, name, description) VALUES (?1, ?2, ?3, ?4)",
            params![self.id, self.vocabulary_id, self.name, self.description],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            vocabulary_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
        })
    }
}

/// Taxonomy vocabulary. On the old Drupal site these were 'Plaats' and 'Planten'.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub weight: Option<i64>,
}

impl Record for Vocabulary {
    const TABLE: &'static str = "vocabulary";
    const COLUMNS: &'static str = "id, name, description, weight";

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO vocabulary (id, name, description, weight) VALUES (?1, ?2, ?3, ?4)",
            params![self.id, self.name, self.description, self.weight],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            weight: row.get(3)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    pub password_hash: Option<String>,
}

impl Record for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str = "id, username, password_hash";

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO users (id, username, password_hash) VALUES (?1, ?2, ?3)",
            params![self.id, self.username, self.password_hash],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
        })
    }
}
