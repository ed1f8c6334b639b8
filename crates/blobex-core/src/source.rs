//! Row source: reads image records out of the SQLite database.
//!
//! The connection lives only inside [`RowSource::fetch`]. All rows are
//! materialized and the connection is closed before any file is written.

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::cmp::Ordering;
use std::path::PathBuf;

use crate::config::DatabaseConfig;
use crate::error::{SourceError, SourceResult};
use crate::types::ImageRecord;

/// Collation registered on every connection for text ordering.
pub const UNICODE_COLLATION: &str = "UNICODE";

/// Everything the pipeline needs from the database.
#[derive(Debug)]
pub struct RowSet {
    /// `COUNT(*)` over the whole table
    pub total_count: u64,

    /// Non-null image rows, oldest timestamp first
    pub records: Vec<ImageRecord>,
}

/// Reads image rows according to a [`DatabaseConfig`].
pub struct RowSource {
    path: PathBuf,
    table: String,
    key_column: String,
    image_column: String,
    timestamp_column: String,
}

impl RowSource {
    /// Build a row source reading from `path` with the table layout in `config`.
    pub fn new(path: PathBuf, config: &DatabaseConfig) -> Self {
        Self {
            path,
            table: config.table.clone(),
            key_column: config.key_column.clone(),
            image_column: config.image_column.clone(),
            timestamp_column: config.timestamp_column.clone(),
        }
    }

    /// Count all rows and load every non-null image row.
    pub fn fetch(&self) -> SourceResult<RowSet> {
        let conn = self.open()?;

        let total_count = self.count_rows(&conn)?;
        let records = self.load_records(&conn)?;

        conn.close().map_err(|(_, e)| SourceError::Query(e))?;

        tracing::debug!(
            "Loaded {} non-null row(s) of {} from {:?}",
            records.len(),
            total_count,
            self.path
        );
        Ok(RowSet {
            total_count,
            records,
        })
    }

    fn open(&self) -> SourceResult<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| SourceError::Open {
            path: self.path.clone(),
            source,
        })?;

        conn.create_collation(UNICODE_COLLATION, unicode_collation)?;
        Ok(conn)
    }

    fn count_rows(&self, conn: &Connection) -> SourceResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(&self.table));
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn load_records(&self, conn: &Connection) -> SourceResult<Vec<ImageRecord>> {
        let image = quote_identifier(&self.image_column);
        let timestamp = quote_identifier(&self.timestamp_column);
        let sql = format!(
            "SELECT {key}, {image}, {timestamp}
             FROM {table}
             WHERE {image} IS NOT NULL
             ORDER BY {timestamp} ASC",
            key = quote_identifier(&self.key_column),
            table = quote_identifier(&self.table),
        );

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            let key = self.key_to_string(row.get_ref(0)?)?;
            let data = match row.get_ref(1)? {
                ValueRef::Blob(bytes) => bytes.to_vec(),
                // Not an image; kept so the integrity check reports it as corrupt
                ValueRef::Text(text) => text.to_vec(),
                other => {
                    tracing::warn!(
                        "Row {:?} stores a {} in {}; treating as empty",
                        key,
                        other.data_type(),
                        self.image_column
                    );
                    Vec::new()
                }
            };
            let timestamp = row.get(2)?;
            records.push(ImageRecord {
                key,
                data,
                timestamp,
            });
        }

        Ok(records)
    }

    fn key_to_string(&self, value: ValueRef<'_>) -> SourceResult<String> {
        match value {
            ValueRef::Text(text) => Ok(String::from_utf8_lossy(text).into_owned()),
            ValueRef::Integer(i) => Ok(i.to_string()),
            // Debug keeps the fraction, so 1.0 does not collide with integer 1
            ValueRef::Real(f) => Ok(format!("{f:?}")),
            other => Err(SourceError::UnsupportedKey {
                column: self.key_column.clone(),
                type_name: other.data_type().to_string(),
            }),
        }
    }
}

/// Plain code-point ordering.
fn unicode_collation(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Quote an SQL identifier, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
