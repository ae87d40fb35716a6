use rusqlite::{Connection, OptionalExtension, Row};

use super::Upserted;
use crate::Result;
use crate::models::{TagName, TagNameId};

/// Accessor for the `tag_names` table.
pub struct TagNameTable<'c> {
    conn: &'c Connection,
}

fn row_to_tag_name(row: &Row<'_>) -> rusqlite::Result<TagName> {
    Ok(TagName::new(TagNameId::new(row.get(0)?), row.get::<_, String>(1)?))
}

impl<'c> TagNameTable<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn get_by_id(&self, id: TagNameId) -> Result<Option<TagName>> {
        let tag = self
            .conn
            .query_row(
                "SELECT id, name FROM tag_names WHERE id = ?1",
                [id.get()],
                row_to_tag_name,
            )
            .optional()?;
        Ok(tag)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<TagName>> {
        let tag = self
            .conn
            .query_row(
                "SELECT id, name FROM tag_names WHERE name = ?1",
                [name],
                row_to_tag_name,
            )
            .optional()?;
        Ok(tag)
    }

    /// Returns the tag name row, inserting it first if absent.
    ///
    /// The insert relies on the UNIQUE constraint, so two writers racing on
    /// the same name end up with one row.
    pub fn get_or_insert(&self, name: &str) -> Result<Upserted<TagName>> {
        let inserted = self.conn.execute(
            "INSERT INTO tag_names (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            [name],
        )?;
        let record = self.conn.query_row(
            "SELECT id, name FROM tag_names WHERE name = ?1",
            [name],
            row_to_tag_name,
        )?;
        Ok(Upserted {
            record,
            created: inserted == 1,
        })
    }
}
