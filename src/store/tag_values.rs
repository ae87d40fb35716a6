use rusqlite::{Connection, OptionalExtension, Row};

use super::Upserted;
use crate::Result;
use crate::models::{TagNameId, TagValue, TagValueId};

/// Accessor for the `tag_values` table (linked tags).
pub struct TagValueTable<'c> {
    conn: &'c Connection,
}

fn row_to_tag_value(row: &Row<'_>) -> rusqlite::Result<TagValue> {
    Ok(TagValue::new(
        TagValueId::new(row.get(0)?),
        TagNameId::new(row.get(1)?),
        row.get::<_, String>(2)?,
    ))
}

impl<'c> TagValueTable<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn get_by_id(&self, id: TagValueId) -> Result<Option<TagValue>> {
        let value = self
            .conn
            .query_row(
                "SELECT id, tag_name_id, value FROM tag_values WHERE id = ?1",
                [id.get()],
                row_to_tag_value,
            )
            .optional()?;
        Ok(value)
    }

    pub fn get_by_tag_and_value(
        &self,
        tag_name_id: TagNameId,
        value: &str,
    ) -> Result<Option<TagValue>> {
        let value = self
            .conn
            .query_row(
                "SELECT id, tag_name_id, value FROM tag_values
                 WHERE tag_name_id = ?1 AND value = ?2",
                (tag_name_id.get(), value),
                row_to_tag_value,
            )
            .optional()?;
        Ok(value)
    }

    /// Returns the value row scoped to `tag_name_id`, inserting it first if
    /// absent. `created` reports whether this call inserted it.
    pub fn get_or_insert(&self, tag_name_id: TagNameId, value: &str) -> Result<Upserted<TagValue>> {
        let inserted = self.conn.execute(
            "INSERT INTO tag_values (tag_name_id, value) VALUES (?1, ?2)
             ON CONFLICT(tag_name_id, value) DO NOTHING",
            (tag_name_id.get(), value),
        )?;
        let record = self.conn.query_row(
            "SELECT id, tag_name_id, value FROM tag_values
             WHERE tag_name_id = ?1 AND value = ?2",
            (tag_name_id.get(), value),
            row_to_tag_value,
        )?;
        Ok(Upserted {
            record,
            created: inserted == 1,
        })
    }
}
