use rusqlite::{Connection, OptionalExtension};

use crate::Result;
use crate::models::QuestionId;

/// A question row as persisted, without its tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRow {
    pub id: QuestionId,
    pub title: String,
    pub answer: String,
}

/// Accessor for the `questions` table.
pub struct QuestionTable<'c> {
    conn: &'c Connection,
}

impl<'c> QuestionTable<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Inserts a question and returns the ID the store assigned.
    pub fn add(&self, title: &str, answer: &str) -> Result<QuestionId> {
        self.conn.execute(
            "INSERT INTO questions (title, answer) VALUES (?1, ?2)",
            (title, answer),
        )?;
        Ok(QuestionId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_by_id(&self, id: QuestionId) -> Result<Option<QuestionRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, title, answer FROM questions WHERE id = ?1",
                [id.get()],
                |row| {
                    Ok(QuestionRow {
                        id: QuestionId::new(row.get(0)?),
                        title: row.get(1)?,
                        answer: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn exists(&self, id: QuestionId) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM questions WHERE id = ?1)",
            [id.get()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
