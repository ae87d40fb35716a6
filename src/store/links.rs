use rusqlite::{Connection, Row};

use crate::Result;
use crate::models::{LinkId, QuestionId, QuestionTagLink, TagValueId};

/// Accessor for the `question_tag_links` join table.
pub struct LinkTable<'c> {
    conn: &'c Connection,
}

fn row_to_link(row: &Row<'_>) -> rusqlite::Result<QuestionTagLink> {
    Ok(QuestionTagLink {
        id: LinkId::new(row.get(0)?),
        question_id: QuestionId::new(row.get(1)?),
        tag_value_id: TagValueId::new(row.get(2)?),
    })
}

impl<'c> LinkTable<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Links a question to a tag value unless the pair is already linked.
    ///
    /// Returns true when a new link row was written.
    pub fn add_if_absent(&self, question_id: QuestionId, tag_value_id: TagValueId) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT INTO question_tag_links (question_id, tag_value_id) VALUES (?1, ?2)
             ON CONFLICT(question_id, tag_value_id) DO NOTHING",
            (question_id.get(), tag_value_id.get()),
        )?;
        Ok(inserted == 1)
    }

    /// Returns every link of a question, oldest first.
    pub fn get_by_question(&self, question_id: QuestionId) -> Result<Vec<QuestionTagLink>> {
        self.query(
            "SELECT id, question_id, tag_value_id FROM question_tag_links
             WHERE question_id = ?1 ORDER BY id",
            question_id.get(),
        )
    }

    /// Returns every link pointing at a tag value, oldest first.
    pub fn get_by_tag_value(&self, tag_value_id: TagValueId) -> Result<Vec<QuestionTagLink>> {
        self.query(
            "SELECT id, question_id, tag_value_id FROM question_tag_links
             WHERE tag_value_id = ?1 ORDER BY id",
            tag_value_id.get(),
        )
    }

    /// Deletes the links between a question and a tag value, returning how
    /// many rows went away.
    pub fn remove_by_question_and_tag_value(
        &self,
        question_id: QuestionId,
        tag_value_id: TagValueId,
    ) -> Result<usize> {
        let removed = self.conn.execute(
            "DELETE FROM question_tag_links WHERE question_id = ?1 AND tag_value_id = ?2",
            (question_id.get(), tag_value_id.get()),
        )?;
        Ok(removed)
    }

    fn query(&self, sql: &str, key: i64) -> Result<Vec<QuestionTagLink>> {
        let mut stmt = self.conn.prepare(sql)?;
        let links = stmt
            .query_map([key], row_to_link)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use crate::store::{QuestionTable, TagNameTable, TagValueTable};

    fn seed(db: &Database) -> (QuestionId, TagValueId, TagValueId) {
        let conn = db.connection();
        let question = QuestionTable::new(conn).add("Q", "A").unwrap();
        let topic = TagNameTable::new(conn).get_or_insert("topic").unwrap().record;
        let values = TagValueTable::new(conn);
        let math = values.get_or_insert(topic.id, "math").unwrap().record;
        let algebra = values.get_or_insert(topic.id, "algebra").unwrap().record;
        (question, math.id, algebra.id)
    }

    #[test]
    fn add_if_absent_skips_existing_pair() {
        let db = Database::in_memory().unwrap();
        let (question, math, _) = seed(&db);
        let links = LinkTable::new(db.connection());

        assert!(links.add_if_absent(question, math).unwrap());
        assert!(!links.add_if_absent(question, math).unwrap());
        assert_eq!(links.get_by_question(question).unwrap().len(), 1);
    }

    #[test]
    fn get_by_question_keeps_insertion_order() {
        let db = Database::in_memory().unwrap();
        let (question, math, algebra) = seed(&db);
        let links = LinkTable::new(db.connection());
        links.add_if_absent(question, algebra).unwrap();
        links.add_if_absent(question, math).unwrap();

        let values: Vec<TagValueId> = links
            .get_by_question(question)
            .unwrap()
            .into_iter()
            .map(|link| link.tag_value_id)
            .collect();

        assert_eq!(values, vec![algebra, math]);
    }

    #[test]
    fn remove_only_touches_matching_pair() {
        let db = Database::in_memory().unwrap();
        let (question, math, algebra) = seed(&db);
        let links = LinkTable::new(db.connection());
        links.add_if_absent(question, math).unwrap();
        links.add_if_absent(question, algebra).unwrap();

        assert_eq!(links.remove_by_question_and_tag_value(question, math).unwrap(), 1);
        assert_eq!(links.remove_by_question_and_tag_value(question, math).unwrap(), 0);

        let remaining = links.get_by_question(question).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].tag_value_id, algebra);
        assert_eq!(links.get_by_tag_value(math).unwrap(), Vec::new());
    }
}
