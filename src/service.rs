use serde::Serialize;
use tracing::{debug, info};

use crate::models::{NewQuestion, Question, QuestionId, TagsInformation};
use crate::store::{LinkTable, QuestionTable, TagNameTable, TagValueTable};
use crate::{Database, Error, Result};

/// Counts reported by [`QuestionService::link_tags`].
///
/// Both counters track whether the tag *value* row already existed, not
/// whether the question was already linked to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkOutcome {
    /// Values that had no tag value row before the call.
    pub created: usize,
    /// Values whose tag value row was already stored.
    pub existed: usize,
}

/// Service layer composing the question, tag name, tag value and link tables.
///
/// Every operation is a fixed sequence of lookups and inserts. Multi-step
/// writes are not atomic: if a later step fails, rows written by earlier
/// steps stay in place.
///
/// # Examples
///
/// ```
/// use kbase::{Database, NewQuestion, QuestionService};
///
/// # fn main() -> kbase::Result<()> {
/// let service = QuestionService::new(Database::in_memory()?);
///
/// let id = service.create_question(&NewQuestion::new("Q1", "A1").tag("topic", ["math"]))?;
/// let question = service.get_question(id)?.expect("question should exist");
/// assert_eq!(question.tags["topic"], vec!["math"]);
/// # Ok(())
/// # }
/// ```
pub struct QuestionService {
    db: Database,
}

impl QuestionService {
    /// Creates a new service that takes ownership of the database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    fn questions(&self) -> QuestionTable<'_> {
        QuestionTable::new(self.db.connection())
    }

    fn tag_names(&self) -> TagNameTable<'_> {
        TagNameTable::new(self.db.connection())
    }

    fn tag_values(&self) -> TagValueTable<'_> {
        TagValueTable::new(self.db.connection())
    }

    fn links(&self) -> LinkTable<'_> {
        LinkTable::new(self.db.connection())
    }

    /// Stores a question and links it to every (tag name, value) pair it carries.
    ///
    /// The question row is written first. Tag names and values that do not
    /// exist yet are created along the way and shared with later questions.
    /// Repeating a value under the same name links it once. A tag name with
    /// an empty value list is stored but, having no links, does not show up
    /// in [`get_question`](Self::get_question).
    ///
    /// # Errors
    ///
    /// Storage failures are returned as [`Error::Storage`]. Rows written
    /// before the failing step are kept.
    pub fn create_question(&self, question: &NewQuestion) -> Result<QuestionId> {
        let id = self.questions().add(&question.title, &question.answer)?;

        let mut linked = 0;
        for (name, values) in &question.tags {
            let tag = self.tag_names().get_or_insert(name)?;
            if tag.created {
                debug!(tag = %name, id = %tag.record.id, "created tag name");
            }

            for value in values {
                let tag_value = self.tag_values().get_or_insert(tag.record.id, value)?;
                if tag_value.created {
                    debug!(tag = %name, value = %value, "created tag value");
                }
                if self.links().add_if_absent(id, tag_value.record.id)? {
                    linked += 1;
                }
            }
        }

        info!(question = %id, links = linked, "created question");
        Ok(id)
    }

    /// Retrieves a question by ID with its tags rebuilt from the link table.
    ///
    /// Returns `None` if no question exists with the given ID.
    pub fn get_question(&self, id: QuestionId) -> Result<Option<Question>> {
        let Some(row) = self.questions().get_by_id(id)? else {
            debug!(question = %id, "question not found");
            return Ok(None);
        };

        let mut tags = TagsInformation::new();
        for link in self.links().get_by_question(id)? {
            let Some(tag_value) = self.tag_values().get_by_id(link.tag_value_id)? else {
                continue;
            };
            let Some(tag_name) = self.tag_names().get_by_id(tag_value.tag_name_id)? else {
                continue;
            };
            tags.entry(tag_name.name).or_default().push(tag_value.value);
        }

        Ok(Some(Question {
            id: row.id,
            title: row.title,
            answer: row.answer,
            tags,
        }))
    }

    /// Finds questions linked to any of `values` under `tag_name`.
    ///
    /// An unknown tag name yields an empty list and unknown values are
    /// skipped. Results follow candidate order, then link order.
    ///
    /// The result is not deduplicated: a question linked through two of the
    /// candidate values is returned twice. Callers wanting a set must dedupe
    /// by [`Question::id`] themselves.
    pub fn search_questions(&self, tag_name: &str, values: &[&str]) -> Result<Vec<Question>> {
        let Some(tag) = self.tag_names().get_by_name(tag_name)? else {
            debug!(tag = %tag_name, "search on unknown tag name");
            return Ok(Vec::new());
        };

        let mut question_ids = Vec::new();
        for value in values {
            let Some(tag_value) = self.tag_values().get_by_tag_and_value(tag.id, value)? else {
                debug!(tag = %tag_name, value = %value, "skipping unknown tag value");
                continue;
            };
            question_ids.extend(
                self.links()
                    .get_by_tag_value(tag_value.id)?
                    .into_iter()
                    .map(|link| link.question_id),
            );
        }

        let mut questions = Vec::with_capacity(question_ids.len());
        for id in question_ids {
            if let Some(question) = self.get_question(id)? {
                questions.push(question);
            }
        }

        info!(tag = %tag_name, matches = questions.len(), "searched questions");
        Ok(questions)
    }

    /// Question removal is not available in this store.
    ///
    /// Always returns [`Error::NotSupported`] without touching storage.
    pub fn remove_question(&self, id: QuestionId) -> Result<()> {
        debug!(question = %id, "rejected question removal");
        Err(Error::NotSupported("question removal"))
    }

    /// Attaches `values` under `tag_name` to an existing question.
    ///
    /// The tag name is created once if needed and shared by all values.
    /// Values already linked to the question are left as they are but still
    /// count toward [`LinkOutcome::existed`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::QuestionNotFound`] before writing anything if the
    /// question does not exist.
    pub fn link_tags(
        &self,
        question_id: QuestionId,
        tag_name: &str,
        values: &[&str],
    ) -> Result<LinkOutcome> {
        if !self.questions().exists(question_id)? {
            return Err(Error::QuestionNotFound(question_id));
        }

        let tag = self.tag_names().get_or_insert(tag_name)?.record;

        let mut outcome = LinkOutcome::default();
        for value in values {
            let tag_value = self.tag_values().get_or_insert(tag.id, value)?;
            self.links().add_if_absent(question_id, tag_value.record.id)?;

            if tag_value.created {
                outcome.created += 1;
            } else {
                outcome.existed += 1;
            }
        }

        info!(
            question = %question_id,
            tag = %tag_name,
            created = outcome.created,
            existed = outcome.existed,
            "linked tags"
        );
        Ok(outcome)
    }

    /// Detaches `values` under `tag_name` from a question.
    ///
    /// Returns the number of link rows removed. An unknown tag name or value
    /// removes nothing and is not an error. Tag name and tag value rows are
    /// kept even when no question references them anymore.
    pub fn withdraw_tags(
        &self,
        question_id: QuestionId,
        tag_name: &str,
        values: &[&str],
    ) -> Result<usize> {
        let Some(tag) = self.tag_names().get_by_name(tag_name)? else {
            debug!(tag = %tag_name, "withdraw on unknown tag name");
            return Ok(0);
        };

        let mut removed = 0;
        for value in values {
            let Some(tag_value) = self.tag_values().get_by_tag_and_value(tag.id, value)? else {
                debug!(tag = %tag_name, value = %value, "skipping unknown tag value");
                continue;
            };
            removed += self
                .links()
                .remove_by_question_and_tag_value(question_id, tag_value.id)?;
        }

        info!(question = %question_id, tag = %tag_name, removed, "withdrew tags");
        Ok(removed)
    }
}
