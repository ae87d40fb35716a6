use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::QuestionId;

/// Per-question view of tag name to tag values.
///
/// Rebuilt from link records on every read; never stored as such.
pub type TagsInformation = BTreeMap<String, Vec<String>>;

/// A stored question with its tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier assigned by the store.
    pub id: QuestionId,
    pub title: String,
    pub answer: String,
    /// Tag values grouped by tag name, in the order their links were created.
    pub tags: TagsInformation,
}

/// Input for creating a question.
///
/// # Examples
///
/// ```
/// use kbase::NewQuestion;
///
/// let question = NewQuestion::new("Q1", "A1").tag("topic", ["math", "algebra"]);
///
/// assert_eq!(question.title, "Q1");
/// assert_eq!(question.tags["topic"], vec!["math", "algebra"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    pub answer: String,
    #[serde(default)]
    pub tags: TagsInformation,
}

impl NewQuestion {
    /// Creates a question input with no tags.
    pub fn new(title: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            answer: answer.into(),
            tags: TagsInformation::new(),
        }
    }

    /// Appends values under a tag name.
    ///
    /// Calling this twice with the same name extends the existing value list.
    pub fn tag<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.tags
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Replaces the whole tags map.
    pub fn tags(mut self, tags: TagsInformation) -> Self {
        self.tags = tags;
        self
    }
}
