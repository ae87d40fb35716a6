use serde::{Deserialize, Serialize};

use super::{LinkId, QuestionId, TagNameId, TagValueId};

/// A tag name, the category under which values are grouped (e.g. "topic").
///
/// Names are unique across the store and shared by every question that uses
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagName {
    pub id: TagNameId,
    pub name: String,
}

impl TagName {
    /// Creates a tag name record.
    pub fn new(id: TagNameId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One value under a tag name (e.g. "topic" = "math"), also called a linked tag.
///
/// The (`tag_name_id`, `value`) pair is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValue {
    pub id: TagValueId,
    pub tag_name_id: TagNameId,
    pub value: String,
}

impl TagValue {
    /// Creates a tag value record.
    pub fn new(id: TagValueId, tag_name_id: TagNameId, value: impl Into<String>) -> Self {
        Self {
            id,
            tag_name_id,
            value: value.into(),
        }
    }
}

/// Join record connecting one question to one tag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTagLink {
    pub id: LinkId,
    pub question_id: QuestionId,
    pub tag_value_id: TagValueId,
}
