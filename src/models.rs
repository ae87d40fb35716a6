mod ids;
mod question;
mod tag;

pub use ids::{LinkId, QuestionId, TagNameId, TagValueId};
pub use question::{NewQuestion, Question, TagsInformation};
pub use tag::{QuestionTagLink, TagName, TagValue};
