pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    LinkId, NewQuestion, Question, QuestionId, QuestionTagLink, TagName, TagNameId, TagValue,
    TagValueId, TagsInformation,
};
pub use service::{LinkOutcome, QuestionService};
