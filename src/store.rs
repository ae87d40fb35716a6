//! Keyed accessors over the four persisted collections.
//!
//! Each table type borrows the connection and exposes only the narrow lookups
//! and inserts the question service composes. None of them open transactions.

mod links;
mod questions;
mod tag_names;
mod tag_values;

pub use links::LinkTable;
pub use questions::{QuestionRow, QuestionTable};
pub use tag_names::TagNameTable;
pub use tag_values::TagValueTable;

/// Result of a get-or-create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted<T> {
    /// The stored record, either freshly inserted or already present.
    pub record: T,
    /// True when this call inserted the record.
    pub created: bool,
}
