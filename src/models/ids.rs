use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a row identifier newtype.
///
/// Each collection gets its own ID type so a tag value ID can never be passed
/// where a question ID is expected.
macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new ID from a raw row ID.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying row ID.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(
    /// Identifier of a question row, assigned by the store on creation.
    ///
    /// IDs of different collections do not mix:
    ///
    /// ```compile_fail
    /// use kbase::{QuestionId, TagNameId};
    ///
    /// let question_id: QuestionId = TagNameId::new(1);
    /// ```
    QuestionId
);

row_id!(
    /// Identifier of a tag name row.
    TagNameId
);

row_id!(
    /// Identifier of a tag value ("linked tag") row.
    TagValueId
);

row_id!(
    /// Identifier of a question to tag value link row.
    LinkId
);
