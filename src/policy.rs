use std::fmt;

use crate::access::Access;
use crate::collection::Collection;
use crate::request::Operation;

/// An access requirement checked by [`AccessGate`](crate::AccessGate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// A bare rule, not tied to a collection
    Rule(Access),
    /// An operation on a whole document
    Document {
        /// Target collection
        collection: Collection,
        /// Operation performed
        operation: Operation,
    },
    /// An operation on one field of a document
    Field {
        /// Collection owning the field
        collection: Collection,
        /// Field name
        field: String,
        /// Operation performed on the field
        operation: Operation,
    },
}

impl Requirement {
    /// Requirement for `operation` on documents of `collection`.
    pub fn document(collection: Collection, operation: Operation) -> Self {
        Requirement::Document {
            collection,
            operation,
        }
    }

    /// Requirement for `operation` on `field` of `collection`.
    pub fn field(collection: Collection, field: impl Into<String>, operation: Operation) -> Self {
        Requirement::Field {
            collection,
            field: field.into(),
            operation,
        }
    }
}

impl From<Access> for Requirement {
    fn from(rule: Access) -> Self {
        Requirement::Rule(rule)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Rule(rule) => write!(f, "{}", rule),
            Requirement::Document {
                collection,
                operation,
            } => write!(f, "{} {}", operation, collection),
            Requirement::Field {
                collection,
                field,
                operation,
            } => write!(f, "{} {}.{}", operation, collection, field),
        }
    }
}
