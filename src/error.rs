use std::fmt;

use crate::access::Access;
use crate::collection::Collection;
use crate::request::Operation;

/// A denied access check with details about what failed.
#[derive(Debug)]
pub struct Violation {
    /// The kind of violation that occurred
    pub kind: ViolationKind,
    /// Human-readable message explaining the violation
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Violation {}

/// The kind of access violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// The operation needs a principal and the request had none
    Unauthenticated,
    /// The principal does not satisfy a bare access rule
    Unauthorized {
        /// The unmet rule
        rule: Access,
    },
    /// The principal may not perform the operation on the collection
    Forbidden {
        /// Collection the operation targeted
        collection: Collection,
        /// The denied operation
        operation: Operation,
    },
    /// The principal may not perform the operation on a single field
    FieldForbidden {
        /// Collection owning the field
        collection: Collection,
        /// Field name
        field: String,
        /// The denied operation
        operation: Operation,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Unauthenticated => write!(f, "Unauthenticated"),
            ViolationKind::Unauthorized { rule } => write!(f, "Unauthorized: requires {}", rule),
            ViolationKind::Forbidden {
                collection,
                operation,
            } => write!(f, "Forbidden to {} '{}'", operation, collection),
            ViolationKind::FieldForbidden {
                collection,
                field,
                operation,
            } => write!(
                f,
                "Forbidden to {} field '{}' of '{}'",
                operation, field, collection
            ),
        }
    }
}

/// A tag that did not name a known operation or collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    what: &'static str,
    value: String,
}

impl ParseError {
    pub(crate) fn new(what: &'static str, value: impl Into<String>) -> Self {
        Self {
            what,
            value: value.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.what, self.value)
    }
}

impl std::error::Error for ParseError {}
