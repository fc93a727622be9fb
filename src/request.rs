use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::role::{Role, RoleSet, RoleVocabulary};

/// Metadata about an incoming request or operation.
///
/// Contains the request identifier and optional principal (authenticated user or service).
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Unique identifier for this request
    pub request_id: String,
    /// Authenticated principal, if any
    pub principal: Option<Principal>,
}

impl RequestMeta {
    /// Metadata for an anonymous request.
    pub fn anonymous(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            principal: None,
        }
    }

    /// Metadata for a request made by `principal`.
    pub fn authenticated(request_id: impl Into<String>, principal: Principal) -> Self {
        Self {
            request_id: request_id.into(),
            principal: Some(principal),
        }
    }
}

/// An authenticated user or service principal.
///
/// Built per request by the authentication layer and only ever inspected
/// by the access checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Unique identifier for this principal
    pub id: String,
    /// Roles held by this principal
    pub roles: RoleSet,
}

impl Principal {
    /// Creates a principal with no roles.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: RoleSet::new(),
        }
    }

    /// Adds a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Creates a principal from raw role tags. Unknown tags are dropped.
    pub fn from_tags<I, S>(id: impl Into<String>, tags: I, vocabulary: &RoleVocabulary) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id: id.into(),
            roles: RoleSet::resolve(tags, vocabulary),
        }
    }

    /// Returns true if the principal holds `role`.
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}

/// The kind of operation a request performs on a document or field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create a new document
    Create,
    /// Read a document
    Read,
    /// Update an existing document
    Update,
    /// Delete a document
    Delete,
}

impl Operation {
    /// All operations, in CRUD order.
    pub const ALL: [Operation; 4] = [
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
    ];

    /// Returns the lower-case tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Operation::Create),
            "read" => Ok(Operation::Read),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            other => Err(ParseError::new("operation", other)),
        }
    }
}
