//! Audit event schema.

use std::fmt;

use crate::collection::Collection;
use crate::request::Operation;

/// Outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// The operation was allowed
    Granted,
    /// The operation was denied
    Denied,
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOutcome::Granted => write!(f, "granted"),
            AuditOutcome::Denied => write!(f, "denied"),
        }
    }
}

/// A recorded access decision.
///
/// Only identifiers are kept: the request id, the principal id, the target
/// collection and field, and the operation. A principal's roles are not.
///
/// # Example
///
/// ```
/// use storefront_policy::audit::{AuditEvent, AuditOutcome};
/// use storefront_policy::{Collection, Operation};
///
/// let event = AuditEvent::new(
///     "req-123",
///     Some("user-7"),
///     Collection::Merchants,
///     Operation::Update,
///     AuditOutcome::Denied,
/// )
/// .with_field("status");
///
/// assert_eq!(event.field(), Some("status"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Request identifier for correlation
    request_id: String,
    /// Principal id, `None` for anonymous requests
    principal: Option<String>,
    collection: Option<Collection>,
    operation: Option<Operation>,
    /// Field name for field-level decisions
    field: Option<String>,
    outcome: AuditOutcome,
}

impl AuditEvent {
    /// Creates an event for a document or field decision.
    pub fn new(
        request_id: impl Into<String>,
        principal: Option<impl Into<String>>,
        collection: Collection,
        operation: Operation,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            principal: principal.map(Into::into),
            collection: Some(collection),
            operation: Some(operation),
            field: None,
            outcome,
        }
    }

    /// Creates an event for a decision not tied to a collection.
    pub fn standalone(
        request_id: impl Into<String>,
        principal: Option<impl Into<String>>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            principal: principal.map(Into::into),
            collection: None,
            operation: None,
            field: None,
            outcome,
        }
    }

    /// Marks the event as a field-level decision.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Returns the request identifier.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the principal id, if authenticated.
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    /// Returns the target collection, if any.
    pub fn collection(&self) -> Option<Collection> {
        self.collection
    }

    /// Returns the operation, if any.
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Returns the field name for field-level decisions.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> AuditOutcome {
        self.outcome
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuditEvent[outcome={}, request_id={}, principal={}",
            self.outcome,
            self.request_id,
            self.principal.as_deref().unwrap_or("<none>")
        )?;

        if let Some(collection) = self.collection {
            write!(f, ", collection={}", collection)?;
        }
        if let Some(operation) = self.operation {
            write!(f, ", operation={}", operation)?;
        }
        if let Some(field) = &self.field {
            write!(f, ", field={}", field)?;
        }

        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_outcome_display() {
        assert_eq!(AuditOutcome::Granted.to_string(), "granted");
        assert_eq!(AuditOutcome::Denied.to_string(), "denied");
    }

    #[test]
    fn audit_event_display_document_decision() {
        let event = AuditEvent::new(
            "req-1",
            Some("admin-1"),
            Collection::Orders,
            Operation::Delete,
            AuditOutcome::Granted,
        );

        assert_eq!(
            event.to_string(),
            "AuditEvent[outcome=granted, request_id=req-1, principal=admin-1, collection=orders, operation=delete]"
        );
    }

    #[test]
    fn audit_event_display_anonymous_field_decision() {
        let event = AuditEvent::new(
            "req-2",
            None::<String>,
            Collection::Merchants,
            Operation::Update,
            AuditOutcome::Denied,
        )
        .with_field("status");

        let display = event.to_string();
        assert!(display.contains("principal=<none>"));
        assert!(display.contains("field=status"));
        assert_eq!(event.principal(), None);
    }

    #[test]
    fn standalone_event_has_no_target() {
        let event = AuditEvent::standalone("req-3", Some("u1"), AuditOutcome::Denied);

        assert_eq!(event.collection(), None);
        assert_eq!(event.operation(), None);
        assert_eq!(
            event.to_string(),
            "AuditEvent[outcome=denied, request_id=req-3, principal=u1]"
        );
    }
}
