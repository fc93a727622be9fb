//! In-memory audit trail recorder.

use super::{AuditEvent, AuditOutcome};
use std::cell::RefCell;

/// In-memory recorder for access decisions.
///
/// A trail belongs to a single request; share one across requests and the
/// events interleave.
///
/// # Example
///
/// ```
/// use storefront_policy::audit::{AuditTrail, AuditEvent, AuditOutcome};
/// use storefront_policy::{Collection, Operation};
///
/// let trail = AuditTrail::new();
///
/// trail.record(AuditEvent::new(
///     "req-123",
///     Some("user-1"),
///     Collection::Products,
///     Operation::Read,
///     AuditOutcome::Granted,
/// ));
///
/// assert_eq!(trail.events().len(), 1);
/// ```
#[derive(Debug)]
pub struct AuditTrail {
    events: RefCell<Vec<AuditEvent>>,
}

impl AuditTrail {
    /// Creates a new empty audit trail.
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    /// Records an event. Events keep their recording order.
    pub fn record(&self, event: AuditEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Returns a snapshot of all recorded events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.borrow().clone()
    }

    /// Returns only the denied decisions.
    pub fn denied(&self) -> Vec<AuditEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.outcome() == AuditOutcome::Denied)
            .cloned()
            .collect()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns true if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Clears all recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new()
    }
}
