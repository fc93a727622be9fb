use crate::error::Violation;
use crate::policy::Requirement;

/// Request-scoped decision logger used by the gate.
///
/// Every entry carries the request ID. Role sets are never logged.
#[derive(Debug)]
pub(crate) struct DecisionLog<'a> {
    request_id: &'a str,
    principal: Option<&'a str>,
}

impl<'a> DecisionLog<'a> {
    pub(crate) fn new(request_id: &'a str, principal: Option<&'a str>) -> Self {
        Self {
            request_id,
            principal,
        }
    }

    /// Logs a granted requirement at debug level.
    pub(crate) fn granted(&self, requirement: &Requirement) {
        tracing::debug!(
            request_id = %self.request_id,
            principal = ?self.principal,
            requirement = %requirement,
            "access granted"
        );
    }

    /// Logs a denied requirement at warn level.
    pub(crate) fn denied(&self, requirement: &Requirement, violation: &Violation) {
        tracing::warn!(
            request_id = %self.request_id,
            principal = ?self.principal,
            requirement = %requirement,
            kind = %violation.kind,
            "access denied"
        );
    }
}
