use crate::{
    audit::{AuditEvent, AuditOutcome, AuditTrail},
    collection::policy_for,
    error::{Violation, ViolationKind},
    logging::DecisionLog,
    policy::Requirement,
    request::{Operation, Principal, RequestMeta},
};

/// The access enforcement gate.
///
/// `AccessGate` collects the requirements an inbound operation must meet
/// and checks them against the request's principal before the operation
/// proceeds. The first failing requirement stops the check.
///
/// # Examples
///
/// ```
/// use storefront_policy::{AccessGate, Collection, Operation, Principal, RequestMeta, Requirement, Role};
///
/// let admin = Principal::new("admin-1").with_role(Role::Admin);
/// let meta = RequestMeta::authenticated("req-123", admin);
///
/// let grant = AccessGate::new(meta)
///     .require(Requirement::document(Collection::Merchants, Operation::Update))
///     .require(Requirement::field(Collection::Merchants, "status", Operation::Update))
///     .check()
///     .expect("admin may update merchant status");
///
/// assert_eq!(grant.request_id(), "req-123");
/// ```
#[derive(Debug)]
pub struct AccessGate<'t> {
    meta: RequestMeta,
    requirements: Vec<Requirement>,
    audit: Option<&'t AuditTrail>,
}

impl<'t> AccessGate<'t> {
    /// Creates a new gate for the given request metadata.
    pub fn new(meta: RequestMeta) -> Self {
        Self {
            meta,
            requirements: Vec::new(),
            audit: None,
        }
    }

    /// Adds a requirement, skipping it if an identical one is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront_policy::{Access, AccessGate, RequestMeta};
    ///
    /// let gate = AccessGate::new(RequestMeta::anonymous("req-1"))
    ///     .require(Access::Anyone)
    ///     .require(Access::Anyone); // deduplicated
    /// assert_eq!(gate.requirements().len(), 1);
    /// ```
    pub fn require(mut self, requirement: impl Into<Requirement>) -> Self {
        let req = requirement.into();

        if !self.requirements.contains(&req) {
            self.requirements.push(req);
        }

        self
    }

    /// Records every decision made by [`check`](Self::check) into `trail`.
    pub fn with_audit(mut self, trail: &'t AuditTrail) -> Self {
        self.audit = Some(trail);
        self
    }

    /// Returns the accumulated requirements in check order.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Checks every requirement in order.
    ///
    /// # Errors
    ///
    /// Returns a `Violation` for the first requirement the principal does
    /// not meet. Requirements after it are not evaluated.
    pub fn check(self) -> Result<AccessGrant, Violation> {
        let principal = self.meta.principal.as_ref();
        let log = DecisionLog::new(&self.meta.request_id, principal.map(|p| p.id.as_str()));

        for req in &self.requirements {
            let allowed = evaluate(req, principal);
            self.record(req, allowed);

            if allowed {
                log.granted(req);
            } else {
                let violation = violation_for(req, principal);
                log.denied(req, &violation);
                return Err(violation);
            }
        }

        Ok(AccessGrant {
            request_id: self.meta.request_id,
            principal: self.meta.principal,
            granted: self.requirements,
        })
    }

    fn record(&self, req: &Requirement, allowed: bool) {
        let Some(trail) = self.audit else {
            return;
        };

        let outcome = if allowed {
            AuditOutcome::Granted
        } else {
            AuditOutcome::Denied
        };
        let request_id = self.meta.request_id.as_str();
        let principal = self.meta.principal.as_ref().map(|p| p.id.as_str());

        let event = match req {
            Requirement::Rule(_) => AuditEvent::standalone(request_id, principal, outcome),
            Requirement::Document {
                collection,
                operation,
            } => AuditEvent::new(request_id, principal, *collection, *operation, outcome),
            Requirement::Field {
                collection,
                field,
                operation,
            } => AuditEvent::new(request_id, principal, *collection, *operation, outcome)
                .with_field(field.as_str()),
        };

        trail.record(event);
    }
}

/// Evaluates one requirement.
///
/// A field without its own rules inherits the document-level decision for
/// the same operation. Deleting a single field is never permitted.
fn evaluate(req: &Requirement, principal: Option<&Principal>) -> bool {
    match req {
        Requirement::Rule(rule) => rule.permits(principal),
        Requirement::Document {
            collection,
            operation,
        } => policy_for(*collection).permits(*operation, principal),
        Requirement::Field {
            operation: Operation::Delete,
            ..
        } => false,
        Requirement::Field {
            collection,
            field,
            operation,
        } => {
            let policy = policy_for(*collection);
            match policy.field(field) {
                Some(field_policy) => field_policy.permits(*operation, principal),
                None => policy.permits(*operation, principal),
            }
        }
    }
}

fn violation_for(req: &Requirement, principal: Option<&Principal>) -> Violation {
    if principal.is_none() {
        return Violation::new(ViolationKind::Unauthenticated, "Authentication required");
    }

    match req {
        Requirement::Rule(rule) => Violation::new(
            ViolationKind::Unauthorized { rule: *rule },
            "Principal lacks the required role",
        ),
        Requirement::Document {
            collection,
            operation,
        } => Violation::new(
            ViolationKind::Forbidden {
                collection: *collection,
                operation: *operation,
            },
            "Operation not permitted for principal",
        ),
        Requirement::Field {
            collection,
            field,
            operation,
        } => Violation::new(
            ViolationKind::FieldForbidden {
                collection: *collection,
                field: field.clone(),
                operation: *operation,
            },
            "Field operation not permitted for principal",
        ),
    }
}

/// Proof that a request passed every requirement of an [`AccessGate`].
///
/// Only `AccessGate::check` constructs one.
#[derive(Debug, Clone)]
pub struct AccessGrant {
    request_id: String,
    principal: Option<Principal>,
    granted: Vec<Requirement>,
}

impl AccessGrant {
    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the principal, if the request was authenticated.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Returns true if `requirement` was checked and passed.
    pub fn is_granted(&self, requirement: &Requirement) -> bool {
        self.granted.contains(requirement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Access;
    use crate::collection::Collection;
    use crate::role::Role;

    fn member_meta() -> RequestMeta {
        RequestMeta::authenticated("req-member", Principal::new("member-1"))
    }

    fn admin_meta() -> RequestMeta {
        RequestMeta::authenticated("req-admin", Principal::new("admin-1").with_role(Role::Admin))
    }

    #[test]
    fn gate_with_no_requirements_grants() {
        let grant = AccessGate::new(RequestMeta::anonymous("req-1"))
            .check()
            .unwrap();
        assert!(grant.principal().is_none());
    }

    #[test]
    fn anonymous_denied_is_unauthenticated() {
        let err = AccessGate::new(RequestMeta::anonymous("req-1"))
            .require(Requirement::document(Collection::Orders, Operation::Read))
            .check()
            .unwrap_err();
        assert_eq!(err.kind, ViolationKind::Unauthenticated);
    }

    #[test]
    fn anonymous_may_place_an_order() {
        let req = Requirement::document(Collection::Orders, Operation::Create);
        let grant = AccessGate::new(RequestMeta::anonymous("req-1"))
            .require(req.clone())
            .check()
            .unwrap();
        assert!(grant.is_granted(&req));
    }

    #[test]
    fn member_cannot_delete_a_merchant() {
        let err = AccessGate::new(member_meta())
            .require(Requirement::document(Collection::Merchants, Operation::Delete))
            .check()
            .unwrap_err();
        assert_eq!(
            err.kind,
            ViolationKind::Forbidden {
                collection: Collection::Merchants,
                operation: Operation::Delete,
            }
        );
    }

    #[test]
    fn field_rules_apply_independently_of_document_rules() {
        // Document read passes, but the field write is still refused.
        let err = AccessGate::new(member_meta())
            .require(Requirement::document(Collection::Merchants, Operation::Read))
            .require(Requirement::field(Collection::Merchants, "status", Operation::Update))
            .check()
            .unwrap_err();
        assert!(matches!(err.kind, ViolationKind::FieldForbidden { ref field, .. } if field == "status"));
    }

    #[test]
    fn undeclared_field_inherits_document_decision() {
        let grant = AccessGate::new(member_meta())
            .require(Requirement::field(Collection::Products, "title", Operation::Update))
            .check();
        assert!(grant.is_ok());

        let denied = AccessGate::new(member_meta())
            .require(Requirement::field(Collection::Merchants, "notes", Operation::Update))
            .check();
        assert!(denied.is_err());
    }

    #[test]
    fn field_delete_is_refused_even_where_document_delete_is_allowed() {
        // services: any member may delete the document
        let document = AccessGate::new(member_meta())
            .require(Requirement::document(Collection::Services, Operation::Delete))
            .check();
        assert!(document.is_ok());

        let cases = [
            (member_meta(), Collection::Services, "title"),
            (admin_meta(), Collection::Merchants, "businessName"),
            (admin_meta(), Collection::Merchants, "status"),
        ];
        for (meta, collection, field) in cases {
            let err = AccessGate::new(meta)
                .require(Requirement::field(collection, field, Operation::Delete))
                .check()
                .unwrap_err();
            assert!(
                matches!(err.kind, ViolationKind::FieldForbidden { operation: Operation::Delete, .. }),
                "{}.{} delete must be refused",
                collection,
                field
            );
        }
    }

    #[test]
    fn bare_rule_failure_is_unauthorized() {
        let err = AccessGate::new(member_meta())
            .require(Access::AdminOnly)
            .check()
            .unwrap_err();
        assert_eq!(
            err.kind,
            ViolationKind::Unauthorized {
                rule: Access::AdminOnly
            }
        );
    }

    #[test]
    fn identical_requirements_are_deduplicated() {
        let gate = AccessGate::new(admin_meta())
            .require(Requirement::document(Collection::Orders, Operation::Delete))
            .require(Requirement::document(Collection::Orders, Operation::Delete))
            .require(Requirement::document(Collection::Orders, Operation::Read));
        assert_eq!(gate.requirements().len(), 2);
    }

    #[test]
    fn audit_trail_stops_at_first_denial() {
        let trail = AuditTrail::new();

        let result = AccessGate::new(member_meta())
            .with_audit(&trail)
            .require(Requirement::document(Collection::Merchants, Operation::Read))
            .require(Requirement::document(Collection::Merchants, Operation::Update))
            .require(Requirement::document(Collection::Merchants, Operation::Delete))
            .check();

        assert!(result.is_err());
        let events = trail.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].outcome(), AuditOutcome::Granted);
        assert_eq!(events[1].outcome(), AuditOutcome::Denied);
        assert_eq!(events[1].operation(), Some(Operation::Update));
        assert_eq!(events[1].principal(), Some("member-1"));
    }

    #[test]
    fn audit_records_field_name() {
        let trail = AuditTrail::new();

        AccessGate::new(admin_meta())
            .with_audit(&trail)
            .require(Requirement::field(Collection::Merchants, "status", Operation::Update))
            .check()
            .unwrap();

        assert_eq!(trail.events()[0].field(), Some("status"));
    }
}
