//! Access control predicates.
//!
//! Every function here is pure and total: it inspects an optional
//! principal and returns a decision. A missing principal or a missing role
//! always yields `false`. Nothing in this module logs or allocates, so the
//! checks can run on every document and field operation.

use std::fmt;

use crate::request::Principal;
use crate::role::Role;

/// Returns true iff a principal is present, whatever its roles.
pub fn is_authenticated(principal: Option<&Principal>) -> bool {
    principal.is_some()
}

/// Unrestricted access. Always true.
pub fn is_anyone() -> bool {
    true
}

/// Returns true iff a principal is present and holds the `admin` role.
pub fn is_admin_only(principal: Option<&Principal>) -> bool {
    has_role(principal, &Role::Admin)
}

/// Returns true iff a principal is present and holds the `merchant` role.
pub fn is_merchant(principal: Option<&Principal>) -> bool {
    has_role(principal, &Role::Merchant)
}

/// Field-level admin check.
///
/// Evaluated on its own, independent of any document-level decision: a
/// principal allowed to read a document can still be refused a field.
pub fn field_admin_only(principal: Option<&Principal>) -> bool {
    is_admin_only(principal)
}

fn has_role(principal: Option<&Principal>, role: &Role) -> bool {
    principal.is_some_and(|p| p.has_role(role))
}

/// An access rule attached to a collection operation or a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, including anonymous requests
    Anyone,
    /// Any authenticated principal
    Authenticated,
    /// Principals holding `admin`
    AdminOnly,
    /// Principals holding `merchant`
    MerchantOnly,
}

impl Access {
    /// Evaluates the rule for `principal`.
    pub fn permits(self, principal: Option<&Principal>) -> bool {
        match self {
            Access::Anyone => is_anyone(),
            Access::Authenticated => is_authenticated(principal),
            Access::AdminOnly => is_admin_only(principal),
            Access::MerchantOnly => is_merchant(principal),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Anyone => write!(f, "anyone"),
            Access::Authenticated => write!(f, "authenticated"),
            Access::AdminOnly => write!(f, "admin only"),
            Access::MerchantOnly => write!(f, "merchant only"),
        }
    }
}
