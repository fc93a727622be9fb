//! Audit trail of access decisions.
//!
//! This module provides:
//! - `AuditEvent`: one recorded access decision
//! - `AuditTrail`: in-memory, per-request decision recorder
//!
//! Events hold identifiers only. Role sets and document payloads are never
//! recorded.

mod event;
mod trail;

pub use event::{AuditEvent, AuditOutcome};
pub use trail::AuditTrail;
