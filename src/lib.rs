//! Access control and order numbering for a storefront content backend.
//!
//! This crate provides the authorization and identifier policies of the
//! storefront's collections:
//! - **Access predicates**: pure, fail-closed checks over an optional principal
//! - **Collection policies**: one policy object per collection, with field rules
//! - **Access gate**: request-level enforcement with logging and an audit trail
//! - **Order numbers**: `ORD-YYYYMMDD-NNNNN`, assigned once at creation
//!
//! # Core Types
//!
//! - [`Principal`]: an authenticated actor and its [`RoleSet`]
//! - [`Role`]: closed role vocabulary, extensible through [`AccessConfig`]
//! - [`CollectionPolicy`] / [`FieldPolicy`]: per-collection and per-field rules
//! - [`AccessGate`]: checks [`Requirement`]s and yields an [`AccessGrant`]
//! - [`order::OrderNumberGenerator`]: order number synthesis
//!
//! # Examples
//!
//! ```
//! use storefront_policy::{
//!     AccessGate, Collection, Operation, Principal, RequestMeta, Requirement, RoleVocabulary,
//! };
//!
//! let vocab = RoleVocabulary::builtin();
//! let principal = Principal::from_tags("user-1", ["merchant"], &vocab);
//! let meta = RequestMeta::authenticated("req-123", principal);
//!
//! let denied = AccessGate::new(meta)
//!     .require(Requirement::document(Collection::Merchants, Operation::Delete))
//!     .check();
//!
//! assert!(denied.is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod access;
pub mod audit;
mod collection;
mod config;
mod error;
mod gate;
mod logging;
pub mod order;
mod policy;
mod request;
mod role;
pub mod timing;

pub use access::{
    field_admin_only, is_admin_only, is_anyone, is_authenticated, is_merchant, Access,
};
pub use collection::{
    policy_for, Clients, Collection, CollectionPolicy, Customers, FieldPolicy, MerchantStatus,
    Merchants, Orders, ProductCategories, Products, Services,
};
pub use config::{AccessConfig, ConfigError, EXTRA_ROLES_ENV};
pub use error::{ParseError, Violation, ViolationKind};
pub use gate::{AccessGate, AccessGrant};
pub use policy::Requirement;
pub use request::{Operation, Principal, RequestMeta};
pub use role::{ExtendedRole, Role, RoleSet, RoleVocabulary};
