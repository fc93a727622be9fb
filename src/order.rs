//! Order identifiers.
//!
//! Orders get a human-readable number of the form `ORD-YYYYMMDD-NNNNN`,
//! assigned once when the order is created and only if the caller did not
//! supply one:
//! - `OrderNumber`: a parsed, well-formed order number
//! - `OrderNumberGenerator`: UTC date plus a random five-digit suffix
//! - `assign_order_number`: the create-time hook over an `OrderDraft`
//!
//! Uniqueness is not checked here. The storage layer keeps a unique index
//! on `orderNumber`, and a collision surfaces as a storage error; the hook
//! does not retry.

mod clock;
mod draft;
mod generator;
mod number;

pub use clock::{Clock, FixedClock, SystemClock};
pub use draft::{assign_order_number, OrderDraft};
pub use generator::OrderNumberGenerator;
pub use number::{OrderNumber, OrderNumberError, SUFFIX_MAX, SUFFIX_MIN};
