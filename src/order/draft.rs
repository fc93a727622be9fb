use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::clock::Clock;
use super::generator::OrderNumberGenerator;
use crate::request::Operation;

/// An order payload on its way to persistence.
///
/// Only `orderNumber` is interpreted; every other field is carried through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Caller-supplied or generated order number
    #[serde(
        rename = "orderNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub order_number: Option<String>,
    /// Remaining payload fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl OrderDraft {
    /// Returns true if the draft carries a non-empty order number.
    pub fn has_order_number(&self) -> bool {
        self.order_number.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// Fills in the order number of a draft being created.
///
/// Does nothing unless `operation` is `Create` and the draft has no order
/// number; an empty string counts as none. A caller-supplied number is kept
/// as-is, whatever its format. No other field is touched.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use storefront_policy::order::{assign_order_number, FixedClock, OrderDraft, OrderNumberGenerator};
/// use storefront_policy::Operation;
///
/// let day = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
/// let mut generator = OrderNumberGenerator::with_parts(FixedClock(day), rand::thread_rng());
///
/// let draft = assign_order_number(Operation::Create, OrderDraft::default(), &mut generator);
/// assert!(draft.order_number.unwrap().starts_with("ORD-20250615-"));
/// ```
pub fn assign_order_number<C: Clock, R: Rng>(
    operation: Operation,
    mut draft: OrderDraft,
    generator: &mut OrderNumberGenerator<C, R>,
) -> OrderDraft {
    if operation != Operation::Create || draft.has_order_number() {
        return draft;
    }

    let number = generator.generate();
    tracing::debug!(order_number = %number, "assigned order number");
    draft.order_number = Some(number.into_string());
    draft
}
