//! Per-collection access policies.
//!
//! Each storefront collection has a small policy object implementing
//! [`CollectionPolicy`], with one method per operation kind. Fields that
//! carry their own rules expose a [`FieldPolicy`] through
//! [`CollectionPolicy::field`].

use std::fmt;
use std::str::FromStr;

use crate::access::{field_admin_only, is_admin_only, is_anyone, is_authenticated};
use crate::error::ParseError;
use crate::request::{Operation, Principal};

/// A storefront collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// `products`
    Products,
    /// `orders`
    Orders,
    /// `customers`
    Customers,
    /// `merchants`
    Merchants,
    /// `clients`
    Clients,
    /// `services`
    Services,
    /// `product-categories`
    ProductCategories,
}

impl Collection {
    /// Every collection.
    pub const ALL: [Collection; 7] = [
        Collection::Products,
        Collection::Orders,
        Collection::Customers,
        Collection::Merchants,
        Collection::Clients,
        Collection::Services,
        Collection::ProductCategories,
    ];

    /// Returns the collection slug.
    pub fn slug(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Orders => "orders",
            Collection::Customers => "customers",
            Collection::Merchants => "merchants",
            Collection::Clients => "clients",
            Collection::Services => "services",
            Collection::ProductCategories => "product-categories",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Collection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| ParseError::new("collection", s))
    }
}

/// Document-level access policy for one collection.
pub trait CollectionPolicy: Send + Sync {
    /// The collection this policy guards.
    fn collection(&self) -> Collection;

    /// May `principal` create documents?
    fn can_create(&self, principal: Option<&Principal>) -> bool;

    /// May `principal` read documents?
    fn can_read(&self, principal: Option<&Principal>) -> bool;

    /// May `principal` update documents?
    fn can_update(&self, principal: Option<&Principal>) -> bool;

    /// May `principal` delete documents?
    fn can_delete(&self, principal: Option<&Principal>) -> bool;

    /// Dispatches to the method for `operation`.
    fn permits(&self, operation: Operation, principal: Option<&Principal>) -> bool {
        match operation {
            Operation::Create => self.can_create(principal),
            Operation::Read => self.can_read(principal),
            Operation::Update => self.can_update(principal),
            Operation::Delete => self.can_delete(principal),
        }
    }

    /// Returns the policy of a field that has its own rules.
    fn field(&self, _name: &str) -> Option<&dyn FieldPolicy> {
        None
    }
}

/// Field-level access policy.
///
/// Checked independently of the owning document's policy.
pub trait FieldPolicy: Send + Sync {
    /// Field name.
    fn name(&self) -> &'static str;

    /// May `principal` see the field?
    fn can_read(&self, principal: Option<&Principal>) -> bool;

    /// May `principal` set the field when creating a document?
    fn can_create(&self, principal: Option<&Principal>) -> bool;

    /// May `principal` change the field?
    fn can_update(&self, principal: Option<&Principal>) -> bool;

    /// Dispatches to the method for `operation`. Fields cannot be deleted
    /// on their own, so `Delete` is always refused.
    fn permits(&self, operation: Operation, principal: Option<&Principal>) -> bool {
        match operation {
            Operation::Create => self.can_create(principal),
            Operation::Read => self.can_read(principal),
            Operation::Update => self.can_update(principal),
            Operation::Delete => false,
        }
    }
}

/// Catalogue products. Public read.
#[derive(Debug, Clone, Copy, Default)]
pub struct Products;

impl CollectionPolicy for Products {
    fn collection(&self) -> Collection {
        Collection::Products
    }

    fn can_create(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_read(&self, _principal: Option<&Principal>) -> bool {
        is_anyone()
    }

    fn can_update(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_delete(&self, principal: Option<&Principal>) -> bool {
        is_admin_only(principal)
    }
}

/// Product categories. Public read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductCategories;

impl CollectionPolicy for ProductCategories {
    fn collection(&self) -> Collection {
        Collection::ProductCategories
    }

    fn can_create(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_read(&self, _principal: Option<&Principal>) -> bool {
        is_anyone()
    }

    fn can_update(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_delete(&self, principal: Option<&Principal>) -> bool {
        is_admin_only(principal)
    }
}

/// Services offered by the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct Services;

impl CollectionPolicy for Services {
    fn collection(&self) -> Collection {
        Collection::Services
    }

    fn can_create(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_read(&self, _principal: Option<&Principal>) -> bool {
        is_anyone()
    }

    fn can_update(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_delete(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }
}

/// Business clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clients;

impl CollectionPolicy for Clients {
    fn collection(&self) -> Collection {
        Collection::Clients
    }

    fn can_create(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_read(&self, _principal: Option<&Principal>) -> bool {
        is_anyone()
    }

    fn can_update(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_delete(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }
}

/// Storefront customers. Anyone may sign up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Customers;

impl CollectionPolicy for Customers {
    fn collection(&self) -> Collection {
        Collection::Customers
    }

    fn can_create(&self, _principal: Option<&Principal>) -> bool {
        is_anyone()
    }

    fn can_read(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_update(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_delete(&self, principal: Option<&Principal>) -> bool {
        is_admin_only(principal)
    }
}

/// Orders. Anyone may place one (guest checkout).
#[derive(Debug, Clone, Copy, Default)]
pub struct Orders;

impl CollectionPolicy for Orders {
    fn collection(&self) -> Collection {
        Collection::Orders
    }

    fn can_create(&self, _principal: Option<&Principal>) -> bool {
        is_anyone()
    }

    fn can_read(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_update(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_delete(&self, principal: Option<&Principal>) -> bool {
        is_admin_only(principal)
    }
}

/// Merchants. Writes are admin-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Merchants;

impl CollectionPolicy for Merchants {
    fn collection(&self) -> Collection {
        Collection::Merchants
    }

    fn can_create(&self, principal: Option<&Principal>) -> bool {
        is_admin_only(principal)
    }

    fn can_read(&self, principal: Option<&Principal>) -> bool {
        is_authenticated(principal)
    }

    fn can_update(&self, principal: Option<&Principal>) -> bool {
        is_admin_only(principal)
    }

    fn can_delete(&self, principal: Option<&Principal>) -> bool {
        is_admin_only(principal)
    }

    fn field(&self, name: &str) -> Option<&dyn FieldPolicy> {
        match name {
            "status" => Some(&MerchantStatus),
            _ => None,
        }
    }
}

/// The merchant `status` field: visible to everyone, set only by admins.
#[derive(Debug, Clone, Copy, Default)]
pub struct MerchantStatus;

impl FieldPolicy for MerchantStatus {
    fn name(&self) -> &'static str {
        "status"
    }

    fn can_read(&self, _principal: Option<&Principal>) -> bool {
        is_anyone()
    }

    fn can_create(&self, principal: Option<&Principal>) -> bool {
        field_admin_only(principal)
    }

    fn can_update(&self, principal: Option<&Principal>) -> bool {
        field_admin_only(principal)
    }
}

/// Returns the policy guarding `collection`.
pub fn policy_for(collection: Collection) -> &'static dyn CollectionPolicy {
    match collection {
        Collection::Products => &Products,
        Collection::Orders => &Orders,
        Collection::Customers => &Customers,
        Collection::Merchants => &Merchants,
        Collection::Clients => &Clients,
        Collection::Services => &Services,
        Collection::ProductCategories => &ProductCategories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn member() -> Principal {
        Principal::new("member-1")
    }

    fn admin() -> Principal {
        Principal::new("admin-1").with_role(Role::Admin)
    }

    #[test]
    fn slugs_round_trip() {
        for c in Collection::ALL {
            assert_eq!(c.slug().parse::<Collection>().unwrap(), c);
        }
        assert!("users".parse::<Collection>().is_err());
    }

    #[test]
    fn registry_returns_matching_policy() {
        for c in Collection::ALL {
            assert_eq!(policy_for(c).collection(), c);
        }
    }

    #[test]
    fn public_collections_are_readable_anonymously() {
        for c in [
            Collection::Products,
            Collection::ProductCategories,
            Collection::Services,
            Collection::Clients,
        ] {
            assert!(policy_for(c).can_read(None), "{} should be public", c);
            assert!(!policy_for(c).can_create(None), "{} create needs auth", c);
        }
    }

    #[test]
    fn gated_collections_need_a_principal_to_read() {
        for c in [Collection::Customers, Collection::Orders, Collection::Merchants] {
            assert!(!policy_for(c).can_read(None));
            assert!(policy_for(c).can_read(Some(&member())));
        }
    }

    #[test]
    fn guest_checkout_can_create_orders_and_customers() {
        assert!(Orders.can_create(None));
        assert!(Customers.can_create(None));
    }

    #[test]
    fn delete_is_admin_only_except_services_and_clients() {
        let m = member();
        for c in Collection::ALL {
            let policy = policy_for(c);
            let expect_member = matches!(c, Collection::Services | Collection::Clients);
            assert_eq!(policy.can_delete(Some(&m)), expect_member, "{}", c);
            assert!(policy.can_delete(Some(&admin())), "{}", c);
            assert!(!policy.can_delete(None), "{}", c);
        }
    }

    #[test]
    fn merchants_writes_are_admin_only() {
        let m = member();
        for op in [Operation::Create, Operation::Update, Operation::Delete] {
            assert!(!Merchants.permits(op, Some(&m)));
            assert!(Merchants.permits(op, Some(&admin())));
        }
    }

    #[test]
    fn merchant_status_field_rules() {
        let status = Merchants.field("status").expect("status has field rules");
        assert_eq!(status.name(), "status");

        assert!(status.can_read(None));
        assert!(!status.can_update(Some(&member())));
        assert!(!status.can_create(Some(&member())));
        assert!(status.can_update(Some(&admin())));
        assert!(!status.permits(Operation::Delete, Some(&admin())));
    }

    #[test]
    fn undeclared_fields_have_no_rules() {
        assert!(Merchants.field("businessName").is_none());
        assert!(Orders.field("orderNumber").is_none());
    }
}
