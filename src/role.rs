//! Role vocabulary.
//!
//! Roles arrive from the authentication layer as free-form string tags.
//! This module turns them into a closed [`Role`] enum so that a typo in a
//! tag can never be mistaken for a privileged role. Deployments that need
//! more roles than the builtin ones register them on a [`RoleVocabulary`],
//! usually built from [`AccessConfig`](crate::AccessConfig).

use std::collections::BTreeSet;
use std::fmt;

const ADMIN_TAG: &str = "admin";
const MERCHANT_TAG: &str = "merchant";

/// A role held by a principal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Full administrative access. Never implied by any other role.
    Admin,
    /// A merchant selling through the storefront.
    Merchant,
    /// A deployment-specific role registered through a [`RoleVocabulary`].
    Extended(ExtendedRole),
}

impl Role {
    /// Returns the wire tag for this role.
    pub fn tag(&self) -> &str {
        match self {
            Role::Admin => ADMIN_TAG,
            Role::Merchant => MERCHANT_TAG,
            Role::Extended(role) => role.tag(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A configured, non-builtin role tag.
///
/// Only a [`RoleVocabulary`] can produce one, so every `ExtendedRole` in a
/// [`RoleSet`] was vetted against configuration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtendedRole {
    tag: String,
}

impl ExtendedRole {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Returns the configured tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// The set of role tags a deployment recognises.
///
/// Matching is exact and case-sensitive: `"Admin"` and `"admn"` are unknown
/// tags and resolve to nothing.
///
/// # Examples
///
/// ```
/// use storefront_policy::{Role, RoleVocabulary};
///
/// let vocab = RoleVocabulary::builtin().with_extension("support");
///
/// assert_eq!(vocab.resolve("admin"), Some(Role::Admin));
/// assert!(vocab.resolve("support").is_some());
/// assert_eq!(vocab.resolve("Admin"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoleVocabulary {
    extensions: BTreeSet<String>,
}

impl RoleVocabulary {
    /// A vocabulary containing only `admin` and `merchant`.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Registers an additional role tag.
    ///
    /// Blank tags and tags equal to a builtin role are ignored; a builtin tag
    /// always resolves to its builtin variant.
    pub fn with_extension(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let tag = tag.trim();
        if !tag.is_empty() && !is_builtin(tag) {
            self.extensions.insert(tag.to_string());
        }
        self
    }

    /// Returns true if `tag` resolves to a role.
    pub fn knows(&self, tag: &str) -> bool {
        is_builtin(tag) || self.extensions.contains(tag)
    }

    /// Resolves a raw tag to a role, or `None` for an unknown tag.
    pub fn resolve(&self, tag: &str) -> Option<Role> {
        match tag {
            ADMIN_TAG => Some(Role::Admin),
            MERCHANT_TAG => Some(Role::Merchant),
            other if self.extensions.contains(other) => {
                Some(Role::Extended(ExtendedRole::new(other)))
            }
            _ => None,
        }
    }

    /// Iterates over the registered extension tags.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

fn is_builtin(tag: &str) -> bool {
    tag == ADMIN_TAG || tag == MERCHANT_TAG
}

/// The roles held by one principal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: BTreeSet<Role>,
}

impl RoleSet {
    /// Creates an empty role set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a role set from raw tags, dropping every tag the vocabulary
    /// does not know.
    pub fn resolve<I, S>(tags: I, vocabulary: &RoleVocabulary) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles = BTreeSet::new();
        for tag in tags {
            let tag = tag.as_ref();
            match vocabulary.resolve(tag) {
                Some(role) => {
                    roles.insert(role);
                }
                None => {
                    tracing::warn!(tag = %tag, "dropping unknown role tag");
                }
            }
        }
        Self { roles }
    }

    /// Adds a role. Returns false if it was already present.
    pub fn insert(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    /// Returns true if the set holds `role`.
    pub fn contains(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// Returns true if the set holds no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Returns the number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Iterates over the roles in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self {
            roles: iter.into_iter().collect(),
        }
    }
}
