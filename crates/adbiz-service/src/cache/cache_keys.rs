//! Cache key generators for consistent key naming.

use adbiz_config::{DEFAULT_STAGING_KEY_PREFIX, DEFAULT_USER_KEY_PREFIX};
use adbiz_core::{MobileNumber, UserId};

/// The two key namespaces of the entity cache.
///
/// User snapshots are keyed by store ID, staged registrations by mobile
/// number. Neither prefix is a prefix of the other, so a user ID and a
/// mobile number with the same digits never produce the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    user_prefix: String,
    staging_prefix: String,
}

impl KeySpace {
    /// Builds a key space, or `None` if the prefixes are empty or overlap.
    #[must_use]
    pub fn new(user_prefix: impl Into<String>, staging_prefix: impl Into<String>) -> Option<Self> {
        let user_prefix = user_prefix.into();
        let staging_prefix = staging_prefix.into();

        let disjoint = !user_prefix.is_empty()
            && !staging_prefix.is_empty()
            && !user_prefix.starts_with(&staging_prefix)
            && !staging_prefix.starts_with(&user_prefix);

        disjoint.then_some(Self {
            user_prefix,
            staging_prefix,
        })
    }

    /// Key of a cached user snapshot.
    #[must_use]
    pub fn user(&self, id: UserId) -> String {
        format!("{}{}", self.user_prefix, id)
    }

    /// Key of a staged registration.
    #[must_use]
    pub fn staging(&self, mobile: &MobileNumber) -> String {
        format!("{}{}", self.staging_prefix, mobile)
    }

    #[must_use]
    pub fn user_prefix(&self) -> &str {
        &self.user_prefix
    }

    #[must_use]
    pub fn staging_prefix(&self) -> &str {
        &self.staging_prefix
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self {
            user_prefix: DEFAULT_USER_KEY_PREFIX.to_string(),
            staging_prefix: DEFAULT_STAGING_KEY_PREFIX.to_string(),
        }
    }
}
