//! Account identity type with `aero_` prefix.
//!
//! One identity type covers every caller role: airlines, passengers, oracle
//! reporters, and the pool owner. The ledger attributes each state-changing
//! call to exactly one `AccountId`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An Aerosure account identity, always prefixed with `aero_`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// The standard prefix for all Aerosure account identities.
    pub const PREFIX: &'static str = "aero_";

    /// Create a new account identity from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `aero_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "identity must start with aero_");
        Self(s)
    }

    /// Parse an identity from untrusted input. Returns `None` when the
    /// prefix is missing or nothing follows it.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.starts_with(Self::PREFIX) && s.len() > Self::PREFIX.len() {
            Some(Self(s))
        } else {
            None
        }
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this identity is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_prefixed_identity() {
        let id = AccountId::new("aero_airline_one");
        assert_eq!(id.as_str(), "aero_airline_one");
        assert!(id.is_valid());
    }

    #[test]
    #[should_panic(expected = "must start with aero_")]
    fn rejects_unprefixed_identity() {
        AccountId::new("airline_one");
    }

    #[test]
    fn bare_prefix_is_not_valid() {
        let id = AccountId::new("aero_");
        assert!(!id.is_valid());
    }

    #[test]
    fn parse_rejects_bad_input_without_panicking() {
        assert!(AccountId::parse("airline_one").is_none());
        assert!(AccountId::parse("aero_").is_none());
        assert_eq!(
            AccountId::parse("aero_airline_one"),
            Some(AccountId::new("aero_airline_one"))
        );
    }
}
