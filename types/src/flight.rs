//! Flight identification.
//!
//! A flight is identified by the airline that owns it, its code (e.g.
//! "ND1309") and its departure timestamp. The triple is the key for every
//! ledger-resident table touching flights: registrations, policies and
//! resolution requests.

use crate::{AccountId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An airline's flight code, e.g. "ND1309".
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlightCode(String);

impl FlightCode {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The unique, stable key of one flight: (airline, code, departure).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightKey {
    pub airline: AccountId,
    pub code: FlightCode,
    pub departure: Timestamp,
}

impl FlightKey {
    pub fn new(airline: AccountId, code: FlightCode, departure: Timestamp) -> Self {
        Self {
            airline,
            code,
            departure,
        }
    }

    /// Stable byte encoding of the key, used for deterministic index
    /// derivation. Fields are length-prefixed so distinct keys can never
    /// collide on concatenation.
    pub fn to_bytes(&self) -> Vec<u8> {
        let airline = self.airline.as_str().as_bytes();
        let code = self.code.as_str().as_bytes();
        let mut out = Vec::with_capacity(airline.len() + code.len() + 16);
        out.extend_from_slice(&(airline.len() as u32).to_be_bytes());
        out.extend_from_slice(airline);
        out.extend_from_slice(&(code.len() as u32).to_be_bytes());
        out.extend_from_slice(code);
        out.extend_from_slice(&self.departure.as_secs().to_be_bytes());
        out
    }
}

impl fmt::Display for FlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.airline, self.code, self.departure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(airline: &str, code: &str, secs: u64) -> FlightKey {
        FlightKey::new(
            AccountId::new(format!("aero_{airline}")),
            FlightCode::new(code),
            Timestamp::new(secs),
        )
    }

    #[test]
    fn distinct_fields_produce_distinct_keys() {
        assert_ne!(key("a", "F1", 1), key("a", "F1", 2));
        assert_ne!(key("a", "F1", 1), key("a", "F2", 1));
        assert_ne!(key("a", "F1", 1), key("b", "F1", 1));
    }

    #[test]
    fn byte_encoding_is_injective_on_boundaries() {
        // "ab" + "c" must not collide with "a" + "bc"
        let k1 = key("ab", "c", 7);
        let k2 = key("a", "bc", 7);
        assert_ne!(k1.to_bytes(), k2.to_bytes());
    }
}
