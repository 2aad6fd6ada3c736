//! Reporter registry — fee-gated registration with lifetime index assignment.

use std::collections::HashMap;

use aerosure_types::{AccountId, Amount, PoolParams};
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::indexing;

/// One registered off-chain status reporter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OracleReporter {
    pub identity: AccountId,
    /// The reporter's three assigned indices, fixed for its lifetime.
    pub indexes: Vec<u8>,
    pub is_registered: bool,
}

/// All reporters, keyed by identity, plus the seed their indices derive from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReporterRegistry {
    seed: [u8; 32],
    reporters: HashMap<AccountId, OracleReporter>,
}

impl ReporterRegistry {
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            seed,
            reporters: HashMap::new(),
        }
    }

    pub fn seed(&self) -> &[u8; 32] {
        &self.seed
    }

    /// Register a reporter against the fixed registration fee.
    ///
    /// The attached `value` must cover the fee; the application layer
    /// settles the fee into the reserve. Indices are derived once and never
    /// reassigned.
    pub fn register(
        &mut self,
        identity: AccountId,
        value: Amount,
        params: &PoolParams,
    ) -> Result<&OracleReporter, OracleError> {
        if self.reporters.contains_key(&identity) {
            return Err(OracleError::AlreadyRegistered(identity.to_string()));
        }

        let fee = params.oracle_registration_fee;
        if value < fee {
            return Err(OracleError::InsufficientFunds {
                needed: fee.raw(),
                available: value.raw(),
            });
        }

        let indexes = indexing::reporter_indexes(&self.seed, &identity, params);
        tracing::info!(reporter = %identity, ?indexes, "oracle reporter registered");

        let reporter = OracleReporter {
            identity: identity.clone(),
            indexes,
            is_registered: true,
        };
        Ok(self.reporters.entry(identity).or_insert(reporter))
    }

    pub fn get(&self, identity: &AccountId) -> Option<&OracleReporter> {
        self.reporters.get(identity)
    }

    /// A reporter's assigned indices (original surface: `getMyIndexes`).
    pub fn indexes(&self, identity: &AccountId) -> Result<&[u8], OracleError> {
        self.reporters
            .get(identity)
            .map(|r| r.indexes.as_slice())
            .ok_or_else(|| OracleError::UnknownReporter(identity.to_string()))
    }

    /// Iterate all registered reporters.
    pub fn iter(&self) -> impl Iterator<Item = &OracleReporter> {
        self.reporters.values()
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(name: &str) -> AccountId {
        AccountId::new(format!("aero_{name}"))
    }

    fn params() -> PoolParams {
        PoolParams::default()
    }

    #[test]
    fn registration_assigns_three_indices() {
        let mut reg = ReporterRegistry::new([5u8; 32]);
        let reporter = reg
            .register(acct("oracle_1"), Amount::from_aero(1), &params())
            .unwrap();

        assert!(reporter.is_registered);
        assert_eq!(reporter.indexes.len(), 3);
    }

    #[test]
    fn registration_below_fee_is_rejected() {
        let mut reg = ReporterRegistry::new([5u8; 32]);
        let result = reg.register(acct("oracle_1"), Amount::new(1), &params());
        assert!(matches!(result, Err(OracleError::InsufficientFunds { .. })));
        assert!(reg.get(&acct("oracle_1")).is_none());
    }

    #[test]
    fn double_registration_is_rejected() {
        let mut reg = ReporterRegistry::new([5u8; 32]);
        reg.register(acct("oracle_1"), Amount::from_aero(1), &params())
            .unwrap();
        let before = reg.indexes(&acct("oracle_1")).unwrap().to_vec();

        let result = reg.register(acct("oracle_1"), Amount::from_aero(1), &params());
        assert!(matches!(result, Err(OracleError::AlreadyRegistered(_))));
        // Indices never reassigned.
        assert_eq!(reg.indexes(&acct("oracle_1")).unwrap(), before.as_slice());
    }

    #[test]
    fn indexes_for_unknown_reporter_fails() {
        let reg = ReporterRegistry::new([5u8; 32]);
        let result = reg.indexes(&acct("ghost"));
        assert!(matches!(result, Err(OracleError::UnknownReporter(_))));
    }
}
