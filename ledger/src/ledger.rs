//! In-memory ledger — account balances and the insurance reserve.
//!
//! Every mutating method validates against current state before touching
//! anything, so a returned error always means "no state change". Calls are
//! serialized by `&mut self`; there is no partial interleaving to guard
//! against.

use std::collections::HashMap;

use aerosure_types::{AccountId, Amount};

use crate::error::LedgerError;

/// The pool's value store: per-account balances plus the shared reserve
/// that admission fees and premiums flow into and payouts flow out of.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Ledger {
    balances: HashMap<AccountId, Amount>,
    reserve: Amount,
}

/// Point-in-time totals, mostly for logs and the admin surface.
#[derive(Clone, Debug)]
pub struct LedgerSummary {
    pub accounts: usize,
    pub total_balances: Amount,
    pub reserve: Amount,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            reserve: Amount::ZERO,
        }
    }

    /// Seed an account with an opening balance (genesis / dev faucet).
    /// Adds to any existing balance.
    pub fn open_account(&mut self, id: AccountId, initial: Amount) {
        let balance = self.balances.entry(id).or_insert(Amount::ZERO);
        *balance = balance.checked_add(initial).unwrap_or(*balance);
    }

    /// Current balance; unknown accounts hold zero.
    pub fn balance(&self, id: &AccountId) -> Amount {
        self.balances.get(id).copied().unwrap_or(Amount::ZERO)
    }

    /// Current reserve held by the pool.
    pub fn reserve(&self) -> Amount {
        self.reserve
    }

    /// Collect a fee out of `attached` value from `from`, crediting the
    /// reserve with exactly `fee` and leaving the remainder with the caller.
    ///
    /// Returns the refunded excess (`attached - fee`). The caller must hold
    /// at least `attached`, proving the full value was available even though
    /// only the fee leaves the account.
    pub fn collect_fee(
        &mut self,
        from: &AccountId,
        attached: Amount,
        fee: Amount,
    ) -> Result<Amount, LedgerError> {
        if fee > attached {
            return Err(LedgerError::FeeExceedsValue {
                fee: fee.raw(),
                attached: attached.raw(),
            });
        }
        let available = self.balance(from);
        if available < attached {
            return Err(LedgerError::InsufficientBalance {
                needed: attached.raw(),
                available: available.raw(),
            });
        }
        let new_reserve = self
            .reserve
            .checked_add(fee)
            .ok_or(LedgerError::Overflow)?;

        let balance = self.balances.entry(from.clone()).or_insert(Amount::ZERO);
        *balance = balance.saturating_sub(fee);
        self.reserve = new_reserve;

        tracing::debug!(from = %from, fee = %fee, "fee collected into reserve");
        Ok(attached.saturating_sub(fee))
    }

    /// Pay `amount` out of the reserve to `to`.
    pub fn payout(&mut self, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        if self.reserve < amount {
            return Err(LedgerError::InsufficientReserve {
                needed: amount.raw(),
                available: self.reserve.raw(),
            });
        }
        let new_balance = self
            .balance(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.reserve = self.reserve.saturating_sub(amount);
        self.balances.insert(to.clone(), new_balance);

        tracing::debug!(to = %to, amount = %amount, "reserve payout");
        Ok(())
    }

    /// Move value directly between two accounts (ticket purchases).
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        let available = self.balance(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount.raw(),
                available: available.raw(),
            });
        }
        let new_to = self
            .balance(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let from_balance = self.balances.entry(from.clone()).or_insert(Amount::ZERO);
        *from_balance = from_balance.saturating_sub(amount);
        self.balances.insert(to.clone(), new_to);
        Ok(())
    }

    pub fn summary(&self) -> LedgerSummary {
        let total = self
            .balances
            .values()
            .fold(Amount::ZERO, |acc, b| acc.checked_add(*b).unwrap_or(acc));
        LedgerSummary {
            accounts: self.balances.len(),
            total_balances: total,
            reserve: self.reserve,
        }
    }

    /// Serialize the full ledger state for persistence.
    pub fn snapshot(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Restore a ledger from a snapshot.
    pub fn restore(data: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(data).map_err(|e| LedgerError::Serialization(e.to_string()))
    }
}
