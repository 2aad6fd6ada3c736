//! Pool parameters — fees, thresholds and consensus constants.
//!
//! Every rule constant the two state machines and the insurance pool depend
//! on lives here, so tests can shrink fees without touching machine logic.

use crate::amount::Amount;
use serde::{Deserialize, Serialize};

/// All parameters governing the pool's state machines.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolParams {
    // ── Airline governance ───────────────────────────────────────────────
    /// Fee retained when an airline funds its membership. Anything attached
    /// above this amount is refunded.
    pub airline_admission_fee: Amount,

    /// Number of funded airlines at which admission switches from immediate
    /// registration to multiparty voting.
    pub multiparty_threshold: u32,

    // ── Insurance ────────────────────────────────────────────────────────
    /// Maximum premium a passenger may pay for one policy.
    pub premium_cap: Amount,

    /// Payout multiple as a rational: payout = premium × num / den.
    pub payout_numerator: u128,
    pub payout_denominator: u128,

    // ── Oracle consensus ─────────────────────────────────────────────────
    /// Fee a reporter pays to register.
    pub oracle_registration_fee: Amount,

    /// Matching reports required to finalize a flight status.
    pub oracle_quorum: usize,

    /// Size of the bounded index space reporters draw from (indices are
    /// `0..oracle_index_space`).
    pub oracle_index_space: u8,

    /// Number of indices assigned to each reporter at registration.
    pub indexes_per_reporter: usize,
}

impl PoolParams {
    /// Production defaults, matching the deployed pool.
    pub fn pool_defaults() -> Self {
        Self {
            airline_admission_fee: Amount::from_aero(10),
            multiparty_threshold: 4,

            premium_cap: Amount::from_aero(1),
            payout_numerator: 3,
            payout_denominator: 2,

            oracle_registration_fee: Amount::from_aero(1),
            oracle_quorum: 3,
            oracle_index_space: 10,
            indexes_per_reporter: 3,
        }
    }

    /// Payout owed for a policy with the given premium.
    pub fn payout_amount(&self, premium: Amount) -> Amount {
        premium.scale(self.payout_numerator, self.payout_denominator)
    }

    /// Distinct votes required to register a candidate when `funded` airlines
    /// are members: at least half, ties rounding in favor of registration.
    pub fn votes_required(&self, funded: u32) -> u32 {
        funded.div_ceil(2)
    }
}

/// Default is the production configuration.
impl Default for PoolParams {
    fn default() -> Self {
        Self::pool_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployed_constants() {
        let p = PoolParams::default();
        assert_eq!(p.airline_admission_fee, Amount::from_aero(10));
        assert_eq!(p.multiparty_threshold, 4);
        assert_eq!(p.premium_cap, Amount::from_aero(1));
        assert_eq!(p.oracle_quorum, 3);
        assert_eq!(p.oracle_index_space, 10);
        assert_eq!(p.indexes_per_reporter, 3);
    }

    #[test]
    fn payout_is_one_and_a_half_times_premium() {
        let p = PoolParams::default();
        let payout = p.payout_amount(Amount::from_aero(1));
        assert_eq!(payout, Amount::new(crate::AERO_UNIT * 3 / 2));
    }

    #[test]
    fn majority_ties_round_toward_registration() {
        let p = PoolParams::default();
        // 4 funded airlines: 2 votes suffice (2 × 2 >= 4)
        assert_eq!(p.votes_required(4), 2);
        // 5 funded airlines: 3 votes (3 × 2 >= 5)
        assert_eq!(p.votes_required(5), 3);
    }
}
