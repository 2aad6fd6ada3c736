//! Policy records and the crediting state machine.

use std::collections::HashMap;

use aerosure_types::{AccountId, Amount, FlightKey, FlightStatus, PoolParams};
use serde::{Deserialize, Serialize};

use crate::error::PoolError;

/// One passenger's policy against one flight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub passenger: AccountId,
    pub flight: FlightKey,
    /// Premium paid at purchase.
    pub premium: Amount,
    /// Whether the payout has been credited. Set exactly once.
    pub is_credited: bool,
}

/// Read model for a passenger's claim against a flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimStatus {
    pub is_insured: bool,
    /// The amount a payout would credit (premium × the payout multiple).
    pub payout_amount: Amount,
    /// The flight's current status code.
    pub reason: FlightStatus,
    pub payout_eligible: bool,
    pub is_credited: bool,
}

/// All policies, keyed by (passenger, flight key). One active policy per
/// pair; repeat purchases are rejected here, not left to the client.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InsurancePool {
    policies: HashMap<(AccountId, FlightKey), InsurancePolicy>,
}

impl InsurancePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy. The flight's existence is the application layer's
    /// precondition; premium bounds and duplicate purchase are enforced here.
    pub fn buy_insurance(
        &mut self,
        flight: FlightKey,
        passenger: AccountId,
        premium: Amount,
        params: &PoolParams,
    ) -> Result<&InsurancePolicy, PoolError> {
        if premium.is_zero() {
            return Err(PoolError::ZeroPremium);
        }
        if premium > params.premium_cap {
            return Err(PoolError::PremiumCapExceeded {
                premium: premium.raw(),
                cap: params.premium_cap.raw(),
            });
        }

        let key = (passenger.clone(), flight.clone());
        if self.policies.contains_key(&key) {
            return Err(PoolError::AlreadyInsured(passenger.to_string()));
        }

        tracing::info!(flight = %flight, passenger = %passenger, premium = %premium, "policy created");
        let policy = InsurancePolicy {
            passenger,
            flight,
            premium,
            is_credited: false,
        };
        Ok(self.policies.entry(key).or_insert(policy))
    }

    pub fn policy(&self, flight: &FlightKey, passenger: &AccountId) -> Option<&InsurancePolicy> {
        self.policies.get(&(passenger.clone(), flight.clone()))
    }

    /// Read-only claim view against the flight's current status.
    pub fn claim_status(
        &self,
        flight: &FlightKey,
        passenger: &AccountId,
        flight_status: FlightStatus,
        params: &PoolParams,
    ) -> ClaimStatus {
        match self.policy(flight, passenger) {
            Some(p) => ClaimStatus {
                is_insured: true,
                payout_amount: params.payout_amount(p.premium),
                reason: flight_status,
                payout_eligible: flight_status.is_payout_eligible(),
                is_credited: p.is_credited,
            },
            None => ClaimStatus {
                is_insured: false,
                payout_amount: Amount::ZERO,
                reason: flight_status,
                payout_eligible: false,
                is_credited: false,
            },
        }
    }

    /// Credit the passenger's policy for an airline-fault delay.
    ///
    /// Validates eligibility, exactly-once crediting, and that `reserve`
    /// covers the payout before marking anything. Returns the payout the
    /// application layer must settle against the ledger; once this returns
    /// `Ok` the transfer cannot fail the reserve check.
    pub fn credit_insuree(
        &mut self,
        flight: &FlightKey,
        passenger: &AccountId,
        flight_status: FlightStatus,
        reserve: Amount,
        params: &PoolParams,
    ) -> Result<Amount, PoolError> {
        if !flight_status.is_payout_eligible() {
            return Err(PoolError::NotEligible(flight_status.to_string()));
        }

        let policy = self
            .policies
            .get_mut(&(passenger.clone(), flight.clone()))
            .ok_or_else(|| PoolError::NotInsured(passenger.to_string()))?;

        if policy.is_credited {
            return Err(PoolError::AlreadyCredited);
        }

        let payout = params.payout_amount(policy.premium);
        if reserve < payout {
            return Err(PoolError::InsufficientReserve {
                needed: payout.raw(),
                available: reserve.raw(),
            });
        }

        policy.is_credited = true;
        tracing::info!(flight = %flight, passenger = %passenger, payout = %payout, "policy credited");
        Ok(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerosure_types::{FlightCode, Timestamp};

    fn acct(name: &str) -> AccountId {
        AccountId::new(format!("aero_{name}"))
    }

    fn flight() -> FlightKey {
        FlightKey::new(acct("jt_air"), FlightCode::new("ND1309"), Timestamp::new(1000))
    }

    fn params() -> PoolParams {
        PoolParams::default()
    }

    #[test]
    fn buy_insurance_at_cap_succeeds() {
        let mut pool = InsurancePool::new();
        let policy = pool
            .buy_insurance(flight(), acct("pax"), Amount::from_aero(1), &params())
            .unwrap();

        assert_eq!(policy.premium, Amount::from_aero(1));
        assert!(!policy.is_credited);
    }

    #[test]
    fn buy_insurance_above_cap_is_rejected() {
        let mut pool = InsurancePool::new();
        let result = pool.buy_insurance(
            flight(),
            acct("pax"),
            Amount::from_aero(1) + Amount::new(1),
            &params(),
        );
        assert!(matches!(result, Err(PoolError::PremiumCapExceeded { .. })));
        assert!(pool.policy(&flight(), &acct("pax")).is_none());
    }

    #[test]
    fn zero_premium_is_rejected() {
        let mut pool = InsurancePool::new();
        let result = pool.buy_insurance(flight(), acct("pax"), Amount::ZERO, &params());
        assert!(matches!(result, Err(PoolError::ZeroPremium)));
    }

    #[test]
    fn second_policy_for_same_flight_is_rejected() {
        let mut pool = InsurancePool::new();
        let half = Amount::new(aerosure_types::AERO_UNIT / 2);
        pool.buy_insurance(flight(), acct("pax"), half, &params()).unwrap();

        let result = pool.buy_insurance(flight(), acct("pax"), half, &params());
        assert!(matches!(result, Err(PoolError::AlreadyInsured(_))));
        // Original policy unchanged.
        assert_eq!(pool.policy(&flight(), &acct("pax")).unwrap().premium, half);
    }

    #[test]
    fn claim_status_before_resolution() {
        let mut pool = InsurancePool::new();
        pool.buy_insurance(flight(), acct("pax"), Amount::from_aero(1), &params())
            .unwrap();

        let status = pool.claim_status(&flight(), &acct("pax"), FlightStatus::Unknown, &params());

        assert!(status.is_insured);
        assert!(!status.payout_eligible);
        assert!(!status.is_credited);
        assert_eq!(status.reason, FlightStatus::Unknown);
        // 1 AERO premium is reported as a 1.5 AERO payout.
        assert_eq!(
            status.payout_amount,
            Amount::new(aerosure_types::AERO_UNIT * 3 / 2)
        );
    }

    #[test]
    fn claim_status_for_uninsured_passenger() {
        let pool = InsurancePool::new();
        let status = pool.claim_status(&flight(), &acct("pax"), FlightStatus::LateAirline, &params());
        assert!(!status.is_insured);
        assert!(!status.payout_eligible);
        assert_eq!(status.payout_amount, Amount::ZERO);
    }

    #[test]
    fn credit_pays_one_and_a_half_premiums_once() {
        let mut pool = InsurancePool::new();
        pool.buy_insurance(flight(), acct("pax"), Amount::from_aero(1), &params())
            .unwrap();

        let payout = pool
            .credit_insuree(
                &flight(),
                &acct("pax"),
                FlightStatus::LateAirline,
                Amount::from_aero(100),
                &params(),
            )
            .unwrap();

        assert_eq!(payout, Amount::new(aerosure_types::AERO_UNIT * 3 / 2));
        assert!(pool.policy(&flight(), &acct("pax")).unwrap().is_credited);

        let second = pool.credit_insuree(
            &flight(),
            &acct("pax"),
            FlightStatus::LateAirline,
            Amount::from_aero(100),
            &params(),
        );
        assert!(matches!(second, Err(PoolError::AlreadyCredited)));
    }

    #[test]
    fn credit_requires_airline_fault_status() {
        let mut pool = InsurancePool::new();
        pool.buy_insurance(flight(), acct("pax"), Amount::from_aero(1), &params())
            .unwrap();

        for status in [
            FlightStatus::Unknown,
            FlightStatus::OnTime,
            FlightStatus::LateWeather,
            FlightStatus::LateTechnical,
            FlightStatus::LateOther,
        ] {
            let result = pool.credit_insuree(
                &flight(),
                &acct("pax"),
                status,
                Amount::from_aero(100),
                &params(),
            );
            assert!(matches!(result, Err(PoolError::NotEligible(_))));
        }
        assert!(!pool.policy(&flight(), &acct("pax")).unwrap().is_credited);
    }

    #[test]
    fn credit_without_policy_fails() {
        let mut pool = InsurancePool::new();
        let result = pool.credit_insuree(
            &flight(),
            &acct("pax"),
            FlightStatus::LateAirline,
            Amount::from_aero(100),
            &params(),
        );
        assert!(matches!(result, Err(PoolError::NotInsured(_))));
    }

    #[test]
    fn credit_fails_when_reserve_cannot_cover() {
        let mut pool = InsurancePool::new();
        pool.buy_insurance(flight(), acct("pax"), Amount::from_aero(1), &params())
            .unwrap();

        let result = pool.credit_insuree(
            &flight(),
            &acct("pax"),
            FlightStatus::LateAirline,
            Amount::from_aero(1),
            &params(),
        );

        assert!(matches!(result, Err(PoolError::InsufficientReserve { .. })));
        // Policy stays creditable for when the reserve recovers.
        assert!(!pool.policy(&flight(), &acct("pax")).unwrap().is_credited);
    }
}
