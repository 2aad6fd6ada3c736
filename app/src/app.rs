//! The application facade.
//!
//! Every externally callable operation goes through [`SuretyApp`]: the
//! operational flag is checked first, the caller identity is attributed,
//! preconditions are validated against current committed state, and only
//! then is state mutated. Methods take `&mut self`, so calls are serialized
//! and each one commits fully or not at all.

use std::collections::HashMap;

use aerosure_ledger::Ledger;
use aerosure_oracle::{OracleCoordinator, SubmissionOutcome};
use aerosure_pool::{ClaimStatus, InsurancePool};
use aerosure_registry::{
    Airline, AirlineRegistry, Flight, FlightRegistry, RegistrationOutcome, RegistryError,
};
use aerosure_types::{
    AccountId, Amount, FlightCode, FlightKey, FlightStatus, PoolParams, Timestamp,
};

use crate::error::AppError;
use crate::event::{AppEvent, EventBus};

/// The deployed pool: ledger, machines, kill-switch and event fan-out.
pub struct SuretyApp {
    owner: AccountId,
    operational: bool,
    params: PoolParams,
    ledger: Ledger,
    airlines: AirlineRegistry,
    flights: FlightRegistry,
    pool: InsurancePool,
    oracle: OracleCoordinator,
    events: EventBus,
}

impl SuretyApp {
    /// Deploy a pool with its owner and founding airline. The founding
    /// airline is registered but must still fund its membership before it
    /// holds any authority.
    pub fn new(
        owner: AccountId,
        founding_airline: AccountId,
        founding_name: impl Into<String>,
        oracle_seed: [u8; 32],
        params: PoolParams,
    ) -> Self {
        Self {
            owner,
            operational: true,
            params,
            ledger: Ledger::new(),
            airlines: AirlineRegistry::new(founding_airline, founding_name),
            flights: FlightRegistry::new(),
            pool: InsurancePool::new(),
            oracle: OracleCoordinator::new(oracle_seed),
            events: EventBus::new(),
        }
    }

    // ── Administrative surface ───────────────────────────────────────────

    pub fn is_operational(&self) -> bool {
        self.operational
    }

    /// Flip the global kill-switch. Owner only.
    pub fn set_operating_status(&mut self, status: bool, caller: &AccountId) -> Result<(), AppError> {
        if caller != &self.owner {
            return Err(AppError::NotAuthorized(caller.to_string()));
        }
        tracing::warn!(operational = status, "operating status changed");
        self.operational = status;
        Ok(())
    }

    /// Seed an account with an opening balance (genesis / dev faucet).
    /// Owner only.
    pub fn seed_account(
        &mut self,
        id: AccountId,
        amount: Amount,
        caller: &AccountId,
    ) -> Result<(), AppError> {
        if caller != &self.owner {
            return Err(AppError::NotAuthorized(caller.to_string()));
        }
        self.ledger.open_account(id, amount);
        Ok(())
    }

    /// Register an event listener. Listeners run inline on the mutating call.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&AppEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    pub fn balance(&self, id: &AccountId) -> Amount {
        self.ledger.balance(id)
    }

    pub fn reserve(&self) -> Amount {
        self.ledger.reserve()
    }

    fn require_operational(&self) -> Result<(), AppError> {
        if self.operational {
            Ok(())
        } else {
            Err(AppError::OperationalHalt)
        }
    }

    // ── Airline governance ───────────────────────────────────────────────

    pub fn airline(&self, id: &AccountId) -> Option<&Airline> {
        self.airlines.get(id)
    }

    pub fn funded_airline_count(&self) -> u32 {
        self.airlines.funded_count()
    }

    /// Propose (or below the threshold, directly admit) a new airline.
    pub fn register_airline(
        &mut self,
        candidate: AccountId,
        name: impl Into<String>,
        caller: &AccountId,
    ) -> Result<RegistrationOutcome, AppError> {
        self.require_operational()?;
        let outcome =
            self.airlines
                .register_airline(candidate.clone(), name, caller, &self.params)?;
        if outcome == RegistrationOutcome::Registered {
            self.events.emit(&AppEvent::AirlineRegistered { airline: candidate });
        }
        Ok(outcome)
    }

    /// Vote for a proposed airline once the multiparty threshold is reached.
    pub fn vote_airline(
        &mut self,
        candidate: &AccountId,
        caller: &AccountId,
    ) -> Result<RegistrationOutcome, AppError> {
        self.require_operational()?;
        let outcome = self.airlines.vote_airline(candidate, caller, &self.params)?;
        if outcome == RegistrationOutcome::Registered {
            self.events
                .emit(&AppEvent::AirlineRegistered { airline: candidate.clone() });
        }
        Ok(outcome)
    }

    /// Pay the admission fee. Retains exactly the fee and leaves the excess
    /// with the caller; returns the refunded excess.
    pub fn fund_airline(&mut self, caller: &AccountId, value: Amount) -> Result<Amount, AppError> {
        self.require_operational()?;

        // Validate the attached value exists before the registry commits.
        let available = self.ledger.balance(caller);
        if available < value {
            return Err(AppError::InsufficientFunds {
                needed: value.raw(),
                available: available.raw(),
            });
        }

        let receipt = self.airlines.fund_airline(caller, value, &self.params)?;
        let refund = self.ledger.collect_fee(caller, value, receipt.fee)?;
        self.events.emit(&AppEvent::AirlineFunded {
            airline: caller.clone(),
            fee: receipt.fee,
        });
        Ok(refund)
    }

    // ── Flights ──────────────────────────────────────────────────────────

    /// Register a flight. Caller must be a funded, registered airline.
    pub fn register_flight(
        &mut self,
        code: FlightCode,
        departure: Timestamp,
        ticket_price: Amount,
        caller: &AccountId,
    ) -> Result<FlightKey, AppError> {
        self.require_operational()?;
        self.airlines.require_authority(caller)?;

        let flight = self
            .flights
            .register(caller.clone(), code, departure, ticket_price)?;
        let key = flight.key();
        self.events.emit(&AppEvent::FlightRegistered { flight: key.clone() });
        Ok(key)
    }

    pub fn get_flight(&self, key: &FlightKey) -> Option<&Flight> {
        self.flights.get(key)
    }

    /// Buy a ticket at the flight's price. The price is paid to the owning
    /// airline; attached value above it stays with the passenger.
    pub fn buy_flight(
        &mut self,
        key: &FlightKey,
        passenger: &AccountId,
        value: Amount,
    ) -> Result<Amount, AppError> {
        self.require_operational()?;
        let flight = self
            .flights
            .get(key)
            .ok_or_else(|| RegistryError::UnknownFlight(key.to_string()))?;

        let price = flight.ticket_price;
        if value < price {
            return Err(AppError::InsufficientFunds {
                needed: price.raw(),
                available: value.raw(),
            });
        }

        let airline = flight.airline.clone();
        self.ledger.transfer(passenger, &airline, price)?;
        Ok(value.saturating_sub(price))
    }

    // ── Insurance ────────────────────────────────────────────────────────

    /// Buy a delay policy for a registered flight. The premium moves into
    /// the reserve.
    pub fn buy_insurance(
        &mut self,
        key: &FlightKey,
        passenger: &AccountId,
        value: Amount,
    ) -> Result<(), AppError> {
        self.require_operational()?;
        if self.flights.get(key).is_none() {
            return Err(RegistryError::UnknownFlight(key.to_string()).into());
        }

        let available = self.ledger.balance(passenger);
        if available < value {
            return Err(AppError::InsufficientFunds {
                needed: value.raw(),
                available: available.raw(),
            });
        }

        self.pool
            .buy_insurance(key.clone(), passenger.clone(), value, &self.params)?;
        self.ledger.collect_fee(passenger, value, value)?;
        self.events.emit(&AppEvent::InsurancePurchased {
            flight: key.clone(),
            passenger: passenger.clone(),
            premium: value,
        });
        Ok(())
    }

    /// A passenger's claim against a flight, read-only.
    pub fn claim_status(
        &self,
        key: &FlightKey,
        passenger: &AccountId,
    ) -> Result<ClaimStatus, AppError> {
        let flight = self
            .flights
            .get(key)
            .ok_or_else(|| RegistryError::UnknownFlight(key.to_string()))?;
        Ok(self
            .pool
            .claim_status(key, passenger, flight.status, &self.params))
    }

    /// Credit the caller's policy after an airline-fault delay. Exactly once
    /// per policy; pays premium × 3/2 out of the reserve.
    pub fn credit_insurees(
        &mut self,
        key: &FlightKey,
        caller: &AccountId,
    ) -> Result<Amount, AppError> {
        self.require_operational()?;
        let flight = self
            .flights
            .get(key)
            .ok_or_else(|| RegistryError::UnknownFlight(key.to_string()))?;

        let payout = self.pool.credit_insuree(
            key,
            caller,
            flight.status,
            self.ledger.reserve(),
            &self.params,
        )?;
        self.ledger.payout(caller, payout)?;
        self.events.emit(&AppEvent::InsuranceCredited {
            flight: key.clone(),
            passenger: caller.clone(),
            payout,
        });
        Ok(payout)
    }

    // ── Oracle consensus ─────────────────────────────────────────────────

    /// Register the caller as an oracle reporter; returns its indices.
    pub fn register_oracle(
        &mut self,
        caller: &AccountId,
        value: Amount,
    ) -> Result<Vec<u8>, AppError> {
        self.require_operational()?;

        let available = self.ledger.balance(caller);
        if available < value {
            return Err(AppError::InsufficientFunds {
                needed: value.raw(),
                available: available.raw(),
            });
        }

        let fee = self.params.oracle_registration_fee;
        let indexes = self
            .oracle
            .register_reporter(caller.clone(), value, &self.params)?
            .indexes
            .clone();
        self.ledger.collect_fee(caller, value, fee)?;
        Ok(indexes)
    }

    /// The caller's assigned indices (original surface: `getMyIndexes`).
    pub fn my_indexes(&self, caller: &AccountId) -> Result<Vec<u8>, AppError> {
        Ok(self.oracle.reporter_indexes(caller)?.to_vec())
    }

    /// Every registered reporter's index assignment, for the relay's
    /// `/oracles-index` surface.
    pub fn oracle_index_map(&self) -> HashMap<String, Vec<u8>> {
        self.oracle
            .reporters()
            .iter()
            .map(|r| (r.identity.to_string(), r.indexes.clone()))
            .collect()
    }

    /// The index assigned to the currently open request for a key, if any.
    pub fn open_request_index(&self, key: &FlightKey) -> Option<u8> {
        self.oracle
            .request(key)
            .filter(|r| r.is_open())
            .map(|r| r.index)
    }

    /// Open a status resolution request for a registered flight. Returns the
    /// assigned index reporters must hold.
    pub fn fetch_flight_status(
        &mut self,
        key: &FlightKey,
        caller: &AccountId,
    ) -> Result<u8, AppError> {
        self.require_operational()?;
        if self.flights.get(key).is_none() {
            return Err(RegistryError::UnknownFlight(key.to_string()).into());
        }

        let index = self
            .oracle
            .open_request(key.clone(), caller, Timestamp::now(), &self.params)?
            .index;
        self.events.emit(&AppEvent::OracleRequestOpened {
            flight: key.clone(),
            index,
        });
        Ok(index)
    }

    /// Submit one reporter's status observation. On the quorum-completing
    /// report the flight's status is written and finalization is announced.
    pub fn submit_oracle_response(
        &mut self,
        caller: &AccountId,
        index: u8,
        key: &FlightKey,
        status: FlightStatus,
    ) -> Result<SubmissionOutcome, AppError> {
        self.require_operational()?;

        let outcome = self
            .oracle
            .submit_response(caller, index, key, status, &self.params)?;
        match &outcome {
            SubmissionOutcome::Recorded { status, reports } => {
                self.events.emit(&AppEvent::OracleReportRecorded {
                    flight: key.clone(),
                    status: *status,
                    reports: *reports,
                });
            }
            SubmissionOutcome::Finalized { status } => {
                self.flights.set_status(key, *status)?;
                self.events.emit(&AppEvent::FlightStatusFinalized {
                    flight: key.clone(),
                    status: *status,
                });
            }
        }
        Ok(outcome)
    }
}
