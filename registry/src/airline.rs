//! Airline governance machine — funding-gated admission with multiparty voting.
//!
//! Each candidate carries an explicit voter set; the vote count is derived
//! from the set's size, so a caller voting twice can never inflate the
//! tally. A candidate registers once distinct voters reach at least half of
//! the funded membership (ties register).

use std::collections::{HashMap, HashSet};

use aerosure_types::{AccountId, Amount, PoolParams};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// One airline's membership record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Airline {
    pub identity: AccountId,
    pub name: String,
    /// Admitted to the pool. Registered-but-not-funded is a valid transient
    /// state; such an airline holds no authority yet.
    pub is_registered: bool,
    /// Has paid the admission fee.
    pub is_funded: bool,
    /// Distinct funded airlines that voted for this candidate since the
    /// record was created.
    pub voters: HashSet<AccountId>,
}

impl Airline {
    fn new(identity: AccountId, name: impl Into<String>) -> Self {
        Self {
            identity,
            name: name.into(),
            is_registered: false,
            is_funded: false,
            voters: HashSet::new(),
        }
    }

    /// Derived vote count: the size of the distinct voter set.
    pub fn number_of_votes(&self) -> u32 {
        self.voters.len() as u32
    }

    /// Whether this airline may exercise member authority (register flights,
    /// admit or vote on candidates).
    pub fn has_authority(&self) -> bool {
        self.is_registered && self.is_funded
    }
}

/// Outcome of a registration or vote call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The candidate is now (or already was) registered.
    Registered,
    /// A vote was recorded; the candidate still needs more votes.
    VoteRecorded { votes: u32, required: u32 },
}

/// What a funding call settled on: the fee to retain and the excess to
/// return. The application layer executes both against the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FundingReceipt {
    pub fee: Amount,
    pub refund: Amount,
}

/// Membership, funding and voting state for all airlines.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AirlineRegistry {
    airlines: HashMap<AccountId, Airline>,
}

impl AirlineRegistry {
    /// Create a registry with a founding airline: registered at deployment,
    /// but holding no authority until it funds its membership.
    pub fn new(founding: AccountId, name: impl Into<String>) -> Self {
        let mut airline = Airline::new(founding.clone(), name);
        airline.is_registered = true;
        let mut airlines = HashMap::new();
        airlines.insert(founding, airline);
        Self { airlines }
    }

    pub fn get(&self, id: &AccountId) -> Option<&Airline> {
        self.airlines.get(id)
    }

    /// Number of airlines that have funded their membership.
    pub fn funded_count(&self) -> u32 {
        self.airlines.values().filter(|a| a.is_funded).count() as u32
    }

    /// Fail unless `caller` is a funded, registered airline.
    pub fn require_authority(&self, caller: &AccountId) -> Result<(), RegistryError> {
        match self.airlines.get(caller) {
            Some(a) if a.has_authority() => Ok(()),
            _ => Err(RegistryError::NotAuthorized(caller.to_string())),
        }
    }

    /// Propose (and below the multiparty threshold, directly admit) a new
    /// airline.
    ///
    /// Below the threshold the candidate registers immediately with the
    /// caller as its single voter. At or above it, the call records the
    /// caller's vote and registration follows the majority rule. Duplicate
    /// votes from the same caller are silently ignored.
    pub fn register_airline(
        &mut self,
        candidate: AccountId,
        name: impl Into<String>,
        caller: &AccountId,
        params: &PoolParams,
    ) -> Result<RegistrationOutcome, RegistryError> {
        self.require_authority(caller)?;

        if self.airlines.get(&candidate).is_some_and(|a| a.is_registered) {
            return Err(RegistryError::AlreadyRegistered(candidate.to_string()));
        }

        let funded = self.funded_count();
        let entry = self
            .airlines
            .entry(candidate.clone())
            .or_insert_with(|| Airline::new(candidate.clone(), name));

        if funded < params.multiparty_threshold {
            entry.is_registered = true;
            entry.voters.insert(caller.clone());
            tracing::info!(candidate = %candidate, by = %caller, "airline registered directly");
            return Ok(RegistrationOutcome::Registered);
        }

        Ok(Self::tally_vote(entry, caller, funded, params))
    }

    /// Cast a vote for a proposed candidate. Valid only once the funded
    /// membership has reached the multiparty threshold.
    pub fn vote_airline(
        &mut self,
        candidate: &AccountId,
        caller: &AccountId,
        params: &PoolParams,
    ) -> Result<RegistrationOutcome, RegistryError> {
        self.require_authority(caller)?;

        let funded = self.funded_count();
        if funded < params.multiparty_threshold {
            return Err(RegistryError::VotingNotOpen {
                funded,
                threshold: params.multiparty_threshold,
            });
        }

        let entry = self
            .airlines
            .get_mut(candidate)
            .ok_or_else(|| RegistryError::UnknownAirline(candidate.to_string()))?;

        if entry.is_registered {
            // Voting on an admitted airline is a no-op, mirroring the
            // silent handling of duplicate votes.
            return Ok(RegistrationOutcome::Registered);
        }

        Ok(Self::tally_vote(entry, caller, funded, params))
    }

    /// Record the admission fee for a registered airline.
    ///
    /// Validates only; the returned receipt tells the application layer to
    /// retain exactly the fee and refund the rest of the attached value.
    pub fn fund_airline(
        &mut self,
        caller: &AccountId,
        value: Amount,
        params: &PoolParams,
    ) -> Result<FundingReceipt, RegistryError> {
        let entry = self
            .airlines
            .get_mut(caller)
            .filter(|a| a.is_registered)
            .ok_or_else(|| RegistryError::NotRegistered(caller.to_string()))?;

        if entry.is_funded {
            return Err(RegistryError::AlreadyFunded(caller.to_string()));
        }

        let fee = params.airline_admission_fee;
        if value < fee {
            return Err(RegistryError::InsufficientFunds {
                needed: fee.raw(),
                available: value.raw(),
            });
        }

        entry.is_funded = true;
        tracing::info!(airline = %caller, fee = %fee, "airline funded");
        Ok(FundingReceipt {
            fee,
            refund: value.saturating_sub(fee),
        })
    }

    /// Shared tally: insert the voter (duplicates are no-ops) and register
    /// the candidate once distinct voters reach half of the funded
    /// membership.
    fn tally_vote(
        entry: &mut Airline,
        caller: &AccountId,
        funded: u32,
        params: &PoolParams,
    ) -> RegistrationOutcome {
        entry.voters.insert(caller.clone());

        let votes = entry.number_of_votes();
        let required = params.votes_required(funded);
        if votes * 2 >= funded {
            entry.is_registered = true;
            tracing::info!(
                candidate = %entry.identity,
                votes,
                funded,
                "airline registered by majority vote"
            );
            RegistrationOutcome::Registered
        } else {
            tracing::debug!(candidate = %entry.identity, votes, required, "vote recorded");
            RegistrationOutcome::VoteRecorded { votes, required }
        }
    }
}
