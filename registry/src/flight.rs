//! Flight records.
//!
//! A flight is created by its owning airline and keyed by
//! (airline, code, departure). The status starts `Unknown` and is written by
//! the oracle consensus machine when a resolution cycle finalizes.

use std::collections::HashMap;

use aerosure_types::{AccountId, Amount, FlightCode, FlightKey, FlightStatus, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// One registered flight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Flight {
    pub airline: AccountId,
    pub code: FlightCode,
    pub departure: Timestamp,
    pub ticket_price: Amount,
    pub is_registered: bool,
    pub status: FlightStatus,
}

impl Flight {
    pub fn key(&self) -> FlightKey {
        FlightKey::new(self.airline.clone(), self.code.clone(), self.departure)
    }
}

/// All flights, keyed by (airline, code, departure).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FlightRegistry {
    flights: HashMap<FlightKey, Flight>,
}

impl FlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flight owned by `airline`. The caller's authority (funded,
    /// registered airline) is the application layer's precondition; the key
    /// itself must be fresh.
    pub fn register(
        &mut self,
        airline: AccountId,
        code: FlightCode,
        departure: Timestamp,
        ticket_price: Amount,
    ) -> Result<&Flight, RegistryError> {
        let key = FlightKey::new(airline.clone(), code.clone(), departure);
        if self.flights.contains_key(&key) {
            return Err(RegistryError::FlightAlreadyRegistered(key.to_string()));
        }

        tracing::info!(flight = %key, price = %ticket_price, "flight registered");
        let flight = Flight {
            airline,
            code,
            departure,
            ticket_price,
            is_registered: true,
            status: FlightStatus::Unknown,
        };
        Ok(self.flights.entry(key).or_insert(flight))
    }

    pub fn get(&self, key: &FlightKey) -> Option<&Flight> {
        self.flights.get(key)
    }

    /// Write the finalized status for a flight. Called once per resolution
    /// cycle by the consensus machine's owner.
    pub fn set_status(
        &mut self,
        key: &FlightKey,
        status: FlightStatus,
    ) -> Result<(), RegistryError> {
        let flight = self
            .flights
            .get_mut(key)
            .ok_or_else(|| RegistryError::UnknownFlight(key.to_string()))?;
        tracing::info!(flight = %key, from = %flight.status, to = %status, "flight status finalized");
        flight.status = status;
        Ok(())
    }
}
