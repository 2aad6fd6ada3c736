//! Airline membership governance and flight records.
//!
//! Admission to the pool is funding-gated: while fewer than the multiparty
//! threshold of airlines are funded, any funded member can admit a new
//! airline directly; once the threshold is reached, admission requires
//! distinct votes from at least half of the funded membership. Flight
//! records hang off admitted airlines and carry the status the oracle
//! consensus machine finalizes.

pub mod airline;
pub mod error;
pub mod flight;

pub use airline::{Airline, AirlineRegistry, FundingReceipt, RegistrationOutcome};
pub use error::RegistryError;
pub use flight::{Flight, FlightRegistry};
