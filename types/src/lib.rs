//! Fundamental types for the Aerosure protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account identities, value amounts, timestamps, flight keys,
//! status codes, and pool parameters.

pub mod address;
pub mod amount;
pub mod flight;
pub mod params;
pub mod status;
pub mod time;

pub use address::AccountId;
pub use amount::{Amount, AERO_UNIT};
pub use flight::{FlightCode, FlightKey};
pub use params::PoolParams;
pub use status::FlightStatus;
pub use time::Timestamp;
