//! Insurance policies against flight delay.
//!
//! Passengers buy a policy against a registered flight for a capped premium.
//! Crediting pays premium × 3/2 out of the pool reserve, exactly once, and
//! only when the flight's finalized status is the airline-fault delay code.

pub mod error;
pub mod policy;

pub use error::PoolError;
pub use policy::{ClaimStatus, InsurancePolicy, InsurancePool};
