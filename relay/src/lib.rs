//! Off-chain oracle relay.
//!
//! The relay owns a pool of registered reporter identities. When a status
//! resolution opens, it fans report submissions out across the reporters
//! that hold the assigned index, treats index mismatches as expected skips,
//! stops on finalization, and surfaces a liveness failure if the quorum is
//! never reached within its deadline. An HTTP surface lets a human trigger
//! a resolution and inspect reporter index assignments.

pub mod error;
pub mod http;
pub mod relay;

pub use error::RelayError;
pub use http::{router, serve};
pub use relay::{OracleRelay, RelayConfig};
