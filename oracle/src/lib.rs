//! Oracle consensus machine for flight status resolution.
//!
//! A flight's delay status is decided by independent off-chain reporters.
//! Opening a request assigns it one index from a bounded space; only
//! reporters holding that index may respond, and the first status value to
//! collect a quorum of matching reports wins. There is no trusted
//! coordinator: the state machine itself arbitrates conflicting,
//! concurrently submitted reports.
//!
//! Lifecycle per flight key: `NONE → OPEN → FINALIZED`. The only exit from
//! OPEN is FINALIZED; a later resolution cycle may re-open a finalized key.

pub mod coordinator;
pub mod error;
pub mod indexing;
pub mod reporter;
pub mod request;

pub use coordinator::{OracleCoordinator, SubmissionOutcome};
pub use error::OracleError;
pub use reporter::{OracleReporter, ReporterRegistry};
pub use request::{RequestState, ResolutionRequest};
