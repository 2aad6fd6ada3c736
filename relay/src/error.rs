use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("quorum not reached for {flight} within {deadline_secs}s")]
    QuorumTimeout { flight: String, deadline_secs: u64 },

    #[error("quorum not reachable for {flight}: reporter pool exhausted")]
    QuorumNotReached { flight: String },

    #[error("flight not found")]
    FlightNotFound,

    #[error("pool call failed: {0}")]
    App(String),
}
