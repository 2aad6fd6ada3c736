use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("reporter {0} is not registered")]
    UnknownReporter(String),

    #[error("reporter {0} is already registered")]
    AlreadyRegistered(String),

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("index {0} matches neither the reporter's assignment nor the open request")]
    IndexMismatch(u8),

    #[error("no open resolution request for this flight")]
    NoOpenRequest,

    #[error("resolution request already finalized")]
    AlreadyFinalized,

    #[error("a resolution request is already open for this flight")]
    RequestAlreadyOpen,

    #[error("reporter {0} already reported on this request")]
    DuplicateReport(String),

    #[error("status code {0} is not reportable")]
    InvalidStatus(u8),
}
