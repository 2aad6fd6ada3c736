use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient reserve: need {needed}, have {available}")]
    InsufficientReserve { needed: u128, available: u128 },

    #[error("fee {fee} exceeds attached value {attached}")]
    FeeExceedsValue { fee: u128, attached: u128 },

    #[error("balance arithmetic overflow")]
    Overflow,

    #[error("cannot transfer to self")]
    SelfTransfer,

    #[error("serialization error: {0}")]
    Serialization(String),
}
