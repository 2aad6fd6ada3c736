use thiserror::Error;

use aerosure_ledger::LedgerError;
use aerosure_oracle::OracleError;
use aerosure_pool::PoolError;
use aerosure_registry::RegistryError;

/// Umbrella error for the application surface.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("pool is not operational")]
    OperationalHalt,

    #[error("caller {0} is not authorized")]
    NotAuthorized(String),

    #[error("attached value below required amount: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("configuration error: {0}")]
    Config(String),
}
