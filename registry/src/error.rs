use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("caller {0} is not a funded, registered airline")]
    NotAuthorized(String),

    #[error("airline {0} is not registered")]
    NotRegistered(String),

    #[error("airline {0} is already registered")]
    AlreadyRegistered(String),

    #[error("airline {0} has already funded its membership")]
    AlreadyFunded(String),

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("voting is not open: {funded} funded airlines, threshold is {threshold}")]
    VotingNotOpen { funded: u32, threshold: u32 },

    #[error("airline {0} is unknown — no registration has been proposed for it")]
    UnknownAirline(String),

    #[error("flight {0} is not registered")]
    UnknownFlight(String),

    #[error("flight {0} is already registered")]
    FlightAlreadyRegistered(String),
}
