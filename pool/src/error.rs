use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("premium must be greater than zero")]
    ZeroPremium,

    #[error("premium {premium} exceeds the cap {cap}")]
    PremiumCapExceeded { premium: u128, cap: u128 },

    #[error("passenger {0} already holds a policy for this flight")]
    AlreadyInsured(String),

    #[error("passenger {0} holds no policy for this flight")]
    NotInsured(String),

    #[error("policy already credited")]
    AlreadyCredited,

    #[error("flight status {0} is not payout-eligible")]
    NotEligible(String),

    #[error("insufficient reserve: need {needed}, have {available}")]
    InsufficientReserve { needed: u128, available: u128 },
}
