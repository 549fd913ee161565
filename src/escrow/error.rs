use thiserror::Error;

/// Guard failures of the escrow contract. None of them mutate state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("Contract already funded.")]
    AlreadyFunded,

    #[error("Insufficient funds. Need {needed} USD.")]
    InsufficientFunds { needed: f64 },

    #[error("Contract not in funded state.")]
    NotFunded,

    #[error("Invalid {field}: {value}. Must be a positive amount.")]
    InvalidAmount { field: &'static str, value: f64 },
}

/// Rejects zero, negative, NaN and infinite amounts
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64, ContractError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ContractError::InvalidAmount { field, value })
    }
}
