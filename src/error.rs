use rust_decimal::Decimal;
use thiserror::Error;

/// Calculation error types
#[derive(Debug, Error)]
pub enum MatchError {
    /// Invalid input data
    #[error("Validation error: {0}")]
    Validation(String),

    /// The lay stake equation has no unique solution
    #[error("Degenerate odds: {0}")]
    Degenerate(String),

    /// No odds can produce the requested return
    #[error("Unreachable return: {0}")]
    Unreachable(String),

    /// A result does not fit in a 96-bit decimal
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;

pub(crate) fn overflow(what: &str) -> MatchError {
    MatchError::Overflow(what.to_string())
}

/// Validation functions
pub fn validate_stake(stake: Decimal) -> Result<()> {
    if stake <= Decimal::ZERO {
        return Err(MatchError::Validation(format!(
            "Stake must be positive, got {}",
            stake
        )));
    }
    Ok(())
}

pub fn validate_odds(odds: Decimal) -> Result<()> {
    if odds <= Decimal::ONE {
        return Err(MatchError::Validation(format!(
            "Decimal odds must be greater than 1, got {}",
            odds
        )));
    }
    Ok(())
}

pub fn validate_commission(rate: Decimal) -> Result<()> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(MatchError::Validation(format!(
            "Commission must be in [0, 1), got {}",
            rate
        )));
    }
    Ok(())
}

/// Odds are given as all back odds followed by all lay odds
pub fn validate_odds_count(count: usize) -> Result<()> {
    if count == 0 || count % 2 != 0 {
        return Err(MatchError::Validation(format!(
            "An even, non-zero number of odds is required (back odds then lay odds), got {}",
            count
        )));
    }
    Ok(())
}
