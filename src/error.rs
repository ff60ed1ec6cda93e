//! Error type shared by every financing operation.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinancingError {
    /// An input (or a value derived from inputs) that has no financial meaning,
    /// such as a negative rate or a down payment larger than the discounted price.
    #[error("invalid input `{field}` = {value}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: Decimal,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, FinancingError>;

/// Rejects a negative value for `field`.
pub(crate) fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FinancingError::InvalidInput {
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}

/// Error for an arithmetic step on `field` whose result does not fit a `Decimal`.
pub(crate) fn too_large(field: &'static str, value: Decimal) -> FinancingError {
    FinancingError::InvalidInput {
        field,
        value,
        reason: "too large to compute",
    }
}
