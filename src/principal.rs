//! Normalization of discount and down payment inputs into a financed principal.
//!
//! Both discount and down payment can be given either as an absolute amount or as a
//! percentage. A positive amount always wins, and the matching percentage is
//! back-computed from it; otherwise the amount is derived from the percentage.
//! The two forms are never added together.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, too_large};

/// Discount and down payment resolved against the sticker price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPrincipal {
    /// Price after the discount (`price - discount_amount`).
    pub discounted_price: Decimal,
    /// Absolute discount.
    pub discount_amount: Decimal,
    /// Discount as a percentage of the original price.
    pub discount_rate: Decimal,
    /// Absolute down payment.
    pub down_amount: Decimal,
    /// Down payment as a percentage of the discounted price.
    pub down_rate: Decimal,
    /// Amount actually financed (`discounted_price - down_amount`).
    pub loan_amount: Decimal,
}

/// Resolves one amount/percentage pair against `base`.
///
/// Returns `(amount, rate)`. A zero base yields a zero back-computed rate.
fn resolve_share(
    field: &'static str,
    base: Decimal,
    amount: Decimal,
    rate: Decimal,
) -> Result<(Decimal, Decimal)> {
    if amount > Decimal::ZERO {
        let rate = if base.is_zero() {
            Decimal::ZERO
        } else {
            amount
                .checked_div(base)
                .and_then(|share| share.checked_mul(dec!(100)))
                .ok_or_else(|| too_large(field, amount))?
        };
        Ok((amount, rate))
    } else {
        let amount = base
            .checked_mul(rate / dec!(100))
            .ok_or_else(|| too_large(field, base))?;
        Ok((amount, rate))
    }
}

/// Derives the financed principal from a price plus discount and down payment inputs.
///
/// The discount percentage is relative to `price`; the down payment percentage is
/// relative to the discounted price. No clamping happens here: an oversized
/// discount or down payment yields a negative `loan_amount`, which callers must
/// reject (see [`crate::compute_financing`]).
///
/// # Errors
///
/// Returns [`crate::FinancingError::InvalidInput`] only when an intermediate value does not
/// fit a `Decimal`.
pub fn normalize(
    price: Decimal,
    discount_amount: Decimal,
    discount_rate: Decimal,
    down_amount: Decimal,
    down_rate: Decimal,
) -> Result<NormalizedPrincipal> {
    let (discount_amount, discount_rate) =
        resolve_share("discount_amount", price, discount_amount, discount_rate)?;
    let discounted_price = price
        .checked_sub(discount_amount)
        .ok_or_else(|| too_large("discounted_price", price))?;

    let (down_amount, down_rate) =
        resolve_share("down_amount", discounted_price, down_amount, down_rate)?;
    let loan_amount = discounted_price
        .checked_sub(down_amount)
        .ok_or_else(|| too_large("loan_amount", discounted_price))?;

    debug!(
        "normalized price {price}: discount {discount_amount} ({discount_rate}%), \
         down {down_amount} ({down_rate}%), loan {loan_amount}"
    );

    Ok(NormalizedPrincipal {
        discounted_price,
        discount_amount,
        discount_rate,
        down_amount,
        down_rate,
        loan_amount,
    })
}
