//! `vehicle_financing` is a Rust library for calculating vehicle financing terms.
//!
//! Given a price, a discount, a down payment, an interest rate and a term, it derives the
//! financed amount and builds a repayment plan under one of two interest models:
//! - **Add-on (flat)**: interest is charged once on the original principal for the whole
//!   term and the total is split into equal monthly payments.
//! - **Effective (amortizing)**: interest compounds monthly on the declining balance and
//!   payments follow the level-payment annuity formula.
//!
//! Discounts and down payments may be given as an absolute amount or as a percentage.
//! A positive amount takes precedence and the percentage is back-computed from it.
//!
//! ## Usage
//!
//! ```rust
//! use vehicle_financing::{compute_financing, FinancingInput, InterestModel};
//! use rust_decimal_macros::dec;
//!
//! let input = FinancingInput {
//!     price: dec!(100_000),
//!     discount_rate: dec!(10),
//!     down_rate: dec!(20),
//!     interest_rate: dec!(12),
//!     term_years: 1,
//!     interest_model: InterestModel::AddOn,
//!     ..Default::default()
//! };
//!
//! match compute_financing(&input) {
//!     Ok(outcome) => {
//!         println!("Loan amount:     {:.2}", outcome.principal.loan_amount);
//!         println!("Monthly payment: {:.2}", outcome.summary.monthly_payment);
//!         println!("Total interest:  {:.2}", outcome.summary.total_interest);
//!     }
//!     Err(e) => {
//!         eprintln!("Error calculating financing: {}", e);
//!     }
//! }
//! ```
//!
//! All calculations are pure: no I/O and no shared state, so they can be called from any
//! number of threads at once.

pub mod error;
pub mod principal;
pub mod scenario;
pub mod schedule;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use error::{FinancingError, Result};
pub use principal::{NormalizedPrincipal, normalize};
pub use scenario::{
    AmortizationReport, AmortizationRequest, FinancingResult, FinancingScenario, compute_batch,
};
pub use schedule::{
    AmortizationRow, InterestModel, ScheduleSummary, addon_rows, addon_schedule, effective_rows,
    effective_schedule, monthly_rate,
};

use error::ensure_non_negative;

/// Input parameters for a financing calculation.
///
/// Missing fields deserialize to zero and the add-on model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingInput {
    /// Sticker price of the vehicle.
    pub price: Decimal,
    /// Absolute discount. Takes precedence over `discount_rate` when positive.
    pub discount_amount: Decimal,
    /// Discount as a percentage of `price` (e.g., 10 for 10%).
    pub discount_rate: Decimal,
    /// Absolute down payment. Takes precedence over `down_rate` when positive.
    pub down_amount: Decimal,
    /// Down payment as a percentage of the discounted price.
    pub down_rate: Decimal,
    /// Annual nominal interest rate as a percentage.
    pub interest_rate: Decimal,
    /// Term of the loan in whole years.
    #[serde(alias = "years")]
    pub term_years: u32,
    #[serde(alias = "interest_type")]
    pub interest_model: InterestModel,
}

/// Result of [`compute_financing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingOutcome {
    pub principal: NormalizedPrincipal,
    pub summary: ScheduleSummary,
    /// The model that actually produced `summary`.
    pub model_used: InterestModel,
}

/// Resolves the financed principal and the aggregate repayment totals.
///
/// # Errors
///
/// Returns [`FinancingError::InvalidInput`] if any amount, percentage or the interest rate
/// is negative, if the discount exceeds the price, if the down payment exceeds the
/// discounted price, or if an amount is too large to compute. A zero price, rate or term
/// is not an error; it yields zero/identity totals.
pub fn compute_financing(input: &FinancingInput) -> Result<FinancingOutcome> {
    ensure_non_negative("price", input.price)?;
    ensure_non_negative("discount_amount", input.discount_amount)?;
    ensure_non_negative("discount_rate", input.discount_rate)?;
    ensure_non_negative("down_amount", input.down_amount)?;
    ensure_non_negative("down_rate", input.down_rate)?;
    ensure_non_negative("interest_rate", input.interest_rate)?;

    let principal = normalize(
        input.price,
        input.discount_amount,
        input.discount_rate,
        input.down_amount,
        input.down_rate,
    )?;

    // Checked first: a negative discounted price can flip the sign of a rate-based
    // down payment and leave a positive loan amount.
    if principal.discounted_price < Decimal::ZERO {
        return Err(FinancingError::InvalidInput {
            field: "discounted_price",
            value: principal.discounted_price,
            reason: "discount exceeds the price",
        });
    }

    if principal.loan_amount < Decimal::ZERO {
        return Err(FinancingError::InvalidInput {
            field: "loan_amount",
            value: principal.loan_amount,
            reason: "down payment exceeds the discounted price",
        });
    }

    let model_used = input.interest_model;
    let summary =
        model_used.summary(principal.loan_amount, input.interest_rate, input.term_years)?;
    debug!(
        "{model_used} financing of {} over {} months: {} per month",
        principal.loan_amount, summary.months, summary.monthly_payment
    );

    Ok(FinancingOutcome {
        principal,
        summary,
        model_used,
    })
}

/// Builds the month-by-month schedule for an already-resolved principal.
///
/// Returns one row per month in `1..=months`; a zero-month term yields no rows.
///
/// # Errors
///
/// Returns [`FinancingError::InvalidInput`] for a negative principal or interest rate, or
/// when the payments are too large to compute.
pub fn compute_amortization(
    loan_amount: Decimal,
    annual_rate: Decimal,
    months: u32,
    model: InterestModel,
) -> Result<Vec<AmortizationRow>> {
    ensure_non_negative("loan_amount", loan_amount)?;
    ensure_non_negative("interest_rate", annual_rate)?;

    model.rows(loan_amount, annual_rate, months)
}
