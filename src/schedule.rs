//! Repayment plans for a financed principal under the add-on and effective models.
//!
//! Both models produce a [`ScheduleSummary`] (aggregate totals) and can be expanded
//! into one [`AmortizationRow`] per month. The expansions share one rule: the last
//! row absorbs whatever balance is left, so a schedule always retires the loan
//! exactly regardless of rounding in the earlier rows.

use std::fmt;

use log::{debug, trace};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, too_large};

/// Interest model used to turn a principal into a repayment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterestModel {
    /// Flat interest charged once on the original principal for the whole term.
    #[default]
    AddOn,
    /// Interest compounded monthly on the declining balance (level payment annuity).
    Effective,
}

impl InterestModel {
    /// Parses a model tag. Anything other than `"effective"` falls back to
    /// [`InterestModel::AddOn`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "effective" => InterestModel::Effective,
            "addon" => InterestModel::AddOn,
            other => {
                debug!("unknown interest model tag {other:?}, falling back to addon");
                InterestModel::AddOn
            }
        }
    }

    /// The canonical tag, echoed back in results so callers can see which model ran.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestModel::AddOn => "addon",
            InterestModel::Effective => "effective",
        }
    }

    /// Aggregate totals for a term expressed in whole years.
    pub fn summary(
        &self,
        loan_amount: Decimal,
        annual_rate: Decimal,
        term_years: u32,
    ) -> Result<ScheduleSummary> {
        match self {
            InterestModel::AddOn => addon_schedule(loan_amount, annual_rate, term_years),
            InterestModel::Effective => effective_schedule(loan_amount, annual_rate, term_years),
        }
    }

    /// Month-by-month breakdown for a term expressed in months.
    pub fn rows(
        &self,
        loan_amount: Decimal,
        annual_rate: Decimal,
        months: u32,
    ) -> Result<Vec<AmortizationRow>> {
        match self {
            InterestModel::AddOn => addon_rows(loan_amount, annual_rate, months),
            InterestModel::Effective => effective_rows(loan_amount, annual_rate, months),
        }
    }
}

impl fmt::Display for InterestModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for InterestModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InterestModel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(InterestModel::from_tag(&tag))
    }
}

/// Aggregate totals of a repayment plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Number of monthly payments.
    pub months: u32,
    /// Payment due each month (zero for a zero-length term).
    pub monthly_payment: Decimal,
    /// Interest paid over the whole term.
    pub total_interest: Decimal,
    /// Principal plus interest.
    pub total_amount: Decimal,
}

/// One month of an amortization schedule. Every amount is clamped to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based month number.
    pub period: u32,
    /// Balance outstanding before this month's payment.
    pub opening_balance: Decimal,
    /// Portion of the payment that covers interest.
    pub interest_portion: Decimal,
    /// Portion of the payment that reduces the balance.
    pub principal_portion: Decimal,
    /// Total paid this month.
    pub payment: Decimal,
}

impl AmortizationRow {
    fn clamped(
        period: u32,
        opening_balance: Decimal,
        interest_portion: Decimal,
        principal_portion: Decimal,
        payment: Decimal,
    ) -> Self {
        Self {
            period,
            opening_balance: opening_balance.max(Decimal::ZERO),
            interest_portion: interest_portion.max(Decimal::ZERO),
            principal_portion: principal_portion.max(Decimal::ZERO),
            payment: payment.max(Decimal::ZERO),
        }
    }
}

fn months_for_years(term_years: u32) -> u32 {
    term_years.saturating_mul(12)
}

/// Converts an annual nominal percentage (e.g. `12` for 12%) into the monthly periodic rate.
pub fn monthly_rate(annual_rate: Decimal) -> Decimal {
    annual_rate / dec!(100) / dec!(12)
}

/// Add-on totals for `months` payments. `months` need not be a multiple of 12;
/// interest is charged for `months / 12` (possibly fractional) years.
fn addon_totals(
    loan_amount: Decimal,
    annual_rate: Decimal,
    months: u32,
) -> Result<ScheduleSummary> {
    let overflow = || too_large("loan_amount", loan_amount);

    let years = Decimal::from(months) / dec!(12);
    let total_interest = loan_amount
        .checked_mul(annual_rate / dec!(100))
        .and_then(|yearly| yearly.checked_mul(years))
        .ok_or_else(overflow)?;
    let total_amount = loan_amount.checked_add(total_interest).ok_or_else(overflow)?;
    let monthly_payment = if months == 0 {
        Decimal::ZERO
    } else {
        total_amount / Decimal::from(months)
    };

    Ok(ScheduleSummary {
        months,
        monthly_payment,
        total_interest,
        total_amount,
    })
}

/// Calculates the add-on (flat) plan.
///
/// Total interest is simple interest on the original principal for the whole term:
/// `loan_amount * rate / 100 * years`. Principal plus interest is split into equal
/// monthly payments. A zero-year term yields a zero monthly payment.
///
/// # Arguments
///
/// * `loan_amount` - The financed principal.
/// * `annual_rate` - The annual nominal interest rate as a percentage (e.g., 12 for 12%).
/// * `term_years` - The term of the loan in whole years.
///
/// # Errors
///
/// Returns [`crate::FinancingError::InvalidInput`] if the totals do not fit a `Decimal`.
pub fn addon_schedule(
    loan_amount: Decimal,
    annual_rate: Decimal,
    term_years: u32,
) -> Result<ScheduleSummary> {
    addon_totals(loan_amount, annual_rate, months_for_years(term_years))
}

/// Expands the add-on plan month by month.
///
/// Each month carries the same interest charge, `loan_amount * rate / 100 / 12`, and
/// the same principal share, `monthly_payment - interest`. The opening balance
/// declines linearly from `loan_amount`.
///
/// # Arguments
///
/// * `loan_amount` - The financed principal.
/// * `annual_rate` - The annual nominal interest rate as a percentage.
/// * `months` - The number of monthly payments; need not be a multiple of 12.
///
/// # Errors
///
/// Returns [`crate::FinancingError::InvalidInput`] if the totals do not fit a `Decimal`.
pub fn addon_rows(
    loan_amount: Decimal,
    annual_rate: Decimal,
    months: u32,
) -> Result<Vec<AmortizationRow>> {
    let summary = addon_totals(loan_amount, annual_rate, months)?;
    // Bounded by the total interest checked above.
    let interest = loan_amount * (annual_rate / dec!(100)) / dec!(12);
    let principal_per_month = summary.monthly_payment - interest;

    let mut rows = Vec::with_capacity(months as usize);
    for period in 1..=months {
        let opening_balance =
            (loan_amount - principal_per_month * Decimal::from(period - 1)).max(Decimal::ZERO);

        // The final month retires exactly what is left.
        let principal = if period == months {
            opening_balance
        } else {
            principal_per_month
        };
        let payment = principal + interest;

        trace!(
            "addon month {period}: balance {opening_balance}, interest {interest}, \
             principal {principal}"
        );
        rows.push(AmortizationRow::clamped(
            period,
            opening_balance,
            interest,
            principal,
            payment,
        ));
    }

    Ok(rows)
}

/// Level payment for `months` payments at monthly periodic rate `rate`.
///
/// `loan_amount * r / (1 - (1 + r)^-n)`, or straight-line `loan_amount / n` when `r` is zero.
///
/// # Arguments
///
/// * `loan_amount` - The financed principal.
/// * `rate` - The monthly periodic rate as a decimal (not percentage).
/// * `months` - The number of payments; must be non-zero.
fn level_payment(loan_amount: Decimal, rate: Decimal, months: u32) -> Result<Decimal> {
    if rate.is_zero() {
        return Ok(loan_amount / Decimal::from(months));
    }

    // (1 + r)^-n underflows to zero when (1 + r)^n no longer fits a Decimal.
    let discount = match (dec!(1) + rate).checked_powu(months.into()) {
        Some(growth) if !growth.is_zero() => dec!(1) / growth,
        _ => Decimal::ZERO,
    };

    loan_amount
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(dec!(1) - discount))
        .ok_or_else(|| too_large("loan_amount", loan_amount))
}

fn effective_totals(
    loan_amount: Decimal,
    annual_rate: Decimal,
    months: u32,
) -> Result<ScheduleSummary> {
    if months == 0 {
        return Ok(ScheduleSummary {
            months: 0,
            monthly_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_amount: loan_amount,
        });
    }

    let monthly_payment = level_payment(loan_amount, monthly_rate(annual_rate), months)?;
    let total_amount = monthly_payment
        .checked_mul(Decimal::from(months))
        .ok_or_else(|| too_large("loan_amount", loan_amount))?;

    Ok(ScheduleSummary {
        months,
        monthly_payment,
        total_interest: total_amount - loan_amount,
        total_amount,
    })
}

/// Calculates the effective (amortizing) plan with monthly compounding.
///
/// A zero-year term returns `monthly_payment = 0`, `total_interest = 0` and
/// `total_amount = loan_amount`. `total_amount` is always `monthly_payment * months`.
///
/// # Arguments
///
/// * `loan_amount` - The financed principal.
/// * `annual_rate` - The annual nominal interest rate as a percentage, compounded monthly.
/// * `term_years` - The term of the loan in whole years.
///
/// # Errors
///
/// Returns [`crate::FinancingError::InvalidInput`] if the totals do not fit a `Decimal`.
pub fn effective_schedule(
    loan_amount: Decimal,
    annual_rate: Decimal,
    term_years: u32,
) -> Result<ScheduleSummary> {
    effective_totals(loan_amount, annual_rate, months_for_years(term_years))
}

/// Expands the effective plan by walking the declining balance.
///
/// # Arguments
///
/// * `loan_amount` - The financed principal.
/// * `annual_rate` - The annual nominal interest rate as a percentage, compounded monthly.
/// * `months` - The number of monthly payments. Zero yields no rows.
///
/// # Errors
///
/// Returns [`crate::FinancingError::InvalidInput`] if the level payment does not fit a
/// `Decimal`.
pub fn effective_rows(
    loan_amount: Decimal,
    annual_rate: Decimal,
    months: u32,
) -> Result<Vec<AmortizationRow>> {
    if months == 0 {
        return Ok(Vec::new());
    }

    let rate = monthly_rate(annual_rate);
    let level = level_payment(loan_amount, rate, months)?;

    // Balance never exceeds `loan_amount`, so every product stays below `level`.
    let mut balance = loan_amount;
    let mut rows = Vec::with_capacity(months as usize);
    for period in 1..=months {
        let interest = balance * rate;
        let (principal, payment) = if period == months {
            // The final month retires exactly what is left.
            (balance, balance + interest)
        } else {
            (level - interest, level)
        };

        trace!(
            "effective month {period}: balance {balance}, interest {interest}, \
             principal {principal}"
        );
        rows.push(AmortizationRow::clamped(period, balance, interest, principal, payment));
        balance -= principal;
    }

    Ok(rows)
}
