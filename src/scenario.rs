//! Request and result records for batches of named scenarios and for schedule requests.
//!
//! Missing fields deserialize to zero (and the add-on model), matching what a
//! web form leaves empty. Values that fail to parse are a deserialization error
//! for the caller to handle.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schedule::{AmortizationRow, InterestModel};
use crate::{FinancingInput, compute_amortization, compute_financing};

/// A financing input labelled with the vehicle it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingScenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub input: FinancingInput,
}

/// Every resolved figure of one scenario, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingResult {
    pub name: Option<String>,
    pub original_price: Decimal,
    pub discount_amount: Decimal,
    pub discount_rate: Decimal,
    pub discounted_price: Decimal,
    pub down_amount: Decimal,
    pub down_rate: Decimal,
    pub interest_rate: Decimal,
    pub interest_model: InterestModel,
    pub loan_amount: Decimal,
    pub total_interest: Decimal,
    pub total_amount: Decimal,
    pub monthly_payment: Decimal,
    pub months: u32,
    pub years: u32,
}

impl FinancingScenario {
    /// Scenarios without a price or a term are left out of a batch.
    pub fn is_blank(&self) -> bool {
        self.input.price <= Decimal::ZERO || self.input.term_years == 0
    }

    pub fn evaluate(&self) -> Result<FinancingResult> {
        let outcome = compute_financing(&self.input)?;

        Ok(FinancingResult {
            name: self.name.clone(),
            original_price: self.input.price,
            discount_amount: outcome.principal.discount_amount,
            discount_rate: outcome.principal.discount_rate,
            discounted_price: outcome.principal.discounted_price,
            down_amount: outcome.principal.down_amount,
            down_rate: outcome.principal.down_rate,
            interest_rate: self.input.interest_rate,
            interest_model: outcome.model_used,
            loan_amount: outcome.principal.loan_amount,
            total_interest: outcome.summary.total_interest,
            total_amount: outcome.summary.total_amount,
            monthly_payment: outcome.summary.monthly_payment,
            months: outcome.summary.months,
            years: self.input.term_years,
        })
    }
}

/// Evaluates a batch of scenarios in order, skipping blank ones.
///
/// # Errors
///
/// Returns the first [`crate::FinancingError::InvalidInput`] raised by a non-blank scenario.
pub fn compute_batch(scenarios: &[FinancingScenario]) -> Result<Vec<FinancingResult>> {
    scenarios
        .iter()
        .enumerate()
        .filter(|(index, scenario)| {
            let blank = scenario.is_blank();
            if blank {
                debug!("skipping scenario #{} ({:?}): no price or term", index + 1, scenario.name);
            }
            !blank
        })
        .map(|(_, scenario)| scenario.evaluate())
        .collect()
}

/// Request for a full month-by-month table on an already-resolved principal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmortizationRequest {
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub months: u32,
    #[serde(alias = "interest_type")]
    pub interest_model: InterestModel,
}

/// Rows of a schedule, wrapped for transport.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AmortizationReport {
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationRequest {
    /// Builds the table, or an empty one when there is no term or nothing is financed.
    pub fn schedule(&self) -> Result<AmortizationReport> {
        if self.months == 0 || self.loan_amount <= Decimal::ZERO {
            return Ok(AmortizationReport::default());
        }

        let rows = compute_amortization(
            self.loan_amount,
            self.interest_rate,
            self.months,
            self.interest_model,
        )?;
        Ok(AmortizationReport { rows })
    }
}
