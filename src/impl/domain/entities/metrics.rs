use std::fmt;

use fractic_server_error::ServerError;
use serde_derive::{Deserialize, Serialize};

use crate::errors::UndefinedRatio;

/// Rates assumed by the metrics calculation. They are not derived from the
/// statement data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateAssumptions {
    pub cost_of_equity: f64,
    pub cost_of_debt: f64,
    pub tax_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndefinedReason {
    ZeroEquity,
    ZeroCapital,
}

/// A ratio that may have a zero denominator. Denominators within
/// `ZERO_TOLERANCE` of zero, and quotients that overflow, are `Undefined`, so a
/// `Defined` value is always finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Defined(f64),
    Undefined(UndefinedReason),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialMetrics {
    pub wacc: Ratio,
    pub cost_of_debt: f64,
    pub tax_rate: f64,
    pub debt_to_equity: Ratio,
    pub profit: f64,
}

/// Metric a free-text query resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricTopic {
    Wacc,
    DebtToEquity,
    TaxRate,
    Profit,
    CostOfDebt,
    Help,
}

// --

impl Default for RateAssumptions {
    fn default() -> Self {
        Self {
            cost_of_equity: 0.10,
            cost_of_debt: 0.05,
            tax_rate: 0.30,
        }
    }
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndefinedReason::ZeroEquity => f.write_str("total equity is zero"),
            UndefinedReason::ZeroCapital => f.write_str("total capital is zero"),
        }
    }
}

/// Totals closer to zero than half a cent are treated as zero.
pub const ZERO_TOLERANCE: f64 = 0.005;

impl Ratio {
    pub(crate) fn divide(numerator: f64, denominator: f64, reason: UndefinedReason) -> Self {
        if denominator.is_nan() || denominator.abs() < ZERO_TOLERANCE {
            return Ratio::Undefined(reason);
        }
        let quotient = numerator / denominator;
        if quotient.is_finite() {
            Ratio::Defined(quotient)
        } else {
            Ratio::Undefined(reason)
        }
    }

    pub fn as_option(&self) -> Option<f64> {
        match self {
            Ratio::Defined(v) => Some(*v),
            Ratio::Undefined(_) => None,
        }
    }

    /// Value of the ratio, or an `UndefinedRatio` error naming it.
    pub fn value(&self, ratio_name: &str) -> Result<f64, ServerError> {
        match self {
            Ratio::Defined(v) => Ok(*v),
            Ratio::Undefined(reason) => Err(UndefinedRatio::new(ratio_name, &reason.to_string())),
        }
    }
}

impl MetricTopic {
    /// Case-insensitive keyword match. Rules are checked in a fixed order and
    /// the first match wins.
    pub fn classify(query: &str) -> Self {
        let query = query.to_lowercase();
        if query.contains("wacc") {
            MetricTopic::Wacc
        } else if query.contains("debt") && query.contains("equity") {
            MetricTopic::DebtToEquity
        } else if query.contains("tax") {
            MetricTopic::TaxRate
        } else if query.contains("profit") {
            MetricTopic::Profit
        } else if query.contains("cost of debt") {
            MetricTopic::CostOfDebt
        } else {
            MetricTopic::Help
        }
    }
}
