use fractic_server_error::ServerError;
use serde_json::Value;
use tracing::warn;

use crate::errors::InvalidAmount;

/// Amount as found in extracted statement JSON. Extraction output is not always
/// numeric, so strings are accepted with currency symbols and thousands
/// separators, and accounting-style parentheses mark negative amounts.
#[derive(Debug)]
pub(crate) struct AmountModel(pub f64);

const PLACEHOLDERS: [&str; 4] = ["", "na", "n/a", "-"];

impl AmountModel {
    /// `path` identifies the amount in error messages and warnings.
    pub(crate) fn from_json(value: Option<&Value>, path: &str) -> Result<Self, ServerError> {
        match value {
            None | Some(Value::Null) => {
                warn!(path, "missing amount, defaulting to 0");
                Ok(AmountModel(0.0))
            }
            Some(Value::Number(n)) => n
                .as_f64()
                .map(AmountModel)
                .ok_or_else(|| InvalidAmount::new(path, &n.to_string())),
            Some(Value::String(s)) => Self::from_text(s, path),
            Some(other) => Err(InvalidAmount::new(path, &other.to_string())),
        }
    }

    fn from_text(s: &str, path: &str) -> Result<Self, ServerError> {
        let raw = s.replace(['$', ','], "");
        let trimmed = raw.trim();
        if PLACEHOLDERS.contains(&trimmed.to_lowercase().as_str()) {
            warn!(path, value = s, "placeholder amount, defaulting to 0");
            return Ok(AmountModel(0.0));
        }
        // Exactly one balanced pair of parentheses marks a negative amount.
        let (is_negative, numeric_part) =
            match trimmed.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
                Some(inner) => (true, inner.trim()),
                None => (false, trimmed),
            };
        let amount = Some(numeric_part)
            .filter(|n| !n.contains(['(', ')']))
            .and_then(|n| n.parse::<f64>().ok())
            .filter(|a| a.is_finite())
            .ok_or_else(|| InvalidAmount::new(path, s))?;
        Ok(AmountModel(if is_negative { -amount } else { amount }))
    }
}

impl From<AmountModel> for f64 {
    fn from(model: AmountModel) -> f64 {
        model.0
    }
}
