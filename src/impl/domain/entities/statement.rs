use std::{fmt, str::FromStr};

use fractic_server_error::ServerError;
use serde_derive::{Deserialize, Serialize};

use crate::errors::InvalidStatementKind;

/// A single `{name, value}` leaf of a statement subsection, as extracted from
/// the source document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementEntry {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OperatingSplit {
    pub operating: Vec<StatementEntry>,
    pub non_operating: Vec<StatementEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MaturitySplit {
    pub current: Vec<StatementEntry>,
    pub non_current: Vec<StatementEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IncomeStatement {
    pub revenue: OperatingSplit,
    pub expenses: OperatingSplit,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BalanceSheet {
    pub assets: MaturitySplit,
    pub liabilities: MaturitySplit,
    pub equity: Vec<StatementEntry>,
}

/// Statements extracted from one document. Either section may be absent if the
/// document only contains one of them; operations requiring a missing section
/// fail with `MissingField`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FinancialStatements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_sheet: Option<BalanceSheet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_statement: Option<IncomeStatement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementKind {
    IncomeStatement,
    BalanceSheet,
}

// --

impl StatementEntry {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::IncomeStatement => "income-statement",
            StatementKind::BalanceSheet => "balance-sheet",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatementKind {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "income-statement" | "profit-and-loss" | "pnl" => Ok(StatementKind::IncomeStatement),
            "balance-sheet" => Ok(StatementKind::BalanceSheet),
            _ => Err(InvalidStatementKind::new(s)),
        }
    }
}
