use serde_derive::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemType {
    Income,
    Expense,
    Asset,
    Liability,
    Equity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subcategory {
    Operating,
    NonOperating,
    Current,
    NonCurrent,
}

/// A named amount from one statement subsection, tagged with where it came
/// from.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub value: f64,
    pub item_type: LineItemType,
    pub subcategory: Option<Subcategory>,
    /// Dotted path of the source subsection (ex.
    /// `income_statement.revenue.operating`).
    pub path: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedIncomeStatement {
    pub income: Vec<LineItem>,
    pub expenses: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedBalanceSheet {
    pub assets: Vec<LineItem>,
    pub liabilities: Vec<LineItem>,
    pub equity: Vec<LineItem>,
}

// --

impl Subcategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subcategory::Operating => "operating",
            Subcategory::NonOperating => "non_operating",
            Subcategory::Current => "current",
            Subcategory::NonCurrent => "non_current",
        }
    }
}

pub(crate) fn total(items: &[LineItem]) -> f64 {
    items.iter().map(|item| item.value).sum()
}
