use serde_derive::Serialize;

use super::{
    line_item::{LineItemType, Subcategory},
    statement::StatementKind,
};

pub const TOTAL_REVENUE: &str = "Total Revenue";
pub const COSTS: &str = "Costs";
pub const PROFIT: &str = "Profit";
pub const TOTAL_ASSETS: &str = "Total Assets";

/// Balance-sheet imbalances below half a cent are summation noise.
pub const IMBALANCE_TOLERANCE: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    Income,
    Expense,
    Asset,
    Liability,
    Equity,
    Total,
    Profit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub name: String,
    pub value: f64,
    pub category: NodeCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<Subcategory>,
    /// Optional resource URL; render targets treat nodes with a link as
    /// clickable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Weighted edge between two nodes, addressed by their index in
/// `FlowGraph::nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowTotals {
    Income {
        total_revenue: f64,
        total_expenses: f64,
        /// Unclamped; may be negative even though the `Profit` node is not.
        profit: f64,
    },
    BalanceSheet {
        total_assets: f64,
        total_liabilities: f64,
        total_equity: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowGraph {
    pub kind: StatementKind,
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
    pub totals: FlowTotals,
}

// --

impl From<LineItemType> for NodeCategory {
    fn from(item_type: LineItemType) -> Self {
        match item_type {
            LineItemType::Income => NodeCategory::Income,
            LineItemType::Expense => NodeCategory::Expense,
            LineItemType::Asset => NodeCategory::Asset,
            LineItemType::Liability => NodeCategory::Liability,
            LineItemType::Equity => NodeCategory::Equity,
        }
    }
}

impl NodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Income => "income",
            NodeCategory::Expense => "expense",
            NodeCategory::Asset => "asset",
            NodeCategory::Liability => "liability",
            NodeCategory::Equity => "equity",
            NodeCategory::Total => "total",
            NodeCategory::Profit => "profit",
        }
    }
}

impl FlowGraph {
    pub fn node(&self, name: &str) -> Option<(usize, &FlowNode)> {
        self.nodes.iter().enumerate().find(|(_, n)| n.name == name)
    }

    pub fn links_into(&self, name: &str) -> Vec<&FlowLink> {
        match self.node(name) {
            Some((index, _)) => self.links.iter().filter(|l| l.target == index).collect(),
            None => Vec::new(),
        }
    }

    pub fn links_out_of(&self, name: &str) -> Vec<&FlowLink> {
        match self.node(name) {
            Some((index, _)) => self.links.iter().filter(|l| l.source == index).collect(),
            None => Vec::new(),
        }
    }

    pub fn total_into(&self, name: &str) -> f64 {
        self.links_into(name).iter().map(|l| l.value).sum()
    }

    pub fn total_out_of(&self, name: &str) -> f64 {
        self.links_out_of(name).iter().map(|l| l.value).sum()
    }

    /// For balance sheets, `(liabilities + equity) - assets`. Balance is never
    /// enforced, so this is informational only. Always `None` for income
    /// statements.
    pub fn imbalance(&self) -> Option<f64> {
        match self.totals {
            FlowTotals::Income { .. } => None,
            FlowTotals::BalanceSheet {
                total_assets,
                total_liabilities,
                total_equity,
            } => Some(total_liabilities + total_equity - total_assets),
        }
    }

    /// `imbalance()`, ignoring differences within `IMBALANCE_TOLERANCE`.
    pub fn significant_imbalance(&self) -> Option<f64> {
        self.imbalance()
            .filter(|imbalance| imbalance.abs() >= IMBALANCE_TOLERANCE)
    }
}
