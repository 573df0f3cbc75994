use std::{collections::HashMap, fmt};

use fractic_server_error::ServerError;
use tracing::{debug, warn};

use crate::{
    domain::{entities::line_item::total, logic::category_flattener::CategoryFlattener},
    entities::{
        FinancialStatements, FlowGraph, FlowLink, FlowNode, FlowTotals, LineItem, NodeCategory,
        NodeLinkHandler, StatementKind, Subcategory, COSTS, PROFIT, TOTAL_ASSETS, TOTAL_REVENUE,
    },
    errors::{DuplicateNode, MissingField, UnknownNode},
};

const AGGREGATE_PATH: &str = "aggregate";

/// Lookup key for a node. Combines the source path with the display name, so
/// line items from different subsections never alias each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NodeKey {
    path: &'static str,
    name: String,
}

impl NodeKey {
    fn item(item: &LineItem) -> Self {
        Self {
            path: item.path,
            name: item.name.clone(),
        }
    }

    fn aggregate(name: &str) -> Self {
        Self {
            path: AGGREGATE_PATH,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.name)
    }
}

/// Insertion-ordered node storage, addressed by index.
struct NodeArena {
    nodes: Vec<FlowNode>,
    by_key: HashMap<NodeKey, usize>,
    by_name: HashMap<String, usize>,
}

impl NodeArena {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            by_key: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Rejects both key and display-name collisions; existing nodes are never
    /// overwritten.
    fn insert(&mut self, key: NodeKey, node: FlowNode) -> Result<usize, ServerError> {
        if self.by_key.contains_key(&key) || self.by_name.contains_key(&node.name) {
            return Err(DuplicateNode::new(&node.name, key.path));
        }
        let index = self.nodes.len();
        self.by_key.insert(key, index);
        self.by_name.insert(node.name.clone(), index);
        self.nodes.push(node);
        Ok(index)
    }

    fn insert_items<'a>(
        &mut self,
        items: impl IntoIterator<Item = &'a LineItem>,
    ) -> Result<(), ServerError> {
        for item in items {
            self.insert(NodeKey::item(item), item_node(item))?;
        }
        Ok(())
    }

    fn index(&self, key: &NodeKey) -> Result<usize, ServerError> {
        self.by_key
            .get(key)
            .copied()
            .ok_or_else(|| UnknownNode::new(&key.to_string()))
    }

    fn link(&self, source: &NodeKey, target: &NodeKey, value: f64) -> Result<FlowLink, ServerError> {
        Ok(FlowLink {
            source: self.index(source)?,
            target: self.index(target)?,
            value,
        })
    }
}

fn item_node(item: &LineItem) -> FlowNode {
    FlowNode {
        name: item.name.clone(),
        value: item.value,
        category: item.item_type.into(),
        subcategory: item.subcategory,
        link: None,
    }
}

fn aggregate_node(name: &str, value: f64, category: NodeCategory) -> FlowNode {
    FlowNode {
        name: name.to_string(),
        value,
        category,
        subcategory: None,
        link: None,
    }
}

fn in_subcategory(
    items: &[LineItem],
    subcategory: Subcategory,
) -> impl Iterator<Item = &LineItem> {
    items
        .iter()
        .filter(move |item| item.subcategory == Some(subcategory))
}

/// Builds the Sankey flow graph for one statement kind. Every call produces a
/// fresh graph; nothing is shared between builds.
pub(crate) struct GraphBuilder<'a> {
    statements: &'a FinancialStatements,
    link_handler: Option<&'a dyn NodeLinkHandler>,
}

impl<'a> GraphBuilder<'a> {
    pub(crate) fn new(statements: &'a FinancialStatements) -> Self {
        Self {
            statements,
            link_handler: None,
        }
    }

    pub(crate) fn with_link_handler(mut self, handler: &'a dyn NodeLinkHandler) -> Self {
        self.link_handler = Some(handler);
        self
    }

    pub(crate) fn build(self, kind: StatementKind) -> Result<FlowGraph, ServerError> {
        let mut graph = match kind {
            StatementKind::IncomeStatement => self.build_income_statement()?,
            StatementKind::BalanceSheet => self.build_balance_sheet()?,
        };
        if let Some(handler) = self.link_handler {
            for node in graph.nodes.iter_mut() {
                node.link = handler.link(node);
            }
        }
        debug!(
            kind = %kind,
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            "built flow graph"
        );
        Ok(graph)
    }

    /// income items -> Total Revenue -> Costs / Profit -> expense items.
    fn build_income_statement(&self) -> Result<FlowGraph, ServerError> {
        let statement = self
            .statements
            .income_statement
            .as_ref()
            .ok_or_else(|| MissingField::new("income_statement"))?;
        let flattened = CategoryFlattener::flatten_income_statement(statement);

        let total_revenue = total(&flattened.income);
        let total_expenses = total(&flattened.expenses);
        let profit = total_revenue - total_expenses;

        let total_revenue_key = NodeKey::aggregate(TOTAL_REVENUE);
        let costs_key = NodeKey::aggregate(COSTS);
        let profit_key = NodeKey::aggregate(PROFIT);

        // Nodes.
        let mut arena = NodeArena::new();
        arena.insert_items(in_subcategory(&flattened.income, Subcategory::Operating))?;
        arena.insert_items(in_subcategory(&flattened.income, Subcategory::NonOperating))?;
        arena.insert(
            total_revenue_key.clone(),
            aggregate_node(TOTAL_REVENUE, total_revenue, NodeCategory::Total),
        )?;
        arena.insert(
            costs_key.clone(),
            aggregate_node(COSTS, total_expenses, NodeCategory::Expense),
        )?;
        arena.insert(
            profit_key.clone(),
            aggregate_node(PROFIT, profit.max(0.0), NodeCategory::Profit),
        )?;
        arena.insert_items(in_subcategory(&flattened.expenses, Subcategory::Operating))?;
        arena.insert_items(in_subcategory(&flattened.expenses, Subcategory::NonOperating))?;

        // Links.
        let mut links = Vec::new();
        for item in &flattened.income {
            links.push(arena.link(&NodeKey::item(item), &total_revenue_key, item.value)?);
        }
        links.push(arena.link(&total_revenue_key, &costs_key, total_expenses)?);
        // The Profit node stays (at zero) even when no profit flows into it.
        if profit > 0.0 {
            links.push(arena.link(&total_revenue_key, &profit_key, profit)?);
        }
        for item in &flattened.expenses {
            links.push(arena.link(&costs_key, &NodeKey::item(item), item.value)?);
        }

        Ok(FlowGraph {
            kind: StatementKind::IncomeStatement,
            nodes: arena.nodes,
            links,
            totals: FlowTotals::Income {
                total_revenue,
                total_expenses,
                profit,
            },
        })
    }

    /// liabilities / equity -> Total Assets -> asset items.
    fn build_balance_sheet(&self) -> Result<FlowGraph, ServerError> {
        let sheet = self
            .statements
            .balance_sheet
            .as_ref()
            .ok_or_else(|| MissingField::new("balance_sheet"))?;
        let flattened = CategoryFlattener::flatten_balance_sheet(sheet);

        let total_assets = total(&flattened.assets);
        let total_liabilities = total(&flattened.liabilities);
        let total_equity = total(&flattened.equity);

        let total_assets_key = NodeKey::aggregate(TOTAL_ASSETS);

        // Nodes.
        let mut arena = NodeArena::new();
        arena.insert_items(in_subcategory(&flattened.liabilities, Subcategory::Current))?;
        arena.insert_items(in_subcategory(&flattened.liabilities, Subcategory::NonCurrent))?;
        arena.insert_items(&flattened.equity)?;
        arena.insert(
            total_assets_key.clone(),
            aggregate_node(TOTAL_ASSETS, total_assets, NodeCategory::Total),
        )?;
        arena.insert_items(in_subcategory(&flattened.assets, Subcategory::Current))?;
        arena.insert_items(in_subcategory(&flattened.assets, Subcategory::NonCurrent))?;

        // Links.
        let mut links = Vec::new();
        for item in flattened.liabilities.iter().chain(&flattened.equity) {
            links.push(arena.link(&NodeKey::item(item), &total_assets_key, item.value)?);
        }
        for item in &flattened.assets {
            links.push(arena.link(&total_assets_key, &NodeKey::item(item), item.value)?);
        }

        let graph = FlowGraph {
            kind: StatementKind::BalanceSheet,
            nodes: arena.nodes,
            links,
            totals: FlowTotals::BalanceSheet {
                total_assets,
                total_liabilities,
                total_equity,
            },
        };
        if let Some(imbalance) = graph.significant_imbalance() {
            warn!(
                total_assets,
                total_liabilities,
                total_equity,
                imbalance,
                "balance sheet does not balance; flows into Total Assets differ from its value"
            );
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        BalanceSheet, IncomeStatement, MaturitySplit, OperatingSplit, StatementEntry,
    };

    fn entries(items: &[(&str, f64)]) -> Vec<StatementEntry> {
        items
            .iter()
            .map(|(name, value)| StatementEntry::new(*name, *value))
            .collect()
    }

    fn income_statements(expenses_operating: &[(&str, f64)]) -> FinancialStatements {
        FinancialStatements {
            balance_sheet: None,
            income_statement: Some(IncomeStatement {
                revenue: OperatingSplit {
                    operating: entries(&[("Sales", 5000.0), ("Service", 3000.0)]),
                    non_operating: entries(&[("Interest", 500.0)]),
                },
                expenses: OperatingSplit {
                    operating: entries(expenses_operating),
                    non_operating: entries(&[("InterestExp", 500.0)]),
                },
            }),
        }
    }

    fn balance_statements() -> FinancialStatements {
        FinancialStatements {
            balance_sheet: Some(BalanceSheet {
                assets: MaturitySplit {
                    current: entries(&[("Cash", 4000.0), ("AR", 2000.0)]),
                    non_current: entries(&[("Property", 5000.0), ("Equipment", 2000.0)]),
                },
                liabilities: MaturitySplit {
                    current: entries(&[("AP", 2000.0), ("STD", 1000.0)]),
                    non_current: entries(&[("LTD", 3000.0)]),
                },
                equity: entries(&[("Common", 5000.0), ("Retained", 3000.0)]),
            }),
            income_statement: None,
        }
    }

    fn names(graph: &FlowGraph) -> Vec<&str> {
        graph.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn income_statement_node_order() {
        let statements = income_statements(&[("COGS", 4000.0), ("Salaries", 2000.0)]);
        let graph = GraphBuilder::new(&statements)
            .build(StatementKind::IncomeStatement)
            .unwrap();
        assert_eq!(
            names(&graph),
            vec![
                "Sales",
                "Service",
                "Interest",
                TOTAL_REVENUE,
                COSTS,
                PROFIT,
                "COGS",
                "Salaries",
                "InterestExp"
            ]
        );
    }

    #[test]
    fn income_statement_with_profit() {
        let statements = income_statements(&[("COGS", 4000.0), ("Salaries", 2000.0)]);
        let graph = GraphBuilder::new(&statements)
            .build(StatementKind::IncomeStatement)
            .unwrap();

        assert_eq!(graph.node(TOTAL_REVENUE).unwrap().1.value, 8500.0);
        assert_eq!(graph.node(COSTS).unwrap().1.value, 6500.0);
        assert_eq!(graph.node(PROFIT).unwrap().1.value, 2000.0);
        assert_eq!(graph.total_into(TOTAL_REVENUE), 8500.0);
        assert_eq!(graph.total_into(PROFIT), 2000.0);
        assert_eq!(graph.total_out_of(COSTS), 6500.0);
        assert_eq!(graph.links.len(), 3 + 2 + 3);
    }

    #[test]
    fn income_statement_with_loss_omits_profit_link() {
        let statements = income_statements(&[("COGS", 6500.0), ("Salaries", 2000.0)]);
        let graph = GraphBuilder::new(&statements)
            .build(StatementKind::IncomeStatement)
            .unwrap();

        assert_eq!(graph.node(COSTS).unwrap().1.value, 9000.0);
        assert_eq!(graph.node(PROFIT).unwrap().1.value, 0.0);
        assert!(graph.links_into(PROFIT).is_empty());
        assert_eq!(
            graph.totals,
            FlowTotals::Income {
                total_revenue: 8500.0,
                total_expenses: 9000.0,
                profit: -500.0,
            }
        );
    }

    #[test]
    fn income_statement_with_zero_profit_omits_profit_link() {
        let statements = income_statements(&[("COGS", 6000.0), ("Salaries", 2000.0)]);
        let graph = GraphBuilder::new(&statements)
            .build(StatementKind::IncomeStatement)
            .unwrap();

        assert_eq!(graph.node(PROFIT).unwrap().1.value, 0.0);
        assert!(graph.links_into(PROFIT).is_empty());
    }

    #[test]
    fn balance_sheet_topology() {
        let statements = balance_statements();
        let graph = GraphBuilder::new(&statements)
            .build(StatementKind::BalanceSheet)
            .unwrap();

        assert_eq!(
            names(&graph),
            vec![
                "AP",
                "STD",
                "LTD",
                "Common",
                "Retained",
                TOTAL_ASSETS,
                "Cash",
                "AR",
                "Property",
                "Equipment"
            ]
        );
        assert_eq!(graph.node(TOTAL_ASSETS).unwrap().1.value, 13000.0);
        assert_eq!(graph.links_into(TOTAL_ASSETS).len(), 5);
        assert_eq!(graph.total_into(TOTAL_ASSETS), 14000.0);
        assert_eq!(graph.links_out_of(TOTAL_ASSETS).len(), 4);
        assert_eq!(graph.total_out_of(TOTAL_ASSETS), 13000.0);
        assert_eq!(graph.imbalance(), Some(1000.0));
    }

    #[test]
    fn builds_are_idempotent() {
        let statements = balance_statements();
        let first = GraphBuilder::new(&statements)
            .build(StatementKind::BalanceSheet)
            .unwrap();
        let second = GraphBuilder::new(&statements)
            .build(StatementKind::BalanceSheet)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_section_fails() {
        let statements = balance_statements();
        assert!(GraphBuilder::new(&statements)
            .build(StatementKind::IncomeStatement)
            .is_err());
    }

    #[test]
    fn duplicate_names_fail_loudly() {
        let mut statements = balance_statements();
        if let Some(sheet) = statements.balance_sheet.as_mut() {
            sheet.assets.non_current.push(StatementEntry::new("Cash", 1.0));
        }
        assert!(GraphBuilder::new(&statements)
            .build(StatementKind::BalanceSheet)
            .is_err());
    }

    #[test]
    fn line_item_named_like_an_aggregate_fails() {
        let statements = income_statements(&[("Profit", 10.0)]);
        assert!(GraphBuilder::new(&statements)
            .build(StatementKind::IncomeStatement)
            .is_err());
    }

    #[test]
    fn link_handler_fills_node_links() {
        let statements = balance_statements();
        let handler = |node: &FlowNode| {
            (node.category == NodeCategory::Total)
                .then(|| format!("https://example.com/{}", node.name.replace(' ', "-")))
        };
        let graph = GraphBuilder::new(&statements)
            .with_link_handler(&handler)
            .build(StatementKind::BalanceSheet)
            .unwrap();

        assert_eq!(
            graph.node(TOTAL_ASSETS).unwrap().1.link.as_deref(),
            Some("https://example.com/Total-Assets")
        );
        assert_eq!(graph.node("Cash").unwrap().1.link, None);
    }
}
