use crate::entities::{FlowGraph, FlowTotals};

use super::{palette::flow_node_color, utils::format_amount};

pub(crate) struct SummaryPrinter;

impl SummaryPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn print_summary(&self, graph: &FlowGraph) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "; --- {} {}\n\n",
            graph.kind,
            "-".repeat(74usize.saturating_sub(graph.kind.as_str().len()))
        ));
        output.push_str(
            "; --- Nodes --------------------------------------------------------------------\n\n",
        );
        self.print_nodes(&mut output, graph);
        output.push_str("\n\n");

        output.push_str(
            "; --- Links --------------------------------------------------------------------\n\n",
        );
        self.print_links(&mut output, graph);
        output.push_str("\n\n");

        output.push_str(
            "; --- Totals -------------------------------------------------------------------\n\n",
        );
        self.print_totals(&mut output, graph);

        output
    }

    fn print_nodes(&self, output: &mut String, graph: &FlowGraph) {
        for (index, node) in graph.nodes.iter().enumerate() {
            let tag = match node.subcategory {
                Some(subcategory) => {
                    format!("{}/{}", node.category.as_str(), subcategory.as_str())
                }
                None => node.category.as_str().to_string(),
            };
            output.push_str(&format!(
                "{:>3}  {:36} {:>20}  {:24} {}\n",
                index,
                node.name,
                format_amount(node.value),
                tag,
                flow_node_color(node),
            ));
        }
    }

    fn print_links(&self, output: &mut String, graph: &FlowGraph) {
        for link in &graph.links {
            let name = |index: usize| {
                graph
                    .nodes
                    .get(index)
                    .map_or("(unknown)", |node| node.name.as_str())
            };
            output.push_str(&format!(
                "{:30} -> {:30} {:>20}\n",
                name(link.source),
                name(link.target),
                format_amount(link.value),
            ));
        }
    }

    fn print_totals(&self, output: &mut String, graph: &FlowGraph) {
        let mut notes = Vec::new();
        match graph.totals {
            FlowTotals::Income {
                total_revenue,
                total_expenses,
                profit,
            } => {
                output.push_str(&self.total_line("Total revenue", total_revenue));
                output.push_str(&self.total_line("Total expenses", total_expenses));
                output.push_str(&self.total_line("Profit", profit));
                if profit < 0.0 {
                    notes.push(format!(
                        "Net loss of {}. The Profit node is shown with a value of zero and \
                         has no incoming flow.",
                        format_amount(-profit)
                    ));
                }
            }
            FlowTotals::BalanceSheet {
                total_assets,
                total_liabilities,
                total_equity,
            } => {
                output.push_str(&self.total_line("Total assets", total_assets));
                output.push_str(&self.total_line("Total liabilities", total_liabilities));
                output.push_str(&self.total_line("Total equity", total_equity));
                if let Some(imbalance) = graph.significant_imbalance() {
                    notes.push(format!(
                        "Liabilities and equity differ from total assets by {}. Flows into \
                         Total Assets do not sum to its value.",
                        format_amount(imbalance)
                    ));
                }
            }
        }
        for note in notes {
            let prefix = ";";
            output.push_str(&format!("{}\n", prefix));
            for line in textwrap::wrap(&note, 74) {
                output.push_str(&format!("{} {}\n", prefix, line));
            }
        }
    }

    fn total_line(&self, label: &str, amount: f64) -> String {
        format!("{:57} {:>20}\n", label, format_amount(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{FlowLink, FlowNode, NodeCategory, StatementKind, Subcategory};

    fn node(name: &str, value: f64, category: NodeCategory) -> FlowNode {
        FlowNode {
            name: name.to_string(),
            value,
            category,
            subcategory: None,
            link: None,
        }
    }

    #[test]
    fn prints_sections_and_loss_note() {
        let graph = FlowGraph {
            kind: StatementKind::IncomeStatement,
            nodes: vec![
                FlowNode {
                    subcategory: Some(Subcategory::Operating),
                    ..node("Sales", 1000.0, NodeCategory::Income)
                },
                node("Total Revenue", 1000.0, NodeCategory::Total),
                node("Costs", 1500.0, NodeCategory::Expense),
                node("Profit", 0.0, NodeCategory::Profit),
            ],
            links: vec![
                FlowLink {
                    source: 0,
                    target: 1,
                    value: 1000.0,
                },
                FlowLink {
                    source: 1,
                    target: 2,
                    value: 1500.0,
                },
            ],
            totals: FlowTotals::Income {
                total_revenue: 1000.0,
                total_expenses: 1500.0,
                profit: -500.0,
            },
        };

        let summary = SummaryPrinter::new().print_summary(&graph);
        assert!(summary.contains("; --- income-statement"));
        assert!(summary.contains("income/operating"));
        assert!(summary.contains("#66c2a5"));
        assert!(summary.contains("Total Revenue"));
        assert!(summary.contains("1,500.00"));
        assert!(summary.contains("-500.00"));
        assert!(summary.contains("; Net loss of 500.00."));
    }

    #[test]
    fn balanced_sheet_has_no_note() {
        let graph = FlowGraph {
            kind: StatementKind::BalanceSheet,
            nodes: vec![
                node("Total Assets", 100.0, NodeCategory::Total),
                node("Common Stock", 100.0, NodeCategory::Equity),
            ],
            links: vec![FlowLink {
                source: 1,
                target: 0,
                value: 100.0,
            }],
            totals: FlowTotals::BalanceSheet {
                total_assets: 100.0,
                total_liabilities: 0.0,
                total_equity: 100.0,
            },
        };

        let summary = SummaryPrinter::new().print_summary(&graph);
        assert!(summary.contains("Common Stock"));
        assert!(!summary.contains("differ from total assets"));
    }
}
