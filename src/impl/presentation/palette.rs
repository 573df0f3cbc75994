use crate::entities::{FlowLink, FlowNode, NodeCategory, Subcategory};

pub const FALLBACK_COLOR: &str = "#999";

/// Fill color used by the flow renderer for a node of the given category.
///
/// Income, expense, asset and liability colors depend on the subcategory;
/// aggregates of those categories (ex. `Costs`) have none and use
/// `FALLBACK_COLOR`.
pub fn node_color(category: NodeCategory, subcategory: Option<Subcategory>) -> &'static str {
    match (category, subcategory) {
        (NodeCategory::Income, Some(Subcategory::Operating)) => "#66c2a5",
        (NodeCategory::Income, Some(Subcategory::NonOperating)) => "#8dd3c7",
        (NodeCategory::Expense, Some(Subcategory::Operating)) => "#fc8d62",
        (NodeCategory::Expense, Some(Subcategory::NonOperating)) => "#ff9e80",
        (NodeCategory::Asset, Some(Subcategory::Current)) => "#8da0cb",
        (NodeCategory::Asset, Some(Subcategory::NonCurrent)) => "#b3b3ff",
        (NodeCategory::Liability, Some(Subcategory::Current)) => "#e78ac3",
        (NodeCategory::Liability, Some(Subcategory::NonCurrent)) => "#f4a8d8",
        (NodeCategory::Equity, _) => "#a6d854",
        (NodeCategory::Total, _) => "#ffd92f",
        (NodeCategory::Profit, _) => "#66c2a5",
        _ => FALLBACK_COLOR,
    }
}

pub fn flow_node_color(node: &FlowNode) -> &'static str {
    node_color(node.category, node.subcategory)
}

/// Links take the color of their source node.
pub fn link_color(nodes: &[FlowNode], link: &FlowLink) -> &'static str {
    nodes
        .get(link.source)
        .map(flow_node_color)
        .unwrap_or(FALLBACK_COLOR)
}
