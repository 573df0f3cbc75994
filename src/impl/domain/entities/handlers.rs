use super::flow_graph::FlowNode;

// Node handlers.
// ---

/// Supplies the optional resource URL attached to each node of a built graph.
pub trait NodeLinkHandler: Send + Sync {
    fn link(&self, node: &FlowNode) -> Option<String>;
}

impl<F> NodeLinkHandler for F
where
    F: Fn(&FlowNode) -> Option<String> + Send + Sync,
{
    fn link(&self, node: &FlowNode) -> Option<String> {
        self(node)
    }
}
