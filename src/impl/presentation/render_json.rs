use fractic_server_error::{CriticalError, ServerError};
use serde_derive::Serialize;

use crate::entities::{FlowGraph, FlowLink, FlowNode};

/// Shape consumed by the flow renderer.
#[derive(Debug, Serialize)]
struct RenderJsonModel<'a> {
    nodes: &'a [FlowNode],
    links: &'a [FlowLink],
}

pub(crate) struct RenderJsonPrinter;

impl RenderJsonPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn print(&self, graph: &FlowGraph) -> Result<String, ServerError> {
        serde_json::to_string(&RenderJsonModel {
            nodes: &graph.nodes,
            links: &graph.links,
        })
        .map_err(|e| CriticalError::with_debug("failed to serialize flow graph", &e))
    }
}
