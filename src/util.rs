use fractic_server_error::ServerError;

use crate::{
    config::FlowsConfig,
    domain::usecases::{
        query_usecase::{QueryUsecase as _, QueryUsecaseImpl},
        statement_flow_usecase::{StatementFlowUsecase as _, StatementFlowUsecaseImpl},
    },
    entities::{FinancialMetrics, FinancialStatements, FlowGraph, NodeLinkHandler, StatementKind},
    presentation::{render_json::RenderJsonPrinter, summary_printer::SummaryPrinter},
};

/// `{nodes, links}` JSON consumed by the flow renderer.
pub type RenderJson = String;

/// Fixed-width plain text listing of a graph's nodes, links and totals.
pub type Summary = String;

pub struct StatementFlowsUtil {
    flow_usecase: StatementFlowUsecaseImpl,
    query_usecase: QueryUsecaseImpl,
    render_printer: RenderJsonPrinter,
    summary_printer: SummaryPrinter,
}

impl StatementFlowsUtil {
    pub fn new() -> Result<Self, ServerError> {
        Self::with_config(&FlowsConfig::default())
    }

    pub fn with_config(config: &FlowsConfig) -> Result<Self, ServerError> {
        Ok(Self {
            flow_usecase: StatementFlowUsecaseImpl::new(config, None)?,
            query_usecase: QueryUsecaseImpl::new(config)?,
            render_printer: RenderJsonPrinter::new(),
            summary_printer: SummaryPrinter::new(),
        })
    }

    /// Attach a resource URL to nodes of every graph built from now on.
    pub fn with_link_handler<H>(mut self, handler: H) -> Self
    where
        H: NodeLinkHandler + 'static,
    {
        self.flow_usecase.set_link_handler(Box::new(handler));
        self
    }

    pub fn build_graph(
        &self,
        kind: StatementKind,
        statements: &FinancialStatements,
    ) -> Result<(FlowGraph, RenderJson), ServerError> {
        let graph = self.flow_usecase.build_graph(kind, statements)?;
        let render_json = self.render_printer.print(&graph)?;
        Ok((graph, render_json))
    }

    pub fn from_string(
        &self,
        statements_json: &str,
        kind: StatementKind,
    ) -> Result<(FinancialStatements, FlowGraph, RenderJson), ServerError> {
        let (statements, graph) = self.flow_usecase.from_string(statements_json, kind)?;
        let render_json = self.render_printer.print(&graph)?;
        Ok((statements, graph, render_json))
    }

    pub async fn from_file<P>(
        &self,
        statements_json: P,
        kind: StatementKind,
    ) -> Result<(FinancialStatements, FlowGraph, RenderJson), ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let (statements, graph) = self.flow_usecase.from_file(statements_json, kind).await?;
        let render_json = self.render_printer.print(&graph)?;
        Ok((statements, graph, render_json))
    }

    /// Upload a PDF to the extraction service and visualize the result.
    pub async fn from_document<P>(
        &self,
        document: P,
        kind: StatementKind,
    ) -> Result<(FinancialStatements, FlowGraph, RenderJson), ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let (statements, graph) = self.flow_usecase.from_document(document, kind).await?;
        let render_json = self.render_printer.print(&graph)?;
        Ok((statements, graph, render_json))
    }

    pub fn metrics(&self, statements: &FinancialStatements) -> Result<FinancialMetrics, ServerError> {
        self.query_usecase.metrics(statements)
    }

    /// Answer a free-text question about the statements' metrics. With no
    /// statements loaded yet, returns a prompt to upload a document.
    pub fn answer(
        &self,
        query: &str,
        statements: Option<&FinancialStatements>,
    ) -> Result<String, ServerError> {
        self.query_usecase.answer(query, statements)
    }

    pub async fn ask_chat_service(
        &self,
        message: &str,
        statements: &FinancialStatements,
    ) -> Result<String, ServerError> {
        self.query_usecase.ask_chat_service(message, statements).await
    }

    pub fn summary(&self, graph: &FlowGraph) -> Summary {
        self.summary_printer.print_summary(graph)
    }
}
