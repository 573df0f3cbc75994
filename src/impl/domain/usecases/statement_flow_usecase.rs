use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::info;

use crate::{
    config::FlowsConfig,
    data::repositories::statement_repository_impl::StatementRepositoryImpl,
    domain::{
        logic::graph_builder::GraphBuilder, repositories::statement_repository::StatementRepository,
    },
    entities::{FinancialStatements, FlowGraph, NodeLinkHandler, StatementKind},
};

#[async_trait]
pub trait StatementFlowUsecase: Send + Sync {
    fn build_graph(
        &self,
        kind: StatementKind,
        statements: &FinancialStatements,
    ) -> Result<FlowGraph, ServerError>;

    fn from_string(
        &self,
        statements_json: &str,
        kind: StatementKind,
    ) -> Result<(FinancialStatements, FlowGraph), ServerError>;

    async fn from_file<P>(
        &self,
        statements_json: P,
        kind: StatementKind,
    ) -> Result<(FinancialStatements, FlowGraph), ServerError>
    where
        P: AsRef<std::path::Path> + Send;

    async fn from_document<P>(
        &self,
        document: P,
        kind: StatementKind,
    ) -> Result<(FinancialStatements, FlowGraph), ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}

pub(crate) struct StatementFlowUsecaseImpl<
    R1 = StatementRepositoryImpl, // Default.
> where
    R1: StatementRepository,
{
    statement_repository: R1,
    link_handler: Option<Box<dyn NodeLinkHandler>>,
}

#[async_trait]
impl<R1> StatementFlowUsecase for StatementFlowUsecaseImpl<R1>
where
    R1: StatementRepository,
{
    fn build_graph(
        &self,
        kind: StatementKind,
        statements: &FinancialStatements,
    ) -> Result<FlowGraph, ServerError> {
        let builder = GraphBuilder::new(statements);
        match &self.link_handler {
            Some(handler) => builder.with_link_handler(handler.as_ref()).build(kind),
            None => builder.build(kind),
        }
    }

    fn from_string(
        &self,
        statements_json: &str,
        kind: StatementKind,
    ) -> Result<(FinancialStatements, FlowGraph), ServerError> {
        let statements = self.statement_repository.from_string(statements_json)?;
        let graph = self.build_graph(kind, &statements)?;
        Ok((statements, graph))
    }

    async fn from_file<P>(
        &self,
        statements_json: P,
        kind: StatementKind,
    ) -> Result<(FinancialStatements, FlowGraph), ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let statements = self.statement_repository.from_file(statements_json).await?;
        let graph = self.build_graph(kind, &statements)?;
        Ok((statements, graph))
    }

    async fn from_document<P>(
        &self,
        document: P,
        kind: StatementKind,
    ) -> Result<(FinancialStatements, FlowGraph), ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let statements = self.statement_repository.from_document(document).await?;
        let graph = self.build_graph(kind, &statements)?;
        info!(kind = %kind, nodes = graph.nodes.len(), "document extracted and visualized");
        Ok((statements, graph))
    }
}

impl StatementFlowUsecaseImpl {
    pub(crate) fn new(
        config: &FlowsConfig,
        link_handler: Option<Box<dyn NodeLinkHandler>>,
    ) -> Result<Self, ServerError> {
        Ok(StatementFlowUsecaseImpl {
            statement_repository: StatementRepositoryImpl::new(config)?,
            link_handler,
        })
    }
}

impl<R1> StatementFlowUsecaseImpl<R1>
where
    R1: StatementRepository,
{
    pub(crate) fn set_link_handler(&mut self, handler: Box<dyn NodeLinkHandler>) {
        self.link_handler = Some(handler);
    }
}
