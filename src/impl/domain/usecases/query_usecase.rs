use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    config::FlowsConfig,
    data::datasources::chat_service_datasource::{
        ChatServiceDatasource, ChatServiceDatasourceImpl,
    },
    domain::logic::{
        metrics_engine::MetricsEngine,
        query_responder::{QueryResponder, NO_DATA_RESPONSE},
    },
    entities::{FinancialMetrics, FinancialStatements, RateAssumptions},
};

#[async_trait]
pub trait QueryUsecase: Send + Sync {
    fn metrics(&self, statements: &FinancialStatements) -> Result<FinancialMetrics, ServerError>;

    /// Answers locally from the derived metrics. The local answer is
    /// authoritative for the metrics it covers.
    fn answer(
        &self,
        query: &str,
        statements: Option<&FinancialStatements>,
    ) -> Result<String, ServerError>;

    /// Forwards the query to the external chat service.
    async fn ask_chat_service(
        &self,
        message: &str,
        statements: &FinancialStatements,
    ) -> Result<String, ServerError>;
}

pub(crate) struct QueryUsecaseImpl<
    DS1 = ChatServiceDatasourceImpl, // Default.
> where
    DS1: ChatServiceDatasource,
{
    assumptions: RateAssumptions,
    chat_datasource: DS1,
}

#[async_trait]
impl<DS1> QueryUsecase for QueryUsecaseImpl<DS1>
where
    DS1: ChatServiceDatasource,
{
    fn metrics(&self, statements: &FinancialStatements) -> Result<FinancialMetrics, ServerError> {
        MetricsEngine::new(statements, &self.assumptions).compute()
    }

    fn answer(
        &self,
        query: &str,
        statements: Option<&FinancialStatements>,
    ) -> Result<String, ServerError> {
        let Some(statements) = statements else {
            return Ok(NO_DATA_RESPONSE.to_string());
        };
        let metrics = self.metrics(statements)?;
        Ok(QueryResponder::new(&metrics).respond(query))
    }

    async fn ask_chat_service(
        &self,
        message: &str,
        statements: &FinancialStatements,
    ) -> Result<String, ServerError> {
        self.chat_datasource.ask(message, statements).await
    }
}

impl QueryUsecaseImpl {
    pub(crate) fn new(config: &FlowsConfig) -> Result<Self, ServerError> {
        Ok(QueryUsecaseImpl {
            assumptions: config.assumptions,
            chat_datasource: ChatServiceDatasourceImpl::new(&config.service)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        BalanceSheet, IncomeStatement, MaturitySplit, OperatingSplit, StatementEntry,
    };
    use crate::errors::UpstreamErrorResponse;

    struct OfflineChat;

    #[async_trait]
    impl ChatServiceDatasource for OfflineChat {
        async fn ask(
            &self,
            _message: &str,
            _statements: &FinancialStatements,
        ) -> Result<String, ServerError> {
            Err(UpstreamErrorResponse::new(
                "chat service",
                503,
                "AI service is not available",
            ))
        }
    }

    fn usecase() -> QueryUsecaseImpl<OfflineChat> {
        QueryUsecaseImpl {
            assumptions: RateAssumptions::default(),
            chat_datasource: OfflineChat,
        }
    }

    fn statements() -> FinancialStatements {
        FinancialStatements {
            balance_sheet: Some(BalanceSheet {
                assets: MaturitySplit {
                    current: vec![StatementEntry::new("Cash", 14000.0)],
                    non_current: vec![],
                },
                liabilities: MaturitySplit {
                    current: vec![StatementEntry::new("AP", 6000.0)],
                    non_current: vec![],
                },
                equity: vec![StatementEntry::new("Common Stock", 4000.0)],
            }),
            income_statement: Some(IncomeStatement {
                revenue: OperatingSplit {
                    operating: vec![StatementEntry::new("Sales", 1000.0)],
                    non_operating: vec![],
                },
                expenses: OperatingSplit::default(),
            }),
        }
    }

    #[test]
    fn answers_from_statements() {
        let statements = statements();
        let answer = usecase().answer("Debt and equity?", Some(&statements)).unwrap();
        assert!(answer.contains("1.50"));
    }

    #[test]
    fn answers_without_statements() {
        assert_eq!(usecase().answer("wacc", None).unwrap(), NO_DATA_RESPONSE);
    }

    #[test]
    fn incomplete_statements_are_an_error() {
        let mut statements = statements();
        statements.balance_sheet = None;
        assert!(usecase().answer("wacc", Some(&statements)).is_err());
    }

    #[tokio::test]
    async fn chat_service_errors_propagate() {
        let statements = statements();
        assert!(usecase()
            .ask_chat_service("What is the WACC?", &statements)
            .await
            .is_err());
    }
}
