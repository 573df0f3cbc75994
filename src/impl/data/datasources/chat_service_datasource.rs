use std::time::Duration;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    config::ServiceConfig,
    data::models::service_response_model::{
        interpret_response, ChatRequestModel, ChatResponseModel,
    },
    entities::FinancialStatements,
    errors::{InvalidUpstreamResponse, UpstreamRequestFailed},
};

pub(crate) const CHAT_SERVICE: &str = "chat service";

#[async_trait]
pub(crate) trait ChatServiceDatasource: Send + Sync {
    /// Returns the service's (markdown) answer verbatim.
    async fn ask(
        &self,
        message: &str,
        statements: &FinancialStatements,
    ) -> Result<String, ServerError>;
}

pub(crate) struct ChatServiceDatasourceImpl {
    client: Client,
    base_url: String,
}

impl ChatServiceDatasourceImpl {
    pub(crate) fn new(config: &ServiceConfig) -> Result<Self, ServerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamRequestFailed::with_debug(CHAT_SERVICE, &e))?;
        Ok(Self::with_client(client, config))
    }

    fn with_client(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ChatServiceDatasource for ChatServiceDatasourceImpl {
    async fn ask(
        &self,
        message: &str,
        statements: &FinancialStatements,
    ) -> Result<String, ServerError> {
        debug!(query = message, "forwarding query to chat service");
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&ChatRequestModel {
                message,
                financial_data: statements,
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "chat request failed");
                UpstreamRequestFailed::with_debug(CHAT_SERVICE, &e)
            })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| InvalidUpstreamResponse::with_debug(CHAT_SERVICE, &e))?;

        interpret_response::<ChatResponseModel>(CHAT_SERVICE, status, &body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::{
        data::datasources::test_server::serve_once,
        entities::{BalanceSheet, MaturitySplit, StatementEntry},
    };

    fn datasource(base_url: String) -> ChatServiceDatasourceImpl {
        let config = ServiceConfig {
            base_url: format!("{}/", base_url),
            ..ServiceConfig::default()
        };
        ChatServiceDatasourceImpl::with_client(
            Client::builder().no_proxy().build().unwrap(),
            &config,
        )
    }

    fn statements() -> FinancialStatements {
        FinancialStatements {
            balance_sheet: Some(BalanceSheet {
                assets: MaturitySplit {
                    current: vec![StatementEntry::new("Cash", 4000.0)],
                    non_current: vec![],
                },
                liabilities: MaturitySplit::default(),
                equity: vec![StatementEntry::new("Common Stock", 4000.0)],
            }),
            income_statement: None,
        }
    }

    #[tokio::test]
    async fn posts_message_with_financial_data() {
        let (base_url, server) = serve_once(200, r#"{"response": "WACC is **8%**."}"#).await;

        let answer = datasource(base_url)
            .ask("What is the WACC?", &statements())
            .await
            .unwrap();
        assert_eq!(answer, "WACC is **8%**.");

        let request = server.await.unwrap();
        assert!(request.request_line().starts_with("POST /api/chat "));
        assert!(request.head.to_lowercase().contains("application/json"));
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["message"], "What is the WACC?");
        assert_eq!(
            body["financial_data"]["balance_sheet"]["assets"]["current"][0]["name"],
            "Cash"
        );
    }

    #[tokio::test]
    async fn service_error_is_surfaced() {
        let (base_url, server) =
            serve_once(503, r#"{"error": "AI service is not available"}"#).await;

        let err = datasource(base_url)
            .ask("What is the WACC?", &statements())
            .await
            .unwrap_err();
        assert!(format!("{:?}", err).contains("AI service is not available"));
        server.await.unwrap();
    }
}
