use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::FinancialStatements;

#[async_trait]
pub trait StatementRepository: Send + Sync {
    fn from_string(&self, statements_json: &str) -> Result<FinancialStatements, ServerError>;

    async fn from_file<P>(&self, statements_json: P) -> Result<FinancialStatements, ServerError>
    where
        P: AsRef<std::path::Path> + Send;

    /// Sends a source document (PDF) through the extraction service.
    async fn from_document<P>(&self, document: P) -> Result<FinancialStatements, ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}
