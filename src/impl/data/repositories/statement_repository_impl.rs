use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    config::FlowsConfig,
    data::{
        datasources::{
            extraction_service_datasource::{
                ExtractionServiceDatasource, ExtractionServiceDatasourceImpl,
            },
            statement_json_datasource::{StatementJsonDatasource, StatementJsonDatasourceImpl},
        },
        models::document_upload_model::DocumentUploadModel,
    },
    domain::repositories::statement_repository::StatementRepository,
    entities::FinancialStatements,
    errors::ReadError,
};

pub(crate) struct StatementRepositoryImpl<
    DS1 = StatementJsonDatasourceImpl,     // Default.
    DS2 = ExtractionServiceDatasourceImpl, // Default.
> where
    DS1: StatementJsonDatasource,
    DS2: ExtractionServiceDatasource,
{
    json_datasource: DS1,
    extraction_datasource: DS2,
}

#[async_trait]
impl<DS1, DS2> StatementRepository for StatementRepositoryImpl<DS1, DS2>
where
    DS1: StatementJsonDatasource,
    DS2: ExtractionServiceDatasource,
{
    fn from_string(&self, statements_json: &str) -> Result<FinancialStatements, ServerError> {
        self.json_datasource.from_string(statements_json)
    }

    async fn from_file<P>(&self, statements_json: P) -> Result<FinancialStatements, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        self.json_datasource.from_file(statements_json).await
    }

    async fn from_document<P>(&self, document: P) -> Result<FinancialStatements, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let path = document.as_ref().to_path_buf();
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| ReadError::with_debug(&e))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extracted = self
            .extraction_datasource
            .extract(DocumentUploadModel { file_name, bytes })
            .await?;
        self.json_datasource.from_value(&extracted)
    }
}

impl StatementRepositoryImpl {
    pub(crate) fn new(config: &FlowsConfig) -> Result<Self, ServerError> {
        Ok(StatementRepositoryImpl {
            json_datasource: StatementJsonDatasourceImpl::new(config.missing_subcategories),
            extraction_datasource: ExtractionServiceDatasourceImpl::new(&config.service)?,
        })
    }
}

#[cfg(test)]
impl<DS1, DS2> StatementRepositoryImpl<DS1, DS2>
where
    DS1: StatementJsonDatasource,
    DS2: ExtractionServiceDatasource,
{
    pub(crate) fn with_datasources(json_datasource: DS1, extraction_datasource: DS2) -> Self {
        Self {
            json_datasource,
            extraction_datasource,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{json, Value};

    use super::*;
    use crate::config::MissingSubcategoryPolicy;

    /// Records the upload and replies with a canned extraction result.
    struct CannedExtraction {
        reply: Value,
        seen: Mutex<Option<(String, usize)>>,
    }

    #[async_trait]
    impl ExtractionServiceDatasource for CannedExtraction {
        async fn extract(&self, upload: DocumentUploadModel) -> Result<Value, ServerError> {
            upload.validate(1024)?;
            *self.seen.lock().unwrap() = Some((upload.file_name, upload.bytes.len()));
            Ok(self.reply.clone())
        }
    }

    fn repository(reply: Value) -> StatementRepositoryImpl<StatementJsonDatasourceImpl, CannedExtraction> {
        StatementRepositoryImpl::with_datasources(
            StatementJsonDatasourceImpl::new(MissingSubcategoryPolicy::Reject),
            CannedExtraction {
                reply,
                seen: Mutex::new(None),
            },
        )
    }

    fn extracted() -> Value {
        json!({
            "balance_sheet": {
                "assets": {"current": [{"name": "Cash", "value": 100}], "non_current": []},
                "liabilities": {"current": [], "non_current": []},
                "equity": [{"name": "Common Stock", "value": 100}]
            }
        })
    }

    #[tokio::test]
    async fn document_goes_through_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annual-report.pdf");
        std::fs::write(&path, b"%PDF-1.4 test").unwrap();

        let repository = repository(extracted());
        let statements = repository.from_document(&path).await.unwrap();

        assert_eq!(statements.balance_sheet.unwrap().assets.current[0].name, "Cash");
        let seen = repository.extraction_datasource.seen.lock().unwrap().clone();
        assert_eq!(seen, Some(("annual-report.pdf".to_string(), 13)));
    }

    #[tokio::test]
    async fn non_pdf_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        assert!(repository(extracted()).from_document(&path).await.is_err());
    }

    #[tokio::test]
    async fn malformed_extraction_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let repository = repository(json!({"balance_sheet": {"assets": []}}));
        assert!(repository.from_document(&path).await.is_err());
    }
}
