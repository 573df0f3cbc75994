use fractic_server_error::ServerError;
use serde::de::DeserializeOwned;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    entities::FinancialStatements,
    errors::{InvalidUpstreamResponse, UpstreamErrorResponse},
};

#[derive(Debug, Deserialize)]
pub(crate) struct ExtractionResponseModel {
    pub data: Option<Value>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequestModel<'a> {
    pub message: &'a str,
    pub financial_data: &'a FinancialStatements,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseModel {
    pub response: Option<String>,
    pub error: Option<String>,
}

/// Shared by both services: every response body may carry an `error` field,
/// which takes precedence over the payload.
pub(crate) trait ServiceResponseModel: DeserializeOwned {
    type Payload;

    fn error(&self) -> Option<&str>;
    fn into_payload(self) -> Option<Self::Payload>;
}

impl ServiceResponseModel for ExtractionResponseModel {
    type Payload = Value;

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn into_payload(self) -> Option<Value> {
        self.data
    }
}

impl ServiceResponseModel for ChatResponseModel {
    type Payload = String;

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn into_payload(self) -> Option<String> {
        self.response
    }
}

/// Interpret a raw service reply. Non-2xx replies are errors even if the body
/// is not JSON.
pub(crate) fn interpret_response<M: ServiceResponseModel>(
    service: &str,
    status: u16,
    body: &str,
) -> Result<M::Payload, ServerError> {
    let is_success = (200..300).contains(&status);
    let parsed = serde_json::from_str::<M>(body);
    match parsed {
        Ok(model) => {
            if let Some(error) = model.error() {
                return Err(UpstreamErrorResponse::new(service, status, error));
            }
            if !is_success {
                return Err(UpstreamErrorResponse::new(
                    service,
                    status,
                    &format!("Server error: {}", status),
                ));
            }
            model
                .into_payload()
                .ok_or_else(|| InvalidUpstreamResponse::with_debug(service, &body))
        }
        Err(_) if !is_success => Err(UpstreamErrorResponse::new(
            service,
            status,
            &format!("Server error: {}", status),
        )),
        Err(e) => Err(InvalidUpstreamResponse::with_debug(service, &e)),
    }
}
