use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use super::{
    constants::{API_KEY_HEADER, FIELD_MASK_HEADER},
    ComputeRoutesRequest, ComputeRoutesResponse, RoutesApi, RoutesApiError,
};
use crate::model::keys::ApiKey;

/// blocking HTTP client for the Google Routes API v2.
pub struct GoogleRoutesClient {
    endpoint: String,
    timeout: Duration,
    client: reqwest::blocking::Client,
}

impl GoogleRoutesClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, RoutesApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RoutesApiError::ClientBuildError(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            timeout,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RoutesApi for GoogleRoutesClient {
    fn compute_routes(
        &self,
        key: &ApiKey,
        request: &ComputeRoutesRequest,
        field_mask: &str,
    ) -> Result<ComputeRoutesResponse, RoutesApiError> {
        log::debug!(
            "POST {} with key {key} and field mask '{field_mask}'",
            self.endpoint
        );
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, key.secret())
            .header(FIELD_MASK_HEADER, field_mask)
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    RoutesApiError::TimeoutError(self.timeout)
                } else {
                    RoutesApiError::TransportError(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| RoutesApiError::TransportError(format!("failure reading body: {e}")))?;

        if !status.is_success() {
            return Err(RoutesApiError::StatusError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let raw: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| RoutesApiError::InvalidResponseError(format!("body is not JSON: {e}")))?;
        ComputeRoutesResponse::try_from(raw)
    }
}

/// pulls `error.message` out of a Google API error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| String::from("Unknown error"))
}
