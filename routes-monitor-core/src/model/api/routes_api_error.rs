use std::time::Duration;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RoutesApiError {
    #[error("failure building HTTP client: {0}")]
    ClientBuildError(String),
    #[error("request failed: {0}")]
    TransportError(String),
    #[error("request timed out after {0:?}")]
    TimeoutError(Duration),
    #[error("HTTP {status}: {message}")]
    StatusError { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponseError(String),
    #[error("invalid duration '{0}'")]
    InvalidDurationError(String),
    #[error("invalid encoded polyline: {0}")]
    InvalidPolylineError(String),
}

impl RoutesApiError {
    /// true when the service answered with a 2xx status but the body could not
    /// be decoded. the call still counts against the key's quota.
    pub fn is_billed(&self) -> bool {
        matches!(
            self,
            RoutesApiError::InvalidResponseError(_) | RoutesApiError::InvalidDurationError(_)
        )
    }
}
