use routes_monitor_core::model::{
    api::RoutesApiError, keys::KeyManagerError, route::RouteConfigError,
};
use thiserror::Error;

use crate::output::OutputError;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Config file not found: {0}")]
    ConfigNotFoundError(String),
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error(transparent)]
    RouteConfigError(#[from] RouteConfigError),
    #[error(transparent)]
    KeyManagerError(#[from] KeyManagerError),
    #[error(transparent)]
    RoutesApiError(#[from] RoutesApiError),
    #[error(transparent)]
    OutputError(#[from] OutputError),
    #[error("no route at index {0}")]
    UnknownRouteError(usize),
    #[error("failure building progress bar: {0}")]
    ProgressBarError(String),
    #[error("failure initializing logging: {0}")]
    LoggingError(String),
}

impl MonitorError {
    /// errors reported to the user as configuration problems
    pub fn is_configuration_error(&self) -> bool {
        match self {
            MonitorError::ConfigNotFoundError(_)
            | MonitorError::ConfigReadError { .. }
            | MonitorError::RouteConfigError(_) => true,
            MonitorError::KeyManagerError(e) => e.is_configuration_error(),
            _ => false,
        }
    }
}
