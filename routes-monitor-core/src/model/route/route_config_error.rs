#[derive(thiserror::Error, Debug)]
pub enum RouteConfigError {
    #[error("invalid route id '{0}': use one or more ASCII letters, digits, '-' or '_'")]
    InvalidRouteIdError(String),
    #[error("route {route_id} has an invalid {endpoint} coordinate (lat={lat}, lng={lng})")]
    InvalidCoordinateError {
        route_id: String,
        endpoint: String,
        lat: f64,
        lng: f64,
    },
    #[error("route {0} has an invalid sampling interval: {1}")]
    InvalidIntervalError(String, String),
    #[error("duplicate route id: {0}")]
    DuplicateRouteIdError(String),
    #[error("invalid sampling band '{0}': {1}")]
    InvalidSamplingBandError(String, String),
}
