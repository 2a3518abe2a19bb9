mod lat_lng;
mod route_config_error;
mod route_definition;
mod route_id;

pub use lat_lng::LatLng;
pub use route_config_error::RouteConfigError;
pub use route_definition::{validate_routes, RouteDefinition, MAX_SAMPLING_INTERVAL};
pub use route_id::RouteId;
