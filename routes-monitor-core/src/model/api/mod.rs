mod compute_routes_request;
mod compute_routes_response;
mod google_routes_client;
mod routes_api;
mod routes_api_error;

pub mod constants;
pub mod polyline;

pub use compute_routes_request::{
    departure_after, ComputeRoutesRequest, RoutingPreference, TravelMode,
};
pub use compute_routes_response::{parse_duration_seconds, ComputeRoutesResponse, RouteLeg};
pub use google_routes_client::GoogleRoutesClient;
pub use routes_api::RoutesApi;
pub use routes_api_error::RoutesApiError;
