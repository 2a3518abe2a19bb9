use super::{ComputeRoutesRequest, ComputeRoutesResponse, RoutesApiError};
use crate::model::keys::ApiKey;

/// a routing service able to answer a single computeRoutes request.
pub trait RoutesApi {
    /// send one request authorized by `key`, limiting the response to
    /// the fields named in `field_mask`.
    fn compute_routes(
        &self,
        key: &ApiKey,
        request: &ComputeRoutesRequest,
        field_mask: &str,
    ) -> Result<ComputeRoutesResponse, RoutesApiError>;
}
