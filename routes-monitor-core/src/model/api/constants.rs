use std::time::Duration;

pub const ROUTES_API_ENDPOINT: &str = "https://routes.googleapis.com/directions/v2:computeRoutes";

/// field mask used while monitoring. keeps the whole route object so the raw
/// archive is complete.
pub const MONITOR_FIELD_MASK: &str = "routes,geocodingResults,fallbackInfo";

/// field mask used for one-off snapshots that only need timing and geometry.
pub const SNAPSHOT_FIELD_MASK: &str =
    "routes.duration,routes.staticDuration,routes.distanceMeters,routes.polyline.encodedPolyline";

pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";
pub const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_SPACING: Duration = Duration::from_millis(200);
pub const DEFAULT_DEPARTURE_LEAD: Duration = Duration::from_secs(30);
