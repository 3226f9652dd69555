// ============================================================================
// HTTP Layer
// ============================================================================
//
// - params   - typed query-string records with defaults and validation
// - handlers - one async handler per endpoint
// - routes   - method+path dispatch and the JSON 404 fallback
// - error    - ApiError -> HTTP status + {"error": ...}
//
// ============================================================================

mod error;
mod handlers;
mod params;
mod routes;

pub use handlers::AppState;
pub use routes::configure;
