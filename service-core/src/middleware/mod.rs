pub mod cors;
pub mod metrics;
pub mod tracing;

pub use self::cors::{allow_any_origin, CorsPolicy};
pub use self::metrics::metrics_middleware;
pub use self::tracing::{request_id_middleware, REQUEST_ID_HEADER};
