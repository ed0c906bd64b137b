pub mod health;
pub mod upload;

pub use health::{health_check, metrics_endpoint};
pub use upload::{upload_avatar, upload_preflight, UPLOAD_CORS};
