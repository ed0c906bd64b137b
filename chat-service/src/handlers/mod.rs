pub mod chat;
pub mod health;

pub use chat::{chat, chat_preflight, CHAT_CORS};
pub use health::{health_check, metrics_endpoint};
