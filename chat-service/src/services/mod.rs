pub mod annotations;
pub mod metrics;
pub mod providers;

pub use annotations::ToolHints;
pub use providers::{ChatProvider, GenerationParams, PromptMessage, ProviderError};
