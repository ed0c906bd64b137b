//! Chat-specific metrics, recorded through the `metrics` facade.

use metrics::{counter, histogram};
use std::time::Duration;

/// Outcome label values for `chat_requests_total`.
pub mod outcome {
    pub const ANSWERED: &str = "answered";
    pub const NOT_CONFIGURED: &str = "not_configured";
    pub const BAD_REQUEST: &str = "bad_request";
    pub const UPSTREAM_ERROR: &str = "upstream_error";
    pub const FAILED: &str = "failed";
}

pub fn record_request(label: &'static str) {
    counter!("chat_requests_total", "outcome" => label).increment(1);
}

pub fn record_completion(
    provider: &'static str,
    latency: Duration,
    input_tokens: u32,
    output_tokens: u32,
) {
    histogram!("chat_provider_latency_seconds", "provider" => provider)
        .record(latency.as_secs_f64());
    counter!("chat_tokens_total", "provider" => provider, "type" => "input")
        .increment(u64::from(input_tokens));
    counter!("chat_tokens_total", "provider" => provider, "type" => "output")
        .increment(u64::from(output_tokens));
}

pub fn record_tool_hints(math: bool, search: bool) {
    if math {
        counter!("chat_tool_hints_total", "hint" => "math").increment(1);
    }
    if search {
        counter!("chat_tool_hints_total", "hint" => "search").increment(1);
    }
}
