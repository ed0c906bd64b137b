//! Upload metrics, recorded through the `metrics` facade.

use metrics::{counter, histogram};

pub fn record_upload(outcome: &'static str) {
    counter!("avatar_uploads_total", "outcome" => outcome).increment(1);
}

pub fn record_upload_size(bytes: usize) {
    histogram!("avatar_upload_bytes").record(bytes as f64);
}
