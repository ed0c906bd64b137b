pub mod image;
pub mod metrics;
pub mod storage;

pub use storage::{LocalStorage, S3Storage, Storage};
