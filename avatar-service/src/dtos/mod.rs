pub mod upload;

pub use upload::{UploadRequest, UploadResponse};
