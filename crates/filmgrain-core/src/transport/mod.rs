pub mod http;

use crate::error::Result;
use crate::session::ProcessRequest;

pub use http::HttpTransport;

/// Carries one process request to the grain service and returns the
/// processed image bytes.
pub trait Transport {
    fn send(&self, request: &ProcessRequest) -> Result<Vec<u8>>;
}

