use std::path::PathBuf;

use filmgrain_core::asset::ImageBlob;
use filmgrain_core::config::EndpointConfig;
use filmgrain_core::error::Result;
use filmgrain_core::session::ProcessRequest;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Read and validate a source image from disk.
    LoadSource { path: PathBuf },

    /// Upload a request snapshot to the grain service.
    Process { request: ProcessRequest },

    /// Write the processed image to disk.
    SaveResult { path: PathBuf, blob: ImageBlob },

    /// Rebuild the HTTP client for a new endpoint.
    Configure { endpoint: EndpointConfig },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    SourceLoaded {
        blob: ImageBlob,
    },
    /// Outcome of the request issued for source `generation`.
    Settled {
        generation: u64,
        outcome: Result<Vec<u8>>,
    },
    ResultSaved {
        path: PathBuf,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
