use std::fmt;

use tracing::{debug, info, warn};

use crate::asset::{AssetManager, DisplaySurface, DownloadArtifact, ImageAsset, ImageBlob};
use crate::consts::DOWNLOAD_FILE_NAME;
use crate::error::{FilmGrainError, Result};
use crate::params::{BooleanField, GrainParameters, NumericField, ParameterStore};
use crate::transport::Transport;

/// Progress of the processing request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Pending => write!(f, "Processing"),
            Self::Succeeded => write!(f, "Done"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Everything one `POST /process` call needs, captured when the request is
/// issued so later edits cannot leak into an in-flight upload.
#[derive(Clone, Debug)]
pub struct ProcessRequest {
    pub source: ImageBlob,
    pub params: GrainParameters,
    generation: u64,
}

impl ProcessRequest {
    /// Source generation this request was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        self.params.form_fields()
    }
}

/// How a settled request was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    Succeeded,
    Failed,
    /// The source changed while the request was in flight.
    Discarded,
    /// No request was pending.
    Ignored,
}

/// Client-side processing state: parameters, image slots and the request
/// state machine.
///
/// ```text
/// Idle --begin--> Pending --ok--> Succeeded
///                 Pending --err-> Failed
/// Succeeded | Failed --begin--> Pending
/// ```
pub struct Session<S: DisplaySurface> {
    params: ParameterStore,
    assets: AssetManager<S>,
    state: RequestState,
    notice: Option<String>,
}

impl<S: DisplaySurface> Session<S> {
    pub fn new(surface: S, params: GrainParameters) -> Self {
        Self {
            params: ParameterStore::new(params),
            assets: AssetManager::new(surface),
            state: RequestState::Idle,
            notice: None,
        }
    }

    pub fn params(&self) -> &GrainParameters {
        self.params.get()
    }

    pub fn store_mut(&mut self) -> &mut ParameterStore {
        &mut self.params
    }

    pub fn set_numeric(&mut self, field: NumericField, raw: &str) -> bool {
        self.params.set_numeric(field, raw)
    }

    pub fn set_boolean(&mut self, field: BooleanField, value: bool) {
        self.params.set_boolean(field, value);
    }

    pub fn assets(&self) -> &AssetManager<S> {
        &self.assets
    }

    pub fn source(&self) -> Option<&ImageAsset> {
        self.assets.source()
    }

    pub fn result(&self) -> Option<&ImageAsset> {
        self.assets.result()
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// User-visible failure message from the last settled request.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Select a new source image. A pending request keeps running; its
    /// outcome will be discarded on settlement.
    pub fn select_source(&mut self, blob: Option<ImageBlob>) -> bool {
        let changed = self.assets.select_source(blob);
        if changed && self.state != RequestState::Pending {
            self.state = RequestState::Idle;
            self.notice = None;
        }
        changed
    }

    /// Whether the process trigger should be enabled.
    pub fn can_process(&self) -> bool {
        self.assets.source().is_some() && self.state != RequestState::Pending
    }

    /// Move to Pending and snapshot the request. Returns `None` (and changes
    /// nothing) when there is no source, a request is already pending, or the
    /// parameters are not all finite.
    pub fn begin_process(&mut self) -> Option<ProcessRequest> {
        if !self.can_process() {
            debug!(state = %self.state, "process refused");
            return None;
        }
        let params = self.params.snapshot();
        if let Err(e) = params.validate() {
            warn!("process refused: {e}");
            return None;
        }
        let source = self.assets.source()?.blob().clone();

        self.assets.clear_result();
        self.notice = None;
        self.state = RequestState::Pending;

        let request = ProcessRequest {
            source,
            params,
            generation: self.assets.generation(),
        };
        info!(
            file = request.source.file_name(),
            bytes = request.source.len(),
            generation = request.generation,
            "process request issued"
        );
        Some(request)
    }

    /// Apply the outcome of the request issued for `generation`.
    pub fn settle(&mut self, generation: u64, outcome: Result<Vec<u8>>) -> Settlement {
        if self.state != RequestState::Pending {
            warn!(state = %self.state, "settlement without a pending request");
            return Settlement::Ignored;
        }

        if generation != self.assets.generation() {
            warn!(
                issued = generation,
                current = self.assets.generation(),
                "discarding outcome for a replaced source"
            );
            self.state = RequestState::Idle;
            return Settlement::Discarded;
        }

        match outcome.and_then(non_empty) {
            Ok(bytes) => {
                info!(bytes = bytes.len(), "process request succeeded");
                self.assets.set_result(ImageBlob::processed(bytes));
                self.state = RequestState::Succeeded;
                Settlement::Succeeded
            }
            Err(e) => {
                warn!("process request failed: {e}");
                self.notice = Some(format!("Failed to process image: {e}"));
                self.state = RequestState::Failed;
                Settlement::Failed
            }
        }
    }

    /// Issue and settle one request synchronously.
    pub fn process(&mut self, transport: &impl Transport) -> Option<Settlement> {
        let request = self.begin_process()?;
        let outcome = transport.send(&request);
        Some(self.settle(request.generation(), outcome))
    }

    /// The processed image, once a request has succeeded.
    pub fn download(&self) -> Option<DownloadArtifact<'_>> {
        self.assets.result().map(|asset| DownloadArtifact {
            file_name: DOWNLOAD_FILE_NAME,
            asset,
        })
    }
}

fn non_empty(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if bytes.is_empty() {
        Err(FilmGrainError::EmptyResponse)
    } else {
        Ok(bytes)
    }
}
