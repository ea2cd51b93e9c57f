use std::ffi::OsStr;
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::{ImageFormat, ImageReader};
use tracing::debug;

use crate::consts::{DOWNLOAD_FILE_NAME, HEIF_EXTENSIONS, RESULT_MIME_TYPE};
use crate::error::{FilmGrainError, Result};

/// ISO-BMFF brands used by HEIC/HEIF still images.
const HEIF_BRANDS: [&[u8; 4]; 6] = [b"heic", b"heix", b"heim", b"heis", b"mif1", b"msf1"];

/// Raw image bytes plus the metadata needed to upload them.
///
/// The bytes are reference counted so a request snapshot can share them with
/// the asset slot without copying.
#[derive(Clone)]
pub struct ImageBlob {
    file_name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl ImageBlob {
    /// Accept `bytes` as a source image. Fails on empty input or on anything
    /// that is neither a known image container nor HEIC/HEIF.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(FilmGrainError::EmptySource(file_name));
        }
        let mime_type = detect_mime_type(&file_name, &bytes)
            .ok_or_else(|| FilmGrainError::UnsupportedSource(file_name.clone()))?;

        Ok(Self {
            file_name,
            mime_type,
            bytes: bytes.into(),
        })
    }

    /// Read and validate a source image from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(file_name, bytes)
    }

    /// Wrap a processed image returned by the service. The body is trusted to
    /// be displayable; only emptiness is checked by the caller.
    pub(crate) fn processed(bytes: Vec<u8>) -> Self {
        Self {
            file_name: DOWNLOAD_FILE_NAME.to_string(),
            mime_type: RESULT_MIME_TYPE.to_string(),
            bytes: bytes.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_heif(&self) -> bool {
        self.mime_type == "image/heic" || self.mime_type == "image/heif"
    }

    /// Pixel dimensions, when the container can be decoded locally.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        ImageReader::new(Cursor::new(self.bytes()))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

impl fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBlob")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn detect_mime_type(file_name: &str, bytes: &[u8]) -> Option<String> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);

    if let Some(ref ext) = ext {
        if HEIF_EXTENSIONS.contains(&ext.as_str()) {
            return Some(format!("image/{ext}"));
        }
    }
    if has_heif_brand(bytes) {
        return Some("image/heic".to_string());
    }
    if let Ok(format) = image::guess_format(bytes) {
        return Some(format.to_mime_type().to_string());
    }
    ext.and_then(ImageFormat::from_extension)
        .map(|format| format.to_mime_type().to_string())
}

fn has_heif_brand(bytes: &[u8]) -> bool {
    bytes.len() >= 12
        && &bytes[4..8] == b"ftyp"
        && HEIF_BRANDS.iter().any(|brand| &bytes[8..12] == *brand)
}

/// Which of the two display slots an asset occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Source,
    Result,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Result => write!(f, "result"),
        }
    }
}

/// Opaque reference to a rendered image owned by a [`DisplaySurface`].
///
/// Not `Clone`: releasing consumes the handle, so a handle cannot be
/// released twice or used after release.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct DisplayHandle(u64);

impl DisplayHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Whatever renders blobs: GPU textures in the GUI, nothing in the CLI.
pub trait DisplaySurface {
    fn create(&mut self, slot: Slot, blob: &ImageBlob) -> DisplayHandle;
    fn release(&mut self, handle: DisplayHandle);
}

/// Surface for headless use. Hands out unique ids and renders nothing.
#[derive(Debug, Default)]
pub struct NullSurface {
    next_id: u64,
}

impl DisplaySurface for NullSurface {
    fn create(&mut self, _slot: Slot, _blob: &ImageBlob) -> DisplayHandle {
        self.next_id += 1;
        DisplayHandle::new(self.next_id)
    }

    fn release(&mut self, _handle: DisplayHandle) {}
}

/// A blob together with its live display handle.
#[derive(Debug)]
pub struct ImageAsset {
    blob: ImageBlob,
    handle: DisplayHandle,
}

impl ImageAsset {
    pub fn blob(&self) -> &ImageBlob {
        &self.blob
    }

    pub fn handle(&self) -> &DisplayHandle {
        &self.handle
    }
}

/// The processed image offered for saving.
#[derive(Debug)]
pub struct DownloadArtifact<'a> {
    pub file_name: &'static str,
    pub asset: &'a ImageAsset,
}

impl DownloadArtifact<'_> {
    pub fn bytes(&self) -> &[u8] {
        self.asset.blob.bytes()
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.bytes())?;
        Ok(())
    }
}

/// Owns the source and result slots and keeps at most one live display
/// handle in each. The old handle is always released before a new one is
/// created, and both are released on drop.
pub struct AssetManager<S: DisplaySurface> {
    surface: S,
    source: Option<ImageAsset>,
    result: Option<ImageAsset>,
    /// Bumped on every source selection; identifies which source a request
    /// was issued for.
    generation: u64,
}

impl<S: DisplaySurface> AssetManager<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            source: None,
            result: None,
            generation: 0,
        }
    }

    /// Install a new source and invalidate any processed output. `None` is a
    /// no-op. Returns whether the source changed.
    pub fn select_source(&mut self, blob: Option<ImageBlob>) -> bool {
        let Some(blob) = blob else {
            return false;
        };

        self.clear_result();
        if let Some(old) = self.source.take() {
            self.surface.release(old.handle);
        }
        let handle = self.surface.create(Slot::Source, &blob);
        self.generation += 1;
        debug!(
            file = blob.file_name(),
            bytes = blob.len(),
            handle = handle.id(),
            generation = self.generation,
            "source selected"
        );
        self.source = Some(ImageAsset { blob, handle });
        true
    }

    pub fn clear_result(&mut self) {
        if let Some(old) = self.result.take() {
            debug!(handle = old.handle.id(), "result cleared");
            self.surface.release(old.handle);
        }
    }

    pub fn set_result(&mut self, blob: ImageBlob) {
        self.clear_result();
        let handle = self.surface.create(Slot::Result, &blob);
        debug!(bytes = blob.len(), handle = handle.id(), "result stored");
        self.result = Some(ImageAsset { blob, handle });
    }

    pub fn source(&self) -> Option<&ImageAsset> {
        self.source.as_ref()
    }

    pub fn result(&self) -> Option<&ImageAsset> {
        self.result.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: DisplaySurface> Drop for AssetManager<S> {
    fn drop(&mut self) {
        self.clear_result();
        if let Some(old) = self.source.take() {
            self.surface.release(old.handle);
        }
    }
}
