use std::collections::HashMap;

use filmgrain_core::asset::{DisplayHandle, DisplaySurface, ImageBlob, Slot};
use tracing::{debug, warn};

/// Longest edge uploaded to the GPU; larger photos are downscaled for display.
const MAX_TEXTURE_EDGE: u32 = 2048;

/// Display surface backed by egui textures. Dropping a `TextureHandle` frees
/// the GPU texture, so releasing a display handle just forgets the texture.
pub struct TextureSurface {
    ctx: egui::Context,
    next_id: u64,
    textures: HashMap<u64, egui::TextureHandle>,
}

impl TextureSurface {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            next_id: 0,
            textures: HashMap::new(),
        }
    }

    /// Texture for a handle, if the blob could be decoded locally.
    pub fn texture(&self, handle: &DisplayHandle) -> Option<&egui::TextureHandle> {
        self.textures.get(&handle.id())
    }
}

impl DisplaySurface for TextureSurface {
    fn create(&mut self, slot: Slot, blob: &ImageBlob) -> DisplayHandle {
        self.next_id += 1;
        let id = self.next_id;

        match blob_to_color_image(blob) {
            Some(image) => {
                let texture =
                    self.ctx
                        .load_texture(format!("{slot}-{id}"), image, egui::TextureOptions::LINEAR);
                self.textures.insert(id, texture);
                debug!(%slot, id, "texture created");
            }
            None => warn!(%slot, file = blob.file_name(), "no local preview for this format"),
        }

        DisplayHandle::new(id)
    }

    fn release(&mut self, handle: DisplayHandle) {
        if self.textures.remove(&handle.id()).is_some() {
            debug!(id = handle.id(), "texture released");
        }
    }
}

/// Decode a blob into an egui ColorImage, downscaling oversized images.
fn blob_to_color_image(blob: &ImageBlob) -> Option<egui::ColorImage> {
    let mut img = image::load_from_memory(blob.bytes()).ok()?;
    if img.width() > MAX_TEXTURE_EDGE || img.height() > MAX_TEXTURE_EDGE {
        img = img.thumbnail(MAX_TEXTURE_EDGE, MAX_TEXTURE_EDGE);
    }
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Some(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
