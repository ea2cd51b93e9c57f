use filmgrain_core::asset::ImageBlob;
use filmgrain_core::config::EndpointConfig;

/// UI-only state that does not belong to the processing session.
#[derive(Default)]
pub struct UIState {
    pub endpoint: EndpointConfig,

    /// Pixel size of the current source, read once when it is loaded.
    pub source_dimensions: Option<(u32, u32)>,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn source_loaded(&mut self, blob: &ImageBlob) {
        self.source_dimensions = blob.dimensions();
        let dims = self
            .source_dimensions
            .map(|(w, h)| format!("{w}x{h}"))
            .unwrap_or_else(|| "no local preview".to_string());
        self.add_log(format!(
            "Opened: {} ({}, {dims})",
            blob.file_name(),
            blob.mime_type()
        ));
    }
}
