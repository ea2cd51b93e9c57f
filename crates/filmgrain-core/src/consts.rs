/// Path of the grain processing endpoint, relative to the configured base URL.
pub const PROCESS_PATH: &str = "/process";

/// Path of the service health endpoint.
pub const HEALTH_PATH: &str = "/health";

/// Multipart field carrying the source image bytes.
pub const FILE_FIELD: &str = "file";

/// Suggested file name for the downloadable result.
pub const DOWNLOAD_FILE_NAME: &str = "grained.png";

/// MIME type of the processed image returned by the service.
pub const RESULT_MIME_TYPE: &str = "image/png";

/// Base URL used when no config overrides it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Grain synthesis on large photos is slow; allow two minutes per request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Extensions of the still-image containers the `image` crate cannot sniff
/// but the service accepts.
pub const HEIF_EXTENSIONS: [&str; 2] = ["heic", "heif"];

/// Slider range for `scale`.
pub const SCALE_RANGE: (f64, f64) = (0.1, 5.0);

/// Slider range for `grain_power`.
pub const GRAIN_POWER_RANGE: (f64, f64) = (0.0, 5.0);

/// Slider range shared by `shadows`, `highs` and `grain_sat`.
pub const UNIT_RANGE: (f64, f64) = (0.0, 1.0);

/// Slider step for every exposed numeric control.
pub const SLIDER_STEP: f64 = 0.1;
