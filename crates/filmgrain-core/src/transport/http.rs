use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::EndpointConfig;
use crate::consts::{FILE_FIELD, HEALTH_PATH, PROCESS_PATH};
use crate::error::{FilmGrainError, Result};
use crate::session::ProcessRequest;

use super::Transport;

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Blocking HTTP client for the grain service.
///
/// Must not be used from inside an async runtime; the GUI drives it from a
/// dedicated worker thread.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| FilmGrainError::InvalidEndpoint(format!("{}: {e}", config.base_url)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Query `GET /health`. Returns the reported status when it is `ok`.
    pub fn health(&self) -> Result<String> {
        let url = self.url(HEALTH_PATH);
        debug!(%url, "health check");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FilmGrainError::ServerStatus {
                status: status.as_u16(),
            });
        }

        let body: HealthResponse = response.json()?;
        if body.status == "ok" {
            Ok(body.status)
        } else {
            Err(FilmGrainError::Unhealthy(body.status))
        }
    }
}

/// Multipart body: the image under `file`, then one text field per parameter.
fn build_form(request: &ProcessRequest) -> Result<Form> {
    let source = &request.source;
    let part = Part::bytes(source.bytes().to_vec())
        .file_name(source.file_name().to_string())
        .mime_str(source.mime_type())?;

    let form = request
        .form_fields()
        .into_iter()
        .fold(Form::new().part(FILE_FIELD, part), |form, (name, value)| {
            form.text(name, value)
        });
    Ok(form)
}

impl Transport for HttpTransport {
    fn send(&self, request: &ProcessRequest) -> Result<Vec<u8>> {
        let url = self.url(PROCESS_PATH);
        let form = build_form(request)?;
        info!(%url, file = request.source.file_name(), "uploading");

        let response = self.client.post(&url).multipart(form).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FilmGrainError::ServerStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes()?;
        debug!(bytes = bytes.len(), "response received");
        Ok(bytes.to_vec())
    }
}
