use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::client::endpoints::{self, DebugAction, LogTail, ObjectKind};
use crate::client::server::DebugServer;
use crate::compositor::SourceImage;
use crate::config::ServerConfig;
use crate::foundation::error::{InspectError, InspectResult};

/// [`DebugServer`] over blocking HTTP.
#[derive(Debug, Clone)]
pub struct HttpDebugServer {
    client: Client,
    base: String,
}

impl HttpDebugServer {
    /// Build a client for the server described by `cfg`.
    pub fn new(cfg: &ServerConfig) -> InspectResult<Self> {
        let client = Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| InspectError::network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base: cfg.url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn get(&self, path: &str) -> InspectResult<Response> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let res = self
            .client
            .get(&url)
            .send()
            .map_err(|e| InspectError::network(format!("GET {url} failed: {e}")))?;
        let status = res.status();
        if !status.is_success() {
            return Err(InspectError::network(format!("GET {url}: status {status}")));
        }
        Ok(res)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> InspectResult<T> {
        let body = self
            .get(path)?
            .text()
            .map_err(|e| InspectError::network(format!("read body of {path}: {e}")))?;
        serde_json::from_str(&body)
            .map_err(|e| InspectError::serde(format!("invalid JSON from {path}: {e}")))
    }

    fn get_image(&self, path: &str) -> InspectResult<SourceImage> {
        let bytes = self
            .get(path)?
            .bytes()
            .map_err(|e| InspectError::network(format!("read body of {path}: {e}")))?;
        SourceImage::decode(&bytes)
    }

    fn get_ignored(&self, path: &str) -> InspectResult<()> {
        self.get(path).map(drop)
    }
}

impl DebugServer for HttpDebugServer {
    fn begin(&mut self) -> InspectResult<()> {
        self.get_ignored(&endpoints::begin_path())
    }

    fn step(&mut self, action: DebugAction) -> InspectResult<()> {
        self.get_ignored(&endpoints::step_path(action))
    }

    fn log_tail(&mut self, lines: u32) -> InspectResult<Vec<String>> {
        let tail: LogTail = self.get_json(&endpoints::log_path(lines))?;
        Ok(tail.log)
    }

    fn framebuffer_color(&mut self, fbo: u32, attachment: u32) -> InspectResult<SourceImage> {
        // Query suffix defeats intermediate caches between steps.
        let path = format!(
            "{}?{}",
            endpoints::framebuffer_color_path(fbo, attachment),
            cache_bust()
        );
        self.get_image(&path)
    }

    fn list(&mut self, kind: ObjectKind) -> InspectResult<Vec<String>> {
        let path = endpoints::list_path(kind);
        let items: Vec<serde_json::Value> = self.get_json(&path)?;
        items
            .into_iter()
            .map(|v| match v {
                serde_json::Value::String(s) => Ok(s),
                serde_json::Value::Number(n) => Ok(n.to_string()),
                other => Err(InspectError::serde(format!(
                    "unexpected entry in {path}: {other}"
                ))),
            })
            .collect()
    }

    fn detail(&mut self, kind: ObjectKind, name: &str) -> InspectResult<serde_json::Value> {
        self.get_json(&endpoints::detail_path(kind, name)?)
    }

    fn texture_image(&mut self, name: &str) -> InspectResult<SourceImage> {
        self.get_image(&endpoints::texture_image_path(name)?)
    }
}

fn cache_bust() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
