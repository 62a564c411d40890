//! HTTP client for the render server.
//!
//! Every call runs under a client-side deadline: the request future is wrapped
//! in `tokio::time::timeout`, so expiry drops (and thereby aborts) the
//! in-flight request. The timer lives inside that future and is released on
//! every exit path.

use crate::builder::RequestBuilder;
use crate::{ClientConfig, Error, Result, HEALTH_PATH};
use log::{debug, warn};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection to a render server.
///
/// Cheap to share by reference; independent builders and health probes may
/// run concurrently against the same client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    config: ClientConfig,
}

/// Status and fully buffered body of a completed exchange
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Success bytes, or a server error with the best message available.
    pub fn into_render_result(self) -> Result<Vec<u8>> {
        if self.is_success() {
            return Ok(self.body);
        }
        let message = match serde_json::from_slice::<ErrorBody>(&self.body) {
            Ok(parsed) => parsed.error,
            Err(_) => format!("HTTP {}", self.status),
        };
        warn!("render failed with status {}: {}", self.status, message);
        Err(Error::ServerError {
            status: self.status,
            message,
        })
    }
}

impl Client {
    /// Create a client for `base_url`. Trailing slashes are removed.
    pub fn new(base_url: &str, config: ClientConfig) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let parsed = url::Url::parse(&base_url)
            .map_err(|e| Error::ConfigError(format!("invalid base URL `{}`: {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::ConfigError(format!(
                "unsupported scheme `{}` in base URL (expected http or https)",
                parsed.scheme()
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("rfrender/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Create a client with [`ClientConfig::default`].
    pub fn with_defaults(base_url: &str) -> Result<Self> {
        Self::new(base_url, ClientConfig::default())
    }

    /// Normalized base URL (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a server path such as `/render`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a render job from an HTML document.
    pub fn render_html(&self, html: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::from_html(self, html.into())
    }

    /// Start a render job from a page the server will fetch.
    pub fn render_url(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::from_url(self, url.into())
    }

    /// Best-effort liveness probe. Any failure, including a timeout or a
    /// non-2xx status, yields `false`.
    pub async fn health(&self) -> bool {
        match self.execute(Method::GET, HEALTH_PATH, None::<&()>).await {
            Ok(raw) => {
                debug!("health check returned {}", raw.status);
                raw.is_success()
            }
            Err(e) => {
                debug!("health check failed: {}", e);
                false
            }
        }
    }

    pub(crate) async fn execute_post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<RawResponse> {
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Perform one exchange under the configured deadline. Any completed
    /// exchange is `Ok`, whatever its status.
    async fn execute<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> Result<RawResponse> {
        let url = self.endpoint(path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        debug!("{} {}", method, url);

        let exchange = async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(RawResponse {
                status,
                body: body.to_vec(),
            })
        };

        match tokio::time::timeout(Duration::from_millis(self.config.timeout_ms), exchange).await {
            Ok(Ok(raw)) => {
                debug!("{} {} -> {} ({} bytes)", method, url, raw.status, raw.body.len());
                Ok(raw)
            }
            Ok(Err(e)) => {
                let message = format!("{} {} failed: {}", method, url, e);
                warn!("{}", message);
                Err(Error::connection(message, e))
            }
            Err(elapsed) => {
                let message = format!("request timed out after {}ms", self.config.timeout_ms);
                warn!("{} {}: {}", method, url, message);
                Err(Error::connection(message, elapsed))
            }
        }
    }
}
