use std::{fmt, sync::Arc};

use crate::transport::{HttpTransport, ReqwestTransport};

/// Public Open-Meteo origin.
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Construction input for [`WeatherClient`](crate::WeatherClient).
///
/// Start from [`ClientConfig::default`] and override what you need:
///
/// ```
/// use openmeteo_core::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("https://customer-api.open-meteo.com")
///     .with_api_key("secret");
/// assert_eq!(config.api_key.as_deref(), Some("secret"));
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Service origin. Must be an absolute URL with scheme and host.
    pub base_url: String,

    /// Sent as `apikey` when present and non-empty.
    pub api_key: Option<String>,

    /// `None` is rejected at construction time.
    pub transport: Option<Arc<dyn HttpTransport>>,
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// The key to send, if any. Empty keys count as absent.
    pub(crate) fn effective_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            transport: Some(Arc::new(ReqwestTransport::default())),
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("transport", &self.transport)
            .finish()
    }
}
