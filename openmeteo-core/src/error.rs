use thiserror::Error;

/// Boxed error coming out of an [`HttpTransport`](crate::HttpTransport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong while building a client or fetching weather.
///
/// None of these are retried internally, and the client stays usable after
/// any of them.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Bad construction input: base URL or missing transport.
    #[error("configuration error: {0}")]
    Config(String),

    /// Call arguments rejected before any network I/O.
    #[error("validation error: {0}")]
    Validation(String),

    /// Network, DNS or connection failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The service answered with a non-200 status.
    #[error("API error: {0}")]
    Api(String),

    /// Malformed JSON on either the success or the error path.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The caller's cancellation signal fired before the response arrived.
    #[error("request cancelled")]
    Cancelled,
}

impl WeatherError {
    pub(crate) fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Transport(err.into())
    }
}

// The request URL carries `apikey`, so it never makes it into the error.
impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.without_url())
    }
}
