use std::{fmt, future::Future, sync::Arc, time::Duration};

use reqwest::{
    StatusCode, Url,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use tracing::{debug, instrument, warn};

use crate::{
    ClientConfig, Coordinate, CurrentWeather, Measurement, WeatherError,
    model::ErrorBody,
    transport::{HttpTransport, TransportRequest, TransportResponse},
};

const FORECAST_PATH: [&str; 2] = ["v1", "forecast"];

/// Client for the Open-Meteo `/v1/forecast` endpoint, current conditions only.
///
/// Cheap to clone; clones share the same transport.
#[derive(Clone)]
pub struct WeatherClient {
    endpoint: Url,
    api_key: Option<String>,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("transport", &self.transport)
            .finish()
    }
}

impl WeatherClient {
    /// Validates `config` and builds a client. Performs no network I/O.
    pub fn new(config: ClientConfig) -> Result<Self, WeatherError> {
        let endpoint = forecast_endpoint(&config.base_url)?;
        let api_key = config.effective_api_key().map(str::to_owned);
        let transport = config
            .transport
            .ok_or_else(|| WeatherError::Config("missing HTTP client".to_string()))?;

        Ok(Self {
            endpoint,
            api_key,
            transport,
        })
    }

    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(ClientConfig::default())
    }

    /// `<base>/v1/forecast`, without a query.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches current conditions for `coordinate`.
    pub async fn current(&self, coordinate: Coordinate) -> Result<CurrentWeather, WeatherError> {
        self.current_until(coordinate, std::future::pending()).await
    }

    /// Like [`current`](Self::current), but gives up with
    /// [`WeatherError::Cancelled`] once `timeout` has elapsed.
    pub async fn current_with_timeout(
        &self,
        coordinate: Coordinate,
        timeout: Duration,
    ) -> Result<CurrentWeather, WeatherError> {
        self.current_until(coordinate, tokio::time::sleep(timeout)).await
    }

    /// Fetches current conditions unless `cancel` completes first.
    ///
    /// On cancellation the in-flight request is dropped, which closes its
    /// connection, and [`WeatherError::Cancelled`] is returned.
    #[instrument(
        skip(self, cancel),
        fields(lat = %coordinate.latitude, lon = %coordinate.longitude)
    )]
    pub async fn current_until<F>(
        &self,
        coordinate: Coordinate,
        cancel: F,
    ) -> Result<CurrentWeather, WeatherError>
    where
        F: Future<Output = ()> + Send,
    {
        coordinate.validate()?;

        let request = self.build_request(&coordinate);
        debug!(endpoint = %self.endpoint, "Fetching current weather");

        tokio::select! {
            biased;

            () = cancel => {
                warn!("Current weather request cancelled");
                Err(WeatherError::Cancelled)
            }
            result = self.execute(request) => result,
        }
    }

    fn build_request(&self, coordinate: &Coordinate) -> TransportRequest {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            // f64's Display is the shortest round-trip form and never uses an exponent.
            query
                .append_pair("latitude", &coordinate.latitude.to_string())
                .append_pair("longitude", &coordinate.longitude.to_string());
            for measurement in Measurement::ALL {
                query.append_pair("current", measurement.as_str());
            }
            query
                .append_pair("timeformat", "unixtime")
                .append_pair("temperature_unit", "celsius")
                .append_pair("wind_speed_unit", "kmh")
                .append_pair("precipitation_unit", "mm");
            if let Some(key) = &self.api_key {
                query.append_pair("apikey", key);
            }
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        TransportRequest { url, headers }
    }

    async fn execute(&self, request: TransportRequest) -> Result<CurrentWeather, WeatherError> {
        let TransportResponse { status, mut body } = self.transport.get(request).await?;
        let bytes = body.read_to_end().await?;
        drop(body);

        debug!(status = %status, len = bytes.len(), "Received response");
        decode_response(status, &bytes)
    }
}

fn forecast_endpoint(base_url: &str) -> Result<Url, WeatherError> {
    let invalid = || WeatherError::Config(format!("invalid base URL '{base_url}'"));

    let mut url = Url::parse(base_url).map_err(|_| invalid())?;
    if url.scheme().is_empty() || url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }

    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .extend(FORECAST_PATH);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

fn decode_response(status: StatusCode, body: &[u8]) -> Result<CurrentWeather, WeatherError> {
    if status == StatusCode::OK {
        return Ok(serde_json::from_slice(body)?);
    }

    warn!(status = %status, "Open-Meteo returned an error status");
    let unexpected = || WeatherError::Api(format!("unexpected status {}", status.as_u16()));

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: true,
            reason,
        }) if !reason.is_empty() => Err(WeatherError::Api(reason)),
        Ok(_) => Err(unexpected()),
        // Valid JSON of the wrong shape is a decode failure; a body that is not
        // JSON at all (empty, HTML, plain text) only tells us the status.
        Err(err) if err.is_data() => Err(WeatherError::Decode(err)),
        Err(_) => Err(unexpected()),
    }
}
