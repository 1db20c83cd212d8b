use std::fmt::Debug;

use async_trait::async_trait;

use crate::{Coordinate, CurrentWeather, WeatherClient, WeatherError};

/// Anything that can answer "what is the weather at this coordinate right now".
///
/// [`WeatherClient`] is the real implementation; callers that want to stub the
/// service out entirely can hold a `Box<dyn WeatherApi>` instead.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn current(&self, coordinate: Coordinate) -> Result<CurrentWeather, WeatherError>;
}

#[async_trait]
impl WeatherApi for WeatherClient {
    async fn current(&self, coordinate: Coordinate) -> Result<CurrentWeather, WeatherError> {
        WeatherClient::current(self, coordinate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;

    #[tokio::test]
    async fn trait_object_validates_before_any_io() {
        let client = WeatherClient::new(ClientConfig::default()).unwrap();
        let api: Box<dyn WeatherApi> = Box::new(client);

        let err = api.current(Coordinate::new(120.0, 0.0)).await.unwrap_err();
        assert!(matches!(err, WeatherError::Validation(_)));
    }
}
