use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Measurement, WeatherError};

/// A (latitude, longitude) pair in decimal degrees.
///
/// Range checks happen when the coordinate is used, see [`Coordinate::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Latitude must lie in [-90, 90] and longitude in [-180, 180]. NaN never does.
    pub fn validate(&self) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(WeatherError::Validation(format!(
                "latitude {} out of range, must be between -90 and 90",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(WeatherError::Validation(format!(
                "longitude {} out of range, must be between -180 and 180",
                self.longitude
            )));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Decoded body of a successful `/v1/forecast` call.
///
/// Fields the service leaves out or sends as `null` decode to their zero value,
/// so a model that lacks one variable does not fail the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeather {
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(rename = "generationtime_ms", deserialize_with = "null_as_default")]
    pub generation_time_ms: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub utc_offset_seconds: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub timezone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timezone_abbreviation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub elevation: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub current_units: CurrentUnits,
    #[serde(deserialize_with = "null_as_default")]
    pub current: Current,
}

impl CurrentWeather {
    /// Offset of the reported timezone, if the service sent a sane one.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_seconds)
    }
}

/// Unit label for every field of [`Current`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentUnits {
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub interval: String,
    #[serde(deserialize_with = "null_as_default")]
    pub temperature_2m: String,
    #[serde(deserialize_with = "null_as_default")]
    pub relative_humidity_2m: String,
    #[serde(deserialize_with = "null_as_default")]
    pub apparent_temperature: String,
    #[serde(deserialize_with = "null_as_default")]
    pub precipitation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub showers: String,
    #[serde(deserialize_with = "null_as_default")]
    pub snowfall: String,
    #[serde(deserialize_with = "null_as_default")]
    pub weather_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_cover: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pressure_msl: String,
    #[serde(deserialize_with = "null_as_default")]
    pub surface_pressure: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wind_speed_10m: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wind_direction_10m: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wind_gusts_10m: String,
}

impl CurrentUnits {
    pub fn unit(&self, measurement: Measurement) -> &str {
        match measurement {
            Measurement::Temperature2m => &self.temperature_2m,
            Measurement::RelativeHumidity2m => &self.relative_humidity_2m,
            Measurement::ApparentTemperature => &self.apparent_temperature,
            Measurement::Precipitation => &self.precipitation,
            Measurement::Rain => &self.rain,
            Measurement::Showers => &self.showers,
            Measurement::Snowfall => &self.snowfall,
            Measurement::WeatherCode => &self.weather_code,
            Measurement::CloudCover => &self.cloud_cover,
            Measurement::PressureMsl => &self.pressure_msl,
            Measurement::SurfacePressure => &self.surface_pressure,
            Measurement::WindSpeed10m => &self.wind_speed_10m,
            Measurement::WindDirection10m => &self.wind_direction_10m,
            Measurement::WindGusts10m => &self.wind_gusts_10m,
        }
    }
}

/// Observed values. `time` is unix seconds, `interval` is seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Current {
    #[serde(deserialize_with = "null_as_default")]
    pub time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub interval: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub temperature_2m: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub relative_humidity_2m: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub apparent_temperature: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub precipitation: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub rain: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub showers: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub snowfall: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub weather_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_cover: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub pressure_msl: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub surface_pressure: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub wind_speed_10m: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub wind_direction_10m: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub wind_gusts_10m: f64,
}

impl Current {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }

    pub fn value(&self, measurement: Measurement) -> f64 {
        match measurement {
            Measurement::Temperature2m => self.temperature_2m,
            Measurement::RelativeHumidity2m => self.relative_humidity_2m,
            Measurement::ApparentTemperature => self.apparent_temperature,
            Measurement::Precipitation => self.precipitation,
            Measurement::Rain => self.rain,
            Measurement::Showers => self.showers,
            Measurement::Snowfall => self.snowfall,
            Measurement::WeatherCode => self.weather_code as f64,
            Measurement::CloudCover => self.cloud_cover,
            Measurement::PressureMsl => self.pressure_msl,
            Measurement::SurfacePressure => self.surface_pressure,
            Measurement::WindSpeed10m => self.wind_speed_10m,
            Measurement::WindDirection10m => self.wind_direction_10m,
            Measurement::WindGusts10m => self.wind_gusts_10m,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Body the service sends alongside a non-200 status.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub reason: String,
}
