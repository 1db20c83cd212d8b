use std::{convert::TryFrom, fmt};

use crate::WeatherError;

/// One weather variable requested through the `current` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measurement {
    Temperature2m,
    RelativeHumidity2m,
    ApparentTemperature,
    Precipitation,
    Rain,
    Showers,
    Snowfall,
    WeatherCode,
    CloudCover,
    PressureMsl,
    SurfacePressure,
    WindSpeed10m,
    WindDirection10m,
    WindGusts10m,
}

impl Measurement {
    /// The catalog sent with every request, in wire order.
    pub const ALL: [Measurement; 14] = [
        Measurement::Temperature2m,
        Measurement::RelativeHumidity2m,
        Measurement::ApparentTemperature,
        Measurement::Precipitation,
        Measurement::Rain,
        Measurement::Showers,
        Measurement::Snowfall,
        Measurement::WeatherCode,
        Measurement::CloudCover,
        Measurement::PressureMsl,
        Measurement::SurfacePressure,
        Measurement::WindSpeed10m,
        Measurement::WindDirection10m,
        Measurement::WindGusts10m,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Measurement::Temperature2m => "temperature_2m",
            Measurement::RelativeHumidity2m => "relative_humidity_2m",
            Measurement::ApparentTemperature => "apparent_temperature",
            Measurement::Precipitation => "precipitation",
            Measurement::Rain => "rain",
            Measurement::Showers => "showers",
            Measurement::Snowfall => "snowfall",
            Measurement::WeatherCode => "weather_code",
            Measurement::CloudCover => "cloud_cover",
            Measurement::PressureMsl => "pressure_msl",
            Measurement::SurfacePressure => "surface_pressure",
            Measurement::WindSpeed10m => "wind_speed_10m",
            Measurement::WindDirection10m => "wind_direction_10m",
            Measurement::WindGusts10m => "wind_gusts_10m",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Measurement {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Measurement::ALL
            .into_iter()
            .find(|m| m.as_str() == value)
            .ok_or_else(|| WeatherError::Validation(format!("unknown measurement '{value}'")))
    }
}
