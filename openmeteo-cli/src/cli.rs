use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use openmeteo_core::{
    Coordinate, CurrentWeather, DEFAULT_BASE_URL, Measurement, WeatherClient, WeatherError,
};
use tracing::debug;

use crate::settings::Settings;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "openmeteo", version, about = "Current weather from Open-Meteo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the service base URL and API key.
    Configure,

    /// Show current weather for a coordinate.
    #[command(allow_negative_numbers = true)]
    Show {
        /// Latitude in decimal degrees, -90 to 90.
        latitude: f64,

        /// Longitude in decimal degrees, -180 to 180.
        longitude: f64,

        /// Give up after this many seconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Print the decoded response as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the measurements requested with every call.
    Catalog,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                latitude,
                longitude,
                timeout,
                json,
            } => {
                let settings = Settings::load()?;
                let weather = show(&settings, Coordinate::new(latitude, longitude), timeout).await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&weather)?);
                } else {
                    print!("{}", render(&weather));
                }
                Ok(())
            }
            Command::Catalog => {
                for measurement in Measurement::ALL {
                    println!("{measurement}");
                }
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut settings = Settings::load()?;

    let base_url = Text::new("Base URL:")
        .with_default(settings.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
        .prompt()
        .context("Failed to read base URL")?;

    let api_key = Password::new("API key (leave empty for the free tier):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    settings.update(&base_url, &api_key);

    // Reject what the client would reject, before it lands on disk.
    WeatherClient::new(settings.client_config())?;

    let path = settings.save()?;
    println!("Settings saved to {}", path.display());
    Ok(())
}

async fn show(
    settings: &Settings,
    coordinate: Coordinate,
    timeout: Option<u64>,
) -> Result<CurrentWeather, WeatherError> {
    let client = WeatherClient::new(settings.client_config())?;
    debug!(?client, "Client ready");

    let deadline = async move {
        match timeout {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending().await,
        }
    };
    let cancel = async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            () = deadline => {}
        }
    };

    client.current_until(coordinate, cancel).await
}

fn render(weather: &CurrentWeather) -> String {
    let observed = match (weather.current.observed_at(), weather.utc_offset()) {
        (Some(at), Some(offset)) => format!(
            "{} {}",
            at.with_timezone(&offset).format("%Y-%m-%d %H:%M"),
            weather.timezone_abbreviation
        ),
        (Some(at), None) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
        _ => "unknown time".to_string(),
    };

    let mut out = format!(
        "{:.4}, {:.4} ({} m) at {}\n",
        weather.latitude, weather.longitude, weather.elevation, observed
    );
    for measurement in Measurement::ALL {
        out.push_str(&format!(
            "  {:<22}{} {}\n",
            measurement.as_str(),
            weather.current.value(measurement),
            weather.current_units.unit(measurement)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["openmeteo", "show", "-33.87", "-151.21", "--timeout", "5"])
            .expect("negative numbers are coordinates, not flags");

        match cli.command {
            Command::Show {
                latitude,
                longitude,
                timeout,
                json,
            } => {
                assert_eq!(latitude, -33.87);
                assert_eq!(longitude, -151.21);
                assert_eq!(timeout, Some(5));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn render_lists_every_measurement_with_unit() {
        let weather: CurrentWeather = serde_json::from_value(serde_json::json!({
            "latitude": 52.52, "longitude": 13.42, "generationtime_ms": 0.05,
            "utc_offset_seconds": 3600, "timezone": "Europe/Berlin",
            "timezone_abbreviation": "CET", "elevation": 38.0,
            "current_units": {
                "time": "unixtime", "interval": "seconds",
                "temperature_2m": "°C", "relative_humidity_2m": "%", "apparent_temperature": "°C",
                "precipitation": "mm", "rain": "mm", "showers": "mm", "snowfall": "cm",
                "weather_code": "wmo code", "cloud_cover": "%", "pressure_msl": "hPa",
                "surface_pressure": "hPa", "wind_speed_10m": "km/h", "wind_direction_10m": "°",
                "wind_gusts_10m": "km/h"
            },
            "current": {
                "time": 1700000000, "interval": 900,
                "temperature_2m": 4.5, "relative_humidity_2m": 80, "apparent_temperature": 1.5,
                "precipitation": 0, "rain": 0, "showers": 0, "snowfall": 0,
                "weather_code": 3, "cloud_cover": 100, "pressure_msl": 1012.5,
                "surface_pressure": 1007.5, "wind_speed_10m": 10, "wind_direction_10m": 240,
                "wind_gusts_10m": 22.5
            }
        }))
        .unwrap();

        let text = render(&weather);

        assert!(text.starts_with("52.5200, 13.4200 (38 m) at 2023-11-14 23:13 CET"));
        assert!(text.contains("temperature_2m"));
        assert!(text.contains("4.5 °C"));
        assert!(text.contains("22.5 km/h"));
        assert_eq!(text.lines().count(), 1 + Measurement::ALL.len());
    }
}
