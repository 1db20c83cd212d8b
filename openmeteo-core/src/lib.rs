//! Client library for the Open-Meteo current weather API.
//!
//! This crate defines:
//! - Client configuration and its validation
//! - The pluggable HTTP transport the client sends requests through
//! - The typed `current` payload and the fixed measurement catalog
//!
//! It is used by `openmeteo-cli`, but has no I/O of its own beyond the one
//! request per [`WeatherClient::current`] call.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod measurement;
pub mod model;
pub mod transport;

pub use api::WeatherApi;
pub use client::WeatherClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{BoxError, WeatherError};
pub use measurement::Measurement;
pub use model::{Coordinate, Current, CurrentUnits, CurrentWeather};
pub use transport::{
    HttpTransport, ReqwestTransport, ResponseBody, TransportRequest, TransportResponse,
};
