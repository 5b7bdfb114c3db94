//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Weather providers (Open-Meteo with geocoding, wttr.in)
//! - The WMO weather-code classifier and condition tags
//! - Shared domain models and the error taxonomy
//! - Text renderers (table, ASCII art, compact)
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;

pub use condition::{Condition, classify};
pub use config::{Config, Endpoints};
pub use error::{Stage, WeatherError};
pub use model::{
    Coordinates, CurrentWeather, DayCount, DayForecast, Units, WeatherRequest, WeatherResult,
};
pub use provider::{ProviderId, WeatherProvider, provider_from_config};
pub use render::Style;
