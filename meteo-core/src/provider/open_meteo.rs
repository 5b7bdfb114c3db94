use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    condition::classify,
    error::{Result, Stage, WeatherError},
    model::{Coordinates, DayCount, DayForecast, Units, WeatherRequest, WeatherResult},
    provider::{decode, fetch_body},
};

use super::WeatherProvider;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code";

/// Open-Meteo: geocode the query, then fetch current conditions and a daily forecast.
///
/// No request timeout is set; the HTTP client defaults apply.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoProvider {
    pub fn with_endpoints(geocoding_url: impl Into<String>, forecast_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
        }
    }

    /// Resolve free text to coordinates and the provider's display name.
    pub async fn geocode(&self, location: &str) -> Result<Coordinates> {
        let request = self
            .http
            .get(&self.geocoding_url)
            .query(&[("name", location), ("count", "1")]);

        let body = fetch_body(request, Stage::Geocoding).await?;
        let parsed: GeoResponse = decode(&body, Stage::Geocoding)?;

        let first = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(location.to_string()))?;

        info!(
            "Resolved {location:?} to {} ({:.4}, {:.4})",
            first.name, first.latitude, first.longitude
        );

        Ok(Coordinates {
            latitude: first.latitude,
            longitude: first.longitude,
            name: first.name,
        })
    }

    /// Fetch current conditions and up to `days` daily entries for `coords`.
    pub async fn forecast(
        &self,
        coords: &Coordinates,
        units: Units,
        days: DayCount,
    ) -> Result<WeatherResult> {
        let latitude = format!("{:.6}", coords.latitude);
        let longitude = format!("{:.6}", coords.longitude);
        let forecast_days = days.to_string();

        let request = self.http.get(&self.forecast_url).query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current", CURRENT_FIELDS),
            ("daily", DAILY_FIELDS),
            ("temperature_unit", units.temperature_token()),
            ("wind_speed_unit", units.wind_token()),
            ("forecast_days", forecast_days.as_str()),
        ]);

        debug!("Requesting {forecast_days}-day {units} forecast for {latitude},{longitude}");

        let body = fetch_body(request, Stage::Forecast).await?;
        let parsed: ForecastResponse = decode(&body, Stage::Forecast)?;

        Ok(parsed.into_result(coords.name.clone(), units, days))
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: i64,
    wind_speed_10m: f64,
    weather_code: i64,
}

#[derive(Debug, Default, Deserialize)]
struct OmDaily {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weather_code: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: OmCurrent,
    #[serde(default)]
    daily: OmDaily,
}

impl ForecastResponse {
    /// The daily arrays are parallel; walk them together, stopping at `days`
    /// or at the end of the shortest array.
    fn into_result(self, location: String, units: Units, days: DayCount) -> WeatherResult {
        let OmDaily { time, temperature_2m_max, temperature_2m_min, weather_code } = self.daily;

        let forecasts = time
            .into_iter()
            .zip(temperature_2m_max)
            .zip(temperature_2m_min)
            .zip(weather_code)
            .take(days.get())
            .map(|(((date, temp_max), temp_min), code)| DayForecast {
                date,
                temp_max,
                temp_min,
                condition: classify(code).to_string(),
            })
            .collect();

        WeatherResult {
            location,
            temperature: self.current.temperature_2m,
            units,
            condition: classify(self.current.weather_code).to_string(),
            humidity: self.current.relative_humidity_2m,
            wind_speed: self.current.wind_speed_10m,
            wind_dir: None,
            forecasts,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherResult> {
        let coords = self.geocode(&request.address).await?;
        self.forecast(&coords, request.units, request.days).await
    }
}
