use crate::{
    Config, WeatherRequest, WeatherResult,
    error::{Result, Stage, WeatherError},
    provider::{open_meteo::OpenMeteoProvider, wttr::WttrProvider},
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub mod open_meteo;
pub mod wttr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderId {
    #[default]
    OpenMeteo,
    Wttr,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenMeteo => "open-meteo",
            ProviderId::Wttr => "wttr",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenMeteo, ProviderId::Wttr]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "open-meteo" => Ok(ProviderId::OpenMeteo),
            "wttr" => Ok(ProviderId::Wttr),
            _ => Err(WeatherError::validation(format!(
                "Unknown provider '{value}'. Supported providers: open-meteo, wttr."
            ))),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherResult>;
}

/// Construct a provider for `id`, pointed at the endpoints in `config`.
pub fn provider_from_config(id: ProviderId, config: &Config) -> Result<Box<dyn WeatherProvider>> {
    let endpoints = &config.endpoints;

    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::OpenMeteo => Box::new(OpenMeteoProvider::with_endpoints(
            endpoints.geocoding.clone(),
            endpoints.forecast.clone(),
        )),
        ProviderId::Wttr => Box::new(WttrProvider::with_base_url(endpoints.wttr.clone())?),
    };

    Ok(boxed)
}

/// Send `request` and return the body of a 200 response.
///
/// The response is consumed here on every path, so nothing outlives the call.
pub(crate) async fn fetch_body(request: RequestBuilder, stage: Stage) -> Result<String> {
    let res = request
        .send()
        .await
        .map_err(|source| WeatherError::Network { stage, source })?;

    let status = res.status();
    if status != StatusCode::OK {
        // Body is only for the log; a failed read must not mask the status.
        let body = res.text().await.unwrap_or_default();
        tracing::debug!("{stage} returned {status}: {}", truncate_body(&body));
        return Err(WeatherError::HttpStatus { stage, status: status.as_u16() });
    }

    res.text()
        .await
        .map_err(|source| WeatherError::Network { stage, source })
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str, stage: Stage) -> Result<T> {
    serde_json::from_str(body).map_err(|source| WeatherError::Decode { stage, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
