use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Result, Stage, WeatherError},
    model::{CurrentWeather, WeatherRequest, WeatherResult},
    provider::{decode, fetch_body},
};

use super::WeatherProvider;

pub const WTTR_URL: &str = "https://wttr.in";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// wttr.in: takes the location text directly and reports current conditions only.
///
/// Requests time out after ten seconds. Dropping the future returned by
/// [`WttrProvider::fetch`] aborts the request in flight.
#[derive(Debug, Clone)]
pub struct WttrProvider {
    http: Client,
    base_url: Url,
}

impl WttrProvider {
    pub fn with_base_url(base_url: impl AsRef<str>) -> Result<Self> {
        let raw = base_url.as_ref();
        let base_url = Url::parse(raw)
            .map_err(|e| WeatherError::config(format!("invalid wttr.in URL '{raw}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(WeatherError::config(format!("invalid wttr.in URL '{raw}': not a base URL")));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| WeatherError::Network { stage: Stage::Wttr, source })?;

        Ok(Self { http, base_url })
    }

    /// Current conditions for `location` (city, airport code or coordinates).
    pub async fn fetch(&self, location: &str) -> Result<CurrentWeather> {
        if location.is_empty() {
            return Err(WeatherError::EmptyLocation);
        }

        // The location is one path segment; wttr.in reads `,` and `@` in it literally.
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| WeatherError::config(format!("invalid wttr.in URL '{}'", self.base_url)))?
            .pop_if_empty()
            .push(location);
        debug!("Requesting {url}");

        let request = self.http.get(url).query(&[("format", "j1")]);
        let body = fetch_body(request, Stage::Wttr).await?;
        let parsed: WttrResponse = decode(&body, Stage::Wttr)?;

        parsed.into_current(location)
    }
}

#[derive(Debug, Deserialize)]
struct WttrResponse {
    #[serde(default)]
    current_condition: Vec<WttrCurrent>,
    #[serde(default)]
    nearest_area: Vec<WttrArea>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WttrCurrent {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "temp_F")]
    temp_f: String,
    humidity: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    #[serde(rename = "windspeedMiles")]
    windspeed_miles: String,
    #[serde(rename = "winddir16Point")]
    winddir_16_point: String,
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrArea {
    #[serde(rename = "areaName", default)]
    area_name: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrValue {
    value: String,
}

impl WttrResponse {
    fn into_current(self, fallback_location: &str) -> Result<CurrentWeather> {
        let cc = self.current_condition.into_iter().next().ok_or(WeatherError::NoData)?;

        let location = self
            .nearest_area
            .into_iter()
            .next()
            .and_then(|area| area.area_name.into_iter().next())
            .map(|name| name.value)
            .unwrap_or_else(|| fallback_location.to_string());

        let conditions = cc
            .weather_desc
            .into_iter()
            .next()
            .map(|desc| desc.value)
            .unwrap_or_default();

        Ok(CurrentWeather {
            location,
            temp_c: lenient_int("temp_C", &cc.temp_c),
            temp_f: lenient_int("temp_F", &cc.temp_f),
            conditions,
            humidity: lenient_int("humidity", &cc.humidity),
            wind_kmph: lenient_int("windspeedKmph", &cc.windspeed_kmph),
            wind_mph: lenient_int("windspeedMiles", &cc.windspeed_miles),
            wind_dir: cc.winddir_16_point,
        })
    }
}

/// Read the leading integer of `raw`, or 0 if there is none.
///
/// wttr.in sends numbers as strings; a value that does not parse is logged and
/// treated as zero instead of failing the whole lookup.
fn lenient_int(field: &str, raw: &str) -> i64 {
    let s = raw.trim_start();
    let sign = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();

    match s[..sign + digits].parse() {
        Ok(value) => value,
        Err(_) => {
            debug!("{field}: {raw:?} is not an integer, using 0");
            0
        }
    }
}

#[async_trait]
impl WeatherProvider for WttrProvider {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherResult> {
        if request.days.get() > 1 {
            debug!("wttr.in reports current conditions only; ignoring {} forecast days", request.days);
        }
        let current = self.fetch(&request.address).await?;
        Ok(current.into_result(request.units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{any, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn london() -> serde_json::Value {
        json!({
            "current_condition": [{
                "temp_C": "14",
                "temp_F": "57",
                "humidity": "82",
                "windspeedKmph": "19",
                "windspeedMiles": "12",
                "winddir16Point": "SW",
                "weatherDesc": [{"value": "Light rain"}]
            }],
            "nearest_area": [{"areaName": [{"value": "London"}]}]
        })
    }

    async fn mount(server: &MockServer, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("format", "j1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn lenient_int_reads_leading_integer() {
        assert_eq!(lenient_int("t", "14"), 14);
        assert_eq!(lenient_int("t", "-3"), -3);
        assert_eq!(lenient_int("t", " +7"), 7);
        assert_eq!(lenient_int("t", "12abc"), 12);
    }

    #[test]
    fn lenient_int_defaults_to_zero() {
        for raw in ["", "warm", "-", "n/a", "99999999999999999999999"] {
            assert_eq!(lenient_int("t", raw), 0, "{raw:?}");
        }
    }

    #[tokio::test]
    async fn fetch_decodes_current_condition() {
        let server = MockServer::start().await;
        mount(&server, "/london", london()).await;

        let provider = WttrProvider::with_base_url(server.uri()).unwrap();
        let weather = provider.fetch("london").await.unwrap();

        assert_eq!(
            weather,
            CurrentWeather {
                location: "London".into(),
                temp_c: 14,
                temp_f: 57,
                conditions: "Light rain".into(),
                humidity: 82,
                wind_kmph: 19,
                wind_mph: 12,
                wind_dir: "SW".into(),
            }
        );
    }

    #[tokio::test]
    async fn fetch_path_escapes_location() {
        let server = MockServer::start().await;
        mount(&server, "/New%20York", london()).await;

        let provider = WttrProvider::with_base_url(format!("{}/", server.uri())).unwrap();
        assert!(provider.fetch("New York").await.is_ok());
    }

    #[tokio::test]
    async fn coordinates_keep_their_comma() {
        let server = MockServer::start().await;
        mount(&server, "/48.85,2.35", london()).await;

        let provider = WttrProvider::with_base_url(server.uri()).unwrap();
        assert!(provider.fetch("48.85,2.35").await.is_ok());
    }

    #[tokio::test]
    async fn domain_lookup_keeps_its_at_sign() {
        let server = MockServer::start().await;
        mount(&server, "/@stackoverflow.com", london()).await;

        let provider = WttrProvider::with_base_url(server.uri()).unwrap();
        assert!(provider.fetch("@stackoverflow.com").await.is_ok());
    }

    #[tokio::test]
    async fn non_ascii_location_is_percent_encoded() {
        let server = MockServer::start().await;
        mount(&server, "/Saint-%C3%89tienne", london()).await;

        let provider = WttrProvider::with_base_url(server.uri()).unwrap();
        assert!(provider.fetch("Saint-Étienne").await.is_ok());
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let err = WttrProvider::with_base_url("not a url").unwrap_err();
        assert!(matches!(err, WeatherError::Config(_)));
        assert!(err.to_string().contains("not a url"));
    }

    #[tokio::test]
    async fn empty_location_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(london()))
            .expect(0)
            .mount(&server)
            .await;

        let provider = WttrProvider::with_base_url(server.uri()).unwrap();
        let err = provider.fetch("").await.unwrap_err();
        assert!(matches!(err, WeatherError::EmptyLocation));
    }

    #[tokio::test]
    async fn empty_current_condition_is_no_data() {
        let server = MockServer::start().await;
        mount(&server, "/Nowhere", json!({"current_condition": [], "nearest_area": []})).await;

        let provider = WttrProvider::with_base_url(server.uri()).unwrap();
        let err = provider.fetch("Nowhere").await.unwrap_err();
        assert!(matches!(err, WeatherError::NoData));
    }

    #[tokio::test]
    async fn non_numeric_temperature_reads_as_zero() {
        let mut body = london();
        body["current_condition"][0]["temp_C"] = json!("mild");
        let server = MockServer::start().await;
        mount(&server, "/london", body).await;

        let provider = WttrProvider::with_base_url(server.uri()).unwrap();
        let weather = provider.fetch("london").await.unwrap();
        assert_eq!(weather.temp_c, 0);
        assert_eq!(weather.temp_f, 57);
    }

    #[tokio::test]
    async fn missing_area_falls_back_to_input() {
        let mut body = london();
        body["nearest_area"] = json!([]);
        let server = MockServer::start().await;
        mount(&server, "/SFO", body).await;

        let provider = WttrProvider::with_base_url(server.uri()).unwrap();
        let weather = provider.fetch("SFO").await.unwrap();
        assert_eq!(weather.location, "SFO");
    }

    #[tokio::test]
    async fn non_200_carries_status() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let provider = WttrProvider::with_base_url(server.uri()).unwrap();
        let err = provider.fetch("Paris").await.unwrap_err();
        assert!(matches!(err, WeatherError::HttpStatus { stage: Stage::Wttr, status: 404 }));
    }

    #[tokio::test]
    async fn html_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let provider = WttrProvider::with_base_url(server.uri()).unwrap();
        let err = provider.fetch("Paris").await.unwrap_err();
        assert!(matches!(err, WeatherError::Decode { stage: Stage::Wttr, .. }));
    }
}
