use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::error::WeatherError;

/// Unit system. The provider converts server-side; nothing is converted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Open-Meteo `temperature_unit` query token.
    pub fn temperature_token(&self) -> &'static str {
        match self {
            Units::Metric => "celsius",
            Units::Imperial => "fahrenheit",
        }
    }

    /// Open-Meteo `wind_speed_unit` query token.
    pub fn wind_token(&self) -> &'static str {
        match self {
            Units::Metric => "kmh",
            Units::Imperial => "mph",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "C",
            Units::Imperial => "F",
        }
    }

    pub fn wind_label(&self) -> &'static str {
        match self {
            Units::Metric => "km/h",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = WeatherError;

    /// Exact, case-sensitive match on `metric` / `imperial`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(WeatherError::validation("units must be 'metric' or 'imperial'")),
        }
    }
}

/// Number of forecast days, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount(u8);

impl DayCount {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 3;

    pub fn new(days: i64) -> Result<Self, WeatherError> {
        if !(Self::MIN..=Self::MAX).contains(&days) {
            return Err(WeatherError::validation(format!(
                "days must be between {} and {}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(days as u8))
    }

    pub fn get(&self) -> usize {
        usize::from(self.0)
    }
}

impl Default for DayCount {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub address: String,
    pub units: Units,
    pub days: DayCount,
}

/// Geocoding result: where the query resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub condition: String,
}

/// Current conditions plus an ordered daily forecast, in `units`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResult {
    pub location: String,
    pub temperature: f64,
    pub units: Units,
    pub condition: String,
    pub humidity: i64,
    pub wind_speed: f64,
    /// 16-point compass direction, when the provider reports one.
    pub wind_dir: Option<String>,
    pub forecasts: Vec<DayForecast>,
}

/// Current conditions as reported by wttr.in. Carries both unit systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentWeather {
    pub location: String,
    pub temp_c: i64,
    pub temp_f: i64,
    pub conditions: String,
    pub humidity: i64,
    pub wind_kmph: i64,
    pub wind_mph: i64,
    pub wind_dir: String,
}

impl CurrentWeather {
    /// Reshape into a forecast-less [`WeatherResult`] in the requested units.
    pub fn into_result(self, units: Units) -> WeatherResult {
        let (temperature, wind_speed) = match units {
            Units::Metric => (self.temp_c, self.wind_kmph),
            Units::Imperial => (self.temp_f, self.wind_mph),
        };

        WeatherResult {
            location: self.location,
            temperature: temperature as f64,
            units,
            condition: self.conditions,
            humidity: self.humidity,
            wind_speed: wind_speed as f64,
            wind_dir: Some(self.wind_dir).filter(|dir| !dir.is_empty()),
            forecasts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_parse_accepts_only_exact_names() {
        assert_eq!("metric".parse::<Units>().unwrap(), Units::Metric);
        assert_eq!("imperial".parse::<Units>().unwrap(), Units::Imperial);

        for bad in ["", "Metric", "kelvin", "imperial "] {
            let err = bad.parse::<Units>().unwrap_err();
            assert!(matches!(err, WeatherError::Validation(_)), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn units_tokens_follow_system() {
        assert_eq!(Units::Metric.temperature_token(), "celsius");
        assert_eq!(Units::Metric.wind_token(), "kmh");
        assert_eq!(Units::Imperial.temperature_token(), "fahrenheit");
        assert_eq!(Units::Imperial.wind_token(), "mph");
        assert_eq!(Units::Imperial.temperature_symbol(), "F");
        assert_eq!(Units::Imperial.wind_label(), "mph");
    }

    #[test]
    fn day_count_bounds() {
        for ok in 1..=3 {
            assert_eq!(DayCount::new(ok).unwrap().get(), ok as usize);
        }
        for bad in [-1, 0, 4, 100] {
            let err = DayCount::new(bad).unwrap_err();
            assert_eq!(err.to_string(), "days must be between 1 and 3");
        }
    }

    #[test]
    fn current_weather_picks_units() {
        let cw = CurrentWeather {
            location: "Oslo".into(),
            temp_c: -3,
            temp_f: 27,
            conditions: "Light snow".into(),
            humidity: 80,
            wind_kmph: 11,
            wind_mph: 7,
            wind_dir: "NNE".into(),
        };

        let metric = cw.clone().into_result(Units::Metric);
        assert_eq!(metric.temperature, -3.0);
        assert_eq!(metric.wind_speed, 11.0);
        assert_eq!(metric.wind_dir.as_deref(), Some("NNE"));
        assert!(metric.forecasts.is_empty());

        let imperial = cw.into_result(Units::Imperial);
        assert_eq!(imperial.temperature, 27.0);
        assert_eq!(imperial.wind_speed, 7.0);
        assert_eq!(imperial.condition, "Light snow");
    }

    #[test]
    fn blank_wind_direction_is_dropped() {
        let cw = CurrentWeather {
            location: "Calm".into(),
            temp_c: 10,
            temp_f: 50,
            conditions: "Fog".into(),
            humidity: 99,
            wind_kmph: 0,
            wind_mph: 0,
            wind_dir: String::new(),
        };
        assert_eq!(cw.into_result(Units::Metric).wind_dir, None);
    }
}
