use std::fmt;

/// Which HTTP boundary a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Geocoding,
    Forecast,
    Wttr,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geocoding => "geocoding",
            Stage::Forecast => "forecast",
            Stage::Wttr => "wttr.in",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way a weather lookup can fail.
///
/// None of these are retried; the first one aborts the invocation.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Bad user input, detected before any I/O.
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Geocoding returned no results for the query.
    #[error("location not found: {0}")]
    NotFound(String),

    #[error("{stage} request failed: {source}")]
    Network {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("{stage} API returned status {status}")]
    HttpStatus { stage: Stage, status: u16 },

    #[error("failed to decode {stage} response: {source}")]
    Decode {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },

    #[error("location cannot be empty")]
    EmptyLocation,

    #[error("no current conditions in response")]
    NoData,
}

impl WeatherError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
