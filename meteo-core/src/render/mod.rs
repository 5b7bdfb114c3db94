//! Turning a [`WeatherResult`] into terminal text.
//!
//! Every renderer is a pure function returning the full output; the caller
//! decides where it goes.

use std::{fmt, str::FromStr};

use crate::{error::WeatherError, model::WeatherResult};

pub mod art;
pub mod table;

pub use art::{ArtView, render_art, render_compact};
pub use table::render_table;

/// Output layout selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Table,
    Art,
    Compact,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Table => "table",
            Style::Art => "art",
            Style::Compact => "compact",
        }
    }

    pub fn render(&self, weather: &WeatherResult) -> String {
        match self {
            Style::Table => render_table(weather),
            Style::Art => render_art(&ArtView::from(weather)),
            Style::Compact => render_compact(&ArtView::from(weather)),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Style::Table),
            "art" => Ok(Style::Art),
            "compact" => Ok(Style::Compact),
            _ => Err(WeatherError::validation("style must be 'table', 'art' or 'compact'")),
        }
    }
}
