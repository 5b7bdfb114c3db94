use colored::Colorize;

use crate::{
    condition::Condition,
    model::{CurrentWeather, Units, WeatherResult},
};

const RULE_WIDTH: usize = 30;

/// What the art and compact renderers draw from.
///
/// The condition is already reduced to one of the four tags; there is no
/// forecast here.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtView {
    pub condition: Condition,
    pub temperature: f64,
    pub humidity: i64,
    pub wind_speed: f64,
    pub wind_dir: Option<String>,
    pub location: String,
    pub units: Units,
}

impl From<&WeatherResult> for ArtView {
    fn from(weather: &WeatherResult) -> Self {
        Self {
            condition: Condition::from_label(&weather.condition),
            temperature: weather.temperature,
            humidity: weather.humidity,
            wind_speed: weather.wind_speed,
            wind_dir: weather.wind_dir.clone(),
            location: weather.location.clone(),
            units: weather.units,
        }
    }
}

/// wttr.in conditions drawn directly, always in metric.
impl From<&CurrentWeather> for ArtView {
    fn from(weather: &CurrentWeather) -> Self {
        Self {
            condition: Condition::from_label(&weather.conditions),
            temperature: weather.temp_c as f64,
            humidity: weather.humidity,
            wind_speed: weather.wind_kmph as f64,
            wind_dir: Some(weather.wind_dir.clone()).filter(|dir| !dir.is_empty()),
            location: weather.location.clone(),
            units: Units::Metric,
        }
    }
}

/// Header, colored art block, then bold-labelled details.
pub fn render_art(view: &ArtView) -> String {
    let style = view.condition.style();
    let rule = "-".repeat(RULE_WIDTH);

    let header = if view.location.is_empty() {
        "  Current Weather".to_string()
    } else {
        format!("  Weather for {}", view.location)
    };

    let mut out = String::from("\n");
    out.push_str(&format!("{}\n", header.bold().bright_white()));
    out.push_str(&format!("{rule}\n"));

    for line in style.art {
        out.push_str(&format!("{}\n", line.color(style.color)));
    }

    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("  {}  {}\n", "Condition:".bold(), style.label));
    out.push_str(&format!(
        "  {}       {:.1}°{}\n",
        "Temp:".bold(),
        view.temperature,
        view.units.temperature_symbol()
    ));
    out.push_str(&format!("  {}   {}%\n", "Humidity:".bold(), view.humidity));
    out.push_str(&format!(
        "  {}       {:.1} {}",
        "Wind:".bold(),
        view.wind_speed,
        view.units.wind_label()
    ));
    if let Some(dir) = &view.wind_dir {
        out.push_str(&format!(" {dir}"));
    }
    out.push('\n');
    out.push('\n');
    out
}

/// One line: icon, temperature, location.
pub fn render_compact(view: &ArtView) -> String {
    let style = view.condition.style();
    format!(
        "{} {:.1}°{} | {}\n",
        style.icon.color(style.color),
        view.temperature,
        view.units.temperature_symbol(),
        view.location
    )
}
