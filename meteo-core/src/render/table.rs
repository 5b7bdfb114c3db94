use crate::model::WeatherResult;

/// Underline is the location name plus the width of "Weather for ".
const TITLE_PADDING: usize = 12;

/// Plain-text report: title, current conditions, then one line per forecast day.
pub fn render_table(weather: &WeatherResult) -> String {
    let temp = weather.units.temperature_symbol();
    let wind = weather.units.wind_label();

    let mut out = String::from("\n");
    out.push_str(&format!("Weather for {}\n", weather.location));
    out.push_str(&"-".repeat(weather.location.len() + TITLE_PADDING));
    out.push_str("\n\n");

    out.push_str("Current Conditions:\n");
    out.push_str(&format!("  Temperature: {:.1}°{temp}\n", weather.temperature));
    out.push_str(&format!("  Condition:   {}\n", weather.condition));
    out.push_str(&format!("  Humidity:    {}%\n", weather.humidity));
    out.push_str(&format!("  Wind:        {:.1} {wind}\n", weather.wind_speed));

    if !weather.forecasts.is_empty() {
        out.push_str("\nForecast:\n");
        for day in &weather.forecasts {
            out.push_str(&format!(
                "  {}: {:.1}°{temp} / {:.1}°{temp} - {}\n",
                day.date, day.temp_max, day.temp_min, day.condition
            ));
        }
    }

    out.push('\n');
    out
}
