use anyhow::Context;
use clap::{ArgAction, Parser};
use meteo_core::{
    Config, DayCount, ProviderId, Style, Units, WeatherRequest, provider_from_config,
};
use std::path::PathBuf;
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Get weather information for a location",
    long_about = "A CLI tool to fetch and display weather information for any city."
)]
pub struct Cli {
    /// City name.
    #[arg(short, long)]
    pub location: String,

    /// Forecast days (1-3) [default: 1]
    #[arg(short, long, allow_negative_numbers = true)]
    pub days: Option<i64>,

    /// Units: metric or imperial [default: metric]
    #[arg(short, long)]
    pub units: Option<String>,

    /// Weather provider: open-meteo or wttr [default: open-meteo]
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Output style: table, art or compact [default: table]
    #[arg(short, long)]
    pub style: Option<String>,

    /// Disable colors in art and compact output.
    #[arg(long)]
    pub no_color: bool,

    /// Read defaults from this file instead of the platform config path.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Flags merged with the config file and validated.
#[derive(Debug, Clone)]
pub struct Settings {
    pub request: WeatherRequest,
    pub provider: ProviderId,
    pub style: Style,
    pub color: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;
        let output = self.report(&config).await?;
        print!("{output}");
        Ok(())
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Ok(config)
    }

    /// Resolve every setting. Flag beats config file beats built-in default.
    pub fn settings(&self, config: &Config) -> anyhow::Result<Settings> {
        let days = match self.days.or(config.days) {
            Some(days) => DayCount::new(days)?,
            None => DayCount::default(),
        };

        let units = match self.units.as_deref().or(config.units.as_deref()) {
            Some(units) => units.parse::<Units>()?,
            None => Units::default(),
        };

        let provider = match self.provider.as_deref() {
            Some(name) => ProviderId::try_from(name)?,
            None => config.provider_id()?,
        };

        let style = match self.style.as_deref().or(config.style.as_deref()) {
            Some(style) => style.parse::<Style>()?,
            None => Style::default(),
        };

        let color = !self.no_color && config.color.unwrap_or(true);

        Ok(Settings {
            request: WeatherRequest { address: self.location.clone(), units, days },
            provider,
            style,
            color,
        })
    }

    /// Validate, fetch and render. Nothing touches the network until every
    /// setting has been validated.
    pub async fn report(&self, config: &Config) -> anyhow::Result<String> {
        let settings = self.settings(config)?;
        debug!("Resolved settings: {settings:?}");

        let provider = provider_from_config(settings.provider, config)?;
        let weather = provider
            .get_weather(&settings.request)
            .await
            .with_context(|| format!("failed to get weather for {:?}", self.location))?;

        if !settings.color {
            colored::control::set_override(false);
        }

        Ok(settings.style.render(&weather))
    }
}

/// Process exit status for a clap parse failure.
///
/// Argument errors exit 1 rather than clap's 2; `--help` and `--version` exit 0.
pub fn exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}
