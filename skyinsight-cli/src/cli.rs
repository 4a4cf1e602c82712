use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};

use skyinsight_core::{
    ChatMessage, Config, ProviderId, WeatherReport, WeatherService, geolocate,
    provider::{default_provider_from_config, gemini},
};

use crate::render;

/// City shortcuts offered when `show` is run with no location at all.
const POPULAR_CITIES: &[&str] =
    &["Mumbai", "New Delhi", "Bangalore", "Chennai", "Kolkata", "Hyderabad", "Pune", "Ahmedabad"];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyinsight", version, about = "AI-powered weather lookup and lifestyle advice")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "gemini".
        provider: String,
    },

    /// Show current weather, air quality, and forecast for a location.
    Show {
        /// Place name, zip, or a "<lat>, <lon>" pair. Omitted: pick a city
        /// interactively (or pass --locate).
        query: Option<String>,

        /// Resolve this machine's approximate location via IP geolocation.
        #[arg(long)]
        locate: bool,
    },

    /// Fetch weather for a location, then chat for lifestyle advice.
    Chat {
        /// Place name, zip, or a "<lat>, <lon>" pair.
        query: Option<String>,

        /// Resolve this machine's approximate location via IP geolocation.
        #[arg(long)]
        locate: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { query, locate } => show(query, locate).await,
            Command::Chat { query, locate } => chat(query, locate).await,
        }
    }
}

fn configure(provider: &str) -> Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = Password::new("API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty.");
    }
    config.upsert_provider_api_key(id, api_key.to_string());

    let model = Text::new("Model:")
        .with_help_message(&format!("empty for the default, {}", gemini::DEFAULT_MODEL))
        .prompt()
        .context("Failed to read model name")?;
    let model = model.trim();
    config.set_provider_model(id, (!model.is_empty()).then(|| model.to_string()));

    config.save()?;
    println!(
        "Saved configuration for provider '{id}' to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn show(query: Option<String>, locate: bool) -> Result<()> {
    let (query, located) = resolve_query(query, locate).await?;
    let service = service_from_config()?;

    let report = fetch_report(&service, &query, located).await?;
    render::print_report(&report);
    Ok(())
}

async fn chat(query: Option<String>, locate: bool) -> Result<()> {
    let (query, located) = resolve_query(query, locate).await?;
    let service = service_from_config()?;

    let report = fetch_report(&service, &query, located).await?;
    render::print_header(&report);

    let greeting = ChatMessage::assistant(format!(
        "Hi! I'm your SkyInsight AI assistant. How can I help you plan your day in {}?",
        report.location
    ));
    render::print_chat_message(&greeting);
    let mut history = vec![greeting];

    loop {
        let line = match Text::new("You:").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read chat input"),
        };
        let text = line.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("exit") {
            break;
        }

        history.push(ChatMessage::user(text));
        let answer = ChatMessage::assistant(service.advice(text, &report).await);
        render::print_chat_message(&answer);
        history.push(answer);
    }

    Ok(())
}

/// Fetch one report; a located query gets the "current location" label, as
/// a fresh record built from the fetched one.
async fn fetch_report(
    service: &WeatherService,
    query: &str,
    located: bool,
) -> Result<WeatherReport> {
    let report = service.fetch_weather(query).await?;
    Ok(if located {
        WeatherReport { location: format!("Your Current Location - {}", report.location), ..report }
    } else {
        report
    })
}

/// Resolve what to ask the weather service for. Returns the query string and
/// whether it came from geolocation.
async fn resolve_query(query: Option<String>, locate: bool) -> Result<(String, bool)> {
    if locate {
        let coords = geolocate::current_coordinates().await?;
        tracing::debug!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            "resolved current location"
        );
        return Ok((coords.as_query(), true));
    }

    if let Some(query) = query {
        if query.trim().is_empty() {
            bail!("Location query must not be empty.");
        }
        return Ok((query, false));
    }

    let city = Select::new("Pick a destination:", POPULAR_CITIES.to_vec())
        .prompt()
        .context("No location given")?;
    Ok((city.to_string(), false))
}

fn service_from_config() -> Result<WeatherService> {
    let config = Config::load()?;
    let provider = default_provider_from_config(&config)?;
    Ok(WeatherService::new(provider))
}
