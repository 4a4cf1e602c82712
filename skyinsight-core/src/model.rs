use serde::{Deserialize, Serialize};

/// Air quality index with its health category, e.g. `42` / `"Good"`.
///
/// Only present on a report when both halves were extracted together;
/// a value without a category (or vice versa) is dropped entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQuality {
    pub value: i32,
    pub category: String,
}

/// One hour of forecast, e.g. `14:00` / `19` / `"Cloudy"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub time: String,
    pub temperature: i32,
    pub condition: String,
}

/// One day of forecast. Temperatures in °C, wind in km/h.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub day: String,
    pub high: i32,
    pub low: i32,
    pub precipitation_pct: i32,
    pub wind_speed_kph: i32,
    pub condition: String,
}

/// A grounding citation returned alongside a generated reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: Option<String>,
    pub uri: Option<String>,
}

/// Structured weather report recovered from one generation-service reply.
///
/// Constructed fresh per query and replaced wholesale, never mutated in place.
/// Every field degrades independently when the reply drifts from the expected
/// format: `location` falls back to the raw query, `summary` to a placeholder,
/// the sequences to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub summary: String,
    pub air_quality: Option<AirQuality>,
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
    pub sources: Vec<SourceRef>,
    /// Local clock time at the moment the reply was parsed.
    pub timestamp: String,
}

/// Who said a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the advice-chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, text: text.into() }
    }
}
