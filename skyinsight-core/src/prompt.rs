//! Prompt construction for the generation service.
//!
//! The weather prompt and the parser in [`crate::parser`] are two halves of
//! one protocol: the prompt requests the marker grammar from
//! [`crate::markers`], the parser recovers it. Keep them in sync through the
//! shared constants.

use crate::markers::{
    AQI_DATA, FORECAST_END, FORECAST_START, HOURLY_END, HOURLY_START, LOCATION_DATA,
};
use crate::model::WeatherReport;

/// Number of hourly forecast lines requested. The parser accepts however
/// many well-formed lines actually come back.
pub const HOURLY_POINTS_REQUESTED: usize = 12;

/// Number of daily forecast lines requested.
pub const DAILY_POINTS_REQUESTED: usize = 7;

/// Build the weather-lookup prompt for a free-text location query.
///
/// The query may be a place name or a `"<lat>, <lon>"` coordinate pair; it is
/// embedded as-is, without validation.
pub fn weather_query(query: &str) -> String {
    format!(
        "What is the current weather in {query}?

IMPORTANT: If coordinates are provided, resolve them to the nearest city name.

First, provide the official city or location name.
Format exactly as: {LOCATION_DATA} | [City Name, Region/Country]

Second, provide a detailed natural language summary including temperature, humidity, wind, \
and sky description.

Third, provide the current Air Quality Index (AQI) value and its health category.
Format: {AQI_DATA} | Value: [number] | Category: [category]

Fourth, provide the next {HOURLY_POINTS_REQUESTED} hours of forecast starting from the current hour.
Format exactly as:
{HOURLY_START}
Time: 10:00 | Temp: 22 | Condition: Sunny
... ({HOURLY_POINTS_REQUESTED} lines)
{HOURLY_END}

Fifth, provide a {DAILY_POINTS_REQUESTED}-day daily forecast.
Format exactly as:
{FORECAST_START}
Day: Monday | High: 25 | Low: 15 | Precip: 10% | Wind: 12km/h | Condition: Sunny
... ({DAILY_POINTS_REQUESTED} days)
{FORECAST_END}"
    )
}

/// Build the system instruction priming the advice chat with a parsed report.
///
/// Embeds location, summary, AQI and the serialized daily forecast ahead of
/// whatever the user asks.
pub fn advice_system(report: &WeatherReport) -> String {
    let (aqi_value, aqi_category) = match &report.air_quality {
        Some(aqi) => (aqi.value.to_string(), aqi.category.clone()),
        None => ("unknown".to_string(), "unknown".to_string()),
    };
    let forecast = serde_json::to_string(&report.daily).unwrap_or_default();

    format!(
        "You are SkyInsight AI, a world-class personal weather stylist and lifestyle advisor.
Current Location: {location}
Current Weather Summary: {summary}
AQI: {aqi_value} ({aqi_category})
Forecast: {forecast}

Guidelines:
1. Use the specific weather data provided above.
2. Be conversational, friendly, and expert.
3. Provide actionable advice (e.g., \"Wear a light jacket\", \"Carry an umbrella\", \
\"Good day for a 5k run\").
4. Keep responses concise (max 3 sentences).
5. If asked something unrelated to weather/lifestyle, politely redirect to weather topics.",
        location = report.location,
        summary = report.summary,
    )
}
