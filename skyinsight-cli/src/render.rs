//! Human-friendly rendering of weather reports and chat messages.

use chrono::Local;
use skyinsight_core::{ChatMessage, ChatRole, WeatherReport};

/// Print a full report card, preceded by today's date.
pub fn print_report(report: &WeatherReport) {
    println!("{}", Local::now().format("%A, %e %B %Y"));
    print!("{}", format_report(report));
}

/// Print the one-line report header used before a chat session.
pub fn print_header(report: &WeatherReport) {
    println!("{} (updated {})", report.location, report.timestamp);
}

pub fn print_chat_message(message: &ChatMessage) {
    let speaker = match message.role {
        ChatRole::User => "You",
        ChatRole::Assistant => "SkyInsight",
    };
    println!("{speaker}: {}", message.text);
}

/// Render a report as text. Sections the parser could not recover are
/// simply absent from the output.
pub fn format_report(report: &WeatherReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} (updated {})\n", report.location, report.timestamp));
    out.push('\n');
    out.push_str(&report.summary);
    out.push('\n');

    if let Some(aqi) = &report.air_quality {
        out.push_str(&format!("\nAQI: {} ({})\n", aqi.value, aqi.category));
    }

    if !report.hourly.is_empty() {
        out.push_str("\nNext hours:\n");
        for point in &report.hourly {
            out.push_str(&format!(
                "  {:<8} {:>4}°C  {}\n",
                point.time, point.temperature, point.condition
            ));
        }
    }

    if !report.daily.is_empty() {
        out.push_str(&format!(
            "\n{:<12} {:>5} {:>5} {:>7} {:>9}  Condition\n",
            "Day", "High", "Low", "Precip", "Wind"
        ));
        for day in &report.daily {
            out.push_str(&format!(
                "{:<12} {:>4}° {:>4}° {:>6}% {:>5}km/h  {}\n",
                day.day,
                day.high,
                day.low,
                day.precipitation_pct,
                day.wind_speed_kph,
                day.condition
            ));
        }
    }

    if !report.sources.is_empty() {
        out.push_str("\nSources:\n");
        for (idx, source) in report.sources.iter().enumerate() {
            let title = source.title.as_deref().unwrap_or("untitled");
            match &source.uri {
                Some(uri) => out.push_str(&format!("  {}. {title} <{uri}>\n", idx + 1)),
                None => out.push_str(&format!("  {}. {title}\n", idx + 1)),
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyinsight_core::{AirQuality, DailyPoint, HourlyPoint, SourceRef};

    fn report() -> WeatherReport {
        WeatherReport {
            location: "Paris, France".to_string(),
            summary: "Mild and overcast with light drizzle expected.".to_string(),
            air_quality: Some(AirQuality { value: 42, category: "Good".to_string() }),
            hourly: vec![HourlyPoint {
                time: "14:00".to_string(),
                temperature: 19,
                condition: "Cloudy".to_string(),
            }],
            daily: vec![DailyPoint {
                day: "Monday".to_string(),
                high: 25,
                low: 15,
                precipitation_pct: 10,
                wind_speed_kph: 12,
                condition: "Sunny".to_string(),
            }],
            sources: vec![SourceRef {
                title: Some("Met Office".to_string()),
                uri: Some("https://met.example".to_string()),
            }],
            timestamp: "10:30:00".to_string(),
        }
    }

    #[test]
    fn full_report_renders_every_section() {
        let card = format_report(&report());

        assert!(card.contains("Paris, France (updated 10:30:00)"));
        assert!(card.contains("Mild and overcast"));
        assert!(card.contains("AQI: 42 (Good)"));
        assert!(card.contains("14:00"));
        assert!(card.contains("Monday"));
        assert!(card.contains("Met Office"));
    }

    #[test]
    fn degraded_report_omits_missing_sections() {
        let card = format_report(&WeatherReport {
            location: "Nowhere".to_string(),
            summary: "No summary available.".to_string(),
            air_quality: None,
            hourly: vec![],
            daily: vec![],
            sources: vec![],
            timestamp: "10:30:00".to_string(),
        });

        assert!(card.contains("No summary available."));
        assert!(!card.contains("AQI:"));
        assert!(!card.contains("Next hours:"));
        assert!(!card.contains("Sources:"));
    }
}
