//! Best-effort parser recovering a [`WeatherReport`] from a generation reply.
//!
//! The upstream model is asked to follow the marker grammar in
//! [`crate::markers`] but nothing guarantees that it does. Every section is
//! therefore independently optional: a missing or malformed section degrades
//! to its documented default, and the parser never returns an error. Keeping
//! it a pure function of the reply text makes it testable with fixture
//! strings, without a live service.

use crate::markers::{
    AQI_DATA, FORECAST_END, FORECAST_START, HOURLY_END, HOURLY_START, LABEL_CATEGORY,
    LABEL_CONDITION, LABEL_DAY, LABEL_HIGH, LABEL_LOW, LABEL_PRECIP, LABEL_TEMP, LABEL_TIME,
    LABEL_VALUE, LABEL_WIND, LOCATION_DATA,
};
use crate::model::{AirQuality, DailyPoint, HourlyPoint, SourceRef, WeatherReport};

/// Placeholder used when no narrative summary could be recovered.
pub const NO_SUMMARY: &str = "No summary available.";

/// Parse one generation reply into a structured report.
///
/// `query` is the original free-text location query, used as the location
/// fallback. `sources` is the grounding metadata returned by the provider
/// alongside the text, passed through in service order. `timestamp` is the
/// capture time stamped by the caller, which keeps this function pure.
pub fn parse_weather_reply(
    query: &str,
    reply: &str,
    sources: Vec<SourceRef>,
    timestamp: String,
) -> WeatherReport {
    WeatherReport {
        location: parse_location(query, reply),
        summary: parse_summary(reply),
        air_quality: parse_air_quality(reply),
        hourly: block_between(reply, HOURLY_START, HOURLY_END)
            .map(parse_hourly_block)
            .unwrap_or_default(),
        daily: block_between(reply, FORECAST_START, FORECAST_END)
            .map(parse_daily_block)
            .unwrap_or_default(),
        sources,
        timestamp,
    }
}

/// Second pipe-delimited field of the `LOCATION_DATA` line, or the query.
fn parse_location(query: &str, reply: &str) -> String {
    reply
        .lines()
        .find(|line| line.contains(LOCATION_DATA))
        .and_then(|line| line.split('|').nth(1))
        .map(|name| name.trim().to_string())
        .unwrap_or_else(|| query.to_string())
}

/// Narrative summary: the text before the first structured marker.
///
/// Primary strategy truncates at each marker in turn; if that leaves nothing
/// (the reply led with its markers), the secondary strategy takes the lines
/// strictly between the `LOCATION_DATA` and `AQI_DATA` lines.
fn parse_summary(reply: &str) -> String {
    let mut summary = reply;
    for marker in [LOCATION_DATA, AQI_DATA, HOURLY_START, FORECAST_START] {
        summary = summary.split(marker).next().unwrap_or("");
    }
    let summary = strip_location_line(summary).trim().to_string();
    if !summary.is_empty() {
        return summary;
    }

    let lines: Vec<&str> = reply.lines().collect();
    let location_idx = lines.iter().position(|line| line.contains(LOCATION_DATA));
    let aqi_idx = lines.iter().position(|line| line.contains(AQI_DATA));
    if let (Some(start), Some(end)) = (location_idx, aqi_idx) {
        if end > start + 1 {
            let between = lines[start + 1..end].join("\n").trim().to_string();
            if !between.is_empty() {
                return between;
            }
        }
    }

    NO_SUMMARY.to_string()
}

/// Remove a leading `LOCATION_DATA | ...` residual line, if one survived.
fn strip_location_line(text: &str) -> &str {
    let Some(marker_idx) = text.find(LOCATION_DATA) else {
        return text;
    };
    let rest = &text[marker_idx + LOCATION_DATA.len()..];
    if !rest.trim_start().starts_with('|') {
        return text;
    }
    match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => &text[..marker_idx],
    }
}

/// `AQI_DATA | Value: [n] | Category: [c]`, both halves or nothing.
fn parse_air_quality(reply: &str) -> Option<AirQuality> {
    let line = reply.lines().find(|line| line.contains(AQI_DATA))?;
    let segments: Vec<&str> = line.split('|').map(str::trim).collect();

    let value = labeled_payload(&segments, LABEL_VALUE)?;
    let category = labeled_payload(&segments, LABEL_CATEGORY)?;

    Some(AirQuality { value: leading_int(value), category: category.to_string() })
}

/// Payload after `label` in the first segment that starts with it, if
/// non-empty.
fn labeled_payload<'a>(segments: &[&'a str], label: &str) -> Option<&'a str> {
    segments
        .iter()
        .find(|segment| segment.starts_with(label))
        .and_then(|segment| segment.splitn(2, ':').nth(1))
        .map(str::trim)
        .filter(|payload| !payload.is_empty())
}

fn parse_hourly_block(block: &str) -> Vec<HourlyPoint> {
    block
        .trim()
        .lines()
        .filter_map(|line| {
            let segments: Vec<&str> = line.split('|').map(str::trim).collect();
            if segments.len() < 3 {
                return None;
            }
            Some(HourlyPoint {
                time: strip_label(segments[0], LABEL_TIME).to_string(),
                temperature: leading_int(strip_label(segments[1], LABEL_TEMP)),
                condition: strip_label(segments[2], LABEL_CONDITION).to_string(),
            })
        })
        .collect()
}

fn parse_daily_block(block: &str) -> Vec<DailyPoint> {
    block
        .trim()
        .lines()
        .filter_map(|line| {
            let segments: Vec<&str> = line.split('|').map(str::trim).collect();
            if segments.len() < 6 {
                return None;
            }
            let precip = strip_label(segments[3], LABEL_PRECIP);
            let precip = precip.strip_suffix('%').unwrap_or(precip).trim();
            let wind = strip_label(segments[4], LABEL_WIND);
            let wind = wind.strip_suffix("km/h").unwrap_or(wind).trim();
            Some(DailyPoint {
                day: strip_label(segments[0], LABEL_DAY).to_string(),
                high: leading_int(strip_label(segments[1], LABEL_HIGH)),
                low: leading_int(strip_label(segments[2], LABEL_LOW)),
                precipitation_pct: leading_int(precip),
                wind_speed_kph: leading_int(wind),
                condition: strip_label(segments[5], LABEL_CONDITION).to_string(),
            })
        })
        .collect()
}

/// Substring strictly between `start` and the first `end` after it.
fn block_between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let block_start = text.find(start)? + start.len();
    let block_len = text[block_start..].find(end)?;
    Some(&text[block_start..block_start + block_len])
}

/// Strip a field label prefix, tolerating its absence.
fn strip_label<'a>(segment: &'a str, label: &str) -> &'a str {
    segment.strip_prefix(label).unwrap_or(segment).trim()
}

/// Integer from the leading numeric portion of `s`, 0 when there is none.
///
/// `"19"` → 19, `"-3"` → -3, `"12.5"` → 12, `"N/A"` → 0.
fn leading_int(s: &str) -> i32 {
    let s = s.trim();
    let mut end = 0;
    for (idx, ch) in s.char_indices() {
        if idx == 0 && (ch == '+' || ch == '-') {
            end = ch.len_utf8();
            continue;
        }
        if ch.is_ascii_digit() {
            end = idx + 1;
        } else {
            break;
        }
    }
    s[..end].parse().unwrap_or(0)
}
