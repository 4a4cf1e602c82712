//! Approximate device location via IP geolocation.
//!
//! Uses ipapi.co, which is free and needs no API key. The result feeds the
//! weather flow as an ordinary `"<lat>, <lon>"` query; the generation service
//! is asked to resolve the coordinates to the nearest city itself.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const IP_API_URL: &str = "https://ipapi.co/json/";

/// The only timeout in the system. Generation calls run unbounded.
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Format as the free-text query the weather flow expects.
    pub fn as_query(&self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }
}

/// Location failures are reported separately from weather-fetch failures.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Unable to retrieve your location accurately.")]
    Unavailable,
    #[error("Location lookup failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Resolve approximate coordinates for this machine.
pub async fn current_coordinates() -> Result<Coordinates, LocateError> {
    let client = Client::builder().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)).build()?;

    let response = client.get(IP_API_URL).send().await?;
    if !response.status().is_success() {
        tracing::debug!(status = %response.status(), "IP geolocation returned an error status");
        return Err(LocateError::Unavailable);
    }

    let body: IpApiResponse = response.json().await?;
    match (body.latitude, body.longitude) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates { latitude, longitude }),
        _ => Err(LocateError::Unavailable),
    }
}
