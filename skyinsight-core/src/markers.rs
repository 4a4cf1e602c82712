//! Marker vocabulary shared by the prompt builder and the reply parser.
//!
//! The generation service is asked to wrap each structured section of its
//! reply in these literal tokens. Prompt construction and parsing must use
//! the same constants so the two sides cannot drift apart.

/// Prefixes the resolved place name: `LOCATION_DATA | Paris, France`.
pub const LOCATION_DATA: &str = "LOCATION_DATA";

/// Prefixes the air-quality line: `AQI_DATA | Value: 42 | Category: Good`.
pub const AQI_DATA: &str = "AQI_DATA";

/// Delimits the hourly forecast block.
pub const HOURLY_START: &str = "HOURLY_START";
pub const HOURLY_END: &str = "HOURLY_END";

/// Delimits the daily forecast block.
pub const FORECAST_START: &str = "FORECAST_START";
pub const FORECAST_END: &str = "FORECAST_END";

/// Field labels inside the pipe-delimited hourly lines.
pub const LABEL_TIME: &str = "Time:";
pub const LABEL_TEMP: &str = "Temp:";
pub const LABEL_CONDITION: &str = "Condition:";

/// Field labels inside the pipe-delimited daily lines.
pub const LABEL_DAY: &str = "Day:";
pub const LABEL_HIGH: &str = "High:";
pub const LABEL_LOW: &str = "Low:";
pub const LABEL_PRECIP: &str = "Precip:";
pub const LABEL_WIND: &str = "Wind:";

/// Field labels inside the air-quality line.
pub const LABEL_VALUE: &str = "Value:";
pub const LABEL_CATEGORY: &str = "Category:";
