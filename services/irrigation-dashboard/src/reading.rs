//! Sensor readings and server payload types

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder rendered for falsy sensor values
pub const PLACEHOLDER: &str = "-";

/// A sparse sensor reading pushed by the server.
///
/// `None` means the field was absent from the message and the display must
/// keep its previous value. A present `null` is kept as `Some(Value::Null)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Value>,
    #[serde(
        rename = "humidite",
        alias = "humidity",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub humidity: Option<Value>,
    #[serde(
        rename = "sol",
        alias = "soil_moisture",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub soil_moisture: Option<Value>,
    #[serde(
        alias = "timestamp",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_update: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SensorReading {
    /// Humidity as a chart value, if present and numeric
    pub fn humidity_value(&self) -> Option<f64> {
        self.humidity.as_ref().and_then(parse_number)
    }
}

/// Render a sensor value for display, using the placeholder for falsy values
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => PLACEHOLDER.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => PLACEHOLDER.to_string(),
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) if s.is_empty() => PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Interpret a JSON value as a finite number.
///
/// Strings are read by their leading numeric prefix, so `"45%"` yields 45.
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Connection status of the field device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    /// Anything other than `"online"` counts as offline
    pub fn from_wire(status: &str) -> Self {
        if status == "online" {
            DeviceStatus::Online
        } else {
            DeviceStatus::Offline
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            DeviceStatus::Online => ONLINE_COLOR,
            DeviceStatus::Offline => OFFLINE_COLOR,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceStatus::Online => write!(f, "online"),
            DeviceStatus::Offline => write!(f, "offline"),
        }
    }
}

pub const ONLINE_COLOR: &str = "#43a047";
pub const OFFLINE_COLOR: &str = "#f44336";

/// Reply from the command endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReply {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl CommandReply {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// Reply from the latest-image endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestImage {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub latest_image_url: Option<String>,
}

impl LatestImage {
    /// The image URL, only when the lookup succeeded and returned one
    pub fn url(&self) -> Option<&str> {
        if self.status != "success" {
            return None;
        }
        self.latest_image_url.as_deref().filter(|u| !u.is_empty())
    }
}
