//! Named push-channel events and their payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::reading::{DeviceStatus, SensorReading};

/// Event names emitted by the irrigation server
pub mod names {
    pub const CONNECT: &str = "connect";
    pub const DISCONNECT: &str = "disconnect";
    pub const SENSOR_UPDATE: &str = "sensor_update";
    pub const DEVICE_STATUS: &str = "esp32_status";
    pub const IRRIGATION_COMMAND: &str = "irrigation_command";
    pub const NEW_IMAGE: &str = "new_image";
    pub const CURRENT_DATA: &str = "current_data";
}

/// One decoded push-channel event
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Connect,
    Disconnect,
    SensorUpdate(SensorReading),
    DeviceStatus(DeviceStatus),
    CommandAck(String),
    NewImage,
    CurrentData(SensorReading),
}

#[derive(Debug, Deserialize)]
struct StatusPayload {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommandAckPayload {
    #[serde(default)]
    message: Option<String>,
}

/// A named event as carried on the input stream: `{"event": ..., "data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl ChannelEvent {
    /// Decode a named event. Unknown names yield `Ok(None)`.
    pub fn from_named(name: &str, payload: Value) -> crate::Result<Option<Self>> {
        let event = match name {
            names::CONNECT => ChannelEvent::Connect,
            names::DISCONNECT => ChannelEvent::Disconnect,
            names::NEW_IMAGE => ChannelEvent::NewImage,
            names::SENSOR_UPDATE => ChannelEvent::SensorUpdate(decode(name, payload)?),
            names::CURRENT_DATA => ChannelEvent::CurrentData(decode(name, payload)?),
            names::DEVICE_STATUS => {
                let payload: StatusPayload = decode(name, payload)?;
                ChannelEvent::DeviceStatus(DeviceStatus::from_wire(
                    payload.status.as_deref().unwrap_or_default(),
                ))
            }
            names::IRRIGATION_COMMAND => {
                let payload: CommandAckPayload = decode(name, payload)?;
                ChannelEvent::CommandAck(payload.message.unwrap_or_default())
            }
            other => {
                tracing::debug!("Ignoring unhandled event '{}'", other);
                return Ok(None);
            }
        };
        Ok(Some(event))
    }

    /// Decode one line of the JSON-lines event stream
    pub fn from_line(line: &str) -> crate::Result<Option<Self>> {
        let envelope: EventEnvelope = serde_json::from_str(line).map_err(|e| {
            crate::DashboardError::Channel(format!("Malformed event envelope: {}", e))
        })?;
        Self::from_named(&envelope.event, envelope.data)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChannelEvent::Connect => names::CONNECT,
            ChannelEvent::Disconnect => names::DISCONNECT,
            ChannelEvent::SensorUpdate(_) => names::SENSOR_UPDATE,
            ChannelEvent::DeviceStatus(_) => names::DEVICE_STATUS,
            ChannelEvent::CommandAck(_) => names::IRRIGATION_COMMAND,
            ChannelEvent::NewImage => names::NEW_IMAGE,
            ChannelEvent::CurrentData(_) => names::CURRENT_DATA,
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(name: &str, payload: Value) -> crate::Result<T> {
    // A missing payload decodes like an empty object
    let payload = if payload.is_null() {
        Value::Object(Default::default())
    } else {
        payload
    };
    serde_json::from_value(payload).map_err(|e| {
        crate::DashboardError::Channel(format!("Invalid '{}' payload: {}", name, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signal_events_ignore_payload() {
        assert_eq!(
            ChannelEvent::from_named("connect", Value::Null).unwrap(),
            Some(ChannelEvent::Connect)
        );
        assert_eq!(
            ChannelEvent::from_named("new_image", json!({"filename": "x.png"})).unwrap(),
            Some(ChannelEvent::NewImage)
        );
    }

    #[test]
    fn sensor_update_decodes_reading() {
        let event =
            ChannelEvent::from_named("sensor_update", json!({"humidite": "45%"})).unwrap();
        match event {
            Some(ChannelEvent::SensorUpdate(reading)) => {
                assert_eq!(reading.humidity_value(), Some(45.0));
                assert_eq!(reading.temperature, None);
            }
            other => panic!("expected SensorUpdate, got {other:?}"),
        }
    }

    #[test]
    fn device_status_decodes_to_binary_state() {
        assert_eq!(
            ChannelEvent::from_named("esp32_status", json!({"status": "online"})).unwrap(),
            Some(ChannelEvent::DeviceStatus(DeviceStatus::Online))
        );
        assert_eq!(
            ChannelEvent::from_named("esp32_status", json!({"status": "rebooting"})).unwrap(),
            Some(ChannelEvent::DeviceStatus(DeviceStatus::Offline))
        );
        assert_eq!(
            ChannelEvent::from_named("esp32_status", Value::Null).unwrap(),
            Some(ChannelEvent::DeviceStatus(DeviceStatus::Offline))
        );
    }

    #[test]
    fn command_ack_keeps_message_verbatim() {
        let event = ChannelEvent::from_named(
            "irrigation_command",
            json!({"command": "start", "message": "Ok, démarrage de l'irrigation."}),
        )
        .unwrap();
        assert_eq!(
            event,
            Some(ChannelEvent::CommandAck(
                "Ok, démarrage de l'irrigation.".to_string()
            ))
        );
    }

    #[test]
    fn unknown_event_is_ignored() {
        assert_eq!(
            ChannelEvent::from_named("mqtt_status", json!({"status": "connected"})).unwrap(),
            None
        );
    }

    #[test]
    fn malformed_payload_is_channel_error() {
        let err = ChannelEvent::from_named("sensor_update", json!("oops")).unwrap_err();
        assert!(matches!(err, crate::DashboardError::Channel(_)));
        assert!(err.to_string().contains("sensor_update"));
    }

    #[test]
    fn from_line_reads_envelope() {
        let event =
            ChannelEvent::from_line(r#"{"event": "current_data", "data": {"sol": "Sec"}}"#)
                .unwrap()
                .unwrap();
        assert_eq!(event.name(), "current_data");

        let event = ChannelEvent::from_line(r#"{"event": "disconnect"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(event, ChannelEvent::Disconnect);

        assert!(ChannelEvent::from_line("not json").is_err());
    }
}
