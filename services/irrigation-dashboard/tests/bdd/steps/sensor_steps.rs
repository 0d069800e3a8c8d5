//! BDD step definitions for sensor and channel events

use cucumber::{given, then, when};
use serde_json::{json, Value};

use irrigation_dashboard::i18n::Language;
use irrigation_dashboard::surface::Target;
use irrigation_dashboard::ChannelEvent;

use crate::world::DashboardWorld;

fn parse_target(s: &str) -> Target {
    match s {
        "temperature" => Target::Temperature,
        "humidity" => Target::Humidity,
        "soil" => Target::SoilMoisture,
        "last_update" => Target::LastUpdate,
        "device" => Target::DeviceStatus,
        "voice" => Target::VoiceFeedback,
        other => panic!("Unknown display target: {}", other),
    }
}

async fn deliver(world: &mut DashboardWorld, name: &str, payload: Value) {
    let event = ChannelEvent::from_named(name, payload)
        .expect("event should decode")
        .expect("event should be handled");
    world.controller().handle(event).await;
}

#[given(expr = "a dashboard in {word}")]
fn dashboard_in(world: &mut DashboardWorld, language: String) {
    world.language = language.parse::<Language>().expect("valid language");
    world.controller();
}

#[given("a dashboard")]
fn dashboard(world: &mut DashboardWorld) {
    world.controller();
}

#[when(expr = "a {string} event arrives with {string}")]
async fn event_with_payload(world: &mut DashboardWorld, name: String, payload: String) {
    let payload: Value = serde_json::from_str(&payload).expect("payload should be JSON");
    deliver(world, &name, payload).await;
}

#[when(expr = "a {string} event arrives")]
async fn event_without_payload(world: &mut DashboardWorld, name: String) {
    deliver(world, &name, Value::Null).await;
}

#[when(expr = "{int} sensor updates arrive with humidity counting up from {int}")]
async fn many_sensor_updates(world: &mut DashboardWorld, count: usize, start: i64) {
    for i in 0..count as i64 {
        let payload = json!({ "humidite": format!("{}%", start + i) });
        deliver(world, "sensor_update", payload).await;
    }
}

#[then(expr = "the {word} display shows {string}")]
fn display_shows(world: &mut DashboardWorld, target: String, expected: String) {
    let target = parse_target(&target);
    assert_eq!(world.surface().text(target), Some(expected.as_str()));
}

#[then(expr = "the {word} display is untouched")]
fn display_untouched(world: &mut DashboardWorld, target: String) {
    let target = parse_target(&target);
    assert_eq!(world.surface().text(target), None);
}

#[then(expr = "the humidity chart has {int} points")]
fn chart_points(world: &mut DashboardWorld, count: usize) {
    let series = world.controller().series();
    assert_eq!(series.len(), count);
    assert_eq!(series.labels().len(), series.values().len());
}

#[then(expr = "the humidity chart values are {string}")]
fn chart_values(world: &mut DashboardWorld, expected: String) {
    let expected: Vec<f64> = expected
        .split(',')
        .map(|v| v.trim().parse().expect("numeric chart value"))
        .collect();
    assert_eq!(world.controller().series().values(), expected);
}

#[then(expr = "the oldest chart value is {float}")]
fn oldest_chart_value(world: &mut DashboardWorld, expected: f64) {
    let oldest = world.controller().series().values().first().copied();
    assert_eq!(oldest, Some(expected));
}

#[then(expr = "the status indicator is {string}")]
fn status_indicator(world: &mut DashboardWorld, color: String) {
    assert_eq!(world.surface().status_color.as_deref(), Some(color.as_str()));
}

#[then(expr = "the {word} display starts with {string}")]
fn display_starts_with(world: &mut DashboardWorld, target: String, prefix: String) {
    let target = parse_target(&target);
    let text = world.surface().text(target).unwrap_or_default().to_string();
    assert!(text.starts_with(&prefix), "'{}' does not start with '{}'", text, prefix);
}
