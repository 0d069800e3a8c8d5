//! BDD step definitions for voice capture

use cucumber::{then, when};

use irrigation_dashboard::voice::CaptureState;

use crate::world::DashboardWorld;

#[when("the recognizer is unavailable")]
fn recognizer_unavailable(world: &mut DashboardWorld) {
    world.controller().mark_voice_unavailable();
}

#[when("the user starts voice capture")]
fn press_voice_button(world: &mut DashboardWorld) {
    let started = world.controller().begin_listening();
    world.listening_started = Some(started);
}

#[when(expr = "the recognizer hears {string}")]
async fn recognizer_hears(world: &mut DashboardWorld, transcript: String) {
    let controller = world.controller();
    if let Some(request) = controller.on_voice_result(&transcript) {
        controller.complete(request).await;
    }
}

#[when(expr = "the recognizer fails with {string}")]
fn recognizer_fails(world: &mut DashboardWorld, reason: String) {
    world.controller().on_voice_error(&reason);
}

#[when("speech ends")]
fn speech_ends(world: &mut DashboardWorld) {
    world.controller().on_voice_end();
}

#[then("listening does not start")]
fn listening_not_started(world: &mut DashboardWorld) {
    assert_eq!(world.listening_started, Some(false));
}

#[then(expr = "voice capture is {word}")]
fn capture_state(world: &mut DashboardWorld, state: String) {
    let expected = match state.as_str() {
        "idle" => CaptureState::Idle,
        "listening" => CaptureState::Listening,
        "unavailable" => CaptureState::Unavailable,
        other => panic!("Unknown capture state: {}", other),
    };
    assert_eq!(world.controller().voice_state(), expected);
}

#[then(expr = "the voice button is enabled with label {string}")]
fn button_enabled(world: &mut DashboardWorld, label: String) {
    let button = world.surface().voice_button.clone().expect("button drawn");
    assert!(button.enabled);
    assert_eq!(button.label, label);
}

#[then(expr = "the voice button is disabled with label {string}")]
fn button_disabled(world: &mut DashboardWorld, label: String) {
    let button = world.surface().voice_button.clone().expect("button drawn");
    assert!(!button.enabled);
    assert_eq!(button.label, label);
}
