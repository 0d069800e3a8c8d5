//! BDD step definitions for irrigation commands and notifications

use cucumber::{given, then, when};

use irrigation_dashboard::IrrigationCommand;

use crate::world::DashboardWorld;

#[given(expr = "the server replies {string}")]
fn server_replies(world: &mut DashboardWorld, body: String) {
    *world.http.reply_body.lock().unwrap() = Some(body);
}

#[given("the server is unreachable")]
fn server_unreachable(world: &mut DashboardWorld) {
    *world.http.reply_body.lock().unwrap() = None;
    *world.http.image_body.lock().unwrap() = None;
}

#[when(expr = "the user presses the {word} button")]
async fn press_button(world: &mut DashboardWorld, button: String) {
    let command: IrrigationCommand = button.parse().expect("known button");
    let controller = world.controller();
    let request = controller.press_button(command);
    controller.complete(request).await;
}

#[then(expr = "the command {string} is sent")]
fn command_sent(world: &mut DashboardWorld, command: String) {
    assert_eq!(world.http.posted_commands(), vec![command]);
}

#[then("no command is sent")]
fn no_command_sent(world: &mut DashboardWorld) {
    assert!(world.http.posted_commands().is_empty());
}

#[then(expr = "a notification reads {string}")]
fn notification_reads(world: &mut DashboardWorld, message: String) {
    let found = world
        .surface()
        .notices
        .iter()
        .any(|n| n.message == message && !n.is_error);
    assert!(found, "no info notification '{}'", message);
}

#[then(expr = "an error notification reads {string}")]
fn error_notification_reads(world: &mut DashboardWorld, message: String) {
    let found = world
        .surface()
        .notices
        .iter()
        .any(|n| n.message == message && n.is_error);
    assert!(found, "no error notification '{}'", message);
}

#[then("no notification is shown")]
fn no_notification(world: &mut DashboardWorld) {
    assert!(world.surface().notices.is_empty());
}
