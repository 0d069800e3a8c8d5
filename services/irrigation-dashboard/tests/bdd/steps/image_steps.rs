//! BDD step definitions for the latest photo panel

use cucumber::{given, then, when};

use irrigation_dashboard::surface::ImageView;

use crate::world::DashboardWorld;

#[given(expr = "the image endpoint returns {string}")]
fn image_endpoint_returns(world: &mut DashboardWorld, body: String) {
    *world.http.image_body.lock().unwrap() = Some(body);
}

#[when("the latest image is refreshed")]
async fn refresh_image(world: &mut DashboardWorld) {
    world.controller().refresh_latest_image().await;
}

#[then(expr = "the photo shows {string}")]
fn photo_shows(world: &mut DashboardWorld, url: String) {
    assert_eq!(world.surface().image, ImageView::Image(url));
}

#[then("the placeholder is shown")]
fn placeholder_shown(world: &mut DashboardWorld) {
    assert_eq!(world.surface().image, ImageView::Placeholder);
}
