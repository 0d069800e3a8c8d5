//! Dashboard sync controller: bridges channel events and user actions to the display

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::config::{Config, ServerConfig};
use crate::events::ChannelEvent;
use crate::i18n::Translations;
use crate::io::HttpClient;
use crate::reading::{display_text, CommandReply, DeviceStatus, LatestImage, SensorReading};
use crate::series::HumiditySeries;
use crate::surface::{DisplaySurface, Notice, Target};
use crate::voice::{
    match_command, normalize_transcript, CaptureState, IrrigationCommand, VoiceCapture,
};

pub const LATEST_IMAGE_PATH: &str = "/get_latest_image";
pub const COMMAND_PATH: &str = "/voice-command";

/// Result of a network request, applied back onto the controller
#[derive(Debug)]
pub enum Outcome {
    Command(IrrigationCommand, crate::Result<CommandReply>),
    Image(crate::Result<LatestImage>),
}

/// A detached network request; owns everything it needs
pub type Request = Pin<Box<dyn Future<Output = Outcome> + Send + 'static>>;

/// Owns the display surface and all page-lifetime state
pub struct DashboardController<S: DisplaySurface> {
    surface: S,
    series: HumiditySeries,
    voice: VoiceCapture,
    text: &'static Translations,
    server: ServerConfig,
    http: Arc<dyn HttpClient>,
}

impl<S: DisplaySurface + std::fmt::Debug> std::fmt::Debug for DashboardController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("surface", &self.surface)
            .field("series", &self.series)
            .field("voice", &self.voice)
            .field("base_url", &self.server.base_url)
            .finish()
    }
}

impl<S: DisplaySurface> DashboardController<S> {
    pub fn new(surface: S, config: &Config, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!(
            "Created dashboard controller for {} (language={}, chart capacity={})",
            config.server.base_url,
            config.language,
            config.chart.capacity
        );

        Self {
            surface,
            series: HumiditySeries::new(config.chart.capacity),
            voice: VoiceCapture::default(),
            text: Translations::for_language(config.language),
            server: config.server.clone(),
            http,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn series(&self) -> &HumiditySeries {
        &self.series
    }

    pub fn voice_state(&self) -> CaptureState {
        self.voice.state()
    }

    pub fn translations(&self) -> &'static Translations {
        self.text
    }

    /// Route a channel event to its handler. Returns a follow-up request
    /// when the event needs network work.
    pub fn dispatch(&mut self, event: ChannelEvent) -> Option<Request> {
        tracing::debug!("Dispatching '{}' event", event.name());
        match event {
            ChannelEvent::Connect => self.on_channel_connect(),
            ChannelEvent::Disconnect => self.on_channel_disconnect(),
            ChannelEvent::SensorUpdate(reading) => self.on_sensor_update(&reading),
            ChannelEvent::CurrentData(reading) => self.on_current_data(&reading),
            ChannelEvent::DeviceStatus(status) => self.on_device_status(status),
            ChannelEvent::CommandAck(message) => self.on_command_ack(&message),
            ChannelEvent::NewImage => return Some(self.on_new_image_notice()),
        }
        None
    }

    /// Dispatch an event and wait for any follow-up request
    pub async fn handle(&mut self, event: ChannelEvent) {
        if let Some(request) = self.dispatch(event) {
            self.complete(request).await;
        }
    }

    /// Await a request and apply its outcome
    pub async fn complete(&mut self, request: Request) {
        let outcome = request.await;
        self.apply(outcome);
    }

    pub fn on_channel_connect(&mut self) {
        tracing::info!("Connected to push channel");
        self.surface.notify(Notice::info(self.text.connected_notice));
    }

    pub fn on_channel_disconnect(&mut self) {
        tracing::warn!("Disconnected from push channel");
        self.surface
            .notify(Notice::error(self.text.disconnected_notice));
    }

    /// Sparse display update plus a chart point when humidity is numeric
    pub fn on_sensor_update(&mut self, reading: &SensorReading) {
        self.update_readings(reading);
        self.record_humidity(reading, chart_label());
    }

    /// Sparse display update only
    pub fn on_current_data(&mut self, reading: &SensorReading) {
        self.update_readings(reading);
    }

    pub fn on_device_status(&mut self, status: DeviceStatus) {
        let text = match status {
            DeviceStatus::Online => self.text.status_online,
            DeviceStatus::Offline => self.text.status_offline,
        };
        self.surface.set_text(Target::DeviceStatus, text);
        self.surface.set_status_color(status.color());
    }

    pub fn on_command_ack(&mut self, message: &str) {
        self.surface.notify(Notice::info(message));
    }

    /// Announce the new photo and return the refresh request
    pub fn on_new_image_notice(&mut self) -> Request {
        self.surface.notify(Notice::info(self.text.new_image_notice));
        self.image_request()
    }

    /// Fetch the latest photo and update the photo panel
    pub async fn refresh_latest_image(&mut self) {
        let request = self.image_request();
        self.complete(request).await;
    }

    pub fn image_request(&self) -> Request {
        let http = Arc::clone(&self.http);
        let url = self.server.endpoint(LATEST_IMAGE_PATH);
        Box::pin(async move { Outcome::Image(fetch_latest_image(http.as_ref(), &url).await) })
    }

    /// Send a command and show the server's reply
    pub async fn send_command(&mut self, command: IrrigationCommand) {
        let request = self.command_request(command);
        self.complete(request).await;
    }

    pub fn command_request(&self, command: IrrigationCommand) -> Request {
        let http = Arc::clone(&self.http);
        let url = self.server.endpoint(COMMAND_PATH);
        Box::pin(async move {
            let reply = post_command(http.as_ref(), &url, command).await;
            Outcome::Command(command, reply)
        })
    }

    /// Manual start/stop button press
    pub fn press_button(&mut self, command: IrrigationCommand) -> Request {
        match command {
            IrrigationCommand::Start => self.surface.notify(Notice::info(self.text.start_sent)),
            IrrigationCommand::Stop => self.surface.notify(Notice::info(self.text.stop_sent)),
            IrrigationCommand::CheckStatus => {}
        }
        self.command_request(command)
    }

    /// Voice button press: Idle → Listening. Returns false if capture cannot start.
    pub fn begin_listening(&mut self) -> bool {
        if !self.voice.begin() {
            tracing::debug!("Voice capture not started (state={:?})", self.voice.state());
            return false;
        }
        self.surface.set_text(Target::VoiceFeedback, self.text.listening);
        self.surface
            .set_voice_button(false, self.text.voice_button_listening);
        true
    }

    /// Transcript delivered by the recognizer
    pub fn on_voice_result(&mut self, transcript: &str) -> Option<Request> {
        let heard = self.text.heard(&normalize_transcript(transcript));
        self.surface.set_text(Target::VoiceFeedback, &heard);
        self.recognize_voice_command(transcript)
    }

    /// Match a transcript against the phrase table and dispatch the command
    pub fn recognize_voice_command(&mut self, transcript: &str) -> Option<Request> {
        match match_command(transcript) {
            Some(command) => {
                tracing::debug!("Voice transcript matched '{}'", command);
                let feedback = self.text.recognized(command.as_str());
                self.surface.set_text(Target::VoiceFeedback, &feedback);
                Some(self.command_request(command))
            }
            None => {
                tracing::debug!("Voice transcript not recognized");
                self.surface
                    .set_text(Target::VoiceFeedback, self.text.not_recognized);
                None
            }
        }
    }

    /// Recognizer failure: show the reason and fall back to Idle
    pub fn on_voice_error(&mut self, reason: &str) {
        tracing::warn!("Speech recognition error: {}", reason);
        let feedback = self.text.recognition_error(reason);
        self.surface.set_text(Target::VoiceFeedback, &feedback);
        self.on_voice_end();
    }

    /// End of speech: Listening → Idle
    pub fn on_voice_end(&mut self) {
        if self.voice.finish() {
            self.surface.set_voice_button(true, self.text.voice_button_idle);
        }
    }

    /// No recognizer on this platform
    pub fn mark_voice_unavailable(&mut self) {
        self.voice.mark_unavailable();
        self.surface
            .set_text(Target::VoiceFeedback, self.text.voice_unavailable);
        self.surface
            .set_voice_button(false, self.text.voice_button_idle);
    }

    /// Apply the outcome of a finished request
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Image(Ok(image)) => match image.url() {
                Some(url) => self.surface.show_image(url),
                None => self.surface.show_image_placeholder(),
            },
            Outcome::Image(Err(e)) => {
                tracing::warn!("Error fetching latest image: {}", e);
                self.surface.show_image_placeholder();
            }
            Outcome::Command(command, Ok(reply)) => {
                tracing::debug!("'{}' -> {}: {}", command, reply.status, reply.message);
                if reply.is_error() {
                    let feedback = self.text.server_error(&reply.message);
                    self.surface.set_text(Target::VoiceFeedback, &feedback);
                    self.surface.notify(Notice::error(reply.message));
                } else {
                    let feedback = self.text.server_reply(&reply.message);
                    self.surface.set_text(Target::VoiceFeedback, &feedback);
                    self.surface.notify(Notice::info(reply.message));
                }
            }
            Outcome::Command(command, Err(e)) => {
                tracing::warn!("Error sending '{}': {}", command, e);
                self.surface
                    .set_text(Target::VoiceFeedback, self.text.command_failed);
                self.surface.notify(Notice::error(self.text.command_failed));
            }
        }
    }

    fn update_readings(&mut self, reading: &SensorReading) {
        let fields = [
            (Target::Temperature, &reading.temperature),
            (Target::Humidity, &reading.humidity),
            (Target::SoilMoisture, &reading.soil_moisture),
            (Target::LastUpdate, &reading.last_update),
        ];
        for (target, value) in fields {
            if let Some(value) = value {
                self.surface.set_text(target, &display_text(value));
            }
        }
    }

    fn record_humidity(&mut self, reading: &SensorReading, label: String) {
        let Some(value) = reading.humidity_value() else {
            if reading.humidity.is_some() {
                tracing::debug!("Dropping non-numeric humidity {:?}", reading.humidity);
            }
            return;
        };
        self.series.push(label, value);
        if let Some(point) = self.series.latest() {
            tracing::debug!("Charted humidity {} at {}", point.value, point.label);
        }
        self.surface.render_chart(&self.series);
    }
}

fn chart_label() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

async fn fetch_latest_image(http: &dyn HttpClient, url: &str) -> crate::Result<LatestImage> {
    let response = http.get(url).await?;
    if !response.is_success() {
        tracing::debug!(
            "Image lookup returned status {}: {}",
            response.status,
            response.text()
        );
    }
    response.json()
}

async fn post_command(
    http: &dyn HttpClient,
    url: &str,
    command: IrrigationCommand,
) -> crate::Result<CommandReply> {
    let body = serde_json::json!({ "command": command.as_str() });
    let response = http.post_json(url, &body).await?;
    if !response.is_success() {
        tracing::debug!(
            "Command endpoint returned status {}: {}",
            response.status,
            response.text()
        );
    }
    response.json()
}
