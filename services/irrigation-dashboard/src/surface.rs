//! Render targets the controller writes to

use std::collections::HashMap;
use std::fmt;

use crate::series::{ChartPoint, HumiditySeries};

/// A text display target on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Temperature,
    Humidity,
    SoilMoisture,
    LastUpdate,
    DeviceStatus,
    VoiceFeedback,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Temperature => write!(f, "temperature"),
            Target::Humidity => write!(f, "humidity"),
            Target::SoilMoisture => write!(f, "soil"),
            Target::LastUpdate => write!(f, "last update"),
            Target::DeviceStatus => write!(f, "device"),
            Target::VoiceFeedback => write!(f, "voice"),
        }
    }
}

/// A transient notification banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// What the latest-photo panel is showing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageView {
    #[default]
    Unset,
    Image(String),
    Placeholder,
}

/// Voice capture button state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceButton {
    pub enabled: bool,
    pub label: String,
}

/// Sink for everything the dashboard displays
pub trait DisplaySurface {
    /// Overwrite a text target
    fn set_text(&mut self, target: Target, text: &str);

    /// Set the device status indicator colour
    fn set_status_color(&mut self, color: &str);

    /// Show a transient notification
    fn notify(&mut self, notice: Notice);

    /// Show the photo panel with the given source and hide the placeholder
    fn show_image(&mut self, url: &str);

    /// Hide the photo and show the placeholder text
    fn show_image_placeholder(&mut self);

    fn set_voice_button(&mut self, enabled: bool, label: &str);

    /// Redraw the humidity chart from the full series
    fn render_chart(&mut self, series: &HumiditySeries);
}

/// In-memory surface keeping the latest state of every target
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    texts: HashMap<Target, String>,
    pub status_color: Option<String>,
    pub notices: Vec<Notice>,
    pub image: ImageView,
    pub voice_button: Option<VoiceButton>,
    pub chart: Vec<ChartPoint>,
    pub chart_renders: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, target: Target) -> Option<&str> {
        self.texts.get(&target).map(String::as_str)
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_text(&mut self, target: Target, text: &str) {
        self.texts.insert(target, text.to_string());
    }

    fn set_status_color(&mut self, color: &str) {
        self.status_color = Some(color.to_string());
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn show_image(&mut self, url: &str) {
        self.image = ImageView::Image(url.to_string());
    }

    fn show_image_placeholder(&mut self) {
        self.image = ImageView::Placeholder;
    }

    fn set_voice_button(&mut self, enabled: bool, label: &str) {
        self.voice_button = Some(VoiceButton {
            enabled,
            label: label.to_string(),
        });
    }

    fn render_chart(&mut self, series: &HumiditySeries) {
        self.chart = series.points().cloned().collect();
        self.chart_renders += 1;
    }
}

/// Terminal rendering for the command-line front end
#[derive(Debug)]
pub struct ConsoleSurface {
    placeholder_text: String,
}

impl ConsoleSurface {
    pub fn new(placeholder_text: impl Into<String>) -> Self {
        Self {
            placeholder_text: placeholder_text.into(),
        }
    }
}

impl DisplaySurface for ConsoleSurface {
    fn set_text(&mut self, target: Target, text: &str) {
        println!("[{}] {}", target, text);
    }

    fn set_status_color(&mut self, color: &str) {
        tracing::debug!("Status indicator color set to {}", color);
    }

    fn notify(&mut self, notice: Notice) {
        if notice.is_error {
            println!("(!) {}", notice.message);
        } else {
            println!("(i) {}", notice.message);
        }
    }

    fn show_image(&mut self, url: &str) {
        println!("[photo] {}", url);
    }

    fn show_image_placeholder(&mut self) {
        println!("[photo] {}", self.placeholder_text);
    }

    fn set_voice_button(&mut self, enabled: bool, label: &str) {
        let marker = if enabled { "" } else { " (disabled)" };
        println!("[voice button] {}{}", label, marker);
    }

    fn render_chart(&mut self, series: &HumiditySeries) {
        let line: Vec<String> = series
            .points()
            .map(|p| format!("{} {}", p.label, p.value))
            .collect();
        println!("[chart] {}", line.join(" | "));
    }
}
