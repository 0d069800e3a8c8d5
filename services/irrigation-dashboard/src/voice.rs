//! Voice command matching and capture state

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Commands understood by the irrigation server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationCommand {
    #[serde(rename = "start irrigation")]
    Start,
    #[serde(rename = "stop irrigation")]
    Stop,
    #[serde(rename = "check status")]
    CheckStatus,
}

impl IrrigationCommand {
    /// Literal token sent to the server
    pub fn as_str(self) -> &'static str {
        match self {
            IrrigationCommand::Start => "start irrigation",
            IrrigationCommand::Stop => "stop irrigation",
            IrrigationCommand::CheckStatus => "check status",
        }
    }
}

impl fmt::Display for IrrigationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IrrigationCommand {
    type Err = crate::DashboardError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "start" | "start irrigation" => Ok(IrrigationCommand::Start),
            "stop" | "stop irrigation" => Ok(IrrigationCommand::Stop),
            "status" | "check status" => Ok(IrrigationCommand::CheckStatus),
            other => Err(crate::DashboardError::Config(format!(
                "Unknown command '{}', expected start, stop or status",
                other
            ))),
        }
    }
}

/// Ordered phrase table, evaluated first-match-wins
pub const VOICE_PHRASES: &[(&[&str], IrrigationCommand)] = &[
    (
        &[
            "démarre l'irrigation",
            "commence l'irrigation",
            "start irrigation",
            "ابدأ الري",
        ],
        IrrigationCommand::Start,
    ),
    (
        &[
            "arrête l'irrigation",
            "stop l'irrigation",
            "stop irrigation",
            "أوقف الري",
        ],
        IrrigationCommand::Stop,
    ),
    (
        &[
            "vérifie le statut",
            "quel est le statut",
            "check status",
            "تحقق من الحالة",
        ],
        IrrigationCommand::CheckStatus,
    ),
];

/// Lower-case, trim and unify apostrophes in a raw transcript
pub fn normalize_transcript(transcript: &str) -> String {
    transcript.trim().to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

/// Find the command a transcript asks for, if any
pub fn match_command(transcript: &str) -> Option<IrrigationCommand> {
    let normalized = normalize_transcript(transcript);
    VOICE_PHRASES
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|p| normalized.contains(p)))
        .map(|(_, command)| *command)
}

/// Voice capture lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Listening,
    /// No recognizer is available; the button stays disabled
    Unavailable,
}

/// Idle → Listening → Idle state machine behind the voice button
#[derive(Debug, Default)]
pub struct VoiceCapture {
    state: CaptureState,
}

impl VoiceCapture {
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Whether the voice button accepts presses
    pub fn button_enabled(&self) -> bool {
        self.state == CaptureState::Idle
    }

    /// Idle → Listening. Returns false when capture cannot start.
    pub fn begin(&mut self) -> bool {
        if self.state != CaptureState::Idle {
            return false;
        }
        self.state = CaptureState::Listening;
        true
    }

    /// Listening → Idle, on end-of-speech or error. Returns true if the state changed.
    pub fn finish(&mut self) -> bool {
        if self.state != CaptureState::Listening {
            return false;
        }
        self.state = CaptureState::Idle;
        true
    }

    pub fn mark_unavailable(&mut self) {
        self.state = CaptureState::Unavailable;
    }
}
