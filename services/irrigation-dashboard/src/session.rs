//! Line-driven session loop feeding a controller with events and user actions

use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::controller::{DashboardController, Outcome, Request};
use crate::events::ChannelEvent;
use crate::surface::DisplaySurface;
use crate::voice::IrrigationCommand;

/// A user action typed on the input stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Press(IrrigationCommand),
    Voice(String),
    RefreshImage,
    Quit,
}

impl FromStr for UserAction {
    type Err = crate::DashboardError;

    fn from_str(line: &str) -> crate::Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match word {
            "start" | "stop" | "status" => Ok(UserAction::Press(word.parse()?)),
            "voice" if !rest.trim().is_empty() => Ok(UserAction::Voice(rest.trim().to_string())),
            "image" => Ok(UserAction::RefreshImage),
            "quit" | "exit" => Ok(UserAction::Quit),
            _ => Err(crate::DashboardError::Channel(format!(
                "Unrecognized input line: {}",
                line
            ))),
        }
    }
}

/// Counters reported when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub events: usize,
    pub actions: usize,
    pub ignored: usize,
    pub rejected: usize,
    pub requests: usize,
}

enum Step {
    Continue(Option<Request>),
    Quit,
}

/// Drive `controller` from `input` until end of input, `quit`, or cancellation.
///
/// Push events are applied in line order. Network requests run concurrently
/// and their outcomes are applied as they finish. Lines that are not valid
/// UTF-8 are rejected without ending the session; a failing input stream ends
/// it, after in-flight requests have been applied.
pub async fn run_session<S, R>(
    controller: &mut DashboardController<S>,
    input: R,
    cancel: CancellationToken,
) -> crate::Result<SessionStats>
where
    S: DisplaySurface,
    R: AsyncBufRead + Unpin,
{
    let mut segments = input.split(b'\n');
    let mut pending: JoinSet<Outcome> = JoinSet::new();
    let mut stats = SessionStats::default();
    let mut cancelled = false;
    let mut read_error = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Session cancelled");
                cancelled = true;
                break;
            }
            Some(joined) = pending.join_next(), if !pending.is_empty() => {
                apply_joined(controller, joined);
            }
            segment = segments.next_segment() => {
                let segment = match segment {
                    Ok(Some(segment)) => segment,
                    Ok(None) => {
                        tracing::debug!("End of input");
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("Input stream failed: {}", e);
                        read_error = Some(e);
                        break;
                    }
                };
                let line = match String::from_utf8(segment) {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::warn!("Dropping input line that is not valid UTF-8: {}", e);
                        stats.rejected += 1;
                        continue;
                    }
                };
                match handle_line(controller, &line, &mut stats) {
                    Step::Continue(Some(request)) => {
                        stats.requests += 1;
                        pending.spawn(request);
                    }
                    Step::Continue(None) => {}
                    Step::Quit => break,
                }
            }
        }
    }

    if cancelled {
        pending.abort_all();
    } else {
        while let Some(joined) = pending.join_next().await {
            apply_joined(controller, joined);
        }
    }

    tracing::info!(
        "Session ended: {} events, {} actions, {} requests, {} ignored, {} rejected",
        stats.events,
        stats.actions,
        stats.requests,
        stats.ignored,
        stats.rejected
    );
    match read_error {
        Some(e) => Err(e.into()),
        None => Ok(stats),
    }
}

fn apply_joined<S: DisplaySurface>(
    controller: &mut DashboardController<S>,
    joined: Result<Outcome, tokio::task::JoinError>,
) {
    match joined {
        Ok(outcome) => controller.apply(outcome),
        Err(e) => tracing::warn!("Request task failed: {}", e),
    }
}

fn handle_line<S: DisplaySurface>(
    controller: &mut DashboardController<S>,
    line: &str,
    stats: &mut SessionStats,
) -> Step {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Step::Continue(None);
    }

    if line.starts_with('{') {
        return match ChannelEvent::from_line(line) {
            Ok(Some(event)) => {
                stats.events += 1;
                Step::Continue(controller.dispatch(event))
            }
            Ok(None) => {
                stats.ignored += 1;
                Step::Continue(None)
            }
            Err(e) => {
                tracing::warn!("Dropping event: {}", e);
                stats.rejected += 1;
                Step::Continue(None)
            }
        };
    }

    let action = match line.parse::<UserAction>() {
        Ok(action) => action,
        Err(e) => {
            tracing::warn!("{}", e);
            stats.rejected += 1;
            return Step::Continue(None);
        }
    };
    stats.actions += 1;

    match action {
        UserAction::Press(command) => Step::Continue(Some(controller.press_button(command))),
        UserAction::Voice(transcript) => {
            if !controller.begin_listening() {
                return Step::Continue(None);
            }
            let request = controller.on_voice_result(&transcript);
            controller.on_voice_end();
            Step::Continue(request)
        }
        UserAction::RefreshImage => Step::Continue(Some(controller.image_request())),
        UserAction::Quit => Step::Quit,
    }
}
