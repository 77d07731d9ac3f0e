//! Line-oriented terminal front-end pieces.

use crate::adapter::{LoopResume, UiAdapter};
use crate::config::EventFormat;
use roundabouts_rules::{BoardChangeEvent, BoardChangeListener};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Board-change listener that prints each event on stdout.
#[derive(Debug, Clone, Copy)]
pub struct EventPrinter {
    format: EventFormat,
}

impl EventPrinter {
    /// Creates a printer writing `format` lines.
    pub fn new(format: EventFormat) -> Self {
        Self { format }
    }

    /// Formats one event as a single line.
    pub fn format_event(&self, event: &BoardChangeEvent) -> Option<String> {
        match self.format {
            EventFormat::Text => Some(event.to_string()),
            EventFormat::Json => match serde_json::to_string(event) {
                Ok(line) => Some(line),
                Err(e) => {
                    warn!(error = %e, "Failed to serialize board event");
                    None
                }
            },
        }
    }
}

impl BoardChangeListener for EventPrinter {
    fn handle(&mut self, event: &BoardChangeEvent) {
        if let Some(line) = self.format_event(event) {
            println!("{}", line);
        }
    }
}

/// [`UiAdapter`] that waits a fixed delay, then resumes the long move.
#[derive(Debug, Clone, Copy)]
pub struct DelayedAnimator {
    delay: Duration,
}

impl DelayedAnimator {
    /// Creates an animator that "plays" each loop for `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl UiAdapter for DelayedAnimator {
    #[instrument(skip(self, resume), fields(at = %resume.at()))]
    fn request_loop_animation(&self, resume: LoopResume) {
        info!("Animating loop traversal");
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let at = resume.at();
            match resume.complete() {
                Ok(true) => debug!(%at, "Loop animation complete, long move resumed"),
                Ok(false) => warn!(%at, "Long move could not be resumed"),
                Err(e) => error!(%at, error = %e, "Failed to resume long move"),
            }
        });
    }
}
