use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::error::FeedbackError;

/// Intensity of a haptic-equivalent cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackKind {
    Light,
    Medium,
    Success,
}

/// Fire-and-forget cue emitted on session transitions.
///
/// Callers ignore the result beyond logging it; a failing sink must never
/// affect session state.
pub trait Feedback {
    fn notify(&self, kind: FeedbackKind) -> Result<(), FeedbackError>;
}

impl<F: Feedback + ?Sized> Feedback for Arc<F> {
    fn notify(&self, kind: FeedbackKind) -> Result<(), FeedbackError> {
        (**self).notify(kind)
    }
}

/// Cue-less sink, used when feedback is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Feedback for Silent {
    fn notify(&self, _kind: FeedbackKind) -> Result<(), FeedbackError> {
        Ok(())
    }
}

/// Rings the terminal bell for the stronger cues. Light cues stay quiet so a
/// running session does not beep every phase.
pub struct TerminalBell<W: Write> {
    out: Mutex<W>,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl<W: Write> Feedback for TerminalBell<W> {
    fn notify(&self, kind: FeedbackKind) -> Result<(), FeedbackError> {
        let rings = match kind {
            FeedbackKind::Light => 0,
            FeedbackKind::Medium => 1,
            FeedbackKind::Success => 2,
        };
        if rings == 0 {
            return Ok(());
        }
        let mut out = self.out.lock().map_err(|_| FeedbackError::Poisoned)?;
        for _ in 0..rings {
            out.write_all(b"\x07")?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Keeps every cue in a shared log. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    log: Arc<Mutex<Vec<FeedbackKind>>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<FeedbackKind> {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut l) = self.log.lock() {
            l.clear();
        }
    }
}

impl Feedback for RecordingFeedback {
    fn notify(&self, kind: FeedbackKind) -> Result<(), FeedbackError> {
        self.log
            .lock()
            .map_err(|_| FeedbackError::Poisoned)?
            .push(kind);
        Ok(())
    }
}
