use std::collections::HashMap;
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::ConfigError;
use crate::feedback::{Feedback, FeedbackKind};
use crate::palette::{self, Rgb};

/// Stage of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Inhale,
    Hold,
    Exhale,
}

/// Result of leaving a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Enter(Phase),
    NextCycle,
    Complete,
}

impl Phase {
    fn transition(self, on_last_cycle: bool) -> Transition {
        match (self, on_last_cycle) {
            (Phase::Idle, _) => Transition::Enter(Phase::Inhale),
            (Phase::Inhale, _) => Transition::Enter(Phase::Hold),
            (Phase::Hold, _) => Transition::Enter(Phase::Exhale),
            (Phase::Exhale, false) => Transition::NextCycle,
            (Phase::Exhale, true) => Transition::Complete,
        }
    }
}

/// Inhale/hold/exhale seconds, written `4-7-8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathPattern {
    pub inhale: u32,
    pub hold: u32,
    pub exhale: u32,
}

impl FromStr for BreathPattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPattern {
            value: s.to_string(),
        };
        let parts = s
            .split('-')
            .map(|p| p.trim().parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        match parts.as_slice() {
            [inhale, hold, exhale] => Ok(Self {
                inhale: *inhale,
                hold: *hold,
                exhale: *exhale,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Validated, immutable parameters of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    inhale_secs: u32,
    hold_secs: u32,
    exhale_secs: u32,
    total_cycles: u32,
    accent: Rgb,
}

fn at_least(field: &'static str, value: u32, min: u32) -> Result<u32, ConfigError> {
    if value < min {
        Err(ConfigError::OutOfRange { field, value, min })
    } else {
        Ok(value)
    }
}

impl SessionConfig {
    pub fn new(
        inhale_secs: u32,
        hold_secs: u32,
        exhale_secs: u32,
        total_cycles: u32,
        accent: Rgb,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            inhale_secs: at_least("inhale", inhale_secs, 1)?,
            hold_secs,
            exhale_secs: at_least("exhale", exhale_secs, 1)?,
            total_cycles: at_least("cycles", total_cycles, 1)?,
            accent,
        })
    }

    pub fn from_pattern(
        pattern: BreathPattern,
        total_cycles: u32,
        accent: Rgb,
    ) -> Result<Self, ConfigError> {
        Self::new(
            pattern.inhale,
            pattern.hold,
            pattern.exhale,
            total_cycles,
            accent,
        )
    }

    /// Parse the string-typed entry parameters handed over by navigation.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let number = |field: &'static str| -> Result<u32, ConfigError> {
            let raw = params
                .get(field)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing { field })?;
            raw.parse::<u32>().map_err(|_| ConfigError::NotANumber {
                field,
                value: raw.to_string(),
            })
        };
        let accent = params
            .get("color")
            .ok_or(ConfigError::Missing { field: "color" })?
            .parse::<Rgb>()?;

        Self::new(
            number("inhale")?,
            number("hold")?,
            number("exhale")?,
            number("cycles")?,
            accent,
        )
    }

    pub fn inhale_secs(&self) -> u32 {
        self.inhale_secs
    }

    pub fn hold_secs(&self) -> u32 {
        self.hold_secs
    }

    pub fn exhale_secs(&self) -> u32 {
        self.exhale_secs
    }

    pub fn total_cycles(&self) -> u32 {
        self.total_cycles
    }

    pub fn accent(&self) -> Rgb {
        self.accent
    }

    /// Configured length of `phase`; zero for `Idle`.
    pub fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Idle => 0,
            Phase::Inhale => self.inhale_secs,
            Phase::Hold => self.hold_secs,
            Phase::Exhale => self.exhale_secs,
        }
    }

    /// Ticks needed to run the whole session.
    pub fn total_ticks(&self) -> u32 {
        (self.inhale_secs + self.hold_secs + self.exhale_secs) * self.total_cycles
    }
}

/// A named session as requested from the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub name: String,
    pub config: SessionConfig,
}

impl SessionEntry {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let name = params
            .get("name")
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(ConfigError::Missing { field: "name" })?;
        Ok(Self {
            name,
            config: SessionConfig::from_params(params)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    /// 0-indexed; stays at the last cycle once completed.
    pub current_cycle: u32,
    pub seconds_remaining: u32,
    pub is_running: bool,
    pub is_completed: bool,
}

impl SessionState {
    pub fn phase_text(&self) -> &'static str {
        if self.is_completed {
            return "Complete!";
        }
        match self.phase {
            Phase::Idle => "Ready to begin",
            Phase::Inhale => "Breathe in...",
            Phase::Hold => "Hold...",
            Phase::Exhale => "Breathe out...",
        }
    }

    pub fn phase_color(&self, config: &SessionConfig) -> Rgb {
        match self.phase {
            Phase::Inhale => palette::INHALE,
            Phase::Hold => palette::HOLD,
            Phase::Exhale => palette::EXHALE,
            Phase::Idle => config.accent(),
        }
    }

    pub fn phase_duration(&self, config: &SessionConfig) -> u32 {
        config.duration_of(self.phase)
    }

    pub fn cycle_label(&self, config: &SessionConfig) -> String {
        let shown = if self.is_completed {
            config.total_cycles()
        } else {
            self.current_cycle + 1
        };
        format!("Cycle {} of {}", shown, config.total_cycles())
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_completed {
            "Start Again"
        } else if self.is_running {
            "Pause"
        } else {
            "Start"
        }
    }

    /// Whether the tick driver should be armed.
    pub fn is_ticking(&self) -> bool {
        self.is_running && !self.is_completed
    }
}

/// What a single `tick` (or the synchronous first step of `start`) did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Phases entered, in order. A zero-length phase shows up here even though
    /// the session has already moved past it.
    pub entered: Vec<Phase>,
    pub completed: bool,
}

impl TickOutcome {
    pub fn transitioned(&self) -> bool {
        !self.entered.is_empty() || self.completed
    }
}

/// Owns one breathing session: phase sequencing, cycle counting and the
/// per-phase countdown.
///
/// A phase configured for `n` seconds ends on its `n`th tick. A zero-length
/// phase is entered and left within the tick that ended the phase before
/// it, so every cycle costs exactly `inhale + hold + exhale` ticks.
pub struct SessionController {
    config: SessionConfig,
    state: SessionState,
    feedback: Box<dyn Feedback>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SessionController {
    pub fn new(config: SessionConfig, feedback: Box<dyn Feedback>) -> Self {
        Self {
            config,
            state: SessionState::default(),
            feedback,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn cue(&self, kind: FeedbackKind) {
        if let Err(err) = self.feedback.notify(kind) {
            debug!(%kind, %err, "feedback cue dropped");
        }
    }

    pub fn start(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.state.is_running || self.state.is_completed {
            return outcome;
        }

        self.cue(FeedbackKind::Medium);
        let mut next = self.state.clone();
        next.is_running = true;
        if next.phase == Phase::Idle {
            self.advance(&mut next, &mut outcome);
        }
        info!(
            phase = %next.phase,
            cycle = next.current_cycle,
            remaining = next.seconds_remaining,
            "session running"
        );
        self.state = next;
        outcome
    }

    pub fn pause(&mut self) {
        if !self.state.is_running {
            return;
        }
        self.cue(FeedbackKind::Light);
        self.state.is_running = false;
        info!(
            phase = %self.state.phase,
            remaining = self.state.seconds_remaining,
            "session paused"
        );
    }

    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.state.is_ticking() {
            return outcome;
        }

        let mut next = self.state.clone();
        if next.seconds_remaining <= 1 {
            self.advance(&mut next, &mut outcome);
        } else {
            next.seconds_remaining -= 1;
        }
        self.state = next;
        outcome
    }

    pub fn reset(&mut self) {
        if !self.state.is_completed {
            return;
        }
        self.state = SessionState::default();
        debug!("session reset");
    }

    /// Single start/pause/"start again" control.
    pub fn toggle(&mut self) -> TickOutcome {
        if self.state.is_completed {
            self.reset();
            TickOutcome::default()
        } else if self.state.is_running {
            self.pause();
            TickOutcome::default()
        } else {
            self.start()
        }
    }

    /// Leave the current phase of `next`, cascading through zero-length
    /// phases. Cues fire here, before the caller commits `next`.
    fn advance(&self, next: &mut SessionState, outcome: &mut TickOutcome) {
        loop {
            self.cue(FeedbackKind::Light);
            let on_last_cycle = next.current_cycle + 1 >= self.config.total_cycles;
            match next.phase.transition(on_last_cycle) {
                Transition::Enter(phase) => next.phase = phase,
                Transition::NextCycle => {
                    next.current_cycle += 1;
                    next.phase = Phase::Inhale;
                }
                Transition::Complete => {
                    next.phase = Phase::Idle;
                    next.seconds_remaining = 0;
                    next.is_running = false;
                    next.is_completed = true;
                    self.cue(FeedbackKind::Success);
                    outcome.completed = true;
                    info!(cycles = self.config.total_cycles, "session complete");
                    return;
                }
            }

            outcome.entered.push(next.phase);
            next.seconds_remaining = self.config.duration_of(next.phase);
            debug!(
                phase = %next.phase,
                cycle = next.current_cycle,
                seconds = next.seconds_remaining,
                "phase transition"
            );
            if next.seconds_remaining > 0 {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedbackError;
    use crate::feedback::RecordingFeedback;
    use assert_matches::assert_matches;
    use crate::feedback::FeedbackKind::{Light, Medium, Success};

    fn controller(
        inhale: u32,
        hold: u32,
        exhale: u32,
        cycles: u32,
    ) -> (SessionController, RecordingFeedback) {
        let rec = RecordingFeedback::new();
        let config = SessionConfig::new(inhale, hold, exhale, cycles, palette::BRAND).unwrap();
        (SessionController::new(config, Box::new(rec.clone())), rec)
    }

    fn snapshot(c: &SessionController) -> (Phase, u32, u32) {
        let s = c.state();
        (s.phase, s.current_cycle, s.seconds_remaining)
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn new_session_is_idle() {
        let (c, rec) = controller(4, 7, 8, 4);
        assert_eq!(c.state(), &SessionState::default());
        assert_eq!(c.state().phase_text(), "Ready to begin");
        assert_eq!(c.state().phase_duration(c.config()), 0);
        assert!(rec.recorded().is_empty());
    }

    #[test]
    fn start_enters_inhale_synchronously() {
        let (mut c, rec) = controller(4, 7, 8, 4);
        let outcome = c.start();
        assert_eq!(outcome.entered, vec![Phase::Inhale]);
        assert_eq!(snapshot(&c), (Phase::Inhale, 0, 4));
        assert!(c.state().is_running);
        assert_eq!(rec.recorded(), vec![Medium, Light]);
    }

    #[test]
    fn start_while_running_is_noop() {
        let (mut c, rec) = controller(4, 7, 8, 4);
        c.start();
        c.tick();
        let before = c.state().clone();
        rec.clear();
        assert!(!c.start().transitioned());
        assert_eq!(c.state(), &before);
        assert!(rec.recorded().is_empty());
    }

    #[test]
    fn phase_consumes_exactly_its_seconds() {
        let (mut c, _) = controller(4, 7, 8, 4);
        c.start();
        for expected in [3, 2, 1] {
            c.tick();
            assert_eq!(snapshot(&c), (Phase::Inhale, 0, expected));
        }
        let outcome = c.tick();
        assert_eq!(outcome.entered, vec![Phase::Hold]);
        assert_eq!(snapshot(&c), (Phase::Hold, 0, 7));
    }

    #[test]
    fn four_seven_eight_first_cycle_takes_nineteen_ticks() {
        let (mut c, _) = controller(4, 7, 8, 4);
        c.start();
        for _ in 0..18 {
            c.tick();
        }
        assert_eq!(snapshot(&c), (Phase::Exhale, 0, 1));
        c.tick();
        assert_eq!(snapshot(&c), (Phase::Inhale, 1, 4));
    }

    #[test]
    fn four_seven_eight_completes_after_seventy_six_ticks() {
        let (mut c, rec) = controller(4, 7, 8, 4);
        c.start();
        for _ in 0..75 {
            assert!(!c.tick().completed);
        }
        let outcome = c.tick();
        assert!(outcome.completed);
        let s = c.state();
        assert!(s.is_completed);
        assert!(!s.is_running);
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.current_cycle, 3);
        assert_eq!(rec.recorded().last(), Some(&Success));
    }

    #[test]
    fn single_box_cycle_completes_in_twelve_ticks() {
        let (mut c, _) = controller(4, 4, 4, 1);
        c.start();
        for _ in 0..11 {
            c.tick();
        }
        assert!(!c.state().is_completed);
        c.tick();
        assert!(c.state().is_completed);
        assert_eq!(c.state().current_cycle, 0);
    }

    #[test]
    fn ticks_after_completion_are_ignored() {
        let (mut c, rec) = controller(1, 1, 1, 1);
        c.start();
        for _ in 0..3 {
            c.tick();
        }
        let done = c.state().clone();
        let cues = rec.recorded().len();
        assert!(!c.tick().transitioned());
        assert_eq!(c.state(), &done);
        assert_eq!(rec.recorded().len(), cues);
    }

    #[test]
    fn transitions_follow_inhale_hold_exhale() {
        let (mut c, _) = controller(2, 1, 2, 2);
        let mut order = c.start().entered;
        while !c.state().is_completed {
            order.extend(c.tick().entered);
        }
        use Phase::*;
        assert_eq!(order, vec![Inhale, Hold, Exhale, Inhale, Hold, Exhale]);
    }

    #[test]
    fn zero_hold_is_entered_but_takes_no_tick() {
        let (mut c, rec) = controller(2, 0, 3, 1);
        c.start();
        c.tick();
        rec.clear();
        let outcome = c.tick();
        assert_eq!(outcome.entered, vec![Phase::Hold, Phase::Exhale]);
        assert_eq!(snapshot(&c), (Phase::Exhale, 0, 3));
        assert_eq!(rec.recorded(), vec![Light, Light]);
        c.tick();
        c.tick();
        assert!(c.tick().completed);
    }

    #[test]
    fn every_config_completes_in_exact_tick_count() {
        for (i, h, e, n) in [(1, 0, 1, 1), (4, 7, 8, 4), (3, 3, 3, 3), (5, 0, 2, 3), (1, 9, 1, 2)] {
            let (mut c, _) = controller(i, h, e, n);
            c.start();
            let total = c.config().total_ticks();
            for t in 1..total {
                c.tick();
                assert!(!c.state().is_completed, "{i}-{h}-{e}x{n} done early at {t}");
            }
            c.tick();
            let s = c.state();
            assert!(s.is_completed, "{i}-{h}-{e}x{n}");
            assert_eq!(s.phase, Phase::Idle);
            assert_eq!(s.current_cycle, n - 1);
        }
    }

    #[test]
    fn pause_then_start_restores_exact_position() {
        let (mut c, rec) = controller(4, 7, 8, 4);
        c.start();
        for _ in 0..9 {
            c.tick();
        }
        let before = snapshot(&c);
        rec.clear();
        c.pause();
        assert!(!c.state().is_running);
        assert_eq!(snapshot(&c), before);
        assert!(!c.start().transitioned());
        assert_eq!(snapshot(&c), before);
        assert_eq!(rec.recorded(), vec![Light, Medium]);
    }

    #[test]
    fn paused_session_ignores_ticks() {
        let (mut c, _) = controller(4, 7, 8, 4);
        c.start();
        c.pause();
        let before = c.state().clone();
        c.tick();
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn pause_when_idle_is_noop() {
        let (mut c, rec) = controller(4, 7, 8, 4);
        c.pause();
        assert_eq!(c.state(), &SessionState::default());
        assert!(rec.recorded().is_empty());
    }

    #[test]
    fn reset_only_applies_when_completed() {
        let (mut c, _) = controller(1, 1, 1, 1);
        c.start();
        c.tick();
        let before = c.state().clone();
        c.reset();
        assert_eq!(c.state(), &before);

        c.tick();
        c.tick();
        assert!(c.state().is_completed);
        c.reset();
        assert_eq!(c.state(), &SessionState::default());
    }

    #[test]
    fn completed_session_does_not_restart_implicitly() {
        let (mut c, _) = controller(1, 1, 1, 1);
        c.start();
        for _ in 0..3 {
            c.tick();
        }
        assert!(!c.start().transitioned());
        assert!(c.state().is_completed);
        assert!(!c.state().is_running);
    }

    #[test]
    fn toggle_walks_start_pause_and_start_again() {
        let (mut c, _) = controller(1, 1, 1, 1);
        assert_eq!(c.state().button_label(), "Start");
        c.toggle();
        assert_eq!(c.state().button_label(), "Pause");
        c.toggle();
        assert_eq!(c.state().button_label(), "Start");
        c.toggle();
        for _ in 0..3 {
            c.tick();
        }
        assert_eq!(c.state().button_label(), "Start Again");
        c.toggle();
        assert_eq!(c.state(), &SessionState::default());
    }

    #[test]
    fn projections_follow_phase() {
        let (mut c, _) = controller(2, 3, 4, 2);
        assert_eq!(c.state().phase_color(c.config()), palette::BRAND);
        c.start();
        assert_eq!(c.state().phase_text(), "Breathe in...");
        assert_eq!(c.state().phase_color(c.config()), palette::INHALE);
        assert_eq!(c.state().phase_duration(c.config()), 2);
        c.tick();
        c.tick();
        assert_eq!(c.state().phase_text(), "Hold...");
        assert_eq!(c.state().phase_color(c.config()), palette::HOLD);
        assert_eq!(c.state().phase_duration(c.config()), 3);
        for _ in 0..3 {
            c.tick();
        }
        assert_eq!(c.state().phase_text(), "Breathe out...");
        assert_eq!(c.state().phase_color(c.config()), palette::EXHALE);
        assert_eq!(c.state().cycle_label(c.config()), "Cycle 1 of 2");
        for _ in 0..4 {
            c.tick();
        }
        assert_eq!(c.state().cycle_label(c.config()), "Cycle 2 of 2");
        for _ in 0..9 {
            c.tick();
        }
        assert_eq!(c.state().phase_text(), "Complete!");
        assert_eq!(c.state().cycle_label(c.config()), "Cycle 2 of 2");
        assert_eq!(c.state().phase_color(c.config()), palette::BRAND);
    }

    struct Broken;

    impl Feedback for Broken {
        fn notify(&self, _kind: FeedbackKind) -> Result<(), FeedbackError> {
            Err(FeedbackError::Poisoned)
        }
    }

    #[test]
    fn failing_feedback_never_reaches_state() {
        let config = SessionConfig::new(1, 1, 1, 1, palette::BRAND).unwrap();
        let mut c = SessionController::new(config, Box::new(Broken));
        c.start();
        c.tick();
        c.tick();
        assert!(c.tick().completed);
    }

    #[test]
    fn config_rejects_zero_lengths() {
        assert_matches!(
            SessionConfig::new(0, 1, 1, 1, palette::BRAND),
            Err(ConfigError::OutOfRange { field: "inhale", .. })
        );
        assert_matches!(
            SessionConfig::new(1, 1, 0, 1, palette::BRAND),
            Err(ConfigError::OutOfRange { field: "exhale", .. })
        );
        assert_matches!(
            SessionConfig::new(1, 1, 1, 0, palette::BRAND),
            Err(ConfigError::OutOfRange { field: "cycles", .. })
        );
        assert!(SessionConfig::new(1, 0, 1, 1, palette::BRAND).is_ok());
    }

    #[test]
    fn entry_params_parse() {
        let entry = SessionEntry::from_params(&params(&[
            ("name", "4-7-8 Relaxation"),
            ("inhale", "4"),
            ("hold", "7"),
            ("exhale", "8"),
            ("cycles", "4"),
            ("color", "#667EEA"),
        ]))
        .unwrap();
        assert_eq!(entry.name, "4-7-8 Relaxation");
        assert_eq!(entry.config.total_ticks(), 76);
        assert_eq!(entry.config.accent(), palette::INHALE);
    }

    #[test]
    fn entry_params_report_bad_values() {
        let base = [
            ("name", "x"),
            ("inhale", "4"),
            ("hold", "7"),
            ("exhale", "8"),
            ("cycles", "4"),
            ("color", "#667EEA"),
        ];
        let without = |key: &str| {
            params(
                &base
                    .iter()
                    .copied()
                    .filter(|(k, _)| *k != key)
                    .collect::<Vec<_>>(),
            )
        };
        let with = |key: &str, value: &'static str| {
            params(
                &base
                    .iter()
                    .map(|&(k, v)| if k == key { (k, value) } else { (k, v) })
                    .collect::<Vec<_>>(),
            )
        };

        assert_matches!(
            SessionEntry::from_params(&without("hold")),
            Err(ConfigError::Missing { field: "hold" })
        );
        assert_matches!(
            SessionEntry::from_params(&without("name")),
            Err(ConfigError::Missing { field: "name" })
        );
        assert_matches!(
            SessionEntry::from_params(&with("exhale", "eight")),
            Err(ConfigError::NotANumber { field: "exhale", .. })
        );
        assert_matches!(
            SessionEntry::from_params(&with("cycles", "")),
            Err(ConfigError::Missing { field: "cycles" })
        );
        assert_matches!(
            SessionEntry::from_params(&with("inhale", "-2")),
            Err(ConfigError::NotANumber { field: "inhale", .. })
        );
        assert_matches!(
            SessionEntry::from_params(&with("color", "blue")),
            Err(ConfigError::InvalidColor { .. })
        );
    }

    #[test]
    fn pattern_parses_dash_separated_seconds() {
        assert_eq!(
            "4-7-8".parse::<BreathPattern>().unwrap(),
            BreathPattern {
                inhale: 4,
                hold: 7,
                exhale: 8
            }
        );
        for bad in ["4-7", "4-7-8-9", "a-b-c", "", "4--8"] {
            assert_matches!(
                bad.parse::<BreathPattern>(),
                Err(ConfigError::InvalidPattern { .. }),
                "{bad}"
            );
        }
    }

    #[test]
    fn phase_displays_lowercase() {
        assert_eq!(Phase::Exhale.to_string(), "exhale");
    }
}
