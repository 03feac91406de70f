use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::embedded;
use crate::error::{ConfigError, DataError};
use crate::palette::{self, Rgb};
use crate::session::SessionEntry;

const PRESETS_FILE: &str = "presets.json";

/// A breathing pattern as listed on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingTimer {
    pub id: String,
    pub name: String,
    pub description: String,
    pub inhale: u32,
    pub hold: u32,
    pub exhale: u32,
    pub cycles: u32,
    pub color: Rgb,
}

impl BreathingTimer {
    /// String parameters handed to the session screen.
    pub fn session_params(&self) -> HashMap<String, String> {
        [
            ("id", self.id.clone()),
            ("name", self.name.clone()),
            ("inhale", self.inhale.to_string()),
            ("hold", self.hold.to_string()),
            ("exhale", self.exhale.to_string()),
            ("cycles", self.cycles.to_string()),
            ("color", self.color.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    pub fn session_entry(&self) -> Result<SessionEntry, ConfigError> {
        SessionEntry::from_params(&self.session_params())
    }

    pub fn total_duration(&self) -> Duration {
        Duration::from_secs(((self.inhale + self.hold + self.exhale) * self.cycles) as u64)
    }
}

pub fn presets() -> Result<Vec<BreathingTimer>, DataError> {
    embedded(PRESETS_FILE)
}

/// `1m 16s`, `45s`, `2m`.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    match (secs / 60, secs % 60) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m {s}s"),
    }
}

/// Presets followed by user-created timers, with a selection cursor.
#[derive(Debug, Clone, Default)]
pub struct TimerLibrary {
    timers: Vec<BreathingTimer>,
    selected: usize,
}

impl TimerLibrary {
    pub fn new(timers: Vec<BreathingTimer>) -> Self {
        Self {
            timers,
            selected: 0,
        }
    }

    pub fn with_presets() -> Result<Self, DataError> {
        Ok(Self::new(presets()?))
    }

    pub fn timers(&self) -> &[BreathingTimer] {
        &self.timers
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&BreathingTimer> {
        self.timers.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.timers.is_empty() {
            self.selected = (self.selected + 1) % self.timers.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.timers.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.timers.len() - 1);
        }
    }

    /// Append a timer and move the cursor onto it.
    pub fn add(&mut self, timer: BreathingTimer) {
        info!(name = %timer.name, "custom timer added");
        self.timers.push(timer);
        self.selected = self.timers.len() - 1;
    }

    pub fn find_by_name(&self, name: &str) -> Option<&BreathingTimer> {
        let wanted = name.trim();
        self.timers
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(wanted))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum DraftField {
    #[strum(to_string = "Name")]
    Name,
    #[strum(to_string = "Description")]
    Description,
    #[strum(to_string = "Inhale (sec)")]
    Inhale,
    #[strum(to_string = "Hold (sec)")]
    Hold,
    #[strum(to_string = "Exhale (sec)")]
    Exhale,
    #[strum(to_string = "Cycles")]
    Cycles,
}

impl DraftField {
    pub const ALL: [DraftField; 6] = [
        DraftField::Name,
        DraftField::Description,
        DraftField::Inhale,
        DraftField::Hold,
        DraftField::Exhale,
        DraftField::Cycles,
    ];

    pub fn is_numeric(self) -> bool {
        !matches!(self, DraftField::Name | DraftField::Description)
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            DraftField::Name => "e.g., Morning Breathing",
            DraftField::Description => "e.g., Start your day with calm",
            _ => "",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

const NUMBER_MAX_LEN: usize = 2;
const TEXT_MAX_LEN: usize = 40;
const DEFAULT_DESCRIPTION: &str = "Custom breathing pattern";

/// The "Create Custom Timer" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerDraft {
    pub name: String,
    pub description: String,
    pub inhale: String,
    pub hold: String,
    pub exhale: String,
    pub cycles: String,
    pub focus: DraftField,
}

impl Default for TimerDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            inhale: "4".into(),
            hold: "4".into(),
            exhale: "4".into(),
            cycles: "5".into(),
            focus: DraftField::Name,
        }
    }
}

/// Form numbers fall back to their default when empty, garbled or zero.
fn number_or(raw: &str, default: u32) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

impl TimerDraft {
    pub fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Description => &self.description,
            DraftField::Inhale => &self.inhale,
            DraftField::Hold => &self.hold,
            DraftField::Exhale => &self.exhale,
            DraftField::Cycles => &self.cycles,
        }
    }

    fn value_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.name,
            DraftField::Description => &mut self.description,
            DraftField::Inhale => &mut self.inhale,
            DraftField::Hold => &mut self.hold,
            DraftField::Exhale => &mut self.exhale,
            DraftField::Cycles => &mut self.cycles,
        }
    }

    pub fn focus_next(&mut self) {
        let i = (self.focus.position() + 1) % DraftField::ALL.len();
        self.focus = DraftField::ALL[i];
    }

    pub fn focus_previous(&mut self) {
        let len = DraftField::ALL.len();
        let i = (self.focus.position() + len - 1) % len;
        self.focus = DraftField::ALL[i];
    }

    /// Type into the focused field. Numeric fields take at most two digits.
    pub fn input(&mut self, c: char) {
        let field = self.focus;
        let value = self.value_mut(field);
        let accepted = if field.is_numeric() {
            c.is_ascii_digit() && value.chars().count() < NUMBER_MAX_LEN
        } else {
            !c.is_control() && value.chars().count() < TEXT_MAX_LEN
        };
        if accepted {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focus;
        self.value_mut(field).pop();
    }

    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Build the timer and clear the form, or `None` while the name is blank.
    pub fn submit(&mut self) -> Option<BreathingTimer> {
        if !self.can_submit() {
            return None;
        }
        let description = match self.description.trim() {
            "" => DEFAULT_DESCRIPTION.to_string(),
            d => d.to_string(),
        };
        let timer = BreathingTimer {
            id: chrono::Utc::now().timestamp_millis().to_string(),
            name: self.name.trim().to_string(),
            description,
            inhale: number_or(&self.inhale, 4),
            hold: number_or(&self.hold, 4),
            exhale: number_or(&self.exhale, 4),
            cycles: number_or(&self.cycles, 5),
            color: palette::CUSTOM_TIMER,
        };
        *self = Self::default();
        Some(timer)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
