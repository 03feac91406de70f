use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{error, info, warn};

use crate::animator::{PhaseAnimator, PhaseSignal};
use crate::celebration::CompletionBurst;
use crate::config::{Config, ConfigStore};
use crate::error::ConfigError;
use crate::feedback::Feedback;
use crate::onboarding::{Advance, Onboarding};
use crate::palette;
use crate::session::{SessionController, SessionEntry};
use crate::tick_driver::TickDriver;
use crate::timers::{BreathingTimer, TimerDraft, TimerLibrary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Screen {
    Onboarding,
    Home,
    AddTimer,
    Breathing,
}

/// Everything that lives exactly as long as one visit to the session screen.
#[derive(Debug)]
pub struct BreathingSession {
    pub name: String,
    pub controller: SessionController,
    pub ticker: TickDriver,
    pub animator: PhaseAnimator,
    pub burst: CompletionBurst,
}

impl BreathingSession {
    pub fn new(entry: SessionEntry, feedback: Box<dyn Feedback>) -> Self {
        let mut session = Self {
            name: entry.name,
            controller: SessionController::new(entry.config, feedback),
            ticker: TickDriver::default(),
            animator: PhaseAnimator::new(),
            burst: CompletionBurst::new(),
        };
        session.publish();
        session
    }

    /// The `(phase, duration, active)` triple the visual follows.
    pub fn signal(&self) -> PhaseSignal {
        let state = self.controller.state();
        PhaseSignal {
            phase: state.phase,
            duration_secs: state.phase_duration(self.controller.config()),
            is_active: state.is_running,
        }
    }

    fn publish(&mut self) {
        let signal = self.signal();
        self.animator.update(signal);
    }

    pub fn toggle(&mut self) {
        self.controller.toggle();
        if !self.controller.state().is_completed {
            self.burst.stop();
        }
        self.ticker.sync(self.controller.state());
        self.publish();
    }

    /// Advance both clocks by one frame. `viewport` sizes the completion
    /// burst if the session finishes during this frame.
    pub fn on_frame(&mut self, elapsed: Duration, viewport: (u16, u16)) {
        self.animator.advance(elapsed);
        self.burst.update(elapsed);

        let was_completed = self.controller.state().is_completed;
        self.ticker.drive(elapsed, &mut self.controller);
        if !was_completed && self.controller.state().is_completed {
            let accent = self.controller.config().accent();
            let colors = [accent, palette::INHALE, palette::HOLD, palette::EXHALE];
            self.burst.start(viewport.0, viewport.1, &colors);
        }
        self.publish();
    }

    /// Leaving the screen: no tick may fire after this.
    pub fn close(&mut self) {
        self.ticker.cancel();
        self.burst.stop();
    }
}

pub struct App {
    pub screen: Screen,
    pub library: TimerLibrary,
    pub draft: TimerDraft,
    pub onboarding: Onboarding,
    pub session: Option<BreathingSession>,
    /// One-line message shown at the bottom of the home and form screens.
    pub status: Option<String>,
    config: Config,
    store: Box<dyn ConfigStore>,
    feedback: Arc<dyn Feedback>,
    viewport: (u16, u16),
}

impl App {
    pub fn new(store: Box<dyn ConfigStore>, feedback: Arc<dyn Feedback>) -> Self {
        let config = store.load();
        let library = TimerLibrary::with_presets().unwrap_or_else(|err| {
            error!(%err, "bundled presets unavailable");
            TimerLibrary::default()
        });
        let onboarding = Onboarding::load().unwrap_or_else(|err| {
            error!(%err, "bundled onboarding pages unavailable");
            Onboarding::new(Vec::new())
        });
        let screen = if config.onboarding_completed {
            Screen::Home
        } else {
            Screen::Onboarding
        };
        info!(%screen, "app ready");

        Self {
            screen,
            library,
            draft: TimerDraft::default(),
            onboarding,
            session: None,
            status: None,
            config,
            store,
            feedback,
            viewport: (80, 24),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    fn go(&mut self, screen: Screen) {
        if self.screen != screen {
            info!(from = %self.screen, to = %screen, "screen change");
        }
        self.screen = screen;
    }

    pub fn finish_onboarding(&mut self) {
        self.config.onboarding_completed = true;
        if let Err(err) = self.store.save(&self.config) {
            warn!(%err, "could not persist onboarding flag");
        }
        self.go(Screen::Home);
    }

    /// Forget the onboarding flag so the introduction shows again.
    pub fn reset_onboarding(&mut self) {
        self.config.onboarding_completed = false;
        if let Err(err) = self.store.save(&self.config) {
            warn!(%err, "could not persist onboarding flag");
        }
        self.go(Screen::Onboarding);
    }

    /// Enter the session screen from the string parameters of `timer`.
    /// A malformed timer keeps the app on the current screen.
    pub fn open_timer(&mut self, timer: &BreathingTimer) -> Result<(), ConfigError> {
        match timer.session_entry() {
            Ok(entry) => {
                self.open_entry(entry);
                Ok(())
            }
            Err(err) => {
                warn!(name = %timer.name, %err, "rejected session entry");
                self.status = Some(format!("Cannot start {}: {}", timer.name, err));
                Err(err)
            }
        }
    }

    pub fn open_entry(&mut self, entry: SessionEntry) {
        info!(name = %entry.name, "opening session");
        let feedback: Box<dyn Feedback> = Box::new(Arc::clone(&self.feedback));
        self.session = Some(BreathingSession::new(entry, feedback));
        self.status = None;
        self.go(Screen::Breathing);
    }

    pub fn open_selected(&mut self) {
        if let Some(timer) = self.library.selected().cloned() {
            let _ = self.open_timer(&timer);
        }
    }

    pub fn leave_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
        }
        self.go(Screen::Home);
    }

    pub fn on_frame(&mut self, elapsed: Duration) {
        let viewport = self.viewport;
        if let Some(session) = self.session.as_mut() {
            session.on_frame(elapsed, viewport);
        }
    }

    /// Handle a key press. Returns false when the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return false;
        }

        match self.screen {
            Screen::Onboarding => self.on_onboarding_key(key),
            Screen::Home => self.on_home_key(key),
            Screen::AddTimer => {
                self.on_form_key(key);
                true
            }
            Screen::Breathing => {
                self.on_session_key(key);
                true
            }
        }
    }

    fn on_onboarding_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => {
                if self.onboarding.next() == Advance::Finished {
                    self.finish_onboarding();
                }
            }
            KeyCode::Left | KeyCode::Char('p') => self.onboarding.previous(),
            KeyCode::Char('s') => {
                if self.onboarding.skip() == Advance::Finished {
                    self.finish_onboarding();
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => return false,
            _ => {}
        }
        true
    }

    fn on_home_key(&mut self, key: KeyEvent) -> bool {
        self.status = None;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.library.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.library.select_previous(),
            KeyCode::Enter | KeyCode::Char(' ') => self.open_selected(),
            KeyCode::Char('a') | KeyCode::Char('+') => {
                self.draft.clear();
                self.go(Screen::AddTimer);
            }
            KeyCode::Esc | KeyCode::Char('q') => return false,
            _ => {}
        }
        true
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        self.status = None;
        match key.code {
            KeyCode::Esc => {
                self.draft.clear();
                self.go(Screen::Home);
            }
            KeyCode::Tab | KeyCode::Down => self.draft.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.draft.focus_previous(),
            KeyCode::Backspace => self.draft.backspace(),
            KeyCode::Enter => match self.draft.submit() {
                Some(timer) => {
                    self.library.add(timer);
                    self.go(Screen::Home);
                }
                None => self.status = Some("Give your timer a name first".to_string()),
            },
            KeyCode::Char(c) => self.draft.input(c),
            _ => {}
        }
    }

    fn on_session_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(session) = self.session.as_mut() {
                    session.toggle();
                }
            }
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => self.leave_session(),
            _ => {}
        }
    }
}
