use ratatui::{layout::Rect, Frame};
use unicode_width::UnicodeWidthStr;

use super::{centered_rect, MODAL_WIDTH};
use crate::app::{App, Screen};
use crate::timers::DraftField;

/// A UI screen boundary: draws one `Screen` of the app into a frame.
pub trait ScreenView {
    fn render(&self, app: &App, f: &mut Frame);
}

pub struct OnboardingView;

impl ScreenView for OnboardingView {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

pub struct HomeView;

impl ScreenView for HomeView {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// Home list with the custom-timer form on top.
pub struct AddTimerView;

impl ScreenView for AddTimerView {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
        if let Some(pos) = form_cursor(app, f.area()) {
            f.set_cursor_position(pos);
        }
    }
}

pub struct BreathingView;

impl ScreenView for BreathingView {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// Terminal cursor position after the focused form value, so IMEs and
/// screen readers follow typing.
fn form_cursor(app: &App, area: Rect) -> Option<(u16, u16)> {
    let modal = centered_rect(MODAL_WIDTH, DraftField::ALL.len() as u16 + 6, area);
    let row = DraftField::ALL
        .iter()
        .position(|f| *f == app.draft.focus)?;
    let label_width = DraftField::ALL
        .iter()
        .map(|f| f.to_string().width())
        .max()
        .unwrap_or(0);
    // border + padding, then the label and its two-space gap
    let x = modal.x + 2 + (label_width + 2 + app.draft.value(app.draft.focus).width()) as u16;
    // border + blank line above the first field
    let y = modal.y + 2 + row as u16;
    (x < modal.right() && y < modal.bottom()).then_some((x, y))
}

pub fn current_screen(screen: &Screen) -> Box<dyn ScreenView> {
    match screen {
        Screen::Onboarding => Box::new(OnboardingView),
        Screen::Home => Box::new(HomeView),
        Screen::AddTimer => Box::new(AddTimerView),
        Screen::Breathing => Box::new(BreathingView),
    }
}
