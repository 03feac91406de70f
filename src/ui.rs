pub mod flower;
pub mod screen;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    animator,
    app::{App, BreathingSession, Screen},
    celebration::CompletionBurst,
    palette,
    timers::{format_duration, BreathingTimer, DraftField},
};

use self::flower::Flower;

const HORIZONTAL_MARGIN: u16 = 2;
const CARD_HEIGHT: u16 = 4;
const MODAL_WIDTH: u16 = 54;
const COMPLETION_MESSAGE: &str = "Great job! You've completed your breathing exercise.";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(Color::from(palette::BACKGROUND)));
        match self.screen {
            Screen::Onboarding => render_onboarding(self, area, buf),
            Screen::Home => render_home(self, area, buf),
            Screen::AddTimer => {
                render_home(self, area, buf);
                render_add_timer(self, area, buf);
            }
            Screen::Breathing => match &self.session {
                Some(session) => render_breathing(session, area, buf),
                None => render_home(self, area, buf),
            },
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// Cut `text` to at most `max` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// A `width` x `height` rect centered in `area`, clipped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn key_hint(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", dim()));
        }
        spans.push(Span::styled(key.to_string(), bold()));
        spans.push(Span::raw(format!(" {action}")));
    }
    Line::from(spans)
}

fn render_onboarding(app: &App, area: Rect, buf: &mut Buffer) {
    let pager = &app.onboarding;
    let Some(page) = pager.current() else {
        return;
    };
    let brand = Color::from(palette::BRAND);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN * 2)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(page.icon.as_str())
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(page.title.as_str(), bold().fg(brand)))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(page.description.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    let dots = (0..pager.pages().len())
        .map(|i| {
            if i == pager.current_index() {
                Span::styled("●", Style::default().fg(brand))
            } else {
                Span::styled("○", dim())
            }
        })
        .collect::<Vec<_>>();
    let dots = Itertools::intersperse(dots.into_iter(), Span::raw(" ")).collect::<Vec<_>>();
    Paragraph::new(Line::from(dots))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    let mut hints = vec![("Enter", pager.button_label())];
    if pager.current_index() > 0 {
        hints.push(("←", "Back"));
    }
    if !pager.is_last() {
        hints.push(("s", "Skip"));
    }
    Paragraph::new(key_hint(&hints))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);
}

/// "Inhale 4s · Hold 7s · Exhale 8s · 4 cycles"
pub fn pattern_summary(timer: &BreathingTimer) -> String {
    [
        format!("Inhale {}s", timer.inhale),
        format!("Hold {}s", timer.hold),
        format!("Exhale {}s", timer.exhale),
        format!("{} cycles", timer.cycles),
    ]
    .iter()
    .join(" · ")
}

fn render_card(timer: &BreathingTimer, selected: bool, area: Rect, buf: &mut Buffer) {
    let accent = Color::from(timer.color);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(if selected {
            Style::default().fg(accent)
        } else {
            dim()
        });
    let inner = block.inner(area);
    block.render(area, buf);

    let duration = format_duration(timer.total_duration());
    let marker = if selected { "› " } else { "  " };
    let width = inner.width as usize;
    let name = truncate_to_width(
        &timer.name,
        width.saturating_sub(duration.width() + marker.width() + 1),
    );
    let gap = width.saturating_sub(marker.width() + name.width() + duration.width());
    let title = Line::from(vec![
        Span::styled(marker, Style::default().fg(accent)),
        Span::styled(name, bold().fg(accent)),
        Span::raw(" ".repeat(gap)),
        Span::styled(duration, dim()),
    ]);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    Paragraph::new(title).render(rows[0], buf);

    let detail = format!("  {} · {}", timer.description, pattern_summary(timer));
    Paragraph::new(Span::styled(
        truncate_to_width(&detail, inner.width as usize),
        dim(),
    ))
    .render(rows[1], buf);
}

fn render_home(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "Breathe",
        bold().fg(Color::from(palette::BRAND)),
    ))
    .render(chunks[0], buf);
    Paragraph::new(Span::styled("Choose a breathing exercise", dim())).render(chunks[1], buf);

    let list = chunks[2];
    let capacity = usize::from((list.height / CARD_HEIGHT).max(1));
    let selected = app.library.selected_index();
    let first = (selected + 1).saturating_sub(capacity);
    for (slot, (index, timer)) in app
        .library
        .timers()
        .iter()
        .enumerate()
        .skip(first)
        .take(capacity)
        .enumerate()
    {
        let y = list.y + slot as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(list.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let card = Rect::new(list.x, y, list.width, height);
        render_card(timer, index == selected, card, buf);
    }
    if app.library.is_empty() {
        Paragraph::new(Span::styled("No timers yet. Press a to add one.", dim()))
            .render(list, buf);
    }

    let footer = match &app.status {
        Some(status) if app.screen == Screen::Home => {
            Line::from(Span::styled(status.clone(), Style::default().fg(Color::Yellow)))
        }
        _ => key_hint(&[
            ("↑/↓", "select"),
            ("Enter", "start"),
            ("a", "add timer"),
            ("q", "quit"),
        ]),
    };
    Paragraph::new(footer).render(chunks[3], buf);
}

fn render_add_timer(app: &App, area: Rect, buf: &mut Buffer) {
    let draft = &app.draft;
    let height = DraftField::ALL.len() as u16 + 6;
    let modal = centered_rect(MODAL_WIDTH, height, area);
    Clear.render(modal, buf);

    let block = Block::default()
        .title(Span::styled(" Create Custom Timer ", bold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::from(palette::CUSTOM_TIMER)));
    let inner = block.inner(modal);
    block.render(modal, buf);

    let label_width = DraftField::ALL
        .iter()
        .map(|f| f.to_string().width())
        .max()
        .unwrap_or(0);

    let mut lines = vec![Line::default()];
    for field in DraftField::ALL {
        let focused = field == draft.focus;
        let value = draft.value(field);
        let label = format!("{:>label_width$}  ", field.to_string());
        let mut spans = vec![Span::styled(
            label,
            if focused { bold() } else { dim() },
        )];
        if value.is_empty() {
            spans.push(Span::styled(
                field.placeholder(),
                dim().add_modifier(Modifier::ITALIC),
            ));
        } else {
            spans.push(Span::raw(value.to_string()));
        }
        if focused {
            spans.push(Span::styled(
                "▏",
                Style::default().fg(Color::from(palette::CUSTOM_TIMER)),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::default());
    match &app.status {
        Some(status) => lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        ))),
        None => lines.push(Line::default()),
    }
    lines.push(key_hint(&[
        ("Tab", "next"),
        ("Enter", "create"),
        ("Esc", "cancel"),
    ]));

    Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .render(inner, buf);
}

fn render_breathing(session: &BreathingSession, area: Rect, buf: &mut Buffer) {
    let state = session.controller.state();
    let config = session.controller.config();
    let phase_color = Color::from(state.phase_color(config));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Line::from(vec![
        Span::styled(session.name.clone(), bold()),
        Span::styled("   Esc back", dim()),
    ]))
    .render(chunks[0], buf);

    Paragraph::new(Span::styled(state.cycle_label(config), dim()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let figure = session
        .animator
        .petals(animator::gradient(state.phase));
    Flower::new(&figure).render(chunks[2], buf);

    Paragraph::new(Span::styled(state.phase_text(), bold().fg(phase_color)))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    if state.is_running {
        Paragraph::new(Span::styled(
            state.seconds_remaining.to_string(),
            bold().fg(phase_color),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
    }

    if state.is_completed {
        Paragraph::new(Span::styled(
            COMPLETION_MESSAGE,
            bold().fg(Color::from(palette::BRAND)),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[5], buf);
    }

    Paragraph::new(key_hint(&[("Space", state.button_label())]))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

    render_burst(&session.burst, area, buf);
}

fn render_burst(burst: &CompletionBurst, area: Rect, buf: &mut Buffer) {
    for particle in &burst.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;
        if x >= area.width || y >= area.height {
            continue;
        }

        let vitality = particle.vitality();
        let style = Style::default().fg(Color::from(particle.color));
        let style = if vitality > 0.7 {
            style.add_modifier(Modifier::BOLD)
        } else if vitality > 0.3 {
            style
        } else {
            style.add_modifier(Modifier::DIM)
        };

        // Particles drift behind any text already on screen.
        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            if cell.symbol() != " " {
                continue;
            }
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(style);
        }
    }
}
