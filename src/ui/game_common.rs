//! Screen frame around the playfield: border, aspect-correct playfield,
//! status bar, info panel, crash banner.

use flappy::{Phase, Snapshot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

const INFO_PANEL_WIDTH: u16 = 22;
const STATUS_BAR_HEIGHT: u16 = 2;
const MIN_PLAYFIELD_ROWS: u16 = 6;

const FLAP_HINTS: &[(&str, &str)] = &[("[Space/Up]", "Flap"), ("[Esc]", "Quit")];
const WAIT_HINTS: &[(&str, &str)] = &[("[Esc]", "Quit")];
const RESTART_HINTS: &[(&str, &str)] = &[("[Enter/Space]", "Restart"), ("[Esc]", "Quit")];

/// Areas of the play screen.
pub struct PlayLayout {
    /// Playfield, sized to the simulation's aspect ratio
    pub playfield: Rect,
    pub status_bar: Rect,
    pub info_panel: Rect,
}

/// Lay out the play screen.
///
/// ```text
/// ┌─ Flappy ───────────────────────────┬─ Info ─────┐
/// │      ┌──────────────────────┐      │            │
/// │      │  playfield (aspect)  │      │            │
/// │      └──────────────────────┘      │            │
/// │ [status bar - 2 lines]             │            │
/// └────────────────────────────────────┴────────────┘
/// ```
pub fn create_play_layout(frame: &mut Frame, area: Rect, snap: &Snapshot) -> PlayLayout {
    frame.render_widget(Clear, area);

    let border = match snap.phase {
        Phase::Cooldown | Phase::GameOver => Color::Red,
        Phase::Idle | Phase::Playing => Color::Cyan,
    };
    let block = Block::default()
        .title(" Flappy ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(INFO_PANEL_WIDTH)])
        .split(inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MIN_PLAYFIELD_ROWS),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(columns[0]);

    PlayLayout {
        playfield: fit_playfield(rows[0], snap.playable_width, snap.playable_height),
        status_bar: rows[1],
        info_panel: columns[1],
    }
}

/// Largest part of `area` with the proportions of a `width_px` x
/// `height_px` playfield plus one ground row. Centred horizontally; when
/// width is the limit the playfield sits on the bottom edge.
pub fn fit_playfield(area: Rect, width_px: f64, height_px: f64) -> Rect {
    if area.width == 0 || area.height < 2 || !(width_px > 0.0) || !(height_px > 0.0) {
        return area;
    }
    let sky_rows = (area.height - 1) as f64;
    let want_cols = (sky_rows * CELL_ASPECT * width_px / height_px).round() as u16;
    if want_cols <= area.width {
        let cols = want_cols.max(1);
        return Rect::new(
            area.x + (area.width - cols) / 2,
            area.y,
            cols,
            area.height,
        );
    }
    let sky = (area.width as f64 * height_px / (width_px * CELL_ASPECT)).round() as u16;
    let rows = sky.saturating_add(1).clamp(2, area.height);
    Rect::new(area.x, area.y + (area.height - rows), area.width, rows)
}

/// Status line for the current phase, then the key hints that work in it.
pub fn render_status_bar(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    if area.height < 1 {
        return;
    }
    let (text, color, controls) = match snap.phase {
        Phase::Idle => (
            "Press Space to start!".to_string(),
            Color::Yellow,
            FLAP_HINTS,
        ),
        Phase::Playing => (
            format!("Current: {}   Best: {}", snap.current_score, snap.best_score),
            Color::Green,
            FLAP_HINTS,
        ),
        Phase::Cooldown => (
            format!("Wait {}...", snap.countdown_remaining),
            Color::DarkGray,
            WAIT_HINTS,
        ),
        Phase::GameOver => (
            "Game over".to_string(),
            Color::Red,
            RESTART_HINTS,
        ),
    };

    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        Rect { height: 1, ..area },
    );
    if area.height < 2 {
        return;
    }

    let hints: Vec<Span> = controls
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = if i > 0 { "  " } else { "" };
            [
                Span::raw(gap),
                Span::styled(*key, Style::default().fg(Color::White)),
                Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(hints)).alignment(Alignment::Center),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Crash banner along the bottom of the playfield; the frozen scene stays
/// visible above it.
pub fn render_game_over_banner(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    footer: &str,
    footer_color: Color,
) {
    let height = 5u16.min(area.height);
    let banner = Rect {
        y: area.y + area.height - height,
        height,
        ..area
    };
    frame.render_widget(Clear, banner);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(banner);
    frame.render_widget(block, banner);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                title,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled(message, Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(footer, Style::default().fg(footer_color))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Bordered " Info " panel; returns the area inside the border.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
