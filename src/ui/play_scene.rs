//! Playfield rendering: scales the simulation's pixel coordinates onto
//! terminal cells.

use super::game_common::{
    create_play_layout, render_game_over_banner, render_info_panel_frame, render_status_bar,
};
use crate::events::Hud;
use flappy::core::constants::BACKGROUND_ZOOM;
use flappy::{Phase, Snapshot};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Tilt beyond which the player glyph points up or down.
const TILT_GLYPH_THRESHOLD: f64 = 10.0;

/// Frames the wing stays raised after a flap.
const WING_UP_FRAMES: u32 = 6;

/// What occupies one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Sky,
    Cloud,
    Pipe,
    Player,
    Ground,
}

/// Maps terminal cells of the playfield to simulation pixels. The last row
/// is the ground strip.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    /// Cells per pixel.
    x_scale: f64,
    y_scale: f64,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, snap: &Snapshot) -> Option<Self> {
        if cols == 0 || rows < 2 || snap.playable_width <= 0.0 || snap.playable_height <= 0.0 {
            return None;
        }
        Some(Self {
            cols,
            rows,
            x_scale: cols as f64 / snap.playable_width,
            y_scale: (rows - 1) as f64 / snap.playable_height,
        })
    }

    /// Pixel x at the centre of a column.
    pub fn pixel_x(&self, col: u16) -> f64 {
        (col as f64 + 0.5) / self.x_scale
    }

    /// Pixel y at the centre of a row.
    pub fn pixel_y(&self, row: u16) -> f64 {
        (row as f64 + 0.5) / self.y_scale
    }
}

pub fn classify_cell(snap: &Snapshot, vp: &Viewport, col: u16, row: u16) -> Cell {
    if row >= vp.rows - 1 {
        return Cell::Ground;
    }
    let px = vp.pixel_x(col);
    let py = vp.pixel_y(row);

    let p = &snap.player;
    if px >= p.left() && px < p.right() && py >= p.top() && py < p.bottom() {
        return Cell::Player;
    }

    if snap.phase != Phase::Idle {
        let in_pipe = snap.obstacles.iter().any(|o| {
            px >= o.x && px < o.trailing_edge() && (py < o.gap_start || py > o.gap_end())
        });
        if in_pipe {
            return Cell::Pipe;
        }
    }

    // Sparse clouds in the upper third, scrolled by the parallax offset
    if row < vp.rows / 3 {
        let world_x = px + snap.parallax_offset(BACKGROUND_ZOOM);
        let band = (world_x / 40.0).floor() as i64;
        if (band + row as i64 * 3).rem_euclid(11) == 0 {
            return Cell::Cloud;
        }
    }
    Cell::Sky
}

/// Glyph for the player: points along its tilt; the winged sprite flicks
/// its wing right after a flap.
pub fn player_glyph(snap: &Snapshot, hud: &Hud) -> &'static str {
    if hud.variant == flappy::Variant::Winged && hud.frames_since_flap < WING_UP_FRAMES {
        return "^";
    }
    if !hud.variant.tilts() || snap.phase == Phase::Idle {
        return "►";
    }
    if snap.tilt_degrees < -TILT_GLYPH_THRESHOLD {
        "▲"
    } else if snap.tilt_degrees > TILT_GLYPH_THRESHOLD {
        "▼"
    } else {
        "►"
    }
}

/// Render the whole game screen.
pub fn render_play(frame: &mut Frame, area: Rect, snap: &Snapshot, hud: &Hud) {
    let layout = create_play_layout(frame, area, snap);

    render_playfield(frame, layout.playfield, snap, hud);
    if snap.phase == Phase::Idle {
        render_start_screen(frame, layout.playfield, snap);
    } else if snap.phase.is_over() {
        render_crash_banner(frame, layout.playfield, snap);
    }
    render_status_bar(frame, layout.status_bar, snap);
    render_info_panel(frame, layout.info_panel, snap, hud);
}

fn render_playfield(frame: &mut Frame, area: Rect, snap: &Snapshot, hud: &Hud) {
    let Some(vp) = Viewport::new(area.width, area.height, snap) else {
        return;
    };
    let glyph = player_glyph(snap, hud);

    let mut lines = Vec::with_capacity(vp.rows as usize);
    for row in 0..vp.rows {
        let spans: Vec<Span> = (0..vp.cols)
            .map(|col| match classify_cell(snap, &vp, col, row) {
                Cell::Player => Span::styled(
                    glyph,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::Pipe => Span::styled("█", Style::default().fg(Color::Green)),
                Cell::Cloud => Span::styled("·", Style::default().fg(Color::White)),
                Cell::Ground => Span::styled("▀", Style::default().fg(Color::Rgb(222, 184, 135))),
                Cell::Sky => Span::raw(" "),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_start_screen(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    if area.height < 4 {
        return;
    }
    let lines = vec![
        Line::from(Span::styled(
            format!("BEST: {}", snap.best_score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "TAP TO PLAY",
            Style::default()
                .fg(Color::Rgb(255, 209, 102))
                .add_modifier(Modifier::BOLD),
        )),
    ];
    let y = area.y + area.height / 4;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, 3),
    );
}

fn render_crash_banner(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let message = format!("SCORE: {}   BEST: {}", snap.current_score, snap.best_score);
    let (footer, color) = if snap.phase.restart_enabled() {
        ("[Enter] Restart".to_string(), Color::Green)
    } else {
        (
            format!("Restart in {}", snap.countdown_remaining),
            Color::DarkGray,
        )
    };
    render_game_over_banner(frame, area, "CRASH!", &message, &footer, color);
}

fn render_info_panel(frame: &mut Frame, area: Rect, snap: &Snapshot, hud: &Hud) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let player = hud.username.as_deref().unwrap_or("guest");
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", hud.variant.name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Player: ", label),
            Span::styled(player.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                snap.current_score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best: ", label),
            Span::styled(snap.best_score.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ];

    if let Some(flash) = &hud.flash {
        lines.push(Line::from(Span::styled(
            format!(" {}", flash.text),
            Style::default().fg(flash.color),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use flappy::game::{Obstacle, PlayerEntity};

    fn snapshot(phase: Phase) -> Snapshot {
        Snapshot {
            phase,
            player: PlayerEntity::new(40.0, 300.0, 60.0, 60.0),
            tilt_degrees: 0.0,
            obstacles: vec![Obstacle {
                x: 200.0,
                gap_start: 200.0,
                gap_height: 270.0,
                width: 80.0,
                passed: false,
            }],
            current_score: 0,
            best_score: 0,
            countdown_remaining: 0,
            frame_index: 0,
            playable_width: 400.0,
            playable_height: 600.0,
            scroll_speed: 6.2,
        }
    }

    #[test]
    fn test_viewport_rejects_tiny_areas() {
        let snap = snapshot(Phase::Playing);
        assert!(Viewport::new(0, 10, &snap).is_none());
        assert!(Viewport::new(10, 1, &snap).is_none());
    }

    #[test]
    fn test_cells() {
        // 40 cols x 61 rows: 10 px per cell both ways, last row is ground
        let snap = snapshot(Phase::Playing);
        let vp = Viewport::new(40, 61, &snap).unwrap();
        assert_eq!(classify_cell(&snap, &vp, 5, 32), Cell::Player);
        assert_eq!(classify_cell(&snap, &vp, 22, 5), Cell::Pipe);
        assert_eq!(classify_cell(&snap, &vp, 22, 30), Cell::Sky);
        assert_eq!(classify_cell(&snap, &vp, 22, 55), Cell::Pipe);
        assert_eq!(classify_cell(&snap, &vp, 0, 60), Cell::Ground);
    }

    #[test]
    fn test_pipes_hidden_on_start_screen() {
        let snap = snapshot(Phase::Idle);
        let vp = Viewport::new(40, 61, &snap).unwrap();
        assert_ne!(classify_cell(&snap, &vp, 22, 55), Cell::Pipe);
    }

    #[test]
    fn test_glyph_follows_tilt() {
        let hud = Hud::new(None, flappy::Variant::Classic);
        let mut snap = snapshot(Phase::Playing);
        snap.tilt_degrees = -30.0;
        assert_eq!(player_glyph(&snap, &hud), "▲");
        snap.tilt_degrees = 30.0;
        assert_eq!(player_glyph(&snap, &hud), "▼");

        let flat = Hud::new(None, flappy::Variant::Zoomed);
        assert_eq!(player_glyph(&snap, &flat), "►");
    }
}
