use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph},
    Frame,
};

use super::braille::BrailleCanvas;
use super::hud::level_progress;
use super::overlay::{render_overlay, OverlayMessage};
use crate::config::{DisplayConfig, KeyBindings};
use crate::game::state::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::game::{GameState, Paddle, Phase};

// Layout: header text, bordered playable area, HUD line
// Row 0: Level title
// Row 1: Scores
// Row 2: Level progress gauge
// Row 3: Top border (bottom dot row of the cell)
// Rows 4 to N-3: Playable area
// Row N-2: Bottom border (top dot row of the cell)
// Row N-1: HUD status line
const UI_HEADER_ROWS: u16 = 4;
const UI_FOOTER_ROWS: u16 = 2;

// Smallest terminal the field can be drawn in
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = UI_HEADER_ROWS + UI_FOOTER_ROWS + 6;

// The level banner shows for the first part of the transition
const BANNER_DURATION: Duration = Duration::from_millis(800);

/// Read-only inputs the renderer needs besides the game state
pub struct RenderContext<'a> {
    pub display: &'a DisplayConfig,
    pub keys: &'a KeyBindings,
    /// HUD status line, recomputed by the frame loop on score/level events
    pub hud: &'a str,
    pub now: Instant,
}

fn rgb(color: [u8; 3]) -> Color {
    Color::Rgb(color[0], color[1], color[2])
}

/// Number of terminal rows used by the playable field
fn playable_rows(area_height: u16) -> u16 {
    area_height.saturating_sub(UI_HEADER_ROWS + UI_FOOTER_ROWS)
}

/// Map a terminal row (from a mouse event) to a field y coordinate.
/// Rows above or below the field clamp to its edges.
pub fn field_y_for_row(area_height: u16, row: u16) -> Option<f32> {
    let rows = playable_rows(area_height);
    if rows == 0 {
        return None;
    }
    let offset = row as f32 - UI_HEADER_ROWS as f32 + 0.5;
    Some((offset / rows as f32 * FIELD_HEIGHT).clamp(0.0, FIELD_HEIGHT))
}

pub fn render(frame: &mut Frame, state: &GameState, ctx: &RenderContext) {
    let area = frame.area();

    // Draw background (true black RGB, not terminal default)
    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = Paragraph::new(format!(
            "Terminal too small ({}x{}), need {}x{}",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        ))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    draw_field(frame, state, ctx.display, area);
    draw_header(frame, state, ctx.display, area);
    draw_hud(frame, ctx.hud, area);

    let field_area = Rect {
        x: area.x,
        y: area.y + UI_HEADER_ROWS,
        width: area.width,
        height: playable_rows(area.height),
    };
    if let Some(overlay) = overlay_for(state, ctx) {
        render_overlay(frame, &overlay, field_area);
    }
}

fn draw_field(frame: &mut Frame, state: &GameState, display: &DisplayConfig, area: Rect) {
    let mut canvas = BrailleCanvas::new(area.width as usize, area.height as usize);

    let playable_height_pixels = playable_rows(area.height) as usize * 4;
    let playable_offset_y = UI_HEADER_ROWS as usize * 4;

    // Borders sit just outside the playable area
    let border = Color::Rgb(42, 74, 102);
    canvas.draw_horizontal_line(playable_offset_y - 1, border);
    canvas.draw_horizontal_line(playable_offset_y + playable_height_pixels, border);

    // Scale from virtual field to Braille pixels
    let scale_x = canvas.pixel_width() as f32 / FIELD_WIDTH;
    let scale_y = playable_height_pixels as f32 / FIELD_HEIGHT;

    // Dashed net down the middle
    let net_x = (FIELD_WIDTH / 2.0 * scale_x) as usize;
    for y in (0..playable_height_pixels).step_by(6) {
        let pixel_y = playable_offset_y + y;
        canvas.fill_rect(net_x, pixel_y, 1, 3, rgb(display.net_color));
    }

    let to_pixels = |paddle: &Paddle| {
        let x = (paddle.x * scale_x) as usize;
        let y = (paddle.y * scale_y) as usize + playable_offset_y;
        let w = ((paddle.width * scale_x) as usize).max(1);
        let h = ((paddle.height * scale_y) as usize).max(1);
        (x, y, w, h)
    };

    let (x, y, w, h) = to_pixels(&state.left_paddle);
    canvas.fill_rect(x, y, w, h, rgb(display.player_color));
    let (x, y, w, h) = to_pixels(&state.right_paddle);
    canvas.fill_rect(x, y, w, h, rgb(display.cpu_color));

    let ball = &state.ball;
    canvas.fill_ellipse(
        ball.x * scale_x,
        ball.y * scale_y + playable_offset_y as f32,
        ball.radius * scale_x,
        ball.radius * scale_y,
        rgb(display.ball_color),
    );

    render_braille_canvas(frame, &canvas, area);
}

fn render_braille_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect) {
    // One line per cell row, grouping runs of the same color into spans
    for y in 0..canvas.pixel_height() / 4 {
        let mut spans = Vec::new();
        let mut run = String::new();
        let mut run_color = canvas.color_at(0, y);

        for x in 0..canvas.pixel_width() / 2 {
            let color = canvas.color_at(x, y);
            if color != run_color && !run.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut run),
                    Style::default().fg(run_color),
                ));
            }
            run_color = color;
            run.push(canvas.to_char(x, y));
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, Style::default().fg(run_color)));
        }

        let row_area = Rect {
            x: area.x,
            y: area.y + y as u16,
            width: area.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn row(area: Rect, index: u16) -> Rect {
    Rect {
        x: area.x,
        y: area.y + index,
        width: area.width,
        height: 1,
    }
}

fn draw_header(frame: &mut Frame, state: &GameState, display: &DisplayConfig, area: Rect) {
    let setting = state.setting();
    let text = rgb(display.text_color);

    let title = Paragraph::new(format!("Level {}: {}", state.level, setting.name))
        .style(Style::default().fg(text).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, row(area, 0));

    // Scores centred at one third and two thirds of the width, in
    // non-overlapping boxes so each keeps its own colour
    let score_style = Style::default().add_modifier(Modifier::BOLD);
    let third = area.width / 3;
    let half = third / 2;
    let left = Paragraph::new(state.left_score.to_string())
        .style(score_style.fg(rgb(display.player_color)))
        .alignment(Alignment::Center);
    let right = Paragraph::new(state.right_score.to_string())
        .style(score_style.fg(rgb(display.cpu_color)))
        .alignment(Alignment::Center);
    let scores = row(area, 1);
    frame.render_widget(
        left,
        Rect {
            x: scores.x + third - half,
            width: half * 2,
            ..scores
        },
    );
    frame.render_widget(
        right,
        Rect {
            x: scores.x + third * 2 - half,
            width: half * 2,
            ..scores
        },
    );

    // Progress toward the next level
    let gauge_width = 40.min(area.width);
    let gauge_area = Rect {
        x: area.x + (area.width - gauge_width) / 2,
        width: gauge_width,
        ..row(area, 2)
    };
    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(rgb(display.progress_color))
                .bg(Color::Rgb(18, 50, 68)),
        )
        .ratio(level_progress(state))
        .label(format!(
            "Level Progress: {}/{} points",
            state.points_in_level, setting.points_to_advance
        ));
    frame.render_widget(gauge, gauge_area);
}

fn draw_hud(frame: &mut Frame, hud: &str, area: Rect) {
    let line = Paragraph::new(hud.to_string())
        .style(Style::default().fg(Color::Rgb(159, 183, 201)))
        .alignment(Alignment::Center);
    frame.render_widget(line, row(area, area.height - 1));
}

/// Overlay for the current phase, if any
fn overlay_for(state: &GameState, ctx: &RenderContext) -> Option<OverlayMessage> {
    let keys = ctx.keys;
    match state.phase {
        Phase::Playing => None,
        Phase::Paused => Some(
            OverlayMessage::info(vec!["PAUSED".to_string()]).with_hint(format!(
                "{} to resume  |  {} to restart  |  {} to quit",
                keys.pause, keys.restart, keys.quit
            )),
        ),
        Phase::LevelTransition { since } => {
            if ctx.now.saturating_duration_since(since) < BANNER_DURATION {
                let setting = state.setting();
                Some(
                    OverlayMessage::success(vec![format!(
                        "Level {}: {}",
                        state.level, setting.name
                    )])
                    .with_title("Level up"),
                )
            } else {
                None
            }
        }
        // Game over is only reached by clearing the last level
        Phase::GameOver => Some(
            OverlayMessage::highlight(vec![
                "Player Wins!".to_string(),
                String::new(),
                format!("Final Score: {} - {}", state.left_score, state.right_score),
                format!("Level Reached: {} ({})", state.setting().name, state.level),
                format!("Highscore: {}", state.highscore),
            ])
            .with_title("Game over")
            .with_hint(format!(
                "{} to restart  |  {} to resume  |  {} to quit",
                keys.restart, keys.pause, keys.quit
            )),
        ),
    }
}
