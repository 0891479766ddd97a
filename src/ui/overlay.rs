// Overlay boxes for pause, level transition and game over screens

use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A message to display as an overlay in the center of the screen
#[derive(Debug, Clone)]
pub struct OverlayMessage {
    /// Lines of text to display
    pub lines: Vec<String>,
    /// Optional title for the overlay box
    pub title: Option<String>,
    /// Dimmed key hint under the message
    pub hint: Option<String>,
    /// Style preset for the overlay
    pub style: OverlayStyle,
}

/// Predefined styles for overlay messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayStyle {
    /// Pause screen (white/cyan)
    Info,
    /// Level banner (green)
    Success,
    /// Game over (yellow)
    Highlight,
}

impl OverlayMessage {
    pub fn info(lines: Vec<String>) -> Self {
        Self::styled(lines, OverlayStyle::Info)
    }

    pub fn success(lines: Vec<String>) -> Self {
        Self::styled(lines, OverlayStyle::Success)
    }

    pub fn highlight(lines: Vec<String>) -> Self {
        Self::styled(lines, OverlayStyle::Highlight)
    }

    fn styled(lines: Vec<String>, style: OverlayStyle) -> Self {
        Self {
            lines,
            title: None,
            hint: None,
            style,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn border_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::Cyan,
            OverlayStyle::Success => Color::Green,
            OverlayStyle::Highlight => Color::Yellow,
        }
    }

    fn text_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::White,
            OverlayStyle::Success => Color::LightGreen,
            OverlayStyle::Highlight => Color::LightYellow,
        }
    }

    /// Rows needed inside the border
    fn content_height(&self) -> u16 {
        let hint_rows = if self.hint.is_some() { 2 } else { 0 };
        self.lines.len() as u16 + hint_rows
    }

    fn content_width(&self) -> u16 {
        self.lines
            .iter()
            .chain(self.hint.iter())
            .chain(self.title.iter())
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as u16
    }
}

/// Render an overlay message in the center of `area`
pub fn render_overlay(frame: &mut Frame, message: &OverlayMessage, area: Rect) {
    // Add padding for borders and spacing
    let overlay_width = (message.content_width() + 6).min(area.width.saturating_sub(2));
    let overlay_height = (message.content_height() + 2).min(area.height);

    let overlay_area = Rect {
        x: area.x + area.width.saturating_sub(overlay_width) / 2,
        y: area.y + area.height.saturating_sub(overlay_height) / 2,
        width: overlay_width,
        height: overlay_height,
    };

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(message.border_color()))
        .style(Style::default().bg(Color::Rgb(11, 18, 32)));

    if let Some(ref title) = message.title {
        block = block.title(format!(" {} ", title));
    }

    frame.render_widget(block, overlay_area);

    let inner_area = overlay_area.inner(Margin::new(2, 1));

    let text_style = Style::default().fg(message.text_color());
    let mut text_lines: Vec<Line> = message
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            // First line is the headline
            let style = if i == 0 {
                text_style.add_modifier(Modifier::BOLD)
            } else {
                text_style
            };
            Line::from(Span::styled(line.clone(), style))
        })
        .collect();

    if let Some(ref hint) = message.hint {
        text_lines.push(Line::from(""));
        text_lines.push(Line::from(Span::styled(
            hint.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_accounts_for_hint_and_title() {
        let message = OverlayMessage::info(vec!["PAUSED".to_string()])
            .with_title("Paused game")
            .with_hint("Space to resume");

        assert_eq!(message.content_height(), 3);
        assert_eq!(message.content_width(), "Space to resume".len() as u16);
    }
}
