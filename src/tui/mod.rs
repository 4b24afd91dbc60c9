//! Terminal User Interface
//!
//! TUI for exploring the manor and making the accusation, using ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};
use crate::data::MessageKind;

/// Color scheme for the game
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Yellow,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::LightYellow,
            border: Color::DarkGray,
            header: Color::Magenta,
        }
    }
}

/// Get color for a message kind
pub fn kind_color(kind: &MessageKind) -> Color {
    match kind {
        MessageKind::Info => Color::Gray,
        MessageKind::Clue => Color::Cyan,
        MessageKind::Warning => Color::Yellow,
        MessageKind::Verdict => Color::Magenta,
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// Centered popup of at most `width` x `height` inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// ASCII art logo
pub const LOGO: &str = r#"
╔════════════════════════════════════════════════════╗
║                                                    ║
║   ___      _            _   _                      ║
║  |   \ ___| |_ ___ __ _| |_(_)_ _____              ║
║  | |) / -_)  _/ -_) _|  _| \ V / -_)               ║
║  |___/\___|\__\___\__|\__|_|\_/\___|               ║
║                         ___                 _      ║
║                        / _ \ _  _ ___ ___ _| |_    ║
║                       | (_) | || / -_|_-<|  _|     ║
║                        \__\_\\_,_\___/__/ \__|     ║
║                                                    ║
║             The Mystery of the Manor               ║
╚════════════════════════════════════════════════════╝
"#;

/// Smaller logo for header
pub const SMALL_LOGO: &str = " DETECTIVE QUEST ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════╗
║                   CONTROLS                    ║
╠═══════════════════════════════════════════════╣
║  L / E / ←   Go through the left door         ║
║  R / D / →   Go through the right door        ║
║  S           Stop exploring and accuse        ║
║  ?           Toggle this help                 ║
║  Ctrl-C      Quit immediately                 ║
╠═══════════════════════════════════════════════╣
║                  ACCUSATION                   ║
╠═══════════════════════════════════════════════╣
║  Type        Name of the accused              ║
║  Tab         Cycle through known suspects     ║
║  Enter       Deliver the accusation           ║
╚═══════════════════════════════════════════════╝
"#;

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Min(10),     // Main content
            Constraint::Length(1),   // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Create the game content layout (left panel + main area)
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),  // Side panel
            Constraint::Percentage(70),  // Main area
        ])
        .split(area)
        .to_vec()
}

/// Create the main area layout (case log + notebook)
pub fn create_main_area_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55),  // Case log
            Constraint::Percentage(45),  // Notebook
        ])
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_rect(area, 40, 4);
        assert_eq!(popup, Rect::new(0, 3, 20, 4));
    }
}
