//! Custom widgets for the game UI

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// How close a suspect is to the conviction threshold
pub struct EvidenceMeter {
    label: String,
    count: usize,
    threshold: usize,
    color: Color,
}

impl EvidenceMeter {
    pub fn new(label: &str, count: usize, threshold: usize) -> Self {
        Self {
            label: label.to_string(),
            count,
            threshold: threshold.max(1),
            color: Color::Yellow,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for EvidenceMeter {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let color = if self.count >= self.threshold {
            Color::Green
        } else {
            self.color
        };

        let label = format!("{}: {}/{}", self.label, self.count, self.threshold);
        buf.set_stringn(area.x, area.y, &label, area.width as usize, Style::default().fg(color));

        if area.height > 1 {
            let inner = area.width - 2;
            let filled = (self.count.min(self.threshold) * inner as usize / self.threshold) as u16;
            let bar_y = area.y + 1;
            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());

            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(color));
            }
            for x in filled..inner {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// Double-lined box for the verdict
pub struct VerdictBox {
    title: String,
    content: Vec<String>,
    border_color: Color,
}

impl VerdictBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
            border_color: Color::Red,
        }
    }

    pub fn content(mut self, lines: Vec<String>) -> Self {
        self.content = lines;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }
}

impl Widget for VerdictBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let style = Style::default().fg(self.border_color);
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        buf.set_string(area.x, area.y, "╔", style);
        buf.set_string(right, area.y, "╗", style);
        buf.set_string(area.x, bottom, "╚", style);
        buf.set_string(right, bottom, "╝", style);
        for x in area.x + 1..right {
            buf.set_string(x, area.y, "═", style);
            buf.set_string(x, bottom, "═", style);
        }
        for y in area.y + 1..bottom {
            buf.set_string(area.x, y, "║", style);
            buf.set_string(right, y, "║", style);
        }

        let title = format!(" {} ", self.title);
        let title_width = title.chars().count() as u16;
        let title_x = area.x + area.width.saturating_sub(title_width) / 2;
        buf.set_stringn(title_x, area.y, &title, (area.width - 2) as usize, style);

        let text_width = (area.width - 4) as usize;
        for (i, line) in self.content.iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= bottom {
                break;
            }
            buf.set_stringn(area.x + 2, y, line, text_width, Style::default().fg(Color::White));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn meter_shows_progress() {
        let area = Rect::new(0, 0, 12, 2);
        let mut buf = Buffer::empty(area);
        EvidenceMeter::new("Clues", 1, 2).render(area, &mut buf);
        assert!(row(&buf, 0).starts_with("Clues: 1/2"));
        assert_eq!(row(&buf, 1), "[█████░░░░░]");
    }

    #[test]
    fn verdict_box_draws_border_and_text() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        VerdictBox::new("SOLVED")
            .content(vec!["James did it".to_string(), "cut off".to_string()])
            .render(area, &mut buf);
        assert!(row(&buf, 0).contains("SOLVED"));
        assert!(row(&buf, 1).contains("James did it"));
        assert!(row(&buf, 3).starts_with('╚'));
    }

    #[test]
    fn tiny_area_is_ignored() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        VerdictBox::new("X").render(area, &mut buf);
        EvidenceMeter::new("X", 0, 2).render(area, &mut buf);
        assert_eq!(row(&buf, 0), "  ");
    }
}
