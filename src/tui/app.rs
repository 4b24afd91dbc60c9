//! Main application state and rendering

use crate::data::Direction as Exit;
use crate::game::{Choice, Game, GamePhase, CONVICTION_THRESHOLD, MAX_ACCUSED_LEN};
use crate::tui::widgets::{EvidenceMeter, VerdictBox};
use crate::tui::{centered_rect, kind_color, styled_block, Theme, HELP_TEXT, LOGO, SMALL_LOGO};
use crate::tui::{create_content_layout, create_main_area_layout, create_main_layout};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

/// Application state
pub struct App {
    pub game: Game,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub current_screen: Screen,
    pub input_buffer: String,
    suspect_cursor: Option<usize>,
}

/// Current screen being displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Title,
    Exploring,
    Accusing,
    Verdict,
}

impl App {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            theme: Theme::default(),
            running: true,
            show_help: false,
            current_screen: Screen::Title,
            input_buffer: String::new(),
            suspect_cursor: None,
        }
    }

    /// Wait briefly for a key and handle it
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(self.running)
    }

    /// Apply one key press. Returns whether the app keeps running.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return false;
        }

        if self.show_help {
            // Any key closes the help overlay
            self.show_help = false;
            return self.running;
        }

        match self.current_screen {
            Screen::Title => self.handle_title_key(key.code),
            Screen::Exploring => self.handle_exploring_key(key.code),
            Screen::Accusing => self.handle_accusing_key(key.code),
            Screen::Verdict => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                    self.running = false;
                }
            }
        }
        self.running
    }

    fn handle_title_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.current_screen = Screen::Exploring,
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn handle_exploring_key(&mut self, code: KeyCode) {
        let choice = match code {
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            KeyCode::Char(c) => Choice::from_key(c),
            KeyCode::Left => Choice::Go(Exit::Left),
            KeyCode::Right => Choice::Go(Exit::Right),
            _ => return,
        };

        self.game.choose(choice);
        if self.game.phase == GamePhase::Accusing {
            self.current_screen = Screen::Accusing;
        }
    }

    fn handle_accusing_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.submit_accusation(),
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.suspect_cursor = None;
            }
            KeyCode::Tab => self.cycle_suspect(),
            KeyCode::Char(c) => {
                if self.input_buffer.len() + c.len_utf8() <= MAX_ACCUSED_LEN {
                    self.input_buffer.push(c);
                }
                self.suspect_cursor = None;
            }
            _ => {}
        }
    }

    fn cycle_suspect(&mut self) {
        let suspects = self.game.suspects().suspects();
        if suspects.is_empty() {
            return;
        }
        let next = self.suspect_cursor.map_or(0, |i| (i + 1) % suspects.len());
        self.input_buffer = crate::game::accusation::bounded_name(suspects[next]);
        self.suspect_cursor = Some(next);
    }

    fn submit_accusation(&mut self) {
        if self.input_buffer.trim().is_empty() {
            return;
        }
        let accused = std::mem::take(&mut self.input_buffer);
        if self.game.accuse(&accused).is_ok() {
            self.current_screen = Screen::Verdict;
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        match self.current_screen {
            Screen::Title => self.render_title(frame),
            Screen::Exploring => self.render_exploring(frame),
            Screen::Accusing => self.render_accusing(frame),
            Screen::Verdict => self.render_verdict(frame),
        }

        // Overlay help if showing
        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_title(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.bg)),
            area,
        );

        let logo_height = LOGO.lines().count() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(logo_height),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let logo = Paragraph::new(LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(logo, chunks[0]);

        let intro = vec![
            Line::from(Span::styled(
                self.game.title.as_str(),
                Style::default().fg(self.theme.header).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("A crime was committed in the manor."),
            Line::from("Explore the rooms, collect clues and find the culprit."),
            Line::from(format!(
                "You will need at least {} clues to accuse someone.",
                CONVICTION_THRESHOLD
            )),
        ];
        let intro = Paragraph::new(intro)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(intro, chunks[1]);

        let footer = Paragraph::new("Press Enter to begin | ? for help | q to quit")
            .style(Style::default().fg(self.theme.border))
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[2]);
    }

    fn render_exploring(&self, frame: &mut Frame) {
        let layout = create_main_layout(frame.area());
        self.render_header(frame, layout[0]);

        let content_layout = create_content_layout(layout[1]);
        self.render_location_panel(frame, content_layout[0]);

        let main_layout = create_main_area_layout(content_layout[1]);
        self.render_messages(frame, main_layout[0]);
        self.render_notebook(frame, main_layout[1]);

        self.render_status_bar(frame, layout[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(20),
                Constraint::Min(20),
                Constraint::Length(18),
            ])
            .split(area);

        let bordered = || {
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.border))
        };

        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(bordered());
        frame.render_widget(logo, header_layout[0]);

        let title = Paragraph::new(self.game.title.as_str())
            .style(Style::default().fg(self.theme.warning))
            .alignment(Alignment::Center)
            .block(bordered());
        frame.render_widget(title, header_layout[1]);

        let case = Paragraph::new(format!("Case #{}", self.game.case_id.short()))
            .style(Style::default().fg(self.theme.fg))
            .alignment(Alignment::Right)
            .block(bordered());
        frame.render_widget(case, header_layout[2]);
    }

    fn render_location_panel(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),      // Path so far
                Constraint::Length(7),   // Moves
            ])
            .split(area);

        let room = self.game.current_room();
        let breadcrumb = self.game.breadcrumb();
        let last = breadcrumb.len().saturating_sub(1);
        let path: Vec<ListItem> = breadcrumb
            .iter()
            .enumerate()
            .map(|(depth, name)| {
                let style = if depth == last {
                    Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.border)
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{}{}", "  ".repeat(depth), name),
                    style,
                )))
            })
            .collect();
        let path = List::new(path).block(styled_block("Path", &self.theme));
        frame.render_widget(path, chunks[0]);

        let door = |open: bool, text: &'static str| {
            let color = if open { self.theme.fg } else { self.theme.border };
            ListItem::new(Span::styled(text, Style::default().fg(color)))
        };
        let mut moves = vec![
            door(room.has_left(), "  [L] ← Left door"),
            door(room.has_right(), "  [R] → Right door"),
            door(true, "  [S] ✕ Stop and accuse"),
        ];
        if room.is_leaf() {
            moves.push(ListItem::new(Span::styled(
                "  Dead end",
                Style::default().fg(self.theme.alert),
            )));
        }
        let moves = List::new(moves).block(styled_block(room.name(), &self.theme));
        frame.render_widget(moves, chunks[1]);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect) {
        let visible_lines = area.height.saturating_sub(2) as usize;
        let start = self.game.message_log.len().saturating_sub(visible_lines);
        let lines: Vec<Line> = self.game.message_log[start..]
            .iter()
            .map(|m| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", m.timestamp.format("%H:%M:%S")),
                        Style::default().fg(self.theme.border),
                    ),
                    Span::styled(
                        format!("{} {}", m.kind.symbol(), m.message),
                        Style::default().fg(kind_color(&m.kind)),
                    ),
                ])
            })
            .collect();

        let log = Paragraph::new(lines)
            .block(styled_block("Case Log", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(log, area);
    }

    fn render_notebook(&self, frame: &mut Frame, area: Rect) {
        let catalog = self.game.catalog();
        let items: Vec<ListItem> = if catalog.is_empty() {
            vec![ListItem::new(Span::styled(
                "  No clues yet",
                Style::default().fg(self.theme.border),
            ))]
        } else {
            catalog
                .iter()
                .map(|clue| ListItem::new(format!("  • {}", clue)))
                .collect()
        };
        let title = format!("Notebook ({})", catalog.count());
        let notebook = List::new(items).block(styled_block(&title, &self.theme));
        frame.render_widget(notebook, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status = Paragraph::new(format!(" {} | Press ? for help ", self.game.check_status()))
            .style(Style::default().fg(self.theme.fg).bg(Color::DarkGray));
        frame.render_widget(status, area);
    }

    fn render_accusing(&self, frame: &mut Frame) {
        let layout = create_main_layout(frame.area());
        self.render_header(frame, layout[0]);

        let content_layout = create_content_layout(layout[1]);
        self.render_notebook(frame, content_layout[0]);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),      // Suspects
                Constraint::Length(3),   // Name input
            ])
            .split(content_layout[1]);

        let catalog = self.game.catalog();
        let index = self.game.suspects();
        let rows: Vec<Line> = index
            .suspects()
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let selected = self.suspect_cursor == Some(i);
                let style = if selected {
                    Style::default().fg(self.theme.accent).add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(self.theme.fg)
                };
                let count = crate::game::accusation::count_clues(catalog, index, name);
                Line::from(vec![
                    Span::styled(format!("  • {}", name), style),
                    Span::styled(
                        format!("  ({} clue{})", count, if count == 1 { "" } else { "s" }),
                        Style::default().fg(self.theme.border),
                    ),
                ])
            })
            .collect();
        let roster = Paragraph::new(rows).block(styled_block("Suspects", &self.theme));
        frame.render_widget(roster, chunks[0]);

        let input = Paragraph::new(format!("Who do you accuse? {}_", self.input_buffer))
            .style(Style::default().fg(self.theme.success))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.success))
                    .title(" Accusation [Tab: cycle suspects | Enter: accuse] "),
            );
        frame.render_widget(input, chunks[1]);

        self.render_status_bar(frame, layout[2]);
    }

    fn render_verdict(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let Some(verdict) = self.game.verdict() else {
            return;
        };

        let mut lines = vec![
            String::new(),
            format!("Accused: {}", verdict.accused),
            format!("Clues against them: {}", verdict.clue_count()),
            String::new(),
        ];
        lines.extend(verdict.evidence.iter().map(|clue| format!("  • {}", clue)));
        lines.push(String::new());
        lines.push(verdict.summary());
        lines.push(String::new());
        lines.push("Press Enter to leave the manor".to_string());

        let color = if verdict.is_conviction() {
            self.theme.success
        } else {
            self.theme.alert
        };
        let height = lines.len() as u16 + 2;
        let popup = centered_rect(area, 100, height + 2);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(popup);

        frame.render_widget(
            EvidenceMeter::new("Evidence", verdict.clue_count(), CONVICTION_THRESHOLD)
                .color(self.theme.warning),
            chunks[0],
        );
        frame.render_widget(
            VerdictBox::new(verdict.headline())
                .content(lines)
                .border_color(color),
            chunks[1],
        );
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered_rect(frame.area(), 51, 18);
        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.fg))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent)),
            );
        frame.render_widget(help, popup_area);
    }
}
