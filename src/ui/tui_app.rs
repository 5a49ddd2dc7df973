use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use tracing::{debug, trace};
use tui_input::{backend::crossterm::EventHandler, Input};

use super::terminal_dialogs::TerminalDialogs;
use crate::config::Config;
use crate::dialogs::Dialogs;
use crate::events::UiEvent;
use crate::list_manager::ListManager;
use crate::storage::KeyValueStore;
use crate::utils::logging::LogRingBuffer;
use crate::view_model::SubmitMode;

/// Which field receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Filter,
    List,
}

pub struct TuiApp<S, D = TerminalDialogs> {
    manager: ListManager<S, D>,
    input: Input,
    filter: Input,
    focus: Focus,
    /// Selection among the visible rows
    list_state: ListState,
    show_help: bool,
    show_logs: bool,
    status_message: String,
    config: Config,
    log_buffer: Option<LogRingBuffer>,
}

impl<S: KeyValueStore> TuiApp<S, TerminalDialogs> {
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.dispatch(UiEvent::Load);
        if self.manager.dialogs_mut().take_redraw() {
            terminal.clear()?;
        }

        loop {
            terminal.draw(|f| self.ui(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                trace!(target: "ui", "Key: {:?}", key);

                if !self.handle_key(key) {
                    break;
                }

                // A dialog wrote over the frame outside ratatui's buffer
                if self.manager.dialogs_mut().take_redraw() {
                    terminal.clear()?;
                }
            }
        }
        Ok(())
    }
}

impl<S: KeyValueStore, D: Dialogs> TuiApp<S, D> {
    pub fn new(
        manager: ListManager<S, D>,
        config: Config,
        log_buffer: Option<LogRingBuffer>,
    ) -> Self {
        Self {
            manager,
            input: Input::default(),
            filter: Input::default(),
            focus: Focus::Input,
            list_state: ListState::default(),
            show_help: false,
            show_logs: false,
            status_message: "Ready - type an item and press Enter".to_string(),
            config,
            log_buffer,
        }
    }

    /// Returns false when the app should exit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else if self.show_logs {
                    self.show_logs = false;
                } else if self.manager.is_editing() {
                    self.manager.refresh_visibility();
                    self.status_message = "Edit cancelled".to_string();
                    self.sync_from_model();
                } else {
                    return false;
                }
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::F(1) => self.show_help = !self.show_help,
            KeyCode::F(5) => self.show_logs = !self.show_logs,
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            _ => match self.focus {
                Focus::Input => self.handle_input_key(key),
                Focus::Filter => self.handle_filter_key(key),
                Focus::List => self.handle_list_key(key),
            },
        }
        true
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.dispatch(UiEvent::Submit);
            return;
        }

        if self.input.handle_event(&Event::Key(key)).is_some() {
            self.dispatch(UiEvent::InputChanged(self.input.value().to_string()));
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter || key.code == KeyCode::Down {
            self.focus = Focus::List;
            return;
        }

        if self.filter.handle_event(&Event::Key(key)).is_some() {
            self.dispatch(UiEvent::FilterChanged(self.filter.value().to_string()));
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(index) = self.selected_index() {
                    self.dispatch(UiEvent::LabelClicked { index });
                    self.focus = Focus::Input;
                }
            }
            KeyCode::Delete | KeyCode::Char('d') => {
                if let Some(index) = self.selected_index() {
                    self.dispatch(UiEvent::DeleteClicked { index });
                }
            }
            KeyCode::Char('C') if self.manager.model().controls_visible() => {
                self.dispatch(UiEvent::ClearAllClicked);
            }
            _ => {}
        }
    }

    fn dispatch(&mut self, event: UiEvent) {
        let describe = match &event {
            UiEvent::Submit => Some(match self.manager.model().submit_mode() {
                SubmitMode::Add => "Item added",
                SubmitMode::Update => "Item updated",
            }),
            UiEvent::DeleteClicked { .. } => Some("Item removed"),
            UiEvent::ClearAllClicked => Some("List cleared"),
            _ => None,
        };

        match self.manager.dispatch(event) {
            Ok(()) => {
                if let Some(message) = describe {
                    self.status_message = message.to_string();
                }
            }
            Err(e) => self.status_message = e.to_string(),
        }

        self.sync_from_model();
    }

    /// Pull field contents and selection bounds back from the view model
    fn sync_from_model(&mut self) {
        let model = self.manager.model();

        if model.input() != self.input.value() {
            self.input = Input::new(model.input().to_string());
        }

        if !model.controls_visible() && self.focus == Focus::Filter {
            self.focus = Focus::Input;
        }

        let visible = model.visible_count();
        match self.list_state.selected() {
            _ if visible == 0 => self.list_state.select(None),
            Some(pos) if pos >= visible => self.list_state.select(Some(visible - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order: &[Focus] = if self.manager.model().controls_visible() {
            &[Focus::Input, Focus::Filter, Focus::List]
        } else {
            &[Focus::Input, Focus::List]
        };

        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.focus = order[next];
        debug!(target: "ui", "Focus -> {:?}", self.focus);
    }

    fn move_selection(&mut self, delta: i32) {
        let visible = self.manager.model().visible_count();
        if visible == 0 {
            return;
        }

        let current = self.list_state.selected().unwrap_or(0) as i32;
        let next = (current + delta).rem_euclid(visible as i32) as usize;
        self.list_state.select(Some(next));
    }

    /// Full-list index of the selected visible row
    fn selected_index(&self) -> Option<usize> {
        let pos = self.list_state.selected()?;
        self.manager
            .model()
            .visible_rows()
            .nth(pos)
            .map(|(index, _)| index)
    }

    fn ui(&mut self, f: &mut Frame) {
        let controls_visible = self.manager.model().controls_visible();

        let mut constraints = vec![Constraint::Length(3)];
        if controls_visible {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(f.area());

        self.render_input(f, chunks[0]);

        let (list_area, status_area) = if controls_visible {
            self.render_filter(f, chunks[1]);
            (chunks[2], chunks[3])
        } else {
            (chunks[1], chunks[2])
        };

        self.render_list(f, list_area);
        self.render_status(f, status_area);

        if self.show_help {
            self.render_help_popup(f);
        } else if self.show_logs {
            self.render_log_popup(f);
        }
    }

    fn field_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let mode = self.manager.model().submit_mode();
        let title = match mode {
            SubmitMode::Add => format!("{} (Enter)", mode.label()),
            SubmitMode::Update => format!("{} {} (Enter)", self.config.display.icons.edit, mode.label()),
        };

        let input_paragraph = Paragraph::new(self.input.value())
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(self.field_style(Focus::Input));
        f.render_widget(input_paragraph, area);

        if self.focus == Focus::Input {
            f.set_cursor_position((
                area.x + self.input.visual_cursor() as u16 + 1,
                area.y + 1,
            ));
        }
    }

    fn render_filter(&self, f: &mut Frame, area: Rect) {
        let filter_paragraph = Paragraph::new(self.filter.value())
            .block(Block::default().borders(Borders::ALL).title("Filter Items"))
            .style(self.field_style(Focus::Filter));
        f.render_widget(filter_paragraph, area);

        if self.focus == Focus::Filter {
            f.set_cursor_position((
                area.x + self.filter.visual_cursor() as u16 + 1,
                area.y + 1,
            ));
        }
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let model = self.manager.model();

        if model.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from("No items yet"),
                Line::from(""),
                Line::from("Type an item above and press Enter to add it"),
            ])
            .block(Block::default().borders(Borders::ALL).title("Items"))
            .wrap(Wrap { trim: true });
            f.render_widget(empty, area);
            return;
        }

        let editing_color: Color = self
            .config
            .theme
            .editing_color
            .parse()
            .unwrap_or(Color::Cyan);
        let highlight_color: Color = self
            .config
            .theme
            .highlight_color
            .parse()
            .unwrap_or(Color::Yellow);
        let delete_icon = &self.config.display.icons.delete;

        let items: Vec<ListItem> = model
            .visible_rows()
            .map(|(_, row)| {
                let label_style = if row.editing {
                    Style::default()
                        .fg(editing_color)
                        .add_modifier(Modifier::ITALIC)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(row.label.clone(), label_style),
                    Span::raw("  "),
                    Span::styled(delete_icon.clone(), Style::default().fg(Color::Red)),
                ]))
            })
            .collect();

        let title = if self.config.display.show_item_count {
            format!("Items ({} of {})", model.visible_count(), model.len())
        } else {
            "Items".to_string()
        };

        let border_style = if self.focus == Focus::List {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            )
            .highlight_style(
                Style::default()
                    .fg(highlight_color)
                    .add_modifier(Modifier::REVERSED),
            )
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let focus_name = match self.focus {
            Focus::Input => "INPUT",
            Focus::Filter => "FILTER",
            Focus::List => "LIST",
        };

        let mut spans = vec![
            Span::styled(
                format!("{} {}", self.config.display.icons.info, self.status_message),
                Style::default().fg(Color::White),
            ),
            Span::raw(" | "),
            Span::styled(
                focus_name,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ];
        if !self.manager.store().is_durable() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{} not saving", self.config.display.icons.warning),
                Style::default().fg(Color::Red),
            ));
        }
        spans.push(Span::raw(" | Tab=Focus F1=Help"));
        if self.manager.model().controls_visible() {
            spans.push(Span::raw(" C=Clear All"));
        }
        if self.manager.is_editing() {
            spans.push(Span::raw(" Esc=Cancel edit"));
        } else {
            spans.push(Span::raw(" Esc=Exit"));
        }

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
        f.render_widget(status, area);
    }

    fn render_help_popup(&self, f: &mut Frame) {
        let area = centered_rect(70, 60, f.area());
        f.render_widget(Clear, area);

        let help_text = vec![
            Line::from(vec![Span::styled(
                "Shopping List Help",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("Input:"),
            Line::from("  Enter     - Add item (or update the item being edited)"),
            Line::from(""),
            Line::from("Filter:"),
            Line::from("  Typing    - Show only items containing the text"),
            Line::from("  Enter/↓   - Move to the list"),
            Line::from(""),
            Line::from("List:"),
            Line::from("  ↑↓ / j k  - Select item"),
            Line::from("  Enter / e - Edit selected item"),
            Line::from("  d / Del   - Remove selected item"),
            Line::from("  C         - Clear all items"),
            Line::from(""),
            Line::from("Global:"),
            Line::from("  Tab       - Next field"),
            Line::from("  F1        - Toggle this help"),
            Line::from("  F5        - Toggle log view"),
            Line::from("  Esc       - Close popup / cancel edit / exit"),
        ];

        let help_popup = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: true });

        f.render_widget(help_popup, area);
    }

    fn render_log_popup(&self, f: &mut Frame) {
        let area = centered_rect(90, 80, f.area());
        f.render_widget(Clear, area);

        let height = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = match &self.log_buffer {
            Some(buffer) => buffer
                .get_recent(height)
                .into_iter()
                .map(|entry| Line::from(entry.format_for_display()))
                .collect(),
            None => vec![Line::from("Logging is not initialized")],
        };

        let log_popup = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Logs (F5 to close)"));
        f.render_widget(log_popup, area);
    }
}

// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn run_tui_app<S: KeyValueStore>(
    manager: ListManager<S, TerminalDialogs>,
    config: Config,
    log_buffer: Option<LogRingBuffer>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TuiApp::new(manager, config, log_buffer);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
