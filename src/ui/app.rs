use std::mem;
use std::rc::Rc;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::config::Config;
use crate::observers::LayoutLogger;
use crate::table::{overdue_alert, BookTable, Column};

use super::helpers::{centered_rect, status_cell_style};
use super::screens::{SelectionReset, SortState};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Relative widths of the five table columns.
const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(24),
    Constraint::Percentage(22),
    Constraint::Percentage(22),
    Constraint::Percentage(14),
    Constraint::Percentage(18),
];

/// Fine-grained modes layered over the table view.
enum Mode {
    Normal,
    OverdueAlert(String),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    table: BookTable,
    config: Config,
    selected: usize,
    sort: Option<SortState>,
    mode: Mode,
    status: Option<StatusMessage>,
    layout_changed: Rc<std::cell::Cell<bool>>,
}

impl App {
    /// Wire the table to the view and run the startup overdue check.
    pub fn new(mut table: BookTable, config: Config) -> Self {
        let layout_changed = Rc::new(std::cell::Cell::new(false));
        table.register_observer(Box::new(SelectionReset::new(Rc::clone(&layout_changed))));
        table.register_observer(Box::new(LayoutLogger));

        let mut app = Self {
            table,
            config,
            selected: 0,
            sort: None,
            mode: Mode::Normal,
            status: None,
            layout_changed,
        };
        app.check_overdue();
        app
    }

    pub fn table(&self) -> &BookTable {
        &self.table
    }

    /// Title of the highlighted row, if any.
    pub fn selected_title(&self) -> Option<&str> {
        self.table.record(self.selected).ok().map(|record| record.title())
    }

    /// Text of the overdue alert when it is open.
    pub fn alert(&self) -> Option<&str> {
        match &self.mode {
            Mode::OverdueAlert(message) => Some(message.as_str()),
            Mode::Normal => None,
        }
    }

    /// Process one key press. Returns `true` once the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::OverdueAlert(message) => match code {
                KeyCode::Enter | KeyCode::Esc => Mode::Normal,
                _ => Mode::OverdueAlert(message),
            },
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char('o') => {
                self.check_overdue();
                return mem::replace(&mut self.mode, Mode::Normal);
            }
            KeyCode::Char(key) => {
                let index = key
                    .to_digit(10)
                    .and_then(|digit| (digit as usize).checked_sub(1))
                    .and_then(Column::from_index);
                if let Some(column) = index {
                    self.apply_sort(column);
                }
            }
            _ => {}
        }
        Mode::Normal
    }

    /// Sort by `column`, toggling direction when it is already active, and
    /// keep the same book highlighted afterwards.
    fn apply_sort(&mut self, column: Column) {
        let next = SortState::next(self.sort, column);
        let focused = self.table.record(self.selected).ok().cloned();

        if !self.table.sort(next.column, next.ascending) {
            self.set_status(
                format!("{} column cannot be sorted.", column.header()),
                StatusKind::Info,
            );
            return;
        }
        self.sort = Some(next);

        if self.layout_changed.take() {
            self.selected = focused
                .and_then(|record| self.table.records().iter().position(|r| *r == record))
                .unwrap_or(0);
        }

        let direction = if next.ascending { "ascending" } else { "descending" };
        self.set_status(
            format!("Sorted by {} ({direction}).", column.header()),
            StatusKind::Info,
        );
    }

    /// Recompute overdue titles and open the alert when there are any.
    fn check_overdue(&mut self) {
        let titles = self
            .table
            .overdue_titles(self.config.today, self.config.loan_period_days);
        // Runs while the TUI owns the terminal, so stay below the default filter.
        tracing::debug!(count = titles.len(), as_of = %self.config.today, "checked overdue books");

        match overdue_alert(&titles) {
            Some(message) => {
                self.set_status(
                    format!("{} overdue book(s).", titles.len()),
                    StatusKind::Error,
                );
                self.mode = Mode::OverdueAlert(message);
            }
            None => self.set_status("No overdue books.", StatusKind::Info),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_area = if area.height > FOOTER_HEIGHT {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
                .split(area);
            self.draw_table(frame, chunks[0]);
            Some(chunks[1])
        } else {
            self.draw_table(frame, area);
            None
        };

        if let Some(footer_area) = footer_area {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::OverdueAlert(message) = &self.mode {
            self.draw_overdue_alert(frame, area, message);
        }
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let header_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let header = Row::new(Column::ALL.iter().map(|column| {
            let text = match self.sort {
                Some(sort) if sort.column == *column => {
                    format!("{} {}", column.header(), sort.arrow())
                }
                _ => column.header().to_string(),
            };
            Cell::from(text)
        }))
        .style(header_style);

        let rows = self.table.records().iter().enumerate().map(|(row, record)| {
            let cells = Column::ALL.iter().map(|column| {
                let text = self.table.cell(row, column.index()).unwrap_or_default();
                let cell = Cell::from(text);
                if *column == Column::Status {
                    cell.style(status_cell_style(
                        record,
                        self.config.today,
                        self.config.loan_period_days,
                    ))
                } else {
                    cell
                }
            });
            Row::new(cells)
        });

        let title = format!(
            " Library ({} books, {} borrowed) ",
            self.table.row_count(),
            self.table.borrowed_count()
        );
        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = TableState::default();
        if self.table.row_count() > 0 {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::OverdueAlert(_) => Line::from(vec![
                Span::styled("[Enter/Esc]", key_style),
                Span::raw(" Dismiss"),
            ]),
            Mode::Normal => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[1-5]", key_style),
                Span::raw(" Sort column   "),
                Span::styled("[O]", key_style),
                Span::raw(" Check overdue   "),
                Span::styled("[Q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_overdue_alert(&self, frame: &mut Frame, area: Rect, message: &str) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Overdue Books")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = message.lines().map(|line| Line::from(line.to_string())).collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Enter or Esc to close.",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn move_selection(&mut self, offset: isize) {
        let rows = self.table.row_count();
        if rows == 0 {
            return;
        }
        let next = self.selected as isize + offset;
        self.selected = next.clamp(0, rows as isize - 1) as usize;
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }
}
