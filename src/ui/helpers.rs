use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};

use crate::models::{BookRecord, LoanStatus};

/// Style for the status cell: green on the shelf, red when lent out, and a
/// red background once the loan is overdue.
pub(crate) fn status_cell_style(record: &BookRecord, today: NaiveDate, loan_period: u32) -> Style {
    let base = match record.status() {
        LoanStatus::Available => Style::default().fg(Color::Green),
        LoanStatus::Borrowed => Style::default().fg(Color::Red),
    };
    if record.is_overdue(today, loan_period) {
        base.fg(Color::White).bg(Color::Red)
    } else {
        base
    }
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_colours() {
        let today = date(2024, 5, 20);
        let shelf = BookRecord::available("Harry Potter", "J.K. Rowling", "Fantasy").unwrap();
        let recent = BookRecord::borrowed("Lalka", "Bolesław Prus", "Klasyka", date(2024, 5, 10))
            .unwrap();
        let late = BookRecord::borrowed("Wiedźmin", "Andrzej Sapkowski", "Fantasy", date(2024, 5, 1))
            .unwrap();

        assert_eq!(status_cell_style(&shelf, today, 14).fg, Some(Color::Green));
        assert_eq!(status_cell_style(&recent, today, 14).fg, Some(Color::Red));
        assert_eq!(status_cell_style(&recent, today, 14).bg, None);
        assert_eq!(status_cell_style(&late, today, 14).bg, Some(Color::Red));
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
    }
}
