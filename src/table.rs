//! The ordered book table and the tabular contract a view renders from.
//!
//! Order is the only thing that changes after construction, and `sort` is the
//! only way to change it. Queries never reorder anything.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use crate::error::BookError;
use crate::models::{BookRecord, LoanStatus};
use crate::observers::LayoutObserver;

/// Date format used by the borrow-date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns exposed to the view, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Title,
    Author,
    Genre,
    Status,
    BorrowDate,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Title,
        Column::Author,
        Column::Genre,
        Column::Status,
        Column::BorrowDate,
    ];

    pub fn from_index(index: usize) -> Option<Column> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn header(self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::Author => "Author",
            Column::Genre => "Genre",
            Column::Status => "Status",
            Column::BorrowDate => "Borrowed on",
        }
    }

    /// Whether `sort` reorders rows for this column. Genre and status are
    /// accepted but leave the order untouched.
    pub fn is_sortable(self) -> bool {
        matches!(self, Column::Title | Column::Author | Column::BorrowDate)
    }

    fn compare(self, a: &BookRecord, b: &BookRecord) -> Ordering {
        match self {
            Column::Title => a.title().cmp(b.title()),
            Column::Author => a.author().cmp(b.author()),
            // `None < Some(_)`, so books on the shelf lead an ascending sort.
            Column::BorrowDate => a.borrow_date().cmp(&b.borrow_date()),
            Column::Genre | Column::Status => Ordering::Equal,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// An ordered, fixed-size collection of book records.
pub struct BookTable {
    records: Vec<BookRecord>,
    observers: Vec<Box<dyn LayoutObserver>>,
}

impl fmt::Debug for BookTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookTable")
            .field("records", &self.records)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl BookTable {
    pub fn new(records: Vec<BookRecord>) -> Self {
        Self {
            records,
            observers: Vec::new(),
        }
    }

    /// Subscribe to layout notices raised by `sort`.
    pub fn register_observer(&mut self, observer: Box<dyn LayoutObserver>) {
        self.observers.push(observer);
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        Column::ALL.len()
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn record(&self, row: usize) -> Result<&BookRecord, BookError> {
        self.records
            .get(row)
            .ok_or_else(|| self.out_of_range(row, 0))
    }

    /// Presentation string for one cell.
    pub fn cell(&self, row: usize, column: usize) -> Result<String, BookError> {
        let column_kind =
            Column::from_index(column).ok_or_else(|| self.out_of_range(row, column))?;
        let record = self
            .records
            .get(row)
            .ok_or_else(|| self.out_of_range(row, column))?;

        let value = match column_kind {
            Column::Title => record.title().to_string(),
            Column::Author => record.author().to_string(),
            Column::Genre => record.genre().to_string(),
            Column::Status => record.status().label().to_string(),
            Column::BorrowDate => record
                .borrow_date()
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        };
        Ok(value)
    }

    /// Reorder rows in place by `column`. The sort is stable and a descending
    /// sort flips the comparison, so ties keep their prior relative order in
    /// either direction. Returns `false`, without notifying observers, when
    /// the column does not sort.
    pub fn sort(&mut self, column: Column, ascending: bool) -> bool {
        if !column.is_sortable() {
            tracing::debug!(%column, "ignoring sort on unsortable column");
            return false;
        }

        for observer in &self.observers {
            observer.layout_about_to_change();
        }

        self.records.sort_by(|a, b| {
            let ordering = column.compare(a, b);
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

        tracing::debug!(%column, ascending, rows = self.records.len(), "sorted book table");

        for observer in &self.observers {
            observer.layout_changed();
        }
        true
    }

    /// Index-based sort entry point; an index with no column is a no-op.
    pub fn sort_by_index(&mut self, column: usize, ascending: bool) -> bool {
        match Column::from_index(column) {
            Some(column) => self.sort(column, ascending),
            None => {
                tracing::debug!(column, "ignoring sort on unknown column index");
                false
            }
        }
    }

    /// Titles of every overdue book, in current table order.
    pub fn overdue_titles(&self, as_of: NaiveDate, loan_period_days: u32) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.is_overdue(as_of, loan_period_days))
            .map(|record| record.title().to_string())
            .collect()
    }

    /// Number of books currently lent out.
    pub fn borrowed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.status() == LoanStatus::Borrowed)
            .count()
    }

    fn out_of_range(&self, row: usize, column: usize) -> BookError {
        BookError::IndexOutOfRange {
            row,
            column,
            rows: self.row_count(),
            columns: self.column_count(),
        }
    }
}

impl FromIterator<BookRecord> for BookTable {
    fn from_iter<I: IntoIterator<Item = BookRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Compose the warning shown when overdue books exist.
pub fn overdue_alert(titles: &[String]) -> Option<String> {
    if titles.is_empty() {
        None
    } else {
        Some(format!("Overdue books:\n{}", titles.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn days_ago(days: u64) -> NaiveDate {
        today().checked_sub_days(chrono::Days::new(days)).unwrap()
    }

    fn scenario() -> BookTable {
        BookTable::new(vec![
            BookRecord::borrowed("Wiedźmin", "Andrzej Sapkowski", "Fantasy", days_ago(16)).unwrap(),
            BookRecord::available("Harry Potter", "J.K. Rowling", "Fantasy").unwrap(),
            BookRecord::borrowed("Lalka", "Bolesław Prus", "Klasyka", days_ago(10)).unwrap(),
        ])
    }

    fn titles(table: &BookTable) -> Vec<&str> {
        table.records().iter().map(BookRecord::title).collect()
    }

    struct Recorder(Rc<RefCell<Vec<&'static str>>>);

    impl LayoutObserver for Recorder {
        fn layout_about_to_change(&self) {
            self.0.borrow_mut().push("before");
        }

        fn layout_changed(&self) {
            self.0.borrow_mut().push("after");
        }
    }

    #[test]
    fn counts_and_cells() {
        let table = scenario();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 5);
        assert_eq!(table.cell(0, 0).unwrap(), "Wiedźmin");
        assert_eq!(table.cell(0, 1).unwrap(), "Andrzej Sapkowski");
        assert_eq!(table.cell(2, 2).unwrap(), "Klasyka");
        assert_eq!(table.cell(0, 3).unwrap(), "Borrowed");
        assert_eq!(table.cell(1, 3).unwrap(), "Available");
        assert_eq!(table.cell(0, 4).unwrap(), "2024-06-14");
        assert_eq!(table.cell(1, 4).unwrap(), "");
    }

    #[test]
    fn out_of_range_cells_are_errors() {
        let table = scenario();
        assert_eq!(
            table.cell(3, 0),
            Err(BookError::IndexOutOfRange {
                row: 3,
                column: 0,
                rows: 3,
                columns: 5
            })
        );
        assert!(matches!(
            table.cell(0, 5),
            Err(BookError::IndexOutOfRange { column: 5, .. })
        ));
        assert!(table.record(7).is_err());
    }

    #[test]
    fn overdue_titles_for_scenario() {
        let table = scenario();
        assert_eq!(table.overdue_titles(today(), 14), vec!["Wiedźmin".to_string()]);
        assert_eq!(table.borrowed_count(), 2);
    }

    #[test]
    fn overdue_titles_follow_table_order() {
        let mut table = scenario();
        assert_eq!(table.overdue_titles(today(), 5), vec!["Wiedźmin", "Lalka"]);
        table.sort(Column::Title, true);
        assert_eq!(table.overdue_titles(today(), 5), vec!["Lalka", "Wiedźmin"]);
    }

    #[test]
    fn all_available_table_has_no_overdue_titles() {
        let table: BookTable = ["A", "B"]
            .into_iter()
            .map(|title| BookRecord::available(title, "Author", "Genre").unwrap())
            .collect();
        assert!(table.overdue_titles(today(), 0).is_empty());
    }

    #[test]
    fn sort_by_title_and_borrow_date() {
        let mut table = scenario();
        assert!(table.sort(Column::Title, true));
        assert_eq!(titles(&table), vec!["Harry Potter", "Lalka", "Wiedźmin"]);

        assert!(table.sort(Column::BorrowDate, true));
        assert_eq!(titles(&table), vec!["Harry Potter", "Wiedźmin", "Lalka"]);

        assert!(table.sort(Column::BorrowDate, false));
        assert_eq!(titles(&table), vec!["Lalka", "Wiedźmin", "Harry Potter"]);
    }

    #[test]
    fn sort_by_author_descending() {
        let mut table = scenario();
        table.sort(Column::Author, false);
        assert_eq!(titles(&table), vec!["Harry Potter", "Lalka", "Wiedźmin"]);
    }

    #[test]
    fn unsortable_columns_keep_order_and_stay_silent() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut table = scenario();
        table.register_observer(Box::new(Recorder(Rc::clone(&events))));

        assert!(!table.sort(Column::Genre, true));
        assert!(!table.sort(Column::Status, false));
        assert!(!table.sort_by_index(42, true));

        assert_eq!(titles(&table), vec!["Wiedźmin", "Harry Potter", "Lalka"]);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn ties_keep_prior_order_in_both_directions() {
        let mut table = BookTable::new(vec![
            BookRecord::available("First", "Same", "x").unwrap(),
            BookRecord::available("Second", "Alpha", "x").unwrap(),
            BookRecord::available("Third", "Same", "x").unwrap(),
            BookRecord::available("Fourth", "Same", "x").unwrap(),
        ]);

        table.sort(Column::Author, true);
        assert_eq!(titles(&table), vec!["Second", "First", "Third", "Fourth"]);

        table.sort(Column::Author, false);
        assert_eq!(titles(&table), vec!["First", "Third", "Fourth", "Second"]);
    }

    #[test]
    fn unborrowed_ties_keep_order_when_descending() {
        let mut table = BookTable::new(vec![
            BookRecord::available("Shelf A", "a", "x").unwrap(),
            BookRecord::borrowed("Out", "b", "x", days_ago(3)).unwrap(),
            BookRecord::available("Shelf B", "c", "x").unwrap(),
        ]);
        table.sort(Column::BorrowDate, false);
        assert_eq!(titles(&table), vec!["Out", "Shelf A", "Shelf B"]);
    }

    #[test]
    fn repeated_sort_is_idempotent() {
        let mut table = scenario();
        table.sort(Column::BorrowDate, false);
        let once: Vec<String> = titles(&table).into_iter().map(String::from).collect();
        table.sort(Column::BorrowDate, false);
        assert_eq!(titles(&table), once);
    }

    #[test]
    fn applied_sort_notifies_before_then_after() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut table = scenario();
        table.register_observer(Box::new(Recorder(Rc::clone(&events))));

        table.sort(Column::Title, true);
        table.sort_by_index(4, false);

        assert_eq!(*events.borrow(), vec!["before", "after", "before", "after"]);
    }

    #[test]
    fn column_indices_round_trip() {
        for (index, column) in Column::ALL.iter().enumerate() {
            assert_eq!(Column::from_index(index), Some(*column));
            assert_eq!(column.index(), index);
        }
        assert_eq!(Column::from_index(5), None);
    }

    #[test]
    fn alert_lists_titles() {
        assert_eq!(overdue_alert(&[]), None);
        let titles = vec!["Wiedźmin".to_string(), "Lalka".to_string()];
        assert_eq!(
            overdue_alert(&titles).as_deref(),
            Some("Overdue books:\nWiedźmin, Lalka")
        );
    }
}
