//! Domain models for the loan table. Records are small value objects: they are
//! validated once when built and never mutated afterwards, so the table can
//! reorder them freely without re-checking anything.

use std::fmt;

use chrono::{Days, NaiveDate};

use crate::error::BookError;

/// Days a borrowed book may be held before it counts as overdue.
pub const DEFAULT_LOAN_PERIOD_DAYS: u32 = 14;

/// Loan state of a single book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanStatus {
    Available,
    Borrowed,
}

impl LoanStatus {
    /// Human-readable label shown in the status column.
    pub fn label(self) -> &'static str {
        match self {
            LoanStatus::Available => "Available",
            LoanStatus::Borrowed => "Borrowed",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One book and its current loan state.
///
/// The borrow date is present exactly when the book is borrowed. Fields stay
/// private so that pairing cannot drift after construction.
pub struct BookRecord {
    title: String,
    author: String,
    /// Free text; may list several genres separated by commas.
    genre: String,
    status: LoanStatus,
    borrow_date: Option<NaiveDate>,
}

impl BookRecord {
    /// Build a record, rejecting a blank title or a status/borrow date
    /// mismatch.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        status: LoanStatus,
        borrow_date: Option<NaiveDate>,
    ) -> Result<Self, BookError> {
        let title = title.into();

        let reason = if title.trim().is_empty() {
            Some("title must not be empty")
        } else {
            match (status, borrow_date) {
                (LoanStatus::Borrowed, None) => Some("borrowed book needs a borrow date"),
                (LoanStatus::Available, Some(_)) => {
                    Some("available book cannot carry a borrow date")
                }
                _ => None,
            }
        };

        if let Some(reason) = reason {
            tracing::warn!(title = %title, reason, "rejected book record");
            return Err(BookError::InvalidRecord {
                title,
                reason: reason.to_string(),
            });
        }

        Ok(Self {
            title,
            author: author.into(),
            genre: genre.into(),
            status,
            borrow_date,
        })
    }

    /// Shorthand for a book sitting on the shelf.
    pub fn available(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Result<Self, BookError> {
        Self::new(title, author, genre, LoanStatus::Available, None)
    }

    /// Shorthand for a book lent out on `borrow_date`.
    pub fn borrowed(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        borrow_date: NaiveDate,
    ) -> Result<Self, BookError> {
        Self::new(title, author, genre, LoanStatus::Borrowed, Some(borrow_date))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Split the free-text genre field into its trimmed, non-empty parts.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genre
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
    }

    pub fn status(&self) -> LoanStatus {
        self.status
    }

    pub fn borrow_date(&self) -> Option<NaiveDate> {
        self.borrow_date
    }

    /// Last day of the loan term, or `None` when the book is not out (or the
    /// term runs past the calendar range).
    pub fn due_date(&self, loan_period_days: u32) -> Option<NaiveDate> {
        match self.status {
            LoanStatus::Borrowed => self
                .borrow_date?
                .checked_add_days(Days::new(u64::from(loan_period_days))),
            LoanStatus::Available => None,
        }
    }

    /// True once `as_of` is strictly past the due date. A book due today is
    /// still on time; it turns overdue the day after.
    pub fn is_overdue(&self, as_of: NaiveDate, loan_period_days: u32) -> bool {
        self.due_date(loan_period_days)
            .is_some_and(|due| as_of > due)
    }

    /// [`Self::is_overdue`] with the standard loan period.
    pub fn is_overdue_default(&self, as_of: NaiveDate) -> bool {
        self.is_overdue(as_of, DEFAULT_LOAN_PERIOD_DAYS)
    }
}

impl fmt::Display for BookRecord {
    /// Render as `Title - Author`, dropping the dash when the author is blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.author.trim().is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{} - {}", self.title, self.author)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn borrowed_without_date_is_rejected() {
        let err = BookRecord::new("Lalka", "Bolesław Prus", "Klasyka", LoanStatus::Borrowed, None)
            .unwrap_err();
        assert!(matches!(err, BookError::InvalidRecord { ref title, .. } if title == "Lalka"));
    }

    #[test]
    fn available_with_date_is_rejected() {
        let result = BookRecord::new(
            "Harry Potter",
            "J.K. Rowling",
            "Fantasy",
            LoanStatus::Available,
            Some(date(2024, 1, 1)),
        );
        assert!(matches!(result, Err(BookError::InvalidRecord { .. })));
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(BookRecord::available("   ", "Anon", "Poetry").is_err());
    }

    #[test]
    fn available_is_never_overdue() {
        let book = BookRecord::available("Harry Potter", "J.K. Rowling", "Fantasy").unwrap();
        assert!(!book.is_overdue(date(2099, 12, 31), 0));
        assert!(!book.is_overdue_default(date(2099, 12, 31)));
        assert_eq!(book.due_date(14), None);
    }

    #[test]
    fn overdue_starts_the_day_after_the_loan_period() {
        let borrowed = date(2024, 3, 1);
        let book = BookRecord::borrowed("Wiedźmin", "Andrzej Sapkowski", "Fantasy", borrowed)
            .unwrap();

        assert_eq!(book.due_date(14), Some(date(2024, 3, 15)));
        assert!(!book.is_overdue(date(2024, 3, 14), 14));
        assert!(!book.is_overdue(date(2024, 3, 15), 14));
        assert!(book.is_overdue(date(2024, 3, 16), 14));
    }

    #[test]
    fn custom_loan_period_moves_the_threshold() {
        let book =
            BookRecord::borrowed("Lalka", "Bolesław Prus", "Klasyka", date(2024, 3, 1)).unwrap();
        assert!(book.is_overdue(date(2024, 3, 9), 7));
        assert!(!book.is_overdue(date(2024, 3, 8), 7));
    }

    #[test]
    fn due_date_past_calendar_range_is_never_overdue() {
        let book = BookRecord::borrowed("Far", "Future", "SF", NaiveDate::MAX).unwrap();
        assert_eq!(book.due_date(1), None);
        assert!(!book.is_overdue(NaiveDate::MAX, 1));
    }

    #[test]
    fn genres_split_on_commas() {
        let book = BookRecord::available("Kapitał", "Karol Marks", "Ekonomia, Polityka,").unwrap();
        assert_eq!(book.genres().collect::<Vec<_>>(), vec!["Ekonomia", "Polityka"]);
    }

    #[test]
    fn display_omits_dash_for_blank_author() {
        let book = BookRecord::available("Anthology", " ", "Poetry").unwrap();
        assert_eq!(book.to_string(), "Anthology");
        let book = BookRecord::available("Lalka", "Bolesław Prus", "Klasyka").unwrap();
        assert_eq!(book.to_string(), "Lalka - Bolesław Prus");
    }
}
