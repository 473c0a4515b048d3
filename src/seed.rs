//! Demo catalog loaded on startup. Borrow dates are relative to `today` so the
//! overdue alert always has something to show.

use chrono::{Days, NaiveDate};

use crate::error::BookError;
use crate::models::BookRecord;

pub fn sample_records(today: NaiveDate) -> Result<Vec<BookRecord>, BookError> {
    let days_ago = |days: u64| today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);

    Ok(vec![
        BookRecord::borrowed("Wiedźmin", "Andrzej Sapkowski", "Fantasy", days_ago(16))?,
        BookRecord::available("Harry Potter", "J.K. Rowling", "Fantasy")?,
        BookRecord::borrowed("Lalka", "Bolesław Prus", "Klasyka", days_ago(10))?,
        BookRecord::borrowed("Kapitał", "Karol Marks", "Ekonomia, Polityka", days_ago(7))?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_oldest_loan_is_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let records = sample_records(today).unwrap();
        let overdue: Vec<&str> = records
            .iter()
            .filter(|record| record.is_overdue_default(today))
            .map(BookRecord::title)
            .collect();
        assert_eq!(records.len(), 4);
        assert_eq!(overdue, vec!["Wiedźmin"]);
    }
}
