//! Short Spanish date labels for the templates table.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Formats a date as "25 nov 2024".
#[must_use]
pub fn format_short_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {month} {}", date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 25).expect("date");
        assert_eq!(format_short_date(date), "25 nov 2024");
    }

    #[test]
    fn september_uses_four_letters_and_days_are_unpadded() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 3).expect("date");
        assert_eq!(format_short_date(date), "3 sept 2024");
    }
}
