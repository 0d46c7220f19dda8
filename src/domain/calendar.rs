use chrono::{Local, NaiveDate};

/// Header label for a date: two-digit day, abbreviated month, four-digit year.
/// Example: 2024-06-05 -> "05 Jun 2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Label for today in the local timezone.
pub fn format_current_date() -> String {
    format_date(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(format_date(date), "05 Jun 2024");

        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(format_date(date), "31 Dec 1999");
    }

    #[test]
    fn test_format_current_date_shape() {
        let label = format_current_date();
        let parts: Vec<&str> = label.split(' ').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[1].len(), 3);
        assert_eq!(parts[2].len(), 4);
    }
}
