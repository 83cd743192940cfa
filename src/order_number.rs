//! Human-readable order number generation.
//!
//! Order numbers follow `ORD-{year}-{month}{day}-{sequence}` where the
//! sequence restarts at 001 each calendar day. Lexicographic ordering of
//! numbers from the same day matches creation order.

use chrono::{Datelike, NaiveDate};

/// Width of the zero-padded daily sequence.
pub const SEQUENCE_WIDTH: usize = 3;

/// Formats an order number for the given creation date and daily sequence.
pub fn format_order_number(date: NaiveDate, sequence: u32) -> String {
    format!(
        "ORD-{:04}-{:02}{:02}-{:03}",
        date.year(),
        date.month(),
        date.day(),
        sequence
    )
}

/// Returns the shared prefix of all order numbers created on `date`,
/// including the trailing dash. Used to query for the day's latest
/// sequence.
pub fn day_prefix(date: NaiveDate) -> String {
    format!("ORD-{:04}-{:02}{:02}-", date.year(), date.month(), date.day())
}

/// Extracts the daily sequence from an order number. Returns `None` for
/// malformed input.
pub fn parse_sequence(order_number: &str) -> Option<u32> {
    let (_, seq) = order_number.rsplit_once('-')?;
    if seq.len() < SEQUENCE_WIDTH || !seq.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    seq.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(
            format_order_number(date(2026, 3, 7), 1),
            "ORD-2026-0307-001"
        );
        assert_eq!(
            format_order_number(date(2026, 11, 23), 42),
            "ORD-2026-1123-042"
        );
    }

    #[test]
    fn sequence_beyond_three_digits_widens() {
        assert_eq!(
            format_order_number(date(2026, 1, 1), 1234),
            "ORD-2026-0101-1234"
        );
    }

    #[test]
    fn day_prefix_matches_format() {
        let d = date(2026, 3, 7);
        let number = format_order_number(d, 17);
        assert!(number.starts_with(&day_prefix(d)));
    }

    #[test]
    fn parse_sequence_round_trips() {
        let number = format_order_number(date(2026, 6, 15), 99);
        assert_eq!(parse_sequence(&number), Some(99));
    }

    #[test]
    fn parse_sequence_rejects_malformed_input() {
        assert_eq!(parse_sequence("not-a-number-xyz"), None);
        assert_eq!(parse_sequence(""), None);
        assert_eq!(parse_sequence("ORD-2026-0307-0a1"), None);
    }

    #[test]
    fn same_day_numbers_sort_by_sequence() {
        let d = date(2026, 5, 4);
        let a = format_order_number(d, 7);
        let b = format_order_number(d, 12);
        assert!(a < b);
    }
}
