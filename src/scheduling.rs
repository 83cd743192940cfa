//! Outbound shipment date derivation.
//!
//! Kits must leave the warehouse 14 calendar days before the sampling
//! date. A raw date landing on a weekend is shifted forward to the next
//! Monday. Holidays are not considered.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Calendar days between the outbound ship date and the sampling date.
pub const OUTBOUND_LEAD_DAYS: i64 = 14;

/// Derives the outbound ship date from a sampling date.
///
/// Subtracts exactly 14 calendar days; Saturday results move to the
/// following Monday (+2 days), Sunday results to Monday (+1 day). The
/// result may be in the past for near-term sampling dates; rejecting
/// such dates is caller policy.
pub fn outbound_ship_date(sampling_date: NaiveDate) -> NaiveDate {
    let raw = sampling_date - Duration::days(OUTBOUND_LEAD_DAYS);
    match raw.weekday() {
        Weekday::Sat => raw + Duration::days(2),
        Weekday::Sun => raw + Duration::days(1),
        _ => raw,
    }
}

/// True when the date falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_result_is_unshifted() {
        // Wednesday 2026-02-18 minus 14 days is Wednesday 2026-02-04
        let sampling = date(2026, 2, 18);
        assert_eq!(sampling.weekday(), Weekday::Wed);
        assert_eq!(outbound_ship_date(sampling), date(2026, 2, 4));
    }

    #[test]
    fn monday_sampling_gives_monday_outbound() {
        let sampling = date(2026, 3, 2);
        assert_eq!(sampling.weekday(), Weekday::Mon);
        let outbound = outbound_ship_date(sampling);
        assert_eq!(outbound, date(2026, 2, 16));
        assert_eq!(outbound.weekday(), Weekday::Mon);
    }

    #[test]
    fn saturday_result_moves_two_days_to_monday() {
        // Saturday 2026-02-07 + 14 days = Saturday 2026-02-21
        let sampling = date(2026, 2, 21);
        let outbound = outbound_ship_date(sampling);
        assert_eq!(outbound, date(2026, 2, 9));
        assert_eq!(outbound.weekday(), Weekday::Mon);
    }

    #[test]
    fn sunday_result_moves_one_day_to_monday() {
        let sampling = date(2026, 2, 22);
        let outbound = outbound_ship_date(sampling);
        assert_eq!(outbound, date(2026, 2, 9));
        assert_eq!(outbound.weekday(), Weekday::Mon);
    }

    #[test]
    fn near_term_sampling_date_may_yield_past_outbound() {
        // Not rejected here; orderable-window validation is caller policy.
        let sampling = date(2026, 1, 5);
        let outbound = outbound_ship_date(sampling);
        assert!(outbound < sampling);
    }
}
