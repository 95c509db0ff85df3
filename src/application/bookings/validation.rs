//! Booking time rules and pricing
//!
//! Shared by create and update so both paths reject and price identically.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Bookings may be placed at most this many days ahead
pub const MAX_ADVANCE_DAYS: i64 = 7;
/// Minimum slot duration in hours
pub const MIN_DURATION_HOURS: i64 = 1;
/// Maximum slot duration in hours
pub const MAX_DURATION_HOURS: i64 = 24;
/// Owners may no longer modify or cancel a booking inside this window
pub const MODIFICATION_LOCKOUT_HOURS: i64 = 12;

/// Validate the time constraints on a booking window, first failure wins.
pub fn validate_booking_times(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DomainResult<()> {
    if start_time <= now {
        return Err(DomainError::Validation(
            "Booking start time must be in the future".to_string(),
        ));
    }

    if end_time <= start_time {
        return Err(DomainError::Validation(
            "Booking end time must be after start time".to_string(),
        ));
    }

    if start_time > now + Duration::days(MAX_ADVANCE_DAYS) {
        return Err(DomainError::Validation(format!(
            "Bookings can only be made up to {} days in advance",
            MAX_ADVANCE_DAYS
        )));
    }

    let duration = end_time - start_time;

    if duration < Duration::hours(MIN_DURATION_HOURS) {
        return Err(DomainError::Validation(format!(
            "Minimum booking duration is {} hour",
            MIN_DURATION_HOURS
        )));
    }

    if duration > Duration::hours(MAX_DURATION_HOURS) {
        return Err(DomainError::Validation(format!(
            "Maximum booking duration is {} hours",
            MAX_DURATION_HOURS
        )));
    }

    Ok(())
}

/// Price for a booking window: hours × price per hour, truncated to two
/// decimal places. Truncation (not rounding) keeps create and update
/// amounts byte-identical for the same window.
pub fn booking_amount(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    price_per_hour: Decimal,
) -> Decimal {
    let seconds = (end_time - start_time).num_seconds();
    let hours = Decimal::from(seconds) / Decimal::from(3600);
    (hours * price_per_hour).round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn assert_rejected(result: DomainResult<()>, needle: &str) {
        match result {
            Err(DomainError::Validation(msg)) => {
                assert!(msg.contains(needle), "expected '{}' in '{}'", needle, msg)
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_a_valid_window() {
        let t = now();
        assert!(validate_booking_times(t + Duration::hours(24), t + Duration::hours(26), t).is_ok());
    }

    #[test]
    fn rejects_start_in_the_past() {
        let t = now();
        assert_rejected(
            validate_booking_times(t - Duration::minutes(1), t + Duration::hours(2), t),
            "must be in the future",
        );
    }

    #[test]
    fn rejects_start_exactly_now() {
        let t = now();
        assert_rejected(
            validate_booking_times(t, t + Duration::hours(2), t),
            "must be in the future",
        );
    }

    #[test]
    fn rejects_end_not_after_start() {
        let t = now();
        let start = t + Duration::hours(5);
        assert_rejected(
            validate_booking_times(start, start, t),
            "must be after start time",
        );
        assert_rejected(
            validate_booking_times(start, start - Duration::hours(1), t),
            "must be after start time",
        );
    }

    #[test]
    fn rejects_more_than_seven_days_ahead() {
        let t = now();
        assert_rejected(
            validate_booking_times(
                t + Duration::days(7) + Duration::minutes(1),
                t + Duration::days(7) + Duration::hours(2),
                t,
            ),
            "7 days in advance",
        );
    }

    #[test]
    fn accepts_exactly_seven_days_ahead() {
        let t = now();
        assert!(validate_booking_times(t + Duration::days(7), t + Duration::days(7) + Duration::hours(2), t).is_ok());
    }

    #[test]
    fn rejects_duration_under_one_hour() {
        let t = now();
        let start = t + Duration::hours(5);
        assert_rejected(
            validate_booking_times(start, start + Duration::minutes(59), t),
            "Minimum booking duration",
        );
    }

    #[test]
    fn rejects_duration_over_24_hours() {
        let t = now();
        let start = t + Duration::hours(5);
        assert_rejected(
            validate_booking_times(start, start + Duration::hours(25), t),
            "Maximum booking duration",
        );
    }

    #[test]
    fn boundary_durations_are_accepted() {
        let t = now();
        let start = t + Duration::hours(5);
        assert!(validate_booking_times(start, start + Duration::hours(1), t).is_ok());
        assert!(validate_booking_times(start, start + Duration::hours(24), t).is_ok());
    }

    #[test]
    fn two_hours_at_500_costs_1000() {
        let t = now();
        let amount = booking_amount(t, t + Duration::hours(2), Decimal::from(500));
        assert_eq!(amount, Decimal::from(1000));
    }

    #[test]
    fn fractional_hours_are_priced_exactly() {
        let t = now();
        let amount = booking_amount(t, t + Duration::minutes(90), Decimal::from(500));
        assert_eq!(amount, Decimal::from(750));
    }

    #[test]
    fn amount_is_truncated_not_rounded() {
        let t = now();
        // 100 minutes at 100/h = 166.666... → 166.66
        let amount = booking_amount(t, t + Duration::minutes(100), Decimal::from(100));
        assert_eq!(amount, Decimal::new(16666, 2));
    }
}
