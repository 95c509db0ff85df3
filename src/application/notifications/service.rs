//! Notification construction and persistence
//!
//! Builds the booking-related notification shapes and hands them to the
//! notification store. Delivery transport is out of scope; records are
//! picked up by whatever channel the front-end polls.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::info;

use crate::domain::{
    DomainResult, Notification, NotificationKind, NotificationPriority, RepositoryProvider,
};

/// Reminders stay relevant this long past the slot start
const REMINDER_EXPIRY_HOURS: i64 = 2;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Service for notification operations
pub struct NotificationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl NotificationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, notification: Notification) -> DomainResult<Notification> {
        let created = self.repos.notifications().create(notification).await?;

        info!(
            notification_id = %created.id,
            recipient = %created.recipient_nic,
            kind = created.kind.as_str(),
            "Notification created"
        );

        Ok(created)
    }

    /// Booking confirmed by an operator
    pub async fn booking_confirmation(
        &self,
        recipient_nic: &str,
        booking_id: &str,
        station_name: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> DomainResult<Notification> {
        let message = format!(
            "Your booking at {} has been confirmed for {} - {}. Your charging session is ready!",
            station_name,
            start_time.format(TIME_FORMAT),
            end_time.format(TIME_FORMAT),
        );

        let notification = Notification::new(
            recipient_nic,
            "Booking Confirmed",
            message,
            NotificationKind::BookingConfirmation,
        )
        .with_related_booking(booking_id)
        .with_priority(NotificationPriority::High)
        .with_metadata(json!({
            "stationName": station_name,
            "startTime": start_time.to_rfc3339(),
            "endTime": end_time.to_rfc3339(),
            "bookingId": booking_id,
        }));

        self.create(notification).await
    }

    /// Booking cancelled by the owner or an operator
    pub async fn booking_cancellation(
        &self,
        recipient_nic: &str,
        booking_id: &str,
        station_name: &str,
        reason: &str,
    ) -> DomainResult<Notification> {
        let mut message = format!("Your booking at {} has been cancelled", station_name);
        if !reason.is_empty() {
            message.push_str(&format!(". Reason: {}", reason));
        }
        message.push_str(". You can make a new booking anytime.");

        let notification = Notification::new(
            recipient_nic,
            "Booking Cancelled",
            message,
            NotificationKind::BookingCancellation,
        )
        .with_related_booking(booking_id)
        .with_priority(NotificationPriority::High)
        .with_metadata(json!({
            "stationName": station_name,
            "bookingId": booking_id,
            "reason": reason,
        }));

        self.create(notification).await
    }

    /// Upcoming-slot reminder; expires once the slot is well underway
    pub async fn booking_reminder(
        &self,
        recipient_nic: &str,
        booking_id: &str,
        station_name: &str,
        start_time: DateTime<Utc>,
    ) -> DomainResult<Notification> {
        let message = format!(
            "Reminder: Your charging session at {} starts at {}. Don't forget to arrive on time!",
            station_name,
            start_time.format(TIME_FORMAT),
        );

        let notification = Notification::new(
            recipient_nic,
            "Booking Reminder",
            message,
            NotificationKind::BookingReminder,
        )
        .with_related_booking(booking_id)
        .with_priority(NotificationPriority::Normal)
        .with_expiry(start_time + Duration::hours(REMINDER_EXPIRY_HOURS))
        .with_metadata(json!({
            "stationName": station_name,
            "startTime": start_time.to_rfc3339(),
            "bookingId": booking_id,
        }));

        self.create(notification).await
    }

    /// Purge notifications past their expiry; returns the number removed
    pub async fn cleanup_expired(&self) -> DomainResult<u64> {
        let deleted = self.repos.notifications().delete_expired().await?;

        if deleted > 0 {
            info!(count = deleted, "Cleaned up expired notifications");
        }

        Ok(deleted)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    fn service() -> (Arc<InMemoryRepositoryProvider>, NotificationService) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let service = NotificationService::new(repos.clone());
        (repos, service)
    }

    #[tokio::test]
    async fn confirmation_carries_window_and_high_priority() {
        let (_, service) = service();
        let start = Utc::now() + Duration::hours(20);
        let end = start + Duration::hours(2);

        let n = service
            .booking_confirmation("NIC1", "B001", "Colombo City", start, end)
            .await
            .unwrap();

        assert_eq!(n.title, "Booking Confirmed");
        assert_eq!(n.kind, NotificationKind::BookingConfirmation);
        assert_eq!(n.priority, NotificationPriority::High);
        assert_eq!(n.related_entity_id.as_deref(), Some("B001"));
        assert!(n.message.contains("Colombo City"));
        assert!(n.message.contains(&start.format(TIME_FORMAT).to_string()));
        assert!(!n.id.is_empty());
    }

    #[tokio::test]
    async fn cancellation_appends_reason_when_present() {
        let (_, service) = service();

        let n = service
            .booking_cancellation("NIC1", "B001", "Colombo City", "Cancelled by user")
            .await
            .unwrap();
        assert!(n.message.contains("Reason: Cancelled by user"));
        assert!(n.message.ends_with("You can make a new booking anytime."));

        let n = service
            .booking_cancellation("NIC1", "B001", "Colombo City", "")
            .await
            .unwrap();
        assert!(!n.message.contains("Reason:"));
    }

    #[tokio::test]
    async fn reminder_expires_two_hours_after_start() {
        let (_, service) = service();
        let start = Utc::now() + Duration::hours(1);

        let n = service
            .booking_reminder("NIC1", "B001", "Colombo City", start)
            .await
            .unwrap();

        assert_eq!(n.kind, NotificationKind::BookingReminder);
        assert_eq!(n.priority, NotificationPriority::Normal);
        assert_eq!(n.expires_at, Some(start + Duration::hours(2)));
    }

    #[tokio::test]
    async fn cleanup_removes_only_expired() {
        let (repos, service) = service();
        let now = Utc::now();

        service
            .create(
                Notification::new("NIC1", "Old", "expired", NotificationKind::SystemAlert)
                    .with_expiry(now - Duration::hours(1)),
            )
            .await
            .unwrap();
        service
            .create(
                Notification::new("NIC1", "Fresh", "current", NotificationKind::SystemAlert)
                    .with_expiry(now + Duration::hours(1)),
            )
            .await
            .unwrap();
        service
            .create(Notification::new(
                "NIC1",
                "Forever",
                "no expiry",
                NotificationKind::SystemAlert,
            ))
            .await
            .unwrap();

        let deleted = service.cleanup_expired().await.unwrap();
        assert_eq!(deleted, 1);

        let remaining = repos.notifications().find_by_recipient("NIC1").await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|n| n.title != "Old"));
    }
}
