//! Background task for booking reminders and notification cleanup.
//!
//! Runs in a tokio::spawn loop. Every tick it sweeps confirmed bookings
//! starting soon and sends each owner at most one reminder; a cleanup
//! watermark checked on the same tick purges expired notifications every
//! few hours.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::time::Duration as TokioDuration;
use tracing::{debug, info, warn};

use crate::domain::{DomainResult, NotificationKind, RepositoryProvider, RELATED_ENTITY_BOOKING};
use crate::shared::shutdown::ShutdownSignal;

use super::service::NotificationService;

/// Configuration for the notification scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// How often the reminder sweep runs
    pub reminder_check_interval: TokioDuration,
    /// How far ahead of the slot start a reminder goes out
    pub reminder_lead: Duration,
    /// Minimum time between cleanup sweeps
    pub cleanup_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            reminder_check_interval: TokioDuration::from_secs(30 * 60),
            reminder_lead: Duration::hours(2),
            cleanup_interval: Duration::hours(6),
        }
    }
}

/// Start the notification scheduler background task.
///
/// The loop observes `shutdown` at the top of each iteration and between
/// the two sub-tasks; each sub-task may fail without aborting the other.
pub fn start_notification_scheduler(
    repos: Arc<dyn RepositoryProvider>,
    shutdown: ShutdownSignal,
    config: SchedulerConfig,
) {
    tokio::spawn(async move {
        info!(
            check_interval_secs = config.reminder_check_interval.as_secs(),
            "🔔 Notification scheduler started"
        );

        let service = NotificationService::new(repos.clone());
        let mut interval = tokio::time::interval(config.reminder_check_interval);
        let mut last_cleanup = Utc::now();

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = send_booking_reminders(&repos, &service, config.reminder_lead).await {
                        warn!(error = %e, "Booking reminder sweep error");
                    }

                    if shutdown.is_triggered() {
                        break;
                    }

                    if Utc::now() - last_cleanup >= config.cleanup_interval {
                        if let Err(e) = service.cleanup_expired().await {
                            warn!(error = %e, "Notification cleanup error");
                        }
                        last_cleanup = Utc::now();
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("🔔 Notification scheduler shutting down");
                    break;
                }
            }
        }

        info!("🔔 Notification scheduler stopped");
    });
}

/// Send reminders for confirmed bookings starting within the lead window.
///
/// Idempotent per booking+recipient: a booking that already has a reminder
/// notification on record is skipped. Per-booking failures are logged and
/// do not halt the sweep.
pub async fn send_booking_reminders(
    repos: &Arc<dyn RepositoryProvider>,
    service: &NotificationService,
    lead: Duration,
) -> DomainResult<usize> {
    let now = Utc::now();
    let upcoming = repos
        .bookings()
        .find_upcoming_confirmed(now, now + lead)
        .await?;

    debug!(count = upcoming.len(), "Upcoming bookings in reminder window");

    let mut sent = 0;
    for booking in upcoming {
        match reminder_exists(repos, &booking.id, &booking.owner_nic).await {
            Ok(true) => continue,
            Ok(false) => {}
            Err(e) => {
                warn!(booking_id = %booking.id, error = %e, "Reminder lookup failed");
                continue;
            }
        }

        let station_name = match repos.stations().find_by_id(&booking.station_id).await {
            Ok(Some(station)) => station.name,
            _ => "Charging Station".to_string(),
        };

        match service
            .booking_reminder(
                &booking.owner_nic,
                &booking.id,
                &station_name,
                booking.start_time,
            )
            .await
        {
            Ok(_) => {
                info!(
                    booking_id = %booking.id,
                    owner = %booking.owner_nic,
                    "Booking reminder sent"
                );
                sent += 1;
            }
            Err(e) => {
                warn!(booking_id = %booking.id, error = %e, "Failed to send booking reminder");
            }
        }
    }

    Ok(sent)
}

async fn reminder_exists(
    repos: &Arc<dyn RepositoryProvider>,
    booking_id: &str,
    owner_nic: &str,
) -> DomainResult<bool> {
    let existing = repos
        .notifications()
        .find_by_related_entity(booking_id, RELATED_ENTITY_BOOKING)
        .await?;

    Ok(existing.iter().any(|n| {
        n.kind == NotificationKind::BookingReminder && n.recipient_nic == owner_nic
    }))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Booking, BookingStatus, ChargingStation, StationType};
    use crate::infrastructure::memory::InMemoryRepositoryProvider;
    use rust_decimal::Decimal;

    async fn seed_confirmed_booking(
        repos: &Arc<InMemoryRepositoryProvider>,
        starts_in: Duration,
    ) -> (String, Booking) {
        let station = repos
            .stations()
            .create(ChargingStation::new(
                "Kandy Hub",
                "Kandy",
                StationType::Dc,
                2,
                Decimal::from(400),
            ))
            .await
            .unwrap();

        let start = Utc::now() + starts_in;
        let mut booking = Booking::new(
            "NIC-OWNER",
            station.id.clone(),
            start,
            start + Duration::hours(2),
            "QR",
            Decimal::from(800),
        );
        booking.status = BookingStatus::Confirmed;
        let booking = repos.bookings().create(booking).await.unwrap();

        (station.id, booking)
    }

    fn as_dyn(repos: &Arc<InMemoryRepositoryProvider>) -> Arc<dyn RepositoryProvider> {
        repos.clone()
    }

    #[tokio::test]
    async fn sweep_sends_reminder_for_imminent_booking() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let (_, booking) = seed_confirmed_booking(&repos, Duration::hours(1)).await;

        let dyn_repos = as_dyn(&repos);
        let service = NotificationService::new(dyn_repos.clone());

        let sent = send_booking_reminders(&dyn_repos, &service, Duration::hours(2))
            .await
            .unwrap();
        assert_eq!(sent, 1);

        let notifications = repos
            .notifications()
            .find_by_related_entity(&booking.id, RELATED_ENTITY_BOOKING)
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::BookingReminder);
        assert_eq!(notifications[0].recipient_nic, "NIC-OWNER");
        assert_eq!(
            notifications[0].expires_at,
            Some(booking.start_time + Duration::hours(2))
        );
    }

    #[tokio::test]
    async fn second_sweep_is_idempotent() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let (_, booking) = seed_confirmed_booking(&repos, Duration::hours(1)).await;

        let dyn_repos = as_dyn(&repos);
        let service = NotificationService::new(dyn_repos.clone());

        let first = send_booking_reminders(&dyn_repos, &service, Duration::hours(2))
            .await
            .unwrap();
        let second = send_booking_reminders(&dyn_repos, &service, Duration::hours(2))
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 0);

        let notifications = repos
            .notifications()
            .find_by_related_entity(&booking.id, RELATED_ENTITY_BOOKING)
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
    }

    #[tokio::test]
    async fn bookings_outside_the_window_are_ignored() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        seed_confirmed_booking(&repos, Duration::hours(5)).await;

        let dyn_repos = as_dyn(&repos);
        let service = NotificationService::new(dyn_repos.clone());

        let sent = send_booking_reminders(&dyn_repos, &service, Duration::hours(2))
            .await
            .unwrap();
        assert_eq!(sent, 0);
    }

    #[tokio::test]
    async fn active_unconfirmed_bookings_get_no_reminder() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let station = repos
            .stations()
            .create(ChargingStation::new(
                "Galle Fort",
                "Galle",
                StationType::Ac,
                1,
                Decimal::from(300),
            ))
            .await
            .unwrap();

        let start = Utc::now() + Duration::hours(1);
        repos
            .bookings()
            .create(Booking::new(
                "NIC-OWNER",
                station.id,
                start,
                start + Duration::hours(2),
                "QR",
                Decimal::from(600),
            ))
            .await
            .unwrap();

        let dyn_repos = as_dyn(&repos);
        let service = NotificationService::new(dyn_repos.clone());

        let sent = send_booking_reminders(&dyn_repos, &service, Duration::hours(2))
            .await
            .unwrap();
        assert_eq!(sent, 0);
    }

    #[tokio::test]
    async fn scheduler_loop_stops_on_shutdown() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let shutdown = ShutdownSignal::new();

        start_notification_scheduler(
            as_dyn(&repos),
            shutdown.clone(),
            SchedulerConfig {
                reminder_check_interval: TokioDuration::from_millis(10),
                ..SchedulerConfig::default()
            },
        );

        // Let the loop take a few ticks, then stop it
        tokio::time::sleep(TokioDuration::from_millis(30)).await;
        shutdown.trigger();
        tokio::time::sleep(TokioDuration::from_millis(30)).await;
    }
}
