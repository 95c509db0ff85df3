//! Fire-and-forget notification dispatch
//!
//! Booking state transitions must never fail or stall because a
//! notification could not be recorded. The emitter queues requests on an
//! unbounded channel drained by a worker task; the worker resolves station
//! names, builds the notification and logs any failure on its own error
//! channel.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::domain::RepositoryProvider;

use super::service::NotificationService;

/// Shown when the station record cannot be resolved
const FALLBACK_STATION_NAME: &str = "Charging Station";

/// A queued notification side effect
#[derive(Debug)]
pub enum NotificationRequest {
    BookingConfirmed {
        recipient_nic: String,
        booking_id: String,
        station_id: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    },
    BookingCancelled {
        recipient_nic: String,
        booking_id: String,
        station_id: String,
        reason: String,
    },
}

enum EmitterMessage {
    Request(NotificationRequest),
    Flush(oneshot::Sender<()>),
}

/// Handle for enqueueing notification requests
#[derive(Clone)]
pub struct NotificationEmitter {
    tx: mpsc::UnboundedSender<EmitterMessage>,
}

impl NotificationEmitter {
    /// Spawn the worker task and return the sending handle.
    ///
    /// The worker exits when every handle has been dropped.
    pub fn spawn(repos: Arc<dyn RepositoryProvider>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let service = NotificationService::new(repos.clone());

        tokio::spawn(async move {
            debug!("Notification emitter worker started");

            while let Some(message) = rx.recv().await {
                match message {
                    EmitterMessage::Request(request) => {
                        handle_request(&repos, &service, request).await;
                    }
                    EmitterMessage::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }

            debug!("Notification emitter worker stopped");
        });

        Self { tx }
    }

    /// Enqueue a request; never blocks, never fails the caller
    pub fn emit(&self, request: NotificationRequest) {
        if self.tx.send(EmitterMessage::Request(request)).is_err() {
            warn!("Notification emitter worker is gone; request dropped");
        }
    }

    /// Wait until every request enqueued before this call has been handled
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(EmitterMessage::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }
}

async fn handle_request(
    repos: &Arc<dyn RepositoryProvider>,
    service: &NotificationService,
    request: NotificationRequest,
) {
    match request {
        NotificationRequest::BookingConfirmed {
            recipient_nic,
            booking_id,
            station_id,
            start_time,
            end_time,
        } => {
            let station_name = station_name(repos, &station_id).await;
            match service
                .booking_confirmation(&recipient_nic, &booking_id, &station_name, start_time, end_time)
                .await
            {
                Ok(_) => info!(booking_id = %booking_id, "Confirmation notification sent"),
                Err(e) => warn!(
                    booking_id = %booking_id,
                    error = %e,
                    "Failed to send confirmation notification"
                ),
            }
        }
        NotificationRequest::BookingCancelled {
            recipient_nic,
            booking_id,
            station_id,
            reason,
        } => {
            let station_name = station_name(repos, &station_id).await;
            match service
                .booking_cancellation(&recipient_nic, &booking_id, &station_name, &reason)
                .await
            {
                Ok(_) => info!(booking_id = %booking_id, "Cancellation notification sent"),
                Err(e) => warn!(
                    booking_id = %booking_id,
                    error = %e,
                    "Failed to send cancellation notification"
                ),
            }
        }
    }
}

async fn station_name(repos: &Arc<dyn RepositoryProvider>, station_id: &str) -> String {
    match repos.stations().find_by_id(station_id).await {
        Ok(Some(station)) => station.name,
        _ => FALLBACK_STATION_NAME.to_string(),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChargingStation, NotificationKind, StationType};
    use crate::infrastructure::memory::InMemoryRepositoryProvider;
    use chrono::Duration;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn emitted_confirmation_is_persisted_after_flush() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let station = repos
            .stations()
            .create(ChargingStation::new(
                "Colombo City",
                "Colombo 03",
                StationType::Ac,
                2,
                Decimal::from(500),
            ))
            .await
            .unwrap();

        let emitter = NotificationEmitter::spawn(repos.clone());
        let start = Utc::now() + Duration::hours(20);

        emitter.emit(NotificationRequest::BookingConfirmed {
            recipient_nic: "NIC1".into(),
            booking_id: "B001".into(),
            station_id: station.id.clone(),
            start_time: start,
            end_time: start + Duration::hours(2),
        });
        emitter.flush().await;

        let sent = repos.notifications().find_by_recipient("NIC1").await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::BookingConfirmation);
        assert!(sent[0].message.contains("Colombo City"));
    }

    #[tokio::test]
    async fn unknown_station_falls_back_to_generic_name() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let emitter = NotificationEmitter::spawn(repos.clone());

        emitter.emit(NotificationRequest::BookingCancelled {
            recipient_nic: "NIC1".into(),
            booking_id: "B001".into(),
            station_id: "missing".into(),
            reason: "Cancelled by user".into(),
        });
        emitter.flush().await;

        let sent = repos.notifications().find_by_recipient("NIC1").await.unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].message.contains(FALLBACK_STATION_NAME));
    }

    #[tokio::test]
    async fn flush_with_empty_queue_returns() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let emitter = NotificationEmitter::spawn(repos);
        emitter.flush().await;
    }
}
