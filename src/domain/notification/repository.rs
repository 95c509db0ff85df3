//! Notification repository interface

use async_trait::async_trait;

use super::model::Notification;
use crate::domain::DomainResult;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a new notification; assigns the id and created stamp
    async fn create(&self, notification: Notification) -> DomainResult<Notification>;

    /// All notifications for a recipient, newest first
    async fn find_by_recipient(&self, recipient_nic: &str) -> DomainResult<Vec<Notification>>;

    /// Notifications referencing a related entity (e.g. a booking id tagged
    /// "Booking"); used as the reminder idempotency guard
    async fn find_by_related_entity(
        &self,
        entity_id: &str,
        entity_type: &str,
    ) -> DomainResult<Vec<Notification>>;

    /// Delete all notifications whose `expires_at` is in the past.
    /// Returns the number of records removed.
    async fn delete_expired(&self) -> DomainResult<u64>;
}
