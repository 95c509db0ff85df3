//! SeaORM implementation of NotificationRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::notification::{
    Notification, NotificationKind, NotificationPriority, NotificationRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::notification;

pub struct SeaOrmNotificationRepository {
    db: DatabaseConnection,
}

impl SeaOrmNotificationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: notification::Model) -> Notification {
    Notification {
        id: m.id,
        recipient_nic: m.recipient_nic,
        title: m.title,
        message: m.message,
        kind: NotificationKind::from_str(&m.kind),
        related_entity_id: m.related_entity_id,
        related_entity_type: m.related_entity_type,
        is_read: m.is_read,
        is_delivered: m.is_delivered,
        priority: NotificationPriority::from_str(&m.priority),
        created_at: m.created_at,
        read_at: m.read_at,
        delivered_at: m.delivered_at,
        expires_at: m.expires_at,
        metadata: m.metadata,
    }
}

fn domain_to_active(n: &Notification) -> notification::ActiveModel {
    notification::ActiveModel {
        id: Set(n.id.clone()),
        recipient_nic: Set(n.recipient_nic.clone()),
        title: Set(n.title.clone()),
        message: Set(n.message.clone()),
        kind: Set(n.kind.as_str().to_string()),
        related_entity_id: Set(n.related_entity_id.clone()),
        related_entity_type: Set(n.related_entity_type.clone()),
        is_read: Set(n.is_read),
        is_delivered: Set(n.is_delivered),
        priority: Set(n.priority.as_str().to_string()),
        created_at: Set(n.created_at),
        read_at: Set(n.read_at),
        delivered_at: Set(n.delivered_at),
        expires_at: Set(n.expires_at),
        metadata: Set(n.metadata.clone()),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── NotificationRepository impl ─────────────────────────────────

#[async_trait]
impl NotificationRepository for SeaOrmNotificationRepository {
    async fn create(&self, mut n: Notification) -> DomainResult<Notification> {
        n.id = Uuid::new_v4().to_string();
        n.created_at = Utc::now();

        debug!(notification_id = %n.id, "Saving notification");

        domain_to_active(&n).insert(&self.db).await.map_err(db_err)?;
        Ok(n)
    }

    async fn find_by_recipient(&self, recipient_nic: &str) -> DomainResult<Vec<Notification>> {
        let models = notification::Entity::find()
            .filter(notification::Column::RecipientNic.eq(recipient_nic))
            .order_by_desc(notification::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_related_entity(
        &self,
        entity_id: &str,
        entity_type: &str,
    ) -> DomainResult<Vec<Notification>> {
        let models = notification::Entity::find()
            .filter(notification::Column::RelatedEntityId.eq(entity_id))
            .filter(notification::Column::RelatedEntityType.eq(entity_type))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete_expired(&self) -> DomainResult<u64> {
        let result = notification::Entity::delete_many()
            .filter(notification::Column::ExpiresAt.is_not_null())
            .filter(notification::Column::ExpiresAt.lt(Utc::now()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
