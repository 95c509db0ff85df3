//! Notification entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub recipient_nic: String,
    pub title: String,
    pub message: String,

    /// Notification kind: BookingConfirmation, BookingCancellation, ...
    pub kind: String,

    #[sea_orm(nullable)]
    pub related_entity_id: Option<String>,

    #[sea_orm(nullable)]
    pub related_entity_type: Option<String>,

    pub is_read: bool,
    pub is_delivered: bool,

    /// Priority: Low, Normal, High, Critical
    pub priority: String,

    pub created_at: DateTimeUtc,

    #[sea_orm(nullable)]
    pub read_at: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub delivered_at: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub expires_at: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub metadata: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
