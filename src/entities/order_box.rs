use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical shipping unit within an order. Boxes are numbered densely
/// from 1 within their order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_boxes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub box_number: i32,
    pub outbound_waybill: Option<String>,
    pub sample_waybill: Option<String>,
    pub barcode_sequence: Option<String>,
    pub barcode_start: Option<String>,
    pub barcode_end: Option<String>,
    pub barcode_count: Option<i32>,
    pub outbound_label_generated: bool,
    pub outbound_label_generated_at: Option<DateTime<Utc>>,
    pub sample_label_generated: bool,
    pub sample_label_generated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    #[sea_orm(has_many = "super::box_document::Entity")]
    Documents,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::box_document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
