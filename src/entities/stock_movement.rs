use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Append-only ledger entry recording a stock quantity change and its
/// cause. Rows are never updated or deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub stock_item_id: Uuid,
    pub order_id: Option<Uuid>,
    pub quantity_change: i32,
    pub movement_type: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stock_item::Entity",
        from = "Column::StockItemId",
        to = "super::stock_item::Column::Id"
    )]
    StockItem,
}

impl Related<super::stock_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    OrderAllocation,
    ManualIncrease,
    ManualDecrease,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn movement_type_strings_round_trip() {
        assert_eq!(MovementType::OrderAllocation.to_string(), "ORDER_ALLOCATION");
        assert_eq!(
            MovementType::from_str("MANUAL_DECREASE").unwrap(),
            MovementType::ManualDecrease
        );
    }
}
