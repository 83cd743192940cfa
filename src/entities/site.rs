use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sampling site that receives kits.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub delivery_address: Option<String>,
    pub is_eu: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Single-line postal address used on labels when no explicit
    /// delivery address is configured.
    pub fn formatted_address(&self) -> String {
        let mut parts = vec![self.address_line1.clone()];
        if let Some(line2) = &self.address_line2 {
            parts.push(line2.clone());
        }
        parts.push(format!("{} {}", self.postal_code, self.city));
        parts.push(self.country.clone());
        parts.join(", ")
    }
}
