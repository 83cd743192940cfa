use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Bookkeeping record for a generated document attached to a box.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "box_documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub box_id: Uuid,
    pub document_type: String,
    pub file_name: String,
    pub storage_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order_box::Entity",
        from = "Column::BoxId",
        to = "super::order_box::Column::Id"
    )]
    OrderBox,
}

impl Related<super::order_box::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderBox.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    OutboundContent,
    SampleContent,
    NonAdrDeclaration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn document_type_strings_round_trip() {
        assert_eq!(DocumentType::OutboundContent.to_string(), "OUTBOUND_CONTENT");
        assert_eq!(
            DocumentType::from_str("SAMPLE_CONTENT").unwrap(),
            DocumentType::SampleContent
        );
        assert_eq!(
            DocumentType::NonAdrDeclaration.to_string(),
            "NON_ADR_DECLARATION"
        );
    }
}
