use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// A sample-kit order placed by a site for analysis at a lab.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_number: String,
    pub site_id: Uuid,
    pub lab_id: Uuid,
    pub kit_id: Uuid,
    pub site_contact_id: Option<Uuid>,
    pub lab_contact_id: Option<Uuid>,
    pub quantity: i32,
    pub sampling_date: NaiveDate,
    pub outbound_ship_date: NaiveDate,
    pub outbound_carrier: Option<String>,
    pub sample_carrier: Option<String>,
    pub status: String,
    pub requires_customs: bool,
    pub notes: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_box::Entity")]
    OrderBoxes,
    #[sea_orm(has_many = "super::shipment::Entity")]
    Shipments,
    #[sea_orm(
        belongs_to = "super::site::Entity",
        from = "Column::SiteId",
        to = "super::site::Column::Id"
    )]
    Site,
    #[sea_orm(
        belongs_to = "super::lab::Entity",
        from = "Column::LabId",
        to = "super::lab::Column::Id"
    )]
    Lab,
    #[sea_orm(
        belongs_to = "super::kit::Entity",
        from = "Column::KitId",
        to = "super::kit::Column::Id"
    )]
    Kit,
}

impl Related<super::order_box::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderBoxes.def()
    }
}

impl Related<super::shipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shipments.def()
    }
}

impl Related<super::site::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Site.def()
    }
}

impl Related<super::lab::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lab.def()
    }
}

impl Related<super::kit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lifecycle states of an order. Stored as strings in the database.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Draft,
    PendingApproval,
    Approved,
    OutboundShipped,
    SampleShipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states permit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Approval is only permitted before the order enters fulfilment.
    pub fn can_be_approved(&self) -> bool {
        matches!(self, Self::Draft | Self::PendingApproval)
    }

    /// Orders remain editable until approved.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::PendingApproval)
    }

    /// Returns true when the state machine permits moving to `next`.
    /// Cancellation is reachable from any non-terminal state.
    pub fn can_transition_to(&self, next: Self) -> bool {
        if next == Self::Cancelled {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Self::Draft, Self::PendingApproval)
                | (Self::Draft, Self::Approved)
                | (Self::PendingApproval, Self::Approved)
                | (Self::Approved, Self::OutboundShipped)
                | (Self::OutboundShipped, Self::SampleShipped)
                | (Self::SampleShipped, Self::Completed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_strings_round_trip() {
        assert_eq!(OrderStatus::PendingApproval.to_string(), "PENDING_APPROVAL");
        assert_eq!(
            OrderStatus::from_str("OUTBOUND_SHIPPED").unwrap(),
            OrderStatus::OutboundShipped
        );
    }

    #[test]
    fn cancellation_reachable_from_any_pre_terminal_state() {
        for status in [
            OrderStatus::Draft,
            OrderStatus::PendingApproval,
            OrderStatus::Approved,
            OrderStatus::OutboundShipped,
            OrderStatus::SampleShipped,
        ] {
            assert!(status.can_transition_to(OrderStatus::Cancelled));
        }
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn no_backward_transitions() {
        assert!(!OrderStatus::Approved.can_transition_to(OrderStatus::Draft));
        assert!(!OrderStatus::SampleShipped.can_transition_to(OrderStatus::OutboundShipped));
    }

    #[test]
    fn approval_only_before_fulfilment() {
        assert!(OrderStatus::Draft.can_be_approved());
        assert!(OrderStatus::PendingApproval.can_be_approved());
        assert!(!OrderStatus::Approved.can_be_approved());
        assert!(!OrderStatus::Cancelled.can_be_approved());
    }
}
