use crate::{
    db::DbPool,
    entities::kit::Entity as KitEntity,
    entities::kit_item::{self, Entity as KitItemEntity},
    entities::lab::Entity as LabEntity,
    entities::order::{
        self, ActiveModel as OrderActiveModel, Entity as OrderEntity, Model as OrderModel,
        OrderStatus,
    },
    entities::order_box::{
        self, ActiveModel as BoxActiveModel, Entity as BoxEntity, Model as BoxModel,
    },
    entities::shipment::{self, ShipmentKind, ShipmentStatus},
    entities::site::Entity as SiteEntity,
    entities::stock_item::{self, Entity as StockItemEntity},
    entities::stock_movement::{self, MovementType},
    errors::ServiceError,
    events::{Event, EventSender},
    order_number::{day_prefix, format_order_number, parse_sequence},
    scheduling::outbound_ship_date,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// Retries for order creation when a concurrent request takes the same
/// daily sequence number.
const ORDER_NUMBER_RETRIES: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrdersRequest {
    pub site_id: Uuid,
    pub lab_id: Uuid,
    pub kit_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    /// One order is created per sampling date.
    #[validate(length(min = 1, message = "At least one sampling date is required"))]
    pub sampling_dates: Vec<NaiveDate>,
    pub outbound_carrier: Option<String>,
    pub sample_carrier: Option<String>,
    pub site_contact_id: Option<Uuid>,
    pub lab_contact_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    pub sampling_date: Option<NaiveDate>,
    pub outbound_carrier: Option<String>,
    pub sample_carrier: Option<String>,
    pub site_contact_id: Option<Uuid>,
    pub lab_contact_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApproveOrderRequest {
    #[serde(default)]
    pub approved_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddBoxRequest {
    pub outbound_waybill: Option<String>,
    pub sample_waybill: Option<String>,
    pub barcode_sequence: Option<String>,
    pub barcode_start: Option<String>,
    pub barcode_end: Option<String>,
    pub barcode_count: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilters {
    pub status: Option<String>,
    pub site_id: Option<Uuid>,
    pub lab_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
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

impl From<OrderModel> for OrderResponse {
    fn from(model: OrderModel) -> Self {
        Self {
            id: model.id,
            order_number: model.order_number,
            site_id: model.site_id,
            lab_id: model.lab_id,
            kit_id: model.kit_id,
            site_contact_id: model.site_contact_id,
            lab_contact_id: model.lab_contact_id,
            quantity: model.quantity,
            sampling_date: model.sampling_date,
            outbound_ship_date: model.outbound_ship_date,
            outbound_carrier: model.outbound_carrier,
            sample_carrier: model.sample_carrier,
            status: model.status,
            requires_customs: model.requires_customs,
            notes: model.notes,
            approved_at: model.approved_at,
            approved_by: model.approved_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            version: model.version,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoxResponse {
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

impl From<BoxModel> for BoxResponse {
    fn from(model: BoxModel) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            box_number: model.box_number,
            outbound_waybill: model.outbound_waybill,
            sample_waybill: model.sample_waybill,
            barcode_sequence: model.barcode_sequence,
            barcode_start: model.barcode_start,
            barcode_end: model.barcode_end,
            barcode_count: model.barcode_count,
            outbound_label_generated: model.outbound_label_generated,
            outbound_label_generated_at: model.outbound_label_generated_at,
            sample_label_generated: model.sample_label_generated,
            sample_label_generated_at: model.sample_label_generated_at,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Service for order lifecycle management: creation with derived ship
/// dates and sequential numbering, approval with stock allocation, and
/// box administration.
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates one order per sampling date in the request, each with an
    /// independently derived outbound ship date and a distinct daily
    /// sequence number.
    ///
    /// The whole batch is one transaction. Sequence allocation reads the
    /// latest number for today and is serialized by the unique index on
    /// order numbers; a concurrent creator winning the race surfaces as
    /// a unique violation and the batch is retried with fresh numbers.
    #[instrument(skip(self, request), fields(site_id = %request.site_id, kit_id = %request.kit_id))]
    pub async fn create_orders(
        &self,
        request: CreateOrdersRequest,
    ) -> Result<Vec<OrderResponse>, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;

        let site = SiteEntity::find_by_id(request.site_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Site {} not found", request.site_id)))?;
        let lab = LabEntity::find_by_id(request.lab_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Lab {} not found", request.lab_id)))?;
        KitEntity::find_by_id(request.kit_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Kit {} not found", request.kit_id)))?;

        // Customs paperwork is needed as soon as either leg crosses the EU border
        let requires_customs = !site.is_eu || !lab.is_eu;

        let mut attempt = 0;
        let created = loop {
            attempt += 1;
            let txn = db.begin().await?;
            match self
                .insert_order_batch(&txn, &request, requires_customs)
                .await
            {
                Ok(models) => {
                    txn.commit().await?;
                    break models;
                }
                Err(ServiceError::DatabaseError(e))
                    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
                {
                    let _ = txn.rollback().await;
                    if attempt >= ORDER_NUMBER_RETRIES {
                        return Err(ServiceError::Conflict(
                            "Order number allocation kept colliding with concurrent requests; please retry".to_string(),
                        ));
                    }
                    warn!(
                        attempt = attempt,
                        "Order number collision with concurrent request; retrying"
                    );
                }
                Err(e) => {
                    let _ = txn.rollback().await;
                    return Err(e);
                }
            }
        };

        for model in &created {
            info!(order_id = %model.id, order_number = %model.order_number, "Order created");
            if let Err(e) = self
                .event_sender
                .send(Event::OrderCreated {
                    order_id: model.id,
                    order_number: model.order_number.clone(),
                })
                .await
            {
                warn!(error = %e, order_id = %model.id, "Failed to send order created event");
            }
        }

        Ok(created.into_iter().map(OrderResponse::from).collect())
    }

    async fn insert_order_batch(
        &self,
        txn: &DatabaseTransaction,
        request: &CreateOrdersRequest,
        requires_customs: bool,
    ) -> Result<Vec<OrderModel>, ServiceError> {
        let now = Utc::now();
        let today = now.date_naive();
        let prefix = day_prefix(today);

        // Latest sequence for today; numbers sort lexicographically by sequence
        let latest = OrderEntity::find()
            .filter(order::Column::OrderNumber.starts_with(&prefix))
            .order_by_desc(order::Column::OrderNumber)
            .one(txn)
            .await?;
        let mut next_sequence = latest
            .as_ref()
            .and_then(|o| parse_sequence(&o.order_number))
            .unwrap_or(0)
            + 1;

        let mut created = Vec::with_capacity(request.sampling_dates.len());
        for sampling_date in &request.sampling_dates {
            let model = OrderActiveModel {
                id: Set(Uuid::new_v4()),
                order_number: Set(format_order_number(today, next_sequence)),
                site_id: Set(request.site_id),
                lab_id: Set(request.lab_id),
                kit_id: Set(request.kit_id),
                site_contact_id: Set(request.site_contact_id),
                lab_contact_id: Set(request.lab_contact_id),
                quantity: Set(request.quantity),
                sampling_date: Set(*sampling_date),
                outbound_ship_date: Set(outbound_ship_date(*sampling_date)),
                outbound_carrier: Set(request.outbound_carrier.clone()),
                sample_carrier: Set(request.sample_carrier.clone()),
                status: Set(OrderStatus::Draft.to_string()),
                requires_customs: Set(requires_customs),
                notes: Set(request.notes.clone()),
                approved_at: Set(None),
                approved_by: Set(None),
                created_at: Set(now),
                updated_at: Set(Some(now)),
                version: Set(1),
            }
            .insert(txn)
            .await?;
            next_sequence += 1;
            created.push(model);
        }

        Ok(created)
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: Uuid) -> Result<OrderResponse, ServiceError> {
        let order = self.find_order(order_id).await?;
        Ok(order.into())
    }

    pub async fn get_order_by_number(
        &self,
        order_number: &str,
    ) -> Result<OrderResponse, ServiceError> {
        let order = OrderEntity::find()
            .filter(order::Column::OrderNumber.eq(order_number))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_number)))?;
        Ok(order.into())
    }

    /// Lists orders newest-first with optional status, site, and lab
    /// filters.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        filters: OrderFilters,
        page: u64,
        per_page: u64,
    ) -> Result<OrderListResponse, ServiceError> {
        let mut query = OrderEntity::find().order_by_desc(order::Column::CreatedAt);
        if let Some(status) = &filters.status {
            query = query.filter(order::Column::Status.eq(status));
        }
        if let Some(site_id) = filters.site_id {
            query = query.filter(order::Column::SiteId.eq(site_id));
        }
        if let Some(lab_id) = filters.lab_id {
            query = query.filter(order::Column::LabId.eq(lab_id));
        }

        let paginator = query.paginate(&*self.db_pool, per_page.max(1));
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(OrderListResponse {
            orders: orders.into_iter().map(OrderResponse::from).collect(),
            total,
            page,
            per_page,
        })
    }

    /// Updates order details. Permitted only while the order is still
    /// editable; changing the sampling date re-derives the outbound
    /// ship date.
    #[instrument(skip(self, request), fields(order_id = %order_id))]
    pub async fn update_order(
        &self,
        order_id: Uuid,
        request: UpdateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        request.validate()?;
        let order = self.find_order(order_id).await?;
        let status = self.parse_status(&order.status)?;
        if !status.is_editable() {
            return Err(ServiceError::InvalidStatus(format!(
                "Order {} cannot be edited in status {}",
                order.order_number, order.status
            )));
        }

        let version = order.version;
        let mut active: OrderActiveModel = order.into();
        if let Some(sampling_date) = request.sampling_date {
            active.sampling_date = Set(sampling_date);
            active.outbound_ship_date = Set(outbound_ship_date(sampling_date));
        }
        if let Some(carrier) = request.outbound_carrier {
            active.outbound_carrier = Set(Some(carrier));
        }
        if let Some(carrier) = request.sample_carrier {
            active.sample_carrier = Set(Some(carrier));
        }
        if let Some(contact) = request.site_contact_id {
            active.site_contact_id = Set(Some(contact));
        }
        if let Some(contact) = request.lab_contact_id {
            active.lab_contact_id = Set(Some(contact));
        }
        if let Some(notes) = request.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Some(Utc::now()));
        active.version = Set(version + 1);

        let updated = active.update(&*self.db_pool).await?;

        if let Err(e) = self.event_sender.send(Event::OrderUpdated(order_id)).await {
            warn!(error = %e, order_id = %order_id, "Failed to send order updated event");
        }

        Ok(updated.into())
    }

    /// Approves an order, allocating stock for its kit lines.
    ///
    /// All steps run in one transaction: the stock-sufficiency check,
    /// the conditional decrements with their ledger entries, the status
    /// transition, and the outbound shipment creation. A failed line
    /// aborts the whole approval with nothing written.
    #[instrument(skip(self, request), fields(order_id = %order_id))]
    pub async fn approve_order(
        &self,
        order_id: Uuid,
        request: ApproveOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        let db = &*self.db_pool;
        let txn = db.begin().await?;

        let order = OrderEntity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        let status = self.parse_status(&order.status)?;
        if !status.can_be_approved() {
            return Err(ServiceError::InvalidStatus(format!(
                "Order {} cannot be approved in status {}",
                order.order_number, order.status
            )));
        }

        let kit_lines = KitItemEntity::find()
            .filter(kit_item::Column::KitId.eq(order.kit_id))
            .order_by_asc(kit_item::Column::SortOrder)
            .all(&txn)
            .await?;
        if kit_lines.is_empty() {
            return Err(ServiceError::ValidationError(format!(
                "Kit {} has no items",
                order.kit_id
            )));
        }

        let now = Utc::now();
        let mut allocations = Vec::with_capacity(kit_lines.len());

        for line in &kit_lines {
            let item = StockItemEntity::find_by_id(line.stock_item_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Stock item {} not found", line.stock_item_id))
                })?;

            let required = line.quantity * order.quantity;
            if item.quantity < required {
                // First shortfall aborts the whole approval
                return Err(ServiceError::InsufficientStock(format!(
                    "Insufficient stock for {}. Required: {}, Available: {}",
                    item.name, required, item.quantity
                )));
            }

            // Conditional decrement guards against a concurrent approval
            // draining the item between our read and this write
            let result = StockItemEntity::update_many()
                .col_expr(
                    stock_item::Column::Quantity,
                    Expr::col(stock_item::Column::Quantity).sub(required),
                )
                .col_expr(stock_item::Column::UpdatedAt, Expr::value(now))
                .filter(stock_item::Column::Id.eq(item.id))
                .filter(stock_item::Column::Quantity.gte(required))
                .exec(&txn)
                .await?;
            if result.rows_affected == 0 {
                return Err(ServiceError::InsufficientStock(format!(
                    "Insufficient stock for {}. Required: {}, Available: {}",
                    item.name, required, item.quantity
                )));
            }

            stock_movement::ActiveModel {
                id: Set(Uuid::new_v4()),
                stock_item_id: Set(item.id),
                order_id: Set(Some(order.id)),
                quantity_change: Set(-required),
                movement_type: Set(MovementType::OrderAllocation.to_string()),
                notes: Set(Some(format!("Allocated for order {}", order.order_number))),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
            allocations.push((item.id, required));
        }

        // Version check serializes concurrent approvals of the same order
        let update = OrderEntity::update_many()
            .col_expr(
                order::Column::Status,
                Expr::value(OrderStatus::Approved.to_string()),
            )
            .col_expr(order::Column::ApprovedAt, Expr::value(now))
            .col_expr(
                order::Column::ApprovedBy,
                Expr::value(request.approved_by.clone()),
            )
            .col_expr(order::Column::UpdatedAt, Expr::value(now))
            .col_expr(order::Column::Version, Expr::value(order.version + 1))
            .filter(order::Column::Id.eq(order.id))
            .filter(order::Column::Version.eq(order.version))
            .exec(&txn)
            .await?;
        if update.rows_affected == 0 {
            return Err(ServiceError::ConcurrentModification(order.id));
        }

        let created_shipment = shipment::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            kind: Set(ShipmentKind::Outbound.to_string()),
            carrier: Set(order.outbound_carrier.clone()),
            scheduled_ship_date: Set(order.outbound_ship_date),
            status: Set(ShipmentStatus::Pending.to_string()),
            tracking_number: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(order_id = %order.id, order_number = %order.order_number, "Order approved");
        for (stock_item_id, quantity) in allocations {
            if let Err(e) = self
                .event_sender
                .send(Event::StockAllocated {
                    stock_item_id,
                    order_id: order.id,
                    quantity,
                })
                .await
            {
                warn!(error = %e, order_id = %order.id, "Failed to send stock allocated event");
            }
        }
        if let Err(e) = self
            .event_sender
            .send(Event::ShipmentCreated(created_shipment.id))
            .await
        {
            warn!(error = %e, order_id = %order.id, "Failed to send shipment created event");
        }
        if let Err(e) = self
            .event_sender
            .send(Event::OrderApproved {
                order_id: order.id,
                order_number: order.order_number.clone(),
                outbound_ship_date: order.outbound_ship_date,
            })
            .await
        {
            warn!(error = %e, order_id = %order.id, "Failed to send order approved event");
        }

        self.get_order(order_id).await
    }

    /// Cancels an order from any non-terminal state. Stock already
    /// allocated by a prior approval is not returned.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn cancel_order(
        &self,
        order_id: Uuid,
        reason: Option<String>,
    ) -> Result<OrderResponse, ServiceError> {
        let order = self.find_order(order_id).await?;
        let status = self.parse_status(&order.status)?;
        if status.is_terminal() {
            return Err(ServiceError::InvalidStatus(format!(
                "Order {} is already in terminal status {}",
                order.order_number, order.status
            )));
        }
        if !matches!(status, OrderStatus::Draft | OrderStatus::PendingApproval) {
            warn!(
                order_id = %order.id,
                order_number = %order.order_number,
                "Cancelling an approved order; allocated stock is not returned"
            );
        }

        self.transition_status(order, OrderStatus::Cancelled, reason)
            .await?;

        if let Err(e) = self.event_sender.send(Event::OrderCancelled(order_id)).await {
            warn!(error = %e, order_id = %order_id, "Failed to send order cancelled event");
        }

        self.get_order(order_id).await
    }

    /// Moves an order forward through its lifecycle.
    #[instrument(skip(self, request), fields(order_id = %order_id, new_status = %request.status))]
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        request: UpdateOrderStatusRequest,
    ) -> Result<OrderResponse, ServiceError> {
        request.validate()?;
        let new_status = self.parse_status(&request.status)?;
        if new_status == OrderStatus::Cancelled {
            return self.cancel_order(order_id, request.notes).await;
        }

        let order = self.find_order(order_id).await?;
        let current = self.parse_status(&order.status)?;
        if !current.can_transition_to(new_status) {
            return Err(ServiceError::InvalidStatus(format!(
                "Order {} cannot move from {} to {}",
                order.order_number, order.status, new_status
            )));
        }
        if new_status == OrderStatus::Approved {
            return Err(ServiceError::InvalidStatus(
                "Approval must go through the approve operation".to_string(),
            ));
        }

        let old_status = order.status.clone();
        self.transition_status(order, new_status, request.notes)
            .await?;

        if let Err(e) = self
            .event_sender
            .send(Event::OrderStatusChanged {
                order_id,
                old_status,
                new_status: new_status.to_string(),
            })
            .await
        {
            warn!(error = %e, order_id = %order_id, "Failed to send status changed event");
        }

        self.get_order(order_id).await
    }

    /// Adds the next box to an order, assigning a dense box number and
    /// default waybills derived from the order number.
    #[instrument(skip(self, request), fields(order_id = %order_id))]
    pub async fn add_box(
        &self,
        order_id: Uuid,
        request: AddBoxRequest,
    ) -> Result<BoxResponse, ServiceError> {
        request.validate()?;
        let db = &*self.db_pool;
        let order = self.find_order(order_id).await?;

        let txn = db.begin().await?;

        let existing = BoxEntity::find()
            .filter(order_box::Column::OrderId.eq(order_id))
            .count(&txn)
            .await?;
        let box_number = existing as i32 + 1;

        let outbound_waybill = request
            .outbound_waybill
            .unwrap_or_else(|| format!("WB-OUT-{}-{}", order.order_number, box_number));
        let sample_waybill = request
            .sample_waybill
            .unwrap_or_else(|| format!("WB-SAM-{}-{}", order.order_number, box_number));

        let model = BoxActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            box_number: Set(box_number),
            outbound_waybill: Set(Some(outbound_waybill)),
            sample_waybill: Set(Some(sample_waybill)),
            barcode_sequence: Set(request.barcode_sequence),
            barcode_start: Set(request.barcode_start),
            barcode_end: Set(request.barcode_end),
            barcode_count: Set(request.barcode_count),
            outbound_label_generated: Set(false),
            outbound_label_generated_at: Set(None),
            sample_label_generated: Set(false),
            sample_label_generated_at: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(order_id = %order_id, box_number = box_number, "Box added to order");
        if let Err(e) = self
            .event_sender
            .send(Event::BoxCreated {
                order_id,
                box_number,
            })
            .await
        {
            warn!(error = %e, order_id = %order_id, "Failed to send box created event");
        }

        Ok(model.into())
    }

    /// Lists an order's boxes in box-number order.
    pub async fn list_boxes(&self, order_id: Uuid) -> Result<Vec<BoxResponse>, ServiceError> {
        self.find_order(order_id).await?;
        let boxes = BoxEntity::find()
            .filter(order_box::Column::OrderId.eq(order_id))
            .order_by_asc(order_box::Column::BoxNumber)
            .all(&*self.db_pool)
            .await?;
        Ok(boxes.into_iter().map(BoxResponse::from).collect())
    }

    async fn find_order(&self, order_id: Uuid) -> Result<OrderModel, ServiceError> {
        OrderEntity::find_by_id(order_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))
    }

    fn parse_status(&self, status: &str) -> Result<OrderStatus, ServiceError> {
        OrderStatus::from_str(status).map_err(|_| {
            error!(status = %status, "Unrecognized order status in database");
            ServiceError::InternalError(format!("Unrecognized order status: {}", status))
        })
    }

    /// Writes the status change with an optimistic version check.
    async fn transition_status(
        &self,
        order: OrderModel,
        new_status: OrderStatus,
        notes: Option<String>,
    ) -> Result<(), ServiceError> {
        let now = Utc::now();
        let mut update = OrderEntity::update_many()
            .col_expr(order::Column::Status, Expr::value(new_status.to_string()))
            .col_expr(order::Column::UpdatedAt, Expr::value(now))
            .col_expr(order::Column::Version, Expr::value(order.version + 1));
        if let Some(notes) = notes {
            update = update.col_expr(order::Column::Notes, Expr::value(notes));
        }
        let result = update
            .filter(order::Column::Id.eq(order.id))
            .filter(order::Column::Version.eq(order.version))
            .exec(&*self.db_pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::ConcurrentModification(order.id));
        }
        Ok(())
    }
}
