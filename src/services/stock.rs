use crate::{
    db::DbPool,
    entities::stock_item::{
        self, ActiveModel as StockItemActiveModel, Entity as StockItemEntity,
        Model as StockItemModel,
    },
    entities::stock_movement::{
        self, Entity as StockMovementEntity, Model as StockMovementModel, MovementType,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStockItemRequest {
    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Initial quantity cannot be negative"))]
    #[serde(default)]
    pub initial_quantity: i32,
    #[validate(range(min = 0, message = "Minimum stock cannot be negative"))]
    #[serde(default)]
    pub minimum_stock: i32,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    pub unit_price: Option<Decimal>,
    pub unit_weight_kg: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdjustStockRequest {
    /// Signed delta; positive restocks, negative removes.
    pub quantity_change: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StockItemResponse {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub minimum_stock: i32,
    pub unit: String,
    pub unit_price: Option<Decimal>,
    pub unit_weight_kg: Option<Decimal>,
    pub below_minimum: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<StockItemModel> for StockItemResponse {
    fn from(model: StockItemModel) -> Self {
        let below_minimum = model.is_below_minimum();
        Self {
            id: model.id,
            sku: model.sku,
            name: model.name,
            description: model.description,
            quantity: model.quantity,
            minimum_stock: model.minimum_stock,
            unit: model.unit,
            unit_price: model.unit_price,
            unit_weight_kg: model.unit_weight_kg,
            below_minimum,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StockMovementResponse {
    pub id: Uuid,
    pub stock_item_id: Uuid,
    pub order_id: Option<Uuid>,
    pub quantity_change: i32,
    pub movement_type: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StockMovementModel> for StockMovementResponse {
    fn from(model: StockMovementModel) -> Self {
        Self {
            id: model.id,
            stock_item_id: model.stock_item_id,
            order_id: model.order_id,
            quantity_change: model.quantity_change,
            movement_type: model.movement_type,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StockItemListResponse {
    pub items: Vec<StockItemResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Service for stock item administration and the movement ledger.
#[derive(Clone)]
pub struct StockService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl StockService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a stock item. A non-zero initial quantity is recorded as
    /// a manual-increase movement so the ledger stays complete.
    #[instrument(skip(self, request), fields(sku = %request.sku))]
    pub async fn create_stock_item(
        &self,
        request: CreateStockItemRequest,
    ) -> Result<StockItemResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let existing = StockItemEntity::find()
            .filter(stock_item::Column::Sku.eq(&request.sku))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Stock item with SKU {} already exists",
                request.sku
            )));
        }

        let now = Utc::now();
        let txn = db.begin().await?;

        let model = StockItemActiveModel {
            id: Set(Uuid::new_v4()),
            sku: Set(request.sku.clone()),
            name: Set(request.name),
            description: Set(request.description),
            quantity: Set(request.initial_quantity),
            minimum_stock: Set(request.minimum_stock),
            unit: Set(request.unit),
            unit_price: Set(request.unit_price),
            unit_weight_kg: Set(request.unit_weight_kg),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        if request.initial_quantity != 0 {
            stock_movement::ActiveModel {
                id: Set(Uuid::new_v4()),
                stock_item_id: Set(model.id),
                order_id: Set(None),
                quantity_change: Set(request.initial_quantity),
                movement_type: Set(MovementType::ManualIncrease.to_string()),
                notes: Set(Some("Initial stock".to_string())),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!(stock_item_id = %model.id, sku = %request.sku, "Stock item created");
        Ok(model.into())
    }

    pub async fn get_stock_item(
        &self,
        stock_item_id: Uuid,
    ) -> Result<StockItemResponse, ServiceError> {
        let item = self.find_item(stock_item_id).await?;
        Ok(item.into())
    }

    #[instrument(skip(self))]
    pub async fn list_stock_items(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<StockItemListResponse, ServiceError> {
        let paginator = StockItemEntity::find()
            .order_by_asc(stock_item::Column::Sku)
            .paginate(&*self.db_pool, per_page.max(1));
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(StockItemListResponse {
            items: items.into_iter().map(StockItemResponse::from).collect(),
            total,
            page,
            per_page,
        })
    }

    /// Items at or below their reorder threshold.
    pub async fn list_low_stock(&self) -> Result<Vec<StockItemResponse>, ServiceError> {
        let items = StockItemEntity::find()
            .filter(Expr::col(stock_item::Column::Quantity).lt(Expr::col(stock_item::Column::MinimumStock)))
            .order_by_asc(stock_item::Column::Sku)
            .all(&*self.db_pool)
            .await?;
        Ok(items.into_iter().map(StockItemResponse::from).collect())
    }

    /// Applies a manual stock adjustment and appends the matching
    /// ledger entry. Adjustments that would drive the quantity negative
    /// are rejected.
    #[instrument(skip(self, request), fields(stock_item_id = %stock_item_id, quantity_change = request.quantity_change))]
    pub async fn adjust_stock(
        &self,
        stock_item_id: Uuid,
        request: AdjustStockRequest,
    ) -> Result<StockItemResponse, ServiceError> {
        request.validate()?;
        if request.quantity_change == 0 {
            return Err(ServiceError::ValidationError(
                "Quantity change must be non-zero".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let item = self.find_item(stock_item_id).await?;

        let movement_type = if request.quantity_change > 0 {
            MovementType::ManualIncrease
        } else {
            MovementType::ManualDecrease
        };

        let now = Utc::now();
        let txn = db.begin().await?;

        // Conditional write keeps the projection non-negative under
        // concurrent adjustments
        let mut update = StockItemEntity::update_many()
            .col_expr(
                stock_item::Column::Quantity,
                Expr::col(stock_item::Column::Quantity).add(request.quantity_change),
            )
            .col_expr(stock_item::Column::UpdatedAt, Expr::value(now))
            .filter(stock_item::Column::Id.eq(stock_item_id));
        if request.quantity_change < 0 {
            update = update.filter(stock_item::Column::Quantity.gte(-request.quantity_change));
        }
        let result = update.exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::ValidationError(format!(
                "Adjustment of {} would make stock for {} negative (available: {})",
                request.quantity_change, item.name, item.quantity
            )));
        }

        stock_movement::ActiveModel {
            id: Set(Uuid::new_v4()),
            stock_item_id: Set(stock_item_id),
            order_id: Set(None),
            quantity_change: Set(request.quantity_change),
            movement_type: Set(movement_type.to_string()),
            notes: Set(request.notes),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            stock_item_id = %stock_item_id,
            quantity_change = request.quantity_change,
            "Stock adjusted"
        );
        if let Err(e) = self
            .event_sender
            .send(Event::StockAdjusted {
                stock_item_id,
                quantity_change: request.quantity_change,
                movement_type: movement_type.to_string(),
            })
            .await
        {
            warn!(error = %e, stock_item_id = %stock_item_id, "Failed to send stock adjusted event");
        }

        self.get_stock_item(stock_item_id).await
    }

    /// Returns an item's movement ledger, newest first.
    pub async fn list_movements(
        &self,
        stock_item_id: Uuid,
    ) -> Result<Vec<StockMovementResponse>, ServiceError> {
        self.find_item(stock_item_id).await?;
        let movements = StockMovementEntity::find()
            .filter(stock_movement::Column::StockItemId.eq(stock_item_id))
            .order_by_desc(stock_movement::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?;
        Ok(movements
            .into_iter()
            .map(StockMovementResponse::from)
            .collect())
    }

    async fn find_item(&self, stock_item_id: Uuid) -> Result<StockItemModel, ServiceError> {
        StockItemEntity::find_by_id(stock_item_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Stock item {} not found", stock_item_id))
            })
    }
}
