use crate::{
    db::DbPool,
    entities::box_document::{
        self, ActiveModel as DocumentActiveModel, DocumentType, Entity as DocumentEntity,
        Model as DocumentModel,
    },
    entities::contract_config::{
        self, ActiveModel as ContractActiveModel, Entity as ContractEntity,
        Model as ContractModel,
    },
    entities::kit_item::{self, Entity as KitItemEntity},
    entities::lab::Entity as LabEntity,
    entities::order::{Entity as OrderEntity, Model as OrderModel},
    entities::order_box::{self, Entity as BoxEntity, Model as BoxModel},
    entities::site::Entity as SiteEntity,
    entities::stock_item::Entity as StockItemEntity,
    errors::ServiceError,
    events::{Event, EventSender},
    pdf::{
        render_non_adr_declaration, render_outbound_content_label, render_sample_content_label,
        ContractInfo, GeneratedDocument, KitItemLine, LabelOptions, NonAdrDeclarationData,
        OutboundContentLabelData, SampleContentLabelData,
    },
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

const NO_CONTRACT_MESSAGE: &str =
    "No active contract configuration found. Please configure contract details in Settings.";

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateLabelRequest {
    pub label_type: DocumentType,
    #[serde(default)]
    pub options: Option<LabelOptionsRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelOptionsRequest {
    pub include_contract_info: Option<bool>,
    pub include_items_table: Option<bool>,
    pub include_barcode: Option<bool>,
    pub header_text: Option<String>,
}

impl LabelOptionsRequest {
    fn into_options(self) -> LabelOptions {
        let defaults = LabelOptions::default();
        LabelOptions {
            include_contract_info: self
                .include_contract_info
                .unwrap_or(defaults.include_contract_info),
            include_items_table: self
                .include_items_table
                .unwrap_or(defaults.include_items_table),
            include_barcode: self.include_barcode.unwrap_or(defaults.include_barcode),
            header_text: self.header_text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateDeclarationRequest {
    #[validate(length(min = 1, message = "Declarer name is required"))]
    pub declarer_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReplaceContractConfigRequest {
    #[validate(length(min = 1, message = "Contracting authority name is required"))]
    pub contracting_authority_name: String,
    #[validate(length(min = 1, message = "Contractor name is required"))]
    pub contractor_name: String,
    #[validate(length(min = 1, message = "Contract number is required"))]
    pub contract_number: String,
    pub contract_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LabelStatusResponse {
    pub box_id: Uuid,
    pub outbound_label_generated: bool,
    pub outbound_label_generated_at: Option<DateTime<Utc>>,
    pub sample_label_generated: bool,
    pub sample_label_generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoxDocumentResponse {
    pub id: Uuid,
    pub box_id: Uuid,
    pub document_type: String,
    pub file_name: String,
    pub storage_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub generated_at: DateTime<Utc>,
}

impl From<DocumentModel> for BoxDocumentResponse {
    fn from(model: DocumentModel) -> Self {
        Self {
            id: model.id,
            box_id: model.box_id,
            document_type: model.document_type,
            file_name: model.file_name,
            storage_path: model.storage_path,
            file_size: model.file_size,
            mime_type: model.mime_type,
            generated_at: model.generated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContractConfigResponse {
    pub id: Uuid,
    pub contracting_authority_name: String,
    pub contractor_name: String,
    pub contract_number: String,
    pub contract_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ContractModel> for ContractConfigResponse {
    fn from(model: ContractModel) -> Self {
        Self {
            id: model.id,
            contracting_authority_name: model.contracting_authority_name,
            contractor_name: model.contractor_name,
            contract_number: model.contract_number,
            contract_date: model.contract_date,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// A generated document together with its bookkeeping record id.
#[derive(Debug)]
pub struct StoredDocument {
    pub document_id: Uuid,
    pub document: GeneratedDocument,
}

/// Service producing PDF documents and maintaining their bookkeeping:
/// box content labels, the non-ADR declaration, and the contract
/// configuration they draw on.
#[derive(Clone)]
pub struct DocumentService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl DocumentService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Generates a content label for a box.
    ///
    /// Fails fast before rendering when the box does not exist, the kit
    /// has no items, or no contract configuration is active. Rendering
    /// itself is pure; afterwards the box's generated flag is set and a
    /// document record inserted. Regeneration is supported and simply
    /// appends a new record.
    #[instrument(skip(self, request), fields(box_id = %box_id, label_type = %request.label_type))]
    pub async fn generate_label(
        &self,
        box_id: Uuid,
        request: GenerateLabelRequest,
    ) -> Result<StoredDocument, ServiceError> {
        let label_type = request.label_type;
        if label_type == DocumentType::NonAdrDeclaration {
            return Err(ServiceError::ValidationError(
                "Declarations are generated per order, not per box".to_string(),
            ));
        }

        let db = &*self.db_pool;

        let order_box = self.find_box(box_id).await?;
        let order = OrderEntity::find_by_id(order_box.order_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Order {} not found", order_box.order_id))
            })?;

        let items = self.resolve_kit_lines(&order).await?;
        let contract = self.require_active_contract().await?;

        let total_boxes = BoxEntity::find()
            .filter(order_box::Column::OrderId.eq(order.id))
            .count(db)
            .await? as i32;

        let options = request
            .options
            .unwrap_or_default()
            .into_options();
        let issued_on = Utc::now().date_naive();

        let document = match label_type {
            DocumentType::OutboundContent => {
                let site = SiteEntity::find_by_id(order.site_id)
                    .one(db)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Site {} not found", order.site_id))
                    })?;
                let delivery_address = site
                    .delivery_address
                    .clone()
                    .unwrap_or_else(|| site.formatted_address());
                let data = OutboundContentLabelData {
                    contract: contract_info(&contract),
                    delivery_address,
                    expected_delivery_date: order.outbound_ship_date,
                    items,
                    order_number: order.order_number.clone(),
                    box_number: order_box.box_number,
                    total_boxes,
                    waybill_number: order_box.outbound_waybill.clone(),
                };
                render_outbound_content_label(&data, &options, issued_on)
            }
            DocumentType::SampleContent => {
                let lab = LabEntity::find_by_id(order.lab_id)
                    .one(db)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Lab {} not found", order.lab_id))
                    })?;
                let data = SampleContentLabelData {
                    contract: contract_info(&contract),
                    lab_name: lab.name.clone(),
                    lab_address: lab.formatted_address(),
                    sampling_date: order.sampling_date,
                    expected_arrival_date: order.sampling_date,
                    barcode_sequence: order_box.barcode_sequence.clone(),
                    barcode_count: order_box.barcode_count,
                    items,
                    order_number: order.order_number.clone(),
                    box_number: order_box.box_number,
                    total_boxes,
                    waybill_number: order_box.sample_waybill.clone(),
                };
                render_sample_content_label(&data, &options, issued_on)
            }
            DocumentType::NonAdrDeclaration => unreachable!(),
        };

        let document_id = self
            .record_generation(&order_box, label_type, &document)
            .await?;

        info!(
            box_id = %box_id,
            file_name = %document.file_name,
            "Label generated"
        );
        if let Err(e) = self
            .event_sender
            .send(Event::LabelGenerated {
                box_id,
                document_type: label_type.to_string(),
                file_name: document.file_name.clone(),
            })
            .await
        {
            warn!(error = %e, box_id = %box_id, "Failed to send label generated event");
        }

        Ok(StoredDocument {
            document_id,
            document,
        })
    }

    /// Generates the non-dangerous-goods declaration for an order's
    /// sample return leg: site as shipper, lab as consignee, weight from
    /// the kit's bill of materials.
    #[instrument(skip(self, request), fields(order_id = %order_id))]
    pub async fn generate_declaration(
        &self,
        order_id: Uuid,
        request: GenerateDeclarationRequest,
    ) -> Result<GeneratedDocument, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let order = OrderEntity::find_by_id(order_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;
        let site = SiteEntity::find_by_id(order.site_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Site {} not found", order.site_id)))?;
        let lab = LabEntity::find_by_id(order.lab_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Lab {} not found", order.lab_id)))?;

        let total_weight_kg = self.kit_weight(&order).await?;
        let box_count = BoxEntity::find()
            .filter(order_box::Column::OrderId.eq(order.id))
            .count(db)
            .await? as i32;

        let data = NonAdrDeclarationData {
            shipper_name: site.name.clone(),
            shipper_address: site.formatted_address(),
            consignee_name: lab.name.clone(),
            consignee_address: lab.formatted_address(),
            description: "Laboratory sample kits (non-hazardous)".to_string(),
            number_of_packages: box_count.max(1),
            total_weight_kg,
            declarer_name: request.declarer_name,
        };

        let document = render_non_adr_declaration(&data, Utc::now().date_naive());
        info!(order_id = %order_id, file_name = %document.file_name, "Declaration generated");
        Ok(document)
    }

    /// Generated flags and timestamps for a box.
    pub async fn label_status(&self, box_id: Uuid) -> Result<LabelStatusResponse, ServiceError> {
        let order_box = self.find_box(box_id).await?;
        Ok(LabelStatusResponse {
            box_id: order_box.id,
            outbound_label_generated: order_box.outbound_label_generated,
            outbound_label_generated_at: order_box.outbound_label_generated_at,
            sample_label_generated: order_box.sample_label_generated,
            sample_label_generated_at: order_box.sample_label_generated_at,
        })
    }

    /// A box's generated documents, newest first.
    pub async fn list_documents(
        &self,
        box_id: Uuid,
    ) -> Result<Vec<BoxDocumentResponse>, ServiceError> {
        self.find_box(box_id).await?;
        let documents = DocumentEntity::find()
            .filter(box_document::Column::BoxId.eq(box_id))
            .order_by_desc(box_document::Column::GeneratedAt)
            .all(&*self.db_pool)
            .await?;
        Ok(documents
            .into_iter()
            .map(BoxDocumentResponse::from)
            .collect())
    }

    pub async fn active_contract_config(
        &self,
    ) -> Result<ContractConfigResponse, ServiceError> {
        let contract = self.require_active_contract().await?;
        Ok(contract.into())
    }

    /// Installs a new active contract configuration, deactivating any
    /// predecessor.
    #[instrument(skip(self, request))]
    pub async fn replace_contract_config(
        &self,
        request: ReplaceContractConfigRequest,
    ) -> Result<ContractConfigResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();
        let txn = db.begin().await?;

        ContractEntity::update_many()
            .col_expr(
                contract_config::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(
                contract_config::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(contract_config::Column::IsActive.eq(true))
            .exec(&txn)
            .await?;

        let model = ContractActiveModel {
            id: Set(Uuid::new_v4()),
            contracting_authority_name: Set(request.contracting_authority_name),
            contractor_name: Set(request.contractor_name),
            contract_number: Set(request.contract_number),
            contract_date: Set(request.contract_date),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(contract_id = %model.id, "Contract configuration replaced");
        Ok(model.into())
    }

    async fn find_box(&self, box_id: Uuid) -> Result<BoxModel, ServiceError> {
        BoxEntity::find_by_id(box_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Box {} not found", box_id)))
    }

    async fn require_active_contract(&self) -> Result<ContractModel, ServiceError> {
        ContractEntity::find()
            .filter(contract_config::Column::IsActive.eq(true))
            .order_by_desc(contract_config::Column::CreatedAt)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::ConfigurationError(NO_CONTRACT_MESSAGE.to_string()))
    }

    /// Kit lines with stock item names and units resolved for the items
    /// table. Quantities are per kit; the order total only matters for
    /// stock allocation and the declaration weight.
    async fn resolve_kit_lines(
        &self,
        order: &OrderModel,
    ) -> Result<Vec<KitItemLine>, ServiceError> {
        let db = &*self.db_pool;
        let lines = KitItemEntity::find()
            .filter(kit_item::Column::KitId.eq(order.kit_id))
            .order_by_asc(kit_item::Column::SortOrder)
            .all(db)
            .await?;
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(format!(
                "Kit {} has no items",
                order.kit_id
            )));
        }

        let mut resolved = Vec::with_capacity(lines.len());
        for line in lines {
            let item = StockItemEntity::find_by_id(line.stock_item_id)
                .one(db)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Stock item {} not found", line.stock_item_id))
                })?;
            resolved.push(KitItemLine {
                name: item.name,
                quantity: line.quantity,
                unit: item.unit,
            });
        }
        Ok(resolved)
    }

    /// Total kit weight for the order, from per-item unit weights.
    /// Items without a configured weight contribute zero.
    async fn kit_weight(&self, order: &OrderModel) -> Result<Decimal, ServiceError> {
        let db = &*self.db_pool;
        let lines = KitItemEntity::find()
            .filter(kit_item::Column::KitId.eq(order.kit_id))
            .all(db)
            .await?;

        let mut total = Decimal::ZERO;
        for line in lines {
            let item = StockItemEntity::find_by_id(line.stock_item_id)
                .one(db)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Stock item {} not found", line.stock_item_id))
                })?;
            if let Some(weight) = item.unit_weight_kg {
                total += weight * Decimal::from(line.quantity) * Decimal::from(order.quantity);
            }
        }
        Ok(total)
    }

    /// Updates the box's generated flag and appends the document record.
    async fn record_generation(
        &self,
        order_box: &BoxModel,
        label_type: DocumentType,
        document: &GeneratedDocument,
    ) -> Result<Uuid, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();
        let txn = db.begin().await?;

        let mut active: order_box::ActiveModel = order_box.clone().into();
        match label_type {
            DocumentType::OutboundContent => {
                active.outbound_label_generated = Set(true);
                active.outbound_label_generated_at = Set(Some(now));
            }
            DocumentType::SampleContent => {
                active.sample_label_generated = Set(true);
                active.sample_label_generated_at = Set(Some(now));
            }
            DocumentType::NonAdrDeclaration => {}
        }
        active.update(&txn).await?;

        let record = DocumentActiveModel {
            id: Set(Uuid::new_v4()),
            box_id: Set(order_box.id),
            document_type: Set(label_type.to_string()),
            file_name: Set(document.file_name.clone()),
            storage_path: Set(format!("/documents/{}", document.file_name)),
            file_size: Set(document.file_size),
            mime_type: Set(document.mime_type.clone()),
            generated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(record.id)
    }
}

fn contract_info(contract: &ContractModel) -> ContractInfo {
    ContractInfo {
        contracting_authority_name: contract.contracting_authority_name.clone(),
        contractor_name: contract.contractor_name.clone(),
        contract_number: contract.contract_number.clone(),
        contract_date: contract.contract_date,
    }
}
