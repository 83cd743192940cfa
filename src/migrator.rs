use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_sites_table::Migration),
            Box::new(m20260101_000002_create_labs_table::Migration),
            Box::new(m20260101_000003_create_stock_items_table::Migration),
            Box::new(m20260101_000004_create_kits_tables::Migration),
            Box::new(m20260101_000005_create_orders_table::Migration),
            Box::new(m20260101_000006_create_stock_movements_table::Migration),
            Box::new(m20260101_000007_create_order_boxes_table::Migration),
            Box::new(m20260101_000008_create_box_documents_table::Migration),
            Box::new(m20260101_000009_create_shipments_table::Migration),
            Box::new(m20260101_000010_create_contract_configs_table::Migration),
        ]
    }
}

// Migration implementations

mod m20260101_000001_create_sites_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000001_create_sites_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sites::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Sites::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Sites::Name).string().not_null())
                        .col(ColumnDef::new(Sites::AddressLine1).string().not_null())
                        .col(ColumnDef::new(Sites::AddressLine2).string().null())
                        .col(ColumnDef::new(Sites::City).string().not_null())
                        .col(ColumnDef::new(Sites::PostalCode).string().not_null())
                        .col(ColumnDef::new(Sites::Country).string().not_null())
                        .col(ColumnDef::new(Sites::DeliveryAddress).string().null())
                        .col(
                            ColumnDef::new(Sites::IsEu)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Sites::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Sites::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sites::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Sites {
        Table,
        Id,
        Name,
        AddressLine1,
        AddressLine2,
        City,
        PostalCode,
        Country,
        DeliveryAddress,
        IsEu,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20260101_000002_create_labs_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000002_create_labs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Labs::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Labs::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Labs::Name).string().not_null())
                        .col(ColumnDef::new(Labs::AddressLine1).string().not_null())
                        .col(ColumnDef::new(Labs::AddressLine2).string().null())
                        .col(ColumnDef::new(Labs::City).string().not_null())
                        .col(ColumnDef::new(Labs::PostalCode).string().not_null())
                        .col(ColumnDef::new(Labs::Country).string().not_null())
                        .col(
                            ColumnDef::new(Labs::IsEu)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Labs::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Labs::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Labs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Labs {
        Table,
        Id,
        Name,
        AddressLine1,
        AddressLine2,
        City,
        PostalCode,
        Country,
        IsEu,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20260101_000003_create_stock_items_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000003_create_stock_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockItems::Sku).string().not_null())
                        .col(ColumnDef::new(StockItems::Name).string().not_null())
                        .col(ColumnDef::new(StockItems::Description).string().null())
                        .col(
                            ColumnDef::new(StockItems::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(StockItems::MinimumStock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(StockItems::Unit).string().not_null())
                        .col(ColumnDef::new(StockItems::UnitPrice).decimal().null())
                        .col(ColumnDef::new(StockItems::UnitWeightKg).decimal().null())
                        .col(ColumnDef::new(StockItems::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(StockItems::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            // SKU is the external identity of a stock item
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_items_sku")
                        .table(StockItems::Table)
                        .col(StockItems::Sku)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum StockItems {
        Table,
        Id,
        Sku,
        Name,
        Description,
        Quantity,
        MinimumStock,
        Unit,
        UnitPrice,
        UnitWeightKg,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20260101_000004_create_kits_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000004_create_kits_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Kits::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Kits::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Kits::Code).string().not_null())
                        .col(ColumnDef::new(Kits::Name).string().not_null())
                        .col(ColumnDef::new(Kits::Description).string().null())
                        .col(ColumnDef::new(Kits::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Kits::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_kits_code")
                        .table(Kits::Table)
                        .col(Kits::Code)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(KitItems::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(KitItems::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(KitItems::KitId).uuid().not_null())
                        .col(ColumnDef::new(KitItems::StockItemId).uuid().not_null())
                        .col(ColumnDef::new(KitItems::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(KitItems::SortOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_kit_items_kit_id")
                        .table(KitItems::Table)
                        .col(KitItems::KitId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(KitItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Kits::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Kits {
        Table,
        Id,
        Code,
        Name,
        Description,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum KitItems {
        Table,
        Id,
        KitId,
        StockItemId,
        Quantity,
        SortOrder,
    }
}

mod m20260101_000005_create_orders_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000005_create_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Orders::OrderNumber).string().not_null())
                        .col(ColumnDef::new(Orders::SiteId).uuid().not_null())
                        .col(ColumnDef::new(Orders::LabId).uuid().not_null())
                        .col(ColumnDef::new(Orders::KitId).uuid().not_null())
                        .col(ColumnDef::new(Orders::SiteContactId).uuid().null())
                        .col(ColumnDef::new(Orders::LabContactId).uuid().null())
                        .col(ColumnDef::new(Orders::Quantity).integer().not_null())
                        .col(ColumnDef::new(Orders::SamplingDate).date().not_null())
                        .col(ColumnDef::new(Orders::OutboundShipDate).date().not_null())
                        .col(ColumnDef::new(Orders::OutboundCarrier).string().null())
                        .col(ColumnDef::new(Orders::SampleCarrier).string().null())
                        .col(ColumnDef::new(Orders::Status).string().not_null())
                        .col(
                            ColumnDef::new(Orders::RequiresCustoms)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Orders::Notes).string().null())
                        .col(ColumnDef::new(Orders::ApprovedAt).timestamp().null())
                        .col(ColumnDef::new(Orders::ApprovedBy).string().null())
                        .col(ColumnDef::new(Orders::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Orders::UpdatedAt).timestamp().null())
                        .col(
                            ColumnDef::new(Orders::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .to_owned(),
                )
                .await?;

            // Uniqueness is the serialization point for daily sequence allocation
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_order_number")
                        .table(Orders::Table)
                        .col(Orders::OrderNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_status")
                        .table(Orders::Table)
                        .col(Orders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_site_id")
                        .table(Orders::Table)
                        .col(Orders::SiteId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_lab_id")
                        .table(Orders::Table)
                        .col(Orders::LabId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Orders {
        Table,
        Id,
        OrderNumber,
        SiteId,
        LabId,
        KitId,
        SiteContactId,
        LabContactId,
        Quantity,
        SamplingDate,
        OutboundShipDate,
        OutboundCarrier,
        SampleCarrier,
        Status,
        RequiresCustoms,
        Notes,
        ApprovedAt,
        ApprovedBy,
        CreatedAt,
        UpdatedAt,
        Version,
    }
}

mod m20260101_000006_create_stock_movements_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000006_create_stock_movements_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockMovements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockMovements::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::StockItemId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockMovements::OrderId).uuid().null())
                        .col(
                            ColumnDef::new(StockMovements::QuantityChange)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::MovementType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockMovements::Notes).string().null())
                        .col(
                            ColumnDef::new(StockMovements::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_movements_stock_item_id")
                        .table(StockMovements::Table)
                        .col(StockMovements::StockItemId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_movements_order_id")
                        .table(StockMovements::Table)
                        .col(StockMovements::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockMovements::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum StockMovements {
        Table,
        Id,
        StockItemId,
        OrderId,
        QuantityChange,
        MovementType,
        Notes,
        CreatedAt,
    }
}

mod m20260101_000007_create_order_boxes_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000007_create_order_boxes_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrderBoxes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderBoxes::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderBoxes::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderBoxes::BoxNumber).integer().not_null())
                        .col(ColumnDef::new(OrderBoxes::OutboundWaybill).string().null())
                        .col(ColumnDef::new(OrderBoxes::SampleWaybill).string().null())
                        .col(ColumnDef::new(OrderBoxes::BarcodeSequence).string().null())
                        .col(ColumnDef::new(OrderBoxes::BarcodeStart).string().null())
                        .col(ColumnDef::new(OrderBoxes::BarcodeEnd).string().null())
                        .col(ColumnDef::new(OrderBoxes::BarcodeCount).integer().null())
                        .col(
                            ColumnDef::new(OrderBoxes::OutboundLabelGenerated)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(OrderBoxes::OutboundLabelGeneratedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(OrderBoxes::SampleLabelGenerated)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(OrderBoxes::SampleLabelGeneratedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(ColumnDef::new(OrderBoxes::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            // Box numbers are dense within an order
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_boxes_order_id_box_number")
                        .table(OrderBoxes::Table)
                        .col(OrderBoxes::OrderId)
                        .col(OrderBoxes::BoxNumber)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderBoxes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum OrderBoxes {
        Table,
        Id,
        OrderId,
        BoxNumber,
        OutboundWaybill,
        SampleWaybill,
        BarcodeSequence,
        BarcodeStart,
        BarcodeEnd,
        BarcodeCount,
        OutboundLabelGenerated,
        OutboundLabelGeneratedAt,
        SampleLabelGenerated,
        SampleLabelGeneratedAt,
        CreatedAt,
    }
}

mod m20260101_000008_create_box_documents_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000008_create_box_documents_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(BoxDocuments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BoxDocuments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BoxDocuments::BoxId).uuid().not_null())
                        .col(
                            ColumnDef::new(BoxDocuments::DocumentType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BoxDocuments::FileName).string().not_null())
                        .col(
                            ColumnDef::new(BoxDocuments::StoragePath)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BoxDocuments::FileSize)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BoxDocuments::MimeType).string().not_null())
                        .col(
                            ColumnDef::new(BoxDocuments::GeneratedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_box_documents_box_id")
                        .table(BoxDocuments::Table)
                        .col(BoxDocuments::BoxId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BoxDocuments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum BoxDocuments {
        Table,
        Id,
        BoxId,
        DocumentType,
        FileName,
        StoragePath,
        FileSize,
        MimeType,
        GeneratedAt,
    }
}

mod m20260101_000009_create_shipments_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000009_create_shipments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Shipments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Shipments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Shipments::OrderId).uuid().not_null())
                        .col(ColumnDef::new(Shipments::Kind).string().not_null())
                        .col(ColumnDef::new(Shipments::Carrier).string().null())
                        .col(
                            ColumnDef::new(Shipments::ScheduledShipDate)
                                .date()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Shipments::Status).string().not_null())
                        .col(ColumnDef::new(Shipments::TrackingNumber).string().null())
                        .col(ColumnDef::new(Shipments::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Shipments::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_shipments_order_id")
                        .table(Shipments::Table)
                        .col(Shipments::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Shipments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Shipments {
        Table,
        Id,
        OrderId,
        Kind,
        Carrier,
        ScheduledShipDate,
        Status,
        TrackingNumber,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20260101_000010_create_contract_configs_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000010_create_contract_configs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ContractConfigs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ContractConfigs::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractConfigs::ContractingAuthorityName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractConfigs::ContractorName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractConfigs::ContractNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractConfigs::ContractDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractConfigs::IsActive)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(ContractConfigs::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ContractConfigs::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ContractConfigs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ContractConfigs {
        Table,
        Id,
        ContractingAuthorityName,
        ContractorName,
        ContractNumber,
        ContractDate,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}
