use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, Response},
    Router,
};
use chrono::{NaiveDate, Utc};
use labkit_api::{
    config::AppConfig,
    db,
    entities::{contract_config, kit, kit_item, lab, site, stock_item},
    events::{self, EventSender},
    services::AppServices,
    AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;

/// Test harness backed by a fresh on-disk SQLite database per test.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
    _db_dir: TempDir,
}

impl TestApp {
    /// Constructs a new test application with a migrated, empty schema.
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("temp dir for test database");
        let db_path = db_dir.path().join("labkit_test.db");
        let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let mut cfg = AppConfig::new(
            database_url,
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool).await.expect("migrations");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), event_sender.clone());
        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };
        let router = labkit_api::app_router(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
            _db_dir: db_dir,
        }
    }

    /// Sends a request with an optional JSON body and returns the raw
    /// response.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                builder
                    .body(Body::from(serde_json::to_vec(&json).expect("json body")))
                    .expect("request")
            }
            None => builder.body(Body::empty()).expect("request"),
        };
        self.router.clone().oneshot(request).await.expect("response")
    }

    pub async fn seed_site(&self, name: &str, is_eu: bool) -> site::Model {
        let now = Utc::now();
        site::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            address_line1: Set("Main Street 1".to_string()),
            address_line2: Set(None),
            city: Set("Brussels".to_string()),
            postal_code: Set("1000".to_string()),
            country: Set("Belgium".to_string()),
            delivery_address: Set(None),
            is_eu: Set(is_eu),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed site")
    }

    pub async fn seed_lab(&self, name: &str, is_eu: bool) -> lab::Model {
        let now = Utc::now();
        lab::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            address_line1: Set("Science Park 42".to_string()),
            address_line2: Set(None),
            city: Set("Leiden".to_string()),
            postal_code: Set("2333 CC".to_string()),
            country: Set("Netherlands".to_string()),
            is_eu: Set(is_eu),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed lab")
    }

    pub async fn seed_stock_item(
        &self,
        sku: &str,
        name: &str,
        quantity: i32,
        unit_weight_kg: Option<Decimal>,
    ) -> stock_item::Model {
        let now = Utc::now();
        stock_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            sku: Set(sku.to_string()),
            name: Set(name.to_string()),
            description: Set(None),
            quantity: Set(quantity),
            minimum_stock: Set(0),
            unit: Set("pcs".to_string()),
            unit_price: Set(None),
            unit_weight_kg: Set(unit_weight_kg),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed stock item")
    }

    /// Seeds a kit whose bill of materials references the given stock
    /// items with per-kit quantities.
    pub async fn seed_kit(&self, code: &str, lines: &[(Uuid, i32)]) -> kit::Model {
        let now = Utc::now();
        let kit = kit::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code.to_string()),
            name: Set(format!("Kit {}", code)),
            description: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed kit");

        for (index, (stock_item_id, quantity)) in lines.iter().enumerate() {
            kit_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                kit_id: Set(kit.id),
                stock_item_id: Set(*stock_item_id),
                quantity: Set(*quantity),
                sort_order: Set(index as i32),
            }
            .insert(&*self.state.db)
            .await
            .expect("seed kit item");
        }

        kit
    }

    pub async fn seed_contract_config(&self) -> contract_config::Model {
        let now = Utc::now();
        contract_config::ActiveModel {
            id: Set(Uuid::new_v4()),
            contracting_authority_name: Set("European Health Agency".to_string()),
            contractor_name: Set("Acme Sampling BV".to_string()),
            contract_number: Set("SC-2026-014".to_string()),
            contract_date: Set(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed contract config")
    }
}

/// Parses a response body as JSON.
pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

/// Reads a response body as raw bytes.
pub async fn response_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes")
        .to_vec()
}
