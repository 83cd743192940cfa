//! End-to-end tests for the order lifecycle: creation with derived
//! ship dates and sequence numbers, approval with stock allocation,
//! cancellation, and box administration.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{NaiveDate, Utc};
use common::{response_json, TestApp};
use labkit_api::entities::{order, shipment, stock_movement};
use labkit_api::order_number::{day_prefix, format_order_number};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde_json::json;
use uuid::Uuid;

struct Fixture {
    app: TestApp,
    site_id: String,
    lab_id: String,
    kit_id: String,
    stock_item_id: String,
}

/// One EU site, one EU lab, and a single-line kit requiring 5 units of
/// a stock item per kit.
async fn fixture(stock_quantity: i32) -> Fixture {
    let app = TestApp::new().await;
    let site = app.seed_site("Brussels Site", true).await;
    let lab = app.seed_lab("Central Analysis Lab", true).await;
    let item = app
        .seed_stock_item("TUBE-10", "Sample Tube 10ml", stock_quantity, None)
        .await;
    let kit = app.seed_kit("KIT-A", &[(item.id, 5)]).await;
    Fixture {
        app,
        site_id: site.id.to_string(),
        lab_id: lab.id.to_string(),
        kit_id: kit.id.to_string(),
        stock_item_id: item.id.to_string(),
    }
}

fn create_payload(fx: &Fixture, sampling_dates: &[&str]) -> serde_json::Value {
    json!({
        "site_id": fx.site_id,
        "lab_id": fx.lab_id,
        "kit_id": fx.kit_id,
        "quantity": 2,
        "sampling_dates": sampling_dates,
        "outbound_carrier": "DHL",
        "sample_carrier": "UPS",
    })
}

#[tokio::test]
async fn create_orders_one_per_sampling_date_with_sequential_numbers() {
    let fx = fixture(100).await;

    let response = fx
        .app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(create_payload(&fx, &["2026-10-21", "2026-10-28"])),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    let orders = body["data"].as_array().expect("orders array");
    assert_eq!(orders.len(), 2);

    // Wednesday sampling dates derive Wednesday outbound dates
    assert_eq!(orders[0]["sampling_date"], "2026-10-21");
    assert_eq!(orders[0]["outbound_ship_date"], "2026-10-07");
    assert_eq!(orders[1]["outbound_ship_date"], "2026-10-14");

    for order in orders {
        assert_eq!(order["status"], "DRAFT");
        assert_eq!(order["requires_customs"], false);
    }

    let first = orders[0]["order_number"].as_str().unwrap();
    let second = orders[1]["order_number"].as_str().unwrap();
    assert_ne!(first, second);
    assert!(first < second, "numbers must increase within the batch");
    assert!(first.starts_with("ORD-"));
}

#[tokio::test]
async fn saturday_raw_date_shifts_to_monday() {
    let fx = fixture(100).await;

    // 2026-10-31 is a Saturday; minus 14 days is Saturday 2026-10-17
    let response = fx
        .app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(create_payload(&fx, &["2026-10-31"])),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["data"][0]["outbound_ship_date"], "2026-10-19");
}

#[tokio::test]
async fn non_eu_lab_requires_customs() {
    let app = TestApp::new().await;
    let site = app.seed_site("Brussels Site", true).await;
    let lab = app.seed_lab("Zurich Lab", false).await;
    let item = app.seed_stock_item("TUBE-10", "Sample Tube 10ml", 10, None).await;
    let kit = app.seed_kit("KIT-A", &[(item.id, 1)]).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({
                "site_id": site.id,
                "lab_id": lab.id,
                "kit_id": kit.id,
                "quantity": 1,
                "sampling_dates": ["2026-10-21"],
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["data"][0]["requires_customs"], true);
}

/// Inserts an order row directly, bypassing number allocation.
async fn seed_raw_order(fx: &Fixture, order_number: &str) {
    let now = Utc::now();
    order::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_number: Set(order_number.to_string()),
        site_id: Set(Uuid::parse_str(&fx.site_id).unwrap()),
        lab_id: Set(Uuid::parse_str(&fx.lab_id).unwrap()),
        kit_id: Set(Uuid::parse_str(&fx.kit_id).unwrap()),
        site_contact_id: Set(None),
        lab_contact_id: Set(None),
        quantity: Set(1),
        sampling_date: Set(NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()),
        outbound_ship_date: Set(NaiveDate::from_ymd_opt(2026, 10, 7).unwrap()),
        outbound_carrier: Set(None),
        sample_carrier: Set(None),
        status: Set("DRAFT".to_string()),
        requires_customs: Set(false),
        notes: Set(None),
        approved_at: Set(None),
        approved_by: Set(None),
        created_at: Set(now),
        updated_at: Set(Some(now)),
        version: Set(1),
    }
    .insert(&*fx.app.state.db)
    .await
    .expect("seed order row");
}

#[tokio::test]
async fn exhausted_number_collisions_surface_as_conflict() {
    let fx = fixture(100).await;
    let today = Utc::now().date_naive();

    // A number that sorts above every digit sequence but does not parse
    // keeps the allocator re-deriving a sequence that is already taken,
    // so every creation attempt hits the unique index.
    seed_raw_order(&fx, &format_order_number(today, 1)).await;
    seed_raw_order(&fx, &format!("{}ZZZ", day_prefix(today))).await;

    let response = fx
        .app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(create_payload(&fx, &["2026-10-21"])),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("Order number"));
}

#[tokio::test]
async fn create_orders_rejects_unknown_site() {
    let fx = fixture(100).await;
    let mut payload = create_payload(&fx, &["2026-10-21"]);
    payload["site_id"] = json!("00000000-0000-0000-0000-000000000000");

    let response = fx
        .app
        .request(Method::POST, "/api/v1/orders", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn approval_deducts_stock_and_creates_outbound_shipment() {
    let fx = fixture(100).await;

    let response = fx
        .app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(create_payload(&fx, &["2026-10-21"])),
        )
        .await;
    let body = response_json(response).await;
    let order_id = body["data"][0]["id"].as_str().unwrap().to_string();

    let response = fx
        .app
        .request(
            Method::POST,
            &format!("/api/v1/orders/{}/approve", order_id),
            Some(json!({ "approved_by": "inspector" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["status"], "APPROVED");
    assert_eq!(body["data"]["approved_by"], "inspector");
    assert!(body["data"]["approved_at"].is_string());

    // Kit line of 5 times order quantity 2 deducts 10 units
    let response = fx
        .app
        .request(
            Method::GET,
            &format!("/api/v1/stock-items/{}", fx.stock_item_id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["quantity"], 90);

    let response = fx
        .app
        .request(
            Method::GET,
            &format!("/api/v1/stock-items/{}/movements", fx.stock_item_id),
            None,
        )
        .await;
    let body = response_json(response).await;
    let movements = body["data"].as_array().unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0]["movement_type"], "ORDER_ALLOCATION");
    assert_eq!(movements[0]["quantity_change"], -10);
    assert_eq!(movements[0]["order_id"].as_str().unwrap(), order_id);

    let shipments = shipment::Entity::find()
        .filter(shipment::Column::OrderId.eq(uuid::Uuid::parse_str(&order_id).unwrap()))
        .all(&*fx.app.state.db)
        .await
        .unwrap();
    assert_eq!(shipments.len(), 1);
    assert_eq!(shipments[0].kind, "OUTBOUND");
    assert_eq!(shipments[0].status, "PENDING");
    assert_eq!(shipments[0].carrier.as_deref(), Some("DHL"));
    assert_eq!(
        shipments[0].scheduled_ship_date.to_string(),
        "2026-10-07"
    );
}

#[tokio::test]
async fn approval_fails_atomically_on_insufficient_stock() {
    let fx = fixture(5).await;

    let response = fx
        .app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(create_payload(&fx, &["2026-10-21"])),
        )
        .await;
    let body = response_json(response).await;
    let order_id = body["data"][0]["id"].as_str().unwrap().to_string();

    let response = fx
        .app
        .request(
            Method::POST,
            &format!("/api/v1/orders/{}/approve", order_id),
            Some(json!({})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Sample Tube 10ml"));
    assert!(message.contains("Required: 10"));
    assert!(message.contains("Available: 5"));

    // Nothing was written: status, stock, and ledger are untouched
    let response = fx
        .app
        .request(Method::GET, &format!("/api/v1/orders/{}", order_id), None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["status"], "DRAFT");

    let response = fx
        .app
        .request(
            Method::GET,
            &format!("/api/v1/stock-items/{}", fx.stock_item_id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["quantity"], 5);

    let movements = stock_movement::Entity::find()
        .all(&*fx.app.state.db)
        .await
        .unwrap();
    assert!(movements.is_empty());
}

#[tokio::test]
async fn approving_twice_is_rejected() {
    let fx = fixture(100).await;

    let response = fx
        .app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(create_payload(&fx, &["2026-10-21"])),
        )
        .await;
    let body = response_json(response).await;
    let order_id = body["data"][0]["id"].as_str().unwrap().to_string();

    let approve_uri = format!("/api/v1/orders/{}/approve", order_id);
    let first = fx.app.request(Method::POST, &approve_uri, Some(json!({}))).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = fx.app.request(Method::POST, &approve_uri, Some(json!({}))).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    // Stock was only deducted once
    let response = fx
        .app
        .request(
            Method::GET,
            &format!("/api/v1/stock-items/{}", fx.stock_item_id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["quantity"], 90);
}

#[tokio::test]
async fn cancel_after_approval_keeps_stock_deducted() {
    let fx = fixture(100).await;

    let response = fx
        .app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(create_payload(&fx, &["2026-10-21"])),
        )
        .await;
    let body = response_json(response).await;
    let order_id = body["data"][0]["id"].as_str().unwrap().to_string();

    fx.app
        .request(
            Method::POST,
            &format!("/api/v1/orders/{}/approve", order_id),
            Some(json!({})),
        )
        .await;

    let response = fx
        .app
        .request(
            Method::POST,
            &format!("/api/v1/orders/{}/cancel", order_id),
            Some(json!({ "reason": "site closed" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["status"], "CANCELLED");

    let response = fx
        .app
        .request(
            Method::GET,
            &format!("/api/v1/stock-items/{}", fx.stock_item_id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["quantity"], 90);

    // Terminal: no further transitions
    let response = fx
        .app
        .request(
            Method::POST,
            &format!("/api/v1/orders/{}/cancel", order_id),
            Some(json!({})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn updating_sampling_date_recomputes_outbound_date() {
    let fx = fixture(100).await;

    let response = fx
        .app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(create_payload(&fx, &["2026-10-21"])),
        )
        .await;
    let body = response_json(response).await;
    let order_id = body["data"][0]["id"].as_str().unwrap().to_string();

    let response = fx
        .app
        .request(
            Method::PUT,
            &format!("/api/v1/orders/{}", order_id),
            Some(json!({ "sampling_date": "2026-10-31" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["sampling_date"], "2026-10-31");
    assert_eq!(body["data"]["outbound_ship_date"], "2026-10-19");

    // Editing is locked once approved
    fx.app
        .request(
            Method::POST,
            &format!("/api/v1/orders/{}/approve", order_id),
            Some(json!({})),
        )
        .await;
    let response = fx
        .app
        .request(
            Method::PUT,
            &format!("/api/v1/orders/{}", order_id),
            Some(json!({ "notes": "too late" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_transitions_follow_the_state_machine() {
    let fx = fixture(100).await;

    let response = fx
        .app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(create_payload(&fx, &["2026-10-21"])),
        )
        .await;
    let body = response_json(response).await;
    let order_id = body["data"][0]["id"].as_str().unwrap().to_string();
    let status_uri = format!("/api/v1/orders/{}/status", order_id);

    // Draft cannot jump straight to fulfilment
    let response = fx
        .app
        .request(
            Method::PUT,
            &status_uri,
            Some(json!({ "status": "SAMPLE_SHIPPED" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Approval must use the approve operation
    let response = fx
        .app
        .request(Method::PUT, &status_uri, Some(json!({ "status": "APPROVED" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    fx.app
        .request(
            Method::POST,
            &format!("/api/v1/orders/{}/approve", order_id),
            Some(json!({})),
        )
        .await;

    for next in ["OUTBOUND_SHIPPED", "SAMPLE_SHIPPED", "COMPLETED"] {
        let response = fx
            .app
            .request(Method::PUT, &status_uri, Some(json!({ "status": next })))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "transition to {}", next);
        let body = response_json(response).await;
        assert_eq!(body["data"]["status"], next);
    }
}

#[tokio::test]
async fn boxes_get_dense_numbers_and_default_waybills() {
    let fx = fixture(100).await;

    let response = fx
        .app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(create_payload(&fx, &["2026-10-21"])),
        )
        .await;
    let body = response_json(response).await;
    let order_id = body["data"][0]["id"].as_str().unwrap().to_string();
    let order_number = body["data"][0]["order_number"].as_str().unwrap().to_string();
    let boxes_uri = format!("/api/v1/orders/{}/boxes", order_id);

    let response = fx
        .app
        .request(Method::POST, &boxes_uri, Some(json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["data"]["box_number"], 1);
    assert_eq!(
        body["data"]["outbound_waybill"],
        format!("WB-OUT-{}-1", order_number)
    );
    assert_eq!(
        body["data"]["sample_waybill"],
        format!("WB-SAM-{}-1", order_number)
    );

    let response = fx
        .app
        .request(
            Method::POST,
            &boxes_uri,
            Some(json!({ "outbound_waybill": "CUSTOM-WB-7" })),
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["box_number"], 2);
    assert_eq!(body["data"]["outbound_waybill"], "CUSTOM-WB-7");

    let response = fx.app.request(Method::GET, &boxes_uri, None).await;
    let body = response_json(response).await;
    let boxes = body["data"].as_array().unwrap();
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0]["box_number"], 1);
    assert_eq!(boxes[1]["box_number"], 2);
}

#[tokio::test]
async fn order_can_be_fetched_by_number() {
    let fx = fixture(100).await;

    let response = fx
        .app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(create_payload(&fx, &["2026-10-21"])),
        )
        .await;
    let body = response_json(response).await;
    let order_number = body["data"][0]["order_number"].as_str().unwrap().to_string();

    let response = fx
        .app
        .request(
            Method::GET,
            &format!("/api/v1/orders/by-number/{}", order_number),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["order_number"], order_number);

    let response = fx
        .app
        .request(
            Method::GET,
            "/api/v1/orders/by-number/ORD-1999-0101-001",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
