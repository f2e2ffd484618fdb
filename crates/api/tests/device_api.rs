//! HTTP-level integration tests for devices, movements and the audit trail.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json};
use sedes_core::tracking::TrackingPolicy;
use sedes_db::models::position::{CreatePosition, Position};
use sedes_db::models::site::CreateSite;
use sedes_db::models::user::{CreateUser, User};
use sedes_db::store;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Two positions on one site.
async fn seed_positions(pool: &PgPool) -> (Position, Position) {
    let site = store::create_site(
        pool,
        &CreateSite {
            name: "Sede Norte".to_string(),
            city: "Bogotá".to_string(),
            address: "Calle 100 # 10-20".to_string(),
        },
    )
    .await
    .unwrap();

    let mut positions = Vec::new();
    for name in ["A-12", "B-03"] {
        let position = store::create_position(
            pool,
            &CreatePosition {
                site_id: site.id,
                service_id: None,
                name: name.to_string(),
                floor: "PISO2".to_string(),
                x: None,
                y: None,
                grid_row: None,
                grid_column: None,
                description: None,
                status: None,
            },
        )
        .await
        .unwrap();
        positions.push(position);
    }
    let b = positions.pop().unwrap();
    let a = positions.pop().unwrap();
    (a, b)
}

async fn seed_admin(pool: &PgPool) -> User {
    store::create_user(
        pool,
        &CreateUser {
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            full_name: Some("Administrador".to_string()),
            phone: None,
            document: None,
            role: Some("admin".to_string()),
        },
        &[],
    )
    .await
    .unwrap()
}

async fn create_device(pool: &PgPool, position_id: Option<i64>) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/devices",
        json!({
            "device_type": "COMPUTADOR",
            "manufacturer": "LENOVO",
            "model": "ThinkPad T14",
            "serial": "PF-3X9K2",
            "state": "BUENO",
            "position_id": position_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn list(pool: &PgPool, uri: &str) -> Vec<serde_json::Value> {
    let app = common::build_test_app(pool.clone());
    let response = get(app, uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_device_returns_201_without_audit(pool: PgPool) {
    let (a, _) = seed_positions(&pool).await;
    let id = create_device(&pool, Some(a.id)).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/devices/{id}")).await).await;
    assert_eq!(json["serial"], "PF-3X9K2");
    assert_eq!(json["floor"], "PISO2");

    assert!(list(&pool, &format!("/api/v1/devices/{id}/history")).await.is_empty());
    assert!(list(&pool, &format!("/api/v1/devices/{id}/movements")).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_device_with_bad_choice_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/devices",
        json!({
            "device_type": "IMPRESORA",
            "manufacturer": "HP",
            "model": "LaserJet",
            "serial": "LJ-1",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_serial_returns_409(pool: PgPool) {
    create_device(&pool, None).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/devices",
        json!({
            "device_type": "COMPUTADOR",
            "manufacturer": "LENOVO",
            "model": "ThinkPad T14",
            "serial": "PF-3X9K2",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_missing_device_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/devices/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_device_records_movement_and_history(pool: PgPool) {
    let (a, b) = seed_positions(&pool).await;
    let admin = seed_admin(&pool).await;
    let id = create_device(&pool, Some(a.id)).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/devices/{id}"),
        json!({"position_id": b.id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let movements = list(&pool, &format!("/api/v1/devices/{id}/movements")).await;
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0]["origin"], "A-12");
    assert_eq!(movements[0]["destination"], "B-03");
    assert_eq!(movements[0]["responsible_id"], admin.id);
    assert_eq!(
        movements[0]["observation"],
        "Dispositivo PF-3X9K2 (LENOVO ThinkPad T14) movido de A-12 a B-03 por Administrador."
    );

    let history = list(&pool, &format!("/api/v1/devices/{id}/history")).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["kind"], "movement_registered");
    assert_eq!(
        history[0]["description"],
        "El dispositivo PF-3X9K2 (LENOVO ThinkPad T14) fue movido de A-12 a B-03 por Administrador."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_state_change_records_diff(pool: PgPool) {
    let id = create_device(&pool, None).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/devices/{id}"),
        json!({"state": "PERDIDO"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["state"], "PERDIDO");

    assert!(list(&pool, &format!("/api/v1/devices/{id}/movements")).await.is_empty());

    let history = list(&pool, &format!("/api/v1/devices/{id}/history")).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["kind"], "field_modified");
    assert_eq!(
        history[0]["changes"],
        json!({"state": {"before": "BUENO", "after": "PERDIDO"}})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_device_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, "/api/v1/devices/999999", json!({"state": "MALO"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unassignment_can_be_disabled(pool: PgPool) {
    let (a, _) = seed_positions(&pool).await;
    let id = create_device(&pool, Some(a.id)).await;

    let mut config = common::test_config();
    config.tracking = TrackingPolicy {
        record_unassignment: false,
        ..TrackingPolicy::default()
    };
    let app = common::build_test_app_with(pool.clone(), config);
    let response = put_json(
        app,
        &format!("/api/v1/devices/{id}"),
        json!({"unassign_position": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(list(&pool, &format!("/api/v1/devices/{id}/movements")).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_pagination(pool: PgPool) {
    let id = create_device(&pool, None).await;
    for state in ["MALO", "REPARAR", "BUENO"] {
        let app = common::build_test_app(pool.clone());
        put_json(app, &format!("/api/v1/devices/{id}"), json!({"state": state})).await;
    }

    let all = list(&pool, &format!("/api/v1/devices/{id}/history")).await;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0]["changes"]["state"]["after"], "BUENO");

    let page = list(&pool, &format!("/api/v1/devices/{id}/history?limit=1&offset=1")).await;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["id"], all[1]["id"]);
}

// ---------------------------------------------------------------------------
// Movements
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_movement_returns_201(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let id = create_device(&pool, None).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/movements",
        json!({
            "device_id": id,
            "responsible_id": admin.id,
            "origin": "SEDE",
            "destination": "CASA",
            "observation": "Trabajo remoto",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["observation"], "Trabajo remoto");

    let history = list(&pool, &format!("/api/v1/devices/{id}/history")).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["user_id"], admin.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_movement_same_category_returns_400(pool: PgPool) {
    let id = create_device(&pool, None).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/movements",
        json!({"device_id": id, "origin": "CLIENTE", "destination": "CLIENTE"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_movement_for_missing_device_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/movements",
        json!({"device_id": 424242, "origin": "CASA", "destination": "SEDE"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_counts_assignment(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let id = create_device(&pool, None).await;

    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        &format!("/api/v1/devices/{id}"),
        json!({"assigned_user_id": admin.id}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/dashboard").await).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["assigned"], 1);
    assert_eq!(json["data"]["unassigned"], 0);
}
