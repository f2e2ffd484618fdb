//! Integration tests for sites, services, positions and users.

use assert_matches::assert_matches;
use sedes_core::error::CoreError;
use sedes_core::position::DEFAULT_COLOR;
use sedes_db::error::StoreError;
use sedes_db::models::position::CreatePosition;
use sedes_db::models::service::CreateService;
use sedes_db::models::site::CreateSite;
use sedes_db::models::user::CreateUser;
use sedes_db::repositories::{DashboardRepo, ServiceRepo, UserRepo};
use sedes_db::store;
use sqlx::PgPool;

fn site(name: &str) -> CreateSite {
    CreateSite {
        name: name.to_string(),
        city: "Medellín".to_string(),
        address: "Carrera 43A # 1-50".to_string(),
    }
}

fn position(site_id: i64, service_id: Option<i64>) -> CreatePosition {
    CreatePosition {
        site_id,
        service_id,
        name: "C-07".to_string(),
        floor: "PISO3".to_string(),
        x: Some(120.0),
        y: Some(40.5),
        grid_row: Some(7),
        grid_column: Some("C".to_string()),
        description: None,
        status: None,
    }
}

fn user(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: email.to_string(),
        full_name: Some("Ana Pérez".to_string()),
        phone: Some("+573001234567".to_string()),
        document: None,
        role: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_position_color_follows_service(pool: PgPool) {
    let s = store::create_site(&pool, &site("Sede Centro")).await.unwrap();
    let service = store::create_service(
        &pool,
        &CreateService {
            name: "Soporte".to_string(),
            analytic_code: Some("530001".to_string()),
            color: None,
        },
        &[s.id],
    )
    .await
    .unwrap();
    assert_eq!(service.color, "#8B0000");

    let linked = store::create_position(&pool, &position(s.id, Some(service.id)))
        .await
        .unwrap();
    assert_eq!(linked.color, "#8B0000");
    assert_eq!(linked.status, "disponible");

    let plain = store::create_position(&pool, &position(s.id, None)).await.unwrap();
    assert_eq!(plain.color, DEFAULT_COLOR);

    let services = ServiceRepo::list_for_site(&pool, s.id).await.unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].id, service.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_position_grid_cell_is_validated(pool: PgPool) {
    let s = store::create_site(&pool, &site("Sede Centro")).await.unwrap();
    let mut input = position(s.id, None);
    input.grid_column = Some("7".to_string());

    let result = store::create_position(&pool, &input).await;
    assert_matches!(result, Err(StoreError::Core(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_position_requires_existing_site(pool: PgPool) {
    let result = store::create_position(&pool, &position(404, None)).await;
    assert_matches!(
        result,
        Err(StoreError::Core(CoreError::NotFound { entity: "Site", .. }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_email_is_normalized_and_unique(pool: PgPool) {
    let created = store::create_user(&pool, &user("aperez", "  Ana@Example.COM "), &[])
        .await
        .unwrap();
    assert_eq!(created.email, "ana@example.com");
    assert_eq!(created.role, "coordinador");
    assert_eq!(created.to_ref().display_name, "Ana Pérez");

    let duplicate = store::create_user(&pool, &user("ana2", "ana@example.com"), &[]).await;
    assert_matches!(duplicate, Err(StoreError::Database(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_site_user_is_lowest_id(pool: PgPool) {
    let s = store::create_site(&pool, &site("Sede Centro")).await.unwrap();
    let first = store::create_user(&pool, &user("first", "first@example.com"), &[s.id])
        .await
        .unwrap();
    store::create_user(&pool, &user("second", "second@example.com"), &[s.id])
        .await
        .unwrap();

    let found = UserRepo::first_for_site(&pool, s.id).await.unwrap().unwrap();
    assert_eq!(found.id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_summary_on_empty_inventory(pool: PgPool) {
    let summary = DashboardRepo::device_summary(&pool).await.unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.assigned, 0);
    assert_eq!(summary.unassigned, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_site_link_leaves_no_user(pool: PgPool) {
    let result = store::create_user(&pool, &user("aperez", "ana@example.com"), &[999]).await;
    assert_matches!(result, Err(StoreError::Database(_)));

    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 0);

    // Nothing was left behind, so the same username is still free.
    let s = store::create_site(&pool, &site("Sede Centro")).await.unwrap();
    store::create_user(&pool, &user("aperez", "ana@example.com"), &[s.id])
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_site_link_leaves_no_service(pool: PgPool) {
    let input = CreateService {
        name: "Soporte".to_string(),
        analytic_code: None,
        color: None,
    };
    let result = store::create_service(&pool, &input, &[999]).await;
    assert_matches!(result, Err(StoreError::Database(_)));

    let (services,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(services, 0);
}
