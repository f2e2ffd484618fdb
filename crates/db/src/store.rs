//! Validated writes for the reference entities: sites, services, positions
//! and users.
//!
//! Validation runs before the insert; the repositories apply the derived
//! fields (email normalization, position color).

use sedes_core::catalog::validate_required_text;
use sedes_core::error::CoreError;
use sedes_core::position::validate_position;
use sedes_core::types::DbId;
use sedes_core::user::validate_new_user;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::position::{CreatePosition, Position};
use crate::models::service::{CreateService, Service};
use crate::models::site::{CreateSite, Site};
use crate::models::user::{CreateUser, User};
use crate::repositories::{PositionRepo, ServiceRepo, SiteRepo, UserRepo};

const MAX_SITE_NAME_LEN: usize = 100;

pub async fn create_site(pool: &PgPool, input: &CreateSite) -> Result<Site, StoreError> {
    validate_required_text("name", &input.name, MAX_SITE_NAME_LEN)?;
    Ok(SiteRepo::create(pool, input).await?)
}

/// Create a service and link it to the given sites. Either all rows are
/// written or none.
pub async fn create_service(
    pool: &PgPool,
    input: &CreateService,
    site_ids: &[DbId],
) -> Result<Service, StoreError> {
    validate_required_text("name", &input.name, MAX_SITE_NAME_LEN)?;
    Ok(ServiceRepo::create(pool, input, site_ids).await?)
}

pub async fn create_position(
    pool: &PgPool,
    input: &CreatePosition,
) -> Result<Position, StoreError> {
    validate_position(
        &input.name,
        &input.floor,
        input.status.as_deref(),
        input.grid_row,
        input.grid_column.as_deref(),
    )?;
    if SiteRepo::find_by_id(pool, input.site_id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "Site",
            id: input.site_id,
        }
        .into());
    }
    Ok(PositionRepo::create(pool, input).await?)
}

/// Create a user and link them to the given sites. Either all rows are
/// written or none.
pub async fn create_user(
    pool: &PgPool,
    input: &CreateUser,
    site_ids: &[DbId],
) -> Result<User, StoreError> {
    validate_new_user(
        &input.username,
        &input.email,
        input.phone.as_deref(),
        input.role.as_deref(),
    )?;
    let user = UserRepo::create(pool, input, site_ids).await?;
    tracing::info!(user_id = user.id, role = %user.role, "User created");
    Ok(user)
}
