//! PostgreSQL-backed [`RoleDirectory`].

use sedes_core::directory::{RoleDirectory, UserRef};
use sedes_core::error::CoreError;
use sedes_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;
use crate::repositories::UserRepo;

/// Resolves responsible parties against the `users` and `user_sites` tables.
#[derive(Debug, Clone, Copy)]
pub struct PgRoleDirectory<'a> {
    pool: &'a PgPool,
}

impl<'a> PgRoleDirectory<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

fn to_ref(result: Result<Option<User>, sqlx::Error>) -> Result<Option<UserRef>, CoreError> {
    result
        .map(|user| user.as_ref().map(User::to_ref))
        .map_err(|e| CoreError::Internal(format!("user lookup failed: {e}")))
}

impl RoleDirectory for PgRoleDirectory<'_> {
    async fn find_user(&self, user_id: DbId) -> Result<Option<UserRef>, CoreError> {
        to_ref(UserRepo::find_by_id(self.pool, user_id).await)
    }

    async fn first_user_for_site(&self, site_id: DbId) -> Result<Option<UserRef>, CoreError> {
        to_ref(UserRepo::first_for_site(self.pool, site_id).await)
    }

    async fn first_user_with_role(&self, role: &str) -> Result<Option<UserRef>, CoreError> {
        to_ref(UserRepo::first_with_role(self.pool, role).await)
    }
}
