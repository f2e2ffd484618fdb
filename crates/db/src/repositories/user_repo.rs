//! Repository for the `users` table and its `user_sites` links.

use sedes_core::roles::ROLE_COORDINATOR;
use sedes_core::types::DbId;
use sedes_core::user::normalize_email;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, username, email, full_name, phone, document, role, is_active, \
     created_at, updated_at";

/// Provides user lookups used by the responsible-party fallback chain.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user and link them to `site_ids` in one transaction. The
    /// email is stored normalized.
    ///
    /// Callers validate email, phone and role beforehand.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUser,
        site_ids: &[DbId],
    ) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (username, email, full_name, phone, document, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(input.username.trim())
            .bind(normalize_email(&input.email))
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.document)
            .bind(input.role.as_deref().unwrap_or(ROLE_COORDINATOR))
            .fetch_one(&mut *tx)
            .await?;

        Self::link_sites_inner(&mut tx, user.id, site_ids).await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lowest-id user linked to a site.
    pub async fn first_for_site(pool: &PgPool, site_id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE id IN (SELECT user_id FROM user_sites WHERE site_id = $1)
             ORDER BY id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(site_id)
            .fetch_optional(pool)
            .await
    }

    /// Lowest-id user holding a role.
    pub async fn first_with_role(pool: &PgPool, role: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE role = $1
             ORDER BY id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Link a user to sites. Linking twice is a no-op.
    async fn link_sites_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        site_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for &site_id in site_ids {
            sqlx::query(
                "INSERT INTO user_sites (user_id, site_id)
                 VALUES ($1, $2)
                 ON CONFLICT (user_id, site_id) DO NOTHING",
            )
            .bind(user_id)
            .bind(site_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
