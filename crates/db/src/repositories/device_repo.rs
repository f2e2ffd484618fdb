//! Repository for the `devices` table.
//!
//! `floor` and `analytic_code` are derived columns: every write copies them
//! from the assigned position and service inside the same statement.

use sedes_core::types::DbId;
use sqlx::PgPool;

use crate::models::device::{CreateDevice, Device, UpdateDevice};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, device_type, manufacturer, model, serial, asset_tag, state, company_name, regime, \
    disk_type, disk_capacity, ram_type, ram_capacity, operating_system, processor, \
    ownership, location_category, supplier, available, floor, analytic_code, \
    position_id, assigned_user_id, site_id, service_id, created_at, updated_at";

/// Provides create/read/update operations for devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Insert a new device, returning the created row.
    ///
    /// If `available` is `None`, defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateDevice) -> Result<Device, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices
                (device_type, manufacturer, model, serial, asset_tag, state, company_name,
                 regime, disk_type, disk_capacity, ram_type, ram_capacity, operating_system,
                 processor, ownership, location_category, supplier, available,
                 position_id, assigned_user_id, site_id, service_id, floor, analytic_code)
             VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                 COALESCE($18, TRUE), $19, $20, $21, $22,
                 (SELECT p.floor FROM positions p WHERE p.id = $19),
                 (SELECT s.analytic_code FROM services s WHERE s.id = $22))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(&input.device_type)
            .bind(&input.manufacturer)
            .bind(input.model.trim())
            .bind(input.serial.trim())
            .bind(&input.asset_tag)
            .bind(&input.state)
            .bind(&input.company_name)
            .bind(&input.regime)
            .bind(&input.disk_type)
            .bind(&input.disk_capacity)
            .bind(&input.ram_type)
            .bind(&input.ram_capacity)
            .bind(&input.operating_system)
            .bind(&input.processor)
            .bind(&input.ownership)
            .bind(&input.location_category)
            .bind(&input.supplier)
            .bind(input.available)
            .bind(input.position_id)
            .bind(input.assigned_user_id)
            .bind(input.site_id)
            .bind(input.service_id)
            .fetch_one(pool)
            .await
    }

    /// Find a device by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE id = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read only the device's current position reference.
    ///
    /// Outer `None`: no such device. Inner `None`: device has no position.
    pub async fn find_position_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Option<DbId>>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<DbId>>("SELECT position_id FROM devices WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a device. Only non-`None` fields in `input` are applied;
    /// `unassign_position` / `unassign_user` clear their references.
    ///
    /// The derived columns follow the resulting position and service. A device
    /// taken off its position keeps its last floor.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDevice,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!(
            "UPDATE devices SET
                device_type = COALESCE($2, device_type),
                manufacturer = COALESCE($3, manufacturer),
                model = COALESCE($4, model),
                asset_tag = COALESCE($5, asset_tag),
                state = COALESCE($6, state),
                company_name = COALESCE($7, company_name),
                regime = COALESCE($8, regime),
                disk_type = COALESCE($9, disk_type),
                disk_capacity = COALESCE($10, disk_capacity),
                ram_type = COALESCE($11, ram_type),
                ram_capacity = COALESCE($12, ram_capacity),
                operating_system = COALESCE($13, operating_system),
                processor = COALESCE($14, processor),
                ownership = COALESCE($15, ownership),
                location_category = COALESCE($16, location_category),
                supplier = COALESCE($17, supplier),
                available = COALESCE($18, available),
                position_id = CASE WHEN $23 THEN NULL ELSE COALESCE($19, devices.position_id) END,
                assigned_user_id =
                    CASE WHEN $24 THEN NULL ELSE COALESCE($20, devices.assigned_user_id) END,
                site_id = COALESCE($21, devices.site_id),
                service_id = COALESCE($22, devices.service_id),
                floor = COALESCE(
                    (SELECT p.floor FROM positions p
                     WHERE p.id = CASE WHEN $23 THEN NULL
                                       ELSE COALESCE($19, devices.position_id) END),
                    devices.floor),
                analytic_code = COALESCE(
                    (SELECT s.analytic_code FROM services s
                     WHERE s.id = COALESCE($22, devices.service_id)),
                    devices.analytic_code)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .bind(&input.device_type)
            .bind(&input.manufacturer)
            .bind(input.model.as_deref().map(str::trim))
            .bind(&input.asset_tag)
            .bind(&input.state)
            .bind(&input.company_name)
            .bind(&input.regime)
            .bind(&input.disk_type)
            .bind(&input.disk_capacity)
            .bind(&input.ram_type)
            .bind(&input.ram_capacity)
            .bind(&input.operating_system)
            .bind(&input.processor)
            .bind(&input.ownership)
            .bind(&input.location_category)
            .bind(&input.supplier)
            .bind(input.available)
            .bind(input.position_id)
            .bind(input.assigned_user_id)
            .bind(input.site_id)
            .bind(input.service_id)
            .bind(input.unassign_position.unwrap_or(false))
            .bind(input.unassign_user.unwrap_or(false))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a device. Its movements and history go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
