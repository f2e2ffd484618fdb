//! The device write use cases and their audit trail.
//!
//! A device update runs in this order:
//!
//! 1. read the prior row (snapshot for the change detector);
//! 2. read the current position by a separate lookup;
//! 3. validate and write the device;
//! 4. plan the audit records with [`on_device_updated`];
//! 5. persist the plan.
//!
//! Steps 4 and 5 are best-effort: once the device row is written, audit
//! failures are logged and never reach the caller. A failed responsible-party
//! lookup only drops the movement; the field history is still written. Nothing locks the device
//! between steps 2 and 5, so two concurrent updates can both record a
//! movement.

use sedes_core::catalog::{
    validate_device_choices, validate_device_identity, validate_required_text, MAX_ASSET_TAG_LEN,
    MAX_MODEL_LEN,
};
use sedes_core::error::CoreError;
use sedes_core::history::HistoryKind;
use sedes_core::movement::PositionRef;
use sedes_core::tracking::{
    on_device_created, on_device_updated, plan_manual_movement, AuditPlan, DeviceUpdate,
    ManualMovement, TrackingPolicy,
};
use sedes_core::types::DbId;
use serde::Deserialize;
use sqlx::PgPool;

use crate::directory::PgRoleDirectory;
use crate::error::StoreError;
use crate::models::device::{CreateDevice, Device, UpdateDevice};
use crate::models::history::CreateHistoryEntry;
use crate::models::movement::{CreateMovement, Movement};
use crate::repositories::{
    DeviceRepo, HistoryRepo, MovementRepo, PositionRepo, ServiceRepo, SiteRepo, UserRepo,
};

/// Input for a caller-initiated movement.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordMovement {
    pub device_id: DbId,
    pub responsible_id: Option<DbId>,
    pub origin: String,
    pub destination: String,
    pub observation: Option<String>,
}

/// Device writes bound to a pool and a tracking policy.
#[derive(Debug, Clone, Copy)]
pub struct DeviceTracker<'a> {
    pool: &'a PgPool,
    policy: &'a TrackingPolicy,
}

impl<'a> DeviceTracker<'a> {
    pub fn new(pool: &'a PgPool, policy: &'a TrackingPolicy) -> Self {
        Self { pool, policy }
    }

    /// Catalogue a new device. Creation is not audited.
    pub async fn create(&self, input: &CreateDevice) -> Result<Device, StoreError> {
        validate_device_identity(&input.serial, &input.model)?;
        validate_device_choices(&input.choices())?;
        if let Some(tag) = &input.asset_tag {
            validate_required_text("asset_tag", tag, MAX_ASSET_TAG_LEN)?;
        }
        self.check_references(
            input.position_id,
            input.assigned_user_id,
            input.site_id,
            input.service_id,
        )
        .await?;

        let device = DeviceRepo::create(self.pool, input).await?;
        self.persist(on_device_created()).await;

        tracing::info!(device_id = device.id, serial = %device.serial, "Device created");
        Ok(device)
    }

    /// Apply a partial update and record the movement and field history it
    /// causes.
    pub async fn update(&self, id: DbId, input: &UpdateDevice) -> Result<Device, StoreError> {
        validate_device_choices(&input.choices())?;
        if let Some(model) = &input.model {
            validate_required_text("model", model, MAX_MODEL_LEN)?;
        }
        if let Some(tag) = &input.asset_tag {
            validate_required_text("asset_tag", tag, MAX_ASSET_TAG_LEN)?;
        }
        self.check_references(
            input.position_id,
            input.assigned_user_id,
            input.site_id,
            input.service_id,
        )
        .await?;

        let prior = match DeviceRepo::find_by_id(self.pool, id).await {
            Ok(row) => row.and_then(|device| serde_json::to_value(device).ok()),
            Err(e) => {
                tracing::warn!(device_id = id, error = %e, "Prior device state unavailable");
                None
            }
        };
        let previous_position = self.current_position(id).await?;

        let device = DeviceRepo::update(self.pool, id, input)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Device",
                id,
            })?;

        match self
            .plan_update(&device, prior.as_ref(), previous_position.as_ref(), input)
            .await
        {
            Ok(plan) => {
                if let Some(e) = &plan.movement_error {
                    tracing::error!(device_id = id, error = %e, "Failed to plan movement");
                }
                self.persist(plan).await;
            }
            Err(e) => {
                tracing::error!(device_id = id, error = %e, "Failed to plan device audit records");
            }
        }

        Ok(device)
    }

    /// Record a movement that is not driven by a position change.
    ///
    /// The movement row is the primary write and its failure is returned; the
    /// history entry that follows is best-effort.
    pub async fn record_movement(&self, input: &RecordMovement) -> Result<Movement, StoreError> {
        let device = DeviceRepo::find_by_id(self.pool, input.device_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Device",
                id: input.device_id,
            })?;
        let responsible = match input.responsible_id {
            Some(user_id) => Some(
                UserRepo::find_by_id(self.pool, user_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: "User",
                        id: user_id,
                    })?
                    .to_ref(),
            ),
            None => None,
        };

        let identity = device.identity();
        let (draft, entry) = plan_manual_movement(
            &ManualMovement {
                device: &identity,
                responsible,
                origin: &input.origin,
                destination: &input.destination,
                observation: input.observation.as_deref(),
            },
            self.policy,
        )?;

        let movement = MovementRepo::create(self.pool, &CreateMovement::from(&draft)).await?;
        tracing::info!(
            device_id = device.id,
            movement_id = movement.id,
            origin = %movement.origin,
            destination = %movement.destination,
            "Movement recorded",
        );
        self.persist_history(&CreateHistoryEntry::from(&entry)).await;

        Ok(movement)
    }

    // -- internals -----------------------------------------------------------

    async fn plan_update(
        &self,
        device: &Device,
        prior: Option<&serde_json::Value>,
        previous_position: Option<&PositionRef>,
        input: &UpdateDevice,
    ) -> Result<AuditPlan, StoreError> {
        let new_position = match device.position_id {
            Some(position_id) => {
                PositionRepo::find_by_id(self.pool, position_id)
                    .await?
                    .map(|p| p.to_ref())
            }
            None => None,
        };
        let current = serde_json::to_value(device)
            .map_err(|e| CoreError::Internal(format!("device snapshot failed: {e}")))?;
        let identity = device.identity();

        let update = DeviceUpdate {
            device: &identity,
            assigned_user_id: device.assigned_user_id,
            prior_snapshot: prior,
            current_snapshot: &current,
            previous_position,
            new_position: new_position.as_ref(),
            observation: input.observation.as_deref(),
        };
        let directory = PgRoleDirectory::new(self.pool);
        Ok(on_device_updated(&update, &directory, self.policy).await)
    }

    /// Fresh read of the device's position, independent of the prior snapshot.
    async fn current_position(&self, device_id: DbId) -> Result<Option<PositionRef>, StoreError> {
        let Some(Some(position_id)) = DeviceRepo::find_position_id(self.pool, device_id).await?
        else {
            return Ok(None);
        };
        Ok(PositionRepo::find_by_id(self.pool, position_id)
            .await?
            .map(|p| p.to_ref()))
    }

    /// Write a plan. Each row is attempted independently; a failed movement
    /// drops the history entry that describes it.
    async fn persist(&self, plan: AuditPlan) {
        let mut movement_written = true;

        if let Some(draft) = &plan.movement {
            match MovementRepo::create(self.pool, &CreateMovement::from(draft)).await {
                Ok(movement) => {
                    tracing::info!(
                        device_id = movement.device_id,
                        movement_id = movement.id,
                        origin = %movement.origin,
                        destination = %movement.destination,
                        "Movement recorded",
                    );
                }
                Err(e) => {
                    movement_written = false;
                    tracing::error!(
                        device_id = draft.device_id,
                        error = %e,
                        "Failed to record movement",
                    );
                }
            }
        }

        for entry in &plan.history {
            if entry.kind == HistoryKind::MovementRegistered && !movement_written {
                continue;
            }
            self.persist_history(&CreateHistoryEntry::from(entry)).await;
        }
    }

    async fn persist_history(&self, entry: &CreateHistoryEntry) {
        if let Err(e) = HistoryRepo::create(self.pool, entry).await {
            tracing::error!(
                device_id = entry.device_id,
                kind = %entry.kind,
                error = %e,
                "Failed to record history entry",
            );
        }
    }

    /// Reject references to rows that do not exist.
    async fn check_references(
        &self,
        position_id: Option<DbId>,
        user_id: Option<DbId>,
        site_id: Option<DbId>,
        service_id: Option<DbId>,
    ) -> Result<(), StoreError> {
        if let Some(id) = position_id {
            if PositionRepo::find_by_id(self.pool, id).await?.is_none() {
                return Err(missing("position", id));
            }
        }
        if let Some(id) = user_id {
            if UserRepo::find_by_id(self.pool, id).await?.is_none() {
                return Err(missing("assigned user", id));
            }
        }
        if let Some(id) = site_id {
            if SiteRepo::find_by_id(self.pool, id).await?.is_none() {
                return Err(missing("site", id));
            }
        }
        if let Some(id) = service_id {
            if ServiceRepo::find_by_id(self.pool, id).await?.is_none() {
                return Err(missing("service", id));
            }
        }
        Ok(())
    }
}

fn missing(what: &str, id: DbId) -> StoreError {
    CoreError::Validation(format!("Unknown {what}: {id}")).into()
}
