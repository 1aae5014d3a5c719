//! Client lifecycle state machine: Active <-> Inactive.
//!
//! The record store offers no multi-statement transactions, so each
//! transition performs its writes sequentially and compensates manually
//! when a secondary write fails. Historical sale, plan, installment, and
//! action-log records are never touched: deactivation is a visibility
//! flag, not an erasure.

use chrono::Utc;
use collections_core::error::AppError;
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{ActionLogEntry, ActionLogType, AuditLogEntry, ClientDeactivation, DeactivationReason};
use crate::store::{ActivityPatch, RecordStore};

pub struct LifecycleService {
    store: Arc<dyn RecordStore>,
}

impl LifecycleService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Deactivates an active client.
    ///
    /// Writes, in order: the client activity patch, the append-only
    /// deactivation record, and a best-effort audit entry. If the
    /// deactivation record fails, the activity patch is rolled back and
    /// the operation fails; an audit failure is logged and swallowed.
    #[instrument(skip(self, notes))]
    pub async fn deactivate(
        &self,
        client_id: Uuid,
        reason: &str,
        notes: Option<&str>,
        actor_id: Uuid,
    ) -> Result<(), AppError> {
        let reason: DeactivationReason = reason.parse()?;

        let client = self
            .store
            .get_client(client_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("client not found: {client_id}")))?;
        if !client.active {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "client is already inactive: {client_id}"
            )));
        }

        let now = Utc::now();

        self.store
            .update_client_activity(
                client_id,
                ActivityPatch {
                    active: false,
                    deactivation_reason: Some(reason),
                    deactivated_at: Some(now),
                    deactivated_by: Some(actor_id),
                },
            )
            .await?;

        let record = ClientDeactivation {
            deactivation_id: Uuid::new_v4(),
            client_id,
            reason,
            notes: notes.map(str::to_owned),
            deactivated_by: actor_id,
            deactivated_at: now,
        };
        if let Err(err) = self.store.insert_deactivation(record).await {
            self.rollback_activity(client_id, ActivityPatch { active: true, ..Default::default() })
                .await;
            return Err(AppError::PartialWrite {
                step: "deactivation record".into(),
                source: anyhow::Error::new(err),
            });
        }

        let audit = AuditLogEntry {
            entry_id: Uuid::new_v4(),
            timestamp: now,
            user_id: actor_id,
            operation: "DEACTIVATE_CLIENT".into(),
            entity_type: "client".into(),
            entity_id: client_id,
            old_values: json!({
                "active": true,
                "deactivation_reason": null,
                "deactivated_at": null,
                "deactivated_by": null,
            }),
            new_values: json!({
                "active": false,
                "deactivation_reason": reason.as_str(),
                "deactivated_at": now,
                "deactivated_by": actor_id,
                "notes": notes,
            }),
        };
        if let Err(err) = self.store.insert_audit_entry(audit).await {
            tracing::error!(%client_id, error = %err, "failed to write deactivation audit entry");
        }

        Ok(())
    }

    /// Reactivates an inactive client and appends a REACTIVATION action-log
    /// entry. If the action-log write fails, the activity flag is rolled
    /// back but the deactivation metadata (already cleared by the first
    /// write) is not restored — a known asymmetry with the deactivation
    /// rollback, kept to match observed behavior.
    #[instrument(skip(self, description))]
    pub async fn reactivate(
        &self,
        client_id: Uuid,
        description: &str,
        actor_id: Uuid,
    ) -> Result<(), AppError> {
        let client = self
            .store
            .get_client(client_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("client not found: {client_id}")))?;
        if client.active {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "client is already active: {client_id}"
            )));
        }

        let now = Utc::now();

        self.store
            .update_client_activity(client_id, ActivityPatch { active: true, ..Default::default() })
            .await?;

        let entry = ActionLogEntry {
            entry_id: Uuid::new_v4(),
            client_id,
            action_type: ActionLogType::Reactivation,
            description: description.to_string(),
            user_id: actor_id,
            created_utc: now,
        };
        if let Err(err) = self.store.insert_action_log(entry).await {
            self.rollback_activity(client_id, ActivityPatch { active: false, ..Default::default() })
                .await;
            return Err(AppError::PartialWrite {
                step: "reactivation action log".into(),
                source: anyhow::Error::new(err),
            });
        }

        Ok(())
    }

    /// Compensating write. Idempotent; its own failure is logged and
    /// swallowed so the original error reaches the caller.
    async fn rollback_activity(&self, client_id: Uuid, patch: ActivityPatch) {
        if let Err(err) = self.store.update_client_activity(client_id, patch).await {
            tracing::error!(%client_id, error = %err, "compensating activity write failed");
        }
    }
}
