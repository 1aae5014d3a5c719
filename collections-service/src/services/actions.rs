//! Free-form client action log.

use chrono::Utc;
use collections_core::error::AppError;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::models::{ActionLogEntry, ActionLogType, NewActionLogEntry};
use crate::store::RecordStore;

pub struct ActionLogService {
    store: Arc<dyn RecordStore>,
}

impl ActionLogService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Appends a contact note to the client's history. REACTIVATION entries
    /// are reserved for the lifecycle state machine, which is the sole
    /// writer of activity state.
    #[instrument(skip(self, input), fields(client_id = %input.client_id))]
    pub async fn append(&self, input: NewActionLogEntry) -> Result<ActionLogEntry, AppError> {
        input.validate()?;
        let action_type: ActionLogType = input.action_type.parse()?;
        if action_type == ActionLogType::Reactivation {
            return Err(AppError::Validation(
                "REACTIVATION entries are written by the reactivate operation".into(),
            ));
        }

        self.store
            .get_client(input.client_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("client not found: {}", input.client_id))
            })?;

        let entry = ActionLogEntry {
            entry_id: Uuid::new_v4(),
            client_id: input.client_id,
            action_type,
            description: input.description,
            user_id: input.actor_id,
            created_utc: Utc::now(),
        };
        self.store.insert_action_log(entry).await
    }

    /// All entries for a client, most recent first.
    #[instrument(skip(self))]
    pub async fn list(&self, client_id: Uuid) -> Result<Vec<ActionLogEntry>, AppError> {
        let mut entries = self.store.list_action_logs(client_id).await?;
        entries.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
        Ok(entries)
    }
}
