//! Collection action tracking.

use chrono::Utc;
use collections_core::error::AppError;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CollectionAction, CollectionActionType, NewCollectionAction};
use crate::store::RecordStore;

pub struct CollectionService {
    store: Arc<dyn RecordStore>,
}

impl CollectionService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Records a new contact attempt. The client's name is denormalized
    /// into the action at creation time.
    #[instrument(skip(self, input), fields(client_id = %input.client_id))]
    pub async fn create(&self, input: NewCollectionAction) -> Result<CollectionAction, AppError> {
        input.validate()?;
        let action_type: CollectionActionType = input.action_type.parse()?;

        let client = self
            .store
            .get_client(input.client_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("client not found: {}", input.client_id))
            })?;

        let action = CollectionAction {
            action_id: Uuid::new_v4(),
            client_id: input.client_id,
            client_name: client.name,
            action_type,
            description: input.description,
            follow_up_date: input.follow_up_date,
            completed: false,
            completed_at: None,
            user_id: input.actor_id,
            created_utc: Utc::now(),
        };
        self.store.insert_collection_action(action).await
    }

    /// Marks an action completed now. Idempotent: completing an
    /// already-completed action refreshes its timestamp.
    #[instrument(skip(self))]
    pub async fn complete(&self, action_id: Uuid) -> Result<CollectionAction, AppError> {
        self.store
            .complete_collection_action(action_id, Utc::now())
            .await
    }

    /// All actions for a client, earliest follow-up first.
    #[instrument(skip(self))]
    pub async fn list(&self, client_id: Uuid) -> Result<Vec<CollectionAction>, AppError> {
        let mut actions = self.store.list_collection_actions(client_id).await?;
        actions.sort_by_key(|a| a.follow_up_date);
        Ok(actions)
    }
}
