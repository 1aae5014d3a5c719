//! In-memory record-store adapter.
//!
//! Backs the integration tests and embedders that run without a database.
//! Supports injecting one-shot write failures so the lifecycle machine's
//! compensation paths can be exercised.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use collections_core::error::AppError;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    ActionLogEntry, AuditLogEntry, Client, ClientDeactivation, ClientRating, CollectionAction,
    CreditPlan, Installment, Sale,
};
use crate::store::{ActivityPatch, ClientQuery, RecordStore};

/// Write operations that can be made to fail exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailurePoint {
    InsertDeactivation,
    InsertActionLog,
    InsertAuditEntry,
}

#[derive(Default)]
struct Tables {
    clients: HashMap<Uuid, Client>,
    sales: Vec<Sale>,
    credit_plans: Vec<CreditPlan>,
    installments: Vec<Installment>,
    deactivations: Vec<ClientDeactivation>,
    action_logs: Vec<ActionLogEntry>,
    collection_actions: HashMap<Uuid, CollectionAction>,
    ratings: HashMap<Uuid, ClientRating>,
    audit_log: Vec<AuditLogEntry>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    failures: Mutex<HashSet<FailurePoint>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a one-shot failure for the given write operation.
    pub fn fail_once(&self, point: FailurePoint) {
        self.failures
            .lock()
            .expect("failure set poisoned")
            .insert(point);
    }

    fn trip(&self, point: FailurePoint) -> Result<(), AppError> {
        let tripped = self
            .failures
            .lock()
            .expect("failure set poisoned")
            .remove(&point);
        if tripped {
            Err(AppError::Storage(anyhow::anyhow!(
                "injected failure at {:?}",
                point
            )))
        } else {
            Ok(())
        }
    }

    // Seeding helpers. Sale, plan, and installment records accumulate in
    // external flows; the engine itself never writes them.

    pub async fn seed_client(&self, client: Client) {
        self.tables
            .write()
            .await
            .clients
            .insert(client.client_id, client);
    }

    pub async fn seed_sale(&self, sale: Sale) {
        self.tables.write().await.sales.push(sale);
    }

    pub async fn seed_credit_plan(&self, plan: CreditPlan) {
        self.tables.write().await.credit_plans.push(plan);
    }

    pub async fn seed_installment(&self, installment: Installment) {
        self.tables.write().await.installments.push(installment);
    }

    // Snapshot accessors for assertions.

    pub async fn deactivations(&self) -> Vec<ClientDeactivation> {
        self.tables.read().await.deactivations.clone()
    }

    pub async fn audit_entries(&self) -> Vec<AuditLogEntry> {
        self.tables.read().await.audit_log.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get_client(&self, client_id: Uuid) -> Result<Option<Client>, AppError> {
        Ok(self.tables.read().await.clients.get(&client_id).cloned())
    }

    async fn list_clients(&self, query: ClientQuery) -> Result<Vec<Client>, AppError> {
        let tables = self.tables.read().await;
        let clients = tables
            .clients
            .values()
            .filter(|c| query.active.map(|a| c.active == a).unwrap_or(true))
            .filter(|c| match &query.deactivation_reasons {
                Some(reasons) => c
                    .deactivation_reason
                    .map(|r| reasons.contains(&r))
                    .unwrap_or(false),
                None => true,
            })
            .filter(|c| match &query.ratings {
                Some(ratings) => c.rating.map(|r| ratings.contains(&r)).unwrap_or(false),
                None => true,
            })
            .cloned()
            .collect();
        Ok(clients)
    }

    async fn update_client_activity(
        &self,
        client_id: Uuid,
        patch: ActivityPatch,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let client = tables
            .clients
            .get_mut(&client_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("client not found: {client_id}")))?;
        client.active = patch.active;
        client.deactivation_reason = patch.deactivation_reason;
        client.deactivated_at = patch.deactivated_at;
        client.deactivated_by = patch.deactivated_by;
        Ok(())
    }

    async fn list_sales(&self, client_id: Uuid) -> Result<Vec<Sale>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .sales
            .iter()
            .filter(|s| s.client_id == client_id && !s.voided)
            .cloned()
            .collect())
    }

    async fn list_credit_plans(&self, client_ids: &[Uuid]) -> Result<Vec<CreditPlan>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .credit_plans
            .iter()
            .filter(|p| client_ids.contains(&p.client_id))
            .cloned()
            .collect())
    }

    async fn list_installments(&self, plan_ids: &[Uuid]) -> Result<Vec<Installment>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .installments
            .iter()
            .filter(|i| plan_ids.contains(&i.plan_id))
            .cloned()
            .collect())
    }

    async fn insert_deactivation(&self, record: ClientDeactivation) -> Result<(), AppError> {
        self.trip(FailurePoint::InsertDeactivation)?;
        self.tables.write().await.deactivations.push(record);
        Ok(())
    }

    async fn insert_action_log(&self, entry: ActionLogEntry) -> Result<ActionLogEntry, AppError> {
        self.trip(FailurePoint::InsertActionLog)?;
        self.tables.write().await.action_logs.push(entry.clone());
        Ok(entry)
    }

    async fn list_action_logs(&self, client_id: Uuid) -> Result<Vec<ActionLogEntry>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .action_logs
            .iter()
            .filter(|e| e.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn insert_collection_action(
        &self,
        action: CollectionAction,
    ) -> Result<CollectionAction, AppError> {
        self.tables
            .write()
            .await
            .collection_actions
            .insert(action.action_id, action.clone());
        Ok(action)
    }

    async fn get_collection_action(
        &self,
        action_id: Uuid,
    ) -> Result<Option<CollectionAction>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .collection_actions
            .get(&action_id)
            .cloned())
    }

    async fn complete_collection_action(
        &self,
        action_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<CollectionAction, AppError> {
        let mut tables = self.tables.write().await;
        let action = tables.collection_actions.get_mut(&action_id).ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("collection action not found: {action_id}"))
        })?;
        action.completed = true;
        action.completed_at = Some(completed_at);
        Ok(action.clone())
    }

    async fn list_collection_actions(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<CollectionAction>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .collection_actions
            .values()
            .filter(|a| a.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn count_pending_collection_actions(&self) -> Result<u64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .collection_actions
            .values()
            .filter(|a| !a.completed)
            .count() as u64)
    }

    async fn get_rating(&self, client_id: Uuid) -> Result<Option<ClientRating>, AppError> {
        Ok(self.tables.read().await.ratings.get(&client_id).cloned())
    }

    async fn upsert_rating(&self, rating: ClientRating) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if let Some(client) = tables.clients.get_mut(&rating.client_id) {
            client.rating = Some(rating.rating);
        }
        tables.ratings.insert(rating.client_id, rating);
        Ok(())
    }

    async fn insert_audit_entry(&self, entry: AuditLogEntry) -> Result<(), AppError> {
        self.trip(FailurePoint::InsertAuditEntry)?;
        self.tables.write().await.audit_log.push(entry);
        Ok(())
    }
}
