//! Record-store seam.
//!
//! Every service reaches persistence through [`RecordStore`], injected at
//! construction. The store offers equality/inclusion filters and no
//! multi-statement transactions; multi-step operations compensate manually.
//! The installments-through-plans relation is modeled as two explicit
//! fetches (plans by client id set, installments by plan id set) rather
//! than a store-side join.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use collections_core::error::AppError;
use uuid::Uuid;

use crate::models::{
    ActionLogEntry, AuditLogEntry, Client, ClientDeactivation, ClientRating, CollectionAction,
    CreditPlan, DeactivationReason, Installment, RatingCategory, Sale,
};

pub use memory::InMemoryStore;

/// Patch applied to a client's activity fields. Every application sets all
/// four fields, which keeps the lifecycle machine's compensating writes
/// idempotent.
#[derive(Debug, Clone, Default)]
pub struct ActivityPatch {
    pub active: bool,
    pub deactivation_reason: Option<DeactivationReason>,
    pub deactivated_at: Option<DateTime<Utc>>,
    pub deactivated_by: Option<Uuid>,
}

/// Equality/inclusion criteria the store evaluates natively. Anything more
/// derived (birthday month, purchase recency, debt status) is applied by
/// the filtering service after the fetch.
#[derive(Debug, Clone, Default)]
pub struct ClientQuery {
    pub active: Option<bool>,
    pub deactivation_reasons: Option<Vec<DeactivationReason>>,
    pub ratings: Option<Vec<RatingCategory>>,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get_client(&self, client_id: Uuid) -> Result<Option<Client>, AppError>;

    /// Returns clients matching the query, in no particular order.
    async fn list_clients(&self, query: ClientQuery) -> Result<Vec<Client>, AppError>;

    async fn update_client_activity(
        &self,
        client_id: Uuid,
        patch: ActivityPatch,
    ) -> Result<(), AppError>;

    /// Non-voided sales for one client, in no particular order.
    async fn list_sales(&self, client_id: Uuid) -> Result<Vec<Sale>, AppError>;

    async fn list_credit_plans(&self, client_ids: &[Uuid]) -> Result<Vec<CreditPlan>, AppError>;

    async fn list_installments(&self, plan_ids: &[Uuid]) -> Result<Vec<Installment>, AppError>;

    async fn insert_deactivation(&self, record: ClientDeactivation) -> Result<(), AppError>;

    async fn insert_action_log(&self, entry: ActionLogEntry) -> Result<ActionLogEntry, AppError>;

    async fn list_action_logs(&self, client_id: Uuid) -> Result<Vec<ActionLogEntry>, AppError>;

    async fn insert_collection_action(
        &self,
        action: CollectionAction,
    ) -> Result<CollectionAction, AppError>;

    async fn get_collection_action(
        &self,
        action_id: Uuid,
    ) -> Result<Option<CollectionAction>, AppError>;

    /// Marks the action completed at the given instant. Repeating the call
    /// refreshes the timestamp; there is no already-completed error.
    async fn complete_collection_action(
        &self,
        action_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<CollectionAction, AppError>;

    async fn list_collection_actions(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<CollectionAction>, AppError>;

    async fn count_pending_collection_actions(&self) -> Result<u64, AppError>;

    async fn get_rating(&self, client_id: Uuid) -> Result<Option<ClientRating>, AppError>;

    /// Stores the recomputed rating and refreshes the client's cached
    /// rating category.
    async fn upsert_rating(&self, rating: ClientRating) -> Result<(), AppError>;

    async fn insert_audit_entry(&self, entry: AuditLogEntry) -> Result<(), AppError>;
}
