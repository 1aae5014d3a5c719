//! Client model and aggregated profile view.

use chrono::{DateTime, NaiveDate, Utc};
use collections_core::error::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::{
    ActionLogEntry, ClientRating, CollectionAction, CreditPlan, CreditSummary, InstallmentView,
    RatingCategory, Sale,
};

/// Reason a client was removed from the active portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeactivationReason {
    Deceased,
    Moved,
    Disappeared,
    Other,
}

impl DeactivationReason {
    pub const ALL: [DeactivationReason; 4] = [
        DeactivationReason::Deceased,
        DeactivationReason::Moved,
        DeactivationReason::Disappeared,
        DeactivationReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeactivationReason::Deceased => "DECEASED",
            DeactivationReason::Moved => "MOVED",
            DeactivationReason::Disappeared => "DISAPPEARED",
            DeactivationReason::Other => "OTHER",
        }
    }
}

impl FromStr for DeactivationReason {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DECEASED" => Ok(DeactivationReason::Deceased),
            "MOVED" => Ok(DeactivationReason::Moved),
            "DISAPPEARED" => Ok(DeactivationReason::Disappeared),
            "OTHER" => Ok(DeactivationReason::Other),
            other => Err(AppError::Validation(format!(
                "Invalid deactivation reason: {}. Must be one of: DECEASED, MOVED, DISAPPEARED, OTHER",
                other
            ))),
        }
    }
}

/// Client record as held by the record store.
///
/// Activity fields (`active`, `deactivation_*`) are mutated only through the
/// lifecycle state machine; credit fields are owned by external billing flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub client_id: Uuid,
    pub name: String,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub credit_limit: Decimal,
    pub credit_used: Decimal,
    pub active: bool,
    pub deactivation_reason: Option<DeactivationReason>,
    pub deactivated_at: Option<DateTime<Utc>>,
    pub deactivated_by: Option<Uuid>,
    pub birthday: Option<NaiveDate>,
    pub last_purchase_date: Option<NaiveDate>,
    /// Cached rating category, refreshed whenever the rating is recomputed.
    pub rating: Option<RatingCategory>,
    pub created_utc: DateTime<Utc>,
}

/// Append-only audit record of one deactivation event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDeactivation {
    pub deactivation_id: Uuid,
    pub client_id: Uuid,
    pub reason: DeactivationReason,
    pub notes: Option<String>,
    pub deactivated_by: Uuid,
    pub deactivated_at: DateTime<Utc>,
}

/// Complete aggregated view of one client.
#[derive(Debug, Clone, Serialize)]
pub struct ClientProfile {
    pub client: Client,
    pub credit_summary: CreditSummary,
    /// Non-voided sales, most recent first.
    pub purchase_history: Vec<Sale>,
    /// Credit plans, most recent first.
    pub credit_history: Vec<CreditPlan>,
    /// Installments across all plans, earliest due date first.
    pub installments: Vec<InstallmentView>,
    /// Action log, most recent first.
    pub action_logs: Vec<ActionLogEntry>,
    /// Collection actions, earliest follow-up first.
    pub collection_actions: Vec<CollectionAction>,
    pub rating: Option<ClientRating>,
}
