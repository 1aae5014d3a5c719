//! Audit log model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only record of a state-changing operation with before/after
/// snapshots. Written best-effort: a failed audit write never rolls back
/// the operation it describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub entry_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub user_id: Uuid,
    pub operation: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub old_values: serde_json::Value,
    pub new_values: serde_json::Value,
}
