//! Action log and collection action models.

use chrono::{DateTime, NaiveDate, Utc};
use collections_core::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Free-form contact log entry type. REACTIVATION entries are written by the
/// lifecycle state machine only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionLogType {
    Note,
    Call,
    Visit,
    Message,
    Reactivation,
}

impl ActionLogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionLogType::Note => "NOTE",
            ActionLogType::Call => "CALL",
            ActionLogType::Visit => "VISIT",
            ActionLogType::Message => "MESSAGE",
            ActionLogType::Reactivation => "REACTIVATION",
        }
    }
}

impl FromStr for ActionLogType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOTE" => Ok(ActionLogType::Note),
            "CALL" => Ok(ActionLogType::Call),
            "VISIT" => Ok(ActionLogType::Visit),
            "MESSAGE" => Ok(ActionLogType::Message),
            "REACTIVATION" => Ok(ActionLogType::Reactivation),
            other => Err(AppError::Validation(format!(
                "Invalid action type: {}. Must be one of: NOTE, CALL, VISIT, MESSAGE, REACTIVATION",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub entry_id: Uuid,
    pub client_id: Uuid,
    pub action_type: ActionLogType,
    pub description: String,
    pub user_id: Uuid,
    pub created_utc: DateTime<Utc>,
}

/// Input for appending a free-form action log entry.
#[derive(Debug, Clone, Validate)]
pub struct NewActionLogEntry {
    pub client_id: Uuid,
    #[validate(length(min = 1, message = "action_type is required"))]
    pub action_type: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub actor_id: Uuid,
}

/// Channel used for a field-collection contact attempt. A superset of the
/// action-log types; these drive the collections workflow, not the client
/// history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionActionType {
    Call,
    Visit,
    Whatsapp,
    Motorbike,
    Email,
    Sms,
    Letter,
    Videocall,
    Other,
}

impl CollectionActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionActionType::Call => "CALL",
            CollectionActionType::Visit => "VISIT",
            CollectionActionType::Whatsapp => "WHATSAPP",
            CollectionActionType::Motorbike => "MOTORBIKE",
            CollectionActionType::Email => "EMAIL",
            CollectionActionType::Sms => "SMS",
            CollectionActionType::Letter => "LETTER",
            CollectionActionType::Videocall => "VIDEOCALL",
            CollectionActionType::Other => "OTHER",
        }
    }
}

impl FromStr for CollectionActionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CALL" => Ok(CollectionActionType::Call),
            "VISIT" => Ok(CollectionActionType::Visit),
            "WHATSAPP" => Ok(CollectionActionType::Whatsapp),
            "MOTORBIKE" => Ok(CollectionActionType::Motorbike),
            "EMAIL" => Ok(CollectionActionType::Email),
            "SMS" => Ok(CollectionActionType::Sms),
            "LETTER" => Ok(CollectionActionType::Letter),
            "VIDEOCALL" => Ok(CollectionActionType::Videocall),
            "OTHER" => Ok(CollectionActionType::Other),
            other => Err(AppError::Validation(format!(
                "Invalid collection action type: {}. Must be one of: CALL, VISIT, WHATSAPP, MOTORBIKE, EMAIL, SMS, LETTER, VIDEOCALL, OTHER",
                other
            ))),
        }
    }
}

/// Field-contact attempt for a client with debt. Created once; only the
/// completion flag and timestamp ever change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionAction {
    pub action_id: Uuid,
    pub client_id: Uuid,
    /// Denormalized at creation time so the collections worklist renders
    /// without a join.
    pub client_name: String,
    pub action_type: CollectionActionType,
    pub description: String,
    pub follow_up_date: NaiveDate,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub user_id: Uuid,
    pub created_utc: DateTime<Utc>,
}

/// Input for recording a new collection action.
#[derive(Debug, Clone, Validate)]
pub struct NewCollectionAction {
    pub client_id: Uuid,
    #[validate(length(min = 1, message = "action_type is required"))]
    pub action_type: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub follow_up_date: NaiveDate,
    pub actor_id: Uuid,
}
