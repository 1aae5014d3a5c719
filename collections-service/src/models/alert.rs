//! Alert model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    Birthday,
    Inactivity,
    Installment,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertPriority {
    High,
    Medium,
    Low,
}

impl AlertPriority {
    /// Sort rank: High before Medium before Low.
    pub fn rank(&self) -> u8 {
        match self {
            AlertPriority::High => 0,
            AlertPriority::Medium => 1,
            AlertPriority::Low => 2,
        }
    }
}

/// Automated notification about a client event. Ids are deterministic per
/// subject and day, so regenerating on the same date is idempotent.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub alert_id: String,
    pub alert_type: AlertType,
    pub client_id: Uuid,
    pub client_name: String,
    pub message: String,
    pub priority: AlertPriority,
    pub due_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub created_on: NaiveDate,
}
