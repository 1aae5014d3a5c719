//! Sale (purchase) model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleType {
    Cash,
    Credit,
}

impl SaleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleType::Cash => "CASH",
            SaleType::Credit => "CREDIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Partial,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Partial => "PARTIAL",
        }
    }
}

/// Immutable purchase record. Voided sales are excluded from all
/// aggregation and scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub sale_id: Uuid,
    pub client_id: Uuid,
    pub sale_number: String,
    pub total: Decimal,
    pub sale_type: SaleType,
    pub payment_status: PaymentStatus,
    pub voided: bool,
    pub created_utc: DateTime<Utc>,
}
