//! Client filter specification.

use serde::{Deserialize, Serialize};

use crate::models::{DeactivationReason, RatingCategory};

/// Activity-status filter. `WrittenOff` is an alias the UI exposes for
/// inactive clients; it matches the same records as `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    Active,
    Inactive,
    WrittenOff,
}

/// Derived debt state, computed per client by cross-referencing that
/// client's installments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebtStatus {
    /// `credit_used > 0` and no delinquent installment.
    #[serde(rename = "AL_DIA")]
    AlDia,
    /// `credit_used > 0`; no installment lookup needed.
    #[serde(rename = "CON_DEUDA")]
    ConDeuda,
    /// At least one open installment past its due date.
    #[serde(rename = "MOROSO")]
    Moroso,
}

impl DebtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtStatus::AlDia => "AL_DIA",
            DebtStatus::ConDeuda => "CON_DEUDA",
            DebtStatus::Moroso => "MOROSO",
        }
    }
}

/// Conjunctive filter specification: a client must satisfy every field that
/// is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientFilter {
    pub status: Option<StatusFilter>,
    pub deactivation_reason: Option<Vec<DeactivationReason>>,
    /// Calendar month, 1-indexed.
    pub birthday_month: Option<u32>,
    pub rating: Option<Vec<RatingCategory>>,
    /// Matches clients whose last purchase is strictly older than this many days.
    pub days_since_last_purchase: Option<i64>,
    pub debt_status: Option<DebtStatus>,
}
