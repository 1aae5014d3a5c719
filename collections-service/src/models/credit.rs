//! Credit plan, installment, and credit summary models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Repayment schedule created for one credit sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditPlan {
    pub plan_id: Uuid,
    pub client_id: Uuid,
    pub sale_id: Uuid,
    pub sale_number: String,
    pub created_utc: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    Pending,
    Partial,
    Paid,
    Overdue,
}

impl InstallmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallmentStatus::Pending => "PENDING",
            InstallmentStatus::Partial => "PARTIAL",
            InstallmentStatus::Paid => "PAID",
            InstallmentStatus::Overdue => "OVERDUE",
        }
    }

    /// An installment still carrying a balance.
    pub fn is_open(&self) -> bool {
        !matches!(self, InstallmentStatus::Paid)
    }

    /// Settled fully or partially; these count toward punctuality.
    pub fn is_settled(&self) -> bool {
        matches!(self, InstallmentStatus::Paid | InstallmentStatus::Partial)
    }
}

/// One scheduled partial payment of a credit plan.
///
/// `paid_amount <= amount` is enforced upstream and assumed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installment {
    pub installment_id: Uuid,
    pub plan_id: Uuid,
    pub installment_number: u32,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub paid_amount: Decimal,
    pub status: InstallmentStatus,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Installment {
    pub fn remaining(&self) -> Decimal {
        self.amount - self.paid_amount
    }

    /// Whole days past the due date; zero for anything not yet due.
    /// Derived at read time, never persisted.
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days().max(0)
    }

    /// Past its due date and not fully paid.
    pub fn is_delinquent(&self, today: NaiveDate) -> bool {
        self.due_date < today && self.status.is_open()
    }
}

/// Installment annotated with its plan's sale number and derived
/// days-overdue for one read.
#[derive(Debug, Clone, Serialize)]
pub struct InstallmentView {
    pub installment_id: Uuid,
    pub plan_id: Uuid,
    pub installment_number: u32,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub paid_amount: Decimal,
    pub status: InstallmentStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub sale_number: String,
    pub days_overdue: i64,
}

impl InstallmentView {
    pub fn project(installment: &Installment, sale_number: &str, today: NaiveDate) -> Self {
        Self {
            installment_id: installment.installment_id,
            plan_id: installment.plan_id,
            installment_number: installment.installment_number,
            amount: installment.amount,
            due_date: installment.due_date,
            paid_amount: installment.paid_amount,
            status: installment.status,
            paid_at: installment.paid_at,
            sale_number: sale_number.to_string(),
            days_overdue: installment.days_overdue(today),
        }
    }

    pub fn remaining(&self) -> Decimal {
        self.amount - self.paid_amount
    }
}

/// Merged view of a client's credit position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditSummary {
    pub credit_limit: Decimal,
    pub credit_used: Decimal,
    /// May be negative; an over-limit position is surfaced, not clamped.
    pub credit_available: Decimal,
    pub total_debt: Decimal,
    pub overdue_debt: Decimal,
    pub pending_installments: u32,
    pub overdue_installments: u32,
}

impl CreditSummary {
    pub fn derive(
        credit_limit: Decimal,
        credit_used: Decimal,
        installments: &[InstallmentView],
    ) -> Self {
        let mut total_debt = Decimal::ZERO;
        let mut overdue_debt = Decimal::ZERO;
        let mut pending_installments = 0u32;
        let mut overdue_installments = 0u32;

        for inst in installments {
            if inst.status.is_open() {
                total_debt += inst.remaining();
                pending_installments += 1;
            }
            if inst.days_overdue > 0 && inst.status.is_open() {
                overdue_debt += inst.remaining();
                overdue_installments += 1;
            }
        }

        Self {
            credit_limit,
            credit_used,
            credit_available: credit_limit - credit_used,
            total_debt,
            overdue_debt,
            pending_installments,
            overdue_installments,
        }
    }
}

/// Per-client debt totals derived by cross-referencing installments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientDebt {
    pub total_debt: Decimal,
    pub overdue_debt: Decimal,
}
