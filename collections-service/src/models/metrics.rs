//! Dashboard metrics model.

use rust_decimal::Decimal;
use serde::Serialize;

/// Portfolio-wide aggregates for the collections dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub total_active_clients: u64,
    /// Clients with a deactivation reason recorded.
    pub total_deactivated_clients: u64,
    /// Active clients whose last purchase is older than the configured
    /// inactivity threshold.
    pub inactive_clients: u64,
    pub birthdays_this_month: u64,
    pub clients_with_debt: u64,
    pub clients_with_overdue_debt: u64,
    pub pending_collection_actions: u64,
    pub total_outstanding_debt: Decimal,
    pub total_overdue_debt: Decimal,
}
