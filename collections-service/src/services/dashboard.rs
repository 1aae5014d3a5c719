//! Portfolio-wide dashboard metrics.

use chrono::{Datelike, Utc};
use collections_core::error::AppError;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::models::DashboardMetrics;
use crate::services::credit::debt_by_client;
use crate::store::{ClientQuery, RecordStore};

pub struct DashboardService {
    store: Arc<dyn RecordStore>,
    inactivity_threshold_days: i64,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RecordStore>, inactivity_threshold_days: i64) -> Self {
        Self {
            store,
            inactivity_threshold_days,
        }
    }

    /// Computes all dashboard aggregates in one pass over the portfolio.
    /// Missing history contributes zeros; nothing here fails soft inputs.
    #[instrument(skip(self))]
    pub async fn metrics(&self) -> Result<DashboardMetrics, AppError> {
        let clients = self.store.list_clients(ClientQuery::default()).await?;
        let client_ids: Vec<Uuid> = clients.iter().map(|c| c.client_id).collect();
        let today = Utc::now().date_naive();

        let (debts, pending_collection_actions) = tokio::try_join!(
            debt_by_client(self.store.as_ref(), &client_ids, today),
            self.store.count_pending_collection_actions(),
        )?;

        let mut metrics = DashboardMetrics {
            pending_collection_actions,
            ..Default::default()
        };

        for client in &clients {
            if client.active {
                metrics.total_active_clients += 1;

                let dormant = client
                    .last_purchase_date
                    .map(|d| (today - d).num_days() > self.inactivity_threshold_days)
                    .unwrap_or(false);
                if dormant {
                    metrics.inactive_clients += 1;
                }
                if client.birthday.map(|b| b.month() == today.month()).unwrap_or(false) {
                    metrics.birthdays_this_month += 1;
                }
            }
            if client.deactivation_reason.is_some() {
                metrics.total_deactivated_clients += 1;
            }
        }

        for debt in debts.values() {
            if debt.total_debt > Decimal::ZERO {
                metrics.clients_with_debt += 1;
                metrics.total_outstanding_debt += debt.total_debt;
            }
            if debt.overdue_debt > Decimal::ZERO {
                metrics.clients_with_overdue_debt += 1;
                metrics.total_overdue_debt += debt.overdue_debt;
            }
        }

        Ok(metrics)
    }
}
