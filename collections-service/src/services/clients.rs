//! Conjunctive client filtering.

use chrono::{Datelike, NaiveDate, Utc};
use collections_core::error::AppError;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{Client, ClientFilter, DebtStatus, StatusFilter};
use crate::store::{ClientQuery, RecordStore};

pub struct ClientService {
    store: Arc<dyn RecordStore>,
}

impl ClientService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Returns clients satisfying every present filter field, sorted
    /// case-insensitively ascending by name.
    ///
    /// Equality/inclusion criteria are pushed to the store; derived
    /// criteria run here afterwards, with the debt-status join evaluated
    /// last against the already-narrowed candidate set.
    #[instrument(skip(self))]
    pub async fn filter_clients(&self, filter: &ClientFilter) -> Result<Vec<Client>, AppError> {
        if let Some(month) = filter.birthday_month {
            if !(1..=12).contains(&month) {
                return Err(AppError::Validation(format!(
                    "Invalid birthday month: {}. Must be between 1 and 12",
                    month
                )));
            }
        }

        let query = ClientQuery {
            active: filter.status.map(|s| matches!(s, StatusFilter::Active)),
            deactivation_reasons: filter.deactivation_reason.clone(),
            ratings: filter.rating.clone(),
        };
        let mut clients = self.store.list_clients(query).await?;

        let today = Utc::now().date_naive();

        if let Some(month) = filter.birthday_month {
            clients.retain(|c| c.birthday.map(|b| b.month() == month).unwrap_or(false));
        }

        if let Some(days) = filter.days_since_last_purchase {
            clients.retain(|c| {
                c.last_purchase_date
                    .map(|d| (today - d).num_days() > days)
                    .unwrap_or(false)
            });
        }

        if let Some(debt_status) = filter.debt_status {
            clients = self.apply_debt_status(clients, debt_status, today).await?;
        }

        clients.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(clients)
    }

    async fn apply_debt_status(
        &self,
        mut clients: Vec<Client>,
        debt_status: DebtStatus,
        today: NaiveDate,
    ) -> Result<Vec<Client>, AppError> {
        if clients.is_empty() {
            return Ok(clients);
        }

        let client_ids: Vec<Uuid> = clients.iter().map(|c| c.client_id).collect();
        let plans = self.store.list_credit_plans(&client_ids).await?;
        let owner_of: HashMap<Uuid, Uuid> =
            plans.iter().map(|p| (p.plan_id, p.client_id)).collect();
        let plan_ids: Vec<Uuid> = plans.iter().map(|p| p.plan_id).collect();
        let installments = self.store.list_installments(&plan_ids).await?;

        let delinquent: HashSet<Uuid> = installments
            .iter()
            .filter(|i| i.is_delinquent(today))
            .filter_map(|i| owner_of.get(&i.plan_id).copied())
            .collect();

        clients.retain(|c| match debt_status {
            DebtStatus::Moroso => delinquent.contains(&c.client_id),
            DebtStatus::ConDeuda => c.credit_used > Decimal::ZERO,
            DebtStatus::AlDia => {
                c.credit_used > Decimal::ZERO && !delinquent.contains(&c.client_id)
            }
        });
        Ok(clients)
    }
}
