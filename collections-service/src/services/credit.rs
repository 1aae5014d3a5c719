//! Credit aggregation: merges a client's records into one coherent profile.

use chrono::{NaiveDate, Utc};
use collections_core::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{ClientDebt, ClientProfile, CreditSummary, InstallmentView};
use crate::store::RecordStore;

pub struct CreditService {
    store: Arc<dyn RecordStore>,
}

impl CreditService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Builds the complete aggregated profile for one client.
    ///
    /// All independent reads fan out concurrently; installments follow once
    /// the plan id set is known. A missing client is a hard failure, every
    /// other record set defaults to empty. Ordering invariants: purchases
    /// non-increasing by date, installments non-decreasing by due date —
    /// enforced by explicit sorts, never assumed from store order.
    #[instrument(skip(self))]
    pub async fn client_profile(&self, client_id: Uuid) -> Result<ClientProfile, AppError> {
        let client_ids = [client_id];
        let (client, mut sales, mut plans, mut action_logs, mut collection_actions, rating) =
            tokio::try_join!(
                self.store.get_client(client_id),
                self.store.list_sales(client_id),
                self.store.list_credit_plans(&client_ids),
                self.store.list_action_logs(client_id),
                self.store.list_collection_actions(client_id),
                self.store.get_rating(client_id),
            )?;

        let client = client
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("client not found: {client_id}")))?;

        let plan_ids: Vec<Uuid> = plans.iter().map(|p| p.plan_id).collect();
        let installments = self.store.list_installments(&plan_ids).await?;

        let today = Utc::now().date_naive();
        let sale_numbers: HashMap<Uuid, &str> = plans
            .iter()
            .map(|p| (p.plan_id, p.sale_number.as_str()))
            .collect();

        let mut views: Vec<InstallmentView> = installments
            .iter()
            .map(|inst| {
                let sale_number = sale_numbers.get(&inst.plan_id).copied().unwrap_or("");
                InstallmentView::project(inst, sale_number, today)
            })
            .collect();

        views.sort_by_key(|v| v.due_date);
        sales.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
        plans.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
        action_logs.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
        collection_actions.sort_by_key(|a| a.follow_up_date);

        let credit_summary =
            CreditSummary::derive(client.credit_limit, client.credit_used, &views);

        Ok(ClientProfile {
            client,
            credit_summary,
            purchase_history: sales,
            credit_history: plans,
            installments: views,
            action_logs,
            collection_actions,
            rating,
        })
    }
}

/// Cross-references installments for a set of clients and totals their
/// outstanding and overdue debt. Shared by export and dashboard.
pub(crate) async fn debt_by_client(
    store: &dyn RecordStore,
    client_ids: &[Uuid],
    today: NaiveDate,
) -> Result<HashMap<Uuid, ClientDebt>, AppError> {
    if client_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let plans = store.list_credit_plans(client_ids).await?;
    let owner_of: HashMap<Uuid, Uuid> =
        plans.iter().map(|p| (p.plan_id, p.client_id)).collect();
    let plan_ids: Vec<Uuid> = plans.iter().map(|p| p.plan_id).collect();
    let installments = store.list_installments(&plan_ids).await?;

    let mut debts: HashMap<Uuid, ClientDebt> = HashMap::new();
    for inst in &installments {
        let Some(&client_id) = owner_of.get(&inst.plan_id) else {
            continue;
        };
        let debt = debts.entry(client_id).or_default();
        if inst.status.is_open() {
            debt.total_debt += inst.remaining();
        }
        if inst.is_delinquent(today) {
            debt.overdue_debt += inst.remaining();
        }
    }
    Ok(debts)
}
