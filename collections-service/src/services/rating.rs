//! Weighted client risk scoring.
//!
//! Weights: payment punctuality 0.4, purchase frequency 0.3, total spend
//! 0.2, tenure 0.1. Every call is a full recompute from source history;
//! the stored rating is a cache of the result, never an input.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use collections_core::error::AppError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{ClientRating, Installment, RatingCategory, Sale};
use crate::store::RecordStore;

pub struct RatingService {
    store: Arc<dyn RecordStore>,
}

impl RatingService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Recomputes the client's rating from full history and refreshes the
    /// cached record. A missing client is a hard failure; a client with no
    /// purchase history gets the fixed C/50 default.
    #[instrument(skip(self))]
    pub async fn calculate(&self, client_id: Uuid) -> Result<ClientRating, AppError> {
        let client_ids = [client_id];
        let (client, sales, plans) = tokio::try_join!(
            self.store.get_client(client_id),
            self.store.list_sales(client_id),
            self.store.list_credit_plans(&client_ids),
        )?;

        client.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("client not found: {client_id}")))?;

        let plan_ids: Vec<Uuid> = plans.iter().map(|p| p.plan_id).collect();
        let installments = self.store.list_installments(&plan_ids).await?;

        let rating = compute_rating(client_id, &sales, &installments, Utc::now());
        self.store.upsert_rating(rating.clone()).await?;
        Ok(rating)
    }
}

fn compute_rating(
    client_id: Uuid,
    sales: &[Sale],
    installments: &[Installment],
    now: DateTime<Utc>,
) -> ClientRating {
    if sales.is_empty() {
        return ClientRating {
            client_id,
            rating: RatingCategory::C,
            score: 50,
            payment_punctuality: 50,
            purchase_frequency: 50,
            total_purchases: 0,
            client_tenure_days: 0,
            last_calculated: now,
        };
    }

    let today = now.date_naive();

    // Punctuality: among settled installments, the on-time fraction.
    // Defaults to 50 when nothing has been settled yet.
    let mut settled = 0u32;
    let mut on_time = 0u32;
    for inst in installments {
        if inst.status.is_settled() {
            settled += 1;
            if let Some(paid_at) = inst.paid_at {
                if paid_at.date_naive() <= inst.due_date {
                    on_time += 1;
                }
            }
        }
    }
    let punctuality = if settled > 0 {
        f64::from(on_time) / f64::from(settled) * 100.0
    } else {
        50.0
    };

    let first_sale_date = sales
        .iter()
        .map(|s| s.created_utc.date_naive())
        .min()
        .unwrap_or(today);

    // Frequency: 5 purchases per month saturates the sub-score.
    let months = months_between(first_sale_date, today).max(1);
    let purchases_per_month = sales.len() as f64 / months as f64;
    let frequency = (purchases_per_month * 20.0).min(100.0);

    // Spend: 10,000 currency units saturates the sub-score.
    let total_spend: Decimal = sales.iter().map(|s| s.total).sum();
    let spend = (total_spend.to_f64().unwrap_or(0.0) / 100.0).min(100.0);

    // Tenure: 365 days saturates the sub-score.
    let tenure_days = (today - first_sale_date).num_days().max(0);
    let tenure = (tenure_days as f64 / 3.65).min(100.0);

    let composite = punctuality * 0.4 + frequency * 0.3 + spend * 0.2 + tenure * 0.1;
    let score = composite.round() as u8;

    ClientRating {
        client_id,
        rating: RatingCategory::from_score(score),
        score,
        payment_punctuality: punctuality.round() as u8,
        purchase_frequency: frequency.round() as u8,
        total_purchases: sales.len() as u32,
        client_tenure_days: tenure_days,
        last_calculated: now,
    }
}

/// Complete calendar months between two dates.
fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months = (i64::from(to.year()) - i64::from(from.year())) * 12
        + (i64::from(to.month()) - i64::from(from.month()));
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0)
}
