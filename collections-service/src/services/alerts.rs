//! Automated alert generation.
//!
//! Deterministic and idempotent: regenerating on the same date yields the
//! same alert ids, so downstream delivery can dedupe naively.

use chrono::{Datelike, Duration, NaiveDate};
use collections_core::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{Alert, AlertPriority, AlertType};
use crate::store::{ClientQuery, RecordStore};

const UPCOMING_WINDOW_DAYS: i64 = 7;

pub struct AlertService {
    store: Arc<dyn RecordStore>,
    inactivity_threshold_days: i64,
}

impl AlertService {
    pub fn new(store: Arc<dyn RecordStore>, inactivity_threshold_days: i64) -> Self {
        Self {
            store,
            inactivity_threshold_days,
        }
    }

    /// Generates birthday, inactivity, upcoming-installment, and overdue
    /// alerts for the given date, sorted High > Medium > Low.
    #[instrument(skip(self))]
    pub async fn generate(&self, today: NaiveDate) -> Result<Vec<Alert>, AppError> {
        let clients = self.store.list_clients(ClientQuery::default()).await?;
        let client_ids: Vec<Uuid> = clients.iter().map(|c| c.client_id).collect();
        let plans = self.store.list_credit_plans(&client_ids).await?;
        let owner_of: HashMap<Uuid, Uuid> =
            plans.iter().map(|p| (p.plan_id, p.client_id)).collect();
        let plan_ids: Vec<Uuid> = plans.iter().map(|p| p.plan_id).collect();
        let installments = self.store.list_installments(&plan_ids).await?;

        let names: HashMap<Uuid, &str> = clients
            .iter()
            .map(|c| (c.client_id, c.name.as_str()))
            .collect();

        let mut alerts = Vec::new();

        for client in clients.iter().filter(|c| c.active) {
            if let Some(birthday) = client.birthday {
                let next = next_birthday(birthday, today);
                let days_until = (next - today).num_days();
                if (0..=UPCOMING_WINDOW_DAYS).contains(&days_until) {
                    alerts.push(Alert {
                        alert_id: format!("birthday-{}", client.client_id),
                        alert_type: AlertType::Birthday,
                        client_id: client.client_id,
                        client_name: client.name.clone(),
                        message: format!("Birthday in {}", plural_days(days_until)),
                        priority: AlertPriority::Medium,
                        due_date: Some(next),
                        amount: None,
                        created_on: today,
                    });
                }
            }

            if let Some(last_purchase) = client.last_purchase_date {
                let days_since = (today - last_purchase).num_days();
                if days_since > self.inactivity_threshold_days {
                    alerts.push(Alert {
                        alert_id: format!("inactivity-{}", client.client_id),
                        alert_type: AlertType::Inactivity,
                        client_id: client.client_id,
                        client_name: client.name.clone(),
                        message: format!("No purchases for {}", plural_days(days_since)),
                        priority: AlertPriority::Low,
                        due_date: None,
                        amount: None,
                        created_on: today,
                    });
                }
            }
        }

        for inst in &installments {
            let Some(&client_id) = owner_of.get(&inst.plan_id) else {
                continue;
            };
            let client_name = names.get(&client_id).copied().unwrap_or("").to_string();

            if inst.is_delinquent(today) {
                let days = inst.days_overdue(today);
                alerts.push(Alert {
                    alert_id: format!("overdue-{}", inst.installment_id),
                    alert_type: AlertType::Overdue,
                    client_id,
                    client_name,
                    message: format!("Installment overdue by {}", plural_days(days)),
                    priority: AlertPriority::High,
                    due_date: Some(inst.due_date),
                    amount: Some(inst.remaining()),
                    created_on: today,
                });
            } else if inst.status.is_open() {
                let days_until = (inst.due_date - today).num_days();
                if inst.due_date >= today && days_until <= UPCOMING_WINDOW_DAYS {
                    alerts.push(Alert {
                        alert_id: format!("installment-{}", inst.installment_id),
                        alert_type: AlertType::Installment,
                        client_id,
                        client_name,
                        message: format!("Installment due in {}", plural_days(days_until)),
                        priority: AlertPriority::Medium,
                        due_date: Some(inst.due_date),
                        amount: Some(inst.remaining()),
                        created_on: today,
                    });
                }
            }
        }

        alerts.sort_by_key(|a| a.priority.rank());
        Ok(alerts)
    }
}

/// Next calendar occurrence of a birthday on or after `today`. A February
/// 29 anniversary falls on March 1 in non-leap years.
fn next_birthday(birthday: NaiveDate, today: NaiveDate) -> NaiveDate {
    let occurrence = |year: i32| {
        NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
    };
    match occurrence(today.year()) {
        Some(date) if date >= today => date,
        _ => occurrence(today.year() + 1).unwrap_or(today + Duration::days(365)),
    }
}

fn plural_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}
