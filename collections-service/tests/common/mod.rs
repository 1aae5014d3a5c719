#![allow(dead_code)]

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use collections_service::models::{
    Client, CreditPlan, Installment, InstallmentStatus, PaymentStatus, Sale, SaleType,
};
use collections_service::store::InMemoryStore;

pub fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn days_from_today(offset: i64) -> NaiveDate {
    today() + Duration::days(offset)
}

pub fn client(name: &str) -> Client {
    Client {
        client_id: Uuid::new_v4(),
        name: name.into(),
        national_id: None,
        phone: None,
        address: None,
        latitude: None,
        longitude: None,
        credit_limit: Decimal::from(1000),
        credit_used: Decimal::ZERO,
        active: true,
        deactivation_reason: None,
        deactivated_at: None,
        deactivated_by: None,
        birthday: None,
        last_purchase_date: None,
        rating: None,
        created_utc: Utc::now(),
    }
}

pub fn sale(client_id: Uuid, number: &str, total: i64, days_ago: i64) -> Sale {
    Sale {
        sale_id: Uuid::new_v4(),
        client_id,
        sale_number: number.into(),
        total: Decimal::from(total),
        sale_type: SaleType::Credit,
        payment_status: PaymentStatus::Pending,
        voided: false,
        created_utc: Utc::now() - Duration::days(days_ago),
    }
}

pub fn credit_plan(client_id: Uuid, sale_number: &str, days_ago: i64) -> CreditPlan {
    CreditPlan {
        plan_id: Uuid::new_v4(),
        client_id,
        sale_id: Uuid::new_v4(),
        sale_number: sale_number.into(),
        created_utc: Utc::now() - Duration::days(days_ago),
    }
}

pub fn installment(
    plan_id: Uuid,
    number: u32,
    amount: i64,
    paid: i64,
    due_date: NaiveDate,
    status: InstallmentStatus,
) -> Installment {
    Installment {
        installment_id: Uuid::new_v4(),
        plan_id,
        installment_number: number,
        amount: Decimal::from(amount),
        due_date,
        paid_amount: Decimal::from(paid),
        status,
        paid_at: None,
    }
}
