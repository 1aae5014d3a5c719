//! Filtered client snapshot export (CSV).

use chrono::{DateTime, Utc};
use collections_core::error::AppError;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{Client, ClientDebt, ClientFilter};
use crate::services::clients::ClientService;
use crate::services::credit::debt_by_client;
use crate::store::RecordStore;

const HEADERS: [&str; 11] = [
    "Name",
    "NationalId",
    "Phone",
    "Address",
    "CreditLimit",
    "CreditUsed",
    "TotalDebt",
    "OverdueDebt",
    "Rating",
    "LastPurchase",
    "Status",
];

pub struct ExportService {
    store: Arc<dyn RecordStore>,
    clients: ClientService,
    privileged_role: String,
}

impl ExportService {
    pub fn new(store: Arc<dyn RecordStore>, privileged_role: impl Into<String>) -> Self {
        Self {
            clients: ClientService::new(store.clone()),
            store,
            privileged_role: privileged_role.into(),
        }
    }

    /// Renders the filtered client set as CSV: fixed 11-column header, one
    /// row per client, amounts with two decimals, dates as YYYY-MM-DD.
    /// National id and phone are masked unless the actor holds the
    /// privileged role. Zero matching clients is an error, not an empty
    /// file.
    #[instrument(skip(self, filter))]
    pub async fn export_csv(
        &self,
        filter: &ClientFilter,
        actor_role: &str,
    ) -> Result<String, AppError> {
        let clients = self.clients.filter_clients(filter).await?;
        if clients.is_empty() {
            return Err(AppError::EmptyExport);
        }

        let client_ids: Vec<Uuid> = clients.iter().map(|c| c.client_id).collect();
        let today = Utc::now().date_naive();
        let debts = debt_by_client(self.store.as_ref(), &client_ids, today).await?;

        let privileged = actor_role == self.privileged_role;
        let mut lines = Vec::with_capacity(clients.len() + 1);
        lines.push(HEADERS.join(","));
        for client in &clients {
            let debt = debts.get(&client.client_id).copied().unwrap_or_default();
            lines.push(render_row(client, debt, privileged));
        }
        Ok(lines.join("\n"))
    }
}

/// Export artifact name: `clients_YYYY-MM-DD_HH-mm-ss.csv`.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("clients_{}.csv", now.format("%Y-%m-%d_%H-%M-%S"))
}

fn render_row(client: &Client, debt: ClientDebt, privileged: bool) -> String {
    let national_id = optional_text(client.national_id.as_deref(), privileged);
    let phone = optional_text(client.phone.as_deref(), privileged);
    let last_purchase = client
        .last_purchase_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let status = if client.active { "Active" } else { "Inactive" };

    [
        escape_csv(&client.name),
        national_id,
        phone,
        escape_csv(client.address.as_deref().unwrap_or("")),
        format_amount(client.credit_limit),
        format_amount(client.credit_used),
        format_amount(debt.total_debt),
        format_amount(debt.overdue_debt),
        client.rating.map(|r| r.as_str().to_string()).unwrap_or_default(),
        last_purchase,
        status.to_string(),
    ]
    .join(",")
}

fn optional_text(value: Option<&str>, privileged: bool) -> String {
    let value = value.unwrap_or("");
    if privileged {
        escape_csv(value)
    } else {
        escape_csv(&mask(value))
    }
}

/// Partial redaction: `****` plus the last four characters, or all
/// asterisks when the value is that short.
fn mask(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// Quotes a field containing a comma, quote, or newline, doubling any
/// internal quotes.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mask_keeps_last_four_characters() {
        assert_eq!(mask("12345678"), "****5678");
        assert_eq!(mask("1234"), "****");
        assert_eq!(mask("12"), "****");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_escape_csv_quotes_and_doubles() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_amounts_render_with_two_decimals() {
        assert_eq!(format_amount(Decimal::new(12345, 2)), "123.45");
        assert_eq!(format_amount(Decimal::from(7)), "7.00");
        assert_eq!(format_amount(Decimal::new(105, 1)), "10.50");
    }

    #[test]
    fn test_export_filename_convention() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 14, 30, 45).unwrap();
        assert_eq!(export_filename(at), "clients_2026-01-15_14-30-45.csv");
    }
}
