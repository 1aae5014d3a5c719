//! Typed entities and derived views for the collections engine.

pub mod action;
pub mod alert;
pub mod audit;
pub mod client;
pub mod credit;
pub mod filter;
pub mod metrics;
pub mod rating;
pub mod sale;

pub use action::{
    ActionLogEntry, ActionLogType, CollectionAction, CollectionActionType, NewActionLogEntry,
    NewCollectionAction,
};
pub use alert::{Alert, AlertPriority, AlertType};
pub use audit::AuditLogEntry;
pub use client::{Client, ClientDeactivation, ClientProfile, DeactivationReason};
pub use credit::{ClientDebt, CreditPlan, CreditSummary, Installment, InstallmentStatus, InstallmentView};
pub use filter::{ClientFilter, DebtStatus, StatusFilter};
pub use metrics::DashboardMetrics;
pub use rating::{ClientRating, RatingCategory};
pub use sale::{PaymentStatus, Sale, SaleType};
