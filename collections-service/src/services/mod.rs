//! Service layer: one component per module, each taking its store
//! dependency at construction.

pub mod actions;
pub mod alerts;
pub mod clients;
pub mod collections;
pub mod credit;
pub mod dashboard;
pub mod export;
pub mod lifecycle;
pub mod rating;
pub mod routing;

pub use actions::ActionLogService;
pub use alerts::AlertService;
pub use clients::ClientService;
pub use collections::CollectionService;
pub use credit::CreditService;
pub use dashboard::DashboardService;
pub use export::ExportService;
pub use lifecycle::LifecycleService;
pub use rating::RatingService;
pub use routing::{haversine_km, plan_route, GeoPoint};
