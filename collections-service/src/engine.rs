//! Engine facade: wires every service component from one store handle and
//! the loaded configuration. Embedders construct this once at startup and
//! hand out references.

use collections_core::config::Config;
use std::sync::Arc;

use crate::models::Client;
use crate::services::{
    plan_route, ActionLogService, AlertService, ClientService, CollectionService, CreditService,
    DashboardService, ExportService, GeoPoint, LifecycleService, RatingService,
};
use crate::store::RecordStore;

pub struct Engine {
    pub clients: ClientService,
    pub credit: CreditService,
    pub ratings: RatingService,
    pub lifecycle: LifecycleService,
    pub collections: CollectionService,
    pub actions: ActionLogService,
    pub exports: ExportService,
    pub alerts: AlertService,
    pub dashboard: DashboardService,
    max_route_stops: usize,
}

impl Engine {
    pub fn new(store: Arc<dyn RecordStore>, config: &Config) -> Self {
        Self {
            clients: ClientService::new(store.clone()),
            credit: CreditService::new(store.clone()),
            ratings: RatingService::new(store.clone()),
            lifecycle: LifecycleService::new(store.clone()),
            collections: CollectionService::new(store.clone()),
            actions: ActionLogService::new(store.clone()),
            exports: ExportService::new(store.clone(), config.privileged_role.clone()),
            alerts: AlertService::new(store.clone(), config.inactivity_threshold_days),
            dashboard: DashboardService::new(store, config.inactivity_threshold_days),
            max_route_stops: config.max_route_stops,
        }
    }

    /// Greedy visit route from `origin`, capped at the configured stop count.
    pub fn plan_route(&self, origin: GeoPoint, clients: &[Client]) -> Vec<Client> {
        plan_route(origin, clients, self.max_route_stops)
    }
}
