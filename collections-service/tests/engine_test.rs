mod common;

use collections_core::config::Config;
use collections_service::models::{ClientFilter, RatingCategory};
use collections_service::services::GeoPoint;
use collections_service::Engine;

#[tokio::test]
async fn test_engine_wires_services_from_config() {
    let store = common::store();
    let client = common::client("Integrada");
    let client_id = client.client_id;
    store.seed_client(client).await;

    let engine = Engine::new(store, &Config::default());

    let rating = engine.ratings.calculate(client_id).await.unwrap();
    assert_eq!(rating.rating, RatingCategory::C);

    let clients = engine
        .clients
        .filter_clients(&ClientFilter::default())
        .await
        .unwrap();
    assert_eq!(clients.len(), 1);

    let metrics = engine.dashboard.metrics().await.unwrap();
    assert_eq!(metrics.total_active_clients, 1);
}

#[tokio::test]
async fn test_engine_route_respects_configured_stop_cap() {
    let store = common::store();
    let engine = Engine::new(store, &Config::default());

    let clients: Vec<_> = (0..12)
        .map(|i| {
            let mut c = common::client(&format!("c{i}"));
            c.latitude = Some(0.0);
            c.longitude = Some(f64::from(i));
            c
        })
        .collect();

    let origin = GeoPoint {
        latitude: 0.0,
        longitude: 0.0,
    };
    let route = engine.plan_route(origin, &clients);
    assert_eq!(route.len(), 9);
    assert_eq!(route[0].name, "c0");
}
