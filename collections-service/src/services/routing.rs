//! Visit-route planning: greedy nearest-neighbor sequencing.
//!
//! A heuristic, not an optimal-tour solver. Acceptable because stop counts
//! are bounded (Google Maps multi-stop URLs cap out near ten) and per-
//! request client pools are small.

use crate::models::Client;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Sequences at most `max_stops` clients by repeatedly stepping to the
/// nearest unvisited one from the current position. Clients without valid
/// coordinates are discarded; ties go to the first candidate encountered.
pub fn plan_route(origin: GeoPoint, clients: &[Client], max_stops: usize) -> Vec<Client> {
    let mut remaining: Vec<(Client, GeoPoint)> = clients
        .iter()
        .filter_map(|c| client_point(c).map(|p| (c.clone(), p)))
        .collect();

    let mut route = Vec::new();
    let mut current = origin;

    while !remaining.is_empty() && route.len() < max_stops {
        let mut nearest = 0;
        let mut min_dist = f64::INFINITY;
        for (i, (_, point)) in remaining.iter().enumerate() {
            let d = haversine_km(current, *point);
            if d < min_dist {
                min_dist = d;
                nearest = i;
            }
        }
        let (client, point) = remaining.remove(nearest);
        current = point;
        route.push(client);
    }
    route
}

fn client_point(client: &Client) -> Option<GeoPoint> {
    match (client.latitude, client.longitude) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some(GeoPoint {
            latitude: lat,
            longitude: lng,
        }),
        _ => None,
    }
}
