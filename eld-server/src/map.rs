//! Route map view model.
//!
//! The browser draws the map with Leaflet; this module decides what goes on
//! it. The view serializes to JSON and is handed to the page script as-is.

use serde::Serialize;

use crate::domain::{RoutePoint, Stop, StopKind, TripPlanResult};

/// Marker styles understood by the page script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Start,
    Pickup,
    Dropoff,
    Rest,
    Fuel,
    /// Generic marker for stop types with no style of their own.
    Route,
}

impl From<&StopKind> for MarkerKind {
    fn from(kind: &StopKind) -> Self {
        match kind {
            StopKind::Pickup => MarkerKind::Pickup,
            StopKind::Dropoff => MarkerKind::Dropoff,
            StopKind::Rest => MarkerKind::Rest,
            StopKind::Fuel => MarkerKind::Fuel,
            StopKind::Other(_) => MarkerKind::Route,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lng: f64,
    pub kind: MarkerKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Bounding box as `[[south, west], [north, east]]`, the shape Leaflet's
/// `fitBounds` takes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[[f64; 2]; 2]")]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl From<Bounds> for [[f64; 2]; 2] {
    fn from(b: Bounds) -> Self {
        [[b.south, b.west], [b.north, b.east]]
    }
}

impl Bounds {
    fn around(points: &[RoutePoint]) -> Option<Self> {
        let first = points.first()?;
        let init = Bounds {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        Some(points.iter().skip(1).fold(init, |b, p| Bounds {
            south: b.south.min(p.lat),
            west: b.west.min(p.lng),
            north: b.north.max(p.lat),
            east: b.east.max(p.lng),
        }))
    }
}

/// Everything drawn on the route map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub path: Vec<[f64; 2]>,
    /// Present when the route has more than one point.
    pub fit_bounds: Option<Bounds>,
    pub markers: Vec<MapMarker>,
}

impl MapView {
    /// Build the map for a plan. An empty route shows no map at all.
    pub fn from_plan(plan: &TripPlanResult) -> Option<Self> {
        let route = &plan.route;
        let first = route.first()?;

        let mut markers = Vec::with_capacity(plan.stops.len() + 3);
        // With only one or two points the route is just its endpoints and
        // the stops already mark them.
        if route.len() > 2 {
            let last = &route[route.len() - 1];
            markers.push(waypoint(first, MarkerKind::Start, "Start"));
            markers.push(waypoint(&route[1], MarkerKind::Pickup, "Pickup"));
            markers.push(waypoint(last, MarkerKind::Dropoff, "Dropoff"));
        }
        markers.extend(plan.stops.iter().map(stop_marker));

        Some(Self {
            center: [first.lat, first.lng],
            path: route.iter().map(|p| [p.lat, p.lng]).collect(),
            fit_bounds: if route.len() > 1 {
                Bounds::around(route)
            } else {
                None
            },
            markers,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn waypoint(point: &RoutePoint, kind: MarkerKind, title: &str) -> MapMarker {
    MapMarker {
        lat: point.lat,
        lng: point.lng,
        kind,
        title: title.to_string(),
        detail: None,
    }
}

fn stop_marker(stop: &Stop) -> MapMarker {
    let title = match &stop.kind {
        StopKind::Rest => "Rest Stop".to_string(),
        StopKind::Fuel => "Fuel Stop".to_string(),
        StopKind::Pickup => "Pickup".to_string(),
        StopKind::Dropoff => "Dropoff".to_string(),
        StopKind::Other(label) => format!("Stop ({label})"),
    };
    MapMarker {
        lat: stop.lat,
        lng: stop.lng,
        kind: MarkerKind::from(&stop.kind),
        title,
        detail: Some(format!("Duration: {} min", stop.duration_min)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> RoutePoint {
        RoutePoint {
            lat,
            lng,
            label: "Route".into(),
        }
    }

    fn stop(kind: StopKind, duration_min: f64) -> Stop {
        Stop {
            lat: 40.0,
            lng: -100.0,
            kind,
            duration_min,
        }
    }

    #[test]
    fn empty_route_has_no_map() {
        let plan = TripPlanResult {
            stops: vec![stop(StopKind::Rest, 30.0)],
            ..TripPlanResult::default()
        };
        assert!(MapView::from_plan(&plan).is_none());
    }

    #[test]
    fn long_route_gets_endpoint_markers() {
        let plan = TripPlanResult {
            route: vec![point(41.8, -87.6), point(41.5, -90.5), point(40.8, -96.7), point(39.7, -105.0)],
            stops: vec![stop(StopKind::Rest, 30.0), stop(StopKind::Fuel, 60.0)],
            eld_logs: vec![],
        };
        let map = MapView::from_plan(&plan).unwrap();

        let kinds: Vec<MarkerKind> = map.markers.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MarkerKind::Start,
                MarkerKind::Pickup,
                MarkerKind::Dropoff,
                MarkerKind::Rest,
                MarkerKind::Fuel,
            ]
        );
        assert_eq!(map.markers[1].lat, 41.5);
        assert_eq!(map.markers[2].lng, -105.0);
        assert_eq!(map.center, [41.8, -87.6]);
        assert_eq!(map.path.len(), 4);

        assert_eq!(
            map.fit_bounds,
            Some(Bounds {
                south: 39.7,
                west: -105.0,
                north: 41.8,
                east: -87.6,
            })
        );
    }

    #[test]
    fn short_route_has_no_endpoint_markers() {
        let plan = TripPlanResult {
            route: vec![point(41.8, -87.6), point(39.7, -105.0)],
            stops: vec![],
            eld_logs: vec![],
        };
        let map = MapView::from_plan(&plan).unwrap();
        assert!(map.markers.is_empty());
        assert!(map.fit_bounds.is_some());
    }

    #[test]
    fn single_point_route_does_not_fit_bounds() {
        let plan = TripPlanResult {
            route: vec![point(41.8, -87.6)],
            ..TripPlanResult::default()
        };
        let map = MapView::from_plan(&plan).unwrap();
        assert!(map.fit_bounds.is_none());
    }

    #[test]
    fn stop_popups() {
        let rest = stop_marker(&stop(StopKind::Rest, 30.0));
        assert_eq!(rest.title, "Rest Stop");
        assert_eq!(rest.detail.as_deref(), Some("Duration: 30 min"));

        let fuel = stop_marker(&stop(StopKind::Fuel, 60.0));
        assert_eq!(fuel.title, "Fuel Stop");
        assert_eq!(fuel.kind, MarkerKind::Fuel);

        let weigh = stop_marker(&stop(StopKind::Other("weigh station".into()), 15.0));
        assert_eq!(weigh.kind, MarkerKind::Route);
        assert_eq!(weigh.title, "Stop (weigh station)");
    }

    #[test]
    fn serializes_for_leaflet() {
        let plan = TripPlanResult {
            route: vec![point(1.0, 2.0), point(3.0, 4.0)],
            stops: vec![stop(StopKind::Fuel, 60.0)],
            eld_logs: vec![],
        };
        let json: serde_json::Value =
            serde_json::from_str(&MapView::from_plan(&plan).unwrap().to_json().unwrap()).unwrap();

        assert_eq!(json["fit_bounds"], serde_json::json!([[1.0, 2.0], [3.0, 4.0]]));
        assert_eq!(json["markers"][0]["kind"], "fuel");
        assert_eq!(json["path"][1], serde_json::json!([3.0, 4.0]));
    }
}
