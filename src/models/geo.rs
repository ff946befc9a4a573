use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Axis-aligned viewport covering a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            south: point.lat,
            west: point.lon,
            north: point.lat,
            east: point.lon,
        }
    }

    pub fn extend(&mut self, point: GeoPoint) {
        self.south = self.south.min(point.lat);
        self.north = self.north.max(point.lat);
        self.west = self.west.min(point.lon);
        self.east = self.east.max(point.lon);
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub event_name: String,
    pub venue_name: String,
    pub point: GeoPoint,
}

/// Outcome of geocoding one event batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerBatch {
    pub markers: Vec<Marker>,
    /// `None` when no venue resolved; the viewport should stay put.
    pub bounds: Option<Bounds>,
    pub skipped: usize,
}

impl MarkerBatch {
    pub fn push(&mut self, marker: Marker) {
        match self.bounds.as_mut() {
            Some(bounds) => bounds.extend(marker.point),
            None => self.bounds = Some(Bounds::from_point(marker.point)),
        }
        self.markers.push(marker);
    }

    pub fn skip(&mut self) {
        self.skipped += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(lat: f64, lon: f64) -> Marker {
        Marker {
            event_name: "Show".to_string(),
            venue_name: "Venue".to_string(),
            point: GeoPoint::new(lat, lon),
        }
    }

    #[test]
    fn test_point_validity() {
        assert!(GeoPoint::new(42.36, -71.06).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn test_bounds_independent_of_insert_order() {
        let points = [marker(42.36, -71.06), marker(40.71, -74.0), marker(34.05, -118.24)];

        let mut forward = MarkerBatch::default();
        points.iter().cloned().for_each(|m| forward.push(m));
        let mut backward = MarkerBatch::default();
        points.iter().rev().cloned().for_each(|m| backward.push(m));

        assert_eq!(forward.bounds, backward.bounds);
        let bounds = forward.bounds.unwrap();
        assert_eq!(bounds.south, 34.05);
        assert_eq!(bounds.north, 42.36);
        assert_eq!(bounds.west, -118.24);
        assert_eq!(bounds.east, -71.06);
    }

    #[test]
    fn test_empty_batch_has_no_bounds() {
        let mut batch = MarkerBatch::default();
        batch.skip();
        assert!(batch.bounds.is_none());
        assert_eq!(batch.skipped, 1);
    }

    #[test]
    fn test_single_point_center() {
        let mut batch = MarkerBatch::default();
        batch.push(marker(42.36, -71.06));
        assert_eq!(batch.bounds.unwrap().center(), GeoPoint::new(42.36, -71.06));
    }
}
