//! Nearby-facility search and free-text filtering.
//!
//! Every search is a fresh linear scan over the datasets passed in. The
//! datasets are tens of records, so there is no index and no caching; each
//! call returns a new list that replaces whatever the caller held before.

use crate::distance::haversine_miles;
use crate::error::{GuardCardError, Result};
use crate::models::{Coordinate, Dataset, Facility, FacilityKind, RankedFacility};
use geo::algorithm::bounding_rect::BoundingRect;
use geo::{MultiPoint, Point, Rect};

/// Rank every facility in `datasets` by distance from `origin`, keeping only
/// those within `radius_miles`.
///
/// Results are sorted ascending by distance. Ties keep the order in which the
/// facilities appear across `datasets`. A non-positive radius yields an empty
/// list; an invalid origin or a NaN radius is an error.
pub fn find_nearby(
    origin: Coordinate,
    datasets: &[&Dataset],
    radius_miles: f64,
) -> Result<Vec<RankedFacility>> {
    origin.validate()?;
    if radius_miles.is_nan() {
        return Err(GuardCardError::InvalidRadius { value: radius_miles });
    }
    if radius_miles <= 0.0 {
        return Ok(Vec::new());
    }

    let mut scanned = 0usize;
    let mut ranked: Vec<RankedFacility> = Vec::new();

    for dataset in datasets {
        for facility in dataset.facilities() {
            scanned += 1;
            let distance = haversine_miles(origin, facility.coordinate);
            if distance <= radius_miles {
                ranked.push(RankedFacility {
                    facility: facility.clone(),
                    dataset: dataset.name().to_string(),
                    kind: dataset.kind(),
                    distance_miles: distance,
                });
            }
        }
    }

    // Dataset coordinates are validated on construction, so distances are finite
    // and total_cmp agrees with the numeric order. sort_by is stable.
    ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));

    tracing::debug!(
        origin = %origin,
        radius_miles,
        scanned,
        matched = ranked.len(),
        "nearby search complete"
    );

    Ok(ranked)
}

/// Parameters for a nearby search over a set of datasets
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    pub origin: Coordinate,
    pub radius_miles: f64,

    /// Only search datasets of this kind
    pub kind: Option<FacilityKind>,

    /// Truncate the ranked list to this many results
    pub limit: Option<usize>,
}

impl NearbyQuery {
    pub fn new(origin: Coordinate, radius_miles: f64) -> Self {
        Self { origin, radius_miles, kind: None, limit: None }
    }

    pub fn with_kind(mut self, kind: FacilityKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Run the query against `datasets`
    pub fn execute(&self, datasets: &[&Dataset]) -> Result<Vec<RankedFacility>> {
        let selected: Vec<&Dataset> = datasets
            .iter()
            .copied()
            .filter(|d| self.kind.map_or(true, |kind| d.kind() == kind))
            .collect();

        let mut ranked = find_nearby(self.origin, &selected, self.radius_miles)?;
        if let Some(limit) = self.limit {
            ranked.truncate(limit);
        }
        Ok(ranked)
    }
}

/// Case-insensitive match of `query` against name, city, address and postal
/// code. A blank query matches everything. Input order is preserved.
pub fn filter_by_text<'a>(facilities: &'a [Facility], query: &str) -> Vec<&'a Facility> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return facilities.iter().collect();
    }

    facilities
        .iter()
        .filter(|f| {
            [&f.name, &f.city, &f.address, &f.postal_code]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Bounding box around a result list, for framing a map view
pub fn result_bounds(results: &[RankedFacility]) -> Option<Rect> {
    let points: Vec<Point> = results.iter().map(|r| Point::from(r.facility.coordinate)).collect();
    MultiPoint::new(points).bounding_rect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(id: &str, lat: f64, lng: f64) -> Facility {
        Facility::new(id, format!("Facility {}", id), Coordinate::new(lat, lng))
    }

    fn dataset(kind: FacilityKind, facilities: Vec<Facility>) -> Dataset {
        let name = match kind {
            FacilityKind::TrainingCenter => "training_centers",
            FacilityKind::LiveScan => "livescan",
        };
        Dataset::new(name, kind, facilities).unwrap()
    }

    fn ids(results: &[RankedFacility]) -> Vec<&str> {
        results.iter().map(|r| r.facility.id.as_str()).collect()
    }

    #[test]
    fn test_zero_distance_sorts_first() {
        let origin = Coordinate::los_angeles();
        let ds = dataset(
            FacilityKind::TrainingCenter,
            vec![facility("far", 34.2, -118.4), facility("here", origin.lat, origin.lng)],
        );

        let results = find_nearby(origin, &[&ds], 50.0).unwrap();
        assert_eq!(ids(&results), vec!["here", "far"]);
        assert!(results[0].distance_miles.abs() < 1e-9);
    }

    #[test]
    fn test_filters_outside_radius() {
        let origin = Coordinate::los_angeles();
        let ds = dataset(
            FacilityKind::TrainingCenter,
            vec![facility("la", 34.05, -118.25), facility("sf", 37.7749, -122.4194)],
        );

        let results = find_nearby(origin, &[&ds], 50.0).unwrap();
        assert_eq!(ids(&results), vec!["la"]);

        let results = find_nearby(origin, &[&ds], 400.0).unwrap();
        assert_eq!(ids(&results), vec!["la", "sf"]);
    }

    #[test]
    fn test_merges_datasets_and_tags_source() {
        let origin = Coordinate::los_angeles();
        let training = dataset(FacilityKind::TrainingCenter, vec![facility("t1", 34.10, -118.30)]);
        let livescan = dataset(FacilityKind::LiveScan, vec![facility("l1", 34.06, -118.25)]);

        let results = find_nearby(origin, &[&training, &livescan], 50.0).unwrap();
        assert_eq!(ids(&results), vec!["l1", "t1"]);
        assert_eq!(results[0].dataset, "livescan");
        assert_eq!(results[0].kind, FacilityKind::LiveScan);
        assert_eq!(results[1].dataset, "training_centers");
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let origin = Coordinate::new(34.0, -118.0);
        let training = dataset(
            FacilityKind::TrainingCenter,
            vec![facility("b", 34.1, -118.0), facility("a", 34.1, -118.0)],
        );
        let livescan = dataset(FacilityKind::LiveScan, vec![facility("c", 34.1, -118.0)]);

        let results = find_nearby(origin, &[&training, &livescan], 50.0).unwrap();
        assert_eq!(ids(&results), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_facility_exactly_on_radius_is_kept() {
        let origin = Coordinate::los_angeles();
        let edge = facility("edge", 35.0, -118.2437);
        let radius = haversine_miles(origin, edge.coordinate);
        let ds = dataset(FacilityKind::TrainingCenter, vec![edge]);

        let results = find_nearby(origin, &[&ds], radius).unwrap();
        assert_eq!(ids(&results), vec!["edge"]);
        assert_eq!(results[0].distance_miles, radius);

        assert!(find_nearby(origin, &[&ds], radius - 1e-6).unwrap().is_empty());
    }

    #[test]
    fn test_non_positive_radius_is_empty() {
        let origin = Coordinate::los_angeles();
        let ds = dataset(FacilityKind::LiveScan, vec![facility("here", origin.lat, origin.lng)]);

        assert!(find_nearby(origin, &[&ds], 0.0).unwrap().is_empty());
        assert!(find_nearby(origin, &[&ds], -5.0).unwrap().is_empty());
    }

    #[test]
    fn test_nan_radius_is_error() {
        let ds = Dataset::empty("livescan", FacilityKind::LiveScan);
        let result = find_nearby(Coordinate::los_angeles(), &[&ds], f64::NAN);
        assert!(matches!(result, Err(GuardCardError::InvalidRadius { .. })));
    }

    #[test]
    fn test_invalid_origin_is_error() {
        let ds = Dataset::empty("livescan", FacilityKind::LiveScan);
        let result = find_nearby(Coordinate::new(f64::NAN, 0.0), &[&ds], 50.0);
        assert!(matches!(result, Err(GuardCardError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_empty_inputs() {
        let ds = Dataset::empty("training_centers", FacilityKind::TrainingCenter);
        assert!(find_nearby(Coordinate::los_angeles(), &[&ds], 50.0).unwrap().is_empty());
        assert!(find_nearby(Coordinate::los_angeles(), &[], 50.0).unwrap().is_empty());
    }

    #[test]
    fn test_query_kind_and_limit() {
        let origin = Coordinate::los_angeles();
        let training = dataset(
            FacilityKind::TrainingCenter,
            vec![facility("t1", 34.06, -118.25), facility("t2", 34.10, -118.30)],
        );
        let livescan = dataset(FacilityKind::LiveScan, vec![facility("l1", 34.05, -118.24)]);
        let all = [&training, &livescan];

        let results = NearbyQuery::new(origin, 50.0)
            .with_kind(FacilityKind::TrainingCenter)
            .execute(&all)
            .unwrap();
        assert_eq!(ids(&results), vec!["t1", "t2"]);

        let results = NearbyQuery::new(origin, 50.0).with_limit(2).execute(&all).unwrap();
        assert_eq!(ids(&results), vec!["l1", "t1"]);
    }

    #[test]
    fn test_filter_by_text() {
        let facilities = vec![
            facility("1", 34.0, -118.0).with_address("1 Harbor Blvd", "Long Beach", "90802"),
            facility("2", 37.0, -122.0).with_address("9 Market St", "San Francisco", "94103"),
        ];

        let hits = filter_by_text(&facilities, "long BEACH");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");

        assert_eq!(filter_by_text(&facilities, "941").len(), 1);
        assert_eq!(filter_by_text(&facilities, "  ").len(), 2);
        assert!(filter_by_text(&facilities, "sacramento").is_empty());
    }

    #[test]
    fn test_result_bounds() {
        let origin = Coordinate::los_angeles();
        let ds = dataset(
            FacilityKind::LiveScan,
            vec![facility("a", 34.0, -118.5), facility("b", 34.2, -118.1)],
        );
        let results = find_nearby(origin, &[&ds], 50.0).unwrap();

        let rect = result_bounds(&results).unwrap();
        assert_eq!(rect.min().x, -118.5);
        assert_eq!(rect.max().y, 34.2);

        assert!(result_bounds(&[]).is_none());
    }
}
