//! Facility reference records and the ranked results derived from them.

use super::Coordinate;
use crate::error::{GuardCardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Category of facility a dataset holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityKind {
    /// BSIS-approved Guard Card training facility
    TrainingCenter,
    /// LiveScan fingerprinting location
    LiveScan,
}

impl FacilityKind {
    pub fn label(&self) -> &'static str {
        match self {
            FacilityKind::TrainingCenter => "Training Center",
            FacilityKind::LiveScan => "LiveScan",
        }
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable facility record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Unique within its dataset
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
    pub coordinate: Coordinate,

    /// Category-specific details (courses, license number, rating, hours).
    /// Never interpreted by the search.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Facility {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            city: String::new(),
            postal_code: String::new(),
            phone: String::new(),
            coordinate,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_address(
        mut self,
        address: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        self.address = address.into();
        self.city = city.into();
        self.postal_code = postal_code.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Single-line postal address
    pub fn full_address(&self) -> String {
        [self.address.as_str(), self.city.as_str(), self.postal_code.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A named, read-only list of facilities of one kind
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    kind: FacilityKind,
    facilities: Vec<Facility>,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate ids and invalid coordinates
    pub fn new(
        name: impl Into<String>,
        kind: FacilityKind,
        facilities: Vec<Facility>,
    ) -> Result<Self> {
        let name = name.into();
        let mut seen = HashSet::with_capacity(facilities.len());

        for facility in &facilities {
            if !seen.insert(facility.id.as_str()) {
                return Err(GuardCardError::DuplicateFacilityId {
                    dataset: name,
                    id: facility.id.clone(),
                });
            }
            facility.coordinate.validate()?;
        }

        Ok(Self { name, kind, facilities })
    }

    pub fn empty(name: impl Into<String>, kind: FacilityKind) -> Self {
        Self { name: name.into(), kind, facilities: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FacilityKind {
        self.kind
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

/// A facility annotated with its distance from a search origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFacility {
    #[serde(flatten)]
    pub facility: Facility,

    /// Name of the dataset the facility came from
    pub dataset: String,

    pub kind: FacilityKind,

    pub distance_miles: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str) -> Facility {
        Facility::new(id, format!("Facility {}", id), Coordinate::new(34.0, -118.0))
    }

    #[test]
    fn test_dataset_rejects_duplicate_ids() {
        let err = Dataset::new(
            "training_centers",
            FacilityKind::TrainingCenter,
            vec![sample("a"), sample("b"), sample("a")],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            GuardCardError::DuplicateFacilityId { ref id, .. } if id == "a"
        ));
    }

    #[test]
    fn test_dataset_rejects_invalid_coordinate() {
        let bad = Facility::new("x", "Nowhere", Coordinate::new(120.0, 0.0));
        let result = Dataset::new("livescan", FacilityKind::LiveScan, vec![bad]);
        assert!(matches!(result, Err(GuardCardError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_full_address_skips_empty_parts() {
        let f = sample("a").with_address("100 Main St", "Fresno", "");
        assert_eq!(f.full_address(), "100 Main St, Fresno");
    }

    #[test]
    fn test_ranked_facility_serializes_flat() {
        let ranked = RankedFacility {
            facility: sample("a").with_metadata("rating", serde_json::json!(4.5)),
            dataset: "training_centers".to_string(),
            kind: FacilityKind::TrainingCenter,
            distance_miles: 1.25,
        };

        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["id"], "a");
        assert_eq!(value["distance_miles"], 1.25);
        assert_eq!(value["kind"], "training_center");
        assert_eq!(value["metadata"]["rating"], 4.5);
    }
}
