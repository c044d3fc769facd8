use guardcard_core::location::ResolvedOrigin;
use guardcard_core::models::{Facility, FacilityKind, QuizScore, QuizStats, RankedFacility};
use serde::Serialize;
use tabled::Tabled;

/// Output for nearby command
#[derive(Debug, Serialize)]
pub struct NearbyOutput {
    pub origin: ResolvedOrigin,
    pub radius_miles: f64,
    pub results: Vec<RankedFacility>,
}

/// Output for search command
#[derive(Debug, Serialize)]
pub struct SearchOutput<'a> {
    pub query: String,
    pub results: Vec<SearchHit<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SearchHit<'a> {
    pub dataset: &'a str,
    pub kind: FacilityKind,
    #[serde(flatten)]
    pub facility: &'a Facility,
}

/// Output for datasets command
#[derive(Debug, Serialize)]
pub struct DatasetsOutput {
    pub datasets: Vec<DatasetInfo>,
    pub quiz_categories: usize,
}

#[derive(Debug, Serialize, Tabled)]
pub struct DatasetInfo {
    #[tabled(rename = "Dataset")]
    pub name: String,
    #[tabled(rename = "Kind")]
    pub kind: FacilityKind,
    #[tabled(rename = "Facilities")]
    pub facility_count: usize,
}

/// Output for quiz list command
#[derive(Debug, Serialize, Tabled)]
pub struct QuizInfo {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Questions")]
    pub question_count: usize,
    #[tabled(rename = "Minutes")]
    pub estimated_minutes: u32,
}

/// Output for quiz take command
#[derive(Debug, Serialize)]
pub struct QuizTakeOutput {
    pub scores: Vec<QuizScore>,
    pub stats: QuizStats,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub search_radius_miles: ConfigEntry<f64>,
    pub default_region: ConfigEntry<String>,
    pub location_timeout_secs: ConfigEntry<u64>,
    pub data_dir: ConfigEntry<Option<String>>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry<T> {
    pub value: T,
    pub source: String,
}

/// Table row for a ranked facility
#[derive(Debug, Tabled)]
pub struct RankedRow {
    #[tabled(rename = "Miles")]
    pub distance: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub kind: FacilityKind,
    #[tabled(rename = "Address")]
    pub address: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
}

impl From<&RankedFacility> for RankedRow {
    fn from(r: &RankedFacility) -> Self {
        Self {
            distance: format!("{:.1}", r.distance_miles),
            name: r.facility.name.clone(),
            kind: r.kind,
            address: r.facility.full_address(),
            phone: r.facility.phone.clone(),
        }
    }
}

/// Table row for a text search hit
#[derive(Debug, Tabled)]
pub struct FacilityRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub kind: FacilityKind,
    #[tabled(rename = "Address")]
    pub address: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
}

impl From<&SearchHit<'_>> for FacilityRow {
    fn from(hit: &SearchHit<'_>) -> Self {
        Self {
            id: hit.facility.id.clone(),
            name: hit.facility.name.clone(),
            kind: hit.kind,
            address: hit.facility.full_address(),
            phone: hit.facility.phone.clone(),
        }
    }
}
