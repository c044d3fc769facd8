//! Static facility and quiz data, loaded once at startup.
//!
//! The crate ships a default catalog compiled in from `data/`. A data
//! directory can override any of the three files; files missing from the
//! directory fall back to the bundled copy.

use crate::error::{GuardCardError, Result};
use crate::models::{Dataset, Facility, FacilityKind, QuizCategory};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const TRAINING_CENTERS_FILE: &str = "training_centers.json";
pub const LIVESCAN_FILE: &str = "livescan.json";
pub const QUIZZES_FILE: &str = "quizzes.json";

const BUNDLED_TRAINING_CENTERS: &str = include_str!("../data/training_centers.json");
const BUNDLED_LIVESCAN: &str = include_str!("../data/livescan.json");
const BUNDLED_QUIZZES: &str = include_str!("../data/quizzes.json");

/// On-disk layout of a facility dataset
#[derive(Debug, Deserialize)]
struct DatasetFile {
    name: String,
    kind: FacilityKind,
    facilities: Vec<Facility>,
}

/// On-disk layout of the quiz bank
#[derive(Debug, Deserialize)]
struct QuizFile {
    categories: Vec<QuizCategory>,
}

/// Every dataset and quiz category available to the application
#[derive(Debug, Clone)]
pub struct Catalog {
    datasets: Vec<Dataset>,
    quizzes: Vec<QuizCategory>,
}

impl Catalog {
    /// Catalog compiled into the binary
    pub fn bundled() -> Result<Self> {
        let origin = Path::new("<bundled>");
        Ok(Self {
            datasets: vec![
                parse_dataset(BUNDLED_TRAINING_CENTERS, &origin.join(TRAINING_CENTERS_FILE))?,
                parse_dataset(BUNDLED_LIVESCAN, &origin.join(LIVESCAN_FILE))?,
            ],
            quizzes: parse_quizzes(BUNDLED_QUIZZES, &origin.join(QUIZZES_FILE))?,
        })
    }

    /// Load from a data directory, using bundled data for missing files
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(GuardCardError::ConfigInvalid {
                key: "data_dir".to_string(),
                reason: format!("{} is not a directory", dir.display()),
            });
        }

        let training = read_or_bundled(dir, TRAINING_CENTERS_FILE, BUNDLED_TRAINING_CENTERS)?;
        let livescan = read_or_bundled(dir, LIVESCAN_FILE, BUNDLED_LIVESCAN)?;
        let quizzes = read_or_bundled(dir, QUIZZES_FILE, BUNDLED_QUIZZES)?;

        let catalog = Self {
            datasets: vec![
                parse_dataset(&training.1, &training.0)?,
                parse_dataset(&livescan.1, &livescan.0)?,
            ],
            quizzes: parse_quizzes(&quizzes.1, &quizzes.0)?,
        };

        tracing::info!(
            "Loaded catalog from {}: {} facilities, {} quiz categories",
            dir.display(),
            catalog.facility_count(),
            catalog.quizzes.len()
        );

        Ok(catalog)
    }

    pub fn datasets(&self) -> Vec<&Dataset> {
        self.datasets.iter().collect()
    }

    pub fn dataset(&self, name: &str) -> Result<&Dataset> {
        self.datasets
            .iter()
            .find(|d| d.name() == name)
            .ok_or_else(|| GuardCardError::DatasetNotFound { name: name.to_string() })
    }

    /// Datasets of one kind, or all of them when `kind` is `None`
    pub fn datasets_of(&self, kind: Option<FacilityKind>) -> Vec<&Dataset> {
        self.datasets
            .iter()
            .filter(|d| kind.map_or(true, |k| d.kind() == k))
            .collect()
    }

    pub fn facility_count(&self) -> usize {
        self.datasets.iter().map(Dataset::len).sum()
    }

    pub fn quizzes(&self) -> &[QuizCategory] {
        &self.quizzes
    }

    pub fn quiz(&self, id: &str) -> Result<&QuizCategory> {
        self.quizzes
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| GuardCardError::QuizNotFound { id: id.to_string() })
    }
}

fn read_or_bundled(dir: &Path, file: &str, bundled: &str) -> Result<(PathBuf, String)> {
    let path = dir.join(file);
    if path.exists() {
        let content = fs::read_to_string(&path)?;
        Ok((path, content))
    } else {
        tracing::debug!("{} not found, using bundled copy", path.display());
        Ok((Path::new("<bundled>").join(file), bundled.to_string()))
    }
}

/// Parse a facility dataset from JSON; `path` is only used in error messages
pub fn parse_dataset(json: &str, path: &Path) -> Result<Dataset> {
    let file: DatasetFile = serde_json::from_str(json).map_err(|e| GuardCardError::DatasetParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Dataset::new(file.name, file.kind, file.facilities)
}

/// Load a facility dataset from a JSON file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    parse_dataset(&content, path)
}

/// Parse the quiz bank, checking that every answer key points at a choice
pub fn parse_quizzes(json: &str, path: &Path) -> Result<Vec<QuizCategory>> {
    let parse_error = |reason: String| GuardCardError::DatasetParse {
        path: path.to_path_buf(),
        reason,
    };

    let file: QuizFile = serde_json::from_str(json).map_err(|e| parse_error(e.to_string()))?;

    for category in &file.categories {
        for question in &category.questions {
            if question.answer >= question.choices.len() {
                return Err(parse_error(format!(
                    "question {} in {} has answer {} but only {} choices",
                    question.id,
                    category.id,
                    question.answer,
                    question.choices.len()
                )));
            }
        }
    }

    Ok(file.categories)
}
