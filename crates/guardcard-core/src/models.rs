pub mod coordinate;
pub mod facility;
pub mod quiz;

pub use coordinate::Coordinate;
pub use facility::{Dataset, Facility, FacilityKind, RankedFacility};
pub use quiz::{Question, QuizCategory, QuizScore, QuizStats};
