use clap::{Parser, Subcommand, ValueEnum};
use guardcard_core::models::FacilityKind;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Guard Card - California security guard registration study tool
#[derive(Parser, Debug)]
#[command(name = "guardcard")]
#[command(about = "Find Guard Card training and LiveScan locations, practice for the exam", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./guardcard.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory with training_centers.json, livescan.json and quizzes.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List facilities near a location, closest first
    Nearby(NearbyArgs),

    /// Search facilities by name, city, address or ZIP code
    Search(SearchArgs),

    /// List loaded facility datasets
    Datasets,

    /// Practice quizzes
    Quiz(QuizArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

/// Facility dataset selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Training facilities
    Training,
    /// LiveScan fingerprint locations
    Livescan,
    /// Both
    All,
}

impl KindArg {
    pub fn to_kind(self) -> Option<FacilityKind> {
        match self {
            KindArg::Training => Some(FacilityKind::TrainingCenter),
            KindArg::Livescan => Some(FacilityKind::LiveScan),
            KindArg::All => None,
        }
    }
}

#[derive(Parser, Debug)]
pub struct NearbyArgs {
    /// Latitude of your location
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of your location
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Search radius in miles
    #[arg(long, short = 'r', allow_negative_numbers = true)]
    pub radius: Option<f64>,

    /// Which facilities to include
    #[arg(long, value_enum, default_value = "all")]
    pub kind: KindArg,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub limit: Option<NonZeroUsize>,

    /// Print results as a GeoJSON FeatureCollection (takes precedence over --json)
    #[arg(long)]
    pub geojson: bool,

    /// Fail instead of searching from the default region when no location is given
    #[arg(long)]
    pub no_fallback: bool,

    /// Seconds to wait for a location fix
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Text to match
    pub query: String,

    /// Which facilities to include
    #[arg(long, value_enum, default_value = "all")]
    pub kind: KindArg,
}

#[derive(Parser, Debug)]
pub struct QuizArgs {
    #[command(subcommand)]
    pub command: QuizCommand,
}

#[derive(Subcommand, Debug)]
pub enum QuizCommand {
    /// List quiz categories
    List,

    /// Take one or more quizzes and show session statistics
    Take(TakeArgs),
}

#[derive(Parser, Debug)]
pub struct TakeArgs {
    /// Quiz category ids, in the order to take them
    #[arg(required = true)]
    pub categories: Vec<String>,

    /// Answers as comma-separated choice numbers (starting at 1), one
    /// --answers per category. Prompts interactively when omitted.
    #[arg(long, value_name = "LIST")]
    pub answers: Vec<String>,
}
