//! Guard Card Core - Domain models, facility search, and configuration
//!
//! This crate contains the domain logic for the Guard Card study tool: facility
//! datasets, the nearby-facility search, practice quiz scoring, and the port
//! through which callers obtain the user's location.

pub mod catalog;
pub mod config;
pub mod distance;
pub mod error;
pub mod location;
pub mod models;
pub mod quiz;
pub mod search;

pub use error::{GuardCardError, Result};
