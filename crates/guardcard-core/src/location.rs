//! Port for obtaining the user's location.
//!
//! Location lookups are slow and may fail; the search itself never is. This
//! module turns whatever the provider does into a [`ResolvedOrigin`] so the
//! caller can decide what to show when no coordinate is available.

use crate::models::Coordinate;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Why a location provider could not produce a coordinate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),

    #[error("Location request timed out")]
    Timeout,
}

/// Source of the device or user location
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// A provider that always answers with a known coordinate (manual input)
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// A provider for environments with no location service at all
#[derive(Debug, Clone, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unavailable("no location service configured".to_string()))
    }
}

/// Outcome of trying to establish a search origin
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResolvedOrigin {
    /// The provider returned a valid coordinate
    Located { coordinate: Coordinate },

    /// The provider failed and the default region is used instead
    Fallback { coordinate: Coordinate, reason: String },

    /// No origin is available; nearby results cannot be computed
    Unavailable { reason: String },
}

impl ResolvedOrigin {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            ResolvedOrigin::Located { coordinate } => Some(*coordinate),
            ResolvedOrigin::Fallback { coordinate, .. } => Some(*coordinate),
            ResolvedOrigin::Unavailable { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ResolvedOrigin::Fallback { .. })
    }
}

/// Ask `provider` for a location, waiting at most `timeout`.
///
/// On failure the `fallback` region is used if one is given. A coordinate
/// that fails validation counts as a failure. There are no retries.
pub async fn resolve_origin(
    provider: &dyn LocationProvider,
    timeout: Duration,
    fallback: Option<Coordinate>,
) -> ResolvedOrigin {
    let outcome = match tokio::time::timeout(timeout, provider.current_location()).await {
        Ok(Ok(coordinate)) => match coordinate.validate() {
            Ok(()) => return ResolvedOrigin::Located { coordinate },
            Err(e) => LocationError::Unavailable(e.to_string()),
        },
        Ok(Err(e)) => e,
        Err(_) => LocationError::Timeout,
    };

    tracing::info!("Could not determine location: {}", outcome);

    match fallback {
        Some(coordinate) => ResolvedOrigin::Fallback { coordinate, reason: outcome.to_string() },
        None => ResolvedOrigin::Unavailable { reason: outcome.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Denied;

    #[async_trait]
    impl LocationProvider for Denied {
        async fn current_location(&self) -> Result<Coordinate, LocationError> {
            Err(LocationError::PermissionDenied)
        }
    }

    struct Slow;

    #[async_trait]
    impl LocationProvider for Slow {
        async fn current_location(&self) -> Result<Coordinate, LocationError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Coordinate::los_angeles())
        }
    }

    const TIMEOUT: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn test_fixed_location_is_located() {
        let sf = Coordinate::new(37.7749, -122.4194);
        let origin = resolve_origin(&FixedLocation(sf), TIMEOUT, None).await;
        assert_eq!(origin, ResolvedOrigin::Located { coordinate: sf });
        assert_eq!(origin.coordinate(), Some(sf));
    }

    #[tokio::test]
    async fn test_permission_denied_falls_back() {
        let fallback = Coordinate::los_angeles();
        let origin = resolve_origin(&Denied, TIMEOUT, Some(fallback)).await;

        assert!(origin.is_fallback());
        assert_eq!(origin.coordinate(), Some(fallback));
    }

    #[tokio::test]
    async fn test_timeout_without_fallback_is_unavailable() {
        let origin = resolve_origin(&Slow, TIMEOUT, None).await;
        match origin {
            ResolvedOrigin::Unavailable { reason } => assert!(reason.contains("timed out")),
            other => panic!("Expected Unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_provider_coordinate_is_rejected() {
        let bad = FixedLocation(Coordinate::new(f64::NAN, 0.0));
        let origin = resolve_origin(&bad, TIMEOUT, None).await;
        assert_eq!(origin.coordinate(), None);
    }

    #[tokio::test]
    async fn test_no_location_provider() {
        let origin = resolve_origin(&NoLocation, TIMEOUT, Some(Coordinate::los_angeles())).await;
        assert!(origin.is_fallback());
    }
}
