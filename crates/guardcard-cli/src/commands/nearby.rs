//! Nearby command implementation

use crate::cli::{Cli, NearbyArgs};
use crate::config_loader::{load_catalog, load_config};
use crate::errors::{invalid_coordinate, invalid_radius, location_unavailable};
use crate::output::OutputWriter;
use crate::output_types::{NearbyOutput, RankedRow};
use anyhow::Result;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use guardcard_core::config::{validate_radius, CliConfigOverrides};
use guardcard_core::location::{
    resolve_origin, FixedLocation, LocationProvider, NoLocation, ResolvedOrigin,
};
use guardcard_core::models::{Coordinate, RankedFacility};
use guardcard_core::search::{result_bounds, NearbyQuery};
use std::time::Duration;

pub async fn execute(cli: &Cli, args: &NearbyArgs, output: &OutputWriter) -> Result<()> {
    let radius = args
        .radius
        .map(|r| validate_radius(r).map_err(|e| invalid_radius(&e)))
        .transpose()?;

    let config = load_config(
        cli,
        CliConfigOverrides {
            search_radius_miles: radius,
            location_timeout_secs: args.timeout,
            ..Default::default()
        },
    )?;

    // A coordinate typed by the user is checked up front rather than
    // silently replaced by the fallback region
    let manual = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => {
            Some(Coordinate::new(lat, lng).validated().map_err(|e| invalid_coordinate(&e))?)
        }
        _ => None,
    };

    let provider: Box<dyn LocationProvider> = match manual {
        Some(coordinate) => Box::new(FixedLocation(coordinate)),
        None => Box::new(NoLocation),
    };
    let fallback = (!args.no_fallback).then_some(config.default_region.value);
    let timeout = Duration::from_secs(config.location_timeout_secs.value);

    let origin = resolve_origin(provider.as_ref(), timeout, fallback).await;
    let coordinate = match &origin {
        ResolvedOrigin::Located { coordinate } | ResolvedOrigin::Fallback { coordinate, .. } => {
            *coordinate
        }
        ResolvedOrigin::Unavailable { reason } => return Err(location_unavailable(reason).into()),
    };

    let catalog = load_catalog(&config)?;
    let radius_miles = config.search_radius_miles.value;

    let mut query = NearbyQuery::new(coordinate, radius_miles);
    if let Some(kind) = args.kind.to_kind() {
        query = query.with_kind(kind);
    }
    if let Some(limit) = args.limit {
        query = query.with_limit(limit.get());
    }
    let results = query.execute(&catalog.datasets())?;

    if args.geojson {
        return output.data(&feature_collection(coordinate, &results));
    }

    if output.is_json() {
        return output.result(NearbyOutput { origin, radius_miles, results });
    }

    if let ResolvedOrigin::Fallback { reason, .. } = &origin {
        output.warning(format!("{}; searching from the default region", reason));
    }

    output.section("Nearby Facilities");
    output.kv("Origin", coordinate);
    output.kv("Radius", format!("{} miles", radius_miles));

    if results.is_empty() {
        output.info(format!("No facilities within {} miles", radius_miles));
    } else {
        output.table(results.iter().map(RankedRow::from).collect());
    }

    Ok(())
}

/// Results as map markers, with the search origin as the first feature
fn feature_collection(origin: Coordinate, results: &[RankedFacility]) -> FeatureCollection {
    let mut features = Vec::with_capacity(results.len() + 1);

    let mut origin_props = JsonObject::new();
    origin_props.insert("role".to_string(), "origin".into());
    features.push(point_feature(origin, None, origin_props));

    for ranked in results {
        let mut props = JsonObject::new();
        props.insert("role".to_string(), "facility".into());
        if let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(ranked) {
            props.extend(fields.into_iter().filter(|(key, _)| key != "coordinate"));
        }
        features.push(point_feature(
            ranked.facility.coordinate,
            Some(ranked.facility.id.clone()),
            props,
        ));
    }

    let bbox = result_bounds(results)
        .map(|rect| vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]);

    FeatureCollection { bbox, features, foreign_members: None }
}

fn point_feature(coordinate: Coordinate, id: Option<String>, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![coordinate.lng, coordinate.lat]))),
        id: id.map(Id::String),
        properties: Some(properties),
        foreign_members: None,
    }
}
