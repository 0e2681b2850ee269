//! GeoJSON input
//!
//! Reads a GeoJSON feature collection into the crate's vector model. Geometry
//! goes through the `geojson` -> `geo-types` conversion; properties are mapped
//! onto [`AttributeValue`]s. A load failure (missing file, malformed JSON,
//! wrong top-level object) surfaces as an error, never as an empty collection.

use crate::error::{Error, Result};
use crate::vector::{AttributeValue, Feature, FeatureCollection};
use geojson::GeoJson;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read a GeoJSON file into a FeatureCollection.
///
/// The file must contain a `FeatureCollection` object; a bare `Feature` or
/// `Geometry` is rejected.
pub fn read_geojson<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
    let text = fs::read_to_string(path.as_ref())?;
    read_geojson_from_str(&text)
}

/// Parse GeoJSON text into a FeatureCollection.
///
/// Same as [`read_geojson`] but operates on in-memory text.
pub fn read_geojson_from_str(text: &str) -> Result<FeatureCollection> {
    let geojson: GeoJson = text.parse()?;
    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(_) => return Err(Error::NotACollection("Feature")),
        GeoJson::Geometry(_) => return Err(Error::NotACollection("Geometry")),
    };

    let mut features = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        features.push(convert_feature(feature)?);
    }
    Ok(FeatureCollection { features })
}

/// Convert one GeoJSON feature into the vector model.
fn convert_feature(feature: geojson::Feature) -> Result<Feature> {
    let geometry = match feature.geometry {
        Some(geometry) => Some(geo_types::Geometry::<f64>::try_from(geometry.value)?),
        None => None,
    };

    let mut properties = HashMap::new();
    if let Some(object) = feature.properties {
        for (key, value) in object {
            properties.insert(key, attribute_from_json(value));
        }
    }

    let id = match feature.id {
        Some(geojson::feature::Id::String(s)) => Some(s),
        Some(geojson::feature::Id::Number(n)) => Some(n.to_string()),
        None => None,
    };

    Ok(Feature {
        geometry,
        properties,
        id,
    })
}

/// Map a JSON property value onto an attribute.
///
/// Integral numbers become `Int`, other numbers `Float`. Arrays and nested
/// objects are carried as their JSON text; consumers only read scalars.
fn attribute_from_json(value: serde_json::Value) -> AttributeValue {
    use serde_json::Value;

    match value {
        Value::Null => AttributeValue::Null,
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                AttributeValue::Int(i)
            } else {
                AttributeValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => AttributeValue::String(s),
        other => AttributeValue::String(other.to_string()),
    }
}
