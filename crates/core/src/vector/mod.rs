//! Vector data model: features, feature collections and their attributes.

use geo_types::{Geometry, LineString, Polygon};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    /// String content, if this attribute is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A geographic feature with geometry and attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Feature geometry
    pub geometry: Option<Geometry<f64>>,
    /// Feature attributes
    pub properties: HashMap<String, AttributeValue>,
    /// Optional feature ID
    pub id: Option<String>,
}

impl Feature {
    /// Create a new feature with geometry
    pub fn new(geometry: Geometry<f64>) -> Self {
        Self {
            geometry: Some(geometry),
            properties: HashMap::new(),
            id: None,
        }
    }

    /// Create a feature with no geometry
    pub fn empty() -> Self {
        Self {
            geometry: None,
            properties: HashMap::new(),
            id: None,
        }
    }

    /// Set an attribute
    pub fn set_property(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.properties.insert(key.into(), value);
    }

    /// Get an attribute
    pub fn get_property(&self, key: &str) -> Option<&AttributeValue> {
        self.properties.get(key)
    }

    /// Get a string attribute's content
    pub fn string_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(AttributeValue::as_str)
    }
}

/// Ordered collection of features.
///
/// Iteration order is insertion order. Consumers rely on it: shapes are drawn
/// first-to-last, so later features paint over earlier ones where they overlap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Geographic bounding box (min_x, min_y, max_x, max_y) over all
    /// polygonal geometry, or `None` when the collection has none.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for feature in &self.features {
            let geometry = match &feature.geometry {
                Some(geometry) => geometry,
                None => continue,
            };
            for ring in polygonal_rings(geometry) {
                for coord in &ring.0 {
                    let b = bounds.get_or_insert((coord.x, coord.y, coord.x, coord.y));
                    b.0 = b.0.min(coord.x);
                    b.1 = b.1.min(coord.y);
                    b.2 = b.2.max(coord.x);
                    b.3 = b.3.max(coord.y);
                }
            }
        }
        bounds
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

/// Rings of a polygonal geometry in drawing order: each polygon's exterior
/// first, then its interiors. Non-polygonal geometry yields no rings.
pub fn polygonal_rings(geometry: &Geometry<f64>) -> Vec<&LineString<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => rings_of(polygon),
        Geometry::MultiPolygon(multi) => multi.0.iter().flat_map(rings_of).collect(),
        _ => Vec::new(),
    }
}

fn rings_of(polygon: &Polygon<f64>) -> Vec<&LineString<f64>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors().iter())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{MultiPolygon, Point};

    fn square(cx: f64, cy: f64, half: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (cx - half, cy - half),
                (cx + half, cy - half),
                (cx + half, cy + half),
                (cx - half, cy + half),
                (cx - half, cy - half),
            ]),
            vec![],
        )
    }

    #[test]
    fn string_property_access() {
        let mut feature = Feature::empty();
        feature.set_property("TOWN", AttributeValue::String("Example".to_string()));
        feature.set_property("POP", AttributeValue::Int(12_000));

        assert_eq!(feature.string_property("TOWN"), Some("Example"));
        assert_eq!(feature.string_property("POP"), None);
        assert_eq!(feature.string_property("MISSING"), None);
    }

    #[test]
    fn collection_preserves_order() {
        let mut collection = FeatureCollection::new();
        for name in ["a", "b", "c"] {
            let mut feature = Feature::empty();
            feature.set_property("TOWN", AttributeValue::String(name.to_string()));
            collection.push(feature);
        }

        let names: Vec<_> = collection
            .iter()
            .map(|f| f.string_property("TOWN").unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn bounds_over_polygons() {
        let mut collection = FeatureCollection::new();
        collection.push(Feature::new(Geometry::Polygon(square(-71.0, 42.0, 0.5))));
        collection.push(Feature::new(Geometry::MultiPolygon(MultiPolygon(vec![
            square(-70.0, 41.5, 0.25),
        ]))));

        let (min_x, min_y, max_x, max_y) = collection.bounds().unwrap();
        assert_eq!(min_x, -71.5);
        assert_eq!(min_y, 41.25);
        assert_eq!(max_x, -69.75);
        assert_eq!(max_y, 42.5);
    }

    #[test]
    fn bounds_ignores_non_polygonal_geometry() {
        let mut collection = FeatureCollection::new();
        collection.push(Feature::new(Geometry::Point(Point::new(0.0, 0.0))));
        collection.push(Feature::empty());
        assert_eq!(collection.bounds(), None);
    }

    #[test]
    fn rings_include_interiors() {
        let outer = LineString::from(vec![
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (0.0, 4.0),
            (0.0, 0.0),
        ]);
        let hole = LineString::from(vec![
            (1.0, 1.0),
            (2.0, 1.0),
            (2.0, 2.0),
            (1.0, 2.0),
            (1.0, 1.0),
        ]);
        let geometry = Geometry::Polygon(Polygon::new(outer, vec![hole]));
        assert_eq!(polygonal_rings(&geometry).len(), 2);

        let point = Geometry::Point(Point::new(0.0, 0.0));
        assert!(polygonal_rings(&point).is_empty());
    }
}
