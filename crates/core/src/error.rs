//! Error types for townmap

use thiserror::Error;

/// Main error type for townmap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    Json(#[from] geojson::Error),

    #[error("Expected a FeatureCollection, got a {0}")]
    NotACollection(&'static str),

    #[error("Unknown category code: {0:?}")]
    UnknownCategory(String),

    #[error("Missing property: {0}")]
    MissingProperty(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for townmap operations
pub type Result<T> = std::result::Result<T, Error>;
