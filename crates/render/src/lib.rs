//! # Townmap Render
//!
//! Choropleth drawing for townmap.
//!
//! Provides the fixed government-form palette and the SVG assembly that turns
//! a projected `FeatureCollection` into a finished map with a legend. The main
//! entry point is [`render`].
//!
//! ## Usage
//!
//! ```ignore
//! use townmap_core::{read_geojson, ConicConformal};
//! use townmap_render::{render, CategoryPalette, MapStyle};
//!
//! let towns = read_geojson("json/TOWNS_POLYM.geo.json")?;
//! let document = render(
//!     &towns,
//!     &ConicConformal::mass_state_plane(),
//!     &CategoryPalette::government_forms(),
//!     &MapStyle::default(),
//! )?;
//! ```

mod map;
mod palette;

pub use map::{render, MapStyle, TOWN_PROPERTY, TYPE_PROPERTY};
pub use palette::{CategoryEntry, CategoryPalette, Rgb, UnknownCategory};
