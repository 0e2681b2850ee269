//! SVG map assembly: projected town shapes plus the fixed legend.

use crate::palette::{CategoryPalette, Rgb, UnknownCategory};
use svg::node::element::path::Data;
use svg::node::element::{Path, Rectangle, Text, Title};
use svg::Document;
use townmap_core::projection::ConicConformal;
use townmap_core::vector::{polygonal_rings, Feature, FeatureCollection};
use townmap_core::{Error, Result};

/// Property carrying the category code.
pub const TYPE_PROPERTY: &str = "TYPE";
/// Property carrying the town display name.
pub const TOWN_PROPERTY: &str = "TOWN";

// Legend layout in surface units. Swatches sit in a band near the bottom
// edge, labels under them, the caption heading above.
const LEGEND_SWATCH: u32 = 28;
const LEGEND_STEP: u32 = 50;
const LEGEND_MARGIN: u32 = 10;
const LEGEND_BAND: u32 = 50;
const LABEL_BASELINE: u32 = 8;
const CAPTION_RISE: u32 = 60;
const LABEL_FONT_SIZE: u32 = 12;
const CAPTION_FONT_SIZE: u32 = 14;

/// Fixed drawing constants for the map surface.
///
/// These are design constants, not values derived from the data; the surface
/// never auto-fits the input's extent.
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Surface width in logical units
    pub width: u32,
    /// Surface height in logical units
    pub height: u32,
    /// Shape outline color
    pub stroke: Rgb,
    /// Shape outline width
    pub stroke_width: f64,
    /// CSS border drawn around the surface
    pub border: &'static str,
    /// Legend caption heading
    pub caption: &'static str,
    /// Policy for category codes outside the palette domain
    pub unknown: UnknownCategory,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            width: 960,
            height: 500,
            stroke: Rgb::BLACK,
            stroke_width: 0.5,
            border: "2px solid steelblue",
            caption: "Form of Government",
            unknown: UnknownCategory::default(),
        }
    }
}

/// Render a feature collection into an SVG document.
///
/// Emits one path per polygonal feature, in input order (later features paint
/// over earlier ones), filled by the feature's category code and carrying its
/// display name as a tooltip. The legend enumerates the palette, not the
/// data, so it is complete even for an empty collection.
pub fn render(
    collection: &FeatureCollection,
    projection: &ConicConformal,
    palette: &CategoryPalette,
    style: &MapStyle,
) -> Result<Document> {
    let mut document = Document::new()
        .set("width", style.width)
        .set("height", style.height)
        .set("style", format!("border: {}", style.border));

    for feature in collection.iter() {
        if let Some(path) = feature_path(feature, projection, palette, style)? {
            document = document.add(path);
        }
    }

    for (index, entry) in palette.entries().enumerate() {
        let x = LEGEND_MARGIN + index as u32 * LEGEND_STEP;
        document = document
            .add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", style.height - LEGEND_BAND)
                    .set("width", LEGEND_SWATCH)
                    .set("height", LEGEND_SWATCH)
                    .set("stroke", style.stroke.css())
                    .set("stroke-width", style.stroke_width)
                    .set("fill", entry.color.css()),
            )
            .add(
                Text::new(entry.label)
                    .set("x", x)
                    .set("y", style.height - LABEL_BASELINE)
                    .set("font-size", LABEL_FONT_SIZE),
            );
    }

    document = document.add(
        Text::new(style.caption)
            .set("x", LEGEND_MARGIN)
            .set("y", style.height - CAPTION_RISE)
            .set("font-size", CAPTION_FONT_SIZE)
            .set("font-weight", "bold"),
    );

    Ok(document)
}

/// Build the path element for one feature, or `None` when there is nothing
/// to draw.
fn feature_path(
    feature: &Feature,
    projection: &ConicConformal,
    palette: &CategoryPalette,
    style: &MapStyle,
) -> Result<Option<Path>> {
    let geometry = match &feature.geometry {
        Some(geometry) => geometry,
        None => return Ok(None),
    };

    let mut data = Data::new();
    let mut drawn = false;
    for ring in polygonal_rings(geometry) {
        let coords = &ring.0;
        if coords.is_empty() {
            continue;
        }
        // A closed ring repeats its first coordinate; the `Z` command
        // supplies the closing segment instead.
        let count = if ring.is_closed() && coords.len() > 1 {
            coords.len() - 1
        } else {
            coords.len()
        };
        for (i, coord) in coords[..count].iter().enumerate() {
            let (x, y) = projection.project(coord.x, coord.y);
            data = if i == 0 {
                data.move_to((x, y))
            } else {
                data.line_to((x, y))
            };
        }
        data = data.close();
        drawn = true;
    }
    if !drawn {
        return Ok(None);
    }

    let fill = fill_color(feature, palette, style)?;
    let name = feature.string_property(TOWN_PROPERTY).unwrap_or("");
    let path = Path::new()
        .set("d", data)
        .set("stroke", style.stroke.css())
        .set("stroke-width", style.stroke_width)
        .set("fill", fill.css())
        .add(Title::new(name));
    Ok(Some(path))
}

/// Resolve a feature's fill from its category code and the unknown-code
/// policy.
fn fill_color(feature: &Feature, palette: &CategoryPalette, style: &MapStyle) -> Result<Rgb> {
    let code = feature.string_property(TYPE_PROPERTY);
    if let Some(entry) = code.and_then(|code| palette.lookup(code)) {
        return Ok(entry.color);
    }
    match style.unknown {
        UnknownCategory::Fallback(color) => Ok(color),
        UnknownCategory::Strict => match code {
            Some(code) => Err(Error::UnknownCategory(code.to_string())),
            None => Err(Error::MissingProperty(TYPE_PROPERTY.to_string())),
        },
    }
}
