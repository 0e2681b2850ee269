//! Geographic-to-surface projection.
//!
//! Converts (longitude, latitude) pairs in degrees into planar surface
//! coordinates with a spherical Lambert conformal conic projection, preceded
//! by a globe rotation and followed by a uniform scale and translation.
//! Surface y grows downward, so north ends up at the top of the drawing.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Latitudes are kept this far away from the poles so the conic formula
/// stays finite.
const POLE_EPSILON: f64 = 1e-6;

/// Lambert conformal conic projection from geographic to surface coordinates.
///
/// The transform is a fixed pipeline:
/// 1. rotate the globe by (`rotate_lon`, `rotate_lat`) so the region of
///    interest sits near the projection origin,
/// 2. apply the conformal conic projection defined by the two standard
///    parallels,
/// 3. scale by `scale` and translate to (`translate_x`, `translate_y`),
///    flipping y so that north is up.
///
/// All parameters are constants calibrated for one regional dataset; the
/// projection never adapts to the input's extent. Feeding coordinates from a
/// different region produces a misplaced or clipped drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConicConformal {
    /// Southern standard parallel in degrees
    pub parallel_south: f64,
    /// Northern standard parallel in degrees
    pub parallel_north: f64,
    /// Globe rotation in longitude, in degrees
    pub rotate_lon: f64,
    /// Globe rotation in latitude, in degrees
    pub rotate_lat: f64,
    /// Uniform scale from unit-sphere coordinates to surface units
    pub scale: f64,
    /// Horizontal surface offset of the projection origin
    pub translate_x: f64,
    /// Vertical surface offset of the projection origin
    pub translate_y: f64,
}

impl ConicConformal {
    /// Projection calibrated for Massachusetts towns on a 960x500 surface.
    ///
    /// Standard parallels 41°43' and 42°41' and grid origin 71°30' W, 41° N
    /// (the NAD 83 State Plane mainland zone constants); scale and
    /// translation place the state within the fixed surface.
    pub fn mass_state_plane() -> Self {
        Self {
            parallel_south: 41.0 + 43.0 / 60.0,
            parallel_north: 42.0 + 41.0 / 60.0,
            rotate_lon: 71.5,
            rotate_lat: -41.0,
            scale: 13_000.0,
            translate_x: 500.0,
            translate_y: 560.0,
        }
    }

    /// Project a geographic coordinate (degrees) to surface coordinates.
    ///
    /// Pure function: the same input always yields the same point.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (lambda, phi) = self.rotate(lon.to_radians(), lat.to_radians());
        let (x, y) = self.conic(lambda, phi);
        (
            self.translate_x + self.scale * x,
            self.translate_y - self.scale * y,
        )
    }

    /// Spherical rotation moving the region of interest toward the origin.
    fn rotate(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let lambda = normalize_lambda(lambda + self.rotate_lon.to_radians());
        let delta = self.rotate_lat.to_radians();
        if delta == 0.0 {
            return (lambda, phi);
        }

        let (sin_delta, cos_delta) = delta.sin_cos();
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * cos_delta + x * sin_delta;
        (y.atan2(x * cos_delta - z * sin_delta), k.asin())
    }

    /// Conformal conic projection of a rotated coordinate.
    fn conic(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let south = self.parallel_south.to_radians();
        let north = self.parallel_north.to_radians();
        let cos_south = south.cos();
        let n = if (south - north).abs() < f64::EPSILON {
            south.sin()
        } else {
            (cos_south / north.cos()).ln() / (tany(north) / tany(south)).ln()
        };
        let f = cos_south * tany(south).powf(n) / n;

        let phi = if f > 0.0 {
            phi.max(-FRAC_PI_2 + POLE_EPSILON)
        } else {
            phi.min(FRAC_PI_2 - POLE_EPSILON)
        };
        let r = f / tany(phi).powf(n);
        (r * (n * lambda).sin(), f - r * (n * lambda).cos())
    }
}

impl Default for ConicConformal {
    fn default() -> Self {
        Self::mass_state_plane()
    }
}

fn tany(y: f64) -> f64 {
    ((FRAC_PI_2 + y) / 2.0).tan()
}

fn normalize_lambda(lambda: f64) -> f64 {
    if lambda > PI {
        lambda - 2.0 * PI
    } else if lambda < -PI {
        lambda + 2.0 * PI
    } else {
        lambda
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn grid_origin_maps_to_translation() {
        let proj = ConicConformal::mass_state_plane();
        let (x, y) = proj.project(-71.5, 41.0);
        assert_relative_eq!(x, 500.0, epsilon = 1e-9);
        assert_relative_eq!(y, 560.0, epsilon = 1e-9);
    }

    #[test]
    fn projection_is_deterministic() {
        let proj = ConicConformal::mass_state_plane();
        assert_eq!(proj.project(-71.3, 42.3), proj.project(-71.3, 42.3));
    }

    #[test]
    fn state_interior_lands_on_surface() {
        let proj = ConicConformal::mass_state_plane();
        let (x, y) = proj.project(-71.3, 42.3);
        assert!(x > 0.0 && x < 960.0, "x = {}", x);
        assert!(y > 0.0 && y < 500.0, "y = {}", y);
    }

    #[test]
    fn east_west_symmetry_about_central_meridian() {
        let proj = ConicConformal::mass_state_plane();
        let (west_x, west_y) = proj.project(-72.5, 41.0);
        let (east_x, east_y) = proj.project(-70.5, 41.0);
        assert_relative_eq!(west_y, east_y, epsilon = 1e-6);
        assert_relative_eq!(500.0 - west_x, east_x - 500.0, epsilon = 1e-6);
    }

    #[test]
    fn north_is_up() {
        let proj = ConicConformal::mass_state_plane();
        let (_, south_y) = proj.project(-71.5, 41.5);
        let (_, north_y) = proj.project(-71.5, 42.5);
        assert!(north_y < south_y);
    }

    #[test]
    fn antimeridian_longitudes_stay_finite() {
        let proj = ConicConformal::mass_state_plane();
        let (x, y) = proj.project(179.5, 0.0);
        assert!(x.is_finite() && y.is_finite());
        let (x, y) = proj.project(-71.5, -90.0);
        assert!(x.is_finite() && y.is_finite());
    }
}
