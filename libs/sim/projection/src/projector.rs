// This file is part of Nitrogen.
//
// Nitrogen is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Nitrogen is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Nitrogen.  If not, see <http://www.gnu.org/licenses/>.
//! View-space direction ↔ normalized device coordinate mappings. View space
//! is right-handed with the viewing direction along `+Z`; a `Projection`
//! maps the unit directions the observer can see onto the `[-1, 1]` NDC
//! square, possibly failing for directions behind the viewer.
use nalgebra::{Point2, Vector3};

/// A point behind the viewer, or past whatever angular limit a projection
/// imposes (e.g. stereographic blows up approaching its antipode).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NotVisible;

pub trait Projection: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Maps a view-space direction (need not be normalized) to NDC.
    fn project(&self, v: &Vector3<f64>) -> Result<Point2<f64>, NotVisible>;

    /// Inverse of `project`; always succeeds for points on the NDC square,
    /// since every NDC point a projection can produce has a preimage.
    fn unproject(&self, p: &Point2<f64>) -> Vector3<f64>;

    /// The largest angular diameter, in radians, this projection can show
    /// before its own singularity (the antipode for stereographic, the
    /// horizon for perspective) makes the mapping undefined.
    fn max_fov_radians(&self) -> f64;
}

/// Perspective (gnomonic) projection: straight lines through the origin stay
/// straight. Limited to less than a hemisphere, since the horizon maps to
/// infinity.
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveProjection;

impl Projection for PerspectiveProjection {
    fn name(&self) -> &'static str {
        "perspective"
    }

    fn project(&self, v: &Vector3<f64>) -> Result<Point2<f64>, NotVisible> {
        let n = v.normalize();
        if n.z <= 1e-6 {
            return Err(NotVisible);
        }
        Ok(Point2::new(n.x / n.z, n.y / n.z))
    }

    fn unproject(&self, p: &Point2<f64>) -> Vector3<f64> {
        Vector3::new(p.x, p.y, 1.0).normalize()
    }

    fn max_fov_radians(&self) -> f64 {
        // Just short of a full hemisphere (180 degrees); the reference
        // implementation's perspective projector caps here too, since the
        // tangent-plane mapping is already badly distorted well before the
        // true asymptote.
        (175.0_f64).to_radians()
    }
}

/// Stereographic projection, viewed from the antipode of the forward
/// direction onto the plane through the origin. Conformal (preserves local
/// angles), and usable well past a hemisphere, which is why it is the
/// default "wide sky" projection.
#[derive(Clone, Copy, Debug)]
pub struct StereographicProjection;

impl Projection for StereographicProjection {
    fn name(&self) -> &'static str {
        "stereographic"
    }

    fn project(&self, v: &Vector3<f64>) -> Result<Point2<f64>, NotVisible> {
        let n = v.normalize();
        let denom = 1.0 + n.z;
        if denom <= 1e-6 {
            return Err(NotVisible);
        }
        Ok(Point2::new(n.x / denom, n.y / denom))
    }

    fn unproject(&self, p: &Point2<f64>) -> Vector3<f64> {
        let rho2 = p.x * p.x + p.y * p.y;
        let scale = 2.0 / (1.0 + rho2);
        Vector3::new(p.x * scale, p.y * scale, (1.0 - rho2) / (1.0 + rho2))
    }

    fn max_fov_radians(&self) -> f64 {
        (235.0_f64).to_radians()
    }
}

/// Computes the horizontal FOV that pairs with a given vertical FOV and
/// aspect ratio (width / height), for whichever projection is active. Done
/// generically via a round trip through `project`/`unproject` rather than a
/// closed-form per projection, since it only needs to hold for the
/// projections actually implemented here.
pub fn compute_fovs(projection: &dyn Projection, fov_y_radians: f64, aspect: f64) -> (f64, f64) {
    let half_y = fov_y_radians / 2.0;
    let edge = Vector3::new(0.0, half_y.sin(), half_y.cos());
    let ndc_y = match projection.project(&edge) {
        Ok(p) => p.y,
        Err(NotVisible) => return (fov_y_radians * aspect, fov_y_radians),
    };
    let ndc_x = ndc_y * aspect;
    let dir_x = projection.unproject(&Point2::new(ndc_x, 0.0));
    let half_x = dir_x.z.clamp(-1.0, 1.0).acos();
    (2.0 * half_x, fov_y_radians)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn perspective_forward_direction_projects_to_origin() {
        let p = PerspectiveProjection.project(&Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn perspective_rejects_points_behind_viewer() {
        assert_eq!(
            PerspectiveProjection.project(&Vector3::new(0.0, 0.0, -1.0)),
            Err(NotVisible)
        );
    }

    #[test]
    fn perspective_round_trips() {
        let v = Vector3::new(0.3, -0.2, 1.0).normalize();
        let ndc = PerspectiveProjection.project(&v).unwrap();
        let back = PerspectiveProjection.unproject(&ndc);
        assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-9);
        assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-9);
        assert_abs_diff_eq!(back.z, v.z, epsilon = 1e-9);
    }

    #[test]
    fn stereographic_round_trips_well_past_a_hemisphere() {
        let v = Vector3::new(0.1, 0.1, -0.98).normalize(); // near the far side
        let ndc = StereographicProjection.project(&v).unwrap();
        let back = StereographicProjection.unproject(&ndc);
        assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-9);
        assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-9);
        assert_abs_diff_eq!(back.z, v.z, epsilon = 1e-9);
    }

    #[test]
    fn stereographic_rejects_near_antipode() {
        assert_eq!(
            StereographicProjection.project(&Vector3::new(0.0, 0.0, -1.0)),
            Err(NotVisible)
        );
    }

    #[test]
    fn compute_fovs_is_symmetric_for_square_aspect() {
        let (fovx, fovy) = compute_fovs(&PerspectiveProjection, 60f64.to_radians(), 1.0);
        assert_abs_diff_eq!(fovx, fovy, epsilon = 1e-9);
    }

    #[test]
    fn compute_fovs_widens_with_aspect() {
        let (fovx, fovy) = compute_fovs(&PerspectiveProjection, 60f64.to_radians(), 16.0 / 9.0);
        assert!(fovx > fovy);
    }
}
