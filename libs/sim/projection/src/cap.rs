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
//! Bounding caps: a unit axis plus the cosine of a half-angle, describing a
//! spherical cap on the unit sphere of view directions. Cheap to test and
//! cheap to intersect, so the painter keeps one per clippable frame and
//! every quadtree tile keeps its own for trivial-reject culling.
use nalgebra::Vector3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cap {
    pub axis: Vector3<f64>,
    pub cos_half_angle: f64,
}

impl Cap {
    pub fn new(axis: Vector3<f64>, cos_half_angle: f64) -> Self {
        debug_assert!((axis.magnitude() - 1.0).abs() < 1e-6);
        Self {
            axis,
            cos_half_angle,
        }
    }

    /// A cap covering the entire sphere.
    pub fn full_sphere() -> Self {
        Self {
            axis: Vector3::z(),
            cos_half_angle: -1.0,
        }
    }

    pub fn contains_point(&self, p: &Vector3<f64>) -> bool {
        self.axis.dot(p) >= self.cos_half_angle
    }

    /// Two caps are disjoint if the angular separation of their axes exceeds
    /// the sum of their half-angles; compared in cosine space to avoid an
    /// `acos` per test.
    pub fn is_disjoint_from(&self, other: &Cap) -> bool {
        let cos_separation = self.axis.dot(&other.axis).clamp(-1.0, 1.0);
        let separation = cos_separation.acos();
        let half_a = self.cos_half_angle.clamp(-1.0, 1.0).acos();
        let half_b = other.cos_half_angle.clamp(-1.0, 1.0).acos();
        separation > half_a + half_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_sphere_contains_every_point() {
        let cap = Cap::full_sphere();
        assert!(cap.contains_point(&Vector3::x()));
        assert!(cap.contains_point(&-Vector3::z()));
    }

    #[test]
    fn antipodal_caps_are_disjoint() {
        let a = Cap::new(Vector3::z(), 0.99);
        let b = Cap::new(-Vector3::z(), 0.99);
        assert!(a.is_disjoint_from(&b));
    }

    #[test]
    fn identical_caps_are_not_disjoint() {
        let a = Cap::new(Vector3::z(), 0.5);
        assert!(!a.is_disjoint_from(&a));
    }

    #[test]
    fn adjacent_wide_caps_overlap() {
        let a = Cap::new(Vector3::z(), 0.0); // a full hemisphere around +z
        let b = Cap::new(Vector3::x(), 0.0); // a full hemisphere around +x
        assert!(!a.is_disjoint_from(&b));
    }
}
