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
//! Oriented bounding rectangles and the separating-axis test used to detect
//! label overlap.

#[derive(Clone, Copy, Debug)]
pub struct Obb {
    pub center: [f64; 2],
    pub half_extents: [f64; 2],
    pub angle: f64,
}

impl Obb {
    pub fn new(center: [f64; 2], half_extents: [f64; 2], angle: f64) -> Self {
        Self {
            center,
            half_extents,
            angle,
        }
    }

    fn axes(&self) -> [[f64; 2]; 2] {
        let (s, c) = self.angle.sin_cos();
        [[c, s], [-s, c]]
    }

    fn corners(&self) -> [[f64; 2]; 4] {
        let axes = self.axes();
        let mut corners = [[0.0; 2]; 4];
        for (i, (sx, sy)) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
            .into_iter()
            .enumerate()
        {
            let ex = sx * self.half_extents[0];
            let ey = sy * self.half_extents[1];
            corners[i] = [
                self.center[0] + ex * axes[0][0] + ey * axes[1][0],
                self.center[1] + ex * axes[0][1] + ey * axes[1][1],
            ];
        }
        corners
    }

    /// Separating-axis test over the union of both rectangles' edge normals
    /// (their own local axes); true if the two rectangles overlap.
    pub fn overlaps(&self, other: &Obb) -> bool {
        let corners_a = self.corners();
        let corners_b = other.corners();
        for axis in self.axes().into_iter().chain(other.axes()) {
            let (min_a, max_a) = project(&corners_a, axis);
            let (min_b, max_b) = project(&corners_b, axis);
            if max_a < min_b || max_b < min_a {
                return false;
            }
        }
        true
    }
}

fn project(corners: &[[f64; 2]; 4], axis: [f64; 2]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for c in corners {
        let d = c[0] * axis[0] + c[1] * axis[1];
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_boxes_overlap() {
        let a = Obb::new([0.0, 0.0], [5.0, 2.0], 0.0);
        assert!(a.overlaps(&a));
    }

    #[test]
    fn far_apart_boxes_do_not_overlap() {
        let a = Obb::new([0.0, 0.0], [5.0, 2.0], 0.0);
        let b = Obb::new([100.0, 100.0], [5.0, 2.0], 0.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn rotated_box_can_avoid_an_axis_aligned_neighbor() {
        // Two boxes whose axis-aligned footprints would touch, but one is
        // rotated 45 degrees, shrinking its footprint along the shared axis.
        let a = Obb::new([0.0, 0.0], [1.0, 1.0], 0.0);
        let b = Obb::new([2.5, 0.0], [1.0, 0.2], std::f64::consts::FRAC_PI_4);
        assert!(!a.overlaps(&b));
    }
}
