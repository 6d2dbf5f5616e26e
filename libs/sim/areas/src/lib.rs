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
//! Screen-space pick areas: a flat list of ellipses (a circle is an ellipse
//! with `a == b`) in screen coordinates, each tagged with the object id and
//! hint it represents. `lookup` finds the nearest shape to a cursor
//! position, picking the smallest-area shape among any the cursor sits
//! strictly inside.
use module::Oid;

#[derive(Clone, Copy, Debug)]
struct Item {
    pos: [f64; 2],
    a: f64,
    b: f64,
    angle: f64,
    oid: Oid,
    hint: u64,
}

#[derive(Default)]
pub struct Areas {
    items: Vec<Item>,
}

/// Distance from `p` to the boundary of an ellipse centered at `center`,
/// rotated by `angle` radians, with semi-axes `a`/`b`. Zero if `p` is inside
/// or on the boundary.
fn ellipse_dist(center: [f64; 2], angle: f64, a: f64, b: f64, p: [f64; 2]) -> f64 {
    let dx = p[0] - center[0];
    let dy = p[1] - center[1];
    // Rotate into the ellipse's own frame by -angle.
    let (sin_a, cos_a) = (-angle).sin_cos();
    let rx = dx * cos_a - dy * sin_a;
    let ry = dx * sin_a + dy * cos_a;
    let t = ry.atan2(rx);
    let bx = a * t.cos();
    let by = b * t.sin();
    let p_norm = (rx * rx + ry * ry).sqrt();
    let boundary_norm = (bx * bx + by * by).sqrt();
    (p_norm - boundary_norm).max(0.0)
}

impl Areas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn add_circle(&mut self, pos: [f64; 2], radius: f64, oid: Oid, hint: u64) {
        self.items.push(Item {
            pos,
            a: radius,
            b: radius,
            angle: 0.0,
            oid,
            hint,
        });
    }

    pub fn add_ellipse(&mut self, pos: [f64; 2], angle: f64, a: f64, b: f64, oid: Oid, hint: u64) {
        self.items.push(Item {
            pos,
            a,
            b,
            angle,
            oid,
            hint,
        });
    }

    /// Finds the area nearest `pos`, never farther than `max_dist`. Among
    /// shapes the point falls strictly inside (distance zero), the smallest
    /// by `a * b` wins, via the `-1 / (a * b)` trick: all "inside" distances
    /// become negative, ranked by shape area, and never tie with a
    /// "outside, distance d > 0" result.
    pub fn lookup(&self, pos: [f64; 2], max_dist: f64) -> Option<(Oid, u64)> {
        let mut best: Option<(&Item, f64)> = None;
        let mut best_dist = max_dist;
        for item in &self.items {
            let mut dist = if item.a == item.b {
                let dx = pos[0] - item.pos[0];
                let dy = pos[1] - item.pos[1];
                (dx * dx + dy * dy).sqrt() - item.a
            } else {
                ellipse_dist(item.pos, item.angle, item.a, item.b, pos)
            }
            .max(0.0);
            if dist == 0.0 {
                dist = -1.0 / (item.a * item.b);
            }
            if dist < best_dist {
                best_dist = dist;
                best = Some((item, dist));
            }
        }
        best.map(|(item, _)| (item.oid, item.hint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_nearest_circle() {
        let mut areas = Areas::new();
        areas.add_circle([0.0, 0.0], 5.0, Oid::gaia(1), 0);
        areas.add_circle([100.0, 0.0], 5.0, Oid::gaia(2), 0);
        let (oid, _) = areas.lookup([1.0, 0.0], 20.0).unwrap();
        assert_eq!(oid, Oid::gaia(1));
    }

    #[test]
    fn lookup_respects_max_dist() {
        let mut areas = Areas::new();
        areas.add_circle([0.0, 0.0], 1.0, Oid::gaia(1), 0);
        assert!(areas.lookup([50.0, 50.0], 5.0).is_none());
    }

    #[test]
    fn overlapping_shapes_prefer_the_smaller_area() {
        let mut areas = Areas::new();
        areas.add_circle([0.0, 0.0], 100.0, Oid::gaia(1), 0); // huge, covers origin
        areas.add_circle([0.0, 0.0], 1.0, Oid::gaia(2), 0); // tiny, also covers origin
        let (oid, _) = areas.lookup([0.0, 0.0], 1000.0).unwrap();
        assert_eq!(oid, Oid::gaia(2));
    }

    #[test]
    fn ellipse_matches_circle_when_axes_are_equal() {
        let d_ellipse = ellipse_dist([0.0, 0.0], 0.0, 3.0, 3.0, [10.0, 0.0]);
        assert!((d_ellipse - 7.0).abs() < 1e-9);
    }
}
