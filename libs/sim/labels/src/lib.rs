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
//! Screen-space label placement: entries are queued with a priority and
//! placed highest-first, dropping any whose bounding box collides with an
//! already-placed label unless it is anchored around a radius, in which
//! case it is rotated around the anchor looking for a clear spot.
mod obb;

pub use obb::Obb;

use module::Oid;

const AROUND_TRY_ANGLES: usize = 16;

#[derive(Clone, Debug)]
pub struct LabelRequest {
    pub text: String,
    pub pos: [f64; 2],
    /// Radius of the point this label is anchored to; zero for a free
    /// label that is dropped outright on collision instead of repositioned.
    pub radius: f64,
    pub size: f64,
    pub angle: f64,
    pub priority: f64,
    pub oid: Option<Oid>,
}

#[derive(Clone, Debug)]
pub struct PlacedLabel {
    pub text: String,
    pub pos: [f64; 2],
    pub size: f64,
    pub angle: f64,
    pub oid: Option<Oid>,
}

fn text_obb(text: &str, pos: [f64; 2], size: f64, angle: f64) -> Obb {
    // No text-shaping backend lives in this crate; approximate advance width
    // the way a monospace fallback metric would, which is sufficient for
    // collision purposes (placement only needs a conservative bound).
    let width = text.chars().count() as f64 * size * 0.6;
    Obb::new(
        [pos[0] + width / 2.0, pos[1]],
        [width / 2.0, size / 2.0],
        angle,
    )
}

/// Tries placing `req` at its native position, then — if it collides and
/// has a nonzero anchor radius — at `AROUND_TRY_ANGLES` positions around the
/// anchor circle. Returns the chosen OBB and origin position, or `None` if
/// every candidate collides.
fn find_placement(req: &LabelRequest, placed: &[Obb]) -> Option<([f64; 2], Obb)> {
    let candidate = text_obb(&req.text, req.pos, req.size, req.angle);
    if !placed.iter().any(|p| p.overlaps(&candidate)) {
        return Some((req.pos, candidate));
    }
    if req.radius <= 0.0 {
        return None;
    }
    for i in 0..AROUND_TRY_ANGLES {
        let theta = (i as f64 / AROUND_TRY_ANGLES as f64) * std::f64::consts::TAU;
        let pos = [
            req.pos[0] + req.radius * theta.cos(),
            req.pos[1] + req.radius * theta.sin(),
        ];
        let candidate = text_obb(&req.text, pos, req.size, req.angle);
        if !placed.iter().any(|p| p.overlaps(&candidate)) {
            return Some((pos, candidate));
        }
    }
    None
}

/// Places the highest-priority label first; on a tie, input order is
/// preserved via a stable sort.
pub fn place_labels(mut requests: Vec<LabelRequest>) -> Vec<PlacedLabel> {
    requests.sort_by(|a, b| b.priority.partial_cmp(&a.priority).unwrap_or(std::cmp::Ordering::Equal));
    let mut placed_obbs = Vec::with_capacity(requests.len());
    let mut placed = Vec::with_capacity(requests.len());
    for req in requests {
        if let Some((pos, obb)) = find_placement(&req, &placed_obbs) {
            placed_obbs.push(obb);
            placed.push(PlacedLabel {
                text: req.text,
                pos,
                size: req.size,
                angle: req.angle,
                oid: req.oid,
            });
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(text: &str, pos: [f64; 2], radius: f64, priority: f64) -> LabelRequest {
        LabelRequest {
            text: text.to_string(),
            pos,
            radius,
            size: 12.0,
            angle: 0.0,
            priority,
            oid: None,
        }
    }

    #[test]
    fn non_overlapping_labels_all_survive() {
        let requests = vec![req("Sirius", [0.0, 0.0], 0.0, 1.0), req("Vega", [500.0, 500.0], 0.0, 1.0)];
        let placed = place_labels(requests);
        assert_eq!(placed.len(), 2);
    }

    #[test]
    fn lower_priority_free_label_is_dropped_on_collision() {
        let requests = vec![
            req("Sirius", [0.0, 0.0], 0.0, 2.0),
            req("Canopus", [1.0, 0.0], 0.0, 1.0),
        ];
        let placed = place_labels(requests);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].text, "Sirius");
    }

    #[test]
    fn anchored_label_rotates_around_its_radius_to_avoid_collision() {
        let requests = vec![
            req("Sirius", [0.0, 0.0], 0.0, 2.0),
            req("Canopus", [0.0, 0.0], 20.0, 1.0),
        ];
        let placed = place_labels(requests);
        // Both survive: Canopus rotated around its anchor to find a gap.
        assert_eq!(placed.len(), 2);
    }
}
