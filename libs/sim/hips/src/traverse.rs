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
//! Breadth-first traversal of the healpix grid. The reference
//! implementation keeps a fixed 1024-entry array as its queue; this uses a
//! growable `VecDeque` instead, since the consumer (not this iterator)
//! decides how deep to go, and a fixed cap would silently truncate a survey
//! that legitimately needs more in-flight nodes than 1024.
use std::collections::VecDeque;

/// A healpix pixel identified by its order (depth) and index within that
/// order, `0 <= pix < 12 * 4^order`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct HealpixPixel {
    pub order: u32,
    pub pix: u64,
}

impl HealpixPixel {
    pub fn children(&self) -> [HealpixPixel; 4] {
        let base = self.pix * 4;
        [
            HealpixPixel {
                order: self.order + 1,
                pix: base,
            },
            HealpixPixel {
                order: self.order + 1,
                pix: base + 1,
            },
            HealpixPixel {
                order: self.order + 1,
                pix: base + 2,
            },
            HealpixPixel {
                order: self.order + 1,
                pix: base + 3,
            },
        ]
    }
}

/// Breadth-first queue over the healpix grid, seeded with the twelve
/// order-0 base pixels. The consumer pulls one pixel at a time via `next`
/// and decides, by calling `push_children` or not, whether to recurse.
pub struct Traversal {
    queue: VecDeque<HealpixPixel>,
}

impl Default for Traversal {
    fn default() -> Self {
        let queue = (0..12)
            .map(|pix| HealpixPixel { order: 0, pix })
            .collect();
        Self { queue }
    }
}

impl Traversal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> Option<HealpixPixel> {
        self.queue.pop_front()
    }

    pub fn push_children(&mut self, pixel: HealpixPixel, transparency_mask: u8) {
        for (i, child) in pixel.children().into_iter().enumerate() {
            if transparency_mask & (1 << i) == 0 {
                self.queue.push_back(child);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_twelve_base_pixels() {
        let mut t = Traversal::new();
        let mut count = 0;
        while let Some(p) = t.next() {
            assert_eq!(p.order, 0);
            count += 1;
        }
        assert_eq!(count, 12);
    }

    #[test]
    fn push_children_enqueues_four_at_next_order() {
        let mut t = Traversal::new();
        let root = t.next().unwrap();
        t.push_children(root, 0);
        let mut children = Vec::new();
        while let Some(p) = t.next() {
            if p.order == 1 {
                children.push(p);
            } else {
                break;
            }
        }
        assert_eq!(children.len(), 4);
        for (i, c) in children.iter().enumerate() {
            assert_eq!(c.pix, root.pix * 4 + i as u64);
        }
    }

    #[test]
    fn transparency_mask_skips_enqueuing_those_children() {
        let mut t = Traversal::new();
        let root = t.next().unwrap();
        t.push_children(root, 0b0011); // skip the first two children
        let remaining: Vec<_> = std::iter::from_fn(|| t.next()).collect();
        assert_eq!(remaining.len(), 11 + 2); // 11 other base pixels + 2 children
    }
}
