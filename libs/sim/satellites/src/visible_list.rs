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
//! Keeps per-frame CPU bounded regardless of catalog size: a small
//! "currently visible" set is re-rendered every frame, and a round-robin
//! cursor sweeps a bounded chunk of the remaining catalog each frame looking
//! for newly-visible satellites. The reference implementation threads this
//! through an intrusive doubly-linked list; a flat index set does the same
//! job without per-node links.
use std::collections::HashSet;

/// How many catalog entries the round-robin cursor advances through per
/// frame, independent of how many satellites total are loaded.
pub const UPDATE_BATCH_SIZE: usize = 32;

#[derive(Default)]
pub struct VisibleList {
    visible: HashSet<usize>,
    cursor: usize,
}

impl VisibleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.visible.contains(&index)
    }

    pub fn mark_visible(&mut self, index: usize) {
        self.visible.insert(index);
    }

    /// Runs one frame's worth of visibility bookkeeping. `renders` is called
    /// once per candidate and must return whether that satellite rendered
    /// this frame; `keep` additionally protects an index (e.g. the current
    /// selection) from being dropped even if it stopped rendering.
    pub fn step(
        &mut self,
        catalog_len: usize,
        mut renders: impl FnMut(usize) -> bool,
        keep: impl Fn(usize) -> bool,
    ) -> Vec<usize> {
        let mut rendered = Vec::new();
        let mut dropped = Vec::new();
        for &index in &self.visible {
            if renders(index) {
                rendered.push(index);
            } else if !keep(index) {
                dropped.push(index);
            } else {
                rendered.push(index);
            }
        }
        for index in dropped {
            self.visible.remove(&index);
        }

        if catalog_len == 0 {
            return rendered;
        }
        let mut checked = 0;
        while checked < UPDATE_BATCH_SIZE.min(catalog_len) {
            let index = self.cursor % catalog_len;
            self.cursor = (self.cursor + 1) % catalog_len;
            checked += 1;
            if self.visible.contains(&index) {
                continue;
            }
            if renders(index) {
                self.visible.insert(index);
                rendered.push(index);
            }
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newly_visible_satellites_join_the_list() {
        let mut list = VisibleList::new();
        let rendered = list.step(10, |index| index == 3, |_| false);
        assert!(rendered.contains(&3));
        assert!(list.contains(3));
    }

    #[test]
    fn no_longer_visible_satellites_are_dropped() {
        let mut list = VisibleList::new();
        list.mark_visible(3);
        let rendered = list.step(10, |_| false, |_| false);
        assert!(rendered.is_empty());
        assert!(!list.contains(3));
    }

    #[test]
    fn kept_indices_survive_even_if_not_rendering() {
        let mut list = VisibleList::new();
        list.mark_visible(3);
        let rendered = list.step(10, |_| false, |index| index == 3);
        assert!(rendered.contains(&3));
        assert!(list.contains(3));
    }

    #[test]
    fn round_robin_cursor_advances_across_calls() {
        let mut list = VisibleList::new();
        let mut seen = HashSet::new();
        for _ in 0..5 {
            list.step(5, |index| {
                seen.insert(index);
                false
            }, |_| false);
        }
        assert_eq!(seen.len(), 5);
    }
}
