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
//! A bounded tile cache keyed by (survey hash, order, pix), tracked with the
//! same generation-counter voting scheme as the terrain quadtree tile
//! tracker: every tile touched this frame gets its generation bumped and a
//! vote counted; at `finish_update`, anything still on a stale generation
//! is reported as a removal candidate, and anything over budget is evicted
//! coldest-vote first among tiles nobody else is holding onto.
use std::collections::HashMap;

pub type TileKey = (u64, u32, u64); // (survey_hash, order, pix)

struct Entry<T> {
    tile: T,
    cost_bytes: usize,
    transparency: u8,
    generation: u32,
    votes: u32,
    ref_count: u32,
}

pub struct TileCache<T> {
    entries: HashMap<TileKey, Entry<T>>,
    generation: u32,
    budget_bytes: usize,
    used_bytes: usize,
}

impl<T> TileCache<T> {
    pub fn new(budget_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            generation: 0,
            budget_bytes,
            used_bytes: 0,
        }
    }

    pub fn begin_update(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Marks `key` as touched this frame, bumping its vote count; if it is
    /// new, starts it fresh rather than inheriting a stale vote count.
    pub fn note_required(&mut self, key: TileKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            if entry.generation != self.generation {
                entry.votes = 0;
                entry.generation = self.generation;
            }
            entry.votes += 1;
        }
    }

    pub fn get(&self, key: &TileKey) -> Option<&T> {
        self.entries.get(key).map(|e| &e.tile)
    }

    pub fn transparency(&self, key: &TileKey) -> u8 {
        self.entries.get(key).map(|e| e.transparency).unwrap_or(0)
    }

    pub fn insert(&mut self, key: TileKey, tile: T, cost_bytes: usize, transparency: u8) {
        self.used_bytes += cost_bytes;
        self.entries.insert(
            key,
            Entry {
                tile,
                cost_bytes,
                transparency,
                generation: self.generation,
                votes: 1,
                ref_count: 0,
            },
        );
    }

    pub fn retain(&mut self, key: &TileKey) {
        if let Some(e) = self.entries.get_mut(key) {
            e.ref_count += 1;
        }
    }

    pub fn release(&mut self, key: &TileKey) {
        if let Some(e) = self.entries.get_mut(key) {
            e.ref_count = e.ref_count.saturating_sub(1);
        }
    }

    /// Removes every entry whose generation fell behind this frame's
    /// (untouched by `note_required`), then, if still over budget, evicts
    /// the coldest (lowest-vote) remaining entries with `ref_count == 0`.
    /// Returns the keys removed, for the caller to release any backing
    /// resources (textures, etc).
    pub fn finish_update(&mut self) -> Vec<TileKey> {
        let generation = self.generation;
        let mut removed: Vec<TileKey> = Vec::new();
        self.entries.retain(|key, entry| {
            let stale = entry.generation != generation && entry.ref_count == 0;
            if stale {
                self.used_bytes -= entry.cost_bytes;
                removed.push(*key);
            }
            !stale
        });

        if self.used_bytes <= self.budget_bytes {
            return removed;
        }
        let mut coldest: Vec<(TileKey, u32)> = self
            .entries
            .iter()
            .filter(|(_, e)| e.ref_count == 0)
            .map(|(k, e)| (*k, e.votes))
            .collect();
        coldest.sort_by_key(|(_, votes)| *votes);
        for (key, _) in coldest {
            if self.used_bytes <= self.budget_bytes {
                break;
            }
            if let Some(entry) = self.entries.remove(&key) {
                self.used_bytes -= entry.cost_bytes;
                removed.push(key);
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_entries_are_removed_after_finish_update() {
        let mut cache: TileCache<&'static str> = TileCache::new(1_000_000);
        cache.begin_update();
        cache.insert((1, 0, 0), "tile", 100, 0);
        let removed = cache.finish_update();
        // Inserted this generation but never noted required: still fresh,
        // since insert stamps the current generation.
        assert!(removed.is_empty());

        cache.begin_update(); // new frame, tile not required this time
        let removed = cache.finish_update();
        assert_eq!(removed, vec![(1, 0, 0)]);
    }

    #[test]
    fn required_entries_survive() {
        let mut cache: TileCache<&'static str> = TileCache::new(1_000_000);
        cache.begin_update();
        cache.insert((1, 0, 0), "tile", 100, 0);
        cache.begin_update();
        cache.note_required((1, 0, 0));
        let removed = cache.finish_update();
        assert!(removed.is_empty());
        assert!(cache.get(&(1, 0, 0)).is_some());
    }

    #[test]
    fn over_budget_evicts_coldest_first() {
        let mut cache: TileCache<&'static str> = TileCache::new(150);
        cache.begin_update();
        cache.insert((1, 0, 0), "cold", 100, 0);
        cache.insert((1, 0, 1), "hot", 100, 0);
        cache.note_required((1, 0, 1)); // hot gets an extra vote
        cache.note_required((1, 0, 1));
        let removed = cache.finish_update();
        assert!(removed.contains(&(1, 0, 0)));
        assert!(cache.get(&(1, 0, 1)).is_some());
    }

    #[test]
    fn retained_entries_are_never_evicted_even_when_stale() {
        let mut cache: TileCache<&'static str> = TileCache::new(1_000_000);
        cache.begin_update();
        cache.insert((1, 0, 0), "tile", 100, 0);
        cache.retain(&(1, 0, 0));
        cache.begin_update(); // not required this frame, but retained
        let removed = cache.finish_update();
        assert!(removed.is_empty());
    }
}
