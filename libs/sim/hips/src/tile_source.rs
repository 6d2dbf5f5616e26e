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
//! The pluggable data source a survey fetches tiles through, standing in
//! for the reference implementation's `hips_settings_t` (`create_tile`/
//! `delete_tile`/user pointer): in the Rust rewrite that becomes a trait
//! object the caller supplies.
use crate::traverse::HealpixPixel;

/// Mirrors the reference implementation's tile status codes: `0` = still
/// loading, `200` = ready, `404` = absent, anything else an HTTP-like
/// error the survey retries with backoff.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchStatus {
    Loading,
    Ready,
    NotFound,
    Error(u16),
}

/// Supplies raw tile bytes and turns them into the caller's own tile
/// representation. `Tile` is whatever the caller wants cached (a decoded
/// texture, a parsed catalog chunk, ...); this crate only manages its
/// lifecycle, never its contents.
pub trait HipsTileSource {
    type Tile;

    /// Begins or polls a fetch for `pixel`; called at most roughly once per
    /// second per tile unless `no_delay` is set, by the survey that owns
    /// this source.
    fn poll_fetch(&mut self, pixel: HealpixPixel) -> FetchStatus;

    /// Takes ownership of the raw bytes for a tile whose fetch just
    /// completed with `FetchStatus::Ready`, and returns the cached tile
    /// plus its cache cost in bytes and a 4-bit child-transparency mask
    /// (bit `i` set means child `i` is known to be empty and need not be
    /// fetched).
    fn create_tile(&mut self, pixel: HealpixPixel, data: Vec<u8>) -> (Self::Tile, usize, u8);
}
