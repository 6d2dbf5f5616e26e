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
//! A HiPS survey: the properties describing a tile pyramid, a bounded tile
//! cache, and the traversal/order-selection logic that decides which tiles
//! are visible at a given viewport.
use crate::cache::{TileCache, TileKey};
use crate::tile_source::{FetchStatus, HipsTileSource};
use crate::traverse::{HealpixPixel, Traversal};
use anyhow::{anyhow, Result};
use projection::Cap;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct HipsProperties {
    pub order: u32,
    pub order_min: u32,
    pub tile_width: u32,
    pub frame: String,
    pub tile_format: String,
    pub release_date: Option<f64>,
}

/// Parses a HiPS `properties` file: blank-line-terminated `key = value`
/// (or `key=value`) pairs, `#`-prefixed comments ignored.
pub fn parse_properties(text: &str) -> Result<HipsProperties> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    let get = |key: &str| map.get(key).cloned();
    let order = get("hips_order")
        .ok_or_else(|| anyhow!("missing hips_order"))?
        .parse()?;
    let tile_width = get("hips_tile_width")
        .ok_or_else(|| anyhow!("missing hips_tile_width"))?
        .parse()?;
    let frame = get("hips_frame").ok_or_else(|| anyhow!("missing hips_frame"))?;
    let tile_format = get("hips_tile_format").unwrap_or_else(|| "jpg".to_string());
    let order_min = get("hips_order_min").and_then(|v| v.parse().ok()).unwrap_or(0);
    let release_date = get("hips_release_date").and_then(|v| v.parse().ok());
    Ok(HipsProperties {
        order,
        order_min,
        tile_width,
        frame,
        tile_format,
        release_date,
    })
}

fn healpix_angular_size_radians(order: u32) -> f64 {
    let nside = (1u64 << order) as f64;
    (4.0 * PI / (12.0 * nside * nside)).sqrt()
}

/// Picks a target order so that one tile spans roughly `tile_quality_px`
/// pixels at screen center, clamped to `[order_min, order_max]`.
pub fn target_order(fov_y_radians: f64, screen_height_px: f64, tile_quality_px: f64, order_min: u32, order_max: u32) -> u32 {
    if fov_y_radians <= 0.0 || screen_height_px <= 0.0 {
        return order_min;
    }
    let target_angular_size = (tile_quality_px / screen_height_px) * fov_y_radians;
    let mut order = order_min;
    while order < order_max && healpix_angular_size_radians(order) > target_angular_size {
        order += 1;
    }
    order
}

fn child_offset(index: u8) -> (f64, f64) {
    match index {
        0 => (0.0, 0.0),
        1 => (0.5, 0.0),
        2 => (0.0, 0.5),
        3 => (0.5, 0.5),
        _ => unreachable!("healpix child index is always 0..4"),
    }
}

/// The 3×3 affine (homogeneous 2-D) matrix mapping a leaf tile's UV space
/// into the sub-region of `ancestor_order`'s UV space it occupies.
pub fn uv_submatrix(order: u32, pix: u64, ancestor_order: u32) -> [[f64; 3]; 3] {
    let depth = order - ancestor_order;
    let mut scale = 1.0;
    let mut offset = (0.0, 0.0);
    for level in 0..depth {
        let child_index = ((pix >> (2 * level)) & 3) as u8;
        let (cx, cy) = child_offset(child_index);
        offset.0 += cx * scale;
        offset.1 += cy * scale;
        scale *= 0.5;
    }
    [[scale, 0.0, offset.0], [0.0, scale, offset.1], [0.0, 0.0, 1.0]]
}

fn ancestor_pixel(pixel: HealpixPixel, ancestor_order: u32) -> HealpixPixel {
    let depth = pixel.order - ancestor_order;
    HealpixPixel {
        order: ancestor_order,
        pix: pixel.pix >> (2 * depth),
    }
}

/// The best available texture for a pixel: its own tile if loaded,
/// otherwise the nearest loaded ancestor with the UV submatrix selecting
/// the requested sub-region, otherwise the all-sky fallback, otherwise
/// nothing (caller renders a placeholder but still gets a UV/submatrix).
#[derive(Clone, Copy, Debug)]
pub struct TileTexture<'a, T> {
    pub tile: Option<&'a T>,
    pub uv_submatrix: [[f64; 3]; 3],
    pub is_allsky: bool,
}

pub struct HipsSurvey<S: HipsTileSource> {
    pub survey_hash: u64,
    properties: Option<HipsProperties>,
    allsky_loaded: bool,
    source: S,
    cache: TileCache<S::Tile>,
    not_found: HashMap<TileKey, Instant>,
    last_fetch_at: Option<Instant>,
    fetch_interval: Duration,
}

impl<S: HipsTileSource> HipsSurvey<S> {
    pub fn new(survey_hash: u64, source: S, cache_budget_bytes: usize) -> Self {
        Self {
            survey_hash,
            properties: None,
            allsky_loaded: false,
            source,
            cache: TileCache::new(cache_budget_bytes),
            not_found: HashMap::new(),
            last_fetch_at: None,
            fetch_interval: Duration::from_secs(1),
        }
    }

    pub fn set_properties(&mut self, properties: HipsProperties) {
        self.properties = Some(properties);
    }

    pub fn properties(&self) -> Option<&HipsProperties> {
        self.properties.as_ref()
    }

    pub fn mark_allsky_loaded(&mut self) {
        self.allsky_loaded = true;
    }

    pub fn is_ready(&self) -> bool {
        self.properties.is_some() && self.allsky_loaded
    }

    fn key(&self, pixel: HealpixPixel) -> TileKey {
        (self.survey_hash, pixel.order, pixel.pix)
    }

    /// Returns the cached tile, begins a fetch if nothing is cached or
    /// pending, or returns `NotFound` immediately for a pixel already known
    /// absent. `no_delay` skips the default one-fetch-per-second throttle.
    pub fn get_tile(&mut self, pixel: HealpixPixel, no_delay: bool) -> (Option<&S::Tile>, FetchStatus) {
        let key = self.key(pixel);
        if self.not_found.contains_key(&key) {
            return (None, FetchStatus::NotFound);
        }
        if self.cache.get(&key).is_some() {
            return (self.cache.get(&key), FetchStatus::Ready);
        }
        let now = Instant::now();
        let throttled = !no_delay
            && self
                .last_fetch_at
                .map(|t| now.duration_since(t) < self.fetch_interval)
                .unwrap_or(false);
        if throttled {
            return (None, FetchStatus::Loading);
        }
        match self.source.poll_fetch(pixel) {
            FetchStatus::Loading => (None, FetchStatus::Loading),
            FetchStatus::NotFound => {
                self.not_found.insert(key, now);
                (None, FetchStatus::NotFound)
            }
            FetchStatus::Error(code) => (None, FetchStatus::Error(code)),
            FetchStatus::Ready => {
                self.last_fetch_at = Some(now);
                (None, FetchStatus::Ready)
            }
        }
    }

    /// Call once raw bytes for a fetch are in hand, to actually populate
    /// the cache (kept separate from `get_tile` since fetch completion is
    /// asynchronous relative to the call that started it).
    pub fn complete_fetch(&mut self, pixel: HealpixPixel, data: Vec<u8>) {
        let (tile, cost, transparency) = self.source.create_tile(pixel, data);
        self.cache.insert(self.key(pixel), tile, cost, transparency);
    }

    /// `allsky` holds one fallback texture per order-0 base pixel (healpix
    /// has exactly 12 of them at order 0), since a single allsky image is
    /// resliced per base pixel at load time rather than shared across all
    /// twelve: a tile under base pixel 7 has no business falling back to
    /// whatever lives in base pixel 0's slice.
    pub fn get_tile_texture(&self, pixel: HealpixPixel, allsky: [Option<&S::Tile>; 12]) -> TileTexture<'_, S::Tile> {
        let mut ancestor_order = pixel.order;
        loop {
            let key = (self.survey_hash, ancestor_order, ancestor_pixel(pixel, ancestor_order).pix);
            if let Some(tile) = self.cache.get(&key) {
                return TileTexture {
                    tile: Some(tile),
                    uv_submatrix: uv_submatrix(pixel.order, pixel.pix, ancestor_order),
                    is_allsky: false,
                };
            }
            if ancestor_order == 0 {
                break;
            }
            ancestor_order -= 1;
        }
        let base_pixel = ancestor_pixel(pixel, 0).pix as usize;
        if let Some(tile) = allsky[base_pixel] {
            return TileTexture {
                tile: Some(tile),
                uv_submatrix: uv_submatrix(pixel.order, pixel.pix, 0),
                is_allsky: true,
            };
        }
        TileTexture {
            tile: None,
            uv_submatrix: uv_submatrix(pixel.order, pixel.pix, 0),
            is_allsky: false,
        }
    }

    /// Walks the healpix grid breadth-first, skipping any pixel whose cap
    /// is disjoint from `viewport_cap`, enqueuing children for pixels above
    /// the target order, and collecting pixels at the target order (or
    /// rejected earlier) as the visible set to render.
    pub fn visible_tiles(&self, viewport_cap: &Cap, cap_for: impl Fn(HealpixPixel) -> Cap, target_order: u32) -> Vec<HealpixPixel> {
        let mut traversal = Traversal::new();
        let mut visible = Vec::new();
        while let Some(pixel) = traversal.next() {
            let cap = cap_for(pixel);
            if viewport_cap.is_disjoint_from(&cap) {
                continue;
            }
            if pixel.order < target_order {
                let transparency = self.cache.transparency(&self.key(pixel));
                traversal.push_children(pixel, transparency);
            } else {
                visible.push(pixel);
            }
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSource;
    impl HipsTileSource for MockSource {
        type Tile = Vec<u8>;
        fn poll_fetch(&mut self, _pixel: HealpixPixel) -> FetchStatus {
            FetchStatus::Ready
        }
        fn create_tile(&mut self, _pixel: HealpixPixel, data: Vec<u8>) -> (Self::Tile, usize, u8) {
            (data.clone(), data.len(), 0)
        }
    }

    #[test]
    fn parses_a_minimal_properties_file() {
        let text = "hips_order = 5\nhips_tile_width=512\nhips_frame = equatorial\n# a comment\nhips_order_min=2\n";
        let props = parse_properties(text).unwrap();
        assert_eq!(props.order, 5);
        assert_eq!(props.tile_width, 512);
        assert_eq!(props.frame, "equatorial");
        assert_eq!(props.order_min, 2);
    }

    #[test]
    fn target_order_clamps_to_max() {
        let order = target_order(1.0, 1000.0, 2000.0, 0, 5);
        assert_eq!(order, 5);
    }

    #[test]
    fn target_order_is_at_least_order_min() {
        let order = target_order(0.0001, 2000.0, 1.0, 3, 10);
        assert!(order >= 3);
    }

    #[test]
    fn uv_submatrix_is_identity_at_same_order() {
        let m = uv_submatrix(4, 12, 4);
        assert_eq!(m, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    }

    #[test]
    fn uv_submatrix_quarters_at_one_level_down() {
        let m = uv_submatrix(1, 1, 0); // child index 1 => offset (0.5, 0.0)
        assert_eq!(m[0][0], 0.5);
        assert_eq!(m[0][2], 0.5);
        assert_eq!(m[1][2], 0.0);
    }

    #[test]
    fn get_tile_texture_falls_back_to_loaded_ancestor() {
        let mut survey = HipsSurvey::new(42, MockSource, 1_000_000);
        survey.cache.begin_update();
        survey.complete_fetch(HealpixPixel { order: 0, pix: 3 }, vec![1, 2, 3]);
        let leaf = HealpixPixel { order: 2, pix: 3 * 16 + 5 }; // descends from pix 3 at order 0
        let texture = survey.get_tile_texture(leaf, [None; 12]);
        assert!(texture.tile.is_some());
        assert!(!texture.is_allsky);
    }

    #[test]
    fn get_tile_texture_uses_allsky_when_nothing_else_loaded() {
        let survey = HipsSurvey::new(42, MockSource, 1_000_000);
        let allsky_base_3 = vec![9u8];
        let mut allsky: [Option<&Vec<u8>>; 12] = [None; 12];
        allsky[3] = Some(&allsky_base_3);
        let leaf = HealpixPixel { order: 2, pix: 3 * 16 + 5 }; // descends from base pixel 3
        let texture = survey.get_tile_texture(leaf, allsky);
        assert!(texture.is_allsky);
        assert_eq!(texture.tile, Some(&allsky_base_3));
    }

    #[test]
    fn get_tile_texture_does_not_use_a_different_base_pixels_allsky() {
        let survey = HipsSurvey::new(42, MockSource, 1_000_000);
        let allsky_base_0 = vec![1u8];
        let mut allsky: [Option<&Vec<u8>>; 12] = [None; 12];
        allsky[0] = Some(&allsky_base_0);
        // Descends from base pixel 7, which has no allsky texture of its own.
        let leaf = HealpixPixel { order: 2, pix: 7 * 16 + 5 };
        let texture = survey.get_tile_texture(leaf, allsky);
        assert!(texture.tile.is_none());
        assert!(!texture.is_allsky);
    }
}
