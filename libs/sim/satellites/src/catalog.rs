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
//! The satellite catalog: loads entries from the noctuasky JSONL format
//! (one JSON object per line, already decompressed by the caller — this
//! crate owns no networking or gzip decoding, the same boundary `hips`
//! draws around its own tile fetches), then drives per-frame updates and
//! the bounded visible-list render sweep.
use crate::satellite::Satellite;
use crate::visible_list::VisibleList;
use anyhow::{anyhow, Result};
use chrono::TimeZone;
use nalgebra::Vector3;
use orrery::Observer;

fn parse_date_to_mjd(s: &str) -> Option<f64> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;
    let date = chrono::Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).earliest()?;
    Some(orrery::utc_datetime_to_mjd(date))
}

#[derive(Default)]
pub struct SatelliteCatalog {
    satellites: Vec<Satellite>,
    visible: VisibleList,
}

impl SatelliteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, satellite: Satellite) {
        self.satellites.push(satellite);
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Satellite> {
        self.satellites.get(index)
    }

    /// Parses one JSON object per line in the noctuasky `model_data` shape
    /// (`{"model_data": {"norad_number", "mag", "tle": [l1, l2]}, "names":
    /// [...], "launch_date", "decay_date"}`), adding each satellite it can
    /// parse and logging the rest, mirroring `load_jsonl_data`'s
    /// skip-and-continue behavior so one bad line does not abort the load.
    pub fn load_jsonl(&mut self, text: &str) -> Result<usize> {
        let mut count = 0;
        for (line_idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match self.parse_satellite_line(line) {
                Ok(sat) => {
                    self.satellites.push(sat);
                    count += 1;
                }
                Err(e) => log::error!("cannot create satellite from line {}: {}", line_idx, e),
            }
        }
        Ok(count)
    }

    fn parse_satellite_line(&self, line: &str) -> Result<Satellite> {
        let value = json::parse(line).map_err(|e| anyhow!("invalid json: {e}"))?;
        let model_data = &value["model_data"];
        let norad_number = model_data["norad_number"]
            .as_u64()
            .ok_or_else(|| anyhow!("missing norad_number"))?;
        let stdmag = model_data["mag"].as_f64().unwrap_or(f64::NAN);
        let tle1 = model_data["tle"][0].as_str().ok_or_else(|| anyhow!("missing tle line 1"))?;
        let tle2 = model_data["tle"][1].as_str().ok_or_else(|| anyhow!("missing tle line 2"))?;
        let name = value["names"][0].as_str().unwrap_or("").to_string();
        let launch_date = value["launch_date"].as_str().and_then(parse_date_to_mjd);
        let decay_date = value["decay_date"].as_str().and_then(parse_date_to_mjd);
        Satellite::from_tle(name, norad_number, stdmag, tle1, tle2, launch_date, decay_date)
    }

    /// Updates every satellite whose perigee-based `max_brightness` could
    /// possibly reach `limiting_vmag`, skipping the rest outright: the
    /// same cheap cull the reference implementation performs before
    /// bothering with SGP4 at all.
    pub fn update_all(&mut self, observer: &Observer, sun_icrf_au: Vector3<f64>, limiting_vmag: f64) {
        for sat in &mut self.satellites {
            if sat.max_brightness() > limiting_vmag {
                continue;
            }
            sat.update(observer, sun_icrf_au);
        }
    }

    /// Runs one frame of the visible-list sweep. `render` is called with
    /// each candidate satellite and must report whether it actually drew
    /// (e.g. passed `limiting_vmag` and is above the horizon); `keep`
    /// additionally protects an index, such as the current selection, from
    /// being dropped from the visible list even if it stopped rendering.
    /// Returns the indices rendered this frame.
    pub fn render_step(&mut self, mut render: impl FnMut(&Satellite) -> bool, keep: impl Fn(usize) -> bool) -> Vec<usize> {
        let satellites = &self.satellites;
        self.visible.step(satellites.len(), |index| render(&satellites[index]), keep)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.contains(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_minimal_jsonl_line() {
        let mut catalog = SatelliteCatalog::new();
        let line = r#"{"model_data":{"norad_number":25544,"mag":-1.8,"tle":["1 25544U 98067A   20115.55025390  .00016717  00000-0  10270-3 0  9027","2 25544  51.6412 253.9367 0001868 190.8144 169.2966 15.49324997 23698"]},"names":["ISS (ZARYA)"]}"#;
        let count = catalog.load_jsonl(line).unwrap();
        assert_eq!(count, 1);
        assert_eq!(catalog.get(0).unwrap().number, 25544);
    }

    #[test]
    fn skips_unparseable_lines_without_aborting() {
        let mut catalog = SatelliteCatalog::new();
        let text = "not json\n{\"model_data\":{}}\n";
        let count = catalog.load_jsonl(text).unwrap();
        assert_eq!(count, 0);
    }
}
