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
/**
 * Orbital mechanics works great. Time, however, does not. The time reference for ephimeris is a
 * position on a spinning thing, whose period drifts human observable amounts over human relevant
 * timespans. To complicate matters further, that spinning thing is itself tidally locked to a mass
 * called the moon, which means that the celestially relevant orbital parameters have to be
 * specified around the "barycenter", rather than about the center of spin. Minor celestial
 * fluctuations are amplified in this system, resulting in a spin rate on Earth that is not
 * a constant. Thus, the reference time and direction are not periodic with respect to each other.
 * To throw a further wrench in the works, we offset the meaning of time occasionally so that
 * things appear to more or less line up locally, confounding the larger picture. So if one wants
 * to use J2000 to find the relative position of planets, one needs to subtract leap seconds, but
 * if one wants the locally relevant spin position of a planet, one must not subtract leap seconds.
 *
 * The name orrery was chosen for this module to put people in mind of the tiny and obviously
 * inaccurate physical solar system models built with gears. Because that is ultimately how this
 * module works: a hack that gives a flavor of the the real thing without trying too hard. Proper
 * scientists should look elsewhere or hold their nose while reading below.
 */
mod ephemeris;
mod frames;
mod observer;
mod time;

pub use crate::{
    ephemeris::{earth_moon_barycenter, KeplerianElements, OrbitalParameters},
    frames::Frame,
    observer::{correct_speed_of_light, Observer, ObserverSnapshot, Origin, FAST_PATH_MAX_DRIFT_DAYS},
    time::{
        julian_centuries_tt, mjd_to_utc_datetime, num_leap_seconds_at, tt_mjd_to_utc_mjd,
        utc_datetime_to_mjd, utc_mjd_to_tt_mjd, utc_mjd_to_ut1_mjd, J2000_TT_MJD,
    },
};

use anyhow::Result;
use bevy_ecs::prelude::*;
use chrono::{TimeZone, Utc};
use nalgebra::Vector3;
use runtime::{Extension, Runtime, SimStage};

/// J2000 ecliptic coordinates were originally fit against a 100-year span
/// measured in 364.25-day "years"; kept as-is so the Earth-Moon-Barycenter
/// table above still lines up with the coefficients it was fit from.
fn legacy_centuries_from_j2000(tt_mjd: f64) -> f64 {
    (tt_mjd - J2000_TT_MJD) / (364.25 * 100.0)
}

/// Tracks simulation time and derives the Sun's direction from the Earth.
/// `Observer` (in this crate) consumes [`Orrery::sun_direction_icrf`] when it
/// needs the Sun for refraction/twilight calculations; the module graph (in
/// the `module` crate) wires them together at runtime.
#[derive(Debug)]
pub struct Orrery {
    earth_moon_barycenter: KeplerianElements,
    tt_mjd: f64,
}

impl Orrery {
    pub fn new_current_time() -> Self {
        Self::new(utc_mjd_to_tt_mjd(utc_datetime_to_mjd(Utc::now())))
    }

    pub fn new(tt_mjd: f64) -> Self {
        Self {
            earth_moon_barycenter: earth_moon_barycenter(),
            tt_mjd,
        }
    }

    pub fn tt_mjd(&self) -> f64 {
        self.tt_mjd
    }

    pub fn set_tt_mjd(&mut self, tt_mjd: f64) {
        self.tt_mjd = tt_mjd;
    }

    pub fn unix_ms(&self) -> i64 {
        mjd_to_utc_datetime(tt_mjd_to_utc_mjd(self.tt_mjd)).timestamp_millis()
    }

    pub fn set_unix_ms(&mut self, unix_ms: i64) {
        let dt = Utc
            .timestamp_millis_opt(unix_ms)
            .single()
            .unwrap_or_else(Utc::now);
        self.tt_mjd = utc_mjd_to_tt_mjd(utc_datetime_to_mjd(dt));
    }

    /// Geocentric position of the Sun, in ICRF AU. Distances internal to
    /// this crate's own frame conversions are direction-only, but a few AU
    /// callers (satellite eclipse/phase geometry) need the true distance,
    /// not just a direction.
    pub fn sun_position_icrf_au(&self) -> Vector3<f64> {
        let centuries = legacy_centuries_from_j2000(self.tt_mjd);
        let params = self.earth_moon_barycenter.at_century(centuries);
        let earth_ecliptic = params.eccliptic_position();
        let sun_from_earth_ecliptic = -earth_ecliptic.coords;
        frames::ecliptic_rotation().inverse() * sun_from_earth_ecliptic
    }

    /// Direction from the Earth to the Sun, in ICRF.
    pub fn sun_direction_icrf(&self) -> Vector3<f64> {
        self.sun_position_icrf_au().normalize()
    }

    fn sys_step_time(step: Res<animate::TimeStep>, mut orrery: ResMut<Orrery>) {
        orrery.tt_mjd += step.step().as_secs_f64() / 86_400.0;
    }
}

impl Extension for Orrery {
    fn init(runtime: &mut Runtime) -> Result<()> {
        runtime.insert_module("orrery", Orrery::new_current_time());
        runtime
            .sim_stage_mut(SimStage::Animate)
            .add_system(Orrery::sys_step_time);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_direction_is_unit_length() {
        let orrery = Orrery::new(J2000_TT_MJD);
        let dir = orrery.sun_direction_icrf();
        assert!((dir.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn time_step_advances_forward() {
        let mut orrery = Orrery::new(J2000_TT_MJD);
        let before = orrery.tt_mjd();
        orrery.set_tt_mjd(before + 1.0);
        assert!(orrery.tt_mjd() > before);
    }
}
