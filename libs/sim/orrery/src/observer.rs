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
use crate::{
    frames::{
        ecliptic_rotation, equation_of_equinoxes, gmst_radians, hour_angle_rotation,
        hour_angle_to_altaz_rotation, nutation_angles, nutation_rotation, precession_rotation,
        rotation_x, rotation_y, rotation_z, Frame, MEAN_OBLIQUITY_J2000_RAD,
    },
    time::{julian_centuries_tt, utc_mjd_to_ut1_mjd},
};
use absolute_unit::{meters, radians, Meters, Radians};
use anyhow::Result;
use animate::Fader;
use bevy_ecs::prelude::*;
use geodesy::{GeoSurface, Graticule};
use nalgebra::{UnitQuaternion, Vector3};
use runtime::{Extension, FrameStage, Runtime};
use std::f64::consts::PI;

/// A round trip from the Sun to the observer's eye takes roughly this long;
/// multiplying an observer velocity (AU/day) by a distance in AU and this
/// constant gives the light-time-plus-aberration displacement in AU.
/// 499.004_784 seconds per AU, expressed in days.
const LIGHT_TIME_PER_AU_DAYS: f64 = 499.004_784 / 86_400.0;

/// Metres per astronomical unit (IAU 2012 definition).
const ASTRONOMICAL_UNIT_M: f64 = 1.495_978_707e11;

/// Heliocentric gravitational constant, m^3/s^2 (IAU, DE-consistent).
const GM_SUN_M3_S2: f64 = 1.327_124_400_18e20;

const SPEED_OF_LIGHT_M_S: f64 = 2.997_924_58e8;

/// Earth's mean sidereal rotation rate, radians/day: `2*pi` per sidereal
/// day of 86_164.090_53 SI seconds.
const SIDEREAL_RATE_RAD_PER_DAY: f64 = 2.0 * PI * 86_400.0 / 86_164.090_53;

/// Fast-path time drift budget: a `fast` update is allowed to skip
/// recomputing precession as long as the clock has not moved more than this
/// many days since the last full recompute. Precession drifts under an
/// arcsecond per day, which is well under the engine's rendering tolerance.
pub const FAST_PATH_MAX_DRIFT_DAYS: f64 = 1.0;

/// Where a position/velocity pair handed to [`Observer::position_to_apparent`]
/// is measured from. This engine only maintains a geocentric Sun ephemeris
/// ([`crate::Orrery::sun_position_icrf_au`]), not a full barycentric planetary
/// one, so `Barycentric` and `Heliocentric` are accepted for API parity with
/// the reference but are treated identically to `Geocentric`: the recentering
/// step always subtracts the observer's own geocentric position. Satellites
/// (the only current caller) use `Geocentric`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Origin {
    Barycentric,
    Heliocentric,
    Geocentric,
    /// Already relative to the observer; no recentering is applied.
    Observercentric,
}

/// Subtracts the combined light-time, annual and diurnal aberration
/// displacement from a geometric position, given the observer's velocity
/// relative to the solar system barycenter. This is a first-order
/// approximation; it does not separately model gravitational light bending
/// near the solar limb, which is out of scope.
pub fn correct_speed_of_light(
    geometric_icrf_au: Vector3<f64>,
    observer_velocity_au_per_day: Vector3<f64>,
) -> Vector3<f64> {
    let distance_au = geometric_icrf_au.norm();
    geometric_icrf_au - observer_velocity_au_per_day * (distance_au * LIGHT_TIME_PER_AU_DAYS)
}

/// The subset of observer state that participates in hash-gated recompute.
/// Stored as bit patterns since `f64` does not implement `Hash`/`Eq`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PartialSnapshot {
    longitude_bits: u64,
    latitude_bits: u64,
    elevation_bits: u64,
    horizon_dip_bits: u64,
    pressure_bits: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverSnapshot {
    partial: PartialSnapshot,
    tt_bits: u64,
    yaw_bits: u64,
    pitch_bits: u64,
    roll_bits: u64,
    view_offset_alt_bits: u64,
}

/// A location, orientation and instant from which the sky is viewed.
///
/// Recomputing precession, sidereal time and the observed/mount/view
/// rotation chain on every field access would be wasteful, since most frames
/// only move a handful of arcseconds between frames. `update` is hash-gated:
/// it is a no-op if nothing has changed since the last full recompute, and
/// a `fast` update may skip straight to recomputing sidereal time alone
/// (location, pressure and orientation unchanged, clock within
/// [`FAST_PATH_MAX_DRIFT_DAYS`]).
#[derive(Debug)]
pub struct Observer {
    longitude_rad: f64,
    latitude_rad: f64,
    elevation_m: f64,
    /// Depression of the apparent horizon below the astronomical horizon,
    /// e.g. from standing on a hill; zero for a sea-level horizon.
    horizon_dip_rad: f64,
    pressure_millibar: f64,

    tt_mjd: f64,
    yaw_rad: f64,
    pitch_rad: f64,
    roll_rad: f64,
    view_offset_alt_rad: f64,

    hash_accurate: Option<ObserverSnapshot>,
    tt_accurate: f64,

    r_equinox: UnitQuaternion<f64>,
    r_observed: UnitQuaternion<f64>,
    r_mount: UnitQuaternion<f64>,
    r_view: UnitQuaternion<f64>,
    /// Local sidereal (hour-angle origin) time, radians, from the most recent
    /// sidereal recompute. Feeds [`Observer::geocentric_position_velocity_au`].
    lst_rad: f64,

    /// The named matrices the reference implementation exposes for wire-level
    /// debugging and cross-checks, rebuilt from the same precession/nutation/
    /// sidereal-time/mount chain as the `r_*` fields above rather than via a
    /// separate `Pnm06a/Bpn2xy/S06/Era00/Sp00/Epv00/Apco` pipeline (this
    /// engine has no IAU 2000A/06 implementation; see `frames` module doc).
    /// "o" is the un-rotated mount base (no yaw/pitch/roll yet applied).
    pub ro2m: UnitQuaternion<f64>,
    pub rm2v: UnitQuaternion<f64>,
    pub ro2v: UnitQuaternion<f64>,
    pub ri2h: UnitQuaternion<f64>,
    pub rh2i: UnitQuaternion<f64>,
    pub ri2v: UnitQuaternion<f64>,
    pub ri2e: UnitQuaternion<f64>,
    pub re2i: UnitQuaternion<f64>,
    /// ICRF -> view, ignoring atmospheric refraction. Identical to `ri2v`
    /// today since this engine does not yet fold a refraction rotation into
    /// the observed frame; kept as a distinct field so a future refraction
    /// term has somewhere to diverge from without breaking callers.
    pub rc2v: UnitQuaternion<f64>,

    /// Smooths refraction-dependent pressure changes so the horizon does not pop.
    pub pressure_fader: Fader,
}

impl Observer {
    pub fn new(location: Graticule<GeoSurface>, tt_mjd: f64) -> Self {
        let [lat, lon]: [f64; 2] = location.lat_lon::<Radians, f64>();
        let mut obs = Self {
            longitude_rad: lon,
            latitude_rad: lat,
            elevation_m: f64::from(location.distance::<Meters>()),
            horizon_dip_rad: 0.0,
            pressure_millibar: 1013.25,
            tt_mjd,
            yaw_rad: 0.0,
            pitch_rad: 0.0,
            roll_rad: 0.0,
            view_offset_alt_rad: 0.0,
            hash_accurate: None,
            tt_accurate: tt_mjd,
            r_equinox: UnitQuaternion::identity(),
            r_observed: UnitQuaternion::identity(),
            r_mount: UnitQuaternion::identity(),
            r_view: UnitQuaternion::identity(),
            lst_rad: 0.0,
            ro2m: UnitQuaternion::identity(),
            rm2v: UnitQuaternion::identity(),
            ro2v: UnitQuaternion::identity(),
            ri2h: UnitQuaternion::identity(),
            rh2i: UnitQuaternion::identity(),
            ri2v: UnitQuaternion::identity(),
            ri2e: UnitQuaternion::identity(),
            re2i: UnitQuaternion::identity(),
            rc2v: UnitQuaternion::identity(),
            pressure_fader: Fader::new(1013.25, 2.0),
        };
        obs.recompute_full();
        obs
    }

    fn partial_snapshot(&self) -> PartialSnapshot {
        PartialSnapshot {
            longitude_bits: self.longitude_rad.to_bits(),
            latitude_bits: self.latitude_rad.to_bits(),
            elevation_bits: self.elevation_m.to_bits(),
            horizon_dip_bits: self.horizon_dip_rad.to_bits(),
            pressure_bits: self.pressure_millibar.to_bits(),
        }
    }

    fn full_snapshot(&self) -> ObserverSnapshot {
        ObserverSnapshot {
            partial: self.partial_snapshot(),
            tt_bits: self.tt_mjd.to_bits(),
            yaw_bits: self.yaw_rad.to_bits(),
            pitch_bits: self.pitch_rad.to_bits(),
            roll_bits: self.roll_rad.to_bits(),
            view_offset_alt_bits: self.view_offset_alt_rad.to_bits(),
        }
    }

    pub fn set_location(&mut self, location: Graticule<GeoSurface>) {
        let [lat, lon]: [f64; 2] = location.lat_lon::<Radians, f64>();
        self.latitude_rad = lat;
        self.longitude_rad = lon;
        self.elevation_m = f64::from(location.distance::<Meters>());
    }

    pub fn set_time(&mut self, tt_mjd: f64) {
        self.tt_mjd = tt_mjd;
    }

    pub fn set_pressure_millibar(&mut self, pressure: f64) {
        self.pressure_millibar = pressure;
    }

    pub fn set_orientation(&mut self, yaw_rad: f64, pitch_rad: f64, roll_rad: f64) {
        self.yaw_rad = yaw_rad;
        self.pitch_rad = pitch_rad;
        self.roll_rad = roll_rad;
    }

    pub fn set_view_offset_alt(&mut self, offset_rad: f64) {
        self.view_offset_alt_rad = offset_rad;
    }

    pub fn tt_mjd(&self) -> f64 {
        self.tt_mjd
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_rad
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_rad
    }

    /// Recomputes precession, nutation, sidereal time and the full rotation
    /// chain.
    fn recompute_full(&mut self) {
        let centuries = julian_centuries_tt(self.tt_mjd);
        let (dpsi, deps) = nutation_angles(centuries);
        self.r_equinox = nutation_rotation(dpsi, deps, MEAN_OBLIQUITY_J2000_RAD) * precession_rotation(centuries);
        self.ri2e = ecliptic_rotation();
        self.re2i = self.ri2e.inverse();
        self.recompute_sidereal_with_nutation(centuries, dpsi);
        self.hash_accurate = Some(self.full_snapshot());
        self.tt_accurate = self.tt_mjd;
    }

    /// Recomputes only the sidereal-time-dependent rotations, leaving
    /// precession/nutation (which drift far more slowly) untouched.
    fn recompute_sidereal(&mut self, centuries: f64) {
        let (dpsi, _deps) = nutation_angles(centuries);
        self.recompute_sidereal_with_nutation(centuries, dpsi);
    }

    fn recompute_sidereal_with_nutation(&mut self, centuries: f64, dpsi: f64) {
        let ut1_mjd = utc_mjd_to_ut1_mjd(self.tt_mjd, 0.0);
        let eps_mean = MEAN_OBLIQUITY_J2000_RAD;
        let gast = gmst_radians(ut1_mjd, centuries) + equation_of_equinoxes(dpsi, eps_mean);
        self.lst_rad = gast + self.longitude_rad;
        let ha = hour_angle_rotation(self.lst_rad);
        let altaz = hour_angle_to_altaz_rotation(self.latitude_rad);
        self.r_observed = altaz * ha * self.r_equinox;
        self.ri2h = self.r_observed;
        self.rh2i = self.ri2h.inverse();
        self.recompute_orientation();
    }

    fn recompute_orientation(&mut self) {
        let mount = rotation_z(self.yaw_rad) * rotation_y(self.pitch_rad) * rotation_x(self.roll_rad);
        self.r_mount = mount * self.r_observed;
        self.r_view = rotation_y(-self.view_offset_alt_rad) * self.r_mount;

        self.ro2m = mount;
        self.rm2v = rotation_y(-self.view_offset_alt_rad);
        self.ro2v = self.rm2v * self.ro2m;
        self.ri2v = self.r_view;
        self.rc2v = self.ri2v;
    }

    /// Hash-gated recompute. `fast` permits skipping precession recompute
    /// when location/pressure/horizon are unchanged and the clock has moved
    /// less than [`FAST_PATH_MAX_DRIFT_DAYS`] since the last full recompute.
    pub fn update(&mut self, fast: bool) {
        let full = self.full_snapshot();
        if self.hash_accurate == Some(full) {
            return;
        }
        if fast {
            let partial_matches = self
                .hash_accurate
                .map(|h| h.partial == full.partial)
                .unwrap_or(false);
            let drift = (self.tt_mjd - self.tt_accurate).abs();
            if partial_matches && drift <= FAST_PATH_MAX_DRIFT_DAYS {
                let centuries = julian_centuries_tt(self.tt_accurate);
                self.recompute_sidereal(centuries);
                return;
            }
        }
        self.recompute_full();
    }

    fn icrf_rotation(&self, frame: Frame) -> UnitQuaternion<f64> {
        match frame {
            Frame::Icrf => UnitQuaternion::identity(),
            Frame::Ecliptic => ecliptic_rotation(),
            Frame::Equinox => self.r_equinox,
            Frame::Observed => self.r_observed,
            Frame::Mount => self.r_mount,
            Frame::View => self.r_view,
        }
    }

    /// Converts a direction vector from `src` to `dst`. Since every stored
    /// rotation is a genuine orthonormal [`UnitQuaternion`], `R^-1` is exact
    /// and `convert_frame(a, b, convert_frame(b, a, v)) == v` to machine
    /// precision.
    pub fn convert_frame(&self, src: Frame, dst: Frame, v: Vector3<f64>) -> Vector3<f64> {
        let r_src = self.icrf_rotation(src);
        let r_dst = self.icrf_rotation(dst);
        (r_dst * r_src.inverse()) * v
    }

    /// Applies the light-time/aberration correction to a geometric ICRF
    /// position, producing the astrometric place.
    pub fn position_to_astrometric(
        &self,
        geometric_icrf_au: Vector3<f64>,
        observer_velocity_au_per_day: Vector3<f64>,
    ) -> Vector3<f64> {
        correct_speed_of_light(geometric_icrf_au, observer_velocity_au_per_day)
    }

    /// Precesses an astrometric (ICRF) position forward to the mean
    /// equator/equinox of date, giving the apparent place.
    pub fn astrometric_to_apparent(&self, astrometric_icrf_au: Vector3<f64>) -> Vector3<f64> {
        self.convert_frame(Frame::Icrf, Frame::Equinox, astrometric_icrf_au)
    }

    /// The observer's own geocentric position/velocity, in ICRF AU and AU/day,
    /// modeling the Earth as a sphere of [`physical_constants::EARTH_RADIUS_KM`]
    /// rotating at the sidereal rate. Earth's oblateness and polar motion are
    /// not modeled, consistent with `hour_angle_to_altaz_rotation`'s existing
    /// spherical-Earth assumption.
    pub fn geocentric_position_velocity_au(&self) -> (Vector3<f64>, Vector3<f64>) {
        let r_m = physical_constants::EARTH_RADIUS_KM * 1000.0 + self.elevation_m;
        let r_au = r_m / ASTRONOMICAL_UNIT_M;
        let (lat, lst) = (self.latitude_rad, self.lst_rad);
        let position_equinox = Vector3::new(lat.cos() * lst.cos(), lat.cos() * lst.sin(), lat.sin()) * r_au;
        let velocity_equinox =
            Vector3::new(-lat.cos() * lst.sin(), lat.cos() * lst.cos(), 0.0) * r_au * SIDEREAL_RATE_RAD_PER_DAY;
        (
            self.convert_frame(Frame::Equinox, Frame::Icrf, position_equinox),
            self.convert_frame(Frame::Equinox, Frame::Icrf, velocity_equinox),
        )
    }

    /// Gravitational deflection of light passing near the Sun, the way
    /// `eraLdsun` folds it into the astrometric pipeline: a direction `p`
    /// (need not be normalized) is bent toward the Sun by an angle that
    /// falls off with the Sun's apparent distance and vanishes far from it.
    /// `sun_icrf_au`/`observer_position_au` are both geocentric-origin ICRF
    /// positions; the Sun's position as seen from the observer is their
    /// difference.
    fn bend_light_near_sun(
        p: Vector3<f64>,
        sun_icrf_au: Vector3<f64>,
        observer_position_au: Vector3<f64>,
    ) -> Vector3<f64> {
        let sun_from_observer_au = sun_icrf_au - observer_position_au;
        let em_au = sun_from_observer_au.norm();
        if em_au < 1e-6 || p.norm() < 1e-300 {
            return p;
        }
        let e = sun_from_observer_au / em_au;
        let p_hat = p.normalize();
        let p_dot_e = p_hat.dot(&e).clamp(-1.0 + 1e-8, 1.0);
        // `g1` matches ERFA's SRS constant (2*GM_sun / (c^2 * 1 AU)) scaled
        // to the Sun's actual current distance rather than a fixed 1 AU.
        let g1 = 2.0 * GM_SUN_M3_S2 / (SPEED_OF_LIGHT_M_S * SPEED_OF_LIGHT_M_S * em_au * ASTRONOMICAL_UNIT_M);
        let deflection = (e - p_hat * p_dot_e) * (g1 / (1.0 + p_dot_e));
        p + deflection * p.norm()
    }

    /// Composite astrometric pipeline: relative position of observer and
    /// object, light-time, stellar aberration (annual and diurnal) and
    /// gravitational light bending by the Sun, producing the apparent
    /// (observer-relative, ICRF-aligned) direction and rate. `pv_in` is
    /// `(position_au, velocity_au_per_day)` in the frame named by `origin`;
    /// `at_inf` marks objects effectively at infinity (stars, whose own
    /// velocity is not itself meaningful here and whose position is treated
    /// as a pure direction unaffected by parallax), as opposed to solar-
    /// system objects at a finite, consequential distance (planets,
    /// satellites). `sun_icrf_au` is the Sun's current geocentric ICRF
    /// position, e.g. [`crate::Orrery::sun_position_icrf_au`].
    pub fn position_to_apparent(
        &self,
        origin: Origin,
        at_inf: bool,
        pv_in: (Vector3<f64>, Vector3<f64>),
        sun_icrf_au: Vector3<f64>,
    ) -> (Vector3<f64>, Vector3<f64>) {
        let (observer_position_au, observer_velocity_au_per_day) = match origin {
            Origin::Observercentric => (Vector3::zeros(), Vector3::zeros()),
            Origin::Barycentric | Origin::Heliocentric | Origin::Geocentric => {
                self.geocentric_position_velocity_au()
            }
        };

        let (relative_position, relative_velocity) = if at_inf {
            (pv_in.0, -observer_velocity_au_per_day)
        } else {
            (pv_in.0 - observer_position_au, pv_in.1 - observer_velocity_au_per_day)
        };

        let astrometric_position = self.position_to_astrometric(relative_position, observer_velocity_au_per_day);
        let apparent_position = Self::bend_light_near_sun(astrometric_position, sun_icrf_au, observer_position_au);
        (apparent_position, relative_velocity)
    }

    fn sys_update_observer(mut observer: ResMut<Observer>) {
        observer.update(true);
    }
}

impl Extension for Observer {
    fn init(runtime: &mut Runtime) -> Result<()> {
        let here = Graticule::<GeoSurface>::new(radians!(0.0), radians!(0.0), meters!(0.0));
        runtime.insert_resource(Observer::new(here, crate::time::J2000_TT_MJD));
        runtime
            .frame_stage_mut(FrameStage::UpdateObserver)
            .add_system(Observer::sys_update_observer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn test_observer() -> Observer {
        let loc = Graticule::<GeoSurface>::new(
            radians!(0.656_059), // ~37.6 deg
            radians!(-2.126_29), // ~-121.8 deg
            meters!(30.0),
        );
        Observer::new(loc, crate::time::J2000_TT_MJD + 1234.5)
    }

    #[test]
    fn round_trip_through_two_frames_is_identity() {
        let observer = test_observer();
        let v = Vector3::new(0.3, 0.4, std::f64::consts::FRAC_1_SQRT_2).normalize();
        let observed = observer.convert_frame(Frame::Icrf, Frame::Observed, v);
        let back = observer.convert_frame(Frame::Observed, Frame::Icrf, observed);
        assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-12);
        assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-12);
        assert_abs_diff_eq!(back.z, v.z, epsilon = 1e-12);
    }

    #[test]
    fn no_op_update_does_not_change_rotation() {
        let mut observer = test_observer();
        let before = observer.r_observed;
        observer.update(false);
        assert_eq!(observer.r_observed, before);
    }

    #[test]
    fn fast_path_respects_drift_budget() {
        let mut observer = test_observer();
        let snapshot_before = observer.hash_accurate;
        observer.set_time(observer.tt_mjd() + FAST_PATH_MAX_DRIFT_DAYS * 2.0);
        observer.update(true);
        // Drift exceeded the budget, so this was a full recompute: hash_accurate advances.
        assert_ne!(observer.hash_accurate, snapshot_before);
        assert_eq!(observer.tt_accurate, observer.tt_mjd());
    }

    #[test]
    fn geocentric_position_is_one_earth_radius_from_center() {
        let observer = test_observer();
        let (position_au, _velocity_au_per_day) = observer.geocentric_position_velocity_au();
        let expected_au = (physical_constants::EARTH_RADIUS_KM * 1000.0 + 30.0) / ASTRONOMICAL_UNIT_M;
        assert_abs_diff_eq!(position_au.norm(), expected_au, epsilon = 1e-15);
    }

    #[test]
    fn position_to_apparent_recenters_a_finite_object_onto_the_observer() {
        let observer = test_observer();
        // A satellite directly over the observer, 400km up: the geocentric
        // range is ~6771km (Earth radius + altitude) but the topocentric one
        // (what `position_to_apparent` must report) is just the 400km
        // altitude, the same ~17x shrink the reference's own near-zenith
        // satellites see.
        let (observer_position_au, _) = observer.geocentric_position_velocity_au();
        let zenith = observer_position_au.normalize();
        let altitude_au = 400_000.0 / ASTRONOMICAL_UNIT_M;
        let geocentric_icrf = zenith * (observer_position_au.norm() + altitude_au);
        let sun_icrf_au = Vector3::new(0.0, 1.0, 0.0);

        let (apparent, _velocity) = observer.position_to_apparent(
            Origin::Geocentric,
            false,
            (geocentric_icrf, Vector3::zeros()),
            sun_icrf_au,
        );

        assert!(apparent.norm() < geocentric_icrf.norm() / 10.0);
        assert_abs_diff_eq!(apparent.norm(), altitude_au, epsilon = 1e-6);
    }

    #[test]
    fn position_to_apparent_leaves_at_infinity_direction_unrecentred() {
        let observer = test_observer();
        let direction = Vector3::new(0.3, 0.4, std::f64::consts::FRAC_1_SQRT_2).normalize();
        let sun_icrf_au = Vector3::new(1.0, 0.0, 0.0);
        let (apparent, _velocity) =
            observer.position_to_apparent(Origin::Geocentric, true, (direction, Vector3::zeros()), sun_icrf_au);
        // Light-time/aberration/bending perturb it, but a star is not
        // reprojected for the observer's few-thousand-km offset from Earth's
        // center: the result stays within a tiny fraction of a radian of the
        // input direction rather than jumping by a macroscopic parallax.
        let angle = (apparent.normalize().dot(&direction)).clamp(-1.0, 1.0).acos();
        assert!(angle < 1e-3);
    }

    #[test]
    fn light_bending_vanishes_far_from_the_sun() {
        let p = Vector3::new(0.0, 0.0, 1.0);
        let sun_icrf_au = Vector3::new(1.0, 0.0, 0.0);
        let observer_position_au = Vector3::zeros();
        let bent = Observer::bend_light_near_sun(p, sun_icrf_au, observer_position_au);
        // 90 degrees from the Sun, the deflection is at its known maximum
        // (~1.75 arcsec at the solar limb scales down with 1/(1+cos)), but
        // still tiny compared to the vector's own unit length.
        assert!((bent - p).norm() < 1e-5);
    }

    #[test]
    fn correct_speed_of_light_shrinks_toward_observer_velocity() {
        let pv = Vector3::new(1.0, 0.0, 0.0);
        let zero_velocity = Vector3::zeros();
        assert_eq!(correct_speed_of_light(pv, zero_velocity), pv);

        let moving = Vector3::new(0.0, 1e-4, 0.0);
        let corrected = correct_speed_of_light(pv, moving);
        assert!(corrected.y < 0.0);
    }
}
