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
//! Reference frames and the rotations between them.
//!
//! Every frame is reached from ICRF by a single rotation; `Observer` caches
//! those rotations and `convert_frame` composes them as
//! `R(dst) * R(src)^-1`. Because every rotation here is built from
//! [`UnitQuaternion`] primitives, the inverse is exactly the conjugate, so a
//! round trip through any two frames is the identity to floating point
//! precision rather than needing separate numerical verification.
//!
//! Nutation is approximated by its single largest term (the 18.6 year
//! lunar-node term, amplitude ~17 arcsec in longitude) rather than the full
//! IAU 2000A series. That keeps GAST and the true-equinox-of-date matrices
//! honest to within about an arcsecond, which is what this engine's other
//! precision budgets (precession truncated at Lieske 1979, polar motion and
//! refraction ignored) already assume; ERFA-grade sub-milliarcsecond
//! precision is still out of scope.
use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// The chain of frames a point in the sky is carried through before it lands
/// on screen.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Frame {
    /// Barycentric, fixed, matches the catalog frame (equivalent to J2000 mean equator/equinox).
    Icrf,
    /// Ecliptic of J2000, obtained from Icrf by a fixed rotation about the mean obliquity.
    Ecliptic,
    /// Mean equator and equinox of date: Icrf precessed forward to the observer's epoch.
    Equinox,
    /// Topocentric horizontal (altitude/azimuth) at the observer's location and time.
    Observed,
    /// The mount's pointing frame: Observed rotated by the mount's yaw/pitch/roll.
    Mount,
    /// The final view direction: Mount offset by the eyepiece/finder's fixed altitude offset.
    View,
}

pub fn rotation_x(angle_rad: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angle_rad)
}

pub fn rotation_y(angle_rad: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle_rad)
}

pub fn rotation_z(angle_rad: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle_rad)
}

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Mean obliquity of the ecliptic at J2000.0 (IAU 1980), radians.
pub const MEAN_OBLIQUITY_J2000_RAD: f64 = 23.439_291_11 * PI / 180.0;

/// Icrf -> Ecliptic (of J2000). Fixed, since both frames share the J2000 epoch.
pub fn ecliptic_rotation() -> UnitQuaternion<f64> {
    rotation_x(MEAN_OBLIQUITY_J2000_RAD)
}

/// Lieske (1979) precession angles zeta, z, theta, in radians, as a function
/// of Julian centuries of TT elapsed since J2000.0.
pub fn precession_angles(t: f64) -> (f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let zeta = (2306.2181 * t + 0.301_88 * t2 + 0.017_998 * t3) * ARCSEC_TO_RAD;
    let z = (2306.2181 * t + 1.094_68 * t2 + 0.018_203 * t3) * ARCSEC_TO_RAD;
    let theta = (2004.3109 * t - 0.426_65 * t2 - 0.041_833 * t3) * ARCSEC_TO_RAD;
    (zeta, z, theta)
}

/// Icrf -> mean equator/equinox of date, `t` Julian centuries of TT since J2000.0.
pub fn precession_rotation(t: f64) -> UnitQuaternion<f64> {
    let (zeta, z, theta) = precession_angles(t);
    rotation_z(-z) * rotation_y(theta) * rotation_z(-zeta)
}

/// Nutation in longitude (dpsi) and obliquity (deps), radians, from the
/// single dominant term of the IAU 1980 series: the 18.6-year wobble driven
/// by the regression of the Moon's ascending node. Its amplitude (~17" in
/// longitude, ~9" in obliquity) dwarfs every other term, so dropping the
/// rest costs well under an arcsecond.
pub fn nutation_angles(t: f64) -> (f64, f64) {
    const OMEGA_DEG_AT_J2000: f64 = 125.044_52;
    const OMEGA_DEG_PER_CENTURY: f64 = -1_934.136_261;
    let omega = (OMEGA_DEG_AT_J2000 + OMEGA_DEG_PER_CENTURY * t).to_radians();
    let dpsi = -17.20 * ARCSEC_TO_RAD * omega.sin();
    let deps = 9.20 * ARCSEC_TO_RAD * omega.cos();
    (dpsi, deps)
}

/// True obliquity of date: mean obliquity plus the nutation in obliquity.
pub fn true_obliquity(deps: f64) -> f64 {
    MEAN_OBLIQUITY_J2000_RAD + deps
}

/// Mean equinox of date -> true equinox of date, given `dpsi`/`deps` from
/// [`nutation_angles`] and the mean obliquity `eps_mean` they were computed
/// against.
pub fn nutation_rotation(dpsi: f64, deps: f64, eps_mean: f64) -> UnitQuaternion<f64> {
    rotation_x(-(eps_mean + deps)) * rotation_z(-dpsi) * rotation_x(eps_mean)
}

/// Equation of the equinoxes: GAST - GMST, radians, to first order
/// (`dpsi * cos(eps_mean)`; the higher-order terms ERFA adds are sub-0.01").
pub fn equation_of_equinoxes(dpsi: f64, eps_mean: f64) -> f64 {
    dpsi * eps_mean.cos()
}

/// Greenwich mean sidereal time, IAU 1982 formula, in radians, given `ut1_mjd`
/// (days) and `t` the matching Julian centuries of TT since J2000.0 used for
/// the secular terms. Add [`equation_of_equinoxes`] to get GAST.
pub fn gmst_radians(ut1_mjd: f64, t: f64) -> f64 {
    const SECONDS_PER_DAY: f64 = 86_400.0;
    let t2 = t * t;
    let t3 = t2 * t;
    let gmst_seconds = 24_110.548_41
        + 8_640_184.812_866 * t
        + 0.093_104 * t2
        - 6.2e-6 * t3
        + ut1_mjd.fract() * SECONDS_PER_DAY * 1.002_737_909_350_795;
    let turns = gmst_seconds / SECONDS_PER_DAY;
    (turns.rem_euclid(1.0)) * 2.0 * PI
}

/// Hour-angle rotation: equinox-of-date -> local hour-angle frame, given the
/// local sidereal time `lst` (radians, east positive).
pub fn hour_angle_rotation(lst: f64) -> UnitQuaternion<f64> {
    rotation_z(lst)
}

/// Hour-angle frame -> topocentric alt/az, given geodetic latitude `phi` (radians).
pub fn hour_angle_to_altaz_rotation(phi: f64) -> UnitQuaternion<f64> {
    rotation_y(PI / 2.0 - phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn precession_vanishes_at_j2000() {
        let r = precession_rotation(0.0);
        assert_abs_diff_eq!(r.angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn ecliptic_rotation_is_orthonormal() {
        let r = ecliptic_rotation();
        let m = r.to_rotation_matrix().into_inner();
        let should_be_identity = m * m.transpose();
        assert_abs_diff_eq!(should_be_identity, nalgebra::Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn gmst_is_bounded() {
        let g = gmst_radians(59_000.25, 0.21);
        assert!((0.0..2.0 * PI).contains(&g));
    }

    #[test]
    fn true_obliquity_stays_close_to_mean() {
        let (_, deps) = nutation_angles(0.3);
        let eps_true = true_obliquity(deps);
        assert!((eps_true - MEAN_OBLIQUITY_J2000_RAD).abs() < 10.0 * ARCSEC_TO_RAD);
    }

    #[test]
    fn nutation_is_under_twenty_arcsec() {
        for t in [-2.0, -0.5, 0.0, 0.5, 2.0] {
            let (dpsi, deps) = nutation_angles(t);
            assert!(dpsi.abs() < 20.0 * ARCSEC_TO_RAD);
            assert!(deps.abs() < 10.0 * ARCSEC_TO_RAD);
        }
    }

    #[test]
    fn nutation_rotation_vanishes_with_zero_terms() {
        let r = nutation_rotation(0.0, 0.0, MEAN_OBLIQUITY_J2000_RAD);
        assert_abs_diff_eq!(r.angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn nutation_rotation_is_orthonormal() {
        let (dpsi, deps) = nutation_angles(0.3);
        let r = nutation_rotation(dpsi, deps, MEAN_OBLIQUITY_J2000_RAD);
        let m = r.to_rotation_matrix().into_inner();
        let should_be_identity = m * m.transpose();
        assert_abs_diff_eq!(should_be_identity, nalgebra::Matrix3::identity(), epsilon = 1e-12);
    }
}
