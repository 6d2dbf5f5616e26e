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
//! Eye adaptation and the magnitude → screen-point pipeline: scene world
//! luminance is tonemapped by a parametric curve, and star magnitudes are
//! turned into a pixel radius and gamma-corrected luminance through a chain
//! of photometric conversions (illuminance, apparent luminance in an
//! eyepiece, tonemap, radius scaling, clamping).

/// Arcseconds per radian, ERFA's `DR2AS`; the illuminance formula is stated
/// per steradian-via-arcsecond-squared, so this constant is load-bearing,
/// not a rounding convenience.
const RADIANS_TO_ARCSEC: f64 = 206_264.806_247_096_37;

/// `10.7646e4`: the luminance, in cd/m², of a source at magnitude 0 spread
/// over one square arcsecond.
const MAG0_LUMINANCE_PER_ARCSEC2: f64 = 10.7646e4;

/// Apparent angular radius of an unresolved point source, modeling the
/// human eye's point-spread function: 2.5 arcminutes.
const EYE_PSF_RADIUS_RADIANS: f64 = (2.5 / 60.0) * std::f64::consts::PI / 180.0;

/// The parametric tonemapping curve `Ld = (ln(1+p*Lw) / ln(1+p*Lwmax))^(1/q)`.
#[derive(Clone, Copy, Debug)]
pub struct Tonemapper {
    pub p: f64,
    pub q: f64,
    pub exposure: f64,
    pub lwmax: f64,
}

impl Tonemapper {
    pub fn new(p: f64, q: f64, exposure: f64, lwmax: f64) -> Self {
        Self {
            p,
            q,
            exposure,
            lwmax,
        }
    }

    pub fn map(&self, lw: f64) -> f64 {
        ((1.0 + self.p * lw).ln() / (1.0 + self.p * self.lwmax).ln()).powf(1.0 / self.q)
    }
}

/// Tracks the scene's maximum observed world luminance across frames,
/// blending toward it exponentially in log space with roughly a 0.06s
/// half-life — about 16% closed per 1/60s tick — unless a fast-adaptation
/// event (e.g. the Moon entering the field of view) asks to jump straight
/// to the new value.
#[derive(Clone, Copy, Debug)]
pub struct EyeAdaptation {
    lwmax: f64,
    frame_peak: f64,
    frame_fast: bool,
}

impl EyeAdaptation {
    const REFERENCE_DT: f64 = 0.01666;
    const REFERENCE_FRACTION: f64 = 0.16;
    const MAX_FRACTION: f64 = 0.5;

    pub fn new(initial_lwmax: f64) -> Self {
        Self {
            lwmax: initial_lwmax,
            frame_peak: 0.0,
            frame_fast: false,
        }
    }

    pub fn lwmax(&self) -> f64 {
        self.lwmax
    }

    /// Called once per visible bright object per frame; the frame's Lwmax
    /// is the max over every report, with fast-adaptation sticky once set.
    pub fn report_luminance(&mut self, lum: f64, fast_adaptation: bool) {
        if lum > self.frame_peak {
            self.frame_peak = lum;
            self.frame_fast = fast_adaptation;
        }
    }

    /// Advances the blend by `dt_secs` and resets the per-frame peak for
    /// the next frame's reports to accumulate into.
    pub fn step(&mut self, dt_secs: f64) {
        if self.frame_fast && self.frame_peak > self.lwmax {
            self.lwmax = self.frame_peak;
        } else {
            let fraction = (Self::REFERENCE_FRACTION * dt_secs / Self::REFERENCE_DT).min(Self::MAX_FRACTION);
            self.lwmax = (self.lwmax.ln() + (self.frame_peak.ln() - self.lwmax.ln()) * fraction).exp();
        }
        self.frame_peak = 0.0;
        self.frame_fast = false;
    }
}

/// `E(vmag) = 10.7646e4 / R2AS^2 * 10^(-0.4 * vmag)`, in lux.
pub fn mag_to_illuminance(vmag: f64) -> f64 {
    MAG0_LUMINANCE_PER_ARCSEC2 / (RADIANS_TO_ARCSEC * RADIANS_TO_ARCSEC) * 10f64.powf(-0.4 * vmag)
}

/// Converts illuminance at the aperture into apparent luminance in the
/// eyepiece, applying telescope light grasp and magnification and clamping
/// the source's apparent area to at least the eye's point-spread function.
pub fn illuminance_to_lum_apparent(illum: f64, surf_steradians: f64, light_grasp: f64, magnification: f64) -> f64 {
    let illum = illum * light_grasp;
    let mut surf = surf_steradians * magnification * magnification;
    let min_point_area = std::f64::consts::PI * EYE_PSF_RADIUS_RADIANS * EYE_PSF_RADIUS_RADIANS;
    surf = surf.max(min_point_area);
    illum / surf
}

pub fn mag_to_lum_apparent(vmag: f64, surf_steradians: f64, light_grasp: f64, magnification: f64) -> f64 {
    illuminance_to_lum_apparent(mag_to_illuminance(vmag), surf_steradians, light_grasp, magnification)
}

/// Per-frame knobs that scale the magnitude → radius curve: a Bortle-index
/// extinction term, a manual linear scale, a relative (exponent) scale, and
/// a screen-size factor (0.7 for a small window, 1.5 for a large one).
#[derive(Clone, Copy, Debug)]
pub struct PointScale {
    pub star_linear_scale: f64,
    pub bortle_index: f64,
    pub star_relative_scale: f64,
    pub screen_factor: f64,
}

impl PointScale {
    pub fn screen_factor_for(shortest_side_px: f64) -> f64 {
        (shortest_side_px / 600.0).clamp(0.7, 1.5)
    }

    fn s_linear(&self) -> f64 {
        (self.star_linear_scale + 3.0 / 11.0 - self.bortle_index / 11.0) * self.screen_factor
    }
}

/// Radius and eye-adapted luminance (pre gamma, pre clamp) for a magnitude,
/// with no floor on the radius — used both directly and by the bisection
/// search in `vmag_for_radius`.
fn point_for_mag_unclamped(tonemapper: &Tonemapper, scale: &PointScale, vmag: f64, surf_steradians: f64, light_grasp: f64, magnification: f64) -> (f64, f64) {
    let lum_apparent = mag_to_lum_apparent(vmag, surf_steradians, light_grasp, magnification);
    let ld = tonemapper.map(lum_apparent).max(0.0);
    let radius = scale.s_linear() * ld.powf(scale.star_relative_scale / 2.0);
    (radius, ld)
}

#[derive(Clone, Copy, Debug)]
pub struct PointRadiusLimits {
    pub r_skip: f64,
    pub r_min: f64,
    pub r_max: f64,
}

/// Result of mapping a magnitude to a screen point: `None` if the point is
/// too small to render at all (below `r_skip`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub radius: f64,
    pub luminance: f64,
}

/// Full magnitude → point pipeline: tonemap, scale, clamp, gamma-correct.
/// Below `r_skip` the star is skipped entirely; between `r_skip` and
/// `r_min` the luminance is scaled down quadratically and the radius
/// clamped up to `r_min` (so small stars dim instead of vanishing one pixel
/// at a time); above `r_max` the radius is hard-capped.
pub fn point_for_mag(
    tonemapper: &Tonemapper,
    scale: &PointScale,
    limits: &PointRadiusLimits,
    vmag: f64,
    surf_steradians: f64,
    light_grasp: f64,
    magnification: f64,
) -> Option<ScreenPoint> {
    let (mut r, mut ld) = point_for_mag_unclamped(tonemapper, scale, vmag, surf_steradians, light_grasp, magnification);
    if r < limits.r_skip {
        return None;
    }
    if r > 0.0 && r < limits.r_min {
        ld *= ((r - limits.r_skip) / (limits.r_min - limits.r_skip)).powi(2);
        r = limits.r_min;
    }
    let gamma_corrected = ld.powf(1.0 / 2.2);
    r = r.min(limits.r_max);
    Some(ScreenPoint {
        radius: r,
        luminance: gamma_corrected.clamp(0.0, 1.0),
    })
}

/// Bisection search for the vmag whose unclamped point radius equals
/// `target_r`, used to derive `stars_limit_mag`/`hints_limit_mag` per frame.
pub fn vmag_for_radius(
    tonemapper: &Tonemapper,
    scale: &PointScale,
    target_r: f64,
    surf_steradians: f64,
    light_grasp: f64,
    magnification: f64,
) -> f64 {
    const MAX_ITER: u32 = 32;
    const DELTA: f64 = 0.001;
    let mut lo = -192.0_f64; // brightest end of the search range
    let mut hi = 64.0_f64; // faintest end

    let (r_lo, _) = point_for_mag_unclamped(tonemapper, scale, lo, surf_steradians, light_grasp, magnification);
    if r_lo < target_r {
        return lo;
    }

    let mut mid = 0.0;
    for _ in 0..MAX_ITER {
        mid = (lo + hi) / 2.0;
        let (r, _) = point_for_mag_unclamped(tonemapper, scale, mid, surf_steradians, light_grasp, magnification);
        if (r - target_r).abs() < DELTA {
            return mid;
        }
        if r > target_r {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    mid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tonemap_curve_maps_lwmax_to_one() {
        let t = Tonemapper::new(1.0, 1.0, 1.0, 1000.0);
        assert!((t.map(1000.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tonemap_curve_maps_zero_to_zero() {
        let t = Tonemapper::new(1.0, 1.0, 1.0, 1000.0);
        assert!(t.map(0.0).abs() < 1e-9);
    }

    #[test]
    fn eye_adaptation_blends_gradually_by_default() {
        let mut eye = EyeAdaptation::new(1.0);
        eye.report_luminance(1000.0, false);
        eye.step(0.01666);
        // One reference tick closes ~16% of the gap in log space.
        assert!(eye.lwmax() > 1.0 && eye.lwmax() < 10.0);
    }

    #[test]
    fn eye_adaptation_jumps_on_fast_adaptation() {
        let mut eye = EyeAdaptation::new(1.0);
        eye.report_luminance(10_000.0, true);
        eye.step(0.01666);
        assert!((eye.lwmax() - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn brighter_magnitude_yields_larger_radius() {
        let tonemapper = Tonemapper::new(1.0, 1.0, 1.0, 5000.0);
        let scale = PointScale {
            star_linear_scale: 1.0,
            bortle_index: 1.0,
            star_relative_scale: 1.0,
            screen_factor: 1.0,
        };
        let limits = PointRadiusLimits {
            r_skip: 0.0,
            r_min: 0.1,
            r_max: 100.0,
        };
        let bright = point_for_mag(&tonemapper, &scale, &limits, -1.0, 0.0, 1.0, 1.0).unwrap();
        let faint = point_for_mag(&tonemapper, &scale, &limits, 5.0, 0.0, 1.0, 1.0).unwrap();
        assert!(bright.radius > faint.radius);
    }

    #[test]
    fn very_faint_magnitude_is_skipped() {
        let tonemapper = Tonemapper::new(1.0, 1.0, 1.0, 5000.0);
        let scale = PointScale {
            star_linear_scale: 1.0,
            bortle_index: 1.0,
            star_relative_scale: 1.0,
            screen_factor: 1.0,
        };
        let limits = PointRadiusLimits {
            r_skip: 0.5,
            r_min: 1.0,
            r_max: 100.0,
        };
        assert!(point_for_mag(&tonemapper, &scale, &limits, 30.0, 0.0, 1.0, 1.0).is_none());
    }

    #[test]
    fn vmag_for_radius_round_trips_through_point_for_mag() {
        let tonemapper = Tonemapper::new(1.0, 1.0, 1.0, 5000.0);
        let scale = PointScale {
            star_linear_scale: 1.0,
            bortle_index: 1.0,
            star_relative_scale: 1.0,
            screen_factor: 1.0,
        };
        let target_r = 2.0;
        let mag = vmag_for_radius(&tonemapper, &scale, target_r, 0.0, 1.0, 1.0);
        let (r, _) = point_for_mag_unclamped(&tonemapper, &scale, mag, 0.0, 1.0, 1.0);
        assert!((r - target_r).abs() < 0.01);
    }

    #[test]
    fn screen_factor_is_clamped_between_small_and_large() {
        assert_eq!(PointScale::screen_factor_for(300.0), 0.7);
        assert_eq!(PointScale::screen_factor_for(1200.0), 1.5);
    }
}
