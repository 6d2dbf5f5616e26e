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

/*
Tables taken from: https://ssd.jpl.nasa.gov/txt/p_elem_t2.txt
EM Bary   1.00000018      0.01673163     -0.00054346      100.46691572    102.93005885     -5.11260389
         -0.00000003     -0.00003661     -0.01337178    35999.37306329      0.31795260     -0.24123856
*/

use nalgebra::Point3;
use std::f64::consts::PI;

#[derive(Debug)]
pub struct KeplerianElements {
    initial: OrbitalParameters,
    delta_per_century: OrbitalParameters,

    b: f64,
    c: f64,
    s: f64,
    f: f64,
}

impl KeplerianElements {
    #[allow(clippy::too_many_arguments)]
    #[allow(clippy::many_single_char_names)]
    pub fn new(
        a: f64,
        e: f64,
        i: f64,
        l: f64,
        omega_bar: f64,
        capital_omega: f64,
        apc: f64,
        epc: f64,
        ipc: f64,
        lpc: f64,
        long_node_pc: f64,
        omega_bar_pc: f64,
        b: f64,
        c: f64,
        s: f64,
        f: f64,
    ) -> Self {
        Self {
            initial: OrbitalParameters::new(a, e, i, l, omega_bar, capital_omega),
            delta_per_century: OrbitalParameters::new(
                apc,
                epc,
                ipc,
                lpc,
                omega_bar_pc,
                long_node_pc,
            ),
            b,
            c,
            s,
            f,
        }
    }

    pub fn at_century(&self, centuries_from_j2000: f64) -> OrbitalParameters {
        OrbitalParameters::new(
            self.project_coord(
                self.initial.a,
                self.delta_per_century.a,
                centuries_from_j2000,
            ),
            self.project_coord(
                self.initial.e,
                self.delta_per_century.e,
                centuries_from_j2000,
            ),
            self.project_coord(
                self.initial.i,
                self.delta_per_century.i,
                centuries_from_j2000,
            ) * PI
                / 180f64,
            self.project_coord(
                self.initial.l,
                self.delta_per_century.l,
                centuries_from_j2000,
            ) * PI
                / 180f64,
            self.project_coord(
                self.initial.omega_bar,
                self.delta_per_century.omega_bar,
                centuries_from_j2000,
            ) * PI
                / 180f64,
            self.project_coord(
                self.initial.capital_omega,
                self.delta_per_century.capital_omega,
                centuries_from_j2000,
            ) * PI
                / 180f64,
        )
    }

    pub fn project_coord(&self, n0: f64, ndot: f64, centuries_from_j2000: f64) -> f64 {
        n0 + ndot * centuries_from_j2000
            + self.b * centuries_from_j2000.powf(2f64)
            + self.c * (self.f * centuries_from_j2000).cos()
            + self.s * (self.f * centuries_from_j2000).sin()
    }
}

#[derive(Debug)]
pub struct OrbitalParameters {
    a: f64,             // AU
    e: f64,             // rad
    i: f64,             // deg
    l: f64,             // deg
    omega_bar: f64,     // deg
    capital_omega: f64, // deg
}

impl OrbitalParameters {
    pub fn new(
        a: f64,
        e: f64,
        i: f64,             // deg
        l: f64,             // deg
        omega_bar: f64,     // deg
        capital_omega: f64, // deg
    ) -> Self {
        Self {
            a,
            e,
            i,
            l,
            omega_bar,
            capital_omega,
        }
    }

    // Returns in AU.
    // Method taken from: https://space.stackexchange.com/questions/8911/determining-orbital-position-at-a-future-point-in-time
    #[allow(non_snake_case)]
    #[allow(clippy::many_single_char_names)]
    pub fn eccliptic_position(&self) -> Point3<f64> {
        let i = self.i;
        let l = self.l;
        let omega_bar = self.omega_bar;
        let capital_omega = self.capital_omega;

        // M = l - w|  =>  mean anomaly = mean longitude - longitude of the periapsis
        let M = l - omega_bar; // mean anomaly

        // argument_of_periapsis + longitude_of_ascending_node = longitude_of_periapsis
        let w = omega_bar - capital_omega; // argument of periapsis

        // Solve Euler's equation using Newton's method.
        let mut E = M;
        loop {
            let dE = (E - self.e * E.sin() - M) / (1f64 - self.e * E.cos());
            E -= dE;
            if dE.abs() < 1e-6 {
                break;
            }
        }

        // Convert to polar.
        let P = self.a * (E.cos() - self.e);
        let Q = self.a * E.sin() * (1f64 - self.e.powf(2f64)).sqrt();

        // Rotate the 2d frame into 3d
        // rotate by argument of periapsis
        let x = w.cos() * P - w.sin() * Q;
        let y = w.sin() * P + w.cos() * Q;
        // rotate by inclination
        let z = i.sin() * x;
        let x = i.cos() * x;
        // rotate by longitude of ascending node
        let xtemp = x;
        let x = capital_omega.cos() * xtemp - capital_omega.sin() * y;
        let y = capital_omega.sin() * xtemp + capital_omega.cos() * y;

        Point3::new(x, y, z)
    }
}

pub fn earth_moon_barycenter() -> KeplerianElements {
    KeplerianElements::new(
        1.000_000_18,
        0.016_731_63,
        -0.000_543_46,
        100.466_915_72,
        102.930_058_85,
        -5.112_603_89,
        -0.000_000_03,
        -0.000_036_61,
        -0.013_371_78,
        35_999.373_063_29,
        0.317_952_60,
        -0.241_238_56,
        0.0,
        0.0,
        0.0,
        0.0,
    )
}
