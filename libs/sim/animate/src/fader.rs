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

/// Duration used when a `Fader` is constructed with a non-positive duration.
const DEFAULT_DURATION_SECS: f64 = 1.0;

/// Moves a scalar `value` toward a `target` at a fixed rate of
/// `1 / duration` units per second, rather than snapping immediately.
/// Used for slowly-varying observer state (atmospheric pressure) where a
/// step change should read as a smooth transition, not a pop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fader {
    value: f64,
    target: f64,
    duration: f64,
}

impl Fader {
    pub fn new(value: f64, duration_secs: f64) -> Self {
        Self {
            value,
            target: value,
            duration: duration_secs,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Advance by `dt` seconds. Returns true if the value changed.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.value == self.target {
            return false;
        }
        let speed = if self.duration <= 0.0 {
            1.0 / DEFAULT_DURATION_SECS
        } else {
            1.0 / self.duration
        };
        let d = speed * dt;
        if (self.value - self.target).abs() <= d {
            self.value = self.target;
        } else {
            self.value += d * (self.target - self.value).signum();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_toward_target_and_stops() {
        let mut fader = Fader::new(0.0, 2.0);
        fader.set_target(1.0);
        assert!(fader.step(1.0));
        assert!((fader.value() - 0.5).abs() < 1e-9);
        assert!(fader.step(1.0));
        assert!((fader.value() - 1.0).abs() < 1e-9);
        assert!(!fader.step(1.0));
    }

    #[test]
    fn does_not_overshoot_target() {
        let mut fader = Fader::new(0.0, 2.0);
        fader.set_target(1.0);
        assert!(fader.step(10.0));
        assert_eq!(fader.value(), 1.0);
    }
}
