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
use crate::TimeStep;
use anyhow::{bail, Result};
use bevy_ecs::prelude::*;
use lyon_geom::{cubic_bezier::CubicBezierSegment, Point};
use nalgebra::UnitQuaternion;
use runtime::{Extension, Runtime, SimStage};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct CubicBezierCurve {
    bezier: CubicBezierSegment<f64>,
}

impl CubicBezierCurve {
    pub const fn new((x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> Self {
        Self {
            bezier: CubicBezierSegment {
                from: Point::new(0., 0.),
                ctrl1: Point::new(x1, y1),
                ctrl2: Point::new(x2, y2),
                to: Point::new(1., 1.),
            },
        }
    }

    pub fn interpolate(&self, x: f64) -> f64 {
        let ts = self.bezier.solve_t_for_x(x);
        if let Some(&t) = ts.get(0) {
            self.bezier.y(t)
        } else {
            1.
        }
    }
}

/// A value that a [`Timeline`] animation can interpolate between a start
/// and an end. `lerp` panics if asked to mix variants; callers never
/// construct an animation with mismatched start/end kinds, so `with_curve`
/// checks this once up front instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationValue {
    Scalar(f64),
    Quaternion(UnitQuaternion<f64>),
}

impl AnimationValue {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(a + (b - a) * t),
            (Self::Quaternion(a), Self::Quaternion(b)) => Self::Quaternion(a.slerp(b, t)),
            _ => unreachable!("AnimationValue variants checked to match in with_curve"),
        }
    }

    fn same_kind(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Scalar(_), Self::Scalar(_)) | (Self::Quaternion(_), Self::Quaternion(_))
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum AnimationState {
    Starting,
    Running,
    Finished,
}

#[derive(Debug)]
struct Animation {
    start: AnimationValue,
    end: AnimationValue,
    bezier: CubicBezierCurve,
    duration: Duration,
    duration_f64: f64,
    start_time: Option<Instant>,
    current: AnimationValue,
    state: AnimationState,
}

impl Animation {
    fn new(start: AnimationValue, end: AnimationValue, bezier: CubicBezierCurve, duration: Duration) -> Self {
        Self {
            current: start,
            start,
            end,
            bezier,
            duration,
            duration_f64: duration.as_secs_f64(),
            start_time: None,
            state: AnimationState::Starting,
        }
    }

    fn step_time(&mut self, now: &Instant) {
        if self.state == AnimationState::Finished {
            return;
        }
        let start_time = *self.start_time.get_or_insert_with(|| {
            self.state = AnimationState::Running;
            *now
        });
        let elapsed = *now - start_time;
        if self.duration_f64 <= 0.0 || elapsed >= self.duration {
            self.current = self.end;
            self.state = AnimationState::Finished;
            return;
        }
        let f = self.bezier.interpolate(elapsed.as_secs_f64() / self.duration_f64);
        self.current = self.start.lerp(&self.end, f);
    }

    fn is_finished(&self) -> bool {
        self.state == AnimationState::Finished
    }
}

/// Opaque reference to a running (or finished) [`Timeline`] animation.
/// Remains valid for the animation's lifetime; finished animations are
/// never removed from the timeline, so polling a handle after completion
/// just keeps returning the end value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct AnimationHandle(usize);

/// Drives a pool of scalar/quaternion animations forward each sim tick and
/// lets callers poll the interpolated value by handle.
#[derive(Debug, Default)]
pub struct Timeline {
    animations: Vec<Animation>,
}

impl Timeline {
    pub const LINEAR_BEZIER: CubicBezierCurve = CubicBezierCurve::new((0., 0.), (1., 1.));
    pub const EASE_BEZIER: CubicBezierCurve = CubicBezierCurve::new((0.25, 0.1), (0.25, 1.));
    pub const EASE_IN_BEZIER: CubicBezierCurve = CubicBezierCurve::new((0.42, 0.), (1., 1.));
    pub const EASE_OUT_BEZIER: CubicBezierCurve = CubicBezierCurve::new((0., 0.), (0.58, 1.));
    pub const EASE_IN_OUT_BEZIER: CubicBezierCurve = CubicBezierCurve::new((0.42, 0.), (0.58, 1.));

    pub fn with_curve(
        &mut self,
        start: AnimationValue,
        end: AnimationValue,
        duration_secs: f64,
        bezier: CubicBezierCurve,
    ) -> Result<AnimationHandle> {
        if !start.same_kind(&end) {
            bail!("animation start and end must be the same kind of value");
        }
        let handle = AnimationHandle(self.animations.len());
        self.animations
            .push(Animation::new(start, end, bezier, Duration::from_secs_f64(duration_secs)));
        Ok(handle)
    }

    pub fn lerp_to(&mut self, start: f64, end: f64, duration_secs: f64) -> Result<AnimationHandle> {
        self.with_curve(
            AnimationValue::Scalar(start),
            AnimationValue::Scalar(end),
            duration_secs,
            Self::LINEAR_BEZIER,
        )
    }

    pub fn ease_to(&mut self, start: f64, end: f64, duration_secs: f64) -> Result<AnimationHandle> {
        self.with_curve(
            AnimationValue::Scalar(start),
            AnimationValue::Scalar(end),
            duration_secs,
            Self::EASE_BEZIER,
        )
    }

    pub fn ease_in_to(&mut self, start: f64, end: f64, duration_secs: f64) -> Result<AnimationHandle> {
        self.with_curve(
            AnimationValue::Scalar(start),
            AnimationValue::Scalar(end),
            duration_secs,
            Self::EASE_IN_BEZIER,
        )
    }

    pub fn ease_out_to(&mut self, start: f64, end: f64, duration_secs: f64) -> Result<AnimationHandle> {
        self.with_curve(
            AnimationValue::Scalar(start),
            AnimationValue::Scalar(end),
            duration_secs,
            Self::EASE_OUT_BEZIER,
        )
    }

    pub fn ease_in_out_to(&mut self, start: f64, end: f64, duration_secs: f64) -> Result<AnimationHandle> {
        self.with_curve(
            AnimationValue::Scalar(start),
            AnimationValue::Scalar(end),
            duration_secs,
            Self::EASE_IN_OUT_BEZIER,
        )
    }

    pub fn slerp_to(
        &mut self,
        start: UnitQuaternion<f64>,
        end: UnitQuaternion<f64>,
        duration_secs: f64,
    ) -> Result<AnimationHandle> {
        self.with_curve(
            AnimationValue::Quaternion(start),
            AnimationValue::Quaternion(end),
            duration_secs,
            Self::EASE_IN_OUT_BEZIER,
        )
    }

    pub fn value(&self, handle: AnimationHandle) -> Option<AnimationValue> {
        self.animations.get(handle.0).map(|a| a.current)
    }

    pub fn is_finished(&self, handle: AnimationHandle) -> bool {
        self.animations
            .get(handle.0)
            .map(Animation::is_finished)
            .unwrap_or(true)
    }

    fn step_time(&mut self, now: &Instant) {
        for animation in &mut self.animations {
            animation.step_time(now);
        }
    }

    fn sys_animate(step: Res<TimeStep>, mut timeline: ResMut<Timeline>) {
        let now = *step.now();
        timeline.step_time(&now);
    }
}

impl Extension for Timeline {
    fn init(runtime: &mut Runtime) -> Result<()> {
        runtime.insert_module("timeline", Timeline::default());
        runtime
            .sim_stage_mut(SimStage::Animate)
            .add_system(Self::sys_animate);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_animation_reaches_end_value() {
        let mut timeline = Timeline::default();
        let handle = timeline.lerp_to(0.0, 10.0, 1.0).unwrap();
        let start = Instant::now();
        timeline.step_time(&start);
        timeline.step_time(&(start + Duration::from_secs(2)));
        assert!(timeline.is_finished(handle));
        assert_eq!(timeline.value(handle), Some(AnimationValue::Scalar(10.0)));
    }

    #[test]
    fn mismatched_kinds_are_rejected() {
        let mut timeline = Timeline::default();
        let err = timeline.with_curve(
            AnimationValue::Scalar(0.0),
            AnimationValue::Quaternion(UnitQuaternion::identity()),
            1.0,
            Timeline::LINEAR_BEZIER,
        );
        assert!(err.is_err());
    }

    #[test]
    fn unstarted_handle_holds_start_value() {
        let mut timeline = Timeline::default();
        let handle = timeline.lerp_to(3.0, 7.0, 1.0).unwrap();
        assert_eq!(timeline.value(handle), Some(AnimationValue::Scalar(3.0)));
        assert!(!timeline.is_finished(handle));
    }
}
