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
use anyhow::Result;
use bevy_ecs::prelude::*;
use runtime::{Extension, Runtime, SimStage};
use std::time::{Duration, Instant};

/// Wall-clock tick resource. Ticks at a fixed 60Hz rate under
/// `SimStage::TimeStep`, ahead of every other sim system, so that anything
/// reading `TimeStep` during `SimStage::Animate` sees the already-advanced
/// `now`/`step` for this tick.
#[derive(Debug)]
pub struct TimeStep {
    start: Instant,
    now: Instant,
    delta: Duration,
}

impl TimeStep {
    pub fn new_60fps() -> Self {
        let delta = Duration::from_micros(1_000_000 / 60);
        let start = Instant::now();
        Self {
            start,
            // Start one tick behind now so the sim schedule always runs at
            // least once before the frame schedule on the first frame.
            now: start - delta,
            delta,
        }
    }

    pub fn start(&self) -> &Instant {
        &self.start
    }

    pub fn now(&self) -> &Instant {
        &self.now
    }

    pub fn step(&self) -> &Duration {
        &self.delta
    }

    pub fn next_now(&self) -> Instant {
        self.now + self.delta
    }

    fn sys_tick_time(mut timestep: ResMut<TimeStep>) {
        let dt = timestep.delta;
        timestep.now += dt;
    }
}

impl Extension for TimeStep {
    fn init(runtime: &mut Runtime) -> Result<()> {
        runtime.insert_module("time", TimeStep::new_60fps());
        runtime
            .sim_stage_mut(SimStage::TimeStep)
            .add_system(Self::sys_tick_time);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_now_is_one_tick_ahead() {
        let step = TimeStep::new_60fps();
        assert_eq!(step.next_now(), *step.now() + *step.step());
    }
}
