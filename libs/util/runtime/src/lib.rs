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
use bevy_ecs::{prelude::*, system::Resource};
use std::{any::TypeId, collections::HashMap};

pub trait Extension {
    fn init(runtime: &mut Runtime) -> Result<()>;
}

/// Sub-frame-rate simulation stages, run a variable number of times per frame
/// to catch monotonic sim time up to wallclock (see [`Runtime::run_sim_once`]).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, StageLabel)]
pub enum SimStage {
    TimeStep,
    Animate,
}

/// Per-frame stages, run exactly once per displayed frame, in order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, StageLabel)]
pub enum FrameStage {
    /// Advance animations (time jump, direction slerp, fov zoom, faders).
    Animate,
    /// Recompute Observer-derived state (frames, matrices, hashes).
    UpdateObserver,
    /// Per-module update, ascending `render_order`.
    UpdateModules,
    /// Per-module render, ascending `render_order`.
    RenderModules,
    /// Per-module post-render hooks.
    PostRender,
}

pub struct Runtime {
    modules: HashMap<String, TypeId>,
    pub world: World,
    sim_schedule: Schedule,
    frame_schedule: Schedule,
}

impl Default for Runtime {
    fn default() -> Self {
        let sim_schedule = Schedule::default()
            .with_stage(SimStage::TimeStep, SystemStage::parallel())
            .with_stage(SimStage::Animate, SystemStage::parallel());

        let frame_schedule = Schedule::default()
            .with_stage(FrameStage::Animate, SystemStage::parallel())
            .with_stage(FrameStage::UpdateObserver, SystemStage::parallel())
            .with_stage(FrameStage::UpdateModules, SystemStage::parallel())
            .with_stage(FrameStage::RenderModules, SystemStage::parallel())
            .with_stage(FrameStage::PostRender, SystemStage::parallel());

        Self {
            modules: HashMap::new(),
            world: World::default(),
            sim_schedule,
            frame_schedule,
        }
    }
}

impl Runtime {
    pub fn sim_stage_mut(&mut self, sim_stage: SimStage) -> &mut SystemStage {
        self.sim_schedule.get_stage_mut(&sim_stage).unwrap()
    }

    pub fn frame_stage_mut(&mut self, frame_stage: FrameStage) -> &mut SystemStage {
        self.frame_schedule.get_stage_mut(&frame_stage).unwrap()
    }

    pub fn load_extension<T: Extension>(&mut self) -> Result<&mut Self> {
        T::init(self)?;
        Ok(self)
    }

    /// Register a named, typed module resource. The name is tracked so that
    /// host-facing introspection (e.g. a JSON tree dump) can enumerate the
    /// live module set without walking `World` archetypes directly.
    pub fn insert_module<S: Into<String>, T: Resource>(&mut self, name: S, value: T) {
        self.modules.insert(name.into(), TypeId::of::<T>());
        self.world.insert_resource(value);
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    #[inline]
    pub fn insert_resource<T: Resource>(&mut self, value: T) -> &mut Self {
        self.world.insert_resource(value);
        self
    }

    #[inline]
    pub fn get_resource<T: Resource>(&self) -> Option<&T> {
        self.world.get_resource()
    }

    #[inline]
    pub fn resource<T: Resource>(&self) -> &T {
        self.world.get_resource().expect("unset resource")
    }

    #[inline]
    pub fn resource_mut<T: Resource>(&mut self) -> Mut<T> {
        self.world.get_resource_mut().expect("unset resource")
    }

    #[inline]
    pub fn remove_resource<T: Resource>(&mut self) -> Option<T> {
        self.world.remove_resource()
    }

    pub fn run_sim_once(&mut self) {
        self.sim_schedule.run_once(&mut self.world);
    }

    pub fn run_frame_once(&mut self) {
        self.frame_schedule.run_once(&mut self.world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let _ = Runtime::default();
    }
}
