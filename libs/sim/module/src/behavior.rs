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
use crate::attribute::{Attribute, AttributeValue};
use crate::graph::ModuleId;
use anyhow::{bail, Result};
use std::time::Duration;

/// Per-frame context handed to `Module::update`. Carries the clock only;
/// modules that need the observer or painter hold their own resource handles
/// (wired up by the core loop), since this crate does not depend on either.
#[derive(Clone, Copy, Debug)]
pub struct UpdateContext {
    pub dt: Duration,
    pub frame_index: u64,
}

/// Per-frame context handed to `Module::render`/`post_render`.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext {
    pub frame_index: u64,
}

/// Lazily-populated child listings (e.g. a HiPS tile whose children are
/// still loading) report `Pending` with whatever is known so far; the caller
/// re-lists on a later frame rather than treating the list as final.
#[derive(Clone, Debug)]
pub enum ListOutcome {
    Complete(Vec<ModuleId>),
    Pending(Vec<ModuleId>),
}

/// A node's behavior: its update/render hooks and its reflective attribute
/// table. `render_order` (carried on the tree node, not here) determines
/// traversal order; this trait is only the polymorphic part.
pub trait Module: std::fmt::Debug {
    fn type_code(&self) -> [u8; 4];

    fn update(&mut self, _ctx: &UpdateContext) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, _ctx: &RenderContext) -> Result<()> {
        Ok(())
    }

    fn post_render(&mut self, _ctx: &RenderContext) -> Result<()> {
        Ok(())
    }

    fn list_children(&self) -> ListOutcome {
        ListOutcome::Complete(Vec::new())
    }

    fn attributes(&self) -> &'static [Attribute] {
        &[]
    }

    fn get_attribute(&self, name: &str) -> Option<AttributeValue> {
        let _ = name;
        None
    }

    fn set_attribute(&mut self, name: &str, value: AttributeValue) -> Result<()> {
        bail!("module {:?} has no writable attribute {name:?} (value {value})", self.type_code());
    }

    /// Called after a successful `set_attribute`, so a module can react
    /// (e.g. invalidate a cache) without the caller needing to know which
    /// attribute triggers what.
    fn on_attribute_changed(&mut self, _name: &str) {}
}

#[derive(Debug, Default)]
pub struct RootModule;

impl Module for RootModule {
    fn type_code(&self) -> [u8; 4] {
        *b"ROOT"
    }
}
