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
//! The object graph: every renderable thing in the sky (a star, a
//! constellation line, a HiPS survey tile, a satellite) is a `Module`
//! attached to the tree under `ModuleGraph`, reachable by stable id and,
//! for catalog-backed objects, by `Oid`.
mod attribute;
mod behavior;
mod graph;
mod oid;

pub use attribute::{Attribute, AttributeKind, AttributeValue};
pub use behavior::{ListOutcome, Module, RenderContext, RootModule, UpdateContext};
pub use graph::{ModuleGraph, ModuleId};
pub use oid::Oid;
