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
//! The object tree (C4): an arena of modules addressed by generational index
//! rather than the reference implementation's intrusive, refcounted
//! doubly-linked list. Stable ids survive reallocation of the backing `Vec`.
use crate::{
    attribute::AttributeValue,
    behavior::{Module, RenderContext, RootModule, UpdateContext},
    oid::Oid,
};
use anyhow::{anyhow, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ModuleId {
    index: u32,
    generation: u32,
}

struct Node {
    generation: u32,
    alive: bool,
    stable_id: String,
    oid: Option<Oid>,
    render_order: f64,
    creation_order: u64,
    ref_count: u32,
    parent: Option<ModuleId>,
    children: Vec<ModuleId>,
    cached_observer_hash: Option<u64>,
    behavior: Box<dyn Module>,
}

pub struct ModuleGraph {
    nodes: Vec<Node>,
    free_list: Vec<u32>,
    next_creation_order: u64,
    root: ModuleId,
    changed_events: Vec<(ModuleId, String)>,
}

impl Default for ModuleGraph {
    fn default() -> Self {
        let root_node = Node {
            generation: 0,
            alive: true,
            stable_id: "root".to_string(),
            oid: None,
            render_order: 0.0,
            creation_order: 0,
            ref_count: 1,
            parent: None,
            children: Vec::new(),
            cached_observer_hash: None,
            behavior: Box::new(RootModule),
        };
        Self {
            nodes: vec![root_node],
            free_list: Vec::new(),
            next_creation_order: 1,
            root: ModuleId {
                index: 0,
                generation: 0,
            },
            changed_events: Vec::new(),
        }
    }
}

impl ModuleGraph {
    pub fn root(&self) -> ModuleId {
        self.root
    }

    fn node(&self, id: ModuleId) -> Result<&Node> {
        let node = self
            .nodes
            .get(id.index as usize)
            .ok_or_else(|| anyhow!("module id {id:?} out of range"))?;
        if !node.alive || node.generation != id.generation {
            return Err(anyhow!("module id {id:?} is stale"));
        }
        Ok(node)
    }

    fn node_mut(&mut self, id: ModuleId) -> Result<&mut Node> {
        let node = self
            .nodes
            .get_mut(id.index as usize)
            .ok_or_else(|| anyhow!("module id {id:?} out of range"))?;
        if !node.alive || node.generation != id.generation {
            return Err(anyhow!("module id {id:?} is stale"));
        }
        Ok(node)
    }

    /// Inserts a new module as a child of `parent`. The new node starts with
    /// a reference count of one, held by the parent edge.
    pub fn insert(
        &mut self,
        parent: ModuleId,
        stable_id: impl Into<String>,
        render_order: f64,
        oid: Option<Oid>,
        behavior: Box<dyn Module>,
    ) -> Result<ModuleId> {
        self.node(parent)?;
        let creation_order = self.next_creation_order;
        self.next_creation_order += 1;
        let node = Node {
            generation: 0,
            alive: true,
            stable_id: stable_id.into(),
            oid,
            render_order,
            creation_order,
            ref_count: 1,
            parent: Some(parent),
            children: Vec::new(),
            cached_observer_hash: None,
            behavior,
        };
        let id = if let Some(index) = self.free_list.pop() {
            let generation = self.nodes[index as usize].generation + 1;
            self.nodes[index as usize] = Node {
                generation,
                ..node
            };
            ModuleId { index, generation }
        } else {
            let index = self.nodes.len() as u32;
            self.nodes.push(node);
            ModuleId {
                index,
                generation: 0,
            }
        };
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Increments the external reference count held on `id`.
    pub fn retain(&mut self, id: ModuleId) -> Result<()> {
        self.node_mut(id)?.ref_count += 1;
        Ok(())
    }

    /// Decrements the external reference count. A node is only actually
    /// freed once its count reaches zero AND it has been detached from its
    /// parent (`detach`); releasing alone never frees an attached node.
    pub fn release(&mut self, id: ModuleId) -> Result<()> {
        let node = self.node_mut(id)?;
        node.ref_count = node.ref_count.saturating_sub(1);
        self.maybe_free(id)
    }

    /// Detaches `id` from its parent's child list without destroying it.
    pub fn detach(&mut self, id: ModuleId) -> Result<()> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|&c| c != id);
        }
        self.node_mut(id)?.parent = None;
        self.maybe_free(id)
    }

    fn maybe_free(&mut self, id: ModuleId) -> Result<()> {
        let node = self.node(id)?;
        if node.ref_count == 0 && node.parent.is_none() {
            let index = id.index as usize;
            self.nodes[index].alive = false;
            self.nodes[index].children.clear();
            self.free_list.push(id.index);
        }
        Ok(())
    }

    pub fn stable_id(&self, id: ModuleId) -> Result<&str> {
        Ok(&self.node(id)?.stable_id)
    }

    pub fn oid(&self, id: ModuleId) -> Result<Option<Oid>> {
        Ok(self.node(id)?.oid)
    }

    pub fn observer_hash(&self, id: ModuleId) -> Result<Option<u64>> {
        Ok(self.node(id)?.cached_observer_hash)
    }

    pub fn set_observer_hash(&mut self, id: ModuleId, hash: u64) -> Result<()> {
        self.node_mut(id)?.cached_observer_hash = Some(hash);
        Ok(())
    }

    /// Children of `id`, sorted by ascending `render_order` then creation
    /// order (stable tie-break, matching insertion order).
    pub fn children_sorted(&self, id: ModuleId) -> Result<Vec<ModuleId>> {
        let mut children = self.node(id)?.children.clone();
        children.sort_by(|a, b| {
            let na = &self.nodes[a.index as usize];
            let nb = &self.nodes[b.index as usize];
            na.render_order
                .partial_cmp(&nb.render_order)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(na.creation_order.cmp(&nb.creation_order))
        });
        Ok(children)
    }

    pub fn get_attribute(&self, id: ModuleId, name: &str) -> Result<Option<AttributeValue>> {
        Ok(self.node(id)?.behavior.get_attribute(name))
    }

    pub fn set_attribute(&mut self, id: ModuleId, name: &str, value: AttributeValue) -> Result<()> {
        let node = self.node_mut(id)?;
        node.behavior.set_attribute(name, value)?;
        node.behavior.on_attribute_changed(name);
        self.changed_events.push((id, name.to_string()));
        Ok(())
    }

    pub fn drain_changed_events(&mut self) -> Vec<(ModuleId, String)> {
        std::mem::take(&mut self.changed_events)
    }

    /// Runs `update` depth-first, visiting each level in render order.
    pub fn update_all(&mut self, id: ModuleId, ctx: &UpdateContext) -> Result<()> {
        self.node_mut(id)?.behavior.update(ctx)?;
        for child in self.children_sorted(id)? {
            self.update_all(child, ctx)?;
        }
        Ok(())
    }

    /// Runs `render` then `post_render` depth-first, in render order.
    pub fn render_all(&mut self, id: ModuleId, ctx: &RenderContext) -> Result<()> {
        self.node_mut(id)?.behavior.render(ctx)?;
        for child in self.children_sorted(id)? {
            self.render_all(child, ctx)?;
        }
        self.node_mut(id)?.behavior.post_render(ctx)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{Attribute, AttributeKind};

    #[derive(Debug, Default)]
    struct Counter {
        ticks: i64,
    }

    impl Module for Counter {
        fn type_code(&self) -> [u8; 4] {
            *b"CNTR"
        }

        fn update(&mut self, _ctx: &UpdateContext) -> Result<()> {
            self.ticks += 1;
            Ok(())
        }

        fn attributes(&self) -> &'static [Attribute] {
            &[Attribute::read_write("ticks", AttributeKind::F64)]
        }

        fn get_attribute(&self, name: &str) -> Option<AttributeValue> {
            (name == "ticks").then(|| AttributeValue::F64(self.ticks as f64))
        }

        fn set_attribute(&mut self, name: &str, value: AttributeValue) -> Result<()> {
            if name == "ticks" {
                self.ticks = value.as_f64().ok_or_else(|| anyhow!("ticks is F64"))? as i64;
                Ok(())
            } else {
                anyhow::bail!("no such attribute {name}")
            }
        }
    }

    fn ctx() -> UpdateContext {
        UpdateContext {
            dt: std::time::Duration::from_millis(16),
            frame_index: 0,
        }
    }

    #[test]
    fn insert_and_update_visits_children() {
        let mut graph = ModuleGraph::default();
        let root = graph.root();
        let a = graph
            .insert(root, "a", 1.0, None, Box::new(Counter::default()))
            .unwrap();
        let b = graph
            .insert(root, "b", 0.0, None, Box::new(Counter::default()))
            .unwrap();
        graph.update_all(root, &ctx()).unwrap();
        assert_eq!(graph.get_attribute(a, "ticks").unwrap(), Some(AttributeValue::F64(1.0)));
        assert_eq!(graph.get_attribute(b, "ticks").unwrap(), Some(AttributeValue::F64(1.0)));

        // b has the lower render_order, so should sort first.
        let sorted = graph.children_sorted(root).unwrap();
        assert_eq!(sorted, vec![b, a]);
    }

    #[test]
    fn set_attribute_records_changed_event() {
        let mut graph = ModuleGraph::default();
        let root = graph.root();
        let a = graph
            .insert(root, "a", 0.0, None, Box::new(Counter::default()))
            .unwrap();
        graph.set_attribute(a, "ticks", AttributeValue::F64(42.0)).unwrap();
        assert_eq!(
            graph.get_attribute(a, "ticks").unwrap(),
            Some(AttributeValue::F64(42.0))
        );
        let events = graph.drain_changed_events();
        assert_eq!(events, vec![(a, "ticks".to_string())]);
    }

    #[test]
    fn node_is_freed_only_after_release_and_detach() {
        let mut graph = ModuleGraph::default();
        let root = graph.root();
        let a = graph
            .insert(root, "a", 0.0, None, Box::new(Counter::default()))
            .unwrap();
        graph.retain(a).unwrap(); // ref_count now 2 (insert + retain)
        graph.detach(a).unwrap(); // detached, but ref_count still 1: not freed
        assert!(graph.stable_id(a).is_ok());
        graph.release(a).unwrap(); // ref_count 0 and detached: freed
        assert!(graph.stable_id(a).is_err());
    }

    #[test]
    fn oid_round_trips_through_the_tree() {
        let mut graph = ModuleGraph::default();
        let root = graph.root();
        let oid = Oid::catalog(*b"HD\0\0", 8890);
        let a = graph
            .insert(root, "hd8890", 0.0, Some(oid), Box::new(Counter::default()))
            .unwrap();
        assert_eq!(graph.oid(a).unwrap(), Some(oid));
    }
}
