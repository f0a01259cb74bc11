use std::collections::BTreeMap;

use crate::oracle::{BoxId, BoxKind, Property, PropertyKey};

#[derive(Clone, Debug)]
pub(crate) struct BoxNode {
    pub kind: BoxKind,
    pub parent: Option<BoxId>,
    pub children: Vec<BoxId>,
    pub text: String,
    pub props: BTreeMap<PropertyKey, Property>,
}

/// Box tree storage shared by the oracle implementations.
#[derive(Clone, Debug)]
pub(crate) struct BoxArena {
    nodes: Vec<BoxNode>,
}

impl BoxArena {
    pub fn new() -> Self {
        let mut out = Self { nodes: Vec::new() };
        out.create(BoxKind::Root);
        out
    }

    pub fn root(&self) -> BoxId {
        BoxId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn create(&mut self, kind: BoxKind) -> BoxId {
        let id = BoxId(self.nodes.len() as u32);
        self.nodes.push(BoxNode {
            kind,
            parent: None,
            children: Vec::new(),
            text: String::new(),
            props: BTreeMap::new(),
        });
        id
    }

    pub fn node(&self, id: BoxId) -> &BoxNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: BoxId) -> &mut BoxNode {
        &mut self.nodes[id.index()]
    }

    pub fn detach(&mut self, id: BoxId) {
        if let Some(parent) = self.nodes[id.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|c| *c != id);
        }
    }

    pub fn append(&mut self, parent: BoxId, child: BoxId) {
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    pub fn insert_after(&mut self, sibling: BoxId, child: BoxId) {
        let Some(parent) = self.nodes[sibling.index()].parent else {
            return;
        };
        self.detach(child);
        let siblings = &mut self.nodes[parent.index()].children;
        let at = siblings
            .iter()
            .position(|c| *c == sibling)
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(at, child);
        self.nodes[child.index()].parent = Some(parent);
    }

    pub fn set_property(&mut self, id: BoxId, property: Property) {
        self.nodes[id.index()]
            .props
            .insert(property.key(), property);
    }

    pub fn property(&self, id: BoxId, key: PropertyKey) -> Option<&Property> {
        self.nodes[id.index()].props.get(&key)
    }

    /// True when `id` is reachable from the root.
    pub fn is_attached(&self, id: BoxId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == self.root() {
                return true;
            }
            cur = self.nodes[c.index()].parent;
        }
        false
    }
}
