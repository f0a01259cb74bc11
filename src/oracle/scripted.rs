use std::collections::HashMap;

use crate::{
    foundation::core::{Rect, Size},
    oracle::{BoxId, BoxKind, GeometryOracle, Property, PropertyKey, arena::BoxArena},
};

/// An oracle with caller-assigned geometry.
///
/// Rectangles are whatever [`ScriptedOracle::set_rect`] said they are; nothing re-flows. Every
/// property write is logged, which makes it a convenient harness for the line-level passes.
#[derive(Clone, Debug)]
pub struct ScriptedOracle {
    arena: BoxArena,
    size: Size,
    rects: HashMap<BoxId, Rect>,
    writes: Vec<(BoxId, Property)>,
}

impl Default for ScriptedOracle {
    fn default() -> Self {
        Self::new(Size::new(640.0, 480.0))
    }
}

impl ScriptedOracle {
    pub fn new(size: Size) -> Self {
        Self {
            arena: BoxArena::new(),
            size,
            rects: HashMap::new(),
            writes: Vec::new(),
        }
    }

    pub fn set_rect(&mut self, id: BoxId, rect: Rect) {
        self.rects.insert(id, rect);
    }

    /// Create an attached inline leaf under `parent` with the given text and geometry.
    pub fn leaf(&mut self, parent: BoxId, text: &str, rect: Rect) -> BoxId {
        let id = self.create_box(BoxKind::Inline);
        self.append_child(parent, id);
        self.set_text(id, text);
        self.set_rect(id, rect);
        id
    }

    /// Property writes in the order they happened.
    pub fn writes(&self) -> &[(BoxId, Property)] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl GeometryOracle for ScriptedOracle {
    fn root(&self) -> BoxId {
        self.arena.root()
    }

    fn surface_size(&self) -> Size {
        self.size
    }

    fn create_box(&mut self, kind: BoxKind) -> BoxId {
        self.arena.create(kind)
    }

    fn kind(&self, id: BoxId) -> BoxKind {
        self.arena.node(id).kind
    }

    fn set_text(&mut self, id: BoxId, text: &str) {
        self.arena.node_mut(id).text = text.to_string();
    }

    fn text(&self, id: BoxId) -> &str {
        &self.arena.node(id).text
    }

    fn append_child(&mut self, parent: BoxId, child: BoxId) {
        self.arena.append(parent, child);
    }

    fn insert_after(&mut self, sibling: BoxId, child: BoxId) {
        self.arena.insert_after(sibling, child);
    }

    fn remove(&mut self, id: BoxId) {
        self.arena.detach(id);
    }

    fn parent(&self, id: BoxId) -> Option<BoxId> {
        self.arena.node(id).parent
    }

    fn children(&self, id: BoxId) -> Vec<BoxId> {
        self.arena.node(id).children.clone()
    }

    fn set_property(&mut self, id: BoxId, property: Property) {
        self.writes.push((id, property.clone()));
        self.arena.set_property(id, property);
    }

    fn property(&self, id: BoxId, key: PropertyKey) -> Option<&Property> {
        self.arena.property(id, key)
    }

    fn rect(&mut self, id: BoxId) -> Rect {
        if !self.arena.is_attached(id) {
            return Rect::ZERO;
        }
        self.rects.get(&id).copied().unwrap_or(Rect::ZERO)
    }
}
