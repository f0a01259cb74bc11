//! A self-contained geometry oracle with its own flow layout.
//!
//! [`LayoutSurface`] keeps the box tree in an arena and re-flows lazily: any mutation marks the
//! layout stale, and the next [`GeometryOracle::rect`] query lays the whole tree out again.
//! Text is measured through a pluggable [`TextShaper`].

pub mod dump;
pub(crate) mod flow;
pub mod parley_shaper;
pub mod shaper;

use std::collections::HashMap;

use crate::{
    foundation::core::{Rect, Size, Vec2},
    oracle::{BoxId, BoxKind, GeometryOracle, Property, PropertyKey, arena::BoxArena},
    surface::{
        flow::Flow,
        shaper::{MonospaceShaper, TextShaper},
    },
};

pub struct LayoutSurface {
    arena: BoxArena,
    size: Size,
    shaper: Box<dyn TextShaper>,
    rects: HashMap<BoxId, Rect>,
    stale: bool,
}

impl std::fmt::Debug for LayoutSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutSurface")
            .field("size", &self.size)
            .field("boxes", &self.arena.len())
            .field("stale", &self.stale)
            .finish()
    }
}

impl LayoutSurface {
    pub fn new(size: Size, shaper: impl TextShaper + 'static) -> Self {
        Self {
            arena: BoxArena::new(),
            size,
            shaper: Box::new(shaper),
            rects: HashMap::new(),
            stale: true,
        }
    }

    /// Surface measuring text with [`MonospaceShaper`] defaults.
    pub fn monospace(size: Size) -> Self {
        Self::new(size, MonospaceShaper::default())
    }

    fn reflow(&mut self) {
        if !self.stale {
            return;
        }
        match Flow::new(&self.arena, self.shaper.as_mut()).layout_root(self.size) {
            Ok(rects) => {
                tracing::trace!(boxes = rects.len(), "surface re-flowed");
                self.rects = rects;
            }
            Err(err) => {
                tracing::error!(error = %err, "surface layout failed");
                self.rects.clear();
            }
        }
        self.stale = false;
    }

    /// Translate offset of `id` once its transition has run for `elapsed_s` seconds.
    pub fn translate_at(&self, id: BoxId, elapsed_s: f64) -> Vec2 {
        let from = match self.arena.property(id, PropertyKey::Translate) {
            Some(Property::Translate(v)) => *v,
            _ => Vec2::ZERO,
        };
        match self.arena.property(id, PropertyKey::Transition) {
            Some(Property::Transition(t)) => t.offset_at(from, elapsed_s),
            _ => from,
        }
    }
}

impl GeometryOracle for LayoutSurface {
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
        self.stale = true;
    }

    fn text(&self, id: BoxId) -> &str {
        &self.arena.node(id).text
    }

    fn append_child(&mut self, parent: BoxId, child: BoxId) {
        self.arena.append(parent, child);
        self.stale = true;
    }

    fn insert_after(&mut self, sibling: BoxId, child: BoxId) {
        self.arena.insert_after(sibling, child);
        self.stale = true;
    }

    fn remove(&mut self, id: BoxId) {
        self.arena.detach(id);
        self.stale = true;
    }

    fn parent(&self, id: BoxId) -> Option<BoxId> {
        self.arena.node(id).parent
    }

    fn children(&self, id: BoxId) -> Vec<BoxId> {
        self.arena.node(id).children.clone()
    }

    fn set_property(&mut self, id: BoxId, property: Property) {
        self.arena.set_property(id, property);
        self.stale = true;
    }

    fn property(&self, id: BoxId, key: PropertyKey) -> Option<&Property> {
        self.arena.property(id, key)
    }

    fn rect(&mut self, id: BoxId) -> Rect {
        if !self.arena.is_attached(id) {
            return Rect::ZERO;
        }
        self.reflow();
        self.rects.get(&id).copied().unwrap_or(Rect::ZERO)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/mod.rs"]
mod tests;
