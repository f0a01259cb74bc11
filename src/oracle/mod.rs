//! The geometry oracle: the presentation engine the renderer drives.
//!
//! The renderer never lays text out itself. It creates boxes, writes presentation
//! properties, attaches the boxes to a live surface, and then asks the oracle where things
//! ended up. Implementations must return rectangles that reflect every mutation made so far.

pub(crate) mod arena;
pub mod property;
pub mod scripted;

use crate::foundation::core::{Rect, Size};

pub use property::{Property, PropertyKey};

/// Handle to a box owned by a [`GeometryOracle`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BoxId(pub u32);

impl BoxId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BoxKind {
    /// The surface itself.
    Root,
    /// Absolutely positioned region container.
    Region,
    Block,
    Inline,
    /// Atomic inline box hosting its own line layout.
    InlineBlock,
    /// Forced line break.
    Break,
}

impl BoxKind {
    pub fn is_inline_level(self) -> bool {
        matches!(self, Self::Inline | Self::InlineBlock | Self::Break)
    }
}

/// Box creation, mutation and measurement.
///
/// Boxes that are not attached below [`GeometryOracle::root`] measure as [`Rect::ZERO`].
pub trait GeometryOracle {
    fn root(&self) -> BoxId;

    /// Ambient size of the surface, used when the caller supplies no dimensions.
    fn surface_size(&self) -> Size;

    fn create_box(&mut self, kind: BoxKind) -> BoxId;

    fn kind(&self, id: BoxId) -> BoxKind;

    fn set_text(&mut self, id: BoxId, text: &str);

    fn text(&self, id: BoxId) -> &str;

    fn append_child(&mut self, parent: BoxId, child: BoxId);

    /// Insert `child` as the next sibling of `sibling`.
    fn insert_after(&mut self, sibling: BoxId, child: BoxId);

    /// Detach `id` (and its subtree) from its parent.
    fn remove(&mut self, id: BoxId);

    fn parent(&self, id: BoxId) -> Option<BoxId>;

    fn children(&self, id: BoxId) -> Vec<BoxId>;

    fn child_count(&self, id: BoxId) -> usize {
        self.children(id).len()
    }

    fn set_property(&mut self, id: BoxId, property: Property);

    fn property(&self, id: BoxId, key: PropertyKey) -> Option<&Property>;

    /// Border-box rectangle in surface coordinates.
    fn rect(&mut self, id: BoxId) -> Rect;
}
