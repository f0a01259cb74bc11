//! Caption scene rendering with inferred line structure.
//!
//! `isd-render` turns an Intermediate Synchronic Document (ISD), the fully resolved caption scene
//! for one instant, into a tree of presentation boxes on a [`GeometryOracle`]. The oracle does the
//! real text layout; the renderer reads measured geometry back to recover visual lines and then
//! applies the line-level effects that layout engines do not provide natively.
//!
//! # Pipeline overview
//!
//! 1. **Build**: walk the ISD and create one box per node, translating style attributes into
//!    properties through a static mapping table.
//! 2. **Measure**: group laid-out leaves into [`Line`]s by block-axis overlap.
//! 3. **Decorate**: multi-row alignment, line padding, run coalescing and gap filling, in that
//!    order.
//! 4. **Track**: remember the last paragraph of each bottom-aligned region so the next render can
//!    detect roll-up and animate it.
//!
//! [`LayoutSurface`] is a self-contained oracle with its own flow layout, used by the CLI and the
//! tests. [`ScriptedOracle`] returns caller-assigned rectangles for exercising the line passes in
//! isolation.
#![forbid(unsafe_code)]

pub mod animation;
pub mod foundation;
pub mod isd;
pub mod oracle;
pub mod render;
pub mod style;
pub mod surface;

pub use animation::{ease::Ease, transition::TranslateTransition};
pub use foundation::axes::{Axes, BlockProgression, Edge, InlineProgression, LineEdges, WritingMode};
pub use foundation::core::{Length, LengthUnit, Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{RenderError, RenderResult};
pub use isd::model::{IsdDocument, IsdNode, NodeKind, Space, StyleValue};
pub use oracle::scripted::ScriptedOracle;
pub use oracle::{BoxId, BoxKind, GeometryOracle, Property, PropertyKey};
pub use render::context::{
    CollectErrors, ErrorHandler, HandlerVerdict, IgnoreErrors, ImageResolver, PassthroughImages,
    RenderOptions,
};
pub use render::lines::{Line, Run, construct_line_list, same_line};
pub use render::pipeline::{RenderOutput, fit_aspect_ratio, render_isd, render_isd_with};
pub use render::rollup::{DEFAULT_REGION_ID, RegionLineBuffer, SceneState};
pub use surface::LayoutSurface;
pub use surface::dump::{BoxDump, dump_tree};
pub use surface::parley_shaper::ParleyShaper;
pub use surface::shaper::{FontSpec, MonospaceShaper, TextExtent, TextShaper};
