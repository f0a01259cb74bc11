//! Block and inline flow over the box arena.
//!
//! Layout runs in logical coordinates (`u` along the inline axis, `v` along the block axis) inside
//! each positioned box, then maps the results onto the surface through the box's writing mode.

use std::collections::{BTreeSet, HashMap};

use taffy::{
    TaffyError, TaffyTree,
    prelude::{AvailableSpace, NodeId, Rect as TaffyRect, Size as TaffySize},
    style::{Dimension, Display, FlexDirection, LengthPercentage, LengthPercentageAuto, Style},
};
use unicode_linebreak::linebreaks;

use crate::{
    foundation::{
        axes::{Axes, BlockProgression, Edge, InlineProgression, WritingMode},
        core::{Rect, Size, Vec2},
    },
    oracle::{
        BoxId, BoxKind, Property, PropertyKey,
        arena::{BoxArena, BoxNode},
        property::{BlockAlign, DisplayMode, LineHeight, Positioning, TextAlign, WhiteSpace},
    },
    surface::shaper::{FontSpec, TextShaper},
};

const NORMAL_LINE_HEIGHT: f64 = 1.2;
const FIT_EPSILON: f64 = 1e-6;
/// Stands in for an atomic inline when break opportunities are computed.
const OBJECT_REPLACEMENT: char = '\u{FFFC}';

type FlowResult<T> = Result<T, TaffyError>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct LRect {
    pub u0: f64,
    pub u1: f64,
    pub v0: f64,
    pub v1: f64,
}

impl LRect {
    fn shifted(self, du: f64, dv: f64) -> Self {
        Self {
            u0: self.u0 + du,
            u1: self.u1 + du,
            v0: self.v0 + dv,
            v1: self.v1 + dv,
        }
    }

    pub fn to_physical(self, content: Rect, axes: Axes) -> Rect {
        match axes.bpd() {
            BlockProgression::Tb => {
                let (x0, x1) = match axes.ipd() {
                    InlineProgression::Rl => (content.x1 - self.u1, content.x1 - self.u0),
                    _ => (content.x0 + self.u0, content.x0 + self.u1),
                };
                Rect::new(x0, content.y0 + self.v0, x1, content.y0 + self.v1)
            }
            BlockProgression::Lr => Rect::new(
                content.x0 + self.v0,
                content.y0 + self.u0,
                content.x0 + self.v1,
                content.y0 + self.u1,
            ),
            BlockProgression::Rl => Rect::new(
                content.x1 - self.v1,
                content.y0 + self.u0,
                content.x1 - self.v0,
                content.y0 + self.u1,
            ),
        }
    }
}

/// Logical insets: inline start/end, block start/end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Sides {
    is: f64,
    ie: f64,
    bs: f64,
    be: f64,
}

impl Sides {
    fn of(node: &BoxNode, axes: Axes, key: fn(Edge) -> PropertyKey) -> Self {
        Self {
            is: edge_value(node, key(axes.inline_start_edge())),
            ie: edge_value(node, key(axes.inline_end_edge())),
            bs: edge_value(node, key(axes.block_start_edge())),
            be: edge_value(node, key(axes.block_end_edge())),
        }
    }

    fn plus(self, o: Self) -> Self {
        Self {
            is: self.is + o.is,
            ie: self.ie + o.ie,
            bs: self.bs + o.bs,
            be: self.be + o.be,
        }
    }

    fn inline(self) -> f64 {
        self.is + self.ie
    }

    fn lengths(self) -> TaffyRect<LengthPercentage> {
        TaffyRect {
            left: LengthPercentage::length(self.is as f32),
            right: LengthPercentage::length(self.ie as f32),
            top: LengthPercentage::length(self.bs as f32),
            bottom: LengthPercentage::length(self.be as f32),
        }
    }

    fn margins(self) -> TaffyRect<LengthPercentageAuto> {
        TaffyRect {
            left: LengthPercentageAuto::length(self.is as f32),
            right: LengthPercentageAuto::length(self.ie as f32),
            top: LengthPercentageAuto::length(self.bs as f32),
            bottom: LengthPercentageAuto::length(self.be as f32),
        }
    }
}

fn edge_value(node: &BoxNode, key: PropertyKey) -> f64 {
    match node.props.get(&key) {
        Some(Property::Padding(_, v) | Property::Margin(_, v)) => *v,
        Some(Property::Border(_, b)) => b.width,
        _ => 0.0,
    }
}

fn physical_edge(node: &BoxNode, edge: Edge) -> f64 {
    edge_value(node, PropertyKey::Padding(edge)) + edge_value(node, PropertyKey::Border(edge))
}

fn is_displayed(node: &BoxNode) -> bool {
    !matches!(
        node.props.get(&PropertyKey::Display),
        Some(Property::Display(DisplayMode::None))
    )
}

fn is_out_of_flow(node: &BoxNode) -> bool {
    node.kind == BoxKind::Region
        || matches!(
            node.props.get(&PropertyKey::Position),
            Some(Property::Position(Positioning::Absolute))
        )
}

/// Inherited presentation state.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Inherited {
    pub font: FontSpec,
    pub line_height: LineHeight,
    pub text_align: TextAlign,
    pub white_space: WhiteSpace,
    pub axes: Axes,
}

impl Inherited {
    pub fn initial() -> Self {
        Self {
            font: FontSpec::default(),
            line_height: LineHeight::Normal,
            text_align: TextAlign::Start,
            white_space: WhiteSpace::Normal,
            axes: Axes::default(),
        }
    }

    fn derive(&self, node: &BoxNode) -> Self {
        let mut out = self.clone();
        for prop in node.props.values() {
            match prop {
                Property::FontFamily(f) => out.font.families = f.clone(),
                Property::FontSize(s) => out.font.size_px = *s,
                Property::FontStyle(s) => out.font.style = *s,
                Property::FontWeight(w) => out.font.weight = *w,
                Property::LineHeight(lh) => out.line_height = *lh,
                Property::TextAlign(a) => out.text_align = *a,
                Property::WhiteSpace(ws) => out.white_space = *ws,
                Property::WritingMode(wm) => out.axes = WritingMode::axes(*wm),
                _ => {}
            }
        }
        out
    }

    fn line_height_px(&self) -> f64 {
        match self.line_height {
            LineHeight::Normal => NORMAL_LINE_HEIGHT * self.font.size_px,
            LineHeight::Px(px) => px,
        }
    }
}

/// Block and inline size reached by a flow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Extent {
    block: f64,
    inline_max: f64,
}

/// Half-leading metrics of a font at a given line height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct VMetrics {
    ascent: f64,
    descent: f64,
    above: f64,
    below: f64,
}

#[derive(Clone, Copy, Debug)]
struct InlineBoxInfo {
    margin: Sides,
    /// Border plus padding.
    frame: Sides,
    metrics: VMetrics,
}

#[derive(Clone, Debug, PartialEq)]
enum PieceKind {
    Text,
    Space,
    Open(BoxId),
    Close(BoxId),
    Atomic(BoxId),
    Break,
}

#[derive(Clone, Debug)]
struct Piece {
    kind: PieceKind,
    text: String,
    style: usize,
    /// A line may break right before this piece.
    opportunity: bool,
    width: f64,
    above: f64,
    below: f64,
    /// Fragments of an atomic box, relative to its own margin-box origin.
    nested: Vec<(BoxId, LRect)>,
}

impl Piece {
    fn new(kind: PieceKind, style: usize) -> Self {
        Self {
            kind,
            text: String::new(),
            style,
            opportunity: false,
            width: 0.0,
            above: 0.0,
            below: 0.0,
            nested: Vec::new(),
        }
    }

    fn is_content(&self) -> bool {
        matches!(self.kind, PieceKind::Text | PieceKind::Space | PieceKind::Atomic(_))
    }
}

/// A break-free stretch of pieces, with the width of its trailing spaces kept apart.
struct Word {
    start: usize,
    end: usize,
    content: f64,
    trailing: f64,
    forced: bool,
}

/// What a node of the block-level taffy tree stands for. Taffy works in logical space here:
/// width is the inline axis and height the block axis.
#[derive(Clone, Debug)]
enum FlowItem {
    Block {
        id: BoxId,
        margin: Sides,
        frame: Sides,
    },
    /// Anonymous block wrapping a run of inline-level siblings.
    Inline {
        items: Vec<BoxId>,
        inh: Inherited,
    },
}

pub(crate) struct Flow<'a> {
    arena: &'a BoxArena,
    shaper: &'a mut dyn TextShaper,
}

impl<'a> Flow<'a> {
    pub fn new(arena: &'a BoxArena, shaper: &'a mut dyn TextShaper) -> Self {
        Self { arena, shaper }
    }

    /// Lay out the whole tree; returns border-box rectangles keyed by box.
    pub fn layout_root(&mut self, size: Size) -> FlowResult<HashMap<BoxId, Rect>> {
        let mut rects = HashMap::new();
        let surface = Rect::from_origin_size((0.0, 0.0), size);
        let arena = self.arena;
        let root = arena.node(arena.root());
        let initial = Inherited::initial();
        for &child in &root.children {
            self.layout_positioned(child, &initial, surface, &mut rects)?;
        }
        Ok(rects)
    }

    fn vmetrics(&mut self, inh: &Inherited) -> VMetrics {
        let ext = self.shaper.measure("", &inh.font);
        let half_leading = (inh.line_height_px() - (ext.ascent + ext.descent)) / 2.0;
        VMetrics {
            ascent: ext.ascent,
            descent: ext.descent,
            above: ext.ascent + half_leading,
            below: ext.descent + half_leading,
        }
    }

    fn layout_positioned(
        &mut self,
        id: BoxId,
        parent: &Inherited,
        container: Rect,
        rects: &mut HashMap<BoxId, Rect>,
    ) -> FlowResult<()> {
        let arena = self.arena;
        let node = arena.node(id);
        if !is_displayed(node) {
            return Ok(());
        }
        let inh = parent.derive(node);
        let offset = match node.props.get(&PropertyKey::Offset) {
            Some(Property::Offset(v)) => *v,
            _ => Vec2::ZERO,
        };
        let content_size = match node.props.get(&PropertyKey::Size) {
            Some(Property::Size(s)) => *s,
            _ => container.size(),
        };

        let left = physical_edge(node, Edge::Left);
        let right = physical_edge(node, Edge::Right);
        let top = physical_edge(node, Edge::Top);
        let bottom = physical_edge(node, Edge::Bottom);
        let x0 = container.x0 + offset.x;
        let y0 = container.y0 + offset.y;
        rects.insert(
            id,
            Rect::new(
                x0,
                y0,
                x0 + left + content_size.width + right,
                y0 + top + content_size.height + bottom,
            ),
        );
        let content = Rect::from_origin_size((x0 + left, y0 + top), content_size);

        let axes = inh.axes;
        let (inline_avail, block_avail) = if axes.is_horizontal() {
            (content_size.width, content_size.height)
        } else {
            (content_size.height, content_size.width)
        };

        let mut frags = Vec::new();
        let mut positioned = Vec::new();
        let ext = self.block_flow(id, &inh, inline_avail, 0.0, 0.0, &mut frags, &mut positioned)?;

        let shift = match node.props.get(&PropertyKey::DisplayAlign) {
            Some(Property::DisplayAlign(BlockAlign::Center)) => (block_avail - ext.block) / 2.0,
            Some(Property::DisplayAlign(BlockAlign::After)) => block_avail - ext.block,
            _ => 0.0,
        };
        for (bid, lr) in frags {
            let r = lr.shifted(0.0, shift).to_physical(content, axes);
            rects
                .entry(bid)
                .and_modify(|acc| *acc = acc.union(r))
                .or_insert(r);
        }
        for child in positioned {
            self.layout_positioned(child, &inh, content, rects)?;
        }
        Ok(())
    }

    /// Flow the in-flow children of `id` into a content box of `inline_avail` starting at
    /// (`ou`, `ov`). An unbounded `inline_avail` sizes the content to its max-content width.
    #[allow(clippy::too_many_arguments)]
    fn block_flow(
        &mut self,
        id: BoxId,
        inh: &Inherited,
        inline_avail: f64,
        ou: f64,
        ov: f64,
        out: &mut Vec<(BoxId, LRect)>,
        positioned: &mut Vec<BoxId>,
    ) -> FlowResult<Extent> {
        let mut tree: TaffyTree<FlowItem> = TaffyTree::new();
        tree.disable_rounding();
        let children = self.build_children(&mut tree, id, inh, positioned)?;

        let (width, available) = if inline_avail.is_finite() {
            (
                Dimension::length(inline_avail as f32),
                AvailableSpace::Definite(inline_avail as f32),
            )
        } else {
            (Dimension::auto(), AvailableSpace::MaxContent)
        };
        let root = tree.new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                size: TaffySize {
                    width,
                    height: Dimension::auto(),
                },
                ..Style::default()
            },
            &children,
        )?;

        let mut failure = None;
        tree.compute_layout_with_measure(
            root,
            TaffySize {
                width: available,
                height: AvailableSpace::MaxContent,
            },
            |known, available, _node, ctx, _style| {
                let Some(FlowItem::Inline { items, inh }) = ctx else {
                    return TaffySize::ZERO;
                };
                let avail = match (known.width, available.width) {
                    (Some(w), _) | (None, AvailableSpace::Definite(w)) => f64::from(w),
                    (None, AvailableSpace::MinContent) => 0.0,
                    (None, AvailableSpace::MaxContent) => f64::INFINITY,
                };
                let mut scratch = Vec::new();
                match self.inline_flow(inh, items, avail, 0.0, 0.0, &mut scratch) {
                    Ok(e) => TaffySize {
                        width: known.width.unwrap_or(e.inline_max as f32),
                        height: known.height.unwrap_or(e.block as f32),
                    },
                    Err(err) => {
                        failure.get_or_insert(err);
                        TaffySize::ZERO
                    }
                }
            },
        )?;
        if let Some(err) = failure {
            return Err(err);
        }

        let block = f64::from(tree.layout(root)?.size.height);
        let inline_max = self.place(&tree, root, ou, ov, out)?;
        Ok(Extent { block, inline_max })
    }

    /// Taffy nodes for the in-flow children of `id`: one per block child, one per run of
    /// inline-level siblings. Out-of-flow children are handed back through `positioned`.
    fn build_children(
        &self,
        tree: &mut TaffyTree<FlowItem>,
        id: BoxId,
        inh: &Inherited,
        positioned: &mut Vec<BoxId>,
    ) -> FlowResult<Vec<NodeId>> {
        let arena = self.arena;
        let mut nodes = Vec::new();
        let mut inline_run = Vec::new();

        for &child in &arena.node(id).children {
            let c = arena.node(child);
            if !is_displayed(c) {
                continue;
            }
            if is_out_of_flow(c) {
                positioned.push(child);
                continue;
            }
            if c.kind.is_inline_level() {
                inline_run.push(child);
                continue;
            }
            if !inline_run.is_empty() {
                let items = std::mem::take(&mut inline_run);
                nodes.push(inline_leaf(tree, inh, items)?);
            }
            nodes.push(self.build_block(tree, child, inh, positioned)?);
        }
        if !inline_run.is_empty() {
            nodes.push(inline_leaf(tree, inh, inline_run)?);
        }
        Ok(nodes)
    }

    fn build_block(
        &self,
        tree: &mut TaffyTree<FlowItem>,
        id: BoxId,
        parent: &Inherited,
        positioned: &mut Vec<BoxId>,
    ) -> FlowResult<NodeId> {
        let node = self.arena.node(id);
        let inh = parent.derive(node);
        let axes = parent.axes;
        let margin = Sides::of(node, axes, PropertyKey::Margin);
        let border = Sides::of(node, axes, PropertyKey::Border);
        let padding = Sides::of(node, axes, PropertyKey::Padding);
        let style = Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            margin: margin.margins(),
            border: border.lengths(),
            padding: padding.lengths(),
            ..stacked_item()
        };
        let item = FlowItem::Block {
            id,
            margin,
            frame: border.plus(padding),
        };

        let children = self.build_children(tree, id, &inh, positioned)?;
        if children.is_empty() {
            return tree.new_leaf_with_context(style, item);
        }
        let nid = tree.new_with_children(style, &children)?;
        tree.set_node_context(nid, Some(item))?;
        Ok(nid)
    }

    /// Emit fragments for the children of `node` placed at (`bu`, `bv`); returns the widest
    /// margin-box inline size among them.
    fn place(
        &mut self,
        tree: &TaffyTree<FlowItem>,
        node: NodeId,
        bu: f64,
        bv: f64,
        out: &mut Vec<(BoxId, LRect)>,
    ) -> FlowResult<f64> {
        let mut widest = 0.0_f64;
        for child in tree.children(node)? {
            let layout = tree.layout(child)?;
            let u0 = bu + f64::from(layout.location.x);
            let v0 = bv + f64::from(layout.location.y);
            let u1 = u0 + f64::from(layout.size.width);
            let v1 = v0 + f64::from(layout.size.height);

            let width = match tree.get_node_context(child) {
                Some(FlowItem::Block { id, margin, frame }) => {
                    out.push((*id, LRect { u0, u1, v0, v1 }));
                    margin.inline() + frame.inline() + self.place(tree, child, u0, v0, out)?
                }
                Some(FlowItem::Inline { items, inh }) => {
                    self.inline_flow(inh, items, u1 - u0, u0, v0, out)?.inline_max
                }
                None => 0.0,
            };
            widest = widest.max(width);
        }
        Ok(widest)
    }

    fn inline_flow(
        &mut self,
        container: &Inherited,
        items: &[BoxId],
        inline_avail: f64,
        ou: f64,
        ov: f64,
        out: &mut Vec<(BoxId, LRect)>,
    ) -> FlowResult<Extent> {
        let mut styles = vec![container.clone()];
        let mut boxes = HashMap::new();
        let mut pieces = Vec::new();
        for &id in items {
            self.collect_pieces(id, 0, &mut styles, &mut boxes, &mut pieces);
        }

        let ws = container.white_space;
        if ws.collapses() {
            collapse_spaces(&mut pieces);
        }
        if !pieces.iter().any(|p| p.is_content() || p.kind == PieceKind::Break) {
            return Ok(Extent::default());
        }
        let mut pieces = mark_opportunities(pieces);
        self.measure_pieces(&mut pieces, &styles, &boxes, inline_avail)?;

        let words = split_words(&pieces, ws.wraps());
        let lines = break_lines(&pieces, &words, inline_avail);
        let hangs = ws != WhiteSpace::Pre;

        let strut = self.vmetrics(container);
        let factor = align_factor(container.text_align, container.axes.ipd());
        let mut ext = Extent::default();
        let mut open: Vec<BoxId> = Vec::new();
        let mut starts: HashMap<BoxId, f64> = HashMap::new();

        for (start, end) in lines {
            let line = &pieces[start..end];
            let hanging = trailing_spaces(line, hangs);

            let mut above = strut.above;
            let mut below = strut.below;
            let mut width = 0.0;
            for (i, p) in line.iter().enumerate() {
                match &p.kind {
                    PieceKind::Open(id) => {
                        let b = &boxes[id];
                        above = above.max(b.metrics.above);
                        below = below.max(b.metrics.below);
                        width += b.margin.is + b.frame.is;
                    }
                    PieceKind::Close(id) => {
                        let b = &boxes[id];
                        width += b.margin.ie + b.frame.ie;
                    }
                    _ => {
                        above = above.max(p.above);
                        below = below.max(p.below);
                        if !hanging.contains(&i) {
                            width += p.width;
                        }
                    }
                }
            }

            let baseline = ov + ext.block + above;
            let slack = if inline_avail.is_finite() {
                (inline_avail - width).max(0.0)
            } else {
                0.0
            };
            let mut u = ou + slack * factor;
            for id in &open {
                starts.insert(*id, u);
            }

            for (i, p) in line.iter().enumerate() {
                match &p.kind {
                    PieceKind::Open(id) => {
                        let b = &boxes[id];
                        u += b.margin.is;
                        starts.insert(*id, u);
                        u += b.frame.is;
                        open.push(*id);
                    }
                    PieceKind::Close(id) => {
                        let b = &boxes[id];
                        u += b.frame.ie;
                        let from = starts.get(id).copied().unwrap_or(u);
                        out.push((*id, inline_fragment(b, from, u, baseline)));
                        u += b.margin.ie;
                        if let Some(pos) = open.iter().rposition(|o| o == id) {
                            open.remove(pos);
                        }
                    }
                    PieceKind::Atomic(id) => {
                        let top = baseline - p.above;
                        for (nid, lr) in &p.nested {
                            out.push((*nid, lr.shifted(u, top)));
                        }
                        out.push((
                            *id,
                            LRect {
                                u0: u,
                                u1: u + p.width,
                                v0: top,
                                v1: baseline,
                            },
                        ));
                        u += p.width;
                    }
                    PieceKind::Text | PieceKind::Space => {
                        if !hanging.contains(&i) {
                            u += p.width;
                        }
                    }
                    PieceKind::Break => {}
                }
            }
            for id in &open {
                let b = &boxes[id];
                let from = starts.get(id).copied().unwrap_or(u);
                out.push((*id, inline_fragment(b, from, u, baseline)));
            }

            ext.block += above + below;
            ext.inline_max = ext.inline_max.max(width);
        }
        Ok(ext)
    }

    fn collect_pieces(
        &mut self,
        id: BoxId,
        parent_style: usize,
        styles: &mut Vec<Inherited>,
        boxes: &mut HashMap<BoxId, InlineBoxInfo>,
        pieces: &mut Vec<Piece>,
    ) {
        let arena = self.arena;
        let node = arena.node(id);
        if !is_displayed(node) {
            return;
        }
        let inh = styles[parent_style].derive(node);
        match node.kind {
            BoxKind::Break => pieces.push(Piece::new(PieceKind::Break, parent_style)),
            BoxKind::InlineBlock => {
                styles.push(inh);
                pieces.push(Piece::new(PieceKind::Atomic(id), styles.len() - 1));
            }
            _ => {
                let axes = styles[parent_style].axes;
                let info = InlineBoxInfo {
                    margin: Sides::of(node, axes, PropertyKey::Margin),
                    frame: Sides::of(node, axes, PropertyKey::Border).plus(Sides::of(
                        node,
                        axes,
                        PropertyKey::Padding,
                    )),
                    metrics: self.vmetrics(&inh),
                };
                boxes.insert(id, info);
                let preserve_newlines = !inh.white_space.collapses();
                styles.push(inh);
                let style = styles.len() - 1;

                pieces.push(Piece::new(PieceKind::Open(id), style));
                split_text(&node.text, style, preserve_newlines, pieces);
                for &child in &node.children {
                    self.collect_pieces(child, style, styles, boxes, pieces);
                }
                pieces.push(Piece::new(PieceKind::Close(id), style));
            }
        }
    }

    fn measure_pieces(
        &mut self,
        pieces: &mut [Piece],
        styles: &[Inherited],
        boxes: &HashMap<BoxId, InlineBoxInfo>,
        inline_avail: f64,
    ) -> FlowResult<()> {
        for p in pieces.iter_mut() {
            match p.kind.clone() {
                PieceKind::Text | PieceKind::Space => {
                    let inh = &styles[p.style];
                    let ext = self.shaper.measure(&p.text, &inh.font);
                    let half_leading = (inh.line_height_px() - (ext.ascent + ext.descent)) / 2.0;
                    p.width = ext.advance;
                    p.above = ext.ascent + half_leading;
                    p.below = ext.descent + half_leading;
                }
                PieceKind::Open(id) => {
                    let b = &boxes[&id];
                    p.width = b.margin.is + b.frame.is;
                }
                PieceKind::Close(id) => {
                    let b = &boxes[&id];
                    p.width = b.margin.ie + b.frame.ie;
                }
                PieceKind::Atomic(id) => {
                    let inh = styles[p.style].clone();
                    let (size, nested) = self.atomic(id, &inh, inline_avail)?;
                    p.width = size.0;
                    p.above = size.1;
                    p.nested = nested;
                }
                PieceKind::Break => {}
            }
        }
        Ok(())
    }

    /// Shrink-to-fit layout of an inline-block: returns its (inline, block) margin-box size and
    /// fragments relative to its margin-box origin.
    #[allow(clippy::type_complexity)]
    fn atomic(
        &mut self,
        id: BoxId,
        inh: &Inherited,
        inline_avail: f64,
    ) -> FlowResult<((f64, f64), Vec<(BoxId, LRect)>)> {
        let arena = self.arena;
        let node = arena.node(id);
        let axes = inh.axes;
        let margin = Sides::of(node, axes, PropertyKey::Margin);
        let frame = Sides::of(node, axes, PropertyKey::Border).plus(Sides::of(
            node,
            axes,
            PropertyKey::Padding,
        ));
        let avail = (inline_avail - margin.inline() - frame.inline()).max(0.0);

        let mut scratch = Vec::new();
        let mut ignored = Vec::new();
        let probe = self.block_flow(id, inh, avail, 0.0, 0.0, &mut scratch, &mut ignored)?;
        let fit = probe.inline_max.min(avail);

        let mut frags = Vec::new();
        let ext = self.block_flow(
            id,
            inh,
            fit,
            margin.is + frame.is,
            margin.bs + frame.bs,
            &mut frags,
            &mut ignored,
        )?;
        let u1 = margin.is + frame.inline() + fit;
        let v1 = margin.bs + frame.bs + ext.block + frame.be;
        frags.push((
            id,
            LRect {
                u0: margin.is,
                u1,
                v0: margin.bs,
                v1,
            },
        ));
        Ok(((u1 + margin.ie, v1 + margin.be), frags))
    }
}

/// Item of a column container: takes exactly its content's block size and never shrinks.
fn stacked_item() -> Style {
    Style {
        flex_shrink: 0.0,
        min_size: TaffySize {
            width: Dimension::auto(),
            height: Dimension::length(0.0),
        },
        ..Style::default()
    }
}

fn inline_leaf(
    tree: &mut TaffyTree<FlowItem>,
    inh: &Inherited,
    items: Vec<BoxId>,
) -> FlowResult<NodeId> {
    tree.new_leaf_with_context(
        stacked_item(),
        FlowItem::Inline {
            items,
            inh: inh.clone(),
        },
    )
}

fn inline_fragment(b: &InlineBoxInfo, u0: f64, u1: f64, baseline: f64) -> LRect {
    LRect {
        u0,
        u1,
        v0: baseline - b.metrics.ascent - b.frame.bs,
        v1: baseline + b.metrics.descent + b.frame.be,
    }
}

fn split_text(text: &str, style: usize, preserve_newlines: bool, pieces: &mut Vec<Piece>) {
    let mut cur: Option<Piece> = None;
    for ch in text.chars() {
        if preserve_newlines && ch == '\n' {
            pieces.extend(cur.take());
            pieces.push(Piece::new(PieceKind::Break, style));
            continue;
        }
        let kind = if ch.is_whitespace() {
            PieceKind::Space
        } else {
            PieceKind::Text
        };
        match cur.as_mut() {
            Some(p) if p.kind == kind => p.text.push(ch),
            _ => {
                pieces.extend(cur.take());
                let mut p = Piece::new(kind, style);
                p.text.push(ch);
                cur = Some(p);
            }
        }
    }
    pieces.extend(cur);
}

/// Fold whitespace runs to one space and drop spaces at the start of a line.
fn collapse_spaces(pieces: &mut Vec<Piece>) {
    let mut after_space = true;
    pieces.retain_mut(|p| match p.kind {
        PieceKind::Space => {
            if after_space {
                false
            } else {
                p.text = " ".to_string();
                after_space = true;
                true
            }
        }
        PieceKind::Text | PieceKind::Atomic(_) => {
            after_space = false;
            true
        }
        PieceKind::Break => {
            after_space = true;
            true
        }
        PieceKind::Open(_) | PieceKind::Close(_) => true,
    });
}

/// Split text pieces at UAX #14 line break opportunities and flag every piece a line may break
/// in front of. Opportunities are found over the whole inline run, so boundaries between
/// adjacent boxes see their neighbours.
fn mark_opportunities(pieces: Vec<Piece>) -> Vec<Piece> {
    let mut joined = String::new();
    let mut offsets = Vec::with_capacity(pieces.len());
    for p in &pieces {
        offsets.push(joined.len());
        match p.kind {
            PieceKind::Text | PieceKind::Space => joined.push_str(&p.text),
            PieceKind::Atomic(_) => joined.push(OBJECT_REPLACEMENT),
            PieceKind::Break => joined.push('\n'),
            PieceKind::Open(_) | PieceKind::Close(_) => {}
        }
    }
    let breaks: BTreeSet<usize> = linebreaks(&joined)
        .map(|(at, _)| at)
        .filter(|&at| at < joined.len())
        .collect();

    let mut out = Vec::with_capacity(pieces.len());
    for (mut p, start) in pieces.into_iter().zip(offsets) {
        match p.kind {
            PieceKind::Text => {
                let end = start + p.text.len();
                let mut from = start;
                for &at in breaks.range(start + 1..end) {
                    let mut head = Piece::new(PieceKind::Text, p.style);
                    head.text = p.text[from - start..at - start].to_string();
                    head.opportunity = breaks.contains(&from);
                    out.push(head);
                    from = at;
                }
                if from > start {
                    p.text = p.text[from - start..].to_string();
                    p.width = 0.0;
                }
                p.opportunity = breaks.contains(&from);
                out.push(p);
            }
            PieceKind::Space | PieceKind::Atomic(_) => {
                p.opportunity = breaks.contains(&start);
                out.push(p);
            }
            _ => out.push(p),
        }
    }
    out
}

/// Pieces a line may start at. Box openings directly in front of an opportunity move to the
/// new line with the content they open.
fn line_starts(pieces: &[Piece], wraps: bool) -> Vec<bool> {
    let mut starts = vec![false; pieces.len()];
    if !wraps {
        return starts;
    }
    for (i, p) in pieces.iter().enumerate() {
        if !p.opportunity {
            continue;
        }
        let mut j = i;
        while j > 0 && matches!(pieces[j - 1].kind, PieceKind::Open(_)) {
            j -= 1;
        }
        starts[j] = true;
    }
    starts
}

fn split_words(pieces: &[Piece], wraps: bool) -> Vec<Word> {
    let starts = line_starts(pieces, wraps);
    let mut words = Vec::new();
    let mut word = Word {
        start: 0,
        end: 0,
        content: 0.0,
        trailing: 0.0,
        forced: false,
    };
    let mut in_trailing = false;

    for (i, p) in pieces.iter().enumerate() {
        if starts[i] && i > word.start {
            word.end = i;
            words.push(word);
            word = Word {
                start: i,
                end: i,
                content: 0.0,
                trailing: 0.0,
                forced: false,
            };
            in_trailing = false;
        }

        match p.kind {
            PieceKind::Space => {
                in_trailing = true;
                word.trailing += p.width;
            }
            PieceKind::Break => {
                word.end = i + 1;
                word.forced = true;
                words.push(word);
                word = Word {
                    start: i + 1,
                    end: i + 1,
                    content: 0.0,
                    trailing: 0.0,
                    forced: false,
                };
                in_trailing = false;
            }
            // Spaces followed by more content on the same word no longer hang.
            PieceKind::Text | PieceKind::Atomic(_) => {
                word.content += word.trailing + p.width;
                word.trailing = 0.0;
                in_trailing = false;
            }
            _ if in_trailing => word.trailing += p.width,
            _ => word.content += p.width,
        }
    }
    if word.start < pieces.len() {
        word.end = pieces.len();
        words.push(word);
    }
    words
}

/// Greedy line breaking over words. Returns piece ranges.
fn break_lines(pieces: &[Piece], words: &[Word], inline_avail: f64) -> Vec<(usize, usize)> {
    let mut lines: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    let mut used = 0.0;
    let mut has_words = false;

    for w in words {
        if has_words && used + w.content > inline_avail + FIT_EPSILON {
            lines.push((start, w.start));
            start = w.start;
            used = 0.0;
        }
        used += w.content + w.trailing;
        has_words = true;
        if w.forced {
            lines.push((start, w.end));
            start = w.end;
            used = 0.0;
            has_words = false;
        }
    }
    if start < pieces.len() {
        let tail_has_content = pieces[start..].iter().any(Piece::is_content);
        if tail_has_content || lines.is_empty() {
            lines.push((start, pieces.len()));
        } else if let Some(last) = lines.last_mut() {
            last.1 = pieces.len();
        }
    }
    lines
}

/// Indices (within `line`) of the spaces that hang past its end.
fn trailing_spaces(line: &[Piece], hangs: bool) -> Vec<usize> {
    let mut out = Vec::new();
    if !hangs {
        return out;
    }
    for (i, p) in line.iter().enumerate().rev() {
        match p.kind {
            PieceKind::Space => out.push(i),
            PieceKind::Close(_) | PieceKind::Open(_) | PieceKind::Break => {}
            _ => break,
        }
    }
    out
}

fn align_factor(align: TextAlign, ipd: InlineProgression) -> f64 {
    let rtl = ipd == InlineProgression::Rl;
    match align {
        TextAlign::Start | TextAlign::Justify => 0.0,
        TextAlign::End => 1.0,
        TextAlign::Center => 0.5,
        TextAlign::Left => {
            if rtl {
                1.0
            } else {
                0.0
            }
        }
        TextAlign::Right => {
            if rtl {
                0.0
            } else {
                1.0
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/flow.rs"]
mod tests;
