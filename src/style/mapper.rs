//! Translation of ISD style attributes into oracle properties.
//!
//! Each supported attribute owns one entry in a static table. An entry inspects the value (and,
//! where the attribute depends on them, sibling attributes of the same node) and writes zero or
//! more properties. Values of the wrong shape are reported through the render's error handler
//! and produce no write.

use crate::{
    foundation::{
        axes::{Axes, Edge, WritingMode},
        core::{Size, Vec2},
        error::RenderResult,
    },
    isd::{
        model::{IsdNode, NodeKind, Space, StyleValue},
        names,
    },
    oracle::{
        BoxId, GeometryOracle, Property,
        property::{
            BlockAlign, DisplayMode, FontStyle, FontWeight, LineHeight, Overflow, Positioning,
            TextAlign, TextDecoration, TextDirection, TextOutline, TextShadow, UnicodeBidi,
            Visibility, WhiteSpace,
        },
    },
    render::context::RenderContext,
};

pub(crate) type MapFn = fn(
    &mut RenderContext<'_>,
    &mut dyn GeometryOracle,
    BoxId,
    &IsdNode,
    &StyleValue,
) -> RenderResult<()>;

pub(crate) struct StyleMapping {
    pub name: &'static str,
    pub apply: MapFn,
}

pub(crate) static STYLE_MAPPINGS: &[StyleMapping] = &[
    StyleMapping {
        name: names::BACKGROUND_COLOR,
        apply: map_background_color,
    },
    StyleMapping {
        name: names::BACKGROUND_IMAGE,
        apply: map_background_image,
    },
    StyleMapping {
        name: names::COLOR,
        apply: map_color,
    },
    StyleMapping {
        name: names::DIRECTION,
        apply: map_direction,
    },
    StyleMapping {
        name: names::DISPLAY,
        apply: map_display,
    },
    StyleMapping {
        name: names::DISPLAY_ALIGN,
        apply: map_display_align,
    },
    StyleMapping {
        name: names::EXTENT,
        apply: map_extent,
    },
    StyleMapping {
        name: names::FONT_FAMILY,
        apply: map_font_family,
    },
    StyleMapping {
        name: names::FONT_SIZE,
        apply: map_font_size,
    },
    StyleMapping {
        name: names::FONT_STYLE,
        apply: map_font_style,
    },
    StyleMapping {
        name: names::FONT_WEIGHT,
        apply: map_font_weight,
    },
    StyleMapping {
        name: names::FORCED_DISPLAY,
        apply: map_forced_display,
    },
    StyleMapping {
        name: names::LINE_HEIGHT,
        apply: map_line_height,
    },
    StyleMapping {
        name: names::OPACITY,
        apply: map_opacity,
    },
    StyleMapping {
        name: names::ORIGIN,
        apply: map_origin,
    },
    StyleMapping {
        name: names::OVERFLOW,
        apply: map_overflow,
    },
    StyleMapping {
        name: names::PADDING,
        apply: map_padding,
    },
    StyleMapping {
        name: names::SHOW_BACKGROUND,
        apply: map_show_background,
    },
    StyleMapping {
        name: names::TEXT_ALIGN,
        apply: map_text_align,
    },
    StyleMapping {
        name: names::TEXT_DECORATION,
        apply: map_text_decoration,
    },
    StyleMapping {
        name: names::TEXT_OUTLINE,
        apply: map_text_outline,
    },
    StyleMapping {
        name: names::TEXT_SHADOW,
        apply: map_text_shadow,
    },
    StyleMapping {
        name: names::UNICODE_BIDI,
        apply: map_unicode_bidi,
    },
    StyleMapping {
        name: names::VISIBILITY,
        apply: map_visibility,
    },
    StyleMapping {
        name: names::WRAP_OPTION,
        apply: map_wrap_option,
    },
    StyleMapping {
        name: names::WRITING_MODE,
        apply: map_writing_mode,
    },
    StyleMapping {
        name: names::Z_INDEX,
        apply: map_z_index,
    },
];

pub(crate) fn lookup(name: &str) -> Option<&'static StyleMapping> {
    STYLE_MAPPINGS.iter().find(|m| m.name == name)
}

/// Whether the renderer understands the qualified attribute `name`.
pub fn is_mapped(name: &str) -> bool {
    lookup(name).is_some()
}

/// Every attribute name the renderer understands.
pub fn mapped_names() -> impl Iterator<Item = &'static str> {
    STYLE_MAPPINGS.iter().map(|m| m.name)
}

/// Apply every mapped attribute of `node` to `target`, in attribute-name order.
pub(crate) fn apply_styles(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    target: BoxId,
    node: &IsdNode,
) -> RenderResult<()> {
    for (name, value) in &node.style_attrs {
        match lookup(name) {
            Some(mapping) => (mapping.apply)(ctx, oracle, target, node, value)?,
            None => tracing::trace!(name = name.as_str(), "style attribute not mapped"),
        }
    }
    Ok(())
}

fn mismatch(ctx: &mut RenderContext<'_>, attr: &str, value: &StyleValue) -> RenderResult<()> {
    ctx.report(format!("unexpected {} value for {attr}", value.type_name()))
}

/// Decode a keyword value, reporting unknown keywords and non-keyword values.
fn keyword<T>(
    ctx: &mut RenderContext<'_>,
    attr: &str,
    value: &StyleValue,
    parse: fn(&str) -> Option<T>,
) -> RenderResult<Option<T>> {
    let Some(kw) = value.as_keyword() else {
        mismatch(ctx, attr, value)?;
        return Ok(None);
    };
    match parse(kw) {
        Some(v) => Ok(Some(v)),
        None => {
            ctx.report(format!("unknown keyword '{kw}' for {attr}"))?;
            Ok(None)
        }
    }
}

fn map_background_color(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    match value.as_color() {
        Some(c) => {
            oracle.set_property(id, Property::BackgroundColor(c));
            Ok(())
        }
        None => mismatch(ctx, names::BACKGROUND_COLOR, value),
    }
}

fn map_background_image(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    let StyleValue::Uri(uri) = value else {
        return mismatch(ctx, names::BACKGROUND_IMAGE, value);
    };
    let size = match (&node.kind, node.style(names::EXTENT)) {
        (NodeKind::Region, Some(StyleValue::Extent(e))) => {
            Some(Size::new(ctx.to_px(e.width), ctx.to_px(e.height)))
        }
        _ => ctx.region_extent,
    };
    if let Some(url) = ctx.resolve_image(uri, id) {
        oracle.set_property(id, Property::BackgroundImage { url, size });
    }
    Ok(())
}

fn map_color(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    match value.as_color() {
        Some(c) => {
            oracle.set_property(id, Property::Color(c));
            Ok(())
        }
        None => mismatch(ctx, names::COLOR, value),
    }
}

fn map_direction(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if let Some(d) = keyword(ctx, names::DIRECTION, value, TextDirection::from_keyword)? {
        oracle.set_property(id, Property::Direction(d));
    }
    Ok(())
}

fn map_display(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if let Some(d) = keyword(ctx, names::DISPLAY, value, DisplayMode::from_keyword)? {
        oracle.set_property(id, Property::Display(d));
    }
    Ok(())
}

fn map_display_align(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if node.kind != NodeKind::Region {
        return Ok(());
    }
    if let Some(a) = keyword(ctx, names::DISPLAY_ALIGN, value, BlockAlign::from_keyword)? {
        oracle.set_property(id, Property::DisplayAlign(a));
    }
    Ok(())
}

/// Physical padding of a region, derived from its logical `padding` and `writingMode`.
fn region_padding(ctx: &RenderContext<'_>, node: &IsdNode) -> Option<[(Edge, f64); 4]> {
    let StyleValue::Padding(p) = node.style(names::PADDING)? else {
        return None;
    };
    let axes = node_axes(ctx, node);
    Some([
        (axes.block_start_edge(), ctx.to_px(p.before)),
        (axes.inline_end_edge(), ctx.to_px(p.end)),
        (axes.block_end_edge(), ctx.to_px(p.after)),
        (axes.inline_start_edge(), ctx.to_px(p.start)),
    ])
}

/// Axes a node's logical values are expressed in: a region's own writing mode, else the
/// enclosing region's.
fn node_axes(ctx: &RenderContext<'_>, node: &IsdNode) -> Axes {
    if node.kind == NodeKind::Region {
        node.keyword(names::WRITING_MODE)
            .and_then(WritingMode::parse)
            .unwrap_or_default()
            .axes()
    } else {
        ctx.axes
    }
}

fn map_extent(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if node.kind != NodeKind::Region {
        return Ok(());
    }
    let StyleValue::Extent(extent) = value else {
        return mismatch(ctx, names::EXTENT, value);
    };
    let width = ctx.to_px(extent.width);
    let height = ctx.to_px(extent.height);

    let padding = match region_padding(ctx, node) {
        Some(p) => p,
        None => {
            ctx.report("region extent without padding; assuming zero padding")?;
            [(Edge::Left, 0.0); 4]
        }
    };
    let (mut pad_w, mut pad_h) = (0.0, 0.0);
    for (edge, px) in padding {
        match edge {
            Edge::Left | Edge::Right => pad_w += px,
            Edge::Top | Edge::Bottom => pad_h += px,
        }
    }

    ctx.region_extent = Some(Size::new(width, height));
    oracle.set_property(
        id,
        Property::Size(Size::new(
            (width - pad_w).max(0.0),
            (height - pad_h).max(0.0),
        )),
    );
    Ok(())
}

/// Concrete font stacks for the TTML generic family names.
fn expand_family(name: &str, out: &mut Vec<String>) {
    let generic: &[&str] = match name {
        "default" | "monospaceSerif" => &["Courier New", "Liberation Mono", "Courier", "monospace"],
        "proportionalSansSerif" => &["Arial", "Helvetica", "Liberation Sans", "sans-serif"],
        "monospace" => &["monospace"],
        "sansSerif" => &["sans-serif"],
        "serif" | "proportionalSerif" => &["serif"],
        "monospaceSansSerif" => &["Consolas", "monospace"],
        other => {
            out.push(other.to_string());
            return;
        }
    };
    out.extend(generic.iter().map(|s| s.to_string()));
}

fn map_font_family(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    let StyleValue::Families(families) = value else {
        return mismatch(ctx, names::FONT_FAMILY, value);
    };
    let mut stack = Vec::new();
    for f in families {
        expand_family(f, &mut stack);
    }
    oracle.set_property(id, Property::FontFamily(stack));
    Ok(())
}

fn map_font_size(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    match value.as_length() {
        Some(l) => {
            let px = ctx.to_px(l);
            oracle.set_property(id, Property::FontSize(px));
            Ok(())
        }
        None => mismatch(ctx, names::FONT_SIZE, value),
    }
}

fn map_font_style(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if let Some(s) = keyword(ctx, names::FONT_STYLE, value, FontStyle::from_keyword)? {
        oracle.set_property(id, Property::FontStyle(s));
    }
    Ok(())
}

fn map_font_weight(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if let Some(w) = keyword(ctx, names::FONT_WEIGHT, value, FontWeight::from_keyword)? {
        oracle.set_property(id, Property::FontWeight(w));
    }
    Ok(())
}

fn map_forced_display(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    let Some(forced) = value.as_bool() else {
        return mismatch(ctx, names::FORCED_DISPLAY, value);
    };
    if ctx.display_forced_only && !forced {
        oracle.set_property(id, Property::Visibility(Visibility::Hidden));
    }
    Ok(())
}

fn map_line_height(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    let lh = match value {
        StyleValue::Keyword(k) if k == "normal" => LineHeight::Normal,
        StyleValue::Length(l) => LineHeight::Px(ctx.to_px(*l)),
        _ => return mismatch(ctx, names::LINE_HEIGHT, value),
    };
    oracle.set_property(id, Property::LineHeight(lh));
    Ok(())
}

fn map_opacity(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    match value.as_number() {
        Some(o) => {
            oracle.set_property(id, Property::Opacity(o.clamp(0.0, 1.0)));
            Ok(())
        }
        None => mismatch(ctx, names::OPACITY, value),
    }
}

fn map_origin(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if node.kind != NodeKind::Region {
        return Ok(());
    }
    let StyleValue::Origin(origin) = value else {
        return mismatch(ctx, names::ORIGIN, value);
    };
    let offset = Vec2::new(ctx.to_px(origin.x), ctx.to_px(origin.y));
    oracle.set_property(id, Property::Position(Positioning::Absolute));
    oracle.set_property(id, Property::Offset(offset));
    Ok(())
}

fn map_overflow(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if let Some(o) = keyword(ctx, names::OVERFLOW, value, Overflow::from_keyword)? {
        oracle.set_property(id, Property::Overflow(o));
    }
    Ok(())
}

fn map_padding(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    let StyleValue::Padding(p) = value else {
        return mismatch(ctx, names::PADDING, value);
    };
    let axes = node_axes(ctx, node);
    let edges = [
        (axes.block_start_edge(), p.before),
        (axes.inline_end_edge(), p.end),
        (axes.block_end_edge(), p.after),
        (axes.inline_start_edge(), p.start),
    ];
    for (edge, len) in edges {
        let px = ctx.to_px(len);
        oracle.set_property(id, Property::Padding(edge, px));
    }
    Ok(())
}

fn map_show_background(
    _ctx: &mut RenderContext<'_>,
    _oracle: &mut dyn GeometryOracle,
    _id: BoxId,
    _node: &IsdNode,
    _value: &StyleValue,
) -> RenderResult<()> {
    // Backgrounds are painted regardless.
    Ok(())
}

fn map_text_align(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if let Some(a) = keyword(ctx, names::TEXT_ALIGN, value, TextAlign::from_keyword)? {
        oracle.set_property(id, Property::TextAlign(a));
    }
    Ok(())
}

fn map_text_decoration(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    let StyleValue::Decoration(d) = value else {
        return mismatch(ctx, names::TEXT_DECORATION, value);
    };
    oracle.set_property(
        id,
        Property::TextDecoration(TextDecoration {
            underline: d.underline,
            line_through: d.line_through,
            overline: d.overline,
        }),
    );
    Ok(())
}

fn map_text_outline(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    match value {
        StyleValue::Keyword(k) if k == "none" => Ok(()),
        StyleValue::Outline(o) => {
            let thickness_px = ctx.to_px(o.thickness);
            oracle.set_property(
                id,
                Property::TextOutline(TextOutline {
                    color: o.color,
                    thickness_px,
                }),
            );
            Ok(())
        }
        _ => mismatch(ctx, names::TEXT_OUTLINE, value),
    }
}

fn map_text_shadow(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    match value {
        StyleValue::Keyword(k) if k == "none" => Ok(()),
        StyleValue::Shadows(shadows) => {
            let shadows = shadows
                .iter()
                .map(|s| TextShadow {
                    x_px: ctx.to_px(s.x),
                    y_px: ctx.to_px(s.y),
                    blur_px: ctx.to_px(s.blur),
                    color: s.color,
                })
                .collect();
            oracle.set_property(id, Property::TextShadow(shadows));
            Ok(())
        }
        _ => mismatch(ctx, names::TEXT_SHADOW, value),
    }
}

fn map_unicode_bidi(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if let Some(b) = keyword(ctx, names::UNICODE_BIDI, value, UnicodeBidi::from_keyword)? {
        oracle.set_property(id, Property::UnicodeBidi(b));
    }
    Ok(())
}

fn map_visibility(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if let Some(v) = keyword(ctx, names::VISIBILITY, value, Visibility::from_keyword)? {
        oracle.set_property(id, Property::Visibility(v));
    }
    Ok(())
}

fn map_wrap_option(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    let wraps = match value.as_keyword() {
        Some("wrap") => true,
        Some("noWrap") => false,
        Some(other) => {
            return ctx.report(format!("unknown keyword '{other}' for {}", names::WRAP_OPTION));
        }
        None => return mismatch(ctx, names::WRAP_OPTION, value),
    };
    let ws = match (node.space, wraps) {
        (Space::Preserve, true) => WhiteSpace::PreWrap,
        (Space::Preserve, false) => WhiteSpace::Pre,
        (Space::Default, true) => WhiteSpace::Normal,
        (Space::Default, false) => WhiteSpace::NoWrap,
    };
    oracle.set_property(id, Property::WhiteSpace(ws));
    Ok(())
}

fn map_writing_mode(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    if node.kind != NodeKind::Region {
        return Ok(());
    }
    if let Some(wm) = keyword(ctx, names::WRITING_MODE, value, WritingMode::parse)? {
        oracle.set_property(id, Property::WritingMode(wm));
    }
    Ok(())
}

fn map_z_index(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    _node: &IsdNode,
    value: &StyleValue,
) -> RenderResult<()> {
    match value {
        StyleValue::Keyword(k) if k == "auto" => Ok(()),
        StyleValue::Number(n) => {
            oracle.set_property(id, Property::ZIndex(n.round() as i32));
            Ok(())
        }
        _ => mismatch(ctx, names::Z_INDEX, value),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/mapper.rs"]
mod tests;
