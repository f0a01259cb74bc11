//! Recursive construction of the visual tree from ISD nodes.

use crate::{
    foundation::{
        axes::{Axes, Edge, WritingMode},
        error::RenderResult,
    },
    isd::{
        model::{IsdNode, NodeKind},
        names,
    },
    oracle::{
        BoxId, BoxKind, GeometryOracle, Property,
        property::{Positioning, TextAlign},
    },
    render::{
        coalesce::coalesce_runs,
        context::{Effects, RenderContext},
        fill_gap::apply_fill_line_gap,
        lines::construct_line_list,
        multi_row::apply_multi_row_align,
        padding::apply_line_padding,
        rollup::{RegionLineBuffer, detect_roll_up, is_roll_up_candidate, start_roll_up},
    },
    style::mapper::apply_styles,
};

fn box_kind(kind: &NodeKind) -> Option<BoxKind> {
    match kind {
        NodeKind::Region => Some(BoxKind::Region),
        NodeKind::Body | NodeKind::Div | NodeKind::P => Some(BoxKind::Block),
        NodeKind::Span => Some(BoxKind::Inline),
        NodeKind::Br => Some(BoxKind::Break),
        NodeKind::Other(_) => None,
    }
}

/// Build `node` and its subtree under `parent`.
pub(crate) fn build_node(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    parent: BoxId,
    node: &IsdNode,
) -> RenderResult<()> {
    let Some(kind) = box_kind(&node.kind) else {
        return ctx.report(format!("unexpected ISD node kind '{}'", node.kind.as_str()));
    };

    let id = oracle.create_box(kind);
    oracle.append_child(parent, id);
    for edge in Edge::ALL {
        oracle.set_property(id, Property::Margin(edge, 0.0));
    }

    match node.kind {
        NodeKind::Region => enter_region(ctx, oracle, id, node)?,
        NodeKind::P => ctx.effects = paragraph_effects(ctx, node)?,
        _ => {}
    }

    apply_styles(ctx, oracle, id, node)?;

    if node.kind == NodeKind::P
        && let Some(thickness) = ctx.effects.line_padding
    {
        reserve_line_padding(oracle, id, ctx.axes, thickness);
    }

    let content = match (node.kind == NodeKind::P, ctx.effects.multi_row_align) {
        (true, Some(align)) => {
            let wrapper = oracle.create_box(BoxKind::InlineBlock);
            oracle.append_child(id, wrapper);
            oracle.set_property(wrapper, Property::TextAlign(align));
            wrapper
        }
        _ => id,
    };

    if let Some(text) = node.text.as_deref().filter(|t| !t.is_empty())
        && node.kind == NodeKind::Span
    {
        if ctx.effects.is_active() || ctx.tracks_lines {
            split_text(oracle, id, text);
        } else {
            oracle.set_text(id, text);
        }
    }

    for child in &node.contents {
        build_node(ctx, oracle, content, child)?;
    }

    match node.kind {
        NodeKind::P => finish_paragraph(ctx, oracle, id, content),
        NodeKind::Region => finish_region(ctx, oracle, id, node),
        _ => Ok(()),
    }
}

/// One inline child per character, so every character is measured where it lands.
fn split_text(oracle: &mut dyn GeometryOracle, span: BoxId, text: &str) {
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let leaf = oracle.create_box(BoxKind::Inline);
        oracle.append_child(span, leaf);
        oracle.set_text(leaf, ch.encode_utf8(&mut buf));
    }
}

fn enter_region(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    node: &IsdNode,
) -> RenderResult<()> {
    let wm = match node.keyword(names::WRITING_MODE) {
        Some(kw) => match WritingMode::parse(kw) {
            Some(wm) => wm,
            None => {
                ctx.report(format!("unknown writing mode '{kw}'"))?;
                WritingMode::default()
            }
        },
        None => WritingMode::default(),
    };
    ctx.axes = wm.axes();
    ctx.region_extent = None;
    ctx.tracks_lines = is_roll_up_candidate(node, ctx.axes.bpd(), ctx.enable_roll_up);

    oracle.set_property(id, Property::Position(Positioning::Absolute));
    Ok(())
}

/// Pad the paragraph's inline edges so padded line borders stay inside it instead of forcing
/// extra wraps.
fn reserve_line_padding(oracle: &mut dyn GeometryOracle, p: BoxId, axes: Axes, thickness: f64) {
    let pad = thickness.ceil();
    oracle.set_property(p, Property::Padding(axes.inline_start_edge(), pad));
    oracle.set_property(p, Property::Padding(axes.inline_end_edge(), pad));
}

fn paragraph_effects(ctx: &mut RenderContext<'_>, node: &IsdNode) -> RenderResult<Effects> {
    let mut effects = Effects::default();

    if let Some(v) = node.style(names::LINE_PADDING) {
        match v.as_length() {
            Some(len) => {
                let px = ctx.to_px(len);
                if px > 0.0 {
                    effects.line_padding = Some(px);
                }
            }
            None => ctx.report(format!(
                "unexpected {} value for {}",
                v.type_name(),
                names::LINE_PADDING
            ))?,
        }
    }

    if let Some(v) = node.style(names::MULTI_ROW_ALIGN) {
        match v.as_keyword() {
            Some("auto") => {}
            Some("start") => effects.multi_row_align = Some(TextAlign::Start),
            Some("center") => effects.multi_row_align = Some(TextAlign::Center),
            Some("end") => effects.multi_row_align = Some(TextAlign::End),
            Some(other) => ctx.report(format!(
                "unknown keyword '{other}' for {}",
                names::MULTI_ROW_ALIGN
            ))?,
            None => ctx.report(format!(
                "unexpected {} value for {}",
                v.type_name(),
                names::MULTI_ROW_ALIGN
            ))?,
        }
    }

    if let Some(v) = node.style(names::FILL_LINE_GAP) {
        match v.as_bool() {
            Some(b) => effects.fill_line_gap = b,
            None => ctx.report(format!(
                "unexpected {} value for {}",
                v.type_name(),
                names::FILL_LINE_GAP
            ))?,
        }
    }

    Ok(effects)
}

/// Run the line passes over a finished paragraph: multi-row align, then line padding, then
/// run coalescing, then gap filling.
fn finish_paragraph(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    paragraph: BoxId,
    content: BoxId,
) -> RenderResult<()> {
    let effects = std::mem::take(&mut ctx.effects);
    if !effects.is_active() && !ctx.tracks_lines {
        return Ok(());
    }

    let axes = ctx.axes;
    let mut lines = construct_line_list(oracle, content, axes);

    if effects.multi_row_align.is_some() {
        let inserted = apply_multi_row_align(oracle, &lines);
        tracing::debug!(inserted, "multi-row align breaks");
        lines = construct_line_list(oracle, content, axes);
    }

    if let Some(thickness) = effects.line_padding {
        apply_line_padding(oracle, &lines, thickness, axes);
    }

    let merged = coalesce_runs(oracle, &mut lines);
    tracing::debug!(lines = lines.len(), merged, ?effects, "paragraph lines");

    if effects.fill_line_gap {
        let par = axes.project(oracle.rect(paragraph));
        apply_fill_line_gap(oracle, &lines, par.before, par.after, axes);
    }
    Ok(())
}

fn finish_region(
    ctx: &mut RenderContext<'_>,
    oracle: &mut dyn GeometryOracle,
    region: BoxId,
    node: &IsdNode,
) -> RenderResult<()> {
    if !std::mem::take(&mut ctx.tracks_lines) {
        return Ok(());
    }

    let lines = construct_line_list(oracle, region, ctx.axes);
    let buffer = RegionLineBuffer::new(&node.id, lines);
    let previous = ctx.previous.and_then(|p| p.region(&buffer.region_id));
    if let Some(offset) = detect_roll_up(previous, &buffer)
        && let Some(&first) = oracle.children(region).first()
    {
        tracing::debug!(region = buffer.region_id.as_str(), offset, "starting roll-up");
        start_roll_up(oracle, first, offset);
    }
    ctx.current.record(buffer);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/builder.rs"]
mod tests;
