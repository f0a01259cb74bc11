use crate::{
    foundation::{
        axes::{Axes, Edge},
        core::Rgba8,
    },
    oracle::{GeometryOracle, Property, property::BorderSide},
    render::lines::{Line, Run},
};

/// Extend the background of each line past its inline edges by `thickness` pixels.
///
/// The run at each inline extremity gets a border of the (rounded up) thickness in its own
/// background color and an equal negative margin, so the text does not move. Returns the number
/// of lines padded.
pub fn apply_line_padding(
    oracle: &mut dyn GeometryOracle,
    lines: &[Line],
    thickness: f64,
    axes: Axes,
) -> usize {
    let px = thickness.ceil();
    if px <= 0.0 || !px.is_finite() {
        return 0;
    }
    let start_edge = axes.inline_start_edge();
    let end_edge = axes.inline_end_edge();

    let mut padded = 0;
    for line in lines {
        let (Some(first), Some(last)) = (
            line.elements.get(line.start_elem),
            line.elements.get(line.end_elem),
        ) else {
            continue;
        };
        if first.node == last.node {
            let r = oracle.rect(first.node);
            if r.width() == 0.0 || r.height() == 0.0 {
                continue;
            }
        }
        pad_edge(oracle, first, start_edge, px);
        pad_edge(oracle, last, end_edge, px);
        padded += 1;
    }
    padded
}

fn pad_edge(oracle: &mut dyn GeometryOracle, run: &Run, edge: Edge, px: f64) {
    let color = run.background.unwrap_or(Rgba8::transparent());
    oracle.set_property(run.node, Property::Border(edge, BorderSide { width: px, color }));
    oracle.set_property(run.node, Property::Margin(edge, -px));
}

#[cfg(test)]
#[path = "../../tests/unit/render/padding.rs"]
mod tests;
