use crate::{
    foundation::axes::Axes,
    oracle::{GeometryOracle, Property},
    render::lines::Line,
};

/// Stretch line backgrounds in the block direction so consecutive lines leave no gap.
///
/// Frontiers sit at the paragraph's before edge, halfway between each pair of neighbouring lines,
/// and at the paragraph's after edge. Every run with a background is padded out to the frontier
/// on either side of its line, by the distance rounded up to whole pixels.
pub fn apply_fill_line_gap(
    oracle: &mut dyn GeometryOracle,
    lines: &[Line],
    par_before: f64,
    par_after: f64,
    axes: Axes,
) {
    let dir = if par_after < par_before { -1.0 } else { 1.0 };
    let lead_edge = axes.block_start_edge();
    let trail_edge = axes.block_end_edge();

    for i in 0..=lines.len() {
        let frontier = if i == 0 {
            par_before
        } else if i == lines.len() {
            par_after
        } else {
            (lines[i - 1].after + lines[i].before) / 2.0
        };

        if i > 0 {
            for run in &lines[i - 1].elements {
                let Some(bg) = run.background else { continue };
                let pad = dir * (frontier - run.after);
                if pad > 0.0 {
                    oracle.set_property(run.node, Property::Padding(trail_edge, pad.ceil()));
                    oracle.set_property(run.node, Property::BackgroundColor(bg));
                }
            }
        }

        if i < lines.len() {
            for run in &lines[i].elements {
                let Some(bg) = run.background else { continue };
                let pad = dir * (run.before - frontier);
                if pad > 0.0 {
                    oracle.set_property(run.node, Property::Padding(lead_edge, pad.ceil()));
                    oracle.set_property(run.node, Property::BackgroundColor(bg));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fill_gap.rs"]
mod tests;
