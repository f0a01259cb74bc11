//! Grouping of laid-out text into visual lines.

use crate::{
    foundation::{
        axes::{Axes, LineEdges},
        core::Rgba8,
    },
    oracle::{BoxId, BoxKind, GeometryOracle, Property, PropertyKey},
};

/// One measured leaf on a line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Run {
    pub node: BoxId,
    /// The leaf's own background, else the nearest ancestor's.
    pub background: Option<Rgba8>,
    pub before: f64,
    pub after: f64,
}

/// A visual line: the block/inline envelope of the runs grouped on it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    pub before: f64,
    pub after: f64,
    pub start: f64,
    pub end: f64,
    /// Index into `elements` of the run reaching `start`.
    pub start_elem: usize,
    /// Index into `elements` of the run reaching `end`.
    pub end_elem: usize,
    pub elements: Vec<Run>,
    pub text: String,
    /// The line already ends in a forced break.
    pub br: bool,
}

impl Line {
    fn open(edges: LineEdges, run: Run, text: &str) -> Self {
        Self {
            before: edges.before,
            after: edges.after,
            start: edges.start,
            end: edges.end,
            start_elem: 0,
            end_elem: 0,
            elements: vec![run],
            text: text.to_string(),
            br: false,
        }
    }

    pub fn block_size(&self) -> f64 {
        (self.after - self.before).abs()
    }

    /// Grow the envelope to cover `edges`, recording the run that reaches each inline edge.
    fn extend(&mut self, edges: LineEdges, run: Run, text: &str) {
        let bpd_dir = (edges.after - edges.before).signum();
        let ipd_dir = (edges.end - edges.start).signum();

        if bpd_dir * (edges.before - self.before) < 0.0 {
            self.before = edges.before;
        }
        if bpd_dir * (edges.after - self.after) > 0.0 {
            self.after = edges.after;
        }
        if ipd_dir * (edges.start - self.start) < 0.0 {
            self.start = edges.start;
            self.start_elem = self.elements.len();
        }
        if ipd_dir * (edges.end - self.end) > 0.0 {
            self.end = edges.end;
            self.end_elem = self.elements.len();
        }

        self.text.push_str(text);
        self.elements.push(run);
    }
}

/// Whether two block intervals belong on the same line.
///
/// True when the second interval strictly contains the first, or when the first contains the
/// second (non-strictly). Partially overlapping intervals are not on the same line.
pub fn same_line(before1: f64, after1: f64, before2: f64, after2: f64) -> bool {
    (after1 < after2 && before1 > before2) || (after2 <= after1 && before2 >= before1)
}

/// Walk the subtree under `root` depth first and group its measurable leaves into lines.
///
/// Only inline leaves count as runs, and those with a zero-area rectangle are skipped. A forced
/// break marks the line before it.
pub fn construct_line_list(oracle: &mut dyn GeometryOracle, root: BoxId, axes: Axes) -> Vec<Line> {
    let mut lines = Vec::new();
    let inherited = inherited_background(oracle, root);
    collect(oracle, root, axes, inherited, &mut lines);
    tracing::debug!(lines = lines.len(), "constructed line list");
    lines
}

fn own_background(oracle: &dyn GeometryOracle, id: BoxId) -> Option<Rgba8> {
    match oracle.property(id, PropertyKey::BackgroundColor) {
        Some(Property::BackgroundColor(c)) if !c.is_transparent() => Some(*c),
        _ => None,
    }
}

fn inherited_background(oracle: &dyn GeometryOracle, id: BoxId) -> Option<Rgba8> {
    let mut cur = oracle.parent(id);
    while let Some(p) = cur {
        if let Some(c) = own_background(oracle, p) {
            return Some(c);
        }
        cur = oracle.parent(p);
    }
    None
}

fn collect(
    oracle: &mut dyn GeometryOracle,
    id: BoxId,
    axes: Axes,
    inherited: Option<Rgba8>,
    lines: &mut Vec<Line>,
) {
    let background = own_background(oracle, id).or(inherited);
    let children = oracle.children(id);
    if !children.is_empty() {
        for child in children {
            collect(oracle, child, axes, background, lines);
        }
        return;
    }

    match oracle.kind(id) {
        BoxKind::Break => {
            if let Some(last) = lines.last_mut() {
                last.br = true;
            }
            return;
        }
        BoxKind::Inline => {}
        // empty blocks and wrappers are not text runs
        _ => return,
    }

    let rect = oracle.rect(id);
    if rect.width() == 0.0 || rect.height() == 0.0 {
        return;
    }

    let edges = axes.project(rect);
    let run = Run {
        node: id,
        background,
        before: edges.before,
        after: edges.after,
    };
    let text = oracle.text(id);
    match lines.last_mut() {
        Some(line) if same_line(edges.before, edges.after, line.before, line.after) => {
            line.extend(edges, run, text);
        }
        _ => lines.push(Line::open(edges, run, text)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/lines.rs"]
mod tests;
