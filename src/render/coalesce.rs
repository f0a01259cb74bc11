use crate::{
    oracle::{BoxId, BoxKind, GeometryOracle, PropertyKey},
    render::lines::Line,
};

/// Merge neighbouring single-character runs split out of the same span.
///
/// Per-character boxes exist only so lines can be measured; once the line passes are done,
/// adjacent runs sharing a parent collapse back into one box. The surviving box takes over the
/// text and the edge decorations of the boxes it absorbs. Returns the number of boxes removed.
pub fn coalesce_runs(oracle: &mut dyn GeometryOracle, lines: &mut [Line]) -> usize {
    let mut removed = 0;
    for line in lines.iter_mut() {
        let mut j = 1;
        while j < line.elements.len() {
            let keep = line.elements[j - 1].node;
            let drop = line.elements[j].node;
            if !mergeable(oracle, keep, drop) {
                j += 1;
                continue;
            }

            let merged = format!("{}{}", oracle.text(keep), oracle.text(drop));
            oracle.set_text(keep, &merged);
            for key in PropertyKey::box_edges() {
                if let Some(p) = oracle.property(drop, key).cloned() {
                    oracle.set_property(keep, p);
                }
            }
            oracle.remove(drop);
            removed += 1;

            let absorbed = line.elements.remove(j);
            let kept = &mut line.elements[j - 1];
            let dir = (kept.after - kept.before).signum();
            if dir * (absorbed.before - kept.before) < 0.0 {
                kept.before = absorbed.before;
            }
            if dir * (absorbed.after - kept.after) > 0.0 {
                kept.after = absorbed.after;
            }
            line.start_elem = shift_index(line.start_elem, j);
            line.end_elem = shift_index(line.end_elem, j);
        }
    }
    removed
}

fn shift_index(idx: usize, removed: usize) -> usize {
    if idx >= removed { idx - 1 } else { idx }
}

fn mergeable(oracle: &dyn GeometryOracle, a: BoxId, b: BoxId) -> bool {
    let (Some(pa), Some(pb)) = (oracle.parent(a), oracle.parent(b)) else {
        return false;
    };
    pa == pb
        && oracle.kind(pa) == BoxKind::Inline
        && oracle.kind(a) == BoxKind::Inline
        && oracle.kind(b) == BoxKind::Inline
        && oracle.child_count(a) == 0
        && oracle.child_count(b) == 0
}

#[cfg(test)]
#[path = "../../tests/unit/render/coalesce.rs"]
mod tests;
