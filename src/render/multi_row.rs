use crate::{
    oracle::{BoxKind, GeometryOracle},
    render::lines::Line,
};

/// Turn every soft wrap of a paragraph into a forced break.
///
/// A break box goes after the last run of each line but the final one, unless the line already
/// ends in a forced break. Returns the number of breaks inserted.
pub fn apply_multi_row_align(oracle: &mut dyn GeometryOracle, lines: &[Line]) -> usize {
    let mut inserted = 0;
    for line in lines.iter().take(lines.len().saturating_sub(1)) {
        if line.br {
            continue;
        }
        let Some(last) = line.elements.last() else {
            continue;
        };
        let br = oracle.create_box(BoxKind::Break);
        oracle.insert_after(last.node, br);
        inserted += 1;
    }
    inserted
}

#[cfg(test)]
#[path = "../../tests/unit/render/multi_row.rs"]
mod tests;
