use super::*;
use crate::{
    foundation::{axes::Axes, core::Rect},
    oracle::{BoxId, scripted::ScriptedOracle},
    render::lines::construct_line_list,
};

fn rows(o: &mut ScriptedOracle, count: usize) -> (BoxId, Vec<BoxId>) {
    let p = o.create_box(BoxKind::Block);
    o.append_child(o.root(), p);
    let mut leaves = Vec::new();
    for i in 0..count {
        let y = i as f64 * 20.0;
        leaves.push(o.leaf(p, "w", Rect::new(0.0, y, 10.0, y + 20.0)));
        leaves.push(o.leaf(p, "x", Rect::new(10.0, y, 20.0, y + 20.0)));
    }
    (p, leaves)
}

#[test]
fn breaks_follow_every_line_but_the_last() {
    let mut o = ScriptedOracle::default();
    let (p, leaves) = rows(&mut o, 3);
    let lines = construct_line_list(&mut o, p, Axes::default());

    assert_eq!(apply_multi_row_align(&mut o, &lines), 2);

    let kids = o.children(p);
    let kinds: Vec<BoxKind> = kids.iter().map(|&k| o.kind(k)).collect();
    use BoxKind::{Break, Inline};
    assert_eq!(kinds, [Inline, Inline, Break, Inline, Inline, Break, Inline, Inline]);
    assert_eq!(kids[1], leaves[1]);
    assert_eq!(kids[4], leaves[3]);
}

#[test]
fn lines_already_ending_in_a_break_are_skipped() {
    let mut o = ScriptedOracle::default();
    let (p, leaves) = rows(&mut o, 2);
    let br = o.create_box(BoxKind::Break);
    o.insert_after(leaves[1], br);
    let lines = construct_line_list(&mut o, p, Axes::default());
    assert!(lines[0].br);

    assert_eq!(apply_multi_row_align(&mut o, &lines), 0);
    assert_eq!(o.children(p).len(), 5);
}

#[test]
fn single_line_is_untouched() {
    let mut o = ScriptedOracle::default();
    let (p, _) = rows(&mut o, 1);
    let lines = construct_line_list(&mut o, p, Axes::default());
    assert_eq!(apply_multi_row_align(&mut o, &lines), 0);
    assert_eq!(apply_multi_row_align(&mut o, &[]), 0);
}
