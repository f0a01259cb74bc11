use super::*;
use crate::{
    foundation::{axes::WritingMode, core::Rect},
    oracle::scripted::ScriptedOracle,
};

fn paragraph(o: &mut ScriptedOracle) -> BoxId {
    let p = o.create_box(BoxKind::Block);
    o.append_child(o.root(), p);
    p
}

#[test]
fn same_line_requires_containment() {
    // strictly inside
    assert!(same_line(2.0, 18.0, 0.0, 20.0));
    // containing (inclusive)
    assert!(same_line(0.0, 20.0, 0.0, 20.0));
    assert!(same_line(0.0, 20.0, 2.0, 18.0));
    // partial overlap and disjoint
    assert!(!same_line(10.0, 30.0, 0.0, 20.0));
    assert!(!same_line(24.0, 44.0, 0.0, 20.0));
}

#[test]
fn same_line_is_symmetric_except_on_a_shared_edge() {
    let pairs = [
        ((2.0, 18.0), (0.0, 20.0)),
        ((0.0, 20.0), (0.0, 20.0)),
        ((10.0, 30.0), (0.0, 20.0)),
        ((24.0, 44.0), (0.0, 20.0)),
    ];
    for ((b1, a1), (b2, a2)) in pairs {
        assert_eq!(
            same_line(b1, a1, b2, a2),
            same_line(b2, a2, b1, a1),
            "({b1}, {a1}) vs ({b2}, {a2})"
        );
    }

    // sharing the before edge: only the wider interval contains the narrower one
    assert!(same_line(0.0, 20.0, 0.0, 18.0));
    assert!(!same_line(0.0, 18.0, 0.0, 20.0));
}

#[test]
fn empty_blocks_and_wrappers_are_not_runs() {
    let mut o = ScriptedOracle::default();
    let p = paragraph(&mut o);
    let empty = o.create_box(BoxKind::Block);
    o.append_child(p, empty);
    o.set_rect(empty, Rect::new(0.0, 0.0, 80.0, 20.0));
    let wrapper = o.create_box(BoxKind::InlineBlock);
    o.append_child(p, wrapper);
    o.set_rect(wrapper, Rect::new(0.0, 30.0, 40.0, 50.0));
    o.leaf(p, "x", Rect::new(0.0, 60.0, 10.0, 80.0));

    let lines = construct_line_list(&mut o, p, Axes::default());
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "x");
}

#[test]
fn leaves_group_into_lines_by_block_overlap() {
    let mut o = ScriptedOracle::default();
    let p = paragraph(&mut o);
    o.leaf(p, "Hello", Rect::new(0.0, 0.0, 50.0, 20.0));
    o.leaf(p, " big", Rect::new(50.0, -2.0, 90.0, 22.0));
    o.leaf(p, "world", Rect::new(0.0, 24.0, 50.0, 44.0));

    let lines = construct_line_list(&mut o, p, Axes::default());
    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0].text, "Hello big");
    assert_eq!(lines[0].elements.len(), 2);
    assert_eq!((lines[0].before, lines[0].after), (-2.0, 22.0));
    assert_eq!((lines[0].start, lines[0].end), (0.0, 90.0));
    assert_eq!((lines[0].start_elem, lines[0].end_elem), (0, 1));

    assert_eq!(lines[1].text, "world");
    assert!(!lines[1].br);
}

#[test]
fn zero_area_leaves_are_skipped() {
    let mut o = ScriptedOracle::default();
    let p = paragraph(&mut o);
    o.leaf(p, " ", Rect::new(50.0, 0.0, 50.0, 20.0));
    o.leaf(p, "x", Rect::new(0.0, 0.0, 10.0, 0.0));
    assert!(construct_line_list(&mut o, p, Axes::default()).is_empty());
}

#[test]
fn forced_break_marks_preceding_line() {
    let mut o = ScriptedOracle::default();
    let p = paragraph(&mut o);

    let lead = o.create_box(BoxKind::Break);
    o.append_child(p, lead);
    o.leaf(p, "one", Rect::new(0.0, 0.0, 30.0, 20.0));
    let br = o.create_box(BoxKind::Break);
    o.append_child(p, br);
    o.leaf(p, "two", Rect::new(0.0, 20.0, 30.0, 40.0));

    let lines = construct_line_list(&mut o, p, Axes::default());
    assert_eq!(lines.len(), 2);
    assert!(lines[0].br);
    assert!(!lines[1].br);
}

#[test]
fn background_comes_from_nearest_box_that_has_one() {
    let mut o = ScriptedOracle::default();
    let red = Rgba8::new(255, 0, 0, 255);
    let blue = Rgba8::new(0, 0, 255, 255);

    let p = paragraph(&mut o);
    o.set_property(p, Property::BackgroundColor(red));
    let span = o.create_box(BoxKind::Inline);
    o.append_child(p, span);
    let inherited = o.leaf(span, "a", Rect::new(0.0, 0.0, 10.0, 20.0));
    let own = o.leaf(span, "b", Rect::new(10.0, 0.0, 20.0, 20.0));
    o.set_property(own, Property::BackgroundColor(blue));

    // measured from the span: the paragraph's color is still inherited
    let lines = construct_line_list(&mut o, span, Axes::default());
    let runs = &lines[0].elements;
    assert_eq!(runs[0].node, inherited);
    assert_eq!(runs[0].background, Some(red));
    assert_eq!(runs[1].background, Some(blue));
}

#[test]
fn inline_extremes_follow_right_to_left_progression() {
    let mut o = ScriptedOracle::default();
    let p = paragraph(&mut o);
    o.leaf(p, "a", Rect::new(80.0, 0.0, 100.0, 20.0));
    o.leaf(p, "b", Rect::new(60.0, 0.0, 80.0, 20.0));
    o.leaf(p, "c", Rect::new(40.0, 0.0, 60.0, 20.0));

    let lines = construct_line_list(&mut o, p, WritingMode::RlTb.axes());
    assert_eq!(lines.len(), 1);
    assert_eq!((lines[0].start, lines[0].end), (100.0, 40.0));
    assert_eq!((lines[0].start_elem, lines[0].end_elem), (0, 2));
}

#[test]
fn vertical_lines_progress_right_to_left() {
    let mut o = ScriptedOracle::default();
    let p = paragraph(&mut o);
    o.leaf(p, "a", Rect::new(80.0, 0.0, 100.0, 20.0));
    o.leaf(p, "b", Rect::new(80.0, 20.0, 100.0, 40.0));
    o.leaf(p, "c", Rect::new(56.0, 0.0, 76.0, 20.0));

    let lines = construct_line_list(&mut o, p, WritingMode::TbRl.axes());
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "ab");
    assert_eq!((lines[0].before, lines[0].after), (100.0, 80.0));
    assert_eq!((lines[0].start, lines[0].end), (0.0, 40.0));
    assert_eq!(lines[0].end_elem, 1);
    assert_eq!(lines[1].text, "c");
    assert_eq!(lines[1].block_size(), 20.0);
}
