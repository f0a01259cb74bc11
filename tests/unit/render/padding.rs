use super::*;
use crate::{
    foundation::{axes::WritingMode, core::Rect},
    oracle::{BoxId, BoxKind, scripted::ScriptedOracle},
    render::lines::construct_line_list,
};

fn two_line_paragraph(o: &mut ScriptedOracle, bg: Option<Rgba8>) -> (BoxId, [BoxId; 4]) {
    let p = o.create_box(BoxKind::Block);
    o.append_child(o.root(), p);
    if let Some(c) = bg {
        o.set_property(p, Property::BackgroundColor(c));
    }
    let a = o.leaf(p, "ab", Rect::new(0.0, 0.0, 20.0, 20.0));
    let b = o.leaf(p, "cd", Rect::new(20.0, 0.0, 40.0, 20.0));
    let c = o.leaf(p, "ef", Rect::new(0.0, 24.0, 20.0, 44.0));
    let d = o.leaf(p, "gh", Rect::new(20.0, 24.0, 40.0, 44.0));
    (p, [a, b, c, d])
}

#[test]
fn extremes_get_border_and_compensating_margin() {
    let mut o = ScriptedOracle::default();
    let black = Rgba8::new(0, 0, 0, 255);
    let (p, [a, b, c, d]) = two_line_paragraph(&mut o, Some(black));
    let lines = construct_line_list(&mut o, p, Axes::default());
    o.clear_writes();

    let padded = apply_line_padding(&mut o, &lines, 2.3, Axes::default());
    assert_eq!(padded, 2);

    let side = BorderSide {
        width: 3.0,
        color: black,
    };
    let expected = vec![
        (a, Property::Border(Edge::Left, side)),
        (a, Property::Margin(Edge::Left, -3.0)),
        (b, Property::Border(Edge::Right, side)),
        (b, Property::Margin(Edge::Right, -3.0)),
        (c, Property::Border(Edge::Left, side)),
        (c, Property::Margin(Edge::Left, -3.0)),
        (d, Property::Border(Edge::Right, side)),
        (d, Property::Margin(Edge::Right, -3.0)),
    ];
    assert_eq!(o.writes(), expected.as_slice());
}

#[test]
fn zero_thickness_writes_nothing() {
    let mut o = ScriptedOracle::default();
    let (p, _) = two_line_paragraph(&mut o, None);
    let lines = construct_line_list(&mut o, p, Axes::default());
    o.clear_writes();

    assert_eq!(apply_line_padding(&mut o, &lines, 0.0, Axes::default()), 0);
    assert!(o.writes().is_empty());
}

#[test]
fn missing_background_pads_with_transparent_border() {
    let mut o = ScriptedOracle::default();
    let (p, [a, ..]) = two_line_paragraph(&mut o, None);
    let lines = construct_line_list(&mut o, p, Axes::default());
    o.clear_writes();

    apply_line_padding(&mut o, &lines, 1.0, Axes::default());
    assert_eq!(
        o.writes()[0],
        (
            a,
            Property::Border(
                Edge::Left,
                BorderSide {
                    width: 1.0,
                    color: Rgba8::transparent(),
                }
            )
        )
    );
}

#[test]
fn right_to_left_starts_on_the_right_edge() {
    let mut o = ScriptedOracle::default();
    let p = o.create_box(BoxKind::Block);
    o.append_child(o.root(), p);
    let first = o.leaf(p, "a", Rect::new(80.0, 0.0, 100.0, 20.0));
    let last = o.leaf(p, "b", Rect::new(60.0, 0.0, 80.0, 20.0));
    let axes = WritingMode::RlTb.axes();
    let lines = construct_line_list(&mut o, p, axes);
    o.clear_writes();

    apply_line_padding(&mut o, &lines, 4.0, axes);
    assert_eq!(o.writes()[1], (first, Property::Margin(Edge::Right, -4.0)));
    assert_eq!(o.writes()[3], (last, Property::Margin(Edge::Left, -4.0)));
}

#[test]
fn single_run_without_area_is_left_alone() {
    let mut o = ScriptedOracle::default();
    let p = o.create_box(BoxKind::Block);
    o.append_child(o.root(), p);
    let ghost = o.create_box(BoxKind::Inline);
    o.append_child(p, ghost);

    let line = Line {
        before: 0.0,
        after: 20.0,
        start: 0.0,
        end: 0.0,
        start_elem: 0,
        end_elem: 0,
        elements: vec![Run {
            node: ghost,
            background: None,
            before: 0.0,
            after: 20.0,
        }],
        text: String::new(),
        br: false,
    };
    assert_eq!(apply_line_padding(&mut o, &[line], 2.0, Axes::default()), 0);
    assert!(o.writes().is_empty());
}
