use super::*;
use crate::{
    foundation::{
        axes::{Edge, WritingMode},
        core::{Rect, Rgba8},
    },
    oracle::{BoxId, BoxKind, scripted::ScriptedOracle},
    render::lines::construct_line_list,
};

const BG: Rgba8 = Rgba8::new(10, 20, 30, 255);

fn padded(o: &ScriptedOracle, id: BoxId) -> Vec<Property> {
    o.writes()
        .iter()
        .filter(|(b, p)| *b == id && matches!(p, Property::Padding(..)))
        .map(|(_, p)| p.clone())
        .collect()
}

#[test]
fn gap_between_lines_is_split_at_the_midpoint() {
    let mut o = ScriptedOracle::default();
    let p = o.create_box(BoxKind::Block);
    o.append_child(o.root(), p);
    o.set_property(p, Property::BackgroundColor(BG));
    let top = o.leaf(p, "top", Rect::new(0.0, 0.0, 30.0, 20.0));
    let bottom = o.leaf(p, "bottom", Rect::new(0.0, 30.0, 60.0, 50.0));
    let lines = construct_line_list(&mut o, p, Axes::default());
    o.clear_writes();

    apply_fill_line_gap(&mut o, &lines, 0.0, 60.0, Axes::default());

    assert_eq!(padded(&o, top), vec![Property::Padding(Edge::Bottom, 5.0)]);
    assert_eq!(
        padded(&o, bottom),
        vec![
            Property::Padding(Edge::Top, 5.0),
            Property::Padding(Edge::Bottom, 10.0),
        ]
    );
    assert!(
        o.writes()
            .iter()
            .any(|w| *w == (top, Property::BackgroundColor(BG)))
    );
}

#[test]
fn sub_pixel_gaps_round_up_to_a_whole_pixel() {
    let mut o = ScriptedOracle::default();
    let p = o.create_box(BoxKind::Block);
    o.append_child(o.root(), p);
    o.set_property(p, Property::BackgroundColor(BG));
    let top = o.leaf(p, "top", Rect::new(0.0, 0.0, 10.0, 15.2));
    let bottom = o.leaf(p, "bottom", Rect::new(0.0, 15.6, 10.0, 30.0));
    let lines = construct_line_list(&mut o, p, Axes::default());
    o.clear_writes();

    apply_fill_line_gap(&mut o, &lines, 0.0, 30.0, Axes::default());

    assert_eq!(padded(&o, top), vec![Property::Padding(Edge::Bottom, 1.0)]);
    assert_eq!(padded(&o, bottom), vec![Property::Padding(Edge::Top, 1.0)]);
}

#[test]
fn runs_without_background_are_not_padded() {
    let mut o = ScriptedOracle::default();
    let p = o.create_box(BoxKind::Block);
    o.append_child(o.root(), p);
    o.leaf(p, "a", Rect::new(0.0, 0.0, 10.0, 20.0));
    o.leaf(p, "b", Rect::new(0.0, 30.0, 10.0, 50.0));
    let lines = construct_line_list(&mut o, p, Axes::default());
    o.clear_writes();

    apply_fill_line_gap(&mut o, &lines, 0.0, 50.0, Axes::default());
    assert!(o.writes().is_empty());
}

#[test]
fn vertical_right_to_left_pads_towards_decreasing_x() {
    let mut o = ScriptedOracle::default();
    let axes = WritingMode::TbRl.axes();
    let p = o.create_box(BoxKind::Block);
    o.append_child(o.root(), p);
    o.set_property(p, Property::BackgroundColor(BG));
    let first = o.leaf(p, "a", Rect::new(80.0, 0.0, 100.0, 20.0));
    let second = o.leaf(p, "b", Rect::new(50.0, 0.0, 70.0, 20.0));
    let lines = construct_line_list(&mut o, p, axes);
    assert_eq!(lines.len(), 2);
    o.clear_writes();

    apply_fill_line_gap(&mut o, &lines, 100.0, 0.0, axes);

    assert_eq!(padded(&o, first), vec![Property::Padding(Edge::Left, 5.0)]);
    assert_eq!(
        padded(&o, second),
        vec![
            Property::Padding(Edge::Right, 5.0),
            Property::Padding(Edge::Left, 50.0),
        ]
    );
}

#[test]
fn no_lines_no_writes() {
    let mut o = ScriptedOracle::default();
    apply_fill_line_gap(&mut o, &[], 0.0, 100.0, Axes::default());
    assert!(o.writes().is_empty());
}
