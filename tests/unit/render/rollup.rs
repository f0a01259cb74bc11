use super::*;
use crate::{
    isd::model::{NodeKind, StyleValue},
    oracle::{BoxKind, scripted::ScriptedOracle},
};

fn line(text: &str, before: f64, after: f64) -> Line {
    Line {
        before,
        after,
        start: 0.0,
        end: 100.0,
        start_elem: 0,
        end_elem: 0,
        elements: Vec::new(),
        text: text.to_string(),
        br: false,
    }
}

fn buffer(texts: &[&str]) -> RegionLineBuffer {
    let lines = texts
        .iter()
        .enumerate()
        .map(|(i, t)| line(t, i as f64 * 24.0, i as f64 * 24.0 + 20.0))
        .collect();
    RegionLineBuffer::new("r1", lines)
}

#[test]
fn roll_up_fires_when_previous_bottom_line_moves_up() {
    let prev = buffer(&["A", "B"]);
    let cur = buffer(&["B", "C"]);
    assert_eq!(detect_roll_up(Some(&prev), &cur), Some(20.0));
}

#[test]
fn roll_up_needs_matching_text_and_two_lines() {
    let prev = buffer(&["A", "B"]);
    assert_eq!(detect_roll_up(Some(&prev), &buffer(&["A", "C"])), None);
    assert_eq!(detect_roll_up(Some(&prev), &buffer(&["B"])), None);
    assert_eq!(detect_roll_up(Some(&buffer(&[])), &buffer(&["B", "C"])), None);
    assert_eq!(detect_roll_up(None, &buffer(&["B", "C"])), None);
}

#[test]
fn start_roll_up_offsets_then_transitions_to_rest() {
    let mut o = ScriptedOracle::default();
    let body = o.create_box(BoxKind::Block);
    start_roll_up(&mut o, body, 24.0);

    assert_eq!(
        o.writes(),
        &[
            (body, Property::Translate(Vec2::new(0.0, 24.0))),
            (
                body,
                Property::Transition(TranslateTransition {
                    to: Vec2::ZERO,
                    duration_s: ROLL_UP_DURATION_S,
                    ease: Ease::CSS_EASE,
                })
            ),
        ]
    );
}

#[test]
fn candidates_are_bottom_aligned_horizontal_regions_with_content() {
    let region = IsdNode::new(NodeKind::Region)
        .with_style(names::DISPLAY_ALIGN, StyleValue::keyword("after"))
        .with_child(IsdNode::new(NodeKind::Body));

    assert!(is_roll_up_candidate(&region, BlockProgression::Tb, true));
    assert!(!is_roll_up_candidate(&region, BlockProgression::Tb, false));
    assert!(!is_roll_up_candidate(&region, BlockProgression::Rl, true));

    let empty = IsdNode::new(NodeKind::Region)
        .with_style(names::DISPLAY_ALIGN, StyleValue::keyword("after"));
    assert!(!is_roll_up_candidate(&empty, BlockProgression::Tb, true));

    let centered = IsdNode::new(NodeKind::Region)
        .with_style(names::DISPLAY_ALIGN, StyleValue::keyword("center"))
        .with_child(IsdNode::new(NodeKind::Body));
    assert!(!is_roll_up_candidate(&centered, BlockProgression::Tb, true));
}

#[test]
fn unnamed_regions_share_the_default_key() {
    let mut state = SceneState::next(None);
    state.record(RegionLineBuffer::new("", vec![line("x", 0.0, 20.0)]));
    assert!(state.regions.contains_key(DEFAULT_REGION_ID));
    assert_eq!(state.region("").and_then(|b| b.last_text()), Some("x"));
}

#[test]
fn scene_state_survives_json_and_counts_generations() {
    let mut state = SceneState::next(None);
    assert_eq!(state.generation, 0);
    state.record(buffer(&["one", "two"]));

    let json = state.to_json().unwrap();
    let back = SceneState::from_json(&json).unwrap();
    assert_eq!(back, state);
    assert_eq!(SceneState::next(Some(&back)).generation, 1);
}
