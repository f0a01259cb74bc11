use super::*;

#[test]
fn writing_modes_collapse_to_four_pairs() {
    assert_eq!(WritingMode::parse("lr"), Some(WritingMode::LrTb));
    assert_eq!(WritingMode::parse("rl"), Some(WritingMode::RlTb));
    assert_eq!(WritingMode::parse("tb"), Some(WritingMode::TbRl));
    assert_eq!(WritingMode::parse("tblr"), Some(WritingMode::TbLr));
    assert_eq!(WritingMode::parse("sideways"), None);

    let a = WritingMode::TbRl.axes();
    assert_eq!(a.ipd(), InlineProgression::Tb);
    assert_eq!(a.bpd(), BlockProgression::Rl);
}

#[test]
fn illegal_pairs_are_rejected() {
    use BlockProgression as B;
    use InlineProgression as I;
    assert!(Axes::new(I::Tb, B::Tb).is_err());
    assert!(Axes::new(I::Lr, B::Lr).is_err());
    assert!(Axes::new(I::Rl, B::Rl).is_err());
    assert!(Axes::new(I::Lr, B::Rl).is_err());
    assert!(Axes::new(I::Rl, B::Lr).is_err());

    assert!(Axes::new(I::Lr, B::Tb).is_ok());
    assert!(Axes::new(I::Rl, B::Tb).is_ok());
    assert!(Axes::new(I::Tb, B::Lr).is_ok());
    assert!(Axes::new(I::Tb, B::Rl).is_ok());
}

#[test]
fn projection_follows_progression() {
    let r = Rect::new(10.0, 20.0, 30.0, 60.0);

    let e = WritingMode::LrTb.axes().project(r);
    assert_eq!((e.before, e.after, e.start, e.end), (20.0, 60.0, 10.0, 30.0));

    let e = WritingMode::RlTb.axes().project(r);
    assert_eq!((e.before, e.after, e.start, e.end), (20.0, 60.0, 30.0, 10.0));

    let e = WritingMode::TbLr.axes().project(r);
    assert_eq!((e.before, e.after, e.start, e.end), (10.0, 30.0, 20.0, 60.0));

    let e = WritingMode::TbRl.axes().project(r);
    assert_eq!((e.before, e.after, e.start, e.end), (30.0, 10.0, 20.0, 60.0));
}

#[test]
fn edges_follow_progression() {
    let a = WritingMode::RlTb.axes();
    assert_eq!(a.inline_start_edge(), Edge::Right);
    assert_eq!(a.inline_end_edge(), Edge::Left);
    let a = WritingMode::TbRl.axes();
    assert_eq!(a.inline_start_edge(), Edge::Top);
    assert_eq!(a.block_start_edge(), Edge::Right);
    assert_eq!(a.block_end_edge(), Edge::Left);
}
