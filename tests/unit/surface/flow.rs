use super::*;

fn text(s: &str, width: f64) -> Piece {
    let mut p = Piece::new(PieceKind::Text, 0);
    p.text = s.to_string();
    p.width = width;
    p
}

fn space(width: f64) -> Piece {
    let mut p = Piece::new(PieceKind::Space, 0);
    p.text = " ".to_string();
    p.width = width;
    p
}

fn kinds(pieces: &[Piece]) -> Vec<PieceKind> {
    pieces.iter().map(|p| p.kind.clone()).collect()
}

#[test]
fn logical_rect_maps_through_each_writing_mode() {
    let content = Rect::new(10.0, 20.0, 110.0, 220.0);
    let lr = LRect {
        u0: 5.0,
        u1: 15.0,
        v0: 1.0,
        v1: 3.0,
    };

    assert_eq!(
        lr.to_physical(content, WritingMode::LrTb.axes()),
        Rect::new(15.0, 21.0, 25.0, 23.0)
    );
    assert_eq!(
        lr.to_physical(content, WritingMode::RlTb.axes()),
        Rect::new(95.0, 21.0, 105.0, 23.0)
    );
    assert_eq!(
        lr.to_physical(content, WritingMode::TbLr.axes()),
        Rect::new(11.0, 25.0, 13.0, 35.0)
    );
    assert_eq!(
        lr.to_physical(content, WritingMode::TbRl.axes()),
        Rect::new(107.0, 25.0, 109.0, 35.0)
    );
}

#[test]
fn text_splits_into_word_and_space_runs() {
    let mut pieces = Vec::new();
    split_text("ab  c\nd", 0, true, &mut pieces);
    assert_eq!(
        kinds(&pieces),
        vec![
            PieceKind::Text,
            PieceKind::Space,
            PieceKind::Text,
            PieceKind::Break,
            PieceKind::Text,
        ]
    );
    assert_eq!(pieces[1].text, "  ");

    let mut collapsed = Vec::new();
    split_text("a\nb", 0, false, &mut collapsed);
    assert_eq!(
        kinds(&collapsed),
        vec![PieceKind::Text, PieceKind::Space, PieceKind::Text]
    );
}

#[test]
fn collapsing_drops_leading_and_repeated_spaces() {
    let id = BoxId(7);
    let mut pieces = vec![
        space(1.0),
        Piece::new(PieceKind::Open(id), 0),
        text("a", 1.0),
        space(1.0),
        Piece::new(PieceKind::Close(id), 0),
        space(1.0),
        text("b", 1.0),
        Piece::new(PieceKind::Break, 0),
        space(1.0),
        text("c", 1.0),
    ];
    collapse_spaces(&mut pieces);
    assert_eq!(
        kinds(&pieces),
        vec![
            PieceKind::Open(id),
            PieceKind::Text,
            PieceKind::Space,
            PieceKind::Close(id),
            PieceKind::Text,
            PieceKind::Break,
            PieceKind::Text,
        ]
    );
}

#[test]
fn greedy_breaking_wraps_before_the_overflowing_word() {
    let pieces = mark_opportunities(vec![
        text("aa", 20.0),
        space(10.0),
        text("bbb", 30.0),
        space(10.0),
        text("c", 10.0),
    ]);
    let words = split_words(&pieces, true);
    assert_eq!(words.len(), 3);
    assert_eq!((words[0].content, words[0].trailing), (20.0, 10.0));

    assert_eq!(break_lines(&pieces, &words, 50.0), vec![(0, 2), (2, 5)]);
    // the space after "bbb" overhangs the 60px line
    assert_eq!(break_lines(&pieces, &words, 60.0), vec![(0, 4), (4, 5)]);
    assert_eq!(break_lines(&pieces, &words, 100.0), vec![(0, 5)]);
}

#[test]
fn an_oversized_word_still_gets_its_own_line() {
    let pieces = mark_opportunities(vec![text("wide", 80.0), space(10.0), text("x", 10.0)]);
    let words = split_words(&pieces, true);
    assert_eq!(break_lines(&pieces, &words, 40.0), vec![(0, 2), (2, 3)]);
}

#[test]
fn ideographs_split_into_breakable_pieces() {
    let pieces = mark_opportunities(vec![text("字幕字", 0.0)]);
    let texts: Vec<&str> = pieces.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["字", "幕", "字"]);
    let flags: Vec<bool> = pieces.iter().map(|p| p.opportunity).collect();
    assert_eq!(flags, vec![false, true, true]);
}

#[test]
fn latin_letters_across_boxes_stay_together() {
    let (a, b) = (BoxId(1), BoxId(2));
    let pieces = mark_opportunities(vec![
        Piece::new(PieceKind::Open(a), 0),
        text("a", 10.0),
        Piece::new(PieceKind::Close(a), 0),
        Piece::new(PieceKind::Open(b), 0),
        text("b", 10.0),
        Piece::new(PieceKind::Close(b), 0),
    ]);
    assert!(pieces.iter().all(|p| !p.opportunity));
    assert_eq!(split_words(&pieces, true).len(), 1);
}

#[test]
fn a_box_opening_moves_to_the_next_line_with_its_text() {
    let id = BoxId(4);
    let pieces = mark_opportunities(vec![
        text("a", 10.0),
        space(10.0),
        Piece::new(PieceKind::Open(id), 0),
        text("b", 10.0),
        Piece::new(PieceKind::Close(id), 0),
    ]);
    assert_eq!(
        line_starts(&pieces, true),
        vec![false, false, true, false, false]
    );
    assert!(line_starts(&pieces, false).iter().all(|s| !s));
}

#[test]
fn spaces_before_closing_punctuation_do_not_hang() {
    let pieces = mark_opportunities(vec![text("a", 10.0), space(10.0), text("!", 10.0)]);
    let words = split_words(&pieces, true);
    assert_eq!(words.len(), 1);
    assert_eq!((words[0].content, words[0].trailing), (30.0, 0.0));
}

#[test]
fn no_wrap_keeps_everything_on_one_line_except_forced_breaks() {
    let pieces = mark_opportunities(vec![
        text("aaaa", 40.0),
        space(10.0),
        text("bbbb", 40.0),
        Piece::new(PieceKind::Break, 0),
        text("c", 10.0),
    ]);
    let words = split_words(&pieces, false);
    assert_eq!(break_lines(&pieces, &words, 20.0), vec![(0, 4), (4, 5)]);
}

#[test]
fn a_trailing_break_does_not_open_an_empty_line() {
    let id = BoxId(3);
    let pieces = vec![
        text("a", 10.0),
        Piece::new(PieceKind::Break, 0),
        Piece::new(PieceKind::Close(id), 0),
    ];
    let words = split_words(&pieces, true);
    assert_eq!(break_lines(&pieces, &words, 100.0), vec![(0, 3)]);
}

#[test]
fn only_spaces_at_the_line_end_hang() {
    let id = BoxId(1);
    let line = vec![
        text("a", 10.0),
        space(10.0),
        text("b", 10.0),
        space(10.0),
        Piece::new(PieceKind::Close(id), 0),
    ];
    assert_eq!(trailing_spaces(&line, true), vec![3]);
    assert!(trailing_spaces(&line, false).is_empty());
}

#[test]
fn physical_alignment_flips_in_right_to_left_lines() {
    assert_eq!(align_factor(TextAlign::Start, InlineProgression::Rl), 0.0);
    assert_eq!(align_factor(TextAlign::Left, InlineProgression::Lr), 0.0);
    assert_eq!(align_factor(TextAlign::Left, InlineProgression::Rl), 1.0);
    assert_eq!(align_factor(TextAlign::Right, InlineProgression::Rl), 0.0);
    assert_eq!(align_factor(TextAlign::Center, InlineProgression::Tb), 0.5);
    assert_eq!(align_factor(TextAlign::End, InlineProgression::Lr), 1.0);
}

#[test]
fn inherited_state_follows_writing_mode_and_font_size() {
    let mut arena = BoxArena::new();
    let id = arena.create(BoxKind::Block);
    arena.set_property(id, Property::FontSize(30.0));
    arena.set_property(id, Property::WritingMode(WritingMode::TbRl));
    arena.set_property(id, Property::LineHeight(LineHeight::Px(40.0)));

    let derived = Inherited::initial().derive(arena.node(id));
    assert_eq!(derived.font.size_px, 30.0);
    assert_eq!(derived.axes, WritingMode::TbRl.axes());
    assert_eq!(derived.line_height_px(), 40.0);
    assert_eq!(Inherited::initial().line_height_px(), 16.0 * 1.2);
}
