//! Test suite for selection event dispatch across multiple units
//!
//! Exercises word selection, granular extension across unit seams, reversed
//! drags, and the screen-order merge over a three-paragraph region laid out
//! on a monospace grid (8px advance, 16px lines).

use std::sync::Arc;

use kurbo::Point;
use marquee_region::{
    Direction, Granularity, RegionConfig, SelectionEvent, SelectionRange, SelectionRegion,
};
use marquee_text::PlainTextLayout;

fn paragraph(region: &mut SelectionRegion, text: &str, y: f64) -> usize {
    let root = region.root_id();
    region
        .register_text_unit(root, Arc::new(PlainTextLayout::new(text, Point::new(0.0, y))))
        .expect("registration succeeds")
}

/// "How are you?" / "Good, and you?" / "Fine, thank you." stacked top down.
fn three_paragraphs() -> (SelectionRegion, usize, usize, usize) {
    let mut region = SelectionRegion::new(RegionConfig::default());
    let u1 = paragraph(&mut region, "How are you?", 0.0);
    let u2 = paragraph(&mut region, "Good, and you?", 16.0);
    let u3 = paragraph(&mut region, "Fine, thank you.", 32.0);
    (region, u1, u2, u3)
}

fn unit_range(region: &SelectionRegion, id: usize) -> Option<SelectionRange> {
    region.node(id).unwrap().leaf().unwrap().range()
}

fn plain_text(region: &SelectionRegion) -> String {
    region
        .selected_content()
        .map(|content| content.plain_text)
        .unwrap_or_default()
}

fn extend_word(region: &mut SelectionRegion) {
    region
        .dispatch(SelectionEvent::Extend {
            granularity: Granularity::Word,
            direction: Direction::Forward,
        })
        .unwrap();
}

#[test]
fn word_select_then_word_extension_walks_the_boundaries() {
    let (mut region, u1, u2, _) = three_paragraphs();

    // Inside "are" of "How are you?".
    region.select_word_at(Point::new(42.0, 8.0)).unwrap();
    assert_eq!(unit_range(&region, u1), Some(SelectionRange::new(4, 7)));
    assert_eq!(plain_text(&region), "are");

    extend_word(&mut region);
    assert_eq!(unit_range(&region, u1), Some(SelectionRange::new(4, 11)));
    assert_eq!(plain_text(&region), "are you");

    extend_word(&mut region);
    assert_eq!(unit_range(&region, u1), Some(SelectionRange::new(4, 12)));
    assert_eq!(plain_text(&region), "are you?");

    // Crossing the seam: unit 1 keeps its tail, unit 2 contributes its
    // first word.
    extend_word(&mut region);
    assert_eq!(unit_range(&region, u1), Some(SelectionRange::new(4, 12)));
    assert_eq!(unit_range(&region, u2), Some(SelectionRange::new(0, 4)));
    assert_eq!(plain_text(&region), "are you?\nGood");
}

#[test]
fn forward_and_backward_drags_yield_mirrored_ranges_and_equal_content() {
    let mut region = SelectionRegion::new(RegionConfig::default());
    let unit = paragraph(&mut region, "How are you?", 0.0);

    region.pointer_down(Point::new(16.0, 8.0)).unwrap();
    region.pointer_move(Point::new(48.0, 8.0)).unwrap();
    region.pointer_up();
    assert_eq!(unit_range(&region, unit), Some(SelectionRange::new(2, 6)));
    let forward_text = plain_text(&region);

    region.pointer_down(Point::new(48.0, 8.0)).unwrap();
    region.pointer_move(Point::new(16.0, 8.0)).unwrap();
    region.pointer_up();
    let backward = unit_range(&region, unit).unwrap();
    assert_eq!(backward, SelectionRange::new(6, 2));
    assert!(backward.is_reversed());

    assert_eq!(plain_text(&region), forward_text);
    assert_eq!(forward_text, "w ar");
}

#[test]
fn merge_order_is_visual_not_registration_order() {
    // Register middle, bottom, top: the merged result must not care.
    let mut region = SelectionRegion::new(RegionConfig::default());
    let u2 = paragraph(&mut region, "Good, and you?", 16.0);
    let u3 = paragraph(&mut region, "Fine, thank you.", 32.0);
    let u1 = paragraph(&mut region, "How are you?", 0.0);

    // Drag from offset 2 of the top paragraph to offset 6 of the bottom.
    region.pointer_down(Point::new(16.0, 8.0)).unwrap();
    region.pointer_move(Point::new(48.0, 40.0)).unwrap();
    region.pointer_up();

    assert_eq!(unit_range(&region, u1), Some(SelectionRange::new(2, 12)));
    assert_eq!(unit_range(&region, u2), Some(SelectionRange::new(0, 14)));
    assert_eq!(unit_range(&region, u3), Some(SelectionRange::new(0, 6)));
    assert_eq!(plain_text(&region), "w are you?\nGood, and you?\nFine, ");
}

#[test]
fn select_through_units_report_full_ranges_from_local_clamping() {
    let (mut region, _, u2, _) = three_paragraphs();

    // Drag from inside unit 1 to inside unit 3; unit 2 never contains the
    // pointer yet ends up fully selected.
    region.pointer_down(Point::new(42.0, 8.0)).unwrap();
    region.pointer_move(Point::new(16.0, 40.0)).unwrap();
    region.pointer_up();

    let middle = unit_range(&region, u2).unwrap();
    assert_eq!(middle.normalized(), 0..14);
}

#[test]
fn pointer_down_in_a_gap_resets_without_placing_edges() {
    let (mut region, u1, _, _) = three_paragraphs();
    region.select_word_at(Point::new(42.0, 8.0)).unwrap();

    // Well below the last paragraph: the edge updates find no unit. The
    // fresh interaction still resets the previous selection.
    region.pointer_down(Point::new(10.0, 500.0)).unwrap();
    assert_eq!(unit_range(&region, u1), None);
    assert_eq!(region.selected_content(), None);
}

#[test]
fn select_all_spans_every_unit() {
    let (mut region, u1, u2, u3) = three_paragraphs();
    region.select_all().unwrap();

    assert_eq!(unit_range(&region, u1), Some(SelectionRange::new(0, 12)));
    assert_eq!(unit_range(&region, u2), Some(SelectionRange::new(0, 14)));
    assert_eq!(unit_range(&region, u3), Some(SelectionRange::new(0, 16)));
    assert_eq!(
        plain_text(&region),
        "How are you?\nGood, and you?\nFine, thank you."
    );
}

#[test]
fn word_select_geometry_brackets_the_word() {
    let (mut region, _, _, _) = three_paragraphs();
    region.select_word_at(Point::new(42.0, 8.0)).unwrap();

    let geometry = region.geometry().expect("layout is ready");
    let start = geometry.start.unwrap();
    let end = geometry.end.unwrap();
    // "are" spans columns 4..7 on the first line.
    assert_eq!(start.position, Point::new(32.0, 16.0));
    assert_eq!(end.position, Point::new(56.0, 16.0));
    assert_eq!(start.line_height, 16.0);
    assert!(geometry.has_content);
}
