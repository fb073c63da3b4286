//! Test suite for the screen-order content merge: bidirectional rows,
//! separators, and empty-unit skipping.

use std::sync::Arc;

use kurbo::Point;
use marquee_region::{RegionConfig, SelectionRegion, TextDirection};
use marquee_text::PlainTextLayout;

fn unit_at(region: &mut SelectionRegion, text: &str, origin: Point) -> usize {
    let root = region.root_id();
    region
        .register_text_unit(root, Arc::new(PlainTextLayout::new(text, origin)))
        .unwrap()
}

fn plain_text(region: &SelectionRegion) -> String {
    region
        .selected_content()
        .map(|content| content.plain_text)
        .unwrap_or_default()
}

/// "abc" · Hebrew · "def" side by side on one row. The middle unit is
/// right-to-left internally; its position, not its directionality, decides
/// where it lands in the merge.
fn bidi_row() -> (SelectionRegion, usize) {
    let mut region = SelectionRegion::new(RegionConfig::default());
    let _a = unit_at(&mut region, "abc", Point::new(0.0, 0.0));
    let b = unit_at(&mut region, "שלום", Point::new(24.0, 0.0));
    let _c = unit_at(&mut region, "def", Point::new(56.0, 0.0));
    (region, b)
}

#[test]
fn rtl_units_merge_by_position_not_text_direction() {
    let (mut region, middle) = bidi_row();
    let leaf = region.node(middle).unwrap().leaf().unwrap();
    assert_eq!(leaf.text_direction(), TextDirection::Rtl);

    region.select_all().unwrap();
    assert_eq!(plain_text(&region), "abcשלוםdef");
}

#[test]
fn a_drag_across_a_bidi_row_keeps_visual_order() {
    let (mut region, _) = bidi_row();

    // From inside "abc" to just into "def".
    region.pointer_down(Point::new(4.0, 8.0)).unwrap();
    region.pointer_move(Point::new(66.0, 8.0)).unwrap();
    region.pointer_up();

    assert_eq!(plain_text(&region), "bcשלוםd");
}

#[test]
fn same_row_units_concatenate_without_separators() {
    let mut region = SelectionRegion::new(RegionConfig::default());
    unit_at(&mut region, "left", Point::new(0.0, 0.0));
    unit_at(&mut region, "right", Point::new(40.0, 0.0));

    region.select_all().unwrap();
    assert_eq!(plain_text(&region), "leftright");
}

#[test]
fn rows_are_joined_with_single_newlines() {
    let mut region = SelectionRegion::new(RegionConfig::default());
    unit_at(&mut region, "one", Point::new(0.0, 0.0));
    unit_at(&mut region, "two", Point::new(0.0, 16.0));
    unit_at(&mut region, "three", Point::new(0.0, 32.0));

    region.select_all().unwrap();
    assert_eq!(plain_text(&region), "one\ntwo\nthree");
}

#[test]
fn units_with_nothing_selected_insert_no_separator() {
    let mut region = SelectionRegion::new(RegionConfig::default());
    unit_at(&mut region, "one", Point::new(0.0, 0.0));
    // An empty paragraph between the two: selected-all it still encloses
    // nothing.
    unit_at(&mut region, "", Point::new(0.0, 16.0));
    unit_at(&mut region, "three", Point::new(0.0, 32.0));

    region.select_all().unwrap();
    assert_eq!(plain_text(&region), "one\nthree");
}

#[test]
fn content_carries_the_geometry_it_was_merged_under() {
    let mut region = SelectionRegion::new(RegionConfig::default());
    unit_at(&mut region, "one", Point::new(0.0, 0.0));
    region.select_all().unwrap();

    let content = region.selected_content().unwrap();
    let geometry = content.geometry.expect("layout is ready");
    assert!(geometry.has_content);
    assert_eq!(geometry, region.geometry().unwrap());
}
