//! Test suite for the interaction session: idempotent clears, cancellation
//! restore, menu policy queries, clipboard, keyboard commands, and the
//! pending-layout seam.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use keyboard_types::{Code, Key, KeyState, KeyboardEvent, Location, Modifiers, NamedKey};
use kurbo::Point;
use marquee_region::{
    PlatformProvider, RegionConfig, SelectedContent, SelectionError, SelectionGeometry,
    SelectionObserver, SelectionRange, SelectionRegion, SelectionStatus,
};
use marquee_text::PlainTextLayout;

#[derive(Default)]
struct RecordingPlatform {
    clipboard: RefCell<Option<String>>,
}

impl PlatformProvider for RecordingPlatform {
    fn write_clipboard(&self, text: &str) {
        *self.clipboard.borrow_mut() = Some(text.to_string());
    }
}

#[derive(Default)]
struct ChangeCounter {
    content_changes: Cell<usize>,
    geometry_changes: Cell<usize>,
}

impl SelectionObserver for ChangeCounter {
    fn selection_changed(&self, _content: Option<&SelectedContent>) {
        self.content_changes.set(self.content_changes.get() + 1);
    }

    fn geometry_changed(&self, _geometry: &SelectionGeometry) {
        self.geometry_changes.set(self.geometry_changes.get() + 1);
    }
}

fn paragraph(region: &mut SelectionRegion, text: &str, y: f64) -> usize {
    let root = region.root_id();
    region
        .register_text_unit(root, Arc::new(PlainTextLayout::new(text, Point::new(0.0, y))))
        .unwrap()
}

fn two_paragraphs() -> (SelectionRegion, usize, usize) {
    let mut region = SelectionRegion::new(RegionConfig::default());
    let u1 = paragraph(&mut region, "How are you?", 0.0);
    let u2 = paragraph(&mut region, "Good, and you?", 16.0);
    (region, u1, u2)
}

fn unit_range(region: &SelectionRegion, id: usize) -> Option<SelectionRange> {
    region.node(id).unwrap().leaf().unwrap().range()
}

fn key_down(key: Key, modifiers: Modifiers) -> KeyboardEvent {
    KeyboardEvent {
        state: KeyState::Down,
        key,
        code: Code::Unidentified,
        location: Location::Standard,
        modifiers,
        repeat: false,
        is_composing: false,
    }
}

#[test]
fn clearing_an_empty_selection_notifies_nobody() {
    let (mut region, _, _) = two_paragraphs();
    let counter = Arc::new(ChangeCounter::default());
    region.add_observer(counter.clone());

    region.clear().unwrap();
    assert_eq!(counter.content_changes.get(), 0);
    assert_eq!(counter.geometry_changes.get(), 0);

    region.select_word_at(Point::new(42.0, 8.0)).unwrap();
    let after_select = counter.content_changes.get();
    assert!(after_select > 0);

    region.clear().unwrap();
    let after_clear = counter.content_changes.get();
    assert_eq!(after_clear, after_select + 1);

    // A second clear changes nothing and says nothing.
    region.clear().unwrap();
    assert_eq!(counter.content_changes.get(), after_clear);
}

#[test]
fn cancelling_a_drag_restores_the_exact_prior_state() {
    let (mut region, u1, _) = two_paragraphs();
    region.select_word_at(Point::new(42.0, 8.0)).unwrap();
    assert_eq!(unit_range(&region, u1), Some(SelectionRange::new(4, 7)));

    region.begin_handle_drag(marquee_region::SelectionEdge::End);
    region.drag_handle_to(Point::new(80.0, 24.0)).unwrap();
    assert_ne!(unit_range(&region, u1), Some(SelectionRange::new(4, 7)));

    region.cancel_interaction();
    assert_eq!(unit_range(&region, u1), Some(SelectionRange::new(4, 7)));
    assert_eq!(region.selected_content().unwrap().plain_text, "are");
}

#[test]
fn cancelling_a_fresh_pointer_interaction_revives_the_old_selection() {
    let (mut region, u1, u2) = two_paragraphs();
    region.select_word_at(Point::new(42.0, 8.0)).unwrap();

    // A fresh pointer-down wipes the word selection; the point sits in the
    // second paragraph, so the first clamps past its end.
    region.pointer_down(Point::new(16.0, 24.0)).unwrap();
    assert_eq!(unit_range(&region, u1), Some(SelectionRange::collapsed(12)));
    assert!(unit_range(&region, u2).is_some());

    // ...but cancelling the gesture brings it back untouched.
    region.pointer_cancel();
    assert_eq!(unit_range(&region, u1), Some(SelectionRange::new(4, 7)));
    assert_eq!(unit_range(&region, u2), None);
    assert_eq!(region.selected_content().unwrap().plain_text, "are");
}

#[test]
fn selection_hit_query_matches_the_selected_span_only() {
    let (mut region, _, _) = two_paragraphs();
    region.select_word_at(Point::new(42.0, 8.0)).unwrap();

    assert!(region.has_selection_at(Point::new(44.0, 8.0)));
    assert!(!region.has_selection_at(Point::new(80.0, 8.0)));
    assert!(!region.has_selection_at(Point::new(44.0, 24.0)));
    assert!(!region.has_selection_at(Point::new(44.0, 300.0)));
}

#[test]
fn menu_policy_queries_track_the_session() {
    let (mut region, _, _) = two_paragraphs();
    assert!(!region.can_copy());
    assert!(!region.is_all_selected());

    region.select_word_at(Point::new(42.0, 8.0)).unwrap();
    assert!(region.can_copy());
    assert!(!region.is_all_selected());

    region.select_all().unwrap();
    assert!(region.can_copy());
    assert!(region.is_all_selected());
}

#[test]
fn copy_writes_the_merged_text_to_the_clipboard() {
    let platform = Arc::new(RecordingPlatform::default());
    let mut region = SelectionRegion::new(RegionConfig {
        platform: Some(platform.clone()),
    });
    paragraph(&mut region, "How are you?", 0.0);

    assert!(!region.copy_selection(), "nothing to copy yet");
    assert_eq!(*platform.clipboard.borrow(), None);

    region.select_word_at(Point::new(42.0, 8.0)).unwrap();
    assert!(region.copy_selection());
    assert_eq!(platform.clipboard.borrow().as_deref(), Some("are"));
}

#[test]
fn keyboard_commands_drive_the_selection() {
    let platform = Arc::new(RecordingPlatform::default());
    let mut region = SelectionRegion::new(RegionConfig {
        platform: Some(platform.clone()),
    });
    let unit = paragraph(&mut region, "How are you?", 0.0);

    let select_all = key_down(Key::Character("a".into()), Modifiers::CONTROL);
    assert!(region.handle_key_event(&select_all).unwrap());
    assert_eq!(unit_range(&region, unit), Some(SelectionRange::new(0, 12)));

    let copy = key_down(Key::Character("c".into()), Modifiers::CONTROL);
    assert!(region.handle_key_event(&copy).unwrap());
    assert_eq!(platform.clipboard.borrow().as_deref(), Some("How are you?"));

    let escape = key_down(Key::Named(NamedKey::Escape), Modifiers::empty());
    assert!(region.handle_key_event(&escape).unwrap());
    assert_eq!(region.selected_content(), None);

    // Key releases and unmapped keys are ignored.
    let mut release = key_down(Key::Character("a".into()), Modifiers::CONTROL);
    release.state = KeyState::Up;
    assert!(!region.handle_key_event(&release).unwrap());
}

#[test]
fn out_of_range_offsets_are_rejected_before_any_mutation() {
    let (mut region, u1, _) = two_paragraphs();
    region.select_word_at(Point::new(42.0, 8.0)).unwrap();

    let result = region.set_unit_range(u1, Some(SelectionRange::new(0, 99)));
    assert!(matches!(
        result,
        Err(SelectionError::OffsetOutOfRange { offset: 99, len: 12 })
    ));
    // The failed update left the unit untouched.
    assert_eq!(unit_range(&region, u1), Some(SelectionRange::new(4, 7)));
}

#[test]
fn pending_layout_reports_unknown_geometry_not_an_empty_one() {
    let mut region = SelectionRegion::new(RegionConfig::default());
    let root = region.root_id();
    let pending = PlainTextLayout::new("How are you?", Point::new(0.0, 0.0)).pending();
    let unit = region
        .register_text_unit(root, Arc::new(pending))
        .unwrap();

    // Empty selection: the shape is known and empty.
    let empty = region.geometry().unwrap();
    assert_eq!(empty.status, SelectionStatus::None);

    // A range on a unit that has not been measured: the shape is unknown,
    // which is different from empty.
    region
        .set_unit_range(unit, Some(SelectionRange::new(0, 4)))
        .unwrap();
    assert_eq!(region.geometry(), None);

    // The next layout tick makes it known.
    region
        .update_text_layout(
            unit,
            Arc::new(PlainTextLayout::new("How are you?", Point::new(0.0, 0.0))),
        )
        .unwrap();
    let ready = region.geometry().expect("measured now");
    assert_eq!(ready.status, SelectionStatus::Uncollapsed);
}
