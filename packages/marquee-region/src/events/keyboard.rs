//! Key command mapping.

use keyboard_types::{Key, KeyState, KeyboardEvent, Modifiers, NamedKey};
use marquee_traits::{
    Direction, Granularity, SelectionError, SelectionEvent, VerticalMotion,
};

use crate::region::SelectionRegion;

/// What a classified key command asks of the region.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyAction {
    Dispatch(SelectionEvent),
    Copy,
}

/// Map a key with its modifiers to a selection action.
///
/// Extension always requires shift; control or alt widens arrow steps to
/// words, and control (or the platform command key) carries the select-all,
/// copy and whole-document bindings.
pub fn action_for_key(key: &Key, modifiers: Modifiers) -> Option<KeyAction> {
    let shift = modifiers.contains(Modifiers::SHIFT);
    let word = modifiers.intersects(Modifiers::CONTROL | Modifiers::ALT);
    let command = modifiers.intersects(Modifiers::CONTROL | Modifiers::META);

    let granular = |granularity, direction| {
        Some(KeyAction::Dispatch(SelectionEvent::Extend {
            granularity,
            direction,
        }))
    };
    let vertical = |motion| {
        Some(KeyAction::Dispatch(SelectionEvent::ExtendVertically {
            motion,
            target_x: None,
        }))
    };

    match key {
        Key::Named(NamedKey::ArrowRight) if shift => granular(
            if word {
                Granularity::Word
            } else {
                Granularity::Character
            },
            Direction::Forward,
        ),
        Key::Named(NamedKey::ArrowLeft) if shift => granular(
            if word {
                Granularity::Word
            } else {
                Granularity::Character
            },
            Direction::Backward,
        ),
        Key::Named(NamedKey::ArrowDown) if shift => vertical(VerticalMotion::LineDown),
        Key::Named(NamedKey::ArrowUp) if shift => vertical(VerticalMotion::LineUp),
        Key::Named(NamedKey::End) if shift => granular(
            if command {
                Granularity::Document
            } else {
                Granularity::Line
            },
            Direction::Forward,
        ),
        Key::Named(NamedKey::Home) if shift => granular(
            if command {
                Granularity::Document
            } else {
                Granularity::Line
            },
            Direction::Backward,
        ),
        Key::Named(NamedKey::Escape) => Some(KeyAction::Dispatch(SelectionEvent::Clear)),
        Key::Character(c) if command => match c.to_lowercase().as_str() {
            "a" => Some(KeyAction::Dispatch(SelectionEvent::SelectAll)),
            "c" => Some(KeyAction::Copy),
            _ => None,
        },
        _ => None,
    }
}

/// Apply a key event to the region. Returns whether it was consumed.
pub(crate) fn handle_key_event(
    region: &mut SelectionRegion,
    event: &KeyboardEvent,
) -> Result<bool, SelectionError> {
    if event.state != KeyState::Down {
        return Ok(false);
    }
    match action_for_key(&event.key, event.modifiers) {
        Some(KeyAction::Dispatch(selection_event)) => {
            region.dispatch(selection_event)?;
            Ok(true)
        }
        Some(KeyAction::Copy) => Ok(region.copy_selection()),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_arrows_extend_by_character() {
        let action = action_for_key(&Key::Named(NamedKey::ArrowRight), Modifiers::SHIFT);
        assert_eq!(
            action,
            Some(KeyAction::Dispatch(SelectionEvent::Extend {
                granularity: Granularity::Character,
                direction: Direction::Forward,
            }))
        );
    }

    #[test]
    fn control_widens_to_words() {
        let action = action_for_key(
            &Key::Named(NamedKey::ArrowLeft),
            Modifiers::SHIFT | Modifiers::CONTROL,
        );
        assert_eq!(
            action,
            Some(KeyAction::Dispatch(SelectionEvent::Extend {
                granularity: Granularity::Word,
                direction: Direction::Backward,
            }))
        );
    }

    #[test]
    fn unshifted_arrows_are_not_selection_commands() {
        assert_eq!(
            action_for_key(&Key::Named(NamedKey::ArrowRight), Modifiers::empty()),
            None
        );
    }

    #[test]
    fn command_shortcuts() {
        assert_eq!(
            action_for_key(&Key::Character("a".into()), Modifiers::CONTROL),
            Some(KeyAction::Dispatch(SelectionEvent::SelectAll))
        );
        assert_eq!(
            action_for_key(&Key::Character("C".into()), Modifiers::META),
            Some(KeyAction::Copy)
        );
        assert_eq!(
            action_for_key(&Key::Character("a".into()), Modifiers::empty()),
            None
        );
    }
}
