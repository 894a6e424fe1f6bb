use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
    First,
    Last,
    Commit,
    Dismiss,
}

/// Key bindings for the list navigation shared by both select widgets.
///
/// [`NavBindings::list`] is the plain-select set (Home/End jump to the
/// edges). The searchable widget reserves unmodified keys for its query
/// editor, so [`NavBindings::searchable`] moves the edge jumps to
/// Ctrl+Home/Ctrl+End.
#[derive(Clone, Debug)]
pub struct NavBindings {
    pub next: Vec<KeyEvent>,
    pub previous: Vec<KeyEvent>,
    pub first: Vec<KeyEvent>,
    pub last: Vec<KeyEvent>,
    pub commit: Vec<KeyEvent>,
    pub dismiss: Vec<KeyEvent>,
}

impl NavBindings {
    pub fn list() -> Self {
        Self {
            next: vec![KeyEvent::new(KeyCode::Down)],
            previous: vec![KeyEvent::new(KeyCode::Up)],
            first: vec![KeyEvent::new(KeyCode::Home)],
            last: vec![KeyEvent::new(KeyCode::End)],
            commit: vec![KeyEvent::new(KeyCode::Enter)],
            dismiss: vec![KeyEvent::new(KeyCode::Esc)],
        }
    }

    pub fn searchable() -> Self {
        Self {
            first: vec![key_ctrl(KeyCode::Home)],
            last: vec![key_ctrl(KeyCode::End)],
            ..Self::list()
        }
    }

    pub fn action_for(&self, key: &KeyEvent) -> Option<NavAction> {
        if self.next.iter().any(|p| key_event_matches(p, key)) {
            return Some(NavAction::Next);
        }
        if self.previous.iter().any(|p| key_event_matches(p, key)) {
            return Some(NavAction::Previous);
        }
        if self.first.iter().any(|p| key_event_matches(p, key)) {
            return Some(NavAction::First);
        }
        if self.last.iter().any(|p| key_event_matches(p, key)) {
            return Some(NavAction::Last);
        }
        if self.commit.iter().any(|p| key_event_matches(p, key)) {
            return Some(NavAction::Commit);
        }
        if self.dismiss.iter().any(|p| key_event_matches(p, key)) {
            return Some(NavAction::Dismiss);
        }
        None
    }
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && modifiers_match(pattern.modifiers, event.modifiers)
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers) -> bool {
    pattern.shift == event.shift && pattern.ctrl == event.ctrl && pattern.alt == event.alt
}

pub fn key_ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code).with_modifiers(KeyModifiers {
        shift: false,
        ctrl: true,
        alt: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_bindings_use_plain_edge_keys() {
        let b = NavBindings::list();
        assert_eq!(
            b.action_for(&KeyEvent::new(KeyCode::Home)),
            Some(NavAction::First)
        );
        assert_eq!(
            b.action_for(&KeyEvent::new(KeyCode::Down)),
            Some(NavAction::Next)
        );
        assert_eq!(b.action_for(&KeyEvent::new(KeyCode::Tab)), None);
    }

    #[test]
    fn searchable_bindings_need_ctrl_for_edges() {
        let b = NavBindings::searchable();
        assert_eq!(b.action_for(&KeyEvent::new(KeyCode::Home)), None);
        assert_eq!(
            b.action_for(&key_ctrl(KeyCode::Home)),
            Some(NavAction::First)
        );
        assert_eq!(
            b.action_for(&KeyEvent::new(KeyCode::Enter)),
            Some(NavAction::Commit)
        );
    }

    #[test]
    fn matching_is_exact_on_modifiers() {
        assert!(!key_event_matches(
            &key_ctrl(KeyCode::End),
            &KeyEvent::new(KeyCode::End)
        ));
    }
}
