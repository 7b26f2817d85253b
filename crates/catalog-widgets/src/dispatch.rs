//! Resolve key presses to logical actions.

use crossterm::event::KeyEvent;

use crate::key::key_name;
use crate::keymap::{Action, Matchable};

/// Matches keys against a [`Matchable`] table.
///
/// Dispatch is stateless: the result depends only on the table and the key.
/// The first enabled binding (in table order) whose keys contain the key
/// wins; tables built through [`TableBuilder`](crate::keymap::TableBuilder)
/// never have two candidates for the same key.
pub struct Dispatcher;

impl Dispatcher {
    /// Match a canonical key name. `None` means no binding claims the key and
    /// the caller should fall through to its widget's default handling.
    pub fn dispatch<A, T>(table: &T, key: &str) -> Option<A>
    where
        A: Action,
        T: Matchable<A>,
    {
        let matched = table
            .candidates()
            .find(|binding| binding.matches(key))
            .map(|binding| binding.action());
        tracing::trace!(key, action = ?matched, "dispatch");
        matched
    }

    /// Normalize a key event and match it. Releases never match.
    pub fn dispatch_event<A, T>(table: &T, event: &KeyEvent) -> Option<A>
    where
        A: Action,
        T: Matchable<A>,
    {
        let key = key_name(event)?;
        Self::dispatch(table, &key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{Binding, BindingTable, TableBuilder};
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Act {
        Choose,
        Scaffold,
        Help,
        ForceQuit,
    }

    impl Action for Act {
        fn is_help(self) -> bool {
            matches!(self, Act::Help)
        }
    }

    fn table() -> BindingTable<Act> {
        BindingTable::builder()
            .register(Binding::new(Act::Choose).with_keys(["enter", "ctrl-j"]))
            .and_then(|b| b.register(Binding::new(Act::Scaffold).with_keys(["S", "s"])))
            .and_then(|b| b.register(Binding::new(Act::Help).with_keys(["?"])))
            .and_then(|b| b.register(Binding::new(Act::ForceQuit).with_keys(["ctrl+c"])))
            .map(TableBuilder::build)
            .unwrap()
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn every_key_of_every_binding_matches_it() {
        let t = table();
        for binding in t.iter() {
            for key in binding.keys() {
                assert_eq!(Dispatcher::dispatch(&t, key), Some(binding.action()), "{key}");
            }
        }
    }

    #[test]
    fn unbound_key_matches_nothing() {
        let t = table();
        assert_eq!(Dispatcher::dispatch(&t, "x"), None);
        assert_eq!(Dispatcher::dispatch(&t, "ctrl+s"), None);
    }

    #[test]
    fn case_is_not_folded() {
        let t = BindingTable::builder()
            .register(Binding::new(Act::Scaffold).with_keys(["S"]))
            .map(TableBuilder::build)
            .unwrap();
        assert_eq!(Dispatcher::dispatch(&t, "S"), Some(Act::Scaffold));
        assert_eq!(Dispatcher::dispatch(&t, "s"), None);
    }

    #[test]
    fn disabled_binding_falls_through() {
        let mut t = table();
        t.set_enabled(Act::Scaffold, false).unwrap();
        assert_eq!(Dispatcher::dispatch(&t, "s"), None);
        t.set_enabled(Act::Scaffold, true).unwrap();
        assert_eq!(Dispatcher::dispatch(&t, "s"), Some(Act::Scaffold));
    }

    #[test]
    fn events_are_normalized() {
        let t = table();
        assert_eq!(
            Dispatcher::dispatch_event(&t, &press(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(Act::Choose)
        );
        assert_eq!(
            Dispatcher::dispatch_event(&t, &press(KeyCode::Char('S'), KeyModifiers::SHIFT)),
            Some(Act::Scaffold)
        );
        assert_eq!(
            Dispatcher::dispatch_event(&t, &press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Act::ForceQuit)
        );
    }

    #[test]
    fn releases_never_match() {
        let t = table();
        let mut release = press(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(Dispatcher::dispatch_event(&t, &release), None);
    }
}
