//! Binding tables: logical actions bound to key sequences, with the short and
//! full help projections used by [`HelpView`](crate::help::HelpView).
//!
//! A table is assembled once with a [`TableBuilder`], which rejects any
//! configuration in which two enabled bindings share a key. After
//! [`build`](TableBuilder::build) the member set and help grouping are fixed;
//! only the enabled flag of individual bindings may change.
//!
//! ```
//! use catalog_widgets::keymap::{Action, Binding, BindingTable, ShortHelpSource};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Act { Choose, Help }
//!
//! impl Action for Act {
//!     fn is_help(self) -> bool { matches!(self, Act::Help) }
//! }
//!
//! let table = BindingTable::builder()
//!     .register(Binding::new(Act::Choose).with_keys(["enter"]).with_help("enter", "choose").in_short_help())?
//!     .register(Binding::new(Act::Help).with_keys(["?"]).with_help("?", "toggle help").in_short_help())?
//!     .group([Act::Choose, Act::Help])?
//!     .build();
//!
//! assert_eq!(table.short_help().count(), 2);
//! # Ok::<(), catalog_widgets::ConfigError>(())
//! ```

use std::fmt;

use crate::error::{action_name, ConfigError, KeymapError, NotFoundError};
use crate::key::canonicalize;

/// A logical action a binding can trigger.
///
/// Screens define one `Copy` enum per binding table. The only action the
/// help machinery needs to recognise is the one that toggles the help view.
pub trait Action: Copy + Eq + fmt::Debug + Send + 'static {
    /// Whether this action toggles the help view.
    fn is_help(self) -> bool {
        false
    }
}

/// A logical action bound to one or more keys, with optional help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding<A> {
    action: A,
    keys: Vec<String>,
    help_key: String,
    help_desc: String,
    enabled: bool,
    short: bool,
}

impl<A: Action> Binding<A> {
    /// Create an enabled binding with no keys and no help text.
    pub fn new(action: A) -> Self {
        Self {
            action,
            keys: Vec::new(),
            help_key: String::new(),
            help_desc: String::new(),
            enabled: true,
            short: false,
        }
    }

    /// Add trigger keys. Keys are canonicalized and duplicates dropped,
    /// keeping first-seen order.
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            let key = canonicalize(key.as_ref());
            if !self.keys.contains(&key) {
                self.keys.push(key);
            }
        }
        self
    }

    /// Set the key label and description shown in help.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help_key = key.into();
        self.help_desc = desc.into();
        self
    }

    /// Include this binding in the short help line.
    pub fn in_short_help(mut self) -> Self {
        self.short = true;
        self
    }

    /// Set whether this binding starts enabled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Start disabled. Shorthand for `enabled(false)`.
    pub fn disabled(self) -> Self {
        self.enabled(false)
    }

    /// The action this binding triggers.
    pub fn action(&self) -> A {
        self.action
    }

    /// The canonical trigger keys, in configuration order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Key label shown in help.
    pub fn help_key(&self) -> &str {
        &self.help_key
    }

    /// Description shown in help.
    pub fn help_desc(&self) -> &str {
        &self.help_desc
    }

    /// Whether the binding has any text to show in help.
    pub fn has_help(&self) -> bool {
        !self.help_key.is_empty() || !self.help_desc.is_empty()
    }

    /// Whether the binding takes part in matching and help.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the binding is flagged for the short help line.
    pub fn is_short(&self) -> bool {
        self.short
    }

    /// Flip the enabled flag in place. Tables go through
    /// [`BindingTable::set_enabled`], which validates first.
    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Return whether `key` (canonical) triggers this binding.
    /// Always `false` when the binding is disabled.
    pub fn matches(&self, key: &str) -> bool {
        self.enabled && self.keys.iter().any(|k| k == key)
    }

    /// Re-target the binding at another action type, keeping keys, help text
    /// and flags. Used to merge a reusable binding set into a screen table.
    pub fn map_action<B: Action>(self, f: impl FnOnce(A) -> B) -> Binding<B> {
        Binding {
            action: f(self.action),
            keys: self.keys,
            help_key: self.help_key,
            help_desc: self.help_desc,
            enabled: self.enabled,
            short: self.short,
        }
    }
}

/// Projection used for the single-line help hint.
pub trait ShortHelpSource<A: Action> {
    /// Enabled bindings flagged for short help, in table order.
    fn short_help(&self) -> impl Iterator<Item = &Binding<A>>;
}

/// Projection used for the multi-column help legend.
pub trait FullHelpSource<A: Action> {
    /// One column per help group, each restricted to enabled bindings.
    fn full_help(&self) -> Vec<Vec<&Binding<A>>>;
}

/// Anything a key can be matched against.
pub trait Matchable<A: Action> {
    /// Bindings eligible for matching, in priority order.
    fn candidates(&self) -> impl Iterator<Item = &Binding<A>>;
}

/// Incrementally assembles a [`BindingTable`], validating as it goes.
#[derive(Debug, Clone)]
pub struct TableBuilder<A> {
    bindings: Vec<Binding<A>>,
    groups: Vec<Vec<A>>,
}

impl<A: Action> Default for TableBuilder<A> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
            groups: Vec::new(),
        }
    }
}

impl<A: Action> TableBuilder<A> {
    /// Append a binding.
    ///
    /// Fails if the action is already registered, if the binding is enabled
    /// without keys, or if one of its keys is claimed by another enabled
    /// binding.
    pub fn register(mut self, binding: Binding<A>) -> Result<Self, ConfigError> {
        if self.bindings.iter().any(|b| b.action == binding.action) {
            return Err(ConfigError::DuplicateAction {
                action: action_name(binding.action),
            });
        }
        if binding.enabled {
            check_enable(&self.bindings, &binding)?;
        }
        self.bindings.push(binding);
        Ok(self)
    }

    /// Register bindings of another action type, mapped into this table's
    /// action type. The merged result is held to the same invariants as
    /// bindings registered directly.
    pub fn include<B, I>(mut self, bindings: I, map: impl Fn(B) -> A) -> Result<Self, ConfigError>
    where
        B: Action,
        I: IntoIterator<Item = Binding<B>>,
    {
        for binding in bindings {
            self = self.register(binding.map_action(&map))?;
        }
        Ok(self)
    }

    /// Append a full-help column. Every member must already be registered
    /// and belong to no other column.
    pub fn group(mut self, actions: impl IntoIterator<Item = A>) -> Result<Self, ConfigError> {
        let mut column = Vec::new();
        for action in actions {
            if !self.bindings.iter().any(|b| b.action == action) {
                return Err(ConfigError::UnknownGroupMember {
                    action: action_name(action),
                });
            }
            if column.contains(&action) || self.groups.iter().any(|g| g.contains(&action)) {
                return Err(ConfigError::DuplicateGroupMember {
                    action: action_name(action),
                });
            }
            column.push(action);
        }
        self.groups.push(column);
        Ok(self)
    }

    /// Freeze the member set and help grouping.
    pub fn build(self) -> BindingTable<A> {
        BindingTable {
            bindings: self.bindings,
            groups: self.groups,
        }
    }
}

/// The bindings active for one screen plus their help grouping.
#[derive(Debug, Clone)]
pub struct BindingTable<A> {
    bindings: Vec<Binding<A>>,
    groups: Vec<Vec<A>>,
}

impl<A: Action> BindingTable<A> {
    /// Start an empty [`TableBuilder`].
    pub fn builder() -> TableBuilder<A> {
        TableBuilder::default()
    }

    /// The binding for `action`, enabled or not.
    pub fn get(&self, action: A) -> Option<&Binding<A>> {
        self.bindings.iter().find(|b| b.action == action)
    }

    /// `false` for disabled and for unknown actions.
    pub fn is_enabled(&self, action: A) -> bool {
        self.get(action).is_some_and(Binding::is_enabled)
    }

    /// Enable or disable a binding.
    ///
    /// Disabling removes it from both help projections and from matching.
    /// Re-enabling is refused if another enabled binding has since claimed
    /// one of its keys. Setting the current state again is a no-op.
    pub fn set_enabled(&mut self, action: A, enabled: bool) -> Result<(), KeymapError> {
        let index = self
            .bindings
            .iter()
            .position(|b| b.action == action)
            .ok_or_else(|| NotFoundError {
                action: action_name(action),
            })?;

        if self.bindings[index].enabled == enabled {
            return Ok(());
        }
        if enabled {
            check_enable(&self.bindings, &self.bindings[index])?;
        }

        self.bindings[index].enabled = enabled;
        tracing::debug!(action = ?action, enabled, "binding toggled");
        Ok(())
    }

    /// All bindings in insertion order, enabled or not.
    pub fn iter(&self) -> impl Iterator<Item = &Binding<A>> {
        self.bindings.iter()
    }

    /// Enabled bindings in insertion order.
    pub fn enabled(&self) -> impl Iterator<Item = &Binding<A>> {
        self.bindings.iter().filter(|b| b.enabled)
    }

    /// The configured help columns (actions, regardless of enabled state).
    pub fn groups(&self) -> &[Vec<A>] {
        &self.groups
    }

    /// Number of bindings, enabled or not.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table has no bindings at all.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<A: Action> ShortHelpSource<A> for BindingTable<A> {
    fn short_help(&self) -> impl Iterator<Item = &Binding<A>> {
        self.bindings.iter().filter(|b| b.enabled && b.short)
    }
}

impl<A: Action> FullHelpSource<A> for BindingTable<A> {
    fn full_help(&self) -> Vec<Vec<&Binding<A>>> {
        self.groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .filter_map(|&action| self.get(action))
                    .filter(|b| b.enabled)
                    .collect()
            })
            .collect()
    }
}

impl<A: Action> Matchable<A> for BindingTable<A> {
    fn candidates(&self) -> impl Iterator<Item = &Binding<A>> {
        self.enabled()
    }
}

/// Validate that `candidate` may be enabled alongside `bindings`.
fn check_enable<A: Action>(bindings: &[Binding<A>], candidate: &Binding<A>) -> Result<(), ConfigError> {
    if candidate.keys.is_empty() {
        return Err(ConfigError::NoKeys {
            action: action_name(candidate.action),
        });
    }
    for existing in bindings
        .iter()
        .filter(|b| b.enabled && b.action != candidate.action)
    {
        if let Some(key) = candidate.keys.iter().find(|k| existing.keys.contains(k)) {
            return Err(ConfigError::Conflict {
                key: key.clone(),
                existing: action_name(existing.action),
                incoming: action_name(candidate.action),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Act {
        Choose,
        Scaffold,
        Help,
        Quit,
        ForceQuit,
        HalfPageUp,
    }

    impl Action for Act {
        fn is_help(self) -> bool {
            matches!(self, Act::Help)
        }
    }

    fn table() -> BindingTable<Act> {
        BindingTable::builder()
            .register(
                Binding::new(Act::Choose)
                    .with_keys(["enter", "ctrl-j"])
                    .with_help("enter/ctrl-j", "choose")
                    .in_short_help(),
            )
            .and_then(|b| {
                b.register(
                    Binding::new(Act::Scaffold)
                        .with_keys(["S", "s"])
                        .with_help("S", "Scaffold")
                        .in_short_help(),
                )
            })
            .and_then(|b| {
                b.register(
                    Binding::new(Act::Help)
                        .with_keys(["?"])
                        .with_help("?", "toggle help")
                        .in_short_help(),
                )
            })
            .and_then(|b| b.register(Binding::new(Act::Quit).with_keys(["q", "esc"]).with_help("q", "quit")))
            .and_then(|b| b.register(Binding::new(Act::ForceQuit).with_keys(["ctrl+c"])))
            .and_then(|b| b.register(Binding::new(Act::HalfPageUp).disabled()))
            .and_then(|b| b.group([Act::Choose, Act::Scaffold]))
            .and_then(|b| b.group([Act::Help, Act::Quit, Act::ForceQuit]))
            .map(TableBuilder::build)
            .unwrap()
    }

    fn actions<'a>(bindings: impl IntoIterator<Item = &'a Binding<Act>>) -> Vec<Act> {
        bindings.into_iter().map(Binding::action).collect()
    }

    #[test]
    fn keys_are_canonical_and_deduplicated() {
        let b = Binding::new(Act::Choose).with_keys(["enter", "ctrl-j", "ctrl+j", "enter"]);
        assert_eq!(b.keys(), ["enter", "ctrl+j"]);
    }

    #[test]
    fn case_variants_are_distinct_keys() {
        let b = Binding::new(Act::Scaffold).with_keys(["S", "s"]);
        assert_eq!(b.keys().len(), 2);
        assert!(b.matches("S"));
        assert!(b.matches("s"));
    }

    #[test]
    fn disabled_binding_never_matches() {
        let b = Binding::new(Act::Quit).with_keys(["q"]).disabled();
        assert!(!b.matches("q"));
    }

    #[test]
    fn conflicting_keys_are_rejected() {
        let err = BindingTable::builder()
            .register(Binding::new(Act::Quit).with_keys(["q", "esc"]))
            .and_then(|b| b.register(Binding::new(Act::ForceQuit).with_keys(["ctrl+c", "esc"])))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Conflict {
                key: "esc".into(),
                existing: "Quit".into(),
                incoming: "ForceQuit".into(),
            }
        );
    }

    #[test]
    fn disabled_bindings_may_share_keys() {
        let result = BindingTable::builder()
            .register(Binding::new(Act::Quit).with_keys(["q"]))
            .and_then(|b| b.register(Binding::new(Act::ForceQuit).with_keys(["q"]).disabled()));
        assert!(result.is_ok());
    }

    #[test]
    fn duplicate_action_is_rejected() {
        let err = BindingTable::builder()
            .register(Binding::new(Act::Quit).with_keys(["q"]))
            .and_then(|b| b.register(Binding::new(Act::Quit).with_keys(["x"])))
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAction { .. }));
    }

    #[test]
    fn enabled_binding_needs_keys() {
        let err = BindingTable::builder()
            .register(Binding::new(Act::Quit))
            .unwrap_err();
        assert_eq!(err, ConfigError::NoKeys { action: "Quit".into() });
    }

    #[test]
    fn groups_must_reference_registered_actions_once() {
        let builder = BindingTable::builder()
            .register(Binding::new(Act::Quit).with_keys(["q"]))
            .unwrap();
        assert!(matches!(
            builder.clone().group([Act::Help]),
            Err(ConfigError::UnknownGroupMember { .. })
        ));
        assert!(matches!(
            builder.clone().group([Act::Quit, Act::Quit]),
            Err(ConfigError::DuplicateGroupMember { .. })
        ));
        let err = builder
            .group([Act::Quit])
            .and_then(|b| b.group([Act::Quit]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateGroupMember { .. }));
    }

    #[test]
    fn short_help_is_enabled_flagged_bindings_in_order() {
        let t = table();
        assert_eq!(
            actions(t.short_help()),
            vec![Act::Choose, Act::Scaffold, Act::Help]
        );
    }

    #[test]
    fn full_help_follows_groups() {
        let t = table();
        let full: Vec<Vec<Act>> = t.full_help().into_iter().map(actions).collect();
        assert_eq!(
            full,
            vec![
                vec![Act::Choose, Act::Scaffold],
                vec![Act::Help, Act::Quit, Act::ForceQuit],
            ]
        );
    }

    #[test]
    fn set_enabled_unknown_action_is_not_found() {
        let mut t = BindingTable::builder()
            .register(Binding::new(Act::Quit).with_keys(["q"]))
            .map(TableBuilder::build)
            .unwrap();
        assert_eq!(
            t.set_enabled(Act::Help, false),
            Err(KeymapError::NotFound(NotFoundError {
                action: "Help".into()
            }))
        );
    }

    #[test]
    fn disabling_hides_from_help_and_matching() {
        let mut t = table();
        t.set_enabled(Act::Scaffold, false).unwrap();

        assert!(!t.is_enabled(Act::Scaffold));
        assert!(!actions(t.short_help()).contains(&Act::Scaffold));
        assert!(t.full_help().iter().flatten().all(|b| b.action() != Act::Scaffold));
        assert!(t.candidates().all(|b| b.action() != Act::Scaffold));

        t.set_enabled(Act::Scaffold, true).unwrap();
        assert!(actions(t.short_help()).contains(&Act::Scaffold));
        assert!(t.candidates().any(|b| b.action() == Act::Scaffold));
    }

    #[test]
    fn set_enabled_same_state_is_noop() {
        let mut t = table();
        assert_eq!(t.set_enabled(Act::Quit, true), Ok(()));
        assert_eq!(t.set_enabled(Act::HalfPageUp, false), Ok(()));
    }

    #[test]
    fn enabling_a_keyless_binding_fails() {
        let mut t = table();
        assert_eq!(
            t.set_enabled(Act::HalfPageUp, true),
            Err(KeymapError::Config(ConfigError::NoKeys {
                action: "HalfPageUp".into()
            }))
        );
        assert!(!t.is_enabled(Act::HalfPageUp));
    }

    #[test]
    fn re_enabling_into_a_conflict_fails() {
        let mut t = BindingTable::builder()
            .register(Binding::new(Act::Quit).with_keys(["q"]))
            .and_then(|b| b.register(Binding::new(Act::ForceQuit).with_keys(["q"]).disabled()))
            .map(TableBuilder::build)
            .unwrap();
        assert!(matches!(
            t.set_enabled(Act::ForceQuit, true),
            Err(KeymapError::Config(ConfigError::Conflict { .. }))
        ));

        t.set_enabled(Act::Quit, false).unwrap();
        t.set_enabled(Act::ForceQuit, true).unwrap();
        assert!(t.is_enabled(Act::ForceQuit));
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Scroll {
        Up,
        Down,
    }

    impl Action for Scroll {}

    #[test]
    fn include_maps_and_validates_merged_bindings() {
        let scroll = vec![
            Binding::new(Scroll::Up).with_keys(["up", "k"]),
            Binding::new(Scroll::Down).with_keys(["down", "j"]),
        ];
        let map = |s: Scroll| match s {
            Scroll::Up => Act::Choose,
            Scroll::Down => Act::Quit,
        };

        let t = BindingTable::builder()
            .include(scroll.clone(), map)
            .map(TableBuilder::build)
            .unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(Act::Choose).map(Binding::keys), Some(&["up".to_string(), "k".to_string()][..]));

        let err = BindingTable::builder()
            .register(Binding::new(Act::Help).with_keys(["k"]))
            .and_then(|b| b.include(scroll, map))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Conflict { .. }));
    }
}
