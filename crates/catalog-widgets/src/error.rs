//! Errors raised while building or reconfiguring a binding table.

/// A binding table that would be ambiguous or inconsistent.
///
/// These are programmer errors caught when a screen builds its table; a
/// screen whose table fails to build is never shown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Two enabled bindings share a key.
    #[error("key {key:?} is bound to both {existing} and {incoming}")]
    Conflict {
        /// The canonical key both bindings claim.
        key: String,
        /// The binding already in the table.
        existing: String,
        /// The binding being registered or re-enabled.
        incoming: String,
    },
    /// The same action was registered twice.
    #[error("{action} is registered more than once")]
    DuplicateAction { action: String },
    /// An enabled binding without any key could never match.
    #[error("{action} is enabled but has no keys")]
    NoKeys { action: String },
    /// A help group names an action that is not in the table.
    #[error("help group references unregistered binding {action}")]
    UnknownGroupMember { action: String },
    /// An action appears in more than one help group.
    #[error("{action} appears in more than one help group")]
    DuplicateGroupMember { action: String },
}

/// An operation named an action the table does not contain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no binding registered for {action}")]
pub struct NotFoundError {
    pub action: String,
}

/// Errors from reconfiguring a built table at runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeymapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

pub(crate) fn action_name<A: std::fmt::Debug>(action: A) -> String {
    format!("{action:?}")
}
