//! Keybinding tables, key dispatch and contextual help for the catalog
//! screens, plus the widgets those screens embed.
//!
//! # Keybindings
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`key`] | Canonical key names for crossterm events and configured triggers |
//! | [`keymap`] | [`Binding`], [`BindingTable`] and the validating [`TableBuilder`] |
//! | [`dispatch`] | [`Dispatcher`]: key to logical action |
//! | [`help`] | [`HelpView`]: short and full help projected from a table |
//! | [`viewport_keys`] | Reusable scrolling bindings |
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`list`] | Filterable selection list |
//! | [`viewport`] | Scrollable text area |
//! | [`buttons`] | Row of focusable buttons |

pub mod buttons;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod key;
pub mod keymap;
pub mod list;
pub mod viewport;
pub mod viewport_keys;

pub use dispatch::Dispatcher;
pub use error::{ConfigError, KeymapError, NotFoundError};
pub use help::{HelpStyle, HelpView};
pub use keymap::{
    Action, Binding, BindingTable, FullHelpSource, Matchable, ShortHelpSource, TableBuilder,
};
pub use viewport_keys::{ViewportAction, ViewportKeys};
