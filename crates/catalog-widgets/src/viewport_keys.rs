//! The standard scrolling bindings for anything that behaves like a viewport.
//!
//! Screens that embed a [`Viewport`](crate::viewport::Viewport) take a
//! [`ViewportKeys`], adjust the keys they want to differ from the defaults,
//! and merge the result into their own table with
//! [`TableBuilder::include`](crate::keymap::TableBuilder::include).

use crate::error::ConfigError;
use crate::keymap::{Action, Binding, BindingTable, TableBuilder};

/// Logical scrolling actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportAction {
    Up,
    Down,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
}

impl Action for ViewportAction {}

/// One binding per [`ViewportAction`].
///
/// The defaults are the classic pager keys:
///
/// | Action | Keys | Help |
/// |--------|------|------|
/// | `PageDown` | `pgdown`, `space`, `f` | `f/pgdn` page down |
/// | `PageUp` | `pgup`, `b` | `b/pgup` page up |
/// | `HalfPageUp` | `u`, `ctrl+u` | `u` ½ page up |
/// | `HalfPageDown` | `d`, `ctrl+d` | `d` ½ page down |
/// | `Up` | `up`, `k` | `↑/k` up |
/// | `Down` | `down`, `j` | `↓/j` down |
#[derive(Debug, Clone)]
pub struct ViewportKeys {
    pub page_down: Binding<ViewportAction>,
    pub page_up: Binding<ViewportAction>,
    pub half_page_up: Binding<ViewportAction>,
    pub half_page_down: Binding<ViewportAction>,
    pub up: Binding<ViewportAction>,
    pub down: Binding<ViewportAction>,
}

impl Default for ViewportKeys {
    fn default() -> Self {
        Self {
            page_down: Binding::new(ViewportAction::PageDown)
                .with_keys(["pgdown", "space", "f"])
                .with_help("f/pgdn", "page down"),
            page_up: Binding::new(ViewportAction::PageUp)
                .with_keys(["pgup", "b"])
                .with_help("b/pgup", "page up"),
            half_page_up: Binding::new(ViewportAction::HalfPageUp)
                .with_keys(["u", "ctrl+u"])
                .with_help("u", "\u{bd} page up"),
            half_page_down: Binding::new(ViewportAction::HalfPageDown)
                .with_keys(["d", "ctrl+d"])
                .with_help("d", "\u{bd} page down"),
            up: Binding::new(ViewportAction::Up)
                .with_keys(["up", "k"])
                .with_help("\u{2191}/k", "up"),
            down: Binding::new(ViewportAction::Down)
                .with_keys(["down", "j"])
                .with_help("\u{2193}/j", "down"),
        }
    }
}

impl ViewportKeys {
    /// The bindings in display order: line movement first, then paging.
    pub fn into_bindings(self) -> [Binding<ViewportAction>; 6] {
        [
            self.up,
            self.down,
            self.page_down,
            self.page_up,
            self.half_page_up,
            self.half_page_down,
        ]
    }

    /// The binding for `action`.
    pub fn get(&self, action: ViewportAction) -> &Binding<ViewportAction> {
        match action {
            ViewportAction::Up => &self.up,
            ViewportAction::Down => &self.down,
            ViewportAction::PageUp => &self.page_up,
            ViewportAction::PageDown => &self.page_down,
            ViewportAction::HalfPageUp => &self.half_page_up,
            ViewportAction::HalfPageDown => &self.half_page_down,
        }
    }

    pub(crate) fn get_mut(&mut self, action: ViewportAction) -> &mut Binding<ViewportAction> {
        match action {
            ViewportAction::Up => &mut self.up,
            ViewportAction::Down => &mut self.down,
            ViewportAction::PageUp => &mut self.page_up,
            ViewportAction::PageDown => &mut self.page_down,
            ViewportAction::HalfPageUp => &mut self.half_page_up,
            ViewportAction::HalfPageDown => &mut self.half_page_down,
        }
    }

    /// A standalone table holding only these bindings, grouped as one help
    /// column.
    pub fn into_table(self) -> Result<BindingTable<ViewportAction>, ConfigError> {
        let bindings = self.into_bindings();
        let order: Vec<ViewportAction> = bindings.iter().map(Binding::action).collect();
        bindings
            .into_iter()
            .try_fold(TableBuilder::default(), TableBuilder::register)?
            .group(order)
            .map(TableBuilder::build)
    }
}
