//! The list and page screens.
//!
//! A screen owns its binding table, a [`HelpView`](catalog_widgets::HelpView)
//! and the widgets it embeds. Every key goes through the table first;
//! whatever the table does not claim is forwarded to the widget.

pub mod list;
pub mod page;

use std::fmt;

use catalog_core::Command;
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout, Rect};

pub use list::{ListAction, ListScreen};
pub use page::{PageAction, PageButton, PageScreen};

/// Input to a screen.
#[derive(Debug, Clone)]
pub enum Message {
    Key(KeyEvent),
}

/// Widget notifications are informational for the screens; trace them and
/// move on.
pub(crate) fn absorb<T: fmt::Debug + Send + 'static>(widget: &str, cmd: Command<T>) {
    for event in cmd.into_messages() {
        tracing::trace!(widget, ?event, "widget event");
    }
}

/// Split `area` into a body and a help footer of `help_height` rows,
/// separated by one blank row.
pub(crate) fn with_help_footer(area: Rect, help_height: u16) -> (Rect, Rect) {
    let [body, _, help] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(help_height),
    ])
    .areas(area);
    (body, help)
}
