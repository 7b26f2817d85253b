use crossterm::event::{KeyEvent, KeyEventKind};

/// Terminal events delivered to [`Model::on_event`](crate::Model::on_event).
///
/// Mouse reporting is never enabled by the runtime, so mouse events are
/// dropped before they reach the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// The key event, if this is a key press or repeat. Key releases are
    /// reported by some terminals and never trigger bindings.
    pub fn key_press(&self) -> Option<&KeyEvent> {
        match self {
            TerminalEvent::Key(key) if key.kind != KeyEventKind::Release => Some(key),
            _ => None,
        }
    }
}

impl TryFrom<crossterm::event::Event> for TerminalEvent {
    type Error = crossterm::event::Event;

    fn try_from(event: crossterm::event::Event) -> Result<Self, Self::Error> {
        match event {
            crossterm::event::Event::Key(k) => Ok(TerminalEvent::Key(k)),
            crossterm::event::Event::Resize(w, h) => Ok(TerminalEvent::Resize(w, h)),
            crossterm::event::Event::FocusGained => Ok(TerminalEvent::FocusGained),
            crossterm::event::Event::FocusLost => Ok(TerminalEvent::FocusLost),
            crossterm::event::Event::Paste(s) => Ok(TerminalEvent::Paste(s)),
            other => Err(other),
        }
    }
}
