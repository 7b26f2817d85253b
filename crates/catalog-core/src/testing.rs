use crate::command::{Action, Command, CommandInner};
use crate::event::TerminalEvent;
use crate::model::Model;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// `TestProgram` exercises the same event → update → command cycle as
/// [`Program`](crate::Program) in a plain `#[test]` function. Messages
/// produced by commands are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages); [`Command::quit`] is
/// recorded instead of ending anything.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_core::testing::{key, TestProgram};
/// use crossterm::event::KeyCode;
///
/// let mut prog = TestProgram::new(app);
/// prog.press(key(KeyCode::Enter));
/// assert!(prog.render_string(60, 10).contains("Scaffold"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    /// Wrap a model.
    pub fn new(model: M) -> Self {
        Self {
            model,
            pending_messages: Vec::new(),
            quit: false,
        }
    }

    /// Send a message, triggering a single update cycle.
    ///
    /// Messages produced by the returned command are enqueued; call
    /// [`drain_messages`](TestProgram::drain_messages) to flush them.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect_sync_messages(cmd);
    }

    /// Deliver a terminal event the way the runtime does: map it through
    /// [`Model::on_event`], update, and drain every resulting message.
    pub fn event(&mut self, event: TerminalEvent) {
        if let Some(msg) = self.model.on_event(event) {
            self.send(msg);
            self.drain_messages();
        }
    }

    /// Shorthand for [`event`](TestProgram::event) with a key press.
    pub fn press(&mut self, key: KeyEvent) {
        self.event(TerminalEvent::Key(key));
    }

    /// Process all pending messages until no new ones are generated.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                let cmd = self.model.update(msg);
                self.collect_sync_messages(cmd);
            }
        }
    }

    /// Whether any update so far returned [`Command::quit`].
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consume the harness and return the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                self.model.view(frame);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content as a plain string,
    /// one buffer row per line.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect_sync_messages(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                self.pending_messages.push(msg);
            }
            CommandInner::Action(Action::Quit) => {
                self.quit = true;
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect_sync_messages(cmd);
                }
            }
        }
    }
}

/// Flatten a buffer into text, rows separated by newlines.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area: Rect = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}

/// A key press without modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    key_with(code, KeyModifiers::NONE)
}

/// A key press with modifiers.
pub fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// A printable character key press.
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}
