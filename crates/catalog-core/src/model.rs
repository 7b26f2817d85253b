use crate::command::Command;
use crate::event::TerminalEvent;
use ratatui::Frame;

/// The top-level application trait driven by [`Program`](crate::Program).
///
/// The runtime delivers one [`TerminalEvent`] at a time: it asks the model
/// to translate it with [`on_event`](Model::on_event), passes the resulting
/// message to [`update`](Model::update), executes the returned [`Command`]
/// and redraws with [`view`](Model::view). Nothing else runs between two
/// events, so the model never needs interior locking.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_core::{Command, Model, TerminalEvent};
/// use crossterm::event::KeyCode;
/// use ratatui::Frame;
/// use ratatui::widgets::Paragraph;
///
/// struct Counter { count: i32 }
///
/// enum Msg { Increment, Quit }
///
/// impl Model for Counter {
///     type Message = Msg;
///
///     fn on_event(&self, event: TerminalEvent) -> Option<Msg> {
///         match event.key_press()?.code {
///             KeyCode::Char('+') => Some(Msg::Increment),
///             KeyCode::Char('q') => Some(Msg::Quit),
///             _ => None,
///         }
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Increment => self.count += 1,
///             Msg::Quit => return Command::quit(),
///         }
///         Command::none()
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         frame.render_widget(Paragraph::new(format!("{}", self.count)), frame.area());
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Translate a terminal event into a message. Returning `None` drops the
    /// event without an update cycle.
    fn on_event(&self, event: TerminalEvent) -> Option<Self::Message>;

    /// Process a message, mutate state, and return a command for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state. Must be a pure function of `&self`.
    fn view(&self, frame: &mut Frame);
}
