use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// Screens and widgets implement `Component`; the owning
/// [`Model`](crate::Model) decides where each one renders and lifts its
/// commands with [`Command::map`]:
///
/// ```rust,ignore
/// match msg {
///     AppMsg::List(m) => self.list.update(m).map(AppMsg::Signal),
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's input message type.
    type Message: Send + 'static;

    /// The message type carried by the commands this component returns.
    ///
    /// Widgets report back in their own vocabulary (`Output = Message`);
    /// screens translate input into signals for the screen stack.
    type Output: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] describing
    /// what the parent should do next.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Output>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Implementations confine all drawing to `area`.
    fn view(&self, frame: &mut Frame, area: Rect);
}
