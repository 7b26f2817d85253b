//! A row of buttons with exactly one focused at a time.

use std::fmt;

use catalog_core::command::Command;
use catalog_core::component::Component;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Move focus to the next button, wrapping after the last.
    Advance,
    /// Move focus to the previous button, wrapping before the first.
    Retreat,
    /// Focus the button at this position (clamped).
    Focus(usize),
}

#[derive(Debug, Clone)]
pub struct ButtonStyle {
    pub normal: Style,
    pub focused: Style,
    pub gap: String,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            normal: Style::default().fg(Color::Gray).bg(Color::DarkGray),
            focused: Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            gap: "  ".to_string(),
        }
    }
}

/// Ordered buttons; the owning screen decides what "pressing" the focused
/// one means.
pub struct ButtonBar<B> {
    buttons: Vec<B>,
    focused: usize,
    style: ButtonStyle,
}

impl<B> ButtonBar<B>
where
    B: Copy + PartialEq + fmt::Display + Send + 'static,
{
    pub fn new(buttons: Vec<B>) -> Self {
        Self {
            buttons,
            focused: 0,
            style: ButtonStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// The focused button; `None` only for an empty bar.
    pub fn focused(&self) -> Option<B> {
        self.buttons.get(self.focused).copied()
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn is_focused(&self, button: B) -> bool {
        self.focused() == Some(button)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Move focus forward and return the newly focused button.
    pub fn advance(&mut self) -> Option<B> {
        if !self.buttons.is_empty() {
            self.focused = (self.focused + 1) % self.buttons.len();
        }
        self.focused()
    }

    pub fn retreat(&mut self) -> Option<B> {
        let n = self.buttons.len();
        if n > 0 {
            self.focused = (self.focused + n - 1) % n;
        }
        self.focused()
    }

    pub fn focus(&mut self, index: usize) -> Option<B> {
        self.focused = index.min(self.buttons.len().saturating_sub(1));
        self.focused()
    }
}

impl<B> Component for ButtonBar<B>
where
    B: Copy + PartialEq + fmt::Display + Send + 'static,
{
    type Message = Message;
    /// The button that received focus.
    type Output = B;

    fn update(&mut self, msg: Message) -> Command<B> {
        let focused = match msg {
            Message::Advance => self.advance(),
            Message::Retreat => self.retreat(),
            Message::Focus(index) => self.focus(index),
        };
        focused.map_or_else(Command::none, Command::message)
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::with_capacity(self.buttons.len() * 2);
        for (i, button) in self.buttons.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(self.style.gap.as_str()));
            }
            let style = if i == self.focused {
                self.style.focused
            } else {
                self.style.normal
            };
            spans.push(Span::styled(format!(" {button} "), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
