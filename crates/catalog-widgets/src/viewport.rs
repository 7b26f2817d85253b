//! Vertically scrolling text area.
//!
//! Scroll requests arrive either as [`Message::Scroll`] (from a screen that
//! resolved the key through its own table) or as a raw [`Message::KeyPress`]
//! that no screen binding claimed. Raw keys are matched against the
//! viewport's own [`ViewportKeys`], then Home/End/`g`/`G`; anything else is
//! ignored.

use std::cell::Cell;

use catalog_core::command::Command;
use catalog_core::component::Component;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap};
use ratatui::Frame;

use crate::dispatch::Dispatcher;
use crate::keymap::{Binding, Matchable};
use crate::viewport_keys::{ViewportAction, ViewportKeys};

#[derive(Debug, Clone)]
pub enum Message {
    /// A key no screen binding claimed.
    KeyPress(KeyEvent),
    Scroll(ViewportAction),
    GotoTop,
    GotoBottom,
}

/// Reported whenever the vertical offset actually moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scrolled {
    pub offset: u16,
}

impl Matchable<ViewportAction> for ViewportKeys {
    fn candidates(&self) -> impl Iterator<Item = &Binding<ViewportAction>> {
        [
            &self.up,
            &self.down,
            &self.page_down,
            &self.page_up,
            &self.half_page_up,
            &self.half_page_down,
        ]
        .into_iter()
        .filter(|b| b.is_enabled())
    }
}

pub struct Viewport {
    lines: Vec<Line<'static>>,
    offset: u16,
    keys: ViewportKeys,
    wrap: bool,
    scrollbar: Style,
    /// Updated on every render.
    height: Cell<u16>,
}

impl Viewport {
    pub fn new(content: &str) -> Self {
        let mut viewport = Self {
            lines: Vec::new(),
            offset: 0,
            keys: ViewportKeys::default(),
            wrap: false,
            scrollbar: Style::default(),
            height: Cell::new(24),
        };
        viewport.set_content(content);
        viewport
    }

    /// Replace the fallback key set.
    pub fn with_keys(mut self, keys: ViewportKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_scrollbar_style(mut self, style: Style) -> Self {
        self.scrollbar = style;
        self
    }

    /// Replace the content with plain text and scroll back to the top.
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.lines().map(|l| Line::raw(l.to_string())).collect();
        self.offset = 0;
    }

    /// Replace the content with pre-styled lines and scroll back to the top.
    pub fn set_lines(&mut self, lines: Vec<Line<'static>>) {
        self.lines = lines;
        self.offset = 0;
    }

    pub fn keys(&self) -> &ViewportKeys {
        &self.keys
    }

    /// Switch one fallback binding on or off.
    ///
    /// Screens that merged the same [`ViewportKeys`] into their own table
    /// call this alongside the table update, so a binding disabled on the
    /// screen does not come back through the fallback.
    pub fn set_key_enabled(&mut self, action: ViewportAction, enabled: bool) {
        self.keys.get_mut(action).set_enabled(enabled);
    }

    pub fn y_offset(&self) -> u16 {
        self.offset
    }

    pub fn set_y_offset(&mut self, offset: u16) {
        self.offset = offset.min(self.max_offset());
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Rows available at the last render.
    pub fn height(&self) -> u16 {
        self.height.get()
    }

    pub fn at_top(&self) -> bool {
        self.offset == 0
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Scroll position between 0.0 and 1.0; 1.0 when everything fits.
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            return 1.0;
        }
        f64::from(self.offset.min(max)) / f64::from(max)
    }

    fn total_lines(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }

    fn max_offset(&self) -> u16 {
        self.total_lines().saturating_sub(self.height.get())
    }

    fn scroll_to(&mut self, offset: u16) -> Command<Scrolled> {
        let offset = offset.min(self.max_offset());
        if offset == self.offset {
            return Command::none();
        }
        self.offset = offset;
        tracing::trace!(offset, "viewport scrolled");
        Command::message(Scrolled { offset })
    }

    fn apply(&mut self, action: ViewportAction) -> Command<Scrolled> {
        let page = self.height.get().max(1);
        let half = (page / 2).max(1);
        let target = match action {
            ViewportAction::Up => self.offset.saturating_sub(1),
            ViewportAction::Down => self.offset.saturating_add(1),
            ViewportAction::PageUp => self.offset.saturating_sub(page),
            ViewportAction::PageDown => self.offset.saturating_add(page),
            ViewportAction::HalfPageUp => self.offset.saturating_sub(half),
            ViewportAction::HalfPageDown => self.offset.saturating_add(half),
        };
        self.scroll_to(target)
    }
}

impl Component for Viewport {
    type Message = Message;
    type Output = Scrolled;

    fn update(&mut self, msg: Message) -> Command<Scrolled> {
        match msg {
            Message::Scroll(action) => self.apply(action),
            Message::GotoTop => self.scroll_to(0),
            Message::GotoBottom => self.scroll_to(u16::MAX),
            Message::KeyPress(key) => {
                if let Some(action) = Dispatcher::dispatch_event(&self.keys, &key) {
                    return self.apply(action);
                }
                match key.code {
                    KeyCode::Home | KeyCode::Char('g') => self.scroll_to(0),
                    KeyCode::End | KeyCode::Char('G') => self.scroll_to(u16::MAX),
                    _ => Command::none(),
                }
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        self.height.set(area.height);
        let offset = self.offset.min(self.max_offset());

        let mut paragraph = Paragraph::new(Text::from(self.lines.clone())).scroll((offset, 0));
        if self.wrap {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }
        frame.render_widget(paragraph, area);

        if self.total_lines() > area.height {
            let mut state =
                ScrollbarState::new(usize::from(self.max_offset())).position(usize::from(offset));
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(self.scrollbar)
                .begin_symbol(None)
                .end_symbol(None);
            frame.render_stateful_widget(scrollbar, area, &mut state);
        }
    }
}
