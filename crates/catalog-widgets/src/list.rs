//! Selectable list with a cursor, paging and an interactive filter.
//!
//! The list does not interpret movement keys itself: the owning screen
//! resolves keys through its binding table and sends [`Message::Up`],
//! [`Message::PageDown`] and friends. Keys nobody claimed arrive as
//! [`Message::KeyPress`], which the list uses for Home/End and for editing
//! the filter text.

use std::cell::Cell;

use catalog_core::command::Command;
use catalog_core::component::Component;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{HighlightSpacing, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

/// Types that can be shown in a [`SelectList`].
pub trait Item: Send + 'static {
    /// Text used for filtering and as the display label.
    fn filter_value(&self) -> &str;

    /// Optional second line shown dimmed below the label.
    fn description(&self) -> Option<&str> {
        None
    }
}

impl Item for String {
    fn filter_value(&self) -> &str {
        self
    }
}

impl Item for &'static str {
    fn filter_value(&self) -> &str {
        self
    }
}

/// Input to the list.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key no binding claimed.
    KeyPress(KeyEvent),
    Up,
    Down,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    First,
    Last,
    /// Open the filter input.
    StartFilter,
    /// Drop the filter and show every item again.
    ClearFilter,
}

/// What changed as a result of a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// The cursor now rests on the item with this original index.
    SelectionChanged(usize),
    /// The filter text was edited.
    FilterChanged(String),
    /// Filter input closed; `applied` is false when the filter was cleared.
    FilterClosed { applied: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterState {
    Unfiltered,
    Filtering,
    Applied,
}

/// Visual style for the list.
#[derive(Debug, Clone)]
pub struct ListStyle {
    pub normal: Style,
    pub selected: Style,
    pub description: Style,
    pub filter_prompt: Style,
    pub highlight_symbol: String,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            normal: Style::default(),
            selected: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            description: Style::default().fg(Color::DarkGray),
            filter_prompt: Style::default().fg(Color::Yellow),
            highlight_symbol: "\u{2502} ".to_string(), // "│ "
        }
    }
}

/// A cursor over a filterable collection of items.
pub struct SelectList<I: Item> {
    items: Vec<I>,
    visible: Vec<usize>,
    cursor: usize,
    filter: String,
    filter_state: FilterState,
    style: ListStyle,
    /// Scroll offset and list height from the last render.
    offset: Cell<usize>,
    height: Cell<usize>,
}

impl<I: Item> SelectList<I> {
    pub fn new(items: Vec<I>) -> Self {
        let visible = (0..items.len()).collect();
        Self {
            items,
            visible,
            cursor: 0,
            filter: String::new(),
            filter_state: FilterState::Unfiltered,
            style: ListStyle::default(),
            offset: Cell::new(0),
            height: Cell::new(10),
        }
    }

    pub fn with_style(mut self, style: ListStyle) -> Self {
        self.style = style;
        self
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Number of items that pass the current filter.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Original index of the item under the cursor.
    pub fn selected(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    pub fn selected_item(&self) -> Option<&I> {
        self.selected().and_then(|i| self.items.get(i))
    }

    /// Move the cursor to the item with this original index, if visible.
    pub fn select(&mut self, index: usize) {
        if let Some(pos) = self.visible.iter().position(|&i| i == index) {
            self.cursor = pos;
        }
    }

    /// Whether the filter input is open and receiving keys.
    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    /// Whether an accepted filter is narrowing the items.
    pub fn is_filter_applied(&self) -> bool {
        self.filter_state == FilterState::Applied
    }

    pub fn filter_value(&self) -> &str {
        &self.filter
    }

    fn page_size(&self) -> usize {
        let lines_per_item = if self.items.iter().any(|i| i.description().is_some()) {
            2
        } else {
            1
        };
        (self.height.get() / lines_per_item).max(1)
    }

    fn move_to(&mut self, pos: usize) -> Command<ListEvent> {
        if self.visible.is_empty() {
            return Command::none();
        }
        let pos = pos.min(self.visible.len() - 1);
        if pos == self.cursor {
            return Command::none();
        }
        self.cursor = pos;
        match self.selected() {
            Some(index) => Command::message(ListEvent::SelectionChanged(index)),
            None => Command::none(),
        }
    }

    fn rebuild(&mut self) {
        let previous = self.selected();
        let needle = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| needle.is_empty() || item.filter_value().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.cursor = previous
            .and_then(|index| self.visible.iter().position(|&i| i == index))
            .unwrap_or(0);
        self.offset.set(0);
    }

    fn clear_filter(&mut self) -> Command<ListEvent> {
        let was_active = self.filter_state != FilterState::Unfiltered;
        self.filter.clear();
        self.filter_state = FilterState::Unfiltered;
        self.rebuild();
        if was_active {
            Command::message(ListEvent::FilterClosed { applied: false })
        } else {
            Command::none()
        }
    }

    fn edit_filter(&mut self, key: KeyEvent) -> Command<ListEvent> {
        match key.code {
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Enter => {
                self.filter_state = if self.filter.is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::Applied
                };
                Command::message(ListEvent::FilterClosed {
                    applied: self.filter_state == FilterState::Applied,
                })
            }
            KeyCode::Up => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Down => self.move_to(self.cursor + 1),
            KeyCode::Backspace => {
                if self.filter.pop().is_none() {
                    return Command::none();
                }
                self.rebuild();
                Command::message(ListEvent::FilterChanged(self.filter.clone()))
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.filter.push(c);
                self.rebuild();
                Command::message(ListEvent::FilterChanged(self.filter.clone()))
            }
            _ => Command::none(),
        }
    }
}

impl<I: Item> Component for SelectList<I> {
    type Message = Message;
    type Output = ListEvent;

    fn update(&mut self, msg: Message) -> Command<ListEvent> {
        match msg {
            Message::KeyPress(key) if self.is_filtering() => self.edit_filter(key),
            Message::KeyPress(key) => match key.code {
                KeyCode::Home | KeyCode::Char('g') => self.move_to(0),
                KeyCode::End | KeyCode::Char('G') => self.move_to(usize::MAX),
                _ => Command::none(),
            },
            Message::Up => self.move_to(self.cursor.saturating_sub(1)),
            Message::Down => self.move_to(self.cursor + 1),
            Message::PageUp => self.move_to(self.cursor.saturating_sub(self.page_size())),
            Message::PageDown => self.move_to(self.cursor.saturating_add(self.page_size())),
            Message::HalfPageUp => self.move_to(self.cursor.saturating_sub(self.page_size() / 2)),
            Message::HalfPageDown => {
                self.move_to(self.cursor.saturating_add(self.page_size() / 2))
            }
            Message::First => self.move_to(0),
            Message::Last => self.move_to(usize::MAX),
            Message::StartFilter => {
                self.filter_state = FilterState::Filtering;
                Command::none()
            }
            Message::ClearFilter => self.clear_filter(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let show_filter = self.filter_state != FilterState::Unfiltered;
        let [filter_area, list_area] = if show_filter {
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area)
        } else {
            [Rect::default(), area]
        };

        if show_filter {
            let prompt = if self.is_filtering() { "Filter: " } else { "Filtered: " };
            let line = Line::from(vec![
                Span::styled(prompt, self.style.filter_prompt),
                Span::raw(self.filter.as_str()),
            ]);
            frame.render_widget(Paragraph::new(line), filter_area);
        }

        self.height.set(usize::from(list_area.height));

        if self.visible.is_empty() {
            let empty = Paragraph::new(Span::styled("No items.", self.style.description));
            frame.render_widget(empty, list_area);
            return;
        }

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|&i| {
                let item = &self.items[i];
                let mut lines = vec![Line::styled(item.filter_value(), self.style.normal)];
                if let Some(desc) = item.description() {
                    lines.push(Line::styled(desc, self.style.description));
                }
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(self.style.selected)
            .highlight_symbol(self.style.highlight_symbol.as_str())
            .highlight_spacing(HighlightSpacing::Always);

        let mut state = ListState::default()
            .with_offset(self.offset.get())
            .with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, list_area, &mut state);
        self.offset.set(state.offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::testing::{buffer_to_string, char_key, key};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn fruit() -> SelectList<&'static str> {
        SelectList::new(vec!["apple", "banana", "cherry", "date", "elderberry"])
    }

    fn render(list: &SelectList<&'static str>, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(20, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                list.view(f, area);
            })
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn starts_on_first_item() {
        let list = fruit();
        assert_eq!(list.selected(), Some(0));
        assert_eq!(list.selected_item(), Some(&"apple"));
    }

    #[test]
    fn movement_is_clamped() {
        let mut list = fruit();
        assert!(list.update(Message::Up).is_none());
        assert_eq!(list.selected(), Some(0));

        let cmd = list.update(Message::Down);
        assert_eq!(cmd.into_message(), Some(ListEvent::SelectionChanged(1)));

        list.update(Message::Last);
        assert_eq!(list.selected(), Some(4));
        assert!(list.update(Message::Down).is_none());
    }

    #[test]
    fn paging_uses_rendered_height() {
        let mut list = fruit();
        render(&list, 2);
        list.update(Message::PageDown);
        assert_eq!(list.selected(), Some(2));
        list.update(Message::PageUp);
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn home_and_end_fall_through_keys() {
        let mut list = fruit();
        list.update(Message::KeyPress(char_key('G')));
        assert_eq!(list.selected(), Some(4));
        list.update(Message::KeyPress(key(KeyCode::Home)));
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn filter_narrows_and_enter_applies() {
        let mut list = fruit();
        list.update(Message::StartFilter);
        assert!(list.is_filtering());

        for c in "err".chars() {
            list.update(Message::KeyPress(char_key(c)));
        }
        assert_eq!(list.filter_value(), "err");
        assert_eq!(list.visible_count(), 2);
        assert_eq!(list.selected_item(), Some(&"cherry"));

        let cmd = list.update(Message::KeyPress(key(KeyCode::Enter)));
        assert_eq!(cmd.into_message(), Some(ListEvent::FilterClosed { applied: true }));
        assert!(!list.is_filtering());
        assert!(list.is_filter_applied());
        assert_eq!(list.visible_count(), 2);
    }

    #[test]
    fn esc_clears_filter() {
        let mut list = fruit();
        list.update(Message::StartFilter);
        list.update(Message::KeyPress(char_key('d')));
        list.update(Message::KeyPress(char_key('a')));
        assert_eq!(list.selected_item(), Some(&"date"));

        list.update(Message::KeyPress(key(KeyCode::Esc)));
        assert!(!list.is_filtering());
        assert_eq!(list.visible_count(), 5);
        assert_eq!(list.selected_item(), Some(&"date"));
    }

    #[test]
    fn filtering_keys_do_not_move_cursor() {
        let mut list = fruit();
        list.update(Message::StartFilter);
        list.update(Message::KeyPress(char_key('G')));
        assert_eq!(list.filter_value(), "G");
        assert_eq!(list.visible_count(), 0);
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn render_shows_filter_and_highlight() {
        let mut list = fruit();
        list.update(Message::StartFilter);
        list.update(Message::KeyPress(char_key('b')));
        let screen = render(&list, 3);
        assert!(screen.starts_with("Filter: b"));
        assert!(screen.contains("\u{2502} banana"));
        assert!(screen.contains("elderberry"));
    }
}
