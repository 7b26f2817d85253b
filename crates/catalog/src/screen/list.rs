//! Module list screen.

use catalog_core::{Command, Component};
use catalog_widgets::list::{self, SelectList};
use catalog_widgets::{
    Action, Binding, BindingTable, ConfigError, Dispatcher, HelpView, KeymapError,
};
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{absorb, with_help_footer, Message};
use crate::module::Module;
use crate::signal::{ScaffoldContext, Signal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Choose,
    Scaffold,
    Filter,
    Help,
    Quit,
    ForceQuit,
}

impl Action for ListAction {
    fn is_help(self) -> bool {
        matches!(self, ListAction::Help)
    }
}

/// The list screen's bindings.
///
/// Help columns: movement, module actions, then help and quitting.
pub fn keymap() -> Result<BindingTable<ListAction>, ConfigError> {
    use ListAction::*;

    Ok(BindingTable::builder()
        .register(
            Binding::new(Up)
                .with_keys(["up", "k"])
                .with_help("\u{2191}/k", "up")
                .in_short_help(),
        )?
        .register(
            Binding::new(Down)
                .with_keys(["down", "j"])
                .with_help("\u{2193}/j", "down")
                .in_short_help(),
        )?
        .register(
            Binding::new(PageUp)
                .with_keys(["pgup", "left"])
                .with_help("\u{2190}/pgup", "prev page"),
        )?
        .register(
            Binding::new(PageDown)
                .with_keys(["pgdown", "right"])
                .with_help("\u{2192}/pgdn", "next page"),
        )?
        .register(
            Binding::new(Choose)
                .with_keys(["enter", "ctrl-j"])
                .with_help("enter/ctrl-j", "choose")
                .in_short_help(),
        )?
        .register(
            Binding::new(Scaffold)
                .with_keys(["S", "s"])
                .with_help("S", "Scaffold")
                .in_short_help(),
        )?
        .register(
            Binding::new(Filter)
                .with_keys(["/"])
                .with_help("/", "filter")
                .in_short_help(),
        )?
        .register(
            Binding::new(Help)
                .with_keys(["?"])
                .with_help("?", "toggle help")
                .in_short_help(),
        )?
        .register(
            Binding::new(Quit)
                .with_keys(["q", "esc"])
                .with_help("q", "quit")
                .in_short_help(),
        )?
        .register(Binding::new(ForceQuit).with_keys(["ctrl+c"]))?
        .group([Up, Down, PageUp, PageDown])?
        .group([Choose, Scaffold, Filter])?
        .group([Help, Quit, ForceQuit])?
        .build())
}

/// Filterable list of catalog modules.
pub struct ListScreen {
    title: String,
    keys: BindingTable<ListAction>,
    help: HelpView,
    list: SelectList<Module>,
}

impl ListScreen {
    pub fn new(modules: Vec<Module>) -> Result<Self, ConfigError> {
        Ok(Self {
            title: "List of Modules".to_string(),
            keys: keymap()?,
            help: HelpView::new(),
            list: SelectList::new(modules),
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// The action this key triggers right now.
    ///
    /// While the filter is being edited only `ForceQuit` is recognised; every
    /// other key belongs to the filter input.
    pub fn dispatch(&self, key: &KeyEvent) -> Option<ListAction> {
        let action = Dispatcher::dispatch_event(&self.keys, key);
        if self.list.is_filtering() {
            return action.filter(|a| *a == ListAction::ForceQuit);
        }
        action
    }

    pub fn set_binding_enabled(
        &mut self,
        action: ListAction,
        enabled: bool,
    ) -> Result<(), KeymapError> {
        self.keys.set_enabled(action, enabled)
    }

    pub fn keys(&self) -> &BindingTable<ListAction> {
        &self.keys
    }

    pub fn help(&self) -> &HelpView {
        &self.help
    }

    pub fn list(&self) -> &SelectList<Module> {
        &self.list
    }

    pub fn selected(&self) -> Option<&Module> {
        self.list.selected_item()
    }

    fn scroll(&mut self, msg: list::Message) -> Command<Signal> {
        absorb("list", self.list.update(msg));
        Command::none()
    }

    fn apply(&mut self, action: ListAction) -> Command<Signal> {
        match action {
            ListAction::Up => self.scroll(list::Message::Up),
            ListAction::Down => self.scroll(list::Message::Down),
            ListAction::PageUp => self.scroll(list::Message::PageUp),
            ListAction::PageDown => self.scroll(list::Message::PageDown),
            ListAction::Filter => self.scroll(list::Message::StartFilter),
            ListAction::Help => {
                self.help.toggle();
                Command::none()
            }
            ListAction::Choose => match self.list.selected_item() {
                Some(module) => Command::message(Signal::SelectionConfirmed(module.clone())),
                None => Command::none(),
            },
            ListAction::Scaffold => match self.list.selected_item() {
                Some(module) => Command::message(Signal::ScaffoldRequested(ScaffoldContext {
                    module: module.clone(),
                })),
                None => Command::none(),
            },
            ListAction::Quit if self.list.is_filter_applied() => {
                self.scroll(list::Message::ClearFilter)
            }
            ListAction::Quit => Command::message(Signal::ReturnToList),
            ListAction::ForceQuit => Command::message(Signal::Terminate),
        }
    }
}

impl Component for ListScreen {
    type Message = Message;
    type Output = Signal;

    fn update(&mut self, msg: Message) -> Command<Signal> {
        let Message::Key(key) = msg;
        match self.dispatch(&key) {
            Some(action) => {
                tracing::debug!(?action, "list action");
                self.apply(action)
            }
            None => self.scroll(list::Message::KeyPress(key)),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let (body, help_area) = with_help_footer(area, self.help.height(&self.keys));
        let [title_area, _, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(body);

        let title_style = Style::default()
            .fg(Color::White)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {} ", self.title), title_style)),
            title_area,
        );
        self.list.view(frame, list_area);
        let help = self.help.clone().with_max_width(usize::from(help_area.width));
        frame.render_widget(Paragraph::new(help.render_text(&self.keys)), help_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::demo_modules;
    use catalog_core::testing::{buffer_to_string, char_key, key, key_with};
    use catalog_widgets::{FullHelpSource, ShortHelpSource};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::collections::HashSet;

    fn screen() -> ListScreen {
        ListScreen::new(demo_modules()).unwrap()
    }

    fn press(screen: &mut ListScreen, key: KeyEvent) -> Vec<Signal> {
        screen.update(Message::Key(key)).into_messages()
    }

    #[test]
    fn shipped_table_builds() {
        let table = keymap().unwrap();
        assert_eq!(table.len(), 10);
        assert_eq!(table.groups().len(), 3);
    }

    #[test]
    fn scenario_dispatch_and_signals() {
        let mut s = screen();
        let first = s.selected().cloned().unwrap();
        let inputs = [
            char_key('x'),
            char_key('s'),
            char_key('?'),
            char_key('?'),
            key(KeyCode::Enter),
        ];
        let expected = [
            None,
            Some(ListAction::Scaffold),
            Some(ListAction::Help),
            Some(ListAction::Help),
            Some(ListAction::Choose),
        ];
        let mut expanded = Vec::new();
        let mut signals = Vec::new();
        for (input, want) in inputs.into_iter().zip(expected) {
            assert_eq!(s.dispatch(&input), want);
            signals.extend(press(&mut s, input));
            if want == Some(ListAction::Help) {
                expanded.push(s.help().is_expanded());
            }
        }
        assert_eq!(expanded, [true, false]);
        assert_eq!(
            signals,
            [
                Signal::ScaffoldRequested(ScaffoldContext {
                    module: first.clone()
                }),
                Signal::SelectionConfirmed(first),
            ]
        );
    }

    #[test]
    fn ctrl_j_chooses() {
        let mut s = screen();
        let signals = press(&mut s, key_with(KeyCode::Char('j'), KeyModifiers::CONTROL));
        assert!(matches!(signals.as_slice(), [Signal::SelectionConfirmed(_)]));
    }

    #[test]
    fn movement_moves_selection() {
        let mut s = screen();
        press(&mut s, char_key('j'));
        press(&mut s, key(KeyCode::Down));
        assert_eq!(s.selected().map(|m| m.name.as_str()), Some("rds-postgres"));
        press(&mut s, char_key('k'));
        assert_eq!(s.selected().map(|m| m.name.as_str()), Some("eks-cluster"));
    }

    #[test]
    fn help_toggle_keeps_selection() {
        let mut s = screen();
        press(&mut s, char_key('j'));
        let before = s.selected().cloned();
        press(&mut s, char_key('?'));
        assert!(s.help().is_expanded());
        assert_eq!(s.selected().cloned(), before);
    }

    #[test]
    fn filtering_swallows_bound_keys_except_force_quit() {
        let mut s = screen();
        press(&mut s, char_key('/'));
        assert!(s.list().is_filtering());

        for c in ['s', 'q', '?'] {
            assert_eq!(s.dispatch(&char_key(c)), None);
            assert!(press(&mut s, char_key(c)).is_empty());
        }
        assert_eq!(s.list().filter_value(), "sq?");
        assert!(!s.help().is_expanded());

        let ctrl_c = key_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(s.dispatch(&ctrl_c), Some(ListAction::ForceQuit));
        assert_eq!(press(&mut s, ctrl_c), [Signal::Terminate]);
    }

    #[test]
    fn quit_clears_applied_filter_first() {
        let mut s = screen();
        press(&mut s, char_key('/'));
        for c in "rds".chars() {
            press(&mut s, char_key(c));
        }
        press(&mut s, key(KeyCode::Enter));
        assert!(s.list().is_filter_applied());
        assert_eq!(s.list().visible_count(), 1);

        assert!(press(&mut s, char_key('q')).is_empty());
        assert_eq!(s.list().visible_count(), 5);
        assert_eq!(press(&mut s, char_key('q')), [Signal::ReturnToList]);
    }

    #[test]
    fn disabled_scaffold_is_unmatched_and_hidden() {
        let mut s = screen();
        s.set_binding_enabled(ListAction::Scaffold, false).unwrap();
        assert_eq!(s.dispatch(&char_key('s')), None);
        assert!(press(&mut s, char_key('s')).is_empty());
        assert!(!s.help.render(s.keys()).contains("Scaffold"));

        s.set_binding_enabled(ListAction::Scaffold, true).unwrap();
        assert_eq!(s.dispatch(&char_key('S')), Some(ListAction::Scaffold));
        assert!(s.help.render(s.keys()).contains("Scaffold"));
    }

    #[test]
    fn help_projections_cover_enabled_bindings() {
        let table = keymap().unwrap();
        let enabled: HashSet<ListAction> = table.enabled().map(Binding::action).collect();
        let mut projected: HashSet<ListAction> = table.short_help().map(Binding::action).collect();
        projected.extend(table.full_help().into_iter().flatten().map(Binding::action));
        assert_eq!(projected, enabled);
    }

    #[test]
    fn short_and_full_help_differ() {
        let mut s = screen();
        let short = s.help.render(s.keys());
        press(&mut s, char_key('?'));
        let full = s.help.render(s.keys());
        assert_eq!(short.lines().count(), 1);
        assert_eq!(full.lines().count(), 4);
        assert_ne!(short, full);
    }

    #[test]
    fn renders_title_items_and_help() {
        let s = screen();
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                s.view(f, area);
            })
            .unwrap();
        let screen = buffer_to_string(terminal.backend().buffer());
        assert!(screen.contains("List of Modules"));
        assert!(screen.contains("eks-cluster"));
        assert!(screen.contains("enter/ctrl-j choose"));
    }
}
