//! Module detail page: the readme in a viewport, a row of buttons and help.

use std::fmt;

use catalog_core::{Command, Component};
use catalog_widgets::buttons::{self, ButtonBar};
use catalog_widgets::viewport::{self, Viewport};
use catalog_widgets::{
    Action, Binding, BindingTable, ConfigError, Dispatcher, HelpView, KeymapError,
    ViewportAction, ViewportKeys,
};
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{absorb, with_help_footer, Message};
use crate::module::Module;
use crate::signal::{ScaffoldContext, Signal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageAction {
    Up,
    Down,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    Navigation,
    Choose,
    Scaffold,
    Help,
    Quit,
    ForceQuit,
}

impl Action for PageAction {
    fn is_help(self) -> bool {
        matches!(self, PageAction::Help)
    }
}

impl From<ViewportAction> for PageAction {
    fn from(action: ViewportAction) -> Self {
        match action {
            ViewportAction::Up => PageAction::Up,
            ViewportAction::Down => PageAction::Down,
            ViewportAction::PageUp => PageAction::PageUp,
            ViewportAction::PageDown => PageAction::PageDown,
            ViewportAction::HalfPageUp => PageAction::HalfPageUp,
            ViewportAction::HalfPageDown => PageAction::HalfPageDown,
        }
    }
}

impl PageAction {
    /// The scroll this action maps to, for the viewport-derived actions.
    pub fn scroll(self) -> Option<ViewportAction> {
        Some(match self {
            PageAction::Up => ViewportAction::Up,
            PageAction::Down => ViewportAction::Down,
            PageAction::PageUp => ViewportAction::PageUp,
            PageAction::PageDown => ViewportAction::PageDown,
            PageAction::HalfPageUp => ViewportAction::HalfPageUp,
            PageAction::HalfPageDown => ViewportAction::HalfPageDown,
            PageAction::Navigation
            | PageAction::Choose
            | PageAction::Scaffold
            | PageAction::Help
            | PageAction::Quit
            | PageAction::ForceQuit => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Scaffold,
    ViewSource,
}

impl fmt::Display for PageButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageButton::Scaffold => f.write_str("Scaffold"),
            PageButton::ViewSource => f.write_str("View Source"),
        }
    }
}

/// Scrolling bindings for the page. Half-page scrolling is switched off.
pub fn viewport_keys() -> ViewportKeys {
    ViewportKeys {
        up: Binding::new(ViewportAction::Up)
            .with_keys(["up", "ctrl+p"])
            .with_help("\u{2191}/ctrl+p", "move up")
            .in_short_help(),
        down: Binding::new(ViewportAction::Down)
            .with_keys(["down", "ctrl+n"])
            .with_help("\u{2193}/ctrl+n", "move down")
            .in_short_help(),
        page_down: Binding::new(ViewportAction::PageDown)
            .with_keys(["right", "pgdown", "ctrl+v"])
            .with_help("\u{2192}/pgdn/ctrl+v", "page down"),
        page_up: Binding::new(ViewportAction::PageUp)
            .with_keys(["left", "pgup", "alt+v"])
            .with_help("\u{2190}/pgup/alt+v", "page up"),
        half_page_up: Binding::new(ViewportAction::HalfPageUp).disabled(),
        half_page_down: Binding::new(ViewportAction::HalfPageDown).disabled(),
    }
}

/// The page screen's bindings.
pub fn keymap() -> Result<BindingTable<PageAction>, ConfigError> {
    use PageAction::*;

    Ok(BindingTable::builder()
        .include(viewport_keys().into_bindings(), PageAction::from)?
        .register(
            Binding::new(Navigation)
                .with_keys(["tab"])
                .with_help("tab", "navigation")
                .in_short_help(),
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
            Binding::new(Help)
                .with_keys(["?"])
                .with_help("?", "toggle help")
                .in_short_help(),
        )?
        .register(
            Binding::new(Quit)
                .with_keys(["q", "esc"])
                .with_help("q", "back to list")
                .in_short_help(),
        )?
        .register(Binding::new(ForceQuit).with_keys(["ctrl+c"]))?
        .group([Up, Down, PageDown, PageUp])?
        .group([Navigation, Choose, Scaffold])?
        .group([Help, Quit, ForceQuit])?
        .build())
}

/// Detail view for one module.
pub struct PageScreen {
    module: Module,
    keys: BindingTable<PageAction>,
    help: HelpView,
    viewport: Viewport,
    buttons: ButtonBar<PageButton>,
}

impl PageScreen {
    pub fn new(module: Module) -> Result<Self, ConfigError> {
        let viewport = Viewport::new(&module.readme)
            .with_keys(viewport_keys())
            .with_wrap(true);
        Ok(Self {
            keys: keymap()?,
            help: HelpView::new(),
            viewport,
            buttons: ButtonBar::new(vec![PageButton::Scaffold, PageButton::ViewSource]),
            module,
        })
    }

    pub fn dispatch(&self, key: &KeyEvent) -> Option<PageAction> {
        Dispatcher::dispatch_event(&self.keys, key)
    }

    pub fn set_binding_enabled(
        &mut self,
        action: PageAction,
        enabled: bool,
    ) -> Result<(), KeymapError> {
        self.keys.set_enabled(action, enabled)?;
        if let Some(scroll) = action.scroll() {
            self.viewport.set_key_enabled(scroll, enabled);
        }
        Ok(())
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn keys(&self) -> &BindingTable<PageAction> {
        &self.keys
    }

    pub fn help(&self) -> &HelpView {
        &self.help
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn focused_button(&self) -> Option<PageButton> {
        self.buttons.focused()
    }

    pub fn scaffold_context(&self) -> ScaffoldContext {
        ScaffoldContext {
            module: self.module.clone(),
        }
    }

    fn scroll(&mut self, action: ViewportAction) -> Command<Signal> {
        absorb("viewport", self.viewport.update(viewport::Message::Scroll(action)));
        Command::none()
    }

    fn apply(&mut self, action: PageAction) -> Command<Signal> {
        match action {
            PageAction::Up => self.scroll(ViewportAction::Up),
            PageAction::Down => self.scroll(ViewportAction::Down),
            PageAction::PageUp => self.scroll(ViewportAction::PageUp),
            PageAction::PageDown => self.scroll(ViewportAction::PageDown),
            PageAction::HalfPageUp => self.scroll(ViewportAction::HalfPageUp),
            PageAction::HalfPageDown => self.scroll(ViewportAction::HalfPageDown),
            PageAction::Navigation => {
                absorb("buttons", self.buttons.update(buttons::Message::Advance));
                Command::message(Signal::NavigationAdvanced)
            }
            PageAction::Choose => Command::message(Signal::ConfirmPressed),
            PageAction::Scaffold => {
                Command::message(Signal::ScaffoldRequested(self.scaffold_context()))
            }
            PageAction::Help => {
                self.help.toggle();
                Command::none()
            }
            PageAction::Quit => Command::message(Signal::ReturnToList),
            PageAction::ForceQuit => Command::message(Signal::Terminate),
        }
    }
}

impl Component for PageScreen {
    type Message = Message;
    type Output = Signal;

    fn update(&mut self, msg: Message) -> Command<Signal> {
        let Message::Key(key) = msg;
        match self.dispatch(&key) {
            Some(action) => {
                tracing::debug!(?action, module = %self.module.name, "page action");
                self.apply(action)
            }
            None => {
                absorb("viewport", self.viewport.update(viewport::Message::KeyPress(key)));
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let (body, help_area) = with_help_footer(area, self.help.height(&self.keys));
        let [header, _, content, _, button_row] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(body);

        let title = Line::from(Span::styled(
            format!(" {} ", self.module.name),
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
        let subtitle = Line::from(Span::styled(
            self.module.description.as_str(),
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(vec![title, subtitle]), header);

        self.viewport.view(frame, content);
        self.buttons.view(frame, button_row);
        let help = self.help.clone().with_max_width(usize::from(help_area.width));
        frame.render_widget(Paragraph::new(help.render_text(&self.keys)), help_area);
    }
}
