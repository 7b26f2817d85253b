//! Screen stack: the module list with an optional page on top.

use catalog_core::{Command, Component, Model, ProgramError, TerminalEvent};
use catalog_widgets::{ConfigError, KeymapError};
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::module::Module;
use crate::screen::{self, ListScreen, PageButton, PageScreen};
use crate::signal::{ScaffoldContext, Signal};

/// Errors that end the `catalog` binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid keymap: {0}")]
    Keymap(#[from] KeymapError),
    #[error(transparent)]
    Program(#[from] ProgramError),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Keymap(err.into())
    }
}

#[derive(Debug)]
pub enum AppMessage {
    Key(KeyEvent),
    Signal(Signal),
}

pub struct App {
    list: ListScreen,
    page: Option<PageScreen>,
    scaffold: Option<ScaffoldContext>,
    status: Option<String>,
}

impl App {
    pub fn new(modules: Vec<Module>) -> Result<Self, ConfigError> {
        Ok(Self {
            list: ListScreen::new(modules)?,
            page: None,
            scaffold: None,
            status: None,
        })
    }

    pub fn list(&self) -> &ListScreen {
        &self.list
    }

    pub fn page(&self) -> Option<&PageScreen> {
        self.page.as_ref()
    }

    /// The scaffold the user asked for before the program stopped.
    pub fn scaffold_request(&self) -> Option<&ScaffoldContext> {
        self.scaffold.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn open_page(&mut self, module: Module) {
        match PageScreen::new(module) {
            Ok(page) => {
                tracing::info!(module = %page.module().name, "page opened");
                self.page = Some(page);
            }
            Err(err) => tracing::error!(%err, "page keymap rejected"),
        }
    }

    fn request_scaffold(&mut self, ctx: ScaffoldContext) -> Command<AppMessage> {
        tracing::info!(module = %ctx.module.name, "scaffold requested");
        self.scaffold = Some(ctx);
        Command::quit()
    }

    fn handle_signal(&mut self, signal: Signal) -> Command<AppMessage> {
        tracing::debug!(?signal, "signal");
        match signal {
            Signal::SelectionConfirmed(module) => {
                self.status = None;
                self.open_page(module);
                Command::none()
            }
            Signal::ConfirmPressed => {
                let Some(page) = &self.page else {
                    return Command::none();
                };
                match page.focused_button() {
                    Some(PageButton::Scaffold) => {
                        let ctx = page.scaffold_context();
                        self.request_scaffold(ctx)
                    }
                    Some(PageButton::ViewSource) => {
                        self.status = Some(format!("Source: {}", page.module().url));
                        Command::none()
                    }
                    None => Command::none(),
                }
            }
            Signal::ScaffoldRequested(ctx) => self.request_scaffold(ctx),
            Signal::NavigationAdvanced => Command::none(),
            Signal::ReturnToList => match self.page.take() {
                Some(page) => {
                    tracing::info!(module = %page.module().name, "page closed");
                    self.status = None;
                    Command::none()
                }
                None => Command::quit(),
            },
            Signal::Terminate => Command::quit(),
        }
    }
}

impl Model for App {
    type Message = AppMessage;

    fn on_event(&self, event: TerminalEvent) -> Option<AppMessage> {
        event.key_press().copied().map(AppMessage::Key)
    }

    fn update(&mut self, msg: AppMessage) -> Command<AppMessage> {
        match msg {
            AppMessage::Key(key) => {
                let msg = screen::Message::Key(key);
                let cmd = match self.page.as_mut() {
                    Some(page) => page.update(msg),
                    None => self.list.update(msg),
                };
                cmd.map(AppMessage::Signal)
            }
            AppMessage::Signal(signal) => self.handle_signal(signal),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [body, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        match &self.page {
            Some(page) => page.view(frame, body),
            None => self.list.view(frame, body),
        }
        if let Some(text) = &self.status {
            let line = Span::styled(text.as_str(), Style::default().fg(Color::Yellow));
            frame.render_widget(Paragraph::new(line), status);
        }
    }
}
