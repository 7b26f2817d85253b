use crate::command::{Action, Command, CommandInner};
use crate::event::TerminalEvent;
use crate::model::Model;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste, EventStream},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::VecDeque;
use std::io::{self, stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// A global tracing subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

/// Configuration options for a [`Program`].
///
/// All fields have sensible defaults (see [`Default`] impl). Use struct
/// update syntax to override only the options you need:
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     title: Some("catalog".into()),
///     log_file: Some("catalog.log".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Start in alternate screen (default: true).
    pub alt_screen: bool,
    /// Enable bracketed paste (default: true).
    pub bracketed_paste: bool,
    /// Set terminal title.
    pub title: Option<String>,
    /// Whether to catch panics and restore terminal (default: true).
    pub catch_panics: bool,
    /// Whether an OS interrupt ends the event loop (default: true).
    pub handle_signals: bool,
    /// Log file for the tracing subscriber. `None` installs no subscriber,
    /// since the terminal itself is owned by the UI.
    pub log_file: Option<PathBuf>,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            alt_screen: true,
            bracketed_paste: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
        }
    }
}

/// The program runtime. Manages terminal setup, the event loop, and the
/// [`Model`] lifecycle.
///
/// Events are processed strictly one at a time: a terminal event is mapped
/// through [`Model::on_event`], the resulting message and every message its
/// commands produce are drained through [`Model::update`], and only then is
/// the frame redrawn and the next event read.
///
/// # Example
///
/// ```rust,ignore
/// let model = Program::new(app, ProgramOptions::default())?.run().await?;
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    options: ProgramOptions,
    should_quit: bool,
}

impl<M: Model> Program<M> {
    /// Create a program, installing logging and taking over the terminal.
    pub fn new(model: M, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(ref path) = options.log_file {
            init_logging(path)?;
        }
        let terminal = init_terminal(&options)?;
        tracing::debug!("program initialized");
        Ok(Self {
            model,
            terminal,
            options,
            should_quit: false,
        })
    }

    /// Run the program until the model quits. Returns the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;

        tracing::debug!("shutting down");
        restore_terminal(&self.options)?;
        result?;

        Ok(self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.render()?;

        let mut events = EventStream::new();
        let handle_signals = self.options.handle_signals;

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    tracing::info!("received interrupt signal");
                    return Ok(());
                }

                event = events.next() => {
                    let event = match event {
                        Some(Ok(event)) => event,
                        Some(Err(err)) => return Err(err.into()),
                        None => return Ok(()),
                    };
                    let Ok(event) = TerminalEvent::try_from(event) else {
                        continue;
                    };
                    if let Some(msg) = self.model.on_event(event) {
                        self.process_message(msg);
                    }
                    if self.should_quit {
                        return Ok(());
                    }
                    self.render()?;
                }
            }
        }
    }

    fn process_message(&mut self, msg: M::Message) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let cmd = self.model.update(msg);
            self.execute_command(cmd, &mut queue);
            if self.should_quit {
                break;
            }
        }
    }

    fn execute_command(&mut self, cmd: Command<M::Message>, queue: &mut VecDeque<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => queue.push_back(msg),
            CommandInner::Action(Action::Quit) => self.should_quit = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd, queue);
                }
            }
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| {
            self.model.view(frame);
        })?;
        Ok(())
    }
}

/// Install the global tracing subscriber writing to `path` (append mode).
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging(path: impl AsRef<Path>) -> Result<(), ProgramError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()?;
    Ok(())
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    // Install panic hook that restores terminal (only once to avoid stacking)
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal_minimal(alt_screen);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = stdout();

    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if options.bracketed_paste {
        execute!(writer, EnableBracketedPaste)?;
    }
    if let Some(ref title) = options.title {
        execute!(writer, SetTitle(title))?;
    }
    execute!(writer, cursor::Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(writer))?;
    Ok(terminal)
}

fn restore_terminal(options: &ProgramOptions) -> Result<(), ProgramError> {
    restore_terminal_minimal(options.alt_screen)?;
    Ok(())
}

fn restore_terminal_minimal(alt_screen: bool) -> Result<(), io::Error> {
    // Best effort: keep going so as much terminal state as possible is restored.
    let raw = disable_raw_mode();
    let mut writer = stdout();
    execute!(writer, DisableBracketedPaste).ok();
    execute!(writer, cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    raw
}
