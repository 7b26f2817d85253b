//! Runtime for the catalog browser.
//!
//! `catalog-core` provides the traits, types, and event loop that the catalog
//! screens are built on. The design follows the [Elm Architecture]: the
//! application is a [`Model`] whose `update` is a pure state transition that
//! returns a [`Command`], and whose `view` renders the current state.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (on_event / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Describes what should happen after an update |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit-testing a [`Model`] without a terminal |
//!
//! The loop is single-threaded and cooperative: one terminal event is fully
//! processed (including every message its commands produce) before the next
//! one is read.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{init_logging, Program, ProgramError, ProgramOptions};

/// Run a model with the given options until it quits.
pub async fn run<M: Model>(model: M, options: ProgramOptions) -> Result<M, ProgramError> {
    Program::new(model, options)?.run().await
}
