//! Signals the screens raise for the screen stack.

use std::fmt;

use crate::module::Module;

/// Everything a scaffold run needs to know about the chosen module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldContext {
    pub module: Module,
}

impl fmt::Display for ScaffoldContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scaffold {} from {}", self.module.name, self.module.url)
    }
}

/// Outcome of a screen handling one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// A module was chosen on the list.
    SelectionConfirmed(Module),
    /// The focused page button was pressed.
    ConfirmPressed,
    ScaffoldRequested(ScaffoldContext),
    /// Button focus moved on the page.
    NavigationAdvanced,
    /// Leave the current screen.
    ReturnToList,
    /// Stop the program regardless of state.
    Terminate,
}
