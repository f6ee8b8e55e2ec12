//! Per-session shell state.

use crate::history::History;

/// Mutable state of one interactive shell session, owned by the dispatcher
/// and constructed once at startup.
///
/// Note: fields are public for simplicity to keep the crate small.
#[derive(Debug, Default)]
pub struct Session {
    /// Ledger of past commands, re-runnable with `!n`.
    pub history: History,
    /// Set by the `quit` builtin; the interactive loop exits when it sees
    /// this.
    pub should_exit: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
