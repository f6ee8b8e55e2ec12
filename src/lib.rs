//! A small interactive shell with a bounded command history.
//!
//! Each input line is tokenized into at most five whitespace-separated
//! arguments and dispatched: built-ins (`cd`, `quit`, `history`,
//! `pidhistory`) run in-process, `!n` replays the command currently at
//! history index `n`, and anything else is forked and exec'd as a child
//! process the shell waits on before prompting again. The last fifteen
//! commands are kept in a FIFO ledger together with the pids of the
//! processes that ran them.
//!
//! The main entry point is [`Interpreter`], which owns the session state and
//! dispatches lines through a set of pluggable [`command::CommandFactory`]
//! objects. The public modules [`history`] and [`session`] expose the ledger
//! and the session state for inspection.

mod builtin;
pub mod command;
mod external;
pub mod history;
mod interpreter;
mod lexer;
pub mod session;

/// Just a convenient re-export of the interactive dispatcher.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
