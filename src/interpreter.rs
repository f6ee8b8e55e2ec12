use crate::builtin::{Cd, Quit, ShowHistory, ShowPidHistory};
use crate::command::CommandFactory;
use crate::external::{self, ExternalCommand};
use crate::lexer;
use crate::session::Session;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate through the
/// `BuiltinCommand` trait.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The shell's dispatcher and interactive loop.
///
/// The interpreter owns the [`Session`] (history ledger, exit flag) and a
/// list of [`CommandFactory`] objects that are queried to create built-in
/// commands by name; anything no factory recognizes is forked and exec'd as
/// an external program, waited on before the next prompt. See [`Default`]
/// for the built-in set included out of the box.
///
/// Example
/// ```
/// use resh::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// sh.dispatch("history", &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "0)   history \n");
/// assert_eq!(sh.session().history.len(), 1);
/// ```
pub struct Interpreter {
    session: Session,
    builtins: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create an interpreter with a custom set of builtin factories.
    pub fn new(builtins: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            session: Session::new(),
            builtins,
        }
    }

    /// Read-only view of the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Tokenize one input line and run it.
    ///
    /// A blank line is a no-op. A line starting with `!` re-runs the history
    /// entry it indexes (or reports `Out of range`) without creating a new
    /// entry; every other line is appended to the ledger before it runs,
    /// builtins included. External commands additionally get the child pid
    /// recorded on their freshly appended entry.
    pub fn dispatch(&mut self, line: &str, out: &mut dyn Write) -> Result<()> {
        let tokens = lexer::split_into_tokens(line);
        if tokens.is_empty() {
            return Ok(());
        }

        let (argv, fresh) = if tokens[0].starts_with('!') {
            // The target's tokens are copied out of the ledger; the rerun
            // itself is never recorded.
            let index = tokens[0][1..].parse::<usize>().ok();
            match index.and_then(|n| self.session.history.get(n)) {
                Some(entry) => (entry.args().to_vec(), false),
                None => {
                    writeln!(out, "Out of range")?;
                    return Ok(());
                }
            }
        } else {
            self.session.history.append(&tokens);
            (tokens, true)
        };

        let args: Vec<&str> = argv[1..].iter().map(String::as_str).collect();
        for factory in &self.builtins {
            if let Some(cmd) = factory.try_create(&argv[0], &args) {
                cmd.execute(out, &mut self.session)?;
                return Ok(());
            }
        }

        // Unrecognized names fall through to exec; one foreground child at
        // a time, waited on unconditionally.
        let child = ExternalCommand::new(&argv)?.spawn()?;
        if fresh {
            self.session.history.record_pid(child);
        }
        external::wait_for(child)?;
        Ok(())
    }

    /// Run the interactive loop until `quit` or end of input.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        let mut stdout = std::io::stdout();
        while !self.session.should_exit {
            match rl.readline("resh> ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    if let Err(err) = self.dispatch(&line, &mut stdout) {
                        println!("Error: {:?}", err);
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default builtin set: `cd`, `quit`,
    /// `history` and `pidhistory`.
    fn default() -> Self {
        Self::new(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Quit>::default()),
            Box::new(Factory::<ShowHistory>::default()),
            Box::new(Factory::<ShowPidHistory>::default()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_a_no_op() {
        let mut sh = Interpreter::default();
        let mut out = Vec::new();
        sh.dispatch("   \t  \n", &mut out).unwrap();
        assert!(sh.session.history.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn rerun_out_of_range_reports_and_appends_nothing() {
        let mut sh = Interpreter::default();
        let mut out = Vec::new();
        sh.dispatch("!3", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Out of range\n");
        assert!(sh.session.history.is_empty());
    }

    #[test]
    fn rerun_with_a_non_numeric_suffix_is_out_of_range() {
        let mut sh = Interpreter::default();
        let mut out = Vec::new();
        sh.dispatch("pidhistory", &mut out).unwrap();

        for bad in ["!x", "!", "!-1"] {
            out.clear();
            sh.dispatch(bad, &mut out).unwrap();
            assert_eq!(String::from_utf8(out.clone()).unwrap(), "Out of range\n");
        }
        assert_eq!(sh.session.history.len(), 1);
    }

    #[test]
    fn rerun_replays_the_target_without_a_new_entry() {
        let mut sh = Interpreter::default();
        let mut out = Vec::new();
        sh.dispatch("history", &mut out).unwrap();

        out.clear();
        sh.dispatch("!0", &mut out).unwrap();

        // Same listing as dispatching "history" again, but still one entry.
        assert_eq!(String::from_utf8(out).unwrap(), "0)   history \n");
        assert_eq!(sh.session.history.len(), 1);
    }

    #[test]
    fn external_command_records_a_pid_only_when_fresh() {
        let mut sh = Interpreter::default();
        let mut out = Vec::new();
        sh.dispatch("true", &mut out).unwrap();

        let recorded = sh.session.history.get(0).unwrap().pid();
        assert!(recorded.is_some());

        sh.dispatch("!0", &mut out).unwrap();
        assert_eq!(sh.session.history.len(), 1);
        assert_eq!(sh.session.history.get(0).unwrap().pid(), recorded);
    }

    #[test]
    fn unresolvable_program_still_leaves_a_recorded_pid() {
        let mut sh = Interpreter::default();
        let mut out = Vec::new();
        sh.dispatch("resh-no-such-program", &mut out).unwrap();

        assert_eq!(sh.session.history.len(), 1);
        assert!(sh.session.history.get(0).unwrap().pid().is_some());
    }

    #[test]
    fn builtin_lines_are_recorded_without_a_pid() {
        let mut sh = Interpreter::default();
        let mut out = Vec::new();
        sh.dispatch("pidhistory", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0)   no pid\n");
    }

    #[test]
    fn session_sequence_matches_shell_behaviour() {
        let mut sh = Interpreter::default();
        let mut out = Vec::new();

        sh.dispatch("true", &mut out).unwrap();
        sh.dispatch("false", &mut out).unwrap();
        sh.dispatch("!0", &mut out).unwrap();

        // The rerun spawned a process but added no entry.
        assert_eq!(sh.session.history.len(), 2);

        out.clear();
        sh.dispatch("history", &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out.clone()).unwrap(),
            "0)   true \n1)   false \n2)   history \n"
        );

        out.clear();
        sh.dispatch("quit", &mut out).unwrap();
        assert!(sh.session.should_exit);
        assert!(out.is_empty());
    }
}
