//! The bounded FIFO ledger of past commands.

use crate::lexer::MAX_ARGS;
use nix::unistd::Pid;
use std::collections::VecDeque;
use std::io::{self, Write};

/// Number of commands the ledger remembers before evicting the oldest.
pub const MAX_HISTORY: usize = 15;

/// One recorded command: its argument vector plus, once the command has
/// been spawned as a child process, the pid of that child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    args: Vec<String>,
    pid: Option<Pid>,
}

impl Entry {
    /// The recorded argument vector; element 0 is the command name.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Pid of the process spawned for this command, if one was spawned.
    /// Built-ins never get one.
    pub fn pid(&self) -> Option<Pid> {
        self.pid
    }
}

/// Ordered collection of [`Entry`] values, capacity [`MAX_HISTORY`], strict
/// FIFO eviction by insertion order.
///
/// Index 0 is always the oldest surviving entry, so indices shift on
/// eviction and are only meaningful against the current contents.
/// Re-running an entry does not refresh its position.
#[derive(Debug, Default)]
pub struct History {
    entries: VecDeque<Entry>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_HISTORY),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy `args` into a new tail entry with no pid recorded.
    ///
    /// At capacity the head entry is evicted first, so len never exceeds
    /// [`MAX_HISTORY`].
    pub fn append(&mut self, args: &[String]) {
        debug_assert!(!args.is_empty() && args.len() <= MAX_ARGS);
        if self.entries.len() == MAX_HISTORY {
            self.entries.pop_front();
        }
        self.entries.push_back(Entry {
            args: args.to_vec(),
            pid: None,
        });
    }

    /// Record the pid of the process spawned for the tail entry.
    ///
    /// The dispatcher only calls this right after the append it performed
    /// for the same command; an empty ledger here is a logic error.
    pub fn record_pid(&mut self, pid: Pid) {
        let tail = self
            .entries
            .back_mut()
            .expect("record_pid on an empty history");
        debug_assert!(tail.pid.is_none(), "pid recorded twice for one entry");
        tail.pid = Some(pid);
    }

    /// Entry at `index`, 0-based from the oldest surviving entry.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Write every entry, oldest first, one line each, a space after every
    /// token including the last.
    pub fn print_all(&self, out: &mut dyn Write) -> io::Result<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            write!(out, "{})   ", index)?;
            for arg in &entry.args {
                write!(out, "{} ", arg)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Write every entry's index and recorded pid, oldest first; entries
    /// that never spawned a process print `no pid`.
    pub fn print_pids(&self, out: &mut dyn Write) -> io::Result<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            match entry.pid {
                Some(pid) => writeln!(out, "{})   {}", index, pid)?,
                None => writeln!(out, "{})   no pid", index)?,
            }
        }
        Ok(())
    }
}
