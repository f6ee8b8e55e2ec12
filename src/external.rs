use crate::command::ExitCode;
use anyhow::{Context, Result};
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, execvp};
use std::ffi::CString;

/// Command that is not a builtin, run as a child process.
///
/// The argument vector is converted up front to the NUL-terminated strings
/// exec expects; element 0 doubles as the program name, looked up through
/// PATH by `execvp` itself.
pub(crate) struct ExternalCommand {
    argv: Vec<CString>,
}

impl ExternalCommand {
    pub(crate) fn new(argv: &[String]) -> Result<Self> {
        debug_assert!(!argv.is_empty());
        let argv = argv
            .iter()
            .map(|arg| {
                CString::new(arg.as_str())
                    .with_context(|| format!("argument contains a NUL byte: {:?}", arg))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { argv })
    }

    /// Fork and exec, returning the child's pid to the parent.
    ///
    /// The child never returns: `execvp` replaces it on success, and on
    /// failure it prints `Command not found` and exits 0 so the parent's
    /// wait always completes.
    pub(crate) fn spawn(&self) -> Result<Pid> {
        match unsafe { nix::unistd::fork() }.context("fork failed")? {
            ForkResult::Child => {
                let _ = execvp(&self.argv[0], &self.argv);
                println!("Command not found");
                std::process::exit(0);
            }
            ForkResult::Parent { child } => Ok(child),
        }
    }
}

/// Block until `child` terminates.
///
/// The status is folded into a shell-style exit code (128+signal for signal
/// deaths); callers are free to ignore it.
pub(crate) fn wait_for(child: Pid) -> Result<ExitCode> {
    match waitpid(child, None).context("waitpid failed")? {
        WaitStatus::Exited(_, code) => Ok(code),
        WaitStatus::Signaled(_, signal, _) => Ok(128 + signal as i32),
        _ => Ok(-1),
    }
}
