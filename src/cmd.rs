//! Commands
//!
//! Every builtin verb is a [`Command`] variant sharing one contract:
//!
//! - it is built from a storage capability, the session [`Context`] and its arguments
//! - [`Command::is_long_running`] tells, without touching the network, whether
//!   [`Command::execute`] will wait on the store
//! - [`Command::execute`] reports through an [`Outputter`] and returns the first error;
//!   store errors are returned as they came, and the context is changed at most once,
//!   only on success

pub mod cd;
pub mod ls;
pub mod pwd;

pub use cd::CdCommand;
pub use ls::LsCommand;
pub use pwd::PwdCommand;

use crate::context::Context;
use crate::errors::CommandError;
use crate::storage::ObjectStore;

/// Where commands write their results
pub trait Outputter {
    /// Writes a line of regular output
    fn print(&mut self, line: &str);
    /// Writes a line of error output
    fn error(&mut self, line: &str);
}

/// Writes to `stdout` and `stderr`
#[derive(Debug, Default)]
pub struct ConsoleOutputter;

impl Outputter for ConsoleOutputter {
    fn print(&mut self, line: &str) {
        println!("{line}");
    }

    fn error(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// Collects output in memory
///
/// Contains fields `stdout` and `stderr` that hold the respective lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BufferedOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the `stdout` and `stderr` lines, leaving the buffers empty
    pub fn take(&mut self) -> (Vec<String>, Vec<String>) {
        (
            std::mem::take(&mut self.stdout),
            std::mem::take(&mut self.stderr),
        )
    }

    /// Writes the buffered `stdout` lines, then the `stderr` lines, to `out`
    pub fn replay(self, out: &mut dyn Outputter) {
        for line in &self.stdout {
            out.print(line);
        }
        for line in &self.stderr {
            out.error(line);
        }
    }
}

impl Outputter for BufferedOutput {
    fn print(&mut self, line: &str) {
        self.stdout.push(line.to_string());
    }

    fn error(&mut self, line: &str) {
        self.stderr.push(line.to_string());
    }
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullOutputter;

impl Outputter for NullOutputter {
    fn print(&mut self, _line: &str) {}

    fn error(&mut self, _line: &str) {}
}

/// A single invocation of a builtin
///
/// Created per input line and dropped after [`Command::execute`] returns.
pub enum Command<'a, S: ObjectStore + ?Sized> {
    Cd(CdCommand<'a, S>),
    Ls(LsCommand<'a, S>),
    Pwd(PwdCommand<'a>),
}

impl<'a, S: ObjectStore + ?Sized> Command<'a, S> {
    /// Builds the command for `verb`, or `None` if `verb` is not a builtin
    pub fn new(
        verb: &str,
        store: &'a S,
        context: &'a mut Context,
        args: &'a [String],
    ) -> Option<Self> {
        match verb {
            "cd" => Some(Command::Cd(CdCommand::new(store, context, args))),
            "ls" => Some(Command::Ls(LsCommand::new(store, context, args))),
            "pwd" => Some(Command::Pwd(PwdCommand::new(store, context, args))),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Cd(_) => "cd",
            Command::Ls(_) => "ls",
            Command::Pwd(_) => "pwd",
        }
    }

    pub fn execute(&mut self, out: &mut dyn Outputter) -> Result<(), CommandError> {
        match self {
            Command::Cd(cmd) => cmd.execute(out),
            Command::Ls(cmd) => cmd.execute(out),
            Command::Pwd(cmd) => cmd.execute(out),
        }
    }

    pub fn is_long_running(&self) -> bool {
        match self {
            Command::Cd(cmd) => cmd.is_long_running(),
            Command::Ls(cmd) => cmd.is_long_running(),
            Command::Pwd(cmd) => cmd.is_long_running(),
        }
    }
}

/// The path argument of a command, if one was given
///
/// Only the first argument counts, and an empty one counts as none.
fn first_arg(args: &[String]) -> Option<&str> {
    args.first().map(String::as_str).filter(|arg| !arg.is_empty())
}
