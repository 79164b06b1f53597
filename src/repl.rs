//! REPL (Read-Eval-Print Loop)
//!
//! The main shell loop.
//!
//! Takes user input, parses it, builds the matching [`Command`] and runs it,
//! one command at a time. Commands that have to wait on the store run under a spinner.
//!
//! # References
//!
//! - [REPL @ Wikipedia](https://en.wikipedia.org/wiki/Read%E2%80%93eval%E2%80%93print_loop)

use crate::cmd::{BufferedOutput, CdCommand, Command, NullOutputter, Outputter};
use crate::constants::{COMMANDS, PROMPT_SUFFIX, SPINNER_FRAMES, SPINNER_INTERVAL_MS};
use crate::context::Context;
use crate::errors::CommandError;
use crate::parse::parse_input;
use crate::storage::ObjectStore;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Feedback shown while a long-running command waits on the store
pub trait Progress {
    fn start(&mut self);
    fn stop(&mut self);
}

/// [`Progress`] drawn by a [`Spinner`]
#[derive(Default)]
pub struct SpinnerProgress {
    spinner: Option<Spinner>,
}

impl Progress for SpinnerProgress {
    fn start(&mut self) {
        self.spinner = Some(Spinner::start());
    }

    fn stop(&mut self) {
        // Dropping joins the drawing thread
        self.spinner = None;
    }
}

/// Owns the store and the session, and turns input lines into commands
pub struct Dispatcher<S: ObjectStore> {
    store: S,
    context: Context,
    show_prompt: bool,
    progress: Option<Box<dyn Progress>>,
}

impl<S: ObjectStore> Dispatcher<S> {
    /// A dispatcher with neither prompt nor spinner
    pub fn new(store: S, context: Context) -> Self {
        Self {
            store,
            context,
            show_prompt: false,
            progress: None,
        }
    }

    /// Print a prompt before reading each line
    pub fn with_prompt(mut self, show_prompt: bool) -> Self {
        self.show_prompt = show_prompt;
        self
    }

    /// Draw a spinner while long-running commands execute
    pub fn with_progress(self, show_progress: bool) -> Self {
        match show_progress {
            true => self.with_progress_indicator(SpinnerProgress::default()),
            false => Self {
                progress: None,
                ..self
            },
        }
    }

    /// Use `progress` as the feedback for long-running commands
    pub fn with_progress_indicator(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn prompt(&self) -> String {
        format!("{}{PROMPT_SUFFIX}", self.context.current())
    }

    /// Moves the session to `path` exactly as `cd path` would
    pub fn change_dir(&mut self, path: &str) -> Result<(), CommandError> {
        let args = [path.to_string()];
        CdCommand::new(&self.store, &mut self.context, &args).execute(&mut NullOutputter)
    }

    /// Runs the loop until the input ends or `exit` is entered, and returns the exit code
    pub fn run(&mut self, input: impl BufRead, out: &mut dyn Outputter) -> io::Result<i32> {
        info!(location = %self.context.current(), "session started");

        let mut lines = input.lines();
        let code = loop {
            if self.show_prompt {
                print!("{}", self.prompt());
                io::stdout().flush()?;
            }

            let Some(line) = lines.next() else {
                break 0;
            };
            if let ControlFlow::Break(code) = self.handle_line(&line?, out) {
                break code;
            }
        };

        info!(code, "session ended");
        Ok(code)
    }

    /// Parses a single line and runs it
    ///
    /// Errors are reported through `out`. Breaks with the exit code on `exit`.
    pub fn handle_line(&mut self, line: &str, out: &mut dyn Outputter) -> ControlFlow<i32> {
        let items = match parse_input(line.trim()) {
            Ok(items) => items,
            Err(err) => {
                out.error(&err.to_string());
                return ControlFlow::Continue(());
            }
        };

        let Some((verb, args)) = items.split_first() else {
            return ControlFlow::Continue(());
        };
        debug!(verb, ?args, "dispatching");

        match verb.as_str() {
            "exit" => return handle_exit(args, out),
            "type" => {
                handle_type(args, out);
                return ControlFlow::Continue(());
            }
            _ => {}
        }

        let Some(mut command) = Command::new(verb, &self.store, &mut self.context, args) else {
            out.error(&CommandError::UnknownCommand(verb.clone()).to_string());
            return ControlFlow::Continue(());
        };

        let result = match &mut self.progress {
            // Output is held back until the spinner is gone, so frames never land inside it
            Some(progress) if command.is_long_running() => {
                let mut buffered = BufferedOutput::new();
                progress.start();
                let result = command.execute(&mut buffered);
                progress.stop();
                buffered.replay(out);
                result
            }
            _ => command.execute(out),
        };

        if let Err(err) = result {
            if let CommandError::Probe(probe_err) = &err {
                warn!(verb, error = %probe_err, "storage request failed");
            }
            out.error(&format!("{}: {err}", command.name()));
        }

        ControlFlow::Continue(())
    }
}

/// Handler for the `exit` builtin
fn handle_exit(args: &[String], out: &mut dyn Outputter) -> ControlFlow<i32> {
    let Some(arg) = args.first() else {
        return ControlFlow::Break(0);
    };

    match arg.trim().parse::<i32>() {
        Ok(code) => ControlFlow::Break(code),
        Err(_) => {
            let err = CommandError::Usage(format!("{arg}: numeric argument required"));
            out.error(&format!("exit: {err}"));
            ControlFlow::Continue(())
        }
    }
}

/// Handler for the `type` builtin
fn handle_type(args: &[String], out: &mut dyn Outputter) {
    for arg in args {
        match COMMANDS.contains(&arg.as_str()) {
            true => out.print(&format!("{arg} is a shell builtin")),
            false => out.error(&format!("type: {arg}: not found")),
        }
    }
}

/// Progress feedback on `stderr`
///
/// Draws from a background thread until dropped.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start() -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::spawn(move || {
            let mut stderr = io::stderr();
            for frame in SPINNER_FRAMES.iter().cycle() {
                if !flag.load(Ordering::Acquire) {
                    break;
                }
                let _ = write!(stderr, "\r{frame}");
                let _ = stderr.flush();
                thread::sleep(Duration::from_millis(SPINNER_INTERVAL_MS));
            }
            let _ = write!(stderr, "\r \r");
            let _ = stderr.flush();
        });

        Self {
            running,
            handle: Some(handle),
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
