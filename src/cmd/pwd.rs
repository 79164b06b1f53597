//! The `pwd` builtin

use super::Outputter;
use crate::context::Context;
use crate::errors::CommandError;

/// Prints the current location
pub struct PwdCommand<'a> {
    context: &'a Context,
}

impl<'a> PwdCommand<'a> {
    /// The store and the arguments are not used.
    pub fn new<S: ?Sized>(_store: &'a S, context: &'a Context, _args: &'a [String]) -> Self {
        Self { context }
    }

    pub fn execute(&mut self, out: &mut dyn Outputter) -> Result<(), CommandError> {
        out.print(&self.context.current().to_string());
        Ok(())
    }

    pub fn is_long_running(&self) -> bool {
        false
    }
}
