//! The `cd` builtin

use super::{Outputter, first_arg};
use crate::context::Context;
use crate::errors::CommandError;
use crate::resolve::{TargetKind, resolve};
use crate::storage::StorageProbe;
use tracing::debug;

/// Changes the current location
///
/// - no argument: stays where it is
/// - `/`: goes to the namespace root
/// - anything else: resolves it against the current location, asks the store
///   whether the bucket or prefix exists, and moves there if it does
pub struct CdCommand<'a, P: StorageProbe + ?Sized> {
    probe: &'a P,
    context: &'a mut Context,
    args: &'a [String],
}

impl<'a, P: StorageProbe + ?Sized> CdCommand<'a, P> {
    /// Only the first argument is used.
    pub fn new(probe: &'a P, context: &'a mut Context, args: &'a [String]) -> Self {
        Self {
            probe,
            context,
            args,
        }
    }

    pub fn execute(&mut self, _out: &mut dyn Outputter) -> Result<(), CommandError> {
        let Some(arg) = first_arg(self.args) else {
            return Ok(());
        };

        let target = resolve(self.context.current(), arg)?;
        let location = &target.location;

        let exists = match target.kind {
            TargetKind::Root => true,
            TargetKind::Bucket => self.probe.bucket_exists(location.bucket_name())?,
            TargetKind::Prefix => self
                .probe
                .path_exists(location.bucket_name(), location.key_prefix())?,
        };
        debug!(arg, target = %location, exists, "cd");

        if !exists {
            return Err(CommandError::TargetNotFound(arg.to_string()));
        }

        self.context.commit(target.location);
        Ok(())
    }

    /// True when the target is a bucket or a prefix, since only those are probed
    pub fn is_long_running(&self) -> bool {
        first_arg(self.args)
            .and_then(|arg| resolve(self.context.current(), arg).ok())
            .is_some_and(|target| target.needs_probe())
    }
}
