//! The `ls` builtin

use super::{Outputter, first_arg};
use crate::constants::PATH_DELIMITER;
use crate::context::{Context, Location};
use crate::errors::CommandError;
use crate::resolve::{TargetKind, resolve};
use crate::storage::ObjectStore;

/// Lists a location, the current one if no argument is given
///
/// At the root it lists buckets. Elsewhere it lists the prefixes and objects one level down.
/// Never changes the current location.
pub struct LsCommand<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    context: &'a Context,
    args: &'a [String],
}

impl<'a, S: ObjectStore + ?Sized> LsCommand<'a, S> {
    pub fn new(store: &'a S, context: &'a Context, args: &'a [String]) -> Self {
        Self {
            store,
            context,
            args,
        }
    }

    pub fn execute(&mut self, out: &mut dyn Outputter) -> Result<(), CommandError> {
        let arg = first_arg(self.args).unwrap_or_default();
        let target = resolve(self.context.current(), arg)?;
        let location = &target.location;
        let bucket = location.bucket_name();

        match target.kind {
            TargetKind::Root => {
                for bucket in self.store.list_buckets()? {
                    out.print(&format!("{bucket}{PATH_DELIMITER}"));
                }
                return Ok(());
            }
            TargetKind::Bucket => {
                if !self.store.bucket_exists(bucket)? {
                    return Err(CommandError::TargetNotFound(shown(arg, location)));
                }
            }
            TargetKind::Prefix => {
                if !self.store.path_exists(bucket, location.key_prefix())? {
                    return Err(CommandError::TargetNotFound(shown(arg, location)));
                }
            }
        }

        for entry in self.store.list(bucket, location.key_prefix())? {
            out.print(&entry.to_string());
        }

        Ok(())
    }

    /// Listing always goes to the store, so this is true whenever the argument resolves.
    pub fn is_long_running(&self) -> bool {
        resolve(
            self.context.current(),
            first_arg(self.args).unwrap_or_default(),
        )
        .is_ok()
    }
}

/// What a missing target is called: the argument as typed, or the full location when there was none
fn shown(arg: &str, location: &Location) -> String {
    match arg.is_empty() {
        true => location.to_string(),
        false => arg.to_string(),
    }
}
