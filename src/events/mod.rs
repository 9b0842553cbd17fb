use crate::cli::Args;
use crate::events::env::{EVENTFINDA_PASSWORD, EVENTFINDA_USERNAME};
use crate::warn_if_env_var_is_missing;

pub mod consts;
pub mod env;
pub mod eventfinda;
pub mod memory;
pub mod models;
pub mod source;

pub fn init(args: &Args) {
    if args.events_file.is_some() {
        return;
    }
    warn_if_env_var_is_missing!(EVENTFINDA_USERNAME, "Requests will be sent unauthenticated.");
    warn_if_env_var_is_missing!(EVENTFINDA_PASSWORD, "Requests will be sent unauthenticated.");
}

#[cfg(test)]
pub mod tests;
