//! State file resolution
//!
//! # Environment Variables
//!
//! - `TF_STATE` - State file, or directory holding `terraform.tfstate`
//!
//! # Resolution Priority
//!
//! 1. `STATE_PATH` command-line argument
//! 2. `TF_STATE` environment variable
//! 3. The current directory
//!
//! `~` and `$VARS` are expanded. A directory resolves to the
//! `terraform.tfstate` file inside it.

use std::path::{Path, PathBuf};

/// Environment variable for the state path
pub const ENV_STATE: &str = "TF_STATE";

/// File looked up when the state path is a directory
pub const DEFAULT_STATE_FILE: &str = "terraform.tfstate";

/// Resolve the state file to read.
pub fn state_path(arg: Option<&Path>) -> PathBuf {
    resolve_state_path(arg, std::env::var(ENV_STATE).ok())
}

fn resolve_state_path(arg: Option<&Path>, env_value: Option<String>) -> PathBuf {
    let raw = match (arg, env_value) {
        (Some(path), _) => {
            log::debug!("Using state path from argument: {}", path.display());
            path.to_string_lossy().into_owned()
        }
        (None, Some(value)) if !value.is_empty() => {
            log::debug!("Using state path from {ENV_STATE}: {value}");
            value
        }
        _ => {
            log::debug!("Using current directory for state");
            ".".to_string()
        }
    };

    let path = expand(&raw);
    if path.is_dir() {
        path.join(DEFAULT_STATE_FILE)
    } else {
        path
    }
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}
