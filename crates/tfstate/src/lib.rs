//! # tfstate
//!
//! Read-only model of Terraform state snapshots.
//!
//! This crate provides:
//! - Loading of local state files in the legacy (v1-v3) and current (v4) formats
//! - A flat [`Resource`] view with dotted attribute keys and derived tags
//! - The state's [`Output`] values
//!
//! ## Example
//!
//! ```no_run
//! use tfstate::State;
//! use std::path::Path;
//!
//! let state = State::load(Path::new("terraform.tfstate"))?;
//! for res in state.resources() {
//!     println!("{} in {}", res.address(), res.attribute("availability_zone"));
//! }
//! # Ok::<(), tfstate::Error>(())
//! ```

mod error;
pub mod parser;
mod types;

pub use error::{Error, Result};
pub use types::{Output, Resource};

use std::path::Path;

/// A parsed state snapshot.
#[derive(Debug, Clone, Default)]
pub struct State {
    resources: Vec<Resource>,
    outputs: Vec<Output>,
}

impl State {
    /// Build a state directly from resources and outputs.
    pub fn new(resources: Vec<Resource>, outputs: Vec<Output>) -> Self {
        Self { resources, outputs }
    }

    /// Parse a state document from a string.
    pub fn from_json(content: &str) -> Result<Self> {
        let (resources, outputs) = parser::parse_string(content)?;
        Ok(Self::new(resources, outputs))
    }

    /// Load a state file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let state = Self::from_json(&content)?;
        log::debug!(
            "Loaded {} resources and {} outputs from {}",
            state.resources.len(),
            state.outputs.len(),
            path.display()
        );
        Ok(state)
    }

    /// Managed resource instances.
    ///
    /// v4 states keep document order; v3 states are sorted by key within each module.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Outputs, sorted by key name.
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }
}
