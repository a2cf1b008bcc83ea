//! # inventory
//!
//! Turns the resources and outputs of a Terraform state into Ansible
//! inventories.
//!
//! This crate provides:
//! - [`gather_resources`]: general grouping by address, instance, block, type
//!   and tag, with name collisions reported instead of failing
//! - [`gather_ansible`]: the `--list` shape Ansible dynamic inventories expect
//! - Writers for JSON, the grouped line format and single-host queries
//!
//! ## Example
//!
//! ```
//! use inventory::{gather_resources, write_inventory};
//! use tfstate::Resource;
//!
//! let resources = vec![
//!     Resource::new("aws_instance", "web", 1),
//!     Resource::new("aws_instance", "web", 0),
//! ];
//! let grouping = gather_resources(&resources, &[]);
//! assert_eq!(
//!     grouping.hosts("web").unwrap(),
//!     ["aws_instance.web.0", "aws_instance.web.1"]
//! );
//!
//! let mut out: Vec<u8> = Vec::new();
//! write_inventory(&mut out, &grouping)?;
//! # Ok::<(), inventory::Error>(())
//! ```

#![warn(missing_docs)]

pub mod ansible;
mod error;
pub mod grouping;
pub mod render;
pub mod uniq;

pub use ansible::{
    AnsibleChildren, AnsibleConfig, AnsibleGroup, AnsibleInventory, AnsibleMeta, gather_ansible,
};
pub use error::{Error, Result};
pub use grouping::{AllGroup, Collision, GroupEntry, Grouping, Partition, gather_resources};
pub use render::{HostLookup, write_host, write_inventory, write_json};
pub use uniq::append_uniq;
