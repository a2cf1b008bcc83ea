//! `--host`: attributes of a single resource

use anyhow::Result;
use inventory::{HostLookup, write_host};
use std::io::Write;
use tfstate::State;

pub fn run<W: Write>(out: &mut W, state: &State, hostname: &str) -> Result<HostLookup> {
    let lookup = write_host(out, state.resources(), hostname)?;
    if lookup == HostLookup::NotFound {
        log::warn!("Host {hostname} not found in state");
    }
    Ok(lookup)
}
