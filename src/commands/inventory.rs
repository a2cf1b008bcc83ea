//! `--inventory`: every group in INI format

use anyhow::Result;
use inventory::{gather_resources, write_inventory};
use std::io::Write;
use tfstate::State;

pub fn run<W: Write>(out: &mut W, state: &State) -> Result<()> {
    let grouping = gather_resources(state.resources(), state.outputs());
    if !grouping.collisions.is_empty() {
        log::info!(
            "{} group names were produced more than once",
            grouping.collisions.len()
        );
    }
    write_inventory(out, &grouping)?;
    Ok(())
}
