//! `--list`: the Ansible dynamic inventory as JSON

use anyhow::Result;
use inventory::{AnsibleConfig, gather_ansible, write_json};
use std::io::Write;
use tfstate::State;

pub fn run<W: Write>(out: &mut W, state: &State, config: &AnsibleConfig) -> Result<()> {
    let ansible = gather_ansible(state.resources(), state.outputs(), config);
    write_json(out, &ansible)?;
    Ok(())
}
