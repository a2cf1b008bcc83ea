use clap::{ArgGroup, Parser};
use clap_complete::Shell;
use inventory::AnsibleConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tfinventory")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Ansible dynamic inventory from Terraform state", long_about = None)]
#[command(group(ArgGroup::new("mode").args(["list", "host", "inventory"])))]
pub struct Cli {
    /// Print the Ansible inventory as JSON (default)
    #[arg(short, long)]
    pub list: bool,

    /// Print the attributes of one resource as JSON
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Print a static inventory in INI format
    #[arg(long)]
    pub inventory: bool,

    /// State file, or directory containing terraform.tfstate
    #[arg(value_name = "STATE_PATH")]
    pub state: Option<PathBuf>,

    /// Resource type that becomes Ansible hosts in --list
    #[arg(
        long,
        env = "TF_INVENTORY_ANSIBLE_TYPE",
        default_value = "aws_instance"
    )]
    pub ansible_type: String,

    /// Tag whose value names a host's group in --list
    #[arg(long, env = "TF_INVENTORY_GROUP_TAG", default_value = "ansible_group")]
    pub group_tag: String,

    /// Suffix of host names synthesized in --list
    #[arg(long, env = "TF_INVENTORY_HOST_SUFFIX", default_value = "aws")]
    pub host_suffix: String,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// What to print
#[derive(Debug, PartialEq, Eq)]
pub enum Mode<'a> {
    List,
    Host(&'a str),
    Inventory,
}

impl Cli {
    pub fn mode(&self) -> Mode<'_> {
        if let Some(host) = &self.host {
            Mode::Host(host)
        } else if self.inventory {
            Mode::Inventory
        } else {
            Mode::List
        }
    }

    pub fn ansible_config(&self) -> AnsibleConfig {
        AnsibleConfig {
            resource_type: self.ansible_type.clone(),
            group_tag: self.group_tag.clone(),
            host_suffix: self.host_suffix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_mode_is_list() {
        let cli = Cli::try_parse_from(["tfinventory"]).unwrap();
        assert_eq!(cli.mode(), Mode::List);
        assert!(cli.state.is_none());
    }

    #[test]
    fn test_host_mode() {
        let cli = Cli::try_parse_from(["tfinventory", "--host", "aws_instance.web.0"]).unwrap();
        assert_eq!(cli.mode(), Mode::Host("aws_instance.web.0"));
    }

    #[test]
    fn test_inventory_mode_with_path() {
        let cli = Cli::try_parse_from(["tfinventory", "--inventory", "prod.tfstate"]).unwrap();
        assert_eq!(cli.mode(), Mode::Inventory);
        assert_eq!(cli.state, Some(PathBuf::from("prod.tfstate")));
    }

    #[test]
    fn test_modes_are_exclusive() {
        assert!(Cli::try_parse_from(["tfinventory", "--list", "--inventory"]).is_err());
        assert!(Cli::try_parse_from(["tfinventory", "--list", "--host", "x"]).is_err());
    }

    #[test]
    fn test_ansible_config_flags() {
        let cli = Cli::try_parse_from([
            "tfinventory",
            "--ansible-type",
            "google_compute_instance",
            "--group-tag",
            "role",
            "--host-suffix",
            "gcp",
        ])
        .unwrap();

        let config = cli.ansible_config();
        assert_eq!(config.resource_type, "google_compute_instance");
        assert_eq!(config.group_tag, "role");
        assert_eq!(config.host_suffix, "gcp");
    }
}
