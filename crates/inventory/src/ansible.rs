//! Ansible dynamic inventory projection (`--list`).
//!
//! Only resources of one configured type take part. Each becomes a synthesized
//! host `<base_name>.<availability_zone>.<suffix>` placed in the group named by
//! its group tag:
//!
//! ```json
//! {
//!   "_meta": { "hostvars": { "web.eu-west-1a.aws": { "port": "8080" } } },
//!   "all": { "children": ["frontend"] },
//!   "frontend": { "hosts": ["web.eu-west-1a.aws"] }
//! }
//! ```

use crate::grouping::ALL_GROUP;
use crate::uniq::append_uniq;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tfstate::{Output, Resource};

/// Key of the per-host variable section.
pub const META_GROUP: &str = "_meta";

/// Attribute holding the availability zone used in host names.
const AVAILABILITY_ZONE_ATTRIBUTE: &str = "availability_zone";

/// Which resources participate and how their hosts are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsibleConfig {
    /// Resource type that becomes Ansible hosts (e.g., "aws_instance")
    pub resource_type: String,
    /// Tag whose value names the host's group (e.g., "ansible_group")
    pub group_tag: String,
    /// Last segment of synthesized host names (e.g., "aws")
    pub host_suffix: String,
}

impl Default for AnsibleConfig {
    fn default() -> Self {
        Self {
            resource_type: "aws_instance".to_string(),
            group_tag: "ansible_group".to_string(),
            host_suffix: "aws".to_string(),
        }
    }
}

impl AnsibleConfig {
    /// Flattened attribute key carrying the group tag.
    fn group_attribute(&self) -> String {
        format!("tags.{}", self.group_tag)
    }

    /// Host name synthesized for a resource.
    pub fn host_name(&self, res: &Resource) -> String {
        format!(
            "{}.{}.{}",
            res.base_name,
            res.attribute(AVAILABILITY_ZONE_ATTRIBUTE),
            self.host_suffix
        )
    }
}

/// The Ansible `all` group: child group names, not hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnsibleChildren {
    /// Distinct group-tag values, sorted
    pub children: Vec<String>,
}

/// Per-host variables, emitted under `_meta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnsibleMeta {
    /// Host name to variable name to value
    pub hostvars: BTreeMap<String, BTreeMap<String, Value>>,
}

/// Hosts of one group-tag value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnsibleGroup {
    /// Host names in resource order, duplicates kept
    pub hosts: Vec<String>,
}

/// Inventory in the shape Ansible expects from `--list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnsibleInventory {
    /// Emitted as `all`
    pub all: AnsibleChildren,
    /// Emitted as `_meta`
    pub meta: AnsibleMeta,
    /// One entry per group-tag value
    pub groups: BTreeMap<String, AnsibleGroup>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum InventoryEntry<'a> {
    Children(&'a AnsibleChildren),
    Meta(&'a AnsibleMeta),
    Group(&'a AnsibleGroup),
}

impl Serialize for AnsibleInventory {
    /// Flattens into one map with sorted keys. A tag group named `all` or
    /// `_meta` replaces the built-in entry.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries = BTreeMap::new();
        entries.insert(ALL_GROUP, InventoryEntry::Children(&self.all));
        entries.insert(META_GROUP, InventoryEntry::Meta(&self.meta));
        for (name, group) in &self.groups {
            entries.insert(name.as_str(), InventoryEntry::Group(group));
        }
        entries.serialize(serializer)
    }
}

/// Variables for one resource taken from outputs named after it.
///
/// An output belongs to the resource when its key contains `<type>_<base_name>`;
/// the first `<type>_<base_name>_` is removed to form the variable name.
pub fn resource_vars(res: &Resource, outputs: &[Output]) -> BTreeMap<String, Value> {
    let prefix = res.output_prefix();
    let strip = format!("{prefix}_");

    outputs
        .iter()
        .filter(|out| out.key_name.contains(&prefix))
        .map(|out| (out.key_name.replacen(&strip, "", 1), out.value.clone()))
        .collect()
}

/// Build the Ansible inventory from resources of the configured type.
pub fn gather_ansible(
    resources: &[Resource],
    outputs: &[Output],
    config: &AnsibleConfig,
) -> AnsibleInventory {
    let mut inventory = AnsibleInventory::default();
    let group_attribute = config.group_attribute();

    for res in resources
        .iter()
        .filter(|res| res.resource_type == config.resource_type)
    {
        let group_name = res.attribute(&group_attribute);
        let host_name = config.host_name(res);

        append_uniq(&mut inventory.all.children, group_name);
        inventory
            .groups
            .entry(group_name.to_string())
            .or_default()
            .hosts
            .push(host_name.clone());

        if !outputs.is_empty() {
            inventory
                .meta
                .hostvars
                .insert(host_name, resource_vars(res, outputs));
        }
    }

    log::debug!(
        "Ansible projection: {} groups, {} hosts with vars",
        inventory.groups.len(),
        inventory.meta.hostvars.len()
    );
    inventory
}
