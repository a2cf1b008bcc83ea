//! General-purpose grouping of resources into inventory groups.
//!
//! A single pass over the resources builds five partitions:
//!
//! ```text
//! all             every address, plus every output as a variable
//! <base>.<n>      one group per instance
//! <base>          every instance of a block, ordered by counter
//! type_<type>     every instance of a resource type
//! <tag>[_<value>] every instance carrying a tag
//! ```
//!
//! The partitions are merged in the order above. When two partitions produce
//! the same group name the later one wins and a [`Collision`] is recorded.

use crate::uniq::append_uniq;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tfstate::{Output, Resource};

/// Name of the group holding every host and the global variables.
pub const ALL_GROUP: &str = "all";

/// The general "all" group: every host plus inventory-wide variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllGroup {
    /// Every resource address, sorted and deduplicated
    pub hosts: Vec<String>,
    /// Every output, keyed by its declared name
    pub vars: BTreeMap<String, Value>,
}

/// Contents of one named group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupEntry {
    /// Plain host list
    Hosts(Vec<String>),
    /// The all group, which also carries variables
    All(AllGroup),
}

/// Partition a group was produced by, in merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Partition {
    /// The all group
    All,
    /// `<base>.<counter>` groups
    Individual,
    /// `<base>` groups ordered by counter
    Ordered,
    /// `type_<type>` groups
    Type,
    /// Tag groups
    Tag,
}

impl Partition {
    /// Short lowercase name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Partition::All => "all",
            Partition::Individual => "individual",
            Partition::Ordered => "ordered",
            Partition::Type => "types",
            Partition::Tag => "tags",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A group name that was produced twice; the replacement was kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    /// Group name
    pub group: String,
    /// Partition whose value replaced the previous one
    pub partition: Partition,
    /// Value that was discarded
    pub previous: GroupEntry,
    /// Value that was kept
    pub replacement: GroupEntry,
}

/// Result of grouping: the merged groups and any name collisions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouping {
    /// Group name to contents, iterated in lexicographic order
    pub groups: BTreeMap<String, GroupEntry>,
    /// Overwrites that happened while building `groups`
    pub collisions: Vec<Collision>,
}

impl Grouping {
    /// Look up a group by name.
    pub fn get(&self, name: &str) -> Option<&GroupEntry> {
        self.groups.get(name)
    }

    /// Host list of a group, if it exists.
    pub fn hosts(&self, name: &str) -> Option<&[String]> {
        match self.groups.get(name)? {
            GroupEntry::Hosts(hosts) => Some(hosts),
            GroupEntry::All(all) => Some(&all.hosts),
        }
    }
}

/// Group resources by address, instance, block, type and tag.
pub fn gather_resources(resources: &[Resource], outputs: &[Output]) -> Grouping {
    let mut collisions = Vec::new();

    let mut all = AllGroup::default();
    let mut types: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut individual: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut tags: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut unsorted_ordered: BTreeMap<&str, Vec<&Resource>> = BTreeMap::new();

    for res in resources {
        let address = res.address();

        append_uniq(&mut all.hosts, &address);

        let type_group = format!("type_{}", res.resource_type);
        append_uniq(types.entry(type_group).or_default(), &address);

        unsorted_ordered
            .entry(res.base_name.as_str())
            .or_default()
            .push(res);

        let instance = format!("{}.{}", res.base_name, res.counter);
        let hosts = vec![address.clone()];
        if let Some(old) = individual.insert(instance.clone(), hosts.clone()) {
            record_collision(
                &mut collisions,
                instance,
                Partition::Individual,
                GroupEntry::Hosts(old),
                GroupEntry::Hosts(hosts),
            );
        }

        for (key, value) in res.tags() {
            // Valueless tags are grouped by key alone
            let tag = if value.is_empty() {
                key.to_string()
            } else {
                format!("{key}_{value}")
            };
            append_uniq(tags.entry(tag).or_default(), &address);
        }
    }

    for out in outputs {
        all.vars.insert(out.key_name.clone(), out.value.clone());
    }

    let ordered: BTreeMap<String, Vec<String>> = unsorted_ordered
        .into_iter()
        .map(|(base_name, mut instances)| {
            instances.sort_by_key(|res| res.counter);
            let hosts: Vec<String> = instances.iter().map(|res| res.address()).collect();
            (base_name.to_string(), hosts)
        })
        .collect();

    let mut groups = BTreeMap::new();
    groups.insert(ALL_GROUP.to_string(), GroupEntry::All(all));

    for (partition, partition_groups) in [
        (Partition::Individual, individual),
        (Partition::Ordered, ordered),
        (Partition::Type, types),
        (Partition::Tag, tags),
    ] {
        for (name, hosts) in partition_groups {
            let replacement = GroupEntry::Hosts(hosts);
            if let Some(previous) = groups.insert(name.clone(), replacement.clone()) {
                record_collision(&mut collisions, name, partition, previous, replacement);
            }
        }
    }

    Grouping { groups, collisions }
}

fn record_collision(
    collisions: &mut Vec<Collision>,
    group: String,
    partition: Partition,
    previous: GroupEntry,
    replacement: GroupEntry,
) {
    log::warn!(
        "{partition} overwriting already existing group {group}, old: {previous:?}, new: {replacement:?}"
    );
    collisions.push(Collision {
        group,
        partition,
        previous,
        replacement,
    });
}
