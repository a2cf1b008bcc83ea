//! Core types for Terraform state snapshots.

use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute prefix under which resource tags are flattened.
const TAG_PREFIX: &str = "tags.";

/// Flatmap key holding the number of entries in a map attribute.
const MAP_COUNT_KEY: &str = "%";

/// A single provisioned resource instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Name shared by every instance of the declaring block (e.g., "web")
    pub base_name: String,
    /// Resource type (e.g., "aws_instance")
    pub resource_type: String,
    /// Zero-based ordinal among instances sharing `base_name`
    pub counter: u64,
    /// Module path for resources outside the root module (e.g., "module.blue")
    pub module: Option<String>,
    attributes: BTreeMap<String, String>,
}

impl Resource {
    /// Create a resource with no attributes.
    pub fn new(
        resource_type: impl Into<String>,
        base_name: impl Into<String>,
        counter: u64,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            resource_type: resource_type.into(),
            counter,
            module: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Place the resource in a child module.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Set a single flattened attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replace all attributes.
    pub fn with_attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Add a tag, stored as a `tags.<key>` attribute.
    pub fn with_tag(self, key: &str, value: impl Into<String>) -> Self {
        self.with_attribute(format!("{TAG_PREFIX}{key}"), value)
    }

    /// Flattened attributes (`tags.Role`, `network.#`, ...).
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Look up one attribute, treating a missing key as the empty string.
    pub fn attribute(&self, key: &str) -> &str {
        self.attributes.get(key).map_or("", String::as_str)
    }

    /// Tags carried by this resource, keyed without the `tags.` prefix.
    ///
    /// The flatmap count entry (`tags.%`) is not a tag and is skipped.
    pub fn tags(&self) -> BTreeMap<&str, &str> {
        self.attributes
            .iter()
            .filter_map(|(key, value)| {
                let tag = key.strip_prefix(TAG_PREFIX)?;
                (tag != MAP_COUNT_KEY).then_some((tag, value.as_str()))
            })
            .collect()
    }

    /// Unique address of this instance: `[<module>.]<type>.<base_name>.<counter>`.
    pub fn address(&self) -> String {
        let local = format!("{}.{}.{}", self.resource_type, self.base_name, self.counter);
        match &self.module {
            Some(module) => format!("{module}.{local}"),
            None => local,
        }
    }

    /// Prefix an output key must contain to belong to this resource.
    pub fn output_prefix(&self) -> String {
        format!("{}_{}", self.resource_type, self.base_name)
    }
}

/// A named value exported by the state.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    /// Output name as declared
    pub key_name: String,
    /// Output value
    pub value: Value,
}

impl Output {
    /// Create a new output.
    pub fn new(key_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key_name: key_name.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_includes_type_name_and_counter() {
        let res = Resource::new("aws_instance", "web", 3);
        assert_eq!(res.address(), "aws_instance.web.3");
    }

    #[test]
    fn test_address_prefixed_by_module() {
        let res = Resource::new("aws_instance", "web", 0).with_module("module.blue");
        assert_eq!(res.address(), "module.blue.aws_instance.web.0");
        assert_eq!(res.base_name, "web");
        assert_eq!(res.counter, 0);
    }

    #[test]
    fn test_tags_strip_prefix_and_skip_count() {
        let res = Resource::new("aws_instance", "web", 0)
            .with_attribute("tags.%", "2")
            .with_tag("Role", "frontend")
            .with_tag("canary", "")
            .with_attribute("ami", "ami-123");

        let tags = res.tags();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("Role"), Some(&"frontend"));
        assert_eq!(tags.get("canary"), Some(&""));
    }

    #[test]
    fn test_missing_attribute_is_empty() {
        let res = Resource::new("aws_instance", "web", 0).with_attribute("availability_zone", "a");
        assert_eq!(res.attribute("availability_zone"), "a");
        assert_eq!(res.attribute("tags.ansible_group"), "");
    }

    #[test]
    fn test_output_prefix() {
        let res = Resource::new("aws_instance", "web", 0);
        assert_eq!(res.output_prefix(), "aws_instance_web");
    }
}
