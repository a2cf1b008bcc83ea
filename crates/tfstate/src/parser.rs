//! Parser for Terraform state documents.
//!
//! Two on-disk layouts are understood:
//!
//! ```text
//! version 1-3: modules[].resources["aws_instance.web.0"].primary.attributes (flat strings)
//! version 4:   resources[].instances[].attributes (nested JSON)
//! ```
//!
//! Nested v4 attributes are flattened into the dotted "flatmap" keys the older
//! format uses, so every resource exposes the same `tags.Role` style keys.

use crate::error::{Error, Result};
use crate::types::{Output, Resource};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Newest state format version understood by the parser.
pub const MAX_SUPPORTED_VERSION: u64 = 4;

/// Resource keys with this first segment are data sources, not managed resources.
const DATA_SOURCE_PREFIX: &str = "data";

/// Mode of v4 resources that describe provisioned infrastructure.
const MANAGED_MODE: &str = "managed";

// ============================================================================
// Raw document layouts
// ============================================================================

#[derive(Deserialize)]
struct LegacyState {
    #[serde(default)]
    modules: Vec<LegacyModule>,
}

#[derive(Deserialize)]
struct LegacyModule {
    #[serde(default)]
    path: Vec<String>,
    #[serde(default)]
    outputs: BTreeMap<String, Value>,
    #[serde(default)]
    resources: BTreeMap<String, LegacyResource>,
}

#[derive(Deserialize)]
struct LegacyResource {
    #[serde(default)]
    primary: Option<LegacyInstance>,
}

#[derive(Deserialize)]
struct LegacyInstance {
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct ModernState {
    #[serde(default)]
    resources: Vec<ModernResource>,
    #[serde(default)]
    outputs: BTreeMap<String, ModernOutput>,
}

#[derive(Deserialize)]
struct ModernResource {
    #[serde(default = "default_mode")]
    mode: String,
    #[serde(default)]
    module: Option<String>,
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    #[serde(default)]
    instances: Vec<ModernInstance>,
}

#[derive(Deserialize)]
struct ModernInstance {
    #[serde(default)]
    index_key: Option<Value>,
    #[serde(default)]
    attributes: Map<String, Value>,
}

#[derive(Deserialize)]
struct ModernOutput {
    #[serde(default)]
    value: Value,
}

fn default_mode() -> String {
    MANAGED_MODE.to_string()
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a state document into its resources and outputs.
///
/// Outputs are returned sorted by key name. v4 resources keep document order;
/// v3 resources keep module order and are sorted by key within each module.
pub fn parse_string(content: &str) -> Result<(Vec<Resource>, Vec<Output>)> {
    let document: Value = serde_json::from_str(content)?;
    let version = document.get("version").and_then(Value::as_u64).unwrap_or(0);

    match version {
        1..=3 => {
            log::debug!("Parsing legacy state (version {version})");
            parse_legacy(serde_json::from_value(document)?)
        }
        MAX_SUPPORTED_VERSION => {
            log::debug!("Parsing state (version {version})");
            Ok(parse_modern(serde_json::from_value(document)?))
        }
        other => Err(Error::UnsupportedVersion(other)),
    }
}

fn parse_legacy(state: LegacyState) -> Result<(Vec<Resource>, Vec<Output>)> {
    let mut resources = Vec::new();
    let mut outputs = BTreeMap::new();

    for module in state.modules {
        let module_address = legacy_module_address(&module.path);

        for (key, raw) in module.outputs {
            outputs.insert(key, legacy_output_value(raw));
        }

        for (key, resource) in module.resources {
            let Some((resource_type, base_name, counter)) = parse_resource_key(&key)? else {
                log::debug!("Skipping data source {key}");
                continue;
            };
            let attributes = resource.primary.map(|p| p.attributes).unwrap_or_default();
            let mut res = Resource::new(resource_type, base_name, counter).with_attributes(attributes);
            res.module.clone_from(&module_address);
            resources.push(res);
        }
    }

    let outputs = outputs
        .into_iter()
        .map(|(key, value)| Output::new(key, value))
        .collect();
    Ok((resources, outputs))
}

fn parse_modern(state: ModernState) -> (Vec<Resource>, Vec<Output>) {
    let mut resources = Vec::new();

    for resource in state.resources {
        if resource.mode != MANAGED_MODE {
            log::debug!(
                "Skipping {} resource {}.{}",
                resource.mode,
                resource.resource_type,
                resource.name
            );
            continue;
        }

        for (position, instance) in resource.instances.into_iter().enumerate() {
            // for_each instances have string keys; fall back to their position
            let counter = instance
                .index_key
                .as_ref()
                .and_then(Value::as_u64)
                .unwrap_or(position as u64);

            let mut attributes = BTreeMap::new();
            for (key, value) in &instance.attributes {
                flatten_into(key, value, &mut attributes);
            }

            let mut res =
                Resource::new(resource.resource_type.as_str(), resource.name.as_str(), counter)
                    .with_attributes(attributes);
            res.module = resource.module.clone().filter(|module| !module.is_empty());
            resources.push(res);
        }
    }

    let outputs = state
        .outputs
        .into_iter()
        .map(|(key, output)| Output::new(key, output.value))
        .collect();
    (resources, outputs)
}

/// Split a legacy resource key into type, name and index.
///
/// Returns `None` for data sources.
fn parse_resource_key(key: &str) -> Result<Option<(&str, &str, u64)>> {
    let parts: Vec<&str> = key.split('.').collect();

    if parts.first() == Some(&DATA_SOURCE_PREFIX) {
        return Ok(None);
    }

    match parts.as_slice() {
        [resource_type, base_name] => Ok(Some((*resource_type, *base_name, 0))),
        [resource_type, base_name, index] => {
            let counter = index
                .parse()
                .map_err(|_| Error::InvalidResourceKey(key.to_string()))?;
            Ok(Some((*resource_type, *base_name, counter)))
        }
        _ => Err(Error::InvalidResourceKey(key.to_string())),
    }
}

/// Convert a v3 module path (`["root", "blue"]`) to its address (`module.blue`).
///
/// The root module has no address.
fn legacy_module_address(path: &[String]) -> Option<String> {
    let children: Vec<String> = path
        .iter()
        .skip(1)
        .map(|name| format!("module.{name}"))
        .collect();
    (!children.is_empty()).then(|| children.join("."))
}

/// Pre-0.7 states store the bare value; later ones wrap it in `{ "value": ... }`.
fn legacy_output_value(raw: Value) -> Value {
    match raw {
        Value::Object(mut map) => match map.remove("value") {
            Some(value) => value,
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Flatten a nested JSON attribute into dotted keys.
///
/// Maps get a `<key>.%` entry count, lists a `<key>.#` length. Nulls are dropped.
pub fn flatten_into(key: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            out.insert(key.to_string(), b.to_string());
        }
        Value::Number(n) => {
            out.insert(key.to_string(), n.to_string());
        }
        Value::String(s) => {
            out.insert(key.to_string(), s.clone());
        }
        Value::Array(items) => {
            out.insert(format!("{key}.#"), items.len().to_string());
            for (index, item) in items.iter().enumerate() {
                flatten_into(&format!("{key}.{index}"), item, out);
            }
        }
        Value::Object(map) => {
            out.insert(format!("{key}.%"), map.len().to_string());
            for (child, item) in map {
                flatten_into(&format!("{key}.{child}"), item, out);
            }
        }
    }
}
