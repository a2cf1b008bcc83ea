//! Writers for the JSON and grouped line formats.
//!
//! The line format is the static INI-style inventory Ansible reads:
//!
//! ```text
//! [all]
//! aws_instance.web.0
//!
//! [all:vars]
//! region="eu-west-1"
//!
//! [web]
//! aws_instance.web.0
//!
//! ```

use crate::error::{Error, Result};
use crate::grouping::{GroupEntry, Grouping};
use serde::Serialize;
use std::io::Write;
use tfstate::Resource;

/// Outcome of a single-host query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostLookup {
    /// Host found, its attributes were written
    Found,
    /// No resource has that address, `{}` was written
    NotFound,
}

/// Encode a value as compact JSON and write it.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    let encoded = serde_json::to_vec(value).map_err(Error::Encode)?;
    out.write_all(&encoded)?;
    Ok(())
}

/// Write groups in the line format, in lexicographic group order.
pub fn write_inventory<W: Write>(out: &mut W, grouping: &Grouping) -> Result<()> {
    for (name, entry) in &grouping.groups {
        writeln!(out, "[{name}]")?;

        match entry {
            GroupEntry::Hosts(hosts) => {
                for host in hosts {
                    writeln!(out, "{host}")?;
                }
            }
            GroupEntry::All(all) => {
                for host in &all.hosts {
                    writeln!(out, "{host}")?;
                }
                writeln!(out)?;

                writeln!(out, "[{name}:vars]")?;
                for (key, value) in &all.vars {
                    let encoded = serde_json::to_string(value).map_err(Error::Encode)?;
                    writeln!(out, "{key}={encoded}")?;
                }
            }
        }

        writeln!(out)?;
    }

    Ok(())
}

/// Write the attributes of the resource whose address is `hostname`.
pub fn write_host<W: Write>(
    out: &mut W,
    resources: &[Resource],
    hostname: &str,
) -> Result<HostLookup> {
    match resources.iter().find(|res| res.address() == hostname) {
        Some(res) => {
            write_json(out, res.attributes())?;
            Ok(HostLookup::Found)
        }
        None => {
            log::debug!("No resource with address {hostname}");
            out.write_all(b"{}")?;
            Ok(HostLookup::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::{AllGroup, gather_resources};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::io;
    use tfstate::Output;

    fn render(grouping: &Grouping) -> String {
        let mut out: Vec<u8> = Vec::new();
        write_inventory(&mut out, grouping).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_group_block() {
        let mut grouping = Grouping::default();
        grouping.groups.insert(
            "web".to_string(),
            GroupEntry::Hosts(vec!["web.0".to_string(), "web.1".to_string()]),
        );

        assert_eq!(render(&grouping), "[web]\nweb.0\nweb.1\n\n");
    }

    #[test]
    fn test_all_group_with_vars() {
        let mut vars = BTreeMap::new();
        vars.insert("region".to_string(), json!("eu-west-1"));
        vars.insert("ports".to_string(), json!([80, 443]));

        let mut grouping = Grouping::default();
        grouping.groups.insert(
            "all".to_string(),
            GroupEntry::All(AllGroup {
                hosts: vec!["aws_instance.web.0".to_string()],
                vars,
            }),
        );

        assert_eq!(
            render(&grouping),
            "[all]\naws_instance.web.0\n\n[all:vars]\nports=[80,443]\nregion=\"eu-west-1\"\n\n"
        );
    }

    #[test]
    fn test_groups_in_lexicographic_order() {
        let resources = vec![
            Resource::new("aws_instance", "web", 0),
            Resource::new("aws_instance", "db", 0),
        ];
        let grouping = gather_resources(&resources, &[Output::new("env", "prod")]);

        let rendered = render(&grouping);
        let headers: Vec<&str> = rendered
            .lines()
            .filter(|line| line.starts_with('['))
            .collect();
        assert_eq!(
            headers,
            vec![
                "[all]",
                "[all:vars]",
                "[db]",
                "[db.0]",
                "[type_aws_instance]",
                "[web]",
                "[web.0]",
            ]
        );
    }

    #[test]
    fn test_write_host_found() {
        let resources = vec![
            Resource::new("aws_instance", "web", 0)
                .with_attribute("id", "i-123")
                .with_attribute("availability_zone", "eu-west-1a"),
        ];

        let mut out: Vec<u8> = Vec::new();
        let lookup = write_host(&mut out, &resources, "aws_instance.web.0").unwrap();

        assert_eq!(lookup, HostLookup::Found);
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            json!({ "availability_zone": "eu-west-1a", "id": "i-123" })
        );
    }

    #[test]
    fn test_write_host_not_found() {
        let resources = vec![Resource::new("aws_instance", "web", 0)];

        let mut out: Vec<u8> = Vec::new();
        let lookup = write_host(&mut out, &resources, "aws_instance.web.9").unwrap();

        assert_eq!(lookup, HostLookup::NotFound);
        assert_eq!(out, b"{}");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let grouping = gather_resources(&[Resource::new("aws_instance", "web", 0)], &[]);
        let err = write_inventory(&mut FailingWriter, &grouping).unwrap_err();
        assert!(matches!(err, Error::Write(_)));

        let err = write_json(&mut FailingWriter, &json!({})).unwrap_err();
        assert!(matches!(err, Error::Write(_)));
    }

    #[test]
    fn test_encode_failure_is_reported() {
        // JSON object keys must be strings
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "value");

        let mut out: Vec<u8> = Vec::new();
        let err = write_json(&mut out, &map).unwrap_err();
        assert!(matches!(err, Error::Encode(_)));
    }
}
