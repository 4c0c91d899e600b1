//! CLI commands

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

pub mod failure_domains;
pub mod render;
pub mod validate;

/// Read every resource from a YAML manifest file
///
/// The file may hold several `---` separated documents. A document whose
/// `kind` ends in `List` contributes its `items`. Empty documents are skipped.
pub fn load_manifests<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path)?;
    let mut resources = Vec::new();

    for document in serde_yaml::Deserializer::from_str(&content) {
        let value = serde_yaml::Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }

        let is_list = value
            .get("kind")
            .and_then(|k| k.as_str())
            .is_some_and(|k| k.ends_with("List"));
        if is_list {
            let items = value
                .get("items")
                .and_then(|i| i.as_sequence())
                .cloned()
                .unwrap_or_default();
            for item in items {
                resources.push(serde_yaml::from_value(item)?);
            }
        } else {
            resources.push(serde_yaml::from_value(value)?);
        }
    }

    debug!(path = %path.display(), count = resources.len(), "loaded manifests");
    Ok(resources)
}

/// Read exactly one resource from a YAML manifest file
pub fn load_manifest<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let mut resources = load_manifests::<T>(path)?;
    match resources.len() {
        1 => Ok(resources.remove(0)),
        n => Err(Error::invalid_manifest(
            path,
            format!("expected exactly one resource, found {n}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpms_common::crd::Machine;
    use std::io::Write;

    fn manifest_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
        file.write_all(content.as_bytes())
            .expect("temp file should be writable");
        file
    }

    const TWO_MACHINES: &str = r#"
apiVersion: machine.openshift.io/v1beta1
kind: Machine
metadata:
  name: master-0
spec: {}
---
apiVersion: machine.openshift.io/v1beta1
kind: Machine
metadata:
  name: master-1
spec: {}
---
"#;

    #[test]
    fn test_multi_document_manifest() {
        let file = manifest_file(TWO_MACHINES);
        let machines: Vec<Machine> = load_manifests(file.path()).expect("manifests should load");
        let names: Vec<&str> = machines.iter().map(|m| m.display_name()).collect();
        assert_eq!(names, vec!["master-0", "master-1"]);
    }

    #[test]
    fn test_list_manifest_is_flattened() {
        let file = manifest_file(
            r#"
apiVersion: machine.openshift.io/v1beta1
kind: MachineList
items:
  - apiVersion: machine.openshift.io/v1beta1
    kind: Machine
    metadata:
      name: master-0
    spec: {}
"#,
        );
        let machines: Vec<Machine> = load_manifests(file.path()).expect("list should load");
        assert_eq!(machines.len(), 1);
    }

    #[test]
    fn test_single_manifest_requires_exactly_one() {
        let file = manifest_file(TWO_MACHINES);
        let err = load_manifest::<Machine>(file.path()).expect_err("two documents should fail");
        assert!(err.to_string().contains("expected exactly one resource, found 2"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_manifests::<Machine>(Path::new("/nonexistent/machines.yaml"))
            .expect_err("missing file should fail");
        assert!(matches!(err, Error::Io(_)));
    }
}
