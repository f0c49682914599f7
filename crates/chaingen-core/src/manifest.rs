//! Subgraph manifest model.
//!
//! A read-only view of `subgraph.yaml`. Only the parts the codegen pipeline
//! and manifest validation need are modelled; everything else under a
//! mapping is kept in [`Mapping::extra`] in document order.

use crate::error::{CodegenError, Result};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, deserialize_with = "version_string")]
    pub spec_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Option<SchemaRef>,
    #[serde(default)]
    pub data_sources: Vec<DataSource>,
    #[serde(default)]
    pub templates: Vec<DataSourceTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchemaRef {
    pub file: PathBuf,
}

/// A concrete data source.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub source: Source,
    pub mapping: Mapping,
}

/// A reusable data source definition instantiated at indexing time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceTemplate {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub source: Source,
    pub mapping: Mapping,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// EVM / Cosmos contract address
    #[serde(default)]
    pub address: Option<String>,
    /// Name of the ABI in `mapping.abis` describing the contract
    #[serde(default)]
    pub abi: Option<String>,
    /// NEAR account
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub start_block: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "version_string")]
    pub api_version: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub abis: Vec<AbiEntry>,
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Handler lists and any other keys, in document order.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Mapping {
    /// Declared handler keys, e.g. `eventHandlers`, `blockHandlers`.
    pub fn handler_kinds(&self) -> impl Iterator<Item = &str> {
        self.extra
            .keys()
            .map(String::as_str)
            .filter(|k| k.ends_with("Handlers"))
    }

    pub fn abi(&self, name: &str) -> Option<&AbiEntry> {
        self.abis.iter().find(|a| a.name == name)
    }
}

/// One `{name, file}` entry of `mapping.abis`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbiEntry {
    pub name: String,
    pub file: PathBuf,
}

/// Version fields written unquoted (`apiVersion: 0.1`) arrive as numbers.
fn version_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a version string, found {other:?}"
        ))),
    }
}

impl Manifest {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| CodegenError::Manifest(e.to_string()))
    }

    /// Read and parse a manifest file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            CodegenError::Manifest(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Kinds of all data sources, then all templates.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.data_sources
            .iter()
            .map(|d| d.kind.as_str())
            .chain(self.templates.iter().map(|t| t.kind.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const MANIFEST: &str = r#"
specVersion: 0.0.5
schema:
  file: ./schema.graphql
dataSources:
  - kind: ethereum/contract
    name: Gravity
    network: mainnet
    source:
      address: "0x2E645469f354BB4F5c8a05B3b30A929361cf77eC"
      abi: Gravity
      startBlock: 6175244
    mapping:
      kind: ethereum/events
      apiVersion: 0.0.7
      language: wasm/assemblyscript
      entities:
        - Gravatar
      abis:
        - name: Gravity
          file: ./abis/Gravity.json
      eventHandlers:
        - event: NewGravatar(uint256,address,string,string)
          handler: handleNewGravatar
      blockHandlers:
        - handler: handleBlock
      file: ./src/mapping.ts
templates:
  - kind: ethereum
    name: Pair
    network: mainnet
    source:
      abi: Pair
    mapping:
      kind: ethereum/events
      apiVersion: 0.0.7
      language: wasm/assemblyscript
      entities: []
      abis:
        - name: Pair
          file: ./abis/Pair.json
      eventHandlers: []
      file: ./src/pair.ts
"#;

    #[test]
    fn parses_data_sources_and_templates() {
        let manifest = Manifest::from_yaml_str(MANIFEST).unwrap();
        assert_eq!(manifest.spec_version.as_deref(), Some("0.0.5"));
        assert_eq!(manifest.data_sources.len(), 1);
        let ds = &manifest.data_sources[0];
        assert_eq!(ds.name, "Gravity");
        assert_eq!(ds.source.start_block, Some(6175244));
        assert_eq!(ds.mapping.abis[0].file, PathBuf::from("./abis/Gravity.json"));
        assert_eq!(manifest.templates[0].name, "Pair");
    }

    #[test]
    fn handler_kinds_keep_document_order() {
        let manifest = Manifest::from_yaml_str(MANIFEST).unwrap();
        let kinds: Vec<_> = manifest.data_sources[0].mapping.handler_kinds().collect();
        assert_eq!(kinds, vec!["eventHandlers", "blockHandlers"]);
    }

    #[test]
    fn kinds_list_data_sources_then_templates() {
        let manifest = Manifest::from_yaml_str(MANIFEST).unwrap();
        let kinds: Vec<_> = manifest.kinds().collect();
        assert_eq!(kinds, vec!["ethereum/contract", "ethereum"]);
    }

    #[test]
    fn unquoted_numeric_versions_parse() {
        let yaml = r#"
specVersion: 1
dataSources:
  - kind: ethereum
    name: Token
    mapping:
      apiVersion: 0.1
"#;
        let manifest = Manifest::from_yaml_str(yaml).unwrap();
        assert_eq!(manifest.spec_version.as_deref(), Some("1"));
        assert_eq!(manifest.data_sources[0].mapping.api_version.as_deref(), Some("0.1"));

        let manifest = Manifest::from_yaml_str("specVersion: 1.0
").unwrap();
        assert!(manifest.spec_version.is_some());
        assert!(Manifest::from_yaml_str("specVersion: [1]\n").is_err());
    }

    #[test]
    fn abi_entry_without_file_is_a_manifest_error() {
        let yaml = r#"
dataSources:
  - kind: ethereum
    name: Token
    mapping:
      abis:
        - name: Token
"#;
        let err = Manifest::from_yaml_str(yaml).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Manifest);
    }
}
