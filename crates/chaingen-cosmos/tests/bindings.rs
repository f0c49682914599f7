//! Tendermint type generation end to end.

use chaingen_core::{ErrorKind, Manifest, MemoryReporter, ProtocolFamily, TypeGenOptions};
use chaingen_cosmos::CosmosFamily;
use std::path::PathBuf;
use std::sync::Arc;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn manifest(file: &str) -> Manifest {
    Manifest::from_yaml_str(&format!(
        r#"
dataSources:
  - kind: tendermint/data
    name: Hub
    network: cosmoshub-4
    source:
      startBlock: 1
    mapping:
      abis:
        - name: Bank
          file: {file}
      eventHandlers: []
"#
    ))
    .unwrap()
}

#[tokio::test]
async fn event_bindings_are_written_per_data_source() {
    let out = tempfile::tempdir().unwrap();
    let options = TypeGenOptions::new(out.path()).with_source_dir(fixtures_dir());
    let generator = CosmosFamily
        .type_generator(&options)
        .present()
        .unwrap()
        .with_progress(Arc::new(MemoryReporter::new()));

    generator.generate_types(&manifest("bank.json")).await.unwrap();

    let code = std::fs::read_to_string(out.path().join("Hub/Bank.ts")).unwrap();
    assert!(code.starts_with("// THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.\n"));
    assert!(code.contains("import { cosmos } from \"@graphprotocol/graph-ts\";"));
    assert!(code.contains("export class Transfer {\n  static readonly EVENT_TYPE: string = \"transfer\";"));
    assert!(code.contains("export class CoinSpent {"));
    assert!(code.contains("  get spender(): string {\n    return attribute(this._event, \"spender\");\n  }"));
    assert!(code.contains("\n  for (let i = 0; i < event.attributes.length; i++) {\n    if (event.attributes[i].key == key) {"));
}

#[tokio::test]
async fn missing_definition_file_is_a_load_error() {
    let out = tempfile::tempdir().unwrap();
    let options = TypeGenOptions::new(out.path()).with_source_dir(fixtures_dir());
    let generator = CosmosFamily
        .type_generator(&options)
        .present()
        .unwrap()
        .with_progress(Arc::new(MemoryReporter::new()));

    let err = generator
        .generate_types(&manifest("missing.json"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
}
