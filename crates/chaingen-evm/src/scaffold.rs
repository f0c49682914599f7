//! Manifest and mapping fragments for new Ethereum data sources.

use chaingen_core::codegen::string_literal;
use chaingen_core::{ManifestScaffold, MappingScaffold, ScaffoldContract};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumManifestScaffold;

impl ManifestScaffold for EthereumManifestScaffold {
    fn source(&self, contract: &ScaffoldContract) -> String {
        let mut out = String::from("source:\n");
        if let Some(address) = &contract.address {
            let _ = writeln!(out, "  address: {}", string_literal(address));
        }
        let _ = writeln!(out, "  abi: {}", contract.name);
        if let Some(block) = contract.start_block {
            let _ = writeln!(out, "  startBlock: {block}");
        }
        out
    }

    fn mapping(&self, contract: &ScaffoldContract) -> String {
        let name = &contract.name;
        format!(
            "mapping:\n  kind: ethereum/events\n  apiVersion: 0.0.7\n  language: wasm/assemblyscript\n  \
             entities: []\n  abis:\n    - name: {name}\n      file: ./abis/{name}.json\n  \
             eventHandlers: []\n  file: ./src/{}.ts\n",
            name.to_lowercase()
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumMappingScaffold;

impl MappingScaffold for EthereumMappingScaffold {
    fn generate_placeholder_handlers(&self, _contract: &ScaffoldContract) -> String {
        "import { ethereum } from \"@graphprotocol/graph-ts\";\n\n\
         export function handleBlock(block: ethereum.Block): void {}\n"
            .to_string()
    }
}
