use chaingen_core::{ManifestScaffold, MappingScaffold, ScaffoldContract};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct CosmosManifestScaffold;

impl ManifestScaffold for CosmosManifestScaffold {
    fn source(&self, contract: &ScaffoldContract) -> String {
        let mut out = String::from("source:\n");
        if let Some(address) = &contract.address {
            let _ = writeln!(out, "  address: {address}");
        }
        let _ = writeln!(out, "  startBlock: {}", contract.start_block.unwrap_or(0));
        out
    }

    fn mapping(&self, contract: &ScaffoldContract) -> String {
        format!(
            "mapping:\n  apiVersion: 0.0.7\n  language: wasm/assemblyscript\n  entities: []\n  \
             blockHandlers:\n    - handler: handleBlock\n  file: ./src/{}.ts\n",
            contract.name.to_lowercase()
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CosmosMappingScaffold;

impl MappingScaffold for CosmosMappingScaffold {
    fn generate_placeholder_handlers(&self, _contract: &ScaffoldContract) -> String {
        "import { cosmos } from \"@graphprotocol/graph-ts\";\n\n\
         export function handleBlock(block: cosmos.Block): void {}\n"
            .to_string()
    }
}
