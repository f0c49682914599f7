use chaingen_core::codegen::string_literal;
use chaingen_core::{ManifestScaffold, MappingScaffold, ScaffoldContract};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct NearManifestScaffold;

impl ManifestScaffold for NearManifestScaffold {
    fn source(&self, contract: &ScaffoldContract) -> String {
        let mut out = String::from("source:\n");
        let account = contract.address.as_deref().unwrap_or(&contract.name);
        let _ = writeln!(out, "  account: {}", string_literal(account));
        if let Some(block) = contract.start_block {
            let _ = writeln!(out, "  startBlock: {block}");
        }
        out
    }

    fn mapping(&self, contract: &ScaffoldContract) -> String {
        format!(
            "mapping:\n  apiVersion: 0.0.5\n  language: wasm/assemblyscript\n  entities: []\n  \
             receiptHandlers:\n    - handler: handleReceipt\n  file: ./src/{}.ts\n",
            contract.name.to_lowercase()
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NearMappingScaffold;

impl MappingScaffold for NearMappingScaffold {
    fn generate_placeholder_handlers(&self, _contract: &ScaffoldContract) -> String {
        "import { near } from \"@graphprotocol/graph-ts\";\n\n\
         export function handleReceipt(receipt: near.ReceiptWithOutcome): void {}\n"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_falls_back_to_name() {
        let source = NearManifestScaffold.source(&ScaffoldContract::new("app.near"));
        assert_eq!(source, "source:\n  account: \"app.near\"\n");
    }
}
