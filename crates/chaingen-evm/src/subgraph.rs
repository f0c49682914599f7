use crate::contract::EthereumContract;
use chaingen_core::{BuildOptions, ContractHelper, Protocol, Source, SubgraphBuilder, ValidationReport};

pub const HANDLER_TYPES: &[&str] = &["blockHandlers", "callHandlers", "eventHandlers"];

/// Manifest checks for Ethereum data sources.
#[derive(Debug, Clone)]
pub struct EthereumSubgraph {
    protocol: Protocol,
    options: BuildOptions,
}

impl EthereumSubgraph {
    pub fn new(options: BuildOptions, protocol: Protocol) -> Self {
        Self { protocol, options }
    }
}

impl SubgraphBuilder for EthereumSubgraph {
    fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    fn options(&self) -> &BuildOptions {
        &self.options
    }

    fn handler_types(&self) -> &'static [&'static str] {
        HANDLER_TYPES
    }

    fn validate_source(
        &self,
        path: &str,
        source: &Source,
        is_template: bool,
        report: &mut ValidationReport,
    ) {
        match (&source.address, is_template) {
            (Some(_), true) => report.warning(
                format!("{path} > source > address"),
                "templates get their address at creation time; 'address' is ignored",
            ),
            (Some(address), false) => {
                if let Err(reason) = EthereumContract.validate(address) {
                    report.error(
                        format!("{path} > source > address"),
                        format!("invalid contract address '{address}': {reason}"),
                    );
                }
            }
            (None, _) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaingen_core::{Manifest, Severity};

    #[test]
    fn checks_addresses() {
        let manifest = Manifest::from_yaml_str(
            r#"
dataSources:
  - kind: ethereum
    name: Token
    network: mainnet
    source:
      address: "0xnope"
      abi: Token
    mapping:
      abis:
        - name: Token
          file: ./abis/Token.json
      eventHandlers: []
"#,
        )
        .unwrap();
        let builder = EthereumSubgraph::new(BuildOptions::default(), Protocol::resolve("ethereum"));
        let report = builder.validate_manifest(&manifest);
        let issues = report.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].path, "dataSources > 0 > source > address");
    }
}
