use crate::contract::CosmosContract;
use chaingen_core::{BuildOptions, ContractHelper, Protocol, Source, SubgraphBuilder, ValidationReport};

pub const HANDLER_TYPES: &[&str] = &["blockHandlers", "eventHandlers", "transactionHandlers"];

/// Manifest checks for Tendermint / Cosmos data sources.
#[derive(Debug, Clone)]
pub struct CosmosSubgraph {
    protocol: Protocol,
    options: BuildOptions,
}

impl CosmosSubgraph {
    pub fn new(options: BuildOptions, protocol: Protocol) -> Self {
        Self { protocol, options }
    }
}

impl SubgraphBuilder for CosmosSubgraph {
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
        _is_template: bool,
        report: &mut ValidationReport,
    ) {
        if let Some(address) = &source.address {
            if let Err(reason) = CosmosContract.validate(address) {
                report.error(
                    format!("{path} > source > address"),
                    format!("invalid address '{address}': {reason}"),
                );
            }
        }
    }
}
