//! # chaingen-evm
//!
//! Ethereum protocol family for ChainGen: ABI loading (built on
//! `alloy-json-abi`), AssemblyScript bindings, template bindings, manifest
//! checks, and scaffolding.

pub mod abi;
pub mod codegen;
pub mod contract;
pub mod scaffold;
pub mod subgraph;
pub mod template;
pub mod types;

pub use abi::{EthereumAbi, EthereumAbiLoader};
pub use codegen::EthereumCodeGenerator;
pub use contract::EthereumContract;
pub use subgraph::EthereumSubgraph;
pub use template::EthereumTemplateCodeGen;

use chaingen_core::{
    AbiLoader, BuildOptions, Capability, ContractHelper, DataSourceTemplate, ManifestScaffold,
    MappingScaffold, Protocol, ProtocolFamily, ProtocolName, SubgraphBuilder, TemplateCodeGen,
    TypeGenOptions, TypeGenerator,
};
use std::sync::Arc;

/// Vending-table entry for Ethereum and other EVM chains.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumFamily;

impl ProtocolFamily for EthereumFamily {
    fn name(&self) -> ProtocolName {
        ProtocolName::Ethereum
    }

    fn type_generator(&self, options: &TypeGenOptions) -> Capability<TypeGenerator> {
        Capability::Present(TypeGenerator::new(
            ProtocolName::Ethereum,
            options.clone(),
            Arc::new(EthereumAbiLoader),
        ))
    }

    fn template_codegen(
        &self,
        template: &DataSourceTemplate,
    ) -> Capability<Box<dyn TemplateCodeGen>> {
        Capability::Present(Box::new(EthereumTemplateCodeGen::new(template)))
    }

    fn abi_loader(&self) -> Capability<Arc<dyn AbiLoader>> {
        Capability::Present(Arc::new(EthereumAbiLoader))
    }

    fn subgraph_builder(
        &self,
        options: BuildOptions,
        protocol: Protocol,
    ) -> Box<dyn SubgraphBuilder> {
        Box::new(EthereumSubgraph::new(options, protocol))
    }

    fn contract_helper(&self) -> Box<dyn ContractHelper> {
        Box::new(EthereumContract)
    }

    fn manifest_scaffold(&self) -> Box<dyn ManifestScaffold> {
        Box::new(scaffold::EthereumManifestScaffold)
    }

    fn mapping_scaffold(&self) -> Box<dyn MappingScaffold> {
        Box::new(scaffold::EthereumMappingScaffold)
    }
}
