//! # chaingen-cosmos
//!
//! Tendermint / Cosmos protocol family for ChainGen.
//!
//! Cosmos chains have no contract ABIs. The entries under `mapping.abis`
//! point at event-definition files instead (see [`events`]), which the type
//! generator turns into `cosmos.Event` wrappers. The ABI accessor slot is
//! therefore unsupported while the type generator slot is present.

pub mod contract;
pub mod events;
pub mod scaffold;
pub mod subgraph;
pub mod template;

pub use contract::CosmosContract;
pub use events::{CosmosEventLoader, CosmosEvents, EventDefinition};
pub use subgraph::CosmosSubgraph;
pub use template::CosmosTemplateCodeGen;

use chaingen_core::{
    AbiLoader, BuildOptions, Capability, ContractHelper, DataSourceTemplate, ManifestScaffold,
    MappingScaffold, Protocol, ProtocolFamily, ProtocolName, SubgraphBuilder, TemplateCodeGen,
    TypeGenOptions, TypeGenerator,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct CosmosFamily;

impl ProtocolFamily for CosmosFamily {
    fn name(&self) -> ProtocolName {
        ProtocolName::Tendermint
    }

    fn type_generator(&self, options: &TypeGenOptions) -> Capability<TypeGenerator> {
        Capability::Present(TypeGenerator::new(
            ProtocolName::Tendermint,
            options.clone(),
            Arc::new(CosmosEventLoader),
        ))
    }

    fn template_codegen(
        &self,
        template: &DataSourceTemplate,
    ) -> Capability<Box<dyn TemplateCodeGen>> {
        Capability::Present(Box::new(CosmosTemplateCodeGen::new(template)))
    }

    fn abi_loader(&self) -> Capability<Arc<dyn AbiLoader>> {
        Capability::Unsupported
    }

    fn subgraph_builder(
        &self,
        options: BuildOptions,
        protocol: Protocol,
    ) -> Box<dyn SubgraphBuilder> {
        Box::new(CosmosSubgraph::new(options, protocol))
    }

    fn contract_helper(&self) -> Box<dyn ContractHelper> {
        Box::new(CosmosContract)
    }

    fn manifest_scaffold(&self) -> Box<dyn ManifestScaffold> {
        Box::new(scaffold::CosmosManifestScaffold)
    }

    fn mapping_scaffold(&self) -> Box<dyn MappingScaffold> {
        Box::new(scaffold::CosmosMappingScaffold)
    }
}
