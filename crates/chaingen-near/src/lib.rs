//! # chaingen-near
//!
//! NEAR protocol family for ChainGen. NEAR subgraphs index receipts and
//! blocks by account; there are no ABIs, no typed bindings, and no template
//! bindings, so only the always-present slots are filled.

pub mod account;
pub mod scaffold;
pub mod subgraph;

pub use account::NearAccount;
pub use subgraph::NearSubgraph;

use chaingen_core::{
    AbiLoader, BuildOptions, Capability, ContractHelper, DataSourceTemplate, ManifestScaffold,
    MappingScaffold, Protocol, ProtocolFamily, ProtocolName, SubgraphBuilder, TemplateCodeGen,
    TypeGenOptions, TypeGenerator,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct NearFamily;

impl ProtocolFamily for NearFamily {
    fn name(&self) -> ProtocolName {
        ProtocolName::Near
    }

    fn type_generator(&self, _options: &TypeGenOptions) -> Capability<TypeGenerator> {
        Capability::Unsupported
    }

    fn template_codegen(
        &self,
        _template: &DataSourceTemplate,
    ) -> Capability<Box<dyn TemplateCodeGen>> {
        Capability::Unsupported
    }

    fn abi_loader(&self) -> Capability<Arc<dyn AbiLoader>> {
        Capability::Unsupported
    }

    fn subgraph_builder(
        &self,
        options: BuildOptions,
        protocol: Protocol,
    ) -> Box<dyn SubgraphBuilder> {
        Box::new(NearSubgraph::new(options, protocol))
    }

    fn contract_helper(&self) -> Box<dyn ContractHelper> {
        Box::new(NearAccount)
    }

    fn manifest_scaffold(&self) -> Box<dyn ManifestScaffold> {
        Box::new(scaffold::NearManifestScaffold)
    }

    fn mapping_scaffold(&self) -> Box<dyn MappingScaffold> {
        Box::new(scaffold::NearMappingScaffold)
    }
}
