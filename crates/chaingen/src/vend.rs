//! Strategy vending.
//!
//! Maps a resolved [`Protocol`] to its family's collaborators. The table is
//! an exhaustive match over [`ProtocolName`], so adding a family is one
//! descriptor in `chaingen_core::protocol` plus one arm in [`family_for`].

use chaingen_core::{
    AbiLoader, BuildOptions, Capability, CodegenError, ContractHelper, DataSourceTemplate,
    ManifestScaffold, MappingScaffold, Protocol, ProtocolFamily, ProtocolName, Result,
    SubgraphBuilder, TemplateCodeGen, TypeGenOptions, TypeGenerator,
};
use chaingen_cosmos::CosmosFamily;
use chaingen_evm::EthereumFamily;
use chaingen_near::NearFamily;
use std::fmt;
use std::sync::Arc;

static ETHEREUM: EthereumFamily = EthereumFamily;
static NEAR: NearFamily = NearFamily;
static TENDERMINT: CosmosFamily = CosmosFamily;

/// The vending-table entry for a family.
pub fn family_for(name: ProtocolName) -> &'static dyn ProtocolFamily {
    match name {
        ProtocolName::Ethereum => &ETHEREUM,
        ProtocolName::Near => &NEAR,
        ProtocolName::Tendermint => &TENDERMINT,
    }
}

fn family(protocol: &Protocol) -> Result<&'static dyn ProtocolFamily> {
    protocol
        .name()
        .map(family_for)
        .ok_or_else(|| CodegenError::UnsupportedProtocol {
            protocol: protocol.requested().to_string(),
        })
}

/// Inputs every vended collaborator may need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOptions {
    pub type_gen: TypeGenOptions,
    pub build: BuildOptions,
}

impl StrategyOptions {
    pub fn new(type_gen: TypeGenOptions, build: BuildOptions) -> Self {
        Self { type_gen, build }
    }
}

// ─── Per-slot vending ───────────────────────────────────────────────────────

pub fn type_generator(
    protocol: &Protocol,
    options: &TypeGenOptions,
) -> Result<Capability<TypeGenerator>> {
    Ok(family(protocol)?.type_generator(options))
}

/// Template code generator for one template. Families without template
/// bindings fail here instead of returning [`Capability::Unsupported`].
pub fn template_codegen(
    protocol: &Protocol,
    template: &DataSourceTemplate,
) -> Result<Box<dyn TemplateCodeGen>> {
    let family = family(protocol)?;
    family
        .template_codegen(template)
        .require(family.name(), "template code generation")
}

pub fn abi_loader(protocol: &Protocol) -> Result<Capability<Arc<dyn AbiLoader>>> {
    Ok(family(protocol)?.abi_loader())
}

/// The builder gets the identity injected back in.
pub fn subgraph_builder(
    protocol: &Protocol,
    options: BuildOptions,
) -> Result<Box<dyn SubgraphBuilder>> {
    Ok(family(protocol)?.subgraph_builder(options, protocol.clone()))
}

pub fn contract_helper(protocol: &Protocol) -> Result<Box<dyn ContractHelper>> {
    Ok(family(protocol)?.contract_helper())
}

pub fn manifest_scaffold(protocol: &Protocol) -> Result<Box<dyn ManifestScaffold>> {
    Ok(family(protocol)?.manifest_scaffold())
}

pub fn mapping_scaffold(protocol: &Protocol) -> Result<Box<dyn MappingScaffold>> {
    Ok(family(protocol)?.mapping_scaffold())
}

// ─── Bundle ─────────────────────────────────────────────────────────────────

/// Every collaborator for one protocol, created fresh per [`vend`] call and
/// owned by the caller.
pub struct StrategyBundle {
    protocol: Protocol,
    family: &'static dyn ProtocolFamily,
    pub type_generator: Capability<TypeGenerator>,
    pub abi_loader: Capability<Arc<dyn AbiLoader>>,
    pub subgraph_builder: Box<dyn SubgraphBuilder>,
    pub contract_helper: Box<dyn ContractHelper>,
    pub manifest_scaffold: Box<dyn ManifestScaffold>,
    pub mapping_scaffold: Box<dyn MappingScaffold>,
}

impl StrategyBundle {
    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn name(&self) -> ProtocolName {
        self.family.name()
    }

    /// Template code generator for one template definition.
    pub fn template_codegen(
        &self,
        template: &DataSourceTemplate,
    ) -> Result<Box<dyn TemplateCodeGen>> {
        self.family
            .template_codegen(template)
            .require(self.family.name(), "template code generation")
    }
}

impl fmt::Debug for StrategyBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyBundle")
            .field("protocol", &self.protocol)
            .field("type_generator", &self.type_generator.is_present())
            .field("abi_loader", &self.abi_loader.is_present())
            .finish_non_exhaustive()
    }
}

/// Vend every collaborator for `protocol`.
pub fn vend(protocol: &Protocol, options: &StrategyOptions) -> Result<StrategyBundle> {
    let family = family(protocol)?;
    Ok(StrategyBundle {
        protocol: protocol.clone(),
        family,
        type_generator: family.type_generator(&options.type_gen),
        abi_loader: family.abi_loader(),
        subgraph_builder: family.subgraph_builder(options.build.clone(), protocol.clone()),
        contract_helper: family.contract_helper(),
        manifest_scaffold: family.manifest_scaffold(),
        mapping_scaffold: family.mapping_scaffold(),
    })
}
