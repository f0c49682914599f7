//! Capability traits implemented by each protocol family.
//!
//! A family crate implements [`ProtocolFamily`] once; the facade's vending
//! table maps every [`ProtocolName`] to that implementation, so no caller ever
//! branches on the protocol itself.
//!
//! All traits are object-safe so the collaborators can be handed out as
//! `Box<dyn _>` / `Arc<dyn _>`.

use crate::capability::Capability;
use crate::error::AbiError;
use crate::manifest::{DataSourceTemplate, Manifest, Source};
use crate::protocol::{Protocol, ProtocolName};
use crate::typegen::{TypeGenOptions, TypeGenerator};
use crate::validate::{self, ValidationReport};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ─── ABI loading & code generation ──────────────────────────────────────────

/// A parsed interface description. Opaque to the pipeline, which only hands
/// it back to its own code generator.
pub trait ParsedAbi: Send + Sync + fmt::Debug {
    /// Name from the manifest's `mapping.abis` entry.
    fn name(&self) -> &str;

    /// File the ABI was read from.
    fn file(&self) -> &Path;

    fn code_generator(&self) -> Box<dyn AbiCodeGenerator + '_>;
}

/// Emits the source of one generated bindings file.
pub trait AbiCodeGenerator {
    /// Import statements placed right after the generated-file header.
    fn generate_module_imports(&self) -> Vec<String>;

    /// Type declarations, in output order.
    fn generate_types(&self) -> Result<Vec<String>, AbiError>;
}

/// Reads and parses ABI files for one protocol family.
///
/// Must fail with a descriptive error when the file is absent or
/// unparsable; an empty ABI is only valid when the file really is empty of
/// declarations.
#[async_trait]
pub trait AbiLoader: Send + Sync {
    async fn load(&self, name: &str, path: &Path) -> Result<Arc<dyn ParsedAbi>, AbiError>;
}

/// Emits the `DataSourceTemplate` subclass for one manifest template.
pub trait TemplateCodeGen: Send + Sync {
    fn template_name(&self) -> &str;

    fn generate_module_imports(&self) -> Vec<String>;

    /// One class declaration with `create` (and, where the family supports
    /// it, `createWithContext`).
    fn generate_create_methods(&self) -> Vec<String>;
}

// ─── Manifest building ──────────────────────────────────────────────────────

/// Options shared by every subgraph builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Directory manifest-relative paths are resolved against
    pub source_dir: Option<PathBuf>,
    /// Accept any `network` value
    pub skip_network_validation: bool,
}

/// Protocol-aware manifest checks.
pub trait SubgraphBuilder: Send + Sync {
    /// The identity this builder was vended for.
    fn protocol(&self) -> &Protocol;

    fn options(&self) -> &BuildOptions;

    /// Mapping keys a data source of this family may declare.
    fn handler_types(&self) -> &'static [&'static str];

    /// Family-specific checks on one `source` block. `path` is the issue
    /// path of the owning entry, e.g. `dataSources > 0`.
    fn validate_source(
        &self,
        _path: &str,
        _source: &Source,
        _is_template: bool,
        _report: &mut ValidationReport,
    ) {
    }

    fn validate_manifest(&self, manifest: &Manifest) -> ValidationReport {
        validate::validate_manifest(self, manifest)
    }
}

// ─── Scaffolding ────────────────────────────────────────────────────────────

/// Contract a new subgraph is scaffolded for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldContract {
    pub name: String,
    /// Address or account, in the family's native notation
    pub address: Option<String>,
    pub start_block: Option<u64>,
}

impl ScaffoldContract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_start_block(mut self, block: u64) -> Self {
        self.start_block = Some(block);
        self
    }
}

pub trait ContractHelper: Send + Sync {
    /// What the contract identifier is called, e.g. "Contract address".
    fn identifier_name(&self) -> &'static str;

    /// Check an identifier; the error is a user-facing reason.
    fn validate(&self, value: &str) -> Result<(), String>;
}

/// YAML fragments for a new data source.
pub trait ManifestScaffold: Send + Sync {
    /// The `source:` block.
    fn source(&self, contract: &ScaffoldContract) -> String;

    /// The `mapping:` block.
    fn mapping(&self, contract: &ScaffoldContract) -> String;
}

pub trait MappingScaffold: Send + Sync {
    /// Mapping file with empty handlers for the family's handler types.
    fn generate_placeholder_handlers(&self, contract: &ScaffoldContract) -> String;
}

// ─── Family entry ───────────────────────────────────────────────────────────

/// Everything one protocol family provides.
///
/// Slots that only some families support return [`Capability`]; the rest
/// are required of every family.
pub trait ProtocolFamily: Send + Sync {
    fn name(&self) -> ProtocolName;

    /// Typed-binding generator, for families with compile-time bindings.
    fn type_generator(&self, options: &TypeGenOptions) -> Capability<TypeGenerator>;

    /// Code generator for one template definition.
    fn template_codegen(
        &self,
        template: &DataSourceTemplate,
    ) -> Capability<Box<dyn TemplateCodeGen>>;

    /// The family's contract ABI loader, for families with an ABI concept.
    fn abi_loader(&self) -> Capability<Arc<dyn AbiLoader>>;

    fn subgraph_builder(&self, options: BuildOptions, protocol: Protocol)
        -> Box<dyn SubgraphBuilder>;

    fn contract_helper(&self) -> Box<dyn ContractHelper>;

    fn manifest_scaffold(&self) -> Box<dyn ManifestScaffold>;

    fn mapping_scaffold(&self) -> Box<dyn MappingScaffold>;
}
