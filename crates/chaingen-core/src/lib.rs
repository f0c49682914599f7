//! # chaingen-core
//!
//! Core traits, types, and the type generation pipeline shared across all
//! ChainGen crates. Every protocol family crate (EVM, Cosmos, NEAR) plugs into
//! the interfaces defined here.
//!
//! ## Pieces
//! - [`protocol`]: static registry of protocol families and the [`Protocol`]
//!   identity resolved from a data source kind string
//! - [`strategy`]: capability traits each family implements, and the
//!   [`ProtocolFamily`] vending-table entry
//! - [`abi_ref`]: walks a manifest and collects every ABI reference
//! - [`typegen`]: loads ABIs, generates bindings, formats and persists them

pub mod abi_ref;
pub mod capability;
pub mod codegen;
pub mod error;
pub mod format;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod protocol;
pub mod strategy;
pub mod typegen;
pub mod validate;

pub use abi_ref::{check_path_segment, AbiOwner, AbiReference};
pub use capability::Capability;
pub use error::{AbiError, CodegenError, ContextFrame, ErrorKind, Result, ResultExt};
pub use format::{Formatter, SourceParser, TypeScriptFormatter};
pub use manifest::{AbiEntry, DataSource, DataSourceTemplate, Manifest, Mapping, Source};
pub use output::{LocalFs, OutputFs};
pub use progress::{MemoryReporter, ProgressEvent, ProgressReporter, TracingReporter};
pub use protocol::{Protocol, ProtocolDescriptor, ProtocolName};
pub use strategy::{
    AbiCodeGenerator, AbiLoader, BuildOptions, ContractHelper, ManifestScaffold, MappingScaffold,
    ParsedAbi, ProtocolFamily, ScaffoldContract, SubgraphBuilder, TemplateCodeGen,
};
pub use typegen::{GeneratedArtifact, LoadedAbi, PipelineState, TypeGenOptions, TypeGenerator};
pub use validate::{ManifestIssue, Severity, ValidationReport};
