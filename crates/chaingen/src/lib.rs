//! # chaingen
//!
//! Multi-protocol subgraph code generation.
//!
//! A manifest's data source `kind` is resolved to one [`Protocol`]; the
//! [`vend`] table hands out that family's collaborators; [`Codegen`] drives
//! validation, typed bindings, and the templates file.
//!
//! ## Quick start
//! ```rust,no_run
//! use chaingen::{Codegen, CodegenConfig};
//! use std::path::Path;
//!
//! # async fn run() -> chaingen::Result<()> {
//! let summary = Codegen::new(CodegenConfig::default())
//!     .run(Path::new("subgraph.yaml"))
//!     .await?;
//! for path in summary.written() {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod codegen;
pub mod config;
pub mod tracing_setup;
pub mod vend;

pub use codegen::{Codegen, CodegenSummary};
pub use config::{CodegenConfig, CONFIG_FILE_NAME};
pub use tracing_setup::{init_tracing, LogConfig};
pub use vend::{family_for, vend, StrategyBundle, StrategyOptions};

pub use chaingen_core::{
    Capability, CodegenError, ErrorKind, Manifest, Protocol, ProtocolDescriptor, ProtocolName,
    Result, ValidationReport,
};
pub use chaingen_core::protocol::PROTOCOLS;
