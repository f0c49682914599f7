//! Type generation pipeline.
//!
//! One run walks `Idle → LoadingAbis → GeneratingArtifacts → Done`, or ends
//! in `Failed` from either active state:
//!
//! 1. Load every data source ABI, in manifest order. The first failure
//!    aborts the run.
//! 2. Load every template ABI, same policy.
//! 3. Generate, format, and write one file per data source ABI, in order.
//! 4. Generate, format, and write one file per template ABI, concurrently.
//!    The first failure wins; siblings still in flight are dropped and may
//!    or may not have written their file.
//!
//! Writes are plain overwrites, so re-running with unchanged inputs
//! reproduces the same tree.

use crate::abi_ref::{self, AbiReference};
use crate::codegen::GENERATED_FILE_NOTE;
use crate::error::{CodegenError, Result};
use crate::format::{Formatter, SourceParser, TypeScriptFormatter};
use crate::manifest::Manifest;
use crate::output::{LocalFs, OutputFs};
use crate::progress::{display_path, with_progress, ProgressReporter, TracingReporter};
use crate::protocol::ProtocolName;
use crate::strategy::{AbiLoader, ParsedAbi};
use futures::future::try_join_all;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

fn default_extension() -> String {
    "ts".into()
}

/// Where ABIs are read from and artifacts written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeGenOptions {
    /// Manifest-relative ABI paths are resolved against this directory.
    pub source_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Artifact file extension, without the dot
    pub extension: String,
}

impl TypeGenOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: None,
            output_dir: output_dir.into(),
            extension: default_extension(),
        }
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    LoadingAbis,
    GeneratingArtifacts,
    Done,
    Failed,
}

/// An ABI reference paired with the family's parsed representation.
#[derive(Debug, Clone)]
pub struct LoadedAbi {
    pub reference: AbiReference,
    pub abi: Arc<dyn ParsedAbi>,
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub output_path: PathBuf,
    pub content: String,
}

/// Generates typed bindings for every ABI a manifest references.
pub struct TypeGenerator {
    protocol: ProtocolName,
    options: TypeGenOptions,
    loader: Arc<dyn AbiLoader>,
    formatter: Arc<dyn Formatter>,
    output: Arc<dyn OutputFs>,
    progress: Arc<dyn ProgressReporter>,
    state: Mutex<PipelineState>,
}

impl fmt::Debug for TypeGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeGenerator")
            .field("protocol", &self.protocol)
            .field("options", &self.options)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl TypeGenerator {
    /// Generator writing to the local disk and reporting through `tracing`.
    pub fn new(
        protocol: ProtocolName,
        options: TypeGenOptions,
        loader: Arc<dyn AbiLoader>,
    ) -> Self {
        Self {
            protocol,
            options,
            loader,
            formatter: Arc::new(TypeScriptFormatter),
            output: Arc::new(LocalFs),
            progress: Arc::new(TracingReporter),
            state: Mutex::new(PipelineState::Idle),
        }
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_output(mut self, output: Arc<dyn OutputFs>) -> Self {
        self.output = output;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn protocol(&self) -> ProtocolName {
        self.protocol
    }

    pub fn options(&self) -> &TypeGenOptions {
        &self.options
    }

    /// State after the most recent transition.
    pub fn state(&self) -> PipelineState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: PipelineState) {
        debug!(protocol = %self.protocol, ?state, "type generation state");
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Run the whole pipeline and return every artifact written, data
    /// source artifacts first (manifest order), then template artifacts.
    pub async fn generate_types(&self, manifest: &Manifest) -> Result<Vec<GeneratedArtifact>> {
        self.set_state(PipelineState::LoadingAbis);
        let result = self.run(manifest).await;
        self.set_state(if result.is_ok() {
            PipelineState::Done
        } else {
            PipelineState::Failed
        });
        result
    }

    async fn run(&self, manifest: &Manifest) -> Result<Vec<GeneratedArtifact>> {
        let progress = self.progress.as_ref();

        let abis = with_progress(
            progress,
            "Load contract ABIs",
            "Failed to load contract ABIs",
            self.load_data_source_abis(manifest),
        )
        .await?;

        let template_abis = with_progress(
            progress,
            "Load data source template ABIs",
            "Failed to load data source template ABIs",
            self.load_template_abis(manifest),
        )
        .await?;

        self.set_state(PipelineState::GeneratingArtifacts);

        let mut artifacts = with_progress(
            progress,
            "Generate types for contract ABIs",
            "Failed to generate types for contract ABIs",
            self.generate_types_for_abis(&abis),
        )
        .await?;

        artifacts.extend(
            with_progress(
                progress,
                "Generate types for data source template ABIs",
                "Failed to generate types for data source template ABIs",
                self.generate_types_for_template_abis(&template_abis),
            )
            .await?,
        );

        Ok(artifacts)
    }

    // ─── Loading ────────────────────────────────────────────────────────────

    /// Load every data source ABI in manifest order, stopping at the first
    /// failure.
    pub async fn load_data_source_abis(&self, manifest: &Manifest) -> Result<Vec<LoadedAbi>> {
        let source_dir = self.options.source_dir.as_deref();
        let mut loaded = Vec::new();
        for mut reference in abi_ref::collect_data_source_abi_references(manifest) {
            reference.file_path = abi_ref::resolve_path(source_dir, &reference.file_path);
            loaded.push(self.load_abi(reference, "Load contract ABI from").await?);
        }
        Ok(loaded)
    }

    /// Load every template ABI in manifest order, stopping at the first
    /// failure.
    pub async fn load_template_abis(&self, manifest: &Manifest) -> Result<Vec<LoadedAbi>> {
        let source_dir = self.options.source_dir.as_deref();
        let mut loaded = Vec::new();
        for reference in abi_ref::collect_template_abi_references(manifest, source_dir) {
            loaded.push(self.load_abi(reference, "Load data source template ABI from").await?);
        }
        Ok(loaded)
    }

    async fn load_abi(&self, reference: AbiReference, step: &str) -> Result<LoadedAbi> {
        let abi = self
            .loader
            .load(&reference.abi_name, &reference.file_path)
            .await
            .map_err(|source| CodegenError::AbiLoad {
                owner: reference.owner.to_string(),
                name: reference.abi_name.clone(),
                path: reference.file_path.clone(),
                source,
            })?;
        debug!(abi = %reference.abi_name, owner = %reference.owner, "loaded ABI");
        self.progress.step(step, &display_path(&reference.file_path));
        Ok(LoadedAbi { reference, abi })
    }

    // ─── Generation ─────────────────────────────────────────────────────────

    /// Generate and write one artifact per ABI, sequentially, in order.
    pub async fn generate_types_for_abis(
        &self,
        abis: &[LoadedAbi],
    ) -> Result<Vec<GeneratedArtifact>> {
        let mut artifacts = Vec::with_capacity(abis.len());
        for abi in abis {
            artifacts.push(self.generate_artifact(abi).await?);
        }
        Ok(artifacts)
    }

    /// Generate and write one artifact per template ABI, concurrently.
    /// Output order matches input order; completion order does not.
    pub async fn generate_types_for_template_abis(
        &self,
        abis: &[LoadedAbi],
    ) -> Result<Vec<GeneratedArtifact>> {
        try_join_all(abis.iter().map(|abi| self.generate_artifact(abi))).await
    }

    async fn generate_artifact(&self, abi: &LoadedAbi) -> Result<GeneratedArtifact> {
        let artifact = self.render(abi)?;
        self.persist(&artifact).await?;
        Ok(artifact)
    }

    /// Header, imports, and declarations for one ABI, formatted.
    pub fn render(&self, loaded: &LoadedAbi) -> Result<GeneratedArtifact> {
        let reference = &loaded.reference;
        debug!(abi = %reference.abi_name, owner = %reference.owner, "generating types");

        let content = self.render_source(loaded.abi.as_ref()).map_err(|source| {
            CodegenError::Generation {
                name: reference.abi_name.clone(),
                path: reference.file_path.clone(),
                source: Box::new(source),
            }
        })?;

        Ok(GeneratedArtifact {
            output_path: reference.output_path(&self.options.output_dir, &self.options.extension)?,
            content,
        })
    }

    fn render_source(&self, abi: &dyn ParsedAbi) -> Result<String> {
        let generator = abi.code_generator();
        let mut code = vec![GENERATED_FILE_NOTE.to_string()];
        code.extend(generator.generate_module_imports());
        code.extend(generator.generate_types()?);
        self.formatter.format(&code.join("\n"), SourceParser::TypeScript)
    }

    /// Create the artifact's directory and write it, replacing any existing
    /// file.
    pub async fn persist(&self, artifact: &GeneratedArtifact) -> Result<()> {
        let path = &artifact.output_path;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.output
                .ensure_dir(dir)
                .await
                .map_err(|source| write_error(dir, source))?;
        }
        self.output
            .write_file(path, &artifact.content)
            .await
            .map_err(|source| write_error(path, source))?;
        self.progress.step("Write types to", &display_path(path));
        Ok(())
    }
}

fn write_error(path: &Path, source: std::io::Error) -> CodegenError {
    CodegenError::Write {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AbiError;
    use crate::strategy::AbiCodeGenerator;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct Stub {
        name: String,
        file: PathBuf,
    }

    struct StubCodegen<'a>(&'a Stub);

    impl AbiCodeGenerator for StubCodegen<'_> {
        fn generate_module_imports(&self) -> Vec<String> {
            vec!["import { ethereum } from \"@graphprotocol/graph-ts\";".into()]
        }

        fn generate_types(&self) -> std::result::Result<Vec<String>, AbiError> {
            Ok(vec![format!("export class {} {{\n}}", self.0.name)])
        }
    }

    impl ParsedAbi for Stub {
        fn name(&self) -> &str {
            &self.name
        }

        fn file(&self) -> &Path {
            &self.file
        }

        fn code_generator(&self) -> Box<dyn AbiCodeGenerator + '_> {
            Box::new(StubCodegen(self))
        }
    }

    struct StubLoader;

    #[async_trait]
    impl AbiLoader for StubLoader {
        async fn load(
            &self,
            name: &str,
            path: &Path,
        ) -> std::result::Result<Arc<dyn ParsedAbi>, AbiError> {
            Ok(Arc::new(Stub {
                name: name.into(),
                file: path.into(),
            }))
        }
    }

    #[test]
    fn options_defaults() {
        let options = TypeGenOptions::new("generated");
        assert_eq!(options.extension, "ts");
        assert!(options.source_dir.is_none());
    }

    #[test]
    fn render_puts_header_first() {
        let generator = TypeGenerator::new(
            ProtocolName::Ethereum,
            TypeGenOptions::new("out"),
            Arc::new(StubLoader),
        );
        let loaded = LoadedAbi {
            reference: AbiReference {
                owner: crate::abi_ref::AbiOwner::DataSource("Token".into()),
                abi_name: "ERC20".into(),
                file_path: "abis/ERC20.json".into(),
            },
            abi: Arc::new(Stub {
                name: "ERC20".into(),
                file: "abis/ERC20.json".into(),
            }),
        };
        let artifact = generator.render(&loaded).unwrap();
        assert_eq!(artifact.output_path, PathBuf::from("out/Token/ERC20.ts"));
        assert!(artifact.content.starts_with(GENERATED_FILE_NOTE));
        assert!(artifact.content.contains("export class ERC20 {\n}\n"));
        assert_eq!(generator.state(), PipelineState::Idle);
    }
}
