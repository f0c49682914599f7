//! `codegen` orchestration: manifest → identity → strategies → validation →
//! typed bindings → templates file.

use crate::config::CodegenConfig;
use crate::vend::{self, StrategyBundle};
use chaingen_core::codegen::GENERATED_FILE_NOTE;
use chaingen_core::progress::{display_path, with_progress};
use chaingen_core::{
    Capability, CodegenError, ContextFrame, Formatter, GeneratedArtifact, LocalFs, Manifest,
    OutputFs, ProgressReporter, Protocol, ProtocolName, Result, ResultExt, Severity,
    SourceParser, TracingReporter, TypeScriptFormatter, ValidationReport,
};
use indexmap::IndexSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// What one `codegen` run produced.
#[derive(Debug, Clone)]
pub struct CodegenSummary {
    pub protocol: ProtocolName,
    /// Bindings, data sources first, then template ABIs
    pub artifacts: Vec<GeneratedArtifact>,
    /// `<outputDir>/templates.<ext>`, when the manifest has templates
    pub templates: Option<GeneratedArtifact>,
    pub report: ValidationReport,
}

impl CodegenSummary {
    /// Every file written, in write order.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.artifacts
            .iter()
            .chain(&self.templates)
            .map(|a| a.output_path.as_path())
    }
}

/// Drives a full code generation run for one manifest.
pub struct Codegen {
    config: CodegenConfig,
    progress: Arc<dyn ProgressReporter>,
    formatter: Arc<dyn Formatter>,
    output: Arc<dyn OutputFs>,
}

impl Codegen {
    pub fn new(config: CodegenConfig) -> Self {
        Self {
            config,
            progress: Arc::new(TracingReporter),
            formatter: Arc::new(TypeScriptFormatter),
            output: Arc::new(LocalFs),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_output(mut self, output: Arc<dyn OutputFs>) -> Self {
        self.output = output;
        self
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Read and parse the manifest at `path`.
    pub async fn load_manifest(&self, path: &Path) -> Result<Manifest> {
        with_progress(
            self.progress.as_ref(),
            &format!("Load subgraph from {}", display_path(path)),
            "Failed to load subgraph",
            Manifest::load(path),
        )
        .await
    }

    /// Resolve the manifest's protocol and vend its strategies.
    pub fn strategies(
        &self,
        manifest_path: &Path,
        manifest: &Manifest,
    ) -> Result<StrategyBundle> {
        let protocol = Protocol::from_manifest(manifest);
        protocol.require()?;
        vend::vend(&protocol, &self.config.strategy_options(manifest_path))
    }

    /// Validate without failing; the caller decides what errors mean.
    pub fn validate(&self, bundle: &StrategyBundle, manifest: &Manifest) -> ValidationReport {
        let report = bundle.subgraph_builder.validate_manifest(manifest);
        for issue in report.issues() {
            match issue.severity {
                Severity::Warning => self.progress.warn(&issue.to_string()),
                Severity::Error => error!(target: "chaingen", "{issue}"),
            }
        }
        report
    }

    /// Load, validate, and generate everything for the manifest at `path`.
    pub async fn run(&self, manifest_path: &Path) -> Result<CodegenSummary> {
        let manifest = self.load_manifest(manifest_path).await?;
        let bundle = self.strategies(manifest_path, &manifest)?;
        info!(
            target: "chaingen",
            protocol = %bundle.name(),
            data_sources = manifest.data_sources.len(),
            templates = manifest.templates.len(),
            "generating types"
        );

        let report = if self.config.skip_validation {
            for kind in manifest.kinds().filter(|k| bundle.protocol().is_deprecated_kind(k)) {
                self.progress.warn(&format!(
                    "kind '{kind}' is deprecated, use '{}' instead",
                    bundle.name()
                ));
            }
            ValidationReport::new()
        } else {
            let report = self.validate(&bundle, &manifest);
            with_progress(
                self.progress.as_ref(),
                "Validate subgraph manifest",
                "Failed to validate subgraph manifest",
                async { report.into_result() },
            )
            .await?
        };

        let protocol = bundle.protocol().clone();
        let bundle_name = bundle.name();
        let artifacts = match bundle.type_generator {
            Capability::Present(generator) => {
                generator
                    .with_progress(self.progress.clone())
                    .with_output(self.output.clone())
                    .generate_types(&manifest)
                    .await?
            }
            Capability::Unsupported => {
                self.progress.warn(&format!(
                    "{} subgraphs have no typed bindings; skipping type generation",
                    protocol.display_name()?
                ));
                Vec::new()
            }
        };

        let templates = if manifest.templates.is_empty() {
            None
        } else {
            Some(
                with_progress(
                    self.progress.as_ref(),
                    "Generate types for data source templates",
                    "Failed to generate types for data source templates",
                    self.generate_templates(&protocol, &manifest),
                )
                .await?,
            )
        };

        Ok(CodegenSummary {
            protocol: bundle_name,
            artifacts,
            templates,
            report,
        })
    }

    /// Write `<outputDir>/templates.<ext>` with one class per template.
    pub async fn generate_templates(
        &self,
        protocol: &Protocol,
        manifest: &Manifest,
    ) -> Result<GeneratedArtifact> {
        let mut imports = IndexSet::new();
        let mut classes = Vec::new();
        for template in &manifest.templates {
            let codegen = vend::template_codegen(protocol, template)
                .context(ContextFrame::Template(template.name.clone()))?;
            imports.extend(codegen.generate_module_imports());
            classes.extend(codegen.generate_create_methods());
        }

        let mut code = vec![GENERATED_FILE_NOTE.to_string()];
        code.extend(imports);
        code.extend(classes);
        let content = self.formatter.format(&code.join("\n"), SourceParser::TypeScript)?;

        let artifact = GeneratedArtifact {
            output_path: self.templates_path(),
            content,
        };
        self.write(&artifact).await?;
        Ok(artifact)
    }

    fn templates_path(&self) -> PathBuf {
        self.config
            .output_dir
            .join(format!("templates.{}", self.config.extension))
    }

    async fn write(&self, artifact: &GeneratedArtifact) -> Result<()> {
        let path = &artifact.output_path;
        let write_error = |path: &Path, source| CodegenError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.output
                .ensure_dir(dir)
                .await
                .map_err(|e| write_error(dir, e))?;
        }
        self.output
            .write_file(path, &artifact.content)
            .await
            .map_err(|e| write_error(path, e))?;
        self.progress.step("Write templates to", &display_path(path));
        Ok(())
    }
}
