//! Tool configuration, read from `chaingen.yaml` (YAML or JSON).
//!
//! Every field has a default, so an empty file and a missing file mean the
//! same thing. Command-line flags override file values.

use crate::tracing_setup::LogConfig;
use crate::vend::StrategyOptions;
use chaingen_core::{BuildOptions, CodegenError, Result, TypeGenOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "chaingen.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenConfig {
    /// Root of the generated tree
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Directory ABI paths are resolved against; the manifest's directory
    /// when unset
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    /// Generated file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Skip manifest validation entirely
    #[serde(default)]
    pub skip_validation: bool,
    /// Accept any `network` value during validation
    #[serde(default)]
    pub skip_network_validation: bool,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_extension() -> String {
    "ts".into()
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            source_dir: None,
            extension: default_extension(),
            skip_validation: false,
            skip_network_validation: false,
            log: LogConfig::default(),
        }
    }
}

impl CodegenConfig {
    /// Parse a config document. JSON is accepted as well, being valid YAML.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| CodegenError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            CodegenError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load `path` if given, else `chaingen.yaml` in `dir` if it exists,
    /// else the defaults.
    pub async fn load_or_default(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path).await;
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            Self::load(&candidate).await
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.extension.is_empty() || self.extension.contains(['.', '/', '\\']) {
            return Err(CodegenError::Config(format!(
                "invalid extension '{}': expected a bare extension such as 'ts'",
                self.extension
            )));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(CodegenError::Config("outputDir must not be empty".into()));
        }
        Ok(())
    }

    /// Source directory for a manifest at `manifest`: the configured one, or
    /// the manifest's own directory.
    pub fn source_dir_for(&self, manifest: &Path) -> Option<PathBuf> {
        self.source_dir.clone().or_else(|| {
            manifest
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
    }

    pub fn strategy_options(&self, manifest: &Path) -> StrategyOptions {
        let source_dir = self.source_dir_for(manifest);
        let mut type_gen =
            TypeGenOptions::new(&self.output_dir).with_extension(self.extension.clone());
        type_gen.source_dir = source_dir.clone();
        StrategyOptions::new(
            type_gen,
            BuildOptions {
                source_dir,
                skip_network_validation: self.skip_network_validation,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaingen_core::ErrorKind;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(CodegenConfig::from_yaml_str("").unwrap(), CodegenConfig::default());
        let config = CodegenConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("generated"));
        assert_eq!(config.extension, "ts");
    }

    #[test]
    fn yaml_and_json() {
        let yaml = "outputDir: out\nskipNetworkValidation: true\nlog:\n  level: debug\n";
        let config = CodegenConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(config.skip_network_validation);
        assert_eq!(config.log.level, "debug");

        let json = r#"{"extension": "as", "sourceDir": "subgraph"}"#;
        let config = CodegenConfig::from_yaml_str(json).unwrap();
        assert_eq!(config.extension, "as");
        assert_eq!(config.source_dir, Some(PathBuf::from("subgraph")));
    }

    #[test]
    fn bad_values_are_config_errors() {
        for doc in ["extension: .ts", "extension: ''", "outputDir: ''", "outputDir: [1]"] {
            let err = CodegenConfig::from_yaml_str(doc).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "{doc}");
        }
    }

    #[test]
    fn source_dir_defaults_to_manifest_dir() {
        let config = CodegenConfig::default();
        assert_eq!(
            config.source_dir_for(Path::new("subgraph/subgraph.yaml")),
            Some(PathBuf::from("subgraph"))
        );
        assert_eq!(config.source_dir_for(Path::new("subgraph.yaml")), None);

        let options = config.strategy_options(Path::new("subgraph/subgraph.yaml"));
        assert_eq!(options.type_gen.output_dir, PathBuf::from("generated"));
        assert_eq!(options.build.source_dir, Some(PathBuf::from("subgraph")));
    }

    #[tokio::test]
    async fn missing_default_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = CodegenConfig::load_or_default(None, dir.path()).await.unwrap();
        assert_eq!(config, CodegenConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "outputDir: types\n").unwrap();
        let config = CodegenConfig::load_or_default(None, dir.path()).await.unwrap();
        assert_eq!(config.output_dir, PathBuf::from("types"));

        let err = CodegenConfig::load_or_default(Some(&dir.path().join("nope.yaml")), dir.path())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
