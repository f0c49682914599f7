//! ABI reference collection.
//!
//! Walks a manifest and produces the flat, ordered list of ABIs the type
//! generator has to load.

use crate::error::{CodegenError, ContextFrame, Result};
use crate::manifest::{DataSourceTemplate, Manifest};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Check that `name` is a single plain path segment, so joining it onto the
/// output directory stays inside it. Returns the reason on failure.
pub fn check_path_segment(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("name is empty");
    }
    if name.contains(['/', '\\']) {
        return Err("name contains a path separator");
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err("name is not a plain file name"),
    }
}

/// Who an ABI belongs to. Determines the output subtree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiOwner {
    DataSource(String),
    Template(String),
}

impl AbiOwner {
    pub fn name(&self) -> &str {
        match self {
            AbiOwner::DataSource(name) | AbiOwner::Template(name) => name,
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, AbiOwner::Template(_))
    }

    /// `<root>/<name>` for data sources, `<root>/templates/<name>` for templates.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        match self {
            AbiOwner::DataSource(name) => root.join(name),
            AbiOwner::Template(name) => root.join("templates").join(name),
        }
    }

    pub fn frame(&self) -> ContextFrame {
        match self {
            AbiOwner::DataSource(name) => ContextFrame::DataSource(name.clone()),
            AbiOwner::Template(name) => ContextFrame::Template(name.clone()),
        }
    }
}

impl fmt::Display for AbiOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.frame())
    }
}

/// One ABI to load: owner, manifest ABI name, and file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiReference {
    pub owner: AbiOwner,
    pub abi_name: String,
    pub file_path: PathBuf,
}

impl AbiReference {
    /// Deterministic artifact path for this ABI. Fails when the owner or ABI
    /// name would place the file outside `output_dir`.
    pub fn output_path(&self, output_dir: &Path, extension: &str) -> Result<PathBuf> {
        let file_name = format!("{}.{extension}", self.abi_name);
        for name in [self.owner.name(), self.abi_name.as_str(), file_name.as_str()] {
            check_path_segment(name).map_err(|reason| {
                CodegenError::Config(format!(
                    "{}: cannot write ABI '{}' under '{name}': {reason}",
                    self.owner,
                    self.abi_name
                ))
            })?;
        }
        Ok(self.owner.output_dir(output_dir).join(file_name))
    }
}

/// Resolve a manifest path against the source directory, if one is set.
/// Absolute paths are returned unchanged.
pub fn resolve_path(source_dir: Option<&Path>, path: &Path) -> PathBuf {
    match source_dir {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    }
}

/// One reference per `(data source, abi)` pair, in manifest order.
pub fn collect_data_source_abi_references(manifest: &Manifest) -> Vec<AbiReference> {
    manifest
        .data_sources
        .iter()
        .flat_map(|ds| {
            ds.mapping.abis.iter().map(move |abi| AbiReference {
                owner: AbiOwner::DataSource(ds.name.clone()),
                abi_name: abi.name.clone(),
                file_path: abi.file.clone(),
            })
        })
        .collect()
}

/// Reference for one template ABI, resolved against `source_dir` when set.
pub fn collect_template_abi_reference(
    template: &DataSourceTemplate,
    abi_name: &str,
    maybe_relative_path: &Path,
    source_dir: Option<&Path>,
) -> AbiReference {
    AbiReference {
        owner: AbiOwner::Template(template.name.clone()),
        abi_name: abi_name.to_string(),
        file_path: resolve_path(source_dir, maybe_relative_path),
    }
}

/// References for every template ABI, in manifest order.
pub fn collect_template_abi_references(
    manifest: &Manifest,
    source_dir: Option<&Path>,
) -> Vec<AbiReference> {
    manifest
        .templates
        .iter()
        .flat_map(|template| {
            template.mapping.abis.iter().map(move |abi| {
                collect_template_abi_reference(template, &abi.name, &abi.file, source_dir)
            })
        })
        .collect()
}
