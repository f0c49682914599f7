//! Error types for the ChainGen pipeline.
//!
//! Every failure surfaces as a single [`CodegenError`]. Errors picked up on
//! the way out of a component are wrapped in [`CodegenError::Context`] frames,
//! so the innermost cause is always preserved and [`CodegenError::kind`] is
//! stable no matter how many frames were added.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the ChainGen crates.
pub type Result<T, E = CodegenError> = std::result::Result<T, E>;

/// Coarse classification of a [`CodegenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A kind string matched no known protocol family.
    Resolution,
    /// A capability was requested from a family that does not provide it.
    Capability,
    /// An ABI file was missing, unreadable, or unparsable.
    Load,
    /// A code generator or the formatter failed.
    Generation,
    /// Creating a directory or writing an artifact failed.
    Write,
    /// The manifest could not be read, parsed, or failed validation.
    Manifest,
    /// Invalid tool configuration.
    Config,
}

/// One frame of context attached while an error crosses a component boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextFrame {
    DataSource(String),
    Template(String),
    /// A pipeline stage, rendered as its failure text.
    Stage(&'static str),
}

impl fmt::Display for ContextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextFrame::DataSource(name) => write!(f, "data source '{name}'"),
            ContextFrame::Template(name) => write!(f, "template '{name}'"),
            ContextFrame::Stage(text) => write!(f, "{text}"),
        }
    }
}

/// Errors raised by a protocol's ABI loader or code generator.
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid ABI JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid ABI: {0}")]
    Invalid(String),

    #[error("unsupported ABI type '{0}'")]
    UnsupportedType(String),
}

/// The single error type surfaced by every ChainGen operation.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("Unresolved protocol for data source kind '{kind}'")]
    UnresolvedProtocol { kind: String },

    #[error("Data sources with kind '{protocol}' are not supported yet")]
    UnsupportedProtocol { protocol: String },

    #[error("Protocol '{protocol}' does not support {capability}")]
    UnsupportedCapability {
        protocol: String,
        capability: &'static str,
    },

    #[error("Failed to load ABI '{name}' for {owner} from {}: {source}", path.display())]
    AbiLoad {
        owner: String,
        name: String,
        path: PathBuf,
        #[source]
        source: AbiError,
    },

    #[error("Failed to generate types for ABI '{name}' ({}): {source}", path.display())]
    Generation {
        name: String,
        path: PathBuf,
        #[source]
        source: Box<CodegenError>,
    },

    #[error("{0}")]
    Abi(#[from] AbiError),

    #[error("Failed to format generated code: {reason}")]
    Format { reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Manifest(String),

    #[error("Manifest validation failed with {count} error(s)")]
    ManifestInvalid { count: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{frame}: {source}")]
    Context {
        frame: ContextFrame,
        #[source]
        source: Box<CodegenError>,
    },
}

impl CodegenError {
    /// Classification of the innermost cause.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodegenError::UnresolvedProtocol { .. } => ErrorKind::Resolution,
            CodegenError::UnsupportedProtocol { .. }
            | CodegenError::UnsupportedCapability { .. } => ErrorKind::Capability,
            CodegenError::AbiLoad { .. } => ErrorKind::Load,
            CodegenError::Generation { .. }
            | CodegenError::Abi(_)
            | CodegenError::Format { .. } => ErrorKind::Generation,
            CodegenError::Write { .. } => ErrorKind::Write,
            CodegenError::Manifest(_) | CodegenError::ManifestInvalid { .. } => {
                ErrorKind::Manifest
            }
            CodegenError::Config(_) => ErrorKind::Config,
            CodegenError::Context { source, .. } => source.kind(),
        }
    }

    /// Context frames, outermost first.
    pub fn frames(&self) -> Vec<&ContextFrame> {
        let mut frames = Vec::new();
        let mut current = self;
        while let CodegenError::Context { frame, source } = current {
            frames.push(frame);
            current = source;
        }
        frames
    }

    /// The error underneath all context frames.
    pub fn innermost(&self) -> &CodegenError {
        match self {
            CodegenError::Context { source, .. } => source.innermost(),
            other => other,
        }
    }

    /// Wrap this error in another context frame.
    pub fn context(self, frame: ContextFrame) -> Self {
        CodegenError::Context {
            frame,
            source: Box::new(self),
        }
    }
}

/// Adds context frames to `Result<T, CodegenError>`.
pub trait ResultExt<T> {
    fn context(self, frame: ContextFrame) -> Result<T>;

    fn with_context<F>(self, frame: F) -> Result<T>
    where
        F: FnOnce() -> ContextFrame;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, frame: ContextFrame) -> Result<T> {
        self.map_err(|e| e.context(frame))
    }

    fn with_context<F>(self, frame: F) -> Result<T>
    where
        F: FnOnce() -> ContextFrame,
    {
        self.map_err(|e| e.context(frame()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_error() -> CodegenError {
        CodegenError::AbiLoad {
            owner: "data source 'Token'".into(),
            name: "ERC20".into(),
            path: PathBuf::from("abis/ERC20.json"),
            source: AbiError::Invalid("expected an array".into()),
        }
    }

    #[test]
    fn kind_survives_context_wrapping() {
        let err = load_error()
            .context(ContextFrame::DataSource("Token".into()))
            .context(ContextFrame::Stage("Failed to load contract ABIs"));
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(matches!(err.innermost(), CodegenError::AbiLoad { .. }));
    }

    #[test]
    fn frames_are_outermost_first() {
        let err = load_error()
            .context(ContextFrame::DataSource("Token".into()))
            .context(ContextFrame::Stage("Failed to load contract ABIs"));
        let frames = err.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], &ContextFrame::Stage("Failed to load contract ABIs"));
        assert_eq!(frames[1], &ContextFrame::DataSource("Token".into()));
    }

    #[test]
    fn display_keeps_inner_message() {
        let err = load_error().context(ContextFrame::Stage("Failed to load contract ABIs"));
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to load contract ABIs: "));
        assert!(msg.contains("abis/ERC20.json"));
        assert!(msg.contains("expected an array"));
    }

    #[test]
    fn result_ext_wraps_errors_only() {
        let ok: Result<u8> = Ok(1);
        assert_eq!(ok.context(ContextFrame::Template("x".into())).unwrap(), 1);

        let err: Result<u8> = Err(CodegenError::Config("bad".into()));
        let wrapped = err.with_context(|| ContextFrame::Template("x".into())).unwrap_err();
        assert_eq!(wrapped.kind(), ErrorKind::Config);
        assert_eq!(wrapped.frames().len(), 1);
    }
}
