//! Ethereum ABI loading.
//!
//! Accepts the usual shapes an ABI file comes in:
//! - a bare ABI array (`solc --abi`, Etherscan)
//! - a compiler artifact with an `abi` key (Hardhat, Foundry, Truffle)
//! - a Truffle-style `compilerOutput.abi`

use crate::codegen::EthereumCodeGenerator;
use alloy_json_abi::JsonAbi;
use async_trait::async_trait;
use chaingen_core::{AbiCodeGenerator, AbiError, AbiLoader, ParsedAbi};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A parsed contract ABI.
#[derive(Debug, Clone)]
pub struct EthereumAbi {
    name: String,
    file: PathBuf,
    abi: JsonAbi,
}

impl EthereumAbi {
    /// Parse ABI JSON in any of the supported shapes.
    pub fn from_json_str(name: &str, file: &Path, json: &str) -> Result<Self, AbiError> {
        let value: Value = serde_json::from_str(json)?;
        let items = match value {
            Value::Array(_) => value,
            Value::Object(mut object) => {
                let nested = object
                    .get_mut("compilerOutput")
                    .and_then(|output| output.get_mut("abi"))
                    .map(Value::take);
                match nested.or_else(|| object.remove("abi")) {
                    Some(abi @ Value::Array(_)) => abi,
                    _ => {
                        return Err(AbiError::Invalid(
                            "expected an ABI array or an object with an 'abi' array".into(),
                        ))
                    }
                }
            }
            _ => {
                return Err(AbiError::Invalid(
                    "expected an ABI array or an object with an 'abi' array".into(),
                ))
            }
        };
        let abi: JsonAbi = serde_json::from_value(items)?;
        Ok(Self {
            name: name.to_string(),
            file: file.to_path_buf(),
            abi,
        })
    }

    /// Read and parse an ABI file.
    pub async fn load(name: &str, path: &Path) -> Result<Self, AbiError> {
        let json = tokio::fs::read_to_string(path).await?;
        let abi = Self::from_json_str(name, path, &json)?;
        debug!(
            abi = name,
            events = abi.abi.events().count(),
            functions = abi.abi.functions().count(),
            "parsed Ethereum ABI"
        );
        Ok(abi)
    }

    pub fn json_abi(&self) -> &JsonAbi {
        &self.abi
    }
}

impl ParsedAbi for EthereumAbi {
    fn name(&self) -> &str {
        &self.name
    }

    fn file(&self) -> &Path {
        &self.file
    }

    fn code_generator(&self) -> Box<dyn AbiCodeGenerator + '_> {
        Box::new(EthereumCodeGenerator::new(&self.name, &self.abi))
    }
}

/// [`AbiLoader`] for Ethereum contract ABIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumAbiLoader;

#[async_trait]
impl AbiLoader for EthereumAbiLoader {
    async fn load(&self, name: &str, path: &Path) -> Result<Arc<dyn ParsedAbi>, AbiError> {
        Ok(Arc::new(EthereumAbi::load(name, path).await?))
    }
}
