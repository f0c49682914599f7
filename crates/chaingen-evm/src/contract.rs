//! Ethereum contract address checks.

use chaingen_core::ContractHelper;

#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumContract;

impl ContractHelper for EthereumContract {
    fn identifier_name(&self) -> &'static str {
        "Contract address"
    }

    fn validate(&self, value: &str) -> Result<(), String> {
        let digits = value
            .strip_prefix("0x")
            .ok_or_else(|| "must start with 0x".to_string())?;
        if digits.len() != 40 {
            return Err(format!(
                "must be 40 hexadecimal characters after 0x, got {}",
                digits.len()
            ));
        }
        hex::decode(digits)
            .map(|_| ())
            .map_err(|_| "contains non-hexadecimal characters".to_string())
    }
}
