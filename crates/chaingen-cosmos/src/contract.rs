//! Bech32-shaped address checks. The checksum is not verified.

use chaingen_core::ContractHelper;

const CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

#[derive(Debug, Clone, Copy, Default)]
pub struct CosmosContract;

impl ContractHelper for CosmosContract {
    fn identifier_name(&self) -> &'static str {
        "Contract address"
    }

    fn validate(&self, value: &str) -> Result<(), String> {
        if value.len() > 90 {
            return Err("must be at most 90 characters".into());
        }
        let (hrp, data) = value
            .rsplit_once('1')
            .ok_or_else(|| "must contain a human-readable prefix and '1' separator".to_string())?;
        if hrp.is_empty() || !hrp.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
            return Err(format!("invalid prefix '{hrp}'"));
        }
        if data.len() < 6 {
            return Err("data part is too short".into());
        }
        match data.chars().find(|c| !CHARSET.contains(*c)) {
            Some(c) => Err(format!("invalid character '{c}'")),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bech32_shape() {
        let helper = CosmosContract;
        assert!(helper.validate("cosmos1qyqa2zn5c85rjrxnq5fk").is_ok());
        assert!(helper
            .validate("juno14hj2tavq8fpesdwxxcu44rty3hh90vhujrvcmstl4zr3txmfvw9skjuwg8")
            .is_ok());
        assert!(helper.validate("cosmosqyqa2zn5").is_err());
        assert!(helper.validate("1qyqa2zn5c85").is_err());
        assert!(helper.validate("Cosmos1qyqa2zn5c85").is_err());
        assert!(helper.validate("cosmos1qyqa2bn5c85").is_err());
    }
}
