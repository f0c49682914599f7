//! NEAR account id rules.
//!
//! 2 to 64 characters of `a-z`, `0-9` and the separators `-`, `_`, `.`.
//! A separator may not start or end the id, nor follow another separator.

use chaingen_core::ContractHelper;

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 64;

fn is_separator(c: char) -> bool {
    matches!(c, '-' | '_' | '.')
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NearAccount;

impl ContractHelper for NearAccount {
    fn identifier_name(&self) -> &'static str {
        "Account"
    }

    fn validate(&self, value: &str) -> Result<(), String> {
        if !(MIN_LEN..=MAX_LEN).contains(&value.len()) {
            return Err(format!("must be {MIN_LEN} to {MAX_LEN} characters long"));
        }
        let mut prev_separator = true;
        for c in value.chars() {
            if is_separator(c) {
                if prev_separator {
                    return Err(format!("unexpected separator '{c}'"));
                }
                prev_separator = true;
            } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
                prev_separator = false;
            } else {
                return Err(format!("invalid character '{c}'"));
            }
        }
        if prev_separator {
            return Err("must not end with a separator".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_ids() {
        for ok in ["near", "app.near", "v2.ref-finance.near", "a_b", "0x0"] {
            assert!(NearAccount.validate(ok).is_ok(), "{ok}");
        }
        for bad in ["a", ".near", "near.", "a..b", "a-_b", "App.near", "a b"] {
            assert!(NearAccount.validate(bad).is_err(), "{bad}");
        }
        assert!(NearAccount.validate(&"a".repeat(65)).is_err());
    }
}
