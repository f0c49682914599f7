use crate::account::NearAccount;
use chaingen_core::{BuildOptions, ContractHelper, Protocol, Source, SubgraphBuilder, ValidationReport};

pub const HANDLER_TYPES: &[&str] = &["blockHandlers", "receiptHandlers"];

/// Manifest checks for NEAR data sources.
#[derive(Debug, Clone)]
pub struct NearSubgraph {
    protocol: Protocol,
    options: BuildOptions,
}

impl NearSubgraph {
    pub fn new(options: BuildOptions, protocol: Protocol) -> Self {
        Self { protocol, options }
    }
}

impl SubgraphBuilder for NearSubgraph {
    fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    fn options(&self) -> &BuildOptions {
        &self.options
    }

    fn handler_types(&self) -> &'static [&'static str] {
        HANDLER_TYPES
    }

    fn validate_source(
        &self,
        path: &str,
        source: &Source,
        is_template: bool,
        report: &mut ValidationReport,
    ) {
        let field = format!("{path} > source > account");
        match &source.account {
            None if !is_template => report.error(field, "missing account"),
            None => {}
            Some(account) => {
                if let Err(reason) = NearAccount.validate(account) {
                    report.error(field, format!("invalid account '{account}': {reason}"));
                }
            }
        }
        if source.address.is_some() {
            report.warning(
                format!("{path} > source > address"),
                "NEAR data sources are keyed by 'account'; 'address' is ignored",
            );
        }
    }
}
