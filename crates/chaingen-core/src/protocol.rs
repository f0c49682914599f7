//! Protocol registry and identity.
//!
//! The registry is a static table of [`ProtocolDescriptor`]s. A [`Protocol`]
//! is resolved from a data source kind string by reverse lookup into every
//! descriptor's kind aliases. An unknown kind does not error: it yields an
//! unresolved identity and the caller decides whether that is fatal.

use crate::error::{CodegenError, Result};
use crate::manifest::Manifest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of supported protocol families. Used as the vending-table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolName {
    Ethereum,
    Near,
    Tendermint,
}

impl ProtocolName {
    pub const ALL: [ProtocolName; 3] = [
        ProtocolName::Ethereum,
        ProtocolName::Near,
        ProtocolName::Tendermint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolName::Ethereum => "ethereum",
            ProtocolName::Near => "near",
            ProtocolName::Tendermint => "tendermint",
        }
    }

    /// The registry entry for this family.
    pub fn descriptor(&self) -> &'static ProtocolDescriptor {
        match self {
            ProtocolName::Ethereum => &ETHEREUM,
            ProtocolName::Near => &NEAR,
            ProtocolName::Tendermint => &TENDERMINT,
        }
    }
}

impl std::str::FromStr for ProtocolName {
    type Err = CodegenError;

    /// Parse a canonical family name. Kind aliases go through [`Protocol::resolve`].
    fn from_str(s: &str) -> Result<Self> {
        ProtocolName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CodegenError::UnresolvedProtocol { kind: s.to_string() })
    }
}

impl fmt::Display for ProtocolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one protocol family.
#[derive(Debug)]
pub struct ProtocolDescriptor {
    pub name: ProtocolName,
    /// Human-readable label for diagnostics
    pub display_name: &'static str,
    /// Every manifest `kind` string that selects this family
    pub kind_aliases: &'static [&'static str],
    /// Aliases still accepted for backwards compatibility only
    pub deprecated_aliases: &'static [&'static str],
    /// Accepted `network` identifiers
    pub network_ids: &'static [&'static str],
    /// Data sources reference contract ABIs
    pub supports_abis: bool,
    /// Mappings can declare event handlers
    pub supports_events: bool,
}

impl ProtocolDescriptor {
    pub fn accepts_kind(&self, kind: &str) -> bool {
        self.kind_aliases.contains(&kind)
    }

    pub fn accepts_network(&self, network: &str) -> bool {
        self.network_ids.contains(&network)
    }
}

// `ethereum/contract` is kept for backwards compatibility. New families
// should not use the `/contract` suffix.
static ETHEREUM: ProtocolDescriptor = ProtocolDescriptor {
    name: ProtocolName::Ethereum,
    display_name: "Ethereum",
    kind_aliases: &["ethereum", "ethereum/contract"],
    deprecated_aliases: &["ethereum/contract"],
    network_ids: &[
        "mainnet",
        "kovan",
        "rinkeby",
        "ropsten",
        "goerli",
        "sepolia",
        "poa-core",
        "poa-sokol",
        "xdai",
        "gnosis",
        "matic",
        "mumbai",
        "fantom",
        "fantom-testnet",
        "bsc",
        "chapel",
        "clover",
        "avalanche",
        "fuji",
        "celo",
        "celo-alfajores",
        "fuse",
        "moonbeam",
        "moonriver",
        "mbase",
        "arbitrum-one",
        "arbitrum-goerli",
        "optimism",
        "optimism-goerli",
        "aurora",
        "aurora-testnet",
        "base",
        "zksync-era",
    ],
    supports_abis: true,
    supports_events: true,
};

static NEAR: ProtocolDescriptor = ProtocolDescriptor {
    name: ProtocolName::Near,
    display_name: "NEAR",
    kind_aliases: &["near"],
    deprecated_aliases: &[],
    network_ids: &["near-mainnet", "near-testnet"],
    supports_abis: false,
    supports_events: false,
};

static TENDERMINT: ProtocolDescriptor = ProtocolDescriptor {
    name: ProtocolName::Tendermint,
    display_name: "Tendermint / Cosmos",
    kind_aliases: &["tendermint/data"],
    deprecated_aliases: &[],
    network_ids: &["cosmoshub-4", "theta-testnet-001", "osmosis-1", "juno-1"],
    supports_abis: false,
    supports_events: true,
};

/// Every registered family, in registry order.
pub static PROTOCOLS: [&ProtocolDescriptor; 3] = [&ETHEREUM, &NEAR, &TENDERMINT];

/// A protocol identity resolved from a data source kind.
///
/// `name` is either a known [`ProtocolName`] or `None`. The raw kind string
/// is kept only for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    name: Option<ProtocolName>,
    requested: String,
}

impl Protocol {
    /// Resolve a kind alias into a protocol identity. Only exact alias
    /// matches resolve; canonical names that are not aliases do not.
    pub fn resolve(kind: &str) -> Self {
        let name = PROTOCOLS
            .iter()
            .find(|d| d.accepts_kind(kind))
            .map(|d| d.name);
        Self {
            name,
            requested: kind.to_string(),
        }
    }

    /// Identity for an already-known family.
    pub fn from_name(name: ProtocolName) -> Self {
        Self {
            name: Some(name),
            requested: name.as_str().to_string(),
        }
    }

    /// Identity of the first kind in `kinds`; unresolved when empty.
    pub fn from_data_sources<'a, I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        match kinds.into_iter().next() {
            Some(kind) => Self::resolve(kind),
            None => Self {
                name: None,
                requested: String::new(),
            },
        }
    }

    /// Identity of a manifest: the kind of its first data source, falling
    /// back to its first template.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self::from_data_sources(manifest.kinds())
    }

    pub fn name(&self) -> Option<ProtocolName> {
        self.name
    }

    /// The kind string this identity was resolved from.
    pub fn requested(&self) -> &str {
        &self.requested
    }

    pub fn is_resolved(&self) -> bool {
        self.name.is_some()
    }

    /// The resolved name, or a resolution error naming the requested kind.
    pub fn require(&self) -> Result<ProtocolName> {
        self.name.ok_or_else(|| CodegenError::UnresolvedProtocol {
            kind: self.requested.clone(),
        })
    }

    pub fn descriptor(&self) -> Option<&'static ProtocolDescriptor> {
        self.name.map(|n| n.descriptor())
    }

    /// Whether `kind` is literally one of this family's aliases.
    pub fn is_valid_kind(&self, kind: &str) -> bool {
        self.descriptor().is_some_and(|d| d.accepts_kind(kind))
    }

    pub fn is_deprecated_kind(&self, kind: &str) -> bool {
        self.descriptor()
            .is_some_and(|d| d.deprecated_aliases.contains(&kind))
    }

    pub fn is_valid_network(&self, network: &str) -> bool {
        self.descriptor().is_some_and(|d| d.accepts_network(network))
    }

    pub fn supports_abis(&self) -> bool {
        self.descriptor().is_some_and(|d| d.supports_abis)
    }

    pub fn supports_events(&self) -> bool {
        self.descriptor().is_some_and(|d| d.supports_events)
    }

    /// Human-readable label. Callers must have validated the identity first.
    pub fn display_name(&self) -> Result<&'static str> {
        self.descriptor().map(|d| d.display_name).ok_or_else(|| {
            CodegenError::Config(format!(
                "no display name for unresolved protocol '{}'",
                self.requested
            ))
        })
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "unknown ({})", self.requested),
        }
    }
}
