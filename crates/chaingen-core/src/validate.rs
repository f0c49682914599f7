//! Manifest validation shared by every subgraph builder.
//!
//! Issues are collected, not raised: a single pass reports everything wrong
//! with a manifest. [`ValidationReport::into_result`] turns a report with
//! errors into [`CodegenError::ManifestInvalid`].

use crate::abi_ref::check_path_segment;
use crate::error::{CodegenError, Result};
use crate::manifest::{Manifest, Mapping, Source};
use crate::strategy::SubgraphBuilder;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding, located by a `dataSources > 0 > source > abi` style path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestIssue {
    pub severity: Severity,
    pub path: String,
    pub message: String,
}

impl fmt::Display for ManifestIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ManifestIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, path.into(), message.into());
    }

    pub fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, path.into(), message.into());
    }

    fn push(&mut self, severity: Severity, path: String, message: String) {
        self.issues.push(ManifestIssue {
            severity,
            path,
            message,
        });
    }

    pub fn issues(&self) -> &[ManifestIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &ManifestIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ManifestIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// `Ok(self)` when only warnings (or nothing) were found.
    pub fn into_result(self) -> Result<Self> {
        match self.errors().count() {
            0 => Ok(self),
            count => Err(CodegenError::ManifestInvalid { count }),
        }
    }
}

/// Borrowed view over the fields data sources and templates share.
struct Entry<'a> {
    path: String,
    name: &'a str,
    kind: &'a str,
    network: Option<&'a str>,
    source: &'a Source,
    mapping: &'a Mapping,
    is_template: bool,
}

/// Run the protocol-independent checks, then the builder's own
/// [`SubgraphBuilder::validate_source`] on every entry.
pub fn validate_manifest<B>(builder: &B, manifest: &Manifest) -> ValidationReport
where
    B: SubgraphBuilder + ?Sized,
{
    let mut report = ValidationReport::new();

    if manifest.data_sources.is_empty() {
        report.error("dataSources", "the manifest must declare at least one data source");
    }

    let data_sources = manifest.data_sources.iter().enumerate().map(|(i, ds)| Entry {
        path: format!("dataSources > {i}"),
        name: &ds.name,
        kind: &ds.kind,
        network: ds.network.as_deref(),
        source: &ds.source,
        mapping: &ds.mapping,
        is_template: false,
    });
    let templates = manifest.templates.iter().enumerate().map(|(i, t)| Entry {
        path: format!("templates > {i}"),
        name: &t.name,
        kind: &t.kind,
        network: t.network.as_deref(),
        source: &t.source,
        mapping: &t.mapping,
        is_template: true,
    });

    for entry in data_sources.chain(templates) {
        validate_entry(builder, &entry, &mut report);
        builder.validate_source(&entry.path, entry.source, entry.is_template, &mut report);
    }
    report
}

fn validate_entry<B>(builder: &B, entry: &Entry<'_>, report: &mut ValidationReport)
where
    B: SubgraphBuilder + ?Sized,
{
    let protocol = builder.protocol();
    let path = &entry.path;

    if let Err(reason) = check_path_segment(entry.name) {
        report.error(
            format!("{path} > name"),
            format!("'{}' cannot be used as an output directory: {reason}", entry.name),
        );
    }

    if !protocol.is_valid_kind(entry.kind) {
        let expected = protocol
            .descriptor()
            .map(|d| d.kind_aliases.join(", "))
            .unwrap_or_default();
        report.error(
            format!("{path} > kind"),
            format!(
                "'{}' is not a valid {protocol} data source kind (expected one of: {expected})",
                entry.kind
            ),
        );
    } else if protocol.is_deprecated_kind(entry.kind) {
        let preferred = protocol.name().map(|n| n.as_str()).unwrap_or_default();
        report.warning(
            format!("{path} > kind"),
            format!("'{}' is deprecated, use '{preferred}' instead", entry.kind),
        );
    }

    if let Some(network) = entry.network {
        if !builder.options().skip_network_validation && !protocol.is_valid_network(network) {
            report.error(
                format!("{path} > network"),
                format!("'{network}' is not a known {protocol} network"),
            );
        }
    }

    let supported = builder.handler_types();
    for key in entry.mapping.handler_kinds() {
        if !supported.contains(&key) {
            report.error(
                format!("{path} > mapping > {key}"),
                format!(
                    "{protocol} data sources do not support '{key}' (supported: {})",
                    supported.join(", ")
                ),
            );
        }
    }

    if let Some(version) = &entry.mapping.api_version {
        if let Err(e) = semver::Version::parse(version) {
            report.error(
                format!("{path} > mapping > apiVersion"),
                format!("'{version}' is not a valid version: {e}"),
            );
        }
    }

    let mut seen = HashSet::new();
    for (j, abi) in entry.mapping.abis.iter().enumerate() {
        if let Err(reason) = check_path_segment(&abi.name) {
            report.error(
                format!("{path} > mapping > abis > {j} > name"),
                format!("'{}' cannot be used as an output file name: {reason}", abi.name),
            );
        }
        if !seen.insert(abi.name.as_str()) {
            report.error(
                format!("{path} > mapping > abis > {j} > name"),
                format!("duplicate ABI name '{}'", abi.name),
            );
        }
    }

    if protocol.supports_abis() {
        match &entry.source.abi {
            None => report.error(format!("{path} > source > abi"), "missing ABI name"),
            Some(name) if entry.mapping.abi(name).is_none() => report.error(
                format!("{path} > source > abi"),
                format!("ABI '{name}' is not declared in mapping > abis"),
            ),
            Some(_) => {}
        }
    } else if entry.source.abi.is_some() {
        report.warning(
            format!("{path} > source > abi"),
            format!("{protocol} data sources have no ABIs; 'abi' is ignored"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::protocol::Protocol;
    use crate::strategy::BuildOptions;

    struct Builder {
        protocol: Protocol,
        options: BuildOptions,
        handlers: &'static [&'static str],
    }

    impl SubgraphBuilder for Builder {
        fn protocol(&self) -> &Protocol {
            &self.protocol
        }

        fn options(&self) -> &BuildOptions {
            &self.options
        }

        fn handler_types(&self) -> &'static [&'static str] {
            self.handlers
        }
    }

    fn ethereum() -> Builder {
        Builder {
            protocol: Protocol::resolve("ethereum"),
            options: BuildOptions::default(),
            handlers: &["blockHandlers", "callHandlers", "eventHandlers"],
        }
    }

    fn paths(report: &ValidationReport, severity: Severity) -> Vec<String> {
        report
            .issues()
            .iter()
            .filter(|i| i.severity == severity)
            .map(|i| i.path.clone())
            .collect()
    }

    #[test]
    fn valid_manifest_has_no_issues() {
        let manifest = Manifest::from_yaml_str(
            r#"
dataSources:
  - kind: ethereum
    name: Token
    network: mainnet
    source:
      abi: Token
    mapping:
      apiVersion: 0.0.7
      abis:
        - name: Token
          file: ./abis/Token.json
      eventHandlers: []
"#,
        )
        .unwrap();
        let report = ethereum().validate_manifest(&manifest);
        assert!(report.is_empty(), "{:?}", report);
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn reports_every_problem_in_one_pass() {
        let manifest = Manifest::from_yaml_str(
            r#"
dataSources:
  - kind: ethereum/contract
    name: Token
    network: near-mainnet
    source:
      abi: Missing
    mapping:
      apiVersion: latest
      abis:
        - name: Token
          file: ./abis/Token.json
        - name: Token
          file: ./abis/Token2.json
      receiptHandlers: []
templates:
  - kind: near
    name: Pair
    mapping: {}
"#,
        )
        .unwrap();
        let report = ethereum().validate_manifest(&manifest);

        assert_eq!(
            paths(&report, Severity::Error),
            vec![
                "dataSources > 0 > network",
                "dataSources > 0 > mapping > receiptHandlers",
                "dataSources > 0 > mapping > apiVersion",
                "dataSources > 0 > mapping > abis > 1 > name",
                "dataSources > 0 > source > abi",
                "templates > 0 > kind",
                "templates > 0 > source > abi",
            ]
        );
        assert_eq!(paths(&report, Severity::Warning), vec!["dataSources > 0 > kind"]);

        let err = report.into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Manifest);
        assert!(matches!(err, CodegenError::ManifestInvalid { count: 7 }));
    }

    #[test]
    fn network_check_can_be_skipped() {
        let manifest = Manifest::from_yaml_str(
            "dataSources:\n  - kind: ethereum\n    name: T\n    network: devnet\n    source:\n      abi: T\n    mapping:\n      abis:\n        - name: T\n          file: t.json\n",
        )
        .unwrap();
        let mut builder = ethereum();
        assert!(builder.validate_manifest(&manifest).has_errors());
        builder.options.skip_network_validation = true;
        assert!(!builder.validate_manifest(&manifest).has_errors());
    }

    #[test]
    fn abi_on_non_abi_family_is_a_warning() {
        let builder = Builder {
            protocol: Protocol::resolve("near"),
            options: BuildOptions::default(),
            handlers: &["blockHandlers", "receiptHandlers"],
        };
        let manifest = Manifest::from_yaml_str(
            "dataSources:\n  - kind: near\n    name: R\n    source:\n      abi: X\n    mapping: {}\n",
        )
        .unwrap();
        let report = builder.validate_manifest(&manifest);
        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn names_must_stay_inside_the_output_tree() {
        let manifest = Manifest::from_yaml_str(
            r#"
dataSources:
  - kind: ethereum
    name: ../../escaped
    source:
      abi: Token
    mapping:
      abis:
        - name: Token
          file: ./abis/Token.json
templates:
  - kind: ethereum
    name: Pair
    source:
      abi: /etc/passwd
    mapping:
      abis:
        - name: /etc/passwd
          file: ./abis/Pair.json
"#,
        )
        .unwrap();
        let report = ethereum().validate_manifest(&manifest);
        assert_eq!(
            paths(&report, Severity::Error),
            vec!["dataSources > 0 > name", "templates > 0 > mapping > abis > 0 > name"]
        );
    }

    #[test]
    fn empty_manifest_is_an_error() {
        let report = ethereum().validate_manifest(&Manifest::default());
        assert_eq!(paths(&report, Severity::Error), vec!["dataSources"]);
    }

    #[test]
    fn issue_display() {
        let issue = ManifestIssue {
            severity: Severity::Error,
            path: "dataSources > 0 > kind".into(),
            message: "bad".into(),
        };
        assert_eq!(issue.to_string(), "dataSources > 0 > kind: bad");
    }
}
