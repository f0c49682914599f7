//! `chaingen validate`: report every manifest issue without generating.

use anyhow::{bail, Result};
use chaingen::{Codegen, CodegenConfig};
use chaingen_core::Severity;
use std::path::Path;

pub async fn run(config: CodegenConfig, manifest_path: &Path, as_json: bool) -> Result<()> {
    let codegen = Codegen::new(config);
    let manifest = codegen.load_manifest(manifest_path).await?;
    let bundle = codegen.strategies(manifest_path, &manifest)?;
    let report = codegen.validate(&bundle, &manifest);

    if as_json {
        let out = serde_json::json!({
            "manifest": manifest_path.display().to_string(),
            "protocol": bundle.name(),
            "issues": report.issues(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for issue in report.issues() {
            let marker = match issue.severity {
                Severity::Error => "✗",
                Severity::Warning => "!",
            };
            println!("{marker} {issue}");
        }
    }

    let errors = report.errors().count();
    if errors > 0 {
        bail!("{} has {errors} error(s)", manifest_path.display());
    }
    if !as_json {
        println!(
            "✓ {} is a valid {} subgraph manifest",
            manifest_path.display(),
            bundle.protocol().display_name()?
        );
    }
    Ok(())
}
