//! `chaingen codegen`: validate the manifest and write bindings.

use anyhow::{Context, Result};
use chaingen::{Codegen, CodegenConfig};
use std::path::Path;

pub async fn run(config: CodegenConfig, manifest: &Path) -> Result<()> {
    let summary = Codegen::new(config)
        .run(manifest)
        .await
        .with_context(|| format!("codegen failed for {}", manifest.display()))?;

    let written: Vec<&Path> = summary.written().collect();
    println!(
        "✓ {} types generated ({} file{})",
        summary.protocol,
        written.len(),
        if written.len() == 1 { "" } else { "s" }
    );
    for path in written {
        println!("  {}", path.display());
    }
    let warnings = summary.report.warnings().count();
    if warnings > 0 {
        println!("  {warnings} manifest warning(s), see log output");
    }
    Ok(())
}
