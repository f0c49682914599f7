//! `chaingen resolve` and `chaingen protocols`.

use anyhow::{bail, Result};
use chaingen::vend::{self, StrategyOptions};
use chaingen::{family_for, Protocol, ProtocolDescriptor, ProtocolName, PROTOCOLS};
use chaingen_core::{BuildOptions, DataSourceTemplate, Mapping, Source, TypeGenOptions};

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

struct Capabilities {
    type_generator: bool,
    template_codegen: bool,
    abi_loader: bool,
}

fn capabilities(protocol: &Protocol) -> Result<Capabilities> {
    let options = StrategyOptions::new(TypeGenOptions::new("generated"), BuildOptions::default());
    let bundle = vend::vend(protocol, &options)?;
    let probe = DataSourceTemplate {
        kind: protocol.requested().to_string(),
        name: "Probe".into(),
        network: None,
        source: Source::default(),
        mapping: Mapping::default(),
    };
    Ok(Capabilities {
        type_generator: bundle.type_generator.is_present(),
        template_codegen: bundle.template_codegen(&probe).is_ok(),
        abi_loader: bundle.abi_loader.is_present(),
    })
}

pub fn resolve(kind: &str, as_json: bool) -> Result<()> {
    let mut protocol = Protocol::resolve(kind);
    if !protocol.is_resolved() {
        match kind.parse::<ProtocolName>() {
            Ok(name) => protocol = Protocol::from_name(name),
            Err(_) => bail!("'{kind}' does not match any protocol family"),
        }
    }
    let Some(descriptor) = protocol.descriptor() else {
        bail!("'{kind}' does not match any protocol family");
    };
    let caps = capabilities(&protocol)?;
    let handlers = family_for(descriptor.name)
        .subgraph_builder(BuildOptions::default(), protocol.clone())
        .handler_types();

    if as_json {
        let out = serde_json::json!({
            "kind": kind,
            "protocol": descriptor.name,
            "displayName": descriptor.display_name,
            "validKind": protocol.is_valid_kind(kind),
            "deprecated": protocol.is_deprecated_kind(kind),
            "kindAliases": descriptor.kind_aliases,
            "networks": descriptor.network_ids,
            "handlers": handlers,
            "supportsAbis": descriptor.supports_abis,
            "supportsEvents": descriptor.supports_events,
            "typeGenerator": caps.type_generator,
            "templateCodegen": caps.template_codegen,
            "abiLoader": caps.abi_loader,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Kind:              {kind}");
    println!("Protocol:          {} ({})", descriptor.name, descriptor.display_name);
    if protocol.is_deprecated_kind(kind) {
        println!("                   '{kind}' is deprecated, use '{}'", descriptor.name);
    }
    println!("Kind aliases:      {}", descriptor.kind_aliases.join(", "));
    println!("Handlers:          {}", handlers.join(", "));
    println!("ABIs:              {}", yes_no(descriptor.supports_abis));
    println!("Events:            {}", yes_no(descriptor.supports_events));
    println!("Type generation:   {}", yes_no(caps.type_generator));
    println!("Template codegen:  {}", yes_no(caps.template_codegen));
    println!("ABI loader:        {}", yes_no(caps.abi_loader));
    println!("Networks:          {}", descriptor.network_ids.join(", "));
    Ok(())
}

fn print_descriptor(descriptor: &ProtocolDescriptor) -> Result<()> {
    let caps = capabilities(&Protocol::from_name(descriptor.name))?;
    println!("{} ({})", descriptor.name, descriptor.display_name);
    println!("  kinds:     {}", descriptor.kind_aliases.join(", "));
    if !descriptor.deprecated_aliases.is_empty() {
        println!("  legacy:    {}", descriptor.deprecated_aliases.join(", "));
    }
    println!("  networks:  {}", descriptor.network_ids.len());
    println!(
        "  bindings:  {}   templates: {}   abis: {}",
        yes_no(caps.type_generator),
        yes_no(caps.template_codegen),
        yes_no(caps.abi_loader)
    );
    Ok(())
}

pub fn list() -> Result<()> {
    println!("ChainGen v{}", env!("CARGO_PKG_VERSION"));
    println!();
    for descriptor in PROTOCOLS {
        print_descriptor(descriptor)?;
        println!();
    }
    Ok(())
}
