//! The capability matrix, as seen through `vend`.

use chaingen::vend::{self, StrategyOptions};
use chaingen::{CodegenError, ErrorKind, Manifest, Protocol, ProtocolName, PROTOCOLS};
use chaingen_core::{BuildOptions, ScaffoldContract, TypeGenOptions};

fn options() -> StrategyOptions {
    StrategyOptions::new(TypeGenOptions::new("generated"), BuildOptions::default())
}

fn template(kind: &str) -> Manifest {
    Manifest::from_yaml_str(&format!(
        "templates:\n  - kind: {kind}\n    name: Child\n    mapping: {{}}\n"
    ))
    .unwrap()
}

#[test]
fn every_alias_vends_its_family() {
    for descriptor in PROTOCOLS {
        for alias in descriptor.kind_aliases {
            let bundle = vend::vend(&Protocol::resolve(alias), &options()).unwrap();
            assert_eq!(bundle.name(), descriptor.name, "{alias}");
            assert_eq!(bundle.protocol().requested(), *alias);
            assert_eq!(bundle.subgraph_builder.protocol().requested(), *alias);
        }
    }
}

#[test]
fn capability_matrix() {
    // (kind, type generator, ABI loader, template codegen)
    let matrix = [
        ("ethereum", true, true, true),
        ("near", false, false, false),
        ("tendermint/data", true, false, true),
    ];
    for (kind, type_gen, abi_loader, templates) in matrix {
        let bundle = vend::vend(&Protocol::resolve(kind), &options()).unwrap();
        assert_eq!(bundle.type_generator.is_present(), type_gen, "{kind}");
        assert_eq!(bundle.abi_loader.is_present(), abi_loader, "{kind}");

        let manifest = template(kind);
        match bundle.template_codegen(&manifest.templates[0]) {
            Ok(codegen) => {
                assert!(templates, "{kind}");
                assert_eq!(codegen.template_name(), "Child");
            }
            Err(err) => {
                assert!(!templates, "{kind}");
                assert_eq!(err.kind(), ErrorKind::Capability);
                assert_eq!(
                    err.to_string(),
                    format!(
                        "Protocol '{}' does not support template code generation",
                        bundle.name()
                    )
                );
            }
        }
    }
}

#[test]
fn vended_type_generator_uses_the_options() {
    let options = StrategyOptions::new(
        TypeGenOptions::new("out").with_extension("as"),
        BuildOptions::default(),
    );
    let bundle = vend::vend(&Protocol::resolve("ethereum"), &options).unwrap();
    let generator = bundle.type_generator.present().unwrap();
    assert_eq!(generator.protocol(), ProtocolName::Ethereum);
    assert_eq!(generator.options().extension, "as");
}

#[test]
fn always_present_slots() {
    let cases = [
        ("ethereum", "Contract address", "0x6B175474E89094C44Da98b954EedeAC495271d0F", "0x123"),
        ("near", "Account", "app.near", "-app.near"),
        (
            "tendermint/data",
            "Contract address",
            "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu",
            "cosmos",
        ),
    ];
    for (kind, identifier, good, bad) in cases {
        let protocol = Protocol::resolve(kind);
        let helper = vend::contract_helper(&protocol).unwrap();
        assert_eq!(helper.identifier_name(), identifier, "{kind}");
        assert!(helper.validate(good).is_ok(), "{kind}: {good}");
        assert!(helper.validate(bad).is_err(), "{kind}: {bad}");

        let contract = ScaffoldContract::new("Example").with_address(good);
        assert!(!vend::manifest_scaffold(&protocol).unwrap().source(&contract).is_empty());
        assert!(!vend::mapping_scaffold(&protocol)
            .unwrap()
            .generate_placeholder_handlers(&contract)
            .is_empty());
    }
}

#[test]
fn unresolved_identity_fails_every_slot() {
    let protocol = Protocol::resolve("substreams");
    let manifest = template("substreams");

    let errors: Vec<CodegenError> = vec![
        vend::vend(&protocol, &options()).err().unwrap(),
        vend::type_generator(&protocol, &options().type_gen).err().unwrap(),
        vend::template_codegen(&protocol, &manifest.templates[0]).err().unwrap(),
        vend::abi_loader(&protocol).err().unwrap(),
        vend::subgraph_builder(&protocol, BuildOptions::default()).err().unwrap(),
        vend::contract_helper(&protocol).err().unwrap(),
        vend::manifest_scaffold(&protocol).err().unwrap(),
        vend::mapping_scaffold(&protocol).err().unwrap(),
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::Capability);
        assert!(
            matches!(&err, CodegenError::UnsupportedProtocol { protocol } if protocol == "substreams"),
            "{err}"
        );
    }
}
