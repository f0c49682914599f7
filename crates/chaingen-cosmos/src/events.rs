//! Cosmos event definitions and their bindings.
//!
//! ## File format
//!
//! ```json
//! { "events": [ { "type": "transfer", "attributes": ["sender", "recipient", "amount"] } ] }
//! ```
//!
//! A bare array of event objects is accepted too, and attributes may be
//! written as `{"key": "sender"}` objects (the ABCI attribute shape).
//!
//! ## Bindings
//!
//! One class per event type wrapping a `cosmos.Event`, with a static
//! `EVENT_TYPE`, a `matches` guard, and one string getter per attribute.
//! Missing attributes read as the empty string.

use async_trait::async_trait;
use chaingen_core::codegen::{
    module_import, safe_identifier, string_literal, to_pascal_case, NameDisambiguator,
    GRAPH_TS_MODULE,
};
use chaingen_core::{AbiCodeGenerator, AbiError, AbiLoader, ParsedAbi};
use serde::Deserialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventDefinition {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Attribute {
    Name(String),
    Keyed { key: String },
}

impl Attribute {
    pub fn key(&self) -> &str {
        match self {
            Attribute::Name(key) | Attribute::Keyed { key } => key,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionFile {
    Wrapped { events: Vec<EventDefinition> },
    Bare(Vec<EventDefinition>),
}

/// A parsed event-definition file.
#[derive(Debug, Clone)]
pub struct CosmosEvents {
    name: String,
    file: PathBuf,
    events: Vec<EventDefinition>,
}

impl CosmosEvents {
    pub fn from_json_str(name: &str, file: &Path, json: &str) -> Result<Self, AbiError> {
        let events = match serde_json::from_str::<DefinitionFile>(json) {
            Ok(DefinitionFile::Wrapped { events } | DefinitionFile::Bare(events)) => events,
            Err(_) => {
                // surface the JSON syntax error, if that is what went wrong
                serde_json::from_str::<serde_json::Value>(json)?;
                return Err(AbiError::Invalid(
                    "expected {\"events\": [...]} or an array of {type, attributes} objects"
                        .into(),
                ));
            }
        };
        if let Some(empty) = events.iter().position(|e| e.event_type.is_empty()) {
            return Err(AbiError::Invalid(format!("event #{empty} has an empty type")));
        }
        Ok(Self {
            name: name.to_string(),
            file: file.to_path_buf(),
            events,
        })
    }

    pub async fn load(name: &str, path: &Path) -> Result<Self, AbiError> {
        let json = tokio::fs::read_to_string(path).await?;
        let parsed = Self::from_json_str(name, path, &json)?;
        debug!(definitions = name, events = parsed.events.len(), "parsed Cosmos event definitions");
        Ok(parsed)
    }

    pub fn events(&self) -> &[EventDefinition] {
        &self.events
    }
}

impl ParsedAbi for CosmosEvents {
    fn name(&self) -> &str {
        &self.name
    }

    fn file(&self) -> &Path {
        &self.file
    }

    fn code_generator(&self) -> Box<dyn AbiCodeGenerator + '_> {
        Box::new(CosmosEventCodeGenerator { events: &self.events })
    }
}

/// Loads event-definition files for the Tendermint type generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosmosEventLoader;

#[async_trait]
impl AbiLoader for CosmosEventLoader {
    async fn load(&self, name: &str, path: &Path) -> Result<Arc<dyn ParsedAbi>, AbiError> {
        Ok(Arc::new(CosmosEvents::load(name, path).await?))
    }
}

// ─── Codegen ──────────────────────────────────────────────────────────────────

const ATTRIBUTE_LOOKUP: &str = "function attribute(event: cosmos.Event, key: string): string {
for (let i = 0; i < event.attributes.length; i++) {
if (event.attributes[i].key == key) {
return event.attributes[i].value;
}
}
return \"\";
}";

pub struct CosmosEventCodeGenerator<'a> {
    events: &'a [EventDefinition],
}

impl AbiCodeGenerator for CosmosEventCodeGenerator<'_> {
    fn generate_module_imports(&self) -> Vec<String> {
        vec![module_import(&["cosmos"], GRAPH_TS_MODULE)]
    }

    fn generate_types(&self) -> Result<Vec<String>, AbiError> {
        let mut classes = NameDisambiguator::new();
        let mut types = vec![ATTRIBUTE_LOOKUP.to_string()];
        for event in self.events {
            let class = classes.unique(&safe_identifier(&to_pascal_case(&event.event_type), "Event"));
            types.push(event_class(&class, event));
        }
        Ok(types)
    }
}

fn event_class(class: &str, event: &EventDefinition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "export class {class} {{");
    let _ = writeln!(
        out,
        "static readonly EVENT_TYPE: string = {};\n",
        string_literal(&event.event_type)
    );
    out.push_str("_event: cosmos.Event;\n\n");
    out.push_str("constructor(event: cosmos.Event) {\nthis._event = event;\n}\n\n");
    let _ = writeln!(out, "static matches(event: cosmos.Event): boolean {{");
    let _ = writeln!(out, "return event.eventType == {class}.EVENT_TYPE;");
    out.push_str("}\n");

    let mut getters = NameDisambiguator::new();
    for attribute in &event.attributes {
        let key = attribute.key();
        let getter = getters.unique(&safe_identifier(key, "attribute"));
        let _ = write!(
            out,
            "\nget {getter}(): string {{\nreturn attribute(this._event, {});\n}}\n",
            string_literal(key)
        );
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<CosmosEvents, AbiError> {
        CosmosEvents::from_json_str("Bank", Path::new("bank.json"), json)
    }

    #[test]
    fn accepts_both_file_shapes() {
        let wrapped = parse(r#"{"events":[{"type":"transfer","attributes":["sender"]}]}"#).unwrap();
        let bare = parse(r#"[{"type":"transfer","attributes":[{"key":"sender"}]}]"#).unwrap();
        assert_eq!(wrapped.events()[0].attributes[0].key(), "sender");
        assert_eq!(bare.events()[0].attributes[0].key(), "sender");
    }

    #[test]
    fn rejects_malformed_files() {
        assert!(matches!(parse("{"), Err(AbiError::Json(_))));
        assert!(matches!(parse(r#"{"foo":1}"#), Err(AbiError::Invalid(_))));
        assert!(matches!(parse(r#"[{"type":""}]"#), Err(AbiError::Invalid(_))));
    }

    #[test]
    fn one_class_per_event_type() {
        let events = parse(
            r#"[{"type":"coin_received","attributes":["receiver","amount"]},
                {"type":"wasm/transfer","attributes":["from","new"]}]"#,
        )
        .unwrap();
        let types = events.code_generator().generate_types().unwrap();
        assert_eq!(types.len(), 3);
        assert!(types[0].starts_with("function attribute("));
        assert!(types[1].starts_with("export class CoinReceived {"));
        assert!(types[1].contains("static readonly EVENT_TYPE: string = \"coin_received\";"));
        assert!(types[1].contains("get amount(): string {\nreturn attribute(this._event, \"amount\");"));
        assert!(types[2].starts_with("export class WasmTransfer {"));
        // reserved words are escaped, the lookup key is not
        assert!(types[2].contains("get _new(): string {\nreturn attribute(this._event, \"new\");"));
    }

    #[test]
    fn quotes_in_keys_are_escaped() {
        let events = parse(r#"[{"type":"say \"hi\"","attributes":["a\"b","c\\d"]}]"#).unwrap();
        let types = events.code_generator().generate_types().unwrap();
        assert!(types[1].contains(r#"EVENT_TYPE: string = "say \"hi\"";"#));
        assert!(types[1].contains(r#"return attribute(this._event, "a\"b");"#));
        assert!(types[1].contains(r#"return attribute(this._event, "c\\d");"#));
    }
}
