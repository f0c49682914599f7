//! AssemblyScript bindings for an Ethereum contract ABI.
//!
//! For an ABI named `Token` the generated module contains:
//! - per event `E`: `class E extends ethereum.Event` and `E__Params` with
//!   one getter per parameter
//! - `class Token extends ethereum.SmartContract` with `bind`, and for every
//!   view/pure function with outputs a call wrapper plus a `try_` variant
//! - per state-changing function `f` and for the constructor: `FCall` with
//!   `FCall__Inputs` / `FCall__Outputs`
//!
//! Overloaded events and functions get numeric suffixes in ABI order.

use crate::types::{canonical_type, value_type, ValueType};
use alloy_json_abi::{Function, JsonAbi, Param, StateMutability};
use chaingen_core::codegen::{
    module_import, safe_identifier, string_literal, to_pascal_case, NameDisambiguator,
    GRAPH_TS_MODULE,
};
use chaingen_core::{AbiCodeGenerator, AbiError};
use std::fmt::Write;

const GRAPH_TS_IMPORTS: &[&str] = &[
    "ethereum",
    "JSONValue",
    "TypedMap",
    "Entity",
    "Bytes",
    "Address",
    "BigInt",
];

pub struct EthereumCodeGenerator<'a> {
    name: &'a str,
    abi: &'a JsonAbi,
}

impl<'a> EthereumCodeGenerator<'a> {
    pub fn new(name: &'a str, abi: &'a JsonAbi) -> Self {
        Self { name, abi }
    }

    fn contract_class_name(&self) -> String {
        safe_identifier(&to_pascal_case(self.name), "Contract")
    }

    fn event_types(&self) -> Result<Vec<String>, AbiError> {
        let mut names = NameDisambiguator::new();
        self.abi
            .events()
            .map(|event| {
                let class = names.unique(&safe_identifier(&to_pascal_case(&event.name), "Event"));
                let params = event
                    .inputs
                    .iter()
                    .enumerate()
                    .map(|(i, p)| Getter::new(&p.name, i, "param", &p.ty))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(event_class(&class, &params))
            })
            .collect()
    }

    fn contract_type(&self) -> Result<String, AbiError> {
        let class = self.contract_class_name();
        let mut out = String::new();
        let _ = writeln!(out, "export class {class} extends ethereum.SmartContract {{");
        let _ = writeln!(out, "static bind(address: Address): {class} {{");
        let _ = writeln!(out, "return new {class}({}, address);", string_literal(&self.name));
        out.push_str("}\n");

        let mut names = NameDisambiguator::new();
        for function in self.abi.functions().filter(|f| is_callable(f)) {
            let method = names.unique(&safe_identifier(&function.name, "call"));
            out.push('\n');
            out.push_str(&call_methods(&method, function)?);
        }
        out.push('}');
        Ok(out)
    }

    fn call_types(&self) -> Result<Vec<String>, AbiError> {
        let mut types = Vec::new();
        if let Some(constructor) = self.abi.constructor() {
            types.push(call_class("ConstructorCall", &constructor.inputs, &[])?);
        }
        let mut names = NameDisambiguator::new();
        for function in self.abi.functions().filter(|f| !is_read_only(f)) {
            let base = names.unique(&safe_identifier(&to_pascal_case(&function.name), "Function"));
            types.push(call_class(&format!("{base}Call"), &function.inputs, &function.outputs)?);
        }
        Ok(types)
    }
}

impl AbiCodeGenerator for EthereumCodeGenerator<'_> {
    fn generate_module_imports(&self) -> Vec<String> {
        vec![module_import(GRAPH_TS_IMPORTS, GRAPH_TS_MODULE)]
    }

    fn generate_types(&self) -> Result<Vec<String>, AbiError> {
        let mut types = self.event_types()?;
        types.push(self.contract_type()?);
        types.extend(self.call_types()?);
        Ok(types)
    }
}

// ─── Getters ──────────────────────────────────────────────────────────────────

/// One positional accessor on a params / inputs / outputs class.
struct Getter {
    name: String,
    index: usize,
    ty: ValueType,
}

impl Getter {
    fn new(name: &str, index: usize, fallback_prefix: &str, ty: &str) -> Result<Self, AbiError> {
        Ok(Self {
            name: safe_identifier(name, &format!("{fallback_prefix}{index}")),
            index,
            ty: value_type(ty)?,
        })
    }

    /// `get <name>(): <T> { return <source>[i].value.toT(); }`
    fn render(&self, source: &str) -> String {
        format!(
            "get {}(): {} {{\nreturn {};\n}}\n",
            self.name,
            self.ty.ascription,
            self.ty.read(&format!("{source}[{}].value", self.index))
        )
    }
}

fn getters(params: &[Param], fallback_prefix: &str) -> Result<Vec<Getter>, AbiError> {
    params
        .iter()
        .enumerate()
        .map(|(i, p)| Getter::new(&p.name, i, fallback_prefix, &p.ty))
        .collect()
}

/// Wrapper holding `_<field>: <owner>` with one getter per value.
fn accessor_class(class: &str, owner: &str, field: &str, source: &str, values: &[Getter]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "export class {class} {{");
    let _ = writeln!(out, "_{field}: {owner};\n");
    let _ = writeln!(out, "constructor({field}: {owner}) {{");
    let _ = writeln!(out, "this._{field} = {field};");
    out.push_str("}\n");
    for getter in values {
        out.push('\n');
        out.push_str(&getter.render(&format!("this._{field}.{source}")));
    }
    out.push('}');
    out
}

// ─── Events ───────────────────────────────────────────────────────────────────

fn event_class(class: &str, params: &[Getter]) -> String {
    let params_class = format!("{class}__Params");
    let mut out = String::new();
    let _ = writeln!(out, "export class {class} extends ethereum.Event {{");
    let _ = writeln!(out, "get params(): {params_class} {{");
    let _ = writeln!(out, "return new {params_class}(this);");
    out.push_str("}\n}\n\n");
    out.push_str(&accessor_class(&params_class, class, "event", "parameters", params));
    out
}

// ─── Contract calls ───────────────────────────────────────────────────────────

fn is_read_only(function: &Function) -> bool {
    matches!(
        function.state_mutability,
        StateMutability::View | StateMutability::Pure
    )
}

fn is_callable(function: &Function) -> bool {
    is_read_only(function) && !function.outputs.is_empty()
}

/// `name(inputs):(outputs)` as expected by `ethereum.call`.
fn call_signature(function: &Function) -> String {
    let types = |params: &[Param]| {
        params
            .iter()
            .map(|p| canonical_type(&p.ty, &p.components))
            .collect::<Vec<_>>()
            .join(",")
    };
    format!(
        "{}({}):({})",
        function.name,
        types(&function.inputs),
        types(&function.outputs)
    )
}

/// `<method>` and `try_<method>`.
fn call_methods(method: &str, function: &Function) -> Result<String, AbiError> {
    let args = getters(&function.inputs, "param")?;
    let params = args
        .iter()
        .map(|a| format!("{}: {}", a.name, a.ty.ascription))
        .collect::<Vec<_>>()
        .join(", ");
    let values = args
        .iter()
        .map(|a| a.ty.write(&a.name))
        .collect::<Vec<_>>()
        .join(",\n");

    // a single output is unwrapped, several are returned as-is
    let single = match function.outputs.as_slice() {
        [output] => Some(value_type(&output.ty)?),
        outputs => {
            for output in outputs {
                value_type(&output.ty)?;
            }
            None
        }
    };
    let return_type = single
        .as_ref()
        .map_or("Array<ethereum.Value>", |ty| ty.ascription.as_str());
    let unwrap = |values: &str| match &single {
        Some(ty) => ty.read(&format!("{values}[0]")),
        None => values.to_string(),
    };
    let signature = string_literal(&call_signature(function));
    let name = string_literal(&function.name);

    let mut out = String::new();
    let _ = writeln!(out, "{method}({params}): {return_type} {{");
    let _ = writeln!(out, "let result = super.call({name}, {signature}, [");
    if !values.is_empty() {
        let _ = writeln!(out, "{values}");
    }
    out.push_str("]);\n\n");
    let _ = writeln!(out, "return {};", unwrap("result"));
    out.push_str("}\n\n");

    let _ = writeln!(
        out,
        "try_{method}({params}): ethereum.CallResult<{return_type}> {{"
    );
    let _ = writeln!(out, "let result = super.tryCall({name}, {signature}, [");
    if !values.is_empty() {
        let _ = writeln!(out, "{values}");
    }
    out.push_str("]);\n");
    out.push_str("if (result.reverted) {\nreturn new ethereum.CallResult();\n}\n");
    out.push_str("let value = result.value;\n");
    let _ = writeln!(
        out,
        "return ethereum.CallResult.fromValue({});",
        unwrap("value")
    );
    out.push_str("}\n");
    Ok(out)
}

fn call_class(class: &str, inputs: &[Param], outputs: &[Param]) -> Result<String, AbiError> {
    let inputs_class = format!("{class}__Inputs");
    let outputs_class = format!("{class}__Outputs");

    let mut out = String::new();
    let _ = writeln!(out, "export class {class} extends ethereum.Call {{");
    let _ = writeln!(out, "get inputs(): {inputs_class} {{");
    let _ = writeln!(out, "return new {inputs_class}(this);");
    out.push_str("}\n\n");
    let _ = writeln!(out, "get outputs(): {outputs_class} {{");
    let _ = writeln!(out, "return new {outputs_class}(this);");
    out.push_str("}\n}\n\n");

    out.push_str(&accessor_class(
        &inputs_class,
        class,
        "call",
        "inputValues",
        &getters(inputs, "value")?,
    ));
    out.push_str("\n\n");
    out.push_str(&accessor_class(
        &outputs_class,
        class,
        "call",
        "outputValues",
        &getters(outputs, "value")?,
    ));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(json: &str) -> Vec<String> {
        let abi: JsonAbi = serde_json::from_str(json).unwrap();
        EthereumCodeGenerator::new("Token", &abi)
            .generate_types()
            .unwrap()
    }

    #[test]
    fn event_params_class() {
        let types = generate(
            r#"[{"type":"event","name":"Transfer","anonymous":false,"inputs":[
                {"name":"from","type":"address","indexed":true},
                {"name":"","type":"uint256","indexed":false}]}]"#,
        );
        let event = &types[0];
        assert!(event.contains("export class Transfer extends ethereum.Event {"));
        assert!(event.contains("export class Transfer__Params {"));
        assert!(event.contains("get from(): Address {\nreturn this._event.parameters[0].value.toAddress();"));
        assert!(event.contains("get param1(): BigInt {\nreturn this._event.parameters[1].value.toBigInt();"));
    }

    #[test]
    fn overloaded_events_are_suffixed() {
        let types = generate(
            r#"[{"type":"event","name":"Transfer","anonymous":false,"inputs":[]},
                {"type":"event","name":"Transfer","anonymous":false,"inputs":[
                    {"name":"id","type":"uint8","indexed":true}]}]"#,
        );
        assert!(types[0].starts_with("export class Transfer extends"));
        assert!(types[1].starts_with("export class Transfer1 extends"));
    }

    #[test]
    fn suffixed_overloads_do_not_clash_with_declared_names() {
        let types = generate(
            r#"[{"type":"event","name":"Transfer","anonymous":false,"inputs":[]},
                {"type":"event","name":"Transfer","anonymous":false,"inputs":[
                    {"name":"id","type":"uint8","indexed":true}]},
                {"type":"event","name":"Transfer1","anonymous":false,"inputs":[]}]"#,
        );
        let classes: Vec<_> = types
            .iter()
            .filter_map(|t| t.strip_prefix("export class "))
            .filter_map(|t| t.split_whitespace().next())
            .collect();
        let mut unique = classes.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(classes.len(), unique.len(), "{classes:?}");
    }

    #[test]
    fn contract_name_is_escaped_in_bind() {
        let abi: JsonAbi = serde_json::from_str("[]").unwrap();
        let types = EthereumCodeGenerator::new(r#"My"Token"#, &abi)
            .generate_types()
            .unwrap();
        assert!(types[0].contains("export class MyToken extends ethereum.SmartContract {"));
        assert!(types[0].contains(r#"return new MyToken("My\"Token", address);"#));
    }

    #[test]
    fn view_functions_get_call_wrappers() {
        let types = generate(
            r#"[{"type":"function","name":"balanceOf","stateMutability":"view",
                 "inputs":[{"name":"owner","type":"address"}],
                 "outputs":[{"name":"","type":"uint256"}]}]"#,
        );
        let contract = &types[0];
        assert!(contract.contains("export class Token extends ethereum.SmartContract {"));
        assert!(contract.contains("return new Token(\"Token\", address);"));
        assert!(contract.contains("balanceOf(owner: Address): BigInt {"));
        assert!(contract.contains("super.call(\"balanceOf\", \"balanceOf(address):(uint256)\", ["));
        assert!(contract.contains("ethereum.Value.fromAddress(owner)"));
        assert!(contract.contains("return result[0].toBigInt();"));
        assert!(contract.contains("try_balanceOf(owner: Address): ethereum.CallResult<BigInt> {"));
        assert!(contract.contains("return ethereum.CallResult.fromValue(value[0].toBigInt());"));
        // no call class for read-only functions
        assert_eq!(types.len(), 1);
    }

    #[test]
    fn multiple_outputs_return_raw_values() {
        let types = generate(
            r#"[{"type":"function","name":"reserves","stateMutability":"view","inputs":[],
                 "outputs":[{"name":"a","type":"uint112"},{"name":"b","type":"uint112"}]}]"#,
        );
        assert!(types[0].contains("reserves(): Array<ethereum.Value> {"));
        assert!(types[0].contains("return result;"));
        assert!(types[0].contains("fromValue(value);"));
    }

    #[test]
    fn mutating_functions_and_constructor_get_call_classes() {
        let types = generate(
            r#"[{"type":"constructor","stateMutability":"nonpayable",
                 "inputs":[{"name":"supply","type":"uint256"}]},
                {"type":"function","name":"transfer","stateMutability":"nonpayable",
                 "inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],
                 "outputs":[{"name":"","type":"bool"}]}]"#,
        );
        assert_eq!(types.len(), 3);
        assert!(types[1].starts_with("export class ConstructorCall extends ethereum.Call {"));
        assert!(types[1].contains("get supply(): BigInt {\nreturn this._call.inputValues[0].value.toBigInt();"));
        let call = &types[2];
        assert!(call.starts_with("export class TransferCall extends ethereum.Call {"));
        assert!(call.contains("export class TransferCall__Inputs {"));
        assert!(call.contains("get to(): Address {"));
        assert!(call.contains("get value0(): boolean {\nreturn this._call.outputValues[0].value.toBoolean();"));
    }

    #[test]
    fn unsupported_types_fail_generation() {
        let abi: JsonAbi = serde_json::from_str(
            r#"[{"type":"event","name":"E","anonymous":false,"inputs":[
                {"name":"x","type":"fixed128x18","indexed":false}]}]"#,
        )
        .unwrap();
        let err = EthereumCodeGenerator::new("Token", &abi)
            .generate_types()
            .unwrap_err();
        assert!(matches!(err, AbiError::UnsupportedType(t) if t == "fixed128x18"));
    }
}
