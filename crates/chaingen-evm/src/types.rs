//! Solidity → AssemblyScript type mapping.
//!
//! This is where EVM ABI types are mapped onto the `@graphprotocol/graph-ts`
//! value model: the ascribed AssemblyScript type, the `ethereum.Value`
//! accessor used to read a decoded value, and the constructor used to pass
//! one as a call argument.

use alloy_json_abi::Param;
use chaingen_core::AbiError;

/// How one Solidity type appears in generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueType {
    /// AssemblyScript type, e.g. `BigInt`, `Array<Address>`
    pub ascription: String,
    /// Accessor on `ethereum.Value`, e.g. `toBigInt()`
    to_value: String,
    /// Constructor on `ethereum.Value`, e.g. `fromUnsignedBigInt`
    from_value: String,
}

impl ValueType {
    fn new(ascription: &str, to_value: &str, from_value: &str) -> Self {
        Self {
            ascription: ascription.to_string(),
            to_value: to_value.to_string(),
            from_value: from_value.to_string(),
        }
    }

    /// `<expr>.toBigInt()`
    pub fn read(&self, expr: &str) -> String {
        format!("{expr}.{}", self.to_value)
    }

    /// `ethereum.Value.fromUnsignedBigInt(<expr>)`
    pub fn write(&self, expr: &str) -> String {
        format!("ethereum.Value.{}({expr})", self.from_value)
    }
}

// ─── Elementary types ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Elementary {
    Address,
    Bool,
    String,
    Bytes,
    FixedBytes,
    SmallInt,
    SmallUint,
    BigInt,
    BigUint,
    Tuple,
}

fn parse_size(digits: &str, default: u16) -> Option<u16> {
    if digits.is_empty() {
        Some(default)
    } else {
        digits.parse().ok()
    }
}

fn elementary(ty: &str) -> Option<Elementary> {
    match ty {
        "address" => return Some(Elementary::Address),
        "bool" => return Some(Elementary::Bool),
        "string" => return Some(Elementary::String),
        "bytes" => return Some(Elementary::Bytes),
        "tuple" => return Some(Elementary::Tuple),
        _ => {}
    }
    if let Some(size) = ty.strip_prefix("bytes") {
        return parse_size(size, 0)
            .filter(|n| (1..=32).contains(n))
            .map(|_| Elementary::FixedBytes);
    }
    if let Some(bits) = ty.strip_prefix("uint") {
        let bits = parse_size(bits, 256).filter(|b| valid_int_bits(*b))?;
        return Some(if bits <= 24 {
            Elementary::SmallUint
        } else {
            Elementary::BigUint
        });
    }
    if let Some(bits) = ty.strip_prefix("int") {
        let bits = parse_size(bits, 256).filter(|b| valid_int_bits(*b))?;
        return Some(if bits <= 32 {
            Elementary::SmallInt
        } else {
            Elementary::BigInt
        });
    }
    None
}

fn valid_int_bits(bits: u16) -> bool {
    bits % 8 == 0 && (8..=256).contains(&bits)
}

fn scalar(kind: Elementary) -> ValueType {
    match kind {
        Elementary::Address => ValueType::new("Address", "toAddress()", "fromAddress"),
        Elementary::Bool => ValueType::new("boolean", "toBoolean()", "fromBoolean"),
        Elementary::String => ValueType::new("string", "toString()", "fromString"),
        Elementary::Bytes => ValueType::new("Bytes", "toBytes()", "fromBytes"),
        Elementary::FixedBytes => ValueType::new("Bytes", "toBytes()", "fromFixedBytes"),
        Elementary::SmallInt => ValueType::new("i32", "toI32()", "fromI32"),
        Elementary::SmallUint => ValueType::new("i32", "toI32()", "fromI32"),
        Elementary::BigInt => ValueType::new("BigInt", "toBigInt()", "fromSignedBigInt"),
        Elementary::BigUint => ValueType::new("BigInt", "toBigInt()", "fromUnsignedBigInt"),
        Elementary::Tuple => ValueType::new("ethereum.Tuple", "toTuple()", "fromTuple"),
    }
}

fn array_of(kind: Elementary) -> ValueType {
    match kind {
        Elementary::Address => {
            ValueType::new("Array<Address>", "toAddressArray()", "fromAddressArray")
        }
        Elementary::Bool => {
            ValueType::new("Array<boolean>", "toBooleanArray()", "fromBooleanArray")
        }
        Elementary::String => {
            ValueType::new("Array<string>", "toStringArray()", "fromStringArray")
        }
        Elementary::Bytes => ValueType::new("Array<Bytes>", "toBytesArray()", "fromBytesArray"),
        Elementary::FixedBytes => {
            ValueType::new("Array<Bytes>", "toBytesArray()", "fromFixedBytesArray")
        }
        Elementary::SmallInt | Elementary::SmallUint => {
            ValueType::new("Array<i32>", "toI32Array()", "fromI32Array")
        }
        Elementary::BigInt => {
            ValueType::new("Array<BigInt>", "toBigIntArray()", "fromSignedBigIntArray")
        }
        Elementary::BigUint => {
            ValueType::new("Array<BigInt>", "toBigIntArray()", "fromUnsignedBigIntArray")
        }
        Elementary::Tuple => ValueType::new(
            "Array<ethereum.Tuple>",
            "toTupleArray<ethereum.Tuple>()",
            "fromTupleArray",
        ),
    }
}

/// Split `uint256[][3]` into (`uint256[]`, true).
fn strip_array(ty: &str) -> Option<&str> {
    if !ty.ends_with(']') {
        return None;
    }
    ty.rfind('[').map(|open| &ty[..open])
}

/// Map an ABI type string to its generated-code representation.
///
/// Arrays of arrays decode to untyped `Array<ethereum.Value>`.
pub fn value_type(ty: &str) -> Result<ValueType, AbiError> {
    let unsupported = || AbiError::UnsupportedType(ty.to_string());
    match strip_array(ty) {
        None => elementary(ty).map(scalar).ok_or_else(unsupported),
        Some(inner) if strip_array(inner).is_some() => {
            // still validate the innermost element type
            let mut base = inner;
            while let Some(next) = strip_array(base) {
                base = next;
            }
            elementary(base).ok_or_else(unsupported)?;
            Ok(ValueType::new("Array<ethereum.Value>", "toArray()", "fromArray"))
        }
        Some(inner) => elementary(inner).map(array_of).ok_or_else(unsupported),
    }
}

/// Canonical type used in signatures: tuples are expanded, and `uint` /
/// `int` become `uint256` / `int256`.
pub fn canonical_type(ty: &str, components: &[Param]) -> String {
    if let Some(suffix) = ty.strip_prefix("tuple") {
        let inner: Vec<String> = components
            .iter()
            .map(|c| canonical_type(&c.ty, &c.components))
            .collect();
        return format!("({}){suffix}", inner.join(","));
    }
    let (base, suffix) = match ty.find('[') {
        Some(i) => ty.split_at(i),
        None => (ty, ""),
    };
    match base {
        "uint" => format!("uint256{suffix}"),
        "int" => format!("int256{suffix}"),
        _ => ty.to_string(),
    }
}
