//! Shared helpers for protocol code generators.

/// First line of every generated file.
pub const GENERATED_FILE_NOTE: &str =
    "// THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.";

/// Module the generated bindings import from.
pub const GRAPH_TS_MODULE: &str = "@graphprotocol/graph-ts";

/// `import { a, b } from "<module>";`
pub fn module_import(names: &[&str], module: &str) -> String {
    format!("import {{ {} }} from \"{module}\";", names.join(", "))
}

/// Double-quoted string literal with `\\`, `"` and line breaks escaped.
/// Valid in TypeScript and in YAML double-quoted scalars.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `transfer_from`, `wasm/transfer`, `new-owner` → `TransferFrom`, `WasmTransfer`, `NewOwner`.
/// Case inside a segment is preserved (`approvalForAll` → `ApprovalForAll`).
pub fn to_pascal_case(input: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield", "let", "static",
    "implements", "interface", "package", "private", "protected", "public", "await",
];

/// Make `name` usable as a member / parameter identifier. Empty names become
/// `fallback`; keywords and leading digits get an underscore prefix.
pub fn safe_identifier(name: &str, fallback: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        return fallback.to_string();
    }
    if RESERVED.contains(&cleaned.as_str()) || cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{cleaned}");
    }
    cleaned
}

/// Hands out unique names for overloaded declarations: the first use of a
/// name is returned as-is, later ones get `1`, `2`, ... appended, skipping
/// any suffixed name already handed out.
#[derive(Debug, Default)]
pub struct NameDisambiguator {
    next_suffix: std::collections::HashMap<String, usize>,
    taken: std::collections::HashSet<String>,
}

impl NameDisambiguator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unique(&mut self, name: &str) -> String {
        if self.taken.insert(name.to_string()) {
            return name.to_string();
        }
        let suffix = self.next_suffix.entry(name.to_string()).or_insert(1);
        loop {
            let candidate = format!("{name}{suffix}");
            *suffix += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case() {
        assert_eq!(to_pascal_case("transfer_from"), "TransferFrom");
        assert_eq!(to_pascal_case("wasm/transfer"), "WasmTransfer");
        assert_eq!(to_pascal_case("approvalForAll"), "ApprovalForAll");
        assert_eq!(to_pascal_case("coin-received"), "CoinReceived");
    }

    #[test]
    fn identifiers() {
        assert_eq!(safe_identifier("", "param0"), "param0");
        assert_eq!(safe_identifier("from", "p"), "from");
        assert_eq!(safe_identifier("new", "p"), "_new");
        assert_eq!(safe_identifier("1st", "p"), "_1st");
        assert_eq!(safe_identifier("a.b", "p"), "a_b");
    }

    #[test]
    fn disambiguator_suffixes_repeats() {
        let mut names = NameDisambiguator::new();
        assert_eq!(names.unique("Transfer"), "Transfer");
        assert_eq!(names.unique("Transfer"), "Transfer1");
        assert_eq!(names.unique("Approval"), "Approval");
        assert_eq!(names.unique("Transfer"), "Transfer2");
    }

    #[test]
    fn disambiguator_skips_names_already_taken() {
        let mut names = NameDisambiguator::new();
        let out: Vec<_> = ["Transfer", "Transfer", "Transfer1"]
            .into_iter()
            .map(|n| names.unique(n))
            .collect();
        assert_eq!(out, ["Transfer", "Transfer1", "Transfer11"]);

        let mut names = NameDisambiguator::new();
        let out: Vec<_> = ["Transfer1", "Transfer", "Transfer"]
            .into_iter()
            .map(|n| names.unique(n))
            .collect();
        assert_eq!(out, ["Transfer1", "Transfer", "Transfer2"]);
    }

    #[test]
    fn string_literals_are_escaped() {
        assert_eq!(string_literal("transfer"), r#""transfer""#);
        assert_eq!(string_literal(r#"a"b"#), r#""a\"b""#);
        assert_eq!(string_literal(r"a\b"), r#""a\\b""#);
        assert_eq!(string_literal("a\nb"), r#""a\nb""#);
    }

    #[test]
    fn imports() {
        assert_eq!(
            module_import(&["Address", "BigInt"], GRAPH_TS_MODULE),
            "import { Address, BigInt } from \"@graphprotocol/graph-ts\";"
        );
    }
}
