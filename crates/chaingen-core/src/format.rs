//! Pretty-printing of generated source.
//!
//! Generators emit loosely laid out code; the formatter re-indents it so the
//! output is stable and readable. It never adds, removes, or reorders tokens.

use crate::error::{CodegenError, Result};

/// Source dialect handed to a [`Formatter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceParser {
    /// TypeScript / AssemblyScript
    #[default]
    TypeScript,
}

pub trait Formatter: Send + Sync {
    fn format(&self, source: &str, parser: SourceParser) -> Result<String>;
}

/// Bracket-depth re-indenter for TypeScript-like sources.
///
/// - indents two spaces per line that leaves a `{`, `(` or `[` open
/// - trims trailing whitespace and collapses runs of blank lines
/// - ignores brackets inside string literals and `//` comments
/// - ends the file with exactly one newline
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptFormatter;

impl TypeScriptFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for TypeScriptFormatter {
    fn format(&self, source: &str, _parser: SourceParser) -> Result<String> {
        let mut out = String::with_capacity(source.len() + source.len() / 4);
        // line index of every bracket still open; a line opening several
        // brackets only adds one indent level
        let mut open_lines: Vec<usize> = Vec::new();
        let mut pending_blank = false;

        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                pending_blank = !out.is_empty();
                continue;
            }

            let scan = scan_line(line);
            let unbalanced = || CodegenError::Format {
                reason: format!("unbalanced closing bracket on line {}", index + 1),
            };

            for _ in 0..scan.leading_closers {
                open_lines.pop().ok_or_else(unbalanced)?;
            }

            if pending_blank {
                out.push('\n');
                pending_blank = false;
            }
            for _ in 0..indent_level(&open_lines) {
                out.push_str("  ");
            }
            out.push_str(line);
            out.push('\n');

            for bracket in scan.brackets.iter().skip(scan.leading_closers) {
                match bracket {
                    Bracket::Open => open_lines.push(index),
                    Bracket::Close => {
                        open_lines.pop().ok_or_else(unbalanced)?;
                    }
                }
            }
        }

        if !open_lines.is_empty() {
            return Err(CodegenError::Format {
                reason: format!("{} unclosed bracket(s) at end of input", open_lines.len()),
            });
        }
        Ok(out)
    }
}

fn indent_level(open_lines: &[usize]) -> usize {
    let mut levels = open_lines.to_vec();
    levels.dedup();
    levels.len()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    Open,
    Close,
}

#[derive(Debug, Default)]
struct LineScan {
    brackets: Vec<Bracket>,
    leading_closers: usize,
}

fn scan_line(line: &str) -> LineScan {
    let mut scan = LineScan::default();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut leading = true;
    let mut prev = '\0';

    for c in line.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            prev = c;
            continue;
        }
        match c {
            '/' if prev == '/' => break,
            '"' | '\'' | '`' => {
                quote = Some(c);
                leading = false;
            }
            '{' | '(' | '[' => {
                scan.brackets.push(Bracket::Open);
                leading = false;
            }
            '}' | ')' | ']' => {
                scan.brackets.push(Bracket::Close);
                if leading {
                    scan.leading_closers += 1;
                }
            }
            c if c.is_whitespace() => {}
            _ => leading = false,
        }
        prev = c;
    }
    scan
}
