use anyhow::{anyhow, Result};

use super::Variables;

/// Replaces `{NAME}` placeholders in a step line.
///
/// Names start with an uppercase ASCII letter or `_` and continue with
/// uppercase letters, digits or `_`. Values come from `variables` first and
/// the process environment second. `\{` and `\}` produce literal braces;
/// any other braced text (JSON bodies, for instance) is copied unchanged.
pub fn expand_placeholders(input: &str, variables: &Variables) -> Result<String> {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(index) = rest.find(['\\', '{']) {
        output.push_str(&rest[..index]);
        let tail = &rest[index..];

        if let Some(escaped) = tail.strip_prefix('\\') {
            match escaped.chars().next() {
                Some(brace @ ('{' | '}')) => {
                    output.push(brace);
                    rest = &escaped[1..];
                }
                _ => {
                    output.push('\\');
                    rest = escaped;
                }
            }
            continue;
        }

        let inner = &tail[1..];
        match placeholder_name(inner) {
            Some(name) => {
                let value = variables
                    .get(name)
                    .cloned()
                    .or_else(|| std::env::var(name).ok())
                    .ok_or_else(|| anyhow!("Missing template variable: {name}"))?;
                output.push_str(&value);
                rest = &inner[name.len() + 1..];
            }
            None => {
                output.push('{');
                rest = inner;
            }
        }
    }

    output.push_str(rest);
    Ok(output)
}

/// Name of the placeholder at the start of `text` when it is followed by `}`.
fn placeholder_name(text: &str) -> Option<&str> {
    let end = text.find('}')?;
    let name = &text[..end];
    let mut chars = name.chars();
    let starts_well = matches!(chars.next(), Some(c) if c.is_ascii_uppercase() || c == '_');
    let continues_well = chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    (starts_well && continues_well).then_some(name)
}
