//! reStructuredText building blocks.

/// Indentation of a directive body.
pub const DIRECTIVE_INDENT: usize = 3;

/// Name of the directive that re-parses its body as markup.
pub const NESTED_PARSE: &str = "autoapi-nested-parse";

/// Section title followed by an underline of matching character count.
#[must_use]
pub fn heading(title: &str, underline: char) -> String {
    let width = title.chars().count();
    let mut out = String::with_capacity(title.len() + width + 1);
    out.push_str(title);
    out.push('\n');
    out.extend(std::iter::repeat_n(underline, width));
    out
}

/// Prefix every non-blank line with `width` spaces. Blank lines stay empty.
#[must_use]
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `.. <domain>:<name>:: <argument>`
#[must_use]
pub fn domain_directive(domain: &str, name: &str, argument: &str) -> String {
    format!(".. {domain}:{name}:: {argument}")
}

/// Nested-parse directive wrapping `body`.
#[must_use]
pub fn nested_parse(body: &str) -> String {
    format!(".. {NESTED_PARSE}::\n\n{}", indent(body, DIRECTIVE_INDENT))
}

/// `toctree` directive with the given options and entries.
#[must_use]
pub fn toctree(options: &[&str], entries: &[String]) -> String {
    let mut out = String::from(".. toctree::");
    for option in options {
        out.push('\n');
        out.push_str(&indent(option, DIRECTIVE_INDENT));
    }
    out.push('\n');
    for entry in entries {
        out.push('\n');
        out.push_str(&indent(entry, DIRECTIVE_INDENT));
    }
    out
}
