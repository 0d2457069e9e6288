//! Docstring normalization.

const TAB_WIDTH: usize = 8;

/// Normalize a raw docstring for embedding in reStructuredText.
///
/// Tabs are expanded to 8-column stops, the first line loses its leading
/// whitespace, the smallest indentation shared by the remaining non-blank lines
/// is removed, trailing whitespace is stripped, and leading/trailing blank lines
/// are dropped. Returns `None` when nothing is left.
#[must_use]
pub fn clean_docstring(raw: &str) -> Option<String> {
    let lines: Vec<String> = raw.lines().map(expand_tabs).collect();
    let (first, rest) = lines.split_first()?;

    let margin = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_spaces(line))
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<&str> = Vec::with_capacity(lines.len());
    cleaned.push(first.trim());
    for line in rest {
        if line.trim().is_empty() {
            cleaned.push("");
        } else {
            cleaned.push(line[margin..].trim_end());
        }
    }

    let start = cleaned.iter().position(|line| !line.is_empty())?;
    let end = cleaned.iter().rposition(|line| !line.is_empty())?;

    Some(cleaned[start..=end].join("\n"))
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        assert_eq!(clean_docstring("Does X."), Some("Does X.".to_string()));
        assert_eq!(clean_docstring("   Does X.   "), Some("Does X.".to_string()));
    }

    #[test]
    fn test_blank_is_absent() {
        assert_eq!(clean_docstring(""), None);
        assert_eq!(clean_docstring("   \n\t\n  "), None);
    }

    #[test]
    fn test_common_indent_removed_after_first_line() {
        let raw = "Summary line.\n\n    Details here.\n      Nested more.\n    Back.\n    ";
        assert_eq!(
            clean_docstring(raw).unwrap(),
            "Summary line.\n\nDetails here.\n  Nested more.\nBack."
        );
    }

    #[test]
    fn test_leading_blank_lines_dropped() {
        let raw = "\n    Starts on the second line.\n\n    Second paragraph.\n";
        assert_eq!(
            clean_docstring(raw).unwrap(),
            "Starts on the second line.\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_tabs_expand_to_stops() {
        assert_eq!(expand_tabs("a\tb"), "a       b");
        assert_eq!(expand_tabs("\tx"), "        x");
        let raw = "Head.\n\tIndented by tab.\n\t\tTwice.";
        assert_eq!(clean_docstring(raw).unwrap(), "Head.\nIndented by tab.\n        Twice.");
    }
}
