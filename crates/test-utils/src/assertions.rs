//! Formatting helpers for snapshot tests
//!
//! Items are numbered one per line so snapshots stay readable and diffs
//! point at the entry that changed.

/// Format items one per line, numbered from 1.
///
/// # Example
///
/// ```ignore
/// use graphql_test_utils::assertions::format_numbered;
///
/// let names: Vec<_> = declarations.iter().map(|d| &d.name).collect();
/// insta::assert_snapshot!(format_numbered(&names));
/// ```
pub fn format_numbered<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return String::from("(none)");
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("[{}] {item}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop the first `n` lines of generated output.
///
/// Useful for skipping the header and banner when only declarations matter.
pub fn skip_lines(text: &str, n: usize) -> String {
    text.lines().skip(n).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numbered_empty() {
        let empty: Vec<String> = vec![];
        assert_eq!(format_numbered(&empty), "(none)");
    }

    #[test]
    fn test_format_numbered_multiple() {
        let formatted = format_numbered(&["GetUserQuery", "GetUserQuery_User"]);
        assert_eq!(formatted, "[1] GetUserQuery\n[2] GetUserQuery_User");
    }

    #[test]
    fn test_skip_lines() {
        assert_eq!(skip_lines("a\nb\nc", 1), "b\nc");
        assert_eq!(skip_lines("a", 3), "");
    }
}
