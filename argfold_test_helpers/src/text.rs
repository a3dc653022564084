//! Normalisation helpers for comparing rendered usage text.

/// Removes the indentation shared by every non-blank line, together with
/// one leading and one trailing blank line.
///
/// Lets tests write expected usage text as an indented block literal.
///
/// # Examples
///
/// ```
/// use test_helpers::text::dedent;
///
/// let expected = dedent(
///     "
///     Usage: demo
///
///       --verbose
///     ",
/// );
/// assert_eq!(expected, "Usage: demo\n\n  --verbose");
/// ```
#[must_use]
pub fn dedent(block: &str) -> String {
    let body = block.strip_prefix('\n').unwrap_or(block);
    let lines: Vec<&str> = body.lines().collect();
    let trimmed = match lines.split_last() {
        Some((last, rest)) if last.trim().is_empty() => rest,
        _ => lines.as_slice(),
    };
    let margin = trimmed
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    trimmed
        .iter()
        .map(|line| line.get(margin..).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strips trailing whitespace from every line.
#[must_use]
pub fn trim_line_ends(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{dedent, trim_line_ends};

    #[test]
    fn dedent_removes_shared_margin() {
        assert_eq!(dedent("\n    a\n      b\n    "), "a\n  b");
    }

    #[test]
    fn dedent_keeps_blank_lines() {
        assert_eq!(dedent("\n  a\n\n  b\n"), "a\n\nb");
    }

    #[test]
    fn trim_line_ends_strips_padding() {
        assert_eq!(trim_line_ends("a  \nb\t"), "a\nb");
    }
}
