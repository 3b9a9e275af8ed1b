//! Rewrites the non-standard `__underline__` span into inline `<u>` tags.
//!
//! CommonMark reads `__x__` as strong emphasis, so this has to run before the
//! markup is handed to the parser. Fenced code blocks and inline code spans
//! are left untouched.

use regex::Regex;
use std::sync::OnceLock;

fn underline_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"__([^_\s](?:[^_]*[^_\s])?)__").expect("underline pattern is valid")
    })
}

fn fence_marker(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") {
        Some("```")
    } else if trimmed.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// Applies the rewrite to text outside backtick code spans on one line.
fn rewrite_line(line: &str, out: &mut String) {
    for (i, segment) in line.split('`').enumerate() {
        if i > 0 {
            out.push('`');
        }
        // Odd segments sit between backticks.
        if i % 2 == 1 {
            out.push_str(segment);
        } else {
            out.push_str(&underline_pattern().replace_all(segment, "<u>$1</u>"));
        }
    }
}

pub fn rewrite_underline(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + 16);
    let mut open_fence: Option<&'static str> = None;

    for line in markup.split_inclusive('\n') {
        match (open_fence, fence_marker(line)) {
            (None, Some(marker)) => {
                open_fence = Some(marker);
                out.push_str(line);
            }
            (Some(open), Some(marker)) if open == marker => {
                open_fence = None;
                out.push_str(line);
            }
            (Some(_), _) => out.push_str(line),
            (None, None) => rewrite_line(line, &mut out),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_underscore_becomes_u_tag() {
        assert_eq!(
            rewrite_underline("a __b c__ d"),
            "a <u>b c</u> d"
        );
    }

    #[test]
    fn bold_asterisks_are_untouched() {
        assert_eq!(rewrite_underline("**bold**"), "**bold**");
    }

    #[test]
    fn code_is_left_alone() {
        assert_eq!(rewrite_underline("`__init__` and __x__"), "`__init__` and <u>x</u>");
        let fenced = "```\n__keep__\n```\n__change__\n";
        assert_eq!(
            rewrite_underline(fenced),
            "```\n__keep__\n```\n<u>change</u>\n"
        );
    }

    #[test]
    fn unbalanced_markers_pass_through() {
        assert_eq!(rewrite_underline("__open only"), "__open only");
        assert_eq!(rewrite_underline("____"), "____");
    }
}
