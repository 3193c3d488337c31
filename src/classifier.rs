//! Comment stripping for single input lines

use crate::options::ParseOptions;

/// Returns the line with comments removed and surrounding whitespace trimmed.
///
/// A line whose trimmed text starts with a full-line comment prefix becomes
/// empty. Otherwise each inline prefix, in configured order, truncates the
/// line at its first occurrence that sits at column 0 or right after
/// whitespace. An empty result means the parser sees a blank line.
pub fn clean_line(line: &str, options: &ParseOptions) -> String {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let is_comment = options
        .comment_prefixes
        .iter()
        .any(|prefix| !prefix.is_empty() && trimmed.starts_with(prefix.as_str()));
    if is_comment {
        return String::new();
    }

    let mut out = line;
    for prefix in &options.inline_comment_prefixes {
        if prefix.is_empty() {
            continue;
        }
        if let Some(cut) = inline_comment_start(out, prefix) {
            out = &out[..cut];
        }
    }

    out.trim().to_string()
}

/// Byte offset of the first `prefix` at column 0 or preceded by whitespace
fn inline_comment_start(line: &str, prefix: &str) -> Option<usize> {
    line.match_indices(prefix).map(|(pos, _)| pos).find(|&pos| {
        pos == 0
            || line[..pos]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace)
    })
}

/// Returns true if the raw line starts with whitespace
pub fn is_indented(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_whitespace)
}
