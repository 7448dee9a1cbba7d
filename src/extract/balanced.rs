//! Balanced-delimiter scanning primitives.

use crate::error::{Error, Result};

/// Extract the content of a balanced delimiter group.
///
/// `start` is the index just past the opening delimiter; the scan counts
/// nesting depth until the matching closing delimiter. Characters escaped
/// with a backslash never affect the depth.
///
/// # Returns
///
/// `(content, end)` where `end` is the index just past the closing
/// delimiter.
///
/// # Errors
///
/// [`Error::UnbalancedDelimiter`] if the input ends before the depth
/// returns to zero.
pub fn extract_balanced(text: &str, open: char, close: char, start: usize) -> Result<(String, usize)> {
    let mut depth = 1usize;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                let pos = start + offset;
                return Ok((text[start..pos].to_string(), pos + close.len_utf8()));
            }
        }
    }

    Err(Error::UnbalancedDelimiter {
        open,
        close,
        offset: start.saturating_sub(1),
    })
}

/// Extract `count` sequential `{…}` parameters starting at `start`.
///
/// Whitespace between parameters is skipped. Returns the parameter values
/// and the index just past the last closing brace. Fewer groups than
/// requested is not an error; the caller decides whether that matters.
pub fn extract_brace_params(text: &str, start: usize, count: usize) -> Result<(Vec<String>, usize)> {
    let bytes = text.as_bytes();
    let mut params = Vec::with_capacity(count);
    let mut pos = start;

    for _ in 0..count {
        while pos < bytes.len() && (bytes[pos] as char).is_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] != b'{' {
            break;
        }
        let (value, end) = extract_balanced(text, '{', '}', pos + 1)?;
        params.push(value);
        pos = end;
    }

    Ok((params, pos))
}

/// Extract up to `count` optional `[…]` parameters starting at `start`.
pub fn extract_bracket_params(text: &str, start: usize, count: usize) -> Result<(Vec<String>, usize)> {
    let bytes = text.as_bytes();
    let mut params = Vec::with_capacity(count);
    let mut pos = start;

    for _ in 0..count {
        while pos < bytes.len() && (bytes[pos] as char).is_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] != b'[' {
            break;
        }
        let (value, end) = extract_balanced(text, '[', ']', pos + 1)?;
        params.push(value);
        pos = end;
    }

    Ok((params, pos))
}

/// All single-level `{…}` argument values of a command string.
///
/// Does not handle nesting; decoration commands take flat arguments.
pub fn brace_arguments(command: &str) -> Vec<String> {
    crate::patterns::SIMPLE_BRACES_RE
        .captures_iter(command)
        .map(|c| c[1].to_string())
        .collect()
}

/// Split `text` into chunks, each starting at a match of `re`.
///
/// Text before the first match is dropped after trimming to whitespace;
/// otherwise it is kept as a leading chunk. Used where a lookahead split
/// would be written in engines that support one.
pub fn split_before_matches(text: &str, re: &regex::Regex) -> Vec<String> {
    let starts: Vec<usize> = re.find_iter(text).map(|m| m.start()).collect();
    if starts.is_empty() {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::with_capacity(starts.len() + 1);
    if !text[..starts[0]].trim().is_empty() {
        chunks.push(text[..starts[0]].to_string());
    }
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        chunks.push(text[start..end].to_string());
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_extract_balanced_nested() {
        let text = r"{Title {with \textit{nested}}}rest";
        let (content, end) = extract_balanced(text, '{', '}', 1).unwrap();
        assert_eq!(content, r"Title {with \textit{nested}}");
        assert_eq!(&text[end..], "rest");
    }

    #[test]
    fn test_extract_balanced_escaped_braces() {
        let text = r"{a \{literal\} b}x";
        let (content, _) = extract_balanced(text, '{', '}', 1).unwrap();
        assert_eq!(content, r"a \{literal\} b");
    }

    #[test]
    fn test_extract_balanced_unclosed() {
        let err = extract_balanced("{never closed", '{', '}', 1).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::UnbalancedDelimiter { open: '{', .. }
        ));
    }

    #[test]
    fn test_brace_params_sequential() {
        let text = r"{Acme}{Engineer {Sr.}}{Remote}{2020}tail";
        let (params, end) = extract_brace_params(text, 0, 4).unwrap();
        assert_eq!(params, vec!["Acme", "Engineer {Sr.}", "Remote", "2020"]);
        assert_eq!(&text[end..], "tail");
    }

    #[test]
    fn test_brace_params_fewer_than_requested() {
        let (params, _) = extract_brace_params("{only}", 0, 3).unwrap();
        assert_eq!(params, vec!["only"]);
    }

    #[test]
    fn test_bracket_params() {
        let text = "[leftmargin=0pt, itemsep = 0pt] body";
        let (params, end) = extract_bracket_params(text, 0, 1).unwrap();
        assert_eq!(params, vec!["leftmargin=0pt, itemsep = 0pt"]);
        assert_eq!(text[end..].trim(), "body");
    }

    #[test]
    fn test_brace_arguments_flat() {
        let args = brace_arguments(r"\leftgrad{\leftbarwidth}{60pt}{0.4\paperheight}");
        assert_eq!(args, vec![r"\leftbarwidth", "60pt", r"0.4\paperheight"]);
    }

    #[test]
    fn test_split_before_matches() {
        let re = Regex::new(r"\\item\[").unwrap();
        let chunks = split_before_matches(
            "  \\item[a] one \\begin{x}\\end{x}\n\\item[b] two",
            &re,
        );
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].starts_with("\\item[a]"));
        assert!(chunks[1].starts_with("\\item[b]"));
    }
}
