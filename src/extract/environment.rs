//! Environment extraction: `\begin{name}…\end{name}` blocks with
//! optional and mandatory parameters.

use regex::Regex;

use super::balanced::{extract_bracket_params, extract_brace_params};
use crate::error::{Error, Result};

/// A located environment, spans relative to the searched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSpan {
    /// Environment name as written in the markup
    pub name: String,
    /// Start of `\begin{name}`
    pub start: usize,
    /// Index just past `\end{name}`
    pub end: usize,
    /// Start of the inner content (just past `\begin{name}`)
    pub content_start: usize,
    /// End of the inner content (at `\end{name}`)
    pub content_end: usize,
}

fn begin_regex(name_pattern: &str) -> Regex {
    Regex::new(&format!(r"\\begin\{{({})\}}", name_pattern)).expect("valid env pattern")
}

fn literal_marker(kind: &str, name: &str) -> String {
    format!("\\{}{{{}}}", kind, name)
}

/// Locate an environment by exact name, handling nested same-name blocks.
pub fn environment_span(text: &str, name: &str, from: usize) -> Result<EnvSpan> {
    let begin = literal_marker("begin", name);
    let end = literal_marker("end", name);

    let start = text[from..].find(&begin).map(|i| from + i).ok_or_else(|| {
        Error::EnvironmentNotFound {
            name: name.to_string(),
            detail: format!("no {} in input", begin),
        }
    })?;

    let content_start = start + begin.len();
    let mut pos = content_start;
    let mut depth = 1usize;

    while depth > 0 {
        let next_begin = text[pos..].find(&begin);
        let next_end = text[pos..].find(&end);
        match (next_begin, next_end) {
            (Some(b), Some(e)) if b < e => {
                depth += 1;
                pos += b + begin.len();
            }
            (_, Some(e)) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(EnvSpan {
                        name: name.to_string(),
                        start,
                        end: pos + e + end.len(),
                        content_start,
                        content_end: pos + e,
                    });
                }
                pos += e + end.len();
            }
            (_, None) => break,
        }
    }

    Err(Error::EnvironmentNotFound {
        name: name.to_string(),
        detail: format!("unmatched {} near offset {}", begin, start),
    })
}

/// Extract an environment's parameters and inner content.
///
/// Optional `[…]` parameters are read first, then `mandatory` balanced
/// `{…}` parameters; the returned content starts after the last parameter.
/// A mandatory-parameter shortfall is an error — the block does not match
/// the expected shape.
pub fn extract_environment(
    text: &str,
    name: &str,
    mandatory: usize,
    optional: usize,
) -> Result<(Vec<String>, String)> {
    let span = environment_span(text, name, 0)?;
    let inner = &text[span.content_start..span.content_end];

    let mut params = Vec::new();
    let mut pos = 0usize;

    if optional > 0 {
        let (opts, next) = extract_bracket_params(inner, pos, optional)?;
        params.extend(opts);
        pos = next;
    }
    if mandatory > 0 {
        let (braced, next) = extract_brace_params(inner, pos, mandatory)?;
        if braced.len() < mandatory {
            return Err(Error::EnvironmentNotFound {
                name: name.to_string(),
                detail: format!(
                    "expected {} brace parameters, found {}",
                    mandatory,
                    braced.len()
                ),
            });
        }
        params.extend(braced);
        pos = next;
    }

    Ok((params, inner[pos..].to_string()))
}

/// Find every non-overlapping environment whose name matches `name_pattern`.
///
/// Spans include the `\begin`/`\end` commands so callers can excise the
/// whole block. Matches opening inside an earlier span are skipped.
pub fn find_environments(text: &str, name_pattern: &str) -> Result<Vec<EnvSpan>> {
    let re = begin_regex(name_pattern);
    let mut spans: Vec<EnvSpan> = Vec::new();

    for m in re.captures_iter(text) {
        let whole = m.get(0).expect("match group 0");
        if spans.last().is_some_and(|prev| whole.start() < prev.end) {
            continue;
        }
        let name = m[1].to_string();
        let span = environment_span(text, &name, whole.start())?;
        spans.push(span);
    }

    Ok(spans)
}

/// Render an environment with its argument lists, the inverse of
/// [`extract_environment`].
pub fn format_environment(
    name: &str,
    content: &str,
    optional_args: &[String],
    mandatory_args: &[String],
) -> String {
    let mut opening = literal_marker("begin", name);
    for arg in optional_args {
        opening.push_str(&format!("[{}]", arg));
    }
    for arg in mandatory_args {
        opening.push_str(&format!("{{{}}}", arg));
    }
    format!("{}\n{}\n{}", opening, content, literal_marker("end", name))
}
