//! Formatting-stripping and text normalization.
//!
//! [`to_plaintext`] is total and deterministic: whatever the input, it
//! returns the best plain rendition it can and never fails. Unrecognized
//! commands are dropped by the generic command rules at the end.

use once_cell::sync::Lazy;
use regex::Regex;

use super::balanced::extract_balanced;
use crate::patterns::{BARE_COMMANDS, WRAP_COMMANDS};

static COLOR_WITH_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\color\{[^}]+\}\{([^}]*)\}").expect("valid pattern"));
static COLOR_STANDALONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\color\{[^}]+\}").expect("valid pattern"));
static SPACING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[vh]space\{[^}]*\}").expect("valid pattern"));
static COMMAND_WITH_ARG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[a-zA-Z]+\{[^}]*\}").expect("valid pattern"));
static COMMAND_KEEP_ARG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[a-zA-Z]+\{([^}]+)\}").expect("valid pattern"));
static BARE_COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[a-zA-Z]+").expect("valid pattern"));
static OPTION_BRACKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*=[^\]]*\]").expect("valid pattern"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid pattern"));

/// Math-mode and symbol commands with plaintext equivalents.
///
/// `$\to$` is handled before the bare commands so "1 $\to$ 64" reads
/// "1 to 64" rather than "1 -> 64".
const MATH_SYMBOLS: [(&str, &str); 12] = [
    (r"$\to$", " to "),
    (r"\to", "->"),
    (r"\rightarrow", "->"),
    (r"\leftarrow", "<-"),
    (r"\leq", "<="),
    (r"\geq", ">="),
    (r"\neq", "!="),
    (r"\sim", "~"),
    (r"\approx", "≈"),
    (r"\texttimes", "×"),
    (r"\times", "×"),
    (r"\textonehalf", "half"),
];

/// Escaped characters and spacing commands with literal equivalents.
const ESCAPED_CHARS: [(&str, &str); 10] = [
    (r"\%", "%"),
    (r"\$", "$"),
    (r"\&", "&"),
    (r"\#", "#"),
    (r"\_", "_"),
    (r"\ ", " "),
    (r"\;", " "),
    (r"\,", " "),
    (r"\:", " "),
    (r"\!", ""),
];

/// Replace every `\command{…}` with `prefix + content + suffix`.
///
/// Content braces are matched with balanced scanning, so nested commands
/// survive intact. Unmatched occurrences are left alone.
pub fn replace_command(text: &str, command: &str, prefix: &str, suffix: &str) -> String {
    let needle = format!("\\{}{{", command);
    let mut result = text.to_string();

    while let Some(pos) = result.find(&needle) {
        let brace_pos = pos + needle.len();
        match extract_balanced(&result, '{', '}', brace_pos) {
            Ok((content, end)) => {
                result = format!(
                    "{}{}{}{}{}",
                    &result[..pos],
                    prefix,
                    content,
                    suffix,
                    &result[end..]
                );
            }
            Err(_) => break,
        }
    }
    result
}

/// Strip a single-argument wrapper command, keeping its argument.
/// No-op when the command is absent.
pub fn unwrap_command(text: &str, command: &str) -> String {
    replace_command(text, command, "", "")
}

/// Remove argument-less commands (and their trailing whitespace) entirely.
pub fn strip_commands(text: &str, commands: &[&str]) -> String {
    let mut result = text.to_string();
    for command in commands {
        let re =
            Regex::new(&format!(r"\\{}\b\s*", regex::escape(command))).expect("valid pattern");
        result = re.replace_all(&result, "").into_owned();
    }
    result
}

/// Replace `\href{url}{text}` with the display text, dropping the URL.
fn strip_href(text: &str) -> String {
    let mut result = text.to_string();

    while let Some(pos) = result.find(r"\href{") {
        let url_start = pos + r"\href{".len();
        let Ok((_, url_end)) = extract_balanced(&result, '{', '}', url_start) else {
            break;
        };
        if result.as_bytes().get(url_end) != Some(&b'{') {
            break;
        }
        let Ok((display, text_end)) = extract_balanced(&result, '{', '}', url_end + 1) else {
            break;
        };
        result = format!(
            "{}{}{}",
            &result[..pos],
            display.trim(),
            &result[text_end..]
        );
    }
    result
}

/// Strip every recognized formatting command, returning pure plaintext.
///
/// Wrapper commands are unwrapped, symbol escapes become their semantic
/// equivalents, remaining commands are dropped, grouping braces are
/// removed (escaped braces become literals) and whitespace collapses.
///
/// # Example
///
/// ```
/// use retex::extract::to_plaintext;
///
/// assert_eq!(
///     to_plaintext(r"\centering \textbf{Bold text}\par"),
///     "Bold text"
/// );
/// assert_eq!(to_plaintext(r"{PyTorch} and {NumPy}"), "PyTorch and NumPy");
/// ```
pub fn to_plaintext(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = strip_href(text);

    for wrapper in WRAP_COMMANDS {
        result = unwrap_command(&result, wrapper);
    }

    result = COLOR_WITH_TEXT_RE.replace_all(&result, "$1").into_owned();
    result = COLOR_STANDALONE_RE.replace_all(&result, "").into_owned();
    result = strip_commands(&result, &BARE_COMMANDS);
    result = SPACING_RE.replace_all(&result, "").into_owned();

    // Line breaks read as plain spaces.
    result = result.replace(r"\\", " ");

    for (latex, replacement) in MATH_SYMBOLS {
        result = result.replace(latex, replacement);
    }
    for (escaped, replacement) in ESCAPED_CHARS {
        result = result.replace(escaped, replacement);
    }
    result = result.replace('$', "");

    result = COMMAND_WITH_ARG_RE.replace_all(&result, "").into_owned();
    result = BARE_COMMAND_RE.replace_all(&result, "").into_owned();
    result = OPTION_BRACKET_RE.replace_all(&result, "").into_owned();

    // Grouping braces go away; escaped braces survive as literals.
    result = result.replace(r"\{", "\u{1}").replace(r"\}", "\u{2}");
    result = result.replace(['{', '}'], "");
    result = result.replace('\u{1}', "{").replace('\u{2}', "}");

    WHITESPACE_RE.replace_all(&result, " ").trim().to_string()
}

/// Convert formatting commands to their markdown equivalents, stripping
/// whatever has no counterpart. The rich-mode sibling of
/// [`to_plaintext`].
pub fn to_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = replace_command(text, "textbf", "**", "**");
    result = replace_command(&result, "coloremph", "**", "**");
    result = replace_command(&result, "textit", "*", "*");
    result = replace_command(&result, "texttt", "`", "`");
    result = strip_href(&result);

    result = result.replace(r"\texttimes", "×");
    result = result.replace(r"\\", " ");
    result = COLOR_STANDALONE_RE.replace_all(&result, "").into_owned();
    result = strip_commands(&result, &BARE_COMMANDS);
    result = result.replace(r"\hfill", "");

    result = COMMAND_KEEP_ARG_RE.replace_all(&result, "$1").into_owned();
    result = result.replace(['{', '}'], "");
    result = result.replace('\\', "");

    WHITESPACE_RE.replace_all(&result, " ").trim().to_string()
}

/// Escape plain text for safe injection into markup, the inverse
/// direction of [`to_plaintext`].
pub fn escape_latex(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Backslashes first, via placeholder so the inserted braces survive
    // the brace escaping below.
    let mut result = text.replace('\\', "\u{1}");
    result = result.replace('%', r"\%");
    result = result.replace('$', r"\$");
    result = result.replace('&', r"\&");
    result = result.replace('_', r"\_");
    result = result.replace('#', r"\#");
    result = result.replace('{', r"\{");
    result = result.replace('}', r"\}");
    result = result.replace('~', r"\textasciitilde{}");
    result = result.replace('^', r"\textasciicircum{}");
    result.replace('\u{1}', r"\textbackslash{}")
}

/// Cap runs of blank lines at `max` consecutive occurrences.
pub fn collapse_blank_lines(text: &str, max: usize) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blanks = 0usize;

    for line in text.lines() {
        if line.trim().is_empty() {
            blanks += 1;
            if blanks <= max {
                lines.push("");
            }
        } else {
            blanks = 0;
            lines.push(line);
        }
    }

    let mut result = lines.join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// Remove trailing whitespace from every line.
pub fn strip_trailing_whitespace(text: &str) -> String {
    let mut result = text
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }
    result
}
