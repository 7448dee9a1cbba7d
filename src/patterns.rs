//! Pattern library: every structural marker recognized by the converter.
//!
//! Single source of truth for document boundaries, page layout markers,
//! environment names, item markers, metadata commands and formatting
//! commands. Consumers reference these constants instead of inlining
//! literals so that the parser and the generator always agree.

use once_cell::sync::Lazy;
use regex::Regex;

// Document boundaries and page breaks.
pub const BEGIN_DOCUMENT: &str = r"\begin{document}";
pub const END_DOCUMENT: &str = r"\end{document}";
pub const CLEARPAGE: &str = r"\clearpage";

// Two-column page layout.
pub const BEGIN_PARACOL: &str = r"\begin{paracol}{2}";
pub const END_PARACOL: &str = r"\end{paracol}";
pub const SWITCHCOLUMN: &str = r"\switchcolumn";

// Section headers. The marker is followed by a balanced-brace name.
pub const SECTION_STAR: &str = r"\section*{";

// Custom environment names used by the style system.
pub const ENV_WORK_EXPERIENCE: &str = "itemizeAcademic";
pub const ENV_PROJECT_DEFAULT: &str = "itemizeAProject";
pub const ENV_PROJECTS_MAIN: &str = "itemizeProjMain";
pub const ENV_CATEGORY_LIST: &str = "itemizeLL";
pub const ENV_PERSONALITY: &str = "itemizeMain";
pub const ENV_ITEMIZE: &str = "itemize";
pub const ENV_LITERAL_BLOCK: &str = "textblock*";

/// Name pattern matching the whole custom `itemize*` environment family.
pub const ITEMIZE_VARIANT: &str = "itemize[A-Za-z]*";

/// Name pattern matching any environment (generic-fallback capture).
pub const ANY_ENVIRONMENT: &str = r"[A-Za-z]+\*?";

// Item marker patterns. Each carries a named `marker` capture group and the
// stored marker never includes the leading backslash.
pub const ITEM_ALPHABETIC: &str = r"\\(?P<marker>item[A-Za-z]*)";
pub const ITEM_LEVEL_ONE: &str = r"\\(?P<marker>itemi+)\b";
pub const ITEM_ANY: &str = r"\\(?P<marker>item(?:\[[^\]]*\])?[A-Za-z]*)";

// Metadata command field names (`\renewcommand{\<name>}{…}` assignments).
pub const META_NAME: &str = "myname";
pub const META_DATE: &str = "mydate";
pub const META_BRAND: &str = "brand";
pub const META_PROFILE: &str = "ProfessionalProfile";

/// Color fields, extracted into the colors map rather than generic fields.
pub const COLOR_FIELDS: [&str; 5] = [
    "emphcolor",
    "topbarcolor",
    "leftbarcolor",
    "brandcolor",
    "namecolor",
];

// Page decoration commands (absolutely positioned, removed before section
// parsing and re-emitted on generation).
pub const DECORATION_COMMANDS: [&str; 3] = ["leftgrad", "bottombar", "topgradtri"];

/// Content marker distinguishing an education body from a category list.
pub const EDUCATION_INSTITUTION: &str = "University";

// Formatting command names handled by the plaintext/markdown strippers.
pub const WRAP_COMMANDS: [&str; 8] = [
    "textbf",
    "textit",
    "emph",
    "underline",
    "texttt",
    "scshape",
    "coloremph",
    "textnormal",
];
pub const BARE_COMMANDS: [&str; 4] = ["centering", "par", "nolinebreak", "nopagebreak"];

// Structural signals used by type inference.
pub const BEGIN_ITEMIZE_EXACT: &str = r"\begin{itemize}";
pub const SETLENGTH: &str = r"\setlength";
pub const BASELINESKIP: &str = r"\baselineskip";
pub const SCSHAPE: &str = r"\scshape";

pub static ITEM_BRACKETED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\item\[").expect("valid item pattern"));

/// `\renewcommand{\<field>}` with the field name captured.
pub static RENEWCOMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\renewcommand\{\\([A-Za-z]+)\}").expect("valid pattern"));

/// `\setlength{\<param>}{<value>}` in the preamble.
pub static SETLENGTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\setlength\{\\([A-Za-z]+)\}\{([^}]*)\}").expect("valid pattern"));

/// `\sethlcolor{<color>}`.
pub static SETHLCOLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\sethlcolor\{([^}]*)\}").expect("valid pattern"));

/// `\def\nlinesPP{<n>}` — line count of the profile block.
pub static NLINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\def\\nlinesPP\{(\d+)\}").expect("valid pattern"));

/// `\clearpage` and the whitespace that follows it, for page splitting.
pub static CLEARPAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\clearpage\s*").expect("valid pattern"));

/// Trailing `\vspace{…}` at the end of a section body.
pub static TRAILING_VSPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\vspace\{([^}]*)\}\s*\z").expect("valid pattern"));

/// `\begin{textblock*}{width}(x, y)` with both arguments captured.
pub static TEXTBLOCK_ARGS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\begin\{textblock\*\}\{([^}]*)\}\(([^)]*)\)").expect("valid pattern"));

/// Simple single-level `{…}` groups, for decoration argument lists.
pub static SIMPLE_BRACES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]*)\}").expect("valid pattern"));

/// A decoration command with its argument list, e.g. `\leftgrad{a}{b}{c}`.
pub fn decoration_regex(command: &str) -> Regex {
    Regex::new(&format!(r"\\{}(?:\{{[^}}]*\}})+", regex::escape(command))).expect("valid pattern")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renewcommand_captures_field() {
        let caps = RENEWCOMMAND_RE
            .captures(r"\renewcommand{\myname}{\textbf{A B}}")
            .unwrap();
        assert_eq!(&caps[1], "myname");
    }

    #[test]
    fn test_item_markers() {
        let re = Regex::new(ITEM_ALPHABETIC).unwrap();
        let caps = re.captures(r"\itemii stuff").unwrap();
        assert_eq!(&caps["marker"], "itemii");

        let re = Regex::new(ITEM_LEVEL_ONE).unwrap();
        assert!(re.is_match(r"\itemi x"));
        assert!(!re.is_match(r"\item[icon] x"));
    }

    #[test]
    fn test_decoration_regex_matches_all_args() {
        let re = decoration_regex("leftgrad");
        let m = re
            .find(r"before \leftgrad{\leftbarwidth}{60pt}{0.4\paperheight} after")
            .unwrap();
        assert!(m.as_str().ends_with(r"{0.4\paperheight}"));
    }

    #[test]
    fn test_textblock_args() {
        let caps = TEXTBLOCK_ARGS_RE
            .captures(r"\begin{textblock*}{190mm}(10mm, 263mm)")
            .unwrap();
        assert_eq!(&caps[1], "190mm");
        assert_eq!(&caps[2], "10mm, 263mm");
    }
}
