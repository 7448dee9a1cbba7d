//! Property tests for the formatting strippers.

use proptest::prelude::*;
use retex::extract::{to_markdown, to_plaintext};

/// Realistic formatted fragments: the vocabulary the corpus actually
/// uses, composed randomly.
fn formatted_fragment() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("plain words".to_string()),
        Just(r"\textbf{bold run}".to_string()),
        Just(r"\textit{italic run}".to_string()),
        Just(r"\texttt{mono_run}".to_string()),
        Just(r"\coloremph{emphasized}".to_string()),
        Just(r"{PyTorch}".to_string()),
        Just(r"40\% faster".to_string()),
        Just(r"\$2M saved".to_string()),
        Just(r"A \& B".to_string()),
        Just(r"1 $\to$ 64 nodes".to_string()),
        Just(r"$\geq$ 99.9".to_string()),
        Just(r"first\\second".to_string()),
        Just(r"\vspace{4pt}".to_string()),
        Just(r"\centering".to_string()),
        Just(r"\hfill 2021".to_string()),
        Just(r"\href{https://example.com}{linked text}".to_string()),
        Just(r"\color{red}{warm}".to_string()),
    ];
    prop::collection::vec(piece, 1..6).prop_map(|pieces| pieces.join(" "))
}

proptest! {
    /// Stripping twice equals stripping once.
    #[test]
    fn plaintext_is_idempotent(fragment in formatted_fragment()) {
        let once = to_plaintext(&fragment);
        let twice = to_plaintext(&once);
        prop_assert_eq!(once, twice);
    }

    /// The output carries no recognized command syntax.
    #[test]
    fn plaintext_has_no_command_syntax(fragment in formatted_fragment()) {
        let plain = to_plaintext(&fragment);
        prop_assert!(!plain.contains(r"\textbf"));
        prop_assert!(!plain.contains(r"\texttt"));
        prop_assert!(!plain.contains(r"\vspace"));
        prop_assert!(!plain.contains('$'));
    }

    /// Whitespace is always collapsed and trimmed.
    #[test]
    fn plaintext_is_whitespace_normal(fragment in formatted_fragment()) {
        let plain = to_plaintext(&fragment);
        prop_assert!(!plain.contains("  "));
        prop_assert_eq!(plain.trim(), plain.as_str());
    }

    /// Rich mode never emits backslash commands either.
    #[test]
    fn markdown_has_no_backslash_commands(fragment in formatted_fragment()) {
        let rich = to_markdown(&fragment);
        prop_assert!(!rich.contains('\\'));
    }
}

#[test]
fn plaintext_known_conversions() {
    assert_eq!(
        to_plaintext(r"\textbf{Cut} costs 40\% (\$500K)"),
        "Cut costs 40% (500K)"
    );
    assert_eq!(to_plaintext(r"Scaled 1 $\to$ 64 nodes"), "Scaled 1 to 64 nodes");
    assert_eq!(to_plaintext(r"{JAX}/{Equinox}"), "JAX/Equinox");
}

#[test]
fn markdown_known_conversions() {
    assert_eq!(
        to_markdown(r"\textbf{Bold} and \texttt{mono} and \textit{slanted}"),
        "**Bold** and `mono` and *slanted*"
    );
    assert_eq!(
        to_markdown(r"\href{https://example.com}{repo} link"),
        "repo link"
    );
}
