//! Formatting options and the format pragma
//!
//! Options deserialize from configuration files (see [`crate::gridfmt::config`])
//! and serialize for inspection output, so every field has a stable camelCase
//! name and a default matching the stock formatter behavior.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Knobs controlling a format run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// Target line width the layout engine breaks against
    pub print_width: usize,
    /// Spaces added per indentation level
    pub indent_width: usize,
    /// Where trailing commas are emitted in broken lists
    pub trailing_comma: TrailingComma,
    /// Leave files without a format pragma untouched
    pub require_pragma: bool,
    /// Prepend a format pragma to files that lack one
    pub insert_pragma: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            print_width: 80,
            indent_width: 2,
            trailing_comma: TrailingComma::All,
            require_pragma: false,
            insert_pragma: false,
        }
    }
}

/// Trailing comma policy for broken array and argument lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingComma {
    /// Trailing commas everywhere, including call arguments
    All,
    /// Trailing commas where pre-ES2017 engines accept them (arrays, not
    /// call arguments)
    Es5,
    /// No trailing commas
    None,
}

impl TrailingComma {
    /// Whether a broken array literal gets a trailing comma
    pub fn in_arrays(&self) -> bool {
        matches!(self, TrailingComma::All | TrailingComma::Es5)
    }

    /// Whether a broken call argument list gets a trailing comma
    pub fn in_call_arguments(&self) -> bool {
        matches!(self, TrailingComma::All)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrailingComma::All => "all",
            TrailingComma::Es5 => "es5",
            TrailingComma::None => "none",
        }
    }
}

impl fmt::Display for TrailingComma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrailingComma {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TrailingComma::All),
            "es5" => Ok(TrailingComma::Es5),
            "none" => Ok(TrailingComma::None),
            other => Err(format!(
                "unknown trailing comma policy {:?} (expected all, es5 or none)",
                other
            )),
        }
    }
}

/// Lazy-compiled regex matching a format pragma token inside a comment
static PRAGMA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"@(?:format|gridfmt)\b").unwrap());

/// Whether the leading comment block of the source carries a format pragma
/// (`@format` or `@gridfmt`). Only comments before the first statement count.
pub fn has_format_pragma(source: &str) -> bool {
    PRAGMA_REGEX.is_match(leading_comments(source))
}

/// Prepend a format pragma comment. The caller checks the pragma is absent.
pub fn insert_format_pragma(source: &str) -> String {
    format!("/** @format */\n\n{}", source)
}

/// The run of whitespace and comments at the very start of the source
fn leading_comments(source: &str) -> &str {
    let mut rest = source;
    loop {
        let trimmed = rest.trim_start();
        if let Some(after) = trimmed.strip_prefix("//") {
            let line_end = after.find('\n').map(|i| i + 1).unwrap_or(after.len());
            rest = &after[line_end..];
        } else if let Some(after) = trimmed.strip_prefix("/*") {
            match after.find("*/") {
                Some(end) => rest = &after[end + 2..],
                None => break,
            }
        } else {
            rest = trimmed;
            break;
        }
    }
    &source[..source.len() - rest.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FormatOptions::default();
        assert_eq!(options.print_width, 80);
        assert_eq!(options.indent_width, 2);
        assert_eq!(options.trailing_comma, TrailingComma::All);
        assert!(!options.require_pragma);
        assert!(!options.insert_pragma);
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let options: FormatOptions =
            serde_json::from_str(r#"{"printWidth": 100, "trailingComma": "none"}"#)
                .expect("options should deserialize");
        assert_eq!(options.print_width, 100);
        assert_eq!(options.trailing_comma, TrailingComma::None);
        assert_eq!(options.indent_width, 2);
    }

    #[test]
    fn test_trailing_comma_policies() {
        assert!(TrailingComma::All.in_arrays());
        assert!(TrailingComma::All.in_call_arguments());
        assert!(TrailingComma::Es5.in_arrays());
        assert!(!TrailingComma::Es5.in_call_arguments());
        assert!(!TrailingComma::None.in_arrays());
        assert!(!TrailingComma::None.in_call_arguments());
    }

    #[test]
    fn test_trailing_comma_from_str() {
        assert_eq!("all".parse::<TrailingComma>(), Ok(TrailingComma::All));
        assert_eq!("es5".parse::<TrailingComma>(), Ok(TrailingComma::Es5));
        assert_eq!("none".parse::<TrailingComma>(), Ok(TrailingComma::None));
        assert!("sometimes".parse::<TrailingComma>().is_err());
    }

    #[test]
    fn test_pragma_detected_in_leading_block_comment() {
        assert!(has_format_pragma("/** @format */\n[1, 2]\n"));
        assert!(has_format_pragma("/**\n * @gridfmt\n */\nconst x = [];\n"));
    }

    #[test]
    fn test_pragma_detected_in_leading_line_comment() {
        assert!(has_format_pragma("// @format\n[1, 2]\n"));
    }

    #[test]
    fn test_pragma_after_code_is_ignored() {
        assert!(!has_format_pragma("[1, 2]\n// @format\n"));
    }

    #[test]
    fn test_pragma_token_requires_word_boundary() {
        assert!(!has_format_pragma("// @formatter\n[1]\n"));
    }

    #[test]
    fn test_insert_pragma_prepends_comment() {
        let updated = insert_format_pragma("[1, 2]\n");
        assert_eq!(updated, "/** @format */\n\n[1, 2]\n");
        assert!(has_format_pragma(&updated));
    }
}
