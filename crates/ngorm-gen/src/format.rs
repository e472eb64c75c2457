//! Formatting of generated source.

use thiserror::Error;

/// Formatting failed; the caller falls back to the raw text.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("generated code does not parse: {0}")]
    Syntax(#[from] syn::Error),
}

/// Turns raw generated text into its final layout.
pub trait Formatter {
    fn format(&self, raw: &str) -> Result<String, FormatError>;
}

/// `prettyplease`-backed formatter. Leading `//` comment lines are kept
/// verbatim since the syntax tree does not carry them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyFormatter;

impl Formatter for PrettyFormatter {
    fn format(&self, raw: &str) -> Result<String, FormatError> {
        let (banner, body) = split_banner(raw);
        let file = syn::parse_file(body)?;
        let pretty = prettyplease::unparse(&file);

        let mut out = String::with_capacity(banner.len() + pretty.len() + 1);
        if !banner.is_empty() {
            out.push_str(banner);
            out.push('\n');
        }
        out.push_str(&pretty);
        Ok(out)
    }
}

/// Leaves the text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFormatter;

impl Formatter for RawFormatter {
    fn format(&self, raw: &str) -> Result<String, FormatError> {
        Ok(raw.to_string())
    }
}

/// Split off the leading run of `//` lines (with their newlines).
fn split_banner(raw: &str) -> (&str, &str) {
    let mut end = 0;
    for line in raw.split_inclusive('\n') {
        if !line.starts_with("//") || line.starts_with("///") || line.starts_with("//!") {
            break;
        }
        end += line.len();
    }
    raw.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_banner() {
        let (banner, body) = split_banner("// a\n// b\n\nfn x() {}\n");
        assert_eq!(banner, "// a\n// b\n");
        assert_eq!(body, "\nfn x() {}\n");

        let (banner, body) = split_banner("/// doc\nfn x() {}");
        assert_eq!(banner, "");
        assert_eq!(body, "/// doc\nfn x() {}");
    }

    #[test]
    fn test_pretty_keeps_banner() {
        let raw = "// Code generated by \"ngormgen\"; DO NOT EDIT.\n\nfn   x ( ) -> i32 { 1 }";
        let out = PrettyFormatter.format(raw).unwrap();
        assert!(out.starts_with("// Code generated by \"ngormgen\"; DO NOT EDIT.\n\n"));
        assert!(out.contains("fn x() -> i32 {\n    1\n}"));
    }

    #[test]
    fn test_pretty_rejects_invalid_code() {
        assert!(PrettyFormatter.format("// x\nfn (").is_err());
    }

    #[test]
    fn test_raw_is_identity() {
        assert_eq!(RawFormatter.format("fn   x(){}").unwrap(), "fn   x(){}");
    }
}
