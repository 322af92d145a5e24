pub mod reader;
pub mod record;

pub use reader::{read_docs, Document};
pub use record::FieldIndex;

use anyhow::{bail, Result};

/// Doc-id value that disables grouping: every such line is its own document.
pub const SENTINEL_DOCID: &str = "0";

/// Joins sentences inside a packed line.
pub const DEFAULT_SEPARATOR: &str = " <eos>";

// A separator must survive a round trip through a TSV line.
pub fn validate_separator(sep: &str) -> Result<()> {
    if sep.is_empty() {
        bail!("separator must not be empty");
    }
    if sep.contains(['\t', '\n', '\r']) {
        bail!("separator must not contain tabs or line breaks: {:?}", sep);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_rules() {
        assert!(validate_separator(DEFAULT_SEPARATOR).is_ok());
        assert!(validate_separator(" ").is_ok());
        assert!(validate_separator("").is_err());
        assert!(validate_separator("a\tb").is_err());
        assert!(validate_separator("\n").is_err());
    }
}
