use anyhow::{Context, Result};
use serde::Serialize;

use crate::corpus::{validate_separator, FieldIndex};

use super::logic::Budget;

pub const DEFAULT_MAX_TOKENS: usize = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// one line per sentence, with preceding context
    Window,
    /// non-overlapping partitions of each document
    Chunk,
}

/// Validated settings for one `pack` run.
#[derive(Debug, Clone, Serialize)]
pub struct PackConfig {
    pub mode: Mode,
    pub max_tokens: usize,
    pub max_sents: Option<usize>,
    pub separator: String,
    pub docid_field: FieldIndex,
    pub tokenizer: Option<String>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Window,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_sents: None,
            separator: crate::corpus::DEFAULT_SEPARATOR.to_string(),
            docid_field: FieldIndex::LAST,
            tokenizer: None,
        }
    }
}

impl PackConfig {
    pub fn validate(&self) -> Result<()> {
        validate_separator(&self.separator).context("invalid --separator")?;
        if let Some(t) = self.tokenizer.as_deref() {
            anyhow::ensure!(!t.trim().is_empty(), "--tokenizer must not be blank");
        }
        Ok(())
    }

    pub fn budget(&self) -> Budget {
        Budget { max_tokens: self.max_tokens, max_sents: self.max_sents }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = PackConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.separator, " <eos>");
        assert_eq!(cfg.docid_field, FieldIndex(-1));
        assert_eq!(cfg.budget(), Budget { max_tokens: 250, max_sents: None });
    }

    #[test]
    fn rejects_bad_separator_and_blank_tokenizer() {
        let cfg = PackConfig { separator: String::new(), ..Default::default() };
        assert!(cfg.validate().is_err());

        let cfg = PackConfig { tokenizer: Some("  ".into()), ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
