use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tokenizers::Tokenizer;

use super::TokenCounter;

/// Sub-word piece counter backed by a HuggingFace `tokenizer.json`.
#[derive(Debug, Clone)]
pub struct SubwordCounter {
    inner: Tokenizer,
    name: String,
}

impl SubwordCounter {
    /// `spec` is either a path to a `tokenizer.json` or a hub model id
    /// (e.g. `bert-base-cased`).
    pub fn load(spec: &str) -> Result<Self> {
        let path = Path::new(spec);
        let looks_like_file = path.exists()
            || path.extension().is_some_and(|e| e == "json")
            || spec.starts_with('.')
            || spec.starts_with('/');

        let tok = if looks_like_file {
            Tokenizer::from_file(path)
                .map_err(|e| anyhow!("{}", e))
                .with_context(|| format!("load tokenizer file {}", path.display()))?
        } else {
            Tokenizer::from_pretrained(spec, None)
                .map_err(|e| anyhow!("{}", e))
                .with_context(|| format!("load pretrained tokenizer {spec}"))?
        };

        Ok(Self::from_tokenizer(tok, spec))
    }

    pub fn from_tokenizer(inner: Tokenizer, name: impl Into<String>) -> Self {
        Self { inner, name: name.into() }
    }
}

impl TokenCounter for SubwordCounter {
    // no special tokens: the packer adds its own terminator unit per sentence
    fn count(&self, text: &str) -> Result<usize> {
        let enc = self.inner
            .encode(text, false)
            .map_err(|e| anyhow!("{}", e))?;
        Ok(enc.get_ids().len())
    }

    fn name(&self) -> &str { &self.name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenizers::models::wordlevel::WordLevel;
    use tokenizers::pre_tokenizers::whitespace::Whitespace;

    fn word_level() -> Tokenizer {
        let vocab = [("[UNK]", 0), ("the", 1), ("cat", 2), (".", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let model = WordLevel::builder()
            .vocab(vocab)
            .unk_token("[UNK]".to_string())
            .build()
            .unwrap();
        let mut tok = Tokenizer::new(model);
        tok.with_pre_tokenizer(Some(Whitespace {}));
        tok
    }

    #[test]
    fn counts_pieces_not_words() {
        let c = SubwordCounter::from_tokenizer(word_level(), "test");
        // Whitespace pre-tokenizer splits punctuation into its own piece
        assert_eq!(c.count("the cat.").unwrap(), 3);
        assert_eq!(c.count("").unwrap(), 0);
        assert_eq!(c.name(), "test");
    }

    #[test]
    fn loads_from_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        word_level().save(&path, false).unwrap();

        let c = SubwordCounter::load(path.to_str().unwrap()).unwrap();
        assert_eq!(c.count("the dog").unwrap(), 2);
    }
}
