pub mod subword;
pub mod whitespace;

use anyhow::Result;

pub use subword::SubwordCounter;
pub use whitespace::WhitespaceCounter;

/// Maps a string to a count of atomic units (words or sub-word pieces).
///
/// Budget accounting in the packer only ever needs the count, never the ids,
/// so this is the whole surface a tokenizer has to provide.
pub trait TokenCounter {
    fn count(&self, text: &str) -> Result<usize>;

    // label used in logs and the run report
    fn name(&self) -> &str;
}

/// Build the counter selected by `--tokenizer` / `DOCPACK_TOKENIZER`.
/// `None` keeps the whitespace default.
pub fn from_spec(spec: Option<&str>) -> Result<Box<dyn TokenCounter>> {
    match spec {
        None => Ok(Box::new(WhitespaceCounter)),
        Some(s) if s.eq_ignore_ascii_case("whitespace") => Ok(Box::new(WhitespaceCounter)),
        Some(s) => Ok(Box::new(SubwordCounter::load(s)?)),
    }
}
