use anyhow::Result;

use super::TokenCounter;

/// Counts whitespace-delimited tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceCounter;

impl TokenCounter for WhitespaceCounter {
    fn count(&self, text: &str) -> Result<usize> {
        Ok(text.split_whitespace().count())
    }

    fn name(&self) -> &str { "whitespace" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_runs_of_whitespace_once() {
        let c = WhitespaceCounter;
        assert_eq!(c.count("").unwrap(), 0);
        assert_eq!(c.count("   ").unwrap(), 0);
        assert_eq!(c.count("the cat").unwrap(), 2);
        assert_eq!(c.count("  the \t cat  sat ").unwrap(), 3);
    }
}
