use anyhow::{Context, Result};
use std::fmt;

use crate::corpus::Document;
use crate::tokenizer::TokenCounter;

use super::config::{Mode, PackConfig};
use super::logic::{Chunks, SlidingWindows, Span};

/// Run-wide 1-based output line counter. Owned by the driver and threaded
/// through [`Packer::pack`]; it carries across documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCursor(usize);

impl LineCursor {
    pub fn start() -> Self { Self(1) }

    pub fn line(self) -> usize { self.0 }

    pub fn advance(self, n: usize) -> Self { Self(self.0 + n) }
}

impl Default for LineCursor {
    fn default() -> Self { Self::start() }
}

/// One emitted window or chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedLine {
    pub docid: String,
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
    // a lone sentence that is over the token budget on its own
    pub oversized: bool,
}

impl fmt::Display for PackedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.docid, self.start_line, self.end_line, self.text)
    }
}

enum Spans<'a> {
    Window(SlidingWindows<'a>),
    Chunk(Chunks<'a>),
}

impl Iterator for Spans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        match self {
            Spans::Window(w) => w.next(),
            Spans::Chunk(c) => c.next(),
        }
    }
}

pub struct Packer<'a> {
    cfg: &'a PackConfig,
    counter: &'a dyn TokenCounter,
}

impl<'a> Packer<'a> {
    pub fn new(cfg: &'a PackConfig, counter: &'a dyn TokenCounter) -> Self {
        Self { cfg, counter }
    }

    /// Per-sentence token lengths, each including one terminator unit.
    pub fn measure(&self, doc: &Document) -> Result<Vec<usize>> {
        doc.texts()
            .enumerate()
            .map(|(i, text)| {
                self.counter
                    .count(text)
                    .map(|n| n + 1)
                    .with_context(|| format!("tokenize input line {}", doc.first_line + i))
            })
            .collect()
    }

    /// Pack one document starting at `cursor`; returns its lines and the
    /// cursor for the next document.
    pub fn pack(&self, doc: &Document, cursor: LineCursor) -> Result<(Vec<PackedLine>, LineCursor)> {
        let lens = self.measure(doc)?;
        let texts: Vec<&str> = doc.texts().collect();
        let budget = self.cfg.budget();

        let spans = match self.cfg.mode {
            Mode::Window => Spans::Window(SlidingWindows::new(&lens, budget)),
            Mode::Chunk => Spans::Chunk(Chunks::new(&lens, budget)),
        };

        let base = cursor.line();
        let lines = spans
            .map(|span| {
                let tokens: usize = lens[span.range()].iter().sum();
                PackedLine {
                    docid: doc.label.clone(),
                    start_line: base + span.start,
                    end_line: base + span.end,
                    text: texts[span.range()].join(self.cfg.separator.as_str()),
                    oversized: span.len() == 1 && self.cfg.max_tokens != 0 && tokens > self.cfg.max_tokens,
                }
            })
            .collect();

        Ok((lines, cursor.advance(doc.len())))
    }
}
