pub mod config;
pub mod logic;
pub mod packer;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead, BufWriter, Write};
use std::time::Instant;

use crate::corpus::{read_docs, FieldIndex, DEFAULT_SEPARATOR};
use crate::output::types::Meta;
use crate::telemetry::{self};
use crate::telemetry::ops::pack::Phase as PackPhase;
use crate::tokenizer::{self as tok, TokenCounter};
use crate::util::io::open_input;

use self::config::{Mode, PackConfig, DEFAULT_MAX_TOKENS};
use self::packer::{LineCursor, Packer};

pub const TOKENIZER_ENV: &str = "DOCPACK_TOKENIZER";

/// Regroup sentences into document-aware windows (default) or chunks.
#[derive(Args, Debug)]
pub struct PackCmd {
    /// Input file; `-` reads stdin, `*.gz` is decompressed
    #[arg(default_value = "-")]
    infile: String,
    /// Maximum tokens in the entire line (0 disables the cap with --chunk)
    #[arg(short = 't', long, value_name = "T", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: usize,
    /// Maximum sentences of context (unbounded when unset)
    #[arg(short = 'c', long, value_name = "N")]
    max_sents: Option<usize>,
    /// Sub-word tokenizer: a tokenizer.json path or a hub model id
    #[arg(short = 'm', long, value_name = "SPEC")]
    tokenizer: Option<String>,
    /// Chunk documents instead of applying a sliding window
    #[arg(long, default_value_t = false)]
    chunk: bool,
    /// Field containing the doc ID; negative counts from the end
    #[arg(short = 'f', long, value_name = "F", default_value_t = -1, allow_negative_numbers = true)]
    docid_field: i64,
    /// Separator placed between sentences of a packed line
    #[arg(short = 's', long, default_value = DEFAULT_SEPARATOR, allow_hyphen_values = true)]
    separator: String,
}

impl PackCmd {
    pub fn to_config(&self) -> Result<PackConfig> {
        let cfg = PackConfig {
            mode: if self.chunk { Mode::Chunk } else { Mode::Window },
            max_tokens: self.max_tokens,
            max_sents: self.max_sents,
            separator: self.separator.clone(),
            docid_field: FieldIndex(self.docid_field),
            tokenizer: self.tokenizer.clone().or_else(|| std::env::var(TOKENIZER_ENV).ok()),
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PackStats {
    pub documents: usize,
    pub records: usize,
    pub emitted: usize,
    pub oversized: usize,
    pub longest_document: usize,
}

pub fn run(args: PackCmd, report: bool) -> Result<()> {
    let t0 = Instant::now();
    let log = telemetry::pack();
    let _g = log.root_span_kv([
        ("infile", args.infile.clone()),
        ("max_tokens", args.max_tokens.to_string()),
        ("max_sents", format!("{:?}", args.max_sents)),
        ("chunk", args.chunk.to_string()),
        ("docid_field", args.docid_field.to_string()),
        ("separator", format!("{:?}", args.separator)),
    ]).entered();

    // configuration problems surface before any input is read
    let _s = log.span(&PackPhase::Validate).entered();
    let cfg = args.to_config()?;
    drop(_s);

    let _s = log.span(&PackPhase::LoadTokenizer).entered();
    let counter = tok::from_spec(cfg.tokenizer.as_deref()).context("init tokenizer")?;
    drop(_s);
    log.info_kv("tokenizer ready", [("tokenizer", counter.name().to_string())]);

    let _s = log.span(&PackPhase::OpenInput).entered();
    let input = open_input(&args.infile)?;
    drop(_s);

    let _s = log.span(&PackPhase::Process).entered();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = pack_stream(input, &mut out, &cfg, counter.as_ref())?;
    out.flush().context("flush output")?;
    drop(_s);

    log.totals(stats.documents, stats.records, stats.emitted, stats.oversized);
    if stats.oversized > 0 {
        log.warn(format!("{} line(s) hold a single sentence over max_tokens={}", stats.oversized, cfg.max_tokens));
    }

    if report {
        #[derive(Serialize)]
        struct PackReport<'a> { config: &'a PackConfig, tokenizer: &'a str, stats: &'a PackStats }
        let rep = PackReport { config: &cfg, tokenizer: counter.name(), stats: &stats };
        log.result(&rep, Some(Meta::elapsed(t0)))?;
    }
    Ok(())
}

/// Read documents from `input`, pack each one, and write TSV lines to `out`.
pub fn pack_stream<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    cfg: &PackConfig,
    counter: &dyn TokenCounter,
) -> Result<PackStats> {
    let log = telemetry::pack();
    let packer = Packer::new(cfg, counter);
    let mut cursor = LineCursor::start();
    let mut stats = PackStats::default();

    for doc in read_docs(input, cfg.docid_field) {
        let doc = doc?;
        let (lines, next) = packer.pack(&doc, cursor)?;
        cursor = next;

        let mut oversized = 0usize;
        for line in &lines {
            writeln!(out, "{}", line).context("write output")?;
            if line.oversized { oversized += 1; }
        }
        log.document(doc.first_line, &doc.label, doc.len(), lines.len(), oversized);

        stats.documents += 1;
        stats.records += doc.len();
        stats.emitted += lines.len();
        stats.oversized += oversized;
        stats.longest_document = stats.longest_document.max(doc.len());
    }

    Ok(stats)
}
