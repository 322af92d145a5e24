use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead, BufWriter, Write};
use std::time::Instant;

use crate::corpus::{validate_separator, DEFAULT_SEPARATOR};
use crate::output::types::Meta;
use crate::telemetry;
use crate::telemetry::ops::extract::Phase as ExtractPhase;
use crate::util::io::open_input;

/// Pull single sentences back out of packed lines.
///
/// With `--index` every line uses the same position; without it the index is
/// read from the line's first field (`index TAB packed`). `--proportional`
/// expects `source TAB target` and slices the target instead.
#[derive(Args, Debug)]
pub struct ExtractCmd {
    /// Input file; `-` reads stdin, `*.gz` is decompressed
    #[arg(default_value = "-")]
    infile: String,
    /// Sentence index to extract; read from the first field when unset
    #[arg(short = 'i', long, allow_negative_numbers = true)]
    index: Option<i64>,
    #[arg(short = 's', long, default_value = DEFAULT_SEPARATOR, allow_hyphen_values = true)]
    separator: String,
    /// Expects source TAB target
    #[arg(long, default_value_t = false, conflicts_with = "index")]
    proportional: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Fixed(i64),
    FromField,
    Proportional,
}

impl ExtractCmd {
    fn selector(&self) -> Selector {
        match (self.proportional, self.index) {
            (true, _) => Selector::Proportional,
            (false, Some(i)) => Selector::Fixed(i),
            (false, None) => Selector::FromField,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    pub lines: usize,
    pub empty: usize,
}

pub fn run(args: ExtractCmd, report: bool) -> Result<()> {
    let t0 = Instant::now();
    let log = telemetry::extract();
    let _g = log.root_span_kv([
        ("infile", args.infile.clone()),
        ("index", format!("{:?}", args.index)),
        ("separator", format!("{:?}", args.separator)),
        ("proportional", args.proportional.to_string()),
    ]).entered();

    validate_separator(&args.separator).context("invalid --separator")?;

    let _s = log.span(&ExtractPhase::OpenInput).entered();
    let input = open_input(&args.infile)?;
    drop(_s);

    let _s = log.span(&ExtractPhase::Process).entered();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = extract_stream(input, &mut out, &args.separator, args.selector())?;
    out.flush().context("flush output")?;
    drop(_s);

    log.info_kv("extract done", [("lines", stats.lines.to_string()), ("empty", stats.empty.to_string())]);
    if report {
        log.result(&stats, Some(Meta::elapsed(t0)))?;
    }
    Ok(())
}

pub fn extract_stream<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    separator: &str,
    selector: Selector,
) -> Result<ExtractStats> {
    let mut stats = ExtractStats::default();
    for (i, line) in input.lines().enumerate() {
        let line_no = i + 1;
        let line = line.with_context(|| format!("read input line {}", line_no))?;
        let sent = match selector {
            Selector::Fixed(index) => extract_sentence(&line, separator, index),
            Selector::FromField => extract_indexed(&line, separator),
            Selector::Proportional => extract_proportional(&line, separator),
        }
        .with_context(|| format!("input line {}", line_no))?;

        writeln!(out, "{}", sent).context("write output")?;
        stats.lines += 1;
        if sent.is_empty() { stats.empty += 1; }
    }
    Ok(stats)
}

/// Sentence `index` of a packed line; indices past the end select the last
/// sentence, negative ones count from the end and stop at the first.
pub fn extract_sentence(line: &str, separator: &str, index: i64) -> Result<String> {
    let sents: Vec<&str> = line.trim_end().split(separator).collect();
    let n = sents.len() as i64;
    let k = if index < 0 { (n + index).max(0) } else { index.min(n - 1) };
    Ok(sents[k as usize].trim().to_string())
}

/// `index TAB packed`: the index travels with the line.
pub fn extract_indexed(line: &str, separator: &str) -> Result<String> {
    let Some((index, rest)) = line.split_once('\t') else {
        bail!("expected `index<TAB>text`, found no tab");
    };
    let index: i64 = index
        .trim()
        .parse()
        .with_context(|| format!("bad sentence index {:?}", index))?;
    extract_sentence(rest, separator, index)
}

/// `source TAB target`, where the source carries prepended context.
///
/// The share of source words that belong to its last sentence decides how
/// many trailing target words are kept. Best effort, not an alignment.
pub fn extract_proportional(line: &str, separator: &str) -> Result<String> {
    let fields: Vec<&str> = line.trim_end().split('\t').collect();
    let &[source, target] = fields.as_slice() else {
        bail!("expected `source<TAB>target`, found {} field(s)", fields.len());
    };

    let target_tokens: Vec<&str> = target.split_whitespace().collect();
    let source_total = source.split_whitespace().count();
    if source_total == 0 {
        return Ok(target_tokens.join(" "));
    }

    let last = source.split(separator).last().unwrap_or_default();
    let source_last = last.split_whitespace().count();
    let keep = source_last * target_tokens.len() / source_total;
    // a share that rounds down to nothing keeps the whole target
    if keep == 0 {
        return Ok(target_tokens.join(" "));
    }
    Ok(target_tokens[target_tokens.len() - keep..].join(" "))
}
