use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead, BufWriter, Write};
use std::time::Instant;

use crate::corpus::{read_docs, Document, FieldIndex};
use crate::output::types::Meta;
use crate::telemetry;
use crate::telemetry::ops::inspect::Phase as InspectPhase;
use crate::util::io::open_input;

/// Print reconstructed documents as JSON lines.
#[derive(Args, Debug)]
pub struct InspectCmd {
    /// Input file; `-` reads stdin, `*.gz` is decompressed
    #[arg(default_value = "-")]
    infile: String,
    /// Field containing the doc ID; negative counts from the end
    #[arg(short = 'f', long, value_name = "F", default_value_t = -1, allow_negative_numbers = true)]
    docid_field: i64,
}

#[derive(Serialize)]
struct DocLine<'a> {
    doc: usize,
    #[serde(flatten)]
    document: &'a Document,
}

#[derive(Debug, Default, Serialize)]
pub struct InspectStats {
    pub documents: usize,
    pub records: usize,
}

/// entry point for inspect
pub fn run(args: InspectCmd, report: bool) -> Result<()> {
    let t0 = Instant::now();
    let log = telemetry::inspect();
    let _g = log.root_span_kv([
        ("infile", args.infile.clone()),
        ("docid_field", args.docid_field.to_string()),
    ]).entered();

    let _s = log.span(&InspectPhase::OpenInput).entered();
    let input = open_input(&args.infile)?;
    drop(_s);

    let _s = log.span(&InspectPhase::Process).entered();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = inspect_stream(input, &mut out, FieldIndex(args.docid_field))?;
    out.flush().context("flush output")?;
    drop(_s);

    log.info(format!("🔎 {} document(s) from {} record(s)", stats.documents, stats.records));
    if report {
        log.result(&stats, Some(Meta::elapsed(t0)))?;
    }
    Ok(())
}

pub fn inspect_stream<R: BufRead, W: Write>(input: R, out: &mut W, docid_field: FieldIndex) -> Result<InspectStats> {
    let mut stats = InspectStats::default();
    for (doc_no, doc) in read_docs(input, docid_field).enumerate() {
        let doc = doc?;
        serde_json::to_writer(&mut *out, &DocLine { doc: doc_no, document: &doc })?;
        writeln!(out)?;
        stats.documents += 1;
        stats.records += doc.len();
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn one_json_object_per_document() {
        let mut out = Vec::new();
        let stats = inspect_stream("the cat\tA\nsat\tA\ndog\tB\n".as_bytes(), &mut out, FieldIndex::LAST).unwrap();
        assert_eq!((stats.documents, stats.records), (2, 3));

        let s = String::from_utf8(out).unwrap();
        let docs: Vec<Value> = s.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["doc"], 0);
        assert_eq!(docs[0]["label"], "A");
        assert_eq!(docs[0]["first_line"], 1);
        assert_eq!(docs[0]["records"][1], serde_json::json!(["sat", "A"]));
        assert_eq!(docs[1]["first_line"], 3);
    }
}
