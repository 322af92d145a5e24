use anyhow::Result;
use serde::Serialize;
use std::io::BufRead;

use super::record::{FieldIndex, Record};
use super::SENTINEL_DOCID;

/// Maximal run of consecutive records sharing a document id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// doc-id field of the first record (its last field when out of range)
    pub label: String,
    /// 1-based input line of the first record
    pub first_line: usize,
    pub records: Vec<Record>,
}

impl Document {
    fn start(record: Record, docid_field: FieldIndex, line_no: usize) -> Self {
        let label = record
            .field(docid_field)
            .unwrap_or_else(|| record.last())
            .to_string();
        Self { label, first_line: line_no, records: vec![record] }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(Record::text)
    }

    pub fn len(&self) -> usize { self.records.len() }
}

/// Streaming document reconstructor over a line source.
pub struct DocReader<R> {
    lines: std::io::Lines<R>,
    docid_field: FieldIndex,
    pending: Option<Document>,
    prev_id: Option<String>,
    line_no: usize,
}

pub fn read_docs<R: BufRead>(input: R, docid_field: FieldIndex) -> DocReader<R> {
    DocReader {
        lines: input.lines(),
        docid_field,
        pending: None,
        prev_id: None,
        line_no: 0,
    }
}

impl<R> DocReader<R> {
    // undefined when the field is missing or carries the sentinel
    fn docid_of(&self, record: &Record) -> Option<String> {
        record
            .field(self.docid_field)
            .filter(|id| *id != SENTINEL_DOCID)
            .map(str::to_string)
    }
}

impl<R: BufRead> Iterator for DocReader<R> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    let err = anyhow::Error::new(e).context(format!("read input line {}", self.line_no + 1));
                    return Some(Err(err));
                }
                None => return self.pending.take().map(Ok),
            };
            self.line_no += 1;

            let record = Record::parse(&line);
            let id = self.docid_of(&record);
            let boundary = id.is_none() || id != self.prev_id;
            self.prev_id = id;

            if !boundary {
                if let Some(doc) = self.pending.as_mut() {
                    doc.records.push(record);
                    continue;
                }
            }

            let fresh = Document::start(record, self.docid_field, self.line_no);
            if let Some(done) = self.pending.replace(fresh) {
                return Some(Ok(done));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(input: &str, field: i64) -> Vec<Document> {
        read_docs(input.as_bytes(), FieldIndex(field))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn texts(d: &Document) -> Vec<&str> { d.texts().collect() }

    #[test]
    fn groups_consecutive_ids() {
        let out = docs("the cat\tA\t1\nsat down\tA\t1\nA dog barked\tB\t1", 1);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].records, vec![
            Record::from(&["the cat", "A", "1"][..]),
            Record::from(&["sat down", "A", "1"][..]),
        ]);
        assert_eq!(out[1].records, vec![Record::from(&["A dog barked", "B", "1"][..])]);
        assert_eq!(out[0].label, "A");
        assert_eq!(out[1].first_line, 3);
    }

    #[test]
    fn default_field_is_last() {
        let out = docs("a\tD1\nb\tD1\nc\tD2\n", -1);
        assert_eq!(out.len(), 2);
        assert_eq!(texts(&out[0]), vec!["a", "b"]);
        assert_eq!(texts(&out[1]), vec!["c"]);
    }

    #[test]
    fn sentinel_id_splits_every_line() {
        let out = docs("a\t0\nb\t0\nc\t0\n", -1);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|d| d.len() == 1));
        assert_eq!(out[2].label, "0");
    }

    #[test]
    fn out_of_range_field_never_merges() {
        let out = docs("a\tX\nb\tX\n", 5);
        assert_eq!(out.len(), 2);
        // label falls back to the last field
        assert_eq!(out[0].label, "X");

        let out = docs("a\tX\nb\tX\n", -7);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn id_returning_after_gap_is_a_new_document() {
        let out = docs("a\tA\nb\tB\nc\tA\n", -1);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(docs("", -1).is_empty());
    }

    #[test]
    fn constant_column_groups_everything() {
        // field 2 is "1" on every line, so nothing breaks the run
        let out = docs("the cat\tA\t1\nsat down\tA\t1\nA dog barked\tB\t1", 2);
        assert_eq!(out.len(), 1);
        assert_eq!(texts(&out[0]), vec!["the cat", "sat down", "A dog barked"]);
        assert_eq!(out[0].label, "1");
    }

    #[test]
    fn regrouping_by_id_is_stable() {
        let input = "a\tA\nb\tA\nc\tB\nd\t0\ne\t0\nf\tC\n";
        let first = docs(input, -1);
        let rejoined: String = first
            .iter()
            .flat_map(|d| d.records.iter())
            .map(|r| format!("{}\n", r.fields().join("\t")))
            .collect();
        assert_eq!(docs(&rejoined, -1), first);
    }
}
