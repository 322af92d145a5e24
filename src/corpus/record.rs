use serde::Serialize;

pub const FIELD_DELIMITER: char = '\t';

/// Signed field position. Negative values count from the end (`-1` = last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldIndex(pub i64);

impl FieldIndex {
    pub const LAST: FieldIndex = FieldIndex(-1);

    /// Resolve against a record with `len` fields; `None` when out of range.
    pub fn resolve(self, len: usize) -> Option<usize> {
        let len_i = i64::try_from(len).ok()?;
        let idx = if self.0 < 0 { len_i + self.0 } else { self.0 };
        if (0..len_i).contains(&idx) { usize::try_from(idx).ok() } else { None }
    }
}

/// One input line split into trimmed tab-separated fields. Field 0 is the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn parse(line: &str) -> Self {
        let fields = line
            .trim_end()
            .split(FIELD_DELIMITER)
            .map(|f| f.trim().to_string())
            .collect();
        Self { fields }
    }

    pub fn text(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or_default()
    }

    pub fn field(&self, idx: FieldIndex) -> Option<&str> {
        idx.resolve(self.fields.len()).map(|i| self.fields[i].as_str())
    }

    pub fn last(&self) -> &str {
        self.fields.last().map(String::as_str).unwrap_or_default()
    }

    pub fn fields(&self) -> &[String] { &self.fields }

}

impl<S: AsRef<str>> From<&[S]> for Record {
    fn from(fields: &[S]) -> Self {
        Self { fields: fields.iter().map(|f| f.as_ref().to_string()).collect() }
    }
}
