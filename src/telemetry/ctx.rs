use anyhow::Result;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{info, debug, warn, Span};

use crate::output::types::{Envelope, Meta};
use crate::output::{Emitter, OutputConfig};

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span(&self) -> Span { O::root_span() }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            info!(op = %self.op_name(), "start");
        } else {
            info!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span {
        if self.json { debug!(op = %self.op_name(), phase = ph.name(), "span_start"); }
        ph.span()
    }

    pub fn info(&self, msg: impl AsRef<str>) { if self.json { info!(op = %self.op_name(), "{}", msg.as_ref()); } else { info!("{}", msg.as_ref()); } }
    pub fn warn(&self, msg: impl AsRef<str>) { if self.json { warn!(op = %self.op_name(), "{}", msg.as_ref()); } else { warn!("{}", msg.as_ref()); } }

    pub fn info_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { info!(op = %self.op_name(), details = %details, "{}", msg); }
        else { info!("{} {}", msg, details); }
    }

    /// Write the run report envelope (stderr; stdout carries data).
    pub fn result<T: Serialize>(&self, result: &T, meta: Option<Meta>) -> Result<()> {
        let env = Envelope::result(self.op_name(), result, meta)?;
        Emitter::from_env(OutputConfig::from_env()).emit(&env)?;
        Ok(())
    }
}

// Pack-specific helpers
impl LogCtx<crate::telemetry::ops::pack::Pack> {
    pub fn document(&self, first_line: usize, label: &str, sentences: usize, emitted: usize, oversized: usize) {
        if self.json { debug!(op = %self.op_name(), first_line, label, sentences, emitted, oversized, "document"); }
        else { debug!("doc {} (line {}): sentences={} emitted={} oversized={}", label, first_line, sentences, emitted, oversized); }
    }

    pub fn totals(&self, documents: usize, records: usize, emitted: usize, oversized: usize) {
        if self.json { info!(op = %self.op_name(), documents, records, emitted, oversized, "pack_totals"); }
        else { info!("📊 Pack totals — documents={} records={} emitted={} oversized={}", documents, records, emitted, oversized); }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_pairs_render_in_order() {
        let s = kv_to_string([("mode", "chunk".to_string()), ("max_tokens", "250".to_string())]);
        assert_eq!(s, "mode=chunk max_tokens=250");
        assert_eq!(kv_to_string(Vec::<(&str, String)>::new()), "");
    }
}
