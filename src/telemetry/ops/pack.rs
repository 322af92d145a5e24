use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Pack;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Validate, LoadTokenizer, OpenInput, Process }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Validate => "validate",
        Phase::LoadTokenizer => "load_tokenizer",
        Phase::OpenInput => "open_input",
        Phase::Process => "process",
    }}
    fn span(&self) -> Span { match self {
        Phase::Validate => info_span!("validate"),
        Phase::LoadTokenizer => info_span!("load_tokenizer"),
        Phase::OpenInput => info_span!("open_input"),
        Phase::Process => info_span!("process"),
    }}
}

impl OpMarker for Pack {
    const NAME: &'static str = "pack";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("pack") }
}
