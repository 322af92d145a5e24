use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Inspect;

#[derive(Copy, Clone, Debug)]
pub enum Phase { OpenInput, Process }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::OpenInput => "open_input",
        Phase::Process => "process",
    }}
    fn span(&self) -> Span { match self {
        Phase::OpenInput => info_span!("open_input"),
        Phase::Process => info_span!("process"),
    }}
}

impl OpMarker for Inspect {
    const NAME: &'static str = "inspect";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("inspect") }
}
