use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Feed;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Load, Normalize, Order, Render, Plan, Write }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Load => "load",
        Phase::Normalize => "normalize",
        Phase::Order => "order",
        Phase::Render => "render",
        Phase::Plan => "plan",
        Phase::Write => "write",
    }}
    fn span(&self) -> Span { match self {
        Phase::Load => info_span!("load"),
        Phase::Normalize => info_span!("normalize"),
        Phase::Order => info_span!("order"),
        Phase::Render => info_span!("render"),
        Phase::Plan => info_span!("plan"),
        Phase::Write => info_span!("write"),
    }}
}

impl OpMarker for Feed {
    const NAME: &'static str = "feed";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("feed") }
}
