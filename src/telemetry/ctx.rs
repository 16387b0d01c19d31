use anyhow::Result;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{info, debug, warn, Span};

use super::emit;
use crate::output::config::OutputConfig;
use crate::output::types::Meta;

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

    pub fn span(&self, ph: &O::Phase) -> Span { ph.span() }

    pub fn span_kv<'a, T>(&self, ph: &O::Phase, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.span(ph);
        let details = kv_to_string(fields);
        if details.is_empty() {
            debug!(op = %self.op_name(), phase = ph.name(), "span_start");
        } else {
            debug!(op = %self.op_name(), phase = ph.name(), details = %details, "span_start");
        }
        span
    }

    pub fn info(&self, msg: impl AsRef<str>) { if self.json { info!(op = %self.op_name(), "{}", msg.as_ref()); } else { info!("{}", msg.as_ref()); } }

    pub fn debug_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { debug!(op = %self.op_name(), details = %details, "{}", msg); }
        else { debug!("{} {}", msg, details); }
    }

    pub fn warn_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { warn!(op = %self.op_name(), details = %details, "{}", msg); }
        else { warn!("{} {}", msg, details); }
    }

    pub fn plan<T: Serialize>(&self, cfg: OutputConfig, plan: &T, meta: Option<Meta>) -> Result<()> { emit::print_plan(cfg, self.op_name(), plan, meta) }
    pub fn result<T: Serialize>(&self, cfg: OutputConfig, result: &T, meta: Option<Meta>) -> Result<()> { emit::print_result(cfg, self.op_name(), result, meta) }
}

// Feed-specific helpers
impl LogCtx<crate::telemetry::ops::feed::Feed> {
    pub fn totals(&self, items: usize, fallback_dated: usize, bytes: usize) {
        if self.json { info!(op = %self.op_name(), items, fallback_dated, bytes, "feed_totals"); }
        else { info!("📊 Feed totals — items={} fallback_dated={} bytes={}", items, fallback_dated, bytes); }
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
