use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use url::Url;

use crate::output::config::OutputConfig;
use crate::output::types::Meta;
use crate::telemetry::{self};
use crate::telemetry::ops::feed::Phase as FeedPhase;

pub mod load;
pub mod normalize;
pub mod order;
pub mod render;
pub mod types;
mod write;

use self::normalize::{NormalizedItem, Published};
use self::types::{FeedDocument, FeedPlan, FeedResult};

/// feedgen [--input items.json] [--output feed.xml]
#[derive(Args, Debug)]
pub struct FeedCmd {
    /// JSON file with channel fields and an `items` array
    #[arg(short, long, default_value = "items.json")]
    pub input: PathBuf,
    /// Where the RSS document is written
    #[arg(short, long, default_value = "feed.xml")]
    pub output: PathBuf,
    /// Build the feed but do not write it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

pub struct Rendered {
    pub xml: String,
    pub items: usize,
    pub fallback_dated: usize,
}

pub fn run(args: FeedCmd, out: OutputConfig) -> Result<()> {
    // captured once; every fallback and lastBuildDate uses this instant
    let now = Utc::now();
    let t0 = Instant::now();

    let log = telemetry::feed();
    let _g = log.root_span_kv([
        ("input", args.input.display().to_string()),
        ("output", args.output.display().to_string()),
        ("dry_run", args.dry_run.to_string()),
    ]).entered();

    let doc = {
        let _s = log.span_kv(&FeedPhase::Load, [("path", args.input.display().to_string())]).entered();
        load::load_feed(&args.input)?
    };
    log.info(format!("📥 Loaded {} items from {}", doc.items.len(), args.input.display()));
    warn_unparseable_links(&doc);

    let rendered = build_feed(doc, now);
    let meta = Some(Meta { duration_ms: Some(t0.elapsed().as_millis()) });

    if args.dry_run {
        let _s = log.span(&FeedPhase::Plan).entered();
        log.info(format!("📝 Feed plan — items={} fallback_dated={} bytes={}", rendered.items, rendered.fallback_dated, rendered.xml.len()));
        let plan = FeedPlan {
            input: args.input.display().to_string(),
            output: args.output.display().to_string(),
            items: rendered.items,
            fallback_dated: rendered.fallback_dated,
            bytes: rendered.xml.len(),
        };
        return log.plan(out, &plan, meta);
    }

    let written = {
        let _s = log.span_kv(&FeedPhase::Write, [("path", args.output.display().to_string())]).entered();
        write::write_feed(&args.output, &rendered.xml)?
    };
    log.totals(rendered.items, rendered.fallback_dated, rendered.xml.len());

    let result = FeedResult {
        output: written.display().to_string(),
        items: rendered.items,
        fallback_dated: rendered.fallback_dated,
        bytes: rendered.xml.len(),
    };
    log.result(out, &result, meta)
}

/// Normalize, order and serialize a loaded document.
pub fn build_feed(doc: FeedDocument, now: DateTime<Utc>) -> Rendered {
    let log = telemetry::feed();

    let items = {
        let _s = log.span(&FeedPhase::Normalize).entered();
        let items = normalize::normalize_items(doc.items);
        for n in &items {
            log_date_fallback(n);
        }
        items
    };
    let fallback_dated = items.iter().filter(|n| n.published.instant().is_none()).count();

    let items = {
        let _s = log.span(&FeedPhase::Order).entered();
        order::order_newest_first(items)
    };

    let xml = {
        let _s = log.span(&FeedPhase::Render).entered();
        render::render_feed(&doc.channel, &items, now)
    };

    Rendered { xml, items: items.len(), fallback_dated }
}

fn log_date_fallback(n: &NormalizedItem) {
    let log = telemetry::feed();
    match &n.published {
        Published::At(_) => {}
        Published::Missing => log.debug_kv("🕒 no date, using build time", [("title", n.item.title.clone())]),
        Published::Invalid(e) => log.debug_kv("🕒 bad date, using build time", [
            ("title", n.item.title.clone()),
            ("value", format!("{:?}", e.input)),
        ]),
    }
}

// Links are emitted as given; this only flags ones a reader may not resolve.
fn warn_unparseable_links(doc: &FeedDocument) {
    let log = telemetry::feed();
    let channel = &doc.channel;
    for (field, value) in [("link", &channel.link), ("self_url", &channel.self_url)] {
        if let Some(v) = value {
            if Url::parse(v).is_err() { log.warn_kv("⚠️ channel URL does not parse", [("field", field.to_string()), ("value", v.clone())]); }
        }
    }
    for item in &doc.items {
        if let Some(link) = &item.link {
            if Url::parse(link).is_err() { log.warn_kv("⚠️ item link does not parse", [("title", item.title.clone()), ("link", link.clone())]); }
        }
    }
}
