use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{FeedError, Malformed};
use super::types::{ChannelMetadata, FeedDocument, FeedItem, DEFAULT_FEED_TITLE, DEFAULT_ITEM_TITLE, DEFAULT_LANGUAGE};

// Candidate keys per canonical field, first present one wins.
const PUBLISHED_FIELDS: &[&str] = &["published", "pubDate"];
const DESCRIPTION_FIELDS: &[&str] = &["description_html", "description"];
const GUID_FIELDS: &[&str] = &["guid", "link"];
const LINK_FIELDS: &[&str] = &["link"];

#[derive(Deserialize)]
struct RawFeed {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    self_url: Option<String>,
    language: Option<String>,
    #[serde(default)]
    items: Vec<Map<String, Value>>,
}

pub fn load_feed(path: &Path) -> Result<FeedDocument, FeedError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => FeedError::InputNotFound { path: path.to_path_buf() },
        _ => FeedError::InputRead { path: path.to_path_buf(), source },
    })?;
    parse_feed(&text).map_err(|source| FeedError::InputMalformed { path: path.to_path_buf(), source })
}

pub fn parse_feed(text: &str) -> Result<FeedDocument, Malformed> {
    let raw: RawFeed = serde_json::from_str(text).map_err(Malformed::Json)?;

    let channel = ChannelMetadata {
        title: raw.title.unwrap_or_else(|| DEFAULT_FEED_TITLE.to_string()),
        link: raw.link.filter(|s| !s.is_empty()),
        description: raw.description.unwrap_or_default(),
        self_url: raw.self_url.filter(|s| !s.is_empty()),
        language: raw.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
    };

    let items = raw
        .items
        .iter()
        .enumerate()
        .map(|(idx, record)| resolve_item(idx, record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeedDocument { channel, items })
}

fn resolve_item(idx: usize, record: &Map<String, Value>) -> Result<FeedItem, Malformed> {
    let title = match record.get("title") {
        None | Some(Value::Null) => DEFAULT_ITEM_TITLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(Malformed::NotText { item: idx, field: "title" }),
    };

    // A non-string date is kept as its JSON text; normalization rejects it later.
    let published = first_present(record, PUBLISHED_FIELDS).map(|(_, v)| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    });

    Ok(FeedItem {
        title,
        link: text_candidate(idx, record, LINK_FIELDS)?,
        guid: text_candidate(idx, record, GUID_FIELDS)?,
        published,
        description_html: text_candidate(idx, record, DESCRIPTION_FIELDS)?,
    })
}

fn text_candidate(idx: usize, record: &Map<String, Value>, candidates: &[&'static str]) -> Result<Option<String>, Malformed> {
    match first_present(record, candidates) {
        None => Ok(None),
        Some((_, Value::String(s))) => Ok(Some(s.clone())),
        Some((field, _)) => Err(Malformed::NotText { item: idx, field }),
    }
}

fn first_present<'a>(record: &'a Map<String, Value>, candidates: &[&'static str]) -> Option<(&'static str, &'a Value)> {
    candidates
        .iter()
        .filter_map(|key| record.get(*key).map(|v| (*key, v)))
        .find(|(_, v)| is_present(v))
}

// Null, "", false, 0 and empty containers all count as absent.
fn is_present(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
