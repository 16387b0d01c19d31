use chrono::{DateTime, Utc};

use crate::util::time::{epoch, normalize_timestamp, DateParseError};
use super::types::FeedItem;

/// Outcome of normalizing an item's publication date.
///
/// Each consumer picks its own fallback: ordering uses the epoch so that
/// undated items sink to the end, rendering uses the run's build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Published {
    At(DateTime<Utc>),
    Missing,
    Invalid(DateParseError),
}

impl Published {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => Published::Missing,
            Some(s) => match normalize_timestamp(s) {
                Ok(dt) => Published::At(dt),
                Err(e) => Published::Invalid(e),
            },
        }
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Published::At(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn or_epoch(&self) -> DateTime<Utc> {
        self.instant().unwrap_or_else(epoch)
    }

    pub fn or_now(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.instant().unwrap_or(now)
    }
}

#[derive(Debug, Clone)]
pub struct NormalizedItem {
    pub item: FeedItem,
    pub published: Published,
}

pub fn normalize_items(items: Vec<FeedItem>) -> Vec<NormalizedItem> {
    items
        .into_iter()
        .map(|item| {
            let published = Published::from_raw(item.published.as_deref());
            NormalizedItem { item, published }
        })
        .collect()
}
