use chrono::{DateTime, Utc};

use super::normalize::NormalizedItem;

// Undated or unparseable items key on the epoch.
pub fn sort_key(item: &NormalizedItem) -> DateTime<Utc> {
    item.published.or_epoch()
}

/// Newest first. `sort_by` is stable, so equal keys keep input order.
pub fn order_newest_first(mut items: Vec<NormalizedItem>) -> Vec<NormalizedItem> {
    items.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::normalize::normalize_items;
    use crate::feed::types::FeedItem;

    fn item(title: &str, published: Option<&str>) -> FeedItem {
        FeedItem { title: title.into(), published: published.map(Into::into), ..Default::default() }
    }

    fn titles(items: &[NormalizedItem]) -> Vec<&str> {
        items.iter().map(|n| n.item.title.as_str()).collect()
    }

    #[test]
    fn newest_first() {
        let items = normalize_items(vec![
            item("old", Some("2023-05-01T00:00:00Z")),
            item("new", Some("2024-05-01T00:00:00Z")),
            item("mid", Some("2024-01-01T00:00:00+05:00")),
        ]);
        let out = order_newest_first(items);
        assert_eq!(titles(&out), vec!["new", "mid", "old"]);
    }

    #[test]
    fn equal_instants_keep_input_order() {
        // same instant written three ways
        let items = normalize_items(vec![
            item("first", Some("2024-01-01T12:00:00Z")),
            item("second", Some("2024-01-01T13:00:00+01:00")),
            item("newer", Some("2024-06-01")),
            item("third", Some("2024-01-01T12:00:00")),
        ]);
        let out = order_newest_first(items);
        assert_eq!(titles(&out), vec!["newer", "first", "second", "third"]);
    }

    #[test]
    fn undated_and_invalid_sink_to_end_in_input_order() {
        let items = normalize_items(vec![
            item("none", None),
            item("bad", Some("not a date")),
            item("dated", Some("1999-12-31")),
            item("none2", None),
        ]);
        let out = order_newest_first(items);
        assert_eq!(titles(&out), vec!["dated", "none", "bad", "none2"]);
    }

    #[test]
    fn order_is_non_increasing() {
        let raw = ["2024-03-01", "2021-01-01T10:00:00-08:00", "", "2030-01-01", "2024-03-01", "x", "2000-01-01 00:00"];
        let items = normalize_items(raw.iter().enumerate().map(|(i, d)| item(&i.to_string(), Some(*d))).collect());
        let out = order_newest_first(items);
        for pair in out.windows(2) {
            assert!(sort_key(&pair[0]) >= sort_key(&pair[1]));
        }
    }
}
