//! RSS 2.0 serialization.
//!
//! Output is built line by line with two-space indentation so the document
//! layout stays fixed regardless of content.

use chrono::{DateTime, Utc};

use crate::util::time::to_rfc2822;
use crate::util::xml::{cdata, escape_attr, escape_text, text_element};
use super::normalize::NormalizedItem;
use super::types::{ChannelMetadata, FeedItem};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const RSS_OPEN: &str = r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#;
const RSS_MIME: &str = "application/rss+xml";

#[derive(Default)]
struct Lines {
    buf: Vec<String>,
}

impl Lines {
    fn push(&mut self, depth: usize, line: impl AsRef<str>) {
        self.buf.push(format!("{}{}", "  ".repeat(depth), line.as_ref()));
    }

    fn finish(self) -> String {
        let mut out = self.buf.join("\n");
        out.push('\n');
        out
    }
}

/// Render the channel and its already ordered items.
///
/// `now` is the build time: it becomes `lastBuildDate` and stands in for
/// any item whose publication date is missing or invalid.
pub fn render_feed(channel: &ChannelMetadata, items: &[NormalizedItem], now: DateTime<Utc>) -> String {
    let mut out = Lines::default();
    out.push(0, XML_DECL);
    out.push(0, RSS_OPEN);
    out.push(1, "<channel>");

    out.push(2, text_element("title", &channel.title));
    if let Some(link) = &channel.link {
        out.push(2, text_element("link", link));
    }
    out.push(2, text_element("description", &channel.description));
    out.push(2, text_element("language", &channel.language));
    out.push(2, format!("<lastBuildDate>{}</lastBuildDate>", to_rfc2822(now)));
    if let Some(self_url) = &channel.self_url {
        out.push(2, format!(
            r#"<atom:link href="{}" rel="self" type="{RSS_MIME}" />"#,
            escape_attr(self_url)
        ));
    }

    for n in items {
        render_item(&mut out, n, now);
    }

    out.push(1, "</channel>");
    out.push(0, "</rss>");
    out.finish()
}

fn render_item(out: &mut Lines, n: &NormalizedItem, now: DateTime<Utc>) {
    let item: &FeedItem = &n.item;
    out.push(2, "<item>");
    out.push(3, text_element("title", &item.title));
    if let Some(link) = &item.link {
        out.push(3, text_element("link", link));
    }
    if let Some(guid) = &item.guid {
        let permalink = FeedItem::guid_is_permalink(guid);
        out.push(3, format!(r#"<guid isPermaLink="{permalink}">{}</guid>"#, escape_text(guid)));
    }
    out.push(3, format!("<pubDate>{}</pubDate>", to_rfc2822(n.published.or_now(now))));
    if let Some(body) = &item.description_html {
        out.push(3, format!("<description>{}</description>", cdata(body)));
    }
    out.push(2, "</item>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::normalize::normalize_items;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap()
    }

    fn render_one(item: FeedItem) -> String {
        render_feed(&ChannelMetadata::default(), &normalize_items(vec![item]), now())
    }

    #[test]
    fn empty_channel_layout() {
        let xml = render_feed(&ChannelMetadata::default(), &[], now());
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">
  <channel>
    <title>Untitled Feed</title>
    <description></description>
    <language>en</language>
    <lastBuildDate>Tue, 04 Mar 2025 05:06:07 +0000</lastBuildDate>
  </channel>
</rss>
";
        assert_eq!(xml, expected);
    }

    #[test]
    fn full_item_layout() {
        let channel = ChannelMetadata {
            title: "My Feed".into(),
            link: Some("https://example.com/".into()),
            description: "News & notes".into(),
            self_url: Some("https://example.com/feed.xml".into()),
            language: "de".into(),
        };
        let items = normalize_items(vec![FeedItem {
            title: "Hello".into(),
            link: Some("https://example.com/hello".into()),
            guid: Some("https://example.com/hello".into()),
            published: Some("2024-01-01T00:00:00Z".into()),
            description_html: Some("<p>Hi</p>".into()),
        }]);
        let xml = render_feed(&channel, &items, now());
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">
  <channel>
    <title>My Feed</title>
    <link>https://example.com/</link>
    <description>News &amp; notes</description>
    <language>de</language>
    <lastBuildDate>Tue, 04 Mar 2025 05:06:07 +0000</lastBuildDate>
    <atom:link href=\"https://example.com/feed.xml\" rel=\"self\" type=\"application/rss+xml\" />
    <item>
      <title>Hello</title>
      <link>https://example.com/hello</link>
      <guid isPermaLink=\"true\">https://example.com/hello</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 +0000</pubDate>
      <description><![CDATA[<p>Hi</p>]]></description>
    </item>
  </channel>
</rss>
";
        assert_eq!(xml, expected);
    }

    #[test]
    fn guid_from_http_link_is_permalink() {
        let xml = render_one(FeedItem {
            link: Some("http://example.com/a?x=1&y=2".into()),
            guid: Some("http://example.com/a?x=1&y=2".into()),
            ..Default::default()
        });
        assert!(xml.contains(r#"<guid isPermaLink="true">http://example.com/a?x=1&amp;y=2</guid>"#));
        assert!(xml.contains("      <link>http://example.com/a?x=1&amp;y=2</link>"));
    }

    #[test]
    fn channel_link_and_language_are_escaped() {
        let channel = ChannelMetadata {
            link: Some("https://e.test/?a=1&b=<2>".into()),
            language: "en&<x>".into(),
            ..Default::default()
        };
        let xml = render_feed(&channel, &[], now());
        assert!(xml.contains("    <link>https://e.test/?a=1&amp;b=&lt;2&gt;</link>"));
        assert!(xml.contains("    <language>en&amp;&lt;x&gt;</language>"));
    }

    #[test]
    fn non_http_guid_is_not_permalink() {
        let xml = render_one(FeedItem { guid: Some("tag:example.com,2024:1".into()), ..Default::default() });
        assert!(xml.contains(r#"<guid isPermaLink="false">tag:example.com,2024:1</guid>"#));

        let xml = render_one(FeedItem { guid: Some("ftp://x".into()), ..Default::default() });
        assert!(xml.contains(r#"isPermaLink="false""#));
    }

    #[test]
    fn no_guid_no_link_omits_both() {
        let xml = render_one(FeedItem::default());
        assert!(!xml.contains("<guid"));
        assert!(!xml.contains("<link>"));
        assert!(xml.contains("      <title>Untitled</title>"));
    }

    #[test]
    fn description_is_cdata_and_unescaped_title_is_escaped() {
        let xml = render_one(FeedItem {
            title: "Q&A <live> > replay".into(),
            description_html: Some("<b>Q&A</b> a < b > c".into()),
            ..Default::default()
        });
        assert!(xml.contains("<title>Q&amp;A &lt;live&gt; &gt; replay</title>"));
        assert!(xml.contains("<description><![CDATA[<b>Q&A</b> a < b > c]]></description>"));
    }

    #[test]
    fn missing_and_invalid_dates_render_build_time() {
        for published in [None, Some("garbage".to_string())] {
            let xml = render_one(FeedItem { published, ..Default::default() });
            assert!(xml.contains("      <pubDate>Tue, 04 Mar 2025 05:06:07 +0000</pubDate>"));
        }
    }

    #[test]
    fn pub_date_is_converted_to_utc() {
        let xml = render_one(FeedItem { published: Some("2024-06-15T14:30:00+02:00".into()), ..Default::default() });
        assert!(xml.contains("<pubDate>Sat, 15 Jun 2024 12:30:00 +0000</pubDate>"));
    }

    #[test]
    fn self_link_href_is_attribute_escaped() {
        let channel = ChannelMetadata { self_url: Some("https://e.test/feed?a=1&b=\"2\"".into()), ..Default::default() };
        let xml = render_feed(&channel, &[], now());
        assert!(xml.contains(r#"<atom:link href="https://e.test/feed?a=1&amp;b=&quot;2&quot;" rel="self""#));
    }

    #[test]
    fn ends_with_single_newline() {
        let xml = render_one(FeedItem::default());
        assert!(xml.ends_with("</rss>\n"));
        assert!(!xml.ends_with("\n\n"));
    }
}
