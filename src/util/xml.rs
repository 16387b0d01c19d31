use std::borrow::Cow;

use quick_xml::escape::{escape, partial_escape};

// Element text: only `&`, `<` and `>` are replaced.
pub fn escape_text(s: &str) -> Cow<'_, str> {
    partial_escape(s)
}

// Attribute values also get their quotes escaped.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s)
}

/// Wrap `body` in a CDATA section as-is.
///
/// A body that itself contains `]]>` ends the section early and yields
/// invalid XML; callers get no guard against that.
pub fn cdata(body: &str) -> String {
    format!("<![CDATA[{body}]]>")
}

pub fn text_element(tag: &str, text: &str) -> String {
    format!("<{tag}>{}</{tag}>", escape_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_escapes_markup_chars_only() {
        assert_eq!(escape_text("Tom & Jerry <3 > you"), "Tom &amp; Jerry &lt;3 &gt; you");
        assert_eq!(escape_text("say \"hi\" it's"), "say \"hi\" it's");
    }

    #[test]
    fn attr_escapes_quotes() {
        let s = escape_attr("https://x.test/?a=1&b=\"2\"");
        assert_eq!(s, "https://x.test/?a=1&amp;b=&quot;2&quot;");
    }

    #[test]
    fn cdata_is_verbatim() {
        assert_eq!(cdata("<p>a & b</p>"), "<![CDATA[<p>a & b</p>]]>");
        // no splitting of an embedded terminator
        assert_eq!(cdata("x]]>y"), "<![CDATA[x]]>y]]>");
    }

    #[test]
    fn text_element_wraps_escaped() {
        assert_eq!(text_element("title", "A < B"), "<title>A &lt; B</title>");
    }
}
