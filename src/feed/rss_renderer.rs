use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::feed::{FeedDocument, FeedItem, GENERATOR};
use crate::text_utils::format_rfc822;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
  <title>Wrapt Blog</title>
  <link>https://wrapt.dev/blog</link>
  <description>Keep up with useful web dev tips and follow my progress on building Craftsman.</description>
  <lastBuildDate>Mon, 01 Jul 2024 12:00:00 GMT</lastBuildDate>
  ...
  <atom:link href="https://wrapt.dev/blog/feed.xml" rel="self" type="application/rss+xml"/>
  <item>
    <title>Generating feeds</title>
    <link>https://wrapt.dev/blog/generating-feeds</link>
    <guid isPermaLink="true">https://wrapt.dev/blog/generating-feeds</guid>
    <pubDate>Sat, 01 Jun 2024 00:00:00 GMT</pubDate>
    <description><![CDATA[How the feeds are built]]></description>
    <dc:creator>Paul DeVito</dc:creator>
    <enclosure url="https://wrapt.dev/img/blog/feeds.png" length="0" type="image/png"/>
  </item>
</channel>
</rss>
*/

pub const RSS_DOCS: &str = "https://validator.w3.org/feed/docs/rss2.html";

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Renders the feed as an RSS 2.0 document
pub fn to_rss(doc: &FeedDocument) -> quick_xml::Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    // <?xml version="1.0" encoding="UTF-8"?>
    let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
    writer.write_event(decl)?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:dc", "http://purl.org/dc/elements/1.1/"));
    rss.push_attribute(("xmlns:atom", "http://www.w3.org/2005/Atom"));
    writer.write_event(Event::Start(rss))?;

    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    push_text(&mut writer, "title", &doc.title)?;
    push_text(&mut writer, "link", &doc.link)?;
    push_text(&mut writer, "description", &doc.description)?;
    push_text(&mut writer, "lastBuildDate", &format_rfc822(&doc.updated))?;
    push_text(&mut writer, "docs", RSS_DOCS)?;
    push_text(&mut writer, "generator", GENERATOR)?;
    push_text(&mut writer, "language", &doc.language)?;

    // <image><title/><url/><link/></image>
    writer.write_event(Event::Start(BytesStart::new("image")))?;
    push_text(&mut writer, "title", &doc.title)?;
    push_text(&mut writer, "url", &doc.image)?;
    push_text(&mut writer, "link", &doc.link)?;
    writer.write_event(Event::End(BytesEnd::new("image")))?;

    push_text(&mut writer, "copyright", &doc.copyright)?;

    // <atom:link href="https://wrapt.dev/blog/feed.xml" rel="self" type="application/rss+xml"/>
    let mut self_link = BytesStart::new("atom:link");
    self_link.push_attribute(("href", doc.feed_links.rss.as_str()));
    self_link.push_attribute(("rel", "self"));
    self_link.push_attribute(("type", "application/rss+xml"));
    writer.write_event(Event::Empty(self_link))?;

    for item in &doc.items {
        push_item(&mut writer, item)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn push_item(writer: &mut XmlWriter, item: &FeedItem) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    push_text(writer, "title", &item.title)?;
    push_text(writer, "link", &item.link)?;

    // <guid isPermaLink="true">https://wrapt.dev/blog/my-post</guid>
    let is_permalink = if item.id == item.link { "true" } else { "false" };
    let mut guid_elem = BytesStart::new("guid");
    guid_elem.push_attribute(("isPermaLink", is_permalink));
    writer.write_event(Event::Start(guid_elem))?;
    writer.write_event(Event::Text(BytesText::new(&item.id)))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    push_text(writer, "pubDate", &format_rfc822(&item.date))?;
    push_cdata(writer, "description", &item.description)?;

    // RSS only allows an email in <author>, everyone else goes to dc:creator
    for author in &item.authors {
        match author.email {
            Some(ref email) => push_text(writer, "author", &format!("{} ({})", email, author.name))?,
            None => push_text(writer, "dc:creator", &author.name)?,
        }
    }

    if !item.image.is_empty() {
        let mut enclosure = BytesStart::new("enclosure");
        enclosure.push_attribute(("url", item.image.as_str()));
        enclosure.push_attribute(("length", "0"));
        enclosure.push_attribute(("type", image_mime(&item.image)));
        writer.write_event(Event::Empty(enclosure))?;
    }

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

pub(crate) fn image_mime(url: &str) -> &'static str {
    let ext = url.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "image/png",
    }
}

pub(crate) fn push_text(writer: &mut XmlWriter, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

pub(crate) fn push_cdata(writer: &mut XmlWriter, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::test_data::sample_feed;

    use super::*;

    #[test]
    fn render_xml() {
        let xml = to_rss(&sample_feed()).unwrap();
        println!("XML: {}", xml);
        assert_eq!(xml, EXPECTED.replace("{GENERATOR}", GENERATOR));
    }

    #[test]
    fn render_without_items() {
        let mut doc = sample_feed();
        doc.items.clear();
        let xml = to_rss(&doc).unwrap();
        assert!(!xml.contains("<item>"));
        assert!(xml.ends_with("</channel></rss>"));
    }

    #[test]
    fn render_author_with_email() {
        let mut doc = sample_feed();
        doc.items[0].authors = doc.authors.clone();
        let xml = to_rss(&doc).unwrap();
        assert!(xml.contains("<author>pdevito3@gmail.com (Paul DeVito)</author>"));
    }

    #[test]
    fn title_id_is_not_permalink() {
        let mut doc = sample_feed();
        doc.items[0].id = doc.items[0].title.clone();
        let xml = to_rss(&doc).unwrap();
        assert!(xml.contains(r#"<guid isPermaLink="false">B</guid>"#));
    }

    #[test]
    fn cdata_end_is_broken() {
        let mut doc = sample_feed();
        doc.items[0].description = "a ]]> b".to_string();
        let xml = to_rss(&doc).unwrap();
        assert!(xml.contains("<description><![CDATA[a ]] > b]]></description>"));
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime("https://wrapt.dev/a.png"), "image/png");
        assert_eq!(image_mime("https://wrapt.dev/a.JPG"), "image/jpeg");
        assert_eq!(image_mime("https://wrapt.dev/a.svg"), "image/svg+xml");
    }

    const EXPECTED: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        r#"<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:atom="http://www.w3.org/2005/Atom"><channel>"#,
        r#"<title>Wrapt Blog</title><link>https://wrapt.dev/blog</link>"#,
        r#"<description>Keep up with useful web dev tips and follow my progress on building Craftsman.</description>"#,
        r#"<lastBuildDate>Mon, 01 Jul 2024 12:00:00 GMT</lastBuildDate>"#,
        r#"<docs>https://validator.w3.org/feed/docs/rss2.html</docs><generator>{GENERATOR}</generator><language>en</language>"#,
        r#"<image><title>Wrapt Blog</title><url>https://wrapt.dev/favicon-32x32.png</url><link>https://wrapt.dev/blog</link></image>"#,
        r#"<copyright>All rights reserved 2024, Wrapt</copyright>"#,
        r#"<atom:link href="https://wrapt.dev/blog/feed.xml" rel="self" type="application/rss+xml"/>"#,
        r#"<item><title>B</title><link>https://wrapt.dev/blog/post-b</link>"#,
        r#"<guid isPermaLink="true">https://wrapt.dev/blog/post-b</guid><pubDate>Sat, 01 Jun 2024 10:30:00 GMT</pubDate>"#,
        r#"<description><![CDATA[description of B]]></description><dc:creator>Y</dc:creator></item>"#,
        r#"<item><title>A &amp; &lt;friends&gt;</title><link>https://wrapt.dev/blog/post-a</link>"#,
        r#"<guid isPermaLink="true">https://wrapt.dev/blog/post-a</guid><pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>"#,
        r#"<description><![CDATA[description of A & <friends>]]></description><dc:creator>X</dc:creator><dc:creator>Z</dc:creator>"#,
        r#"<enclosure url="https://wrapt.dev/img/blog/a.png" length="0" type="image/png"/></item>"#,
        r#"</channel></rss>"#,
    );
}
