use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::feed::rss_renderer::{image_mime, push_text};
use crate::feed::{FeedAuthor, FeedDocument, FeedItem, GENERATOR};
use crate::text_utils::format_iso;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Renders the feed as an Atom 1.0 document
pub fn to_atom(doc: &FeedDocument) -> quick_xml::Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut feed = BytesStart::new("feed");
    feed.push_attribute(("xmlns", "http://www.w3.org/2005/Atom"));
    writer.write_event(Event::Start(feed))?;

    push_text(&mut writer, "id", &doc.id)?;
    push_text(&mut writer, "title", &doc.title)?;
    push_text(&mut writer, "updated", &format_iso(&doc.updated))?;
    push_text(&mut writer, "generator", GENERATOR)?;
    for author in &doc.authors {
        push_author(&mut writer, author)?;
    }
    push_link(&mut writer, "alternate", &doc.link, None)?;
    push_link(&mut writer, "self", &doc.feed_links.atom, Some("application/atom+xml"))?;
    push_text(&mut writer, "subtitle", &doc.description)?;
    push_text(&mut writer, "logo", &doc.image)?;
    push_text(&mut writer, "icon", &doc.favicon)?;
    push_text(&mut writer, "rights", &doc.copyright)?;

    for item in &doc.items {
        push_entry(&mut writer, item)?;
    }

    writer.write_event(Event::End(BytesEnd::new("feed")))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn push_entry(writer: &mut XmlWriter, item: &FeedItem) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("entry")))?;

    push_text(writer, "title", &item.title)?;
    push_text(writer, "id", &item.id)?;
    push_link(writer, "alternate", &item.link, None)?;
    // No separate modification date is tracked
    push_text(writer, "updated", &format_iso(&item.date))?;
    push_text(writer, "published", &format_iso(&item.date))?;

    // <summary type="html"><![CDATA[...]]></summary>
    let mut summary = BytesStart::new("summary");
    summary.push_attribute(("type", "html"));
    writer.write_event(Event::Start(summary))?;
    writer.write_event(Event::CData(BytesCData::new(item.description.replace("]]>", "]] >"))))?;
    writer.write_event(Event::End(BytesEnd::new("summary")))?;

    for author in &item.authors {
        push_author(writer, author)?;
    }

    if !item.image.is_empty() {
        push_link(writer, "enclosure", &item.image, Some(image_mime(&item.image)))?;
    }

    writer.write_event(Event::End(BytesEnd::new("entry")))?;
    Ok(())
}

fn push_author(writer: &mut XmlWriter, author: &FeedAuthor) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("author")))?;
    push_text(writer, "name", &author.name)?;
    if let Some(ref email) = author.email {
        push_text(writer, "email", email)?;
    }
    if let Some(ref link) = author.link {
        push_text(writer, "uri", link)?;
    }
    writer.write_event(Event::End(BytesEnd::new("author")))?;
    Ok(())
}

fn push_link(writer: &mut XmlWriter, rel: &str, href: &str, mime: Option<&str>) -> quick_xml::Result<()> {
    let mut link = BytesStart::new("link");
    link.push_attribute(("rel", rel));
    link.push_attribute(("href", href));
    if let Some(mime) = mime {
        link.push_attribute(("type", mime));
    }
    writer.write_event(Event::Empty(link))?;
    Ok(())
}
