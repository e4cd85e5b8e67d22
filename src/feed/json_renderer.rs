use serde::Serialize;

use crate::feed::{FeedAuthor, FeedDocument, FeedItem};
use crate::text_utils::format_iso;

pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";

#[derive(Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    feed_url: &'a str,
    description: &'a str,
    icon: &'a str,
    favicon: &'a str,
    language: &'a str,
    authors: Vec<JsonAuthor<'a>>,
    items: Vec<JsonItem<'a>>,
}

#[derive(Serialize)]
struct JsonAuthor<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_html: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty")]
    image: &'a str,
    date_published: String,
    date_modified: String,
    authors: Vec<JsonAuthor<'a>>,
}

fn is_empty(s: &&str) -> bool {
    s.is_empty()
}

impl<'a> From<&'a FeedAuthor> for JsonAuthor<'a> {
    fn from(author: &'a FeedAuthor) -> Self {
        JsonAuthor {
            name: &author.name,
            url: author.link.as_deref(),
        }
    }
}

impl<'a> From<&'a FeedItem> for JsonItem<'a> {
    fn from(item: &'a FeedItem) -> Self {
        JsonItem {
            id: &item.id,
            url: &item.link,
            title: &item.title,
            summary: &item.description,
            content_html: item.content.as_deref(),
            image: &item.image,
            date_published: format_iso(&item.date),
            date_modified: format_iso(&item.date),
            authors: item.authors.iter().map(JsonAuthor::from).collect(),
        }
    }
}

/// Renders the feed as a JSON Feed 1.1 document
pub fn to_json_feed(doc: &FeedDocument) -> serde_json::Result<String> {
    let feed = JsonFeed {
        version: JSON_FEED_VERSION,
        title: &doc.title,
        home_page_url: &doc.link,
        feed_url: &doc.feed_links.json,
        description: &doc.description,
        icon: &doc.image,
        favicon: &doc.favicon,
        language: &doc.language,
        authors: doc.authors.iter().map(JsonAuthor::from).collect(),
        items: doc.items.iter().map(JsonItem::from).collect(),
    };
    serde_json::to_string_pretty(&feed)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::test_data::sample_feed;

    use super::*;

    #[test]
    fn render_json() {
        let rendered = to_json_feed(&sample_feed()).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["version"], "https://jsonfeed.org/version/1.1");
        assert_eq!(value["title"], "Wrapt Blog");
        assert_eq!(value["home_page_url"], "https://wrapt.dev/blog");
        assert_eq!(value["feed_url"], "https://wrapt.dev/blog/feed.json");
        assert_eq!(value["icon"], "https://wrapt.dev/favicon-32x32.png");
        assert_eq!(value["favicon"], "https://wrapt.dev/favicon.ico");
        assert_eq!(value["authors"], json!([{"name": "Paul DeVito", "url": "https://twitter.com/@pdevito3"}]));

        let items = value["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], json!({
            "id": "https://wrapt.dev/blog/post-b",
            "url": "https://wrapt.dev/blog/post-b",
            "title": "B",
            "summary": "description of B",
            "date_published": "2024-06-01T10:30:00.000Z",
            "date_modified": "2024-06-01T10:30:00.000Z",
            "authors": [{"name": "Y", "url": "https://twitter.com/y"}]
        }));

        assert_eq!(items[1]["title"], "A & <friends>");
        assert_eq!(items[1]["image"], "https://wrapt.dev/img/blog/a.png");
        assert_eq!(items[1]["authors"].as_array().unwrap().len(), 2);
        assert!(items[1].get("content_html").is_none());
    }
}
