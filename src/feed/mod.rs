use std::io;
use std::io::ErrorKind;

use chrono::{DateTime, Datelike, Utc};

use crate::config::{join_url, Config, ItemId};
use crate::post_preview::PostPreview;

pub mod atom_renderer;
pub mod json_renderer;
pub mod rss_renderer;
pub mod writer;

pub const GENERATOR: &str = concat!("postfeed ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub struct FeedAuthor {
    pub name: String,
    pub email: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedLinks {
    pub rss: String,
    pub json: String,
    pub atom: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub link: String,
    pub description: String,
    /// Full post bodies are not syndicated
    pub content: Option<String>,
    pub authors: Vec<FeedAuthor>,
    pub date: DateTime<Utc>,
    /// Absolute URL, or empty when the post has no image
    pub image: String,
}

/// One feed, rendered by each of the renderers
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub language: String,
    pub image: String,
    pub favicon: String,
    pub copyright: String,
    pub updated: DateTime<Utc>,
    pub feed_links: FeedLinks,
    pub authors: Vec<FeedAuthor>,
    pub items: Vec<FeedItem>,
}

impl FeedDocument {
    /// Maps the previews into feed items, keeping their order.
    /// Fails when any item lacks a title, link or id.
    pub fn build(previews: &[PostPreview], config: &Config, now: DateTime<Utc>) -> io::Result<FeedDocument> {
        let site = &config.site;
        let blog_url = site.blog_url();
        let default_author = FeedAuthor {
            name: site.author.name.clone(),
            email: site.author.email.clone(),
            link: site.author.link.clone(),
        };

        let items = previews.iter()
            .map(|preview| map_item(preview, config, &blog_url, &default_author))
            .collect::<io::Result<Vec<_>>>()?;

        Ok(FeedDocument {
            id: blog_url.clone(),
            title: site.title.clone(),
            description: site.description.clone(),
            link: blog_url.clone(),
            language: site.language.clone(),
            image: join_url(&site.base_url, &site.image),
            favicon: join_url(&site.base_url, &site.favicon),
            copyright: format!("All rights reserved {}, {}", now.year(), site.copyright_holder),
            updated: now,
            feed_links: FeedLinks {
                rss: format!("{}/feed.xml", blog_url),
                json: format!("{}/feed.json", blog_url),
                atom: format!("{}/atom.xml", blog_url),
            },
            authors: vec![default_author],
            items,
        })
    }
}

fn map_item(preview: &PostPreview, config: &Config, blog_url: &str, default_author: &FeedAuthor) -> io::Result<FeedItem> {
    let meta = &preview.meta;
    let link = if preview.link.trim_matches('/').is_empty() {
        String::new()
    } else {
        format!("{}{}", blog_url, preview.link)
    };

    let id = match config.feed.item_id {
        ItemId::Link => link.clone(),
        ItemId::Title => meta.title.clone(),
    };

    let authors = if meta.authors.is_empty() {
        vec![default_author.clone()]
    } else {
        meta.authors.iter()
            .map(|author| FeedAuthor {
                name: author.name.clone(),
                email: None,
                link: author.profile_url(),
            })
            .collect()
    };

    let image = match meta.image {
        Some(ref path) if !path.trim().is_empty() => join_url(&config.site.base_url, path),
        _ => String::new(),
    };

    let item = FeedItem {
        id,
        title: meta.title.clone(),
        link,
        description: meta.description.clone(),
        content: None,
        authors,
        date: meta.date,
        image,
    };

    for (field, value) in [("title", &item.title), ("link", &item.link), ("id", &item.id)] {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Feed item is missing its {} - post={}", field, preview.link)));
        }
    }

    Ok(item)
}
