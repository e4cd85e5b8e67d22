use std::io;

use chrono::{DateTime, Utc};
use spdlog::info;

use crate::config::Config;
use crate::content::post_list::PostList;
use crate::content::ContentSource;
use crate::feed::writer::{write_feeds, FeedPaths};
use crate::feed::FeedDocument;
use crate::post_preview::{get_all_post_previews, PostPreview};

pub struct BuildReport {
    pub post_count: usize,
    pub paths: FeedPaths,
}

pub fn content_source(config: &Config) -> PostList {
    PostList::new(config.paths.content_dir.clone())
}

pub fn discover(config: &Config) -> io::Result<Vec<PostPreview>> {
    discover_from(&content_source(config))
}

pub fn discover_from(source: &dyn ContentSource) -> io::Result<Vec<PostPreview>> {
    let previews = get_all_post_previews(source)?;
    info!("Found {} published posts", previews.len());
    Ok(previews)
}

/// Discovery followed by the feed build. Either all three feeds are
/// written or none is.
pub fn run_build(config: &Config, source: &dyn ContentSource, now: DateTime<Utc>) -> io::Result<BuildReport> {
    let previews = discover_from(source)?;
    let doc = FeedDocument::build(&previews, config, now)?;
    let paths = write_feeds(&config.paths.out_dir, &doc)?;

    Ok(BuildReport {
        post_count: previews.len(),
        paths,
    })
}
