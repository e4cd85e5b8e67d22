//! Discovers the posts of a blog and builds its syndication feeds.
//!
//! A build runs in two steps:
//!
//! 1. Content discovery ([`post_preview::get_all_post_previews`]) reads every
//!    post of a [`content::ContentSource`], validates its metadata block and
//!    returns the published posts newest first.
//! 2. The feed builder ([`feed::FeedDocument`]) maps those previews into feed
//!    items, and [`feed::writer::write_feeds`] renders RSS 2.0, Atom 1.0 and
//!    JSON Feed from the same document.

pub mod blog_meta;
pub mod config;
pub mod content;
pub mod feed;
pub mod logger;
pub mod new_post;
pub mod pipeline;
pub mod post_preview;
pub mod text_utils;
pub mod util;
mod test_data;
