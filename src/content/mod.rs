use std::io;

use crate::content::front_matter::parse_front_matter;

pub mod content_file;
pub mod front_matter;
pub mod memory_source;
pub mod post_list;

/// Metadata block as written by the author, before validation.
pub type RawMetadata = toml::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct PostSource {
    pub slug: String,
    /// Where the post came from, used to identify it in errors
    pub origin: String,
    pub raw_metadata: RawMetadata,
}

impl PostSource {
    pub fn from_text(slug: &str, origin: &str, content: &str) -> io::Result<PostSource> {
        let (raw_metadata, _body) = parse_front_matter(origin, content)?;
        Ok(PostSource {
            slug: slug.to_string(),
            origin: origin.to_string(),
            raw_metadata,
        })
    }
}

/// Anything able to enumerate the posts of a blog.
pub trait ContentSource {
    fn list_posts(&self) -> io::Result<Vec<PostSource>>;
}
