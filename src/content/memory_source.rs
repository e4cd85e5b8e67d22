use std::io;

use crate::content::{ContentSource, PostSource};

/// Posts kept in memory as `(slug, text)` pairs, in insertion order.
#[derive(Default)]
pub struct MemoryContentSource {
    posts: Vec<(String, String)>,
}

impl MemoryContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, slug: &str, text: &str) -> &mut Self {
        self.posts.push((slug.to_string(), text.to_string()));
        self
    }
}

impl ContentSource for MemoryContentSource {
    fn list_posts(&self) -> io::Result<Vec<PostSource>> {
        self.posts.iter()
            .map(|(slug, text)| PostSource::from_text(slug, &format!("memory:{}", slug), text))
            .collect()
    }
}
