use std::collections::{BTreeSet, HashMap};
use std::io;
use std::io::ErrorKind;

use spdlog::{debug, warn};

use crate::blog_meta::BlogMeta;
use crate::content::ContentSource;

/// Link and metadata of a post, without its body
#[derive(Debug, Clone, PartialEq)]
pub struct PostPreview {
    /// Root-relative, e.g. `/my-post`. Does not include the blog path.
    pub link: String,
    pub meta: BlogMeta,
}

pub fn link_from_slug(slug: &str) -> String {
    format!("/{}", slug.to_lowercase())
}

/// Slugs end up in URLs as they are, so only unreserved URL characters are accepted
fn check_slug(slug: &str, origin: &str) -> io::Result<()> {
    let valid = !slug.is_empty()
        && slug.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'));
    if valid {
        return Ok(());
    }
    Err(io::Error::new(
        ErrorKind::InvalidData,
        format!("Invalid post slug {:?}, use only ASCII letters, digits, '-', '_', '.' or '~' - file={}", slug, origin)))
}

/// Every published post of the source, newest first.
///
/// Posts sharing a date keep the order the source listed them in. Two
/// published posts mapping to the same link are an error.
pub fn get_all_post_previews(source: &dyn ContentSource) -> io::Result<Vec<PostPreview>> {
    let sources = source.list_posts()?;

    let mut previews = Vec::with_capacity(sources.len());
    let mut origins: HashMap<String, String> = HashMap::new();
    for post in sources {
        let meta = BlogMeta::from_raw(&post.origin, &post.raw_metadata)?;
        if !meta.published {
            warn!("Skipping unpublished post {}", post.origin);
            continue;
        }
        check_slug(&post.slug, &post.origin)?;

        let link = link_from_slug(&post.slug);
        if let Some(first) = origins.insert(link.clone(), post.origin.clone()) {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Duplicated post link {} - file={} - file={}", link, first, post.origin)));
        }

        debug!("Found post {} - file={}", post.slug, post.origin);
        previews.push(PostPreview { link, meta });
    }

    // sort_by is stable
    previews.sort_by(|a, b| b.meta.date.cmp(&a.meta.date));
    Ok(previews)
}

/// Sorted, de-duplicated tags of all posts
pub fn all_tags(posts: &[PostPreview]) -> Vec<String> {
    posts.iter()
        .flat_map(|p| p.meta.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted, de-duplicated categories of all posts
pub fn all_categories(posts: &[PostPreview]) -> Vec<String> {
    posts.iter()
        .map(|p| p.meta.category.clone())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn filter_by_tag<'a>(posts: &'a [PostPreview], tag: &str) -> Vec<&'a PostPreview> {
    posts.iter().filter(|p| p.meta.tags.iter().any(|t| t == tag)).collect()
}

pub fn filter_by_category<'a>(posts: &'a [PostPreview], category: &str) -> Vec<&'a PostPreview> {
    posts.iter().filter(|p| p.meta.category == category).collect()
}

#[cfg(test)]
mod tests {
    use crate::content::memory_source::MemoryContentSource;
    use crate::test_data::post_text;

    use super::*;

    fn two_posts() -> MemoryContentSource {
        let mut source = MemoryContentSource::new();
        source.add("post-a", &post_text("A", "2024-01-01", "d1", Some(("X", "x"))));
        source.add("post-b", &post_text("B", "2024-06-01", "d2", Some(("Y", "y"))));
        source
    }

    fn tagged(title: &str, category: &str, tags: &str) -> String {
        format!("+++\ntitle = \"{}\"\ndescription = \"d\"\ndate = \"2024-01-01\"\ncategory = \"{}\"\ntags = [{}]\n+++\n", title, category, tags)
    }

    #[test]
    fn test_newest_first() -> io::Result<()> {
        let previews = get_all_post_previews(&two_posts())?;
        let titles: Vec<&str> = previews.iter().map(|p| p.meta.title.as_str()).collect();
        assert_eq!(titles, ["B", "A"]);
        assert_eq!(previews[0].link, "/post-b");
        assert_eq!(previews[1].link, "/post-a");
        Ok(())
    }

    #[test]
    fn test_link_is_lower_case() {
        assert_eq!(link_from_slug("My-Post"), "/my-post");
        assert_eq!(link_from_slug("my-post"), "/my-post");
    }

    #[test]
    fn test_ties_keep_source_order() -> io::Result<()> {
        let mut source = MemoryContentSource::new();
        source.add("first", &post_text("First", "2024-03-01", "d", None));
        source.add("older", &post_text("Older", "2023-03-01", "d", None));
        source.add("second", &post_text("Second", "2024-03-01", "d", None));
        source.add("third", &post_text("Third", "2024-03-01 00:00:00", "d", None));

        let previews = get_all_post_previews(&source)?;
        let links: Vec<&str> = previews.iter().map(|p| p.link.as_str()).collect();
        assert_eq!(links, ["/first", "/second", "/third", "/older"]);
        Ok(())
    }

    #[test]
    fn test_idempotent() -> io::Result<()> {
        let source = two_posts();
        let first = get_all_post_previews(&source)?;
        let second = get_all_post_previews(&source)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_skips_unpublished() -> io::Result<()> {
        let mut source = two_posts();
        source.add("draft", "+++\ntitle = \"Draft\"\ndescription = \"d\"\ndate = \"2025-01-01\"\npublished = false\n+++\n");

        let previews = get_all_post_previews(&source)?;
        assert_eq!(previews.len(), 2);
        assert!(previews.iter().all(|p| p.meta.title != "Draft"));
        Ok(())
    }

    #[test]
    fn test_invalid_post_fails_everything() {
        let mut source = two_posts();
        source.add("broken", "+++\ntitle = \"Broken\"\ndate = \"2025-01-01\"\n+++\n");

        let err = get_all_post_previews(&source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "Missing required field description - file=memory:broken");
    }

    #[test]
    fn test_links_differing_in_case_collide() {
        let mut source = MemoryContentSource::new();
        source.add("My-Post", &post_text("Upper", "2024-01-01", "d1", None));
        source.add("my-post", &post_text("Lower", "2024-02-01", "d2", None));

        let err = get_all_post_previews(&source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "Duplicated post link /my-post - file=memory:My-Post - file=memory:my-post");
    }

    #[test]
    fn test_draft_does_not_claim_link() -> io::Result<()> {
        let mut source = MemoryContentSource::new();
        source.add("My-Post", "+++\ntitle = \"Draft\"\ndescription = \"d\"\ndate = \"2025-01-01\"\npublished = false\n+++\n");
        source.add("my-post", &post_text("Lower", "2024-02-01", "d2", None));

        let previews = get_all_post_previews(&source)?;
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].link, "/my-post");
        Ok(())
    }

    #[test]
    fn test_slug_must_be_url_safe() -> io::Result<()> {
        let mut source = MemoryContentSource::new();
        source.add("my post", &post_text("Spaced", "2024-01-01", "d", None));
        let err = get_all_post_previews(&source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().starts_with("Invalid post slug \"my post\""));
        assert!(err.to_string().ends_with("file=memory:my post"));

        let mut source = MemoryContentSource::new();
        source.add("ábaco", &post_text("Accent", "2024-01-01", "d", None));
        assert!(get_all_post_previews(&source).is_err());

        let mut source = MemoryContentSource::new();
        source.add("v1.2_release-notes~draft", &post_text("Ok", "2024-01-01", "d", None));
        assert_eq!(get_all_post_previews(&source)?[0].link, "/v1.2_release-notes~draft");
        Ok(())
    }

    #[test]
    fn test_facets() -> io::Result<()> {
        let mut source = MemoryContentSource::new();
        source.add("one", &tagged("One", "Craftsman", "\"dotnet\", \"cli\""));
        source.add("two", &tagged("Two", "Web", "\"cli\", \"react\""));
        source.add("three", &tagged("Three", "Craftsman", ""));
        source.add("four", &post_text("Four", "2024-01-01", "d", None));
        let previews = get_all_post_previews(&source)?;

        assert_eq!(all_tags(&previews), ["cli", "dotnet", "react"]);
        assert_eq!(all_categories(&previews), ["Craftsman", "Web"]);

        let cli: Vec<&str> = filter_by_tag(&previews, "cli").iter().map(|p| p.meta.title.as_str()).collect();
        assert_eq!(cli, ["One", "Two"]);

        let craftsman: Vec<&str> = filter_by_category(&previews, "Craftsman").iter().map(|p| p.meta.title.as_str()).collect();
        assert_eq!(craftsman, ["One", "Three"]);

        assert!(filter_by_tag(&previews, "go").is_empty());
        Ok(())
    }
}
