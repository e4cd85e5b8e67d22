use std::fmt::Write;

use chrono::{DateTime, Utc};

pub struct NewPost<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub twitter: Option<&'a str>,
    pub category: Option<&'a str>,
    pub date: DateTime<Utc>,
}

fn quote(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

pub fn render_header(post: &NewPost) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "<!--");
    let _ = writeln!(&mut buf, "+++");
    let _ = writeln!(&mut buf, "title = {}", quote(post.title));
    let _ = writeln!(&mut buf, "description = \"\"");
    let _ = writeln!(&mut buf, "date = \"{}\"", post.date.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(&mut buf, "category = {}", quote(post.category.unwrap_or_default()));
    let _ = writeln!(&mut buf, "tags = []");
    let _ = writeln!(&mut buf, "published = false");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "[[authors]]");
    let _ = writeln!(&mut buf, "name = {}", quote(post.author));
    if let Some(twitter) = post.twitter {
        let _ = writeln!(&mut buf, "twitter = {}", quote(twitter));
    }
    let _ = writeln!(&mut buf, "+++");
    let _ = writeln!(&mut buf, "-->");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "# {}", post.title);
    let _ = writeln!(&mut buf);
    buf
}

pub fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");
    let _ = writeln!(&mut buf, "Set `published = true` once the post is ready");

    buf
}

/// Lower-case ASCII slug, words joined by `-`
pub fn slug_from_title(title: &str) -> String {
    let ascii = unidecode::unidecode(title);
    let mut slug = String::new();
    let mut prev_dash = true;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::blog_meta::BlogMeta;
    use crate::content::PostSource;

    use super::*;

    #[test]
    fn test_url_from_title() {
        assert_eq!(slug_from_title("Post title of mine ábaco - dir2"), "post-title-of-mine-abaco-dir2");
        assert_eq!(slug_from_title("  Hello, World!  "), "hello-world");
        assert_eq!(slug_from_title("C# & .NET 6"), "c-net-6");
        assert_eq!(slug_from_title("!!!"), "");
    }

    #[test]
    fn test_scaffold_is_a_valid_draft() {
        let post = NewPost {
            title: "Building \"feeds\"",
            author: "Paul DeVito",
            twitter: Some("pdevito3"),
            category: Some("Craftsman"),
            date: Utc.with_ymd_and_hms(2024, 2, 27, 6, 20, 53).unwrap(),
        };
        let text = format!("{}{}", render_header(&post), render_body());

        let source = PostSource::from_text("building-feeds", "new.md", &text).unwrap();
        let meta = BlogMeta::from_raw(&source.origin, &source.raw_metadata).unwrap();
        assert_eq!(meta.title, "Building \"feeds\"");
        assert_eq!(meta.category, "Craftsman");
        assert_eq!(meta.date, post.date);
        assert_eq!(meta.authors[0].twitter.as_deref(), Some("pdevito3"));
        assert!(!meta.published);
    }
}
