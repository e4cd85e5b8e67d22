#[cfg(test)]
pub const POST_DATA: &str = r##"<!--
+++
title = "What I learned after 20+ years of software development"
description = "How to be a great software engineer?"
date = "2022-04-02 12:05:00.000"
category = "Career"
tags = ["career", "engineering"]
image = "/img/blog/what-i-learned.png"
discussion = "https://github.com/pdevito3/craftsman/discussions/1"

[[authors]]
name = "Thiago"
twitter = "thiagomg"
avatar = "https://avatars.example.com/thiago.png"
+++
-->

# What I learned after 20+ years of software development
How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer. After thinking for a while, I came up with a list of what I try to do myself.
"##;

/// Minimal post text with the given metadata fields
#[cfg(test)]
pub fn post_text(title: &str, date: &str, description: &str, author: Option<(&str, &str)>) -> String {
    let mut text = format!("+++\ntitle = \"{}\"\ndate = \"{}\"\ndescription = \"{}\"\n", title, date, description);
    if let Some((name, twitter)) = author {
        text.push_str(&format!("\n[[authors]]\nname = \"{}\"\ntwitter = \"{}\"\n", name, twitter));
    }
    text.push_str("+++\n\nBody\n");
    text
}

#[cfg(test)]
pub fn preview(slug: &str, title: &str, date: &str, authors: &[(&str, &str)]) -> crate::post_preview::PostPreview {
    use crate::blog_meta::{Author, BlogMeta};

    crate::post_preview::PostPreview {
        link: format!("/{}", slug),
        meta: BlogMeta {
            title: title.to_string(),
            description: format!("description of {}", title),
            date: crate::text_utils::parse_date_time(date).unwrap(),
            category: String::new(),
            tags: vec![],
            authors: authors.iter()
                .map(|(name, twitter)| Author {
                    name: name.to_string(),
                    twitter: Some(twitter.to_string()),
                    avatar: None,
                })
                .collect(),
            image: None,
            discussion: None,
            footer: None,
            published: true,
        },
    }
}

/// Two posts, newest first, the second one with an image and two authors
#[cfg(test)]
pub fn sample_feed() -> crate::feed::FeedDocument {
    use chrono::TimeZone;

    let mut older = preview("post-a", "A & <friends>", "2024-01-01", &[("X", "x"), ("Z", "z")]);
    older.meta.image = Some("/img/blog/a.png".to_string());
    let previews = vec![
        preview("post-b", "B", "2024-06-01 10:30:00", &[("Y", "y")]),
        older,
    ];
    let now = chrono::Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    crate::feed::FeedDocument::build(&previews, &crate::config::Config::default(), now).unwrap()
}
