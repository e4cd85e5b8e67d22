use std::io;
use std::io::ErrorKind;

use chrono::{DateTime, Utc};
use toml::Value;

use crate::content::RawMetadata;
use crate::text_utils::{format_iso, parse_date_time};

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub twitter: Option<String>,
    pub avatar: Option<String>,
}

impl Author {
    pub fn profile_url(&self) -> Option<String> {
        self.twitter.as_ref().map(|handle| format!("https://twitter.com/{}", handle))
    }
}

/// Validated metadata of a post
#[derive(Debug, Clone, PartialEq)]
pub struct BlogMeta {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub tags: Vec<String>,
    pub authors: Vec<Author>,
    pub image: Option<String>,
    pub discussion: Option<String>,
    pub footer: Option<String>,
    pub published: bool,
}

/// What a post page shows below the content
#[derive(Debug, PartialEq)]
pub enum PageFooter<'a> {
    Html(&'a str),
    Discussion(&'a str),
}

impl BlogMeta {
    pub fn from_raw(origin: &str, raw: &RawMetadata) -> io::Result<BlogMeta> {
        let fields = Fields { origin, raw };

        let title = fields.required_str("title")?;
        if title.trim().is_empty() {
            return Err(fields.error("Field title must not be empty"));
        }

        let description = fields.required_str("description")?;
        let date = fields.date("date")?;
        let category = fields.optional_str("category")?.unwrap_or_default();
        let tags = fields.str_list("tags")?;
        let authors = fields.authors("authors")?;
        let image = fields.optional_str("image")?;
        let discussion = fields.optional_str("discussion")?;
        let footer = fields.optional_str("footer")?;
        let published = fields.optional_bool("published")?.unwrap_or(true);

        Ok(BlogMeta {
            title,
            description,
            date,
            category,
            tags,
            authors,
            image,
            discussion,
            footer,
            published,
        })
    }

    /// Date as an ISO 8601 string, re-parseable by any consumer
    pub fn date_iso(&self) -> String {
        format_iso(&self.date)
    }

    pub fn primary_author(&self) -> Option<&Author> {
        self.authors.first()
    }

    /// The footer HTML wins over the discussion link
    pub fn page_footer(&self) -> Option<PageFooter<'_>> {
        if let Some(ref footer) = self.footer {
            return Some(PageFooter::Html(footer));
        }
        self.discussion.as_deref().map(PageFooter::Discussion)
    }
}

struct Fields<'a> {
    origin: &'a str,
    raw: &'a RawMetadata,
}

impl<'a> Fields<'a> {
    fn error(&self, msg: &str) -> io::Error {
        io::Error::new(ErrorKind::InvalidData, format!("{} - file={}", msg, self.origin))
    }

    fn wrong_type(&self, key: &str, expected: &str) -> io::Error {
        self.error(&format!("Field {} must be {}", key, expected))
    }

    fn required(&self, key: &str) -> io::Result<&'a Value> {
        self.raw.get(key).ok_or_else(|| self.error(&format!("Missing required field {}", key)))
    }

    fn required_str(&self, key: &str) -> io::Result<String> {
        match self.required(key)? {
            Value::String(s) => Ok(s.clone()),
            _ => Err(self.wrong_type(key, "a string")),
        }
    }

    fn optional_str(&self, key: &str) -> io::Result<Option<String>> {
        match self.raw.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.wrong_type(key, "a string")),
        }
    }

    fn optional_bool(&self, key: &str) -> io::Result<Option<bool>> {
        match self.raw.get(key) {
            None => Ok(None),
            Some(Value::Boolean(b)) => Ok(Some(*b)),
            Some(_) => Err(self.wrong_type(key, "a boolean")),
        }
    }

    fn str_list(&self, key: &str) -> io::Result<Vec<String>> {
        let Some(value) = self.raw.get(key) else {
            return Ok(vec![]);
        };
        let Value::Array(items) = value else {
            return Err(self.wrong_type(key, "a list of strings"));
        };
        items.iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(|| self.wrong_type(key, "a list of strings")))
            .collect()
    }

    fn date(&self, key: &str) -> io::Result<DateTime<Utc>> {
        // Both `date = "2024-06-01"` and the bare TOML date `date = 2024-06-01` are accepted
        let date_str = match self.required(key)? {
            Value::String(s) => s.clone(),
            Value::Datetime(dt) => dt.to_string(),
            _ => return Err(self.wrong_type(key, "a date")),
        };
        parse_date_time(&date_str).map_err(|e| self.error(&e))
    }

    fn authors(&self, key: &str) -> io::Result<Vec<Author>> {
        let Some(value) = self.raw.get(key) else {
            return Ok(vec![]);
        };
        let Value::Array(items) = value else {
            return Err(self.wrong_type(key, "a list of authors"));
        };

        let mut authors = Vec::with_capacity(items.len());
        for item in items {
            let Value::Table(table) = item else {
                return Err(self.wrong_type(key, "a list of authors"));
            };
            let author = Fields { origin: self.origin, raw: table };
            authors.push(Author {
                name: author.required_str("name")?,
                twitter: author.optional_str("twitter")?,
                avatar: author.optional_str("avatar")?,
            });
        }
        Ok(authors)
    }
}
