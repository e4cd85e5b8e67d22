use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, io};

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
    pub link: Option<String>,
}

impl Default for Author {
    fn default() -> Self {
        Author {
            name: "Paul DeVito".to_string(),
            email: Some("pdevito3@gmail.com".to_string()),
            link: Some("https://twitter.com/@pdevito3".to_string()),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Site {
    pub title: String,
    pub description: String,
    pub base_url: String,
    pub blog_path: String,
    pub language: String,
    pub copyright_holder: String,
    pub image: String,
    pub favicon: String,
    pub author: Author,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            title: "Wrapt Blog".to_string(),
            description: "Keep up with useful web dev tips and follow my progress on building Craftsman.".to_string(),
            base_url: "https://wrapt.dev".to_string(),
            blog_path: "/blog".to_string(),
            language: "en".to_string(),
            copyright_holder: "Wrapt".to_string(),
            image: "/favicon-32x32.png".to_string(),
            favicon: "/favicon.ico".to_string(),
            author: Author::default(),
        }
    }
}

impl Site {
    /// Base URL joined with the blog path, e.g. `https://wrapt.dev/blog`
    pub fn blog_url(&self) -> String {
        join_url(&self.base_url, &self.blog_path)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            content_dir: PathBuf::from("posts"),
            out_dir: PathBuf::from("out"),
        }
    }
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemId {
    #[default]
    Link,
    Title,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Feed {
    pub item_id: ItemId,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default = "default_log_to_console")]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

fn default_log_to_console() -> bool {
    true
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub feed: Feed,
    pub log: Option<Log>,
}

/// Joins a base URL and a root-relative path with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, path)
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };
    if !str_path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .and_then(|p| p.to_str())
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Could not resolve executable directory"))?;
    Ok(PathBuf::from(str_path.replace("${exe_dir}", exe_dir)))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
        out_dir: parse_path(cfg.paths.out_dir)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match std::fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
