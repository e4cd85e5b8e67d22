use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use spdlog::{info, warn};

use crate::feed::atom_renderer::to_atom;
use crate::feed::json_renderer::to_json_feed;
use crate::feed::rss_renderer::to_rss;
use crate::feed::FeedDocument;

pub const RSS_FILE: &str = "feed.xml";
pub const ATOM_FILE: &str = "atom.xml";
pub const JSON_FILE: &str = "feed.json";

#[derive(Debug, Clone, PartialEq)]
pub struct FeedPaths {
    pub rss: PathBuf,
    pub atom: PathBuf,
    pub json: PathBuf,
}

impl FeedPaths {
    pub fn new(out_dir: &Path) -> Self {
        FeedPaths {
            rss: out_dir.join(RSS_FILE),
            atom: out_dir.join(ATOM_FILE),
            json: out_dir.join(JSON_FILE),
        }
    }
}

/// The three encodings of one document
pub struct RenderedFeeds {
    pub rss: String,
    pub atom: String,
    pub json: String,
}

fn render_error(format: &str, e: impl std::fmt::Display) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, format!("Error rendering {} feed: {}", format, e))
}

pub fn render_feeds(doc: &FeedDocument) -> io::Result<RenderedFeeds> {
    Ok(RenderedFeeds {
        rss: to_rss(doc).map_err(|e| render_error("RSS", e))?,
        atom: to_atom(doc).map_err(|e| render_error("Atom", e))?,
        json: to_json_feed(doc).map_err(|e| render_error("JSON", e))?,
    })
}

/// `path` with `suffix` appended to its file name
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

fn remove_all<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) {
    for path in paths {
        let path = path.as_ref();
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != ErrorKind::NotFound {
                warn!("Could not remove {}: {}", path.display(), e);
            }
        }
    }
}

/// Puts the previous feeds back after a failed replacement
fn restore(installed: &[&Path], backups: &[(&Path, PathBuf)]) {
    remove_all(installed);
    for (path, bak) in backups {
        if let Err(e) = fs::rename(bak, path) {
            warn!("Could not restore {} from {}: {}", path.display(), bak.display(), e);
        }
    }
}

fn write_error(path: &Path, e: io::Error) -> io::Error {
    io::Error::new(e.kind(), format!("Error writing {}: {}", path.display(), e))
}

/// Renders every encoding, then replaces the three feed files in `out_dir`.
///
/// Nothing is written when rendering fails. New files are first written next
/// to their target. Previous feeds are moved to `*.bak` and put back if any
/// of the three cannot be replaced.
pub fn write_feeds(out_dir: &Path, doc: &FeedDocument) -> io::Result<FeedPaths> {
    let rendered = render_feeds(doc)?;
    let paths = FeedPaths::new(out_dir);

    fs::create_dir_all(out_dir)
        .map_err(|e| io::Error::new(e.kind(), format!("Error creating output directory {}: {}", out_dir.display(), e)))?;

    let targets = [
        (paths.rss.as_path(), rendered.rss.as_bytes()),
        (paths.atom.as_path(), rendered.atom.as_bytes()),
        (paths.json.as_path(), rendered.json.as_bytes()),
    ];
    let tmp_paths: Vec<PathBuf> = targets.iter().map(|(path, _)| sibling_path(path, ".tmp")).collect();

    for ((path, content), tmp) in targets.iter().zip(&tmp_paths) {
        if let Err(e) = fs::write(tmp, content) {
            remove_all(&tmp_paths);
            return Err(write_error(path, e));
        }
    }

    let mut backups: Vec<(&Path, PathBuf)> = vec![];
    for (path, _) in &targets {
        if !path.exists() {
            continue;
        }
        let bak = sibling_path(path, ".bak");
        if let Err(e) = fs::rename(path, &bak) {
            restore(&[], &backups);
            remove_all(&tmp_paths);
            return Err(write_error(path, e));
        }
        backups.push((*path, bak));
    }

    let mut installed: Vec<&Path> = vec![];
    for ((path, _), tmp) in targets.iter().zip(&tmp_paths) {
        if let Err(e) = fs::rename(tmp, path) {
            restore(&installed, &backups);
            remove_all(&tmp_paths);
            return Err(write_error(path, e));
        }
        installed.push(*path);
    }

    remove_all(backups.iter().map(|(_, bak)| bak));

    for path in installed {
        info!("Wrote {}", path.display());
    }
    Ok(paths)
}
