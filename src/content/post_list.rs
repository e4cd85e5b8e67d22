use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::content::content_file::ContentFile;
use crate::content::{ContentSource, PostSource};

/// Posts stored in a directory, either as `<slug>.md` / `<slug>.mdx` files
/// or as `<slug>/<post_file>.md(x)` directories one level down.
pub struct PostList {
    pub root_dir: PathBuf,
    pub post_file: String,
}

impl PostList {
    pub fn new(root_dir: PathBuf) -> Self {
        PostList {
            root_dir,
            post_file: "index".to_string(),
        }
    }

    /// `(slug, path)` of every post file directly inside the root dir
    pub fn retrieve_files(&self) -> io::Result<Vec<(String, PathBuf)>> {
        let mut posts = vec![];
        let entries = fs::read_dir(self.root_dir.as_path())?;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if ContentFile::guess_type(&path).is_none() {
                continue;
            }
            if let Some(slug) = path.file_stem().and_then(|s| s.to_str()) {
                posts.push((slug.to_string(), path.clone()));
            }
        }
        Ok(posts)
    }

    /// `(slug, path)` of every sub-directory holding a post file
    pub fn retrieve_dirs(&self) -> io::Result<Vec<(String, PathBuf)>> {
        let dirs = Self::list_dirs(self.root_dir.as_path())?;
        let mut post_dirs = vec![];
        for dir in dirs {
            let Some(slug) = dir.file_name().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            if let Some(post_path) = Self::contains_file(&dir, &self.post_file)? {
                post_dirs.push((slug, post_path));
            }
        }
        Ok(post_dirs)
    }

    fn list_dirs(posts_dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = vec![];
        let entries = fs::read_dir(posts_dir)?;
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }

    fn contains_file(dir: &Path, base_name: &str) -> io::Result<Option<PathBuf>> {
        for ext in ["md", "mdx"] {
            let candidate = dir.join(format!("{}.{}", base_name, ext));
            if candidate.is_file() {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}

impl ContentSource for PostList {
    fn list_posts(&self) -> io::Result<Vec<PostSource>> {
        if !self.root_dir.is_dir() {
            return Err(io::Error::new(
                ErrorKind::NotFound,
                format!("Content directory not found: {}", self.root_dir.display())));
        }

        let mut found = self.retrieve_files()?;
        found.extend(self.retrieve_dirs()?);
        // read_dir order is platform dependent
        found.sort_by(|(a, _), (b, _)| a.cmp(b));

        if let Some(pair) = found.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Duplicated post slug {} - file={}", pair[1].0, pair[1].1.display())));
        }

        found.into_iter()
            .map(|(slug, path)| ContentFile::from_file(slug, path)?.into_source())
            .collect()
    }
}
