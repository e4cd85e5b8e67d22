use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::content::PostSource;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ContentFormat {
    Markdown,
    Mdx,
}

pub struct ContentFile {
    pub slug: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(slug: String, file_path: PathBuf) -> io::Result<ContentFile> {
        if Self::guess_type(&file_path).is_none() {
            return Err(io::Error::new(ErrorKind::Unsupported, format!("Could not guess the type of the file {}", file_path.display())));
        }

        let raw_content = fs::read_to_string(&file_path)
            .map_err(|e| io::Error::new(e.kind(), format!("Error reading post: {} - file={}", e, file_path.display())))?;

        Ok(ContentFile {
            slug,
            file_path,
            raw_content,
        })
    }

    pub fn guess_type(file_name: &Path) -> Option<ContentFormat> {
        match file_name.extension()?.to_str()? {
            "md" => Some(ContentFormat::Markdown),
            "mdx" => Some(ContentFormat::Mdx),
            _ => None,
        }
    }

    pub fn into_source(self) -> io::Result<PostSource> {
        let origin = self.file_path.display().to_string();
        PostSource::from_text(&self.slug, &origin, &self.raw_content)
    }
}
