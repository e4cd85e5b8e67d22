use std::io;
use std::io::ErrorKind;
use std::str::Lines;

use crate::content::RawMetadata;

const FENCE: &str = "+++";

fn invalid(msg: &str, origin: &str) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, format!("{} - file={}", msg, origin))
}

/// Splits the metadata block from the top of a post.
///
/// Example of post
/// ```text
/// <!--
/// +++
/// title = "Generating feeds"
/// date = "2024-06-01"
/// +++
/// -->
///
/// # Generating feeds
/// ```
///
/// The HTML comment around the block and a leading byte order mark are
/// optional. Returns the untyped
/// metadata and the remaining lines of the post.
pub fn parse_front_matter<'a>(origin: &str, content: &'a str) -> io::Result<(RawMetadata, Lines<'a>)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();
    let mut maybe_line = lines.next();

    // Skip optional HTML comment in the beginning
    let mut start_with_comment = false;

    loop {
        if let Some(line) = maybe_line {
            let line = line.trim();

            // Empty lines are ok
            if line.is_empty() {
                maybe_line = lines.next();
                continue;
            }

            if line == "<!--" {
                maybe_line = lines.next();
                start_with_comment = true;
            }
        }
        break;
    }

    // Blank lines between the comment and the fence
    while let Some(line) = maybe_line {
        if !line.trim().is_empty() {
            break;
        }
        maybe_line = lines.next();
    }

    match maybe_line {
        Some(line) if line.trim() == FENCE => {}
        _ => return Err(invalid("Metadata block is missing", origin)),
    }

    let mut block = String::new();
    loop {
        match lines.next() {
            Some(line) if line.trim() == FENCE => break,
            Some(line) => {
                block.push_str(line);
                block.push('\n');
            }
            None => return Err(invalid("End of metadata block is missing", origin)),
        }
    }

    if start_with_comment {
        // Let's find the end of the comment
        loop {
            match lines.next() {
                Some(line) if line.trim() == "-->" => break,
                Some(_) => continue,
                None => return Err(invalid("End of comment in the header is missing", origin)),
            }
        }
    }

    let raw = block.parse::<RawMetadata>()
        .map_err(|e| invalid(&format!("Invalid metadata block: {}", e.message()), origin))?;

    Ok((raw, lines))
}

#[cfg(test)]
mod tests {
    use crate::test_data::POST_DATA;

    use super::*;

    #[test]
    fn test_plain_block() {
        let content = r##"+++
title = "Hello"
tags = ["rust", "feeds"]
+++

# Hello
Body"##;
        let (raw, mut lines) = parse_front_matter("hello.md", content).unwrap();
        assert_eq!(raw.get("title").and_then(|v| v.as_str()), Some("Hello"));
        assert_eq!(raw.get("tags").and_then(|v| v.as_array()).map(|a| a.len()), Some(2));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("# Hello"));
    }

    #[test]
    fn test_block_inside_comment() {
        let (raw, lines) = parse_front_matter("post.md", POST_DATA).unwrap();
        assert_eq!(raw.get("title").and_then(|v| v.as_str()), Some("What I learned after 20+ years of software development"));
        let rest: Vec<&str> = lines.filter(|l| !l.is_empty()).collect();
        assert_eq!(rest.first(), Some(&"# What I learned after 20+ years of software development"));
    }

    #[test]
    fn test_leading_blank_lines() {
        let content = "\n\n  \n<!--\n\n+++\ntitle = \"x\"\n+++\n\n-->\n";
        let (raw, _lines) = parse_front_matter("x.md", content).unwrap();
        assert_eq!(raw.get("title").and_then(|v| v.as_str()), Some("x"));
    }

    #[test]
    fn test_byte_order_mark() {
        let (raw, _lines) = parse_front_matter("bom.md", "\u{feff}+++\ntitle = \"x\"\n+++\n").unwrap();
        assert_eq!(raw.get("title").and_then(|v| v.as_str()), Some("x"));

        let (raw, _lines) = parse_front_matter("bom.md", "\u{feff}<!--\n+++\ntitle = \"y\"\n+++\n-->\n").unwrap();
        assert_eq!(raw.get("title").and_then(|v| v.as_str()), Some("y"));
    }

    #[test]
    fn test_missing_block() {
        let err = parse_front_matter("missing.md", "# Just a title\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("file=missing.md"));

        let err = parse_front_matter("empty.md", "").unwrap_err();
        assert!(err.to_string().contains("Metadata block is missing"));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_front_matter("open.md", "+++\ntitle = \"x\"\n").unwrap_err();
        assert!(err.to_string().contains("End of metadata block is missing - file=open.md"));
    }

    #[test]
    fn test_unclosed_comment() {
        let err = parse_front_matter("comment.md", "<!--\n+++\ntitle = \"x\"\n+++\n").unwrap_err();
        assert!(err.to_string().contains("End of comment in the header is missing"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_front_matter("bad.md", "+++\ntitle = \n+++\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("Invalid metadata block"));
        assert!(err.to_string().contains("file=bad.md"));
    }
}
