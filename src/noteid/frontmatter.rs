//! YAML frontmatter: the `---` fenced block at the top of a markdown note.
//!
//! ```text
//! ---
//! uuid: 3kTMd92jXa
//! tags: [inbox]
//! ---
//! # Body starts here
//! ```
//!
//! Only the header is ever re-serialized. The body is carried through
//! byte-for-byte.

use crate::error::{NoteIdError, Result};
use crate::model::Header;
use serde_yaml::Value;

const FENCE: &str = "---";
const DOC_END: &str = "...";
const LINE_BREAKS: &[char] = &['\r', '\n'];

/// Split a note into its header and body.
///
/// Returns `None` for the header when the note has no frontmatter block.
pub fn split<'a>(path: &str, content: &'a str) -> Result<(Option<Header>, &'a str)> {
    let mut lines = content.split_inclusive('\n');
    let first = match lines.next() {
        Some(line) => line,
        None => return Ok((None, content)),
    };
    if first.trim_end_matches(LINE_BREAKS) != FENCE {
        return Ok((None, content));
    }

    let mut offset = first.len();
    for line in lines {
        let trimmed = line.trim_end_matches(LINE_BREAKS);
        if trimmed == FENCE || trimmed == DOC_END {
            let header = parse_header(path, &content[first.len()..offset])?;
            return Ok((Some(header), &content[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(NoteIdError::frontmatter(path, "unterminated frontmatter block"))
}

fn parse_header(path: &str, yaml: &str) -> Result<Header> {
    if yaml.trim().is_empty() {
        return Ok(Header::new());
    }
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(Value::Null) => Ok(Header::new()),
        Ok(_) => Err(NoteIdError::frontmatter(path, "frontmatter is not a mapping")),
        Err(e) => Err(NoteIdError::frontmatter(path, e)),
    }
}

/// Render a header and body back into note text.
pub fn render(path: &str, header: &Header, body: &str, newline: &str) -> Result<String> {
    let yaml = render_header(header).map_err(|e| NoteIdError::frontmatter(path, e))?;
    let yaml = if newline == "\n" {
        yaml
    } else {
        yaml.replace('\n', newline)
    };
    Ok(format!("{FENCE}{newline}{yaml}{FENCE}{newline}{body}"))
}

fn render_header(header: &Header) -> std::result::Result<String, serde_yaml::Error> {
    if header.is_empty() {
        return serde_yaml::to_string(header);
    }
    let mut out = String::new();
    for (key, value) in header {
        match value {
            Value::String(text) if number_like(text) => {
                out.push_str(serde_yaml::to_string(key)?.trim_end());
                out.push_str(": '");
                out.push_str(text);
                out.push_str("'\n");
            }
            _ => {
                let mut entry = Header::new();
                entry.insert(key.clone(), value.clone());
                out.push_str(&serde_yaml::to_string(&entry)?);
            }
        }
    }
    Ok(out)
}

/// Strings that YAML 1.1 readers resolve to numbers, dates or sexagesimals
/// (`20240307_030405`, `2024-03-07`, `12:30`). serde_yaml leaves some of
/// these bare, so they are always single-quoted.
fn number_like(text: &str) -> bool {
    let starts_ok = text
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == '.');
    starts_ok
        && text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '_' | '.' | ':' | '-' | '+'))
}

/// Line ending used by the note, judged from its first line.
pub fn newline_of(content: &str) -> &'static str {
    match content.find('\n') {
        Some(i) if i > 0 && content.as_bytes()[i - 1] == b'\r' => "\r\n",
        _ => "\n",
    }
}

/// Apply `patch` to the note's header.
///
/// Returns the new note text, or `None` when the patch reported no change.
/// A note without frontmatter starts from an empty header.
pub fn update(
    path: &str,
    content: &str,
    patch: &mut dyn FnMut(&mut Header) -> bool,
) -> Result<Option<String>> {
    let (header, body) = split(path, content)?;
    let mut header = header.unwrap_or_default();
    if !patch(&mut header) {
        return Ok(None);
    }
    render(path, &header, body, newline_of(content)).map(Some)
}
