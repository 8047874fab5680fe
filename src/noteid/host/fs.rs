use super::{HeaderPatch, NoteHost};
use crate::error::{NoteIdError, Result};
use crate::frontmatter;
use crate::model::{Document, Header};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use uuid::Uuid;
use walkdir::{DirEntry, WalkDir};

/// A vault: a directory tree of markdown notes.
///
/// Dot-directories (`.obsidian`, `.git`, `.trash`, ...) are not part of the
/// collection.
pub struct VaultHost {
    root: PathBuf,
    active: Option<PathBuf>,
}

impl VaultHost {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(NoteIdError::Host(format!(
                "Vault root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self {
            root: root.canonicalize()?,
            active: None,
        })
    }

    /// Mark a file as the focused document. Relative paths are taken
    /// relative to the vault root.
    pub fn with_active(mut self, path: impl Into<PathBuf>) -> Self {
        self.active = Some(path.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn absolute_path(&self, document: &Document) -> PathBuf {
        self.root.join(&document.path)
    }

    fn relative_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => rel
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => path.to_string_lossy().into_owned(),
        }
    }

    fn document_for(&self, path: &Path) -> Result<Document> {
        let metadata = fs::metadata(path)?;
        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or_else(|_| SystemTime::now());
        let created_at = DateTime::<Utc>::from(created).timestamp_millis();
        Ok(Document::new(self.relative_path(path), created_at))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = dir.join(format!(".{}.{}.tmp", name, Uuid::new_v4()));
    fs::write(&tmp, content)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

impl NoteHost for VaultHost {
    fn list_note_documents(&self) -> Result<Vec<Document>> {
        log::debug!("Discovering notes under {}", self.root.display());
        let mut documents = Vec::new();
        let walker = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let document = self.document_for(entry.path())?;
            if document.is_note() {
                documents.push(document);
            }
        }

        documents.sort_by(|a, b| a.path.cmp(&b.path));
        log::debug!("Found {} notes", documents.len());
        Ok(documents)
    }

    fn header(&self, document: &Document) -> Option<Header> {
        let path = self.absolute_path(document);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::debug!("Cannot read {}: {}", path.display(), e);
                return None;
            }
        };
        match frontmatter::split(&document.path, &content) {
            Ok((header, _)) => header,
            Err(e) => {
                log::debug!("{}", e);
                None
            }
        }
    }

    fn mutate_header(&mut self, document: &Document, patch: &mut HeaderPatch<'_>) -> Result<bool> {
        let path = self.absolute_path(document);
        if !path.is_file() {
            return Err(NoteIdError::DocumentNotFound(document.path.clone()));
        }

        let content = fs::read_to_string(&path)?;
        match frontmatter::update(&document.path, &content, patch)? {
            Some(updated) => {
                write_atomically(&path, &updated)?;
                log::debug!("Wrote header of {}", document.path);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn active_document(&self) -> Option<Document> {
        let active = self.active.as_ref()?;
        let path = if active.is_absolute() {
            active.clone()
        } else {
            self.root.join(active)
        };
        let path = path.canonicalize().ok()?;
        if !path.is_file() || !path.starts_with(&self.root) {
            return None;
        }
        self.document_for(&path).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;
    use tempfile::TempDir;

    fn vault(files: &[(&str, &str)]) -> (TempDir, VaultHost) {
        let dir = TempDir::new().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        let host = VaultHost::new(dir.path()).unwrap();
        (dir, host)
    }

    fn set_uuid(value: &'static str) -> impl FnMut(&mut Header) -> bool {
        move |h: &mut Header| {
            h.insert(Value::from("uuid"), Value::from(value));
            true
        }
    }

    #[test]
    fn test_rejects_missing_root() {
        let dir = TempDir::new().unwrap();
        assert!(VaultHost::new(dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_lists_only_markdown_outside_hidden_dirs() {
        let (_dir, host) = vault(&[
            ("a.md", "a"),
            ("sub/b.md", "b"),
            ("sub/deep/c.md", "c"),
            ("image.png", ""),
            (".obsidian/workspace.md", ""),
            ("sub/.trash/old.md", ""),
        ]);
        let paths: Vec<_> = host
            .list_note_documents()
            .unwrap()
            .into_iter()
            .map(|d| d.path)
            .collect();
        assert_eq!(paths, vec!["a.md", "sub/b.md", "sub/deep/c.md"]);
    }

    #[test]
    fn test_documents_have_creation_time() {
        let (_dir, host) = vault(&[("a.md", "a")]);
        let docs = host.list_note_documents().unwrap();
        assert!(docs[0].created_at > 0);
        assert_eq!(docs[0].extension, "md");
    }

    #[test]
    fn test_header_reads_frontmatter() {
        let (_dir, host) = vault(&[("a.md", "---\nuuid: x\n---\nbody"), ("b.md", "body")]);
        let a = host.header(&Document::new("a.md", 0)).unwrap();
        assert_eq!(a.get("uuid").and_then(Value::as_str), Some("x"));
        assert!(host.header(&Document::new("b.md", 0)).is_none());
    }

    #[test]
    fn test_header_of_broken_or_missing_note_is_none() {
        let (_dir, host) = vault(&[("bad.md", "---\nk: [\n---\n")]);
        assert!(host.header(&Document::new("bad.md", 0)).is_none());
        assert!(host.header(&Document::new("gone.md", 0)).is_none());
    }

    #[test]
    fn test_mutate_writes_and_keeps_body() {
        let (dir, mut host) = vault(&[("a.md", "---\ntitle: T\n---\n# Body\n")]);
        let doc = Document::new("a.md", 0);
        let written = host.mutate_header(&doc, &mut set_uuid("abc")).unwrap();
        assert!(written);
        let content = fs::read_to_string(dir.path().join("a.md")).unwrap();
        assert_eq!(content, "---\ntitle: T\nuuid: abc\n---\n# Body\n");
    }

    #[test]
    fn test_mutate_without_change_does_not_touch_file() {
        let original = "---\ntitle:   spaced\n---\nbody";
        let (dir, mut host) = vault(&[("a.md", original)]);
        let mut noop = |_: &mut Header| false;
        let written = host
            .mutate_header(&Document::new("a.md", 0), &mut noop)
            .unwrap();
        assert!(!written);
        assert_eq!(fs::read_to_string(dir.path().join("a.md")).unwrap(), original);
    }

    #[test]
    fn test_mutate_missing_document_fails() {
        let (_dir, mut host) = vault(&[]);
        let err = host
            .mutate_header(&Document::new("gone.md", 0), &mut set_uuid("x"))
            .unwrap_err();
        assert!(matches!(err, NoteIdError::DocumentNotFound(_)));
    }

    #[test]
    fn test_mutate_broken_frontmatter_fails() {
        let (_dir, mut host) = vault(&[("bad.md", "---\nk: [\n---\n")]);
        let err = host
            .mutate_header(&Document::new("bad.md", 0), &mut set_uuid("x"))
            .unwrap_err();
        assert!(matches!(err, NoteIdError::Frontmatter { .. }));
    }

    #[test]
    fn test_mutate_leaves_no_temp_files() {
        let (dir, mut host) = vault(&[("notes/a.md", "body")]);
        host.mutate_header(&Document::new("notes/a.md", 0), &mut set_uuid("x"))
            .unwrap();
        let names: Vec<_> = fs::read_dir(dir.path().join("notes"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.md"]);
    }

    #[test]
    fn test_active_document() {
        let (dir, host) = vault(&[("notes/a.md", "a"), ("pic.png", "")]);
        assert!(host.active_document().is_none());

        let host = host.with_active("notes/a.md");
        assert_eq!(host.active_document().unwrap().path, "notes/a.md");

        let host = VaultHost::new(dir.path())
            .unwrap()
            .with_active(dir.path().join("pic.png"));
        let active = host.active_document().unwrap();
        assert_eq!(active.path, "pic.png");
        assert!(!active.is_note());

        let host = VaultHost::new(dir.path()).unwrap().with_active("missing.md");
        assert!(host.active_document().is_none());
    }

    #[test]
    fn test_active_document_outside_vault_is_ignored() {
        let (_dir, host) = vault(&[("a.md", "a")]);
        let outside = TempDir::new().unwrap();
        let stray = outside.path().join("x.md");
        fs::write(&stray, "x").unwrap();

        let host = host.with_active(&stray);
        assert!(host.active_document().is_none());

        let host = host.with_active("../x.md");
        assert!(host.active_document().is_none());
        assert_eq!(fs::read_to_string(&stray).unwrap(), "x");
    }
}
