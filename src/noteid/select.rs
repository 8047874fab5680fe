//! Selection filters.
//!
//! The blacklist and whitelist are independent: "all notes except the
//! blacklist" and "whitelisted notes" are separate entry points, and a note
//! may match both lists. Patterns are plain substrings of the vault path.

use crate::config::NoteIdConfig;
use crate::host::NoteHost;
use crate::model::{has_key, Document};

fn path_matches(document: &Document, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| document.path.contains(pattern.as_str()))
}

/// Every document whose path contains none of the blacklist patterns.
pub fn select_excluding_blacklist(documents: Vec<Document>, config: &NoteIdConfig) -> Vec<Document> {
    if config.path_blacklist.is_empty() {
        return documents;
    }
    documents
        .into_iter()
        .filter(|d| !path_matches(d, &config.path_blacklist))
        .collect()
}

/// Documents whose path contains a whitelist pattern and, when a property
/// whitelist is configured, whose header already has one of those keys.
///
/// An empty path whitelist selects nothing.
pub fn select_whitelisted<H: NoteHost + ?Sized>(
    host: &H,
    documents: Vec<Document>,
    config: &NoteIdConfig,
) -> Vec<Document> {
    if config.path_whitelist.is_empty() {
        return Vec::new();
    }
    documents
        .into_iter()
        .filter(|d| path_matches(d, &config.path_whitelist))
        .filter(|d| {
            config.property_whitelist.is_empty()
                || host.header(d).is_some_and(|header| {
                    config
                        .property_whitelist
                        .iter()
                        .any(|key| has_key(&header, key))
                })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveSelection {
    Note(Document),
    NotANote(Document),
    Nothing,
}

pub fn select_active<H: NoteHost + ?Sized>(host: &H) -> ActiveSelection {
    match host.active_document() {
        Some(document) if document.is_note() => ActiveSelection::Note(document),
        Some(document) => ActiveSelection::NotANote(document),
        None => ActiveSelection::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::InMemoryHost;
    use crate::model::Header;

    fn header(yaml: &str) -> Option<Header> {
        Some(serde_yaml::from_str(yaml).unwrap())
    }

    fn docs(paths: &[&str]) -> Vec<Document> {
        paths.iter().map(|p| Document::new(*p, 0)).collect()
    }

    fn paths(documents: &[Document]) -> Vec<&str> {
        documents.iter().map(|d| d.path.as_str()).collect()
    }

    fn config() -> NoteIdConfig {
        NoteIdConfig::default()
    }

    #[test]
    fn test_empty_blacklist_returns_everything() {
        let all = docs(&["a.md", "Templates/t.md", "x/y.md"]);
        let selected = select_excluding_blacklist(all.clone(), &config());
        assert_eq!(selected, all);
    }

    #[test]
    fn test_blacklist_excludes_substring_matches() {
        let cfg = NoteIdConfig {
            path_blacklist: vec!["Templates/".into(), "draft".into()],
            ..config()
        };
        let selected = select_excluding_blacklist(
            docs(&["a.md", "Templates/t.md", "x/draft-1.md", "x/y.md", "MyTemplates/z.md"]),
            &cfg,
        );
        assert_eq!(paths(&selected), vec!["a.md", "x/y.md"]);
    }

    #[test]
    fn test_empty_whitelist_selects_nothing() {
        let host = InMemoryHost::new();
        let cfg = NoteIdConfig {
            property_whitelist: vec!["status".into()],
            ..config()
        };
        assert!(select_whitelisted(&host, docs(&["a.md", "b.md"]), &cfg).is_empty());
        assert!(select_whitelisted(&host, docs(&["a.md"]), &config()).is_empty());
    }

    #[test]
    fn test_whitelist_by_path() {
        let host = InMemoryHost::new();
        let cfg = NoteIdConfig {
            path_whitelist: vec!["Projects/".into(), "inbox".into()],
            ..config()
        };
        let selected = select_whitelisted(
            &host,
            docs(&["Projects/p.md", "Areas/a.md", "inbox.md", "x/inbox/n.md"]),
            &cfg,
        );
        assert_eq!(paths(&selected), vec!["Projects/p.md", "inbox.md", "x/inbox/n.md"]);
    }

    #[test]
    fn test_whitelist_with_property_filter_requires_both() {
        let mut host = InMemoryHost::new();
        let with_status = host.add("Projects/a.md", 0, header("status: active"));
        let disabled = host.add("Projects/b.md", 0, header("publish: false"));
        let without = host.add("Projects/c.md", 0, header("title: x"));
        let no_header = host.add("Projects/d.md", 0, None);
        let outside = host.add("Other/e.md", 0, header("status: active"));

        let cfg = NoteIdConfig {
            path_whitelist: vec!["Projects/".into()],
            property_whitelist: vec!["status".into(), "publish".into()],
            ..config()
        };
        let selected = select_whitelisted(
            &host,
            vec![with_status, disabled, without, no_header, outside],
            &cfg,
        );
        assert_eq!(paths(&selected), vec!["Projects/a.md", "Projects/b.md"]);
    }

    #[test]
    fn test_lists_are_independent() {
        let cfg = NoteIdConfig {
            path_blacklist: vec!["shared".into()],
            path_whitelist: vec!["shared".into()],
            ..config()
        };
        let host = InMemoryHost::new();
        let all = docs(&["shared/a.md", "b.md"]);
        assert_eq!(paths(&select_excluding_blacklist(all.clone(), &cfg)), vec!["b.md"]);
        assert_eq!(paths(&select_whitelisted(&host, all, &cfg)), vec!["shared/a.md"]);
    }

    #[test]
    fn test_select_active() {
        let mut host = InMemoryHost::new();
        assert_eq!(select_active(&host), ActiveSelection::Nothing);

        let note = host.add("a.md", 0, None);
        host.set_active(Some("a.md"));
        assert_eq!(select_active(&host), ActiveSelection::Note(note));

        let canvas = host.add("board.canvas", 0, None);
        host.set_active(Some("board.canvas"));
        assert_eq!(select_active(&host), ActiveSelection::NotANote(canvas));
    }
}
