use crate::config::NoteIdConfig;
use crate::host::NoteHost;
use crate::ident;
use crate::model::{has_value, Document, Header};
use serde_yaml::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    /// A fresh identifier was written.
    Assigned(String),
    /// The key already held a value; nothing was written.
    AlreadyPresent,
    /// Generating or writing failed. Not retried.
    WriteFailed(String),
}

/// Give `document` an identifier unless it already has one.
///
/// The cached header decides the common case. The live header is checked
/// again inside the transaction, so an existing value is never overwritten
/// even when the cache is stale. An unreadable cached header counts as
/// "no identifier".
pub fn run<H: NoteHost + ?Sized>(
    host: &mut H,
    document: &Document,
    config: &NoteIdConfig,
) -> AssignOutcome {
    let key = config.key.as_str();
    if host
        .header(document)
        .is_some_and(|header| has_value(&header, key))
    {
        return AssignOutcome::AlreadyPresent;
    }

    let id = match ident::generate(document, config) {
        Ok(id) => id,
        Err(e) => return AssignOutcome::WriteFailed(e.to_string()),
    };

    let mut present = false;
    let mut patch = |header: &mut Header| {
        if has_value(header, key) {
            present = true;
            return false;
        }
        header.insert(Value::from(key), Value::from(id.as_str()));
        true
    };

    let written = host.mutate_header(document, &mut patch);
    match written {
        Ok(_) if present => AssignOutcome::AlreadyPresent,
        Ok(_) => AssignOutcome::Assigned(id),
        Err(e) => AssignOutcome::WriteFailed(e.to_string()),
    }
}
