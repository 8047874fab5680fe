use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteIdError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Frontmatter error in {path}: {reason}")]
    Frontmatter { path: String, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidSetting { field: String, reason: String },

    #[error("Invalid timestamp format '{0}'")]
    InvalidFormat(String),

    #[error("Vault walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Host error: {0}")]
    Host(String),
}

impl NoteIdError {
    pub fn frontmatter(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Frontmatter {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_setting(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NoteIdError>;
