//! # Staged File
//!
//! The document selected by the operator but not yet transmitted. The
//! payload is opaque to the client; only the file name travels alongside it
//! because the backend dispatches its parser on the extension.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Document kind, inferred from the file extension.
///
/// The backend accepts `pdf`, `json`, `sql` and `ddl`. The client never
/// refuses an upload on this basis; the backend stays authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Pdf,
    Json,
    Sql,
    /// Forward-compatible catch-all for source types this client does not know.
    #[serde(other)]
    Unknown,
}

impl SourceType {
    /// Infer the source type from a file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Self {
        let ext = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return Self::Unknown,
        };
        match ext.as_str() {
            "pdf" => Self::Pdf,
            "json" => Self::Json,
            "sql" | "ddl" => Self::Sql,
            _ => Self::Unknown,
        }
    }

    /// Whether the backend has a parser for this source type.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pdf => "pdf",
            Self::Json => "json",
            Self::Sql => "sql",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A file payload awaiting submission.
///
/// Cloning is cheap: the payload is shared, so an in-flight attempt can
/// hold its own handle while the operator stages a replacement.
#[derive(Clone, PartialEq, Eq)]
pub struct StagedFile {
    file_name: String,
    contents: Arc<[u8]>,
}

impl StagedFile {
    pub fn new(file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: Arc::from(contents.into()),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn source_type(&self) -> SourceType {
        SourceType::from_file_name(&self.file_name)
    }
}

// Payloads can be megabytes; print the size, not the bytes.
impl fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedFile")
            .field("file_name", &self.file_name)
            .field("len", &self.contents.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_type_from_extension() {
        assert_eq!(SourceType::from_file_name("policy.PDF"), SourceType::Pdf);
        assert_eq!(SourceType::from_file_name("assets.json"), SourceType::Json);
        assert_eq!(SourceType::from_file_name("schema.sql"), SourceType::Sql);
        assert_eq!(SourceType::from_file_name("schema.ddl"), SourceType::Sql);
        assert_eq!(SourceType::from_file_name("notes.txt"), SourceType::Unknown);
        assert_eq!(SourceType::from_file_name("README"), SourceType::Unknown);
        assert!(!SourceType::Unknown.is_supported());
    }

    #[test]
    fn unknown_source_type_deserializes_to_catch_all() {
        let st: SourceType = serde_json::from_str("\"xlsx\"").unwrap();
        assert_eq!(st, SourceType::Unknown);
    }

    #[test]
    fn clone_shares_payload() {
        let file = StagedFile::new("a.json", b"{}".to_vec());
        let copy = file.clone();
        assert_eq!(copy.contents(), b"{}");
        assert_eq!(copy.len(), 2);
        assert!(format!("{file:?}").contains("len: 2"));
    }
}
