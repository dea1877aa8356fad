use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A metadata value attached to a chunk or a document.
///
/// Chunk metadata only ever carries strings, integers and booleans, so the
/// mapping is closed over those three kinds instead of an open JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Str(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Str(value.to_string())
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Int(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl MetaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetaValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Str(s) => write!(f, "{}", s),
            MetaValue::Int(i) => write!(f, "{}", i),
            MetaValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

pub type MetadataMap = HashMap<String, MetaValue>;

/// One chunk of content extracted from a filing, plus its metadata.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    content: String,
    metadata: MetadataMap,
}

impl DocumentChunk {
    pub fn new(content: impl Into<String>, metadata: MetadataMap) -> Self {
        DocumentChunk {
            content: content.into(),
            metadata,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }
}

/// A parsed filing: the XBRL header chunk, the narrative item chunks in
/// detection order, and filing-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    xbrl_header: Option<DocumentChunk>,
    chunks: Vec<DocumentChunk>,
    metadata: MetadataMap,
}

impl Document {
    pub fn new(
        xbrl_header: Option<DocumentChunk>,
        chunks: Vec<DocumentChunk>,
        metadata: MetadataMap,
    ) -> Self {
        Document {
            xbrl_header,
            chunks,
            metadata,
        }
    }

    pub fn xbrl_header(&self) -> Option<&DocumentChunk> {
        self.xbrl_header.as_ref()
    }

    /// Item chunks in the order they were detected.
    pub fn chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    /// All chunks, header first.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentChunk> {
        self.xbrl_header.iter().chain(self.chunks.iter())
    }
}
