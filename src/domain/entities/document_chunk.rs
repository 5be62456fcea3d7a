use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One bounded-size slice of a file's text content. Indices are 1-based and
/// assigned in production order within a single chunking run; the pair
/// `(file_name, chunk_index)` identifies the persisted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    file_name: String,
    chunk_index: i32,
    content: String,
    created_at: DateTime<Utc>,
}

impl DocumentChunk {
    pub fn new(file_name: String, chunk_index: i32, content: String) -> Self {
        Self {
            file_name,
            chunk_index,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn character_count(&self) -> usize {
        self.content.chars().count()
    }
}
