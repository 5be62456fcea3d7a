use async_trait::async_trait;

use crate::domain::entities::DocumentChunk;

#[derive(Debug)]
pub enum ChunkStoreError {
    DatabaseError(String),
}

impl std::fmt::Display for ChunkStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkStoreError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ChunkStoreError {}

/// Persistence seam for chunk rows. Every operation is atomic on its own and
/// acquires storage resources only for the duration of the call.
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Insert the chunk, or replace `content` on a `(file_name, chunk_index)`
    /// conflict.
    async fn upsert_chunk(&self, chunk: &DocumentChunk) -> Result<(), ChunkStoreError>;

    /// Remove every row for the given file name. Returns the number of rows
    /// removed; zero is a valid outcome.
    async fn delete_by_file_name(&self, file_name: &str) -> Result<usize, ChunkStoreError>;

    /// Remove rows with `chunk_index > last_index` for the given file name.
    /// Run after a successful chunking run so a shrunken file does not keep
    /// rows from its longer predecessor.
    async fn delete_trailing_chunks(
        &self,
        file_name: &str,
        last_index: i32,
    ) -> Result<usize, ChunkStoreError>;
}
