use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::ports::TextExtractor;
use crate::domain::entities::DocumentChunk;
use crate::domain::repositories::ChunkStore;

#[derive(Debug)]
pub enum ChunkerError {
    FileNotFound(String),
    InvalidChunkSize,
    ExtractionError(String),
    StoreError(String),
}

impl std::fmt::Display for ChunkerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkerError::FileNotFound(path) => write!(f, "File not found: {}", path),
            ChunkerError::InvalidChunkSize => write!(f, "Chunk size must be greater than zero"),
            ChunkerError::ExtractionError(msg) => write!(f, "Extraction error: {}", msg),
            ChunkerError::StoreError(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for ChunkerError {}

/// Re-chunks one file version into the store. Text production is delegated to
/// the injected extractor; this service owns index assignment, streaming
/// upserts, and the trailing prune that keeps a shrunken file from retaining
/// rows of its longer predecessor.
pub struct ChunkerService {
    extractor: Arc<dyn TextExtractor>,
    store: Arc<dyn ChunkStore>,
}

impl ChunkerService {
    pub fn new(extractor: Arc<dyn TextExtractor>, store: Arc<dyn ChunkStore>) -> Self {
        Self { extractor, store }
    }

    /// Chunk `path` into windows of `chunk_size` and upsert each row,
    /// indices starting at 1. Returns the number of chunks written.
    pub async fn chunk_file(
        &self,
        path: &Path,
        chunk_size: usize,
    ) -> Result<usize, ChunkerError> {
        if !path.is_file() {
            return Err(ChunkerError::FileNotFound(path.display().to_string()));
        }
        if chunk_size == 0 {
            return Err(ChunkerError::InvalidChunkSize);
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| ChunkerError::FileNotFound(path.display().to_string()))?;

        let segments = self
            .extractor
            .segments(path, chunk_size)
            .map_err(|e| ChunkerError::ExtractionError(e.to_string()))?;

        let mut index: i32 = 0;
        for segment in segments {
            let content = segment.map_err(|e| ChunkerError::ExtractionError(e.to_string()))?;
            index += 1;

            let chunk = DocumentChunk::new(file_name.clone(), index, content);
            self.store
                .upsert_chunk(&chunk)
                .await
                .map_err(|e| ChunkerError::StoreError(e.to_string()))?;

            debug!("saved chunk {} of '{}'", index, file_name);
        }

        // The run starts numbering at 1 every time, so anything past the new
        // count belongs to an older, longer version of the file.
        let pruned = self
            .store
            .delete_trailing_chunks(&file_name, index)
            .await
            .map_err(|e| ChunkerError::StoreError(e.to_string()))?;
        if pruned > 0 {
            debug!("pruned {} stale trailing chunks of '{}'", pruned, file_name);
        }

        info!("chunked '{}' into {} chunks", file_name, index);
        Ok(index as usize)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io::Write;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::repositories::ChunkStoreError;
    use crate::infrastructure::extractors::CompositeExtractor;

    #[derive(Default)]
    struct InMemoryChunkStore {
        rows: Mutex<BTreeMap<(String, i32), String>>,
    }

    impl InMemoryChunkStore {
        fn rows_for(&self, file_name: &str) -> Vec<(i32, String)> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .filter(|((name, _), _)| name == file_name)
                .map(|((_, idx), content)| (*idx, content.clone()))
                .collect()
        }
    }

    #[async_trait]
    impl ChunkStore for InMemoryChunkStore {
        async fn upsert_chunk(&self, chunk: &DocumentChunk) -> Result<(), ChunkStoreError> {
            self.rows.lock().unwrap().insert(
                (chunk.file_name().to_string(), chunk.chunk_index()),
                chunk.content().to_string(),
            );
            Ok(())
        }

        async fn delete_by_file_name(&self, file_name: &str) -> Result<usize, ChunkStoreError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|(name, _), _| name != file_name);
            Ok(before - rows.len())
        }

        async fn delete_trailing_chunks(
            &self,
            file_name: &str,
            last_index: i32,
        ) -> Result<usize, ChunkStoreError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|(name, idx), _| name != file_name || *idx <= last_index);
            Ok(before - rows.len())
        }
    }

    fn service(store: Arc<InMemoryChunkStore>) -> ChunkerService {
        ChunkerService::new(Arc::new(CompositeExtractor::new()), store)
    }

    fn write_temp_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_250_bytes_at_budget_100_yields_three_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_file(&dir, "notes.txt", &[b'a'; 250]);
        let store = Arc::new(InMemoryChunkStore::default());

        let count = service(store.clone()).chunk_file(&path, 100).await.unwrap();

        assert_eq!(count, 3);
        let rows = store.rows_for("notes.txt");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], (1, "a".repeat(100)));
        assert_eq!(rows[1], (2, "a".repeat(100)));
        assert_eq!(rows[2], (3, "a".repeat(50)));
    }

    #[tokio::test]
    async fn test_rechunking_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_file(&dir, "notes.txt", &[b'b'; 150]);
        let store = Arc::new(InMemoryChunkStore::default());
        let chunker = service(store.clone());

        let first = chunker.chunk_file(&path, 100).await.unwrap();
        let rows_after_first = store.rows_for("notes.txt");
        let second = chunker.chunk_file(&path, 100).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(rows_after_first, store.rows_for("notes.txt"));
    }

    #[tokio::test]
    async fn test_shrunken_file_prunes_trailing_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_file(&dir, "notes.txt", &[b'c'; 250]);
        let store = Arc::new(InMemoryChunkStore::default());
        let chunker = service(store.clone());

        chunker.chunk_file(&path, 100).await.unwrap();
        assert_eq!(store.rows_for("notes.txt").len(), 3);

        std::fs::write(&path, [b'd'; 50]).unwrap();
        let count = chunker.chunk_file(&path, 100).await.unwrap();

        assert_eq!(count, 1);
        let rows = store.rows_for("notes.txt");
        assert_eq!(rows, vec![(1, "d".repeat(50))]);
    }

    #[tokio::test]
    async fn test_missing_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(InMemoryChunkStore::default());

        let result = service(store.clone())
            .chunk_file(&dir.path().join("absent.txt"), 100)
            .await;

        assert!(matches!(result, Err(ChunkerError::FileNotFound(_))));
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_chunk_size_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_file(&dir, "notes.txt", b"content");
        let store = Arc::new(InMemoryChunkStore::default());

        let result = service(store.clone()).chunk_file(&path, 0).await;

        assert!(matches!(result, Err(ChunkerError::InvalidChunkSize)));
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_yields_zero_chunks_and_prunes_old_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_file(&dir, "notes.txt", &[b'e'; 120]);
        let store = Arc::new(InMemoryChunkStore::default());
        let chunker = service(store.clone());

        chunker.chunk_file(&path, 100).await.unwrap();
        std::fs::write(&path, b"").unwrap();
        let count = chunker.chunk_file(&path, 100).await.unwrap();

        assert_eq!(count, 0);
        assert!(store.rows_for("notes.txt").is_empty());
    }
}
