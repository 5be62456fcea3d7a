use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_migrations::MigrationHarness;

use crate::domain::entities::DocumentChunk;
use crate::domain::repositories::{ChunkStore, ChunkStoreError};
use crate::infrastructure::database::models::NewDocumentRow;
use crate::infrastructure::database::schema::documents::dsl::*;
use crate::infrastructure::database::{DbPool, MIGRATIONS, get_connection_from_pool};

pub struct PostgresChunkStore {
    pool: DbPool,
}

impl PostgresChunkStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run pending embedded migrations: enables the vector extension and
    /// creates the documents table if absent. Idempotent; safe on every
    /// startup.
    pub fn ensure_schema(&self) -> Result<(), ChunkStoreError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkStoreError::DatabaseError(e.to_string()))?;

        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| ChunkStoreError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ChunkStore for PostgresChunkStore {
    async fn upsert_chunk(&self, chunk: &DocumentChunk) -> Result<(), ChunkStoreError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkStoreError::DatabaseError(e.to_string()))?;

        let new_row = NewDocumentRow::from(chunk);

        diesel::insert_into(documents)
            .values(&new_row)
            .on_conflict((file_name, chunk_index))
            .do_update()
            .set(content.eq(excluded(content)))
            .execute(&mut conn)
            .map_err(|e| ChunkStoreError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete_by_file_name(&self, target_file: &str) -> Result<usize, ChunkStoreError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkStoreError::DatabaseError(e.to_string()))?;

        diesel::delete(documents.filter(file_name.eq(target_file)))
            .execute(&mut conn)
            .map_err(|e| ChunkStoreError::DatabaseError(e.to_string()))
    }

    async fn delete_trailing_chunks(
        &self,
        target_file: &str,
        last_index: i32,
    ) -> Result<usize, ChunkStoreError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkStoreError::DatabaseError(e.to_string()))?;

        diesel::delete(
            documents.filter(file_name.eq(target_file).and(chunk_index.gt(last_index))),
        )
        .execute(&mut conn)
        .map_err(|e| ChunkStoreError::DatabaseError(e.to_string()))
    }
}
