pub mod postgres_chunk_store;

pub use postgres_chunk_store::PostgresChunkStore;
