pub mod chunk_store;

pub use chunk_store::{ChunkStore, ChunkStoreError};
