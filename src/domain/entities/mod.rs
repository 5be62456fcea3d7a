pub mod document_chunk;

pub use document_chunk::DocumentChunk;
