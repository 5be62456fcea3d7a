pub mod chunker;

pub use chunker::{ChunkerError, ChunkerService};
