use std::path::Path;

#[derive(Debug)]
pub enum ExtractionError {
    CorruptedFile(String),
    ExtractionFailed(String),
    IoError(String),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
            ExtractionError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
            ExtractionError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ExtractionError {}

/// Items produced by an extractor: each `Ok` value is the full text payload
/// of exactly one chunk, in order.
pub type SegmentIter = Box<dyn Iterator<Item = Result<String, ExtractionError>> + Send>;

/// Turns a file into an ordered sequence of chunk-sized text segments.
/// Implementations decide how bytes become text; `chunk_size` bounds every
/// segment (the last may be shorter). Failing to open or parse the file is an
/// outer error; a failure partway through the stream surfaces as an `Err`
/// item and ends the run.
pub trait TextExtractor: Send + Sync {
    fn segments(&self, path: &Path, chunk_size: usize) -> Result<SegmentIter, ExtractionError>;
}
