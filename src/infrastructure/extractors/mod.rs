pub mod pdf_extractor;
pub mod raw_bytes_extractor;

pub use pdf_extractor::PdfExtractor;
pub use raw_bytes_extractor::RawBytesExtractor;

use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{ExtractionError, SegmentIter, TextExtractor};

/// Routes a file to the extractor for its format. Selection is by extension,
/// case-insensitive; everything that is not a PDF takes the raw-bytes path.
pub struct CompositeExtractor {
    raw_extractor: Arc<RawBytesExtractor>,
    pdf_extractor: Arc<PdfExtractor>,
}

impl CompositeExtractor {
    pub fn new() -> Self {
        Self {
            raw_extractor: Arc::new(RawBytesExtractor::new()),
            pdf_extractor: Arc::new(PdfExtractor::new()),
        }
    }

    fn extractor_for_path(&self, path: &Path) -> Arc<dyn TextExtractor> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("pdf") => self.pdf_extractor.clone(),
            _ => self.raw_extractor.clone(),
        }
    }
}

impl Default for CompositeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for CompositeExtractor {
    fn segments(&self, path: &Path, chunk_size: usize) -> Result<SegmentIter, ExtractionError> {
        self.extractor_for_path(path).segments(path, chunk_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extension_selects_pdf_extractor() {
        let composite = CompositeExtractor::new();

        // An unreadable .pdf must fail through the PDF parser, not fall back
        // to byte windows.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        assert!(composite.segments(&path, 100).is_err());
    }

    #[test]
    fn test_pdf_extension_is_case_insensitive() {
        let composite = CompositeExtractor::new();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.PDF");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        assert!(composite.segments(&path, 100).is_err());
    }

    #[test]
    fn test_other_extensions_take_raw_path() {
        let composite = CompositeExtractor::new();

        let dir = tempfile::tempdir().unwrap();
        for name in ["plain.txt", "no_extension", "archive.tar.gz"] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"plain bytes").unwrap();

            let segments: Vec<_> = composite
                .segments(&path, 100)
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();
            assert_eq!(segments, vec!["plain bytes".to_string()]);
        }
    }
}
