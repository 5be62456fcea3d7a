use std::path::Path;

use lopdf::Document;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::application::ports::{ExtractionError, SegmentIter, TextExtractor};

/// PDF extraction: readable text is pulled from every page in page order and
/// concatenated into one buffer, which is then split into fixed-size
/// character windows. A page that yields no text contributes nothing; a page
/// that fails to extract aborts the whole run before any chunk is produced.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_full_text(&self, doc: &Document) -> Result<String, ExtractionError> {
        let pages: Vec<u32> = doc.get_pages().into_keys().collect();

        let page_texts: Vec<String> = pages
            .into_par_iter()
            .map(|page_num| {
                doc.extract_text(&[page_num]).map_err(|e| {
                    ExtractionError::ExtractionFailed(format!(
                        "Failed to extract text from page {}: {}",
                        page_num, e
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(page_texts.concat())
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfExtractor {
    fn segments(&self, path: &Path, chunk_size: usize) -> Result<SegmentIter, ExtractionError> {
        let doc =
            Document::load(path).map_err(|e| ExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(ExtractionError::ExtractionFailed(
                "Encrypted PDF documents are not supported".to_string(),
            ));
        }

        let full_text = self.extract_full_text(&doc)?;
        let windows = char_windows(&full_text, chunk_size);

        Ok(Box::new(windows.into_iter().map(Ok)))
    }
}

/// Fixed-size character windows, last one possibly shorter. Empty input
/// yields no windows.
fn char_windows(text: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|window| window.iter().collect())
        .collect()
}
