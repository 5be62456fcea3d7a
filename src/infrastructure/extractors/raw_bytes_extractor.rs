use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::application::ports::{ExtractionError, SegmentIter, TextExtractor};

/// Generic-file extraction: the file is read in sequential fixed-size byte
/// windows (no overlap, last window may be shorter) and each window is
/// decoded as UTF-8 on its own, invalid sequences replaced. Bad bytes never
/// fail the run.
pub struct RawBytesExtractor;

impl RawBytesExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RawBytesExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for RawBytesExtractor {
    fn segments(&self, path: &Path, chunk_size: usize) -> Result<SegmentIter, ExtractionError> {
        let file = File::open(path).map_err(|e| ExtractionError::IoError(e.to_string()))?;

        Ok(Box::new(ByteWindows {
            reader: BufReader::new(file),
            window: chunk_size,
            failed: false,
        }))
    }
}

struct ByteWindows<R: Read> {
    reader: R,
    window: usize,
    failed: bool,
}

impl<R: Read> ByteWindows<R> {
    /// Fill up to one window, looping over short reads so every window except
    /// the last carries exactly `window` bytes.
    fn read_window(&mut self) -> std::io::Result<Vec<u8>> {
        let mut buf = vec![0u8; self.window];
        let mut filled = 0;

        while filled < self.window {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        buf.truncate(filled);
        Ok(buf)
    }
}

impl<R: Read> Iterator for ByteWindows<R> {
    type Item = Result<String, ExtractionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.read_window() {
            Ok(window) if window.is_empty() => None,
            Ok(window) => Some(Ok(String::from_utf8_lossy(&window).into_owned())),
            Err(e) => {
                self.failed = true;
                Some(Err(ExtractionError::IoError(e.to_string())))
            }
        }
    }
}
