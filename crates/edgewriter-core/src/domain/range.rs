//! HTTP byte-range parsing and resolution.
//!
//! Only single ranges of the form `bytes=<start>-<end>` are supported, where
//! either bound may be empty (but not both). Resolution against the file size
//! happens separately so the parse step stays independent of I/O.

use thiserror::Error;

/// A parsed `Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    /// No header: serve the whole file.
    None,
    /// `bytes=start-end`
    Explicit { start: u64, end: u64 },
    /// `bytes=start-`
    OpenEnded { start: u64 },
    /// `bytes=-length`: the last `length` bytes.
    Suffix { length: u64 },
}

/// An inclusive byte window inside a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered (the window is inclusive on both ends).
    #[must_use]
    pub const fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` value for a 206 response.
    #[must_use]
    pub fn content_range(&self, file_size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, file_size)
    }
}

/// Errors from range parsing and resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Header did not match `bytes=<start>-<end>`.
    #[error("Malformed range header: {0}")]
    Malformed(String),

    /// Range lies outside the file.
    #[error("Requested range not satisfiable for {size} byte file")]
    Unsatisfiable { size: u64 },
}

/// `Content-Range` value advertising the real size on a 416 response.
#[must_use]
pub fn unsatisfied_content_range(file_size: u64) -> String {
    format!("bytes */{file_size}")
}

impl RangeSpec {
    /// Parse an optional `Range` header value.
    pub fn parse(header: Option<&str>) -> Result<Self, RangeError> {
        let Some(raw) = header else {
            return Ok(Self::None);
        };

        let malformed = || RangeError::Malformed(raw.to_string());
        let spec = raw.trim().strip_prefix("bytes=").ok_or_else(malformed)?;
        let (start, end) = spec.split_once('-').ok_or_else(malformed)?;

        let parse_bound = |s: &str| -> Result<Option<u64>, RangeError> {
            if s.is_empty() {
                Ok(None)
            } else if s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse().map(Some).map_err(|_| malformed())
            } else {
                Err(malformed())
            }
        };

        match (parse_bound(start)?, parse_bound(end)?) {
            (Some(start), Some(end)) => Ok(Self::Explicit { start, end }),
            (Some(start), None) => Ok(Self::OpenEnded { start }),
            (None, Some(length)) => Ok(Self::Suffix { length }),
            (None, None) => Err(malformed()),
        }
    }

    /// Resolve against a file of `file_size` bytes.
    ///
    /// Returns `Ok(None)` when the whole file should be served. The end bound
    /// is clamped to the last byte; a start past the end of the file or an
    /// inverted window is unsatisfiable.
    pub fn resolve(self, file_size: u64) -> Result<Option<ByteRange>, RangeError> {
        let unsatisfiable = RangeError::Unsatisfiable { size: file_size };
        let last = file_size.checked_sub(1);

        let (start, end) = match self {
            Self::None => return Ok(None),
            Self::Explicit { start, end } => (start, last.map(|l| end.min(l))),
            Self::OpenEnded { start } => (start, last),
            Self::Suffix { length } => (file_size.saturating_sub(length), last),
        };

        match end {
            Some(end) if start < file_size && end >= start => Ok(Some(ByteRange { start, end })),
            _ => Err(unsatisfiable),
        }
    }
}
