//! Byte-range file serving for the weights asset.
//!
//! The in-browser runtime fetches the weights file in slices, so `Range`
//! must be honored. Files are streamed in bounded chunks and never read into
//! memory whole.

use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;
use tracing::debug;

use edgewriter_core::{RangeError, RangeSpec};

/// Read size per streamed chunk.
pub const CHUNK_SIZE: usize = 64 * 1024;

const CACHE_FOREVER: &str = "public, max-age=31536000, immutable";

/// Errors from [`serve_file`].
#[derive(Debug, Error)]
pub enum RangeServeError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The header did not parse. The size is known because the file is
    /// checked before the header is looked at.
    #[error("Malformed range header {header:?} for {size} byte file")]
    Malformed { header: String, size: u64 },

    #[error("Range not satisfiable for {size} byte file")]
    Unsatisfiable { size: u64 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RangeServeError {
    fn from_range(err: RangeError, size: u64) -> Self {
        match err {
            RangeError::Malformed(header) => Self::Malformed { header, size },
            RangeError::Unsatisfiable { size } => Self::Unsatisfiable { size },
        }
    }
}

/// Serve `path`, honoring an optional `Range` header value.
///
/// - no header: 200 with the whole file
/// - satisfiable single range: 206 with `Content-Range`
/// - anything else: an error the caller maps to 404/416
pub async fn serve_file(path: &Path, range: Option<&str>) -> Result<Response, RangeServeError> {
    let mut file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(RangeServeError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    let meta = file.metadata().await?;
    if !meta.is_file() {
        return Err(RangeServeError::NotFound(path.to_path_buf()));
    }
    let size = meta.len();

    let window = RangeSpec::parse(range)
        .and_then(|spec| spec.resolve(size))
        .map_err(|e| RangeServeError::from_range(e, size))?;

    let builder = Response::builder()
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_FOREVER));

    let response = match window {
        None => {
            debug!(path = %path.display(), size, "Serving whole file");
            let stream = ReaderStream::with_capacity(file, CHUNK_SIZE);
            builder
                .status(StatusCode::OK)
                .header(header::CONTENT_LENGTH, size)
                .body(Body::from_stream(stream))
        }
        Some(window) => {
            debug!(
                path = %path.display(),
                start = window.start,
                end = window.end,
                size,
                "Serving byte range"
            );
            file.seek(SeekFrom::Start(window.start)).await?;
            let stream = ReaderStream::with_capacity(file.take(window.length()), CHUNK_SIZE);
            builder
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_RANGE, window.content_range(size))
                .header(header::CONTENT_LENGTH, window.length())
                .body(Body::from_stream(stream))
        }
    };

    response.map_err(|e| RangeServeError::Io(io::Error::other(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn asset(len: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let bytes: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        file.write_all(&bytes).unwrap();
        file
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = serve_file(Path::new("/no/such/weights.bin"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, RangeServeError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_header_carries_size() {
        let file = asset(1000);
        let err = serve_file(file.path(), Some("bytes=abc")).await.unwrap_err();
        assert!(matches!(err, RangeServeError::Malformed { size: 1000, .. }));
    }

    #[tokio::test]
    async fn test_partial_headers() {
        let file = asset(1000);
        let response = serve_file(file.path(), Some("bytes=0-99")).await.unwrap();
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes 0-99/1000");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "100");
    }
}
