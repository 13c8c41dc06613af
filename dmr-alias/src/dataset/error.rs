//! Dataset fetch and parse error types.

/// Errors that can occur while fetching the remote dataset.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed or returned an error status
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Writing the downloaded body to the storage directory failed
    #[error("cache write error: {0}")]
    Io(#[from] std::io::Error),

    /// Replacing the cache file with the freshly written one failed
    #[error("cache persist error: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Errors from parsing a cached dataset file.
///
/// A missing file is not an error (the builders return an empty index);
/// these cover a file that exists but does not hold the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The document was not JSON, or lacked the top-level `results`
    /// sequence
    #[error("malformed dataset document: {message}")]
    Document { message: String },

    /// A record in the sequence was missing a required field or had the
    /// wrong shape for the requested kind
    #[error("bad dataset record at position {index}: {message}")]
    Record { index: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DatasetError::Document {
            message: "missing field `results`".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed dataset document: missing field `results`"
        );

        let err = DatasetError::Record {
            index: 3,
            message: "missing field `surname`".into(),
        };
        assert_eq!(
            err.to_string(),
            "bad dataset record at position 3: missing field `surname`"
        );
    }
}
