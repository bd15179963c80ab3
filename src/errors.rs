use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions raised while building the request store.
///
/// Every variant aborts the whole parse; there is no partial store and no
/// recovery path. Dispatching has no error conditions of its own: running
/// out of requests is a normal terminal state, not an error.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The workload file could not be opened or read.
    #[error("can't open workload file {}: {source}", path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Buffer reservation for a request body failed.
    #[error("can't allocate {size} bytes for contents of {}", path.display())]
    OutOfMemory { path: PathBuf, size: usize },

    /// A line carried an unknown method name or argument key.
    #[error("did not recognize '{token}' on line {lineno} of {}: {line}", file.display())]
    MalformedLine {
        file: PathBuf,
        lineno: usize,
        line: String,
        token: String,
    },

    /// A `file=` path could not be opened, or a read failed mid-stream.
    #[error("can't read content file {}: {source}", path.display())]
    ContentFileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A backslash escape sat at the very end of its input.
    #[error("premature EOF after escape in '{fragment}'")]
    PrematureEscapeEof { fragment: String },
}

pub type Result<T> = std::result::Result<T, ParseError>;
