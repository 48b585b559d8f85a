use std::io;

use thiserror::Error;

/// Errors surfaced by the library. Missing rules files are not represented
/// here; they are recovered locally as empty rule sets.
#[derive(Debug, Error)]
pub enum Error {
    #[error("`{command}` failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error("unable to resolve revision `{0}`")]
    UnresolvableRevision(String),

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
