use thiserror::Error;

/// Errors raised while building or composing a `DynaPath`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("`{argument}` must be {expected}, got {found}")]
    InvalidArgumentType {
        argument: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// Errors reported by an `OutlineBackend`.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Remote service error {code}: {message}")]
    Service { code: String, message: String },

    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// Errors raised while resolving a `DynaPath` against remote trees.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("A document must be the last element of the path: `{document}` is followed by `{segment}`")]
    DocumentNotTerminal { document: String, segment: String },

    #[error("No match for segment `{segment}` at depth {depth}")]
    SegmentNotFound { segment: String, depth: usize },

    #[error(transparent)]
    Backend(#[from] BackendError),
}
