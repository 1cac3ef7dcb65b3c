//! Request-scoped error types.
//!
//! Nothing here stops the server; each error is reported on the response
//! that triggered it.

use thiserror::Error;

use crate::pipeline::Fragment;

/// Template execution errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template registered under this name.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Execution failed, e.g. a field absent from the supplied data.
    #[error("template {name} failed: {message}")]
    Execution { name: String, message: String },
}

/// Errors raised by a fragment sink.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// The client went away.
    #[error("response stream closed")]
    Closed,

    /// The per-request deadline passed.
    #[error("render deadline exceeded")]
    DeadlineExceeded,
}

/// Why a response stopped before its footer.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A fragment failed to render. The error body has been appended.
    #[error("{fragment} fragment failed: {source}")]
    Template {
        fragment: Fragment,
        #[source]
        source: TemplateError,
    },

    /// The sink refused a write; nothing more was sent.
    #[error("response stream stopped: {0}")]
    Sink(#[from] SinkError),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
