//! Engine error types.

/// Errors the engine can report at mount time.
///
/// Per-frame rendering never errors: malformed colors resolve to a
/// fallback, and zero-size surfaces defer rather than fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested variant name is not registered.
    #[error("unknown animation variant \"{0}\"")]
    UnknownVariant(String),

    /// The `"custom"` variant was requested without any code.
    #[error("custom variant requested but no code supplied")]
    MissingCustomCode,

    /// The custom expression failed to compile.
    #[error("custom animation code: {0}")]
    Custom(#[from] crate::custom::CompileError),
}
