//! Error type for writing rendered output.

/// Failures surfaced by the rendering entry points.
///
/// Rendering itself cannot fail; only handing the finished buffer to the
/// caller's sink can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The output sink rejected the write.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used by the writing entry points.
pub type Result<T> = std::result::Result<T, Error>;
