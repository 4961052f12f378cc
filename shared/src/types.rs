/// Application-level result used by the service and presentation layers.
pub type Result<T> = anyhow::Result<T>;

/// Result of a single call into one of the remote collaborators.
pub type RagResult<T> = std::result::Result<T, crate::error::RagError>;
