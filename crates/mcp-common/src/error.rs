/// Error types shared across MCP server crates.
///
/// These errors represent request-level failures that every tool surface
/// reports the same way. Application-specific errors should be defined in each
/// server crate and wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("{0} is required")]
    Required(&'static str),
}
