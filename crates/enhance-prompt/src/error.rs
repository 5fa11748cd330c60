use std::path::PathBuf;

use mcp_common::error::CommonError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("config error: {0}")]
    Config(String),

    #[error("cannot resolve project root {}: {source}", path.display())]
    ProjectRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}
