use crate::error::AppError;

pub const DEFAULT_SCAN_DEPTH: usize = 3;
pub const DEFAULT_MAX_FILES: usize = 10;
pub const DEFAULT_MAX_FILES_VAGUE: usize = 15;
pub const DEFAULT_RETRIEVAL_TOOL: &str = "mcp__augment-context-engine__codebase-retrieval";

/// Application configuration loaded from environment variables.
///
/// Every variable is optional; unset variables fall back to the defaults the
/// enhancer has always used.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum directory depth listed under "Project structure".
    pub scan_depth: usize,
    /// Related files returned for prompts that are not highly vague.
    pub max_files: usize,
    /// Related files returned for highly vague prompts.
    pub max_files_vague: usize,
    /// Downstream semantic search tool referenced in the output.
    pub retrieval_tool: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_depth: DEFAULT_SCAN_DEPTH,
            max_files: DEFAULT_MAX_FILES,
            max_files_vague: DEFAULT_MAX_FILES_VAGUE,
            retrieval_tool: DEFAULT_RETRIEVAL_TOOL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `ENHANCE_SCAN_DEPTH` (default: 3)
    /// - `ENHANCE_MAX_FILES` (default: 10)
    /// - `ENHANCE_MAX_FILES_VAGUE` (default: 15)
    /// - `ENHANCE_RETRIEVAL_TOOL` (default: "mcp__augment-context-engine__codebase-retrieval")
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let retrieval_tool = lookup("ENHANCE_RETRIEVAL_TOOL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_RETRIEVAL_TOOL.to_string());

        Ok(Self {
            scan_depth: positive(&lookup, "ENHANCE_SCAN_DEPTH", DEFAULT_SCAN_DEPTH)?,
            max_files: positive(&lookup, "ENHANCE_MAX_FILES", DEFAULT_MAX_FILES)?,
            max_files_vague: positive(&lookup, "ENHANCE_MAX_FILES_VAGUE", DEFAULT_MAX_FILES_VAGUE)?,
            retrieval_tool,
        })
    }
}

fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: usize,
) -> Result<usize, AppError> {
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::Config(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}
