//! MCP server exposing the prompt enhancer.
//!
//! Exposes one tool:
//! - `enhance`: turn a vague prompt into a structured prompt with codebase context
use std::path::PathBuf;
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::{info, warn};

use crate::config::Config;
use crate::enhance::enhance_prompt;
use crate::error::AppError;
use mcp_common::mcp_api::{EnhanceParams, EnhanceResponse};

#[derive(Clone)]
pub struct EnhancePromptServer {
    config: Arc<Config>,
    tool_router: ToolRouter<EnhancePromptServer>,
}

impl EnhancePromptServer {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl EnhancePromptServer {
    #[tool(description = "Transform a vague prompt into a structured prompt with codebase context. Returns enhanced prompt with Goal, Context, Related Files, Steps, Constraints, and Codebase Search Queries. IMPORTANT: After calling this tool, use the returned 'Codebase Search Queries' section to call your codebase-retrieval tool (e.g. mcp__augment-context-engine__codebase-retrieval) for precise semantic search results before implementing.")]
    async fn enhance(
        &self,
        Parameters(params): Parameters<EnhanceParams>,
    ) -> Result<Json<EnhanceResponse>, String> {
        params
            .validate()
            .map_err(|e| AppError::from(e).to_string())?;

        info!(project_root = %params.project_root, "enhance tool invoked");

        let config = Arc::clone(&self.config);
        let root = PathBuf::from(&params.project_root);
        let prompt = params.prompt;
        let enhanced = tokio::task::spawn_blocking(move || enhance_prompt(&prompt, &root, &config))
            .await
            .map_err(|e| format!("enhance task failed: {e}"))?
            .map_err(|e| {
                warn!(error = %e, "enhance failed");
                format!("enhance failed: {e}")
            })?;

        Ok(Json(EnhanceResponse { enhanced }))
    }
}

#[tool_handler]
impl ServerHandler for EnhancePromptServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "enhance-prompt".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Prompt enhancer MCP server. Call enhance with the user's prompt and the absolute \
                 project_root to get a structured prompt (goal, stack, related files, steps, \
                 constraints). Then pass its Codebase Search Queries to {} before editing code.",
                self.config.retrieval_tool
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_publish_output_schemas() {
        let tools = EnhancePromptServer::tool_router().list_all();
        let tool = tools
            .iter()
            .find(|t| t.name == "enhance")
            .unwrap_or_else(|| panic!("missing tool: enhance"));
        assert!(
            tool.output_schema.is_some(),
            "tool enhance should publish output_schema"
        );
    }

    #[tokio::test]
    async fn enhance_validates_before_touching_the_filesystem() {
        let server = EnhancePromptServer::new(Config::default());
        let err = server
            .enhance(Parameters(EnhanceParams {
                prompt: "fix login".to_string(),
                project_root: String::new(),
            }))
            .await
            .err()
            .expect("empty project_root must be rejected");
        assert_eq!(err, "project_root is required");
    }

    #[tokio::test]
    async fn enhance_checks_prompt_first() {
        let server = EnhancePromptServer::new(Config::default());
        let err = server
            .enhance(Parameters(EnhanceParams {
                prompt: String::new(),
                project_root: String::new(),
            }))
            .await
            .err()
            .expect("empty prompt must be rejected");
        assert_eq!(err, "prompt is required");
    }

    #[tokio::test]
    async fn enhance_reports_unresolvable_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let server = EnhancePromptServer::new(Config::default());
        let err = server
            .enhance(Parameters(EnhanceParams {
                prompt: "fix login".to_string(),
                project_root: missing.to_string_lossy().into_owned(),
            }))
            .await
            .err()
            .expect("missing root must be rejected");
        assert!(err.starts_with("enhance failed: cannot resolve project root"), "got: {err}");
    }

    #[tokio::test]
    async fn enhance_returns_structured_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("go.mod"), "module app\n").unwrap();
        let server = EnhancePromptServer::new(Config::default());
        let Json(response) = server
            .enhance(Parameters(EnhanceParams {
                prompt: "add health endpoint".to_string(),
                project_root: dir.path().to_string_lossy().into_owned(),
            }))
            .await
            .expect("enhance should succeed");
        assert!(response.enhanced.starts_with("## Goal\nImplement tính năng: add health endpoint\n"));
        assert!(response.enhanced.contains("- **Stack**: Go\n"));
    }
}
