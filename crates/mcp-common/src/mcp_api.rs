use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CommonError;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct EnhanceParams {
    /// The original prompt to enhance.
    #[serde(default)]
    pub prompt: String,
    /// Absolute path to the project root directory.
    #[serde(default)]
    pub project_root: String,
}

impl EnhanceParams {
    /// Rejects empty fields before any filesystem access happens.
    pub fn validate(&self) -> Result<(), CommonError> {
        if self.prompt.is_empty() {
            return Err(CommonError::Required("prompt"));
        }
        if self.project_root.is_empty() {
            return Err(CommonError::Required("project_root"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EnhanceResponse {
    /// Markdown prompt with Goal, Context, Related Files, Implementation Steps,
    /// Constraints and Codebase Search Queries sections.
    pub enhanced: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_empty_and_fail_validation() {
        let params: EnhanceParams = serde_json::from_str(r#"{"project_root": "/tmp"}"#)
            .expect("missing prompt should still deserialize");
        let err = params.validate().unwrap_err();
        assert_eq!(err.to_string(), "prompt is required");

        let params: EnhanceParams = serde_json::from_str(r#"{"prompt": "fix login"}"#)
            .expect("missing project_root should still deserialize");
        let err = params.validate().unwrap_err();
        assert_eq!(err.to_string(), "project_root is required");
    }

    #[test]
    fn prompt_is_checked_before_project_root() {
        let err = EnhanceParams::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "prompt is required");
    }

    #[test]
    fn complete_params_validate() {
        let params = EnhanceParams {
            prompt: "add export button".to_string(),
            project_root: "/srv/app".to_string(),
        };
        assert!(params.validate().is_ok());
    }
}
