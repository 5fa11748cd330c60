//! Assembles the enhanced prompt from the classifier, scanner and search signals.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::classify::{classify_intent, classify_vagueness};
use crate::config::Config;
use crate::conventions::{extract_constraints, load_conventions};
use crate::error::AppError;
use crate::keywords::extract_keywords;
use crate::model::{FileCategory, Intent, ScoredFile, Vagueness};
use crate::scanner::{detect_stack, resolve_root, scan_project_structure};
use crate::search::{categorize_file, search_files};

const MAX_LISTED_DIRS: usize = 15;
const MAX_SEARCH_QUERIES: usize = 6;

const EXPLORATION_STEPS: &str = "1. Explore codebase to find relevant files\n\
                                 2. Analyze current implementation\n\
                                 3. Implement changes\n\
                                 4. Test the changes\n";

/// Markdown prompt for `prompt`; fails only when `project_root` cannot be resolved.
pub fn enhance_prompt(
    prompt: &str,
    project_root: &Path,
    config: &Config,
) -> Result<String, AppError> {
    let root = resolve_root(project_root)?;

    let intent = classify_intent(prompt);
    let vagueness = classify_vagueness(prompt);
    let conventions = load_conventions(&root);
    let stack = detect_stack(&root);

    let dirs = scan_project_structure(&root, config.scan_depth).unwrap_or_else(|e| {
        warn!(error = %e, "directory scan failed");
        Vec::new()
    });

    let keywords = extract_keywords(prompt);
    let max_files = if vagueness == Vagueness::High {
        config.max_files_vague
    } else {
        config.max_files
    };
    let related = search_files(&root, &keywords, max_files).unwrap_or_else(|e| {
        warn!(error = %e, "relevance search failed");
        Vec::new()
    });

    info!(
        root = %root.display(),
        intent = intent.as_str(),
        vagueness = vagueness.as_str(),
        stack = %stack,
        keywords = keywords.len(),
        related_files = related.len(),
        "prompt analyzed"
    );

    let mut out = String::new();

    out.push_str("## Goal\n");
    out.push_str(&goal_line(prompt, intent));
    out.push_str("\n\n");

    out.push_str("## Context\n");
    out.push_str(&format!("- **Stack**: {stack}\n"));
    out.push_str(&format!("- **Intent**: {}\n", intent.label()));
    out.push_str(&format!("- **Vagueness**: {}\n", vagueness.label()));
    if conventions.is_some() {
        out.push_str("- **Conventions file**: Detected (see constraints below)\n");
    }
    if !dirs.is_empty() {
        out.push_str("- **Project structure**:\n");
        for dir in dirs.iter().take(MAX_LISTED_DIRS) {
            out.push_str(&format!("  - `{dir}/`\n"));
        }
        if dirs.len() > MAX_LISTED_DIRS {
            out.push_str(&format!(
                "  - ... ({} more directories)\n",
                dirs.len() - MAX_LISTED_DIRS
            ));
        }
    }
    out.push('\n');

    if !related.is_empty() {
        out.push_str("## Related Files\n");
        for file in &related {
            out.push_str(&format!(
                "- `{}` — {} (relevance: {})\n",
                file.path,
                categorize_file(&file.path),
                file.score
            ));
        }
        out.push('\n');
    }

    out.push_str("## Implementation Steps\n");
    out.push_str(&build_steps(intent, &related));
    out.push('\n');

    if let Some(conventions) = &conventions {
        out.push_str("## Constraints\n");
        out.push_str(&extract_constraints(conventions));
        out.push('\n');
    }

    out.push_str("## Codebase Search Queries\n");
    out.push_str(&format!(
        "**IMPORTANT: Use `{}` with these queries to find precise file locations and code patterns before implementing.**\n\n",
        config.retrieval_tool
    ));
    for (i, query) in build_search_queries(prompt, intent, &keywords, &related)
        .iter()
        .enumerate()
    {
        out.push_str(&format!("{}. `{query}`\n", i + 1));
    }
    out.push('\n');

    Ok(out)
}

fn goal_line(prompt: &str, intent: Intent) -> String {
    match intent {
        Intent::Bugfix => format!("Debug và fix: {prompt}"),
        Intent::Feature => format!("Implement tính năng: {prompt}"),
        Intent::Refactor => format!("Refactor: {prompt}"),
        Intent::Update => format!("Cập nhật: {prompt}"),
        Intent::General => prompt.to_string(),
    }
}

/// Numbered steps; bugfix and feature plans walk files bottom-up by layer.
pub fn build_steps(intent: Intent, files: &[ScoredFile]) -> String {
    if files.is_empty() {
        return EXPLORATION_STEPS.to_string();
    }

    let mut by_layer: HashMap<FileCategory, Vec<&str>> = HashMap::new();
    for file in files {
        by_layer
            .entry(categorize_file(&file.path))
            .or_default()
            .push(&file.path);
    }
    let layered: Vec<(FileCategory, &str)> = FileCategory::LAYER_ORDER
        .iter()
        .flat_map(|layer| {
            by_layer
                .get(layer)
                .into_iter()
                .flatten()
                .map(move |path| (*layer, *path))
        })
        .collect();

    let mut lines: Vec<String> = Vec::new();
    match intent {
        Intent::Bugfix => {
            lines.push("Check browser DevTools / server logs for error details".to_string());
            lines.extend(
                layered
                    .iter()
                    .map(|(layer, path)| format!("Investigate `{path}` ({layer})")),
            );
            lines.push("Apply fix and test".to_string());
        }
        Intent::Feature => {
            lines.extend(
                layered
                    .iter()
                    .map(|(layer, path)| format!("Reference `{path}` for {layer} pattern")),
            );
            lines.push("Implement following the patterns above".to_string());
            lines.push("Test the new feature".to_string());
        }
        _ => {
            lines.extend(files.iter().map(|f| {
                format!("Modify `{}` ({})", f.path, categorize_file(&f.path))
            }));
            lines.push("Verify changes".to_string());
        }
    }

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {line}\n", i + 1))
        .collect()
}

/// Queries for the downstream semantic search tool, most specific first.
pub fn build_search_queries(
    prompt: &str,
    intent: Intent,
    keywords: &[String],
    files: &[ScoredFile],
) -> Vec<String> {
    let joined = keywords.join(" ");
    let top = files.first().map(|f| f.path.as_str());
    let mut queries = vec![prompt.to_string()];

    match intent {
        Intent::Bugfix => {
            queries.push(format!("error handling and validation for {joined}"));
            if let Some(top) = top {
                queries.push(format!("how {top} is used and called"));
            }
        }
        Intent::Feature => {
            queries.push(format!("existing implementation similar to {joined}"));
            queries.push(format!("API routes and services related to {joined}"));
            queries.push(format!("Vue pages and components for {joined}"));
        }
        Intent::Refactor => {
            queries.push(format!("all usages and references of {joined}"));
            queries.push(format!("imports and dependencies for {joined}"));
        }
        Intent::Update => {
            queries.push(format!("current implementation of {joined}"));
            if let Some(top) = top {
                queries.push(format!("functions and types in {top}"));
            }
        }
        Intent::General => {
            queries.push(format!("code related to {joined}"));
        }
    }

    if let Some(top) = top {
        let follow_up = match categorize_file(top) {
            FileCategory::ApiRoute => Some(format!("service and composable that calls {top}")),
            FileCategory::ServiceLayer => Some(format!("API route that {top} connects to")),
            FileCategory::Page | FileCategory::Component => {
                Some(format!("composable and service used by {top}"))
            }
            FileCategory::DatabaseMigration => {
                Some(format!("routes and services that query the table in {top}"))
            }
            _ => None,
        };
        queries.extend(follow_up);
    }

    queries.truncate(MAX_SEARCH_QUERIES);
    queries
}
