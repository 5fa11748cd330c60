//! Keyword-scored relevance search over a project tree.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::AppError;
use crate::model::{FileCategory, ScoredFile};
use crate::scanner::{CODE_EXTENSIONS, keep_entry, relative_slash_path, resolve_root};

const MAX_FILE_SIZE: u64 = 512 * 1024;
const MAX_SCANNED_LINES: usize = 200;
const PATH_MATCH_SCORE: u32 = 3;
const LINE_MATCH_SCORE: u32 = 1;

/// Seed data, dumps and exports match every keyword and drown out real code.
const BULK_DATA_MARKERS: &[&str] = &["data_full", "data_import", "data_export", "seed", "dump"];

/// Files under `root` ranked by keyword hits, highest score first.
///
/// Only an unresolvable root is an error; unreadable entries are skipped.
pub fn search_files(
    root: &Path,
    keywords: &[String],
    max_results: usize,
) -> Result<Vec<ScoredFile>, AppError> {
    let root = resolve_root(root)?;
    let mut scores: HashMap<String, u32> = HashMap::new();

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_entry(keep_entry);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_code_extension(entry.path()) {
            continue;
        }

        match entry.metadata() {
            Ok(meta) if meta.len() > MAX_FILE_SIZE => continue,
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, "skipping file without metadata");
                continue;
            }
        }

        let Some(rel) = relative_slash_path(&root, entry.path()) else {
            continue;
        };
        let rel_lower = rel.to_lowercase();
        if is_bulk_data_path(&rel_lower) {
            continue;
        }

        let path_hits = keywords
            .iter()
            .filter(|kw| rel_lower.contains(kw.as_str()))
            .count() as u32;
        let score = path_hits * PATH_MATCH_SCORE + score_content(entry.path(), keywords);

        if score > 0 {
            *scores.entry(rel).or_insert(0) += score;
        }
    }

    let mut results: Vec<ScoredFile> = scores
        .into_iter()
        .map(|(path, score)| ScoredFile { path, score })
        .collect();
    results.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.path.cmp(&b.path)));
    results.truncate(max_results);

    Ok(results)
}

fn has_code_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| CODE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_bulk_data_path(rel_lower: &str) -> bool {
    BULK_DATA_MARKERS
        .iter()
        .any(|marker| rel_lower.contains(marker))
}

/// One point per keyword hit per line over the first lines of the file.
fn score_content(path: &Path, keywords: &[String]) -> u32 {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!(error = %e, path = %path.display(), "skipping unreadable file");
            return 0;
        }
    };
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut score = 0;
    let mut lines = 0;

    while lines < MAX_SCANNED_LINES {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, path = %path.display(), "stopped reading file");
                break;
            }
        }
        lines += 1;

        let line = String::from_utf8_lossy(&buf).to_lowercase();
        score += keywords
            .iter()
            .filter(|kw| line.contains(kw.as_str()))
            .count() as u32
            * LINE_MATCH_SCORE;
    }

    score
}

/// Architectural layer of `path`; rules are tried in order and the first match wins.
pub fn categorize_file(path: &str) -> FileCategory {
    let lower = path.to_lowercase();
    let has = |needle: &str| lower.contains(needle);
    let ends = |suffix: &str| lower.ends_with(suffix);

    if has("migration") {
        FileCategory::DatabaseMigration
    } else if has("routes/") || has("route/") {
        FileCategory::ApiRoute
    } else if has("services/") || has("service/") {
        FileCategory::ServiceLayer
    } else if has("composables/") || has("composable/") {
        FileCategory::Composable
    } else if has("pages/") || has("page/") {
        FileCategory::Page
    } else if has("components/") || has("component/") {
        FileCategory::Component
    } else if has("types/") || has("type/") {
        FileCategory::TypeDefinition
    } else if has("middleware") {
        FileCategory::Middleware
    } else if has("utils/") || has("util/") {
        FileCategory::Utility
    } else if has("test") || has("spec") {
        FileCategory::Test
    } else if ends(".sql") {
        FileCategory::Sql
    } else if ends(".md") {
        FileCategory::Documentation
    } else if ends(".json") || ends(".yaml") || ends(".yml") {
        FileCategory::Config
    } else {
        FileCategory::Source
    }
}
