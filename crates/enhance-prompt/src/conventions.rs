use std::path::Path;

use tracing::debug;

use crate::scanner::read_file_content;

/// Convention files probed at the project root; the first non-empty one wins.
pub const CONVENTION_FILES: &[&str] = &["CLAUDE.md", "CONVENTIONS.md", "CONTRIBUTING.md", ".cursorrules"];

pub const MAX_CONVENTION_BYTES: u64 = 8 * 1024;

const RULE_MARKERS: &[&str] = &[
    "DON'T",
    "NEVER",
    "KHÔNG",
    "Anti-pattern",
    "MUST",
    "ALWAYS",
    "PHẢI",
    "LUÔN",
];

const TABLE_START_MARKERS: &[&str] = &["Anti-pattern", "Don't"];

const MAX_CONSTRAINTS: usize = 20;

const FALLBACK_CONSTRAINT: &str = "- Follow project conventions from CLAUDE.md / CONVENTIONS.md\n";

/// Leading content of the first non-empty convention file under `root`.
pub fn load_conventions(root: &Path) -> Option<String> {
    CONVENTION_FILES.iter().find_map(|name| {
        let path = root.join(name);
        match read_file_content(&path, MAX_CONVENTION_BYTES) {
            Ok(content) if !content.is_empty() => {
                debug!(file = *name, bytes = content.len(), "conventions file found");
                Some(content)
            }
            _ => None,
        }
    })
}

/// Rule lines and anti-pattern table rows pulled out of a conventions document.
pub fn extract_constraints(conventions: &str) -> String {
    let mut out = String::new();
    let mut table_mode = false;
    let mut found = 0;

    for line in conventions.split('\n') {
        let trimmed = line.trim();

        if TABLE_START_MARKERS.iter().any(|m| trimmed.contains(m)) {
            table_mode = true;
        }
        if table_mode && trimmed.is_empty() {
            table_mode = false;
        }

        if table_mode && trimmed.starts_with('|') {
            out.push_str(trimmed);
            out.push('\n');
            found += 1;
        } else if is_rule_line(trimmed) {
            out.push_str("- ");
            out.push_str(trimmed);
            out.push('\n');
            found += 1;
        }

        if found >= MAX_CONSTRAINTS {
            break;
        }
    }

    if found == 0 {
        return FALLBACK_CONSTRAINT.to_string();
    }
    out
}

fn is_rule_line(trimmed: &str) -> bool {
    trimmed.len() > 10
        && trimmed.len() < 200
        && RULE_MARKERS.iter().any(|m| trimmed.contains(m))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn rule_lines_become_bullets() {
        let doc = "# Rules\n\nYou MUST run the linter before committing.\nnormal line\n  NEVER commit secrets to git  \n";
        assert_eq!(
            extract_constraints(doc),
            "- You MUST run the linter before committing.\n- NEVER commit secrets to git\n"
        );
    }

    #[test]
    fn anti_pattern_table_rows_are_copied() {
        let doc = "## Anti-patterns\n| Bad | Good |\n|---|---|\n| any | unknown |\n\n| not | copied |\n";
        let out = extract_constraints(doc);
        assert_eq!(
            out,
            "- ## Anti-patterns\n| Bad | Good |\n|---|---|\n| any | unknown |\n"
        );
    }

    #[test]
    fn short_and_long_rule_lines_are_ignored() {
        let long = format!("MUST {}", "x".repeat(300));
        let doc = format!("MUST test\n{long}\n");
        assert_eq!(extract_constraints(&doc), FALLBACK_CONSTRAINT);
    }

    #[test]
    fn caps_at_twenty_constraints() {
        let doc = (0..30)
            .map(|i| format!("Rule {i}: ALWAYS write tests"))
            .collect::<Vec<_>>()
            .join("\n");
        let out = extract_constraints(&doc);
        assert_eq!(out.lines().count(), 20);
    }

    #[test]
    fn load_conventions_prefers_first_non_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CLAUDE.md"), "").unwrap();
        fs::write(dir.path().join("CONTRIBUTING.md"), "NEVER push to main directly").unwrap();
        fs::write(dir.path().join(".cursorrules"), "ALWAYS use tabs").unwrap();

        assert_eq!(
            load_conventions(dir.path()).as_deref(),
            Some("NEVER push to main directly")
        );
    }

    #[test]
    fn load_conventions_without_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_conventions(dir.path()).is_none());
    }
}
