//! Filesystem helpers: root resolution, directory overview, stack detection
//! and the bounded reader used for convention files.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::AppError;

/// Directory names pruned from every walk.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".nuxt",
    ".next",
    ".output",
    "__pycache__",
    ".venv",
    "vendor",
    ".cache",
    ".turbo",
    "coverage",
    ".nyc_output",
    "tmp",
    ".tmp",
];

/// Extensions (lower-case, without the dot) treated as searchable source or text.
pub const CODE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "vue", "svelte", "go", "py", "rs", "java", "kt", "cs", "sql", "md",
    "json", "yaml", "yml", "toml", "css", "scss", "html",
];

const STACK_MARKER_FILES: &[(&str, &str)] = &[
    ("package.json", "Node.js"),
    ("go.mod", "Go"),
    ("Cargo.toml", "Rust"),
    ("pom.xml", "Java (Maven)"),
    ("build.gradle", "Java (Gradle)"),
    ("requirements.txt", "Python"),
    ("pyproject.toml", "Python"),
    ("composer.json", "PHP"),
];

/// File-name prefixes; `nuxt.config` matches `nuxt.config.ts`, `nuxt.config.js`, ...
const FRAMEWORK_MARKER_PREFIXES: &[(&str, &str)] = &[
    ("quasar.config", "Quasar"),
    ("nuxt.config", "Nuxt"),
    ("next.config", "Next.js"),
    ("vite.config", "Vite"),
    ("angular.json", "Angular"),
    ("svelte.config", "Svelte"),
];

const PLATFORM_MARKER_DIRS: &[(&str, &str)] = &[("supabase", "Supabase")];

/// Canonical absolute form of `root`; fails if it does not exist or is not a directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf, AppError> {
    let resolved = std::fs::canonicalize(root).map_err(|source| AppError::ProjectRoot {
        path: root.to_path_buf(),
        source,
    })?;
    if !resolved.is_dir() {
        return Err(AppError::NotADirectory(resolved));
    }
    Ok(resolved)
}

/// True for names in [`IGNORED_DIRS`] and any dot-prefixed name.
pub fn is_ignored_dir_name(name: &str) -> bool {
    IGNORED_DIRS.contains(&name) || name.starts_with('.')
}

/// Walk filter: keeps the root and files, prunes ignored or hidden directories.
pub(crate) fn keep_entry(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| !is_ignored_dir_name(name))
        .unwrap_or(true)
}

/// `path` relative to `root`, joined with '/' regardless of platform.
pub(crate) fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Relative paths of directories under `root`, at most `max_depth` segments deep.
pub fn scan_project_structure(root: &Path, max_depth: usize) -> Result<Vec<String>, AppError> {
    let root = resolve_root(root)?;
    let mut dirs = Vec::new();

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
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
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(rel) = relative_slash_path(&root, entry.path()) {
            dirs.push(rel);
        }
    }

    Ok(dirs)
}

/// Up to `max_bytes` of the file's leading content.
///
/// Longer files are cut at the byte boundary, which may split a line or a
/// multi-byte character; the broken tail decodes as U+FFFD.
pub fn read_file_content(path: &Path, max_bytes: u64) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut buf = Vec::new();
    file.take(max_bytes).read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Technology labels inferred from marker files at `root`, joined with " + ".
pub fn detect_stack(root: &Path) -> String {
    let mut stacks: Vec<&str> = Vec::new();

    for &(file, label) in STACK_MARKER_FILES {
        if root.join(file).exists() {
            stacks.push(label);
        }
    }

    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    for &(prefix, label) in FRAMEWORK_MARKER_PREFIXES {
        let pattern = format!("{escaped_root}/{prefix}*");
        let found = glob::glob(&pattern)
            .map(|mut paths| paths.any(|p| p.is_ok()))
            .unwrap_or(false);
        if found {
            stacks.push(label);
        }
    }

    for &(dir, label) in PLATFORM_MARKER_DIRS {
        if root.join(dir).exists() {
            stacks.push(label);
        }
    }

    if stacks.is_empty() {
        "Unknown".to_string()
    } else {
        stacks.join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn detect_stack_single_marker() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "go.mod", "module example.com/app\n");
        assert_eq!(detect_stack(dir.path()), "Go");
    }

    #[test]
    fn detect_stack_without_markers_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.txt", "nothing here");
        assert_eq!(detect_stack(dir.path()), "Unknown");
    }

    #[test]
    fn detect_stack_combines_all_matches() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "package.json", "{}");
        touch(dir.path(), "nuxt.config.ts", "export default {}");
        fs::create_dir(dir.path().join("supabase")).unwrap();

        let stack = detect_stack(dir.path());
        let labels: Vec<&str> = stack.split(" + ").collect();
        assert_eq!(labels.len(), 3, "got: {stack}");
        for label in ["Node.js", "Nuxt", "Supabase"] {
            assert!(labels.contains(&label), "missing {label} in {stack}");
        }
    }

    #[test]
    fn scan_respects_depth_and_ignores() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for d in [
            "src/components/forms/inputs",
            "node_modules/lib/deep",
            "src/node_modules/inner",
            ".github/workflows",
            "server/routes",
        ] {
            fs::create_dir_all(root.join(d)).unwrap();
        }
        touch(root, "src/main.ts", "");

        let dirs = scan_project_structure(root, 3).unwrap();
        assert_eq!(
            dirs,
            vec![
                "server",
                "server/routes",
                "src",
                "src/components",
                "src/components/forms",
            ]
        );
        assert!(dirs.iter().all(|d| d.split('/').count() <= 3));
        assert!(dirs.iter().all(|d| !d.contains("node_modules")));
    }

    #[test]
    fn scan_walks_dot_named_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".workspace");
        fs::create_dir_all(root.join("src/.cache/deep")).unwrap();

        assert_eq!(scan_project_structure(&root, 3).unwrap(), vec!["src"]);
    }

    #[test]
    fn scan_of_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            scan_project_structure(&missing, 3),
            Err(AppError::ProjectRoot { .. })
        ));
    }

    #[test]
    fn read_file_content_truncates_at_byte_cap() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "CLAUDE.md", "line one\nline two\n");

        let head = read_file_content(&dir.path().join("CLAUDE.md"), 12).unwrap();
        assert_eq!(head, "line one\nlin");

        let full = read_file_content(&dir.path().join("CLAUDE.md"), 8 * 1024).unwrap();
        assert_eq!(full, "line one\nline two\n");
    }

    #[test]
    fn relative_paths_use_forward_slashes() {
        let root = Path::new("/srv/app");
        assert_eq!(
            relative_slash_path(root, &root.join("server").join("routes")),
            Some("server/routes".to_string())
        );
        assert_eq!(relative_slash_path(root, root), None);
    }
}
