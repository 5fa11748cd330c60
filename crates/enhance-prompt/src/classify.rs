//! Keyword heuristics that classify a prompt's intent and vagueness.

use crate::model::{Intent, Vagueness};

/// Keyword groups in priority order; the first group with any substring hit wins.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Bugfix,
        &[
            "fix",
            "lỗi",
            "bug",
            "error",
            "sửa lỗi",
            "không hoạt động",
            "không hiển thị",
            "bị lỗi",
            "debug",
            "crash",
        ],
    ),
    (
        Intent::Feature,
        &[
            "thêm",
            "tạo",
            "add",
            "create",
            "new",
            "implement",
            "feature",
            "tính năng",
            "chức năng",
        ],
    ),
    (
        Intent::Refactor,
        &[
            "refactor",
            "tái cấu trúc",
            "chuyển",
            "tách",
            "gộp",
            "rename",
            "đổi tên",
            "optimize",
            "tối ưu",
        ],
    ),
    (
        Intent::Update,
        &[
            "sửa",
            "update",
            "cập nhật",
            "thay đổi",
            "change",
            "modify",
            "chỉnh",
        ],
    ),
];

const PATH_MARKERS: &[&str] = &["/", "\\", ".ts", ".vue", ".go", ".py"];

const FUNCTION_MARKERS: &[&str] = &["()", "function ", "func ", "def "];

const VAGUE_WORD_LIMIT: usize = 5;

/// First intent whose keyword group matches the lower-cased prompt, else `General`.
pub fn classify_intent(prompt: &str) -> Intent {
    let lower = prompt.to_lowercase();
    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}

/// A path or function mention beats word count: "fix a.ts" is specific even
/// though it is short.
pub fn classify_vagueness(prompt: &str) -> Vagueness {
    let lower = prompt.to_lowercase();

    let mentions_location = PATH_MARKERS
        .iter()
        .chain(FUNCTION_MARKERS)
        .any(|marker| lower.contains(marker));
    if mentions_location {
        return Vagueness::Low;
    }

    if prompt.split_whitespace().count() <= VAGUE_WORD_LIMIT {
        Vagueness::High
    } else {
        Vagueness::Medium
    }
}
