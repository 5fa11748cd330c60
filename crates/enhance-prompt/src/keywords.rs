/// Words that carry no search-discriminating value, English and Vietnamese.
const STOP_WORDS: &[&str] = &[
    "thêm", "tạo", "sửa", "xóa", "fix", "add", "create", "update", "delete", "remove", "trang",
    "page", "tính", "chức", "năng", "feature", "lỗi", "bug", "error", "không", "được", "the", "a", "an",
    "is", "are", "for", "to", "in", "of", "and", "with", "from", "that", "this", "it", "có", "và",
    "của", "cho", "với", "các", "những", "một", "đã", "đang", "sẽ", "cần", "phải", "nên", "bị",
    "mới", "cũ", "hiện", "tại",
];

const TRIM_CHARS: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\'', '`',
];

const MIN_KEYWORD_LEN: usize = 2;

/// Significant words of `prompt` in their original order. Duplicates are kept.
pub fn extract_keywords(prompt: &str) -> Vec<String> {
    prompt
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.trim_matches(TRIM_CHARS))
        .filter(|word| word.len() >= MIN_KEYWORD_LEN && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}
