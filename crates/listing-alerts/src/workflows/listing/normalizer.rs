/// Comparison key for free-form labels such as cities and property types: strips invisible
/// characters, collapses internal whitespace, and lowercases.
pub fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}', '\u{a0}'], " ");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

pub fn labels_match(left: &str, right: &str) -> bool {
    normalize_label(left) == normalize_label(right)
}
