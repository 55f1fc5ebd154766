//! Text helpers shared by the seed importer and the advisor.

use std::sync::OnceLock;

use regex::Regex;

static NON_SLUG: OnceLock<Regex> = OnceLock::new();
static FENCED_BLOCK: OnceLock<Regex> = OnceLock::new();

#[expect(clippy::expect_used, reason = "Static regex patterns are valid")]
fn non_slug() -> &'static Regex {
    NON_SLUG.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"))
}

#[expect(clippy::expect_used, reason = "Static regex patterns are valid")]
fn fenced_block() -> &'static Regex {
    FENCED_BLOCK.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\n?(.*?)```").expect("valid fence regex")
    })
}

/// Derive a URL slug from a display name: "Factory Method" -> "factory-method".
#[must_use]
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    non_slug()
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Body of the first fenced code block, or the trimmed input when there is
/// none. Models often wrap JSON replies in ```json fences.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    fenced_block()
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or(text, |m| m.as_str().trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_names() {
        assert_eq!(slugify("Factory Method"), "factory-method");
        assert_eq!(slugify("  Model-View-Controller (MVC) "), "model-view-controller-mvc");
        assert_eq!(slugify("CQRS"), "cqrs");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn strip_plain_json() {
        assert_eq!(strip_code_fence(r#" {"key": "value"} "#), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_json_fence() {
        let input = "Here you go:\n```json\n{\"key\": \"value\"}\n```\nEnjoy";
        assert_eq!(strip_code_fence(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_generic_fence() {
        let input = "```\n[1, 2]\n```";
        assert_eq!(strip_code_fence(input), "[1, 2]");
    }
}
