use std::sync::OnceLock;

use regex::Regex;

use crate::prompt::truncate_chars;

pub const MAX_EXCERPT_CHARS: usize = 160;

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^<>]*>").expect("static regex"))
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^```[a-zA-Z]*\s*\n(.*?)\n?```$").expect("static regex"))
}

/// Remove every markup tag, leaving the text between them.
pub fn strip_markup(html: &str) -> String {
    tag_re().replace_all(html, "").into_owned()
}

/// Locally derived excerpt used when the excerpt round trip fails.
///
/// Markup is stripped, the text is cut at the first sentence terminator
/// (`.`, `!` or `?`) and the sentence is limited to 160 characters. A
/// truncated sentence gets a trailing `...`.
pub fn fallback_excerpt(body: &str) -> String {
    let text = strip_markup(body);
    let first = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("");
    let first = first.split_whitespace().collect::<Vec<_>>().join(" ");

    let truncated = truncate_chars(&first, MAX_EXCERPT_CHARS);
    if truncated.len() < first.len() {
        format!("{}...", truncated.trim_end())
    } else {
        first
    }
}

/// Trim a completion and drop a surrounding markdown code fence.
pub fn strip_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    fence_re()
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(trimmed)
}

/// Normalize a one-line completion (title, excerpt): strip the fence and
/// any surrounding double quotes.
pub fn clean_reply(reply: &str) -> String {
    strip_fence(reply).trim_matches('"').trim().to_string()
}
