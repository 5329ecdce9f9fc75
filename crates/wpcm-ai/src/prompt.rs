//! Prompt construction for the generation tasks.
//!
//! Everything here is pure string building so it can be tested without a
//! provider.

use std::fmt::Write;

// ─── ArticleLength ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleLength {
    Short,
    Medium,
    Long,
}

impl ArticleLength {
    /// Unrecognized categories fall back to `Medium`.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => ArticleLength::Short,
            "long" => ArticleLength::Long,
            _ => ArticleLength::Medium,
        }
    }

    /// Target word-count range, inclusive.
    pub fn word_range(self) -> (u32, u32) {
        match self {
            ArticleLength::Short => (400, 600),
            ArticleLength::Medium => (800, 1200),
            ArticleLength::Long => (1500, 2000),
        }
    }
}

// ─── Improvement ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Improvement {
    Seo,
    Readability,
    Structure,
    Grammar,
    /// Anything else is forwarded verbatim as a free-text instruction.
    Custom(String),
}

impl Improvement {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "seo" => Improvement::Seo,
            "readability" => Improvement::Readability,
            "structure" => Improvement::Structure,
            "grammar" => Improvement::Grammar,
            _ => Improvement::Custom(s.trim().to_string()),
        }
    }

    pub fn instruction(&self) -> &str {
        match self {
            Improvement::Seo => {
                "Optimize for SEO by improving keyword usage, headings and structure"
            }
            Improvement::Readability => {
                "Improve readability by shortening sentences and making the language more accessible"
            }
            Improvement::Structure => {
                "Improve the structure with better headings, paragraphs and flow"
            }
            Improvement::Grammar => "Fix grammar, spelling and phrasing",
            Improvement::Custom(text) => text,
        }
    }
}

// ─── ArticleRequest ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ArticleRequest {
    pub topic: String,
    pub keywords: Option<Vec<String>>,
    pub tone: String,
    pub length: ArticleLength,
    pub language: String,
}

pub(crate) const ARTICLE_SYSTEM: &str = "You are an expert content writer specialised in \
SEO-optimised blog content. You write engaging, informative and professional copy.";
pub(crate) const TITLE_SYSTEM: &str =
    "You are an SEO expert specialised in writing engaging titles.";
pub(crate) const EXCERPT_SYSTEM: &str =
    "You are an expert at writing short, engaging descriptions.";
pub(crate) const IMPROVE_SYSTEM: &str =
    "You are an expert content editor specialised in improving blog content.";
pub(crate) const SEO_SYSTEM: &str = "You are an SEO expert. Always return valid JSON.";

/// Characters of body text quoted into the excerpt prompt.
const EXCERPT_CONTEXT_CHARS: usize = 1000;
/// Characters of body text quoted into the SEO prompt.
const SEO_CONTEXT_CHARS: usize = 1500;

pub fn article_prompt(req: &ArticleRequest) -> String {
    let (lo, hi) = req.length.word_range();
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Write a professional blog post in language '{}' about the following topic:",
        req.language
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Topic: {}", req.topic);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Requirements:");
    let _ = writeln!(prompt, "- Length: {lo}-{hi} words");
    let _ = writeln!(prompt, "- Tone: {}", req.tone);
    let _ = writeln!(prompt, "- Language: {}", req.language);
    let _ = writeln!(prompt, "- Structured with headings (H2, H3)");
    let _ = writeln!(prompt, "- Open with an engaging introduction");
    let _ = writeln!(prompt, "- Use short, readable paragraphs");
    let _ = writeln!(prompt, "- Finish with a conclusion or call to action");
    if let Some(keywords) = non_empty(&req.keywords) {
        let _ = writeln!(
            prompt,
            "- Naturally include these keywords: {}",
            keywords.join(", ")
        );
    }
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Format the content as HTML using only:");
    let _ = writeln!(prompt, "- <h2> for main headings");
    let _ = writeln!(prompt, "- <h3> for subheadings");
    let _ = writeln!(prompt, "- <p> for paragraphs");
    let _ = writeln!(prompt, "- <ul> and <li> for bullet lists where relevant");
    let _ = writeln!(prompt, "- <strong> for emphasis");
    let _ = writeln!(prompt);
    prompt.push_str("Return ONLY the HTML content, without ```html fences or explanations.");
    prompt
}

pub fn title_prompt(topic: &str, keywords: Option<&[String]>, language: &str) -> String {
    let mut prompt = format!(
        "Generate an engaging, SEO-friendly title in language '{language}' for a blog post about:\n\nTopic: {topic}\n"
    );
    if let Some(keywords) = keywords.filter(|k| !k.is_empty()) {
        let _ = writeln!(prompt, "Keywords: {}", keywords.join(", "));
    }
    prompt.push_str(
        "\nRequirements:\n\
         - At most 60 characters\n\
         - Include the primary keyword if possible\n\
         - Make it engaging and clickable\n\
         - Return ONLY the title, no explanations",
    );
    prompt
}

pub fn excerpt_prompt(content: &str, language: &str) -> String {
    format!(
        "Based on the following blog content, write a short and engaging excerpt in language '{language}':\n\n\
         {}...\n\n\
         Requirements:\n\
         - At most 160 characters\n\
         - Summarise the main message\n\
         - Make it engaging\n\
         - Return ONLY the excerpt, no explanations",
        truncate_chars(content, EXCERPT_CONTEXT_CHARS)
    )
}

pub fn improve_prompt(content: &str, improvements: &[Improvement], language: &str) -> String {
    let mut prompt =
        format!("Improve the following blog content in language '{language}':\n\n{content}\n\n");
    prompt.push_str("Improvements to make:\n");
    if improvements.is_empty() {
        prompt.push_str("- General editorial polish\n");
    }
    for improvement in improvements {
        let _ = writeln!(prompt, "- {}", improvement.instruction());
    }
    prompt.push_str(
        "\nRequirements:\n\
         - Keep the HTML formatting\n\
         - Keep the overall structure\n\
         - Make only the necessary improvements\n\
         - Return the improved content as HTML without explanations",
    );
    prompt
}

pub fn seo_prompt(
    title: &str,
    content: &str,
    target_keywords: Option<&[String]>,
    language: &str,
) -> String {
    let mut prompt = format!(
        "Optimize the following blog post for SEO in language '{language}':\n\n\
         Current title: {title}\n\n\
         Content:\n{}...\n\n",
        truncate_chars(content, SEO_CONTEXT_CHARS)
    );
    if let Some(keywords) = target_keywords.filter(|k| !k.is_empty()) {
        let _ = writeln!(prompt, "Target keywords: {}", keywords.join(", "));
    }
    prompt.push_str(
        "\nProduce:\n\
         1. An improved SEO-optimized title (max 60 characters)\n\
         2. A meta description (max 160 characters)\n\
         3. Suggestions for improving the content\n\n\
         Format your answer as JSON:\n\
         {\n  \"title\": \"improved title\",\n  \"meta_description\": \"meta description\",\n  \"content_suggestions\": [\"suggestion 1\", \"suggestion 2\"]\n}",
    );
    prompt
}

/// Prefix of `s` holding at most `max` characters, on a char boundary.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn non_empty(list: &Option<Vec<String>>) -> Option<&[String]> {
    list.as_deref().filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(length: ArticleLength, keywords: Option<Vec<String>>) -> ArticleRequest {
        ArticleRequest {
            topic: "Rust ownership".to_string(),
            keywords,
            tone: "casual".to_string(),
            length,
            language: "en".to_string(),
        }
    }

    #[test]
    fn length_lookup() {
        assert_eq!(ArticleLength::parse_lossy("short").word_range(), (400, 600));
        assert_eq!(ArticleLength::parse_lossy("medium").word_range(), (800, 1200));
        assert_eq!(ArticleLength::parse_lossy("LONG").word_range(), (1500, 2000));
    }

    #[test]
    fn unknown_length_falls_back_to_medium() {
        assert_eq!(ArticleLength::parse_lossy("huge"), ArticleLength::Medium);
        assert_eq!(ArticleLength::parse_lossy("").word_range(), (800, 1200));
    }

    #[test]
    fn article_prompt_carries_parameters() {
        let prompt = article_prompt(&article(
            ArticleLength::Short,
            Some(vec!["borrowck".into(), "lifetimes".into()]),
        ));
        assert!(prompt.contains("Topic: Rust ownership"));
        assert!(prompt.contains("400-600 words"));
        assert!(prompt.contains("Tone: casual"));
        assert!(prompt.contains("borrowck, lifetimes"));
        assert!(prompt.contains("<h2>"));
    }

    #[test]
    fn article_prompt_without_keywords_has_no_keyword_line() {
        let prompt = article_prompt(&article(ArticleLength::Medium, Some(vec![])));
        assert!(!prompt.contains("keywords:"));
        assert!(prompt.contains("800-1200 words"));
    }

    #[test]
    fn improvement_parsing() {
        assert_eq!(Improvement::parse("SEO"), Improvement::Seo);
        assert_eq!(Improvement::parse(" grammar "), Improvement::Grammar);
        assert_eq!(
            Improvement::parse("add a FAQ section"),
            Improvement::Custom("add a FAQ section".to_string())
        );
    }

    #[test]
    fn improve_prompt_lists_instructions_in_order() {
        let prompt = improve_prompt(
            "<p>x</p>",
            &[Improvement::Grammar, Improvement::parse("use more examples")],
            "da",
        );
        let grammar = prompt.find("Fix grammar").unwrap();
        let custom = prompt.find("- use more examples").unwrap();
        assert!(grammar < custom);
    }

    #[test]
    fn seo_prompt_truncates_long_content() {
        let content = "a".repeat(5000);
        let prompt = seo_prompt("T", &content, None, "en");
        assert!(prompt.contains(&"a".repeat(1500)));
        assert!(!prompt.contains(&"a".repeat(1501)));
        assert!(prompt.contains("\"meta_description\""));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("æøå", 2), "æø");
        assert_eq!(truncate_chars("ab", 10), "ab");
    }
}
