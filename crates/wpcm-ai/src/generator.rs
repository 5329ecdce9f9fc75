use crate::client::{CompletionProvider, DEFAULT_MODEL};
use crate::excerpt::{clean_reply, fallback_excerpt, strip_fence};
use crate::prompt::{self, ArticleRequest, Improvement};
use crate::types::{ChatRequest, GeneratedContent, SeoSuggestions};
use crate::{GenerationError, Result};

const ARTICLE_TEMPERATURE: f32 = 0.7;
const TITLE_TEMPERATURE: f32 = 0.8;
const EXCERPT_TEMPERATURE: f32 = 0.7;
const IMPROVE_TEMPERATURE: f32 = 0.5;
const SEO_TEMPERATURE: f32 = 0.5;

/// Content tasks layered over a [`CompletionProvider`].
///
/// Holds no state between calls beyond the provider and model name.
pub struct ContentGenerator {
    provider: Box<dyn CompletionProvider>,
    model: String,
}

impl ContentGenerator {
    pub fn new(provider: Box<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate body, title and excerpt in three round trips.
    ///
    /// A failed body round trip fails the whole call. A failed title round
    /// trip falls back to the topic; a failed excerpt round trip falls back
    /// to [`fallback_excerpt`] of the body.
    pub fn generate_blog_post(&self, req: &ArticleRequest) -> Result<GeneratedContent> {
        let body = self.provider.complete(&ChatRequest::new(
            &self.model,
            prompt::ARTICLE_SYSTEM,
            prompt::article_prompt(req),
            ARTICLE_TEMPERATURE,
        ))?;
        let content = strip_fence(&body).to_string();

        let title = match self.generate_title(&req.topic, req.keywords.as_deref(), &req.language)
        {
            Ok(title) if !title.is_empty() => title,
            Ok(_) => req.topic.clone(),
            Err(e) => {
                tracing::warn!(error = %e, topic = %req.topic, "title generation failed, using topic");
                req.topic.clone()
            }
        };

        let excerpt = match self.generate_excerpt(&content, &req.language) {
            Ok(excerpt) if !excerpt.is_empty() => excerpt,
            Ok(_) => fallback_excerpt(&content),
            Err(e) => {
                tracing::warn!(error = %e, "excerpt generation failed, deriving from body");
                fallback_excerpt(&content)
            }
        };

        Ok(GeneratedContent {
            title,
            content,
            excerpt,
        })
    }

    fn generate_title(
        &self,
        topic: &str,
        keywords: Option<&[String]>,
        language: &str,
    ) -> Result<String> {
        let reply = self.provider.complete(&ChatRequest::new(
            &self.model,
            prompt::TITLE_SYSTEM,
            prompt::title_prompt(topic, keywords, language),
            TITLE_TEMPERATURE,
        ))?;
        Ok(clean_reply(&reply))
    }

    fn generate_excerpt(&self, content: &str, language: &str) -> Result<String> {
        let reply = self.provider.complete(&ChatRequest::new(
            &self.model,
            prompt::EXCERPT_SYSTEM,
            prompt::excerpt_prompt(content, language),
            EXCERPT_TEMPERATURE,
        ))?;
        Ok(clean_reply(&reply))
    }

    /// Revise existing HTML content. Failures propagate.
    pub fn improve_content(
        &self,
        content: &str,
        improvements: &[Improvement],
        language: &str,
    ) -> Result<String> {
        let reply = self.provider.complete(&ChatRequest::new(
            &self.model,
            prompt::IMPROVE_SYSTEM,
            prompt::improve_prompt(content, improvements, language),
            IMPROVE_TEMPERATURE,
        ))?;
        Ok(strip_fence(&reply).to_string())
    }

    /// Request a structured SEO result. Anything that does not parse into
    /// [`SeoSuggestions`] is an error, never a partial result.
    pub fn optimize_for_seo(
        &self,
        title: &str,
        content: &str,
        target_keywords: Option<&[String]>,
        language: &str,
    ) -> Result<SeoSuggestions> {
        let request = ChatRequest::new(
            &self.model,
            prompt::SEO_SYSTEM,
            prompt::seo_prompt(title, content, target_keywords, language),
            SEO_TEMPERATURE,
        )
        .json();
        let reply = self.provider.complete(&request)?;
        serde_json::from_str(strip_fence(&reply)).map_err(|source| GenerationError::Structured {
            content: reply.clone(),
            source,
        })
    }
}
