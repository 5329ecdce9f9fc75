use crate::client::{ListPostsQuery, WordPressClient};
use crate::config::Settings;
use crate::error::{Result, WpcmError};
use crate::media::MediaItem;
use crate::post::{Post, PostCreate, PostSummary, PostUpdate, SearchHit};
use crate::taxonomy::Term;
use crate::types::PostStatus;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::path::Path;
use wpcm_ai::{ArticleRequest, ContentGenerator, Improvement, OpenAiClient, OpenAiConfig};

// ---------------------------------------------------------------------------
// Result records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedPost {
    pub id: u64,
    pub title: String,
    pub link: String,
    pub status: PostStatus,
    pub date: DateTime<FixedOffset>,
}

impl From<Post> for CreatedPost {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            link: p.link,
            status: p.status,
            date: p.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedPost {
    pub id: u64,
    pub title: String,
    pub link: String,
    pub status: PostStatus,
    pub modified: DateTime<FixedOffset>,
}

impl From<Post> for UpdatedPost {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            link: p.link,
            status: p.status,
            modified: p.modified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStatus {
    Deleted,
    Trashed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteOutcome {
    pub status: DeleteStatus,
    pub post_id: u64,
}

/// Generated article, plus the saved draft's identity when it was persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovedPost {
    pub post_id: u64,
    pub title: String,
    pub improved_content: String,
    pub saved: bool,
    /// Only present when the improvement was not written back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoOptimization {
    pub post_id: u64,
    pub optimized_title: String,
    pub meta_description: String,
    pub content_suggestions: Vec<String>,
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_title: Option<String>,
}

// ---------------------------------------------------------------------------
// PostService
// ---------------------------------------------------------------------------

/// Sequences the REST client, the generator and normalization for each tool.
///
/// Holds no per-call state; one instance serves the whole process.
pub struct PostService {
    wp: WordPressClient,
    generator: Option<ContentGenerator>,
    default_status: PostStatus,
    default_language: String,
}

impl PostService {
    /// Build the clients from validated settings. Without an AI key the
    /// service still starts; AI operations then fail with a configuration
    /// error.
    pub fn new(settings: &Settings) -> Result<Self> {
        let generator = match &settings.openai_api_key {
            Some(key) => {
                let config = OpenAiConfig {
                    api_key: key.clone(),
                    base_url: settings.openai_base_url.clone(),
                    timeout: settings.request_timeout,
                };
                let client = OpenAiClient::new(config)?;
                Some(ContentGenerator::new(Box::new(client)).with_model(&settings.openai_model))
            }
            None => {
                tracing::warn!("no AI key configured; content generation tools are disabled");
                None
            }
        };
        Ok(Self {
            wp: WordPressClient::new(settings)?,
            generator,
            default_status: settings.default_status(),
            default_language: settings.default_language.clone(),
        })
    }

    /// Replace the generator, e.g. with a scripted provider in tests.
    pub fn with_generator(mut self, generator: ContentGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn default_status(&self) -> PostStatus {
        self.default_status
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    fn generator(&self) -> Result<&ContentGenerator> {
        self.generator.as_ref().ok_or_else(|| {
            WpcmError::Configuration(format!(
                "{} is not set; AI content tools are unavailable",
                crate::config::ENV_OPENAI_API_KEY
            ))
        })
    }

    // -- reads --------------------------------------------------------------

    pub fn list_posts(&self, query: &ListPostsQuery) -> Result<Vec<PostSummary>> {
        let raw = self.wp.list_posts(query)?;
        Ok(Post::list_from_wire(&raw)?
            .into_iter()
            .map(PostSummary::from)
            .collect())
    }

    pub fn get_post(&self, post_id: u64) -> Result<Post> {
        Post::from_wire(&self.wp.get_post(post_id)?)
    }

    pub fn search_posts(&self, query: &str, search_in: Option<&[String]>) -> Result<Vec<SearchHit>> {
        let raw = self.wp.search_posts(query, search_in)?;
        Ok(Post::list_from_wire(&raw)?
            .into_iter()
            .map(SearchHit::from)
            .collect())
    }

    pub fn list_categories(&self) -> Result<Vec<Term>> {
        Term::list_from_wire(&self.wp.list_categories()?)
    }

    pub fn list_tags(&self) -> Result<Vec<Term>> {
        Term::list_from_wire(&self.wp.list_tags()?)
    }

    // -- writes -------------------------------------------------------------

    pub fn create_post(&self, payload: &PostCreate) -> Result<Post> {
        let post = Post::from_wire(&self.wp.create_post(payload)?)?;
        tracing::info!(post_id = post.id, title = %post.title, "created post");
        Ok(post)
    }

    pub fn update_post(&self, post_id: u64, payload: &PostUpdate) -> Result<Post> {
        if payload.is_empty() {
            tracing::debug!(post_id, "empty update payload");
        }
        let post = Post::from_wire(&self.wp.update_post(post_id, payload)?)?;
        tracing::info!(post_id, "updated post");
        Ok(post)
    }

    pub fn delete_post(&self, post_id: u64, force: bool) -> Result<DeleteOutcome> {
        self.wp.delete_post(post_id, force)?;
        tracing::info!(post_id, force, "deleted post");
        Ok(DeleteOutcome {
            status: if force {
                DeleteStatus::Deleted
            } else {
                DeleteStatus::Trashed
            },
            post_id,
        })
    }

    pub fn upload_media(&self, path: &Path, alt_text: Option<&str>) -> Result<MediaItem> {
        let mut item = MediaItem::from_wire(&self.wp.upload_media(path)?)?;
        tracing::info!(media_id = item.id, path = %path.display(), "uploaded media");
        if let Some(alt) = alt_text.filter(|a| !a.is_empty()) {
            item = MediaItem::from_wire(&self.wp.set_media_alt_text(item.id, alt)?)?;
        }
        Ok(item)
    }

    // -- AI-backed ----------------------------------------------------------

    /// Generate an article and, when `save_as_draft` is set, create it as a
    /// draft. A failed save propagates; the generated text is not returned.
    pub fn generate_post(&self, request: &ArticleRequest, save_as_draft: bool) -> Result<GeneratedPost> {
        let generated = self.generator()?.generate_blog_post(request)?;
        if !save_as_draft {
            return Ok(GeneratedPost {
                title: generated.title,
                content: generated.content,
                excerpt: generated.excerpt,
                post_id: None,
                link: None,
                status: None,
            });
        }

        let mut draft = PostCreate::new(&generated.title, &generated.content);
        draft.excerpt = Some(generated.excerpt.clone());
        let post = self.create_post(&draft).map_err(|e| {
            tracing::warn!(topic = %request.topic, error = %e, "generated post could not be saved");
            e
        })?;
        Ok(GeneratedPost {
            title: post.title,
            content: generated.content,
            excerpt: generated.excerpt,
            post_id: Some(post.id),
            link: Some(post.link),
            status: Some(post.status),
        })
    }

    pub fn improve_post(
        &self,
        post_id: u64,
        improvements: &[Improvement],
        language: &str,
        save_changes: bool,
    ) -> Result<ImprovedPost> {
        let generator = self.generator()?;
        let post = self.get_post(post_id)?;
        let improved = generator.improve_content(&post.content, improvements, language)?;

        if !save_changes {
            return Ok(ImprovedPost {
                post_id,
                title: post.title,
                improved_content: improved,
                saved: false,
                original_content: Some(post.content),
            });
        }

        let update = PostUpdate {
            content: Some(improved.clone()),
            ..Default::default()
        };
        let updated = self.update_post(post_id, &update)?;
        Ok(ImprovedPost {
            post_id: updated.id,
            title: updated.title,
            improved_content: improved,
            saved: true,
            original_content: None,
        })
    }

    /// Saving writes back the optimized title only.
    pub fn optimize_post_seo(
        &self,
        post_id: u64,
        target_keywords: Option<&[String]>,
        language: &str,
        save_changes: bool,
    ) -> Result<SeoOptimization> {
        let generator = self.generator()?;
        let post = self.get_post(post_id)?;
        let seo = generator.optimize_for_seo(&post.title, &post.content, target_keywords, language)?;

        let (post_id, current_title) = if save_changes {
            let update = PostUpdate {
                title: Some(seo.title.clone()),
                ..Default::default()
            };
            (self.update_post(post_id, &update)?.id, None)
        } else {
            (post_id, Some(post.title))
        };

        Ok(SeoOptimization {
            post_id,
            optimized_title: seo.title,
            meta_description: seo.meta_description,
            content_suggestions: seo.content_suggestions,
            saved: save_changes,
            current_title,
        })
    }
}
