//! `wpcm-ai`: chat-completion driver for the wpcm content tools.
//!
//! # Architecture
//!
//! ```text
//! ContentGenerator   ← article / title / excerpt / improve / SEO tasks
//!     │                 builds prompts, applies text fallbacks
//!     ▼
//! CompletionProvider ← one request, one reply, no retries
//!     │
//!     ▼
//! OpenAiClient       ← POST {base_url}/chat/completions (blocking reqwest)
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use wpcm_ai::{ArticleLength, ArticleRequest, ContentGenerator, OpenAiClient, OpenAiConfig};
//!
//! let client = OpenAiClient::new(OpenAiConfig::new(api_key))?;
//! let generator = ContentGenerator::new(Box::new(client));
//! let post = generator.generate_blog_post(&ArticleRequest {
//!     topic: "Composting in small gardens".into(),
//!     keywords: None,
//!     tone: "friendly".into(),
//!     length: ArticleLength::Short,
//!     language: "en".into(),
//! })?;
//! println!("{}", post.title);
//! ```

pub mod client;
pub mod error;
pub mod excerpt;
pub mod generator;
pub mod prompt;
pub mod types;


pub use client::{CompletionProvider, OpenAiClient, OpenAiConfig};
pub use error::GenerationError;
pub use generator::ContentGenerator;
pub use prompt::{ArticleLength, ArticleRequest, Improvement};
pub use types::{ChatMessage, ChatRequest, GeneratedContent, Role, SeoSuggestions};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, GenerationError>;
