pub mod client;
pub mod config;
pub mod error;
pub mod media;
pub mod post;
pub mod service;
pub mod taxonomy;
pub mod types;
pub mod wire;

pub use error::{Result, WpcmError};

/// Re-exported so the CLI can build generation requests without naming
/// `wpcm-ai` directly.
pub use wpcm_ai::{ArticleLength, ArticleRequest, Improvement};
