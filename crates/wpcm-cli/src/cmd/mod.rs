pub mod config;
pub mod mcp;
pub mod post;
pub mod tool;
