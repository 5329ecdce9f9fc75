use crate::output::{print_json, print_table};
use clap::Subcommand;
use wpcm_core::config::{RawSettings, WarnLevel};

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Resolve settings from flags and environment and report problems
    Check,
}

pub fn run(raw: RawSettings, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Check => check(raw, json),
    }
}

fn check(raw: RawSettings, json: bool) -> anyhow::Result<()> {
    let settings = raw.validate()?;
    let warnings = settings.warnings();

    if json {
        print_json(&serde_json::json!({
            "wordpress_url": settings.wordpress_url,
            "api_base_url": settings.api_base_url(),
            "username": settings.username,
            "ai_enabled": settings.has_ai(),
            "openai_model": settings.openai_model,
            "openai_base_url": settings.openai_base_url,
            "default_post_status": settings.default_status(),
            "default_language": settings.default_language,
            "request_timeout_secs": settings.request_timeout.as_secs(),
            "warnings": warnings,
        }))?;
    } else {
        let rows = vec![
            vec!["api_base_url".to_string(), settings.api_base_url()],
            vec!["username".to_string(), settings.username.clone()],
            vec!["app_password".to_string(), "<redacted>".to_string()],
            vec![
                "openai_api_key".to_string(),
                if settings.has_ai() { "<redacted>" } else { "(not set)" }.to_string(),
            ],
            vec!["openai_model".to_string(), settings.openai_model.clone()],
            vec!["openai_base_url".to_string(), settings.openai_base_url.clone()],
            vec![
                "default_post_status".to_string(),
                settings.default_status().to_string(),
            ],
            vec!["default_language".to_string(), settings.default_language.clone()],
            vec![
                "request_timeout".to_string(),
                format!("{}s", settings.request_timeout.as_secs()),
            ],
        ];
        print_table(&["SETTING", "VALUE"], rows);
        println!();
        if warnings.is_empty() {
            println!("Configuration is valid. No warnings.");
        }
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("configuration check found errors");
    }
    Ok(())
}
