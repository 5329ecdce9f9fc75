mod cmd;
mod output;
mod tools;

use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use cmd::{config::ConfigSubcommand, post::PostSubcommand};
use wpcm_core::config::RawSettings;
use wpcm_core::service::PostService;

#[derive(Parser)]
#[command(
    name = "wpcm",
    about = "AI-assisted WordPress content management over MCP",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Connection settings. Every flag falls back to its environment variable.
#[derive(Args)]
struct SettingsArgs {
    /// Site root, e.g. https://blog.example.com
    #[arg(long, global = true, env = "WORDPRESS_URL")]
    wordpress_url: Option<String>,

    #[arg(long, global = true, env = "WORDPRESS_USERNAME")]
    wordpress_username: Option<String>,

    /// Application password for the user
    #[arg(long, global = true, env = "WORDPRESS_APP_PASSWORD", hide_env_values = true)]
    wordpress_app_password: Option<String>,

    /// Key for the text-generation API; AI tools are unavailable without it
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    #[arg(long, global = true, env = "OPENAI_MODEL")]
    openai_model: Option<String>,

    #[arg(long, global = true, env = "OPENAI_BASE_URL")]
    openai_base_url: Option<String>,

    /// Status for new posts when none is given (default draft)
    #[arg(long, global = true, env = "DEFAULT_POST_STATUS")]
    default_post_status: Option<String>,

    /// Language code for generated content (default da)
    #[arg(long, global = true, env = "DEFAULT_LANGUAGE")]
    default_language: Option<String>,

    /// Per-request timeout in seconds (default 30)
    #[arg(long, global = true, env = "WPCM_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,
}

impl From<SettingsArgs> for RawSettings {
    fn from(a: SettingsArgs) -> Self {
        RawSettings {
            wordpress_url: a.wordpress_url,
            wordpress_username: a.wordpress_username,
            wordpress_app_password: a.wordpress_app_password,
            openai_api_key: a.openai_api_key,
            openai_model: a.openai_model,
            openai_base_url: a.openai_base_url,
            default_post_status: a.default_post_status,
            default_language: a.default_language,
            request_timeout_secs: a.request_timeout_secs,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP stdio server
    Mcp,

    /// List the available tools
    Tools,

    /// Invoke a single tool and print its result
    Call {
        /// Tool name, e.g. list_posts
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(long, value_name = "JSON", default_value = "{}")]
        args: String,
    },

    /// Read posts
    Post {
        #[command(subcommand)]
        subcommand: PostSubcommand,
    },

    /// Inspect the resolved configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn service(raw: RawSettings) -> anyhow::Result<PostService> {
    let settings = raw.validate()?;
    for w in settings.warnings() {
        tracing::warn!("{}", w.message);
    }
    Ok(PostService::new(&settings)?)
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Mcp => LevelFilter::INFO,
        _ => LevelFilter::WARN,
    };

    // stdout carries protocol frames and command output; RUST_LOG replaces
    // the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let raw = RawSettings::from(cli.settings);
    let result = match cli.command {
        Commands::Mcp => service(raw).and_then(|svc| cmd::mcp::run(&svc)),
        Commands::Tools => cmd::tool::list(cli.json),
        Commands::Call { tool, args } => {
            service(raw).and_then(|svc| cmd::tool::call(&svc, &tool, &args))
        }
        Commands::Post { subcommand } => {
            service(raw).and_then(|svc| cmd::post::run(&svc, subcommand, cli.json))
        }
        Commands::Config { subcommand } => cmd::config::run(raw, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
