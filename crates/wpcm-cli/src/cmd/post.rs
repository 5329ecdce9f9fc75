use crate::output::{print_json, print_table};
use clap::Subcommand;
use wpcm_core::client::ListPostsQuery;
use wpcm_core::service::PostService;
use wpcm_core::types::PostStatus;

#[derive(Subcommand)]
pub enum PostSubcommand {
    /// List posts
    List {
        /// draft, publish, pending, private, trash or future
        #[arg(long, default_value = "publish")]
        status: PostStatus,
        #[arg(long, default_value_t = 10)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Free-text search term
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a single post
    Get { id: u64 },
}

pub fn run(service: &PostService, subcmd: PostSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PostSubcommand::List {
            status,
            per_page,
            page,
            search,
        } => {
            let query = ListPostsQuery {
                per_page,
                page,
                status,
                search,
                categories: None,
            };
            list(service, &query, json)
        }
        PostSubcommand::Get { id } => get(service, id, json),
    }
}

fn list(service: &PostService, query: &ListPostsQuery, json: bool) -> anyhow::Result<()> {
    let posts = service.list_posts(query)?;
    if json {
        return print_json(&posts);
    }
    if posts.is_empty() {
        println!("No {} posts.", query.status);
        return Ok(());
    }
    let rows = posts
        .into_iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.status.to_string(),
                p.date.format("%Y-%m-%d").to_string(),
                p.title,
            ]
        })
        .collect();
    print_table(&["ID", "STATUS", "DATE", "TITLE"], rows);
    Ok(())
}

fn get(service: &PostService, id: u64, json: bool) -> anyhow::Result<()> {
    let post = service.get_post(id)?;
    if json {
        return print_json(&post);
    }
    println!("[{}] {}", post.id, post.title);
    println!("status:   {}", post.status);
    println!("slug:     {}", post.slug);
    println!("date:     {}", post.date.to_rfc3339());
    println!("modified: {}", post.modified.to_rfc3339());
    println!("link:     {}", post.link);
    if !post.categories.is_empty() {
        println!("categories: {}", join_ids(&post.categories));
    }
    if !post.tags.is_empty() {
        println!("tags:     {}", join_ids(&post.tags));
    }
    if let Some(media) = post.featured_media {
        println!("featured: {media}");
    }
    println!();
    println!("{}", post.content);
    Ok(())
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter().map(u64::to_string).collect::<Vec<_>>().join(", ")
}
