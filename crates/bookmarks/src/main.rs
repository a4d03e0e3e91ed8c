use anyhow::{ensure, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookmarks::app::build_service;
use bookmarks::Config;
use bookmarks_core::bookmark::{BookmarkId, CreateBookmarkRequest, EditBookmarkRequest, OwnerId};
use bookmarks_core::service::{self, BookmarkService, ServiceError};

/// Bookmarks - per-owner bookmarks behind a cache-aside layer
#[derive(Parser, Debug)]
#[command(name = "bookmarks")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Owner acting on the bookmarks
    #[arg(long, short, default_value = "1", env = "BOOKMARKS_USER_ID")]
    user_id: i64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every bookmark of the owner
    List,
    /// Show one bookmark
    Get { id: i64 },
    /// Create a bookmark
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        link: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change some fields of a bookmark
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        link: Option<String>,
        /// New description; an empty value removes it
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a bookmark
    Delete { id: i64 },
    /// Run a create/read/edit/delete walkthrough and print every step
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookmarks=info,bookmarks_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let service = build_service(&config).await?;
    let owner_id = OwnerId(cli.user_id);

    let outcome = run(&service, owner_id, cli.command).await;

    // Let background cache fills finish before the runtime shuts down.
    service.settle().await;
    outcome
}

async fn run(service: &impl BookmarkService, owner_id: OwnerId, command: Command) -> Result<()> {
    match command {
        Command::List => print_json(&service.list_bookmarks(owner_id).await?),
        Command::Get { id } => print_json(&service.get_bookmark(owner_id, BookmarkId(id)).await?),
        Command::Create {
            title,
            link,
            description,
        } => {
            let mut request = CreateBookmarkRequest::new(title, link);
            request.description = description;
            print_json(&service.create_bookmark(owner_id, request).await?)
        }
        Command::Edit {
            id,
            title,
            link,
            description,
        } => {
            let request = EditBookmarkRequest {
                title,
                description,
                link,
            };
            print_json(&service.edit_bookmark(owner_id, BookmarkId(id), request).await?)
        }
        Command::Delete { id } => {
            service.delete_bookmark(owner_id, BookmarkId(id)).await?;
            print_json(&json!({ "deleted": id }))
        }
        Command::Demo => run_demo(service, owner_id).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints one demo step as a single JSON line.
fn report<T: Serialize>(step: &str, outcome: &service::Result<T>) -> Result<()> {
    let line = match outcome {
        Ok(value) => json!({ "step": step, "ok": value }),
        Err(err) => json!({ "step": step, "error": err.to_string() }),
    };
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}

async fn run_demo(service: &impl BookmarkService, owner_id: OwnerId) -> Result<()> {
    let stranger = OwnerId(owner_id.0.wrapping_add(1));

    let created = service
        .create_bookmark(owner_id, CreateBookmarkRequest::new("A", "https://a.example"))
        .await;
    report("create", &created)?;
    let created = created?;
    let id = created.id;

    let fetched = service.get_bookmark(owner_id, id).await;
    report("get", &fetched)?;
    ensure!(fetched? == created, "read after create returned a different bookmark");

    let foreign = service.get_bookmark(stranger, id).await;
    report("get as another owner", &foreign)?;
    ensure!(
        matches!(foreign, Err(ServiceError::NotFound(_))),
        "another owner's read must fail with NotFound"
    );

    let edited = service
        .edit_bookmark(owner_id, id, EditBookmarkRequest::new().with_title("B"))
        .await;
    report("edit", &edited)?;
    let edited = edited?;

    let fetched = service.get_bookmark(owner_id, id).await;
    report("get after edit", &fetched)?;
    ensure!(fetched? == edited, "read after edit returned a stale bookmark");

    let listed = service.list_bookmarks(owner_id).await;
    report("list", &listed)?;

    let deleted = service.delete_bookmark(owner_id, id).await;
    report("delete", &deleted)?;
    deleted?;

    let gone = service.get_bookmark(owner_id, id).await;
    report("get after delete", &gone)?;
    ensure!(
        matches!(gone, Err(ServiceError::NotFound(_))),
        "read after delete must fail with NotFound"
    );

    Ok(())
}
