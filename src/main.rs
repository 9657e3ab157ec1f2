//! CLI entry point for quillpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quillpress::helpers::full_date;
use quillpress::Quillpress;

#[derive(Parser)]
#[command(name = "quillpress")]
#[command(version)]
#[command(about = "A server-rendered blog front end for a headless CMS", long_about = None)]
struct Cli {
    /// Path to the site configuration file
    #[arg(short, long, global = true, default_value = "_config.yml")]
    config: PathBuf,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Fetch and print the most recent posts
    List {
        /// How many posts to show
        #[arg(default_value = "6")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "quillpress=debug,info"
    } else {
        "quillpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = Quillpress::new(&cli.config)?;

    match cli.command {
        Commands::Serve { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            app.serve(&ip, port).await?;
        }

        Commands::List { count } => {
            let posts = app.cms.recent_posts(count).await;
            if posts.is_empty() {
                println!("No posts found.");
            } else {
                for post in posts {
                    println!(
                        "{}  {}  [{}]  {}",
                        full_date(&post.published_at),
                        post.title,
                        post.category,
                        post.read_time
                    );
                }
            }
        }
    }

    Ok(())
}
