#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use patternhub_core::Preferences;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod command;

use command::{
    CommandStrategy, FavoriteInput, FavoriteStrategy, GenerateInput, GenerateStrategy,
    InfoStrategy, InitStrategy, ListInput, ListStrategy, RecommendInput, RecommendStrategy,
    SeedInput, SeedStrategy, ServeInput, ServeStrategy, ShowInput, ShowStrategy,
    VersionStrategy,
};

#[derive(Parser)]
#[command(name = "patternhub")]
#[command(about = "Browse, filter and get recommendations from a design pattern catalog", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Init,
    /// Show configuration and database status
    Info,
    /// Show version
    Version,
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Import a JSON catalog file
    Seed {
        /// Defaults to catalog.seed_path from the config
        file: Option<PathBuf>,
    },
    /// List patterns with filters and ordering
    List {
        #[arg(short, long)]
        category: Option<String>,

        /// Repeatable, or comma separated
        #[arg(short, long = "architecture")]
        architecture: Vec<String>,

        #[arg(short, long = "language")]
        language: Vec<String>,

        #[arg(short, long = "framework")]
        framework: Vec<String>,

        #[arg(short, long)]
        difficulty: Option<u8>,

        #[arg(short, long)]
        search: Option<String>,

        /// popularity, alphabetical, difficulty or recency
        #[arg(long)]
        sort: Option<String>,

        #[arg(long)]
        favorites_only: bool,

        /// Session whose favorites --favorites-only uses
        #[arg(long)]
        session: Option<String>,
    },
    /// Show one pattern
    Show { slug: String },
    /// Toggle a pattern in a session's favorites
    Favorite {
        pattern_id: i64,

        #[arg(long)]
        session: Option<String>,
    },
    /// Recommend patterns for a project description
    Recommend {
        description: String,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        architecture: Option<String>,

        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        framework: Option<String>,
    },
    /// Generate a sample implementation of a pattern
    Generate {
        slug: String,

        #[arg(short, long)]
        language: String,

        #[arg(short, long)]
        context: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
        Commands::Serve { host, port } => ServeStrategy.execute(ServeInput { host, port }).await,
        Commands::Seed { file } => SeedStrategy.execute(SeedInput { file }).await,
        Commands::List {
            category,
            architecture,
            language,
            framework,
            difficulty,
            search,
            sort,
            favorites_only,
            session,
        } => {
            ListStrategy
                .execute(ListInput {
                    category,
                    architectures: architecture,
                    languages: language,
                    frameworks: framework,
                    difficulty,
                    search,
                    sort,
                    favorites_only,
                    session,
                })
                .await
        }
        Commands::Show { slug } => ShowStrategy.execute(ShowInput { slug }).await,
        Commands::Favorite {
            pattern_id,
            session,
        } => {
            FavoriteStrategy
                .execute(FavoriteInput {
                    pattern_id,
                    session,
                })
                .await
        }
        Commands::Recommend {
            description,
            category,
            architecture,
            language,
            framework,
        } => {
            RecommendStrategy
                .execute(RecommendInput {
                    description,
                    preferences: Preferences {
                        category,
                        architecture,
                        language,
                        framework,
                    },
                })
                .await
        }
        Commands::Generate {
            slug,
            language,
            context,
        } => {
            GenerateStrategy
                .execute(GenerateInput {
                    slug,
                    language,
                    context,
                })
                .await
        }
    }
}
