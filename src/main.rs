//! CLI entry point for locluong

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use locluong::commands::new::{NewRecord, RecordKind};
use locluong::Site;

#[derive(Parser)]
#[command(name = "locluong")]
#[command(version)]
#[command(about = "A small file-backed personal site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to the base directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post or event
    New {
        /// Kind of record (post, event)
        #[arg(short, long, default_value = "post")]
        kind: String,

        /// Title of the new record
        title: String,

        /// Image path (post) or link (event)
        #[arg(short, long, default_value = "")]
        secondary: String,

        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Start the site server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (overrides config and $PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,

        /// Reload content when files change
        #[arg(short, long)]
        watch: bool,
    },

    /// Load all content and report problems
    Check,

    /// List site content
    List {
        /// Type of content to list (post, event, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "locluong=debug,info"
    } else {
        "locluong=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            locluong::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            kind,
            title,
            secondary,
            tags,
        } => {
            let config = Site::load_config(&base_dir)?;
            let kind: RecordKind = kind.parse()?;
            let record = NewRecord {
                kind,
                title: &title,
                date: chrono::Local::now().date_naive(),
                secondary: &secondary,
                tags: &tags,
            };
            let path = locluong::commands::new::create_record(&config, &record)?;
            println!("Created: {:?}", path);
        }

        Commands::Serve { port, ip, watch } => {
            let mut config = Site::load_config(&base_dir)?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(ip) = ip {
                config.ip = ip;
            }

            let site = Site::build(config)?;
            locluong::server::start(site, watch).await?;
        }

        Commands::Check => {
            let config = Site::load_config(&base_dir)?;
            locluong::commands::check::run(config)?;
        }

        Commands::List { r#type } => {
            let site = Site::open(&base_dir)?;
            locluong::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("locluong version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
