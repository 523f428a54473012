/// Pokoro - terminal front end for the Pokoro music player
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pokoro_cli::{commands, AppConfig, Context};
use pokoro_session::FileGuestStore;
use pokoro_supabase::SupabaseClient;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pokoro")]
#[command(about = "Browse the Pokoro catalog and manage favorites", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./pokoro.toml when present)
    #[arg(short, long, global = true, env = "POKORO_CONFIG")]
    config: Option<PathBuf>,

    /// Act as this host platform user instead of the configured identity
    #[arg(long, global = true)]
    host_user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved user identity
    Whoami,
    /// List tracks
    Tracks {
        /// Case-insensitive filter on title or artist
        #[arg(short, long)]
        search: Option<String>,
        /// Only show favorites
        #[arg(short, long)]
        favorites: bool,
    },
    /// Toggle the favorite mark of a track
    Favorite {
        /// Track id as listed by `tracks`
        track_id: String,
    },
    /// Show the profile summary
    Profile {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokoro=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.host_user.is_some() {
        config.identity.host_user_id = cli.host_user;
    }
    config.validate()?;

    let client = SupabaseClient::new(config.supabase())?;
    let guests = FileGuestStore::new(config.identity.guest_id_path.clone());
    let ctx = Context {
        catalog: &client,
        favorites: &client,
        guests: &guests,
        host_user_id: config.identity.host_user_id.clone(),
        playback: config.playback(),
    };

    tracing::debug!(url = %client.url(), "Using Supabase project");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Whoami => commands::whoami(&ctx, &mut out)?,
        Commands::Tracks { search, favorites } => {
            commands::tracks(&ctx, search.as_deref(), favorites, &mut out).await?;
        }
        Commands::Favorite { track_id } => commands::favorite(&ctx, &track_id, &mut out).await?,
        Commands::Profile { json } => commands::profile(&ctx, json, &mut out).await?,
    }

    Ok(())
}
