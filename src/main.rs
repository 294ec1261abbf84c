use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use ecotrack::config::Config;
use ecotrack::db;

/// Ecotrack: dashboard backend for environmental incident reports.
///
/// Serves report counts, trends and rankings as JSON for the browser
/// dashboard, and accepts new reports and status updates.
#[derive(Parser)]
#[command(name = "ecotrack", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and tables (safe to re-run)
    Init {
        /// Also load reference data and sample reports
        #[arg(long)]
        seed: bool,

        /// Number of sample reports to generate with --seed (default: 150)
        #[arg(long, default_value = "150")]
        reports: usize,
    },

    /// Run the dashboard web server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides HOST)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show database status and report counts
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("ecotrack=info,tower_http=info")
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init { seed, reports } => {
            info!(db_path = %config.db_path, "Initializing database");
            let conn = db::initialize(&config.db_path)?;
            let table_count = db::schema::table_count(&conn)?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");

            if seed {
                let now = chrono::Utc::now().naive_utc();
                match db::seed::seed(&conn, reports, now, rand::random())? {
                    Some(summary) => {
                        println!("\n{}", "Sample data loaded:".green().bold());
                        println!("  {} categories", summary.categories);
                        println!("  {} locations", summary.locations);
                        println!("  {} reports", summary.reports);
                        println!("  {} species, {} sightings", summary.species, summary.sightings);
                        println!("  {} milestones", summary.milestones);
                    }
                    None => {
                        println!(
                            "\n{}",
                            "Reference data already present; skipped seeding.".yellow()
                        );
                    }
                }
            }

            println!("\nNext: cargo run -- serve");
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let mut config = config;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.host = bind;
            }

            let db = db::open_sqlite(&config.db_path)?;
            info!(db_path = %config.db_path, "Using database");
            ecotrack::web::run_server(&config, db).await?;
        }

        Commands::Status => {
            // Status reports a missing database itself rather than failing.
            let db: std::sync::Arc<dyn db::Database> =
                std::sync::Arc::new(db::SqliteDatabase::new(&config.db_path));
            ecotrack::status::show(&db, &config.db_path).await?;
        }
    }

    Ok(())
}
