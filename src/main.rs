//! Storage Playground CLI
//!
//! Terminal front end for the persistent tap counter.
//!
//! # Usage
//!
//! ```bash
//! # Interactive: Enter increments, `l` shows logs, `q` quits
//! storage-playground
//!
//! # One-shot commands
//! storage-playground increment --times 3
//! storage-playground show --json
//! storage-playground --log-file ~/.storage-playground/console.log logs
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use storage_playground::{commands, App, AppConfig, ConfigSources, CounterView, APP_NAME, APP_VERSION};

// =============================================================================
// CLI
// =============================================================================

/// Persistent tap counter with an activity log
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "Persistent tap counter with an activity log")]
#[command(version)]
struct Cli {
    /// Data directory holding counter.txt [env: PLAYGROUND_STORAGE_DATA]
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Counter file, overrides --data-dir [env: PLAYGROUND_COUNTER_FILE]
    #[arg(long, global = true)]
    storage_path: Option<String>,

    /// Activity log file; enables the log viewer [env: PLAYGROUND_CONSOLE]
    #[arg(long, global = true)]
    log_file: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive session (default)
    Run,
    /// Print the current label
    Show {
        /// Print a JSON snapshot instead
        #[arg(long)]
        json: bool,
    },
    /// Increment the counter
    Increment {
        /// Number of taps
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// Print the activity log
    Logs,
}

// =============================================================================
// Terminal View
// =============================================================================

/// Prints every new label on its own line
struct TerminalView;

impl CounterView for TerminalView {
    fn render(&self, display_text: &str) {
        println!("{}", display_text);
    }
}

// =============================================================================
// Main
// =============================================================================

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(cli.verbose).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Storage Playground v{}", APP_VERSION);

    let flags = ConfigSources {
        data_dir: cli.data_dir,
        storage_path: cli.storage_path,
        log_path: cli.log_file,
    };
    let config = AppConfig::resolve(flags.or(ConfigSources::from_env()));
    config.ensure_dirs()?;
    tracing::info!(
        storage = %config.storage_path.display(),
        log = ?config.log_path,
        "Resolved configuration"
    );

    let mut app = App::new(&config);
    let mut stdout = std::io::stdout();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            app.attach_view(TerminalView);
            commands::run_session(&mut app, std::io::stdin().lock(), &mut stdout)?;
        }
        Commands::Show { json } => commands::show(&app, json, &mut stdout)?,
        Commands::Increment { times } => {
            app.attach_view(TerminalView);
            commands::increment(&mut app, times).context("counter was not saved")?;
        }
        Commands::Logs => commands::logs(&app, &mut stdout)
            .context("set --log-file or PLAYGROUND_CONSOLE to enable the log viewer")?,
    }

    Ok(())
}

/// Default filter for a `-v` count. Activity events (READ/WRITE) stay
/// visible on stderr even without `-v`.
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,storage_playground::log_sink=info",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
