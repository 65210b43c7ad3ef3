use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rapport", version, about = "Rapport relationship tracker CLI")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// People management
    Person {
        #[command(subcommand)]
        action: commands::person::PersonAction,
    },
    /// Log and list interactions
    Interaction {
        #[command(subcommand)]
        action: commands::interaction::InteractionAction,
    },
    /// Commitments (open loops) owed to people
    Commitment {
        #[command(subcommand)]
        action: commands::commitment::CommitmentAction,
    },
    /// Free-text notes about people
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Weekly review: who needs attention
    Review(commands::review::ReviewArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Person { action } => commands::person::run(action),
        Commands::Interaction { action } => commands::interaction::run(action),
        Commands::Commitment { action } => commands::commitment::run(action),
        Commands::Note { action } => commands::note::run(action),
        Commands::Review(args) => commands::review::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
