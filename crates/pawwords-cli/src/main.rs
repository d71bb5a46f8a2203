use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pawwords-cli", version, about = "PawWords CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learning and review sessions
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Browse the vocabulary collection
    Words {
        #[command(subcommand)]
        action: commands::words::WordsAction,
    },
    /// User progress statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate an immersion story from the last completed session
    Story,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session { action } => commands::session::run(action),
        Commands::Words { action } => commands::words::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Story => commands::story::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
