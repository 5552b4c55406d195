//! CLI frontend for the Fallout 2d20 scavenging calculator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "scav",
    about = "Scavenging locations and encounters for Fallout: The Roleplaying Game",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a location's items and reduction budget
    Location {
        /// Location scale: tiny, small, average, large
        #[arg(short, long)]
        scale: String,

        /// Location category: residential, commercial, industry, medical, agriculture, military
        #[arg(short, long)]
        category: String,

        /// Degree of search: untouched, partlySearched, mostlySearched, heavilySearched
        #[arg(short, long, default_value = "untouched")]
        degree: String,

        /// RNG seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Roll a location level
    Level {
        /// Player characters' level (number of d6 rolled)
        #[arg(short, long)]
        pc_level: u32,

        /// The location has an obstacle, hazard, or inhabitants
        #[arg(long)]
        problem: bool,

        /// RNG seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the scale, category, degree and other-item tables
    Tables,

    /// Step through a location interactively, saving progress to a file
    Wizard {
        /// State file
        #[arg(long, default_value = ".scavenge.json")]
        state: PathBuf,

        /// RNG seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Track initiative, hit points and injuries interactively
    Encounter {
        /// State file
        #[arg(long, default_value = ".scavenge.json")]
        state: PathBuf,
    },

    /// Clear saved wizard and encounter state
    Reset {
        /// State file
        #[arg(long, default_value = ".scavenge.json")]
        state: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Location {
            scale,
            category,
            degree,
            seed,
        } => commands::location::run(&scale, &category, &degree, seed),
        Commands::Level {
            pc_level,
            problem,
            seed,
        } => commands::level::run(pc_level, problem, seed),
        Commands::Tables => commands::tables::run(),
        Commands::Wizard { state, seed } => commands::wizard::run(&state, seed),
        Commands::Encounter { state } => commands::encounter::run(&state),
        Commands::Reset { state } => commands::reset::run(&state),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
