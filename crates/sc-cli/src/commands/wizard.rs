use std::path::Path;

use colored::Colorize;

use sc_scavenge::{ScavengeConfig, ScavengeSession};

pub fn run(state: &Path, seed: Option<u64>) -> Result<(), String> {
    let store = super::open_store(state)?;
    let config = ScavengeConfig { seed };
    let mut session = ScavengeSession::open(store, config);
    tracing::debug!("wizard state at {}", state.display());

    println!("  {} Scavenging Wizard", "Starting".bold());
    println!("  State: {}", state.display());
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    println!("{}\n", session.status());

    super::repl(|input| session.process(input))
}
