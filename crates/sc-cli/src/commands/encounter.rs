use std::path::Path;

use colored::Colorize;

use sc_encounter::EncounterSession;

pub fn run(state: &Path) -> Result<(), String> {
    let store = super::open_store(state)?;
    let mut session = EncounterSession::open(store);
    tracing::debug!("encounter state at {}", state.display());

    println!("  {} Encounter Tracker", "Starting".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    println!("{}\n", session.list());

    super::repl(|input| session.process(input))
}
