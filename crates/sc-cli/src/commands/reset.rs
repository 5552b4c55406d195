use std::path::Path;

use sc_core::KeyValueStore;
use sc_scavenge::StorageKey;

pub fn run(state: &Path) -> Result<(), String> {
    let mut store = super::open_store(state)?;

    let keys = StorageKey::ALL
        .into_iter()
        .map(StorageKey::as_str)
        .chain(sc_encounter::session::KEYS);
    for key in keys {
        store
            .remove(key)
            .map_err(|e| format!("failed to clear {key}: {e}"))?;
    }

    println!("  Cleared saved state in {}", state.display());
    Ok(())
}
