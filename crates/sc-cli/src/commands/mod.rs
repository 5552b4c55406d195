pub mod encounter;
pub mod level;
pub mod location;
pub mod reset;
pub mod tables;
pub mod wizard;

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sc_core::FileStore;
use sc_scavenge::Items;

/// Open the state file, creating nothing until the first write.
fn open_store(path: &Path) -> Result<FileStore, String> {
    FileStore::open(path).map_err(|e| format!("failed to open state: {e}"))
}

/// Read commands from stdin until EOF or `quit`, printing each response.
///
/// Command errors are shown in yellow and the loop carries on.
fn repl<E: std::fmt::Display>(
    mut handle: impl FnMut(&str) -> Result<String, E>,
) -> Result<(), String> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match handle(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}

/// Item ranges as a terminal table.
fn items_table(items: &Items) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Minimum", "Maximum"]);
    for (category, range) in items {
        table.add_row(vec![
            category.display_name(),
            range.min.to_string(),
            range.max.to_string(),
        ]);
    }
    table
}
