use colored::Colorize;

use sc_scavenge::{MAX_PC_LEVEL, ScavengeConfig, calculate_location_level};

pub fn run(pc_level: u32, problem: bool, seed: Option<u64>) -> Result<(), String> {
    if pc_level == 0 {
        return Err("player level must be at least 1".into());
    }
    if pc_level > MAX_PC_LEVEL {
        return Err(format!("player level must be at most {MAX_PC_LEVEL}"));
    }

    let config = ScavengeConfig { seed };
    let level = calculate_location_level(pc_level, problem, &mut config.rng());

    println!("  {} {level}", "Location level:".bold());
    if problem {
        println!("  (fives and sixes doubled for the location's problem)");
    }

    Ok(())
}
