use clap::ValueEnum;
use coinmill::models::{Restraint, UpgradeSet, User};
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// The output format
    pub format: OutputFormat,
    /// When true, print minimal output (just IDs)
    pub quiet: bool,
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

fn print_restraint_rows(restraints: &[Restraint]) {
    let max_id = restraints.iter().map(|r| r.get_id().len()).max().unwrap_or(2);
    let max_name = restraints.iter().map(|r| r.get_name().len()).max().unwrap_or(4).max(4);
    println!(
        "  {:<id_w$}  {:<name_w$}  {:>5}  {:>8}  {:>10}  USER",
        "ID",
        "NAME",
        "LEVEL",
        "COST",
        "COIN/MIN",
        id_w = max_id,
        name_w = max_name,
    );
    for restraint in restraints {
        println!(
            "  {:<id_w$}  {:<name_w$}  {:>5}  {:>8}  {:>10.2}  {}",
            restraint.get_id(),
            restraint.get_name(),
            restraint.get_level(),
            restraint.get_cost(),
            restraint.get_coin_min(),
            restraint.get_user_id().unwrap_or("-"),
            id_w = max_id,
            name_w = max_name,
        );
    }
}

/// Prints a single upgrade set in the specified format
pub fn print_upgrade_set(set: &UpgradeSet, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", set.get_id());
                return;
            }
            println!("Upgrade set {} (updated {})", set.get_id(), set.get_updated_at().format("%Y-%m-%d %H:%M"));
            if set.restraints().is_empty() {
                println!("  No restraints.");
            } else {
                print_restraint_rows(set.restraints());
            }
        }
        OutputFormat::Json => print_json(set),
    }
}

/// Prints a list of upgrade sets in the specified format
pub fn print_upgrade_sets(sets: &[UpgradeSet], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if sets.is_empty() {
                if !config.quiet {
                    println!("No upgrade sets found.");
                }
                return;
            }
            for set in sets {
                print_upgrade_set(set, config);
            }
        }
        OutputFormat::Json => print_json(sets),
    }
}

/// Prints a single user in the specified format
pub fn print_user(user: &User, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", user.get_id());
                return;
            }
            println!("ID:          {}", user.get_id());
            println!("Balance:     {}", user.get_signup_coin());
            println!("Coins/min:   {}", user.get_coins_per_minute());
            println!("Created:     {}", user.get_created_at());
        }
        OutputFormat::Json => print_json(user),
    }
}

/// Prints a success message in the specified format
pub fn print_success(message: &str, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if !config.quiet {
                println!("{}", message);
            }
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({"status": "ok", "message": message}));
        }
    }
}
