//! Command implementations for tabrecon CLI

use crate::catalog::Catalog;
use crate::cli::{Commands, SideArgs};
use crate::comparator::{BatchOutcome, TableComparator};
use crate::config::SideConfig;
use crate::duckdb_catalog::DuckDbCatalog;
use crate::error::{ReconError, Result};
use crate::fetch::DatasetFetcher;
use crate::output::{default_output_path, ComparisonReport, PrettyPrinter};
use crate::progress::{create_spinner, TableProgress};
use crate::selection::TableSelection;
use std::io::Write;
use std::path::Path;

/// Attach names of the two sides inside the engine
pub const LEFT_ALIAS: &str = "left_side";
pub const RIGHT_ALIAS: &str = "right_side";

/// Selections larger than this ask for confirmation before running
pub const CONFIRM_THRESHOLD: usize = 10;

/// Execute a command
pub fn execute_command(command: Commands, sides: &SideArgs) -> Result<()> {
    match command {
        Commands::List { all_tables } => list_command(sides, all_tables),
        Commands::Compare {
            tables,
            pattern,
            all_tables,
            output,
            limit,
            yes,
        } => {
            let selection = TableSelection {
                tables,
                pattern,
                all_tables,
            };
            compare_command(sides, &selection, output.as_deref(), limit, yes).map(|_| ())
        }
    }
}

fn open_side(prefix: &str, duckdb_file: Option<&Path>, alias: &str) -> Result<DuckDbCatalog> {
    let side = SideConfig::resolve(prefix, duckdb_file)?;
    let spinner = create_spinner(&format!("Connecting to {} database...", side.label));
    let catalog = DuckDbCatalog::open(&side, alias);
    spinner.finish_and_clear();
    catalog
}

/// List tables of the left database eligible for comparison
fn list_command(sides: &SideArgs, all_tables: bool) -> Result<()> {
    let left = open_side(&sides.left_env, sides.left_db.as_deref(), LEFT_ALIAS)?;

    let selection = TableSelection {
        all_tables,
        ..Default::default()
    };
    let tables = selection.candidates(&left.list_base_tables()?);
    PrettyPrinter::print_table_list(&tables);

    Ok(())
}

/// Compare the selected tables, print a summary and write the JSON report
pub fn compare_command(
    sides: &SideArgs,
    selection: &TableSelection,
    output: Option<&Path>,
    limit: usize,
    yes: bool,
) -> Result<BatchOutcome> {
    let left = open_side(&sides.left_env, sides.left_db.as_deref(), LEFT_ALIAS)?;
    let right = open_side(&sides.right_env, sides.right_db.as_deref(), RIGHT_ALIAS)?;

    if selection.all_tables {
        log::info!("Retrieving all tables from {} database...", left.label());
    } else {
        log::info!("Retrieving master data tables from {} database...", left.label());
    }
    let tables = selection.apply(&left.list_base_tables()?);

    if tables.is_empty() {
        println!("No tables to compare.");
        return Ok(BatchOutcome::default());
    }

    println!("🔍 Tables to compare ({}): {}", tables.len(), tables.join(", "));
    if tables.len() > CONFIRM_THRESHOLD && !yes && !confirm(&format!(
        "You're about to compare {} tables. Continue?",
        tables.len()
    ))? {
        println!("❌ Comparison cancelled.");
        return Err(ReconError::Cancelled);
    }

    let comparator =
        TableComparator::new(&left, &right).with_fetcher(DatasetFetcher::new(limit));
    let progress = TableProgress::new(tables.len() as u64);
    let outcome = comparator.compare_tables(&tables, &progress);
    drop(progress);

    for result in &outcome.results {
        println!();
        PrettyPrinter::print_table_result(result, left.label(), right.label());
    }
    println!();
    PrettyPrinter::print_batch_summary(&outcome);

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(chrono::Local::now()));
    write_report(&outcome, left.label(), right.label(), &output_path)?;

    Ok(outcome)
}

fn write_report(
    outcome: &BatchOutcome,
    left_label: &str,
    right_label: &str,
    path: &Path,
) -> Result<()> {
    ComparisonReport::new(outcome, left_label, right_label).write_to(path)?;
    println!("\n💾 Report saved to: {}", path.display());
    Ok(())
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` declines
fn confirm(prompt: &str) -> Result<bool> {
    print!("⚠️  {} (y/N) ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
