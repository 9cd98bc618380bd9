use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_reader;

/// Compare the database against the built-in kinds. Read-only; nothing is
/// created or altered.
pub(crate) fn run_check(db: Option<PathBuf>) -> Result<(), CliError> {
    let reader = open_reader(db)?;
    let report = reader.check_schema()?;

    if let Some(path) = reader.path() {
        log::info!("  Database: {}", path.display());
    }
    log::info!("  Tables checked: {}", report.tables_checked);
    crate::log_blank();

    if report.is_ok() {
        log::info!(
            "{}",
            "Schema matches the built-in kinds".if_supports_color(Stdout, |t| t.green()),
        );
        return Ok(());
    }

    for problem in &report.problems {
        if problem.missing_table {
            log::info!(
                "  {} {}",
                problem.table.if_supports_color(Stdout, |t| t.cyan()),
                "missing table".if_supports_color(Stdout, |t| t.red()),
            );
        } else {
            log::info!(
                "  {} {} {}",
                problem.table.if_supports_color(Stdout, |t| t.cyan()),
                "missing columns:".if_supports_color(Stdout, |t| t.yellow()),
                problem.missing_columns.join(", "),
            );
        }
    }
    crate::log_blank();

    Err(CliError::schema_check(format!(
        "{} of {} tables differ",
        report.problems.len(),
        report.tables_checked
    )))
}
