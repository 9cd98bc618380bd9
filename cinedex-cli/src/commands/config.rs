use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings;

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings::settings_path().display());
}

/// Show the settings file and where the database path comes from.
pub(crate) fn run_config_show(db: Option<PathBuf>) {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "cinedex Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let source = if db.is_some() { "(--db)" } else { "(resolved)" };
    let resolved = settings::resolve_db_path(db);
    log::info!(
        "  Database:      {} {}",
        resolved.display().if_supports_color(Stdout, |t| t.cyan()),
        source.if_supports_color(Stdout, |t| t.dimmed()),
    );

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {line}");
        }
    }
}

/// Save `path` as the default database.
pub(crate) fn run_config_set_db(path: &Path) -> Result<(), CliError> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    if !path.exists() {
        log::warn!("{} does not exist yet", path.display());
    }

    settings::save_db_path(Some(&path))
        .map_err(|e| CliError::config(format!("Failed to save settings: {e}")))?;
    log::info!(
        "{} database path: {}",
        "Saved".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}

/// Remove the saved database path.
pub(crate) fn run_config_clear_db() -> Result<(), CliError> {
    settings::save_db_path(None)
        .map_err(|e| CliError::config(format!("Failed to save settings: {e}")))?;
    log::info!(
        "{} saved database path",
        "Cleared".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}
