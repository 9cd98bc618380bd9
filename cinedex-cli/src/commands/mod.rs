pub(crate) mod check;
pub(crate) mod config;
pub(crate) mod entry;
pub(crate) mod item;
pub(crate) mod kinds;
pub(crate) mod list;

use std::path::PathBuf;

use cinedex_catalog::{Item, Reference};
use cinedex_core::Value;
use cinedex_db::SqliteReader;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::resolve_db_path;

/// Open the catalog database named by `--db`, the settings file, or the
/// working-directory default.
pub(crate) fn open_reader(db: Option<PathBuf>) -> Result<SqliteReader, CliError> {
    let path = resolve_db_path(db);
    log::debug!("Using catalog database {}", path.display());
    Ok(SqliteReader::open(&path)?)
}

/// `ID (display)` for a resolved link, `ID (not found)` for a dangling one,
/// `-` when unset.
pub(crate) fn describe_reference(reference: &Reference<'_>) -> String {
    match (reference.id(), reference.entry()) {
        (None, _) => "-".to_string(),
        (Some(id), Some(entry)) => {
            let display = entry.display();
            if display.is_empty() {
                id.to_string()
            } else {
                format!("{id} ({display})")
            }
        }
        (Some(id), None) => format!("{id} (not found)"),
    }
}

pub(crate) fn format_value(value: &Value) -> String {
    if value.is_null() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// Print a labelled line, skipping it entirely when the value is absent.
pub(crate) fn log_field(indent: &str, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        log::info!(
            "{indent}{:<13} {}",
            format!("{label}:").if_supports_color(Stdout, |t| t.dimmed()),
            value,
        );
    }
}

/// One-line summary of an item as shown in lists and collections.
pub(crate) fn log_item_line(indent: &str, item: &Item<'_>) {
    let attributes: Vec<String> = item
        .attributes()
        .filter(|(_, v)| !v.is_null())
        .map(|(name, v)| format!("{name}={v}"))
        .collect();
    let suffix = if attributes.is_empty() {
        String::new()
    } else {
        format!("  [{}]", attributes.join(", "))
    };
    log::info!(
        "{indent}{}  {} {}{}",
        item.id().if_supports_color(Stdout, |t| t.cyan()),
        "->".if_supports_color(Stdout, |t| t.dimmed()),
        describe_reference(item.target()),
        suffix,
    );
}
