use std::path::PathBuf;

use cinedex_catalog::Entry;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{describe_reference, format_value, log_field, log_item_line, open_reader};

pub(crate) fn run_entry(
    db: Option<PathBuf>,
    kind: &str,
    id: &str,
    basic_only: bool,
    json: bool,
) -> Result<(), CliError> {
    let reader = open_reader(db)?;
    let mut entry = Entry::from_table(&reader, kind, id)?;

    if entry.retrieve(basic_only)? == 0 {
        return Err(CliError::not_found(format!("no {kind} with ID {id}")));
    }

    // JSON goes straight to stdout so log lines never interleave with it.
    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    let display = entry.display();
    log::info!(
        "{} {}",
        entry.table().if_supports_color(Stdout, |t| t.bold()),
        entry.id().if_supports_color(Stdout, |t| t.cyan()),
    );
    if !display.is_empty() {
        log::info!("  {display}");
    }
    crate::log_blank();

    for (name, value) in entry.fields() {
        log_field("  ", name, Some(&format_value(value)));
    }
    log_field("  ", "Details", entry.details());
    log_field("  ", "Status", Some(&describe_reference(entry.status())));
    log_field("  ", "LastUpdated", entry.last_updated());

    if basic_only {
        return Ok(());
    }

    for (target, items) in entry.collections() {
        crate::log_blank();
        log::info!(
            "  {} {}",
            target.if_supports_color(Stdout, |t| t.bold()),
            format!("({})", items.len()).if_supports_color(Stdout, |t| t.dimmed()),
        );
        for item in items {
            log_item_line("    ", item);
        }
    }

    Ok(())
}
