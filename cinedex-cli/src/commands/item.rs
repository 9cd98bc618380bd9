use std::path::PathBuf;

use cinedex_catalog::Item;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{describe_reference, format_value, log_field, open_reader};

pub(crate) fn run_item(
    db: Option<PathBuf>,
    base: &str,
    target: &str,
    id: &str,
    json: bool,
) -> Result<(), CliError> {
    let reader = open_reader(db)?;
    let mut item = Item::new(&reader, id, base, target)?;

    if item.retrieve(true)? == 0 {
        return Err(CliError::not_found(format!(
            "no {} item with ID {id}",
            item.table_name()
        )));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
        return Ok(());
    }

    log::info!(
        "{} {}",
        item.table_name().if_supports_color(Stdout, |t| t.bold()),
        item.id().if_supports_color(Stdout, |t| t.cyan()),
    );
    crate::log_blank();

    log_field("  ", base, item.base_id());
    log_field("  ", target, Some(&describe_reference(item.target())));
    for (name, value) in item.attributes() {
        log_field("  ", name, Some(&format_value(value)));
    }
    log_field("  ", "Details", item.details());
    log_field("  ", "Status", Some(&describe_reference(item.status())));
    log_field("  ", "LastUpdated", item.last_updated());

    Ok(())
}
