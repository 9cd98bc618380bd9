use std::path::PathBuf;

use cinedex_catalog::{DEFAULT_ORDER_COLUMN, Item, association_table};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{log_item_line, open_reader};

pub(crate) fn run_list(
    db: Option<PathBuf>,
    base: &str,
    base_id: &str,
    target: &str,
    order: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let reader = open_reader(db)?;
    let items = Item::retrieve_list(&reader, base, base_id, target, order)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    log::info!(
        "{} for {} {} {}",
        association_table(base, target).if_supports_color(Stdout, |t| t.bold()),
        base,
        base_id.if_supports_color(Stdout, |t| t.cyan()),
        format!("(ordered by {})", order.unwrap_or(DEFAULT_ORDER_COLUMN))
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    crate::log_blank();

    if items.is_empty() {
        log::info!(
            "  {}",
            "No items".if_supports_color(Stdout, |t| t.dimmed())
        );
        return Ok(());
    }
    for item in &items {
        log_item_line("  ", item);
    }
    crate::log_blank();
    log::info!("  {} items", items.len());

    Ok(())
}
