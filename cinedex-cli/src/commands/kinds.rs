use cinedex_catalog::{FieldSpec, FieldType, kinds};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

fn format_fields(fields: &[FieldSpec]) -> String {
    if fields.is_empty() {
        return "-".to_string();
    }
    fields
        .iter()
        .map(|f| {
            let ty = match f.ty {
                FieldType::Text => "text",
                FieldType::Integer => "integer",
                FieldType::Real => "real",
            };
            format!("{} {}", f.column, ty)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print the built-in entry and item kinds.
pub(crate) fn run_kinds() {
    log::info!("{}", "Entry kinds".if_supports_color(Stdout, |t| t.bold()));
    for kind in kinds::ENTRY_KINDS {
        log::info!(
            "  {:<14} {}",
            kind.table().if_supports_color(Stdout, |t| t.cyan()),
            format_fields(kind.fields()),
        );
        if !kind.collections().is_empty() {
            let targets: Vec<_> = kind.collections().iter().map(|c| c.target).collect();
            log::info!(
                "  {:<14} {}",
                "",
                format!("collections: {}", targets.join(", "))
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    crate::log_blank();

    log::info!("{}", "Item kinds".if_supports_color(Stdout, |t| t.bold()));
    for kind in kinds::ITEM_KINDS {
        let target = kind.target().unwrap_or("(any)");
        log::info!(
            "  {:<14} {}",
            target.if_supports_color(Stdout, |t| t.cyan()),
            format_fields(kind.attributes()),
        );
    }
}
