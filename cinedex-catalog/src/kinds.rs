//! Built-in kind table.
//!
//! One line per lookup table and per association kind. Adding a new lookup
//! table means adding a descriptor here; the retrieval code never changes.

use crate::kind::{CollectionSpec, EntryKind, FieldSpec, ItemKind};

/// Table holding Status entries.
pub const STATUS_TABLE: &str = "Status";

// ── Entry kinds ─────────────────────────────────────────────────────────────

pub static STATUS: EntryKind =
    EntryKind::builtin(STATUS_TABLE, &[FieldSpec::text("Title")], &["Title"], &[]);

pub static COLOR: EntryKind =
    EntryKind::builtin("Color", &[FieldSpec::text("Name")], &["Name"], &[]);

pub static COUNTRY: EntryKind = EntryKind::builtin(
    "Country",
    &[
        FieldSpec::text("Name"),
        FieldSpec::text("OriginalName"),
        FieldSpec::text("Code"),
    ],
    &["Name"],
    &[],
);

pub static GENRE: EntryKind =
    EntryKind::builtin("Genre", &[FieldSpec::text("Name")], &["Name"], &[]);

pub static LANGUAGE: EntryKind = EntryKind::builtin(
    "Language",
    &[
        FieldSpec::text("Name"),
        FieldSpec::text("OriginalName"),
        FieldSpec::text("Code"),
    ],
    &["Name"],
    &[],
);

pub static ASPECT_RATIO: EntryKind = EntryKind::builtin(
    "AspectRatio",
    &[FieldSpec::text("Name"), FieldSpec::real("Ratio")],
    &["Name"],
    &[],
);

pub static SOUND_MIX: EntryKind =
    EntryKind::builtin("SoundMix", &[FieldSpec::text("Name")], &["Name"], &[]);

pub static FILM_FORMAT: EntryKind = EntryKind::builtin(
    "FilmFormat",
    &[FieldSpec::text("Name"), FieldSpec::real("Width")],
    &["Name"],
    &[],
);

pub static CERTIFICATION: EntryKind =
    EntryKind::builtin("Certification", &[FieldSpec::text("Name")], &["Name"], &[]);

pub static COMPANY: EntryKind =
    EntryKind::builtin("Company", &[FieldSpec::text("Name")], &["Name"], &[]);

pub static PERSON: EntryKind = EntryKind::builtin(
    "Person",
    &[
        FieldSpec::text("Name"),
        FieldSpec::text("BirthName"),
        FieldSpec::text("BirthDate"),
    ],
    &["Name"],
    &[],
);

pub static AUTHOR: EntryKind =
    EntryKind::builtin("Author", &[FieldSpec::text("Name")], &["Name"], &[]);

pub static SOURCE: EntryKind = EntryKind::builtin(
    "Source",
    &[FieldSpec::text("Title"), FieldSpec::text("Url")],
    &["Title"],
    &[],
);

pub static EDITION: EntryKind =
    EntryKind::builtin("Edition", &[FieldSpec::text("Title")], &["Title"], &[]);

pub static MOVIE: EntryKind = EntryKind::builtin(
    "Movie",
    &[
        FieldSpec::text("Title"),
        FieldSpec::text("OriginalTitle"),
        FieldSpec::integer("ReleaseYear"),
        FieldSpec::integer("Runtime"),
    ],
    &["Title", "ReleaseYear"],
    &[
        CollectionSpec::new("Genre"),
        CollectionSpec::new("Country"),
        CollectionSpec::new("Language"),
        CollectionSpec::new("Company"),
        CollectionSpec::new("Person"),
    ],
);

pub static SERIES: EntryKind = EntryKind::builtin(
    "Series",
    &[
        FieldSpec::text("Title"),
        FieldSpec::text("OriginalTitle"),
        FieldSpec::integer("StartYear"),
        FieldSpec::integer("EndYear"),
    ],
    &["Title", "StartYear"],
    &[
        CollectionSpec::new("Genre"),
        CollectionSpec::new("Country"),
        CollectionSpec::new("Company"),
        CollectionSpec::new("Person"),
    ],
);

pub static TEXT: EntryKind = EntryKind::builtin(
    "Text",
    &[FieldSpec::text("Title"), FieldSpec::text("Content")],
    &["Title"],
    &[CollectionSpec::new("Author"), CollectionSpec::new("Source")],
);

pub static ENTRY_KINDS: &[&EntryKind] = &[
    &STATUS,
    &COLOR,
    &COUNTRY,
    &GENRE,
    &LANGUAGE,
    &ASPECT_RATIO,
    &SOUND_MIX,
    &FILM_FORMAT,
    &CERTIFICATION,
    &COMPANY,
    &PERSON,
    &AUTHOR,
    &SOURCE,
    &EDITION,
    &MOVIE,
    &SERIES,
    &TEXT,
];

// ── Item kinds ──────────────────────────────────────────────────────────────

pub static GENRE_ITEM: ItemKind = ItemKind::fixed("Genre", &[]);
pub static COUNTRY_ITEM: ItemKind = ItemKind::fixed("Country", &[]);
pub static COLOR_ITEM: ItemKind = ItemKind::fixed("Color", &[]);
pub static LANGUAGE_ITEM: ItemKind = ItemKind::fixed("Language", &[]);
pub static ASPECT_RATIO_ITEM: ItemKind = ItemKind::fixed("AspectRatio", &[]);
pub static SOUND_MIX_ITEM: ItemKind = ItemKind::fixed("SoundMix", &[]);
pub static CERTIFICATION_ITEM: ItemKind =
    ItemKind::fixed("Certification", &[FieldSpec::text("ReleaseDate")]);
pub static FILM_FORMAT_ITEM: ItemKind =
    ItemKind::fixed("FilmFormat", &[FieldSpec::integer("Runtime")]);
pub static COMPANY_ITEM: ItemKind = ItemKind::fixed("Company", &[FieldSpec::text("Role")]);
pub static PERSON_ITEM: ItemKind = ItemKind::fixed(
    "Person",
    &[FieldSpec::text("Role"), FieldSpec::text("Character")],
);
pub static AUTHOR_ITEM: ItemKind = ItemKind::fixed("Author", &[]);
pub static SOURCE_ITEM: ItemKind = ItemKind::fixed("Source", &[FieldSpec::integer("Pages")]);
pub static EDITION_ITEM: ItemKind = ItemKind::fixed(
    "Edition",
    &[FieldSpec::text("ReleaseDate"), FieldSpec::integer("Runtime")],
);

/// Open association kind: caller-supplied target, no attributes.
pub static ASSOCIATION: ItemKind = ItemKind::open("Association");

pub static ITEM_KINDS: &[&ItemKind] = &[
    &GENRE_ITEM,
    &COUNTRY_ITEM,
    &COLOR_ITEM,
    &LANGUAGE_ITEM,
    &ASPECT_RATIO_ITEM,
    &SOUND_MIX_ITEM,
    &CERTIFICATION_ITEM,
    &FILM_FORMAT_ITEM,
    &COMPANY_ITEM,
    &PERSON_ITEM,
    &AUTHOR_ITEM,
    &SOURCE_ITEM,
    &EDITION_ITEM,
];

/// Built-in entry kind stored in `table`.
pub fn entry_kind(table: &str) -> Option<&'static EntryKind> {
    ENTRY_KINDS
        .iter()
        .copied()
        .find(|k| k.table().eq_ignore_ascii_case(table))
}

/// Built-in item kind whose fixed target is `target`.
pub fn item_kind(target: &str) -> Option<&'static ItemKind> {
    ITEM_KINDS
        .iter()
        .copied()
        .find(|k| k.target().is_some_and(|t| t.eq_ignore_ascii_case(target)))
}
