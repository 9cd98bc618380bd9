#![allow(dead_code)]

use cinedex_core::{MemoryReader, Row};

const COMMON: [&str; 3] = ["Details", "StatusID", "LastUpdated"];

fn entry_table(reader: &mut MemoryReader, table: &str, fields: &[&str]) {
    let mut columns = vec!["ID"];
    columns.extend_from_slice(fields);
    columns.extend_from_slice(&COMMON);
    reader.define(table, &columns);
}

fn item_table(reader: &mut MemoryReader, base: &str, target: &str, attributes: &[&str]) {
    let base_id = format!("{base}ID");
    let target_id = format!("{target}ID");
    let mut columns = vec!["ID", base_id.as_str(), target_id.as_str()];
    columns.extend_from_slice(attributes);
    columns.extend_from_slice(&COMMON);
    reader.define(&format!("{base}{target}"), &columns);
}

fn status(id: &str, title: &str) -> Row {
    Row::new()
        .with("ID", id)
        .with("Title", title)
        .with("Details", format!("Status Details {title}"))
        .with("StatusID", "_xxx")
        .with("LastUpdated", format!("Status LastUpdated {title}"))
}

fn lookup(id: &str, name: &str) -> Row {
    Row::new()
        .with("ID", id)
        .with("Name", name)
        .with("StatusID", "_xxx")
}

fn link(id: &str, base: &str, base_id: &str, target: &str, target_id: &str) -> Row {
    Row::new()
        .with("ID", id)
        .with(format!("{base}ID"), base_id)
        .with(format!("{target}ID"), target_id)
        .with("StatusID", "_xxx")
}

/// A small movie/series store covering every shape the retrieval layer
/// handles.
pub fn fixture() -> MemoryReader {
    let mut r = MemoryReader::new();

    entry_table(&mut r, "Status", &["Title"]);
    r.insert("Status", status("_xxx", "X"));
    r.insert("Status", status("_yyy", "Y"));

    entry_table(&mut r, "Country", &["Name", "OriginalName", "Code"]);
    r.insert(
        "Country",
        lookup("_xxx", "Country X")
            .with("OriginalName", "Pays X")
            .with("Code", "XX")
            .with("Details", "Country Details X")
            .with("LastUpdated", "2020-01-02 03:04:05"),
    );

    entry_table(&mut r, "Genre", &["Name"]);
    r.insert("Genre", lookup("_xxx", "Genre X"));
    r.insert("Genre", lookup("_yyy", "Genre Y"));
    r.insert("Genre", lookup("_zzz", "Genre Z"));

    entry_table(&mut r, "Language", &["Name", "OriginalName", "Code"]);
    entry_table(&mut r, "Company", &["Name"]);
    entry_table(&mut r, "Person", &["Name", "BirthName", "BirthDate"]);
    r.insert("Person", lookup("_xxx", "Person X"));

    entry_table(&mut r, "Edition", &["Title"]);
    r.insert(
        "Edition",
        Row::new().with("ID", "_xxx").with("Title", "Director's Cut"),
    );

    entry_table(
        &mut r,
        "Movie",
        &["Title", "OriginalTitle", "ReleaseYear", "Runtime"],
    );
    r.insert(
        "Movie",
        Row::new()
            .with("ID", "_xxx")
            .with("Title", "Movie X")
            .with("ReleaseYear", "1999")
            .with("Runtime", 120)
            .with("StatusID", "_yyy"),
    );

    entry_table(
        &mut r,
        "Series",
        &["Title", "OriginalTitle", "StartYear", "EndYear"],
    );
    r.insert(
        "Series",
        Row::new()
            .with("ID", "_xxx")
            .with("Title", "Series X")
            .with("StartYear", 2001)
            .with("StatusID", "_xxx"),
    );

    item_table(&mut r, "Movie", "Country", &[]);
    r.insert(
        "MovieCountry",
        link("_xx1", "Movie", "_xxx", "Country", "_xxx")
            .with("Details", "Movie Country Details X1")
            .with("LastUpdated", "Movie Country LastUpdated X1"),
    );
    r.insert(
        "MovieCountry",
        link("_xx2", "Movie", "_xxx", "Country", "_nope"),
    );

    item_table(&mut r, "Movie", "Genre", &[]);
    r.insert("MovieGenre", link("_xx1", "Movie", "_xxx", "Genre", "_zzz"));
    item_table(&mut r, "Movie", "Language", &[]);
    item_table(&mut r, "Movie", "Company", &["Role"]);
    item_table(&mut r, "Movie", "Person", &["Role", "Character"]);
    r.insert(
        "MoviePerson",
        link("_xx1", "Movie", "_xxx", "Person", "_xxx")
            .with("Role", "Actor")
            .with("Character", "Hero"),
    );
    item_table(&mut r, "Movie", "Edition", &["ReleaseDate", "Runtime"]);
    r.insert(
        "MovieEdition",
        link("_xx1", "Movie", "_xxx", "Edition", "_xxx")
            .with("ReleaseDate", "2003-05-06")
            .with("Runtime", "134"),
    );

    // Stored out of order so ordering is observable.
    item_table(&mut r, "Series", "Genre", &[]);
    r.insert(
        "SeriesGenre",
        link("_xx3", "Series", "_xxx", "Genre", "_zzz").with("Details", "a"),
    );
    r.insert(
        "SeriesGenre",
        link("_xx1", "Series", "_xxx", "Genre", "_xxx").with("Details", "c"),
    );
    r.insert(
        "SeriesGenre",
        link("_xx4", "Series", "_yyy", "Genre", "_xxx").with("Details", "d"),
    );
    r.insert(
        "SeriesGenre",
        link("_xx2", "Series", "_xxx", "Genre", "_yyy").with("Details", "b"),
    );
    item_table(&mut r, "Series", "Country", &[]);

    entry_table(&mut r, "Author", &["Name"]);
    r.insert("Author", lookup("_xxx", "Author X"));
    r.insert("Author", lookup("_yyy", "Author Y"));
    entry_table(&mut r, "Source", &["Title", "Url"]);
    r.insert(
        "Source",
        Row::new()
            .with("ID", "_xxx")
            .with("Title", "Source X")
            .with("Url", "https://example.org/x"),
    );
    entry_table(&mut r, "Text", &["Title", "Content"]);
    r.insert(
        "Text",
        Row::new()
            .with("ID", "_xxx")
            .with("Title", "Text X")
            .with("Content", "Lorem ipsum"),
    );
    item_table(&mut r, "Text", "Author", &[]);
    r.insert("TextAuthor", link("_xx1", "Text", "_xxx", "Author", "_xxx"));
    r.insert("TextAuthor", link("_xx2", "Text", "_xxx", "Author", "_yyy"));
    item_table(&mut r, "Text", "Source", &["Pages"]);
    r.insert(
        "TextSource",
        link("_xx1", "Text", "_xxx", "Source", "_xxx").with("Pages", 12),
    );

    entry_table(&mut r, "Mood", &[]);
    r.insert("Mood", Row::new().with("ID", "_xxx").with("Details", "Mood X"));
    item_table(&mut r, "Movie", "Mood", &[]);
    r.insert("MovieMood", link("_xx1", "Movie", "_xxx", "Mood", "_xxx"));

    r
}
