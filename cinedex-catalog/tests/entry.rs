mod common;

use cinedex_catalog::{Entry, EntryKind, kinds};
use cinedex_core::{Error, MemoryReader, Row, Value};

use common::fixture;

fn country<'r>(reader: &'r MemoryReader, id: &str) -> Entry<'r> {
    Entry::new(reader, kinds::COUNTRY.clone(), id).unwrap()
}

#[test]
fn retrieve_basic_populates_every_field() {
    let reader = fixture();
    let mut entry = country(&reader, "_xxx");

    assert_eq!(entry.retrieve(true).unwrap(), 1);
    assert_eq!(entry.text("Name"), Some("Country X"));
    assert_eq!(entry.text("OriginalName"), Some("Pays X"));
    assert_eq!(entry.text("Code"), Some("XX"));
    assert_eq!(entry.details(), Some("Country Details X"));
    assert_eq!(entry.status().id(), Some("_xxx"));
    assert_eq!(entry.last_updated(), Some("2020-01-02 03:04:05"));

    let status = entry.status().entry().expect("status resolved");
    assert_eq!(status.text("Title"), Some("X"));
    assert_eq!(status.display(), "X");
}

#[test]
fn nonexistent_id_returns_zero_and_leaves_fields_absent() {
    let reader = fixture();
    let mut entry = country(&reader, "_nope");

    assert_eq!(entry.retrieve(true).unwrap(), 0);
    assert!(entry.fields().all(|(_, v)| v.is_null()));
    assert_eq!(entry.text("Name"), None);
    assert_eq!(entry.details(), None);
    assert_eq!(entry.status().id(), None);
    assert_eq!(entry.last_updated(), None);
    assert_eq!(entry.display(), "");
}

#[test]
fn retrieval_is_idempotent() {
    let reader = fixture();
    let mut entry = country(&reader, "_xxx");

    let first = entry.retrieve(true).unwrap();
    let snapshot = format!("{entry:?}");
    let second = entry.retrieve(true).unwrap();

    assert_eq!(first, second);
    assert_eq!(snapshot, format!("{entry:?}"));
}

#[test]
fn status_resolution_stops_after_one_level() {
    let reader = fixture();
    let mut entry = country(&reader, "_xxx");
    entry.retrieve_basic().unwrap();

    let status = entry.status().entry().unwrap();
    // Status _xxx refers to itself; the nested link keeps only its ID.
    assert_eq!(status.status().id(), Some("_xxx"));
    assert!(!status.status().is_resolved());
}

#[test]
fn status_can_be_resolved_on_demand() {
    let reader = fixture();
    let mut entry = Entry::from_table(&reader, "Status", "_yyy").unwrap();
    entry.retrieve_basic().unwrap();

    let mut nested = entry.status().entry().unwrap().status().clone();
    assert!(!nested.is_resolved());
    assert_eq!(nested.resolve(&reader).unwrap(), 1);
    assert_eq!(nested.entry().unwrap().display(), "X");
}

#[test]
fn additional_information_only_when_requested() {
    let reader = fixture();

    let mut basic = Entry::new(&reader, kinds::TEXT.clone(), "_xxx").unwrap();
    assert_eq!(basic.retrieve(true).unwrap(), 1);
    assert!(basic.collection("Author").is_empty());
    assert!(basic.collection("Source").is_empty());

    let mut full = Entry::new(&reader, kinds::TEXT.clone(), "_xxx").unwrap();
    assert_eq!(full.retrieve(false).unwrap(), 1);
    assert_eq!(full.text("Title"), basic.text("Title"));

    let authors = full.collection("Author");
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0].target().id(), Some("_xxx"));
    assert_eq!(
        authors[1].target_entry().and_then(|a| a.text("Name")),
        Some("Author Y")
    );

    let sources = full.collection("Source");
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].attribute_integer("Pages"), Some(12));
}

#[test]
fn additional_count_is_reported_separately() {
    let reader = fixture();

    let mut text = Entry::new(&reader, kinds::TEXT.clone(), "_xxx").unwrap();
    assert_eq!(text.retrieve_additional().unwrap(), 3);

    // Country exists but owns no collections.
    let mut entry = country(&reader, "_xxx");
    assert_eq!(entry.retrieve_additional().unwrap(), 0);
    assert_eq!(entry.retrieve(false).unwrap(), 1);
}

#[test]
fn movie_collections_cover_every_declared_target() {
    let reader = fixture();
    let mut movie = Entry::new(&reader, kinds::MOVIE.clone(), "_xxx").unwrap();

    assert_eq!(movie.retrieve_additional().unwrap(), 4);
    let sizes: Vec<_> = movie
        .collections()
        .map(|(target, items)| (target, items.len()))
        .collect();
    assert_eq!(
        sizes,
        vec![
            ("Genre", 1),
            ("Country", 2),
            ("Language", 0),
            ("Company", 0),
            ("Person", 1)
        ]
    );
}

#[test]
fn missing_entry_with_collections_returns_zero() {
    let reader = fixture();
    let mut text = Entry::new(&reader, kinds::TEXT.clone(), "_nope").unwrap();
    assert_eq!(text.retrieve(false).unwrap(), 0);
    assert!(text.collection("Author").is_empty());
}

#[test]
fn fields_are_coerced_to_declared_types() {
    let reader = fixture();
    let mut movie = Entry::new(&reader, kinds::MOVIE.clone(), "_xxx").unwrap();
    movie.retrieve_basic().unwrap();

    assert_eq!(movie.field("ReleaseYear"), Some(&Value::Integer(1999)));
    assert_eq!(movie.integer("Runtime"), Some(120));
    assert_eq!(movie.display(), "Movie X 1999");
    assert_eq!(movie.status().entry().map(|s| s.display()), Some("Y".into()));
}

#[test]
fn empty_id_is_rejected_before_any_query() {
    let reader = fixture();
    let err = Entry::new(&reader, kinds::GENRE.clone(), "").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { parameter: "id" }));

    let err = Entry::from_table(&reader, "", "_xxx").unwrap_err();
    assert_eq!(err.parameter(), Some("table"));
    assert_eq!(reader.query_count(), 0);
}

#[test]
fn unbound_entry_finds_nothing_without_querying() {
    let reader = fixture();
    let mut entry = Entry::unbound(&reader, kinds::GENRE.clone());

    assert_eq!(entry.retrieve(false).unwrap(), 0);
    assert_eq!(reader.query_count(), 0);

    entry.set_id("_yyy");
    assert_eq!(entry.retrieve(true).unwrap(), 1);
    assert_eq!(entry.text("Name"), Some("Genre Y"));
}

#[test]
fn set_id_drops_previously_loaded_fields() {
    let reader = fixture();
    let mut entry = country(&reader, "_xxx");
    entry.retrieve_basic().unwrap();

    entry.set_id("_nope");
    assert_eq!(entry.retrieve_basic().unwrap(), 0);
    assert_eq!(entry.text("Name"), None);
}

#[test]
fn store_failure_leaves_entry_unchanged() {
    let reader = fixture();
    let mut entry = country(&reader, "_xxx");
    entry.retrieve_basic().unwrap();

    reader.set_online(false);
    let err = entry.retrieve_basic().unwrap_err();
    assert!(matches!(err, Error::Connection { .. }));
    assert_eq!(entry.text("Name"), Some("Country X"));
}

#[test]
fn failed_status_lookup_populates_nothing() {
    // A store without a Status table: the entry row exists but resolving its
    // Status fails, so none of the row is applied.
    let reader = MemoryReader::new().with_row(
        "Genre",
        Row::new()
            .with("ID", "_xxx")
            .with("Name", "Genre X")
            .with("Details", "d")
            .with("StatusID", "_xxx")
            .with("LastUpdated", "l"),
    );
    let mut entry = Entry::new(&reader, kinds::GENRE.clone(), "_xxx").unwrap();

    let err = entry.retrieve_basic().unwrap_err();
    assert!(matches!(err, Error::Schema { .. }));
    assert_eq!(entry.text("Name"), None);
    assert_eq!(entry.details(), None);
    assert_eq!(entry.status().id(), None);
}

#[test]
fn unknown_table_is_a_schema_error() {
    let reader = fixture();
    let mut entry = Entry::new(&reader, EntryKind::generic("Nope"), "_xxx").unwrap();
    assert!(matches!(
        entry.retrieve_basic().unwrap_err(),
        Error::Schema { .. }
    ));
}

#[test]
fn generic_kind_reads_common_columns() {
    let reader = fixture();
    let mut mood = Entry::from_table(&reader, "Mood", "_xxx").unwrap();
    assert!(mood.kind().is_generic());
    assert_eq!(mood.retrieve_basic().unwrap(), 1);
    assert_eq!(mood.details(), Some("Mood X"));
    assert_eq!(mood.display(), "");
}

#[test]
fn last_updated_parses_when_it_looks_like_a_timestamp() {
    let reader = fixture();
    let mut entry = country(&reader, "_xxx");
    entry.retrieve_basic().unwrap();
    assert_eq!(
        entry.last_updated_at().map(|t| t.to_string()).as_deref(),
        Some("2020-01-02 03:04:05")
    );

    let status = entry.status().entry().unwrap();
    assert_eq!(status.last_updated(), Some("Status LastUpdated X"));
    assert!(status.last_updated_at().is_none());
}

#[test]
fn independent_entries_retrieve_concurrently() {
    let reader = fixture();
    let names: Vec<Option<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["_xxx", "_yyy", "_zzz"]
            .into_iter()
            .map(|id| {
                let reader = &reader;
                scope.spawn(move || {
                    let mut genre = Entry::new(reader, kinds::GENRE.clone(), id).unwrap();
                    genre.retrieve_basic().unwrap();
                    genre.text("Name").map(str::to_string)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(
        names,
        vec![
            Some("Genre X".to_string()),
            Some("Genre Y".to_string()),
            Some("Genre Z".to_string())
        ]
    );
}

#[test]
fn serializes_to_json() {
    let reader = fixture();
    let mut entry = Entry::new(&reader, kinds::TEXT.clone(), "_xxx").unwrap();
    entry.retrieve(false).unwrap();

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["table"], "Text");
    assert_eq!(json["display"], "Text X");
    assert_eq!(json["fields"]["Content"], "Lorem ipsum");
    assert_eq!(json["status"]["id"], serde_json::Value::Null);
    assert_eq!(json["collections"]["Author"].as_array().unwrap().len(), 2);
    assert_eq!(json["collections"]["Source"][0]["attributes"]["Pages"], 12);
}
