use pantheon_core::{
    CatalogApp, CatalogConfig, FavoritesLedger, FileRecordSource, KvRepository, MemoryNavigator,
    MemorySurface, SqliteKvRepository, UiEvent,
};
use std::time::Instant;

const FIXTURE: &str = r#"{"characters": [
  {"id": "zeus-01", "name": "Zeus", "rank": 5, "categories": ["Olympian"]},
  {"id": "hera-01", "name": "Hera", "rank": 4, "categories": ["Olympian"]}
]}"#;

#[test]
fn favorites_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pantheon.sqlite3");
    let data_path = dir.path().join("characters.json");
    std::fs::write(&data_path, FIXTURE).unwrap();

    {
        let repo = SqliteKvRepository::open(&db_path).unwrap();
        let mut app = CatalogApp::new(
            CatalogConfig::default(),
            MemorySurface::new(),
            repo,
            MemoryNavigator::parse("https://pantheon.test/").unwrap(),
        );
        app.start(&FileRecordSource::new(&data_path)).unwrap();
        app.dispatch(&UiEvent::FavoriteClicked("zeus-01".to_string()), Instant::now());
    }

    let repo = SqliteKvRepository::open(&db_path).unwrap();
    let mut app = CatalogApp::new(
        CatalogConfig::default(),
        MemorySurface::new(),
        repo,
        MemoryNavigator::parse("https://pantheon.test/").unwrap(),
    );
    app.start(&FileRecordSource::new(&data_path)).unwrap();

    let zeus = app
        .surface()
        .cards
        .iter()
        .find(|rendered| rendered.card.id == "zeus-01")
        .unwrap();
    assert!(zeus.card.favorite);
    assert!(!app.is_favorite("hera-01"));
}

#[test]
fn corrupt_payload_reads_as_empty_and_is_overwritten() {
    let repo = SqliteKvRepository::open_in_memory().unwrap();
    repo.set("pantheon.favorites", "{not an array").unwrap();

    let ledger = FavoritesLedger::new(&repo, "pantheon.favorites");
    assert!(ledger.list_favorites().unwrap().is_empty());

    assert!(ledger.toggle("hera-01").unwrap());
    assert_eq!(
        repo.get("pantheon.favorites").unwrap().as_deref(),
        Some("[\"hera-01\"]")
    );
}

#[test]
fn ids_outside_the_catalog_are_kept() {
    let repo = SqliteKvRepository::open_in_memory().unwrap();
    repo.set("pantheon.favorites", "[\"retired-01\"]").unwrap();

    let ledger = FavoritesLedger::new(&repo, "pantheon.favorites");
    ledger.toggle("zeus-01").unwrap();
    assert_eq!(
        repo.get("pantheon.favorites").unwrap().as_deref(),
        Some("[\"retired-01\",\"zeus-01\"]")
    );
}
