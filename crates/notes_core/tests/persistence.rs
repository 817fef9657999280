use chrono::{Duration, TimeZone, Utc};
use notes_core::{
    Clock, KeyValueStore, ManualClock, MemoryStore, NewNote, NoteRepository, NoteUpdate,
    NullStore, RepositoryConfig, SqliteStore, NOTES_STORAGE_KEY, TIPS_TITLE, WELCOME_TITLE,
};
use serde_json::json;

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap())
}

#[test]
fn reinitializing_from_mirror_reproduces_notes() {
    let clock = clock();
    let mut repo =
        NoteRepository::with_config(MemoryStore::new(), RepositoryConfig::default(), clock.clone());
    clock.advance(Duration::seconds(1));
    let created = repo.create_note(
        NewNote::titled("Keep me")
            .with_content("line one\nline two")
            .with_tags(["a", "b"]),
    );
    clock.advance(Duration::seconds(1));
    repo.update_note(NoteUpdate::for_id(created.id.clone()).title("Kept"))
        .unwrap();
    let before = repo.list_notes(None);

    let reopened = NoteRepository::with_config(
        repo.into_storage(),
        RepositoryConfig::default(),
        clock.clone(),
    );

    assert_eq!(reopened.list_notes(None), before);
    assert_eq!(reopened.len(), 3);
}

#[test]
fn loaded_notes_are_sorted_by_updated_at() {
    let mut store = MemoryStore::new();
    let payload = json!([
        {"id": "old", "title": "Old", "content": "", "tags": [],
         "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"},
        {"id": "new", "title": "New", "content": "", "tags": [],
         "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-03-01T00:00:00Z"},
        {"id": "mid", "title": "Mid", "content": "", "tags": [],
         "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-02-01T00:00:00Z"}
    ]);
    store
        .set_item(NOTES_STORAGE_KEY, &payload.to_string())
        .unwrap();

    let repo = NoteRepository::with_config(store, RepositoryConfig::default(), clock());
    let ids: Vec<_> = repo.list_notes(None).into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[test]
fn every_loaded_note_survives_save_and_reload() {
    let mut store = MemoryStore::new();
    let payload = json!([
        {"id": "far", "title": "Far", "createdAt": 253_402_300_800_000_i64, "updatedAt": 253_402_300_800_000_i64},
        {"id": "edge", "title": "Edge", "createdAt": 253_402_300_799_999_i64, "updatedAt": 253_402_300_799_999_i64},
        {"id": "float", "title": "Float", "createdAt": 1.7e12, "updatedAt": 1.7e12}
    ]);
    store
        .set_item(NOTES_STORAGE_KEY, &payload.to_string())
        .unwrap();

    let clock = clock();
    let mut repo = NoteRepository::with_config(store, RepositoryConfig::default(), clock.clone());
    let mut loaded_ids: Vec<_> = repo.list_notes(None).into_iter().map(|n| n.id).collect();
    loaded_ids.sort();
    assert_eq!(loaded_ids, vec!["edge", "float"]);

    repo.create_note(NewNote::titled("Forces a save"));
    let before = repo.list_notes(None);

    let reopened =
        NoteRepository::with_config(repo.into_storage(), RepositoryConfig::default(), clock);
    assert_eq!(reopened.list_notes(None), before);
}

#[test]
fn loading_valid_notes_does_not_rewrite_mirror() {
    let mut store = MemoryStore::new();
    let raw = r#"[{"id":"x","title":"T","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}]"#;
    store.set_item(NOTES_STORAGE_KEY, raw).unwrap();

    let repo = NoteRepository::with_config(store, RepositoryConfig::default(), clock());
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.get_note("x").unwrap().content, "");
    assert_eq!(repo.storage().store().raw(NOTES_STORAGE_KEY), Some(raw));
}

#[test]
fn corrupt_payload_falls_back_to_seed_notes() {
    let mut store = MemoryStore::new();
    store
        .set_item(NOTES_STORAGE_KEY, "{{ definitely not json")
        .unwrap();

    let repo = NoteRepository::with_config(store, RepositoryConfig::default(), clock());
    let titles: Vec<_> = repo.list_notes(None).into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec![TIPS_TITLE, WELCOME_TITLE]);

    let mirror: serde_json::Value =
        serde_json::from_str(repo.storage().store().raw(NOTES_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(mirror.as_array().map(Vec::len), Some(2));
}

#[test]
fn payload_without_valid_notes_falls_back_to_seed_notes() {
    for payload in [json!([]), json!({"notes": []}), json!([{"title": "no id"}])] {
        let mut store = MemoryStore::new();
        store
            .set_item(NOTES_STORAGE_KEY, &payload.to_string())
            .unwrap();
        let repo = NoteRepository::with_config(store, RepositoryConfig::default(), clock());
        assert_eq!(repo.len(), 2, "payload {payload} should reseed");
    }
}

#[test]
fn unavailable_store_still_serves_a_working_session() {
    let mut repo = NoteRepository::with_config(NullStore, RepositoryConfig::default(), clock());
    assert_eq!(repo.len(), 2);

    let created = repo.create_note(NewNote::titled("Ephemeral"));
    assert!(repo.get_note(&created.id).is_some());
    assert!(repo.delete_note(&created.id));
}

#[test]
fn quota_exceeded_keeps_in_memory_state_and_last_good_mirror() {
    let clock = clock();
    let mut repo = NoteRepository::with_config(
        MemoryStore::with_quota(2_000),
        RepositoryConfig::default(),
        clock.clone(),
    );
    let mirror_before = repo
        .storage()
        .store()
        .raw(NOTES_STORAGE_KEY)
        .map(str::to_string);
    assert!(mirror_before.is_some());

    clock.advance(Duration::seconds(1));
    let big = repo.create_note(NewNote::titled("Huge").with_content("x".repeat(4_096)));

    assert_eq!(repo.list_notes(None)[0].id, big.id);
    assert_eq!(
        repo.storage()
            .store()
            .raw(NOTES_STORAGE_KEY)
            .map(str::to_string),
        mirror_before
    );
}

#[test]
fn custom_storage_key_is_respected() {
    let config = RepositoryConfig::with_storage_key("notes.test");
    let repo = NoteRepository::with_config(MemoryStore::new(), config, clock());
    assert_eq!(repo.config().storage_key, "notes.test");
    assert!(repo.storage().store().raw("notes.test").is_some());
    assert!(repo.storage().store().raw(NOTES_STORAGE_KEY).is_none());
}

#[test]
fn sqlite_store_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");
    let clock = clock();

    let created_id = {
        let store = SqliteStore::open(&path).unwrap();
        let mut repo =
            NoteRepository::with_config(store, RepositoryConfig::default(), clock.clone());
        clock.advance(Duration::minutes(1));
        repo.create_note(NewNote::titled("Persisted").with_tags(["disk"]))
            .id
    };

    clock.advance(Duration::minutes(1));
    let store = SqliteStore::open(&path).unwrap();
    let repo = NoteRepository::with_config(store, RepositoryConfig::default(), clock.clone());
    let loaded = repo.get_note(&created_id).expect("note should survive reopen");
    assert_eq!(loaded.title, "Persisted");
    assert_eq!(loaded.tags, vec!["disk"]);
    assert_eq!(repo.len(), 3);
    assert!(repo
        .list_notes(None)
        .iter()
        .all(|note| note.updated_at <= clock.now()));
}
