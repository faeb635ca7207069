use project_store_core::{
    JsonFileStore, ProjectPayload, ProjectService, ProjectStore, ReadFailurePolicy, ServiceError,
    StoreError,
};
use serde_json::{json, Value};

fn payload(value: Value) -> ProjectPayload {
    value.as_object().cloned().unwrap()
}

#[test]
fn missing_document_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("projects.json"));

    assert!(store.load().unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn save_creates_directory_and_writes_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("projects.json");
    let service = ProjectService::new(JsonFileStore::new(&path));

    let created = service
        .create(payload(json!({"name": "Cable Car", "industry": "Tourism"})))
        .unwrap();

    let document: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    let records = document.as_array().expect("document must be a top-level array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], json!(created.id.as_str()));
    assert_eq!(records[0]["name"], json!("Cable Car"));
    assert_eq!(records[0]["createdAt"], json!(created.created_at));
    assert!(!path.with_file_name("projects.json.tmp").exists());
}

#[test]
fn reopened_store_sees_persisted_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");

    let first = ProjectService::new(JsonFileStore::new(&path));
    let a = first.create(payload(json!({"name": "A"}))).unwrap();
    let b = first.create(payload(json!({"name": "B", "corridor": "M4"}))).unwrap();

    let reopened = JsonFileStore::new(&path);
    let projects = reopened.load().unwrap();
    assert_eq!(projects, vec![a, b]);
    assert_eq!(projects[1].extra.get("corridor"), Some(&json!("M4")));
}

#[test]
fn corrupt_document_degrades_to_empty_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(&path, b"{ this is not json").unwrap();

    let store = JsonFileStore::new(&path);
    assert_eq!(store.read_policy(), ReadFailurePolicy::Degrade);
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn corrupt_document_is_an_error_under_strict_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(&path, br#"{"not": "an array"}"#).unwrap();

    let store = JsonFileStore::new(&path).with_read_policy(ReadFailurePolicy::Strict);
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
    assert!(err.is_read_failure());

    let service = ProjectService::new(store);
    assert!(matches!(service.list(), Err(ServiceError::Persistence(_))));
    assert!(matches!(
        service.create(payload(json!({"name": "Blocked"}))),
        Err(ServiceError::Persistence(_))
    ));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        r#"{"not": "an array"}"#
    );
}

#[test]
fn mixed_type_records_load_and_survive_the_next_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    let stored = json!([
        {"id": "a", "name": "Valid", "investmentScore": 80, "createdAt": "2026-01-01T00:00:00.000Z", "updatedAt": "2026-01-01T00:00:00.000Z"},
        {"id": "b", "name": "Odd", "investmentScore": "high", "createdAt": "2026-01-01T00:00:00.000Z", "updatedAt": "2026-01-01T00:00:00.000Z"},
        {"id": "c", "status": ["draft"]},
    ]);
    std::fs::write(&path, serde_json::to_vec(&stored).unwrap()).unwrap();

    let service = ProjectService::new(JsonFileStore::new(&path));
    let listed = service.list().unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[1].extra.get("investmentScore"), Some(&json!("high")));

    let created = service.create(payload(json!({"name": "New"}))).unwrap();

    let document: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    let records = document.as_array().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[1]["investmentScore"], json!("high"));
    assert_eq!(records[2], json!({"id": "c", "status": ["draft"]}));
    assert_eq!(records[3]["id"], json!(created.id.as_str()));
}

#[test]
fn record_without_id_is_kept_but_cannot_be_addressed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(&path, br#"[{"name": "orphan"}]"#).unwrap();

    let service = ProjectService::new(JsonFileStore::new(&path));
    let listed = service.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].id.is_empty());

    service.create(payload(json!({"name": "Next"}))).unwrap();
    let document: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(document[0], json!({"name": "orphan"}));
}

#[test]
fn array_of_non_objects_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(&path, br#"[1, "two"]"#).unwrap();

    let strict = JsonFileStore::new(&path).with_read_policy(ReadFailurePolicy::Strict);
    assert!(matches!(strict.load(), Err(StoreError::Corrupt { .. })));
}

#[test]
fn non_uuid_ids_from_document_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(
        &path,
        br#"[{"id": "legacy-1", "name": "Old", "createdAt": "2020-01-01T00:00:00.000Z", "updatedAt": "2020-01-01T00:00:00.000Z"}]"#,
    )
    .unwrap();

    let service = ProjectService::new(JsonFileStore::new(&path));
    let project = service.get(&"legacy-1".into()).unwrap();
    assert_eq!(project.name.as_deref(), Some("Old"));
}
