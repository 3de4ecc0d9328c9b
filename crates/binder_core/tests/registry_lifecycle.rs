use binder_core::{CollectionService, FieldValue, MoveDirection, RepoError};
use tempfile::TempDir;

#[test]
fn first_run_seeds_two_predefined_collections() {
    let dir = TempDir::new().unwrap();
    let service = CollectionService::open(dir.path()).unwrap();

    let names: Vec<&str> = service
        .registry()
        .list()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["vehicles", "vendors"]);
    assert!(dir.path().join("data/database_config.json").exists());

    // A second open loads the persisted config instead of reseeding.
    let reopened = CollectionService::open(dir.path()).unwrap();
    assert_eq!(reopened.registry().list().len(), 2);
}

#[test]
fn create_rejects_blank_and_duplicate_names_before_writing() {
    let dir = TempDir::new().unwrap();
    let mut service = CollectionService::open(dir.path()).unwrap();

    assert!(matches!(
        service.registry_mut().create("   ", None),
        Err(RepoError::EmptyName)
    ));
    assert!(matches!(
        service.registry_mut().create("vehicles", None),
        Err(RepoError::DuplicateName(name)) if name == "vehicles"
    ));
    assert!(!dir.path().join("data/vehicles.csv").exists());
}

#[test]
fn create_seeds_starter_schema_and_records_file() {
    let dir = TempDir::new().unwrap();
    let mut service = CollectionService::open(dir.path()).unwrap();

    service.registry_mut().create("fleet", None).unwrap();
    assert!(dir.path().join("data/fleet.csv").exists());
    assert!(dir.path().join("data/templates_fleet.json").exists());
    assert!(dir.path().join("data/groups_fleet.json").exists());

    let fleet = service.collection("fleet").unwrap();
    assert_eq!(fleet.schema().template(), ["Field 1".to_string()].as_slice());
    assert_eq!(fleet.schema().groups().len(), 1);
    assert_eq!(fleet.schema().groups()[0].name, "Group 1");
    assert_eq!(fleet.records().columns(), ["Field 1".to_string()].as_slice());
}

#[test]
fn create_honors_an_explicit_file_stem() {
    let dir = TempDir::new().unwrap();
    let mut service = CollectionService::open(dir.path()).unwrap();

    service
        .registry_mut()
        .create("maintenance log", Some("maint"))
        .unwrap();
    let entry = service.registry().entry("maintenance log").unwrap();
    assert_eq!(entry.storage, "data/maint.csv");
    assert!(dir.path().join("data/maint.csv").exists());
}

#[test]
fn delete_cascades_files_but_orphans_reminder_tables() {
    let dir = TempDir::new().unwrap();
    let mut service = CollectionService::open(dir.path()).unwrap();
    service.registry_mut().create("fleet", None).unwrap();

    let mut fleet = service.collection("fleet").unwrap();
    let position = fleet.records_mut().create().unwrap();
    fleet
        .records_mut()
        .update(position, "Field 1", &FieldValue::plain("AB-123"))
        .unwrap();
    let id = fleet.records_mut().ensure_uuid(position).unwrap();
    fleet
        .changes_mut()
        .append(id, "purchase", "registered")
        .unwrap();
    let reminder_file = service.layout().reminder_path(id);
    std::fs::create_dir_all(reminder_file.parent().unwrap()).unwrap();
    std::fs::write(
        &reminder_file,
        "title,intervalMonths,reminderLeadMonths,lastExecutedDate,nextDueDate\n",
    )
    .unwrap();

    service.registry_mut().delete("fleet").unwrap();

    assert!(service.registry().entry("fleet").is_none());
    assert!(!dir.path().join("data/fleet.csv").exists());
    assert!(!dir.path().join("data/templates_fleet.json").exists());
    assert!(!dir.path().join("data/groups_fleet.json").exists());
    assert!(!dir.path().join("data/changes_fleet.csv").exists());
    // Record-scoped files are keyed by UUID and deliberately left behind.
    assert!(reminder_file.exists());

    assert!(matches!(
        service.collection("fleet"),
        Err(RepoError::UnknownCollection(_))
    ));
}

#[test]
fn delete_of_unknown_collection_errors() {
    let dir = TempDir::new().unwrap();
    let mut service = CollectionService::open(dir.path()).unwrap();
    assert!(matches!(
        service.registry_mut().delete("ghost"),
        Err(RepoError::UnknownCollection(_))
    ));
}

#[test]
fn reorder_swaps_adjacent_entries_and_noops_at_boundaries() {
    let dir = TempDir::new().unwrap();
    let mut service = CollectionService::open(dir.path()).unwrap();

    // Boundary no-ops.
    service
        .registry_mut()
        .reorder("vehicles", MoveDirection::Up)
        .unwrap();
    service
        .registry_mut()
        .reorder("vendors", MoveDirection::Down)
        .unwrap();
    let names: Vec<&str> = service
        .registry()
        .list()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["vehicles", "vendors"]);

    service
        .registry_mut()
        .reorder("vehicles", MoveDirection::Down)
        .unwrap();
    let names: Vec<&str> = service
        .registry()
        .list()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["vendors", "vehicles"]);

    // The swap is persisted, not just in memory.
    let reopened = CollectionService::open(dir.path()).unwrap();
    assert_eq!(reopened.registry().list()[0].name, "vendors");
}
