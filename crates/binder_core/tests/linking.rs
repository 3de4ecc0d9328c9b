use binder_core::{CollectionService, FieldValue};
use tempfile::TempDir;

fn fleet_with_two_records(service: &mut CollectionService) -> binder_core::Collection {
    service.registry_mut().create("fleet", None).unwrap();
    let mut fleet = service.collection("fleet").unwrap();
    for plate in ["truck", "trailer"] {
        let position = fleet.records_mut().create().unwrap();
        fleet
            .records_mut()
            .update(position, "Field 1", &FieldValue::plain(plate))
            .unwrap();
    }
    fleet
}

#[test]
fn internal_link_written_through_update_resolves_to_its_target() {
    let dir = TempDir::new().unwrap();
    let mut service = CollectionService::open(dir.path()).unwrap();
    let mut fleet = fleet_with_two_records(&mut service);

    let target = fleet.records_mut().ensure_uuid(1).unwrap();
    let link = FieldValue::InternalLink {
        label: "pulls".to_string(),
        target,
    };
    fleet.records_mut().update(0, "attached", &link).unwrap();

    // A fresh handle decodes the persisted cell back to the same variant.
    let reloaded = service.collection("fleet").unwrap();
    let value = reloaded.records().value(0, "attached").unwrap();
    assert_eq!(value, link);

    let (position, record) = reloaded.resolve_link(&value).unwrap();
    assert_eq!(position, 1);
    assert_eq!(record.raw("Field 1"), "trailer");
}

#[test]
fn dangling_internal_link_is_an_explicit_not_found() {
    let dir = TempDir::new().unwrap();
    let mut service = CollectionService::open(dir.path()).unwrap();
    let mut fleet = fleet_with_two_records(&mut service);

    // No record carries this UUID; the collection does not even have a
    // UUID column yet.
    let link = FieldValue::InternalLink {
        label: "ghost".to_string(),
        target: uuid::Uuid::new_v4(),
    };
    fleet.records_mut().update(0, "attached", &link).unwrap();
    assert!(fleet.resolve_link(&link).is_none());

    // Plain values never resolve.
    assert!(fleet.resolve_link(&FieldValue::plain("text")).is_none());
}

#[test]
fn external_link_stores_the_copied_attachment_path() {
    let dir = TempDir::new().unwrap();
    let mut service = CollectionService::open(dir.path()).unwrap();
    let mut fleet = fleet_with_two_records(&mut service);

    let source = dir.path().join("registration.pdf");
    std::fs::write(&source, b"scan").unwrap();
    let copied = service.layout().attach_file(&source).unwrap();

    let link = FieldValue::ExternalLink {
        label: "registration".to_string(),
        path: copied.to_string_lossy().into_owned(),
    };
    fleet.records_mut().update(0, "papers", &link).unwrap();

    let reloaded = service.collection("fleet").unwrap();
    match reloaded.records().value(0, "papers").unwrap() {
        FieldValue::ExternalLink { label, path } => {
            assert_eq!(label, "registration");
            assert_eq!(std::fs::read(path).unwrap(), b"scan");
        }
        other => panic!("expected external link, got {other:?}"),
    }
}
