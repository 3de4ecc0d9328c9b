use binder_core::{parse_date, ChangeLog, DataLayout, NO_PRIOR_VALUE};
use tempfile::TempDir;
use uuid::Uuid;

#[test]
fn append_derives_before_from_the_prior_entry_of_the_same_record() {
    let dir = TempDir::new().unwrap();
    let layout = DataLayout::new(dir.path());
    let mut log = ChangeLog::load(&layout, "fleet").unwrap();
    let car = Uuid::new_v4();
    let van = Uuid::new_v4();
    let day = parse_date("2024-05-01").unwrap();

    assert!(log.append_on(car, "tires", "summer set", day).unwrap());
    assert!(log.append_on(van, "battery", "replaced", day).unwrap());
    assert!(log.append_on(car, "tires", "winter set", day).unwrap());

    let car_entries: Vec<_> = log.entries_for(car).collect();
    assert_eq!(car_entries.len(), 2);
    assert_eq!(car_entries[0].value_before, NO_PRIOR_VALUE);
    assert_eq!(car_entries[0].value_after, "summer set");
    assert_eq!(car_entries[1].value_before, "summer set");
    assert_eq!(car_entries[1].value_after, "winter set");

    // Other records keep an independent history.
    let van_entries: Vec<_> = log.entries_for(van).collect();
    assert_eq!(van_entries.len(), 1);
    assert_eq!(van_entries[0].value_before, NO_PRIOR_VALUE);
}

#[test]
fn blank_title_or_after_value_appends_nothing() {
    let dir = TempDir::new().unwrap();
    let layout = DataLayout::new(dir.path());
    let mut log = ChangeLog::load(&layout, "fleet").unwrap();
    let car = Uuid::new_v4();
    let day = parse_date("2024-05-01").unwrap();

    assert!(!log.append_on(car, "  ", "value", day).unwrap());
    assert!(!log.append_on(car, "title", "  \t", day).unwrap());
    assert!(log.entries().is_empty());
    assert!(!dir.path().join("data/changes_fleet.csv").exists());
}

#[test]
fn entries_for_is_oldest_first_and_restartable() {
    let dir = TempDir::new().unwrap();
    let layout = DataLayout::new(dir.path());
    let mut log = ChangeLog::load(&layout, "fleet").unwrap();
    let car = Uuid::new_v4();
    let day = parse_date("2024-05-01").unwrap();

    for value in ["one", "two", "three"] {
        log.append_on(car, "odometer", value, day).unwrap();
    }

    let first_pass: Vec<&str> = log
        .entries_for(car)
        .map(|entry| entry.value_after.as_str())
        .collect();
    let second_pass: Vec<&str> = log
        .entries_for(car)
        .map(|entry| entry.value_after.as_str())
        .collect();
    assert_eq!(first_pass, vec!["one", "two", "three"]);
    assert_eq!(second_pass, first_pass);
}

#[test]
fn appended_entries_survive_a_reload() {
    let dir = TempDir::new().unwrap();
    let layout = DataLayout::new(dir.path());
    let car = Uuid::new_v4();
    let day = parse_date("2024-05-01").unwrap();

    {
        let mut log = ChangeLog::load(&layout, "fleet").unwrap();
        log.append_on(car, "tires", "summer set", day).unwrap();
        log.append_on(car, "tires", "winter set", day).unwrap();
    }

    let reloaded = ChangeLog::load(&layout, "fleet").unwrap();
    assert_eq!(reloaded.entries().len(), 2);
    assert_eq!(reloaded.entries()[0].logged_date, "2024-05-01");
    assert_eq!(reloaded.entries()[1].value_before, "summer set");
    assert_eq!(reloaded.entries()[1].record, car);
}
