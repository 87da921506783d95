use mapty::application::{App, AppSettings, FormField, STORAGE_KEY};
use mapty::domain::{Coords, WorkoutKind};
use mapty::infrastructure::{FileStorage, KeyValueStorage};
use tempfile::TempDir;

fn open(dir: &TempDir) -> App {
    App::new(Box::new(FileStorage::new(dir.path())), AppSettings::default())
}

fn enter(app: &mut App, field: FormField, text: &str) {
    app.form.set_focus(field);
    for c in text.chars() {
        app.form.insert_char(c);
    }
}

fn log(app: &mut App, coords: Coords, kind: WorkoutKind, distance: &str, duration: &str, attribute: &str) {
    app.handle_map_click(coords);
    if app.form.kind() != kind {
        app.toggle_workout_kind();
    }
    enter(app, FormField::Distance, distance);
    enter(app, FormField::Duration, duration);
    let attribute_field = app.form.visible_fields()[3];
    enter(app, attribute_field, attribute);
    app.submit_form();
}

#[test]
fn empty_storage_starts_empty() {
    let dir = TempDir::new().unwrap();
    let app = open(&dir);

    assert!(app.store.is_empty());
    assert!(app.list.is_empty());
    assert!(app.alert.is_none());
}

#[test]
fn workouts_survive_restart() {
    let dir = TempDir::new().unwrap();

    let mut first = open(&dir);
    first.load_map(Coords::new(51.5, -0.1));
    log(&mut first, Coords::new(10.0, 20.0), WorkoutKind::Running, "5", "30", "160");
    log(&mut first, Coords::new(11.0, 21.0), WorkoutKind::Cycling, "10", "60", "200");
    log(&mut first, Coords::new(12.0, 22.0), WorkoutKind::Running, "3.2", "30", "160");
    assert_eq!(first.store.len(), 2);
    assert_eq!(first.map.as_ref().unwrap().markers().len(), 2);

    let mut second = open(&dir);
    assert_eq!(second.store.workouts(), first.store.workouts());

    let newest = &second.list.entries()[0];
    assert_eq!(newest.kind, WorkoutKind::Cycling);
    assert_eq!(newest.details[2].value, "10.0");
    assert_eq!(newest.details[2].unit, "KM/H");
    assert_eq!(second.list.entries()[1].details[2].unit, "MIN/KM");

    // Saved workouts stay off the map even once it loads.
    second.load_map(Coords::new(51.5, -0.1));
    assert!(second.map.as_ref().unwrap().markers().is_empty());

    let oldest = second.list.entries()[1].workout_id.clone();
    second.resolve_list_click(Some(&oldest));
    assert_eq!(second.map.as_ref().unwrap().center(), Coords::new(10.0, 20.0));
}

#[test]
fn browser_snapshot_is_readable() {
    let dir = TempDir::new().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage
        .set_item(
            STORAGE_KEY,
            r#"[{"date":"June 2","id":"7171717171","coords":{"lat":51.5,"lng":-0.12},
                "distance":"5","duration":"30","type":"running","icon":"🏃‍♂️",
                "cadence":"160","pace":6},
               {"date":"June 3","id":"7171717999","coords":{"lat":51.6,"lng":-0.13},
                "distance":"20","duration":"60","type":"cycling","icon":"🚴‍♀️",
                "elevationGain":"300","speed":20}]"#,
        )
        .unwrap();

    let app = open(&dir);
    assert_eq!(app.store.len(), 2);
    assert_eq!(app.list.entries()[0].title, "🚴‍♀️ Cycling on June 3");
    assert_eq!(app.list.entries()[1].title, "🏃‍♂️ Running on June 2");
}

#[test]
fn corrupt_snapshot_is_ignored_then_replaced() {
    let dir = TempDir::new().unwrap();
    FileStorage::new(dir.path()).set_item(STORAGE_KEY, "{oops").unwrap();

    let mut app = open(&dir);
    assert!(app.store.is_empty());
    assert!(app.alert.is_none());

    app.load_map(Coords::new(0.0, 0.0));
    log(&mut app, Coords::new(1.0, 1.0), WorkoutKind::Running, "1", "5", "150");

    assert_eq!(open(&dir).store.len(), 1);
}
