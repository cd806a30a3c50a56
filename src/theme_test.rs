use std::cell::RefCell;
use std::rc::Rc;

use super::*;

/// Storage whose writes always fail.
struct ReadOnlyStorage;

impl PreferenceStorage for ReadOnlyStorage {
    fn load(&self) -> Result<Option<Theme>, ThemeError> {
        Ok(None)
    }

    fn store(&mut self, _theme: Theme) -> Result<(), ThemeError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }
}

// =============================================================
// Theme
// =============================================================

#[test]
fn theme_toggles_and_names() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(Theme::from_dark(true).as_str(), "dark");
    assert_eq!(Theme::default(), Theme::Light);
}

#[test]
fn only_dark_puts_a_class_on_the_root() {
    assert_eq!(Theme::Dark.root_class(), Some("dark"));
    assert_eq!(Theme::Light.root_class(), None);
}

#[test]
fn theme_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    assert_eq!(serde_json::from_str::<Theme>("\"light\"").unwrap(), Theme::Light);
}

// =============================================================
// ThemeStore
// =============================================================

#[test]
fn init_prefers_stored_choice_over_system() {
    let store = ThemeStore::init(MemoryStorage::with_value(Theme::Light), true).unwrap();
    assert_eq!(store.theme(), Theme::Light);
    assert!(store.user_chosen());
}

#[test]
fn init_falls_back_to_system() {
    let store = ThemeStore::init(MemoryStorage::default(), true).unwrap();
    assert!(store.is_dark());
    assert!(!store.user_chosen());
    assert_eq!(store.root_class(), Some(DARK_CLASS));
}

#[test]
fn toggle_writes_through_and_notifies() {
    let mut store = ThemeStore::init(MemoryStorage::default(), false).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.on_change(move |theme: &Theme| sink.borrow_mut().push(*theme));

    assert_eq!(store.toggle().unwrap(), Theme::Dark);
    assert_eq!(store.toggle().unwrap(), Theme::Light);
    assert_eq!(*seen.borrow(), vec![Theme::Dark, Theme::Light]);
    assert!(store.user_chosen());
}

#[test]
fn failed_write_leaves_theme_unchanged() {
    let mut store = ThemeStore::init(ReadOnlyStorage, false).unwrap();
    assert!(matches!(store.toggle(), Err(ThemeError::Io(_))));
    assert_eq!(store.theme(), Theme::Light);
    assert!(!store.user_chosen());
}

#[test]
fn system_change_followed_until_user_chooses() {
    let mut store = ThemeStore::init(MemoryStorage::default(), false).unwrap();
    assert!(store.system_preference_changed(true));
    assert!(store.is_dark());

    store.set(Theme::Light).unwrap();
    assert!(!store.system_preference_changed(true));
    assert_eq!(store.theme(), Theme::Light);
    assert_eq!(store.root_class(), None);
}

#[test]
fn system_change_does_not_notify_listeners() {
    let mut store = ThemeStore::init(MemoryStorage::default(), false).unwrap();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    store.on_change(move |_| *sink.borrow_mut() += 1);

    assert!(store.system_preference_changed(true));
    assert!(store.is_dark());
    assert_eq!(*count.borrow(), 0);

    store.toggle().unwrap();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn removed_listener_is_silent() {
    let mut store = ThemeStore::init(MemoryStorage::default(), false).unwrap();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = store.on_change(move |_| *sink.borrow_mut() += 1);
    assert!(store.remove_listener(id));
    store.toggle().unwrap();
    assert_eq!(*count.borrow(), 0);
}

// =============================================================
// JsonFileStorage
// =============================================================

#[test]
fn json_file_missing_means_no_preference() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path().join("theme.json"));
    assert_eq!(storage.load().unwrap(), None);
}

#[test]
fn json_file_persists_across_stores() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("theme.json");

    let mut store = ThemeStore::init(JsonFileStorage::new(&path), false).unwrap();
    store.toggle().unwrap();

    let reopened = ThemeStore::init(JsonFileStorage::new(&path), false).unwrap();
    assert_eq!(reopened.theme(), Theme::Dark);
    assert!(reopened.user_chosen());
}

#[test]
fn json_file_malformed_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theme.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(matches!(JsonFileStorage::new(&path).load(), Err(ThemeError::Json(_))));
}

// =============================================================
// Global store
// =============================================================

#[test]
fn global_store_lifecycle() {
    // Thread-local: each test thread starts without a store.
    assert!(matches!(with_global(|s| s.theme()), Err(ThemeError::NotInstalled)));

    install_global(ThemeStore::init(MemoryStorage::default(), false).unwrap()).unwrap();
    let again = install_global(ThemeStore::init(MemoryStorage::default(), false).unwrap());
    assert!(matches!(again, Err(ThemeError::AlreadyInstalled)));

    let toggled = with_global(ThemeStore::toggle).unwrap().unwrap();
    assert_eq!(toggled, Theme::Dark);
    assert_eq!(with_global(|s| s.theme()).unwrap(), Theme::Dark);

    let nested = with_global(|_| with_global(|s| s.theme()));
    assert!(matches!(nested, Ok(Err(ThemeError::Busy))));
}
