//! Integration tests for preference storage
//!
//! Tests the file-backed store the native shell persists to

use folio::controller::PageController;
use folio::storage::{FileStore, PreferenceStore};
use tempfile::tempdir;

mod file_store_tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path().join("prefs"));

        store.set("theme", "sunset").expect("Failed to set theme");

        assert_eq!(store.get("theme").unwrap(), Some("sunset".to_string()));
    }

    #[test]
    fn test_get_nonexistent() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("dark").unwrap(), None);
    }

    #[test]
    fn test_overwrite() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());

        store.set("dark", "true").unwrap();
        store.set("dark", "false").unwrap();

        assert_eq!(store.get("dark").unwrap(), Some("false".to_string()));
    }

    #[test]
    fn test_values_survive_a_new_handle() {
        let dir = tempdir().expect("Failed to create temp dir");
        FileStore::new(dir.path()).set("theme", "forest").unwrap();

        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.get("theme").unwrap(), Some("forest".to_string()));
    }

    #[test]
    fn test_keys_are_isolated() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());

        store.set("theme", "ocean").unwrap();
        store.set("dark", "true").unwrap();

        assert_eq!(store.get("theme").unwrap(), Some("ocean".to_string()));
        assert_eq!(store.get("dark").unwrap(), Some("true".to_string()));
    }

    #[test]
    fn test_special_characters_stay_inside_root() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path().join("prefs");
        let store = FileStore::new(&root);

        store.set("../escape", "value").unwrap();

        assert_eq!(store.get("../escape").unwrap(), Some("value".to_string()));
        assert!(!dir.path().join("escape.txt").exists());
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 1);
    }
}

mod controller_persistence_tests {
    use super::*;
    use folio::chat::HttpTransport;
    use folio::clock::SystemClock;
    use folio::config::PageConfig;
    use folio::document::{PageDocument, PageState, THEME_ATTRIBUTE};

    #[test]
    fn test_preference_round_trips_through_disk() {
        let dir = tempdir().expect("Failed to create temp dir");

        let first = PageController::new(
            FileStore::new(dir.path()),
            PageDocument::new(PageState::full()),
            SystemClock,
            HttpTransport::new("http://127.0.0.1:9/api/chat"),
            PageConfig::default(),
        );
        first.on_theme_change("sunset").unwrap();
        first.on_dark_mode_change(true).unwrap();

        let document = PageDocument::new(PageState::full());
        let second = PageController::new(
            FileStore::new(dir.path()),
            document.clone(),
            SystemClock,
            HttpTransport::new("http://127.0.0.1:9/api/chat"),
            PageConfig::default(),
        );
        let preference = second.initialize();

        assert_eq!(preference.theme, "sunset");
        assert!(preference.dark_mode);
        assert_eq!(
            document.snapshot().root_attribute(THEME_ATTRIBUTE),
            Some("sunset")
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("dark.txt")).unwrap(),
            "true"
        );
    }
}
