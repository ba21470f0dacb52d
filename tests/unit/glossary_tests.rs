/*!
 * Unit tests for glossary loading and the copy-on-write store
 */

use std::sync::Arc;

use termbridge::errors::GlossaryError;
use termbridge::glossary::GlossaryStore;

use crate::common;

#[test]
fn test_load_fromFile_shouldLoadAllEntries() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_glossary(&temp_dir.path().to_path_buf(), "glossary.json").unwrap();

    let (store, outcome) = GlossaryStore::load(&path, common::zh_en()).unwrap();

    assert_eq!(outcome.total_entries, 3);
    assert_eq!(outcome.loaded_entries(), 3);
    assert!(outcome.dropped.is_empty());
    assert_eq!(store.glossary().len(), 3);
}

#[test]
fn test_load_withMissingFile_shouldDegradeToEmptyGlossary() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("does_not_exist.json");

    let (store, outcome) = GlossaryStore::load(&path, common::zh_en()).unwrap();

    assert_eq!(outcome.total_entries, 0);
    assert!(store.glossary().is_empty());
}

#[test]
fn test_load_withMalformedJson_shouldError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path =
        common::create_test_file(&temp_dir.path().to_path_buf(), "bad.json", "{ not json").unwrap();

    let result = GlossaryStore::load(&path, common::zh_en());

    assert!(matches!(result, Err(GlossaryError::InvalidFormat(_))));
}

#[test]
fn test_load_withPartiallyBadEntries_shouldReportDropped() {
    let temp_dir = common::create_temp_dir().unwrap();
    let content = r#"{
        "引晶": {"target_term": "Neck"},
        "放肩": 42,
        "等径": {"definition": "no target term here"}
    }"#;
    let path =
        common::create_test_file(&temp_dir.path().to_path_buf(), "partial.json", content).unwrap();

    let (store, outcome) = GlossaryStore::load(&path, common::zh_en()).unwrap();

    assert_eq!(outcome.total_entries, 3);
    assert_eq!(outcome.loaded_entries(), 1);
    assert_eq!(outcome.dropped.len(), 2);
    let dropped_keys: Vec<&str> = outcome.dropped.iter().map(|(k, _)| k.as_str()).collect();
    assert!(dropped_keys.contains(&"放肩"));
    assert!(dropped_keys.contains(&"等径"));
    assert!(store.glossary().contains("引晶"));
}

#[test]
fn test_load_legacyBareStringShape_shouldStillParse() {
    let temp_dir = common::create_temp_dir().unwrap();
    let content = r#"{"引晶": "Neck", "放肩": "Crown"}"#;
    let path =
        common::create_test_file(&temp_dir.path().to_path_buf(), "legacy.json", content).unwrap();

    let (store, outcome) = GlossaryStore::load(&path, common::zh_en()).unwrap();

    assert_eq!(outcome.loaded_entries(), 2);
    assert_eq!(store.glossary().get("引晶").unwrap().priority_target(), "Neck");
}

#[test]
fn test_reload_shouldSwapGlossaryCopyOnWrite() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let path = common::create_test_file(&dir, "glossary.json", r#"{"引晶": "Neck"}"#).unwrap();

    let (store, _) = GlossaryStore::load(&path, common::zh_en()).unwrap();

    // A reader takes a snapshot before the reload
    let old_snapshot = store.glossary();
    assert_eq!(old_snapshot.len(), 1);

    common::create_test_file(&dir, "glossary.json", r#"{"引晶": "Neck", "放肩": "Crown"}"#)
        .unwrap();
    let outcome = store.reload().unwrap();

    // The old snapshot is untouched; new readers see the new glossary
    assert_eq!(old_snapshot.len(), 1);
    assert_eq!(outcome.loaded_entries(), 2);
    assert_eq!(store.glossary().len(), 2);
}

#[test]
fn test_reload_shouldInvalidateReverseViewCache() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let path = common::create_test_file(&dir, "glossary.json", r#"{"引晶": "Neck"}"#).unwrap();

    let (store, _) = GlossaryStore::load(&path, common::zh_en()).unwrap();
    let old_reverse = store.glossary_for(common::en_zh()).unwrap();
    assert!(old_reverse.contains("Neck"));
    assert!(!old_reverse.contains("Crown"));

    common::create_test_file(&dir, "glossary.json", r#"{"放肩": "Crown"}"#).unwrap();
    store.reload().unwrap();

    let new_reverse = store.glossary_for(common::en_zh()).unwrap();
    assert!(new_reverse.contains("Crown"));
    assert!(!new_reverse.contains("Neck"));
    assert!(!Arc::ptr_eq(&old_reverse, &new_reverse));
}

#[test]
fn test_glossaryFor_withUnservedDirection_shouldReturnNone() {
    let store = GlossaryStore::from_glossary(common::crystal_glossary());

    let direction = termbridge::language_utils::Direction::new(
        termbridge::language_utils::normalize_language("fr").unwrap(),
        termbridge::language_utils::normalize_language("de").unwrap(),
    );

    assert!(store.glossary_for(direction).is_none());
}
