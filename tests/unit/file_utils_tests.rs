/*!
 * Tests for file utility functions
 */

use std::path::Path;
use anyhow::Result;
use stalign::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that find_files walks nested folders and ignores other extensions
#[test]
fn test_find_files_withNestedFolders_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "b.at", "@b")?;
    common::create_test_file(root, "nested/a.at", "@a")?;
    common::create_test_file(root, "notes.txt", "ignored")?;
    common::create_test_file(root, "a.ids.json", "[]")?;

    let files = FileManager::find_files(root, ".at")?;

    assert_eq!(files, vec![root.join("b.at"), root.join("nested/a.at")]);
    Ok(())
}

/// Test that write_to_file creates missing parent folders
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("deep/er/report.json");

    FileManager::write_to_file(&path, "{}")?;

    assert_eq!(FileManager::read_to_string(&path)?, "{}");
    Ok(())
}

/// Test loading identities with and without record ids
#[test]
fn test_load_identities_withOptionalRecordId_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "talk.ids.json",
        r#"[{"persistent_id": "1000001", "record_id": "63030019"}, {"persistent_id": "1000002"}]"#,
    )?;

    let identities = FileManager::load_identities(&path)?;

    assert_eq!(identities.len(), 2);
    assert_eq!(identities[0].record_id.as_deref(), Some("63030019"));
    assert_eq!(identities[1].record_id, None);
    Ok(())
}

/// Test that malformed identities are an error
#[test]
fn test_load_identities_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bad.ids.json", "{not json")?;

    assert!(FileManager::load_identities(&path).is_err());
    Ok(())
}

/// Test the sibling path helper
#[test]
fn test_with_extension_shouldReplaceExtension() {
    let path = FileManager::with_extension(Path::new("to/talk.at"), ".operations.json");
    assert_eq!(path, Path::new("to/talk.operations.json"));
}
