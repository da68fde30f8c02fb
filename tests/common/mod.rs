/*!
 * Common test utilities for the stalign test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

use stalign::subtitle::SubtitleIdentity;

/// Old version of the sample transcript
pub const FROM_TRANSCRIPT: &str = "^^^ {: .rid #rid-63030019}

@The quick brown fox jumps over @the lazy dog sleeping in the sun @while birds sing their morning songs.
";

/// New version of the sample transcript: two subtitles merged, one added
pub const TO_TRANSCRIPT: &str = "^^^ {: .rid #rid-63030019}

@The quick brown fox jumps over the lazy dog @sleeping in the sun while birds sing their morning songs. @Then everyone went home for dinner.
";

/// Persistent ids of the old version
pub fn sample_identities() -> Vec<SubtitleIdentity> {
    ["1000001", "1000002", "1000003"]
        .iter()
        .map(|id| SubtitleIdentity {
            persistent_id: id.to_string(),
            record_id: Some("63030019".to_string()),
        })
        .collect()
}

/// Identities file content for the sample transcript
pub fn sample_identities_json() -> String {
    serde_json::to_string(&sample_identities()).unwrap_or_default()
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes the sample transcript triple under `from/`, `to/` and `ids/`
pub fn create_sample_tree(root: &Path, name: &str) -> Result<()> {
    create_test_file(&root.join("from"), &format!("{}.at", name), FROM_TRANSCRIPT)?;
    create_test_file(&root.join("to"), &format!("{}.at", name), TO_TRANSCRIPT)?;
    create_test_file(&root.join("ids"), &format!("{}.ids.json", name), &sample_identities_json())?;
    Ok(())
}

/// Routes library logs to the test output, safe to call from several tests
pub fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Persistent ids `1000001..` for a transcript with `count` subtitles
pub fn numbered_identities(count: usize) -> Vec<SubtitleIdentity> {
    (1..=count)
        .map(|n| SubtitleIdentity::new((1_000_000 + n).to_string()))
        .collect()
}
