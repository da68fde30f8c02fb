/*!
 * Integration tests for single file and folder processing
 */

use anyhow::Result;
use stalign::app_config::Config;
use stalign::app_controller::Controller;
use stalign::file_utils::FileManager;
use crate::common;

/// Test a single file run writing the report
#[test]
fn test_run_withOutputPath_shouldWriteReport() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_sample_tree(temp_dir.path(), "talk")?;
    let root = temp_dir.path();
    let output = root.join("out").join("talk.operations.json");

    let controller = Controller::with_config(Config::default())?;
    let report = controller.run(
        &root.join("from/talk.at"),
        &root.join("ids/talk.ids.json"),
        &root.join("to/talk.at"),
        Some(output.as_path()),
    )?;

    assert_eq!(report.operations.len(), 2);
    let written: serde_json::Value = serde_json::from_str(&FileManager::read_to_string(&output)?)?;
    assert_eq!(written["operations"][0]["operationType"], "merge");
    assert_eq!(written["operations"][1]["operationType"], "insert");

    Ok(())
}

/// Test that a missing identities file is reported with its path
#[test]
fn test_computeFiles_missingIds_shouldFailWithContext() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_sample_tree(temp_dir.path(), "talk")?;
    let root = temp_dir.path();

    let controller = Controller::with_config(Config::default())?;
    let result = controller.compute_files(&root.join("from/talk.at"), &root.join("ids/missing.ids.json"), &root.join("to/talk.at"));

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("missing.ids.json"));

    Ok(())
}

/// Test that folder jobs are paired by relative path
#[test]
fn test_collectJobs_nestedFolders_shouldPairByRelativePath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_sample_tree(temp_dir.path(), "65/0725m")?;
    let root = temp_dir.path();

    let controller = Controller::with_config(Config::default())?;
    let jobs = controller.collect_jobs(&root.join("from"), &root.join("to"), &root.join("ids"))?;

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].to_file, root.join("to/65/0725m.at"));
    assert_eq!(jobs[0].ids_file, root.join("ids/65/0725m.ids.json"));
    assert_eq!(jobs[0].output_file, root.join("to/65/0725m.operations.json"));

    Ok(())
}

/// Test a folder run with one good and one broken transcript
#[tokio::test]
async fn test_runFolder_withFailingFile_shouldContinueBatch() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_sample_tree(root, "good")?;
    common::create_sample_tree(root, "broken")?;
    common::create_test_file(&root.join("ids"), "broken.ids.json", "[]")?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller
        .run_folder(&root.join("from"), &root.join("to"), &root.join("ids"), false)
        .await?;

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].0.ends_with("broken.at"));
    assert!(FileManager::file_exists(root.join("to/good.operations.json")));
    assert!(!FileManager::file_exists(root.join("to/broken.operations.json")));

    Ok(())
}

/// Test that existing reports are skipped unless overwriting is forced
#[tokio::test]
async fn test_runFolder_existingReport_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_sample_tree(root, "talk")?;
    common::create_test_file(&root.join("to"), "talk.operations.json", "{}")?;

    let controller = Controller::with_config(Config::default())?;
    let (from, to, ids) = (root.join("from"), root.join("to"), root.join("ids"));

    let summary = controller.run_folder(&from, &to, &ids, false).await?;
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.processed, 0);

    let summary = controller.run_folder(&from, &to, &ids, true).await?;
    assert_eq!(summary.processed, 1);
    assert_ne!(FileManager::read_to_string(to.join("talk.operations.json"))?, "{}");

    Ok(())
}

/// Test that an empty folder is an error
#[tokio::test]
async fn test_runFolder_noTranscripts_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    std::fs::create_dir_all(root.join("from"))?;

    let controller = Controller::with_config(Config::default())?;
    let result = controller.run_folder(&root.join("from"), &root.join("to"), &root.join("ids"), false).await;

    assert!(result.is_err());
    Ok(())
}
