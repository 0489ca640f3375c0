/*!
 * Integration tests for the application controller
 */

use std::fs;
use anyhow::Result;

use subshift::app_config::Config;
use subshift::app_controller::{Adjustment, Controller};
use subshift::document::SubtitleDocument;
use subshift::errors::AppError;
use subshift::time_shift::TimeShift;
use crate::common::{self, RecordingNotifier, HELLO_WORLD_SRT};

fn starts_of(path: &std::path::Path) -> Result<Vec<i64>> {
    let mut document = SubtitleDocument::new();
    document.load(path)?;
    Ok(document.records().iter().map(|s| s.start).collect())
}

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config, Config::default());
    Ok(())
}

#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.encoding = "bogus".to_string();

    let result = Controller::with_config(config);
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn test_run_withSingleFile_shouldWriteSuffixedOutput() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", HELLO_WORLD_SRT)?;

    let controller = Controller::new_for_test()?;
    let written = controller.run(&input, Adjustment::All(TimeShift::from_millis(500)), None, false)?;

    let expected = temp_dir.path().join("movie.shifted.srt");
    assert_eq!(written, Some(expected.clone()));
    assert_eq!(starts_of(&expected)?, vec![1_500, 3_500]);
    assert_eq!(fs::read_to_string(&input)?, HELLO_WORLD_SRT);

    Ok(())
}

#[test]
fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", HELLO_WORLD_SRT)?;
    let output = common::create_test_file(temp_dir.path(), "movie.shifted.srt", "keep me")?;

    let controller = Controller::new_for_test()?;
    let adjustment = Adjustment::All(TimeShift::new(0, 1, 0));

    assert_eq!(controller.run(&input, adjustment, None, false)?, None);
    assert_eq!(fs::read_to_string(&output)?, "keep me");

    assert_eq!(controller.run(&input, adjustment, None, true)?, Some(output.clone()));
    assert_eq!(starts_of(&output)?, vec![2_000, 4_000]);

    Ok(())
}

#[test]
fn test_run_withInPlaceConfig_shouldOverwriteInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;

    let mut config = Config::default();
    config.output.in_place = true;
    let controller = Controller::with_config(config)?;

    let adjustment = Adjustment::Range {
        shift: TimeShift::new(0, -1, 0),
        from: Some(4),
        to: None,
    };
    assert_eq!(controller.run(&input, adjustment, None, false)?, Some(input.clone()));
    assert_eq!(starts_of(&input)?, vec![10_000, 20_000, 30_000, 39_000, 49_000]);

    Ok(())
}

#[test]
fn test_run_withExplicitOutput_shouldWriteThere() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let output = temp_dir.path().join("fixed").join("movie.srt");

    let controller = Controller::new_for_test()?;
    let adjustment = Adjustment::Proportional {
        shift: TimeShift::new(0, 0, 800),
        anchor: 5,
    };
    controller.run(&input, adjustment, Some(&output), false)?;

    // Anchor at index 4, step 200
    assert_eq!(starts_of(&output)?, vec![10_000, 20_400, 30_600, 40_800, 50_800]);
    Ok(())
}

#[test]
fn test_run_withUnknownAnchor_shouldFailWithoutWriting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;

    let notifier = RecordingNotifier::new();
    let controller = Controller::new_for_test()?.with_notifier(notifier.clone());
    let adjustment = Adjustment::Proportional {
        shift: TimeShift::new(0, 1, 0),
        anchor: 99,
    };

    assert!(controller.run(&input, adjustment, None, false).is_err());
    assert!(!temp_dir.path().join("movie.shifted.srt").exists());
    assert_eq!(notifier.severes().len(), 1);

    Ok(())
}

#[test]
fn test_run_withInvertedRange_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;

    let controller = Controller::new_for_test()?;
    let adjustment = Adjustment::Range {
        shift: TimeShift::new(0, 1, 0),
        from: Some(4),
        to: Some(2),
    };

    assert!(controller.run(&input, adjustment, None, false).is_err());
    Ok(())
}

#[test]
fn test_run_folder_shouldProcessEverySubtitleOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("season1");
    fs::create_dir_all(&nested)?;

    common::create_test_subtitle(temp_dir.path(), "e01.srt")?;
    common::create_test_subtitle(&nested, "e02.srt")?;
    common::create_test_file(temp_dir.path(), "readme.txt", "not a subtitle")?;
    common::create_test_file(temp_dir.path(), "broken.srt", "1\nno timing here\n")?;

    let controller = Controller::new_for_test()?;
    let adjustment = Adjustment::All(TimeShift::new(0, 0, 250));

    assert_eq!(controller.run_folder(temp_dir.path(), adjustment, false)?, 2);
    assert!(temp_dir.path().join("e01.shifted.srt").exists());
    assert!(nested.join("e02.shifted.srt").exists());

    // A second run ignores the outputs of the first and skips existing ones
    assert_eq!(controller.run_folder(temp_dir.path(), adjustment, false)?, 0);
    assert!(!temp_dir.path().join("e01.shifted.shifted.srt").exists());

    Ok(())
}
