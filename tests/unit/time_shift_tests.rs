/*!
 * Tests for the requested shift value
 */

use subshift::time_shift::{plurify, TimeShift};

#[test]
fn test_isZero_withAllComponentsZero_shouldBeTrue() {
    assert!(TimeShift::default().is_zero());
    assert!(!TimeShift::new(0, 0, 1).is_zero());
    assert!(!TimeShift::new(-1, 0, 0).is_zero());
}

#[test]
fn test_makeNegative_withMixedSigns_shouldNegateEveryComponent() {
    let mut shift = TimeShift::new(2, -3, 400);
    shift.make_negative();
    assert_eq!(shift, TimeShift::new(-2, -3, -400));

    shift.make_positive();
    assert_eq!(shift, TimeShift::new(2, 3, 400));
}

#[test]
fn test_inverted_shouldCancelOut() {
    let shift = TimeShift::new(1, -2, 300);
    assert_eq!(shift.inverted(), TimeShift::new(-1, 2, -300));
    assert_eq!(shift.total_millis() + shift.inverted().total_millis(), 0);
}

#[test]
fn test_signToggles_withMinimumValue_shouldSaturate() {
    let mut shift = TimeShift::new(i32::MIN, 0, 0);
    shift.make_positive();
    assert_eq!(shift, TimeShift::new(i32::MAX, 0, 0));
    assert!(shift.is_delay());

    let mut shift = TimeShift::new(0, i32::MIN, 0);
    shift.make_negative();
    assert_eq!(shift, TimeShift::new(0, -i32::MAX, 0));

    assert_eq!(TimeShift::from_millis(i32::MIN).inverted(), TimeShift::from_millis(i32::MAX));
}

#[test]
fn test_totalMillis_shouldCombineComponents() {
    assert_eq!(TimeShift::new(2, 3, 400).total_millis(), 123_400);
    assert_eq!(TimeShift::new(1, -90, 0).total_millis(), -30_000);
}

#[test]
fn test_isDelay_usesPerComponentSign() {
    assert!(TimeShift::new(0, 1, 0).is_delay());
    // Net total is negative, but one component is positive
    assert!(TimeShift::new(1, -90, 0).is_delay());
    assert!(!TimeShift::new(0, -1, 0).is_delay());
    assert!(!TimeShift::default().is_delay());
}

#[test]
fn test_describeMagnitude_shouldPluralizeAndSkipZeros() {
    assert_eq!(TimeShift::new(2, 0, 0).describe_magnitude(), "2 minutes");
    assert_eq!(TimeShift::new(1, 1, 1).describe_magnitude(), "1 minute 1 second 1 millisecond");
    assert_eq!(TimeShift::new(0, -5, 0).describe_magnitude(), "5 seconds");
    assert_eq!(TimeShift::default().describe_magnitude(), "0 milliseconds");
}

#[test]
fn test_display_shouldIncludeDirection() {
    assert_eq!(TimeShift::new(0, 0, 500).to_string(), "delayed for 500 milliseconds");
    assert_eq!(TimeShift::new(-1, 0, 0).to_string(), "advanced for 1 minute");
}

#[test]
fn test_plurify() {
    assert_eq!(plurify(1, "second"), "1 second");
    assert_eq!(plurify(0, "second"), "0 seconds");
    assert_eq!(plurify(12, "minute"), "12 minutes");
}
