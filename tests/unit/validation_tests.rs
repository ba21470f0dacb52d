/*!
 * Unit tests for quality validation
 */

use termbridge::validation::{QualityValidator, ValidationConfig};

use crate::common;

#[test]
fn test_validate_cleanRecoveredText_shouldReportZeroIssues() {
    let validator = QualityValidator::new();

    let outcome = validator.validate(
        "先进行引晶，然后放肩，最后进入等径生长阶段。",
        "First the Neck, then the Crown, then the Body growth stage.",
        common::zh_en(),
        None,
    );

    assert!(outcome.report.passed());
    assert_eq!(outcome.report.issues_found, 0);
    assert_eq!(outcome.report.issues_fixed, 0);
    assert!(outcome.report.remaining_issues.is_empty());
}

#[test]
fn test_validate_lengthFloor_shouldDependOnDirection() {
    let validator = QualityValidator::new();

    // 40 chars of Chinese to 6 chars of English: flagged for zh->en
    let source = "这是一个很长的句子，这个句子专门用来测试长度比例的检查逻辑是否正确工作。";
    let outcome = validator.validate(source, "Short.", common::zh_en(), None);
    assert!(!outcome.report.passed());

    // The same ratio in en->zh would use a lower floor; a contracted
    // Chinese translation of long English passes
    let source = "The neck step reduces the crystal diameter before the crown widens it.";
    let outcome = validator.validate(source, "引晶步骤缩小晶体直径，放肩步骤再将其逐渐加宽。", common::en_zh(), None);
    assert!(outcome.report.passed());
}

#[test]
fn test_validate_shortSource_shouldSkipLengthCheck() {
    let validator = QualityValidator::new();

    // Source of 20 chars or fewer is exempt from the ratio floor
    let outcome = validator.validate("短句。", "Yes.", common::zh_en(), None);
    assert!(outcome.report.passed());
}

#[test]
fn test_validate_explanatoryProse_shouldBeStrippedNotFatal() {
    let validator = QualityValidator::new();
    let translated = "Here is the translation:\nThe Neck step completes the cycle as planned.\nNote: Neck is a crystal growth term.";

    let outcome = validator.validate(
        "引晶步骤按计划完成整个循环周期。",
        translated,
        common::zh_en(),
        None,
    );

    assert!(outcome.report.passed());
    assert_eq!(outcome.report.issues_fixed, 2);
    assert_eq!(outcome.report.issues_found, 2);
    assert_eq!(outcome.text, "The Neck step completes the cycle as planned.");
}

#[test]
fn test_validate_residualMarkers_shouldBeFatal() {
    let validator = QualityValidator::new();

    let outcome = validator.validate(
        "先进行引晶，然后放肩，最后进入等径生长阶段。",
        "First the [T1], then the Crown, then the Body stage.",
        common::zh_en(),
        None,
    );

    assert!(!outcome.report.passed());
}

#[test]
fn test_validate_withoutLengthCheck_shouldIgnoreRatio() {
    let validator = QualityValidator::with_config(ValidationConfig::without_length_check());
    let source = "这是一个很长的句子，这个句子专门用来测试长度比例的检查逻辑是否正确工作。";

    let outcome = validator.validate(source, "Short.", common::zh_en(), None);

    assert!(outcome.report.passed());
}
