/*!
 * End-to-end pipeline tests with mock generators
 */

use termbridge::generator::{GenerationPrompt, MockGenerator};
use termbridge::glossary::GlossaryStore;
use termbridge::pipeline::{PipelineConfig, TranslationPipeline};

use crate::common;

/// Scenario: three English terms protected, generated without corruption,
/// restored in order with zero issues
#[tokio::test]
async fn test_pipeline_enToZh_threeTerms_shouldRestoreInOrder() {
    let store = GlossaryStore::from_glossary(common::crystal_glossary());
    let glossary = store.glossary_for(common::en_zh()).unwrap();

    let pipeline = TranslationPipeline::default();
    let generator = MockGenerator::echo();

    let result = pipeline
        .translate(
            &generator,
            Some(&glossary),
            "Neck, Crown, and Body are steps.",
            common::en_zh(),
        )
        .await;

    assert!(result.success);
    assert_eq!(result.matched_terms.len(), 3);
    assert!(result.quality_report.remaining_issues.is_empty());

    let text = &result.translated_text;
    let neck = text.find("引晶").unwrap();
    let crown = text.find("放肩").unwrap();
    let body = text.find("等径").unwrap();
    assert!(neck < crown && crown < body);
}

/// Scenario: the generator corrupts every token into a known variant;
/// the numeric-anchor pass restores them all
#[tokio::test]
async fn test_pipeline_withCorruptingGenerator_shouldRecoverAllTerms() {
    let store = GlossaryStore::from_glossary(common::crystal_glossary());
    let glossary = store.glossary_for(common::en_zh()).unwrap();

    let pipeline = TranslationPipeline::default();
    let generator = MockGenerator::corrupt_tokens();

    let result = pipeline
        .translate(
            &generator,
            Some(&glossary),
            "Neck, Crown, and Body are steps.",
            common::en_zh(),
        )
        .await;

    assert!(result.success, "issues: {:?}", result.quality_report.remaining_issues);
    assert!(result.translated_text.contains("引晶"));
    assert!(result.translated_text.contains("放肩"));
    assert!(result.translated_text.contains("等径"));
}

/// Scenario: generator appends explanatory prose; the validator strips it
/// and counts it as fixed, not fatal
#[tokio::test]
async fn test_pipeline_withExplainingGenerator_shouldStripAndAccept() {
    let store = GlossaryStore::from_glossary(common::crystal_glossary());
    let glossary = store.glossary_for(common::en_zh()).unwrap();

    let pipeline = TranslationPipeline::default();
    let generator = MockGenerator::append_explanation();

    let result = pipeline
        .translate(
            &generator,
            Some(&glossary),
            "Neck and Crown are steps.",
            common::en_zh(),
        )
        .await;

    assert!(result.success);
    assert!(result.quality_report.issues_fixed >= 1);
    assert!(!result.translated_text.contains("Note:"));
    assert!(result.translated_text.contains("引晶"));
}

/// Scenario: an implausibly short output triggers one retry with the
/// strict prompt, then fails with the last attempt attached
#[tokio::test]
async fn test_pipeline_withTruncatingGenerator_shouldRetryOnceThenFail() {
    let store = GlossaryStore::from_glossary(common::crystal_glossary());
    let glossary = store.glossary_for(common::zh_en()).unwrap();

    let pipeline = TranslationPipeline::default();
    let generator = MockGenerator::truncated();

    let result = pipeline
        .translate(
            &generator,
            Some(&glossary),
            "这是一个很长的句子，这个句子专门用来测试长度比例检查和重试逻辑。",
            common::zh_en(),
        )
        .await;

    assert!(!result.success);
    assert_eq!(result.attempts, 2);
    assert_eq!(result.translated_text, "Short.");
    assert!(result
        .quality_report
        .remaining_issues
        .iter()
        .any(|i| i.contains("possibly incomplete")));
    assert!(result.error.is_some());
}

/// Scenario: no glossary hits; the pipeline still runs end to end and the
/// text is untouched by placeholder logic
#[tokio::test]
async fn test_pipeline_withNoGlossaryHits_shouldPassTextThrough() {
    let store = GlossaryStore::from_glossary(common::crystal_glossary());
    let glossary = store.glossary_for(common::en_zh()).unwrap();

    let pipeline = TranslationPipeline::default();
    let generator = MockGenerator::echo();

    let result = pipeline
        .translate(
            &generator,
            Some(&glossary),
            "Nothing in the termbase appears in this sentence.",
            common::en_zh(),
        )
        .await;

    assert!(result.success);
    assert!(result.matched_terms.is_empty());
    assert_eq!(
        result.translated_text,
        "Nothing in the termbase appears in this sentence."
    );
}

/// Direction symmetry: the same glossary serves both directions, any
/// alias is detected, and the priority alias is substituted
#[tokio::test]
async fn test_pipeline_directionSymmetry_shouldFindTermsBothWays() {
    let store = GlossaryStore::from_glossary(common::crystal_glossary());
    let pipeline = TranslationPipeline::default();
    let generator = MockGenerator::echo();

    // Forward: zh source, key matched, priority alias substituted
    let forward_glossary = store.glossary_for(common::zh_en()).unwrap();
    let forward = pipeline
        .translate(&generator, Some(&forward_glossary), "先引晶再放肩。", common::zh_en())
        .await;
    assert!(forward.success);
    assert!(forward.translated_text.contains("Neck"));
    assert!(forward.translated_text.contains("Crown"));

    // Reverse: en source, alias matched, key substituted
    let reverse_glossary = store.glossary_for(common::en_zh()).unwrap();
    let reverse = pipeline
        .translate(
            &generator,
            Some(&reverse_glossary),
            "Neck first, Crown second.",
            common::en_zh(),
        )
        .await;
    assert!(reverse.success);
    assert!(reverse.translated_text.contains("引晶"));
    assert!(reverse.translated_text.contains("放肩"));

    // Reverse with a lower-priority alias in the text
    let reverse_alias = pipeline
        .translate(
            &generator,
            Some(&reverse_glossary),
            "Inspect the mono furnace.",
            common::en_zh(),
        )
        .await;
    assert!(reverse_alias.success);
    assert!(reverse_alias.translated_text.contains("单晶炉"));
}

/// A generator that drops tokens entirely still yields a diagnosable
/// failure rather than a silently degraded result
#[tokio::test]
async fn test_pipeline_withDroppingGenerator_shouldFailDiagnosably() {
    let store = GlossaryStore::from_glossary(common::crystal_glossary());
    let glossary = store.glossary_for(common::zh_en()).unwrap();

    let pipeline = TranslationPipeline::default();
    let generator = MockGenerator::drop_tokens();

    let result = pipeline
        .translate(
            &generator,
            Some(&glossary),
            "先引晶，再放肩，然后等径,整个流程都要记录数据。",
            common::zh_en(),
        )
        .await;

    assert!(!result.success);
    assert!(result
        .quality_report
        .remaining_issues
        .iter()
        .any(|i| i.contains("missing")));
}

/// The strict retry prompt is actually used on the second attempt
#[tokio::test]
async fn test_pipeline_retry_shouldUseStrictPrompt() {
    fn respond(prompt: &GenerationPrompt) -> String {
        if prompt.strict {
            // Second attempt behaves: tokens intact
            prompt.text.clone()
        } else {
            // First attempt drops everything
            "x".to_string()
        }
    }

    let store = GlossaryStore::from_glossary(common::crystal_glossary());
    let glossary = store.glossary_for(common::zh_en()).unwrap();

    let pipeline = TranslationPipeline::new(PipelineConfig::default());
    let generator = MockGenerator::echo().with_custom_response(respond);

    let result = pipeline
        .translate(
            &generator,
            Some(&glossary),
            "先引晶，再放肩，然后等径，整个流程都要记录数据。",
            common::zh_en(),
        )
        .await;

    assert!(result.success);
    assert_eq!(result.attempts, 2);
    assert!(result.translated_text.contains("Neck"));
}
