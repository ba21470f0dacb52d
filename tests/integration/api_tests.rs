/*!
 * API service tests: DTO shapes and endpoint behavior
 */

use std::sync::Arc;

use termbridge::api::{ApiService, MatchRequest, TranslateRequest};
use termbridge::generator::MockGenerator;
use termbridge::glossary::GlossaryStore;

use crate::common;

fn service(generator: MockGenerator) -> ApiService {
    let store = Arc::new(GlossaryStore::from_glossary(common::crystal_glossary()));
    ApiService::new(store, Arc::new(generator))
}

#[test]
fn test_matchEndpoint_shouldReturnPositions() {
    let service = service(MockGenerator::echo());

    let response = service.match_terms(&MatchRequest {
        text: "Neck, then Crown.".to_string(),
        source_lang: "en".to_string(),
        target_lang: "zh".to_string(),
    });

    assert!(response.success);
    assert_eq!(response.matched_terms.len(), 2);
    assert_eq!(response.matched_terms[0].source, "Neck");
    assert_eq!(response.matched_terms[0].target, "引晶");
    assert_eq!(response.matched_terms[0].position, Some(0));
    assert_eq!(response.matched_terms[1].position, Some(11));
}

#[test]
fn test_matchEndpoint_withAutoLanguages_shouldDetectDirection() {
    let service = service(MockGenerator::echo());

    let response = service.match_terms(&MatchRequest {
        text: "先引晶，然后放肩。".to_string(),
        source_lang: "auto".to_string(),
        target_lang: "auto".to_string(),
    });

    assert!(response.success);
    assert_eq!(response.matched_terms.len(), 2);
    assert_eq!(response.matched_terms[0].target, "Neck");
}

#[test]
fn test_matchEndpoint_responseJson_shouldOmitAbsentError() {
    let service = service(MockGenerator::echo());

    let response = service.match_terms(&MatchRequest {
        text: "Neck".to_string(),
        source_lang: "en".to_string(),
        target_lang: "zh".to_string(),
    });

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("error").is_none());
    assert_eq!(json["success"], true);
    assert!(json["matched_terms"].is_array());
}

#[tokio::test]
async fn test_translateEndpoint_shouldReturnFullShape() {
    let service = service(MockGenerator::echo());

    let response = service
        .translate(&TranslateRequest {
            text: "先引晶，然后放肩。".to_string(),
            source_lang: "zh".to_string(),
            target_lang: "en".to_string(),
            use_termbase: true,
        })
        .await;

    assert!(response.success);
    let translation = response.translation.as_ref().unwrap();
    assert_eq!(translation.source_text, "先引晶，然后放肩。");
    assert!(translation.translated_text.contains("Neck"));

    let quality = response.quality_check.as_ref().unwrap();
    assert_eq!(quality.issues_found, 0);
    assert!(quality.remaining_issues.is_empty());

    let json = serde_json::to_value(&response).unwrap();
    assert!(json["translation"]["translated_text"].is_string());
    assert!(json["quality_check"]["remaining_issues"].is_array());
}

#[tokio::test]
async fn test_translateEndpoint_withFailingGenerator_shouldReportError() {
    let service = service(MockGenerator::failing());

    let response = service
        .translate(&TranslateRequest {
            text: "先引晶。".to_string(),
            source_lang: "zh".to_string(),
            target_lang: "en".to_string(),
            use_termbase: true,
        })
        .await;

    assert!(!response.success);
    assert!(response.error.as_ref().unwrap().contains("generation failed"));
}

#[tokio::test]
async fn test_translateEndpoint_failedValidation_shouldStillCarryBestAttempt() {
    let service = service(MockGenerator::truncated());

    let response = service
        .translate(&TranslateRequest {
            text: "这是一个很长的句子，这个句子专门用来测试失败时的返回内容。".to_string(),
            source_lang: "zh".to_string(),
            target_lang: "en".to_string(),
            use_termbase: true,
        })
        .await;

    assert!(!response.success);
    // The best attempt and its quality report are attached for inspection
    assert_eq!(
        response.translation.as_ref().unwrap().translated_text,
        "Short."
    );
    assert!(!response.quality_check.unwrap().remaining_issues.is_empty());
}

#[tokio::test]
async fn test_translateEndpoint_requestJson_shouldRoundTrip() {
    let raw = r#"{"text":"先引晶。","source_lang":"chinese","target_lang":"english","use_termbase":true}"#;
    let request: TranslateRequest = serde_json::from_str(raw).unwrap();

    let service = service(MockGenerator::echo());
    let response = service.translate(&request).await;

    assert!(response.success);
    assert!(response
        .translation
        .unwrap()
        .translated_text
        .contains("Neck"));
}
