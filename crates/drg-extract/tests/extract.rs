//! Extraction behaviour for both strategies.

use drg_extract::{
    ExtractError, Extraction, Extractor, HeuristicExtractor, parse_model_reply, review,
};
use drg_model::{DrgRule, MetricRule, MetricValues};

fn hypertension_rule() -> DrgRule {
    DrgRule {
        id: "1".to_string(),
        disease_name: "Essential hypertension".to_string(),
        drg_code: "I10.x".to_string(),
        max_cost: 150.0,
        required_metrics: vec![
            MetricRule::new("systolic", "Systolic BP", "mmHg", 90.0, 180.0),
            MetricRule::new("diastolic", "Diastolic BP", "mmHg", 60.0, 110.0),
        ],
        is_active: true,
    }
}

#[tokio::test]
async fn heuristic_reads_labels_aliases_and_cost() {
    let extractor: Box<dyn Extractor> = Box::new(HeuristicExtractor::new());
    let note = "Patient seen today. Systolic BP 165, diastolic 95. Total fee: 130";

    let extraction = extractor
        .extract(note, &hypertension_rule())
        .await
        .unwrap()
        .expect("values found");

    assert_eq!(extraction.metrics.get("systolic"), Some(&165.0));
    assert_eq!(extraction.metrics.get("diastolic"), Some(&95.0));
    assert_eq!(extraction.cost, Some(130.0));
    assert_eq!(extractor.name(), "heuristic");
}

#[tokio::test]
async fn heuristic_understands_chinese_keywords() {
    let note = "高压 160 低压 100 费用：180.5";
    let extraction = HeuristicExtractor::new()
        .extract(note, &hypertension_rule())
        .await
        .unwrap()
        .expect("values found");

    assert_eq!(extraction.metrics.get("systolic"), Some(&160.0));
    assert_eq!(extraction.metrics.get("diastolic"), Some(&100.0));
    assert_eq!(extraction.cost, Some(180.5));
}

#[tokio::test]
async fn heuristic_returns_none_when_nothing_matches() {
    let result = HeuristicExtractor::new()
        .extract("Follow-up in two weeks.", &hypertension_rule())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn model_reply_keeps_only_rule_keys_and_cost() {
    let reply = "```json\n{\"systolic\": 150, \"diastolic\": \"95\", \"pulse\": 80, \"cost\": 120}\n```";
    let extraction = parse_model_reply(reply, &hypertension_rule())
        .unwrap()
        .expect("values found");

    assert_eq!(
        extraction.metrics,
        MetricValues::from([("diastolic".to_string(), 95.0), ("systolic".to_string(), 150.0)])
    );
    assert_eq!(extraction.cost, Some(120.0));
}

#[test]
fn empty_model_reply_is_none() {
    assert!(parse_model_reply("{}", &hypertension_rule()).unwrap().is_none());
    assert!(
        parse_model_reply("{\"systolic\": null}", &hypertension_rule())
            .unwrap()
            .is_none()
    );
}

#[test]
fn malformed_model_reply_is_an_error() {
    assert!(matches!(
        parse_model_reply("sorry, I cannot help", &hypertension_rule()),
        Err(ExtractError::InvalidReply(_))
    ));
    assert!(matches!(
        parse_model_reply("[1, 2]", &hypertension_rule()),
        Err(ExtractError::InvalidReply(_))
    ));
}

#[test]
fn feedback_lists_missing_out_of_range_and_cost() {
    let extraction = Extraction {
        metrics: MetricValues::from([("systolic".to_string(), 200.0)]),
        cost: Some(170.0),
    };
    let feedback = review(&hypertension_rule(), &extraction);

    assert!(!feedback.success);
    assert_eq!(feedback.missing_fields, vec!["Diastolic BP"]);
    assert_eq!(feedback.out_of_range_fields, vec!["Systolic BP (200)"]);
    assert!(feedback.cost_exceeded);
    assert_eq!(
        feedback.message,
        "missing: Diastolic BP; out of range: Systolic BP (200); cost exceeds limit 150"
    );
}

#[test]
fn feedback_succeeds_for_complete_extraction() {
    let extraction = Extraction {
        metrics: MetricValues::from([
            ("systolic".to_string(), 130.0),
            ("diastolic".to_string(), 85.0),
        ]),
        cost: None,
    };
    let feedback = review(&hypertension_rule(), &extraction);
    assert!(feedback.success);
    assert!(!feedback.cost_exceeded);
}
