use serde_json::json;

use super::*;

#[test]
fn reads_top_level_shape() {
    let body = json!({"verdict": "overcharged", "total_overcharge": 1250.5, "confidence_score": 87, "doc_id": "doc_1_x"});
    let summary = summarize(&body).unwrap();
    assert_eq!(summary.verdict, "overcharged");
    assert!((summary.total_overcharge - 1250.5).abs() < f64::EPSILON);
    assert_eq!(summary.doc_id.as_deref(), Some("doc_1_x"));
}

#[test]
fn reads_final_result_shape() {
    let body = json!({"success": true, "final_result": {"verdict": "fair", "total_overcharge": 0, "confidence_score": 92.5}});
    assert_eq!(summarize(&body).unwrap().verdict, "fair");
}

#[test]
fn reads_processing_stages_shape() {
    let body = json!({
        "processing_stages": {"domain_analysis": {"result": {"domain_result": {
            "verdict": "overcharged", "total_overcharge": 300.0, "confidence_score": 70,
            "analysis_details": {"items": 4}
        }}}}
    });
    let summary = summarize(&body).unwrap();
    assert_eq!(summary.analysis_details, Some(json!({"items": 4})));
}

#[test]
fn top_level_wins_over_nested() {
    let body = json!({
        "verdict": "top", "total_overcharge": 1, "confidence_score": 50,
        "final_result": {"verdict": "nested", "total_overcharge": 2, "confidence_score": 60}
    });
    assert_eq!(normalize(&body).map(|s| s.verdict), Some("top".to_owned()));
}

#[test]
fn partial_top_level_falls_through_to_nested() {
    let body = json!({"verdict": "top", "final_result": {"verdict": "nested", "total_overcharge": 2, "confidence_score": 60}});
    assert_eq!(normalize(&body).map(|s| s.verdict), Some("nested".to_owned()));
}

#[test]
fn unknown_shape_is_unreadable() {
    assert_eq!(summarize(&json!({"status": "queued"})), Err(AnalysisError::Unreadable));
    assert_eq!(
        AnalysisError::Unreadable.to_string(),
        "Analysis failed: could not read the analysis result"
    );
}

#[test]
fn confidence_out_of_range_is_invalid() {
    let body = json!({"verdict": "x", "total_overcharge": 1, "confidence_score": 101});
    assert_eq!(summarize(&body), Err(AnalysisError::InvalidResponse));
    let body = json!({"verdict": "x", "total_overcharge": 1, "confidence_score": -1});
    assert_eq!(summarize(&body), Err(AnalysisError::InvalidResponse));
    let body = json!({"verdict": "x", "total_overcharge": 1, "confidence_score": 100});
    assert!(summarize(&body).is_ok());
}

#[test]
fn follow_up_prefers_free_text() {
    let body = json!({"response": "Room rent exceeds the CGHS ceiling.", "verdict": "x", "total_overcharge": 1, "confidence_score": 5});
    assert_eq!(follow_up_text(&body).unwrap(), "Room rent exceeds the CGHS ceiling.");
}

#[test]
fn follow_up_falls_back_to_headline() {
    let body = json!({"final_result": {"verdict": "fair", "total_overcharge": 0, "confidence_score": 90}});
    let text = follow_up_text(&body).unwrap();
    assert!(text.contains("**Verdict:** fair"));
    assert!(text.contains("**Confidence:** 90%"));
}

#[test]
fn summary_markdown_formats_amounts() {
    let summary = AnalysisSummary {
        verdict: "overcharged".into(),
        total_overcharge: 1234.5,
        confidence_score: 88.4,
        analysis_details: None,
        reply: Some("See line 4.".into()),
        doc_id: None,
    };
    assert_eq!(
        summary_markdown(&summary),
        "**Verdict:** overcharged\n\n**Total overcharge:** ₹1234.50\n\n**Confidence:** 88%\n\nSee line 4."
    );
}

#[test]
fn error_message_reads_message_or_detail() {
    assert_eq!(error_message(r#"{"message":"file too blurry"}"#), Some("file too blurry".to_owned()));
    assert_eq!(error_message(r#"{"detail":"bad state"}"#), Some("bad state".to_owned()));
    assert_eq!(error_message("gateway timeout"), None);
}

#[test]
fn urls_per_mode() {
    assert_eq!(analysis_url("https://x.app/", AnalysisMode::Standard), "https://x.app/analyze");
    assert_eq!(analysis_url("https://x.app", AnalysisMode::Enhanced), "https://x.app/analyze-enhanced");
}

#[test]
fn service_errors_are_prefixed() {
    assert_eq!(AnalysisError::Service("bad file".into()).to_string(), "Analysis failed: bad file");
    assert_eq!(AnalysisError::Status(503).to_string(), "Analysis failed: API request failed with status: 503");
}
