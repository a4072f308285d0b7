pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/keywords", post(handlers::handle_keywords))
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/report", post(handlers::handle_report))
        .route("/api/v1/resumes/extract", post(handlers::handle_extract))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::advisor::KeywordAdvisor;
    use crate::analysis::keywords::KeywordExtractor;
    use crate::config::Config;

    fn test_state(config: Config) -> AppState {
        AppState {
            config,
            extractor: Arc::new(KeywordExtractor::default()),
            advisor: Arc::new(KeywordAdvisor),
        }
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let router = build_router(test_state(Config::default()));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_keywords_endpoint() {
        let router = build_router(test_state(Config::default()));
        let (status, body) = post_json(
            router,
            "/api/v1/keywords",
            json!({"text": "docker docker kubernetes", "max_keywords": 1}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"keywords": ["docker"]}));
    }

    #[tokio::test]
    async fn test_match_endpoint() {
        let router = build_router(test_state(Config::default()));
        let (status, body) = post_json(
            router,
            "/api/v1/match",
            json!({
                "resume_keywords_json": r#"["python","aws"]"#,
                "jd_keywords_json": r#"["python","aws","docker"]"#
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match_score"], 66.67);
        assert_eq!(body["missing_keywords"], json!(["docker"]));
    }

    #[tokio::test]
    async fn test_match_endpoint_empty_reference() {
        let router = build_router(test_state(Config::default()));
        let (status, body) = post_json(
            router,
            "/api/v1/match",
            json!({"resume_keywords_json": "[\"rust\"]", "jd_keywords_json": "[]"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EMPTY_REFERENCE");
    }

    #[tokio::test]
    async fn test_match_endpoint_invalid_json() {
        let router = build_router(test_state(Config::default()));
        let (status, body) = post_json(
            router,
            "/api/v1/match",
            json!({"resume_keywords_json": "oops", "jd_keywords_json": "[\"rust\"]"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_KEYWORDS");
    }

    #[tokio::test]
    async fn test_report_endpoint_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        let router = build_router(test_state(Config::default()));
        let (status, body) = post_json(
            router,
            "/api/v1/report",
            json!({
                "candidate_name": "Barbara Liskov",
                "target_role": "Principal Engineer",
                "match_score": 72.5,
                "matched_keywords": "rust, tokio",
                "missing_keywords": [],
                "suggestions": "Mention Kafka.",
                "industry_insights": "- Streaming is hot",
                "output_path": path.display().to_string()
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["warning"].is_null());
        let content = body["content"].as_str().unwrap();
        assert!(content.contains("Barbara Liskov"));
        assert!(content.contains("Strong Match"));
        assert!(content.contains("- `tokio`"));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_report_endpoint_unwritable_path_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.md");
        let router = build_router(test_state(Config::default()));
        let (status, body) = post_json(
            router,
            "/api/v1/report",
            json!({
                "candidate_name": "Barbara Liskov",
                "target_role": "Principal Engineer",
                "match_score": 10.0,
                "output_path": path.display().to_string()
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["warning"].as_str().is_some());
        assert!(body["saved_to"].is_null());
        assert!(body["content"].as_str().unwrap().contains("Poor Match"));
    }

    #[tokio::test]
    async fn test_report_endpoint_rejects_out_of_range_score() {
        let router = build_router(test_state(Config::default()));
        let (status, _) = post_json(
            router,
            "/api/v1/report",
            json!({"candidate_name": "A", "target_role": "B", "match_score": 140.0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            report_path: dir.path().join("resume_report.md"),
            ..Config::default()
        };
        let router = build_router(test_state(config));
        let (status, body) = post_json(
            router,
            "/api/v1/analyze",
            json!({
                "candidate_name": "Ken",
                "target_role": "SRE",
                "resume_text": "Ran linux and prometheus with grafana.",
                "jd_text": "SRE role: Linux, Prometheus, Grafana and Terraform."
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["advisor_backend"], "keyword");
        assert_eq!(body["band"], "moderate");
        assert!(body["report"]["saved_to"].is_string());
        assert!(dir.path().join("resume_report.md").exists());
    }
}
