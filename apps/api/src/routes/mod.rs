pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::require_api_key;
use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Resume endpoints require the project key; health stays public.
    let protected = Router::new()
        .route("/parse", post(handlers::handle_parse))
        .route(
            "/extract-experience",
            post(handlers::handle_extract_experience),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(protected)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::errors::AppError;
    use crate::resume::experience::{ExperienceExtractor, ExperienceReport};

    const KEY: &str = "project-secret";
    const BOUNDARY: &str = "resume-api-test-boundary";

    #[derive(Default)]
    struct CountingExtractor {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ExperienceExtractor for CountingExtractor {
        async fn extract(&self, _resume_text: &str) -> Result<ExperienceReport, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExperienceReport::default())
        }
    }

    fn test_router(extractor: Arc<CountingExtractor>) -> (Router, tempfile::TempDir) {
        router_with_skills(extractor, Some("python\naws: aws, amazon web services\n"))
    }

    /// `skills: None` leaves the dictionary file absent.
    fn router_with_skills(
        extractor: Arc<CountingExtractor>,
        skills: Option<&str>,
    ) -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let skills_path = dir.path().join("skills.txt");
        if let Some(skills) = skills {
            std::fs::write(&skills_path, skills).unwrap();
        }

        let config = Config {
            project_key: KEY.to_string(),
            llm_api_key: "unused".to_string(),
            llm_api_url: "http://127.0.0.1:1/unused".to_string(),
            llm_timeout: Duration::from_secs(1),
            skills_path,
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "info".to_string(),
        };
        let state = AppState {
            config,
            experience: extractor,
        };
        (build_router(state), dir)
    }

    fn upload(uri: &str, key: Option<&str>, field: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(key) = key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(Body::from(body)).unwrap()
    }

    /// Minimal single-page PDF with one line of Helvetica text, or an empty page.
    fn pdf(text: Option<&str>) -> Vec<u8> {
        let content = text
            .map(|t| format!("BT /F1 12 Tf 72 720 Td ({t}) Tj ET"))
            .unwrap_or_default();
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref_at = out.len();
        out.extend_from_slice(
            format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes(),
        );
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn error_code(resp: axum::response::Response) -> String {
        let json = json_body(resp).await;
        json["error"]["code"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_health_no_auth_required() {
        let (app, _dir) = test_router(Arc::default());
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_parse_rejects_missing_key() {
        let (app, _dir) = test_router(Arc::default());
        let resp = app
            .oneshot(upload("/parse", None, "file", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(resp).await, "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_parse_rejects_wrong_key() {
        let (app, _dir) = test_router(Arc::default());
        let resp = app
            .oneshot(upload("/parse", Some("nope"), "file", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_parse_requires_file_field() {
        let (app, _dir) = test_router(Arc::default());
        let resp = app
            .oneshot(upload("/parse", Some(KEY), "resume", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(resp).await, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_parse_rejects_empty_file() {
        let (app, _dir) = test_router(Arc::default());
        let resp = app
            .oneshot(upload("/parse", Some(KEY), "file", b""))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_rejects_non_pdf() {
        let (app, _dir) = test_router(Arc::default());
        let resp = app
            .oneshot(upload("/parse", Some(KEY), "file", b"plain text resume"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_code(resp).await, "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_extract_experience_non_pdf_never_reaches_llm() {
        let extractor = Arc::new(CountingExtractor::default());
        let (app, _dir) = test_router(extractor.clone());
        let resp = app
            .oneshot(upload(
                "/extract-experience",
                Some(KEY),
                "file",
                b"GIF89a not a resume",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extract_experience_rejects_missing_key() {
        let (app, _dir) = test_router(Arc::default());
        let resp = app
            .oneshot(upload("/extract-experience", None, "file", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_parse_returns_summary_for_pdf() {
        let (app, _dir) = test_router(Arc::default());
        let doc = pdf(Some("Jane Doe jane@x.io Python on AWS"));
        let resp = app
            .oneshot(upload("/parse", Some(KEY), "file", &doc))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({
                "name": "Jane Doe",
                "email": "jane@x.io",
                "skills": ["aws", "python"]
            })
        );
    }

    #[tokio::test]
    async fn test_parse_missing_skill_file_is_500() {
        let (app, _dir) = router_with_skills(Arc::default(), None);
        let doc = pdf(Some("Jane Doe jane@x.io Python on AWS"));
        let resp = app
            .oneshot(upload("/parse", Some(KEY), "file", &doc))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_code(resp).await, "SKILLS_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_extract_experience_blank_pdf_never_reaches_llm() {
        let extractor = Arc::new(CountingExtractor::default());
        let (app, _dir) = test_router(extractor.clone());
        let resp = app
            .oneshot(upload("/extract-experience", Some(KEY), "file", &pdf(None)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extract_experience_calls_extractor_once() {
        let extractor = Arc::new(CountingExtractor::default());
        let (app, _dir) = test_router(extractor.clone());
        let doc = pdf(Some("Backend Engineer at Acme 2020 to 2024"));
        let resp = app
            .oneshot(upload("/extract-experience", Some(KEY), "file", &doc))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({"experiences": []})
        );
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    }
}
