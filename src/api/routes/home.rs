use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::Html;
use serde::Deserialize;
use tracing::{error, warn};

use crate::aggregate::PlaylistError;
use crate::api::state::AppState;
use crate::api::{views, INVALID_LINK_MESSAGE};

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub search_string: String,
}

pub async fn show_form() -> Html<String> {
    Html(views::render_form())
}

/// Handle a submitted playlist link.
///
/// Always answers with the form page: either the report or a short error
/// message. An unreadable link and a failed fetch show the same message.
pub async fn analyze_form(
    State(state): State<AppState>,
    form: Result<Form<AnalyzeForm>, FormRejection>,
) -> Html<String> {
    let reference = match form {
        Ok(Form(form)) => form.search_string,
        Err(rejection) => {
            warn!("Unreadable form submission: {}", rejection);
            String::new()
        }
    };

    match state.analyze(&reference).await {
        Ok(report) => Html(views::render_report(&report)),
        Err(PlaylistError::InvalidReference(e)) => {
            warn!("{}", e);
            Html(views::render_error(&INVALID_LINK_MESSAGE))
        }
        Err(e @ PlaylistError::Fetch { .. }) => {
            error!("{}", e);
            Html(views::render_error(&INVALID_LINK_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    use crate::aggregate::PlaylistAggregator;
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::fetch::{FetchError, MockSource, PlaylistItemsPage, PlaylistSource, VideoDetails};
    use crate::models::PlaylistId;

    struct PanickingSource;

    #[async_trait]
    impl PlaylistSource for PanickingSource {
        fn name(&self) -> &'static str {
            "panicking"
        }

        async fn list_playlist_items(
            &self,
            _playlist_id: &PlaylistId,
            _page_size: u32,
            _page_token: Option<&str>,
        ) -> Result<PlaylistItemsPage, FetchError> {
            panic!("source exploded")
        }

        async fn list_videos(
            &self,
            _video_ids: &[String],
        ) -> Result<Vec<VideoDetails>, FetchError> {
            panic!("source exploded")
        }
    }

    fn state_with(source: Arc<dyn PlaylistSource>) -> AppState {
        AppState::new(PlaylistAggregator::new(source, 50))
    }

    fn two_page_state() -> AppState {
        state_with(Arc::new(MockSource::new(vec![
            vec![
                MockSource::video("v1", "Intro", "PT30M"),
                MockSource::video("v2", "Basics", "PT30M"),
            ],
            vec![MockSource::video("v3", "Wrap-up", "PT1H")],
        ])))
    }

    async fn get_html(app: axum::Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read_html(resp).await
    }

    async fn post_form(app: axum::Router, body: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        read_html(resp).await
    }

    async fn read_html(resp: axum::response::Response) -> (StatusCode, String) {
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_get_shows_empty_form() {
        let app = build_router(two_page_state());
        let (status, html) = get_html(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("name=\"search_string\""));
        assert!(!html.contains("No of videos"));
    }

    #[tokio::test]
    async fn test_post_renders_report() {
        let app = build_router(two_page_state());
        let (status, html) = post_form(
            app,
            "search_string=https%3A%2F%2Fwww.youtube.com%2Fplaylist%3Flist%3DPLabc",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<li>No of videos: 3</li>"));
        assert!(html.contains("<li>Average length of a video: 40 Minutes, 0 Seconds</li>"));
        assert!(html.contains("<li>Total length of playlist: 2 Hours, 0 Minutes, 0 Seconds</li>"));
        assert!(html.contains("<li>At 2.00x: 1 Hours, 0 Minutes, 0 Seconds</li>"));
        assert!(html.contains(r#""titles":["Intro","Basics","Wrap-up"]"#));
        assert!(html.contains(r#""minutes":[30.0,30.0,60.0]"#));
    }

    #[tokio::test]
    async fn test_post_empty_link_shows_invalid_message() {
        let app = build_router(two_page_state());
        let (status, html) = post_form(app, "search_string=").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<li>Invalid playlist link</li>"));
        assert!(html.contains("<li>Please try again with correct parameters</li>"));
    }

    #[tokio::test]
    async fn test_post_missing_field_shows_invalid_message() {
        let app = build_router(two_page_state());
        let (status, html) = post_form(app, "").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<li>Invalid playlist link</li>"));
    }

    #[tokio::test]
    async fn test_post_fetch_failure_shows_invalid_message() {
        let source = MockSource::new(vec![vec![MockSource::video("a", "A", "PT1S")]]).failing_at(0);
        let app = build_router(state_with(Arc::new(source)));
        let (status, html) = post_form(app, "search_string=PLmissing").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<li>Invalid playlist link</li>"));
        assert!(!html.contains("No of videos"));
    }

    #[tokio::test]
    async fn test_post_empty_playlist_has_zero_average() {
        let app = build_router(state_with(Arc::new(MockSource::new(vec![]))));
        let (status, html) = post_form(app, "search_string=PLempty").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<li>No of videos: 0</li>"));
        assert!(html.contains("<li>Average length of a video: 0 Seconds</li>"));
    }

    #[tokio::test]
    async fn test_post_panic_shows_unexpected_message() {
        let app = build_router(state_with(Arc::new(PanickingSource)));
        let (status, html) = post_form(app, "search_string=PLboom").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("name=\"search_string\""));
        assert!(html.contains("<li>An unexpected error occurred</li>"));
        assert!(html.contains("<li>Please try again later</li>"));
    }
}
