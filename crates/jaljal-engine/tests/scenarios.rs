//! End-to-end search sessions against a fake combination service

use jaljal_client::{ClientOptions, HttpSearchClient};
use jaljal_core::{
    RenderOptions, Resolution, SessionController, SessionState, ValidationError, View, render,
};
use jaljal_engine::SearchEngine;
use mockito::{Matcher, Server, ServerGuard};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const ONE_COMBINATION: &str = r#"[
    {
        "videos": [
            {"id": "v1", "title": "Opening", "duration": 1680, "duration_formatted": "0:28:00", "url": "https://example.com/v1"}
        ],
        "total_time": 1680,
        "total_time_formatted": "0:28:00",
        "remaining_time": 120,
        "remaining_time_formatted": "0:02:00"
    }
]"#;

fn engine_for(base_url: String) -> SearchEngine {
    let client = HttpSearchClient::new(ClientOptions {
        base_url,
        timeout: Duration::from_secs(5),
        data_source: None,
    })
    .unwrap();
    SearchEngine::new(SessionController::default(), Arc::new(client))
}

fn engine(server: &ServerGuard) -> SearchEngine {
    engine_for(format!("{}/api", server.url()))
}

#[tokio::test]
async fn test_thirty_minutes_one_combination() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/combinations")
        .match_query(Matcher::UrlEncoded("duration".into(), "30".into()))
        .with_status(200)
        .with_body(ONE_COMBINATION)
        .expect(1)
        .create_async()
        .await;

    let mut engine = engine(&server);
    let resolution = engine.search("30", None).await.unwrap();
    mock.assert_async().await;

    assert_eq!(resolution, Resolution::Applied { scroll_to_results: true });
    let SessionState::Succeeded(result) = engine.state() else {
        panic!("unexpected state: {:?}", engine.state());
    };
    let combo = &result.combinations()[0];
    assert_eq!(combo.total_time + combo.remaining_time as u64, 30 * 60);

    let View::Combinations { combinations } = render(engine.state(), &RenderOptions::default())
    else {
        panic!("expected combinations view");
    };
    assert_eq!(combinations.len(), 1);
    assert_eq!(combinations[0].videos[0].title, "Opening");
    assert_eq!(combinations[0].remaining, "0:02:00");
}

#[tokio::test]
async fn test_clock_format_and_out_of_range_never_reach_service() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/combinations")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut engine = engine(&server);

    let err = engine.search("00:30:00", None).await.unwrap_err();
    assert_eq!(err, ValidationError::UnsupportedFormat);
    assert!(matches!(
        render(engine.state(), &RenderOptions::default()),
        View::Error { inline: true, .. }
    ));

    let err = engine.search("1500", None).await.unwrap_err();
    assert!(matches!(err, ValidationError::OutOfRange { .. }));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_array_shows_no_combination() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/combinations")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let mut engine = engine(&server);
    let resolution = engine.search("5", None).await.unwrap();

    assert_eq!(resolution, Resolution::Applied { scroll_to_results: false });
    assert!(matches!(
        render(engine.state(), &RenderOptions::default()),
        View::Empty { .. }
    ));
}

#[tokio::test]
async fn test_service_error_message_shown_verbatim() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/combinations")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error": "duration too large"}"#)
        .create_async()
        .await;

    let mut engine = engine(&server);
    engine.search("999", None).await.unwrap();

    assert_eq!(
        render(engine.state(), &RenderOptions::default()),
        View::Error {
            message: "duration too large".to_string(),
            hint: None,
            inline: false,
        }
    );
}

#[tokio::test]
async fn test_unreachable_service_is_generic_error() {
    let mut engine = engine_for("http://127.0.0.1:1/api".to_string());
    engine.search("30", None).await.unwrap();

    match render(engine.state(), &RenderOptions::default()) {
        View::Error { message, inline, .. } => {
            assert_eq!(message, "An unexpected error occurred");
            assert!(!inline);
        }
        other => panic!("unexpected view: {:?}", other),
    }
}

#[tokio::test]
async fn test_later_submission_replaces_earlier_one() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/combinations")
        .match_query(Matcher::UrlEncoded("duration".into(), "30".into()))
        .with_status(200)
        .with_body(ONE_COMBINATION)
        .create_async()
        .await;
    server
        .mock("GET", "/api/combinations")
        .match_query(Matcher::UrlEncoded("duration".into(), "45".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let mut engine = engine(&server);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let first = engine.dispatch("30", None, tx.clone()).unwrap();
    let second = engine.dispatch("45", None, tx).unwrap();
    assert!(second > first);

    // whichever order the answers land in, only the second one sticks
    for _ in 0..2 {
        let outcome = rx.recv().await.unwrap();
        let ticket = outcome.0;
        let resolution = engine.apply(outcome);
        if ticket == first {
            assert_eq!(resolution, Resolution::Stale);
        }
    }

    assert!(matches!(
        render(engine.state(), &RenderOptions::default()),
        View::Empty { .. }
    ));
}
