use cyberstream::response::Payload;
use cyberstream::state::AppState;
use serde_json::json;
use tokio::time::Instant;

mod common;
use common::mock_http::{MockHttp, Reply};
use common::mock_llm::MockLlm;
use common::{TestContext, QUOTE};

#[tokio::test]
async fn test_garbage_flood_never_fails() {
    let ctx = TestContext::new(MockHttp::new(), MockLlm::failing());
    let state = AppState::default();

    // Random garbage text, none of it a known verb
    let garbage = [
        "asdfghjkl",
        "!!! @@@ ###",
        "1234567890",
        "extremely long string that doesn't mean anything to the system at all but might cause buffer issues if we were in C but we are in Rust so it's just a long string",
        "ünïcödé ✨ 🚀",
        "dl://",
    ];

    for text in garbage {
        let res = ctx.processor.dispatch(text, &state, None).await;
        match res.as_ref().and_then(|r| r.payload()) {
            Some(Payload::Suggestion { suggestion, .. }) => assert!(!suggestion.is_empty()),
            other => panic!("'{text}' produced {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_malformed_arguments_never_panic() {
    let ctx = TestContext::new(MockHttp::new(), MockLlm::failing());
    let state = AppState::default();

    // Every upstream is unreachable; all of these must come back as failures
    let lines = [
        "dl not a url at all",
        "dl https://",
        "dl ftp://instagram.com/p/1",
        "pinterest 99999999999999999999999",
        "anime x -9223372036854775808",
        "video https://youtu.be/",
        "theme",
        "waiko 🐱",
    ];
    for line in lines {
        let res = ctx.processor.dispatch(line, &state, None).await;
        assert!(res.is_some(), "{line}");
    }
}

#[tokio::test]
async fn test_repeated_commands_stay_stable() {
    let http = MockHttp::new().route(QUOTE, Reply::Json(json!([{ "q": "Ship it.", "a": "Anon" }])));
    let ctx = TestContext::new(http, MockLlm::failing());
    let state = AppState::default();

    let start = Instant::now();
    for _ in 0..100 {
        let res = ctx.processor.dispatch("quote", &state, None).await.unwrap();
        assert!(res.is_success());
    }
    println!("Processed 100 commands in {:?}", start.elapsed());
    assert_eq!(ctx.http.calls().len(), 100);
}
