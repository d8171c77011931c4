#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, missing_debug_implementations, unreachable_pub)]
use serde_json::json;

mod common;

#[tokio::test]
async fn test_get_stats() {
    let app = common::TestApp::spawn().await;
    app.seed_messages().await;

    let stats = app.get_stats().await;

    assert_eq!(stats["total_messages"], 4);
    assert_eq!(stats["senders_count"], 3);
    assert_eq!(stats["first_message_ts"], "2025-01-01T10:00:00Z");
    assert_eq!(stats["last_message_ts"], "2025-01-01T13:00:00Z");

    let senders = stats["messages_per_sender"].as_array().unwrap();
    assert_eq!(senders.len(), 3);

    // Tie order between equal counts is unspecified; assert as a keyed map.
    let counts: std::collections::HashMap<&str, i64> =
        senders.iter().map(|s| (s["from"].as_str().unwrap(), s["count"].as_i64().unwrap())).collect();
    assert_eq!(counts["+1111111111"], 2);
    assert_eq!(counts["+2222222222"], 1);
    assert_eq!(counts["+3333333333"], 1);

    // The unique top sender is first.
    assert_eq!(senders[0]["from"], "+1111111111");
}

#[tokio::test]
async fn test_get_stats_empty_store() {
    let app = common::TestApp::spawn().await;

    let stats = app.get_stats().await;

    assert_eq!(stats["total_messages"], 0);
    assert_eq!(stats["senders_count"], 0);
    assert_eq!(stats["first_message_ts"], serde_json::Value::Null);
    assert_eq!(stats["last_message_ts"], serde_json::Value::Null);
    assert!(stats["messages_per_sender"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_stats_caps_top_senders_at_ten() {
    let app = common::TestApp::spawn().await;

    for i in 0..12 {
        let resp = app
            .post_webhook(&json!({
                "message_id": format!("m{i}"),
                "from": format!("+1{:09}", 100_000_000 + i),
                "to": "+9876543210",
                "ts": "2025-01-01T10:00:00Z"
            }))
            .await;
        assert!(resp.status().is_success());
    }

    let stats = app.get_stats().await;
    assert_eq!(stats["total_messages"], 12);
    assert_eq!(stats["senders_count"], 12);
    assert_eq!(stats["messages_per_sender"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_get_stats_duplicates_do_not_inflate_counts() {
    let app = common::TestApp::spawn().await;

    let body = json!({
        "message_id": "m1",
        "from": "+1234567890",
        "to": "+9876543210",
        "ts": "2025-01-01T10:00:00Z"
    });
    for _ in 0..3 {
        let resp = app.post_webhook(&body).await;
        assert!(resp.status().is_success());
    }

    let stats = app.get_stats().await;
    assert_eq!(stats["total_messages"], 1);
    assert_eq!(stats["senders_count"], 1);
    assert_eq!(stats["messages_per_sender"][0]["count"], 1);
}
