//! End-to-end flows through the bridge and export.

use scorebook_core::{
    BoardState, Bridge, BridgeRequest, BridgeResponse, Channel, Config, GameKind, ScoreBoard,
    Verb, generate_tsv,
};
use serde_json::json;

fn open_bridge(dir: &tempfile::TempDir) -> Bridge<scorebook_core::SqliteStore> {
    let mut config = Config::default();
    config.store.data_dir = dir.path().to_path_buf();
    Bridge::open(&config).unwrap()
}

#[test]
fn test_requests_drive_board_state() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = open_bridge(&dir);
    let mut state = BoardState::new();

    let requests = [
        BridgeRequest::new(Channel::new(Verb::Fetch, GameKind::Arcaea), None),
        BridgeRequest::new(
            Channel::new(Verb::Insert, GameKind::Arcaea),
            Some(json!({ "name": "Ether Strike", "difficulty": 2, "score": 9_850_000, "constant": 9.1 })),
        ),
        BridgeRequest::new(
            Channel::new(Verb::Insert, GameKind::Arcaea),
            Some(json!({ "name": "Cyaegha", "difficulty": 2, "score": 9_300_000, "constant": 10.0 })),
        ),
        BridgeRequest::new(
            Channel::new(Verb::Update, GameKind::Arcaea),
            Some(json!({ "name": "Cyaegha", "difficulty": 2, "score": 9_600_000, "constant": 10.0 })),
        ),
        BridgeRequest::new(
            Channel::new(Verb::Remove, GameKind::Arcaea),
            Some(json!({ "name": "Ether Strike", "difficulty": 2 })),
        ),
    ];
    for request in &requests {
        let event = bridge.dispatch(request).unwrap();
        state = state.apply(event).unwrap();
    }

    let records = state.records(GameKind::Arcaea).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Cyaegha");
    assert_eq!(records[0].score, 9_600_000);

    let fetched = bridge.repository(GameKind::Arcaea).fetch_all().unwrap();
    assert_eq!(fetched, records);
}

#[test]
fn test_error_response_for_unknown_channel() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = open_bridge(&dir);
    let request = BridgeRequest {
        channel: "fetch-sdvx-score-data".to_string(),
        payload: None,
    };
    match bridge.handle(&request) {
        BridgeResponse::Error(message) => assert!(message.contains("fetch-sdvx-score-data")),
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn test_serve_then_export() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = open_bridge(&dir);
    let input = [
        json!({ "channel": "insert-chunithm-score-data",
                "payload": { "name": "Ultimate Force", "difficulty": 3, "score": 1_006_000, "constant": 14.4 } }),
        json!({ "channel": "insert-chunithm-score-data",
                "payload": { "name": "Disruptor Array", "difficulty": 3, "score": 1_008_000, "constant": 14.0 } }),
        json!({ "channel": "fetch-chunithm-score-data" }),
    ]
    .iter()
    .map(|v| v.to_string())
    .collect::<Vec<_>>()
    .join("\n");

    let mut output = Vec::new();
    let state = bridge.serve(input.as_bytes(), &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap().lines().count(), 3);

    let board = ScoreBoard::new(GameKind::Chunithm, state.records(GameKind::Chunithm).unwrap());
    let tsv = generate_tsv(&board);
    let names: Vec<&str> = tsv
        .lines()
        .skip(1)
        .map(|line| line.split('\t').next().unwrap())
        .collect();
    // 14.4 + 1.5 + 0.2 = 16.1 beats 14.0 + 2.0 = 16.0
    assert_eq!(names, ["Ultimate Force", "Disruptor Array"]);
}
